//! Fill / Wrap: greedy word-packing of model output for terminal display.
//!
//! # Rules
//! - Tokens are runs of non-space characters; only the space character separates them.
//!   Tabs stay inside their token. Empty tokens from repeated spaces are dropped.
//! - A newline already in the text is a hard break. It starts the token that follows it,
//!   so the break survives tokenization and resets the column counter. A newline run at
//!   the very end of the text stays on the last word instead, so the output still ends
//!   with a space and `wrap` never ends with an empty line.
//! - With `collapse_newlines`, the hard breaks are removed after they have split the
//!   surrounding words, so `"a\nb"` packs as `"a b "` rather than `"ab "`.
//! - A line always receives at least one token. A token wider than the limit sits alone
//!   on its own line and is never split.
//! - Every emitted word is followed by one space, including the last one.
//!
//! Re-filling already-filled text is not idempotent: the trailing spaces shift line
//! lengths by one column and may move a break.

use thiserror::Error;

/// Column width used when nothing else is configured.
pub const DEFAULT_WIDTH: usize = 120;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WrapError {
    #[error("wrap width must be at least 1 column (got {0})")]
    InvalidWidth(usize),
}

/// Reusable wrap configuration. The width is validated once, at construction, so the
/// `fill` / `wrap` methods cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordWrap {
    width: usize,
    collapse_newlines: bool,
}

impl Default for WordWrap {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            collapse_newlines: false,
        }
    }
}

impl WordWrap {
    pub fn new(width: usize, collapse_newlines: bool) -> Result<Self, WrapError> {
        if width == 0 {
            return Err(WrapError::InvalidWidth(width));
        }
        Ok(Self {
            width,
            collapse_newlines,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Reflows `text` into a single string with inserted line breaks.
    pub fn fill(&self, text: &str) -> String {
        let isolated = isolate_newlines(text);
        let prepared = if self.collapse_newlines {
            isolated.replace('\n', "")
        } else {
            isolated
        };

        let mut out = String::with_capacity(prepared.len() + prepared.len() / self.width + 1);
        let mut column = 0_usize;

        for token in prepared.split(' ').filter(|t| !t.is_empty()) {
            if token.starts_with('\n') {
                // Hard break: no width check, the column restarts after the newline(s).
                out.push_str(token);
                column = 0;
                let rest = token.trim_start_matches('\n');
                if !rest.is_empty() {
                    out.push(' ');
                    column = rest.chars().count() + 1;
                }
                continue;
            }

            let len = token.chars().count();
            if column > 0 && column + len >= self.width {
                out.push('\n');
                column = 0;
            }
            out.push_str(token);
            out.push(' ');
            column += len + 1;
        }

        out
    }

    /// Same as [`WordWrap::fill`], split into lines.
    pub fn wrap(&self, text: &str) -> Vec<String> {
        self.fill(text).split('\n').map(String::from).collect()
    }
}

/// Reflows `text` to at most `width` columns. See the module docs for the packing rules.
pub fn fill(text: &str, width: usize, collapse_newlines: bool) -> Result<String, WrapError> {
    Ok(WordWrap::new(width, collapse_newlines)?.fill(text))
}

/// Reflows `text` and returns the resulting lines.
pub fn wrap(text: &str, width: usize, collapse_newlines: bool) -> Result<Vec<String>, WrapError> {
    Ok(WordWrap::new(width, collapse_newlines)?.wrap(text))
}

/// Puts a space in front of every newline run so the run begins the next token
/// instead of trailing the previous one. A run that reaches the end of the text is
/// left attached to the last token.
fn isolate_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.matches('\n').count());
    let mut prev: Option<char> = None;
    for (i, ch) in text.char_indices() {
        if ch == '\n'
            && prev.is_some_and(|p| p != '\n')
            && !text[i..].bytes().all(|b| b == b'\n')
        {
            out.push(' ');
        }
        out.push(ch);
        prev = Some(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASSESSMENT: &str = "Thank you for providing the position description and the resume. \
        After reviewing both documents, I would rate the candidate's suitability for the job as a 7 out of 10.\n\n    \
        The candidate has relevant experience in the field and has demonstrated skills that match the \
        requirements listed in the position description.\n   \n    \
        Overall, the candidate has potential to be a strong fit for the job.";

    fn fill_default(text: &str) -> String {
        WordWrap::default().fill(text)
    }

    #[test]
    fn test_default_config_is_120_without_collapse() {
        let w = WordWrap::default();
        assert_eq!(w.width(), 120);
        assert_eq!(w, WordWrap::new(120, false).unwrap());
    }

    #[test]
    fn test_zero_width_is_rejected() {
        assert_eq!(WordWrap::new(0, false), Err(WrapError::InvalidWidth(0)));
        assert_eq!(fill("abc", 0, true), Err(WrapError::InvalidWidth(0)));
        assert!(wrap("abc", 0, false).is_err());
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(fill_default(""), "");
        assert_eq!(fill_default("    "), "");
    }

    #[test]
    fn test_single_word_keeps_trailing_space() {
        assert_eq!(fill_default("hello"), "hello ");
    }

    #[test]
    fn test_greedy_packing_breaks_before_overflowing_word() {
        assert_eq!(fill("aaa bbb ccc", 8, false).unwrap(), "aaa bbb \nccc ");
    }

    #[test]
    fn test_word_reaching_width_exactly_moves_to_next_line() {
        // column 3 + "cd" (2) == 5 -> break
        assert_eq!(fill("ab cd", 5, false).unwrap(), "ab \ncd ");
        assert_eq!(fill("ab cd", 6, false).unwrap(), "ab cd ");
    }

    #[test]
    fn test_newline_is_hard_break_on_next_token() {
        assert_eq!(fill("a\nb", 120, false).unwrap(), "a \nb ");
    }

    #[test]
    fn test_collapsed_newline_still_separates_words() {
        assert_eq!(fill("a\nb", 120, true).unwrap(), "a b ");
    }

    #[test]
    fn test_consecutive_spaces_are_skipped() {
        assert_eq!(fill_default("a  b"), "a b ");
        assert_eq!(fill_default("  a     b  "), "a b ");
    }

    #[test]
    fn test_oversized_token_is_placed_whole_on_its_own_line() {
        assert_eq!(fill("abcdefgh", 5, false).unwrap(), "abcdefgh ");
        assert_eq!(
            fill("hi abcdefgh yo", 5, false).unwrap(),
            "hi \nabcdefgh \nyo "
        );
    }

    #[test]
    fn test_width_one_puts_each_word_on_a_line() {
        assert_eq!(fill("a b c", 1, false).unwrap(), "a \nb \nc ");
    }

    #[test]
    fn test_hard_break_resets_column() {
        // "bb " starts the new line at column 3, so "cc" still fits
        assert_eq!(fill("aaaa\nbb cc", 8, false).unwrap(), "aaaa \nbb cc ");
    }

    #[test]
    fn test_blank_line_between_paragraphs_is_preserved() {
        assert_eq!(fill_default("one.\n\ntwo"), "one. \n\ntwo ");
        assert_eq!(wrap("one.\n\ntwo", 120, false).unwrap(), vec!["one. ", "", "two "]);
    }

    #[test]
    fn test_indentation_after_newline_is_dropped() {
        assert_eq!(fill_default("x\n    y"), "x \ny ");
    }

    #[test]
    fn test_trailing_newline_stays_on_last_word() {
        assert_eq!(fill_default("a\n"), "a\n ");
        assert_eq!(wrap("a\n", 120, false).unwrap(), vec!["a", " "]);
        assert_eq!(fill_default("Rating: 7/10.\n\n"), "Rating: 7/10.\n\n ");
        assert_eq!(fill("a\n", 120, true).unwrap(), "a ");
    }

    #[test]
    fn test_output_ends_with_space_after_trailing_newline() {
        for text in ["a\n", "one\ntwo\n", "x\n\ny\n\n", ASSESSMENT] {
            let with_newline = format!("{text}\n");
            let filled = fill_default(&with_newline);
            assert!(filled.ends_with(' '), "{filled:?} should end with a space");
            let lines = wrap(&with_newline, 120, false).unwrap();
            assert_ne!(lines.last().map(String::as_str), Some(""));
        }
        // Interior breaks are unaffected.
        assert_eq!(fill_default("a\nb\n"), "a \nb\n ");
    }

    #[test]
    fn test_leading_newline_is_kept() {
        assert_eq!(fill_default("\nabc"), "\nabc ");
    }

    #[test]
    fn test_tabs_stay_inside_tokens() {
        assert_eq!(fill_default("a\tb c"), "a\tb c ");
    }

    #[test]
    fn test_length_is_counted_in_chars_not_bytes() {
        // "héllo" is 5 chars but 6 bytes
        assert_eq!(fill("héllo wörld", 12, false).unwrap(), "héllo wörld ");
        assert_eq!(fill("héllo wörld", 11, false).unwrap(), "héllo \nwörld ");
    }

    #[test]
    fn test_wrap_matches_split_fill() {
        for (width, collapse) in [(120, false), (120, true), (30, false), (7, true), (1, false)] {
            let filled = fill(ASSESSMENT, width, collapse).unwrap();
            let expected: Vec<String> = filled.split('\n').map(String::from).collect();
            assert_eq!(wrap(ASSESSMENT, width, collapse).unwrap(), expected);
        }
    }

    #[test]
    fn test_lines_stay_under_width_without_hard_breaks() {
        let text = ASSESSMENT.replace('\n', " ");
        let longest = text.split(' ').map(|t| t.chars().count()).max().unwrap();
        for width in [longest + 1, 20, 40, 80, 120] {
            for line in wrap(&text, width, false).unwrap() {
                let visible = line.strip_suffix(' ').unwrap_or(&line);
                assert!(
                    visible.chars().count() < width,
                    "line {visible:?} reaches width {width}"
                );
            }
        }
    }

    #[test]
    fn test_collapse_produces_single_paragraph() {
        let filled = fill(ASSESSMENT, 120, true).unwrap();
        assert!(!filled.contains("\n\n"));
        assert!(filled.starts_with("Thank you for providing"));
        assert!(filled.ends_with("job. "));
    }

    #[test]
    fn test_free_functions_match_config_object() {
        let w = WordWrap::new(40, true).unwrap();
        assert_eq!(w.fill(ASSESSMENT), fill(ASSESSMENT, 40, true).unwrap());
        assert_eq!(w.wrap(ASSESSMENT), wrap(ASSESSMENT, 40, true).unwrap());
    }
}
