//! Document intake: reads position descriptions and resumes from their input directories.
//!
//! Only plain-text files are read. PDFs and text files that are not valid UTF-8 are
//! skipped with a warning; everything else in the directory is ignored. Files are taken
//! in file-name order.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::errors::AppError;

pub const DEFAULT_PD_DIR: &str = "PositionDescription";
pub const DEFAULT_RESUME_DIR: &str = "Resumes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub text: String,
}

impl Document {
    /// File name for display, falling back to the full path.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Text,
    Pdf,
    Other,
}

fn classify(path: &Path) -> DocumentKind {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("txt") => DocumentKind::Text,
        Some("pdf") => DocumentKind::Pdf,
        _ => DocumentKind::Other,
    }
}

/// The first readable position description in `dir`, if there is one.
pub async fn load_position_description(dir: &Path) -> Result<Option<Document>, AppError> {
    for path in readable_files(dir).await? {
        if let Some(document) = read_document(path).await? {
            return Ok(Some(document));
        }
    }
    Ok(None)
}

/// Every readable resume in `dir`.
pub async fn load_resumes(dir: &Path) -> Result<Vec<Document>, AppError> {
    let mut documents = Vec::new();
    for path in readable_files(dir).await? {
        if let Some(document) = read_document(path).await? {
            documents.push(document);
        }
    }
    Ok(documents)
}

async fn readable_files(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| AppError::io(dir, e))?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| AppError::io(dir, e))? {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| AppError::io(&path, e))?;
        if !file_type.is_file() {
            continue;
        }
        match classify(&path) {
            DocumentKind::Text => files.push(path),
            DocumentKind::Pdf => {
                warn!(path = %path.display(), "Skipping PDF: text extraction is not supported");
            }
            DocumentKind::Other => debug!(path = %path.display(), "Ignoring unsupported file"),
        }
    }

    files.sort();
    Ok(files)
}

/// Reads one text file. `None` when the contents are not UTF-8.
async fn read_document(path: PathBuf) -> Result<Option<Document>, AppError> {
    let text = match tokio::fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
            warn!(path = %path.display(), "Skipping file that is not valid UTF-8");
            return Ok(None);
        }
        Err(e) => return Err(AppError::io(&path, e)),
    };
    debug!(path = %path.display(), chars = text.len(), "Read document");
    Ok(Some(Document { path, text }))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn dir_with(files: &[(&str, &str)]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    #[test]
    fn test_classify_by_extension() {
        assert_eq!(classify(Path::new("a.txt")), DocumentKind::Text);
        assert_eq!(classify(Path::new("A.TXT")), DocumentKind::Text);
        assert_eq!(classify(Path::new("cv.pdf")), DocumentKind::Pdf);
        assert_eq!(classify(Path::new("cv.docx")), DocumentKind::Other);
        assert_eq!(classify(Path::new("README")), DocumentKind::Other);
    }

    #[tokio::test]
    async fn test_load_resumes_reads_text_files_in_name_order() {
        let dir = dir_with(&[
            ("zoe.txt", "Zoe resume"),
            ("adam.txt", "Adam resume"),
            ("scan.pdf", "%PDF-1.4"),
            ("notes.md", "ignored"),
        ]);
        fs::create_dir(dir.path().join("archive.txt")).unwrap();

        let resumes = load_resumes(dir.path()).await.unwrap();
        let names: Vec<String> = resumes.iter().map(Document::name).collect();
        assert_eq!(names, vec!["adam.txt", "zoe.txt"]);
        assert_eq!(resumes[0].text, "Adam resume");
        assert_eq!(resumes[1].text, "Zoe resume");
    }

    #[tokio::test]
    async fn test_load_position_description_takes_first_text_file() {
        let dir = dir_with(&[("b_role.txt", "second"), ("a_role.txt", "first"), ("0.pdf", "x")]);

        let pd = load_position_description(dir.path()).await.unwrap().unwrap();
        assert_eq!(pd.name(), "a_role.txt");
        assert_eq!(pd.text, "first");
    }

    #[tokio::test]
    async fn test_load_position_description_empty_dir() {
        let dir = dir_with(&[("only.pdf", "x")]);
        assert_eq!(load_position_description(dir.path()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_non_utf8_text_file_is_skipped() {
        let dir = dir_with(&[("b.txt", "Bea resume")]);
        fs::write(dir.path().join("a.txt"), [0xff, 0xfe, 0x00, 0x41]).unwrap();

        let resumes = load_resumes(dir.path()).await.unwrap();
        assert_eq!(resumes.len(), 1);
        assert_eq!(resumes[0].name(), "b.txt");

        let pd = load_position_description(dir.path()).await.unwrap().unwrap();
        assert_eq!(pd.text, "Bea resume");
    }

    #[tokio::test]
    async fn test_missing_directory_is_io_error_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("Resumes");

        let err = load_resumes(&missing).await.unwrap_err();
        match err {
            AppError::Io { path, .. } => assert_eq!(path, missing),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
