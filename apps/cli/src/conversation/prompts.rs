// Prompt text for the assessment conversation.
// Prefixes are prepended to user-supplied text before it is stored in the context.

/// System prompt sent first in every request.
pub const SYSTEM_PROMPT: &str = "You take in a position description and a resume and briefly explain how \
    suited they are for the job and then give a rating 1-10 based on how qualified they are. \
    You also value experience in a related field the most. Also the stated degree level is a minimum.";

pub const CONTEXT_PREFIX: &str = "Before I send the PD here's some context: ";

pub const POSITION_DESCRIPTION_PREFIX: &str = "Here is the position description:\n\n";

pub const RESUME_PREFIX: &str = "Here is the resume:\n\n";

/// Canned assistant turn that follows the extra-context slot.
pub const CONTEXT_ACK: &str = "Ok I'll keep that in mind. ";

/// Canned assistant turn that follows the position-description slot.
pub const POSITION_DESCRIPTION_ACK: &str = "Ok next send the resume";
