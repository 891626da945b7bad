// Text post-processing for terminal output.

pub mod wrap;

pub use wrap::{WordWrap, WrapError};
