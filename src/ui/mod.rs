//! User interface module - terminal output only; the bot never prompts.

pub mod formatter;

pub use formatter::{display_error, display_outcome, display_status, display_success};
