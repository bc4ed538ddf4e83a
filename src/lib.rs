pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod logging;
pub mod pipeline;
pub mod process;
pub mod ui;
pub mod upstream;
pub mod workspace;

pub use error::{BotBumpError, Result};
