//! Command-line interface for Sprout.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, CreateArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
