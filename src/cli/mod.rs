//! CLI module - argument parsing and subcommands

pub mod args;
pub mod drift;

pub use args::{Cli, Commands};
