//! CLI module - command-line interface for `gymctl`.

pub mod args;

pub use args::{Cli, Commands};
