//! CLI module
//!
//! Command-line interface for paging through listings.
//!
//! # Commands
//!
//! - `fetch` - Print the items of a listing, one per line

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
