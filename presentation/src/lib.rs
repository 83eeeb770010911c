//! Presentation layer for tier-salon
//!
//! This crate contains CLI definitions, output formatters
//! and live observers that render a salon in the terminal.

pub mod cli;
pub mod observer;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat, RunArgs};
pub use observer::{ConsoleObserver, SimpleObserver};
pub use output::console::{ConsoleFormatter, SalonReport};
