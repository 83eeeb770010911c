//! Salon observers for the terminal

pub mod console;

pub use console::{ConsoleObserver, SimpleObserver, render_message};
