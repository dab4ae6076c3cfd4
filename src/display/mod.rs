pub mod console;

pub use console::{render, ConsoleDisplay};
