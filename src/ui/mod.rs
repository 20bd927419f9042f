//! Konsolgränssnitt: radbaserad inmatning och utskrift

pub mod console;
pub mod display;
pub mod prompt;

pub use console::{Console, StdConsole};

#[cfg(test)]
pub use console::ScriptedConsole;
