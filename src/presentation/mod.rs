//! Console surface: one-shot subcommand handlers and the interactive browser.

pub mod browse;
pub mod handlers;
pub mod print;
