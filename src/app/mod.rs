//! Console front-end.
//!
//! Stands in for the chat host: replies go to stdout and nicknames are
//! resolved against a table given on the command line.

mod console;

// Re-export public API
pub use console::{ConsoleReply, StaticUsers};
