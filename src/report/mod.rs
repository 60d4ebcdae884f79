//! Reporting utilities: result sentences and formatted terminal output.
//!
//! We keep formatting code in one place so the CLI and the TUI render results
//! identically.

pub mod format;

pub use format::*;
