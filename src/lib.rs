//! `exam-score` library crate.
//!
//! The binary (`exam`) is a thin wrapper around this library so that:
//!
//! - the form, record builder and pipeline are testable without a terminal
//! - the same workflow backs both the interactive form and one-shot commands

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod form;
pub mod logging;
pub mod models;
pub mod report;
pub mod tui;
