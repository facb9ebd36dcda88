//! # Fretless
//!
//! Command line front end for `fretless-core`: argument parsing, the
//! interactive tuning prompt, note highlighting and the text renderers.

pub mod app;
pub mod cli;
pub mod highlight;
pub mod ui;

pub use app::{FretlessApp, run};
pub use cli::Cli;
