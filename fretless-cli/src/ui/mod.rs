//! # UI Module
//!
//! This module contains the text renderers of the fretless command line tool.

pub mod fretboard_display;
pub mod tables;
