// fretless-core/src/lib.rs

//! The core logic for the fretless fretboard renderer.
//! This crate is responsible for the pitch model, tunings and the
//! fretboard builder. It is completely headless and contains no
//! terminal or printing code.

pub mod error;
pub mod fretboard;
pub mod octaves;
pub mod pitch;
pub mod tuning;

pub use error::FretboardError;
pub use fretboard::{
    DEFAULT_FRET_COUNT, FretEntry, Fretboard, FretboardBuilder, PartialFretboard, UnfinishedString,
    build_fretboard,
};
pub use pitch::{
    DEFAULT_REFERENCE_PITCH_HZ, Frequency, LongNote, NoteName, frequency_at, note_name_at,
    octave_index_at,
};
pub use tuning::{CatalogError, Tuning, TuningCatalog, TuningEntry};
