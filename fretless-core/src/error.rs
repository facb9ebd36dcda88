//! Error types for fretboard generation.

use thiserror::Error;

use crate::pitch::LongNote;

/// Errors raised by the pitch model and the fretboard builder.
///
/// Every variant is detected synchronously before or during a build and is
/// returned to the caller unchanged. Turning these into user-facing messages
/// is the presentation layer's job.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FretboardError {
    #[error("reference pitch must be a positive number of Hz, got {hz}")]
    InvalidReferencePitch { hz: f64 },

    #[error("fret count must not be negative, got {count}")]
    InvalidFretCount { count: i64 },

    #[error("tuning has no strings")]
    EmptyTuning,

    #[error("open string {string} ({note}) is never reached by the sweep (highest note is B10)")]
    UnreachableOpenString { string: usize, note: LongNote },

    #[error(
        "string {string} recorded only {recorded} of {required} frets before the sweep ended"
    )]
    IncompleteString {
        string: usize,
        recorded: usize,
        required: usize,
    },

    #[error("semitone offset {offset} from A4 has no finite positive frequency at A4={reference_hz}Hz")]
    FrequencyOutOfRange { offset: i64, reference_hz: f64 },
    #[error("invalid note '{input}': {reason}")]
    InvalidNote { input: String, reason: String },
}

impl FretboardError {
    pub(crate) fn invalid_note(input: &str, reason: impl Into<String>) -> Self {
        FretboardError::InvalidNote {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
