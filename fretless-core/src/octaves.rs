//! Names of the C octaves C0..C10.
//!
//! In MIDI software the middle C can differ from the classical piano
//! convention (C3-C5); this table follows the classical one, C4.

use crate::error::FretboardError;
use crate::pitch::{Frequency, LongNote, MAX_SWEEP_OCTAVE, NoteName};

/// Reference names of one C.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct COctaveName {
    pub octave: u32,
    /// Helmholtz notation.
    pub name_short: &'static str,
    pub name_long: &'static str,
    pub name_alt: &'static str,
}

pub const C_OCTAVE_NAMES: [COctaveName; (MAX_SWEEP_OCTAVE + 1) as usize] = [
    COctaveName { octave: 0, name_short: "C͵͵", name_long: "subcontra", name_alt: "" },
    COctaveName { octave: 1, name_short: "C͵", name_long: "contra", name_alt: "" },
    COctaveName { octave: 2, name_short: "C", name_long: "great", name_alt: "low/cello C, 8' C'" },
    COctaveName { octave: 3, name_short: "c", name_long: "small", name_alt: "tenor C, 4' C" },
    COctaveName { octave: 4, name_short: "c′", name_long: "one-lined", name_alt: "middle C (classical piano)" },
    COctaveName { octave: 5, name_short: "c′′", name_long: "two-lined", name_alt: "high/top/treble C" },
    COctaveName { octave: 6, name_short: "c′′′", name_long: "three-lined", name_alt: "(high)/top/soprano C" },
    COctaveName { octave: 7, name_short: "c′′′′", name_long: "four-lined", name_alt: "double high C" },
    COctaveName { octave: 8, name_short: "c′′′′′", name_long: "five-lined", name_alt: "triple high C" },
    COctaveName { octave: 9, name_short: "c′′′′′′", name_long: "six-lined", name_alt: "quadruple high C" },
    COctaveName { octave: 10, name_short: "c′′′′′′′", name_long: "seven-lined", name_alt: "quintuple high C" },
];

/// One row of the C-octave table for a given reference pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct COctave {
    pub note: LongNote,
    pub frequency: Frequency,
    pub names: COctaveName,
}

/// Builds the C0..C10 table with frequencies for `reference_pitch_hz`.
pub fn c_octaves(reference_pitch_hz: f64) -> Result<Vec<COctave>, FretboardError> {
    C_OCTAVE_NAMES
        .iter()
        .map(|names| {
            let note = LongNote::new(NoteName::C, names.octave);
            Ok(COctave {
                note,
                frequency: note.frequency(reference_pitch_hz)?,
                names: *names,
            })
        })
        .collect()
}
