//! # Pitch Model
//!
//! Deterministic mapping between a linear semitone index and note names,
//! octaves and equal-tempered frequencies.
//!
//! Two origins are in play:
//! - the *absolute semitone index* starts at C0 = 0 and drives note name and
//!   octave derivation, because octave boundaries fall on C;
//! - the *semitone offset* is signed and starts at A4 = 0, the anchor of the
//!   reference pitch.
//!
//! [`A4_INDEX`] reconciles the two.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FretboardError;

/// Number of semitones in one octave.
pub const SEMITONES_PER_OCTAVE: u32 = 12;

/// Absolute semitone index of A4 in the C0-origin sweep.
pub const A4_INDEX: u32 = 4 * SEMITONES_PER_OCTAVE + 9;

/// Highest octave produced by the fretboard sweep.
pub const MAX_SWEEP_OCTAVE: u32 = 10;

/// Number of sweep steps, C0 through B10 (11 full octaves).
pub const SWEEP_LEN: u32 = (MAX_SWEEP_OCTAVE + 1) * SEMITONES_PER_OCTAVE;

/// Largest octave accepted when parsing a long note.
const MAX_PARSED_OCTAVE: u32 = 9999;

/// Decimal places used when a frequency is displayed.
pub const FREQUENCY_DECIMALS: usize = 2;

/// Default reference pitch for A4 in Hz.
pub const DEFAULT_REFERENCE_PITCH_HZ: f64 = 440.0;

/// One of the 12 chromatic note names, sharp spelling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NoteName {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

/// The chromatic sequence beginning at C.
pub const NOTE_NAMES: [NoteName; 12] = [
    NoteName::C,
    NoteName::CSharp,
    NoteName::D,
    NoteName::DSharp,
    NoteName::E,
    NoteName::F,
    NoteName::FSharp,
    NoteName::G,
    NoteName::GSharp,
    NoteName::A,
    NoteName::ASharp,
    NoteName::B,
];

impl NoteName {
    /// Position within the octave, C = 0.
    pub fn semitone(self) -> u32 {
        self as u32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NoteName::C => "C",
            NoteName::CSharp => "C#",
            NoteName::D => "D",
            NoteName::DSharp => "D#",
            NoteName::E => "E",
            NoteName::F => "F",
            NoteName::FSharp => "F#",
            NoteName::G => "G",
            NoteName::GSharp => "G#",
            NoteName::A => "A",
            NoteName::ASharp => "A#",
            NoteName::B => "B",
        }
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for NoteName {
    type Err = FretboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NOTE_NAMES
            .iter()
            .copied()
            .find(|name| name.as_str() == trimmed)
            .ok_or_else(|| {
                FretboardError::invalid_note(s, "expected one of C C# D D# E F F# G G# A A# B")
            })
    }
}

/// Returns the note name at an absolute semitone index (C0 = 0).
pub fn note_name_at(absolute_semitone_index: u32) -> NoteName {
    NOTE_NAMES[(absolute_semitone_index % SEMITONES_PER_OCTAVE) as usize]
}

/// Returns the octave at an absolute semitone index (C0 = 0).
pub fn octave_index_at(absolute_semitone_index: u32) -> u32 {
    absolute_semitone_index / SEMITONES_PER_OCTAVE
}

/// A note name combined with an octave index, e.g. `E2`.
///
/// Ordering follows the chromatic sweep, so `B2 < C3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LongNote {
    pub name: NoteName,
    pub octave: u32,
}

impl LongNote {
    pub const fn new(name: NoteName, octave: u32) -> Self {
        Self { name, octave }
    }

    /// Builds the long note sounded at an absolute semitone index.
    pub fn from_index(absolute_semitone_index: u32) -> Self {
        Self {
            name: note_name_at(absolute_semitone_index),
            octave: octave_index_at(absolute_semitone_index),
        }
    }

    /// Absolute semitone index in the C0-origin sweep.
    pub fn index(&self) -> u32 {
        self.octave * SEMITONES_PER_OCTAVE + self.name.semitone()
    }

    /// Signed distance in semitones from A4.
    pub fn semitone_offset(&self) -> i64 {
        i64::from(self.index()) - i64::from(A4_INDEX)
    }

    /// Equal-tempered frequency of this note for the given reference pitch.
    pub fn frequency(&self, reference_pitch_hz: f64) -> Result<Frequency, FretboardError> {
        let reference = validate_reference_pitch(reference_pitch_hz)?;
        let offset = self.semitone_offset();
        i32::try_from(offset)
            .ok()
            .and_then(|offset| equal_tempered(offset, reference))
            .ok_or(FretboardError::FrequencyOutOfRange {
                offset,
                reference_hz: reference,
            })
    }
}

impl Ord for LongNote {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index())
    }
}

impl PartialOrd for LongNote {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for LongNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Pad as a whole so table columns line up for "C#3" and "E2" alike.
        f.pad(&format!("{}{}", self.name.as_str(), self.octave))
    }
}

impl FromStr for LongNote {
    type Err = FretboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| FretboardError::invalid_note(s, "missing octave number"))?;
        let (name, octave) = trimmed.split_at(split);

        if name.is_empty() {
            return Err(FretboardError::invalid_note(s, "missing note name"));
        }
        if name.ends_with('b') && name.len() == 2 {
            return Err(FretboardError::invalid_note(
                s,
                "flat spelling is not supported, use the sharp equivalent",
            ));
        }
        let name = name
            .parse::<NoteName>()
            .map_err(|_| FretboardError::invalid_note(s, format!("unknown note name '{name}'")))?;
        let octave = octave
            .parse::<u32>()
            .map_err(|_| FretboardError::invalid_note(s, format!("invalid octave '{octave}'")))?;
        if octave > MAX_PARSED_OCTAVE {
            return Err(FretboardError::invalid_note(s, "octave out of range"));
        }

        Ok(LongNote { name, octave })
    }
}

impl TryFrom<String> for LongNote {
    type Error = FretboardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LongNote> for String {
    fn from(note: LongNote) -> Self {
        note.to_string()
    }
}

/// A frequency in Hz at full precision.
///
/// Rounding happens only when the value is displayed; `{}` uses
/// [`FREQUENCY_DECIMALS`] places unless the format string names a precision.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Frequency(f64);

impl Frequency {
    pub fn hz(self) -> f64 {
        self.0
    }

    /// Formats to a fixed number of decimal places.
    pub fn format(self, decimals: usize) -> String {
        format!("{:.*}", decimals, self.0)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(_) => fmt::Display::fmt(&self.0, f),
            None => f.pad(&self.format(FREQUENCY_DECIMALS)),
        }
    }
}

/// Rejects reference pitches that are not strictly positive and finite.
pub fn validate_reference_pitch(reference_pitch_hz: f64) -> Result<f64, FretboardError> {
    if reference_pitch_hz.is_finite() && reference_pitch_hz > 0.0 {
        Ok(reference_pitch_hz)
    } else {
        Err(FretboardError::InvalidReferencePitch {
            hz: reference_pitch_hz,
        })
    }
}

/// Computes `reference_pitch_hz * 2^(semitone_offset / 12)`.
///
/// `semitone_offset` is the signed distance from A4, so an offset of 0 yields
/// the reference pitch exactly. Offsets whose frequency underflows to zero or
/// overflows `f64` fail with `FrequencyOutOfRange`.
pub fn frequency_at(semitone_offset: i32, reference_pitch_hz: f64) -> Result<Frequency, FretboardError> {
    let reference = validate_reference_pitch(reference_pitch_hz)?;
    equal_tempered(semitone_offset, reference).ok_or(FretboardError::FrequencyOutOfRange {
        offset: i64::from(semitone_offset),
        reference_hz: reference,
    })
}

/// Frequency for an already validated reference pitch, or `None` when the
/// result is not finite and strictly positive.
///
/// Whole octaves are applied as exact powers of two and only the remaining
/// 0..12 semitones go through `powf`, so octave multiples of the reference
/// are reproduced without drift.
pub(crate) fn equal_tempered(semitone_offset: i32, reference_pitch_hz: f64) -> Option<Frequency> {
    let octaves = semitone_offset.div_euclid(SEMITONES_PER_OCTAVE as i32);
    let steps = semitone_offset.rem_euclid(SEMITONES_PER_OCTAVE as i32);
    let hz = reference_pitch_hz
        * 2.0_f64.powi(octaves)
        * 2.0_f64.powf(f64::from(steps) / f64::from(SEMITONES_PER_OCTAVE));
    (hz.is_finite() && hz > 0.0).then_some(Frequency(hz))
}

/// Lazy sweep of `(LongNote, Frequency)` pairs starting at C0.
///
/// Each call starts a fresh sweep. Callers bound it with `take`. The sweep
/// ends early at the first note whose frequency is not representable.
pub fn sweep(
    reference_pitch_hz: f64,
) -> Result<impl Iterator<Item = (LongNote, Frequency)>, FretboardError> {
    let reference = validate_reference_pitch(reference_pitch_hz)?;
    Ok((0u32..).map_while(move |index| {
        let offset = i32::try_from(index).ok()? - A4_INDEX as i32;
        let frequency = equal_tempered(offset, reference)?;
        Some((LongNote::from_index(index), frequency))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn note(s: &str) -> LongNote {
        s.parse().unwrap()
    }

    #[test]
    fn reference_pitch_is_reproduced_exactly() {
        assert_eq!(frequency_at(0, 440.0).unwrap().hz(), 440.0);
        assert_eq!(frequency_at(0, 432.0).unwrap().hz(), 432.0);
        assert_eq!(frequency_at(0, 415.3).unwrap().hz(), 415.3);
    }

    #[test]
    fn octaves_double_and_halve() {
        assert_eq!(frequency_at(12, 440.0).unwrap().hz(), 880.0);
        assert_eq!(frequency_at(-12, 440.0).unwrap().hz(), 220.0);
        assert_eq!(frequency_at(-57, 440.0).unwrap().format(3), "16.352");
    }

    #[test]
    fn extreme_offsets_are_rejected() {
        for offset in [-20_000, 20_000, i32::MIN, i32::MAX] {
            assert_eq!(
                frequency_at(offset, 440.0),
                Err(FretboardError::FrequencyOutOfRange {
                    offset: i64::from(offset),
                    reference_hz: 440.0,
                })
            );
        }
        // Still representable at both ends of the f64 range.
        assert!(frequency_at(-12_000, 440.0).unwrap().hz() > 0.0);
        assert!(frequency_at(12_000, 440.0).unwrap().hz().is_finite());
    }

    #[test]
    fn far_octaves_report_their_offset() {
        let err = note("C9999").frequency(440.0).unwrap_err();
        assert!(matches!(
            err,
            FretboardError::FrequencyOutOfRange { offset: 119_931, .. }
        ));
        assert!(note("B10").frequency(440.0).is_ok());
    }

    #[test]
    fn sweep_stops_before_overflow() {
        let last = sweep(440.0).unwrap().last().unwrap();
        assert!(last.1.hz().is_finite());
        assert!(sweep(440.0).unwrap().count() > SWEEP_LEN as usize);
    }

    #[test]
    fn non_positive_reference_is_rejected() {
        for hz in [0.0, -440.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                frequency_at(0, hz),
                Err(FretboardError::InvalidReferencePitch { .. })
            ));
        }
    }

    #[test]
    fn sweep_starts_at_c0() {
        assert_eq!(note_name_at(0), NoteName::C);
        assert_eq!(octave_index_at(0), 0);
        assert_eq!(LongNote::from_index(0).to_string(), "C0");
        assert_eq!(LongNote::from_index(A4_INDEX), note("A4"));
        assert_eq!(LongNote::from_index(SWEEP_LEN - 1), note("B10"));
    }

    #[test]
    fn note_names_cycle_every_twelve() {
        for index in 0..SWEEP_LEN {
            assert_eq!(note_name_at(index), note_name_at(index + 12));
            assert_eq!(octave_index_at(index) + 1, octave_index_at(index + 12));
        }
    }

    #[test]
    fn long_note_parsing() {
        assert_eq!(note("E2"), LongNote::new(NoteName::E, 2));
        assert_eq!(note(" F#3 "), LongNote::new(NoteName::FSharp, 3));
        assert_eq!(note("C10"), LongNote::new(NoteName::C, 10));
        assert_eq!(note("C#3").to_string(), "C#3");

        for bad in ["", "E", "2", "H2", "Bb2", "E-1", "E2x", "C99999"] {
            assert!(
                matches!(bad.parse::<LongNote>(), Err(FretboardError::InvalidNote { .. })),
                "'{bad}' should not parse"
            );
        }
    }

    #[test]
    fn long_notes_order_by_pitch() {
        assert!(note("B2") < note("C3"));
        assert!(note("E2") < note("A2"));
        assert_eq!(note("A4").semitone_offset(), 0);
        assert_eq!(note("E2").semitone_offset(), -29);
    }

    #[test]
    fn long_note_frequency_matches_sweep() {
        let swept: Vec<_> = sweep(440.0).unwrap().take(SWEEP_LEN as usize).collect();
        for (long_note, frequency) in swept {
            assert_eq!(long_note.frequency(440.0).unwrap(), frequency);
        }
    }

    #[test]
    fn sweep_restarts_from_c0() {
        let first: Vec<_> = sweep(440.0).unwrap().take(3).collect();
        let second: Vec<_> = sweep(440.0).unwrap().take(3).collect();
        assert_eq!(first, second);
        assert_eq!(first[0].0, note("C0"));
    }

    #[test]
    fn frequency_display_rounds_only_at_format() {
        let e2 = note("E2").frequency(440.0).unwrap();
        assert_eq!(e2.to_string(), "82.41");
        assert_eq!(format!("{e2:.4}"), "82.4069");
        assert_eq!(format!("{e2:>8}"), "   82.41");
    }
}
