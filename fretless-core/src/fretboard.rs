//! # Fretboard Builder
//!
//! Builds the per-string fret table for a tuning by sweeping the chromatic
//! scale once from C0 to B10.
//!
//! ## Algorithm
//! 1. Each swept long note is compared against every open-string note.
//! 2. A string becomes active the first time its open note is swept and stays
//!    active for the rest of the sweep.
//! 3. Every active string receives the swept note as its next fret until it
//!    holds `max_fret_count + 1` entries.
//! 4. The sweep stops once every string is complete, or at B10.
//!
//! Strings are returned in declared order; reversing them for display is up
//! to the caller. A string still short of frets at B10 makes `build` fail,
//! while `build_partial` hands back the board with that string cut short.

use log::{debug, info};

use crate::error::FretboardError;
use crate::pitch::{self, DEFAULT_REFERENCE_PITCH_HZ, Frequency, LongNote, SWEEP_LEN};
use crate::tuning::Tuning;

/// Default number of frets above the open string.
pub const DEFAULT_FRET_COUNT: u32 = 24;

/// One position on one string.
#[derive(Debug, Clone, PartialEq)]
pub struct FretEntry<T = ()> {
    /// 0 is the open string.
    pub fret: u32,
    pub note: LongNote,
    pub frequency: Frequency,
    /// Value produced by the tagging hook, `()` for untagged builds.
    pub tag: T,
}

/// Fret tables for every string of a tuning, in declared string order.
///
/// Notes rise by one semitone per fret from the open-string note. A board
/// from `build` holds exactly the frets `0..=max_fret_count` on every string.
/// The strings a `PartialFretboard` lists as unfinished hold fewer.
#[derive(Debug, Clone, PartialEq)]
pub struct Fretboard<T = ()> {
    strings: Vec<Vec<FretEntry<T>>>,
    max_fret_count: u32,
    reference_pitch_hz: f64,
}

impl<T> Fretboard<T> {
    pub fn strings(&self) -> &[Vec<FretEntry<T>>] {
        &self.strings
    }

    pub fn string(&self, string: usize) -> Option<&[FretEntry<T>]> {
        self.strings.get(string).map(Vec::as_slice)
    }

    pub fn entry(&self, string: usize, fret: u32) -> Option<&FretEntry<T>> {
        self.string(string)?.get(fret as usize)
    }

    pub fn string_count(&self) -> usize {
        self.strings.len()
    }

    pub fn max_fret_count(&self) -> u32 {
        self.max_fret_count
    }

    pub fn reference_pitch_hz(&self) -> f64 {
        self.reference_pitch_hz
    }
}

/// A string the sweep ended on before all of its frets were recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnfinishedString {
    pub string: usize,
    pub recorded: usize,
    pub required: usize,
}

impl From<UnfinishedString> for FretboardError {
    fn from(unfinished: UnfinishedString) -> Self {
        FretboardError::IncompleteString {
            string: unfinished.string,
            recorded: unfinished.recorded,
            required: unfinished.required,
        }
    }
}

/// Everything one sweep recorded, including strings it cut short.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialFretboard<T = ()> {
    pub fretboard: Fretboard<T>,
    /// In declared string order; empty when every string is complete.
    pub unfinished: Vec<UnfinishedString>,
}

impl<T> PartialFretboard<T> {
    pub fn is_complete(&self) -> bool {
        self.unfinished.is_empty()
    }

    /// The fretboard, or `IncompleteString` for the first unfinished string.
    pub fn into_complete(self) -> Result<Fretboard<T>, FretboardError> {
        match self.unfinished.first() {
            Some(&unfinished) => Err(unfinished.into()),
            None => Ok(self.fretboard),
        }
    }
}

/// Validated build parameters.
///
/// A builder holds no state between builds, so one instance can build any
/// number of fretboards, from any thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FretboardBuilder {
    max_fret_count: u32,
    reference_pitch_hz: f64,
}

impl Default for FretboardBuilder {
    fn default() -> Self {
        Self {
            max_fret_count: DEFAULT_FRET_COUNT,
            reference_pitch_hz: DEFAULT_REFERENCE_PITCH_HZ,
        }
    }
}

impl FretboardBuilder {
    /// Rejects negative fret counts and non-positive reference pitches.
    pub fn new(max_fret_count: i64, reference_pitch_hz: f64) -> Result<Self, FretboardError> {
        let max_fret_count = u32::try_from(max_fret_count)
            .map_err(|_| FretboardError::InvalidFretCount {
                count: max_fret_count,
            })?;
        let reference_pitch_hz = pitch::validate_reference_pitch(reference_pitch_hz)?;
        Ok(Self {
            max_fret_count,
            reference_pitch_hz,
        })
    }

    pub fn max_fret_count(&self) -> u32 {
        self.max_fret_count
    }

    pub fn reference_pitch_hz(&self) -> f64 {
        self.reference_pitch_hz
    }

    pub fn build(&self, tuning: &Tuning) -> Result<Fretboard, FretboardError> {
        self.build_tagged(tuning, |_| ())
    }

    /// Builds a fretboard whose entries carry `tagger(note)`.
    ///
    /// The tagger is called once per recorded entry, in sweep order.
    pub fn build_tagged<T, F>(&self, tuning: &Tuning, tagger: F) -> Result<Fretboard<T>, FretboardError>
    where
        F: FnMut(&LongNote) -> T,
    {
        self.build_partial_tagged(tuning, tagger)?.into_complete()
    }

    pub fn build_partial(&self, tuning: &Tuning) -> Result<PartialFretboard, FretboardError> {
        self.build_partial_tagged(tuning, |_| ())
    }

    /// Like `build_tagged`, but strings the sweep cuts short are reported
    /// alongside the board instead of failing the build.
    ///
    /// Parameter and tuning errors still fail.
    pub fn build_partial_tagged<T, F>(
        &self,
        tuning: &Tuning,
        mut tagger: F,
    ) -> Result<PartialFretboard<T>, FretboardError>
    where
        F: FnMut(&LongNote) -> T,
    {
        let open_strings = tuning.notation();
        if open_strings.is_empty() {
            return Err(FretboardError::EmptyTuning);
        }
        if let Some((string, note)) = open_strings
            .iter()
            .enumerate()
            .find(|(_, note)| note.index() >= SWEEP_LEN)
        {
            return Err(FretboardError::UnreachableOpenString {
                string,
                note: *note,
            });
        }

        let required = self.max_fret_count as usize + 1;
        let mut strings: Vec<Vec<FretEntry<T>>> = open_strings
            .iter()
            .map(|_| Vec::with_capacity(required.min(SWEEP_LEN as usize)))
            .collect();
        let mut active: Vec<usize> = Vec::with_capacity(open_strings.len());
        let mut complete = 0;

        for (index, (note, frequency)) in pitch::sweep(self.reference_pitch_hz)?
            .take(SWEEP_LEN as usize)
            .enumerate()
        {
            debug!("index={index} note={note} freq={frequency:.4}Hz");

            for (string, open) in open_strings.iter().enumerate() {
                if *open == note {
                    debug!("string {string} opens at {note}");
                    active.push(string);
                }
            }

            for &string in &active {
                let frets = &mut strings[string];
                let fret = frets.len();
                if fret >= required {
                    continue;
                }
                frets.push(FretEntry {
                    fret: fret as u32,
                    note,
                    frequency,
                    tag: tagger(&note),
                });
                if frets.len() == required {
                    complete += 1;
                }
            }

            if complete == strings.len() {
                break;
            }
        }

        let unfinished: Vec<UnfinishedString> = strings
            .iter()
            .enumerate()
            .filter(|(_, frets)| frets.len() < required)
            .map(|(string, frets)| UnfinishedString {
                string,
                recorded: frets.len(),
                required,
            })
            .collect();

        if unfinished.is_empty() {
            info!(
                "built fretboard for {tuning}: {} strings, {} frets, A4={}Hz",
                strings.len(),
                self.max_fret_count,
                self.reference_pitch_hz
            );
        } else {
            info!(
                "built partial fretboard for {tuning}: {} of {} strings cut short",
                unfinished.len(),
                strings.len()
            );
        }

        Ok(PartialFretboard {
            fretboard: Fretboard {
                strings,
                max_fret_count: self.max_fret_count,
                reference_pitch_hz: self.reference_pitch_hz,
            },
            unfinished,
        })
    }
}

/// Builds the untagged fretboard for `tuning`.
pub fn build_fretboard(
    tuning: &Tuning,
    max_fret_count: i64,
    reference_pitch_hz: f64,
) -> Result<Fretboard, FretboardError> {
    FretboardBuilder::new(max_fret_count, reference_pitch_hz)?.build(tuning)
}
