//! # Highlight Scheme
//!
//! Maps notes to terminal colors. A note is looked up by its exact long note
//! (`"E2"`) first, then by its note name (`"E"`), then falls back to the
//! scheme default. No color means the note is printed unstyled.
//!
//! ## File format
//! ```json
//! { "default": null, "notes": { "B": "red", "E2": "yellow" } }
//! ```

use anyhow::{Context, Result, anyhow};
use fretless_core::{LongNote, NoteName};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Text colors available for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl From<NoteColor> for colored::Color {
    fn from(color: NoteColor) -> Self {
        match color {
            NoteColor::Red => colored::Color::Red,
            NoteColor::Green => colored::Color::Green,
            NoteColor::Yellow => colored::Color::Yellow,
            NoteColor::Blue => colored::Color::Blue,
            NoteColor::Magenta => colored::Color::Magenta,
            NoteColor::Cyan => colored::Color::Cyan,
            NoteColor::White => colored::Color::White,
        }
    }
}

/// On-disk form of a scheme; keys are validated on conversion.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SchemeFile {
    #[serde(default)]
    default: Option<NoteColor>,
    #[serde(default)]
    notes: BTreeMap<String, NoteColor>,
}

/// Color lookup for fretboard notes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightScheme {
    default: Option<NoteColor>,
    by_long_note: HashMap<LongNote, NoteColor>,
    by_name: HashMap<NoteName, NoteColor>,
}

/// A minor pentatonic around the B.B. King major blues box.
static BLUES_BOX: Lazy<HighlightScheme> = Lazy::new(|| {
    use NoteColor::*;

    const NOTES: [(&str, NoteColor); 24] = [
        // root
        ("B", Red),
        // dim
        ("A", White),
        ("A#", White),
        // lower range
        ("E2", Yellow),
        ("F#2", Yellow),
        ("G#2", Yellow),
        ("C#3", Magenta),
        ("D3", Yellow),
        ("E3", Yellow),
        // middle range
        ("F#3", Blue),
        ("G#3", Blue),
        ("C#4", Magenta),
        ("D4", Blue),
        ("E4", Blue),
        // blues box (I) range
        ("F#4", Green),
        ("G#4", Green),
        ("C#5", Magenta),
        ("D5", Green),
        ("E5", Green),
        ("F#5", Green),
        ("G#5", Green),
        ("C#6", Magenta),
        ("D6", Green),
        ("E6", Green),
    ];

    let mut scheme = HighlightScheme::default();
    for (key, color) in NOTES {
        scheme
            .insert(key, color)
            .unwrap_or_else(|e| panic!("built-in highlight key {key} is malformed: {e}"));
    }
    scheme
});

impl HighlightScheme {
    /// The built-in blues box scheme.
    pub fn blues_box() -> Self {
        BLUES_BOX.clone()
    }

    /// A scheme that colors nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Adds a mapping keyed by either a long note (`"E2"`) or a note name (`"E"`).
    pub fn insert(&mut self, key: &str, color: NoteColor) -> Result<()> {
        let key = key.trim();
        if key.ends_with(|c: char| c.is_ascii_digit()) {
            let note: LongNote = key.parse()?;
            self.by_long_note.insert(note, color);
        } else {
            let name: NoteName = key
                .parse()
                .map_err(|_| anyhow!("invalid highlight key '{key}'"))?;
            self.by_name.insert(name, color);
        }
        Ok(())
    }

    pub fn with_default(mut self, color: Option<NoteColor>) -> Self {
        self.default = color;
        self
    }

    pub fn color_for(&self, note: &LongNote) -> Option<NoteColor> {
        self.by_long_note
            .get(note)
            .or_else(|| self.by_name.get(&note.name))
            .copied()
            .or(self.default)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: SchemeFile = serde_json::from_str(json).context("invalid highlight scheme JSON")?;
        let mut scheme = HighlightScheme::none().with_default(file.default);
        for (key, color) in file.notes {
            scheme.insert(&key, color)?;
        }
        Ok(scheme)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read highlight scheme: {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Failed to load highlight scheme: {}", path.display()))
    }
}
