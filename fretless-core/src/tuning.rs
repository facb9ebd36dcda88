//! # Tunings and Tuning Catalog
//!
//! A [`Tuning`] is the ordered list of open-string long notes of an
//! instrument, one per string. The [`TuningCatalog`] is the immutable
//! reference table the front end selects tunings from.
//!
//! ## Catalog file format
//! ```json
//! [
//!   { "id": "E-A-D-G", "description": "standard tuning - electric bass",
//!     "notation": ["E1", "A1", "D2", "G2"] }
//! ]
//! ```
//! Entry order is significant: it defines the numeric choice IDs.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::error::FretboardError;
use crate::pitch::LongNote;

/// Ordered open-string notes, string 0 first.
///
/// The same long note may open several strings; the order of the notation is
/// not required to ascend in pitch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<LongNote>", into = "Vec<LongNote>")]
pub struct Tuning {
    notation: Vec<LongNote>,
}

impl Tuning {
    pub fn new(notation: Vec<LongNote>) -> Result<Self, FretboardError> {
        if notation.is_empty() {
            return Err(FretboardError::EmptyTuning);
        }
        Ok(Self { notation })
    }

    pub fn notation(&self) -> &[LongNote] {
        &self.notation
    }

    /// Number of strings.
    pub fn len(&self) -> usize {
        self.notation.len()
    }

    /// Always false; a tuning cannot be constructed empty.
    pub fn is_empty(&self) -> bool {
        self.notation.is_empty()
    }

    /// Open-string note of a string index.
    pub fn open_string(&self, string: usize) -> Option<LongNote> {
        self.notation.get(string).copied()
    }
}

impl TryFrom<Vec<LongNote>> for Tuning {
    type Error = FretboardError;

    fn try_from(notation: Vec<LongNote>) -> Result<Self, Self::Error> {
        Tuning::new(notation)
    }
}

impl From<Tuning> for Vec<LongNote> {
    fn from(tuning: Tuning) -> Self {
        tuning.notation
    }
}

impl FromStr for Tuning {
    type Err = FretboardError;

    /// Parses notation like `"E2 A2 D3 G3 B3 E4"` or `"E1,A1,D2,G2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let notation = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<LongNote>, _>>()?;
        Tuning::new(notation)
    }
}

impl fmt::Display for Tuning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let notation = self
            .notation
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        f.pad(&notation)
    }
}

/// A named tuning in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningEntry {
    /// Identifier such as `"E-A-D-G-B-E"`.
    pub id: String,
    pub description: String,
    #[serde(rename = "notation")]
    pub tuning: Tuning,
}

/// Errors raised while loading or querying a tuning catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read tuning catalog '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid tuning catalog JSON")]
    Json(#[from] serde_json::Error),

    #[error("tuning catalog is empty")]
    Empty,

    #[error("duplicate tuning id '{0}' in catalog")]
    DuplicateId(String),

    #[error("unknown tuning id '{0}'")]
    UnknownId(String),

    #[error("choice '{choice}' is not one of 0..{len}")]
    InvalidChoice { choice: String, len: usize },
}

/// Built-in reference tunings.
static DEFAULT_TUNINGS: Lazy<Vec<TuningEntry>> = Lazy::new(|| {
    const TUNINGS: [(&str, &str, &str); 9] = [
        ("E-A-D-G-B-E", "standard tuning - guitar", "E2 A2 D3 G3 B3 E4"),
        ("D-A-D-G-B-E", "guitar drop-d", "D2 A2 D3 G3 B3 E4"),
        ("D-A-D-G-B-D", "guitar double-drop-d", "D2 A2 D3 G3 B3 D4"),
        ("D-A-D-F#-A-D", "guitar open-d", "D2 A2 D3 F#3 A3 D4"),
        ("C-A-D-G-B-E", "guitar drop-c", "C2 A2 D3 G3 B3 E4"),
        (
            "E-A-D-G",
            "standard tuning - electric bass, ukulele bass",
            "E1 A1 D2 G2",
        ),
        ("G-D-A-E", "standard tuning - violin", "G3 D4 A4 E4"),
        ("G-C-E-A", "standard tuning - ukulele soprano", "G4 C4 E4 A4"),
        ("D-G-B-E", "ukulele baritone", "D3 G3 B3 E4"),
    ];

    TUNINGS
        .iter()
        .map(|(id, description, notation)| TuningEntry {
            id: id.to_string(),
            description: description.to_string(),
            tuning: notation
                .parse()
                .unwrap_or_else(|e| panic!("built-in tuning {id} is malformed: {e}")),
        })
        .collect()
});

/// Ordered, immutable collection of named tunings.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningCatalog {
    entries: Vec<TuningEntry>,
}

impl Default for TuningCatalog {
    /// The built-in catalog of common guitar, bass, violin and ukulele tunings.
    fn default() -> Self {
        Self {
            entries: DEFAULT_TUNINGS.clone(),
        }
    }
}

impl TuningCatalog {
    /// Builds a catalog, rejecting empty lists and repeated ids.
    pub fn new(entries: Vec<TuningEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<TuningEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TuningEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Result<&TuningEntry, CatalogError> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| CatalogError::UnknownId(id.to_string()))
    }

    /// Numeric IDs offered by a selection prompt, `"0"` first.
    pub fn choice_ids(&self) -> Vec<String> {
        (0..self.entries.len()).map(|i| i.to_string()).collect()
    }

    /// Looks up an entry by its numeric choice ID.
    pub fn by_choice(&self, choice: &str) -> Result<&TuningEntry, CatalogError> {
        choice
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|index| self.entries.get(index))
            .ok_or_else(|| CatalogError::InvalidChoice {
                choice: choice.to_string(),
                len: self.entries.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_catalog_matches_reference_tunings() {
        let catalog = TuningCatalog::default();
        assert_eq!(catalog.len(), 9);

        let standard = catalog.get("E-A-D-G-B-E").unwrap();
        assert_eq!(standard.tuning.to_string(), "E2 A2 D3 G3 B3 E4");
        assert_eq!(standard.description, "standard tuning - guitar");

        let ukulele = catalog.get("G-C-E-A").unwrap();
        assert_eq!(ukulele.tuning.to_string(), "G4 C4 E4 A4");
    }

    #[test]
    fn choices_select_in_catalog_order() {
        let catalog = TuningCatalog::default();
        assert_eq!(catalog.choice_ids()[0], "0");
        assert_eq!(catalog.by_choice("0").unwrap().id, "E-A-D-G-B-E");
        assert_eq!(catalog.by_choice(" 5 ").unwrap().id, "E-A-D-G");
        assert!(matches!(
            catalog.by_choice("9"),
            Err(CatalogError::InvalidChoice { len: 9, .. })
        ));
        assert!(catalog.by_choice("x").is_err());
        assert!(matches!(
            catalog.get("nope"),
            Err(CatalogError::UnknownId(_))
        ));
    }

    #[test]
    fn tuning_parses_with_separators_and_duplicates() {
        let tuning: Tuning = "D3, D3 A2".parse().unwrap();
        assert_eq!(tuning.len(), 3);
        assert_eq!(tuning.open_string(0), tuning.open_string(1));
        assert_eq!(tuning.open_string(3), None);
    }

    #[test]
    fn empty_tuning_is_rejected() {
        assert_eq!("".parse::<Tuning>(), Err(FretboardError::EmptyTuning));
        assert_eq!(Tuning::new(vec![]), Err(FretboardError::EmptyTuning));
    }

    #[test]
    fn catalog_json_round_trip() {
        let json = r#"[
            {"id": "B-E-A-D", "description": "five string bass, top four", "notation": ["B0", "E1", "A1", "D2"]},
            {"id": "C-G-D-A", "description": "cello", "notation": ["C2", "G2", "D3", "A3"]}
        ]"#;
        let catalog = TuningCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.by_choice("1").unwrap().tuning.to_string(), "C2 G2 D3 A3");

        let reloaded = TuningCatalog::from_json_str(&catalog.to_json_string().unwrap()).unwrap();
        assert_eq!(reloaded, catalog);
    }

    #[test]
    fn malformed_catalogs_are_rejected() {
        assert!(matches!(
            TuningCatalog::from_json_str("[]"),
            Err(CatalogError::Empty)
        ));
        assert!(matches!(
            TuningCatalog::from_json_str(r#"[{"id": "x", "description": "", "notation": []}]"#),
            Err(CatalogError::Json(_))
        ));
        assert!(matches!(
            TuningCatalog::from_json_str(r#"[{"id": "x", "description": "", "notation": ["Bb2"]}]"#),
            Err(CatalogError::Json(_))
        ));
        let duplicate = r#"[
            {"id": "x", "description": "", "notation": ["E2"]},
            {"id": "x", "description": "", "notation": ["A2"]}
        ]"#;
        assert!(matches!(
            TuningCatalog::from_json_str(duplicate),
            Err(CatalogError::DuplicateId(id)) if id == "x"
        ));
    }

    #[test]
    fn missing_catalog_file_reports_path() {
        let err = TuningCatalog::from_path("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
