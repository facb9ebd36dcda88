//! Reference tables: the tuning catalog and the C-octave names.

use fretless_core::TuningCatalog;
use fretless_core::octaves::COctave;

/// Lists the catalog with the numeric IDs accepted by the selection prompt.
pub fn catalog_table(catalog: &TuningCatalog) -> String {
    let mut lines = vec![format!(
        "{:<4}{:<14}{:<24}Description",
        "ID", "TuningID", "Notation"
    )];

    for (index, entry) in catalog.iter().enumerate() {
        lines.push(format!(
            "{:<4}{:<14}{:<24}{}",
            index, entry.id, entry.tuning, entry.description
        ));
    }

    lines.join("\n")
}

/// Lists C0..C10 with their frequencies and traditional names.
pub fn c_octave_table(octaves: &[COctave]) -> String {
    let mut lines = vec![format!(
        "{:<7}{:>10}  {:<12}{:<16}Alternative",
        "Index", "Hz", "Notation", "Verbal"
    )];

    for row in octaves {
        lines.push(format!(
            "{:<7}{:>10}  {:<12}{:<16}{}",
            row.note, row.frequency, row.names.name_short, row.names.name_long, row.names.name_alt
        ));
    }

    lines.join("\n")
}
