//! # Fretboard Display
//!
//! Renders a built fretboard as an aligned text table:
//! a title line, a fret-marker row and a fret-index row, then one block of
//! note rows and one block of frequency rows. The highest declared string is
//! printed first, so the table reads like a guitar seen from the player.

use colored::Colorize;
use fretless_core::{Fretboard, TuningEntry};

use crate::highlight::NoteColor;

/// Minimum width of one table cell, excluding its separator.
pub const NOTE_PADDING: usize = 8;

/// Frets that carry a single inlay dot (within each octave).
const SINGLE_DOTS: [u32; 4] = [3, 5, 7, 9];

/// Renders fretboards to strings.
#[derive(Debug, Clone, Copy)]
pub struct FretboardDisplay {
    note_padding: usize,
    use_color: bool,
}

impl Default for FretboardDisplay {
    fn default() -> Self {
        Self {
            note_padding: NOTE_PADDING,
            use_color: true,
        }
    }
}

impl FretboardDisplay {
    pub fn new(use_color: bool) -> Self {
        Self {
            use_color,
            ..Self::default()
        }
    }

    pub fn render(&self, entry: &TuningEntry, fretboard: &Fretboard<Option<NoteColor>>) -> String {
        let width = self.cell_width(fretboard);
        let mut out = String::new();
        self.render_header(&mut out, entry, fretboard, width);

        let mut notes = String::new();
        let mut frequencies = String::new();

        for string in fretboard.strings().iter().rev() {
            for fret in string {
                let note = format!(" {:^width$}", fret.note);
                let frequency = format!("{:>width$}", fret.frequency);
                notes.push_str(&format!("{}|", self.paint(note, fret.tag)));
                frequencies.push_str(&format!("{} |", self.paint(frequency, fret.tag)));
            }
            notes.push('\n');
            frequencies.push('\n');
        }

        out.push_str(&notes);
        out.push('\n');
        out.push_str(&frequencies);
        out
    }

    fn render_header(
        &self,
        out: &mut String,
        entry: &TuningEntry,
        fretboard: &Fretboard<Option<NoteColor>>,
        width: usize,
    ) {
        let title = format!("[ {} | {} ]", entry.id, entry.description);
        let title = if self.use_color {
            title.reversed().bold().to_string()
        } else {
            title
        };
        out.push_str(&format!(
            "{} [ A4={}Hz ]\n\n",
            title,
            fretboard.reference_pitch_hz()
        ));

        let frets = 0..=fretboard.max_fret_count();

        for fret in frets.clone() {
            out.push_str(&format!("{:^width$} |", fret_marker(fret)));
        }
        out.push('\n');

        for fret in frets {
            out.push_str(&format!(" {:^width$}|", fret));
        }
        out.push_str("\n\n");
    }

    /// Widest rendered frequency or note on the board, at least `note_padding`.
    fn cell_width(&self, fretboard: &Fretboard<Option<NoteColor>>) -> usize {
        fretboard
            .strings()
            .iter()
            .flatten()
            .map(|fret| {
                let frequency = fret.frequency.to_string().len();
                frequency.max(fret.note.to_string().len())
            })
            .fold(self.note_padding, usize::max)
    }

    fn paint(&self, text: String, color: Option<NoteColor>) -> String {
        match color {
            Some(color) if self.use_color => text.as_str().color(color).to_string(),
            _ => text,
        }
    }
}

/// Inlay marker shown above a fret.
pub fn fret_marker(fret: u32) -> &'static str {
    match fret % 12 {
        0 if fret > 0 => "••",
        n if SINGLE_DOTS.contains(&n) => "•",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fretless_core::{FretboardBuilder, TuningCatalog};
    use pretty_assertions::assert_eq;

    fn render(id: &str, frets: i64) -> String {
        render_at(id, frets, 440.0)
    }

    fn render_at(id: &str, frets: i64, reference_pitch_hz: f64) -> String {
        let catalog = TuningCatalog::default();
        let entry = catalog.get(id).unwrap();
        let board = FretboardBuilder::new(frets, reference_pitch_hz)
            .unwrap()
            .build_tagged(&entry.tuning, |_| None)
            .unwrap();
        FretboardDisplay::new(false).render(entry, &board)
    }

    #[test]
    fn markers_follow_inlay_positions() {
        let markers: Vec<&str> = (0..=24).map(fret_marker).collect();
        assert_eq!(markers[0], "");
        assert_eq!(markers[3], "•");
        assert_eq!(markers[12], "••");
        assert_eq!(markers[15], "•");
        assert_eq!(markers[24], "••");
        assert_eq!(markers[11], "");
    }

    #[test]
    fn bass_table_lists_highest_string_first() {
        let table = render("E-A-D-G", 2);
        let expected = "\
[ E-A-D-G | standard tuning - electric bass, ukulele bass ] [ A4=440Hz ]

         |         |         |
    0    |    1    |    2    |

    G2   |   G#2   |    A2   |
    D2   |   D#2   |    E2   |
    A1   |   A#1   |    B1   |
    E1   |    F1   |   F#1   |

   98.00 |  103.83 |  110.00 |
   73.42 |   77.78 |   82.41 |
   55.00 |   58.27 |   61.74 |
   41.20 |   43.65 |   46.25 |
";
        assert_eq!(table, expected);
    }

    #[test]
    fn every_cell_has_the_same_width() {
        let table = render("E-A-D-G-B-E", 24);
        let rows: Vec<&str> = table.lines().skip(2).filter(|l| !l.is_empty()).collect();
        assert_eq!(rows.len(), 2 + 6 + 6);
        for row in rows {
            assert_eq!(row.chars().count(), 25 * (NOTE_PADDING + 2), "row: {row}");
        }
    }

    #[test]
    fn sixty_frets_keep_columns_aligned() {
        let table = render("E-A-D-G-B-E", 60);
        assert!(table.contains("|10548.08 |"));
        let rows: Vec<&str> = table.lines().skip(2).filter(|l| !l.is_empty()).collect();
        for row in rows {
            assert_eq!(row.chars().count(), 61 * (NOTE_PADDING + 2), "row: {row}");
        }
    }

    #[test]
    fn wide_frequencies_widen_every_column() {
        // A4=4400Hz puts E9 above 100 kHz, nine characters with decimals.
        let table = render_at("E-A-D-G-B-E", 60, 4400.0);
        assert!(table.contains("|105480.82 |"));
        let rows: Vec<&str> = table.lines().skip(2).filter(|l| !l.is_empty()).collect();
        assert_eq!(rows.len(), 2 + 6 + 6);
        for row in rows {
            assert_eq!(row.chars().count(), 61 * (9 + 2), "row: {row}");
        }
    }
}
