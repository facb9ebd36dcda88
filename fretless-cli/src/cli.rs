//! Command-line arguments.

use clap::Parser;
use fretless_core::{DEFAULT_FRET_COUNT, DEFAULT_REFERENCE_PITCH_HZ};
use std::path::PathBuf;

const LONG_ABOUT: &str = "\
fretless - A command line music tool

Renders a text based fretboard for different string instruments by tuning.

Before you start, please note:
* correct text rendering requires either
  (a) a wide terminal canvas (size up your window) or
  (b) a horizontally scrollable terminal with disabled line wrap
* colors and special symbols might not be well supported by your terminal;
  try --no-color

Have a good time and fret less.";

/// Renders a text based fretboard for string instruments by tuning
#[derive(Debug, Clone, Parser)]
#[command(name = "fretless")]
#[command(author, version, about, long_about = LONG_ABOUT)]
pub struct Cli {
    /// A4 reference frequency in Hz (e.g. 432, 428)
    #[arg(long, default_value_t = DEFAULT_REFERENCE_PITCH_HZ, allow_negative_numbers = true)]
    pub a_pitch_hz: f64,

    /// Number of frets above the open string
    #[arg(long, default_value_t = i64::from(DEFAULT_FRET_COUNT), allow_negative_numbers = true)]
    pub frets: i64,

    /// Render the tuning with this ID (e.g. E-A-D-G-B-E) and exit
    #[arg(long, conflicts_with = "all")]
    pub tuning: Option<String>,

    /// Render every tuning of the catalog and exit
    #[arg(long)]
    pub all: bool,

    /// Load the tuning catalog from a JSON file
    #[arg(long, value_name = "PATH")]
    pub tunings: Option<PathBuf>,

    /// Load the note highlight scheme from a JSON file
    #[arg(long, value_name = "PATH")]
    pub highlight: Option<PathBuf>,

    /// Render strings that run past B10 with the frets that fit instead of failing
    #[arg(long)]
    pub partial: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print a table showing the progression of octaves from C0 to C10 and exit
    #[arg(long)]
    pub print_c_octaves: bool,

    /// Print the tuning catalog and exit
    #[arg(long)]
    pub list: bool,

    /// Print verbose/debug messages
    #[arg(long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_standard_guitar_setup() {
        let cli = Cli::parse_from(["fretless"]);
        assert_eq!(cli.a_pitch_hz, 440.0);
        assert_eq!(cli.frets, 24);
        assert!(cli.tuning.is_none());
        assert!(!cli.all);
        assert!(!cli.partial);
    }

    #[test]
    fn negative_values_reach_validation() {
        let cli = Cli::parse_from(["fretless", "--frets", "-1", "--a-pitch-hz", "-440"]);
        assert_eq!(cli.frets, -1);
        assert_eq!(cli.a_pitch_hz, -440.0);
    }

    #[test]
    fn tuning_and_all_conflict() {
        assert!(Cli::try_parse_from(["fretless", "--tuning", "E-A-D-G", "--all"]).is_err());
    }
}
