//! # Fretless Application
//!
//! Ties the catalog, builder, highlight scheme and renderers together and
//! drives the three modes of the tool:
//! - **Single**: render one tuning by ID
//! - **All**: build every catalog tuning on worker threads, print in order
//! - **Interactive**: prompt for a tuning, render it, repeat until end of input

use anyhow::{Context, Result};
use colored::Colorize;
use fretless_core::octaves::c_octaves;
use fretless_core::{Fretboard, FretboardBuilder, LongNote, TuningCatalog, TuningEntry};
use log::{debug, warn};
use std::io::{BufRead, Write};
use std::thread;

use crate::cli::Cli;
use crate::highlight::{HighlightScheme, NoteColor};
use crate::ui::fretboard_display::FretboardDisplay;
use crate::ui::tables::{c_octave_table, catalog_table};

/// Everything needed to render fretboards, loaded once per process.
#[derive(Debug, Clone)]
pub struct FretlessApp {
    catalog: TuningCatalog,
    builder: FretboardBuilder,
    highlight: HighlightScheme,
    display: FretboardDisplay,
    partial: bool,
}

impl FretlessApp {
    pub fn new(
        catalog: TuningCatalog,
        builder: FretboardBuilder,
        highlight: HighlightScheme,
        use_color: bool,
    ) -> Self {
        Self {
            catalog,
            builder,
            highlight,
            display: FretboardDisplay::new(use_color),
            partial: false,
        }
    }

    /// Renders strings the sweep cuts short with the frets it recorded,
    /// logging a warning for each, instead of failing the build.
    pub fn with_partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    /// Loads the catalog and highlight scheme named on the command line.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let builder = FretboardBuilder::new(cli.frets, cli.a_pitch_hz)?;

        let catalog = match &cli.tunings {
            Some(path) => TuningCatalog::from_path(path)
                .with_context(|| format!("Failed to load tuning catalog: {}", path.display()))?,
            None => TuningCatalog::default(),
        };

        let highlight = match &cli.highlight {
            Some(path) => HighlightScheme::from_path(path)?,
            None => HighlightScheme::blues_box(),
        };

        debug!(
            "loaded {} tunings, {} frets, A4={}Hz",
            catalog.len(),
            builder.max_fret_count(),
            builder.reference_pitch_hz()
        );

        Ok(Self::new(catalog, builder, highlight, !cli.no_color).with_partial(cli.partial))
    }

    pub fn catalog(&self) -> &TuningCatalog {
        &self.catalog
    }

    fn build(&self, entry: &TuningEntry) -> Result<Fretboard<Option<NoteColor>>> {
        let tagger = |note: &LongNote| self.highlight.color_for(note);
        let fretboard = if self.partial {
            self.builder
                .build_partial_tagged(&entry.tuning, tagger)
                .map(|partial| {
                    for unfinished in &partial.unfinished {
                        warn!(
                            "tuning {}: string {} stops at B10 after {} of {} frets",
                            entry.id, unfinished.string, unfinished.recorded, unfinished.required
                        );
                    }
                    partial.fretboard
                })
        } else {
            self.builder.build_tagged(&entry.tuning, tagger)
        };
        fretboard.with_context(|| format!("Failed to build fretboard for tuning {}", entry.id))
    }

    /// Builds and renders one catalog entry.
    pub fn render(&self, entry: &TuningEntry) -> Result<String> {
        let fretboard = self.build(entry)?;
        Ok(self.display.render(entry, &fretboard))
    }

    pub fn render_by_id(&self, id: &str) -> Result<String> {
        let entry = self.catalog.get(id)?;
        self.render(entry)
    }

    /// Builds every catalog tuning concurrently and renders them in catalog order.
    pub fn render_all(&self) -> Result<String> {
        let (result_tx, result_rx) = crossbeam_channel::unbounded();

        thread::scope(|scope| {
            for (index, entry) in self.catalog.iter().enumerate() {
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    let result = self.build(entry);
                    if result_tx.send((index, result)).is_err() {
                        warn!("fretboard result for {} was dropped", entry.id);
                    }
                });
            }
        });
        drop(result_tx);

        let mut fretboards: Vec<Option<Result<Fretboard<Option<NoteColor>>>>> =
            (0..self.catalog.len()).map(|_| None).collect();
        for (index, result) in result_rx.iter() {
            fretboards[index] = Some(result);
        }

        let mut out = Vec::with_capacity(self.catalog.len());
        for (entry, fretboard) in self.catalog.iter().zip(fretboards) {
            let fretboard = fretboard
                .with_context(|| format!("No fretboard was built for tuning {}", entry.id))??;
            out.push(self.display.render(entry, &fretboard));
        }
        Ok(out.join("\n"))
    }

    /// Prompt loop: list tunings, read a choice, render, wait for Enter.
    ///
    /// Returns when the input reaches its end.
    pub fn run_interactive<R: BufRead, W: Write>(&self, mut input: R, mut out: W) -> Result<()> {
        let mut line = String::new();

        loop {
            writeln!(out, "{}", catalog_table(&self.catalog))?;

            let entry = loop {
                write!(out, "\nPlease select ID [0]: ")?;
                out.flush()?;

                line.clear();
                if input.read_line(&mut line)? == 0 {
                    writeln!(out)?;
                    return Ok(());
                }
                let choice = match line.trim() {
                    "" => "0",
                    choice => choice,
                };
                match self.catalog.by_choice(choice) {
                    Ok(entry) => break entry,
                    Err(e) => writeln!(out, "{}: {}", "Error".red(), e)?,
                }
            };

            match self.render(entry) {
                Ok(table) => writeln!(out, "\n{table}")?,
                Err(e) => writeln!(out, "{}: {:#}", "error".red(), e)?,
            }

            writeln!(out, "{}", "PRESS ENTER TO CONTINUE".bold())?;
            out.flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }
        }
    }
}

/// Runs the mode selected on the command line.
pub fn run(cli: &Cli) -> Result<()> {
    if cli.print_c_octaves {
        let octaves = c_octaves(cli.a_pitch_hz)?;
        println!("{}", c_octave_table(&octaves));
        return Ok(());
    }

    let app = FretlessApp::from_cli(cli)?;

    if cli.list {
        println!("{}", catalog_table(app.catalog()));
        return Ok(());
    }

    if let Some(id) = &cli.tuning {
        print!("{}", app.render_by_id(id)?);
        return Ok(());
    }

    if cli.all {
        print!("{}", app.render_all()?);
        return Ok(());
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    app.run_interactive(stdin.lock(), stdout.lock())
}
