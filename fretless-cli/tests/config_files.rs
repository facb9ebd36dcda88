//! Loading tuning catalogs and highlight schemes from files.

use clap::Parser;
use fretless_cli::{Cli, FretlessApp};
use std::io::Write;
use tempfile::NamedTempFile;

fn json_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn cli(args: &[&str]) -> Cli {
    Cli::parse_from(std::iter::once("fretless").chain(args.iter().copied()))
}

#[test]
fn custom_catalog_replaces_built_in_tunings() {
    let catalog = json_file(
        r#"[{"id": "C-G-D-A", "description": "cello", "notation": ["C2", "G2", "D3", "A3"]}]"#,
    );
    let path = catalog.path().to_str().unwrap();
    let app = FretlessApp::from_cli(&cli(&["--tunings", path, "--no-color", "--frets", "12"]))
        .unwrap();

    assert_eq!(app.catalog().len(), 1);
    let table = app.render_by_id("C-G-D-A").unwrap();
    assert!(table.starts_with("[ C-G-D-A | cello ] [ A4=440Hz ]"));
    assert!(table.contains("   65.41 |"));
    assert!(app.render_by_id("E-A-D-G-B-E").is_err());
}

#[test]
fn highlight_file_is_validated() {
    let scheme = json_file(r#"{"notes": {"Q7": "red"}}"#);
    let path = scheme.path().to_str().unwrap();
    let err = FretlessApp::from_cli(&cli(&["--highlight", path])).unwrap_err();
    assert!(format!("{err:#}").contains("Q7"));
}

#[test]
fn invalid_build_parameters_fail_before_loading() {
    let err = FretlessApp::from_cli(&cli(&["--frets", "-3"])).unwrap_err();
    assert!(err.to_string().contains("-3"));

    let err = FretlessApp::from_cli(&cli(&["--a-pitch-hz", "0"])).unwrap_err();
    assert!(err.to_string().contains("reference pitch"));
}

#[test]
fn reference_pitch_reaches_the_header() {
    let app = FretlessApp::from_cli(&cli(&["--a-pitch-hz", "432", "--no-color"])).unwrap();
    let table = app.render_by_id("E-A-D-G").unwrap();
    assert!(table.contains("[ A4=432Hz ]"));
}

#[test]
fn missing_catalog_file_names_the_path() {
    let err = FretlessApp::from_cli(&cli(&["--tunings", "/no/such/catalog.json"])).unwrap_err();
    assert!(format!("{err:#}").contains("/no/such/catalog.json"));
}
