use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

const SHEET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Formats>
  <ParagraphFormat identifier="body" justification="centered" left="18"/>
  <OrderedListParagraphFormat identifier="steps" style="ROMAN_UPPER_CASE" starting_value="3"/>
  <CharacterFormat identifier="sub" position="subscript"/>
</Formats>
"#;

fn write_sheet(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sheet.xml");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn inspect_describes_each_format() {
    let (_dir, sheet) = write_sheet(SHEET);

    cargo_bin_cmd!("quire")
        .arg("inspect")
        .arg(&sheet)
        .assert()
        .success()
        .stdout(predicate::str::contains("body: ParagraphFormat\n"))
        .stdout(predicate::str::contains("steps: OrderedListParagraphFormat\n"))
        .stdout(predicate::str::contains("text-align: center;"))
        .stdout(predicate::str::contains("  valid: yes\n"));
}

#[test]
fn inspect_css_can_be_disabled_from_config() {
    let (dir, sheet) = write_sheet(SHEET);
    let config_path = dir.path().join("quire.toml");
    fs::write(&config_path, "[inspect]\nshow_css = false\n").unwrap();

    cargo_bin_cmd!("quire")
        .arg("inspect")
        .arg(&sheet)
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("  css:").not())
        .stdout(predicate::str::contains("  string: ParagraphFormat"));
}

#[test]
fn format_round_trips_the_sheet() {
    let (dir, sheet) = write_sheet(SHEET);

    let output = cargo_bin_cmd!("quire")
        .arg("format")
        .arg(&sheet)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let normalized = String::from_utf8(output).unwrap();
    assert!(normalized.contains("<Formats>"));
    assert!(normalized.contains("starting_value=\"3\""));

    let again_path = dir.path().join("normalized.xml");
    fs::write(&again_path, &normalized).unwrap();
    cargo_bin_cmd!("quire")
        .arg("format")
        .arg(&again_path)
        .assert()
        .success()
        .stdout(normalized);
}

#[test]
fn aggregate_prints_capabilities() {
    let (_dir, sheet) = write_sheet(SHEET);

    cargo_bin_cmd!("quire")
        .arg("aggregate")
        .arg(&sheet)
        .assert()
        .success()
        .stdout(predicate::str::contains("BlockFormat (2 formats)\n"))
        .stdout(predicate::str::contains("CharacterFormat (1 formats)\n"));
}

#[test]
fn aggregate_json_is_valid() {
    let (_dir, sheet) = write_sheet(SHEET);

    let output = cargo_bin_cmd!("quire")
        .arg("aggregate")
        .arg(&sheet)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let capabilities: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|entry| entry["capability"].as_str())
        .collect();
    assert_eq!(capabilities.first(), Some(&"Format"));
    assert!(capabilities.contains(&"OrderedListParagraphFormat"));
}

#[test]
fn export_latex_to_stdout() {
    let (_dir, sheet) = write_sheet(SHEET);

    cargo_bin_cmd!("quire")
        .arg("export")
        .arg(&sheet)
        .arg("--to")
        .arg("latex")
        .arg("--extra-document_class")
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("\\documentclass{report}"))
        .stdout(predicate::str::contains("[label={\\Roman*.}]"))
        .stdout(predicate::str::contains("\\setcounter{enumi}{2}"))
        .stdout(predicate::str::contains("\\textsubscript{sub }"));
}

#[test]
fn export_detects_exporter_from_output_file() {
    let (dir, sheet) = write_sheet(SHEET);
    let output = dir.path().join("specimen.html");

    cargo_bin_cmd!("quire")
        .arg("export")
        .arg(&sheet)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<ol start=\"3\">"));
}

#[test]
fn export_html4_from_config() {
    let (dir, sheet) = write_sheet(SHEET);
    let config_path = dir.path().join("quire.toml");
    fs::write(&config_path, "[export.html]\nstyle = \"html4\"\ntitle = \"Specimen\"\n").unwrap();

    cargo_bin_cmd!("quire")
        .arg("export")
        .arg(&sheet)
        .arg("--to")
        .arg("html")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("<title>Specimen</title>"))
        .stdout(predicate::str::contains("<p align=\"center\">"));
}

#[test]
fn unsupported_html_style_is_fatal() {
    let (_dir, sheet) = write_sheet(SHEET);

    cargo_bin_cmd!("quire")
        .arg("export")
        .arg(&sheet)
        .arg("--to")
        .arg("html")
        .arg("--extra-style")
        .arg("xhtml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported HTML style \"xhtml\""));
}

#[test]
fn unknown_format_tag_is_reported() {
    let (_dir, sheet) =
        write_sheet("<Formats>\n  <TableFormat identifier=\"t\"/>\n</Formats>\n");

    cargo_bin_cmd!("quire")
        .arg("inspect")
        .arg(&sheet)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown format type \"TableFormat\""))
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn list_exporters() {
    cargo_bin_cmd!("quire")
        .arg("--list-exporters")
        .assert()
        .success()
        .stdout(predicate::str::contains("  css"))
        .stdout(predicate::str::contains("  html"))
        .stdout(predicate::str::contains("  latex"));
}

#[test]
fn bullets_lists_the_standard_table() {
    cargo_bin_cmd!("quire")
        .arg("bullets")
        .assert()
        .success()
        .stdout(predicate::str::contains("U+2022"));
}
