// tests/froide_export.rs
//
// Projection + file export without network.
//
use std::fs;
use std::path::PathBuf;

use schulfinder::config::options::{AppOptions, ExportOptions};
use schulfinder::file::{write_froide, write_json};
use schulfinder::formats::{project, FroideConfig};
use schulfinder::model::{Branch, DetailedSchool};
use schulfinder::progress::RecordingProgress;
use schulfinder::runner;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("schulfinder_e2e_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn clean(name: &str, city: &str) -> DetailedSchool {
    DetailedSchool {
        name: name.into(),
        street: Some("Schulstraße".into()),
        house_number: Some("1".into()),
        postcode: Some("79098".into()),
        city: Some(city.into()),
        email: Some("poststelle@schule.de".into()),
        website: Some("https://schule.de".into()),
        types: vec!["G".into()],
        branches: vec![Branch::new("GS", "Grundschule")],
        ..Default::default()
    }
}

fn broken(name: &str) -> DetailedSchool {
    DetailedSchool { email: None, street: None, ..clean(name, "Freiburg") }
}

#[test]
fn projection_keeps_order_and_count() {
    let input = vec![clean("A", "Ulm"), broken("B"), clean("C", "Konstanz")];
    let out = project(&input, &FroideConfig::default());
    assert_eq!(out.len(), input.len());
    let names: Vec<&str> = out.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["A (Ulm)", "B (Freiburg)", "C (Konstanz)"]);
    assert_eq!(out[0].address, "Schulstraße 1\n79098 Ulm");
    assert_eq!(out[0].classification, "Grundschule");
    assert_eq!(out[1].problems, "Missing street name / Missing email");
    assert_eq!(out[1].address, " 1\n79098 Freiburg");
}

#[test]
fn projection_is_repeatable() {
    let input = vec![clean("A", "Ulm"), broken("B")];
    let config = FroideConfig::default();
    assert_eq!(project(&input, &config), project(&input, &config));
}

#[test]
fn clean_batch_drops_problems_column() {
    let dir = tmp_dir("clean");
    let export = ExportOptions::froide(dir.join("out.csv"));
    let records = project(&[clean("A", "Ulm")], &export.froide);

    let written = write_froide(&export, &records).unwrap();
    assert_eq!(written.problem_count, 0);
    let text = fs::read_to_string(&written.paths[0]).unwrap();
    let header = text.lines().next().unwrap();
    assert_eq!(header, "name,email,fax,contact,address,url,classification,jurisdiction__slug,categories");
    assert!(text.contains("\"Schulstraße 1\n79098 Ulm\""));
    assert!(text.contains(",Grundschule,baden-wuerttemberg,Schule\n"));
}

#[test]
fn problems_stay_inline_without_problems_file() {
    let dir = tmp_dir("inline");
    let export = ExportOptions::froide(dir.join("out.csv"));
    let records = project(&[clean("A", "Ulm"), broken("B")], &export.froide);

    let written = write_froide(&export, &records).unwrap();
    assert_eq!(written.paths.len(), 1);
    assert_eq!(written.problem_count, 1);
    let text = fs::read_to_string(&written.paths[0]).unwrap();
    assert!(text.lines().next().unwrap().ends_with(",problems"));
    assert!(text.contains("Missing street name / Missing email"));
}

#[test]
fn problems_file_splits_output() {
    let dir = tmp_dir("split");
    let mut export = ExportOptions::froide(dir.join("out.csv"));
    export.problems_path = Some(dir.join("nested/problems.csv"));
    let records = project(&[clean("A", "Ulm"), broken("B"), clean("C", "Aalen")], &export.froide);

    let written = write_froide(&export, &records).unwrap();
    assert_eq!(written.paths.len(), 2);

    let good = fs::read_to_string(dir.join("out.csv")).unwrap();
    assert!(!good.contains("problems"));
    assert!(good.contains("A (Ulm)") && good.contains("C (Aalen)"));
    assert!(!good.contains("B (Freiburg)"));

    let bad = fs::read_to_string(dir.join("nested/problems.csv")).unwrap();
    assert!(bad.lines().next().unwrap().ends_with(",problems"));
    assert!(bad.contains("B (Freiburg)"));
    assert!(!bad.contains("A (Ulm)"));
}

#[test]
fn problems_file_unused_when_batch_is_clean() {
    let dir = tmp_dir("split_clean");
    let mut export = ExportOptions::froide(dir.join("out.csv"));
    export.problems_path = Some(dir.join("problems.csv"));
    let records = project(&[clean("A", "Ulm")], &export.froide);

    let written = write_froide(&export, &records).unwrap();
    assert_eq!(written.paths, vec![dir.join("out.csv")]);
    assert!(!dir.join("problems.csv").exists());
}

#[test]
fn json_export_round_trips_raw_records() {
    let dir = tmp_dir("json");
    let mut school = clean("A", "Ulm");
    school.extra.insert("tablet_platform".into(), serde_json::json!("ipad"));
    let path = dir.join("schools.json");

    write_json(&path, std::slice::from_ref(&school)).unwrap();
    let back: Vec<DetailedSchool> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(back, vec![school]);
}

#[test]
fn runner_export_reports_problems() {
    let dir = tmp_dir("runner");
    let mut opts = AppOptions::default();
    opts.export = ExportOptions::froide(dir.join("out.csv"));
    let mut progress = RecordingProgress::default();

    let summary = runner::export(&opts, &[clean("A", "Ulm"), broken("B")], &mut progress).unwrap();
    assert_eq!(summary.school_count, 2);
    assert_eq!(summary.problem_count, 1);
    assert_eq!(
        progress.events.last().map(String::as_str),
        Some("warn Found 1 schools with problems. Please review manually.")
    );
}
