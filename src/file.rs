// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::consts::CSV_SEP;
use crate::config::options::ExportOptions;
use crate::csv::{write_records, ColumnProjection};
use crate::formats::count_problems;
use crate::model::{DetailedSchool, ExportRecord};

/// What an export wrote.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Written {
    pub paths: Vec<PathBuf>,
    pub problem_count: usize,
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

/// Create/truncate `path` and write the records as CSV.
pub fn write_csv(
    path: &Path,
    records: &[ExportRecord],
    projection: ColumnProjection,
) -> Result<(), Box<dyn std::error::Error>> {
    ensure_parent(path)?;
    let mut out = BufWriter::new(File::create(path)?);
    write_records(&mut out, records, projection, CSV_SEP)?;
    out.flush()?;
    Ok(())
}

/// Froide CSV export.
///
/// - no problems at all: one file, `problems` column dropped
/// - problems and a problems path: clean rows (without the column) to
///   `out_path`, rows with problems (with it) to the problems path
/// - otherwise: one file with the column
pub fn write_froide(
    export: &ExportOptions,
    records: &[ExportRecord],
) -> Result<Written, Box<dyn std::error::Error>> {
    let problem_count = count_problems(records);
    let out = export.out_path.as_path();

    let paths = match (&export.problems_path, problem_count) {
        (_, 0) => {
            write_csv(out, records, ColumnProjection::DropLast)?;
            vec![out.to_path_buf()]
        }
        (Some(problems_path), _) => {
            let (with, without): (Vec<ExportRecord>, Vec<ExportRecord>) =
                records.iter().cloned().partition(ExportRecord::has_problems);
            write_csv(out, &without, ColumnProjection::DropLast)?;
            write_csv(problems_path, &with, ColumnProjection::KeepAll)?;
            vec![out.to_path_buf(), problems_path.clone()]
        }
        (None, _) => {
            write_csv(out, records, ColumnProjection::KeepAll)?;
            vec![out.to_path_buf()]
        }
    };

    logf!("Export: {} records, {} with problems → {:?}", records.len(), problem_count, paths);
    Ok(Written { paths, problem_count })
}

/// Raw detail records as one JSON array.
pub fn write_json(path: &Path, schools: &[DetailedSchool]) -> Result<Written, Box<dyn std::error::Error>> {
    ensure_parent(path)?;
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut out, schools)?;
    out.flush()?;
    logf!("Export: {} raw records → {}", schools.len(), path.display());
    Ok(Written { paths: vec![path.to_path_buf()], problem_count: 0 })
}
