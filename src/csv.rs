// src/csv.rs
use std::io::{self, Write};

use crate::model::ExportRecord;

/// Which columns of an [`ExportRecord`] make it into the file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnProjection {
    KeepAll,
    /// Drop the trailing `problems` column.
    DropLast,
}

impl ColumnProjection {
    fn apply<T>(self, mut cells: Vec<T>) -> Vec<T> {
        if self == ColumnProjection::DropLast {
            cells.pop();
        }
        cells
    }
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Header line plus one line per record.
pub fn write_records<W: Write>(
    mut w: W,
    records: &[ExportRecord],
    projection: ColumnProjection,
    sep: char,
) -> io::Result<()> {
    let headers = projection.apply(ExportRecord::HEADERS.to_vec());
    write_row(&mut w, headers.as_slice(), sep)?;
    for rec in records {
        write_row(&mut w, projection.apply(rec.cells()).as_slice(), sep)?;
    }
    Ok(())
}
