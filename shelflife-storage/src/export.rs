//! Bulk export of a namespace's full history into a row sink.

use std::io::Write;

use rusqlite::{params, Connection};

use shelflife_core::errors::{ShelfResult, StorageError};
use shelflife_core::traits::RowSink;

use crate::storage_err;

/// Column order of the export.
pub const EXPORT_COLUMNS: [&str; 11] = [
    "taken_at",
    "series_id",
    "title",
    "year",
    "status",
    "episode_count",
    "total_size_gb",
    "avg_size_mb",
    "z_score",
    "is_outlier",
    "namespace",
];

/// Stream every series row for the namespace, ordered by
/// `(taken_at, title)`, into the sink. Returns the number of rows written.
pub fn export_history(
    conn: &Connection,
    namespace: &str,
    sink: &mut dyn RowSink,
) -> ShelfResult<usize> {
    sink.write_header(&EXPORT_COLUMNS)?;

    let mut stmt = conn
        .prepare(
            "SELECT taken_at, series_id, title, year, status, episode_count,
                    total_size_gb, avg_size_mb, z_score, is_outlier
             FROM snapshot_series
             WHERE namespace = ?1
             ORDER BY taken_at, title",
        )
        .map_err(storage_err)?;

    let mut rows = stmt.query(params![namespace]).map_err(storage_err)?;
    let mut count = 0usize;
    while let Some(row) = rows.next().map_err(storage_err)? {
        let fields = vec![
            row.get::<_, String>(0).map_err(storage_err)?,
            row.get::<_, i64>(1).map_err(storage_err)?.to_string(),
            row.get::<_, String>(2).map_err(storage_err)?,
            row.get::<_, Option<String>>(3)
                .map_err(storage_err)?
                .unwrap_or_default(),
            row.get::<_, Option<String>>(4)
                .map_err(storage_err)?
                .unwrap_or_default(),
            row.get::<_, u32>(5).map_err(storage_err)?.to_string(),
            row.get::<_, f64>(6).map_err(storage_err)?.to_string(),
            row.get::<_, f64>(7).map_err(storage_err)?.to_string(),
            row.get::<_, f64>(8).map_err(storage_err)?.to_string(),
            (row.get::<_, i32>(9).map_err(storage_err)? != 0).to_string(),
            namespace.to_string(),
        ];
        sink.write_row(&fields)?;
        count += 1;
    }
    Ok(count)
}

/// A `RowSink` that writes RFC 4180-style CSV to any `io::Write`.
pub struct CsvSink<W: Write> {
    writer: W,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> ShelfResult<W> {
        self.writer.flush().map_err(sink_err)?;
        Ok(self.writer)
    }

    fn write_line(&mut self, fields: &[String]) -> ShelfResult<()> {
        let line = fields
            .iter()
            .map(|f| escape_field(f))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(self.writer, "{line}").map_err(sink_err)
    }
}

impl<W: Write> RowSink for CsvSink<W> {
    fn write_header(&mut self, columns: &[&str]) -> ShelfResult<()> {
        let owned: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        self.write_line(&owned)
    }

    fn write_row(&mut self, fields: &[String]) -> ShelfResult<()> {
        self.write_line(fields)
    }
}

/// Quote a field when it contains a delimiter, quote, or newline.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn sink_err(e: std::io::Error) -> shelflife_core::errors::ShelfError {
    StorageError::Sink {
        message: e.to_string(),
    }
    .into()
}
