use crate::errors::ShelfResult;

/// A row-oriented tabular writer for exports.
///
/// The engine only needs "accepts an ordered sequence of named fields":
/// one header call, then one call per row with fields in header order.
pub trait RowSink {
    /// Write the column header. Called exactly once, before any row.
    fn write_header(&mut self, columns: &[&str]) -> ShelfResult<()>;

    /// Write one row; fields are in header order.
    fn write_row(&mut self, fields: &[String]) -> ShelfResult<()>;
}
