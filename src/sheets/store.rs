//! Tabular store traits and the typed row record.
//!
//! The engine never touches a spreadsheet API directly. A [`SheetSource`]
//! fetches raw grids and applies writes; a [`TabularStore`] is the richer,
//! cached interface the rest of the crate consumes. Rows come back as
//! [`Record`]s: cells plus a header-to-index map resolved once per sheet
//! load, so an unknown column name is a configuration error instead of a
//! silent empty string.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{EngineError, EngineResult};

/// One sheet row with header-resolved column access.
#[derive(Debug, Clone)]
pub struct Record {
    sheet: Arc<str>,
    columns: Arc<HashMap<String, usize>>,
    cells: Vec<String>,
}

impl Record {
    /// Builds a record over shared header metadata.
    pub(crate) fn new(
        sheet: Arc<str>,
        columns: Arc<HashMap<String, usize>>,
        cells: Vec<String>,
    ) -> Self {
        Self {
            sheet,
            columns,
            cells,
        }
    }

    /// Reads a cell by column name.
    ///
    /// A column past the row's width (ragged grid) reads as an empty
    /// string; a column absent from the header is a configuration error.
    pub fn get(&self, column: &str) -> EngineResult<&str> {
        let index = *self
            .columns
            .get(column)
            .ok_or_else(|| EngineError::ColumnNotFound {
                sheet: self.sheet.to_string(),
                column: column.to_string(),
            })?;

        Ok(self.cells.get(index).map(String::as_str).unwrap_or(""))
    }

    /// Reads a cell by column name, `None` when the column is unknown.
    pub fn try_get(&self, column: &str) -> Option<&str> {
        self.get(column).ok()
    }

    /// Copies the record into an owned column -> value map.
    pub fn to_map(&self) -> HashMap<String, String> {
        self.columns
            .iter()
            .map(|(name, index)| {
                let value = self.cells.get(*index).cloned().unwrap_or_default();
                (name.clone(), value)
            })
            .collect()
    }
}

/// Raw access to a spreadsheet backend.
///
/// `store_id = None` addresses the default (management) spreadsheet; a
/// `Some` id addresses another document, such as a worker's own timesheet
/// file.
pub trait SheetSource {
    /// Fetches a sheet's full grid, header row included.
    fn fetch(&self, sheet: &str, store_id: Option<&str>) -> EngineResult<Vec<Vec<String>>>;

    /// Writes one cell of the default spreadsheet. `row` and `column` are
    /// 1-based, counting the header row.
    fn update(&self, sheet: &str, row: usize, column: usize, value: &str) -> EngineResult<()>;
}

/// The engine-facing store interface: keyed lookups, grid reads, writes,
/// and explicit cache invalidation.
pub trait TabularStore {
    /// Finds the first data row whose `key_column` cell equals `key_value`
    /// and returns the row `row_offset` rows below it (0 = the match
    /// itself, 1 = the row immediately following). `Ok(None)` when no row
    /// matches or the offset runs past the sheet.
    fn find(
        &self,
        sheet: &str,
        key_column: &str,
        key_value: &str,
        row_offset: usize,
        store_id: Option<&str>,
    ) -> EngineResult<Option<Record>>;

    /// Returns every data row of a sheet as records.
    fn get_all(&self, sheet: &str, store_id: Option<&str>) -> EngineResult<Vec<Record>>;

    /// Returns up to `row_count` raw rows starting at 1-based `start_row`
    /// (header counts as row 1).
    fn read_grid(
        &self,
        sheet: &str,
        store_id: Option<&str>,
        start_row: usize,
        row_count: usize,
    ) -> EngineResult<Vec<Vec<String>>>;

    /// Resolves a header name to its 1-based column number.
    fn column_number(&self, sheet: &str, column: &str) -> EngineResult<usize>;

    /// Finds the 1-based sheet row of the first data row whose
    /// `key_column` cell equals `key_value`.
    fn row_number(
        &self,
        sheet: &str,
        key_column: &str,
        key_value: &str,
    ) -> EngineResult<Option<usize>>;

    /// Writes one cell of the default spreadsheet.
    ///
    /// Does NOT invalidate the read cache; callers that need the next read
    /// to see the write must call [`TabularStore::invalidate`] themselves.
    fn write(&self, sheet: &str, row: usize, column: usize, value: &str) -> EngineResult<()>;

    /// Drops every cached sheet so the next read hits the backend.
    fn invalidate(&self);
}
