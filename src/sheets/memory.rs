//! In-memory sheet backend.
//!
//! Backs the integration tests and local demos; the production backend is
//! whatever spreadsheet service the deployment wires in behind
//! [`SheetSource`].

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};

use super::store::SheetSource;

/// A [`SheetSource`] holding grids in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sheets: RefCell<HashMap<(String, Option<String>), Vec<Vec<String>>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts (or replaces) a sheet grid, header row included.
    pub fn insert(&mut self, sheet: &str, store_id: Option<&str>, rows: Vec<Vec<String>>) {
        self.sheets
            .borrow_mut()
            .insert((sheet.to_string(), store_id.map(str::to_string)), rows);
    }
}

impl SheetSource for MemoryStore {
    fn fetch(&self, sheet: &str, store_id: Option<&str>) -> EngineResult<Vec<Vec<String>>> {
        let key = (sheet.to_string(), store_id.map(str::to_string));
        self.sheets
            .borrow()
            .get(&key)
            .cloned()
            .ok_or_else(|| EngineError::SheetNotFound {
                sheet: sheet.to_string(),
            })
    }

    fn update(&self, sheet: &str, row: usize, column: usize, value: &str) -> EngineResult<()> {
        let mut sheets = self.sheets.borrow_mut();
        let key = (sheet.to_string(), None);
        let grid = sheets.get_mut(&key).ok_or_else(|| EngineError::WriteFailed {
            sheet: sheet.to_string(),
            message: "sheet does not exist".to_string(),
        })?;

        if row == 0 || column == 0 {
            return Err(EngineError::WriteFailed {
                sheet: sheet.to_string(),
                message: "row and column are 1-based".to_string(),
            });
        }

        if grid.len() < row {
            grid.resize(row, Vec::new());
        }
        let cells = &mut grid[row - 1];
        if cells.len() < column {
            cells.resize(column, String::new());
        }
        cells[column - 1] = value.to_string();
        Ok(())
    }
}
