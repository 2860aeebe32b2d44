//! The cached store.
//!
//! Execution is single-threaded and batch-style: each top-level operation
//! reads a handful of sheets several times over. [`CachedStore`] keeps one
//! explicit per-process cache keyed by (sheet name, store id) and hands
//! out records backed by the cached grid. Writes bypass the cache and the
//! engine invalidates explicitly after any write whose result the next
//! read must see; re-entry before that invalidation can observe stale
//! data, which is an accepted limitation, not a contract.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use tracing::info;

use crate::error::EngineResult;

use super::store::{Record, SheetSource, TabularStore};

/// One fetched sheet: header metadata plus all rows (header included).
#[derive(Debug)]
struct LoadedSheet {
    sheet: Arc<str>,
    columns: Arc<HashMap<String, usize>>,
    rows: Vec<Vec<String>>,
}

impl LoadedSheet {
    fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    fn record(&self, data_index: usize) -> Option<Record> {
        let cells = self.data_rows().get(data_index)?.clone();
        Some(Record::new(
            Arc::clone(&self.sheet),
            Arc::clone(&self.columns),
            cells,
        ))
    }
}

/// A [`TabularStore`] that caches reads from an underlying [`SheetSource`].
#[derive(Debug)]
pub struct CachedStore<S> {
    source: S,
    cache: RefCell<HashMap<(String, Option<String>), Rc<LoadedSheet>>>,
}

impl<S: SheetSource> CachedStore<S> {
    /// Wraps a sheet source with an empty cache.
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: RefCell::new(HashMap::new()),
        }
    }

    fn load(&self, sheet: &str, store_id: Option<&str>) -> EngineResult<Rc<LoadedSheet>> {
        let key = (sheet.to_string(), store_id.map(str::to_string));
        if let Some(loaded) = self.cache.borrow().get(&key) {
            return Ok(Rc::clone(loaded));
        }

        let rows = self.source.fetch(sheet, store_id)?;
        let header = rows.first().cloned().unwrap_or_default();
        let mut columns = HashMap::new();
        for (index, name) in header.into_iter().enumerate() {
            // First occurrence wins for duplicate headers.
            columns.entry(name).or_insert(index);
        }

        let loaded = Rc::new(LoadedSheet {
            sheet: Arc::from(sheet),
            columns: Arc::new(columns),
            rows,
        });
        self.cache.borrow_mut().insert(key, Rc::clone(&loaded));
        Ok(loaded)
    }
}

impl<S: SheetSource> TabularStore for CachedStore<S> {
    fn find(
        &self,
        sheet: &str,
        key_column: &str,
        key_value: &str,
        row_offset: usize,
        store_id: Option<&str>,
    ) -> EngineResult<Option<Record>> {
        let loaded = self.load(sheet, store_id)?;
        let key_index = *loaded
            .columns
            .get(key_column)
            .ok_or_else(|| crate::error::EngineError::ColumnNotFound {
                sheet: sheet.to_string(),
                column: key_column.to_string(),
            })?;

        for (index, row) in loaded.data_rows().iter().enumerate() {
            let cell = row.get(key_index).map(String::as_str).unwrap_or("");
            if cell != key_value {
                continue;
            }

            let record = loaded.record(index + row_offset);
            if record.is_none() {
                info!(sheet, key_value, row_offset, "reference row not found");
            }
            return Ok(record);
        }

        info!(sheet, key_column, key_value, "reference row not found");
        Ok(None)
    }

    fn get_all(&self, sheet: &str, store_id: Option<&str>) -> EngineResult<Vec<Record>> {
        let loaded = self.load(sheet, store_id)?;
        Ok((0..loaded.data_rows().len())
            .filter_map(|index| loaded.record(index))
            .collect())
    }

    fn read_grid(
        &self,
        sheet: &str,
        store_id: Option<&str>,
        start_row: usize,
        row_count: usize,
    ) -> EngineResult<Vec<Vec<String>>> {
        let loaded = self.load(sheet, store_id)?;
        let start = start_row.saturating_sub(1).min(loaded.rows.len());
        let end = start.saturating_add(row_count).min(loaded.rows.len());
        Ok(loaded.rows[start..end].to_vec())
    }

    fn column_number(&self, sheet: &str, column: &str) -> EngineResult<usize> {
        let loaded = self.load(sheet, None)?;
        let index = loaded
            .columns
            .get(column)
            .ok_or_else(|| crate::error::EngineError::ColumnNotFound {
                sheet: sheet.to_string(),
                column: column.to_string(),
            })?;
        Ok(index + 1)
    }

    fn row_number(
        &self,
        sheet: &str,
        key_column: &str,
        key_value: &str,
    ) -> EngineResult<Option<usize>> {
        let loaded = self.load(sheet, None)?;
        let key_index = *loaded
            .columns
            .get(key_column)
            .ok_or_else(|| crate::error::EngineError::ColumnNotFound {
                sheet: sheet.to_string(),
                column: key_column.to_string(),
            })?;

        for (index, row) in loaded.data_rows().iter().enumerate() {
            if row.get(key_index).map(String::as_str) == Some(key_value) {
                // 1-based and counting the header row.
                return Ok(Some(index + 2));
            }
        }

        Ok(None)
    }

    fn write(&self, sheet: &str, row: usize, column: usize, value: &str) -> EngineResult<()> {
        self.source.update(sheet, row, column, value)
    }

    fn invalidate(&self) {
        self.cache.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::MemoryStore;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    fn settings_store() -> CachedStore<MemoryStore> {
        let mut source = MemoryStore::new();
        source.insert(
            "settings",
            None,
            grid(&[
                &["key", "value"],
                &["worker_room_id", "room-1"],
                &["retry_enabled", "true"],
            ]),
        );
        CachedStore::new(source)
    }

    #[test]
    fn test_find_returns_matching_row() {
        let store = settings_store();
        let record = store
            .find("settings", "key", "worker_room_id", 0, None)
            .unwrap()
            .unwrap();
        assert_eq!(record.get("value").unwrap(), "room-1");
    }

    #[test]
    fn test_find_with_offset_returns_following_row() {
        let store = settings_store();
        let record = store
            .find("settings", "key", "worker_room_id", 1, None)
            .unwrap()
            .unwrap();
        assert_eq!(record.get("key").unwrap(), "retry_enabled");
    }

    #[test]
    fn test_find_offset_past_sheet_end_is_none() {
        let store = settings_store();
        let record = store
            .find("settings", "key", "retry_enabled", 1, None)
            .unwrap();
        assert!(record.is_none());
    }

    #[test]
    fn test_find_no_match_is_none() {
        let store = settings_store();
        let record = store.find("settings", "key", "absent", 0, None).unwrap();
        assert!(record.is_none());
    }

    #[test]
    fn test_unknown_key_column_is_config_error() {
        let store = settings_store();
        assert!(store.find("settings", "missing", "x", 0, None).is_err());
    }

    #[test]
    fn test_unknown_record_column_is_config_error() {
        let store = settings_store();
        let record = store
            .find("settings", "key", "worker_room_id", 0, None)
            .unwrap()
            .unwrap();
        assert!(record.get("missing").is_err());
    }

    #[test]
    fn test_column_and_row_numbers_are_one_based() {
        let store = settings_store();
        assert_eq!(store.column_number("settings", "value").unwrap(), 2);
        assert_eq!(
            store
                .row_number("settings", "key", "retry_enabled")
                .unwrap(),
            Some(3)
        );
    }

    #[test]
    fn test_read_grid_slices_by_sheet_rows() {
        let store = settings_store();
        let rows = store.read_grid("settings", None, 2, 10).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "worker_room_id");
    }

    /// Writes are invisible until the cache is explicitly invalidated.
    #[test]
    fn test_write_then_invalidate_refreshes_reads() {
        let store = settings_store();

        // Prime the cache.
        let before = store
            .find("settings", "key", "worker_room_id", 0, None)
            .unwrap()
            .unwrap();
        assert_eq!(before.get("value").unwrap(), "room-1");

        store.write("settings", 2, 2, "room-9").unwrap();

        let stale = store
            .find("settings", "key", "worker_room_id", 0, None)
            .unwrap()
            .unwrap();
        assert_eq!(stale.get("value").unwrap(), "room-1");

        store.invalidate();

        let fresh = store
            .find("settings", "key", "worker_room_id", 0, None)
            .unwrap()
            .unwrap();
        assert_eq!(fresh.get("value").unwrap(), "room-9");
    }

    #[test]
    fn test_missing_sheet_is_an_error() {
        let store = settings_store();
        assert!(store.get_all("nope", None).is_err());
    }
}
