//! Persisted identifier high-water marks.
//!
//! Deleting the newest trip must not hand its identifier out again, so the
//! last issued identifier per table is stored next to the tables.

use std::path::PathBuf;

use crate::error::Result;
use crate::records::SequenceRow;
use crate::table::TableStore;

#[derive(Debug, Clone)]
pub struct IdSequence {
    table: TableStore<SequenceRow>,
}

impl IdSequence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            table: TableStore::new(path),
        }
    }

    pub fn table(&self) -> &TableStore<SequenceRow> {
        &self.table
    }

    /// Last identifier issued for `table_name`, 0 if none was recorded.
    pub fn last_issued(&self, table_name: &str) -> Result<u64> {
        Ok(self
            .table
            .load_all()?
            .iter()
            .find(|row| row.table_name == table_name)
            .map(|row| row.last_id)
            .unwrap_or(0))
    }

    /// Raises the mark for `table_name` to `id`. Lower values are ignored.
    pub fn record_issued(&self, table_name: &str, id: u64) -> Result<()> {
        let mut rows = self.table.load_all()?;
        match rows.iter_mut().find(|row| row.table_name == table_name) {
            Some(row) if row.last_id >= id => return Ok(()),
            Some(row) => row.last_id = id,
            None => rows.push(SequenceRow {
                table_name: table_name.to_string(),
                last_id: id,
            }),
        }
        self.table.rewrite_all(&rows)
    }
}
