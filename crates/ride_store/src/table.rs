//! Whole-table persistence for one CSV-backed relation.
//!
//! Every operation works on the whole table: read every row, append one row,
//! or rewrite every row.

use std::fs::{self, File, OpenOptions};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, StoreError};

/// A row type with a fixed column schema.
///
/// `COLUMNS` is written as the header row and must match the serde field
/// names of the implementing struct, in order.
pub trait TableRow: Serialize + DeserializeOwned {
    const COLUMNS: &'static [&'static str];
}

/// Load/append/rewrite access to a single table file.
#[derive(Debug, Clone)]
pub struct TableStore<R> {
    path: PathBuf,
    _row: PhantomData<fn() -> R>,
}

impl<R: TableRow> TableStore<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _row: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the table with its header row and no data if it is absent.
    /// A zero-byte file has no header yet and is initialised the same way.
    pub fn ensure(&self) -> Result<()> {
        if self.path.exists() {
            let len = fs::metadata(&self.path)
                .map_err(|error| StoreError::io(&self.path, error))?
                .len();
            if len > 0 {
                return Ok(());
            }
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|error| StoreError::io(parent, error))?;
            }
        }

        let file = File::create(&self.path).map_err(|error| StoreError::io(&self.path, error))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .write_record(R::COLUMNS)
            .map_err(|error| StoreError::csv(&self.path, error))?;
        writer
            .flush()
            .map_err(|error| StoreError::io(&self.path, error))?;

        debug!(table = %self.path.display(), "created empty table");
        Ok(())
    }

    /// Every row in storage order. A missing table is created first.
    pub fn load_all(&self) -> Result<Vec<R>> {
        self.ensure()?;
        let mut reader =
            csv::Reader::from_path(&self.path).map_err(|error| StoreError::csv(&self.path, error))?;
        reader
            .deserialize()
            .collect::<std::result::Result<Vec<R>, csv::Error>>()
            .map_err(|error| StoreError::csv(&self.path, error))
    }

    /// Appends one row after the existing ones without rewriting them.
    pub fn append_row(&self, row: &R) -> Result<()> {
        self.ensure()?;
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|error| StoreError::io(&self.path, error))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .serialize(row)
            .map_err(|error| StoreError::csv(&self.path, error))?;
        writer
            .flush()
            .map_err(|error| StoreError::io(&self.path, error))
    }

    /// Replaces the whole table with `rows`.
    ///
    /// The new contents go to a temp file that is renamed over the table, so
    /// readers see either the old or the new table.
    pub fn rewrite_all(&self, rows: &[R]) -> Result<()> {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_nanos())
            .unwrap_or(0);
        let temp_path = self.path.with_extension(format!("csv.tmp.{nanos}"));

        if let Err(error) = self.write_rows(&temp_path, rows) {
            let _ = fs::remove_file(&temp_path);
            return Err(error);
        }

        fs::rename(&temp_path, &self.path).map_err(|error| {
            let _ = fs::remove_file(&temp_path);
            StoreError::io(&self.path, error)
        })
    }

    fn write_rows(&self, path: &Path, rows: &[R]) -> Result<()> {
        let file = File::create(path).map_err(|error| StoreError::io(path, error))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .write_record(R::COLUMNS)
            .map_err(|error| StoreError::csv(path, error))?;
        for row in rows {
            writer
                .serialize(row)
                .map_err(|error| StoreError::csv(path, error))?;
        }
        let file = writer
            .into_inner()
            .map_err(|error| StoreError::io(path, error.into_error()))?;
        file.sync_all().map_err(|error| StoreError::io(path, error))
    }
}
