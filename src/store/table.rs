//! Table Store
//!
//! Reads and rewrites a single CSV table.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::GradeError;

use super::Record;

/// Handle on one CSV table file
///
/// Holds no cached rows: every `load` reads the file, every `save`
/// rewrites it completely.
#[derive(Debug, Clone)]
pub struct TableStore {
    /// Location of the table file
    path: PathBuf,
}

impl TableStore {
    /// Create a handle for the table at `path` (the file need not exist)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read every record in the table
    ///
    /// Returns an empty vec if the file does not exist. A row whose
    /// width differs from the header is a malformed record.
    pub fn load(&self) -> Result<Vec<Record>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "table missing, loading as empty");
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let header = reader.headers()?.clone();
        let mut records = Vec::new();

        for row in reader.records() {
            let row = row?;

            if row.len() != header.len() {
                let line = row.position().map(|p| p.line()).unwrap_or_default();
                return Err(GradeError::MalformedRecord(format!(
                    "{}: line {} has {} fields, header has {}",
                    self.path.display(),
                    line,
                    row.len(),
                    header.len()
                )));
            }

            let mut record = Record::new();
            for (name, value) in header.iter().zip(row.iter()) {
                record.insert(name, value);
            }
            records.push(record);
        }

        debug!(path = %self.path.display(), rows = records.len(), "table loaded");
        Ok(records)
    }

    /// Overwrite the table with `records`
    ///
    /// The header is taken from the first record's field names; every
    /// other record must carry exactly the same fields. An empty slice
    /// has no header to offer and is a schema error.
    pub fn save(&self, records: &[Record]) -> Result<()> {
        let first = records.first().ok_or_else(|| {
            GradeError::Schema(format!(
                "cannot save an empty record set to {} (no field names)",
                self.path.display()
            ))
        })?;

        let header: Vec<&str> = first.field_names().collect();

        // Resolve every row against the header before touching the file
        let mut rows: Vec<Vec<&str>> = Vec::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if record.len() != header.len() {
                return Err(GradeError::Schema(format!(
                    "record {} has {} fields, expected {}",
                    i,
                    record.len(),
                    header.len()
                )));
            }
            let row = header
                .iter()
                .map(|name| {
                    record.get(name).ok_or_else(|| {
                        GradeError::Schema(format!("record {} is missing field '{}'", i, name))
                    })
                })
                .collect::<Result<Vec<&str>>>()?;
            rows.push(row);
        }

        self.write_atomic(&header, &rows)?;

        debug!(path = %self.path.display(), rows = rows.len(), "table saved");
        Ok(())
    }

    /// Overwrite the table with a header row and no records
    pub fn truncate(&self, header: &[&str]) -> Result<()> {
        if header.is_empty() {
            return Err(GradeError::Schema(format!(
                "cannot truncate {} without field names",
                self.path.display()
            )));
        }

        self.write_atomic(header, &[])?;

        debug!(path = %self.path.display(), "table truncated");
        Ok(())
    }

    /// Whether the table file exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Get the table file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Write header and rows to a sibling temp file, then rename over the table
    fn write_atomic(&self, header: &[&str], rows: &[Vec<&str>]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.temp_path();
        let written = Self::write_rows(&temp_path, header, rows);

        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }
        Ok(())
    }

    fn write_rows(path: &Path, header: &[&str], rows: &[Vec<&str>]) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(header)?;
        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// "student.csv" → "student.csv.tmp"
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
