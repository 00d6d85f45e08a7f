use sha2::{Digest, Sha256};

use crate::error::{GridlookError, Result};

/// Column holding the account identifier. Every loaded table must have it.
pub const KEY_COLUMN: &str = "ACCT_ID";

/// In-memory consumer dataset: a header row plus string-normalized cells.
/// All values are compared as strings regardless of their source type;
/// missing cells are the empty string.
#[derive(Debug, Clone)]
pub struct ConsumerTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    key_idx: usize,
    fingerprint: String,
}

impl ConsumerTable {
    /// Build a table from a header and rows. Fails if `ACCT_ID` is absent.
    /// Rows are padded/truncated to the header width.
    pub fn new(columns: Vec<String>, mut rows: Vec<Vec<String>>) -> Result<Self> {
        let key_idx = columns
            .iter()
            .position(|c| c == KEY_COLUMN)
            .ok_or_else(|| GridlookError::Schema(KEY_COLUMN.to_string()))?;
        for row in &mut rows {
            row.resize(columns.len(), String::new());
        }
        let fingerprint = compute_fingerprint(&columns, &rows);
        Ok(Self {
            columns,
            rows,
            key_idx,
            fingerprint,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Identifier-column values in row order (duplicates included).
    pub fn key_values(&self) -> impl Iterator<Item = &str> {
        let idx = self.key_idx;
        self.rows.iter().map(move |r| r[idx].as_str())
    }

    /// First row whose identifier equals `id`. Duplicate identifiers are
    /// tolerated; later rows are shadowed.
    pub fn find(&self, id: &str) -> Option<&[String]> {
        self.rows
            .iter()
            .find(|r| r[self.key_idx] == id)
            .map(|r| r.as_slice())
    }

    /// SHA-256 over columns and cells, used to key derived caches.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn compute_fingerprint(columns: &[String], rows: &[Vec<String>]) -> String {
    let mut hasher = Sha256::new();
    for col in columns {
        hasher.update(col.as_bytes());
        hasher.update([0]);
    }
    for row in rows {
        for cell in row {
            hasher.update(cell.as_bytes());
            hasher.update([0]);
        }
        hasher.update([1]);
    }
    hex::encode(hasher.finalize())
}
