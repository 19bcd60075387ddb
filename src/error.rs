//! Error types for sheetbind

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::types::cell_reference;

/// Result type alias for sheetbind operations
pub type Result<T> = std::result::Result<T, BindError>;

/// Main error type for all binding operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindError {
    /// Caller handed over something that cannot be processed at all
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Two fields of one record type declare the same label
    #[error("Duplicate label '{label}' declared by fields '{first}' and '{second}'")]
    DuplicateLabel {
        label: String,
        first: String,
        second: String,
    },

    /// One or more cells failed to convert; carries every failure
    #[error("{0}")]
    Decode(DecodeErrors),
}

impl BindError {
    /// Cell failures carried by a batch decode error, if this is one
    pub fn decode_errors(&self) -> Option<&DecodeErrors> {
        match self {
            BindError::Decode(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Why a single cell's text could not be turned into its field's type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("invalid integer: {0}")]
    Integer(#[from] ParseIntError),

    #[error("invalid number: {0}")]
    Float(#[from] ParseFloatError),

    #[error("'{0}' is not a recognised boolean")]
    Boolean(String),

    #[error("invalid date, expected format '{format}'")]
    Date { format: String },

    #[error("invalid date-time, expected format '{format}'")]
    DateTime { format: String },

    #[error("cell is blank")]
    Blank,

    #[error("record has no field named '{0}'")]
    UnknownField(String),

    #[error("{0}")]
    Custom(String),
}

/// One failed cell conversion with its location and cause
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DecodeErrorEntry {
    /// Sheet row (1-based, header row included)
    pub row: u32,
    /// Sheet column (1-based)
    pub column: u32,
    /// Cell text as found in the grid
    pub raw: String,
    /// Name of the Rust type the cell was converted to
    pub target_type: &'static str,
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_cause"))]
    pub cause: ConversionError,
    /// Human readable rendering of the whole entry
    pub message: String,
}

impl DecodeErrorEntry {
    /// Build an entry from 0-based grid coordinates
    pub fn new(
        row: usize,
        col: usize,
        raw: impl Into<String>,
        target_type: &'static str,
        cause: ConversionError,
    ) -> Self {
        let raw = raw.into();
        let reference = cell_reference(row as u32, col as u32);
        let message = format!(
            "row {}, column {} ({}): cannot convert '{}' to {}: {}",
            row + 1,
            col + 1,
            reference,
            raw,
            target_type,
            cause
        );

        DecodeErrorEntry {
            row: row as u32 + 1,
            column: col as u32 + 1,
            raw,
            target_type,
            cause,
            message,
        }
    }

    /// Excel-style reference of the failed cell (e.g. "B3")
    pub fn reference(&self) -> String {
        cell_reference(self.row - 1, self.column - 1)
    }
}

impl fmt::Display for DecodeErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(feature = "serde")]
fn serialize_cause<S>(
    cause: &ConversionError,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(cause)
}

/// Accumulates cell failures across a whole decode call
///
/// Nothing short-circuits: every failed cell lands here, and the decode
/// result is only released through [`DecodeErrors::into_result`] once the
/// whole grid has been scanned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeErrors {
    entries: Vec<DecodeErrorEntry>,
}

impl DecodeErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: DecodeErrorEntry) {
        self.entries.push(entry);
    }

    pub fn extend<I: IntoIterator<Item = DecodeErrorEntry>>(&mut self, entries: I) {
        self.entries.extend(entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[DecodeErrorEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DecodeErrorEntry> {
        self.entries.iter()
    }

    /// Entries reported for one sheet row (1-based)
    pub fn for_row(&self, row: u32) -> impl Iterator<Item = &DecodeErrorEntry> {
        self.entries.iter().filter(move |e| e.row == row)
    }

    /// Release `records` if no cell failed, otherwise fail with every entry
    pub fn into_result<T>(mut self, records: Vec<T>) -> Result<Vec<T>> {
        if self.entries.is_empty() {
            return Ok(records);
        }

        self.entries.sort_by_key(|e| (e.row, e.column));
        tracing::warn!(
            failed_cells = self.entries.len(),
            "decode rejected: cells failed to convert"
        );
        Err(BindError::Decode(self))
    }
}

impl fmt::Display for DecodeErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to decode {} cell(s)", self.entries.len())?;
        for entry in &self.entries {
            write!(f, "\n  - {}", entry)?;
        }
        Ok(())
    }
}

impl std::error::Error for DecodeErrors {}

impl IntoIterator for DecodeErrors {
    type Item = DecodeErrorEntry;
    type IntoIter = std::vec::IntoIter<DecodeErrorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a DecodeErrors {
    type Item = &'a DecodeErrorEntry;
    type IntoIter = std::slice::Iter<'a, DecodeErrorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
