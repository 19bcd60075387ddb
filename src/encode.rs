//! Records -> grid

use std::marker::PhantomData;

use crate::config::TableOptions;
use crate::error::{BindError, Result};
use crate::field::FieldIndex;
use crate::grid::Grid;
use crate::record::TableRecord;

/// Emits a labelled header row followed by one text row per record
pub struct TableEncoder<'a, T> {
    index: &'a FieldIndex,
    options: &'a TableOptions,
    _record: PhantomData<fn(&T)>,
}

impl<'a, T: TableRecord> TableEncoder<'a, T> {
    pub fn new(index: &'a FieldIndex, options: &'a TableOptions) -> Self {
        TableEncoder {
            index,
            options,
            _record: PhantomData,
        }
    }

    /// Header row: every field's label in declaration order
    pub fn header(&self) -> Vec<&'static str> {
        self.index.labels().collect()
    }

    /// Text cells for one record, in header order
    pub fn encode_row(&self, record: &T) -> Vec<String> {
        self.index
            .fields()
            .iter()
            .map(|field| {
                record
                    .encode_field(field.name, &self.options.format)
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Encode `records` into a grid of `records.len() + 1` rows
    ///
    /// An empty slice is rejected unless
    /// [`TableOptions::allow_empty_encode`] is set.
    pub fn encode(&self, records: &[T]) -> Result<Grid> {
        if records.is_empty() && !self.options.allow_empty_encode {
            return Err(BindError::InvalidInput(
                "cannot encode an empty record collection".to_string(),
            ));
        }

        let mut grid = Grid::new(records.len() + 1, self.index.len());
        for (col, label) in self.index.labels().enumerate() {
            grid.set(0, col, label);
        }

        for (i, record) in records.iter().enumerate() {
            for (col, text) in self.encode_row(record).into_iter().enumerate() {
                grid.set(i + 1, col, text);
            }
        }

        tracing::debug!(
            rows = records.len(),
            cols = self.index.len(),
            "encoded records"
        );
        Ok(grid)
    }
}
