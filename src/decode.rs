//! Grid -> records

use std::marker::PhantomData;

use crate::config::{BlankCells, TableOptions};
use crate::error::{BindError, ConversionError, DecodeErrorEntry, DecodeErrors, Result};
use crate::field::{FieldIndex, FieldKind};
use crate::grid::Grid;
use crate::header::ColumnMapping;
use crate::record::TableRecord;

/// Decodes data rows into records of type `T`
///
/// Holds the column mapping for one grid; build it with
/// [`RowDecoder::new`] and feed it row indices. A cell that fails to
/// convert never stops the row: the field keeps its default and an entry is
/// reported.
pub struct RowDecoder<'a, T> {
    index: &'a FieldIndex,
    mapping: ColumnMapping,
    options: &'a TableOptions,
    _record: PhantomData<fn() -> T>,
}

impl<'a, T: TableRecord> RowDecoder<'a, T> {
    /// Resolve the header row of `grid` and prepare to decode its data rows
    pub fn new(grid: &Grid, index: &'a FieldIndex, options: &'a TableOptions) -> Result<Self> {
        check_grid(grid, options)?;

        let header = grid.row(options.header_row).unwrap_or(&[]);
        let mapping = ColumnMapping::resolve(header, index);

        Ok(RowDecoder {
            index,
            mapping,
            options,
            _record: PhantomData,
        })
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    /// 0-based indices of the data rows
    pub fn data_rows(&self, grid: &Grid) -> std::ops::Range<usize> {
        (self.options.header_row + 1).min(grid.rows())..grid.rows()
    }

    /// Decode one 0-based grid row
    pub fn decode_row(&self, grid: &Grid, row: usize) -> (T, Vec<DecodeErrorEntry>) {
        let mut record = T::default();
        let mut errors = Vec::new();

        for (col, pos) in self.mapping.iter() {
            let Some(field) = self.index.field(pos) else {
                continue;
            };

            let raw = grid.get(row, col);
            let text = if field.kind != FieldKind::Text && self.options.trim_values {
                raw.trim()
            } else {
                raw
            };

            if text.is_empty() && field.kind != FieldKind::Text && !field.optional {
                match self.options.blank_cells {
                    BlankCells::Default => continue,
                    BlankCells::Error => {
                        errors.push(DecodeErrorEntry::new(
                            row,
                            col,
                            raw,
                            field.type_name,
                            ConversionError::Blank,
                        ));
                        continue;
                    }
                }
            }

            if let Err(cause) = record.decode_field(field.name, text, &self.options.format) {
                errors.push(DecodeErrorEntry::new(row, col, raw, field.type_name, cause));
            }
        }

        (record, errors)
    }

    /// Decode every data row, gating the result on zero failures
    pub fn decode_all(&self, grid: &Grid) -> Result<Vec<T>> {
        let rows = self.data_rows(grid);
        let mut records = Vec::with_capacity(rows.len());
        let mut errors = DecodeErrors::new();

        for row in rows {
            let (record, row_errors) = self.decode_row(grid, row);
            records.push(record);
            errors.extend(row_errors);
        }

        tracing::debug!(
            rows = records.len(),
            mapped_columns = self.mapping.len(),
            failed_cells = errors.len(),
            "decoded grid"
        );
        errors.into_result(records)
    }

    /// Decode every data row on the rayon pool
    ///
    /// Records and errors come out in the same order as [`decode_all`](Self::decode_all).
    #[cfg(feature = "parallel")]
    pub fn decode_all_parallel(&self, grid: &Grid) -> Result<Vec<T>>
    where
        T: Send,
    {
        use rayon::prelude::*;

        let decoded: Vec<(T, Vec<DecodeErrorEntry>)> = self
            .data_rows(grid)
            .into_par_iter()
            .map(|row| self.decode_row(grid, row))
            .collect();

        let mut records = Vec::with_capacity(decoded.len());
        let mut errors = DecodeErrors::new();
        for (record, row_errors) in decoded {
            records.push(record);
            errors.extend(row_errors);
        }
        errors.into_result(records)
    }
}

fn check_grid(grid: &Grid, options: &TableOptions) -> Result<()> {
    if grid.is_empty() {
        return Err(BindError::InvalidInput(
            "grid has no cells, a header row is required".to_string(),
        ));
    }
    if options.header_row >= grid.rows() {
        return Err(BindError::InvalidInput(format!(
            "header row {} is outside a grid of {} row(s)",
            options.header_row + 1,
            grid.rows()
        )));
    }
    Ok(())
}
