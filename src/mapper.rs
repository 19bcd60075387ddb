//! High-level decode/encode entry points

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::config::{BlankCells, CellFormat, TableOptions};
use crate::decode::RowDecoder;
use crate::encode::TableEncoder;
use crate::error::Result;
use crate::field::FieldIndex;
use crate::grid::Grid;
use crate::record::TableRecord;

/// Binds grids to records of type `T`
///
/// Build once and reuse; the mapper holds the shared field index and the
/// options and keeps no per-call state, so it can be shared across threads.
///
/// # Examples
///
/// ```
/// use sheetbind::{table_record, Grid, TableMapper};
///
/// table_record! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Person {
///         #[label = "Name"]
///         pub name: String,
///         #[label = "Age"]
///         pub age: u32,
///     }
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mapper = TableMapper::<Person>::new()?;
///
/// let grid = Grid::from_rows([["Name", "Age"], ["Alice", "30"]]);
/// let people = mapper.decode(&grid)?;
/// assert_eq!(people[0].age, 30);
///
/// let back = mapper.encode(&people)?;
/// assert_eq!(back, grid);
/// # Ok(())
/// # }
/// ```
pub struct TableMapper<T> {
    index: Arc<FieldIndex>,
    options: TableOptions,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for TableMapper<T> {
    fn clone(&self) -> Self {
        TableMapper {
            index: Arc::clone(&self.index),
            options: self.options.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> fmt::Debug for TableMapper<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableMapper")
            .field("record", &std::any::type_name::<T>())
            .field("fields", &self.index.len())
            .field("options", &self.options)
            .finish()
    }
}

impl<T: TableRecord + 'static> TableMapper<T> {
    /// Mapper with default options
    ///
    /// Fails if two fields of `T` share a label.
    pub fn new() -> Result<Self> {
        Self::with_options(TableOptions::default())
    }

    /// Mapper with explicit options
    pub fn with_options(options: TableOptions) -> Result<Self> {
        Ok(TableMapper {
            index: FieldIndex::cached::<T>()?,
            options,
            _record: PhantomData,
        })
    }

    /// Start configuring a mapper
    pub fn builder() -> TableMapperBuilder<T> {
        TableMapperBuilder::new()
    }
}

impl<T: TableRecord> TableMapper<T> {
    pub fn index(&self) -> &FieldIndex {
        &self.index
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Decode every data row of `grid`
    ///
    /// Either all rows convert and the records are returned in row order, or
    /// the call fails with [`BindError::Decode`](crate::BindError::Decode)
    /// listing every cell that did not convert.
    pub fn decode(&self, grid: &Grid) -> Result<Vec<T>> {
        RowDecoder::<T>::new(grid, &self.index, &self.options)?.decode_all(grid)
    }

    /// Same as [`decode`](Self::decode), spreading rows over the rayon pool
    #[cfg(feature = "parallel")]
    pub fn decode_parallel(&self, grid: &Grid) -> Result<Vec<T>>
    where
        T: Send,
    {
        RowDecoder::<T>::new(grid, &self.index, &self.options)?.decode_all_parallel(grid)
    }

    /// Encode `records` into a labelled grid
    pub fn encode(&self, records: &[T]) -> Result<Grid> {
        TableEncoder::<T>::new(&self.index, &self.options).encode(records)
    }

    /// Labels in header order
    pub fn header(&self) -> Vec<&'static str> {
        self.index.labels().collect()
    }
}

/// Builder for configured [`TableMapper`]s
pub struct TableMapperBuilder<T> {
    options: TableOptions,
    _record: PhantomData<fn() -> T>,
}

impl<T: TableRecord + 'static> TableMapperBuilder<T> {
    /// Create a new builder
    pub fn new() -> Self {
        TableMapperBuilder {
            options: TableOptions::default(),
            _record: PhantomData,
        }
    }

    /// Set the 0-based header row
    pub fn with_header_row(mut self, row: usize) -> Self {
        self.options.header_row = row;
        self
    }

    /// Trim non-text cells before parsing
    pub fn with_trim_values(mut self, trim: bool) -> Self {
        self.options.trim_values = trim;
        self
    }

    /// Set the blank-cell policy
    pub fn with_blank_cells(mut self, policy: BlankCells) -> Self {
        self.options.blank_cells = policy;
        self
    }

    /// Allow encoding an empty slice as a header-only grid
    pub fn with_allow_empty_encode(mut self, allow: bool) -> Self {
        self.options.allow_empty_encode = allow;
        self
    }

    /// Set the date pattern
    pub fn with_date_format(mut self, pattern: &str) -> Self {
        self.options.format.date_format = pattern.to_string();
        self
    }

    /// Set the date-time pattern
    pub fn with_datetime_format(mut self, pattern: &str) -> Self {
        self.options.format.datetime_format = pattern.to_string();
        self
    }

    /// Set the texts written for `true` and `false`
    pub fn with_bool_text(mut self, true_text: &str, false_text: &str) -> Self {
        self.options.format.true_text = true_text.to_string();
        self.options.format.false_text = false_text.to_string();
        self
    }

    /// Accept Excel serial numbers for dates
    pub fn with_serial_dates(mut self, accept: bool) -> Self {
        self.options.format.accept_serial_dates = accept;
        self
    }

    /// Replace all value formats at once
    pub fn with_format(mut self, format: CellFormat) -> Self {
        self.options.format = format;
        self
    }

    /// Build the mapper
    pub fn build(self) -> Result<TableMapper<T>> {
        TableMapper::with_options(self.options)
    }
}

impl<T: TableRecord + 'static> Default for TableMapperBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode `grid` with default options
///
/// # Examples
///
/// ```
/// use sheetbind::{table_record, Grid};
///
/// table_record! {
///     #[derive(Debug, Default)]
///     pub struct Row {
///         #[label = "Id"]
///         pub id: u64,
///     }
/// }
///
/// let grid = Grid::from_rows([["Id"], ["7"], ["x"]]);
/// let err = sheetbind::decode::<Row>(&grid).unwrap_err();
/// assert_eq!(err.decode_errors().unwrap().len(), 1);
/// ```
pub fn decode<T: TableRecord + 'static>(grid: &Grid) -> Result<Vec<T>> {
    TableMapper::<T>::new()?.decode(grid)
}

/// Encode `records` with default options
pub fn encode<T: TableRecord + 'static>(records: &[T]) -> Result<Grid> {
    TableMapper::<T>::new()?.encode(records)
}
