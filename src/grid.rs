//! Rectangular grid of text cells exchanged with spreadsheet codecs

use crate::types::{CellValue, Row};

/// A rectangular, row-major grid of text cells
///
/// Coordinates are 0-based everywhere except [`Grid::cell`], which takes the
/// 1-based row/column numbers a user sees in a spreadsheet application.
///
/// # Examples
///
/// ```
/// use sheetbind::Grid;
///
/// let grid = Grid::from_rows([vec!["Name", "Age"], vec!["Alice", "30"]]);
/// assert_eq!(grid.rows(), 2);
/// assert_eq!(grid.get(1, 0), "Alice");
/// assert_eq!(grid.cell(2, 2), Some("30"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<String>,
}

impl Grid {
    /// Create a grid of empty cells
    pub fn new(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![String::new(); rows * cols],
        }
    }

    /// Build a grid from nested rows of text
    ///
    /// Ragged input is padded with empty cells up to the widest row.
    pub fn from_rows<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let collected: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(|s| s.as_ref().to_string()).collect())
            .collect();

        let rows = collected.len();
        let cols = collected.iter().map(Vec::len).max().unwrap_or(0);
        let mut cells = Vec::with_capacity(rows * cols);
        for mut row in collected {
            row.resize(cols, String::new());
            cells.extend(row);
        }

        Grid { rows, cols, cells }
    }

    /// Build a grid from typed rows as read by a spreadsheet codec
    ///
    /// Rows are placed by position in the slice; each cell is rendered with
    /// [`CellValue::as_string`].
    pub fn from_typed_rows(rows: &[Row]) -> Self {
        Self::from_rows(rows.iter().map(Row::to_strings))
    }

    /// Convert to typed rows for handing to a spreadsheet writer
    ///
    /// Every cell becomes a [`CellValue::String`] except blank cells, which
    /// become [`CellValue::Empty`].
    pub fn to_rows(&self) -> Vec<Row> {
        self.iter_rows()
            .enumerate()
            .map(|(index, cells)| {
                let cells = cells
                    .iter()
                    .map(|text| {
                        if text.is_empty() {
                            CellValue::Empty
                        } else {
                            CellValue::String(text.clone())
                        }
                    })
                    .collect();
                Row::new(index as u32, cells)
            })
            .collect()
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Dimensions as (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// True when the grid has no cells at all
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Text at 0-based coordinates; out-of-range cells read as empty
    pub fn get(&self, row: usize, col: usize) -> &str {
        if row >= self.rows || col >= self.cols {
            return "";
        }
        &self.cells[row * self.cols + col]
    }

    /// Text at 1-based sheet coordinates
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        if row == 0 || col == 0 || row > self.rows || col > self.cols {
            return None;
        }
        Some(self.get(row - 1, col - 1))
    }

    /// Overwrite the text at 0-based coordinates
    ///
    /// Returns `false` (and leaves the grid untouched) when out of range.
    pub fn set(&mut self, row: usize, col: usize, text: impl Into<String>) -> bool {
        if row >= self.rows || col >= self.cols {
            return false;
        }
        self.cells[row * self.cols + col] = text.into();
        true
    }

    /// Cells of one 0-based row
    pub fn row(&self, row: usize) -> Option<&[String]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    /// Iterate rows top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[String]> {
        (0..self.rows).map(move |r| {
            let start = r * self.cols;
            &self.cells[start..start + self.cols]
        })
    }

    /// Append a row, padding or truncating it to the grid width
    ///
    /// Appending to a grid with no columns fixes its width to the row's.
    pub fn push_row<R, S>(&mut self, row: R)
    where
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut row: Vec<String> = row.into_iter().map(|s| s.as_ref().to_string()).collect();
        if self.rows == 0 && self.cols == 0 {
            self.cols = row.len();
        }
        row.resize(self.cols, String::new());
        self.cells.extend(row);
        self.rows += 1;
    }

    /// Plain nested vectors, one per row
    pub fn to_vecs(&self) -> Vec<Vec<String>> {
        self.iter_rows().map(<[String]>::to_vec).collect()
    }
}
