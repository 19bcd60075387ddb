//! Typed cell values as produced by spreadsheet codecs

/// A single typed cell handed out by a worksheet codec
///
/// Bridged into a [`Grid`](crate::grid::Grid) through
/// [`Grid::from_typed_rows`](crate::grid::Grid::from_typed_rows) and back
/// with [`Grid::to_rows`](crate::grid::Grid::to_rows).
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Excel serial day number, read by date fields when serials are accepted
    DateTime(f64),
}

impl CellValue {
    /// The text a grid cell holds for this value
    pub fn as_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::String(s) => s.clone(),
            CellValue::Int(i) => itoa::Buffer::new().format(*i).to_owned(),
            CellValue::Float(f) | CellValue::DateTime(f) => f.to_string(),
            CellValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        }
    }
}

/// One worksheet row of typed cells
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Row index (0-based)
    pub index: u32,
    pub cells: Vec<CellValue>,
}

impl Row {
    pub fn new(index: u32, cells: Vec<CellValue>) -> Self {
        Row { index, cells }
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.cells.iter().map(CellValue::as_string).collect()
    }
}

/// Excel-style reference ("A1", "AB12") for 0-based coordinates
pub fn cell_reference(row: u32, col: u32) -> String {
    let mut letters = Vec::new();
    let mut col = col + 1;
    while col > 0 {
        col -= 1;
        letters.push(b'A' + (col % 26) as u8);
        col /= 26;
    }
    letters.reverse();

    let mut reference = String::from_utf8(letters).unwrap_or_default();
    reference.push_str(itoa::Buffer::new().format(row + 1));
    reference
}
