//! Binding options

/// How a blank cell mapped to a non-text field is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlankCells {
    /// Record a [`ConversionError::Blank`](crate::ConversionError::Blank)
    /// for the cell. Default.
    #[default]
    Error,
    /// Leave the field at its default value.
    Default,
}

/// Text representations used when parsing and formatting cell values
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellFormat {
    /// Pattern for date fields. Default: `"%Y-%m-%d"`.
    pub date_format: String,

    /// Pattern for date-time fields. Default: `"%Y-%m-%d %H:%M:%S%.f"`
    /// (the fraction is only written when non-zero).
    /// ISO-8601 (`T`-separated, optional fraction) is always accepted on read.
    pub datetime_format: String,

    /// Written for `true`, and accepted on read besides
    /// `true`/`yes`/`1`. Default: `"TRUE"`.
    pub true_text: String,

    /// Written for `false`, and accepted on read besides
    /// `false`/`no`/`0`. Default: `"FALSE"`.
    pub false_text: String,

    /// Accept Excel serial day numbers (1900 date system) for date and
    /// date-time fields. Default: `true`.
    pub accept_serial_dates: bool,
}

impl Default for CellFormat {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".into(),
            datetime_format: "%Y-%m-%d %H:%M:%S%.f".into(),
            true_text: "TRUE".into(),
            false_text: "FALSE".into(),
            accept_serial_dates: true,
        }
    }
}

/// Options for one [`TableMapper`](crate::mapper::TableMapper)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// 0-based index of the header row; data starts on the next row.
    /// Default: `0`.
    pub header_row: usize,

    /// Trim surrounding whitespace from cells bound to non-text fields
    /// before parsing. Text fields always keep the cell verbatim.
    /// Default: `true`.
    pub trim_values: bool,

    /// Policy for blank cells bound to non-text, non-optional fields.
    pub blank_cells: BlankCells,

    /// Encode an empty record slice as a header-only grid instead of
    /// rejecting it. Default: `false`.
    pub allow_empty_encode: bool,

    /// Value text representations.
    pub format: CellFormat,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            header_row: 0,
            trim_values: true,
            blank_cells: BlankCells::Error,
            allow_empty_encode: false,
            format: CellFormat::default(),
        }
    }
}
