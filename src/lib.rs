//! # sheetbind
//!
//! Label-driven binding between spreadsheet-style grids of text cells and
//! strongly typed Rust records.
//!
//! ## Features
//!
//! - **Declarative labels**: one `#[label = "..."]` per field, resolved once per type
//! - **Batch validation**: every bad cell is reported together, never a partial result
//! - **Permissive headers**: extra columns are ignored, missing ones leave defaults
//! - **Round-trip**: records encode back to a labelled grid with canonical text
//! - **Typed cells**: integers, floats, booleans, dates (incl. Excel serials),
//!   options, custom types
//!
//! ## Quick Start
//!
//! ```rust
//! use sheetbind::{table_record, Grid, TableMapper};
//!
//! table_record! {
//!     #[derive(Debug, Default, Clone, PartialEq)]
//!     pub struct Person {
//!         #[label = "姓名"]
//!         pub name: String,
//!         #[label = "年龄"]
//!         pub age: i64,
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mapper = TableMapper::<Person>::new()?;
//!
//! let grid = Grid::from_rows([["姓名", "年龄"], ["Alice", "30"], ["Bob", "25"]]);
//! let people = mapper.decode(&grid)?;
//! assert_eq!(people[1], Person { name: "Bob".into(), age: 25 });
//!
//! let encoded = mapper.encode(&people)?;
//! assert_eq!(encoded, grid);
//! # Ok(())
//! # }
//! ```
//!
//! ## Reporting bad cells
//!
//! ```rust
//! use sheetbind::{table_record, BindError, Grid};
//!
//! table_record! {
//!     #[derive(Debug, Default)]
//!     pub struct Reading {
//!         #[label = "Value"]
//!         pub value: f64,
//!     }
//! }
//!
//! let grid = Grid::from_rows([["Value"], ["1.5"], ["n/a"], ["2.0"], ["??"]]);
//! match sheetbind::decode::<Reading>(&grid) {
//!     Err(BindError::Decode(errors)) => {
//!         let rows: Vec<u32> = errors.iter().map(|e| e.row).collect();
//!         assert_eq!(rows, vec![3, 5]);
//!     }
//!     other => panic!("expected a batch failure, got {:?}", other),
//! }
//! ```

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod field;
pub mod grid;
pub mod header;
pub mod mapper;
pub mod record;
pub mod types;
pub mod value;

pub use config::{BlankCells, CellFormat, TableOptions};
pub use decode::RowDecoder;
pub use encode::TableEncoder;
pub use error::{BindError, ConversionError, DecodeErrorEntry, DecodeErrors, Result};
pub use field::{FieldDef, FieldIndex, FieldKind};
pub use grid::Grid;
pub use header::ColumnMapping;
pub use mapper::{decode, encode, TableMapper, TableMapperBuilder};
pub use record::TableRecord;
pub use types::{cell_reference, CellValue, Row};
pub use value::CellType;
