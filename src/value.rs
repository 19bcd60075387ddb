//! Conversion between cell text and Rust values

use std::fmt::Write as _;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::config::CellFormat;
use crate::error::ConversionError;
use crate::field::FieldKind;

/// Largest serial number Excel accepts (9999-12-31)
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

const ISO_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A value that can live in a single grid cell
///
/// Implemented for `String`, the primitive integers, `f32`/`f64`, `bool`,
/// [`NaiveDate`], [`NaiveDateTime`] and `Option<T>` of any of those.
/// Implement it for your own types to bind them with
/// [`table_record!`](crate::table_record).
///
/// # Examples
///
/// ```
/// use sheetbind::{CellFormat, CellType, ConversionError, FieldKind};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Percent(u8);
///
/// impl CellType for Percent {
///     const KIND: FieldKind = FieldKind::Custom;
///     const TYPE_NAME: &'static str = "Percent";
///
///     fn parse_cell(text: &str, _format: &CellFormat) -> Result<Self, ConversionError> {
///         let digits = text.strip_suffix('%').ok_or_else(|| {
///             ConversionError::Custom("missing '%' suffix".to_string())
///         })?;
///         Ok(Percent(digits.parse()?))
///     }
///
///     fn format_cell(&self, _format: &CellFormat) -> String {
///         format!("{}%", self.0)
///     }
/// }
///
/// let format = CellFormat::default();
/// assert_eq!(Percent::parse_cell("42%", &format).unwrap(), Percent(42));
/// ```
pub trait CellType: Sized {
    /// Semantic kind reported in the field table
    const KIND: FieldKind;

    /// Type name used in error messages
    const TYPE_NAME: &'static str;

    /// Whether a blank cell is a legitimate value of this type
    const OPTIONAL: bool = false;

    /// Parse the cell text
    fn parse_cell(text: &str, format: &CellFormat) -> Result<Self, ConversionError>;

    /// Canonical text for the value
    fn format_cell(&self, format: &CellFormat) -> String;
}

impl CellType for String {
    const KIND: FieldKind = FieldKind::Text;
    const TYPE_NAME: &'static str = "String";

    fn parse_cell(text: &str, _format: &CellFormat) -> Result<Self, ConversionError> {
        Ok(text.to_string())
    }

    fn format_cell(&self, _format: &CellFormat) -> String {
        self.clone()
    }
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CellType for $ty {
                const KIND: FieldKind = FieldKind::Integer;
                const TYPE_NAME: &'static str = stringify!($ty);

                fn parse_cell(text: &str, _format: &CellFormat) -> Result<Self, ConversionError> {
                    Ok(text.parse::<$ty>()?)
                }

                fn format_cell(&self, _format: &CellFormat) -> String {
                    itoa::Buffer::new().format(*self).to_owned()
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CellType for $ty {
                const KIND: FieldKind = FieldKind::Float;
                const TYPE_NAME: &'static str = stringify!($ty);

                fn parse_cell(text: &str, _format: &CellFormat) -> Result<Self, ConversionError> {
                    Ok(text.parse::<$ty>()?)
                }

                // Display is the shortest text that parses back to the same value
                fn format_cell(&self, _format: &CellFormat) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_float!(f32, f64);

impl CellType for bool {
    const KIND: FieldKind = FieldKind::Boolean;
    const TYPE_NAME: &'static str = "bool";

    fn parse_cell(text: &str, format: &CellFormat) -> Result<Self, ConversionError> {
        if text.eq_ignore_ascii_case(&format.true_text) {
            return Ok(true);
        }
        if text.eq_ignore_ascii_case(&format.false_text) {
            return Ok(false);
        }
        match text.to_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" => Ok(false),
            _ => Err(ConversionError::Boolean(text.to_string())),
        }
    }

    fn format_cell(&self, format: &CellFormat) -> String {
        if *self {
            format.true_text.clone()
        } else {
            format.false_text.clone()
        }
    }
}

impl CellType for NaiveDate {
    const KIND: FieldKind = FieldKind::Date;
    const TYPE_NAME: &'static str = "NaiveDate";

    fn parse_cell(text: &str, format: &CellFormat) -> Result<Self, ConversionError> {
        NaiveDate::parse_from_str(text, &format.date_format)
            .ok()
            .or_else(|| serial_fallback(text, format).map(|dt| dt.date()))
            .ok_or_else(|| ConversionError::Date {
                format: format.date_format.clone(),
            })
    }

    fn format_cell(&self, format: &CellFormat) -> String {
        let mut out = String::new();
        if write!(out, "{}", self.format(&format.date_format)).is_err() {
            // unusable pattern; fall back to ISO
            out = self.to_string();
        }
        out
    }
}

impl CellType for NaiveDateTime {
    const KIND: FieldKind = FieldKind::DateTime;
    const TYPE_NAME: &'static str = "NaiveDateTime";

    fn parse_cell(text: &str, format: &CellFormat) -> Result<Self, ConversionError> {
        std::iter::once(format.datetime_format.as_str())
            .chain(ISO_DATETIME_FORMATS.iter().copied())
            .find_map(|pattern| NaiveDateTime::parse_from_str(text, pattern).ok())
            .or_else(|| serial_fallback(text, format))
            .ok_or_else(|| ConversionError::DateTime {
                format: format.datetime_format.clone(),
            })
    }

    fn format_cell(&self, format: &CellFormat) -> String {
        let mut out = String::new();
        if write!(out, "{}", self.format(&format.datetime_format)).is_err() {
            out = self.format("%Y-%m-%dT%H:%M:%S%.f").to_string();
        }
        out
    }
}

/// A blank or whitespace-only cell reads as `None`.
///
/// Blank and absent are not distinguished, so `Some(String::new())` (or any
/// whitespace-only text) encodes to a blank cell and reads back as `None`.
impl<T: CellType> CellType for Option<T> {
    const KIND: FieldKind = T::KIND;
    const TYPE_NAME: &'static str = T::TYPE_NAME;
    const OPTIONAL: bool = true;

    fn parse_cell(text: &str, format: &CellFormat) -> Result<Self, ConversionError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        T::parse_cell(text, format).map(Some)
    }

    fn format_cell(&self, format: &CellFormat) -> String {
        match self {
            Some(value) => value.format_cell(format),
            None => String::new(),
        }
    }
}

fn serial_fallback(text: &str, format: &CellFormat) -> Option<NaiveDateTime> {
    if !format.accept_serial_dates {
        return None;
    }
    text.parse::<f64>().ok().and_then(serial_to_datetime)
}

/// Convert an Excel serial day number (1900 date system) to a date-time
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }

    let days = serial.trunc();
    let millis = ((serial - days) * 86_400_000.0).round() as i64;
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;

    epoch
        .checked_add_signed(TimeDelta::try_days(days as i64)?)?
        .checked_add_signed(TimeDelta::try_milliseconds(millis)?)
}
