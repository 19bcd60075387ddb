//! Records that can be bound to grid rows

use crate::config::CellFormat;
use crate::error::ConversionError;
use crate::field::FieldDef;

/// A record type whose fields can be addressed by name
///
/// Usually generated with [`table_record!`](crate::table_record); implement
/// it by hand when a struct cannot be declared through the macro.
pub trait TableRecord: Default {
    /// Field table in declaration order
    fn fields() -> &'static [FieldDef];

    /// Parse `text` into the field named `field`
    fn decode_field(
        &mut self,
        field: &str,
        text: &str,
        format: &CellFormat,
    ) -> Result<(), ConversionError>;

    /// Canonical text of the field named `field`
    fn encode_field(&self, field: &str, format: &CellFormat) -> Option<String>;
}

/// Declare a struct together with its [`TableRecord`] implementation
///
/// Each field may carry `#[label = "..."]`; without it the field name is the
/// column label. Other field attributes, doc comments included, are passed
/// through to the struct. Field types must implement
/// [`CellType`](crate::CellType) and the struct must derive (or implement)
/// `Default`.
///
/// # Examples
///
/// ```
/// use sheetbind::{table_record, TableRecord};
///
/// table_record! {
///     #[derive(Debug, Default, Clone, PartialEq)]
///     pub struct Person {
///         #[label = "姓名"]
///         pub name: String,
///         #[label = "年龄"]
///         pub age: i64,
///         pub email: Option<String>,
///     }
/// }
///
/// let labels: Vec<_> = Person::fields().iter().map(|f| f.label).collect();
/// assert_eq!(labels, vec!["姓名", "年龄", "email"]);
/// ```
#[macro_export]
macro_rules! table_record {
    (@label $field:ident $label:literal) => { $label };
    (@label $field:ident) => { stringify!($field) };

    // field munching: [done fields] [pending attributes] [pending label]
    (@field $meta:tt $vis:tt $name:ident [$($done:tt)*] [] []) => {
        $crate::table_record!(@emit $meta $vis $name $($done)*);
    };
    (@field $meta:tt $vis:tt $name:ident [$($done:tt)*] [$($attrs:tt)*] [$($label:tt)*]
        #[label = $l:literal] $($rest:tt)*
    ) => {
        $crate::table_record!(@field $meta $vis $name [$($done)*] [$($attrs)*] [$l] $($rest)*);
    };
    (@field $meta:tt $vis:tt $name:ident [$($done:tt)*] [$($attrs:tt)*] [$($label:tt)*]
        #[$($attr:tt)*] $($rest:tt)*
    ) => {
        $crate::table_record!(
            @field $meta $vis $name [$($done)*] [$($attrs)* #[$($attr)*]] [$($label)*] $($rest)*
        );
    };
    (@field $meta:tt $vis:tt $name:ident [$($done:tt)*] [$($attrs:tt)*] [$($label:tt)*]
        $fvis:vis $field:ident : $ty:ty $(, $($rest:tt)*)?
    ) => {
        $crate::table_record!(
            @field $meta $vis $name
            [$($done)* { [$($attrs)*] [$($label)*] [$fvis] $field [$ty] }] [] []
            $($($rest)*)?
        );
    };

    (@emit [$(#[$meta:meta])*] [$vis:vis] $name:ident
        $({ [$($fattr:tt)*] [$($label:tt)*] [$fvis:vis] $field:ident [$ty:ty] })*
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $($fattr)* $fvis $field: $ty, )*
        }

        impl $crate::TableRecord for $name {
            fn fields() -> &'static [$crate::FieldDef] {
                const FIELDS: &[$crate::FieldDef] = &[
                    $(
                        $crate::FieldDef::new(
                            stringify!($field),
                            <$ty as $crate::CellType>::KIND,
                            <$ty as $crate::CellType>::TYPE_NAME,
                        )
                        .with_label($crate::table_record!(@label $field $($label)*))
                        .optional(<$ty as $crate::CellType>::OPTIONAL),
                    )*
                ];
                FIELDS
            }

            #[allow(unused_variables)]
            fn decode_field(
                &mut self,
                field: &str,
                text: &str,
                format: &$crate::CellFormat,
            ) -> ::std::result::Result<(), $crate::ConversionError> {
                match field {
                    $(
                        stringify!($field) => {
                            self.$field = <$ty as $crate::CellType>::parse_cell(text, format)?;
                            Ok(())
                        }
                    )*
                    other => Err($crate::ConversionError::UnknownField(other.to_string())),
                }
            }

            #[allow(unused_variables)]
            fn encode_field(
                &self,
                field: &str,
                format: &$crate::CellFormat,
            ) -> ::std::option::Option<::std::string::String> {
                match field {
                    $(
                        stringify!($field) => {
                            Some(<$ty as $crate::CellType>::format_cell(&self.$field, format))
                        }
                    )*
                    _ => None,
                }
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident { $($body:tt)* }
    ) => {
        $crate::table_record!(@field [$(#[$meta])*] [$vis] $name [] [] [] $($body)*);
    };
}
