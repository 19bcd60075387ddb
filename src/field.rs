//! Field metadata index: label <-> field lookups for one record type

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};

use indexmap::IndexMap;

use crate::error::{BindError, Result};
use crate::record::TableRecord;

/// Semantic value type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    Boolean,
    Date,
    DateTime,
    /// User-defined [`CellType`](crate::value::CellType)
    Custom,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Boolean => "boolean",
            FieldKind::Date => "date",
            FieldKind::DateTime => "date-time",
            FieldKind::Custom => "custom",
        };
        f.write_str(s)
    }
}

/// Static description of one bound field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Field identifier (the Rust field name)
    pub name: &'static str,
    /// Header text identifying the field's column
    pub label: &'static str,
    pub kind: FieldKind,
    /// Rust type name, used in error messages
    pub type_name: &'static str,
    /// Blank cells are a valid value (`Option<T>` fields)
    pub optional: bool,
}

impl FieldDef {
    /// Describe a field whose label is its own name
    pub const fn new(name: &'static str, kind: FieldKind, type_name: &'static str) -> Self {
        FieldDef {
            name,
            label: name,
            kind,
            type_name,
            optional: false,
        }
    }

    /// Set the display label
    pub const fn with_label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    /// Mark blank cells as valid for this field
    pub const fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }
}

/// Precomputed, immutable label <-> field mapping for one record type
///
/// Built once per type and shared freely; it never changes after
/// construction. Positions refer to the order of
/// [`TableRecord::fields`].
#[derive(Debug, Clone)]
pub struct FieldIndex {
    fields: &'static [FieldDef],
    by_label: IndexMap<&'static str, usize>,
}

impl FieldIndex {
    /// Index a field table, rejecting duplicate labels
    pub fn new(fields: &'static [FieldDef]) -> Result<Self> {
        let mut by_label = IndexMap::with_capacity(fields.len());

        for (pos, field) in fields.iter().enumerate() {
            if let Some(&first) = by_label.get(field.label) {
                let first: &FieldDef = &fields[first];
                return Err(BindError::DuplicateLabel {
                    label: field.label.to_string(),
                    first: first.name.to_string(),
                    second: field.name.to_string(),
                });
            }
            by_label.insert(field.label, pos);
        }

        Ok(FieldIndex { fields, by_label })
    }

    /// Index the fields of `T`
    pub fn of<T: TableRecord>() -> Result<Self> {
        Self::new(T::fields())
    }

    /// Shared index for `T`, built on first use
    ///
    /// Only successfully built indexes are cached; a type with duplicate
    /// labels fails on every call.
    pub fn cached<T: TableRecord + 'static>() -> Result<Arc<Self>> {
        static CACHE: OnceLock<RwLock<HashMap<TypeId, Arc<FieldIndex>>>> = OnceLock::new();
        let cache = CACHE.get_or_init(Default::default);
        let key = TypeId::of::<T>();

        if let Ok(map) = cache.read() {
            if let Some(index) = map.get(&key) {
                return Ok(Arc::clone(index));
            }
        }

        let index = Arc::new(Self::of::<T>()?);
        tracing::debug!(
            record = std::any::type_name::<T>(),
            fields = index.len(),
            "built field index"
        );

        match cache.write() {
            Ok(mut map) => Ok(Arc::clone(map.entry(key).or_insert(index))),
            // poisoned: serve the fresh index uncached
            Err(_) => Ok(index),
        }
    }

    /// Position of the field carrying `label`
    pub fn position(&self, label: &str) -> Option<usize> {
        self.by_label.get(label).copied()
    }

    /// Field carrying `label`
    pub fn by_label(&self, label: &str) -> Option<&FieldDef> {
        self.position(label).map(|pos| &self.fields[pos])
    }

    /// Label of the field named `name`
    pub fn label_of(&self, name: &str) -> Option<&'static str> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.label)
    }

    pub fn field(&self, pos: usize) -> Option<&FieldDef> {
        self.fields.get(pos)
    }

    pub fn fields(&self) -> &'static [FieldDef] {
        self.fields
    }

    /// Labels in declaration order
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.label)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
