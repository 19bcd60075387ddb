//! Header row resolution

use indexmap::IndexMap;

use crate::field::{FieldDef, FieldIndex};

/// Column index -> field position, resolved from one header row
///
/// Scoped to a single decode call. Columns whose header matches no label are
/// simply absent, so grids may carry extra descriptive columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    columns: IndexMap<usize, usize>,
}

impl ColumnMapping {
    /// Match each header cell against the field labels
    ///
    /// Matching is exact. When several columns carry the same label the
    /// first one is bound and the rest are ignored.
    pub fn resolve<I, S>(header: I, index: &FieldIndex) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut columns: IndexMap<usize, usize> = IndexMap::new();
        let mut bound = vec![false; index.len()];

        for (col, text) in header.into_iter().enumerate() {
            let text = text.as_ref();
            match index.position(text) {
                Some(pos) if bound[pos] => {
                    tracing::warn!(
                        column = col + 1,
                        label = text,
                        "label repeated in header, column ignored"
                    );
                }
                Some(pos) => {
                    bound[pos] = true;
                    columns.insert(col, pos);
                }
                None => {
                    tracing::debug!(
                        column = col + 1,
                        header = text,
                        "no field for header column"
                    );
                }
            }
        }

        let mapping = ColumnMapping { columns };
        for field in mapping.unmapped_fields(index) {
            tracing::debug!(field = field.name, label = field.label, "field has no column");
        }
        mapping
    }

    /// Field position bound to `col`
    pub fn field_at(&self, col: usize) -> Option<usize> {
        self.columns.get(&col).copied()
    }

    /// Column bound to the field at `pos`
    pub fn column_of(&self, pos: usize) -> Option<usize> {
        self.columns
            .iter()
            .find_map(|(&col, &field)| (field == pos).then_some(col))
    }

    /// (column, field position) pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.columns.iter().map(|(&col, &pos)| (col, pos))
    }

    /// Fields that no header column refers to
    pub fn unmapped_fields<'a>(
        &'a self,
        index: &'a FieldIndex,
    ) -> impl Iterator<Item = &'a FieldDef> {
        index
            .fields()
            .iter()
            .enumerate()
            .filter(move |(pos, _)| self.column_of(*pos).is_none())
            .map(|(_, field)| field)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
