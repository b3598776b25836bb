use super::{Column, ColumnId};
use std::fmt;

/// A logical table in the virtual schema.
///
/// Loaded from the schema catalog on demand and cached for the duration
/// of a request; never mutated by this core.
#[derive(Debug, Clone)]
pub struct Model {
    /// Uniquely identifies the model within the catalog
    pub id: ModelId,

    /// Name of the model
    pub name: String,

    /// Columns contained by the model. Order is irrelevant to
    /// correctness but fixes the deterministic output order.
    pub columns: Vec<Column>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ModelId(pub usize);

impl Model {
    pub fn column(&self, column: impl Into<ColumnId>) -> &Column {
        let column_id = column.into();
        assert_eq!(self.id, column_id.model);
        &self.columns[column_id.index]
    }

    pub fn column_by_title(&self, title: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.title == title)
    }

    /// Iterate over the columns composing the model's primary key. Root
    /// models carry one or more.
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|column| column.primary_key)
    }

    /// The model's display column, if one is designated. At most one
    /// column carries the flag.
    pub fn display_column(&self) -> Option<&Column> {
        self.columns.iter().find(|column| column.display_value)
    }
}

impl ModelId {
    /// Create a `ColumnId` representing the current model's column at
    /// index `index`.
    pub const fn column(self, index: usize) -> ColumnId {
        ColumnId { model: self, index }
    }
}

impl From<&Self> for ModelId {
    fn from(src: &Self) -> Self {
        *src
    }
}

impl From<&Model> for ModelId {
    fn from(value: &Model) -> Self {
        value.id
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ModelId({})", self.0)
    }
}
