use super::{ColumnId, ModelId};
use std::fmt;

/// A per-model visibility mask, supplied read-only per request.
///
/// Views control which columns a response includes by default; they never
/// alter the underlying model, and hidden columns can still contribute
/// dependency fields when a visible derived column needs them.
#[derive(Debug, Clone)]
pub struct View {
    pub id: ViewId,

    /// The model this view belongs to.
    pub model: ModelId,

    /// Per-column show flags. A column absent from the list is hidden.
    pub columns: Vec<ViewColumn>,

    /// When set, system columns pass the visibility mask.
    pub show_system_fields: bool,

    /// Cover-image column for gallery/kanban style views; always allowed
    /// through the mask when set.
    pub cover_image: Option<ColumnId>,
}

#[derive(Debug, Clone)]
pub struct ViewColumn {
    pub column: ColumnId,
    pub show: bool,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ViewId(pub usize);

impl View {
    /// Whether the mask lets the column through. The cover-image column
    /// is always allowed.
    pub fn allows(&self, column: impl Into<ColumnId>) -> bool {
        let column_id = column.into();
        if self.cover_image == Some(column_id) {
            return true;
        }
        self.columns
            .iter()
            .any(|vc| vc.column == column_id && vc.show)
    }
}

impl From<&View> for ViewId {
    fn from(value: &View) -> Self {
        value.id
    }
}

impl fmt::Debug for ViewId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ViewId({})", self.0)
    }
}
