use super::ColumnTy;
use crate::schema::ColumnId;

/// A derived column surfacing a target column's value through a link.
///
/// The target may itself be derived; chains are resolved transitively and
/// must be acyclic.
#[derive(Debug, Clone)]
pub struct Lookup {
    /// The link column the value is pulled through. Must name a
    /// [`Link`](super::Link) column on the same model.
    pub relation: ColumnId,

    /// The column on the related model whose value is surfaced.
    pub target: ColumnId,
}

impl From<Lookup> for ColumnTy {
    fn from(value: Lookup) -> Self {
        Self::Lookup(value)
    }
}
