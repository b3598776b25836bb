use super::ColumnTy;
use crate::schema::{BaseId, ColumnId, ModelId};

/// A relation to another model.
#[derive(Debug, Clone)]
pub struct Link {
    pub kind: RelationKind,

    /// The related model.
    pub target: ModelId,

    /// The column holding the foreign key, on whichever model is the
    /// child side of the relation.
    pub child_column: ColumnId,

    /// The key column the foreign key points at, on the parent side.
    pub parent_column: ColumnId,

    /// For one-to-one relations: true when the owning model stores the
    /// foreign key itself. Explicit rather than inferred from auxiliary
    /// metadata, so a relation's child/parent sides are never ambiguous.
    pub owns_foreign_key: bool,

    /// Set when the related model lives in a different base than the
    /// owning column's model.
    pub target_base: Option<BaseId>,

    /// Junction table wiring; many-to-many only.
    pub junction: Option<Junction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    HasMany,
    BelongsTo,
    ManyToMany,
    OneToOne,
}

/// The junction model of a many-to-many relation, with the two columns
/// pointing back at each side.
#[derive(Debug, Clone)]
pub struct Junction {
    pub model: ModelId,
    pub child_column: ColumnId,
    pub parent_column: ColumnId,

    /// Set when the junction table lives in a different base than the
    /// owning column's model.
    pub base: Option<BaseId>,
}

impl Link {
    /// True when the foreign key is stored on the owning column's side of
    /// the relation.
    ///
    /// Has-many's join key lives on the other side; belongs-to and
    /// many-to-many store it locally; one-to-one depends on which side
    /// was declared the owner.
    pub fn is_foreign_key_local(&self) -> bool {
        match self.kind {
            RelationKind::HasMany => false,
            RelationKind::BelongsTo | RelationKind::ManyToMany => true,
            RelationKind::OneToOne => self.owns_foreign_key,
        }
    }

    /// The locally stored column whose value keys the relation: the
    /// foreign key when it is local, otherwise the key column the remote
    /// foreign key points at.
    pub fn key_column(&self) -> ColumnId {
        if self.is_foreign_key_local() {
            self.child_column
        } else {
            self.parent_column
        }
    }
}

impl From<Link> for ColumnTy {
    fn from(value: Link) -> Self {
        Self::Link(value)
    }
}
