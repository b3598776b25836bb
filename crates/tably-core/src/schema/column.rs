mod formula;
pub use formula::{BinaryOp, Formula, FormulaExpr, Literal};

mod link;
pub use link::{Junction, Link, RelationKind};

mod lookup;
pub use lookup::Lookup;

mod rollup;
pub use rollup::{Rollup, RollupFunction};

use super::ModelId;
use std::fmt;

/// A column of a [`Model`](super::Model).
///
/// Polymorphic over a closed variant set; every consumer matches
/// exhaustively so the dependency rules stay compiler-checked.
#[derive(Debug, Clone)]
pub struct Column {
    /// Uniquely identifies the column within the containing model.
    pub id: ColumnId,

    /// The column title, used as the alias in requests, projection ASTs,
    /// and dependency field sets.
    pub title: String,

    /// Plain, link, lookup, rollup, or formula.
    pub ty: ColumnTy,

    /// True if the column is maintained by the system rather than the
    /// user (ids, stamps, internal link bookkeeping).
    pub system: bool,

    /// True if the column is part of the primary key.
    pub primary_key: bool,

    /// True if the column is the model's display value.
    pub display_value: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct ColumnId {
    pub model: ModelId,
    pub index: usize,
}

#[derive(Clone)]
pub enum ColumnTy {
    Plain(Plain),
    Link(Link),
    Lookup(Lookup),
    Rollup(Rollup),
    Formula(Formula),
}

/// A physically stored field; no dependencies beyond itself.
#[derive(Debug, Clone, Default)]
pub struct Plain {
    /// Set when the column is a system-maintained row timestamp.
    pub stamp: Option<Stamp>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stamp {
    CreatedAt,
    UpdatedAt,
}

impl Column {
    /// True for system-maintained created/updated timestamps, which stay
    /// visible even when other system columns are masked.
    pub fn is_stamp(&self) -> bool {
        matches!(&self.ty, ColumnTy::Plain(plain) if plain.stamp.is_some())
    }

    pub fn is_link(&self) -> bool {
        self.ty.is_link()
    }
}

impl ColumnTy {
    pub fn is_plain(&self) -> bool {
        matches!(self, Self::Plain(..))
    }

    pub fn is_link(&self) -> bool {
        matches!(self, Self::Link(..))
    }

    pub fn as_link(&self) -> Option<&Link> {
        match self {
            Self::Link(link) => Some(link),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_link(&self) -> &Link {
        match self {
            Self::Link(link) => link,
            _ => panic!("expected column to be `Link`, but was {self:?}"),
        }
    }

    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup(..))
    }

    pub fn as_lookup(&self) -> Option<&Lookup> {
        match self {
            Self::Lookup(lookup) => Some(lookup),
            _ => None,
        }
    }

    pub fn is_rollup(&self) -> bool {
        matches!(self, Self::Rollup(..))
    }

    pub fn is_formula(&self) -> bool {
        matches!(self, Self::Formula(..))
    }

    pub fn as_formula(&self) -> Option<&Formula> {
        match self {
            Self::Formula(formula) => Some(formula),
            _ => None,
        }
    }
}

impl fmt::Debug for ColumnTy {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(ty) => ty.fmt(fmt),
            Self::Link(ty) => ty.fmt(fmt),
            Self::Lookup(ty) => ty.fmt(fmt),
            Self::Rollup(ty) => ty.fmt(fmt),
            Self::Formula(ty) => ty.fmt(fmt),
        }
    }
}

impl From<&Self> for ColumnId {
    fn from(val: &Self) -> Self {
        *val
    }
}

impl From<&Column> for ColumnId {
    fn from(val: &Column) -> Self {
        val.id
    }
}

impl fmt::Debug for ColumnId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ColumnId({}/{})", self.model.0, self.index)
    }
}
