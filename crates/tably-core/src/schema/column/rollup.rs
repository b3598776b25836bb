use super::ColumnTy;
use crate::schema::ColumnId;

/// A derived column aggregating values across a link.
///
/// A leaf for dependency purposes: once the relation's key column is
/// known, the aggregation itself is the executor's business.
#[derive(Debug, Clone)]
pub struct Rollup {
    /// The link column the aggregation spans.
    pub relation: ColumnId,

    /// The column on the related model being aggregated.
    pub target: ColumnId,

    pub function: RollupFunction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollupFunction {
    Count,
    Sum,
    Min,
    Max,
    Avg,
}

impl From<Rollup> for ColumnTy {
    fn from(value: Rollup) -> Self {
        Self::Rollup(value)
    }
}
