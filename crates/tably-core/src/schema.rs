mod base;
pub use base::BaseId;

pub mod column;
pub use column::{
    BinaryOp, Column, ColumnId, ColumnTy, Formula, FormulaExpr, Junction, Link, Literal, Lookup,
    Plain, RelationKind, Rollup, RollupFunction, Stamp,
};

mod model;
pub use model::{Model, ModelId};

mod view;
pub use view::{View, ViewColumn, ViewId};
