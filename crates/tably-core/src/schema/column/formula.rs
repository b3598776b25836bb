use super::ColumnTy;
use crate::schema::ColumnId;

/// A derived column computed from an expression over sibling columns.
#[derive(Debug, Clone)]
pub struct Formula {
    pub expr: FormulaExpr,
}

/// The parsed expression tree of a formula column.
///
/// Only the shape matters to this core: dependency extraction walks the
/// tree and resolves every referenced column. Evaluation is the
/// executor's business.
#[derive(Debug, Clone)]
pub enum FormulaExpr {
    /// Reference to a sibling column, which may itself be derived.
    Column(ColumnId),
    Call {
        function: String,
        args: Vec<FormulaExpr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<FormulaExpr>,
        rhs: Box<FormulaExpr>,
    },
    Literal(Literal),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Concat,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl FormulaExpr {
    /// Collects every column referenced by the expression, in evaluation
    /// order. Duplicates are kept; the dependency set deduplicates.
    pub fn referenced_columns(&self, out: &mut Vec<ColumnId>) {
        match self {
            FormulaExpr::Column(id) => out.push(*id),
            FormulaExpr::Call { args, .. } => {
                for arg in args {
                    arg.referenced_columns(out);
                }
            }
            FormulaExpr::Binary { lhs, rhs, .. } => {
                lhs.referenced_columns(out);
                rhs.referenced_columns(out);
            }
            FormulaExpr::Literal(_) => {}
        }
    }
}

impl From<Formula> for ColumnTy {
    fn from(value: Formula) -> Self {
        Self::Formula(value)
    }
}
