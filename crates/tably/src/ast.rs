use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// The projection tree for one model: column title to inclusion marker,
/// in model column order.
pub type Ast = IndexMap<String, AstValue>;

/// What the response renders for a column.
///
/// Serializes to the wire shape `1 | false | { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub enum AstValue {
    /// Render the raw or computed value.
    Include,
    /// The column is not part of the response. Its dependencies may still
    /// have been fetched on behalf of other columns.
    Exclude,
    /// A nested projection for a traversed link (or sub-field access on a
    /// structured column).
    Nested(Ast),
}

impl AstValue {
    pub fn is_included(&self) -> bool {
        !matches!(self, AstValue::Exclude)
    }

    pub fn as_nested(&self) -> Option<&Ast> {
        match self {
            AstValue::Nested(ast) => Some(ast),
            _ => None,
        }
    }
}

impl Serialize for AstValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            AstValue::Include => serializer.serialize_u64(1),
            AstValue::Exclude => serializer.serialize_bool(false),
            AstValue::Nested(ast) => ast.serialize(serializer),
        }
    }
}
