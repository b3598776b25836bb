mod ast;
pub use ast::{Ast, AstValue};

mod engine;
pub use engine::{
    BuildOptions, ContextResolver, DependencyFields, Projection, ProjectionBuilder,
    RelationContext,
};

mod query;
pub use query::{FieldSelection, Query};

pub use tably_core::catalog::{CachedCatalog, StaticCatalog};
pub use tably_core::{catalog, schema, Catalog, Error, Result};
