mod build;
pub use build::{BuildOptions, Projection, ProjectionBuilder};

mod context;
pub use context::{ContextResolver, RelationContext};

mod deps;
pub use deps::DependencyFields;
pub(crate) use deps::DependencyResolver;
