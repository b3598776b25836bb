mod error;
pub use error::Error;

pub mod catalog;
pub use catalog::Catalog;

pub mod schema;

/// A Result type alias that uses Tably's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
