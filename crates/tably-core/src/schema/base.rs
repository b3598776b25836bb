use std::fmt;

/// Identifies the physical base (tenant / database connection) a model's
/// rows live in.
///
/// Relations may span two bases; the engine never assumes a single
/// physical connection and threads the ambient base through every entry
/// point instead.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BaseId(String);

impl BaseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BaseId {
    fn from(src: &str) -> Self {
        Self::new(src)
    }
}

impl From<&Self> for BaseId {
    fn from(src: &Self) -> Self {
        src.clone()
    }
}

impl fmt::Display for BaseId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(&self.0)
    }
}

impl fmt::Debug for BaseId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "BaseId({})", self.0)
    }
}
