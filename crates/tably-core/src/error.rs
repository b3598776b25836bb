mod adhoc;
mod circular_lookup;
mod invalid_fields;
mod not_found;
mod unknown_base;

use adhoc::AdhocError;
use circular_lookup::CircularLookupError;
use invalid_fields::InvalidFieldsError;
use not_found::NotFoundError;
use std::sync::Arc;
use unknown_base::UnknownBaseError;

use crate::schema::{BaseId, ColumnId, ModelId, ViewId};

/// Creates an adhoc [`Error`] from format arguments.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// Returns early with an adhoc [`Error`] built from format arguments.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// An error that can occur while resolving projections or dependencies.
///
/// Kept at one word in size; the payload lives behind an `Arc` so errors
/// are cheap to clone and thread through recursive walks.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    NotFound(NotFoundError),
    CircularLookup(CircularLookupError),
    InvalidFields(InvalidFieldsError),
    UnknownBase(UnknownBaseError),
}

impl Error {
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Self {
        Self::from(ErrorKind::Adhoc(AdhocError::from_args(args)))
    }

    pub fn model_not_found(id: ModelId) -> Self {
        Self::from(ErrorKind::NotFound(NotFoundError::new(
            "model",
            format!("{id:?}"),
        )))
    }

    pub fn column_not_found(id: ColumnId) -> Self {
        Self::from(ErrorKind::NotFound(NotFoundError::new(
            "column",
            format!("{id:?}"),
        )))
    }

    pub fn view_not_found(id: ViewId) -> Self {
        Self::from(ErrorKind::NotFound(NotFoundError::new(
            "view",
            format!("{id:?}"),
        )))
    }

    /// A lookup or formula chain revisited a column already on the
    /// resolution path.
    pub fn circular_lookup(title: impl Into<String>) -> Self {
        Self::from(ErrorKind::CircularLookup(CircularLookupError::new(
            title.into(),
        )))
    }

    /// A strict-mode field request named aliases absent from the model.
    pub fn invalid_fields(fields: Vec<String>) -> Self {
        Self::from(ErrorKind::InvalidFields(InvalidFieldsError::new(fields)))
    }

    /// A relation references a base the execution environment cannot open
    /// a connection for.
    pub fn unknown_base(base: &BaseId) -> Self {
        Self::from(ErrorKind::UnknownBase(UnknownBaseError::new(base.clone())))
    }

    /// Adds context to this error. Context is displayed first, followed by
    /// the root cause.
    pub fn context(self, msg: impl core::fmt::Display) -> Self {
        Error {
            inner: Arc::new(ErrorInner {
                kind: ErrorKind::Adhoc(AdhocError::new(msg.to_string())),
                cause: Some(self),
            }),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.root().kind(), ErrorKind::NotFound(_))
    }

    pub fn is_circular_lookup(&self) -> bool {
        matches!(self.root().kind(), ErrorKind::CircularLookup(_))
    }

    pub fn is_invalid_fields(&self) -> bool {
        matches!(self.root().kind(), ErrorKind::InvalidFields(_))
    }

    pub fn is_unknown_base(&self) -> bool {
        matches!(self.root().kind(), ErrorKind::UnknownBase(_))
    }

    fn root(&self) -> &Error {
        self.chain().last().unwrap()
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.cause.as_ref()?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            NotFound(err) => core::fmt::Display::fmt(err, f),
            CircularLookup(err) => core::fmt::Display::fmt(err, f),
            InvalidFields(err) => core::fmt::Display::fmt(err, f),
            UnknownBase(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Arc::new(ErrorInner { kind, cause: None }),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size() {
        // Ensure Error stays at one word (size of pointer/Arc)
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn error_from_args() {
        let err = Error::from_args(format_args!("test error: {}", 42));
        assert_eq!(err.to_string(), "test error: 42");
    }

    #[test]
    fn error_chain_display() {
        let err = Error::column_not_found(ModelId(3).column(7))
            .context("resolving lookup target")
            .context("building projection for `Orders`");
        assert_eq!(
            err.to_string(),
            "building projection for `Orders`: resolving lookup target: \
             column not found: ColumnId(3/7)"
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn circular_lookup_display() {
        let err = Error::circular_lookup("CustomerName");
        assert_eq!(
            err.to_string(),
            "circular lookup: column `CustomerName` references itself"
        );
        assert!(err.is_circular_lookup());
        assert!(!err.is_not_found());
    }

    #[test]
    fn invalid_fields_display() {
        let err = Error::invalid_fields(vec!["Totl".into(), "Namee".into()]);
        assert_eq!(err.to_string(), "invalid requested field(s): Totl, Namee");
        assert!(err.is_invalid_fields());
    }

    #[test]
    fn unknown_base_display() {
        let err = Error::unknown_base(&BaseId::new("b9"));
        assert_eq!(err.to_string(), "no connection available for base `b9`");
        assert!(err.is_unknown_base());
    }

    #[test]
    fn anyhow_bridge() {
        let anyhow_err = anyhow::anyhow!("something failed");
        let our_err: Error = anyhow_err.into();
        assert_eq!(our_err.to_string(), "something failed");
    }
}
