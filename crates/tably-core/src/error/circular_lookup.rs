/// Error when a lookup or formula chain revisits a column that is already
/// being expanded on the current resolution path.
///
/// Truncating the chain instead of failing would silently under-fetch
/// data, so this is always a hard error.
#[derive(Debug)]
pub(super) struct CircularLookupError {
    title: String,
}

impl CircularLookupError {
    pub(super) fn new(title: String) -> Self {
        CircularLookupError { title }
    }
}

impl std::error::Error for CircularLookupError {}

impl core::fmt::Display for CircularLookupError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "circular lookup: column `{}` references itself",
            self.title
        )
    }
}
