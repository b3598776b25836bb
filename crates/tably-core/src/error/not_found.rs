/// Error when a referenced model, column, or view cannot be resolved
/// against the schema catalog.
#[derive(Debug)]
pub(super) struct NotFoundError {
    what: &'static str,
    detail: String,
}

impl NotFoundError {
    pub(super) fn new(what: &'static str, detail: String) -> Self {
        NotFoundError { what, detail }
    }
}

impl std::error::Error for NotFoundError {}

impl core::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{} not found: {}", self.what, self.detail)
    }
}
