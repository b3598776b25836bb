/// Error when a strict-mode field request names column aliases that do
/// not exist on the model.
#[derive(Debug)]
pub(super) struct InvalidFieldsError {
    fields: Vec<String>,
}

impl InvalidFieldsError {
    pub(super) fn new(fields: Vec<String>) -> Self {
        InvalidFieldsError { fields }
    }
}

impl std::error::Error for InvalidFieldsError {}

impl core::fmt::Display for InvalidFieldsError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid requested field(s): {}",
            self.fields.join(", ")
        )
    }
}
