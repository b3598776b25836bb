/// Free-form error built from format arguments via the `err!`/`bail!`
/// macros.
#[derive(Debug)]
pub(super) struct AdhocError {
    message: Box<str>,
}

impl AdhocError {
    pub(super) fn new(message: String) -> Self {
        AdhocError {
            message: message.into_boxed_str(),
        }
    }

    pub(super) fn from_args(args: core::fmt::Arguments<'_>) -> Self {
        Self::new(args.to_string())
    }
}

impl std::error::Error for AdhocError {}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}
