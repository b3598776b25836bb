use crate::schema::BaseId;

/// Error when a relation declares a related or junction base that the
/// local execution environment has no connection for.
///
/// This is a configuration problem, not a transient condition; callers
/// must not retry.
#[derive(Debug)]
pub(super) struct UnknownBaseError {
    base: BaseId,
}

impl UnknownBaseError {
    pub(super) fn new(base: BaseId) -> Self {
        UnknownBaseError { base }
    }
}

impl std::error::Error for UnknownBaseError {}

impl core::fmt::Display for UnknownBaseError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "no connection available for base `{}`", self.base)
    }
}
