use crate::storage::StorageError;
use thiserror::Error;

/// Failures surfaced by the directory and the auth flows.
///
/// The display text of the user-facing variants is the localized message shown
/// in the page notice, so callers can render `err.to_string()` directly.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed input; fixed by resubmitting.
    #[error("{0}")]
    Validation(String),
    /// The email/username is already registered.
    #[error("El email/usuario ya está registrado.")]
    Duplicate(String),
    /// Credentials did not match any record.
    #[error("{0}")]
    Auth(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl Error {
    /// True for failures the user can fix by editing the form and retrying.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Duplicate(_) | Self::Auth(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_renders_localized_message() {
        let err = Error::Duplicate("ana@x.com".to_string());
        assert_eq!(err.to_string(), "El email/usuario ya está registrado.");
        assert!(err.is_recoverable());
    }

    #[test]
    fn storage_errors_are_not_user_recoverable() {
        let err = Error::from(StorageError::Unavailable("disk".to_string()));
        assert!(!err.is_recoverable());
    }
}
