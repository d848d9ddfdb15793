//! Encrypted parameter store reads.

use crate::error::ServiceError;

/// Reads named parameters. With `decrypt` set, encrypted values come back as
/// plaintext; without it the provider returns them as stored.
pub trait ParameterStore: Send + Sync {
    /// Fails with `NotFound` when no parameter has that name.
    fn get(&self, name: &str, decrypt: bool) -> Result<String, ServiceError>;
}

pub fn get_parameter(
    store: &dyn ParameterStore,
    name: &str,
    decrypt: bool,
) -> Result<String, ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::InvalidInput("empty parameter name".to_string()));
    }
    tracing::debug!(name, decrypt, "reading parameter");
    store.get(name, decrypt)
}
