use thiserror::Error;

/// Workspace-level error. Protocol failures are booleans and absences are
/// `Option::None`; only configuration and infrastructure faults surface
/// here. Each downstream crate folds its own error enum into one of these
/// variants.
#[derive(Debug, Error)]
pub enum AttestaError {
    #[error("credential error: {0}")]
    Credential(String),

    #[error("vault error: {0}")]
    Vault(String),

    #[error("storage error: {0}")]
    Storage(String),
}

pub type AttestaResult<T> = Result<T, AttestaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_context() {
        let e = AttestaError::Storage("lock poisoned".into());
        assert_eq!(e.to_string(), "storage error: lock poisoned");
    }
}
