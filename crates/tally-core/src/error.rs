use thiserror::Error;

/// Failure classes surfaced by the remote API client and the collection stores.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CoreError {
    #[error("Network failure: {0}")]
    Network(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Authentication required: {0}")]
    Auth(String),
    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// Coarse classification used by callers that route on the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Validation,
    NotFound,
    Auth,
    Decode,
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Network(_) => ErrorKind::Network,
            CoreError::Validation(_) => ErrorKind::Validation,
            CoreError::NotFound(_) => ErrorKind::NotFound,
            CoreError::Auth(_) => ErrorKind::Auth,
            CoreError::Decode(_) => ErrorKind::Decode,
        }
    }

    /// Returns `true` when the consumer should drop back to an unauthenticated state.
    pub fn requires_login(&self) -> bool {
        self.kind() == ErrorKind::Auth
    }

    /// Maps an HTTP status and response body onto the failure taxonomy.
    ///
    /// Callers only pass non-success statuses.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = if body.trim().is_empty() {
            format!("status {status}")
        } else {
            body.trim().to_string()
        };
        match status {
            401 | 403 => CoreError::Auth(detail),
            404 => CoreError::NotFound(detail),
            400..=499 => CoreError::Validation(detail),
            _ => CoreError::Network(detail),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_follows_taxonomy() {
        assert_eq!(CoreError::from_status(401, "").kind(), ErrorKind::Auth);
        assert_eq!(CoreError::from_status(403, "").kind(), ErrorKind::Auth);
        assert_eq!(CoreError::from_status(404, "").kind(), ErrorKind::NotFound);
        assert_eq!(
            CoreError::from_status(409, "category in use"),
            CoreError::Validation("category in use".into())
        );
        assert_eq!(CoreError::from_status(503, "").kind(), ErrorKind::Network);
    }

    #[test]
    fn empty_body_falls_back_to_status_text() {
        assert_eq!(
            CoreError::from_status(500, "  "),
            CoreError::Network("status 500".into())
        );
    }

    #[test]
    fn only_auth_failures_require_login() {
        assert!(CoreError::Auth("expired".into()).requires_login());
        assert!(!CoreError::NotFound("x".into()).requires_login());
    }
}
