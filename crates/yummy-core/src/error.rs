// ── Core error types ──
//
// Errors surfaced by executors. Consumers never see reqwest errors or
// JSON parse failures directly; the `From<yummy_api::Error>` impl folds
// transport-layer failures into the executor taxonomy:
// NetworkFailure, ServerRejection, MissingCredential.

use thiserror::Error;

use crate::persist::StorageError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Executor taxonomy ────────────────────────────────────────────
    /// No HTTP response was received (connection refused, DNS, TLS).
    #[error("Network failure: {reason}")]
    NetworkFailure { reason: String },

    /// The server answered with a non-2xx status.
    #[error("Request rejected (HTTP {status}): {message}")]
    ServerRejection { status: u16, message: String },

    /// The operation needs a bearer token and none is stored.
    #[error("Not signed in: no auth token available")]
    MissingCredential,

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Local errors ─────────────────────────────────────────────────
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The bare message carried in `Rejected` actions and shown by slices.
    pub fn reason(&self) -> String {
        match self {
            Self::NetworkFailure { reason } => reason.clone(),
            Self::ServerRejection { message, .. } | Self::ValidationFailed { message } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }

    /// Returns `true` if the server refused the current credential.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::ServerRejection { status: 401, .. } | Self::MissingCredential)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ServerRejection { status: 404, .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<yummy_api::Error> for CoreError {
    fn from(err: yummy_api::Error) -> Self {
        match err {
            yummy_api::Error::Authentication { message } => {
                CoreError::ServerRejection { status: 401, message }
            }
            yummy_api::Error::Api { status, message } => {
                CoreError::ServerRejection { status, message }
            }
            yummy_api::Error::Transport(ref e) => match err.status() {
                Some(status) => CoreError::ServerRejection {
                    status,
                    message: e.to_string(),
                },
                None => CoreError::NetworkFailure {
                    reason: e.to_string(),
                },
            },
            yummy_api::Error::Tls(msg) => CoreError::NetworkFailure {
                reason: format!("TLS error: {msg}"),
            },
            yummy_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            yummy_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_rejection_keeps_status_and_message() {
        let err = CoreError::from(yummy_api::Error::Api {
            status: 409,
            message: "Email in use".into(),
        });
        assert!(matches!(err, CoreError::ServerRejection { status: 409, .. }));
        assert_eq!(err.reason(), "Email in use");
    }

    #[test]
    fn unauthorized_maps_to_401_rejection() {
        let err = CoreError::from(yummy_api::Error::Authentication {
            message: "Not authorized".into(),
        });
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Request rejected (HTTP 401): Not authorized");
    }

    #[test]
    fn missing_credential_reason_is_its_display() {
        assert_eq!(
            CoreError::MissingCredential.reason(),
            "Not signed in: no auth token available"
        );
    }
}
