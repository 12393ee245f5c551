use std::net::IpAddr;
use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `outmention`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum OutmentionError {
    // ── Entity construction ─────────────────────────────────────────────
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),

    // ── Sending path ────────────────────────────────────────────────────
    #[error("send: {0}")]
    Send(#[from] SendError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Entity validation errors ────────────────────────────────────────────────

/// Invariant violation while constructing or updating a [`crate::Mention`].
///
/// Fatal to the single construction call; no partial entity results.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid id provided for mention: {0}")]
    InvalidId(String),

    #[error("invalid {field} URL: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("{field} must be a string")]
    NotAString { field: &'static str },

    #[error("invalid resource id: {0}")]
    InvalidResourceId(String),
}

// ─── Sending errors ──────────────────────────────────────────────────────────

/// Failure classification for one outbound notification.
#[derive(Debug, Error)]
pub enum SendError {
    /// The endpoint resolved to a disallowed address range. Raised before
    /// any request is issued; logged distinctly to surface blocked SSRF
    /// attempts.
    #[error("blocked send to non-permitted private IP {address} (host {host})")]
    Security { host: String, address: IpAddr },

    /// The endpoint answered with a non-2xx status.
    #[error("webmention sending failed with status {status}")]
    Protocol { status: reqwest::StatusCode },

    /// DNS, connect or timeout failure before a status was received.
    #[error("webmention network failure: {cause}")]
    Network { cause: String },

    #[error("endpoint URL has no host")]
    MissingHost,
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, OutmentionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn security_error_names_private_ip() {
        let err = SendError::Security {
            host: "localhost".into(),
            address: "127.0.0.1".parse().unwrap(),
        };
        assert!(err.to_string().contains("non-permitted private IP"));
        assert!(err.to_string().contains("localhost"));
    }

    #[test]
    fn protocol_error_carries_status() {
        let err = SendError::Protocol {
            status: reqwest::StatusCode::BAD_REQUEST,
        };
        assert!(err.to_string().contains("sending failed"));
        assert!(err.to_string().contains("400"));
    }

    #[test]
    fn validation_error_displays_field() {
        let err = ValidationError::NotAString {
            field: "sourceAuthor",
        };
        assert!(err.to_string().contains("sourceAuthor"));
    }

    #[test]
    fn anyhow_interop() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let err: OutmentionError = anyhow_err.into();
        assert!(err.to_string().contains("something went wrong"));
    }
}
