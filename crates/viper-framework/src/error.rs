//! # Framework Errors
//!
//! This module defines the error type a fetch can produce. By centralizing
//! the definition, every interactor reports failures in the same two
//! classes and every presenter can turn them into a displayable message
//! without knowing which transport or codec sat underneath.

use std::fmt::Display;

/// Errors a fetch operation can report.
///
/// # Design Note: Two Classes, Not Two Dozen
/// Callers of a fetch only ever branch on "did the request fail to travel"
/// versus "did the payload fail to parse". The underlying causes (DNS,
/// TLS, a 500 status, a stray JSON object) are preserved as text for
/// diagnostics, not as variants, so the presenter stays decoupled from the
/// HTTP and serde stacks entirely.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a usable payload: connection failures,
    /// error statuses, empty bodies.
    #[error("Transport failure: {0}")]
    Transport(String),
    /// A payload arrived but did not decode into the expected entity list.
    #[error("Decode failure: {0}")]
    Decode(String),
}

impl FetchError {
    /// Wraps any displayable cause as a transport-class failure.
    pub fn transport(cause: impl Display) -> Self {
        Self::Transport(cause.to_string())
    }

    /// Wraps any displayable cause as a decode-class failure.
    pub fn decode(cause: impl Display) -> Self {
        Self::Decode(cause.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes_are_distinguishable() {
        let transport = FetchError::transport("connection refused");
        let decode = FetchError::decode("expected a list");

        assert!(transport.to_string().contains("Transport"));
        assert!(decode.to_string().contains("Decode"));
        assert_ne!(transport.to_string(), decode.to_string());
    }

    #[test]
    fn test_cause_is_preserved() {
        let err = FetchError::transport("status 500");
        assert_eq!(err.to_string(), "Transport failure: status 500");
    }
}
