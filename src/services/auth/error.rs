//! Rejection reasons produced by the access-token pipeline.
//!
//! Every variant is terminal for the current request. The HTTP layer collapses
//! all of them into a single "access denied" response; the variant only
//! decides the human-readable hint and the log `code`.
use std::error::Error as StdError;

use thiserror::Error;

pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing \"Authorization\" header or \"colllect_oauth2\" cookie")]
    MissingCredential,

    #[error("{reason}")]
    MalformedToken {
        reason: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Error while decoding to JSON")]
    DecodingError(#[source] serde_json::Error),

    #[error("Access token is not signed")]
    UnsignedToken { alg: Option<String> },

    #[error("Access token could not be verified")]
    SignatureInvalid(#[source] Option<jsonwebtoken::errors::Error>),

    #[error("Access token is invalid")]
    Expired { exp: i64, now: i64 },

    #[error("Access token is invalid")]
    NotYetValid { claim: &'static str },

    #[error("Access token has been revoked")]
    Revoked { jti: String },

    #[error("Access token revocation status could not be checked")]
    RevocationCheckFailed(#[source] BoxError),
}

impl AuthError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedToken {
            reason: reason.into(),
            source: None,
        }
    }

    pub fn malformed_with(reason: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::MalformedToken {
            reason: reason.into(),
            source: Some(source.into()),
        }
    }

    /// Stable machine-readable identifier, used as a log field.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::MalformedToken { .. } => "malformed_token",
            Self::DecodingError(_) => "decoding_error",
            Self::UnsignedToken { .. } => "unsigned_token",
            Self::SignatureInvalid(_) => "signature_invalid",
            Self::Expired { .. } => "expired",
            Self::NotYetValid { .. } => "not_yet_valid",
            Self::Revoked { .. } => "revoked",
            Self::RevocationCheckFailed(_) => "revocation_check_failed",
        }
    }

    /// `true` when the token could not be parsed at all, as opposed to parsed
    /// but not verified.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::MalformedToken { .. } | Self::DecodingError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_names_both_sources() {
        let msg = AuthError::MissingCredential.to_string();
        assert!(msg.contains("\"Authorization\" header"));
        assert!(msg.contains("\"colllect_oauth2\" cookie"));
    }

    #[test]
    fn parse_failures_are_distinguished_from_verification_failures() {
        let decoding = serde_json::from_str::<serde_json::Value>("{").unwrap_err();

        assert!(AuthError::malformed("bad").is_parse_failure());
        assert!(AuthError::DecodingError(decoding).is_parse_failure());
        assert!(!AuthError::SignatureInvalid(None).is_parse_failure());
        assert!(!AuthError::UnsignedToken { alg: None }.is_parse_failure());
    }

    #[test]
    fn malformed_with_keeps_the_cause() {
        let cause = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        let err = AuthError::malformed_with("token segment is not JSON", cause);

        assert_eq!(err.to_string(), "token segment is not JSON");
        assert!(err.source().is_some());
    }
}
