//! Splits a compact JWS into its parts without trusting any of them.
use base64::{
    Engine,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::AuthError;

// Issuers emit unpadded base64url, but padded segments are harmless.
const BASE64URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// JOSE header. `alg` stays a plain string so that unknown or hostile values
/// (`none`, `HS256`) reach the verifier and are rejected there.
#[derive(Debug, Clone, Deserialize)]
pub struct JoseHeader {
    pub alg: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ParsedToken {
    pub header: JoseHeader,
    pub claims: Map<String, Value>,
    pub signature: Vec<u8>,
    signing_input: String,
}

impl ParsedToken {
    /// `<header>.<payload>` as received, the bytes the signature covers.
    pub fn signing_input(&self) -> &str {
        &self.signing_input
    }
}

pub fn parse(token: &str) -> Result<ParsedToken, AuthError> {
    let mut segments = token.split('.');
    let (Some(header), Some(payload), Some(signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(AuthError::malformed(
            "The JWT string must have three parts separated by dots",
        ));
    };

    if header.is_empty() || payload.is_empty() {
        return Err(AuthError::malformed("The JWT header and payload must not be empty"));
    }

    let signing_input = format!("{header}.{payload}");
    let header_bytes = decode_segment("header", header)?;
    let payload_bytes = decode_segment("payload", payload)?;
    let signature = decode_segment("signature", signature)?;

    let header: JoseHeader =
        serde_json::from_slice(&header_bytes).map_err(AuthError::DecodingError)?;
    let claims: Map<String, Value> =
        serde_json::from_slice(&payload_bytes).map_err(AuthError::DecodingError)?;

    Ok(ParsedToken {
        header,
        claims,
        signature,
        signing_input,
    })
}

fn decode_segment(name: &str, segment: &str) -> Result<Vec<u8>, AuthError> {
    BASE64URL
        .decode(segment)
        .map_err(|e| AuthError::malformed_with(format!("The JWT {name} is not valid base64url"), e))
}
