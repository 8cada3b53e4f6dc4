//! RS256 signature verification.
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::Algorithm;

use super::{error::AuthError, keys::RsaPublicKey, parser::ParsedToken};

pub const EXPECTED_ALG: &str = "RS256";

/// Checks the signature over the token's signing input. The header is the one
/// already decoded by the parser; it is not parsed again here, so a header the
/// parser accepted can only fail on its signature.
pub fn verify(token: &ParsedToken, key: &RsaPublicKey) -> Result<(), AuthError> {
    // Anything but RS256 is refused before touching the key, so an HS256
    // token can never be checked against the public key as an HMAC secret.
    match token.header.alg.as_deref() {
        Some(EXPECTED_ALG) => {}
        other => {
            return Err(AuthError::UnsignedToken {
                alg: other.map(str::to_string),
            });
        }
    }

    if token.signature.is_empty() {
        return Err(AuthError::UnsignedToken {
            alg: token.header.alg.clone(),
        });
    }

    let signature = URL_SAFE_NO_PAD.encode(&token.signature);
    match jsonwebtoken::crypto::verify(
        &signature,
        token.signing_input().as_bytes(),
        key.decoding_key(),
        Algorithm::RS256,
    ) {
        Ok(true) => Ok(()),
        Ok(false) => Err(AuthError::SignatureInvalid(None)),
        Err(e) => Err(AuthError::SignatureInvalid(Some(e))),
    }
}
