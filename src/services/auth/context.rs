//! The identity attached to a request once every check has passed.
use axum::http::Request;
use serde::Serialize;

use super::claims::VerifiedClaims;

/// Serialized with the `oauth_*` attribute names downstream code expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedContext {
    #[serde(rename = "oauth_access_token_id")]
    pub access_token_id: String,
    #[serde(rename = "oauth_client_id")]
    pub client_id: String,
    #[serde(rename = "oauth_user_id")]
    pub user_id: String,
    #[serde(rename = "oauth_scopes")]
    pub scopes: Vec<String>,
}

impl From<VerifiedClaims> for AuthenticatedContext {
    fn from(claims: VerifiedClaims) -> Self {
        Self {
            access_token_id: claims.jti,
            client_id: claims.aud,
            user_id: claims.sub,
            scopes: claims.scopes,
        }
    }
}

/// Stores the context in the request extensions, where `AuthCtxExtractor`
/// picks it up.
pub fn annotate<B>(mut req: Request<B>, ctx: AuthenticatedContext) -> Request<B> {
    req.extensions_mut().insert(ctx);
    req
}
