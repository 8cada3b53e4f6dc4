use std::{fmt, sync::Arc};

use axum::http::{HeaderMap, Request};

use super::{
    claims,
    context::{self, AuthenticatedContext},
    error::AuthError,
    keys::PublicKeySource,
    locator, parser,
    revocation::{self, AccessTokenRepository},
    verifier,
};

/// Cookie-or-bearer access-token authenticator.
///
/// Each call runs the whole pipeline once:
/// locate → parse → verify signature → validate claims → revocation → annotate.
/// The first failing stage decides the rejection; nothing is attached to the
/// request unless every stage passed.
#[derive(Clone)]
pub struct Authenticator {
    keys: Arc<dyn PublicKeySource>,
    access_tokens: Arc<dyn AccessTokenRepository>,
    leeway_seconds: u64,
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator")
            .field("leeway_seconds", &self.leeway_seconds)
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    pub fn new(
        keys: Arc<dyn PublicKeySource>,
        access_tokens: Arc<dyn AccessTokenRepository>,
    ) -> Self {
        Self {
            keys,
            access_tokens,
            leeway_seconds: 0,
        }
    }

    /// Clock-skew tolerance for `exp`/`nbf`/`iat`. Defaults to none.
    pub fn with_leeway(mut self, leeway_seconds: u64) -> Self {
        self.leeway_seconds = leeway_seconds;
        self
    }

    pub fn leeway_seconds(&self) -> u64 {
        self.leeway_seconds
    }

    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<AuthenticatedContext, AuthError> {
        self.authenticate_at(headers, chrono::Utc::now().timestamp())
            .await
    }

    /// Same as [`authenticate`](Self::authenticate) with an explicit clock
    /// reading (unix seconds), used for every time comparison.
    pub async fn authenticate_at(
        &self,
        headers: &HeaderMap,
        now: i64,
    ) -> Result<AuthenticatedContext, AuthError> {
        let raw = locator::locate(headers)?;
        let token = parser::parse(&raw.token)?;

        verifier::verify(&token, self.keys.public_key())?;

        let claims = claims::validate(&token.claims, now, self.leeway_seconds)?;

        revocation::check(self.access_tokens.as_ref(), &claims.jti).await?;

        Ok(AuthenticatedContext::from(claims))
    }

    /// Returns the request carrying an [`AuthenticatedContext`] extension,
    /// or the reason it was refused.
    pub async fn validate_authorization<B>(&self, req: Request<B>) -> Result<Request<B>, AuthError> {
        let (parts, body) = req.into_parts();
        let ctx = self.authenticate(&parts.headers).await?;

        Ok(context::annotate(Request::from_parts(parts, body), ctx))
    }
}
