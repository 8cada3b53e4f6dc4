//! Revocation lookup, the last gate of the pipeline.
//!
//! The answer is never cached: a token revoked a second ago must be refused
//! now. Backend failures are fail-closed.
use async_trait::async_trait;

use crate::repos::error::RepoError;
use crate::services::auth::error::AuthError;
use crate::services::cache::CacheError;

pub mod valkey;

pub use valkey::ValkeyAccessTokenRepo;

#[derive(Debug, thiserror::Error)]
pub enum RevocationLookupError {
    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Source of truth for revoked access tokens, keyed by `jti`.
///
/// Implementations must tolerate concurrent calls; the authenticator adds no
/// locking of its own.
#[async_trait]
pub trait AccessTokenRepository: Send + Sync {
    async fn is_access_token_revoked(&self, token_id: &str)
    -> Result<bool, RevocationLookupError>;
}

pub async fn check(repo: &dyn AccessTokenRepository, jti: &str) -> Result<(), AuthError> {
    match repo.is_access_token_revoked(jti).await {
        Ok(false) => Ok(()),
        Ok(true) => Err(AuthError::Revoked {
            jti: jti.to_string(),
        }),
        Err(e) => Err(AuthError::RevocationCheckFailed(Box::new(e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<bool, ()>);

    #[async_trait]
    impl AccessTokenRepository for Fixed {
        async fn is_access_token_revoked(
            &self,
            _token_id: &str,
        ) -> Result<bool, RevocationLookupError> {
            self.0.map_err(|_| {
                CacheError::BackendConnection("connection refused".to_string()).into()
            })
        }
    }

    #[tokio::test]
    async fn not_revoked_passes() {
        assert!(check(&Fixed(Ok(false)), "jti-1").await.is_ok());
    }

    #[tokio::test]
    async fn revoked_is_rejected_with_the_jti() {
        let err = check(&Fixed(Ok(true)), "jti-1").await.unwrap_err();
        assert!(matches!(err, AuthError::Revoked { jti } if jti == "jti-1"));
    }

    #[tokio::test]
    async fn lookup_failure_fails_closed() {
        let err = check(&Fixed(Err(())), "jti-1").await.unwrap_err();

        assert!(matches!(err, AuthError::RevocationCheckFailed(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
