use async_trait::async_trait;
use sqlx::PgPool;

use crate::repos::error::{RepoError, RepoResult};
use crate::services::auth::revocation::{AccessTokenRepository, RevocationLookupError};

/// Access tokens persisted by the authorization server at issuance.
///
/// The schema is assumed to have at least these columns:
///   - oauth_access_tokens.identifier (text, the `jti`)
///   - oauth_access_tokens.revoked (boolean)
///
/// A `jti` with no row was never issued by us (or was purged after expiry),
/// so it is reported as revoked.
#[derive(Clone, Debug)]
pub struct PgAccessTokenRepo {
    pool: PgPool,
}

impl PgAccessTokenRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// `None` when the identifier is unknown.
    pub async fn find_revoked_flag(&self, identifier: &str) -> RepoResult<Option<bool>> {
        let revoked = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT revoked
            FROM oauth_access_tokens
            WHERE identifier = $1
            LIMIT 1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from)?;

        Ok(revoked)
    }
}

#[async_trait]
impl AccessTokenRepository for PgAccessTokenRepo {
    async fn is_access_token_revoked(
        &self,
        token_id: &str,
    ) -> Result<bool, RevocationLookupError> {
        Ok(self.find_revoked_flag(token_id).await?.unwrap_or(true))
    }
}
