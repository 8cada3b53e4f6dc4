use std::sync::Arc;

use async_trait::async_trait;

use crate::services::{
    auth::revocation::{AccessTokenRepository, RevocationLookupError},
    cache::{CacheClient, CacheError, ValkeyClient},
};

/// Valkey-backed revocation denylist (Redis protocol).
///
/// The issuer writes `<prefix>:<jti>` when it revokes a token, with a TTL no
/// shorter than the token lifetime. Key presence means revoked.
#[derive(Clone)]
pub struct ValkeyAccessTokenRepo<C: CacheClient> {
    cache: Arc<C>,
    // Optional key prefix to avoid collisions across environments
    prefix: String,
}

impl ValkeyAccessTokenRepo<ValkeyClient> {
    pub async fn new_with_prefix(
        redis_url: &str,
        prefix: impl Into<String>,
    ) -> Result<Self, CacheError> {
        let client = ValkeyClient::new(redis_url).await?;

        Ok(Self {
            cache: Arc::new(client),
            prefix: prefix.into(),
        })
    }
}

impl<C: CacheClient> ValkeyAccessTokenRepo<C> {
    pub fn new_with_cache(cache: Arc<C>, prefix: impl Into<String>) -> Self {
        Self {
            cache,
            prefix: prefix.into(),
        }
    }

    pub fn key(&self, jti: &str) -> String {
        format!("{}:{}", self.prefix, jti)
    }

    pub fn backend_name(&self) -> &'static str {
        self.cache.backend_name()
    }
}

#[async_trait]
impl<C: CacheClient> AccessTokenRepository for ValkeyAccessTokenRepo<C> {
    async fn is_access_token_revoked(
        &self,
        token_id: &str,
    ) -> Result<bool, RevocationLookupError> {
        Ok(self.cache.exists(&self.key(token_id)).await?)
    }
}
