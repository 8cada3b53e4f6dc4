//! Factory: build the `Authenticator` from application `Config`.
use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::config::{Config, PublicKeyConfig, RevocationBackend};
use crate::repos::PgAccessTokenRepo;
use crate::services::auth::{
    AccessTokenRepository, Authenticator, RsaPublicKey, revocation::ValkeyAccessTokenRepo,
};

pub fn load_public_key(config: &PublicKeyConfig) -> anyhow::Result<RsaPublicKey> {
    let key = match config {
        PublicKeyConfig::Pem(pem) => RsaPublicKey::from_pem(pem.as_bytes())
            .context("ACCESS_JWT_PUBLIC_KEY_PEM is not a valid RSA public key")?,
        PublicKeyConfig::Path(path) => RsaPublicKey::from_pem_file(path)
            .with_context(|| format!("cannot load RSA public key from {}", path.display()))?,
    };
    Ok(key)
}

pub async fn build_access_token_repository(
    backend: &RevocationBackend,
) -> anyhow::Result<Arc<dyn AccessTokenRepository>> {
    let repo: Arc<dyn AccessTokenRepository> = match backend {
        RevocationBackend::Postgres { database_url } => {
            // Connections are opened lazily so a database outage turns into
            // per-request RevocationCheckFailed instead of a boot failure.
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect_lazy(database_url)
                .context("invalid DATABASE_URL")?;
            tracing::info!(backend = "postgres", "revocation repository configured");
            Arc::new(PgAccessTokenRepo::new(pool))
        }
        RevocationBackend::Valkey { url, key_prefix } => {
            let repo = ValkeyAccessTokenRepo::new_with_prefix(url, key_prefix.clone())
                .await
                .context("cannot connect to Valkey")?;
            tracing::info!(
                backend = repo.backend_name(),
                prefix = %key_prefix,
                "revocation repository configured"
            );
            Arc::new(repo)
        }
    };
    Ok(repo)
}

pub async fn build_authenticator(config: &Config) -> anyhow::Result<Arc<Authenticator>> {
    let key = load_public_key(&config.access_jwt_public_key)?;
    let repo = build_access_token_repository(&config.revocation_backend).await?;

    let auth = Authenticator::new(Arc::new(key), repo)
        .with_leeway(config.access_token_leeway_seconds);

    Ok(Arc::new(auth))
}
