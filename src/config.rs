/*
 * Responsibility
 * - 環境変数や設定の読み込み (公開鍵、revocation backend、HTTP 制限など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where the issuer's RSA public key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKeyConfig {
    Pem(String),
    Path(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevocationBackend {
    Postgres { database_url: String },
    Valkey { url: String, key_prefix: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub access_jwt_public_key: PublicKeyConfig,
    pub access_token_leeway_seconds: u64,

    pub revocation_backend: RevocationBackend,

    pub http_body_limit_bytes: usize,
    pub http_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source (the process env in
    /// production, a map in tests).
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = match get("PORT") {
            Some(s) => s.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(get("APP_ENV").as_deref());

        // Inline PEM wins over a path when both are set.
        let access_jwt_public_key = match (
            get("ACCESS_JWT_PUBLIC_KEY_PEM"),
            get("ACCESS_JWT_PUBLIC_KEY_PATH"),
        ) {
            (Some(pem), _) => PublicKeyConfig::Pem(pem.replace("\\n", "\n")),
            (None, Some(path)) => PublicKeyConfig::Path(PathBuf::from(path)),
            (None, None) => return Err(ConfigError::Missing("ACCESS_JWT_PUBLIC_KEY_PEM")),
        };

        let access_token_leeway_seconds = match get("ACCESS_TOKEN_LEEWAY_SECONDS") {
            Some(v) => v
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"))?,
            None => 0,
        };

        let revocation_backend = match get("REVOCATION_BACKEND")
            .unwrap_or_else(|| "postgres".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "postgres" | "pg" => RevocationBackend::Postgres {
                database_url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            },
            "valkey" | "redis" => RevocationBackend::Valkey {
                url: get("VALKEY_URL").ok_or(ConfigError::Missing("VALKEY_URL"))?,
                key_prefix: get("VALKEY_REVOCATION_PREFIX")
                    .unwrap_or_else(|| "oauth:revoked".to_string()),
            },
            _ => return Err(ConfigError::Invalid("REVOCATION_BACKEND")),
        };

        let http_body_limit_bytes = get("HTTP_BODY_LIMIT_BYTES")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(1024 * 1024);

        let http_timeout_seconds = get("HTTP_TIMEOUT_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(30);

        Ok(Self {
            addr,
            app_env,
            access_jwt_public_key,
            access_token_leeway_seconds,
            revocation_backend,
            http_body_limit_bytes,
            http_timeout_seconds,
        })
    }
}
