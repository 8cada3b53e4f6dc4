#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::{HeaderMap, HeaderValue, header};
use colllect_resource_server::services::auth::{
    AccessTokenRepository, Authenticator, PublicKeySource, RsaPublicKey,
    revocation::RevocationLookupError,
};
use colllect_resource_server::services::cache::CacheError;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};

pub const PUBLIC_PEM: &str = include_str!("../fixtures/issuer_public.pem");
pub const PRIVATE_PEM: &str = include_str!("../fixtures/issuer_private.pem");
pub const FOREIGN_PRIVATE_PEM: &str = include_str!("../fixtures/foreign_private.pem");

pub type CallLog = Arc<Mutex<Vec<&'static str>>>;

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn new_jti() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Claims shaped the way the colllect authorization server issues them.
pub fn claims(jti: &str, exp: i64) -> Value {
    json!({
        "aud": "colllect-front",
        "jti": jti,
        "iat": now() - 5,
        "nbf": now() - 5,
        "exp": exp,
        "sub": "user-42",
        "scopes": ["colllect:read", "colllect:write"],
    })
}

pub fn sign_with(private_pem: &str, claims: &Value) -> String {
    let key = EncodingKey::from_rsa_pem(private_pem.as_bytes()).unwrap();
    let mut header = Header::new(Algorithm::RS256);
    header.typ = Some("JWT".to_string());
    jsonwebtoken::encode(&header, claims, &key).unwrap()
}

pub fn sign(claims: &Value) -> String {
    sign_with(PRIVATE_PEM, claims)
}

pub fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    );
    headers
}

pub fn cookie(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::COOKIE,
        HeaderValue::from_str(&format!("locale=fr; colllect_oauth2={token}")).unwrap(),
    );
    headers
}

/// Public key source that records each time the key is used.
pub struct RecordingKeys {
    key: RsaPublicKey,
    log: CallLog,
}

impl PublicKeySource for RecordingKeys {
    fn public_key(&self) -> &RsaPublicKey {
        self.log.lock().unwrap().push("verify_signature");
        &self.key
    }
}

/// In-memory repository that records lookups.
#[derive(Default)]
pub struct RecordingRepo {
    pub revoked: Mutex<HashSet<String>>,
    pub looked_up: Mutex<Vec<String>>,
    pub unavailable: bool,
    log: CallLog,
}

impl RecordingRepo {
    pub fn revoke(&self, jti: &str) {
        self.revoked.lock().unwrap().insert(jti.to_string());
    }

    pub fn lookups(&self) -> Vec<String> {
        self.looked_up.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccessTokenRepository for RecordingRepo {
    async fn is_access_token_revoked(
        &self,
        token_id: &str,
    ) -> Result<bool, RevocationLookupError> {
        self.log.lock().unwrap().push("check_revocation");
        self.looked_up.lock().unwrap().push(token_id.to_string());

        if self.unavailable {
            return Err(CacheError::BackendConnection("connection refused".to_string()).into());
        }
        Ok(self.revoked.lock().unwrap().contains(token_id))
    }
}

pub struct Harness {
    pub auth: Authenticator,
    pub repo: Arc<RecordingRepo>,
    pub log: CallLog,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_repo(|_| {})
    }

    pub fn with_repo(configure: impl FnOnce(&mut RecordingRepo)) -> Self {
        let log: CallLog = Arc::default();

        let mut repo = RecordingRepo {
            log: log.clone(),
            ..RecordingRepo::default()
        };
        configure(&mut repo);
        let repo = Arc::new(repo);

        let keys = RecordingKeys {
            key: RsaPublicKey::from_pem(PUBLIC_PEM.as_bytes()).unwrap(),
            log: log.clone(),
        };

        let auth = Authenticator::new(Arc::new(keys), repo.clone());

        Self { auth, repo, log }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.log.lock().unwrap().clone()
    }
}
