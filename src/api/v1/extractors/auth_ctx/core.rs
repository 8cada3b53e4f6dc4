use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use super::AuthCtx;

/// Handler で AuthCtx を受け取るための extractor
/// middleware が AuthCtx を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す（認証がかかってない・ミドルウェア未設定）
pub struct AuthCtxExtractor(pub AuthCtx);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn missing_context_is_unauthorized() {
        let (mut parts, _) = Request::new(()).into_parts();
        let result = AuthCtxExtractor::from_request_parts(&mut parts, &()).await;

        assert_eq!(result.err(), Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn extracts_inserted_context() {
        let ctx = AuthCtx {
            access_token_id: "t".into(),
            client_id: "c".into(),
            user_id: "u".into(),
            scopes: vec![],
        };
        let mut req = Request::new(());
        req.extensions_mut().insert(ctx.clone());
        let (mut parts, _) = req.into_parts();

        let AuthCtxExtractor(found) = AuthCtxExtractor::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(found, ctx);
    }
}
