//! access token (RS256 JWT, header または cookie) 検証 → AuthenticatedContext を extensions に入れる
//!
//! - 検証ロジック自体は `services::auth::Authenticator` 側
//! - ここは HTTP への配線と、拒否理由のログ出力だけを担当する

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// 保護したい Router に認証 middleware を適用する。
///
/// 例：
/// ```ignore
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let req = match state.auth.validate_authorization(req).await {
        Ok(req) => req,
        Err(err) => {
            tracing::warn!(
                code = err.code(),
                error = %err,
                source = ?std::error::Error::source(&err),
                "access denied"
            );
            return Err(AppError::AccessDenied(err));
        }
    };

    Ok(next.run(req).await)
}
