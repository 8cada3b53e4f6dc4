/*
 * Responsibility
 * - GET /me: 認証済みコンテキスト (oauth_* 属性) をそのまま返す
 * - 下流の認可ロジックが AuthCtx をどう受け取るかの見本
 */
use axum::Json;

use crate::api::v1::extractors::{AuthCtx, AuthCtxExtractor};

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<AuthCtx> {
    tracing::debug!(user_id = %ctx.user_id, client_id = %ctx.client_id, "me");
    Json(ctx)
}
