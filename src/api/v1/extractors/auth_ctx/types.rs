/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の検証ロジックは services::auth 側の責務
 * - scopes は coarse-grained な権限情報（リソース単位の認可は handler 側で別途チェック）
 */

pub use crate::services::auth::AuthenticatedContext as AuthCtx;
