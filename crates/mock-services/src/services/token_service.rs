//! Mock 令牌端点
//!
//! OAuth2 client-credentials 授权：校验客户端凭据后签发随机不透明令牌。
//! 凭据可以放在 Basic 认证头，也可以放在表单的 client_id / client_secret 字段。

use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{State, rejection::FormRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::store::MemoryStore;

/// 已签发的令牌
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub client_id: String,
    pub expires_at: DateTime<Utc>,
}

/// 令牌端点状态
pub struct TokenServiceState {
    client_id: String,
    client_secret: String,
    ttl: Duration,
    tokens: MemoryStore<IssuedToken>,
}

impl TokenServiceState {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            ttl,
            tokens: MemoryStore::new(),
        }
    }

    /// 令牌存在且未过期
    pub fn is_valid(&self, token: &str) -> bool {
        self.tokens
            .get(token)
            .is_some_and(|issued| issued.expires_at > Utc::now())
    }

    /// 吊销全部令牌，返回吊销数量
    pub fn revoke_all(&self) -> usize {
        let count = self.tokens.count();
        self.tokens.clear();
        count
    }

    pub fn issued_count(&self) -> usize {
        self.tokens.count()
    }

    fn credentials_match(&self, client_id: &str, client_secret: &str) -> bool {
        !self.client_id.is_empty()
            && client_id == self.client_id
            && client_secret == self.client_secret
    }

    fn issue(&self, client_id: &str) -> String {
        let now = Utc::now();
        self.tokens.retain(|t| t.expires_at > now);

        let token = Uuid::new_v4().simple().to_string();
        let issued = IssuedToken {
            client_id: client_id.to_string(),
            expires_at: now + self.ttl,
        };
        self.tokens.insert(token.clone(), issued);
        token
    }
}

/// 令牌请求表单
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub grant_type: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub scope: Option<String>,
}

/// 从 Authorization 头取出 Bearer 令牌
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer ").or_else(|| v.strip_prefix("bearer ")))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// 解析 Basic 认证头，返回 (client_id, client_secret)
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let encoded = headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Basic ")?;
    let decoded = String::from_utf8(STANDARD.decode(encoded.trim()).ok()?).ok()?;
    let (id, secret) = decoded.split_once(':')?;
    Some((id.to_string(), secret.to_string()))
}

fn oauth_error(status: StatusCode, error: &str) -> Response {
    (status, Json(json!({ "error": error }))).into_response()
}

pub fn token_routes() -> Router<Arc<TokenServiceState>> {
    Router::new()
        .route("/oauth2/token", post(issue_token))
        .route("/admin/tokens/revoke", post(revoke_tokens))
}

async fn issue_token(
    State(state): State<Arc<TokenServiceState>>,
    headers: HeaderMap,
    form: Result<Form<TokenRequest>, FormRejection>,
) -> Response {
    let Form(request) = match form {
        Ok(form) => form,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "令牌请求格式错误");
            return oauth_error(StatusCode::BAD_REQUEST, "invalid_request");
        }
    };

    if request.grant_type != "client_credentials" {
        tracing::warn!(grant_type = %request.grant_type, "不支持的授权类型");
        return oauth_error(StatusCode::BAD_REQUEST, "unsupported_grant_type");
    }

    let credentials = basic_credentials(&headers).or_else(|| {
        request
            .client_id
            .clone()
            .zip(request.client_secret.clone())
    });
    let Some((client_id, client_secret)) = credentials else {
        return oauth_error(StatusCode::UNAUTHORIZED, "invalid_client");
    };
    if !state.credentials_match(&client_id, &client_secret) {
        tracing::warn!(client_id = %client_id, "客户端凭据无效");
        return oauth_error(StatusCode::UNAUTHORIZED, "invalid_client");
    }

    let token = state.issue(&client_id);
    tracing::info!(client_id = %client_id, scope = ?request.scope, "签发访问令牌");

    Json(json!({
        "access_token": token,
        "token_type": "bearer",
        "expires_in": state.ttl.num_seconds(),
    }))
    .into_response()
}

/// 吊销全部令牌（测试用）
async fn revoke_tokens(State(state): State<Arc<TokenServiceState>>) -> impl IntoResponse {
    let revoked = state.revoke_all();
    tracing::info!(revoked, "已吊销全部令牌");
    Json(json!({ "revoked": revoked }))
}
