//! OAuth2 client-credentials 令牌提供者
//!
//! 服务以自身身份向令牌端点换取 bearer token，并在进程内缓存复用。
//!
//! ## 并发模型
//!
//! - 读路径无锁：缓存的令牌放在 `ArcSwapOption` 中，未过期时直接返回
//! - 刷新路径串行：过期或缺失时先获取异步互斥锁，拿到锁后再检查一次缓存，
//!   并发调用方只会触发一次令牌请求
//!
//! ## 使用示例
//!
//! ```ignore
//! let provider = Arc::new(TokenProvider::new(config.oauth.clone(), http.clone()));
//! let client = provider.client();
//! let response = client.get(url).await?.send().await?;
//! ```

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::OAuthConfig;
use crate::error::{Result, RewardError};
use crate::observability::metrics;

/// 缓存的访问令牌
///
/// 刷新时刻在签发时算好：提前量不超过令牌寿命的一半，短寿命令牌同样会被缓存复用。
#[derive(Debug, Clone)]
pub struct BearerToken {
    value: String,
    expires_at: DateTime<Utc>,
    refresh_at: DateTime<Utc>,
}

impl BearerToken {
    pub fn issued(
        value: impl Into<String>,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
        skew: Duration,
    ) -> Self {
        let skew = skew.max(Duration::zero()).min(lifetime / 2);
        let expires_at = issued_at + lifetime;
        Self {
            value: value.into(),
            expires_at,
            refresh_at: expires_at - skew,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn refresh_at(&self) -> DateTime<Utc> {
        self.refresh_at
    }

    /// `now` 时刻是否需要换取新令牌
    pub fn needs_refresh_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.refresh_at
    }
}

/// 令牌端点响应（RFC 6749 §5.1）
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// client-credentials 令牌提供者
///
/// 整个进程共享一个实例（放在 Arc 中），所有需要令牌的调用方共用缓存。
pub struct TokenProvider {
    config: OAuthConfig,
    http: Client,
    cached: ArcSwapOption<BearerToken>,
    refresh_lock: Mutex<()>,
}

impl TokenProvider {
    pub fn new(config: OAuthConfig, http: Client) -> Self {
        Self {
            config,
            http,
            cached: ArcSwapOption::empty(),
            refresh_lock: Mutex::new(()),
        }
    }

    /// 返回一个会自动附加 bearer token 的客户端
    pub fn client(self: &Arc<Self>) -> AuthorizedClient {
        AuthorizedClient {
            http: self.http.clone(),
            tokens: Arc::clone(self),
        }
    }

    /// 获取有效令牌，必要时向令牌端点换取新令牌
    pub async fn token(&self) -> Result<Arc<BearerToken>> {
        if let Some(token) = self.fresh_cached() {
            return Ok(token);
        }

        let _guard = self.refresh_lock.lock().await;

        // 等锁期间其他调用方可能已经刷新过
        if let Some(token) = self.fresh_cached() {
            return Ok(token);
        }

        let token = Arc::new(self.fetch_token().await?);
        self.cached.store(Some(Arc::clone(&token)));
        Ok(token)
    }

    /// 丢弃缓存的令牌，下次调用 `token()` 会重新换取
    ///
    /// 资源服务返回 401 时调用。
    pub fn invalidate(&self) {
        self.cached.store(None);
    }

    fn fresh_cached(&self) -> Option<Arc<BearerToken>> {
        self.cached
            .load_full()
            .filter(|token| !token.needs_refresh_at(Utc::now()))
    }

    /// 校验必需配置，返回令牌端点地址
    fn token_endpoint(&self) -> Result<Url> {
        if self.config.client_id.trim().is_empty() {
            return Err(RewardError::AuthConfiguration("client_id 未配置".to_string()));
        }
        if self.config.client_secret.trim().is_empty() {
            return Err(RewardError::AuthConfiguration(
                "client_secret 未配置".to_string(),
            ));
        }
        if self.config.token_url.trim().is_empty() {
            return Err(RewardError::AuthConfiguration("token_url 未配置".to_string()));
        }

        Url::parse(&self.config.token_url).map_err(|e| {
            RewardError::AuthConfiguration(format!("token_url 无效 ({}): {e}", self.config.token_url))
        })
    }

    async fn fetch_token(&self) -> Result<BearerToken> {
        let endpoint = match self.token_endpoint() {
            Ok(endpoint) => endpoint,
            Err(e) => {
                metrics::record_token_fetch("misconfigured");
                return Err(e);
            }
        };

        let mut form = vec![("grant_type", "client_credentials")];
        if let Some(scope) = self.config.scope.as_deref().filter(|s| !s.trim().is_empty()) {
            form.push(("scope", scope));
        }

        debug!(token_url = %endpoint, client_id = %self.config.client_id, "请求 client-credentials 令牌");

        let response = self
            .http
            .post(endpoint)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                metrics::record_token_fetch("transport_error");
                RewardError::TokenAcquisition(format!("令牌端点不可达: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            metrics::record_token_fetch("rejected");
            warn!(status = status.as_u16(), "令牌端点拒绝请求");
            return Err(RewardError::TokenAcquisition(format!(
                "令牌端点返回 HTTP {}",
                status.as_u16()
            )));
        }

        let body: TokenResponse = response.json().await.map_err(|e| {
            metrics::record_token_fetch("invalid_response");
            RewardError::TokenAcquisition(format!("令牌响应解析失败: {e}"))
        })?;

        if body.access_token.is_empty() {
            metrics::record_token_fetch("invalid_response");
            return Err(RewardError::TokenAcquisition(
                "令牌响应缺少 access_token".to_string(),
            ));
        }

        if let Some(token_type) = body.token_type.as_deref()
            && !token_type.eq_ignore_ascii_case("bearer")
        {
            warn!(token_type, "令牌类型不是 bearer，仍按 bearer 使用");
        }

        let lifetime = body
            .expires_in
            .filter(|secs| *secs > 0)
            .unwrap_or(self.config.default_token_lifetime_seconds);
        let token = BearerToken::issued(
            body.access_token,
            Utc::now(),
            Duration::seconds(lifetime),
            Duration::seconds(self.config.expiry_skew_seconds),
        );

        metrics::record_token_fetch("success");
        info!(
            expires_at = %token.expires_at(),
            refresh_at = %token.refresh_at(),
            "已获取新的访问令牌"
        );

        Ok(token)
    }
}

/// 自动附加 bearer token 的 HTTP 客户端
///
/// 令牌获取失败时直接返回错误，请求不会在无令牌的情况下发出。
#[derive(Clone)]
pub struct AuthorizedClient {
    http: Client,
    tokens: Arc<TokenProvider>,
}

impl AuthorizedClient {
    pub async fn request(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        let token = self.tokens.token().await?;
        Ok(self.http.request(method, url).bearer_auth(token.value()))
    }

    pub async fn get(&self, url: Url) -> Result<RequestBuilder> {
        self.request(Method::GET, url).await
    }

    pub async fn post(&self, url: Url) -> Result<RequestBuilder> {
        self.request(Method::POST, url).await
    }

    /// 资源服务返回 401 时让缓存失效
    pub fn invalidate_token(&self) {
        self.tokens.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(client_id: &str, client_secret: &str, token_url: &str) -> OAuthConfig {
        OAuthConfig {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            token_url: token_url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_token_refresh_applies_skew() {
        let now = Utc::now();
        let token = BearerToken::issued("abc", now, Duration::seconds(3600), Duration::seconds(30));

        assert_eq!(token.expires_at(), now + Duration::seconds(3600));
        assert_eq!(token.refresh_at(), now + Duration::seconds(3570));
        assert!(!token.needs_refresh_at(now + Duration::seconds(3569)));
        assert!(token.needs_refresh_at(now + Duration::seconds(3570)));
    }

    #[test]
    fn test_short_lived_token_skew_is_clamped_to_half_lifetime() {
        let now = Utc::now();
        let token = BearerToken::issued("abc", now, Duration::seconds(20), Duration::seconds(30));

        assert_eq!(token.refresh_at(), now + Duration::seconds(10));
        assert!(!token.needs_refresh_at(now));
        assert!(!token.needs_refresh_at(now + Duration::seconds(9)));
        assert!(token.needs_refresh_at(now + Duration::seconds(10)));
    }

    #[test]
    fn test_negative_skew_is_ignored() {
        let now = Utc::now();
        let token = BearerToken::issued("abc", now, Duration::seconds(60), Duration::seconds(-5));

        assert_eq!(token.refresh_at(), token.expires_at());
    }

    #[tokio::test]
    async fn test_missing_client_id_fails_closed() {
        let provider = TokenProvider::new(
            config_with("", "secret", "http://127.0.0.1:1/token"),
            Client::new(),
        );
        let err = provider.token().await.unwrap_err();
        assert!(matches!(err, RewardError::AuthConfiguration(_)));
    }

    #[tokio::test]
    async fn test_missing_secret_fails_closed() {
        let provider = TokenProvider::new(
            config_with("client", " ", "http://127.0.0.1:1/token"),
            Client::new(),
        );
        let err = provider.token().await.unwrap_err();
        assert!(matches!(err, RewardError::AuthConfiguration(_)));
    }

    #[tokio::test]
    async fn test_invalid_token_url_fails_closed() {
        let provider = TokenProvider::new(config_with("client", "secret", "::nope"), Client::new());
        let err = provider.token().await.unwrap_err();
        assert!(matches!(err, RewardError::AuthConfiguration(_)));
    }

    #[tokio::test]
    async fn test_authorized_client_does_not_build_request_without_token() {
        let provider = Arc::new(TokenProvider::new(OAuthConfig::default(), Client::new()));
        let client = provider.client();
        let url = Url::parse("http://127.0.0.1:1/user/U1").unwrap();
        assert!(client.get(url).await.is_err());
    }
}
