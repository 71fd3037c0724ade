//! 身份目录客户端
//!
//! 通过 `GET {base}/user/{userId}` 查询用户资料，请求携带 client-credentials 令牌。

use async_trait::async_trait;
use reqwest::StatusCode;
use reward_shared::{http::join_url, models::UserProfile, oauth::AuthorizedClient};
use tracing::{debug, warn};

use crate::error::UpstreamError;

/// 身份目录接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// 按用户 ID 查询资料，不存在时返回 `UpstreamError::NotFound`
    async fn get_user(&self, user_id: &str) -> Result<UserProfile, UpstreamError>;
}

/// 基于 HTTP 的身份目录实现
pub struct HttpIdentityDirectory {
    client: AuthorizedClient,
    base_url: String,
}

impl HttpIdentityDirectory {
    pub fn new(client: AuthorizedClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl IdentityDirectory for HttpIdentityDirectory {
    async fn get_user(&self, user_id: &str) -> Result<UserProfile, UpstreamError> {
        let url = join_url(&self.base_url, &["user", user_id])?;
        debug!(user_id = %user_id, url = %url, "查询身份目录");

        let response = self.client.get(url).await?.send().await?;

        match response.status() {
            status if status.is_success() => Ok(response.json::<UserProfile>().await?),
            StatusCode::NOT_FOUND => Err(UpstreamError::NotFound),
            StatusCode::UNAUTHORIZED => {
                // 令牌可能已在服务端失效，下次请求重新换取
                warn!(user_id = %user_id, "身份目录拒绝令牌，缓存已失效");
                self.client.invalidate_token();
                Err(UpstreamError::Unauthorized)
            }
            status => Err(UpstreamError::Status(status.as_u16())),
        }
    }
}
