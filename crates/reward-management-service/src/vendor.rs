//! 供应商网关客户端
//!
//! 把组装好的奖励分配 POST 到 `{base}/rewards`。

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use reward_shared::{http::join_url, models::VendorRewardAssignment, oauth::AuthorizedClient};
use tracing::{debug, warn};

use crate::error::UpstreamError;

/// 供应商网关接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VendorGateway: Send + Sync {
    async fn create_reward(&self, assignment: &VendorRewardAssignment) -> Result<(), UpstreamError>;
}

/// 基于 HTTP 的供应商网关实现
///
/// `auth` 为 None 时发送无认证请求。
pub struct HttpVendorGateway {
    http: Client,
    auth: Option<AuthorizedClient>,
    base_url: String,
}

impl HttpVendorGateway {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            auth: None,
            base_url: base_url.into(),
        }
    }

    /// 转发请求携带 client-credentials 令牌
    pub fn with_auth(mut self, client: AuthorizedClient) -> Self {
        self.auth = Some(client);
        self
    }
}

#[async_trait]
impl VendorGateway for HttpVendorGateway {
    async fn create_reward(&self, assignment: &VendorRewardAssignment) -> Result<(), UpstreamError> {
        let url = join_url(&self.base_url, &["rewards"])?;
        debug!(
            reward_id = %assignment.reward_id,
            user_id = %assignment.user_id,
            url = %url,
            "转发奖励分配到供应商"
        );

        let request = match &self.auth {
            Some(client) => client.post(url).await?,
            None => self.http.post(url),
        };

        let response = request.json(assignment).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        if status == StatusCode::UNAUTHORIZED
            && let Some(client) = &self.auth
        {
            warn!("供应商网关拒绝令牌，缓存已失效");
            client.invalidate_token();
            return Err(UpstreamError::Unauthorized);
        }

        Err(UpstreamError::Status(status.as_u16()))
    }
}
