//! 确认回调通知
//!
//! 分配写入后由 `ConfirmationNotifier::dispatch` 派发一个独立任务：
//! 生成确认号、组装 `RewardConfirmation`、投递到确认接收端。
//!
//! 投递只尝试一次。失败只记录 warn 日志和指标，不影响已写入的分配，
//! 也不影响 `createReward` 的响应。

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use reward_shared::{
    config::{ConfirmationConfig, ConfirmationMode},
    error::{Result, RewardError},
    models::RewardConfirmation,
    oauth::AuthorizedClient,
    observability::metrics,
};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::confirmation::ConfirmationNumberGenerator;
use crate::error::DeliveryError;

/// 投递结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// 接收端返回 2xx
    Delivered,
    /// 投递已关闭，只记录日志
    Skipped,
}

/// 确认接收端
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfirmationSink: Send + Sync {
    /// 投递方式，用作日志和指标标签
    fn mode(&self) -> &'static str;

    async fn deliver(
        &self,
        confirmation: &RewardConfirmation,
    ) -> std::result::Result<Delivery, DeliveryError>;
}

/// 无认证 webhook
pub struct WebhookSink {
    http: Client,
    url: Url,
}

impl WebhookSink {
    pub fn new(http: Client, url: Url) -> Self {
        Self { http, url }
    }
}

#[async_trait]
impl ConfirmationSink for WebhookSink {
    fn mode(&self) -> &'static str {
        "webhook"
    }

    async fn deliver(
        &self,
        confirmation: &RewardConfirmation,
    ) -> std::result::Result<Delivery, DeliveryError> {
        let response = self
            .http
            .post(self.url.clone())
            .json(confirmation)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Rejected(status.as_u16()));
        }
        Ok(Delivery::Delivered)
    }
}

/// 携带 client-credentials 令牌的回调
pub struct OAuthSink {
    client: AuthorizedClient,
    url: Url,
}

impl OAuthSink {
    pub fn new(client: AuthorizedClient, url: Url) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl ConfirmationSink for OAuthSink {
    fn mode(&self) -> &'static str {
        "oauth"
    }

    async fn deliver(
        &self,
        confirmation: &RewardConfirmation,
    ) -> std::result::Result<Delivery, DeliveryError> {
        let response = self
            .client
            .post(self.url.clone())
            .await?
            .json(confirmation)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.client.invalidate_token();
        }
        if !status.is_success() {
            return Err(DeliveryError::Rejected(status.as_u16()));
        }
        Ok(Delivery::Delivered)
    }
}

/// 只记录日志的接收端
pub struct LogOnlySink;

#[async_trait]
impl ConfirmationSink for LogOnlySink {
    fn mode(&self) -> &'static str {
        "disabled"
    }

    async fn deliver(
        &self,
        confirmation: &RewardConfirmation,
    ) -> std::result::Result<Delivery, DeliveryError> {
        info!(
            confirmation_number = %confirmation.reward_confirmation_number,
            user_id = %confirmation.user_id,
            reward_id = %confirmation.reward_id,
            "确认回调已关闭，仅记录确认号"
        );
        Ok(Delivery::Skipped)
    }
}

/// 按配置构建确认接收端
///
/// webhook / oauth 模式缺少 url 时退化为只记录日志。
/// oauth 模式需要调用方提供令牌客户端。
pub fn build_sink(
    config: &ConfirmationConfig,
    http: Client,
    tokens: Option<AuthorizedClient>,
) -> Result<Arc<dyn ConfirmationSink>> {
    let url = match (config.mode, config.url.as_deref().map(str::trim)) {
        (ConfirmationMode::Disabled, _) => return Ok(Arc::new(LogOnlySink)),
        (_, None | Some("")) => {
            warn!(mode = ?config.mode, "未配置确认回调地址，确认号只记录日志");
            return Ok(Arc::new(LogOnlySink));
        }
        (_, Some(url)) => {
            Url::parse(url).map_err(|e| RewardError::InvalidUrl(format!("{url}: {e}")))?
        }
    };

    let sink: Arc<dyn ConfirmationSink> = match config.mode {
        ConfirmationMode::Webhook => Arc::new(WebhookSink::new(http, url)),
        ConfirmationMode::Oauth => {
            let client = tokens.ok_or_else(|| {
                RewardError::AuthConfiguration("oauth 回调模式缺少令牌客户端".to_string())
            })?;
            Arc::new(OAuthSink::new(client, url))
        }
        ConfirmationMode::Disabled => Arc::new(LogOnlySink),
    };

    Ok(sink)
}

/// 确认回调派发器
pub struct ConfirmationNotifier {
    generator: Arc<ConfirmationNumberGenerator>,
    sink: Arc<dyn ConfirmationSink>,
}

impl ConfirmationNotifier {
    pub fn new(
        generator: Arc<ConfirmationNumberGenerator>,
        sink: Arc<dyn ConfirmationSink>,
    ) -> Self {
        Self { generator, sink }
    }

    /// 异步派发确认回调（fire-and-forget）
    ///
    /// 返回的句柄只用于测试等待，调用方不需要 await。
    pub fn dispatch(&self, reward_id: &str, user_id: &str) -> JoinHandle<RewardConfirmation> {
        let generator = Arc::clone(&self.generator);
        let sink = Arc::clone(&self.sink);
        let reward_id = reward_id.to_string();
        let user_id = user_id.to_string();

        tokio::spawn(async move {
            let confirmation = RewardConfirmation {
                reward_confirmation_number: generator.generate(),
                user_id,
                reward_id,
            };
            let mode = sink.mode();

            let outcome = match sink.deliver(&confirmation).await {
                Ok(Delivery::Delivered) => {
                    info!(
                        confirmation_number = %confirmation.reward_confirmation_number,
                        reward_id = %confirmation.reward_id,
                        user_id = %confirmation.user_id,
                        mode,
                        "确认回调投递成功"
                    );
                    "delivered"
                }
                Ok(Delivery::Skipped) => "skipped",
                Err(e) => {
                    warn!(
                        error = %e,
                        confirmation_number = %confirmation.reward_confirmation_number,
                        reward_id = %confirmation.reward_id,
                        user_id = %confirmation.user_id,
                        mode,
                        "确认回调投递失败，不重试"
                    );
                    e.outcome()
                }
            };
            metrics::record_confirmation_delivery(mode, outcome);

            confirmation
        })
    }
}
