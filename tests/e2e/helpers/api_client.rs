//! REST API 客户端
//!
//! 封装对编排服务、供应商网关和 mock 协作方的 HTTP 调用。

use anyhow::Result;
use mock_services::services::ReceivedConfirmation;
use reqwest::{Client, Response, StatusCode};
use reward_shared::models::{RewardOffer, VendorRewardAssignment};
use serde::de::DeserializeOwned;
use serde_json::json;

/// 选择接口的原始响应
#[derive(Debug)]
pub struct SelectionResponse {
    pub status: StatusCode,
    pub body: String,
}

impl SelectionResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or_default()
    }
}

/// API 客户端
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    orchestrator_url: String,
    vendor_url: String,
    mock_url: String,
}

impl ApiClient {
    pub fn new(orchestrator_url: &str, vendor_url: &str, mock_url: &str) -> Self {
        Self {
            client: Client::new(),
            orchestrator_url: orchestrator_url.trim_end_matches('/').to_string(),
            vendor_url: vendor_url.trim_end_matches('/').to_string(),
            mock_url: mock_url.trim_end_matches('/').to_string(),
        }
    }

    // ========== 编排服务 ==========

    pub async fn select_reward(
        &self,
        user_id: &str,
        reward_id: &str,
        accepted_tnc: bool,
    ) -> Result<SelectionResponse> {
        let body = json!({
            "userId": user_id,
            "selectedRewardDealId": reward_id,
            "acceptedTnC": accepted_tnc,
        });
        self.select_reward_raw(body.to_string()).await
    }

    /// 发送任意请求体，用于格式错误的场景
    pub async fn select_reward_raw(&self, body: String) -> Result<SelectionResponse> {
        let resp = self
            .client
            .post(format!("{}/select-reward", self.orchestrator_url))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await?;

        Ok(SelectionResponse {
            status: resp.status(),
            body: resp.text().await?,
        })
    }

    // ========== 供应商网关 ==========

    pub async fn vendor_assignments(&self) -> Result<Vec<VendorRewardAssignment>> {
        self.get(&format!("{}/rewards", self.vendor_url)).await
    }

    // ========== mock 协作方 ==========

    pub async fn offers(&self) -> Result<Vec<RewardOffer>> {
        self.get(&format!("{}/rewards", self.mock_url)).await
    }

    pub async fn confirmations(&self) -> Result<Vec<ReceivedConfirmation>> {
        self.get(&format!("{}/confirmations", self.mock_url)).await
    }

    pub async fn set_sink_failure(&self, should_fail: bool) -> Result<()> {
        let resp = self
            .client
            .post(format!(
                "{}/admin/confirmations/simulate-failure",
                self.mock_url
            ))
            .json(&json!({ "simulate_failure": should_fail }))
            .send()
            .await?;
        self.handle_response::<serde_json::Value>(resp).await?;
        Ok(())
    }

    /// 吊销 mock 令牌端点签发的全部令牌
    pub async fn revoke_tokens(&self) -> Result<usize> {
        let resp = self
            .client
            .post(format!("{}/admin/tokens/revoke", self.mock_url))
            .send()
            .await?;
        let body: serde_json::Value = self.handle_response(resp).await?;
        Ok(body["revoked"].as_u64().unwrap_or_default() as usize)
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self.client.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(&self, resp: Response) -> Result<T> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp.json().await?)
        } else {
            let error_text = resp.text().await.unwrap_or_default();
            Err(anyhow::anyhow!("API 错误 {}: {}", status, error_text))
        }
    }
}
