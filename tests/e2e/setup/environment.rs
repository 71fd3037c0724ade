//! 测试环境管理
//!
//! 每个测试独占一套服务实例，端口由系统分配，测试之间互不影响。

use std::time::Duration;

use anyhow::Result;
use mock_services::services::{MockConfig, MockServices, ReceivedConfirmation};
use reward_shared::{
    config::{ConfirmationConfig, ConfirmationMode},
    test_utils::{
        TEST_CLIENT_ID, TEST_CLIENT_SECRET, TestServer, spawn_test_server, test_app_config,
        test_oauth_config,
    },
};

use crate::helpers::ApiClient;

/// 测试环境配置
#[derive(Debug, Clone)]
pub struct TestEnvConfig {
    /// mock 身份目录是否校验令牌
    pub require_auth: bool,
    /// 供应商网关的确认回调方式
    pub confirmation_mode: ConfirmationMode,
    /// 编排服务转发给供应商时是否携带令牌
    pub vendor_authenticated: bool,
    /// 是否强制要求接受条款
    pub require_accepted_tnc: bool,
}

impl Default for TestEnvConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            confirmation_mode: ConfirmationMode::Webhook,
            vendor_authenticated: false,
            require_accepted_tnc: true,
        }
    }
}

/// 测试环境
pub struct TestEnvironment {
    pub config: TestEnvConfig,
    /// mock 协作方状态，测试可以直接断言或注入故障
    pub mock: MockServices,
    pub api: ApiClient,
    _mock_server: TestServer,
    _vendor_server: TestServer,
    _orchestrator_server: TestServer,
}

impl TestEnvironment {
    pub async fn setup() -> Result<Self> {
        Self::setup_with_config(TestEnvConfig::default()).await
    }

    pub async fn setup_with_config(config: TestEnvConfig) -> Result<Self> {
        // 1. mock 协作方
        let mock = MockServices::new(&MockConfig {
            client_id: TEST_CLIENT_ID.to_string(),
            client_secret: TEST_CLIENT_SECRET.to_string(),
            require_auth: config.require_auth,
            token_ttl_secs: 3600,
        });
        let mock_server = spawn_test_server(mock.router()).await?;
        let token_url = mock_server.url("/oauth2/token");

        // 2. 供应商网关，确认回调指向 mock 接收端
        let mut vendor_config = test_app_config("reward-vendor-service");
        vendor_config.oauth = test_oauth_config(token_url.clone());
        vendor_config.confirmation = ConfirmationConfig {
            mode: config.confirmation_mode,
            url: Some(mock_server.url("/confirmations")),
        };
        let vendor_state = reward_vendor::AppState::from_config(&vendor_config)?;
        let vendor_server = spawn_test_server(reward_vendor::routes::app(vendor_state)).await?;

        // 3. 选择编排服务
        let mut orchestrator_config = test_app_config("reward-management-service");
        orchestrator_config.oauth = test_oauth_config(token_url);
        orchestrator_config.identity.base_url = mock_server.base_url();
        orchestrator_config.vendor.base_url = vendor_server.base_url();
        orchestrator_config.vendor.authenticated = config.vendor_authenticated;
        orchestrator_config.selection.require_accepted_tnc = config.require_accepted_tnc;
        let orchestrator_state = reward_management::AppState::from_config(&orchestrator_config)?;
        let orchestrator_server =
            spawn_test_server(reward_management::routes::app(orchestrator_state)).await?;

        let api = ApiClient::new(
            &orchestrator_server.base_url(),
            &vendor_server.base_url(),
            &mock_server.base_url(),
        );

        tracing::info!(
            orchestrator = %orchestrator_server.addr(),
            vendor = %vendor_server.addr(),
            mock = %mock_server.addr(),
            "测试环境初始化完成"
        );

        Ok(Self {
            config,
            mock,
            api,
            _mock_server: mock_server,
            _vendor_server: vendor_server,
            _orchestrator_server: orchestrator_server,
        })
    }

    /// 等待接收端收到至少 `expected` 条确认
    pub async fn wait_for_confirmations(
        &self,
        expected: usize,
        timeout: Duration,
    ) -> Result<Vec<ReceivedConfirmation>> {
        let start = tokio::time::Instant::now();
        let poll_interval = Duration::from_millis(20);

        loop {
            let received = self.mock.confirmations.received().await;
            if received.len() >= expected {
                return Ok(received);
            }
            if start.elapsed() > timeout {
                return Err(anyhow::anyhow!(
                    "等待 {} 条确认超时，实际收到 {} 条",
                    expected,
                    received.len()
                ));
            }
            tokio::time::sleep(poll_interval).await;
        }
    }

    /// 给后台确认任务留出执行时间，用于断言"没有发生"的场景
    pub async fn settle(&self) {
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
}
