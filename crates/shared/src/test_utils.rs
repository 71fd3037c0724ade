//! 测试工具模块
//!
//! 提供集成测试所需的辅助函数和测试数据。
//! 各服务的 tests/ 目录通过这里在临时端口上启动真实的 axum 服务。

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::{AppConfig, HttpClientConfig, OAuthConfig};
use crate::models::{UserProfile, VendorRewardAssignment};

// ==================== 测试服务器 ====================

/// 运行在临时端口上的测试服务器
///
/// Drop 时终止服务任务。
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// 服务根地址，例如 `http://127.0.0.1:41234`
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// 拼接完整请求地址
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// 在 127.0.0.1 的随机端口上启动路由
pub async fn spawn_test_server(router: Router) -> std::io::Result<TestServer> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(TestServer { addr, handle })
}

// ==================== 测试配置辅助 ====================

pub const TEST_CLIENT_ID: &str = "test-client";
pub const TEST_CLIENT_SECRET: &str = "test-secret";

/// 创建测试用 OAuth 配置
pub fn test_oauth_config(token_url: impl Into<String>) -> OAuthConfig {
    OAuthConfig {
        client_id: TEST_CLIENT_ID.to_string(),
        client_secret: TEST_CLIENT_SECRET.to_string(),
        token_url: token_url.into(),
        ..Default::default()
    }
}

/// 测试用 HTTP 客户端配置，超时较短，避免失败用例拖慢测试
pub fn test_http_client_config() -> HttpClientConfig {
    HttpClientConfig {
        timeout_ms: 2_000,
        connect_timeout_ms: 500,
    }
}

/// 创建测试用应用配置
pub fn test_app_config(service_name: &str) -> AppConfig {
    AppConfig {
        service_name: service_name.to_string(),
        environment: "test".to_string(),
        http_client: test_http_client_config(),
        ..Default::default()
    }
}

// ==================== 测试数据 ====================

/// 种子数据中的示例用户
pub fn sample_profile() -> UserProfile {
    UserProfile::new("U451298", "John", "Doe", "john@example.com")
}

/// 与 [`sample_profile`] 对应的供应商分配
pub fn sample_assignment() -> VendorRewardAssignment {
    VendorRewardAssignment::from_profile("RWD34589", "U451298", &sample_profile())
}
