//! 令牌测试套件
//!
//! 身份目录拒绝令牌后，本次选择失败，下一次选择重新换取令牌。

use reqwest::StatusCode;

use crate::setup::{TestEnvConfig, TestEnvironment};

#[cfg(test)]
mod auth_tests {
    use super::*;

    #[tokio::test]
    async fn test_revoked_token_is_refreshed_on_next_selection() {
        let env = TestEnvironment::setup().await.unwrap();

        let response = env
            .api
            .select_reward("U451298", "RWD34589", true)
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::ACCEPTED);
        assert_eq!(env.api.revoke_tokens().await.unwrap(), 1);

        // 缓存的令牌已被吊销
        let response = env
            .api
            .select_reward("U451298", "RWD34589", true)
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(env.api.vendor_assignments().await.unwrap().len(), 1);

        let response = env
            .api
            .select_reward("U451298", "RWD34589", true)
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::ACCEPTED);
        assert_eq!(env.api.vendor_assignments().await.unwrap().len(), 2);
        assert_eq!(env.mock.tokens.issued_count(), 1);
    }

    /// 供应商接口开启认证时转发也携带令牌
    #[tokio::test]
    async fn test_authenticated_vendor_forwarding() {
        let env = TestEnvironment::setup_with_config(TestEnvConfig {
            vendor_authenticated: true,
            ..Default::default()
        })
        .await
        .unwrap();

        let response = env
            .api
            .select_reward("U451299", "RWD34590", true)
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::ACCEPTED);
        assert_eq!(env.api.vendor_assignments().await.unwrap().len(), 1);
        // 身份查询与供应商转发共用同一个令牌
        assert_eq!(env.mock.tokens.issued_count(), 1);
    }

    /// 身份目录不校验令牌时流程不受影响
    #[tokio::test]
    async fn test_identity_without_auth() {
        let env = TestEnvironment::setup_with_config(TestEnvConfig {
            require_auth: false,
            ..Default::default()
        })
        .await
        .unwrap();

        let response = env
            .api
            .select_reward("U451300", "RWD34592", true)
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::ACCEPTED);
    }
}
