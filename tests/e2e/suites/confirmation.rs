//! 确认回调测试套件
//!
//! 确认回调与选择响应解耦：接收端故障不影响 202，也不回滚供应商记录。

use std::time::Duration;

use reqwest::StatusCode;
use reward_shared::config::ConfirmationMode;

use crate::setup::{TestEnvConfig, TestEnvironment};

#[cfg(test)]
mod confirmation_tests {
    use super::*;

    /// 接收端故障：选择仍然 202，分配仍然保存
    #[tokio::test]
    async fn test_sink_failure_does_not_affect_selection() {
        let env = TestEnvironment::setup().await.unwrap();
        env.api.set_sink_failure(true).await.unwrap();

        let response = env
            .api
            .select_reward("U451298", "RWD34589", true)
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::ACCEPTED);
        assert_eq!(env.api.vendor_assignments().await.unwrap().len(), 1);
        env.settle().await;
        assert!(env.api.confirmations().await.unwrap().is_empty());

        // 恢复后新的选择正常确认，之前的确认不重投
        env.api.set_sink_failure(false).await.unwrap();
        env.api
            .select_reward("U451299", "RWD34590", true)
            .await
            .unwrap();
        let received = env
            .wait_for_confirmations(1, Duration::from_secs(5))
            .await
            .unwrap();
        env.settle().await;
        assert_eq!(env.api.confirmations().await.unwrap().len(), 1);
        assert_eq!(received[0].confirmation.user_id, "U451299");
    }

    /// oauth 回调模式：供应商先换取令牌再投递
    #[tokio::test]
    async fn test_oauth_confirmation_mode() {
        let env = TestEnvironment::setup_with_config(TestEnvConfig {
            confirmation_mode: ConfirmationMode::Oauth,
            ..Default::default()
        })
        .await
        .unwrap();

        let response = env
            .api
            .select_reward("U451298", "RWD34591", true)
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::ACCEPTED);

        let received = env
            .wait_for_confirmations(1, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(received[0].confirmation.reward_id, "RWD34591");
        // 编排服务与供应商网关各自持有令牌
        assert_eq!(env.mock.tokens.issued_count(), 2);
    }

    /// 关闭回调：只记录日志
    #[tokio::test]
    async fn test_disabled_confirmation_mode() {
        let env = TestEnvironment::setup_with_config(TestEnvConfig {
            confirmation_mode: ConfirmationMode::Disabled,
            ..Default::default()
        })
        .await
        .unwrap();

        let response = env
            .api
            .select_reward("U451298", "RWD34589", true)
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::ACCEPTED);
        assert_eq!(env.api.vendor_assignments().await.unwrap().len(), 1);
        env.settle().await;
        assert!(env.api.confirmations().await.unwrap().is_empty());
    }
}
