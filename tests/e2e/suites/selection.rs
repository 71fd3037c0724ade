//! 奖励选择测试套件
//!
//! 有效选择被转发一次；任何失败都不会在供应商侧留下记录。

use std::time::Duration;

use reqwest::StatusCode;
use reward_shared::models::VendorRewardAssignment;

use crate::setup::{TestEnvConfig, TestEnvironment};

#[cfg(test)]
mod selection_tests {
    use super::*;

    /// 种子用户选择奖励：202、供应商记录一条分配、接收端收到 16 位确认号
    #[tokio::test]
    async fn test_valid_selection_end_to_end() {
        let env = TestEnvironment::setup().await.unwrap();

        let response = env
            .api
            .select_reward("U451298", "RWD34589", true)
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::ACCEPTED);
        assert_eq!(response.body, "reward selection received successfully");

        let assignments = env.api.vendor_assignments().await.unwrap();
        assert_eq!(
            assignments,
            vec![VendorRewardAssignment {
                reward_id: "RWD34589".into(),
                user_id: "U451298".into(),
                first_name: "John".into(),
                last_name: "Doe".into(),
                email: "john@example.com".into(),
            }]
        );

        let received = env
            .wait_for_confirmations(1, Duration::from_secs(5))
            .await
            .unwrap();
        let confirmation = &received[0].confirmation;
        assert_eq!(confirmation.user_id, "U451298");
        assert_eq!(confirmation.reward_id, "RWD34589");
        assert_eq!(confirmation.reward_confirmation_number.len(), 16);
        assert!(
            confirmation
                .reward_confirmation_number
                .bytes()
                .all(|b| b.is_ascii_digit())
        );
    }

    /// 未知用户：500，供应商没有记录，也没有确认
    #[tokio::test]
    async fn test_unknown_user_leaves_no_trace() {
        let env = TestEnvironment::setup().await.unwrap();

        let response = env
            .api
            .select_reward("U999999", "RWD34589", true)
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json()["message"], "failed to fetch user");

        assert!(env.api.vendor_assignments().await.unwrap().is_empty());
        env.settle().await;
        assert!(env.api.confirmations().await.unwrap().is_empty());
    }

    /// 格式错误的请求体直接 400
    #[tokio::test]
    async fn test_malformed_selection_is_rejected() {
        let env = TestEnvironment::setup().await.unwrap();

        for body in ["not json", r#"{"userId":"U451298"}"#] {
            let response = env.api.select_reward_raw(body.to_string()).await.unwrap();
            assert_eq!(response.status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(response.json()["code"], "INVALID_PAYLOAD");
        }

        assert!(env.api.vendor_assignments().await.unwrap().is_empty());
        assert_eq!(env.mock.tokens.issued_count(), 0);
    }

    /// 未接受条款：默认策略下拒绝
    #[tokio::test]
    async fn test_terms_not_accepted() {
        let env = TestEnvironment::setup().await.unwrap();
        assert!(env.config.require_accepted_tnc);

        let response = env
            .api
            .select_reward("U451298", "RWD34589", false)
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json()["code"], "TERMS_NOT_ACCEPTED");
        assert!(env.api.vendor_assignments().await.unwrap().is_empty());
    }

    /// 放宽条款策略后照常转发
    #[tokio::test]
    async fn test_terms_policy_relaxed() {
        let env = TestEnvironment::setup_with_config(TestEnvConfig {
            require_accepted_tnc: false,
            ..Default::default()
        })
        .await
        .unwrap();

        let response = env
            .api
            .select_reward("U451300", "RWD34592", false)
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::ACCEPTED);
        let assignments = env.api.vendor_assignments().await.unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].first_name, "Peter");
    }

    /// 奖励 ID 不校验目录，原样转发
    #[tokio::test]
    async fn test_reward_id_is_forwarded_verbatim() {
        let env = TestEnvironment::setup().await.unwrap();
        let offers = env.api.offers().await.unwrap();
        assert!(offers.iter().all(|o| o.id != "RWD-UNLISTED"));

        let response = env
            .api
            .select_reward("U451299", "RWD-UNLISTED", true)
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::ACCEPTED);
        let assignments = env.api.vendor_assignments().await.unwrap();
        assert_eq!(assignments[0].reward_id, "RWD-UNLISTED");
        assert_eq!(assignments[0].email, "katie@example.com");
    }

    /// 重复选择产生两条分配和两个不同确认号
    #[tokio::test]
    async fn test_repeated_selection_is_not_deduplicated() {
        let env = TestEnvironment::setup().await.unwrap();

        for _ in 0..2 {
            let response = env
                .api
                .select_reward("U451298", "RWD34590", true)
                .await
                .unwrap();
            assert_eq!(response.status, StatusCode::ACCEPTED);
        }

        assert_eq!(env.api.vendor_assignments().await.unwrap().len(), 2);
        let received = env
            .wait_for_confirmations(2, Duration::from_secs(5))
            .await
            .unwrap();
        assert_ne!(
            received[0].confirmation.reward_confirmation_number,
            received[1].confirmation.reward_confirmation_number
        );
        // 两次选择共用同一个缓存令牌
        assert_eq!(env.mock.tokens.issued_count(), 1);
    }
}
