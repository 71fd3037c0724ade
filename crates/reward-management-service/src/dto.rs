//! 请求 DTO 定义

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 奖励选择请求
///
/// POST /select-reward 的请求体。acceptedTnC 缺省按 false 处理。
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RewardSelectionRequest {
    #[validate(length(min = 1, message = "userId 不能为空"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "selectedRewardDealId 不能为空"))]
    pub selected_reward_deal_id: String,
    #[serde(rename = "acceptedTnC", default)]
    pub accepted_tnc: bool,
}

impl RewardSelectionRequest {
    pub fn new(user_id: impl Into<String>, reward_id: impl Into<String>, accepted_tnc: bool) -> Self {
        Self {
            user_id: user_id.into(),
            selected_reward_deal_id: reward_id.into(),
            accepted_tnc,
        }
    }
}
