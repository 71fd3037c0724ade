//! 奖励选择编排服务
//!
//! 一次选择请求依次经过：
//! 1. 参数校验（失败时不发起任何上游调用）
//! 2. 条款确认检查（由 `selection.require_accepted_tnc` 控制）
//! 3. 向身份目录查询用户资料
//! 4. 组装供应商分配并转发
//!
//! 转发成功即返回，不等待供应商的确认回调。任一步失败都是终止性的，
//! 不重试也不补偿。本服务不持有可变共享状态。

use std::sync::Arc;
use std::time::Instant;

use reward_shared::{
    config::SelectionConfig, models::VendorRewardAssignment, observability::metrics,
};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::RewardSelectionRequest;
use crate::error::{Result, SelectionError, UpstreamError};
use crate::identity::IdentityDirectory;
use crate::vendor::VendorGateway;

pub struct SelectionService {
    identity: Arc<dyn IdentityDirectory>,
    vendor: Arc<dyn VendorGateway>,
    policy: SelectionConfig,
}

impl SelectionService {
    pub fn new(
        identity: Arc<dyn IdentityDirectory>,
        vendor: Arc<dyn VendorGateway>,
        policy: SelectionConfig,
    ) -> Self {
        Self {
            identity,
            vendor,
            policy,
        }
    }

    /// 提交一次奖励选择，成功时返回已转发给供应商的分配
    #[instrument(
        skip(self, request),
        fields(user_id = %request.user_id, reward_id = %request.selected_reward_deal_id)
    )]
    pub async fn submit_selection(
        &self,
        request: RewardSelectionRequest,
    ) -> Result<VendorRewardAssignment> {
        let start = Instant::now();
        let result = self.process(request).await;

        let outcome = match &result {
            Ok(_) => "accepted",
            Err(e) => e.outcome(),
        };
        metrics::record_selection(outcome, start.elapsed().as_secs_f64());

        result
    }

    async fn process(&self, request: RewardSelectionRequest) -> Result<VendorRewardAssignment> {
        request.validate()?;

        if self.policy.require_accepted_tnc && !request.accepted_tnc {
            return Err(SelectionError::TermsNotAccepted);
        }

        let profile = self
            .identity
            .get_user(&request.user_id)
            .await
            .map_err(|source| {
                if matches!(source, UpstreamError::NotFound) {
                    warn!(user_id = %request.user_id, "身份目录中不存在该用户");
                }
                SelectionError::UpstreamUserLookupFailed {
                    user_id: request.user_id.clone(),
                    source,
                }
            })?;

        let assignment = VendorRewardAssignment::from_profile(
            &request.selected_reward_deal_id,
            &request.user_id,
            &profile,
        );

        self.vendor
            .create_reward(&assignment)
            .await
            .map_err(SelectionError::VendorForwardFailed)?;

        info!(
            user_id = %assignment.user_id,
            reward_id = %assignment.reward_id,
            "奖励选择已转发到供应商"
        );

        Ok(assignment)
    }
}
