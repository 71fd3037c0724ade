//! 奖励选择服务错误类型定义

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reward_shared::error::{RewardError, error_response};

/// 上游调用错误（身份目录、供应商网关）
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("资源不存在")]
    NotFound,

    #[error("上游拒绝访问令牌")]
    Unauthorized,

    #[error("上游返回 HTTP {0}")]
    Status(u16),

    #[error("上游请求失败: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Shared(#[from] RewardError),
}

/// 奖励选择错误
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("请求参数无效: {0}")]
    InvalidPayload(String),

    #[error("用户未接受条款")]
    TermsNotAccepted,

    #[error("查询用户 {user_id} 失败: {source}")]
    UpstreamUserLookupFailed {
        user_id: String,
        #[source]
        source: UpstreamError,
    },

    #[error("转发奖励分配到供应商失败: {0}")]
    VendorForwardFailed(#[source] UpstreamError),
}

impl SelectionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidPayload(_) | Self::TermsNotAccepted => StatusCode::BAD_REQUEST,
            Self::UpstreamUserLookupFailed { .. } | Self::VendorForwardFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPayload(_) => "INVALID_PAYLOAD",
            Self::TermsNotAccepted => "TERMS_NOT_ACCEPTED",
            Self::UpstreamUserLookupFailed { .. } => "UPSTREAM_USER_LOOKUP_FAILED",
            Self::VendorForwardFailed(_) => "VENDOR_FORWARD_FAILED",
        }
    }

    /// 指标中使用的结果标签
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::InvalidPayload(_) => "invalid_payload",
            Self::TermsNotAccepted => "terms_not_accepted",
            Self::UpstreamUserLookupFailed { .. } => "user_lookup_failed",
            Self::VendorForwardFailed(_) => "vendor_forward_failed",
        }
    }

    /// 返回给调用方的简短说明，不含上游细节
    fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidPayload(_) => "invalid request payload",
            Self::TermsNotAccepted => "terms and conditions must be accepted",
            Self::UpstreamUserLookupFailed { .. } => "failed to fetch user",
            Self::VendorForwardFailed(_) => {
                "unable to send reward selection to vendor management api"
            }
        }
    }
}

impl IntoResponse for SelectionError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "奖励选择处理失败");
        } else {
            tracing::warn!(error = %self, code = self.error_code(), "奖励选择请求被拒绝");
        }

        error_response(status, self.error_code(), self.public_message())
    }
}

impl From<validator::ValidationErrors> for SelectionError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::InvalidPayload(errors.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SelectionError>;
