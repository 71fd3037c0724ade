//! 统一错误处理模块
//!
//! 定义各服务共享的基础设施错误（令牌获取、出站 HTTP），
//! 以及统一的 JSON 错误响应格式。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// 系统错误类型
#[derive(Debug, Error)]
pub enum RewardError {
    // ==================== 认证错误 ====================
    /// client id / secret / token url 缺失或无效，依赖令牌的调用不会被发出
    #[error("OAuth2 配置无效: {0}")]
    AuthConfiguration(String),

    #[error("获取访问令牌失败: {0}")]
    TokenAcquisition(String),

    // ==================== 出站调用错误 ====================
    #[error("HTTP 请求失败: {0}")]
    Http(#[from] reqwest::Error),

    #[error("无效的 URL: {0}")]
    InvalidUrl(String),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, RewardError>;

impl RewardError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::AuthConfiguration(_) => "AUTH_CONFIGURATION_ERROR",
            Self::TokenAcquisition(_) => "TOKEN_ACQUISITION_FAILED",
            Self::Http(_) => "HTTP_ERROR",
            Self::InvalidUrl(_) => "INVALID_URL",
        }
    }
}

/// 构造统一格式的 JSON 错误响应
///
/// `{"success": false, "code": "...", "message": "..."}`
pub fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    let body = json!({
        "success": false,
        "code": code,
        "message": message.into(),
    });

    (status, axum::Json(body)).into_response()
}
