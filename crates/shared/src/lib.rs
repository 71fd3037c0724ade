//! 共享库
//!
//! 包含所有服务共用的配置、错误处理、数据模型、OAuth2 令牌提供者、
//! 出站 HTTP 客户端和可观测性等基础设施代码。

pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod oauth;
pub mod observability;
pub mod test_utils;
