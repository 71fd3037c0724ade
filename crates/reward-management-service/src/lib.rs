//! 奖励选择服务
//!
//! 接收用户的奖励选择，经身份目录补全用户资料后转发给供应商网关。

pub mod dto;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod routes;
pub mod service;
pub mod state;
pub mod vendor;

pub use dto::RewardSelectionRequest;
pub use error::{SelectionError, UpstreamError};
pub use service::SelectionService;
pub use state::AppState;
