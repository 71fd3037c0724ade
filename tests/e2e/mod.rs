//! 奖励选择平台端到端测试
//!
//! 在同一进程内启动 mock 协作方（令牌端点、身份目录、确认接收端）、
//! 供应商网关和选择编排服务，覆盖完整的选择流程：
//! - 有效选择的转发与确认回调
//! - 校验失败与上游失败时不产生任何写入
//! - 接收端故障与令牌吊销

pub mod helpers;
pub mod setup;
pub mod suites;

pub use setup::TestEnvironment;
