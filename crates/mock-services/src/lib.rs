//! Mock Services
//!
//! 奖励平台的模拟协作方，用于本地开发和端到端测试。
//!
//! - `services`: 积分引擎、身份目录、令牌端点、确认接收端
//! - `models`: 种子目录与随机用户
//! - `store`: 内存存储
//! - `generators`: 批量数据生成
//!
//! ```rust,no_run
//! use mock_services::services::{MockConfig, MockServices};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let services = MockServices::new(&MockConfig::default());
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8090").await?;
//! axum::serve(listener, services.router()).await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod generators;
pub mod models;
pub mod services;
pub mod store;
