//! CLI 模块
//!
//! ```bash
//! # 启动 mock 协作方，并额外生成 50 个随机用户
//! mock-server server --port 8090 --populate --user-count 50
//!
//! # 关闭用户查询的令牌校验
//! mock-server server --no-auth
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands, ServerArgs};
pub use runner::run_server;
