//! 测试辅助工具模块

mod api_client;

pub use api_client::*;
