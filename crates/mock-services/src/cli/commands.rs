//! CLI 命令定义

use clap::{Args, Parser, Subcommand};

use crate::services::MockConfig;

/// 奖励平台 mock 协作方
///
/// 在一个端口上提供积分引擎、身份目录、令牌端点和确认接收端。
#[derive(Parser, Debug)]
#[command(name = "mock-server")]
#[command(version, about = "奖励平台模拟协作方")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// 输出 JSON 格式日志
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 启动 mock HTTP 服务
    Server(ServerArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    /// 服务端口
    #[arg(short, long, default_value = "8090")]
    pub port: u16,

    /// 额外生成随机用户
    #[arg(long)]
    pub populate: bool,

    /// 随机用户数量
    #[arg(long, default_value = "100")]
    pub user_count: usize,

    /// 令牌端点接受的 client_id
    #[arg(long, default_value = "reward-client")]
    pub client_id: String,

    /// 令牌端点接受的 client_secret
    #[arg(long, default_value = "reward-secret")]
    pub client_secret: String,

    /// 令牌有效期（秒）
    #[arg(long, default_value = "3600")]
    pub token_ttl_secs: i64,

    /// 用户查询不校验令牌
    #[arg(long)]
    pub no_auth: bool,
}

impl ServerArgs {
    pub fn mock_config(&self) -> MockConfig {
        MockConfig {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            require_auth: !self.no_auth,
            token_ttl_secs: self.token_ttl_secs,
        }
    }
}
