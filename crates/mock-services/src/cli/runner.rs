//! 命令执行器

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use crate::cli::ServerArgs;
use crate::generators::{DataGenerator, GeneratorConfig};
use crate::services::MockServices;

/// 执行 server 命令
pub async fn run_server(args: &ServerArgs) -> Result<()> {
    info!(
        port = args.port,
        populate = args.populate,
        require_auth = !args.no_auth,
        "启动 Mock 服务"
    );

    let services = MockServices::new(&args.mock_config());

    if args.populate {
        let generator = DataGenerator::new(GeneratorConfig {
            user_count: args.user_count,
        });
        let stats = generator.populate_users(&services.loyalty.users);
        info!(
            generated = stats.generated,
            total_users = stats.total_users,
            "随机用户填充完成"
        );
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = TcpListener::bind(addr).await.context("绑定端口失败")?;

    info!("Mock 服务已启动: http://{}", addr);
    info!("可用端点:");
    info!("  GET  /rewards, /rewards/{{id}} - 奖励商品目录");
    info!("  GET  /user-rewards - 已有选择记录");
    info!("  GET  /user/{{id}}, /users - 身份目录");
    info!("  POST /oauth2/token - client-credentials 令牌");
    info!("  POST /confirmations - 确认接收端");
    info!("按 Ctrl+C 停止服务");

    axum::serve(listener, services.router())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务器运行失败")?;

    info!("Mock 服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("安装 CTRL+C 信号处理器失败");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("安装 SIGTERM 信号处理器失败")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("收到关闭信号，正在停止服务...");
}
