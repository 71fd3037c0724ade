//! 供应商网关服务入口
//!
//! 提供 POST/GET /rewards 以及 /healthz、/livez 探针。

use reward_shared::{
    config::{AppConfig, ConfirmationMode},
    observability,
};
use reward_vendor::{AppState, routes};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load("reward-vendor-service")?;

    let _guard = observability::init(&config.observability, &config.service_name).await?;

    info!("Starting reward-vendor-service on {}", config.server_addr());

    if config.is_production() && config.confirmation.mode == ConfirmationMode::Disabled {
        warn!("生产环境关闭了确认回调，确认号只会写入日志");
    }

    let state = AppState::from_config(&config)?;
    let app = routes::app(state);

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// 监听关闭信号
///
/// 收到 Ctrl+C 或 SIGTERM 后返回，触发 axum 的优雅关闭流程。
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("注册 Ctrl+C 处理器失败");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("注册 SIGTERM 处理器失败")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}
