//! Prometheus 指标模块
//!
//! 基于 metrics crate 和 metrics-exporter-prometheus 实现指标收集与导出。
//! 指标通过独立的 HTTP 端口暴露，供 Prometheus 抓取。
//! 未安装 recorder 时各 record_* 函数是空操作，测试中可以直接调用。

use anyhow::Result;
use axum::{Router, routing::get};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Metrics 资源守卫
pub struct MetricsHandle {
    _server_handle: tokio::task::JoinHandle<()>,
}

/// 初始化 Prometheus 指标导出
///
/// 启动一个独立的 HTTP 服务器在指定端口暴露 `/metrics` 端点。
pub async fn init(port: u16, service_name: &str) -> Result<MetricsHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    register_common_metrics(service_name);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let server_handle = start_metrics_server(addr, handle).await?;

    Ok(MetricsHandle {
        _server_handle: server_handle,
    })
}

fn register_common_metrics(service_name: &str) {
    metrics::describe_counter!("http_requests_total", "Total number of HTTP requests");
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );

    metrics::describe_counter!(
        "reward_selections_total",
        "Total number of reward selections by outcome"
    );
    metrics::describe_histogram!(
        "reward_selection_duration_seconds",
        "Reward selection end-to-end duration in seconds"
    );

    metrics::describe_counter!(
        "vendor_assignments_total",
        "Total number of reward assignments recorded by the vendor"
    );
    metrics::describe_counter!(
        "confirmation_deliveries_total",
        "Total number of confirmation callbacks by outcome"
    );
    metrics::describe_counter!(
        "oauth_token_fetches_total",
        "Total number of client-credentials token requests by outcome"
    );

    metrics::counter!("service_starts_total", "service" => service_name.to_string()).increment(1);
}

async fn start_metrics_server(
    addr: SocketAddr,
    handle: PrometheusHandle,
) -> Result<tokio::task::JoinHandle<()>> {
    let app = Router::new()
        .route("/metrics", get(move || std::future::ready(handle.render())))
        .route("/health", get(|| async { "OK" }));

    let listener = TcpListener::bind(addr).await?;
    info!("Metrics server listening on {}", addr);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Metrics server error: {}", e);
        }
    });

    Ok(server_handle)
}

// ============================================================================
// 便捷的指标记录函数
// ============================================================================

/// 记录 HTTP 请求
#[inline]
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let status_str = status.to_string();
    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status_str.clone()
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status_str
    )
    .record(duration_secs);
}

/// 记录一次奖励选择
///
/// outcome: accepted / invalid_payload / terms_not_accepted / user_lookup_failed / vendor_forward_failed
#[inline]
pub fn record_selection(outcome: &str, duration_secs: f64) {
    metrics::counter!("reward_selections_total", "outcome" => outcome.to_string()).increment(1);
    metrics::histogram!(
        "reward_selection_duration_seconds",
        "outcome" => outcome.to_string()
    )
    .record(duration_secs);
}

/// 记录未进入处理流程就被拒绝的选择请求
///
/// 没有处理耗时，只累加结果计数。
#[inline]
pub fn record_selection_rejected(outcome: &str) {
    metrics::counter!("reward_selections_total", "outcome" => outcome.to_string()).increment(1);
}

/// 记录供应商侧新增的分配
#[inline]
pub fn record_vendor_assignment() {
    metrics::counter!("vendor_assignments_total").increment(1);
}

/// 记录确认回调投递结果
///
/// outcome: delivered / rejected / failed / skipped
#[inline]
pub fn record_confirmation_delivery(mode: &str, outcome: &str) {
    metrics::counter!(
        "confirmation_deliveries_total",
        "mode" => mode.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// 记录令牌请求结果
#[inline]
pub fn record_token_fetch(outcome: &str) {
    metrics::counter!("oauth_token_fetches_total", "outcome" => outcome.to_string()).increment(1);
}
