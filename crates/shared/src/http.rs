//! 出站 HTTP 客户端
//!
//! 所有下游调用都必须经过这里构建的客户端，保证请求超时有上限。

use std::time::Duration;

use reqwest::{Client, Url};

use crate::config::HttpClientConfig;
use crate::error::{Result, RewardError};

/// 构建带超时的 reqwest 客户端
///
/// reqwest::Client 内部持有连接池，clone 开销很小，进程内应复用同一个实例。
pub fn build_client(config: &HttpClientConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .user_agent(concat!("reward-platform/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(RewardError::Http)
}

/// 在 base_url 后追加路径段
///
/// 每个路径段都会被百分号编码，所以用户 ID 中的 `/`、`?` 不会改变请求路径。
/// base_url 末尾有无 `/` 结果一致。
pub fn join_url(base_url: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| RewardError::InvalidUrl(format!("{base_url}: {e}")))?;

    url.path_segments_mut()
        .map_err(|_| RewardError::InvalidUrl(format!("{base_url}: 不能作为基础地址")))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}
