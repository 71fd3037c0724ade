//! 应用状态定义

use std::sync::Arc;

use reward_shared::{config::AppConfig, error::Result, http::build_client, oauth::TokenProvider};
use tracing::info;

use crate::{
    identity::HttpIdentityDirectory,
    service::SelectionService,
    vendor::{HttpVendorGateway, VendorGateway},
};

/// Axum 应用共享状态
#[derive(Clone)]
pub struct AppState {
    pub selection: Arc<SelectionService>,
}

impl AppState {
    pub fn new(selection: Arc<SelectionService>) -> Self {
        Self { selection }
    }

    /// 按配置组装 HTTP 实现的身份目录与供应商网关
    ///
    /// 令牌在首次调用时才换取，缺失的 OAuth 配置不会阻止启动。
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let http = build_client(&config.http_client)?;
        let tokens = Arc::new(TokenProvider::new(config.oauth.clone(), http.clone()));

        let identity = Arc::new(HttpIdentityDirectory::new(
            tokens.client(),
            config.identity.base_url.clone(),
        ));

        let mut vendor = HttpVendorGateway::new(http, config.vendor.base_url.clone());
        if config.vendor.authenticated {
            vendor = vendor.with_auth(tokens.client());
        }
        let vendor: Arc<dyn VendorGateway> = Arc::new(vendor);

        info!(
            identity_url = %config.identity.base_url,
            vendor_url = %config.vendor.base_url,
            vendor_authenticated = config.vendor.authenticated,
            require_accepted_tnc = config.selection.require_accepted_tnc,
            "奖励选择服务依赖已初始化"
        );

        let selection = SelectionService::new(identity, vendor, config.selection.clone());
        Ok(Self::new(Arc::new(selection)))
    }
}
