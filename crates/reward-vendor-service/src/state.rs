//! 应用状态定义

use std::sync::Arc;

use reward_shared::{
    config::{AppConfig, ConfirmationMode},
    error::Result,
    http::build_client,
    oauth::TokenProvider,
};
use tracing::info;

use crate::{
    confirmation::ConfirmationNumberGenerator,
    notifier::{ConfirmationNotifier, build_sink},
    store::AssignmentStore,
};

/// Axum 应用共享状态
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<AssignmentStore>,
    pub notifier: Arc<ConfirmationNotifier>,
}

impl AppState {
    pub fn new(store: Arc<AssignmentStore>, notifier: Arc<ConfirmationNotifier>) -> Self {
        Self { store, notifier }
    }

    /// 按配置组装存储与确认回调
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let http = build_client(&config.http_client)?;

        let tokens = (config.confirmation.mode == ConfirmationMode::Oauth).then(|| {
            Arc::new(TokenProvider::new(config.oauth.clone(), http.clone())).client()
        });
        let sink = build_sink(&config.confirmation, http, tokens)?;

        info!(
            mode = sink.mode(),
            url = config.confirmation.url.as_deref().unwrap_or(""),
            "确认回调已初始化"
        );

        let notifier = ConfirmationNotifier::new(Arc::new(ConfirmationNumberGenerator::new()), sink);
        Ok(Self::new(Arc::new(AssignmentStore::new()), Arc::new(notifier)))
    }
}
