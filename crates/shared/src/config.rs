//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。
//! 同时兼容旧部署方式使用的扁平环境变量（CLIENT_ID、LOYALTY_API_URL 等）。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// 服务配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// 可观测性配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    /// 日志输出格式：json（结构化）或 pretty（人类可读）
    pub log_format: String,
    pub metrics_enabled: bool,
    pub metrics_port: u16,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_port: 9090,
        }
    }
}

impl ObservabilityConfig {
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// 出站 HTTP 客户端配置
///
/// 所有下游调用（身份目录、供应商、确认回调、令牌端点）共用同一组超时。
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    pub timeout_ms: u64,
    pub connect_timeout_ms: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            connect_timeout_ms: 3_000,
        }
    }
}

/// OAuth2 client-credentials 配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    /// 空格分隔的 scope 列表，为空时不发送 scope 参数
    pub scope: Option<String>,
    /// 提前多少秒视令牌为过期
    pub expiry_skew_seconds: i64,
    /// 令牌端点未返回 expires_in 时使用的有效期
    pub default_token_lifetime_seconds: i64,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            token_url: String::new(),
            scope: None,
            expiry_skew_seconds: 30,
            default_token_lifetime_seconds: 3600,
        }
    }
}

/// 身份目录（loyalty engine）配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub base_url: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090".to_string(),
        }
    }
}

/// 供应商网关配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VendorConfig {
    pub base_url: String,
    /// 为 true 时转发请求携带 client-credentials 令牌
    pub authenticated: bool,
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8082".to_string(),
            authenticated: false,
        }
    }
}

/// 确认回调投递方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationMode {
    /// 无认证 POST 到 webhook 地址
    #[default]
    Webhook,
    /// 通过 client-credentials 令牌认证后 POST
    Oauth,
    /// 只生成确认号并记录日志
    Disabled,
}

/// 确认回调配置
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ConfirmationConfig {
    pub mode: ConfirmationMode,
    pub url: Option<String>,
}

/// 奖励选择策略配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// 为 true 时拒绝 acceptedTnC=false 的请求
    pub require_accepted_tnc: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            require_accepted_tnc: true,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub server: ServerConfig,
    pub observability: ObservabilityConfig,
    pub http_client: HttpClientConfig,
    pub oauth: OAuthConfig,
    pub identity: IdentityConfig,
    pub vendor: VendorConfig,
    pub confirmation: ConfirmationConfig,
    pub selection: SelectionConfig,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. .env 文件（如存在）
    /// 2. config/default.toml（默认配置）
    /// 3. config/{environment}.toml（环境特定配置）
    /// 4. config/{service_name}.toml（服务特定配置）
    /// 5. 环境变量（REWARD_ 前缀，段之间用双下划线，如 REWARD_OAUTH__CLIENT_ID -> oauth.client_id）
    /// 6. 旧部署使用的扁平环境变量（CLIENT_ID、REWARD_MGT_API_URL 等）
    /// 7. 服务特定端口环境变量（如 REWARD_MANAGEMENT_PORT）
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let env = std::env::var("REWARD_ENV").unwrap_or_else(|_| "development".to_string());

        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env.clone())?
            .add_source(File::from(Path::new(&config_dir).join("default.toml")).required(false))
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", env))).required(false),
            )
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", service_name)))
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("REWARD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.apply_legacy_overrides(|key| std::env::var(key).ok());

        if let Some(port) = Self::get_service_port_from_env(service_name) {
            config.server.port = port;
        }

        Ok(config)
    }

    /// 应用旧部署的扁平环境变量
    ///
    /// 选择编排服务读取 CLIENT_ID / CLIENT_SECRET / TOKEN_URL / LOYALTY_API_URL /
    /// VENDOR_MANAGEMENT_API_URL；供应商服务读取 REWARD_MGT_* 与 CONFIRMATION_WEBHOOK_URL。
    /// `lookup` 抽象出来便于测试时不修改进程环境。
    pub fn apply_legacy_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        match self.service_name.as_str() {
            "reward-management-service" => {
                if let Some(v) = get("CLIENT_ID") {
                    self.oauth.client_id = v;
                }
                if let Some(v) = get("CLIENT_SECRET") {
                    self.oauth.client_secret = v;
                }
                if let Some(v) = get("TOKEN_URL") {
                    self.oauth.token_url = v;
                }
                if let Some(v) = get("LOYALTY_API_URL") {
                    self.identity.base_url = v;
                }
                if let Some(v) = get("VENDOR_MANAGEMENT_API_URL") {
                    self.vendor.base_url = v;
                }
            }
            "reward-vendor-service" => {
                if let Some(v) = get("REWARD_MGT_CLIENT_ID") {
                    self.oauth.client_id = v;
                }
                if let Some(v) = get("REWARD_MGT_CLIENT_SECRET") {
                    self.oauth.client_secret = v;
                }
                if let Some(v) = get("REWARD_MGT_TOKEN_URL") {
                    self.oauth.token_url = v;
                }
                // 两者同时存在时以无认证 webhook 为准
                if let Some(v) = get("REWARD_MGT_API_URL") {
                    self.confirmation.mode = ConfirmationMode::Oauth;
                    self.confirmation.url = Some(v);
                }
                if let Some(v) = get("CONFIRMATION_WEBHOOK_URL") {
                    self.confirmation.mode = ConfirmationMode::Webhook;
                    self.confirmation.url = Some(v);
                }
            }
            _ => {}
        }
    }

    /// 从环境变量获取服务特定端口
    ///
    /// 服务名到环境变量的映射规则：
    /// - reward-management-service -> REWARD_MANAGEMENT_PORT
    /// - reward-vendor-service -> REWARD_VENDOR_PORT
    fn get_service_port_from_env(service_name: &str) -> Option<u16> {
        let env_var_name = match service_name {
            "reward-management-service" => "REWARD_MANAGEMENT_PORT",
            "reward-vendor-service" => "REWARD_VENDOR_PORT",
            _ => return Self::get_generic_service_port(service_name),
        };

        std::env::var(env_var_name)
            .ok()
            .and_then(|v| v.parse().ok())
    }

    /// 将 "my-service-name" 转换为 "MY_SERVICE_NAME_PORT"
    fn get_generic_service_port(service_name: &str) -> Option<u16> {
        std::env::var(Self::generic_port_var(service_name))
            .ok()
            .and_then(|v| v.parse().ok())
    }

    fn generic_port_var(service_name: &str) -> String {
        format!("{}_PORT", service_name.to_uppercase().replace('-', "_"))
    }

    /// 获取服务地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
