//! 配置管理
//!
//! 默认值、配置文件、环境变量三层叠加，加载后统一验证

use anyhow::{Context, Result};
use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::info;

/// 环境变量前缀，例如 `HMS__SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "HMS";

/// 系统完整配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HmsConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 医院配置
    pub hospital: HospitalConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 指标配置
    pub metrics: MetricsConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听主机
    pub host: String,
    /// 监听端口
    pub port: u16,
    /// 启用CORS
    pub enable_cors: bool,
}

/// 医院配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HospitalConfig {
    /// 医院名称（科室树的根）
    pub name: String,
    /// 启动时预置演示患者
    pub seed_demo_patients: bool,
    /// 在治疗记录上保留患者姓名
    pub retain_patient_names: bool,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别或过滤指令
    pub level: String,
    /// 输出格式
    pub format: LogFormat,
}

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

/// 指标配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// 暴露 /metrics 端点
    pub enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            enable_cors: true,
        }
    }
}

impl Default for HospitalConfig {
    fn default() -> Self {
        Self {
            name: "City General Hospital".to_string(),
            seed_demo_patients: true,
            retain_patient_names: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl HmsConfig {
    /// 加载配置：默认值 → 配置文件（可选）→ 环境变量
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Self::defaults()?;
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path));
        }
        builder = builder.add_source(Self::environment());

        let config = Self::build(builder)?;
        match config_path {
            Some(path) => info!("Configuration loaded successfully from: {}", path),
            None => info!("Configuration loaded from defaults and environment"),
        }
        Ok(config)
    }

    /// `HMS__SECTION__KEY` 形式的环境变量覆盖
    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let defaults = Config::try_from(&HmsConfig::default())
            .context("Failed to build default configuration")?;
        Ok(Config::builder().add_source(defaults))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let settings = builder.build().context("Failed to read configuration sources")?;
        let config: HmsConfig = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        ConfigValidator::new().validate(&config)?;
        Ok(config)
    }

    /// 监听地址
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// 配置验证器
#[derive(Debug, Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, config: &HmsConfig) -> Result<()> {
        if config.server.host.trim().is_empty() {
            anyhow::bail!("server.host must not be empty");
        }
        if config.server.port == 0 {
            anyhow::bail!("server.port must be non-zero");
        }
        if config.hospital.name.trim().is_empty() {
            anyhow::bail!("hospital.name must not be empty");
        }
        tracing_subscriber::EnvFilter::try_new(&config.logging.level)
            .with_context(|| format!("Invalid logging.level: {}", config.logging.level))?;
        Ok(())
    }
}
