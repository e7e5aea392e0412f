//! # HMS管理模块
//!
//! 提供配置加载、日志初始化和运行指标等运维功能

pub mod config;
pub mod logging;
pub mod monitoring;

pub use self::config::{ConfigValidator, HmsConfig, HospitalConfig, LoggingConfig, LogFormat, MetricsConfig, ServerConfig};
pub use logging::init_logging;
pub use monitoring::HmsMetrics;
