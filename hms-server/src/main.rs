//! HMS服务器主程序

use anyhow::{Context, Result};
use clap::Parser;
use hms_admin::{init_logging, HmsConfig, HmsMetrics};
use hms_web::{AppState, RouterOptions, WebServer};
use hms_workflow::{HospitalManagementSystem, HospitalOptions};
use std::net::SocketAddr;
use tracing::info;

/// HMS服务器命令行参数
#[derive(Parser, Debug)]
#[command(name = "hms-server")]
#[command(about = "医院前台分诊管理系统 (HMS) 服务器")]
struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    config: Option<String>,

    /// 监听主机（覆盖配置）
    #[arg(long)]
    host: Option<String>,

    /// 服务器端口（覆盖配置）
    #[arg(short, long)]
    port: Option<u16>,

    /// 日志级别（覆盖配置）
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = HmsConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    // 初始化日志
    init_logging(&config.logging)?;

    info!("启动HMS服务器...");
    info!("  医院名称: {}", config.hospital.name);
    info!("  监听地址: {}", config.bind_address());
    info!("  演示患者: {}", config.hospital.seed_demo_patients);

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.bind_address()))?;

    let hms = HospitalManagementSystem::new(HospitalOptions {
        hospital_name: config.hospital.name.clone(),
        seed_demo_patients: config.hospital.seed_demo_patients,
        retain_patient_names: config.hospital.retain_patient_names,
    });
    let state = AppState::new(hms, HmsMetrics::new()?);
    let options = RouterOptions {
        enable_cors: config.server.enable_cors,
        expose_metrics: config.metrics.enabled,
    };

    WebServer::new(addr, state, options)
        .run()
        .await
        .context("Web server failed")?;

    Ok(())
}
