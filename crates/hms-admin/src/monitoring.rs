//! 运行指标
//!
//! Prometheus 计数器与队列长度仪表

use anyhow::{Context, Result};
use prometheus::{Encoder, IntCounter, IntGauge, Opts, Registry, TextEncoder};

/// 分诊系统指标收集器
#[derive(Clone)]
pub struct HmsMetrics {
    /// Prometheus指标注册表
    registry: Registry,
    /// 登记患者数
    patients_registered_total: IntCounter,
    /// 开始治疗次数
    treatments_started_total: IntCounter,
    /// 记录的治疗步骤数
    treatment_steps_total: IntCounter,
    /// 撤销的治疗步骤数
    treatment_undos_total: IntCounter,
    /// 当前候诊人数
    queue_size: IntGauge,
}

impl HmsMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let patients_registered_total = IntCounter::with_opts(Opts::new(
            "hms_patients_registered_total",
            "Patients registered to the triage queue",
        ))?;
        let treatments_started_total = IntCounter::with_opts(Opts::new(
            "hms_treatments_started_total",
            "Patients moved from the queue into treatment",
        ))?;
        let treatment_steps_total = IntCounter::with_opts(Opts::new(
            "hms_treatment_steps_total",
            "Treatment steps recorded",
        ))?;
        let treatment_undos_total = IntCounter::with_opts(Opts::new(
            "hms_treatment_undos_total",
            "Treatment steps undone",
        ))?;
        let queue_size = IntGauge::with_opts(Opts::new(
            "hms_queue_size",
            "Patients currently waiting in the triage queue",
        ))?;

        registry.register(Box::new(patients_registered_total.clone()))?;
        registry.register(Box::new(treatments_started_total.clone()))?;
        registry.register(Box::new(treatment_steps_total.clone()))?;
        registry.register(Box::new(treatment_undos_total.clone()))?;
        registry.register(Box::new(queue_size.clone()))?;

        Ok(Self {
            registry,
            patients_registered_total,
            treatments_started_total,
            treatment_steps_total,
            treatment_undos_total,
            queue_size,
        })
    }

    pub fn record_registration(&self) {
        self.patients_registered_total.inc();
    }

    pub fn record_treatment_started(&self) {
        self.treatments_started_total.inc();
    }

    pub fn record_treatment_step(&self) {
        self.treatment_steps_total.inc();
    }

    pub fn record_undo(&self) {
        self.treatment_undos_total.inc();
    }

    pub fn set_queue_size(&self, size: usize) {
        self.queue_size.set(size as i64);
    }

    /// 以 Prometheus 文本格式导出
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .context("Failed to encode metrics")?;
        String::from_utf8(buffer).context("Metrics output was not UTF-8")
    }
}
