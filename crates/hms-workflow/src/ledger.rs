//! 治疗记录
//!
//! 每位患者一份，按后进先出管理治疗步骤，支持撤销最近一步

use hms_core::{PatientId, PatientStatus, TreatmentStep};

/// 患者治疗记录
#[derive(Debug, Clone)]
pub struct TreatmentLedger {
    patient_id: PatientId,
    patient_name: Option<String>,
    initial_condition: String,
    pub status: PatientStatus,
    pub assigned_doctor: Option<String>,
    steps: Vec<TreatmentStep>,
}

impl TreatmentLedger {
    /// 创建新的治疗记录（候诊状态，历史为空）
    pub fn new(patient_id: PatientId, initial_condition: &str) -> Self {
        Self {
            patient_id,
            patient_name: None,
            initial_condition: initial_condition.to_string(),
            status: PatientStatus::Waiting,
            assigned_doctor: None,
            steps: Vec::new(),
        }
    }

    /// 在记录上保留患者姓名
    pub fn with_name(mut self, name: &str) -> Self {
        self.patient_name = Some(name.to_string());
        self
    }

    /// 压入一条治疗步骤，时间戳取当前时间
    pub fn push(&mut self, detail: &str) -> &TreatmentStep {
        self.steps.push(TreatmentStep::now(detail));
        tracing::debug!(
            "Recorded treatment step for patient {} (history length {})",
            self.patient_id,
            self.steps.len()
        );
        &self.steps[self.steps.len() - 1]
    }

    /// 弹出最近一条治疗步骤；历史为空时返回 None
    pub fn pop(&mut self) -> Option<TreatmentStep> {
        self.steps.pop()
    }

    /// 治疗历史，按时间从早到晚
    pub fn history(&self) -> &[TreatmentStep] {
        &self.steps
    }

    /// 最早的一条治疗步骤
    pub fn first_step(&self) -> Option<&TreatmentStep> {
        self.steps.first()
    }

    pub fn patient_id(&self) -> &PatientId {
        &self.patient_id
    }

    pub fn patient_name(&self) -> Option<&str> {
        self.patient_name.as_deref()
    }

    pub fn initial_condition(&self) -> &str {
        &self.initial_condition
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
