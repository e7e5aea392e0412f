//! 医院管理引擎
//!
//! 协调分诊队列、治疗记录和科室目录，维护"当前治疗患者"指针的一致性

use crate::{
    directory::{SpecializationDirectory, SpecializationNode},
    ledger::TreatmentLedger,
    queue::TriageQueue,
};
use hms_core::{
    utils::{is_blank, is_valid_patient_id},
    HmsError, PatientId, PatientQueueEntry, PatientStatus, Result, TreatmentStep,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 默认医院名称
pub const DEFAULT_HOSPITAL_NAME: &str = "City General Hospital";

/// 启动时预置的演示患者 (姓名, 病情)
const DEMO_PATIENTS: &[(&str, &str)] = &[("Alice Johnson", "Severe fever"), ("Bob Davis", "Broken arm")];

/// 引擎选项
#[derive(Debug, Clone)]
pub struct HospitalOptions {
    pub hospital_name: String,
    /// 启动时预置演示患者
    pub seed_demo_patients: bool,
    /// 在治疗记录上保留患者姓名；关闭时离队患者的姓名以占位符显示
    pub retain_patient_names: bool,
}

impl Default for HospitalOptions {
    fn default() -> Self {
        Self {
            hospital_name: DEFAULT_HOSPITAL_NAME.to_string(),
            seed_demo_patients: true,
            retain_patient_names: true,
        }
    }
}

/// 当前正在治疗的患者
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentPatient {
    pub id: PatientId,
    pub name: String,
    pub condition: String,
}

/// 医院管理引擎
///
/// 所有外部调用只经过本结构体；治疗位要么为空，要么指向状态为"治疗中"的记录
#[derive(Debug)]
pub struct HospitalManagementSystem {
    options: HospitalOptions,
    queue: TriageQueue,
    records: HashMap<PatientId, TreatmentLedger>,
    directory: SpecializationDirectory,
    current: Option<CurrentPatient>,
}

impl HospitalManagementSystem {
    /// 创建新的管理引擎
    pub fn new(options: HospitalOptions) -> Self {
        let directory = SpecializationDirectory::new(&options.hospital_name);
        let mut system = Self {
            options,
            queue: TriageQueue::new(),
            records: HashMap::new(),
            directory,
            current: None,
        };

        if system.options.seed_demo_patients {
            for (name, condition) in DEMO_PATIENTS {
                system.admit(name, condition);
            }
        }

        tracing::info!(
            "Hospital management system ready for {} ({} patients waiting)",
            system.options.hospital_name,
            system.queue.size()
        );
        system
    }

    /// 登记患者：入队并创建候诊状态的治疗记录
    pub fn register_patient(&mut self, name: &str, condition: &str) -> Result<PatientId> {
        if is_blank(Some(name)) || is_blank(Some(condition)) {
            return Err(HmsError::Validation("Missing name or condition.".to_string()));
        }

        let id = self.admit(name, condition);
        tracing::info!("Patient {} registered to triage queue as {}", name, id);
        Ok(id)
    }

    fn admit(&mut self, name: &str, condition: &str) -> PatientId {
        let entry = self.queue.enqueue(name, condition);
        let mut ledger = TreatmentLedger::new(entry.id.clone(), condition);
        if self.options.retain_patient_names {
            ledger = ledger.with_name(name);
        }
        self.records.insert(entry.id.clone(), ledger);
        entry.id
    }

    /// 开始治疗队首患者
    ///
    /// 先清空治疗位；队列为空时返回 None，治疗位保持为空
    pub fn treat_next_patient(&mut self) -> Option<PatientId> {
        self.current = None;

        let Some(entry) = self.queue.dequeue() else {
            tracing::info!("Triage queue is empty; no patient to treat");
            return None;
        };

        let retain_name = self.options.retain_patient_names;
        let ledger = self.records.entry(entry.id.clone()).or_insert_with(|| {
            tracing::warn!("Patient {} had no treatment record; creating one", entry.id);
            let ledger = TreatmentLedger::new(entry.id.clone(), &entry.condition);
            if retain_name {
                ledger.with_name(&entry.name)
            } else {
                ledger
            }
        });
        ledger.status = PatientStatus::InTreatment;
        ledger.push(&format!("Initial Triage for {}.", entry.condition));

        tracing::info!(
            "Started treating patient {} ({} remaining in queue)",
            entry.id,
            self.queue.size()
        );

        let PatientQueueEntry { id, name, condition } = entry;
        self.current = Some(CurrentPatient {
            id: id.clone(),
            name,
            condition,
        });
        Some(id)
    }

    /// 没有正在治疗的患者且队列非空时，自动开始治疗下一位
    pub fn ensure_patient_in_treatment(&mut self) -> Option<PatientId> {
        if self.current.is_none() && !self.queue.is_empty() {
            self.treat_next_patient();
        }
        self.current.as_ref().map(|current| current.id.clone())
    }

    /// 为当前患者记录治疗步骤
    pub fn add_treatment_step(&mut self, detail: &str) -> Result<()> {
        let ledger = self.current_ledger_mut()?;
        ledger.push(detail);
        tracing::info!("Treatment step recorded for patient {}", ledger.patient_id());
        Ok(())
    }

    /// 撤销当前患者最近一次治疗步骤
    ///
    /// 历史为空时返回 `Ok(None)`
    pub fn undo_last_treatment(&mut self) -> Result<Option<TreatmentStep>> {
        let ledger = self.current_ledger_mut()?;
        let undone = ledger.pop();
        match &undone {
            Some(step) => tracing::info!(
                "Undid treatment step '{}' for patient {}",
                step.detail,
                ledger.patient_id()
            ),
            None => tracing::info!("Nothing to undo for patient {}", ledger.patient_id()),
        }
        Ok(undone)
    }

    /// 为当前患者指定医生
    pub fn assign_doctor_to_current(&mut self, doctor_name: &str) -> Result<()> {
        if is_blank(Some(doctor_name)) {
            return Err(HmsError::missing_field("doctor_name"));
        }

        let ledger = self.current_ledger_mut()?;
        ledger.assigned_doctor = Some(doctor_name.to_string());
        tracing::info!("Doctor {} assigned to patient {}", doctor_name, ledger.patient_id());
        Ok(())
    }

    fn current_ledger_mut(&mut self) -> Result<&mut TreatmentLedger> {
        let current = self.current.as_ref().ok_or_else(HmsError::no_current_patient)?;
        self.records.get_mut(&current.id).ok_or_else(|| {
            HmsError::Internal(format!("Treatment record for patient {} is missing", current.id))
        })
    }

    fn current_ledger(&self) -> Option<&TreatmentLedger> {
        self.current
            .as_ref()
            .and_then(|current| self.records.get(&current.id))
    }

    /// 系统状态快照
    pub fn status_snapshot(&self) -> StatusSnapshot {
        let ledger = self.current_ledger();

        StatusSnapshot {
            queue_size: self.queue.size(),
            queue_data: self.queue.list(),
            current_patient_id: self.current.as_ref().map(|c| c.id.clone()),
            current_patient_name: self.current.as_ref().map(|c| c.name.clone()),
            current_patient_condition: self.current.as_ref().map(|c| c.condition.clone()),
            assigned_doctor: ledger.and_then(|l| l.assigned_doctor.clone()),
            history_data: ledger.map(|l| l.history().to_vec()).unwrap_or_default(),
        }
    }

    /// 科室树
    pub fn specialization_tree(&self) -> SpecializationTreeData {
        SpecializationTreeData {
            tree_data: self.directory.root().clone(),
        }
    }

    /// 按名称获取科室子树
    pub fn specialization(&self, name: &str) -> Result<SpecializationNode> {
        self.directory
            .find(name)
            .cloned()
            .ok_or_else(|| HmsError::NotFound(format!("Specialization {} not found", name)))
    }

    /// 在目录中添加专科
    pub fn add_specialization(&mut self, parent_name: &str, child_name: &str) -> Result<()> {
        if is_blank(Some(parent_name)) || is_blank(Some(child_name)) {
            return Err(HmsError::Validation("Missing parent or specialization name.".to_string()));
        }
        if !self.directory.add_specialization(parent_name, child_name) {
            return Err(HmsError::NotFound(format!("Specialization {} not found", parent_name)));
        }
        tracing::info!("Specialization {} added under {}", child_name, parent_name);
        Ok(())
    }

    /// 在目录中为科室登记医生
    pub fn assign_specialist(&mut self, specialization_name: &str, doctor_name: &str, description: &str) -> Result<()> {
        if is_blank(Some(specialization_name)) || is_blank(Some(doctor_name)) {
            return Err(HmsError::Validation("Missing specialization or doctor name.".to_string()));
        }
        if !self.directory.assign_doctor(specialization_name, doctor_name, description) {
            return Err(HmsError::NotFound(format!(
                "Specialization {} not found",
                specialization_name
            )));
        }
        tracing::info!("Doctor {} listed under {}", doctor_name, specialization_name);
        Ok(())
    }

    /// 按标识获取患者完整记录
    pub fn patient_record(&self, patient_id: &PatientId) -> Result<PatientRecord> {
        let not_found = || HmsError::NotFound("Patient record not found.".to_string());
        if !is_valid_patient_id(patient_id.as_str()) {
            tracing::debug!("Rejected malformed patient id {}", patient_id);
            return Err(not_found());
        }
        let ledger = self.records.get(patient_id).ok_or_else(not_found)?;

        let registration_time = ledger
            .first_step()
            .map(|step| step.formatted_timestamp())
            .unwrap_or_else(|| UNKNOWN_REGISTRATION_TIME.to_string());

        Ok(PatientRecord {
            id: patient_id.clone(),
            name: self.patient_name(patient_id, ledger),
            full_visits: vec![PatientVisit {
                registration_time,
                condition: ledger.initial_condition().to_string(),
                status: ledger.status,
                assigned_doctor: ledger.assigned_doctor.clone(),
                treatment_history: ledger.history().to_vec(),
            }],
        })
    }

    /// 姓名解析顺序：队列、治疗记录、占位符
    fn patient_name(&self, patient_id: &PatientId, ledger: &TreatmentLedger) -> String {
        self.queue
            .find(patient_id)
            .map(|entry| entry.name.clone())
            .or_else(|| ledger.patient_name().map(str::to_string))
            .unwrap_or_else(|| format!("Patient {}", patient_id))
    }

    pub fn current_patient(&self) -> Option<&CurrentPatient> {
        self.current.as_ref()
    }

    pub fn ledger(&self, patient_id: &PatientId) -> Option<&TreatmentLedger> {
        self.records.get(patient_id)
    }

    pub fn queue_size(&self) -> usize {
        self.queue.size()
    }

    pub fn hospital_name(&self) -> &str {
        &self.options.hospital_name
    }
}

impl Default for HospitalManagementSystem {
    fn default() -> Self {
        Self::new(HospitalOptions::default())
    }
}

/// 尚无治疗历史时的登记时间
pub const UNKNOWN_REGISTRATION_TIME: &str = "N/A";

/// 系统状态快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub queue_size: usize,
    pub queue_data: Vec<PatientQueueEntry>,
    pub current_patient_id: Option<PatientId>,
    pub current_patient_name: Option<String>,
    pub current_patient_condition: Option<String>,
    pub assigned_doctor: Option<String>,
    pub history_data: Vec<TreatmentStep>,
}

/// 科室树响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecializationTreeData {
    pub tree_data: SpecializationNode,
}

/// 患者完整记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: PatientId,
    pub name: String,
    pub full_visits: Vec<PatientVisit>,
}

/// 单次就诊
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientVisit {
    pub registration_time: String,
    pub condition: String,
    pub status: PatientStatus,
    pub assigned_doctor: Option<String>,
    pub treatment_history: Vec<TreatmentStep>,
}
