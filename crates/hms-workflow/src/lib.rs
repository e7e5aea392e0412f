//! # HMS工作流模块
//!
//! 提供医院前台分诊的核心工作流，包括：
//! - 分诊队列：候诊患者按到达顺序排队
//! - 治疗记录：每位患者的治疗步骤，支持撤销
//! - 科室目录：以医院为根的科室与医生层级
//! - 管理引擎：协调以上三者并维护当前治疗患者

pub mod directory;
pub mod engine;
pub mod ledger;
pub mod queue;

// 重新导出主要类型
pub use directory::{Doctor, SpecializationDirectory, SpecializationNode};
pub use engine::{
    CurrentPatient, HospitalManagementSystem, HospitalOptions, PatientRecord, PatientVisit,
    SpecializationTreeData, StatusSnapshot, DEFAULT_HOSPITAL_NAME,
};
pub use ledger::TreatmentLedger;
pub use queue::TriageQueue;
