//! 核心数据模型定义

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::timestamp_format;

/// 患者标识（短随机令牌，进程内唯一）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(String);

impl PatientId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PatientId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PatientId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// 分诊队列中的患者条目，创建后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientQueueEntry {
    pub id: PatientId,
    pub name: String,
    pub condition: String,
}

/// 患者状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PatientStatus {
    Waiting, // 候诊
    #[serde(rename = "In Treatment")]
    InTreatment, // 治疗中
}

impl PatientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Waiting => "Waiting",
            PatientStatus::InTreatment => "In Treatment",
        }
    }
}

impl Default for PatientStatus {
    fn default() -> Self {
        PatientStatus::Waiting
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 治疗步骤记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentStep {
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub detail: String,
}

impl TreatmentStep {
    /// 以当前时间创建治疗步骤（精确到秒）
    pub fn now(detail: impl Into<String>) -> Self {
        Self {
            timestamp: crate::utils::now_timestamp(),
            detail: detail.into(),
        }
    }

    /// 按 `YYYY-MM-DD HH:MM:SS` 格式输出时间戳
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(timestamp_format::FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_serializes_display_names() {
        assert_eq!(
            serde_json::to_value(PatientStatus::InTreatment).unwrap(),
            json!("In Treatment")
        );
        assert_eq!(serde_json::to_value(PatientStatus::Waiting).unwrap(), json!("Waiting"));
        assert_eq!(PatientStatus::default(), PatientStatus::Waiting);
    }

    #[test]
    fn test_queue_entry_shape() {
        let entry = PatientQueueEntry {
            id: PatientId::from("a1b2c3d4"),
            name: "Alice Johnson".to_string(),
            condition: "Severe fever".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"id": "a1b2c3d4", "name": "Alice Johnson", "condition": "Severe fever"})
        );
    }

    #[test]
    fn test_treatment_step_timestamp_format() {
        let step = TreatmentStep {
            timestamp: NaiveDateTime::parse_from_str("2024-03-01 08:15:42", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            detail: "Administered medication".to_string(),
        };
        assert_eq!(step.formatted_timestamp(), "2024-03-01 08:15:42");

        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(value["timestamp"], json!("2024-03-01 08:15:42"));

        let parsed: TreatmentStep = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, step);
    }
}
