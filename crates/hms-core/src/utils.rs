//! 通用工具函数

use chrono::{Local, NaiveDateTime, SubsecRound};
use uuid::Uuid;

/// 患者标识长度
pub const PATIENT_ID_LEN: usize = 8;

/// 生成短患者标识（UUID v4 的前 8 位十六进制字符）
pub fn generate_patient_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(PATIENT_ID_LEN);
    id
}

/// 验证患者标识格式
pub fn is_valid_patient_id(id: &str) -> bool {
    id.len() == PATIENT_ID_LEN && id.chars().all(|c| c.is_ascii_hexdigit())
}

/// 当前本地时间，截断到秒
pub fn now_timestamp() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// 判断必填字段是否缺失（空或仅包含空白）
pub fn is_blank(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}

/// 治疗记录时间戳的 serde 格式
pub mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&timestamp.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_generate_patient_id() {
        let id = generate_patient_id();
        assert!(is_valid_patient_id(&id));
        assert_ne!(generate_patient_id(), generate_patient_id());
    }

    #[test]
    fn test_is_valid_patient_id() {
        assert!(is_valid_patient_id("0a1b2c3d"));
        assert!(!is_valid_patient_id(""));
        assert!(!is_valid_patient_id("not-an-id"));
    }

    #[test]
    fn test_now_timestamp_has_second_precision() {
        assert_eq!(now_timestamp().nanosecond(), 0);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("   ")));
        assert!(!is_blank(Some("Carol")));
    }
}
