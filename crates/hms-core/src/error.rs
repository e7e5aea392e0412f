//! 错误定义模块

use thiserror::Error;

/// 分诊系统统一错误类型
#[derive(Error, Debug)]
pub enum HmsError {
    #[error("验证错误: {0}")]
    Validation(String),

    /// 操作需要当前正在治疗的患者，但治疗位为空
    #[error("操作不允许: {0}")]
    NotPermitted(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("系统内部错误: {0}")]
    Internal(String),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

impl HmsError {
    /// 缺少必填字段时的验证错误
    pub fn missing_field(field: &str) -> Self {
        HmsError::Validation(format!("Missing required field: {}", field))
    }

    /// 没有当前患者时的前置条件错误
    pub fn no_current_patient() -> Self {
        HmsError::NotPermitted("No patient currently selected for treatment.".to_string())
    }
}

/// 分诊系统统一结果类型
pub type Result<T> = std::result::Result<T, HmsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_detail() {
        let err = HmsError::missing_field("name");
        assert!(matches!(err, HmsError::Validation(_)));
        assert!(err.to_string().contains("name"));

        let err = HmsError::no_current_patient();
        assert!(matches!(err, HmsError::NotPermitted(_)));
    }
}
