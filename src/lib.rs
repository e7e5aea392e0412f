//! # HMS
//!
//! 医院前台分诊管理系统的聚合入口，重新导出核心模型与工作流引擎，供演示程序使用。

pub use hms_core;
pub use hms_workflow;
