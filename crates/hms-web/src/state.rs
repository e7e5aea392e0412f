//! 共享应用状态

use hms_admin::HmsMetrics;
use hms_workflow::HospitalManagementSystem;
use std::sync::Arc;
use tokio::sync::RwLock;

/// 请求处理器共享的状态
///
/// 管理引擎由单个读写锁保护，所有修改操作串行执行
#[derive(Clone)]
pub struct AppState {
    pub hms: Arc<RwLock<HospitalManagementSystem>>,
    pub metrics: HmsMetrics,
}

impl AppState {
    pub fn new(hms: HospitalManagementSystem, metrics: HmsMetrics) -> Self {
        metrics.set_queue_size(hms.queue_size());
        Self {
            hms: Arc::new(RwLock::new(hms)),
            metrics,
        }
    }
}
