//! HTTP处理器

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use hms_core::{utils::is_blank, HmsError, PatientId};
use hms_workflow::{PatientRecord, SpecializationNode, SpecializationTreeData, StatusSnapshot};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{error::ApiError, state::AppState};

type ApiResult<T> = std::result::Result<T, ApiError>;

/// 请求体解析结果；解析失败由 [`ApiError`] 转为验证错误
type Payload<T> = std::result::Result<Json<T>, JsonRejection>;

/// 响应类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Success,
    Info,
    Error,
}

/// 操作结果消息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    pub status: MessageStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<PatientId>,
}

impl ApiMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: MessageStatus::Success,
            message: message.into(),
            patient_id: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            status: MessageStatus::Info,
            message: message.into(),
            patient_id: None,
        }
    }

    pub fn with_patient(mut self, patient_id: PatientId) -> Self {
        self.patient_id = Some(patient_id);
        self
    }
}

/// 登记请求
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub condition: Option<String>,
}

/// 治疗步骤请求
#[derive(Debug, Deserialize)]
pub struct TreatmentRequest {
    pub detail: Option<String>,
}

/// 指定医生请求
#[derive(Debug, Deserialize)]
pub struct AssignDoctorRequest {
    pub doctor_name: Option<String>,
}

/// 新增专科请求
#[derive(Debug, Deserialize)]
pub struct AddSpecializationRequest {
    pub parent: Option<String>,
    pub name: Option<String>,
}

/// 科室医生登记请求
#[derive(Debug, Deserialize)]
pub struct AddSpecialistRequest {
    pub specialization: Option<String>,
    pub doctor_name: Option<String>,
    pub description: Option<String>,
}

/// API根路径处理器
pub async fn api_root(State(state): State<AppState>) -> impl IntoResponse {
    let hms = state.hms.read().await;
    Json(json!({
        "service": "HMS Triage API",
        "hospital": hms.hospital_name(),
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "health": "/health",
            "api": "/api",
            "metrics": "/metrics"
        }
    }))
}

/// 健康检查处理器
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// 队列、当前患者和治疗历史
pub async fn get_status(State(state): State<AppState>) -> Json<StatusSnapshot> {
    let hms = state.hms.read().await;
    Json(hms.status_snapshot())
}

/// 登记患者（入队）
pub async fn register_patient(
    State(state): State<AppState>,
    payload: Payload<RegisterRequest>,
) -> ApiResult<Json<ApiMessage>> {
    let Json(request) = payload?;
    let (Some(name), Some(condition)) = (request.name, request.condition) else {
        return Err(HmsError::Validation("Missing name or condition.".to_string()).into());
    };

    let mut hms = state.hms.write().await;
    let patient_id = hms.register_patient(&name, &condition)?;
    state.metrics.record_registration();
    state.metrics.set_queue_size(hms.queue_size());

    Ok(Json(
        ApiMessage::success(format!("Patient {} registered to Triage queue.", name))
            .with_patient(patient_id),
    ))
}

/// 开始治疗下一位患者（出队）
pub async fn treat_next(State(state): State<AppState>) -> Json<ApiMessage> {
    let mut hms = state.hms.write().await;
    let treated = hms.treat_next_patient();
    state.metrics.set_queue_size(hms.queue_size());

    match treated {
        Some(patient_id) => {
            state.metrics.record_treatment_started();
            Json(
                ApiMessage::success(format!("Started treating patient ID: {}", patient_id))
                    .with_patient(patient_id),
            )
        }
        None => Json(ApiMessage::info("Queue is empty. No patient to treat.")),
    }
}

/// 进入工作台：无人治疗时自动开始治疗队首患者
pub async fn open_dashboard(State(state): State<AppState>) -> Json<ApiMessage> {
    let mut hms = state.hms.write().await;
    let had_current = hms.current_patient().is_some();
    let current = hms.ensure_patient_in_treatment();
    state.metrics.set_queue_size(hms.queue_size());

    match current {
        Some(patient_id) => {
            if !had_current {
                state.metrics.record_treatment_started();
            }
            Json(
                ApiMessage::success(format!("Patient ID {} is in treatment.", patient_id))
                    .with_patient(patient_id),
            )
        }
        None => Json(ApiMessage::info("Queue is empty. No patient to treat.")),
    }
}

/// 记录治疗步骤（压栈）
pub async fn add_treatment(
    State(state): State<AppState>,
    payload: Payload<TreatmentRequest>,
) -> ApiResult<Json<ApiMessage>> {
    let mut hms = state.hms.write().await;
    if hms.current_patient().is_none() {
        return Err(HmsError::no_current_patient().into());
    }
    let Json(request) = payload?;
    let detail = request.detail.unwrap_or_default();

    hms.add_treatment_step(&detail)?;
    state.metrics.record_treatment_step();

    Ok(Json(ApiMessage::success("Treatment step recorded.")))
}

/// 撤销最近一次治疗步骤（出栈）
pub async fn undo_treatment(State(state): State<AppState>) -> ApiResult<Json<ApiMessage>> {
    let mut hms = state.hms.write().await;
    match hms.undo_last_treatment()? {
        Some(_) => {
            state.metrics.record_undo();
            Ok(Json(ApiMessage::info("Last treatment step successfully undone.")))
        }
        None => Ok(Json(ApiMessage::info(
            "Treatment history is empty. Nothing to undo.",
        ))),
    }
}

/// 为当前患者指定医生
pub async fn assign_doctor(
    State(state): State<AppState>,
    payload: Payload<AssignDoctorRequest>,
) -> ApiResult<Json<ApiMessage>> {
    let Json(request) = payload?;
    let doctor_name = request
        .doctor_name
        .ok_or_else(|| HmsError::missing_field("doctor_name"))?;

    let mut hms = state.hms.write().await;
    hms.assign_doctor_to_current(&doctor_name)?;

    Ok(Json(ApiMessage::success(format!(
        "Doctor {} assigned to current patient.",
        doctor_name
    ))))
}

/// 科室树
pub async fn get_specializations(State(state): State<AppState>) -> Json<SpecializationTreeData> {
    let hms = state.hms.read().await;
    Json(hms.specialization_tree())
}

/// 单个科室子树
pub async fn get_specialization(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<SpecializationNode>> {
    let hms = state.hms.read().await;
    Ok(Json(hms.specialization(&name)?))
}

/// 新增专科
pub async fn add_specialization(
    State(state): State<AppState>,
    payload: Payload<AddSpecializationRequest>,
) -> ApiResult<(StatusCode, Json<ApiMessage>)> {
    let Json(request) = payload?;
    let parent = request.parent.unwrap_or_default();
    let name = request.name.unwrap_or_default();

    let mut hms = state.hms.write().await;
    hms.add_specialization(&parent, &name)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiMessage::success(format!("Specialization {} added under {}.", name, parent))),
    ))
}

/// 为科室登记医生
pub async fn add_specialist(
    State(state): State<AppState>,
    payload: Payload<AddSpecialistRequest>,
) -> ApiResult<Json<ApiMessage>> {
    let Json(request) = payload?;
    if is_blank(request.specialization.as_deref()) || is_blank(request.doctor_name.as_deref()) {
        return Err(HmsError::Validation("Missing specialization or doctor name.".to_string()).into());
    }
    let specialization = request.specialization.unwrap_or_default();
    let doctor_name = request.doctor_name.unwrap_or_default();
    let description = request.description.unwrap_or_default();

    let mut hms = state.hms.write().await;
    hms.assign_specialist(&specialization, &doctor_name, &description)?;

    Ok(Json(ApiMessage::success(format!(
        "Doctor {} listed under {}.",
        doctor_name, specialization
    ))))
}

/// 患者完整记录
pub async fn get_patient_record(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> ApiResult<Json<PatientRecord>> {
    info!("Fetching patient record {}", patient_id);
    let hms = state.hms.read().await;
    Ok(Json(hms.patient_record(&PatientId::from(patient_id))?))
}

/// Prometheus 指标
pub async fn metrics(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let body = state
        .metrics
        .render()
        .map_err(|e| HmsError::Internal(e.to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    ))
}
