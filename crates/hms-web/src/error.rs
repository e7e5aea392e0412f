//! 错误响应映射

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hms_core::HmsError;
use serde_json::json;

/// HTTP 层错误，包装核心错误并决定响应状态码
#[derive(Debug)]
pub struct ApiError(pub HmsError);

impl From<HmsError> for ApiError {
    fn from(err: HmsError) -> Self {
        ApiError(err)
    }
}

/// 请求体缺失或无法解析时按验证错误处理
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(HmsError::Validation(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            HmsError::Validation(_) => StatusCode::BAD_REQUEST,
            HmsError::NotPermitted(_) => StatusCode::CONFLICT,
            HmsError::NotFound(_) => StatusCode::NOT_FOUND,
            HmsError::Internal(_) | HmsError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match &self.0 {
            HmsError::Validation(msg)
            | HmsError::NotPermitted(msg)
            | HmsError::NotFound(msg) => msg.clone(),
            other => {
                tracing::error!("Internal error: {}", other);
                "Internal server error.".to_string()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "status": "error",
            "message": self.message(),
        }));

        (status, body).into_response()
    }
}

/// 处理器内部 panic 时的统一响应
pub fn panic_response(_err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    tracing::error!("Request handler panicked");
    let body = Json(json!({
        "status": "error",
        "message": "Internal server error.",
    }));
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}
