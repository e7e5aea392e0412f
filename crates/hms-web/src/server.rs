//! Web服务器

use axum::{
    routing::{get, post},
    Router,
};
use hms_core::Result;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::error::panic_response;
use crate::handlers::{
    add_specialist, add_specialization, add_treatment, api_root, assign_doctor, get_patient_record,
    get_specialization, get_specializations, get_status, health, metrics, open_dashboard,
    register_patient, treat_next, undo_treatment,
};
use crate::state::AppState;

/// 路由选项
#[derive(Debug, Clone, Copy)]
pub struct RouterOptions {
    pub enable_cors: bool,
    pub expose_metrics: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            enable_cors: true,
            expose_metrics: true,
        }
    }
}

/// 构建完整的应用路由
pub fn create_app(state: AppState, options: RouterOptions) -> Router {
    let mut app = Router::new()
        // 根路径
        .route("/", get(api_root))
        // 健康检查
        .route("/health", get(health))
        // API路由
        .nest("/api", api_routes());

    if options.expose_metrics {
        app = app.route("/metrics", get(metrics));
    }

    with_middleware(app.with_state(state), options.enable_cors)
}

/// 请求追踪、panic 捕获和可选的 CORS
fn with_middleware(app: Router, enable_cors: bool) -> Router {
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(panic_response)),
    );

    if enable_cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// API 路由
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(get_status))
        .route("/register", post(register_patient))
        .route("/treat_next", post(treat_next))
        .route("/dashboard/open", post(open_dashboard))
        .route("/add_treatment", post(add_treatment))
        .route("/undo_treatment", post(undo_treatment))
        .route("/assign_doctor", post(assign_doctor))
        .route("/specializations", get(get_specializations).post(add_specialization))
        .route("/specializations/doctors", post(add_specialist))
        .route("/specializations/:name", get(get_specialization))
        .route("/patient_record/:patient_id", get(get_patient_record))
}

pub struct WebServer {
    addr: SocketAddr,
    app: Router,
}

impl WebServer {
    pub fn new(addr: SocketAddr, state: AppState, options: RouterOptions) -> Self {
        let app = create_app(state, options);
        Self { addr, app }
    }

    pub async fn run(self) -> Result<()> {
        info!("Starting web server on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Web server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
