//! # HMS Web
//!
//! 分诊系统的 HTTP 接口层，所有请求经由共享的管理引擎处理

pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{create_app, RouterOptions, WebServer};
pub use state::AppState;
