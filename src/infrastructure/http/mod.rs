//! HTTP Infrastructure - RESTful API
//!
//! 显式路由表 + 类型化请求/响应结构，错误在 handler 边界翻译为
//! HTTP 状态码和 `{"error": "<message>"}` 响应体

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
