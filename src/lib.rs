//! Hive - 社交信息流 REST API
//!
//! 架构分层:
//!
//! 应用层 (application/):
//! - Ports: Repository 端口定义（每个实体一个仓储抽象）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API（显式路由表 + 类型化 DTO）
//! - Persistence: SQLite 存储实现

pub mod application;
pub mod config;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
