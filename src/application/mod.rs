//! Application Layer - 应用层
//!
//! 定义出站端口（Repository 抽象），具体实现在 infrastructure 层

pub mod ports;

pub use ports::*;
