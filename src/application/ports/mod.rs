//! Application Ports - 出站端口

mod repositories;

pub use repositories::*;
