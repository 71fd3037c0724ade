//! 测试套件模块

pub mod auth;
pub mod confirmation;
pub mod selection;
