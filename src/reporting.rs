//! # Reporting Module / 报告模块
//!
//! This module renders launch plans, notices and errors for the user, either as
//! colorful localized console output or as machine-readable JSON.
//!
//! 此模块为用户呈现启动计划、提示和错误，
//! 可以是带颜色的本地化控制台输出，也可以是机器可读的 JSON。

pub mod console;
pub mod json;

// Re-export common reporting functions
pub use console::{print_launch_error, print_notices, print_plan};
pub use json::{plan_report, print_plan_json};
