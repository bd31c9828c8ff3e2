//! # Core Module / 核心模块
//!
//! This module contains the core functionality of the launcher: the environment
//! snapshot, configuration, Java runtime checks, classpath discovery and the
//! launch configuration resolver.
//!
//! 此模块包含启动器的核心功能：环境快照、配置、Java 运行时检查、
//! classpath 发现以及启动配置解析器。

pub mod classpath;
pub mod config;
pub mod discovery;
pub mod env;
pub mod error;
pub mod java;
pub mod models;
pub mod resolver;

// Re-exports
pub use config::LauncherConfig;
pub use env::LaunchEnv;
pub use error::LaunchError;
pub use models::{LaunchMode, LaunchPlan};
pub use resolver::resolve;
