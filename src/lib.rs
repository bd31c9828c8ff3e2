//! # TF Launcher Library / TF 启动器库
//!
//! This library resolves everything needed to start the Trade Federation test
//! harness on a JVM: which `java` to run, whether its version is acceptable,
//! the ordered classpath of harness jars, and the JVM flags derived from the
//! process environment.
//!
//! 此库负责解析在 JVM 上启动 Trade Federation 测试框架所需的一切：
//! 使用哪个 `java`、其版本是否可接受、框架 jar 的有序 classpath，
//! 以及从进程环境推导出的 JVM 参数。
//!
//! ## Modules / 模块
//!
//! - `core` - Environment snapshot, configuration, discovery and the resolver
//! - `infra` - Process spawning and file system helpers
//! - `reporting` - Console and JSON rendering of plans, notices and errors
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 环境快照、配置、发现逻辑与解析器
//! - `infra` - 进程派生与文件系统辅助功能
//! - `reporting` - 启动计划、提示和错误的控制台与 JSON 输出
//! - `cli` - 命令行接口和命令

pub mod core;
pub mod infra;
pub mod reporting;
pub mod cli;

// Re-export commonly used items
pub use core::config;
pub use core::error::LaunchError;
pub use core::models;
pub use core::resolver;

/// Initializes the application's internationalization (i18n) based on the system locale.
///
/// This function detects the user's system locale and sets the appropriate
/// language for the application's user interface. It attempts to match the full
/// locale (e.g., "zh-CN"), then just the language code (e.g., "en"), and
/// finally falls back to the default language ("en").
pub fn init() {
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    rust_i18n::set_locale(&match_locale(&locale));
}

/// Maps a requested locale onto one of the bundled locales.
/// 将请求的语言区域映射到内置的语言区域之一。
pub fn match_locale(requested: &str) -> String {
    let available_locales = rust_i18n::available_locales!();

    if available_locales.contains(&requested) {
        return requested.to_string();
    }
    requested
        .split(['-', '_'])
        .next()
        .and_then(|lang_code| {
            available_locales
                .iter()
                .find(|available| available.split('-').next() == Some(lang_code))
        })
        .map(|lang| lang.to_string())
        .unwrap_or_else(|| "en".to_string())
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
