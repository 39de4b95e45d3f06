//! CLI 配置
//!
//! 日志配置：全局级别加上按子系统覆盖

use mop_config::Subsystem;
use std::collections::HashMap;
use tracing::Level;

/// CLI 日志配置
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub global: Level,
    pub subsystems: HashMap<Subsystem, Level>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: Level::WARN,
            subsystems: HashMap::new(),
        }
    }
}

impl LogConfig {
    /// Build from the project file's `log_level` and per-subsystem `log` map
    pub fn from_project(
        log_level: Option<&str>,
        overrides: &HashMap<String, String>,
    ) -> Result<Self, String> {
        let mut config = Self::default();
        if let Some(level) = log_level {
            config.global =
                parse_log_level(level).ok_or_else(|| format!("unknown log level '{level}'"))?;
        }
        for (name, level) in overrides {
            let subsystem = Subsystem::from_name(name)
                .ok_or_else(|| format!("unknown log subsystem '{name}'"))?;
            let level =
                parse_log_level(level).ok_or_else(|| format!("unknown log level '{level}'"))?;
            config.subsystems.insert(subsystem, level);
        }
        Ok(config)
    }

    /// Get log level for a specific target
    pub fn level_for(&self, target: &str) -> Level {
        Subsystem::ALL
            .into_iter()
            .find(|s| s.target() == target)
            .and_then(|s| self.subsystems.get(&s).copied())
            .unwrap_or(self.global)
    }
}

/// Parse log level string; "silent" keeps errors only
pub fn parse_log_level(s: &str) -> Option<Level> {
    match s.to_lowercase().as_str() {
        "silent" | "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}
