//! API 层配置
//!
//! 包含运行配置 RunConfig 和全局单例（供 CLI 使用）

use mop_config::{CacheConfig, LimitConfig, MopConfig};
use once_cell::sync::OnceCell;

/// Load configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Limits applied while building classes
    pub limits: LimitConfig,
    /// Archive cache options
    pub cache: CacheConfig,
    /// Stop at the first unit that fails to load
    pub stop_on_error: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            limits: LimitConfig::default(),
            cache: CacheConfig::default(),
            stop_on_error: true,
        }
    }
}

impl RunConfig {
    /// Build from the shared configuration vocabulary
    pub fn from_config(config: &MopConfig) -> Self {
        Self {
            limits: config.limits.clone(),
            cache: config.cache.clone(),
            ..Self::default()
        }
    }
}

// Global config singleton for CLI convenience
static GLOBAL_CONFIG: OnceCell<RunConfig> = OnceCell::new();

/// Initialize global configuration once; a second call hands its config back
pub fn init(config: RunConfig) -> Result<(), RunConfig> {
    GLOBAL_CONFIG.set(config)
}

/// Global config, initializing it with defaults if needed
pub fn config_or_default() -> &'static RunConfig {
    GLOBAL_CONFIG.get_or_init(RunConfig::default)
}
