//! CLI 日志系统初始化
//!
//! 基于 `tracing-subscriber` 实现按子系统的日志控制。

use crate::config::LogConfig;
use mop_config::Subsystem;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

/// Log target for the CLI itself
pub const TARGET_CLI: &str = "mop::cli";

/// 日志输出格式
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// 彩色格式化（开发使用）
    Pretty,
    /// 紧凑格式
    Compact,
    /// JSON 格式（工具集成）
    Json,
}

fn targets(log_config: &LogConfig) -> Targets {
    Subsystem::ALL
        .into_iter()
        .fold(Targets::new().with_default(log_config.global), |targets, s| {
            targets.with_target(s.target(), log_config.level_for(s.target()))
        })
        .with_target(TARGET_CLI, log_config.global)
}

/// 使用指定格式和日志配置初始化日志系统（输出到 stderr，可选同时写文件）
pub fn init_with_file<P: AsRef<Path>>(
    log_config: &LogConfig,
    format: LogFormat,
    file: Option<P>,
) -> Result<(), String> {
    let targets = targets(log_config);

    if let Some(path) = file {
        let path = path.as_ref();
        let file_handle = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| format!("cannot open log file '{}': {}", path.display(), e))?;

        let console_layer = create_format_layer(format, io::stderr).with_filter(targets.clone());
        let file_layer = fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file_handle))
            .with_filter(targets);

        tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer)
            .init();
    } else {
        let console_layer = create_format_layer(format, io::stderr).with_filter(targets);
        tracing_subscriber::registry().with(console_layer).init();
    }
    Ok(())
}

/// Create formatter layer based on format
fn create_format_layer<W, F>(
    format: LogFormat,
    make_writer: F,
) -> impl Layer<tracing_subscriber::Registry>
where
    W: io::Write + Send + Sync + 'static,
    F: Fn() -> W + Send + Sync + 'static,
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_timer(fmt::time::time())
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .without_time()
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_timer(fmt::time::time())
            .with_writer(make_writer)
            .boxed(),
    }
}
