//! API 错误类型
//!
//! 统一核心层、缓存层与解码错误，并提供结构化错误报告。

use mop_cache::CacheError;
use mop_core::MopError;
use serde::Serialize;
use thiserror::Error;

/// Unified error type of the API layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MopApiError {
    /// Metaobject layer error
    #[error("{0}")]
    Core(#[from] MopError),

    /// Archive cache error
    #[error("{0}")]
    Cache(#[from] CacheError),

    /// A definition unit could not be decoded
    #[error("cannot decode {unit}: {message}")]
    Decode {
        unit: String,
        line: Option<usize>,
        column: Option<usize>,
        message: String,
    },

    /// Error while installing one unit
    #[error("{unit}: {source}")]
    InUnit {
        unit: String,
        #[source]
        source: Box<MopApiError>,
    },
}

impl MopApiError {
    pub(crate) fn decode(unit: &str, err: &serde_json::Error) -> Self {
        let (line, column) = if err.line() == 0 {
            (None, None)
        } else {
            (Some(err.line()), Some(err.column()))
        };
        MopApiError::Decode {
            unit: unit.to_string(),
            line,
            column,
            message: err.to_string(),
        }
    }

    pub(crate) fn in_unit(unit: &str, err: MopApiError) -> Self {
        match err {
            MopApiError::Decode { .. } | MopApiError::InUnit { .. } => err,
            other => MopApiError::InUnit {
                unit: unit.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// 获取错误阶段名称
    pub fn phase(&self) -> &'static str {
        match self {
            MopApiError::Core(_) => "core",
            MopApiError::Cache(_) => "cache",
            MopApiError::Decode { .. } => "decode",
            MopApiError::InUnit { source, .. } => source.phase(),
        }
    }

    /// The unit being loaded when the error happened
    pub fn unit(&self) -> Option<&str> {
        match self {
            MopApiError::Decode { unit, .. } | MopApiError::InUnit { unit, .. } => Some(unit),
            MopApiError::Cache(err) => Some(err.name()),
            MopApiError::Core(_) => None,
        }
    }

    fn error_kind(&self) -> String {
        match self {
            MopApiError::Core(err) => err.kind().to_string(),
            MopApiError::Cache(err) => match err {
                CacheError::NotFound { .. } => "not-found",
                CacheError::InvalidName { .. } => "invalid-name",
                CacheError::TooLarge { .. } => "too-large",
                CacheError::Io { .. } => "io",
            }
            .to_string(),
            MopApiError::Decode { .. } => "decode".to_string(),
            MopApiError::InUnit { source, .. } => source.error_kind(),
        }
    }

    /// 转换为结构化错误报告
    pub fn to_report(&self) -> ErrorReport {
        let (line, column) = match self {
            MopApiError::Decode { line, column, .. } => (*line, *column),
            _ => (None, None),
        };
        let message = match self {
            MopApiError::InUnit { source, .. } => source.to_string(),
            other => other.to_string(),
        };
        ErrorReport {
            phase: self.phase(),
            unit: self.unit().map(str::to_string),
            line,
            column,
            error_kind: self.error_kind(),
            message,
        }
    }
}

/// 结构化错误报告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    /// 错误阶段: core, cache, decode
    pub phase: &'static str,
    /// 出错的定义单元
    pub unit: Option<String>,
    /// 错误行号（1-based，如果有）
    pub line: Option<usize>,
    /// 错误列号（1-based，如果有）
    pub column: Option<usize>,
    /// 错误类型（可用于程序化处理）
    pub error_kind: String,
    /// 人类可读的错误消息
    pub message: String,
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.unit, self.line, self.column) {
            (Some(unit), Some(line), Some(col)) => write!(
                f,
                "[{}:{}:{}] {} error: {}",
                unit, line, col, self.phase, self.message
            ),
            (Some(unit), _, _) => write!(f, "[{}] {} error: {}", unit, self.phase, self.message),
            _ => write!(f, "{} error: {}", self.phase, self.message),
        }
    }
}

impl ErrorReport {
    /// JSON 格式（工具集成）
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{{\"phase\":\"{}\"}}", self.phase))
    }

    /// 简洁格式（适合终端）
    pub fn to_short(&self) -> String {
        format!("{}: {}", self.phase, self.message)
    }
}
