//! Error types for the drag engine, configuration, and DOM host.
//!
//! None of these ever reach the page user: the tool is best-effort and visual.
//! They exist so that misuse of the session state machine and failures of the
//! browser bindings are reported through the log instead of being swallowed.

use crate::page::ElementId;

/// Machine-readable code for log lines, one per variant.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DragError {
    #[error("drag session already active for {target}")]
    SessionActive { target: ElementId },
    #[error("no drag session is active")]
    NoSession,
}

impl ErrorCode for DragError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SessionActive { .. } => "E_SESSION_ACTIVE",
            Self::NoSession => "E_NO_SESSION",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "E_CONFIG_PARSE",
            Self::Invalid { .. } => "E_CONFIG_INVALID",
        }
    }
}

/// Failures of the browser bindings. `Js` carries the debug rendering of the
/// thrown `JsValue`, since `JsValue` itself is neither `Send` nor `Error`.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("configuration rejected: {0}")]
    Config(#[from] ConfigError),
    #[error("javascript error: {0}")]
    Js(String),
}

impl ErrorCode for HostError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoWindow => "E_NO_WINDOW",
            Self::NoDocument => "E_NO_DOCUMENT",
            Self::NoBody => "E_NO_BODY",
            Self::Config(inner) => inner.error_code(),
            Self::Js(_) => "E_JS",
        }
    }
}

impl From<wasm_bindgen::JsValue> for HostError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

impl From<HostError> for wasm_bindgen::JsValue {
    fn from(err: HostError) -> Self {
        wasm_bindgen::JsValue::from_str(&format!("{}: {err}", err.error_code()))
    }
}
