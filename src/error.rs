//! Error types for each concern of the page. They stay typed inside the crate and
//! only become `JsValue` at the `#[wasm_bindgen]` boundary.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failure modes of a profile lookup.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The relay answered with a non-success HTTP status.
    #[error("API error: {status}")]
    Transport { status: u16 },
    /// The request never produced a response (rejected promise, CORS, offline).
    #[error("network request failed: {0}")]
    Network(String),
    /// The payload carried `success: false`.
    #[error("{message}")]
    Upstream { message: String },
    /// A required identity field was absent or empty.
    #[error("Invalid Discord data received (missing {missing})")]
    Validation { missing: &'static str },
    #[error("malformed lookup payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard is not available")]
    Unavailable,
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum DomError {
    #[error("missing element: {0}")]
    MissingElement(&'static str),
    #[error("{0}")]
    Js(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Render a thrown JS value as text for logs and error payloads.
pub(crate) fn describe_js(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(describe_js(&value))
    }
}

impl From<DomError> for JsValue {
    fn from(err: DomError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
