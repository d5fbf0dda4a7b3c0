//! Error types for the log table client.

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::config::SelectionRule;

/// Alert text shown for every status or transport failure.
pub const REQUEST_FAILED_MESSAGE: &str = "HTTP request failed.";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Delete was invoked with nothing checked
    #[error("no log entries selected")]
    EmptySelection,

    /// Diff selection does not satisfy the configured rule
    #[error("selection of {selected} entries violates rule: {rule}")]
    SelectionRule { rule: SelectionRule, selected: usize },

    /// Backend answered with something other than 200
    #[error("backend returned HTTP {0}")]
    Status(u16),

    /// Fetch rejected or a JS call failed
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("failed to decode diff response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ClientError {
    /// Text for the blocking alert. Backend rejections and unreachable
    /// backends share one message.
    pub fn alert_message(&self) -> String {
        match self {
            ClientError::EmptySelection => "Select at least one log entry.".to_string(),
            ClientError::SelectionRule { rule, .. } => rule.violation_message().to_string(),
            ClientError::Status(_)
            | ClientError::Transport(_)
            | ClientError::Decode(_)
            | ClientError::Encode(_) => REQUEST_FAILED_MESSAGE.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClientError::EmptySelection | ClientError::SelectionRule { .. }
        )
    }
}

impl From<JsValue> for ClientError {
    fn from(value: JsValue) -> Self {
        let text = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        ClientError::Transport(text)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),
}
