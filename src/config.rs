use std::fmt;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_ENDPOINT: &str = "/api/log_table";

// DOM contract shared with the markup served by the backend.
pub const ROOT_ID: &str = "root";
pub const TABLE_ID: &str = "sortTable";
pub const COLUMN_CONTROLS_ID: &str = "column-controls";
pub const RESPONSE_AREA_ID: &str = "responseArea";
pub const GROUPED_CHECKBOX_CLASS: &str = "groupedCheckbox";
pub const HIDDEN_CLASS: &str = "hidden";

/// How many entries a diff request must carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionRule {
    ExactlyTwo,
    AtLeastOne,
}

impl SelectionRule {
    pub fn accepts(self, selected: usize) -> bool {
        match self {
            SelectionRule::ExactlyTwo => selected == 2,
            SelectionRule::AtLeastOne => selected >= 1,
        }
    }

    pub fn violation_message(self) -> &'static str {
        match self {
            SelectionRule::ExactlyTwo => "Select exactly two log entries to compare.",
            SelectionRule::AtLeastOne => "Select at least one log entry to compare.",
        }
    }

    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "exactly-two" | "2" => Ok(SelectionRule::ExactlyTwo),
            "at-least-one" | "1+" => Ok(SelectionRule::AtLeastOne),
            _ => Err(ConfigError::InvalidValue {
                key: "diff-rule",
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for SelectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionRule::ExactlyTwo => write!(f, "exactly two"),
            SelectionRule::AtLeastOne => write!(f, "at least one"),
        }
    }
}

/// Shape of the diff response body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiffFormat {
    /// Object of column name -> (row key -> cell value)
    Json,
    /// Pre-rendered markup
    Html,
}

impl DiffFormat {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(DiffFormat::Json),
            "html" => Ok(DiffFormat::Html),
            _ => Err(ConfigError::InvalidValue {
                key: "diff-format",
                value: value.to_string(),
            }),
        }
    }
}

/// Where a diff result is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderTarget {
    NewTab,
    InPage,
}

impl RenderTarget {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "new-tab" | "tab" => Ok(RenderTarget::NewTab),
            "in-page" | "page" => Ok(RenderTarget::InPage),
            _ => Err(ConfigError::InvalidValue {
                key: "diff-target",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub endpoint: String,
    pub selection_rule: SelectionRule,
    pub diff_format: DiffFormat,
    pub render_target: RenderTarget,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            selection_rule: SelectionRule::ExactlyTwo,
            diff_format: DiffFormat::Json,
            render_target: RenderTarget::InPage,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by variables present when the crate was built.
    pub fn from_env() -> Self {
        let pairs = [
            ("base-url", option_env!("LOG_TABLE_BASE_URL")),
            ("endpoint", option_env!("LOG_TABLE_ENDPOINT")),
            ("diff-rule", option_env!("LOG_TABLE_DIFF_RULE")),
            ("diff-format", option_env!("LOG_TABLE_DIFF_FORMAT")),
            ("diff-target", option_env!("LOG_TABLE_DIFF_TARGET")),
        ];
        let mut config = Self::default();
        for (key, value) in pairs {
            if let Some(value) = value {
                if let Err(err) = config.set(key, value) {
                    tracing::warn!("ignoring build-time setting: {err}");
                }
            }
        }
        config
    }

    /// Applies `data-*` style overrides. Invalid entries are reported and
    /// skipped; the remaining pairs still apply.
    pub fn apply_overrides<'a, I>(mut self, pairs: I) -> (Self, Vec<ConfigError>)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut errors = Vec::new();
        for (key, value) in pairs {
            if let Err(err) = self.set(key, value) {
                errors.push(err);
            }
        }
        (self, errors)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "base-url" => self.base_url = value.trim().to_string(),
            "endpoint" => self.endpoint = value.trim().to_string(),
            "diff-rule" => self.selection_rule = SelectionRule::parse(value)?,
            "diff-format" => self.diff_format = DiffFormat::parse(value)?,
            "diff-target" => self.render_target = RenderTarget::parse(value)?,
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        )
    }
}
