use serde::Serialize;

/// Action codes understood by `/api/log_table`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    List,
    Delete,
    Diff,
}

impl RequestKind {
    pub fn code(self) -> &'static str {
        match self {
            RequestKind::List => "0",
            RequestKind::Delete => "1",
            RequestKind::Diff => "2",
        }
    }
}

/// Request envelope posted to the log table endpoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LogTableRequest {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkbox: Option<Vec<String>>,
}

impl LogTableRequest {
    pub fn list() -> Self {
        Self {
            kind: RequestKind::List.code(),
            checkbox: None,
        }
    }

    pub fn delete(ids: Vec<String>) -> Self {
        Self {
            kind: RequestKind::Delete.code(),
            checkbox: Some(ids),
        }
    }

    pub fn diff(ids: Vec<String>) -> Self {
        Self {
            kind: RequestKind::Diff.code(),
            checkbox: Some(ids),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}
