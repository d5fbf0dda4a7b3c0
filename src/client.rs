//! Log table actions: list, delete and diff.
//!
//! Each action validates locally, posts one envelope (delete posts a second
//! one to refresh the listing) and returns the content the UI should show.
//! Errors are returned untouched; the caller alerts once and keeps whatever
//! it was displaying.

use crate::api::Transport;
use crate::config::{ClientConfig, DiffFormat, RenderTarget};
use crate::diff_table::{render_document, DiffTable};
use crate::error::ClientError;
use crate::selection::Selection;
use crate::types::{HttpReply, LogTableRequest};

#[derive(Clone, Debug, PartialEq)]
pub enum DiffOutcome {
    Table(DiffTable),
    Html(String),
}

/// Title of the page written into a new tab.
pub const DIFF_TITLE: &str = "Compare Result";

/// Where and how a diff result ends up.
#[derive(Clone, Debug, PartialEq)]
pub enum Presentation {
    /// Write this document into a freshly opened tab
    NewTab(String),
    /// Replace the display region with raw markup
    InPageHtml(String),
    /// Render the view model in place
    InPageTable(DiffTable),
}

impl DiffOutcome {
    pub fn present(self, target: RenderTarget) -> Presentation {
        match (self, target) {
            (DiffOutcome::Table(table), RenderTarget::NewTab) => {
                Presentation::NewTab(render_document(DIFF_TITLE, &table))
            }
            (DiffOutcome::Html(html), RenderTarget::NewTab) => Presentation::NewTab(html),
            (DiffOutcome::Table(table), RenderTarget::InPage) => Presentation::InPageTable(table),
            (DiffOutcome::Html(html), RenderTarget::InPage) => Presentation::InPageHtml(html),
        }
    }
}

/// Resolves an action result for the UI. Failures are logged and raised
/// through `alert` exactly once; the caller then leaves its display as it was.
pub fn settle<T>(result: Result<T, ClientError>, alert: impl FnOnce(&str)) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            if err.is_validation() {
                tracing::info!(error = %err, "action rejected before sending");
            } else {
                tracing::warn!(error = %err, "log table request failed");
            }
            alert(&err.alert_message());
            None
        }
    }
}

pub struct LogTableClient<T> {
    transport: T,
    config: ClientConfig,
}

impl<T: Transport> LogTableClient<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    async fn send(&self, request: LogTableRequest) -> Result<HttpReply, ClientError> {
        let body = request.to_json().map_err(ClientError::Encode)?;
        let url = self.config.endpoint_url();
        tracing::debug!(%url, %body, "posting log table request");
        let reply = self.transport.post_json(&url, body).await?;
        if !reply.is_ok() {
            tracing::warn!(status = reply.status, kind = request.kind, "log table request rejected");
            return Err(ClientError::Status(reply.status));
        }
        Ok(reply)
    }

    /// Fetches the listing markup.
    pub async fn update_table(&self) -> Result<String, ClientError> {
        let reply = self.send(LogTableRequest::list()).await?;
        Ok(reply.body)
    }

    /// Deletes the selected folders, then returns the refreshed listing.
    /// The refresh only runs once the delete was acknowledged.
    pub async fn erase_log_folder(&self, selection: &Selection) -> Result<String, ClientError> {
        selection.require_any()?;
        self.send(LogTableRequest::delete(selection.ids().to_vec()))
            .await?;
        tracing::info!(count = selection.len(), "log folders deleted");
        self.update_table().await
    }

    pub async fn diff_selected(&self, selection: &Selection) -> Result<DiffOutcome, ClientError> {
        selection.require(self.config.selection_rule)?;
        let reply = self
            .send(LogTableRequest::diff(selection.ids().to_vec()))
            .await?;
        match self.config.diff_format {
            DiffFormat::Json => {
                let table = DiffTable::from_json(&reply.body).map_err(ClientError::Decode)?;
                Ok(DiffOutcome::Table(table))
            }
            DiffFormat::Html => Ok(DiffOutcome::Html(reply.body)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectionRule;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Replays canned replies and records every posted body.
    #[derive(Default)]
    struct MockTransport {
        replies: RefCell<VecDeque<Result<HttpReply, ClientError>>>,
        sent: RefCell<Vec<(String, String)>>,
    }

    impl MockTransport {
        fn with(replies: Vec<Result<HttpReply, ClientError>>) -> Self {
            Self {
                replies: RefCell::new(replies.into()),
                sent: RefCell::default(),
            }
        }

        fn bodies(&self) -> Vec<String> {
            self.sent.borrow().iter().map(|(_, b)| b.clone()).collect()
        }
    }

    impl Transport for &MockTransport {
        async fn post_json(&self, url: &str, body: String) -> Result<HttpReply, ClientError> {
            self.sent.borrow_mut().push((url.to_string(), body));
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ClientError::Transport("no reply queued".to_string())))
        }
    }

    fn ok(body: &str) -> Result<HttpReply, ClientError> {
        Ok(HttpReply {
            status: 200,
            body: body.to_string(),
        })
    }

    fn status(code: u16) -> Result<HttpReply, ClientError> {
        Ok(HttpReply {
            status: code,
            body: "error".to_string(),
        })
    }

    fn selection(ids: &[&str]) -> Selection {
        Selection::from_checkboxes(ids.iter().map(|id| (*id, true)))
    }

    fn client(mock: &MockTransport, config: ClientConfig) -> LogTableClient<&MockTransport> {
        LogTableClient::new(mock, config)
    }

    #[test]
    fn test_list_returns_body_verbatim() {
        let mock = MockTransport::with(vec![ok("<table id=\"sortTable\"></table>")]);
        let markup = block_on(client(&mock, ClientConfig::default()).update_table()).unwrap();
        assert_eq!(markup, "<table id=\"sortTable\"></table>");
        assert_eq!(mock.bodies(), [r#"{"type":"0"}"#]);
        assert_eq!(mock.sent.borrow()[0].0, "http://localhost:5000/api/log_table");
    }

    #[test]
    fn test_list_non_200_is_status_error() {
        let mock = MockTransport::with(vec![status(500)]);
        let err = block_on(client(&mock, ClientConfig::default()).update_table()).unwrap_err();
        assert!(matches!(err, ClientError::Status(500)));
    }

    #[test]
    fn test_transport_failure_propagates() {
        let mock = MockTransport::with(vec![Err(ClientError::Transport("refused".to_string()))]);
        let err = block_on(client(&mock, ClientConfig::default()).update_table()).unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[test]
    fn test_delete_with_empty_selection_sends_nothing() {
        let mock = MockTransport::default();
        let err = block_on(
            client(&mock, ClientConfig::default()).erase_log_folder(&Selection::default()),
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::EmptySelection));
        assert!(mock.sent.borrow().is_empty());
    }

    #[test]
    fn test_delete_then_refresh() {
        let mock = MockTransport::with(vec![ok(""), ok("<p>refreshed</p>")]);
        let markup = block_on(
            client(&mock, ClientConfig::default())
                .erase_log_folder(&selection(&["log_20240101", "log_20240102"])),
        )
        .unwrap();
        assert_eq!(markup, "<p>refreshed</p>");
        assert_eq!(
            mock.bodies(),
            [
                r#"{"type":"1","checkbox":["log_20240101","log_20240102"]}"#,
                r#"{"type":"0"}"#,
            ]
        );
    }

    #[test]
    fn test_failed_delete_skips_refresh() {
        let mock = MockTransport::with(vec![status(403), ok("<p>never</p>")]);
        let err = block_on(
            client(&mock, ClientConfig::default()).erase_log_folder(&selection(&["log_a"])),
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Status(403)));
        assert_eq!(mock.sent.borrow().len(), 1);
    }

    #[test]
    fn test_diff_rule_violation_sends_nothing() {
        let mock = MockTransport::default();
        let err = block_on(
            client(&mock, ClientConfig::default()).diff_selected(&selection(&["only_one"])),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ClientError::SelectionRule {
                rule: SelectionRule::ExactlyTwo,
                selected: 1
            }
        ));
        assert!(mock.sent.borrow().is_empty());
    }

    #[test]
    fn test_diff_json_builds_table() {
        let mock = MockTransport::with(vec![ok(
            r#"{"testcase": {"0": "in1.txt"}, "score.1": {"0": 3}, "score.2": {"0": 4}}"#,
        )]);
        let outcome = block_on(
            client(&mock, ClientConfig::default()).diff_selected(&selection(&["a", "b"])),
        )
        .unwrap();
        match outcome {
            DiffOutcome::Table(table) => {
                assert_eq!(table.columns, ["testcase", "score.1", "score.2"]);
                assert_eq!(table.rows[0].cells, ["in1.txt", "3", "4"]);
            }
            other => panic!("expected a table, got {other:?}"),
        }
        assert_eq!(mock.bodies(), [r#"{"type":"2","checkbox":["a","b"]}"#]);
    }

    #[test]
    fn test_diff_html_passthrough_with_relaxed_rule() {
        let (config, _) = ClientConfig::default().apply_overrides([
            ("diff-rule", "at-least-one"),
            ("diff-format", "html"),
        ]);
        let mock = MockTransport::with(vec![ok("<h1>Compare Result</h1>")]);
        let outcome =
            block_on(client(&mock, config).diff_selected(&selection(&["a"]))).unwrap();
        assert_eq!(outcome, DiffOutcome::Html("<h1>Compare Result</h1>".to_string()));
    }

    #[test]
    fn test_settle_alerts_once_on_failure() {
        let mut display = "<p>before</p>".to_string();
        let mut alerts = Vec::new();

        let mock = MockTransport::with(vec![status(502)]);
        let result = block_on(client(&mock, ClientConfig::default()).update_table());
        if let Some(markup) = settle(result, |msg| alerts.push(msg.to_string())) {
            display = markup;
        }
        assert_eq!(display, "<p>before</p>");
        assert_eq!(alerts, [crate::error::REQUEST_FAILED_MESSAGE]);
    }

    #[test]
    fn test_settle_empty_delete_alerts_once() {
        let mock = MockTransport::default();
        let mut alerts = 0;
        let result = block_on(
            client(&mock, ClientConfig::default()).erase_log_folder(&Selection::default()),
        );
        assert!(settle(result, |_| alerts += 1).is_none());
        assert_eq!(alerts, 1);
        assert!(mock.sent.borrow().is_empty());
    }

    #[test]
    fn test_settle_success_replaces_display() {
        let mock = MockTransport::with(vec![ok("<table></table>")]);
        let mut alerts = 0;
        let result = block_on(client(&mock, ClientConfig::default()).update_table());
        assert_eq!(
            settle(result, |_| alerts += 1).as_deref(),
            Some("<table></table>")
        );
        assert_eq!(alerts, 0);
    }

    #[test]
    fn test_default_diff_shows_column_controls() {
        let mock = MockTransport::with(vec![ok(
            r#"{"testcase": {"0": "in1.txt"}, "status.1": {"0": "AC"}, "time.1": {"0": 1.5}}"#,
        )]);
        let config = ClientConfig::default();
        let target = config.render_target;
        let outcome =
            block_on(client(&mock, config).diff_selected(&selection(&["a", "b"]))).unwrap();
        let Presentation::InPageTable(table) = outcome.present(target) else {
            panic!("default diff should render in page");
        };
        let controls = table.column_set();
        let ids: Vec<_> = controls.columns().iter().map(|c| c.checkbox_id()).collect();
        assert_eq!(ids, ["col-0", "col-1", "col-2"]);
        assert!(controls.columns().iter().all(|c| c.visible));
        assert!(table.is_sortable(0));
        assert!(!table.is_sortable(1));
    }

    #[test]
    fn test_presentation_targets() {
        let table = DiffTable::from_json(r#"{"status": {"0": "AC"}}"#).unwrap();

        match DiffOutcome::Table(table.clone()).present(RenderTarget::NewTab) {
            Presentation::NewTab(doc) => {
                assert!(doc.contains("<title>Compare Result</title>"));
                assert!(doc.contains("<td>AC</td>"));
            }
            other => panic!("unexpected presentation: {other:?}"),
        }
        assert_eq!(
            DiffOutcome::Table(table.clone()).present(RenderTarget::InPage),
            Presentation::InPageTable(table)
        );
        assert_eq!(
            DiffOutcome::Html("<p>x</p>".to_string()).present(RenderTarget::NewTab),
            Presentation::NewTab("<p>x</p>".to_string())
        );
        assert_eq!(
            DiffOutcome::Html("<p>x</p>".to_string()).present(RenderTarget::InPage),
            Presentation::InPageHtml("<p>x</p>".to_string())
        );
    }

    #[test]
    fn test_diff_bad_json_is_decode_error() {
        let mock = MockTransport::with(vec![ok("<html>not json</html>")]);
        let err = block_on(
            client(&mock, ClientConfig::default()).diff_selected(&selection(&["a", "b"])),
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
        assert_eq!(err.alert_message(), crate::error::REQUEST_FAILED_MESSAGE);
    }
}
