use crate::config::SelectionRule;
use crate::error::ClientError;

/// Identifiers of the checked log entries, in DOM order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    ids: Vec<String>,
}

impl Selection {
    /// Keeps the id of every checked box, preserving input order.
    pub fn from_checkboxes<I, S>(boxes: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        let ids = boxes
            .into_iter()
            .filter(|(_, checked)| *checked)
            .map(|(id, _)| id.into())
            .collect();
        Self { ids }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn require_any(&self) -> Result<(), ClientError> {
        if self.is_empty() {
            Err(ClientError::EmptySelection)
        } else {
            Ok(())
        }
    }

    pub fn require(&self, rule: SelectionRule) -> Result<(), ClientError> {
        if rule.accepts(self.len()) {
            Ok(())
        } else {
            Err(ClientError::SelectionRule {
                rule,
                selected: self.len(),
            })
        }
    }
}
