use crate::config::HIDDEN_CLASS;

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub index: usize,
    pub label: String,
    pub visible: bool,
}

impl Column {
    /// Id of the checkbox controlling this column.
    pub fn checkbox_id(&self) -> String {
        format!("col-{}", self.index)
    }
}

/// Visibility state of every column of a table, in header order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnSet {
    columns: Vec<Column>,
}

impl ColumnSet {
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = labels
            .into_iter()
            .enumerate()
            .map(|(index, label)| Column {
                index,
                label: label.into(),
                visible: true,
            })
            .collect();
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.columns.get(index).map_or(true, |c| c.visible)
    }

    /// Flips one column and returns its new visibility. Out of range is a no-op.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let column = self.columns.get_mut(index)?;
        column.visible = !column.visible;
        Some(column.visible)
    }

    /// Class every header and data cell of `index` should carry.
    pub fn cell_class(&self, index: usize) -> Option<&'static str> {
        if self.is_visible(index) {
            None
        } else {
            Some(HIDDEN_CLASS)
        }
    }

    /// Same labels, same visibility. Used to keep user choices across a
    /// re-render of an identical table.
    pub fn same_schema(&self, labels: &[String]) -> bool {
        self.columns.len() == labels.len()
            && self.columns.iter().zip(labels).all(|(c, l)| &c.label == l)
    }
}

/// Selects every header and data cell at a zero-based column index.
pub fn column_cells_selector(index: usize) -> String {
    let ordinal = index + 1;
    format!("th:nth-child({ordinal}), td:nth-child({ordinal})")
}
