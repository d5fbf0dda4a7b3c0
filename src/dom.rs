//! The one place that reads or mutates the live document outside of yew's
//! own rendering.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlDocument, HtmlElement, HtmlInputElement};

use crate::columns::{column_cells_selector, ColumnSet};
use crate::config::{GROUPED_CHECKBOX_CLASS, HIDDEN_CLASS};

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document not available"))
}

fn table(table_id: &str) -> Result<Option<Element>, JsValue> {
    Ok(document()?.get_element_by_id(table_id))
}

fn elements(root: &Element, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = root.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Header labels of the table, in document order. A missing table reads as
/// zero columns.
pub fn scan_header_labels(table_id: &str) -> Result<Vec<String>, JsValue> {
    let Some(table) = table(table_id)? else {
        return Ok(Vec::new());
    };
    Ok(elements(&table, "th")?
        .into_iter()
        .map(|th| match th.dyn_ref::<HtmlElement>() {
            Some(el) => el.inner_text(),
            None => th.text_content().unwrap_or_default(),
        })
        .collect())
}

/// Writes one column's visibility onto its header and data cells.
pub fn apply_column_visibility(
    table_id: &str,
    columns: &ColumnSet,
    index: usize,
) -> Result<(), JsValue> {
    let Some(table) = table(table_id)? else {
        return Ok(());
    };
    let hidden = columns.cell_class(index).is_some();
    for cell in elements(&table, &column_cells_selector(index))? {
        cell.class_list().toggle_with_force(HIDDEN_CLASS, hidden)?;
    }
    Ok(())
}

pub fn apply_all_columns(table_id: &str, columns: &ColumnSet) -> Result<(), JsValue> {
    for column in columns.columns() {
        apply_column_visibility(table_id, columns, column.index)?;
    }
    Ok(())
}

/// `(id, checked)` for every grouped checkbox, in document order.
pub fn grouped_checkboxes() -> Result<Vec<(String, bool)>, JsValue> {
    let root = document()?
        .document_element()
        .ok_or_else(|| JsValue::from_str("document has no root element"))?;
    Ok(elements(&root, &format!(".{GROUPED_CHECKBOX_CLASS}"))?
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| (input.id(), input.checked()))
        .collect())
}

/// `data-*` attributes of an element as `(key, value)` pairs, without the prefix.
pub fn data_attributes(element: &Element) -> Vec<(String, String)> {
    element
        .get_attribute_names()
        .iter()
        .filter_map(|name| name.as_string())
        .filter_map(|name| {
            let key = name.strip_prefix("data-")?.to_string();
            let value = element.get_attribute(&name)?;
            Some((key, value))
        })
        .collect()
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.alert_with_message(message) {
            tracing::warn!("alert failed: {:?}", err);
        }
    }
}

/// Opens a blank tab and writes `html` into it.
pub fn open_tab_with_html(html: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window not available"))?;
    let tab = window
        .open()?
        .ok_or_else(|| JsValue::from_str("popup blocked"))?;
    let doc: HtmlDocument = tab
        .document()
        .ok_or_else(|| JsValue::from_str("new tab has no document"))?
        .dyn_into()?;
    doc.write(&js_sys::Array::of1(&JsValue::from_str(html)))?;
    doc.close()?;
    Ok(())
}
