use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::FetchTransport;
use crate::client::{settle, LogTableClient, Presentation};
use crate::columns::ColumnSet;
use crate::components::{ColumnControls, DiffTableView};
use crate::config::{ClientConfig, RESPONSE_AREA_ID, TABLE_ID};
use crate::diff_table::{DiffTable, SortOrder};
use crate::dom;
use crate::error::ClientError;
use crate::selection::Selection;

/// Content of the display region.
#[derive(Clone, PartialEq)]
pub enum View {
    /// Markup from the backend, injected as-is
    Markup(String),
    /// Diff result rendered from the view model
    Diff(DiffTable),
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: ClientConfig,
}

fn alert_failure<T>(result: Result<T, ClientError>) -> Option<T> {
    settle(result, dom::alert)
}

fn current_selection() -> Result<Selection, ClientError> {
    Ok(Selection::from_checkboxes(dom::grouped_checkboxes()?))
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let view = use_state(|| View::Markup(String::new()));
    let columns = use_state(ColumnSet::default);
    let sort = use_state(|| None::<(usize, SortOrder)>);

    // List once on mount
    {
        let view = view.clone();
        let config = props.config.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let client = LogTableClient::new(FetchTransport, config);
                if let Some(markup) = alert_failure(client.update_table().await) {
                    view.set(View::Markup(markup));
                }
            });
            || ()
        });
    }

    // Rebuild the column controls whenever the displayed table changes
    {
        let columns = columns.clone();
        use_effect_with((*view).clone(), move |view| {
            let labels = match view {
                View::Markup(_) => match dom::scan_header_labels(TABLE_ID) {
                    Ok(labels) => labels,
                    Err(err) => {
                        tracing::warn!("could not read table headers: {:?}", err);
                        Vec::new()
                    }
                },
                View::Diff(table) => table.columns.clone(),
            };
            if columns.same_schema(&labels) {
                if matches!(view, View::Markup(_)) {
                    if let Err(err) = dom::apply_all_columns(TABLE_ID, &columns) {
                        tracing::warn!("could not restore column visibility: {:?}", err);
                    }
                }
            } else {
                tracing::debug!(count = labels.len(), "column set rebuilt");
                columns.set(match view {
                    View::Diff(table) => table.column_set(),
                    View::Markup(_) => ColumnSet::from_labels(labels),
                });
            }
            || ()
        });
    }

    let on_toggle = {
        let columns = columns.clone();
        let view = view.clone();
        Callback::from(move |index: usize| {
            let mut next = (*columns).clone();
            if next.toggle(index).is_none() {
                return;
            }
            if matches!(*view, View::Markup(_)) {
                if let Err(err) = dom::apply_column_visibility(TABLE_ID, &next, index) {
                    tracing::warn!("could not toggle column {index}: {:?}", err);
                }
            }
            columns.set(next);
        })
    };

    let on_sort = {
        let view = view.clone();
        let sort = sort.clone();
        Callback::from(move |index: usize| {
            let View::Diff(table) = &*view else {
                return;
            };
            if !table.is_sortable(index) {
                return;
            }
            let order = match *sort {
                Some((i, SortOrder::Ascending)) if i == index => SortOrder::Descending,
                _ => SortOrder::Ascending,
            };
            let mut sorted = table.clone();
            sorted.sort_by(index, order);
            sort.set(Some((index, order)));
            view.set(View::Diff(sorted));
        })
    };

    let on_erase = {
        let view = view.clone();
        let config = props.config.clone();
        Callback::from(move |_: MouseEvent| {
            let view = view.clone();
            let config = config.clone();
            spawn_local(async move {
                let Some(selection) = alert_failure(current_selection()) else {
                    return;
                };
                let client = LogTableClient::new(FetchTransport, config);
                if let Some(markup) = alert_failure(client.erase_log_folder(&selection).await) {
                    view.set(View::Markup(markup));
                }
            });
        })
    };

    let on_diff = {
        let view = view.clone();
        let sort = sort.clone();
        let config = props.config.clone();
        Callback::from(move |_: MouseEvent| {
            let view = view.clone();
            let sort = sort.clone();
            let config = config.clone();
            spawn_local(async move {
                let Some(selection) = alert_failure(current_selection()) else {
                    return;
                };
                let target = config.render_target;
                let client = LogTableClient::new(FetchTransport, config);
                let Some(outcome) = alert_failure(client.diff_selected(&selection).await) else {
                    return;
                };
                match outcome.present(target) {
                    Presentation::NewTab(html) => {
                        let opened = dom::open_tab_with_html(&html).map_err(ClientError::from);
                        alert_failure(opened);
                    }
                    Presentation::InPageHtml(html) => view.set(View::Markup(html)),
                    Presentation::InPageTable(table) => {
                        sort.set(None);
                        view.set(View::Diff(table));
                    }
                }
            });
        })
    };

    let on_refresh = {
        let view = view.clone();
        let config = props.config.clone();
        Callback::from(move |_: MouseEvent| {
            let view = view.clone();
            let config = config.clone();
            spawn_local(async move {
                let client = LogTableClient::new(FetchTransport, config);
                if let Some(markup) = alert_failure(client.update_table().await) {
                    view.set(View::Markup(markup));
                }
            });
        })
    };

    let button_style = "width:100%; padding:0.6em 0; font-size:1em; cursor:pointer;";

    html! {
        <div style="display:flex; flex-direction:row; height:100vh; font-family:Arial,sans-serif;">
            <div style="width:280px; min-width:220px; padding:1.5em; background:#f8f9fa; border-right:1px solid #ddd; display:flex; flex-direction:column; gap:1em; box-sizing:border-box;">
                <h1 style="margin:0 0 0.5em 0; font-size:1.3em; color:#333;">{ "Test Case Logs" }</h1>
                <button onclick={on_refresh} style={button_style}>{ "Reload" }</button>
                <button onclick={on_erase} style={button_style}>{ "Delete Selected" }</button>
                <button onclick={on_diff} style={button_style}>{ "Compare Selected" }</button>
                <div style="font-size:0.85em; color:#666;">
                    { format!("Compare requires {} selected entries.", props.config.selection_rule) }
                </div>
                <div style="margin-top:1em;">
                    <strong style="color:#555;">{ "Columns" }</strong>
                    <ColumnControls columns={(*columns).clone()} on_toggle={on_toggle} />
                </div>
            </div>
            <div id={RESPONSE_AREA_ID} style="flex:1; padding:1em; overflow:auto;">
                { match &*view {
                    View::Markup(markup) => Html::from_html_unchecked(AttrValue::from(markup.clone())),
                    View::Diff(table) => html! {
                        <DiffTableView
                            table={table.clone()}
                            columns={(*columns).clone()}
                            sort={*sort}
                            on_sort={on_sort}
                        />
                    },
                }}
            </div>
            <style>{ ".hidden { display: none; }" }</style>
        </div>
    }
}
