use yew::prelude::*;

use crate::columns::ColumnSet;
use crate::config::TABLE_ID;
use crate::diff_table::{DiffTable, SortOrder};

#[derive(Properties, PartialEq)]
pub struct DiffTableViewProps {
    pub table: DiffTable,
    pub columns: ColumnSet,
    pub sort: Option<(usize, SortOrder)>,
    pub on_sort: Callback<usize>,
}

#[function_component(DiffTableView)]
pub fn diff_table_view(props: &DiffTableViewProps) -> Html {
    let table = &props.table;
    let columns = &props.columns;

    if table.is_empty() {
        return html! {
            <div style="color:#888; padding:1em;">{ "The comparison returned no rows." }</div>
        };
    }

    html! {
        <table id={TABLE_ID} style="border-collapse:collapse; width:100%;">
            <thead>
                <tr>
                    { for table.columns.iter().enumerate().map(|(index, name)| {
                        let sortable = table.is_sortable(index);
                        let onclick = sortable.then(|| {
                            let on_sort = props.on_sort.clone();
                            Callback::from(move |_: MouseEvent| on_sort.emit(index))
                        });
                        let cursor = if sortable { "pointer" } else { "default" };
                        let marker = match props.sort {
                            Some((i, SortOrder::Ascending)) if i == index => " ▲",
                            Some((i, SortOrder::Descending)) if i == index => " ▼",
                            _ => "",
                        };
                        html! {
                            <th class={classes!(columns.cell_class(index))} {onclick}
                                style={format!("cursor:{cursor}; border:1px solid #ccc; padding:0.25em 0.5em; background:#f5f5f5;")}>
                                { format!("{}{}", name, marker) }
                            </th>
                        }
                    }) }
                </tr>
            </thead>
            <tbody>
                { for table.rows.iter().map(|row| html! {
                    <tr key={row.key.clone()}>
                        { for row.cells.iter().enumerate().map(|(index, cell)| html! {
                            <td class={classes!(columns.cell_class(index))}
                                style="border:1px solid #ccc; padding:0.25em 0.5em;">
                                { cell }
                            </td>
                        }) }
                    </tr>
                }) }
            </tbody>
        </table>
    }
}
