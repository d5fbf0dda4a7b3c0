use yew::prelude::*;

use crate::columns::ColumnSet;
use crate::config::COLUMN_CONTROLS_ID;

#[derive(Properties, PartialEq)]
pub struct ColumnControlsProps {
    pub columns: ColumnSet,
    /// Emits the column index whose checkbox changed
    pub on_toggle: Callback<usize>,
}

/// One checkbox and label per column, in header order.
#[function_component(ColumnControls)]
pub fn column_controls(props: &ColumnControlsProps) -> Html {
    html! {
        <div id={COLUMN_CONTROLS_ID} style="display:flex; flex-wrap:wrap; gap:0.75em;">
            { for props.columns.columns().iter().map(|column| {
                let index = column.index;
                let on_toggle = props.on_toggle.clone();
                let onchange = Callback::from(move |_: Event| on_toggle.emit(index));
                let id = column.checkbox_id();
                html! {
                    <div class="checkbox-container" style="display:flex; align-items:center; gap:0.25em;">
                        <input type="checkbox" id={id.clone()} checked={column.visible} {onchange} />
                        <label for={id} style="cursor:pointer;">{ &column.label }</label>
                    </div>
                }
            }) }
        </div>
    }
}
