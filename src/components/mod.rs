mod column_controls;
mod diff_table_view;

pub use column_controls::ColumnControls;
pub use diff_table_view::DiffTableView;
