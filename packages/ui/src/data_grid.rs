//! # Data grid
//!
//! Generic tabular renderer: columns + rows + a loading flag in, one of
//! three states out — a loading placeholder, a configurable empty state, or
//! the populated table with client-side pagination and optional inline cell
//! editing. Rows are plain display structs; columns read them through
//! fn-pointer accessors so the column list itself stays cheap to compare.

use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant};

/// Page sizes offered in the footer when the caller does not override them.
pub const DEFAULT_PAGE_SIZES: [usize; 3] = [25, 50, 100];
/// Rows per page before the user touches the selector.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// One column of a [`DataGrid`].
pub struct GridColumn<T> {
    pub key: &'static str,
    pub header: &'static str,
    /// Reads the cell text for a row.
    pub cell: fn(&T) -> String,
    /// Whether cells in this column accept inline edits.
    pub editable: bool,
}

impl<T> GridColumn<T> {
    pub fn new(key: &'static str, header: &'static str, cell: fn(&T) -> String) -> Self {
        Self {
            key,
            header,
            cell,
            editable: false,
        }
    }

    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }
}

impl<T> Clone for GridColumn<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for GridColumn<T> {}

impl<T> PartialEq for GridColumn<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.header == other.header
            && self.cell == other.cell
            && self.editable == other.editable
    }
}

/// Copy for the placeholder shown when there are no rows.
#[derive(Clone, Debug, PartialEq)]
pub struct EmptyState {
    pub title: String,
    pub description: String,
    /// Label for the optional call-to-action button.
    pub action_label: Option<String>,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            title: "Nothing here yet".to_string(),
            description: "Entries will show up here once there are any.".to_string(),
            action_label: None,
        }
    }
}

impl EmptyState {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            action_label: None,
        }
    }

    pub fn action(mut self, label: impl Into<String>) -> Self {
        self.action_label = Some(label.into());
        self
    }
}

/// A committed inline edit: which row (index into the full row list), which
/// column, and the new text.
#[derive(Clone, Debug, PartialEq)]
pub struct CellEdit {
    pub row: usize,
    pub column: &'static str,
    pub value: String,
}

/// Number of pages needed for `total` rows; at least one so the footer
/// always has something to stand on.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// Clamp a requested page index to the valid range for `total` rows.
pub fn clamp_page(page: usize, total: usize, page_size: usize) -> usize {
    page.min(page_count(total, page_size) - 1)
}

/// Row-index bounds `[start, end)` of one page.
pub fn page_bounds(total: usize, page: usize, page_size: usize) -> (usize, usize) {
    if page_size == 0 {
        return (0, total);
    }
    let start = (page * page_size).min(total);
    let end = (start + page_size).min(total);
    (start, end)
}

#[derive(Clone, Debug, PartialEq)]
struct EditingCell {
    row: usize,
    column: &'static str,
    draft: String,
}

/// Generic paginated table.
///
/// Inline editing: double-click a cell in an editable column to open a text
/// input; Enter commits through `on_edit`, Escape abandons the draft. The
/// grid itself never mutates rows — the owner applies the edit and passes
/// updated rows back down.
#[component]
pub fn DataGrid<T: Clone + PartialEq + 'static>(
    columns: Vec<GridColumn<T>>,
    rows: Vec<T>,
    #[props(default)] loading: bool,
    #[props(default)] empty: EmptyState,
    #[props(default = DEFAULT_PAGE_SIZE)] page_size: usize,
    #[props(default = DEFAULT_PAGE_SIZES.to_vec())] page_size_options: Vec<usize>,
    /// Called with the full-list row index when a row is clicked.
    #[props(default)]
    on_row_click: Option<EventHandler<usize>>,
    /// Commit callback for inline edits; editing is off when absent.
    #[props(default)]
    on_edit: Option<EventHandler<CellEdit>>,
    /// Invoked by the empty state's call-to-action button.
    #[props(default)]
    on_empty_action: Option<EventHandler<()>>,
) -> Element {
    let mut page = use_signal(|| 0usize);
    let mut size = use_signal(|| page_size);
    let mut editing = use_signal(|| None::<EditingCell>);

    if loading {
        return rsx! {
            div {
                class: "flex items-center justify-center py-16 text-sm text-neutral-500",
                "Loading…"
            }
        };
    }

    if rows.is_empty() {
        return rsx! {
            div {
                class: "flex flex-col items-center justify-center py-16 text-center",
                h3 { class: "m-0 mb-1 text-base font-medium text-neutral-800", "{empty.title}" }
                p { class: "m-0 text-sm text-neutral-500", "{empty.description}" }
                if let Some(label) = empty.action_label {
                    div {
                        class: "mt-4",
                        Button {
                            variant: ButtonVariant::Primary,
                            onclick: move |_| {
                                if let Some(handler) = &on_empty_action {
                                    handler.call(());
                                }
                            },
                            "{label}"
                        }
                    }
                }
            }
        };
    }

    let total = rows.len();
    let current = clamp_page(page(), total, size());
    let (start, end) = page_bounds(total, current, size());
    let pages = page_count(total, size());

    rsx! {
        div {
            table {
                class: "w-full border-collapse text-sm",
                thead {
                    tr {
                        class: "border-b border-neutral-200 text-left",
                        for column in &columns {
                            th {
                                key: "{column.key}",
                                class: "px-3 py-2 font-medium text-neutral-500",
                                "{column.header}"
                            }
                        }
                    }
                }
                tbody {
                    for (offset, row) in rows[start..end].iter().enumerate() {
                        tr {
                            key: "{start + offset}",
                            class: if on_row_click.is_some() {
                                "border-b border-neutral-100 hover:bg-neutral-50 cursor-pointer"
                            } else {
                                "border-b border-neutral-100"
                            },
                            onclick: move |_| {
                                if let Some(handler) = &on_row_click {
                                    handler.call(start + offset);
                                }
                            },
                            for (column, text) in columns.iter().map(|c| (c, (c.cell)(row))) {
                                td {
                                    key: "{column.key}",
                                    class: "px-3 py-2 text-neutral-800",
                                    ondoubleclick: {
                                        let text = text.clone();
                                        let editable = column.editable && on_edit.is_some();
                                        let column_key = column.key;
                                        move |evt: Event<MouseData>| {
                                            if editable {
                                                evt.stop_propagation();
                                                editing.set(Some(EditingCell {
                                                    row: start + offset,
                                                    column: column_key,
                                                    draft: text.clone(),
                                                }));
                                            }
                                        }
                                    },
                                    if editing().as_ref().is_some_and(|e| e.row == start + offset && e.column == column.key) {
                                        input {
                                            r#type: "text",
                                            class: "w-full bg-white border border-primary-500 rounded px-1.5 py-0.5 text-sm outline-none",
                                            value: editing().map(|e| e.draft).unwrap_or_default(),
                                            autofocus: true,
                                            onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                                            oninput: move |evt: FormEvent| {
                                                if let Some(cell) = editing().as_ref() {
                                                    editing.set(Some(EditingCell {
                                                        draft: evt.value(),
                                                        ..cell.clone()
                                                    }));
                                                }
                                            },
                                            onkeydown: move |evt: KeyboardEvent| {
                                                match evt.key() {
                                                    Key::Enter => {
                                                        if let Some(cell) = editing() {
                                                            if let Some(handler) = &on_edit {
                                                                handler.call(CellEdit {
                                                                    row: cell.row,
                                                                    column: cell.column,
                                                                    value: cell.draft,
                                                                });
                                                            }
                                                        }
                                                        editing.set(None);
                                                    }
                                                    Key::Escape => editing.set(None),
                                                    _ => {}
                                                }
                                            },
                                        }
                                    } else {
                                        "{text}"
                                    }
                                }
                            }
                        }
                    }
                }
            }

            div {
                class: "flex items-center justify-between px-3 py-2 border-t border-neutral-200 text-sm text-neutral-600",
                div {
                    "Showing {start + 1}–{end} of {total}"
                }
                div {
                    class: "flex items-center gap-3",
                    select {
                        class: "bg-white border border-neutral-300 rounded px-2 py-1 text-sm outline-none",
                        value: "{size()}",
                        onchange: move |evt| {
                            if let Ok(new_size) = evt.value().parse::<usize>() {
                                size.set(new_size.max(1));
                                page.set(0);
                            }
                        },
                        for option in &page_size_options {
                            option {
                                key: "{option}",
                                value: "{option}",
                                selected: *option == size(),
                                "{option} / page"
                            }
                        }
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: current == 0,
                        onclick: move |_| page.set(current.saturating_sub(1)),
                        "Prev"
                    }
                    span { "{current + 1} / {pages}" }
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: current + 1 >= pages,
                        onclick: move |_| page.set((current + 1).min(pages - 1)),
                        "Next"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up_and_never_hits_zero() {
        assert_eq!(page_count(0, 100), 1);
        assert_eq!(page_count(1, 100), 1);
        assert_eq!(page_count(100, 100), 1);
        assert_eq!(page_count(101, 100), 2);
        assert_eq!(page_count(250, 25), 10);
        assert_eq!(page_count(10, 0), 1);
    }

    #[test]
    fn page_bounds_slice_the_row_list() {
        assert_eq!(page_bounds(250, 0, 100), (0, 100));
        assert_eq!(page_bounds(250, 1, 100), (100, 200));
        // Last page is short.
        assert_eq!(page_bounds(250, 2, 100), (200, 250));
        // Out-of-range pages produce an empty, in-bounds slice.
        assert_eq!(page_bounds(250, 9, 100), (250, 250));
        assert_eq!(page_bounds(0, 0, 100), (0, 0));
    }

    #[test]
    fn clamp_page_snaps_to_the_last_page() {
        assert_eq!(clamp_page(0, 250, 100), 0);
        assert_eq!(clamp_page(2, 250, 100), 2);
        // Shrinking the row list pulls a stranded page back in range.
        assert_eq!(clamp_page(7, 250, 100), 2);
        assert_eq!(clamp_page(3, 0, 100), 0);
    }

    #[test]
    fn column_accessors_read_rows() {
        struct Row {
            name: &'static str,
            amount: f64,
        }
        let columns = vec![
            GridColumn::new("name", "Name", |r: &Row| r.name.to_string()),
            GridColumn::new("amount", "Amount", |r: &Row| format!("{:.2}", r.amount)).editable(),
        ];
        let row = Row {
            name: "Groceries",
            amount: 42.5,
        };
        assert_eq!((columns[0].cell)(&row), "Groceries");
        assert_eq!((columns[1].cell)(&row), "42.50");
        assert!(!columns[0].editable);
        assert!(columns[1].editable);
    }

    #[test]
    fn default_page_size_is_one_hundred() {
        assert_eq!(DEFAULT_PAGE_SIZE, 100);
        assert!(DEFAULT_PAGE_SIZES.contains(&DEFAULT_PAGE_SIZE));
    }
}
