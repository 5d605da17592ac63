//! Table chrome: sort headers, pagination, search and filter form.

use maud::{html, Markup};

use biblio_core::{ListViewController, PageResult, Record, SortDirection};

use crate::list_query::list_href;

/// One choice in a filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        FilterOption {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Option whose label is its value (genres).
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        FilterOption {
            label: value.clone(),
            value,
        }
    }
}

/// Column header that sorts by `key` when clicked.
pub fn sort_header<R: Record>(path: &str, view: &ListViewController<R>, key: &str, label: &str) -> Markup {
    let state = view.state();
    let arrow = if state.sort_key == key {
        match state.sort_direction {
            SortDirection::Ascending => " ▲",
            SortDirection::Descending => " ▼",
        }
    } else {
        ""
    };

    html! {
        th {
            a href=(list_href(path, &view.state_after_sort(key))) { (label) (arrow) }
        }
    }
}

/// Previous / next controls with the page indicator.
pub fn pagination<R: Record>(path: &str, view: &ListViewController<R>, page: &PageResult<'_, R>) -> Markup {
    let previous = list_href(path, &view.state_for_page(page.current_page.saturating_sub(1)));
    let next = list_href(path, &view.state_for_page(page.current_page + 1));

    html! {
        div.pager {
            @if page.has_previous() {
                a.btn href=(previous) { "Anterior" }
            } @else {
                span.btn.disabled { "Anterior" }
            }
            span { (page.indicator()) }
            @if page.has_next() {
                a.btn href=(next) { "Siguiente" }
            } @else {
                span.btn.disabled { "Siguiente" }
            }
        }
    }
}

/// GET form for search text and category; submitting starts at page 1.
pub fn filter_form<R: Record>(
    path: &str,
    view: &ListViewController<R>,
    search_label: Option<&str>,
    filter_label: &str,
    options: &[FilterOption],
) -> Markup {
    let state = view.state();
    let selected = state.category_filter.as_deref().unwrap_or("");

    html! {
        form.filters method="get" action=(path) {
            @if let Some(search_label) = search_label {
                input type="search" name="q" placeholder=(search_label) value=(state.search_text);
            }
            @if !options.is_empty() {
                label for="filter" { (filter_label) " " }
                select id="filter" name="filter" onchange="this.form.submit()" {
                    option value="" selected[selected.is_empty()] { "Todos" }
                    @for choice in options {
                        option value=(choice.value) selected[selected == choice.value] { (choice.label) }
                    }
                }
            }
            input type="hidden" name="sort" value=(state.sort_key);
            input type="hidden" name="dir" value=(state.sort_direction.as_str());
            button.btn type="submit" { "Filtrar" }
        }
    }
}
