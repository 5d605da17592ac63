//! # List Query
//!
//! Round-trips a [`ViewState`] through the query string, so every table
//! link (sort header, page control, filter form) is a plain GET.
//!
//! ```text
//! /libros?q=ale&filter=Novela&sort=author&dir=desc&page=2
//!          │       │             │          │        │
//!          │       │             │          │        └── page
//!          │       │             │          └── sort_direction
//!          │       │             └── sort_key
//!          │       └── category_filter
//!          └── search_text
//! ```
//!
//! Every parameter is optional and parsed leniently: a garbage page number
//! is page 1, an unknown sort key is the default key.

use serde::Deserialize;
use url::form_urlencoded;

use biblio_core::{ListSpec, SortDirection, ViewState};

/// Query parameters accepted by every list page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub filter: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub page: Option<String>,
    /// Set by redirects after a failed action.
    pub error: Option<String>,
}

impl ListQuery {
    /// View state described by the query, on top of the table defaults.
    pub fn view_state(&self, spec: &ListSpec) -> ViewState {
        let mut state = ViewState::new(spec);

        if let Some(q) = &self.q {
            state.search_text = q.clone();
        }
        state.category_filter = self.filter.clone().filter(|f| !f.trim().is_empty());
        if let Some(sort) = &self.sort {
            state.sort_key = sort.clone();
        }
        state.sort_direction = self
            .dir
            .as_deref()
            .map(SortDirection::parse_lenient)
            .unwrap_or_default();
        state.page = self
            .page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1);

        state.normalized(spec)
    }

    /// True when a previous action asked for the error banner.
    pub fn has_error(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.is_empty())
    }
}

/// Link to `path` showing `state`.
pub fn list_href(path: &str, state: &ViewState) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    if !state.search_text.trim().is_empty() {
        query.append_pair("q", &state.search_text);
    }
    if let Some(filter) = &state.category_filter {
        query.append_pair("filter", filter);
    }
    query.append_pair("sort", &state.sort_key);
    query.append_pair("dir", state.sort_direction.as_str());
    query.append_pair("page", &state.page.to_string());

    format!("{}?{}", path, query.finish())
}
