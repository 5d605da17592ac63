//! # Route Handlers
//!
//! One module per dashboard section. List pages share the same shape:
//!
//! ```text
//! GET /libros?q=..&filter=..&sort=..&dir=..&page=..
//!    │
//!    ├── fetch records        (biblio-client)
//!    ├── ListQuery ──► ViewState
//!    ├── ListViewController::with_state(records, spec, state)
//!    ├── compute_page()       (filter → stable sort → paginate)
//!    └── render               (maud)
//! ```
//!
//! Actions (delete, change role, clear fine, return) are POSTs that
//! redirect back to their list page with 303 See Other.

pub mod book_form;
pub mod books;
pub mod fines;
pub mod health;
pub mod rents;
pub mod users;

use axum::response::{Html, Redirect};
use maud::Markup;

use biblio_core::{ListSpec, ListViewController, Record};

use crate::list_query::ListQuery;

/// `GET /` lands on the books page.
pub async fn index() -> Redirect {
    Redirect::to("/libros")
}

pub(crate) fn render(markup: Markup) -> Html<String> {
    Html(markup.into_string())
}

/// Controller for `records` in the view state the query describes.
pub(crate) fn list_view<R: Record>(records: Vec<R>, spec: ListSpec, query: &ListQuery) -> ListViewController<R> {
    let state = query.view_state(&spec);
    ListViewController::with_state(records, spec, state)
}

/// Back to `path` with the error banner raised.
pub(crate) fn redirect_with_error(path: &str) -> Redirect {
    Redirect::to(&format!("{path}?error=1"))
}
