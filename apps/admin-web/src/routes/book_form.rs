//! # Book Form
//!
//! Create (`/bookForm`) and edit (`/bookFormEdit/{id}`) share one template.
//!
//! ```text
//! POST form ──► BookForm::normalize_for_{create,update}
//!                 │ Err ──► 400, form again with the message
//!                 ▼
//!              BookRepository::{create,update}
//!                 │ Err ──► 502, form again with "Request failed"
//!                 ▼
//!              303 ──► /libros
//! ```
//!
//! The submitted values survive a failed attempt, so the user fixes the
//! one bad field instead of retyping everything.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use maud::{html, Markup};
use tracing::{error, warn};

use biblio_core::BookForm;

use crate::error::{WebResult, REQUEST_FAILED};
use crate::views::{flash, page, NavItem};
use crate::AppState;

use super::render;

/// Which submission the template is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode<'a> {
    Create,
    Edit(&'a str),
}

impl Mode<'_> {
    fn title(&self) -> &'static str {
        match self {
            Mode::Create => "Agregar Libro",
            Mode::Edit(_) => "Editar Libro",
        }
    }

    fn action(&self) -> String {
        match self {
            Mode::Create => "/bookForm".to_string(),
            Mode::Edit(id) => format!("/bookFormEdit/{id}"),
        }
    }
}

pub async fn new_form() -> Html<String> {
    render(form_page(Mode::Create, &BookForm::default(), None))
}

pub async fn create_book(State(state): State<AppState>, Form(form): Form<BookForm>) -> Response {
    let payload = match form.normalize_for_create() {
        Ok(payload) => payload,
        Err(e) => return rejected(Mode::Create, &form, &e.to_string()),
    };

    match state.api.books().create(&payload).await {
        Ok(()) => Redirect::to("/libros").into_response(),
        Err(e) => {
            error!(error = %e, "Failed to create book");
            upstream_failed(Mode::Create, &form)
        }
    }
}

pub async fn edit_form(State(state): State<AppState>, Path(id): Path<String>) -> WebResult<Html<String>> {
    let book = state.api.books().get(&id).await?;
    Ok(render(form_page(Mode::Edit(&id), &BookForm::from_book(&book), None)))
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookForm>,
) -> Response {
    let mode = Mode::Edit(&id);

    let payload = match form.normalize_for_update() {
        Ok(payload) => payload,
        Err(e) => return rejected(mode, &form, &e.to_string()),
    };

    match state.api.books().update(&id, &payload).await {
        Ok(()) => Redirect::to("/libros").into_response(),
        Err(e) => {
            error!(id = %id, error = %e, "Failed to update book");
            upstream_failed(mode, &form)
        }
    }
}

fn rejected(mode: Mode<'_>, form: &BookForm, message: &str) -> Response {
    warn!(message = %message, "Book form rejected");
    (StatusCode::BAD_REQUEST, render(form_page(mode, form, Some(message)))).into_response()
}

fn upstream_failed(mode: Mode<'_>, form: &BookForm) -> Response {
    (StatusCode::BAD_GATEWAY, render(form_page(mode, form, Some(REQUEST_FAILED)))).into_response()
}

// =============================================================================
// Template
// =============================================================================

fn text_field(label: &str, name: &str, value: &str) -> Markup {
    html! {
        label {
            (label)
            input type="text" name=(name) value=(value) required;
        }
    }
}

fn number_field(label: &str, name: &str, value: &str) -> Markup {
    html! {
        label {
            (label)
            input type="number" name=(name) value=(value) min="0" step="1" required;
        }
    }
}

fn form_page(mode: Mode<'_>, form: &BookForm, message: Option<&str>) -> Markup {
    let cover = form.cover_url();

    page(
        mode.title(),
        Some(NavItem::Books),
        html! {
            div.toolbar {
                h1 { (mode.title()) }
                a.btn.btn-muted href="/libros" { "Cancelar" }
            }
            (flash(message))
            form.form-grid method="post" action=(mode.action()) {
                (text_field("Nombre", "name", &form.name))
                (text_field("Editorial", "editorial", &form.editorial))
                (text_field("Edición", "edition", &form.edition))
                (text_field("Autor", "author", &form.author))
                (text_field("Género", "genre", &form.genre))
                (number_field("Páginas", "pages", &form.pages))
                (number_field("Cantidad total", "amountTotal", &form.amount_total))
                (number_field("Cantidad disponible", "amountAvailable", &form.amount_available))
                label {
                    "Sinopsis"
                    textarea name="synopsis" rows="5" required { (form.synopsis) }
                }
                (text_field("Estado", "status", &form.status))
                label {
                    "URL de portada"
                    input type="url" name="bookImage" value=[cover.as_deref()];
                }
                @if let Some(url) = &cover {
                    img src=(url) alt="Portada" width="120";
                }
                button.btn type="submit" { "Guardar" }
            }
        },
    )
}
