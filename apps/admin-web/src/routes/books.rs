//! # Books Page
//!
//! `GET /libros` lists the catalogue; `POST /libros/{id}/eliminar` deletes
//! one book and comes back.

use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use maud::{html, Markup};
use tracing::warn;

use biblio_core::{Book, ListSpec, ListViewController};

use crate::error::WebResult;
use crate::list_query::ListQuery;
use crate::views::{filter_form, flash, page, pagination, sort_header, FilterOption, NavItem};
use crate::AppState;

use super::{list_view, redirect_with_error, render};

const PATH: &str = "/libros";

pub async fn list_books(State(state): State<AppState>, Query(query): Query<ListQuery>) -> WebResult<Html<String>> {
    let books = state.api.books().list().await?;
    let view = list_view(books, ListSpec::books(state.config.pages.books), &query);

    let error = query
        .has_error()
        .then_some("Error deleting book. Please try again.");

    Ok(render(books_page(&view, error)))
}

pub async fn delete_book(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    match state.api.books().delete(&id).await {
        Ok(()) => Redirect::to(PATH),
        Err(e) => {
            warn!(id = %id, error = %e, "Failed to delete book");
            redirect_with_error(PATH)
        }
    }
}

fn count(value: Option<i64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

fn books_page(view: &ListViewController<Book>, error: Option<&str>) -> Markup {
    let result = view.compute_page();
    let genres: Vec<FilterOption> = view.categories().into_iter().map(FilterOption::plain).collect();

    page(
        "Libros",
        Some(NavItem::Books),
        html! {
            div.toolbar {
                h1 { "Libros" }
                a.btn.btn-success href="/bookForm" { "Agregar Libro" }
            }
            (flash(error))
            (filter_form(PATH, view, Some("Buscar por nombre"), "Género:", &genres))
            table {
                thead {
                    tr {
                        (sort_header(PATH, view, "name", "Nombre"))
                        (sort_header(PATH, view, "editorial", "Editorial"))
                        (sort_header(PATH, view, "author", "Autor"))
                        (sort_header(PATH, view, "genre", "Género"))
                        (sort_header(PATH, view, "amountAvailable", "Disponibles"))
                        th { "Acciones" }
                    }
                }
                tbody {
                    @for book in &result.records {
                        tr {
                            td { (book.name) }
                            td { (book.editorial) }
                            td { (book.author) }
                            td { (book.genre) }
                            td { (count(book.amount_available)) }
                            td {
                                a.btn href={ "/bookFormEdit/" (book.id) } { "Editar" }
                                " "
                                form.inline method="post" action={ "/libros/" (book.id) "/eliminar" }
                                    onsubmit="return confirm('¿Seguro que deseas eliminar este libro?')" {
                                    button.btn.btn-danger type="submit" { "Eliminar" }
                                }
                            }
                        }
                    }
                }
            }
            @if result.is_empty() {
                p.empty { "No se encontraron libros." }
            }
            (pagination(PATH, view, &result))
        },
    )
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::http::StatusCode;
    use axum::routing::{delete, get};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use crate::testing::{location, spawn_app, spawn_app_with};

    fn catalogue() -> Value {
        let genres = ["Novela", "Cuento", "Poesía"];
        let books: Vec<Value> = (0..12)
            .map(|i| {
                json!({
                    "_id": format!("b{i:02}"),
                    "name": format!("Libro {i:02}"),
                    "editorial": "Sudamericana",
                    "author": format!("Autor {}", 12 - i),
                    "genre": genres[i % 3],
                    "amountAvailable": i.to_string(),
                })
            })
            .collect();
        Value::Array(books)
    }

    fn books_api(deleted: Arc<Mutex<Vec<String>>>) -> Router {
        Router::new()
            .route("/books", get(|| async { Json(catalogue()) }))
            .route(
                "/books/delete/{id}",
                delete(
                    move |axum::extract::Path(id): axum::extract::Path<String>| async move {
                        if id == "broken" {
                            return StatusCode::INTERNAL_SERVER_ERROR;
                        }
                        deleted.lock().unwrap().push(id);
                        StatusCode::OK
                    },
                ),
            )
    }

    #[tokio::test]
    async fn test_first_page_is_sorted_by_name() {
        let app = spawn_app(books_api(Arc::default())).await;
        let (status, html) = app.get_html("/libros").await;

        assert_eq!(status, 200);
        assert!(html.contains("Libro 00"));
        assert!(html.contains("Libro 09"));
        assert!(!html.contains("Libro 10"));
        assert!(html.contains("Página 1 de 2"));
    }

    #[tokio::test]
    async fn test_sort_descending_by_author() {
        let app = spawn_app(books_api(Arc::default())).await;
        let (_, html) = app.get_html("/libros?sort=author&dir=desc").await;

        // "Autor 9" sorts last in byte order, so it comes first descending
        let first = html.find("Autor 9").unwrap();
        let second = html.find("Autor 8").unwrap();
        assert!(first < second);
        assert!(html.contains("Autor ▼"));
    }

    #[tokio::test]
    async fn test_search_and_genre_filter() {
        let app = spawn_app(books_api(Arc::default())).await;

        let (_, html) = app.get_html("/libros?q=libro+1").await;
        assert!(html.contains("Libro 10"));
        assert!(html.contains("Libro 11"));
        assert!(!html.contains("Libro 09"));
        assert!(html.contains("Página 1 de 1"));

        let (_, html) = app.get_html("/libros?filter=Cuento").await;
        assert!(html.contains("Libro 01"));
        assert!(!html.contains("Libro 00"));
    }

    #[tokio::test]
    async fn test_no_matches() {
        let app = spawn_app(books_api(Arc::default())).await;
        let (status, html) = app.get_html("/libros?q=zzz&page=4").await;

        assert_eq!(status, 200);
        assert!(html.contains("No se encontraron libros."));
        assert!(html.contains("Página 1 de 0"));
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_clamped() {
        let app = spawn_app_with(books_api(Arc::default()), |config| config.pages.books = 5).await;
        let (_, html) = app.get_html("/libros?page=99").await;

        assert!(html.contains("Página 3 de 3"));
        assert!(html.contains("Libro 11"));
    }

    #[tokio::test]
    async fn test_delete_redirects_back() {
        let deleted = Arc::new(Mutex::new(Vec::new()));
        let app = spawn_app(books_api(deleted.clone())).await;

        let response = app.post_form("/libros/b03/eliminar", &[]).await;
        assert_eq!(response.status().as_u16(), 303);
        assert_eq!(location(&response), "/libros");
        assert_eq!(*deleted.lock().unwrap(), vec!["b03".to_string()]);

        let response = app.post_form("/libros/broken/eliminar", &[]).await;
        assert_eq!(location(&response), "/libros?error=1");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_502() {
        let api = Router::new().route("/books", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
        let app = spawn_app(api).await;
        let (status, html) = app.get_html("/libros").await;

        assert_eq!(status, 502);
        assert!(html.contains("Request failed"));
    }
}
