//! # Returns Page
//!
//! `GET /devoluciones` lists rents with their borrower; `POST
//! /devoluciones/{id}/devolver` marks one returned.
//!
//! ## Status Filter
//! ```text
//! ?filter=            → Todos
//! ?filter=pending     → Pendientes  (return_date is null)
//! ?filter=returned    → Devueltos
//! ?filter=<anything>  → Todos
//! ```
//!
//! Page count follows the filtered rows, so "Pendientes" never shows
//! trailing empty pages.

use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use maud::{html, Markup};
use tracing::{debug, warn};

use biblio_core::{ListSpec, ListViewController, RentRow, RentStatus, RentStatusFilter};

use crate::error::WebResult;
use crate::list_query::ListQuery;
use crate::views::{filter_form, flash, page, pagination, sort_header, FilterOption, NavItem};
use crate::AppState;

use super::{redirect_with_error, render};

const PATH: &str = "/devoluciones";

/// Status filter named by the query; unknown values show everything.
fn status_filter(query: &ListQuery) -> RentStatusFilter {
    let raw = query.filter.as_deref().unwrap_or_default();
    raw.parse().unwrap_or_else(|e| {
        debug!(error = %e, "Ignoring unknown status filter");
        RentStatusFilter::All
    })
}

pub async fn list_rents(State(state): State<AppState>, Query(query): Query<ListQuery>) -> WebResult<Html<String>> {
    let rows = state.api.rents().list_with_borrowers().await?;

    let spec = ListSpec::rents(state.config.pages.rents);
    let mut view_state = query.view_state(&spec);
    view_state.category_filter = status_filter(&query).as_category();
    let view = ListViewController::with_state(rows, spec, view_state);

    let error = query
        .has_error()
        .then_some("Error returning books. Please try again.");

    Ok(render(rents_page(&view, error)))
}

pub async fn return_rent(State(state): State<AppState>, Path(rent_id): Path<String>) -> Redirect {
    match state.api.rents().mark_returned(&rent_id).await {
        Ok(()) => Redirect::to(PATH),
        Err(e) => {
            warn!(rent_id = %rent_id, error = %e, "Failed to mark rent returned");
            redirect_with_error(PATH)
        }
    }
}

fn rent_books(row: &RentRow) -> Markup {
    html! {
        ul {
            @for line in &row.rent.books {
                li {
                    (line.title())
                    @if let Some(amount) = line.amount_rented {
                        " × " (amount)
                    }
                }
            }
        }
    }
}

fn rents_page(view: &ListViewController<RentRow>, error: Option<&str>) -> Markup {
    let result = view.compute_page();
    let statuses: Vec<FilterOption> = [RentStatusFilter::Pending, RentStatusFilter::Returned]
        .iter()
        .map(|status| FilterOption::new(status.as_str(), status.label()))
        .collect();

    page(
        "Devoluciones",
        Some(NavItem::Returns),
        html! {
            div.toolbar {
                h1 { "Devoluciones" }
            }
            (flash(error))
            (filter_form(PATH, view, Some("Buscar por usuario"), "Estado:", &statuses))
            table {
                thead {
                    tr {
                        (sort_header(PATH, view, "user", "Usuario"))
                        (sort_header(PATH, view, "copies", "Libros"))
                        (sort_header(PATH, view, "rentDate", "Fecha"))
                        (sort_header(PATH, view, "returnDate", "Devolución"))
                        (sort_header(PATH, view, "status", "Estado"))
                        th { "Acciones" }
                    }
                }
                tbody {
                    @for row in &result.records {
                        tr {
                            td { (row.borrower) }
                            td { (rent_books(row)) }
                            td {
                                @if let Some(date) = row.rent.rent_date {
                                    (date.format("%Y-%m-%d").to_string())
                                }
                            }
                            td {
                                @if let Some(date) = row.rent.return_date {
                                    (date.format("%Y-%m-%d").to_string())
                                }
                            }
                            td {
                                @match row.rent.status() {
                                    RentStatus::Returned => {
                                        span.badge.badge-admin { (RentStatus::Returned.label()) }
                                    }
                                    RentStatus::Pending => {
                                        span.badge.badge-fine { (RentStatus::Pending.label()) }
                                    }
                                }
                            }
                            td {
                                @if !row.rent.is_returned() {
                                    form.inline method="post" action={ "/devoluciones/" (row.rent.return_key()) "/devolver" }
                                        onsubmit="return confirm('¿Confirmar la devolución de este préstamo?')" {
                                        button.btn.btn-success type="submit" { "Devolver" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
            @if result.is_empty() {
                p.empty { "No se encontraron préstamos." }
            }
            (pagination(PATH, view, &result))
        },
    )
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::{get, put};
    use axum::{Json, Router};
    use serde_json::json;

    use crate::testing::{location, spawn_app, spawn_app_with};

    use super::*;

    struct Upstream {
        lookups: Arc<AtomicUsize>,
        returned: Arc<Mutex<Vec<String>>>,
    }

    fn rents_api(upstream: &Upstream) -> Router {
        let lookups = upstream.lookups.clone();
        let returned = upstream.returned.clone();

        Router::new()
            .route(
                "/rent/rents",
                get(|| async {
                    Json(json!([
                        {"_id": "r1", "rent_id": "R-1", "user_id": "u1",
                         "books": [{"id_Book": {"name": "Rayuela"}, "bookId": "b1", "amount_rented": 2}],
                         "rent_date": "2024-04-01T10:00:00Z", "return_date": null},
                        {"_id": "r2", "rent_id": "R-2", "user_id": "u2",
                         "books": [{"id_Book": null, "bookId": "b9", "amount_rented": 1}],
                         "rent_date": "2024-04-02T10:00:00Z", "return_date": "2024-04-20T10:00:00Z"},
                        {"_id": "r3", "rent_id": "", "user_id": "u1", "books": [],
                         "rent_date": "2024-04-03T10:00:00Z", "return_date": null}
                    ]))
                }),
            )
            .route(
                "/users/id/{id}",
                get(move |Path(id): Path<String>| async move {
                    lookups.fetch_add(1, Ordering::SeqCst);
                    match id.as_str() {
                        "u1" => Ok(Json(json!({"_id": "u1", "name": "Ana"}))),
                        _ => Err(StatusCode::NOT_FOUND),
                    }
                }),
            )
            .route(
                "/rent/rents/{id}",
                put(move |Path(id): Path<String>| async move {
                    returned.lock().unwrap().push(id);
                    StatusCode::OK
                }),
            )
    }

    fn upstream() -> Upstream {
        Upstream {
            lookups: Arc::new(AtomicUsize::new(0)),
            returned: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[test]
    fn test_status_filter_is_lenient() {
        let query = |filter: &str| ListQuery {
            filter: Some(filter.to_string()),
            ..Default::default()
        };

        assert_eq!(status_filter(&ListQuery::default()), RentStatusFilter::All);
        assert_eq!(status_filter(&query("pending")), RentStatusFilter::Pending);
        assert_eq!(status_filter(&query("Returned")), RentStatusFilter::Returned);
        assert_eq!(status_filter(&query("lost")), RentStatusFilter::All);
    }

    #[tokio::test]
    async fn test_lists_rents_with_borrowers() {
        let upstream = upstream();
        let app = spawn_app(rents_api(&upstream)).await;
        let (status, html) = app.get_html("/devoluciones").await;

        assert_eq!(status, 200);
        assert!(html.contains("Ana"));
        assert!(html.contains("Desconocido"));
        assert!(html.contains("Rayuela × 2"));
        assert!(html.contains("2024-04-01"));
        // u1 appears twice but is looked up once
        assert_eq!(upstream.lookups.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_return_buttons_only_for_pending() {
        let upstream = upstream();
        let app = spawn_app(rents_api(&upstream)).await;
        let (_, html) = app.get_html("/devoluciones").await;

        assert!(html.contains(r#"action="/devoluciones/R-1/devolver""#));
        assert!(!html.contains(r#"action="/devoluciones/R-2/devolver""#));
        // Rent without a business id falls back to its document id
        assert!(html.contains(r#"action="/devoluciones/r3/devolver""#));
    }

    #[tokio::test]
    async fn test_return_asks_for_confirmation() {
        let upstream = upstream();
        let app = spawn_app(rents_api(&upstream)).await;
        let (_, html) = app.get_html("/devoluciones").await;

        let forms = html.matches(r#"/devolver""#).count();
        let confirms = html
            .matches(r#"onsubmit="return confirm('¿Confirmar la devolución de este préstamo?')""#)
            .count();
        assert_eq!(forms, 2);
        assert_eq!(confirms, forms);
    }

    #[tokio::test]
    async fn test_sort_by_copies_and_return_date() {
        let upstream = upstream();
        let app = spawn_app(rents_api(&upstream)).await;

        let (_, html) = app.get_html("/devoluciones?sort=copies&dir=desc").await;
        let most = html.find("Rayuela × 2").unwrap();
        let fewer = html.find("2024-04-20").unwrap();
        assert!(most < fewer);
        assert!(html.contains(r#"href="/devoluciones?sort=returnDate"#));

        let (_, html) = app.get_html("/devoluciones?sort=returnDate&dir=desc").await;
        let returned = html.find("2024-04-20").unwrap();
        let pending = html.find("2024-04-01").unwrap();
        assert!(returned < pending);
    }

    #[tokio::test]
    async fn test_pending_filter_counts_filtered_pages() {
        let upstream = upstream();
        let app = spawn_app_with(rents_api(&upstream), |config| config.pages.rents = 1).await;

        let (_, html) = app.get_html("/devoluciones?filter=pending").await;
        assert!(html.contains("Página 1 de 2"));
        assert!(!html.contains("R-2"));

        let (_, html) = app.get_html("/devoluciones?filter=returned").await;
        assert!(html.contains("Página 1 de 1"));

        let (_, html) = app.get_html("/devoluciones?filter=bogus").await;
        assert!(html.contains("Página 1 de 3"));
    }

    #[tokio::test]
    async fn test_newest_first() {
        let upstream = upstream();
        let app = spawn_app(rents_api(&upstream)).await;
        let (_, html) = app.get_html("/devoluciones?sort=rentDate&dir=desc").await;

        let newest = html.find("2024-04-03").unwrap();
        let oldest = html.find("2024-04-01").unwrap();
        assert!(newest < oldest);
    }

    #[tokio::test]
    async fn test_mark_returned() {
        let upstream = upstream();
        let app = spawn_app(rents_api(&upstream)).await;

        let response = app.post_form("/devoluciones/R-1/devolver", &[]).await;
        assert_eq!(response.status().as_u16(), 303);
        assert_eq!(location(&response), "/devoluciones");
        assert_eq!(*upstream.returned.lock().unwrap(), vec!["R-1".to_string()]);
    }
}
