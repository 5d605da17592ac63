//! # Fines Page
//!
//! `GET /multas` lists users with an outstanding fine; `POST
//! /multas/{id}/pagar` marks it paid.

use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use maud::{html, Markup};
use tracing::warn;

use biblio_core::{ListSpec, ListViewController, User};

use crate::error::WebResult;
use crate::list_query::ListQuery;
use crate::views::{filter_form, flash, page, pagination, sort_header, NavItem};
use crate::AppState;

use super::{list_view, redirect_with_error, render};

const PATH: &str = "/multas";

pub async fn list_fines(State(state): State<AppState>, Query(query): Query<ListQuery>) -> WebResult<Html<String>> {
    let users = state.api.users().list_with_fines().await?;
    let view = list_view(users, ListSpec::fines(state.config.pages.users), &query);

    let error = query
        .has_error()
        .then_some("Error clearing multa. Please try again.");

    Ok(render(fines_page(&view, error)))
}

pub async fn clear_fine(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    match state.api.users().clear_fine(&id).await {
        Ok(()) => Redirect::to(PATH),
        Err(e) => {
            warn!(id = %id, error = %e, "Failed to clear fine");
            redirect_with_error(PATH)
        }
    }
}

fn fines_page(view: &ListViewController<User>, error: Option<&str>) -> Markup {
    let result = view.compute_page();

    page(
        "Multas",
        Some(NavItem::Fines),
        html! {
            div.toolbar {
                h1 { "Multas" }
            }
            (flash(error))
            @if view.records().is_empty() {
                p.empty { "No existen multas actuales." }
            } @else {
                (filter_form(PATH, view, Some("Buscar por nombre"), "", &[]))
                table {
                    thead {
                        tr {
                            (sort_header(PATH, view, "name", "Nombre"))
                            (sort_header(PATH, view, "email", "Email"))
                            (sort_header(PATH, view, "multa", "Multa"))
                            th { "Acciones" }
                        }
                    }
                    tbody {
                        @for user in &result.records {
                            tr {
                                td { (user.name) }
                                td { (user.email) }
                                td { span.badge.badge-fine { "Multa: " (user.multa.to_string()) } }
                                td {
                                    form.inline method="post" action={ "/multas/" (user.id) "/pagar" } {
                                        button.btn.btn-success type="submit" { "Pagar" }
                                    }
                                }
                            }
                        }
                    }
                }
                @if result.is_empty() {
                    p.empty { "No se encontraron usuarios." }
                }
                (pagination(PATH, view, &result))
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use crate::testing::{location, spawn_app};

    fn fines_api(users: Value, cleared: Arc<Mutex<Vec<String>>>) -> Router {
        Router::new()
            .route(
                "/users/admin/allUsers",
                get(move || async move { Json(users) }),
            )
            .route(
                "/users/admin/clear-multa/{id}",
                post(move |Path(id): Path<String>| async move {
                    if id == "broken" {
                        return StatusCode::BAD_GATEWAY;
                    }
                    cleared.lock().unwrap().push(id);
                    StatusCode::OK
                }),
            )
    }

    fn some_fines() -> Value {
        json!([
            {"_id": "u1", "name": "Ana", "email": "ana@example.org", "multa": 12.5},
            {"_id": "u2", "name": "Bruno", "email": "bruno@example.org", "multa": 0},
            {"_id": "u3", "name": "Carla", "email": "carla@example.org", "multa": "3"}
        ])
    }

    #[tokio::test]
    async fn test_lists_only_fined_users() {
        let app = spawn_app(fines_api(some_fines(), Arc::default())).await;
        let (status, html) = app.get_html("/multas").await;

        assert_eq!(status, 200);
        assert!(html.contains("Multa: $12.50"));
        assert!(html.contains("Multa: $3.00"));
        assert!(!html.contains("bruno@example.org"));
        assert!(html.contains(r#"action="/multas/u1/pagar""#));
    }

    #[tokio::test]
    async fn test_sort_by_amount() {
        let app = spawn_app(fines_api(some_fines(), Arc::default())).await;
        let (_, html) = app.get_html("/multas?sort=multa&dir=asc").await;

        let carla = html.find("carla@example.org").unwrap();
        let ana = html.find("ana@example.org").unwrap();
        assert!(carla < ana);
    }

    #[tokio::test]
    async fn test_no_fines_message() {
        let users = json!([{"_id": "u2", "name": "Bruno", "multa": 0}]);
        let app = spawn_app(fines_api(users, Arc::default())).await;
        let (_, html) = app.get_html("/multas").await;

        assert!(html.contains("No existen multas actuales."));
        assert!(!html.contains("<table>"));
    }

    #[tokio::test]
    async fn test_pay_clears_fine() {
        let cleared = Arc::new(Mutex::new(Vec::new()));
        let app = spawn_app(fines_api(some_fines(), cleared.clone())).await;

        let response = app.post_form("/multas/u1/pagar", &[]).await;
        assert_eq!(response.status().as_u16(), 303);
        assert_eq!(location(&response), "/multas");
        assert_eq!(*cleared.lock().unwrap(), vec!["u1".to_string()]);

        let response = app.post_form("/multas/broken/pagar", &[]).await;
        assert_eq!(location(&response), "/multas?error=1");
    }
}
