//! # Users Page
//!
//! `GET /usuarios` lists every user with a role badge and a role selector;
//! `POST /usuarios/{id}/rol` applies the selector.

use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use axum::Form;
use maud::{html, Markup};
use serde::Deserialize;
use tracing::warn;

use biblio_core::{ListSpec, ListViewController, Role, User};

use crate::error::WebResult;
use crate::list_query::ListQuery;
use crate::views::{filter_form, flash, page, pagination, sort_header, FilterOption, NavItem};
use crate::AppState;

use super::{list_view, redirect_with_error, render};

const PATH: &str = "/usuarios";

/// Body of the role selector.
#[derive(Debug, Deserialize)]
pub struct RoleForm {
    pub role: String,
}

pub async fn list_users(State(state): State<AppState>, Query(query): Query<ListQuery>) -> WebResult<Html<String>> {
    let users = state.api.users().list().await?;
    let view = list_view(users, ListSpec::users(state.config.pages.users), &query);

    let error = query
        .has_error()
        .then_some("Error updating user status. Please try again.");

    Ok(render(users_page(&view, error)))
}

pub async fn change_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<RoleForm>,
) -> Redirect {
    let role: Role = match form.role.parse() {
        Ok(role) => role,
        Err(e) => {
            warn!(id = %id, error = %e, "Rejected role change");
            return redirect_with_error(PATH);
        }
    };

    match state.api.users().set_role(&id, role).await {
        Ok(()) => Redirect::to(PATH),
        Err(e) => {
            warn!(id = %id, error = %e, "Failed to update user role");
            redirect_with_error(PATH)
        }
    }
}

fn role_badge(role: Role) -> Markup {
    let class = if role.is_admin() { "badge badge-admin" } else { "badge badge-regular" };
    html! { span class=(class) { (role.label()) } }
}

fn role_selector(user: &User) -> Markup {
    let current = user.role();
    html! {
        form.inline method="post" action={ "/usuarios/" (user.id) "/rol" } {
            select name="role" onchange="this.form.submit()" {
                @for role in [Role::Admin, Role::Regular] {
                    option value=(role.as_str()) selected[role == current] { (role.label()) }
                }
            }
            noscript { button.btn type="submit" { "Guardar" } }
        }
    }
}

fn users_page(view: &ListViewController<User>, error: Option<&str>) -> Markup {
    let result = view.compute_page();
    let roles = [
        FilterOption::new(Role::Admin.as_str(), Role::Admin.label()),
        FilterOption::new(Role::Regular.as_str(), Role::Regular.label()),
    ];

    page(
        "Usuarios",
        Some(NavItem::Users),
        html! {
            div.toolbar {
                h1 { "Usuarios" }
            }
            (flash(error))
            (filter_form(PATH, view, Some("Buscar por nombre"), "Rol:", &roles))
            table {
                thead {
                    tr {
                        (sort_header(PATH, view, "name", "Nombre"))
                        (sort_header(PATH, view, "email", "Email"))
                        (sort_header(PATH, view, "role", "Rol"))
                        th { "Cambiar rol" }
                    }
                }
                tbody {
                    @for user in &result.records {
                        tr {
                            td { (user.name) }
                            td { (user.email) }
                            td { (role_badge(user.role())) }
                            td { (role_selector(user)) }
                        }
                    }
                }
            }
            @if result.is_empty() {
                p.empty { "No se encontraron usuarios." }
            }
            (pagination(PATH, view, &result))
        },
    )
}
