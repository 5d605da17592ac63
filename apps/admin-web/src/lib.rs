//! # Biblio Admin
//!
//! Server-rendered admin dashboard for the library API.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Dashboard Routes                                │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  /libros       │  │  /usuarios     │  │  /devoluciones             ││
//! │  │                │  │                │  │                            ││
//! │  │ • list/search  │  │ • list/search  │  │ • list by status           ││
//! │  │ • delete       │  │ • change role  │  │ • mark returned            ││
//! │  │ • /bookForm    │  │                │  │                            ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐                                │
//! │  │  /multas       │  │  /health       │                                │
//! │  │                │  │                │                                │
//! │  │ • list fines   │  │ • "OK"         │                                │
//! │  │ • clear fine   │  │ (no session)   │                                │
//! │  └────────────────┘  └────────────────┘                                │
//! │                                                                         │
//! │  session guard ──► handler ──► biblio-client ──► ListViewController    │
//! │                                                    ──► maud page       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every page fetches fresh data: the dashboard keeps no state between
//! requests apart from what the query string carries.
//!
//! ## Configuration
//! See [`config`]. Environment variables:
//! - `BIBLIO_CONFIG` - Path to `admin.toml`
//! - `BIBLIO_API_URL` - Library API base URL
//! - `BIBLIO_PORT` - Dashboard port (default: 3000)

pub mod config;
pub mod error;
pub mod list_query;
pub mod routes;
pub mod session;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use biblio_client::{ClientResult, LibraryClient};

// Re-exports
pub use config::AdminConfig;
pub use error::{WebError, WebResult};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub api: LibraryClient,
    pub config: Arc<AdminConfig>,
}

impl AppState {
    /// Builds the API client described by `config`.
    pub fn new(config: AdminConfig) -> ClientResult<Self> {
        let api = LibraryClient::new(config.client_config())?;
        Ok(AppState {
            api,
            config: Arc::new(config),
        })
    }
}

/// The complete dashboard router.
pub fn router(state: AppState) -> Router {
    let dashboard = Router::new()
        .route("/", get(routes::index))
        // Books
        .route("/libros", get(routes::books::list_books))
        .route("/libros/{id}/eliminar", post(routes::books::delete_book))
        .route(
            "/bookForm",
            get(routes::book_form::new_form).post(routes::book_form::create_book),
        )
        .route(
            "/bookFormEdit/{id}",
            get(routes::book_form::edit_form).post(routes::book_form::update_book),
        )
        // Users
        .route("/usuarios", get(routes::users::list_users))
        .route("/usuarios/{id}/rol", post(routes::users::change_role))
        // Fines
        .route("/multas", get(routes::fines::list_fines))
        .route("/multas/{id}/pagar", post(routes::fines::clear_fine))
        // Returns
        .route("/devoluciones", get(routes::rents::list_rents))
        .route("/devoluciones/{id}/devolver", post(routes::rents::return_rent))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session::require_session,
        ));

    Router::new()
        .merge(dashboard)
        .route("/health", get(routes::health::health_handler))
        .with_state(state)
}
