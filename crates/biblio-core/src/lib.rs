//! # biblio-core: Pure Logic for Biblio Admin
//!
//! This crate holds every piece of dashboard logic that can run without a
//! network: the domain records returned by the library API, the list view
//! (filter + sort + paginate), book form normalization and validation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Biblio Admin Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  admin-web (axum + maud)                        │   │
//! │  │    /libros ── /bookForm ── /usuarios ── /multas ── /devoluciones│   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ biblio-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  listing  │  │   form    │  │ validation│  │   │
//! │  │   │   Book    │  │ ViewState │  │ BookForm  │  │   rules   │  │   │
//! │  │   │ User/Rent │  │ PageResult│  │ Payload   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 biblio-client (Remote REST API)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records returned by the API (Book, User, Rent)
//! - [`listing`] - The list view controller: filter, sort, paginate
//! - [`form`] - Book form normalization for create and update
//! - [`money`] - Integer money for fine amounts
//! - [`validation`] - Field validators
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use biblio_core::listing::{ListSpec, ListViewController};
//! use biblio_core::Book;
//!
//! let books: Vec<Book> = Vec::new();
//! let controller = ListViewController::new(books, ListSpec::books(10));
//! let page = controller.compute_page();
//!
//! assert!(page.records.is_empty());
//! assert_eq!(page.total_pages, 0);
//! assert_eq!(page.current_page, 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod form;
pub mod listing;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use form::{BookForm, BookPayload};
pub use listing::{FieldValue, ListSpec, ListViewController, PageResult, Record, SortDirection, ViewState};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default number of books shown per page on `/libros`.
pub const DEFAULT_BOOKS_PAGE_SIZE: usize = 10;

/// Default number of rents shown per page on `/devoluciones`.
///
/// Matches the page size the returns screen has always used.
pub const DEFAULT_RENTS_PAGE_SIZE: usize = 20;

/// Default number of users shown per page on `/usuarios` and `/multas`.
pub const DEFAULT_USERS_PAGE_SIZE: usize = 25;

/// Upper bound for any configured page size.
pub const MAX_PAGE_SIZE: usize = 500;
