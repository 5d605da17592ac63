//! # biblio-client: Remote API Layer for Biblio Admin
//!
//! This crate provides access to the remote library REST API. The dashboard
//! keeps no data of its own: every list is fetched from here, every edit is
//! sent here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Biblio Admin Data Flow                           │
//! │                                                                         │
//! │  axum handler (GET /libros)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   biblio-client (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ LibraryClient │    │  Repositories │    │    Errors    │  │   │
//! │  │   │  (client.rs)  │    │  (books.rs)   │    │  (error.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ reqwest pool  │◄───│ BookRepo      │    │ ClientError  │  │   │
//! │  │   │ base URL      │    │ UserRepo      │    │ is_retryable │  │   │
//! │  │   │ token         │    │ RentRepo      │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼  HTTPS + JSON                                                   │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Library REST API                            │   │
//! │  │   /books  /users  /rent                                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`client`] - Client configuration and request plumbing
//! - [`error`] - API error types
//! - [`repository`] - Repository implementations (books, users, rents)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use biblio_client::{ClientConfig, LibraryClient};
//!
//! let client = LibraryClient::new(ClientConfig::new("https://api.example.org"))?;
//!
//! let books = client.books().list().await?;
//! client.users().clear_fine("65f1c0ffee0000000000abcd").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod error;
pub mod repository;

#[cfg(test)]
pub(crate) mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::{ClientConfig, LibraryClient, DEFAULT_BASE_URL};
pub use error::{ClientError, ClientResult};

// Repository re-exports for convenience
pub use repository::books::BookRepository;
pub use repository::rents::RentRepository;
pub use repository::users::UserRepository;
