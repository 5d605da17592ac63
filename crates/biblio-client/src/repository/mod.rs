//! # Repository Module
//!
//! Remote API repositories for Biblio Admin.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  axum handler                                                          │
//! │       │                                                                 │
//! │       │  state.api.books().list()                                      │
//! │       ▼                                                                 │
//! │  BookRepository                                                        │
//! │  ├── list(&self)                     GET    /books                     │
//! │  ├── get(&self, id)                  GET    /books/{id}                │
//! │  ├── create(&self, payload)          POST   /books/createBook          │
//! │  ├── update(&self, id, payload)      PUT    /books/update/{id}         │
//! │  └── delete(&self, id)               DELETE /books/delete/{id}         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Library REST API                                                      │
//! │                                                                         │
//! │  Handlers never build URLs or touch reqwest directly.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`books::BookRepository`] - Book catalogue CRUD
//! - [`users::UserRepository`] - Users, roles and fines
//! - [`rents::RentRepository`] - Rents and returns

pub mod books;
pub mod rents;
pub mod users;
