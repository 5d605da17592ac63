//! # Views
//!
//! maud templates shared by every page.
//!
//! ## Page Anatomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  navbar: Libros · Usuarios · Multas · Devoluciones                     │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  h1 title                                       [search / filter form] │
//! │  (flash message)                                                        │
//! │  ┌───────────────────────────────────────────────────────────────────┐ │
//! │  │ sort_header ▲ │ sort_header │ ...                                 │ │
//! │  │ rows from PageResult                                              │ │
//! │  └───────────────────────────────────────────────────────────────────┘ │
//! │  [Anterior]            Página X de Y                      [Siguiente]   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod layout;
pub mod list;

pub use layout::{flash, page, NavItem};
pub use list::{filter_form, pagination, sort_header, FilterOption};
