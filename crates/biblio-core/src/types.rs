//! # Domain Types
//!
//! Records returned by the remote library API.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Book       │   │      User       │   │      Rent       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  _id            │   │  _id            │   │  _id / rent_id  │       │
//! │  │  name, author   │   │  name, email    │   │  user_id        │       │
//! │  │  genre          │   │  isAdmin        │   │  books[]        │       │
//! │  │  amountTotal    │   │  multa (Money)  │   │  return_date    │       │
//! │  │  amountAvailable│   └─────────────────┘   └────────┬────────┘       │
//! │  └─────────────────┘                                  │                 │
//! │                                              ┌────────▼────────┐       │
//! │  ┌─────────────────┐   ┌─────────────────┐   │    RentRow      │       │
//! │  │      Role       │   │RentStatusFilter │   │  rent + borrower│       │
//! │  │  Admin/Regular  │   │ All/Pending/    │   │  display name   │       │
//! │  └─────────────────┘   │ Returned        │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every record carries the API-assigned Mongo-style `_id`. Rents also have
//! a business `rent_id`, which is what the return endpoint expects.
//!
//! ## Lenient Numbers
//! The API is not consistent about numeric fields: `pages` may arrive as
//! `320`, `"320"` or `null`. The [`lenient`] deserializers accept all three.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::listing::{FieldValue, Record};
use crate::money::Money;

/// Display name used when a rent's borrower cannot be resolved.
pub const UNKNOWN_BORROWER: &str = "Desconocido";

/// Title shown for a rented book whose document no longer exists.
pub const UNKNOWN_TITLE: &str = "Desconocido";

// =============================================================================
// Book
// =============================================================================

/// A book in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub editorial: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub edition: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub author: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub genre: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub pages: Option<i64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub amount_total: Option<i64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub amount_available: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub synopsis: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: String,
    /// Cover image URL. Older records use `imageUrl`.
    #[serde(default, alias = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub book_image: Option<String>,
}

impl Record for Book {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::text(&self.name),
            "editorial" => FieldValue::text(&self.editorial),
            "edition" => FieldValue::text(&self.edition),
            "author" => FieldValue::text(&self.author),
            "genre" => FieldValue::text(&self.genre),
            "status" => FieldValue::text(&self.status),
            "pages" => count_value(self.pages),
            "amountTotal" => count_value(self.amount_total),
            "amountAvailable" => count_value(self.amount_available),
            _ => FieldValue::Missing,
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// A library user as returned by `/users/admin/allUsers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    /// Outstanding fine; zero when the API sends nothing.
    #[serde(default, deserialize_with = "lenient::money")]
    pub multa: Money,
}

impl User {
    pub fn role(&self) -> Role {
        Role::from_is_admin(self.is_admin)
    }

    /// True when the user appears on the fines page.
    pub fn has_fine(&self) -> bool {
        self.multa.is_positive()
    }
}

impl Record for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::text(&self.name),
            "email" => FieldValue::text(&self.email),
            "role" => FieldValue::text(self.role().as_str()),
            "multa" => FieldValue::Number(self.multa.as_major()),
            _ => FieldValue::Missing,
        }
    }
}

// =============================================================================
// Role
// =============================================================================

/// Dashboard role of a user, mapped onto the API's `isAdmin` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Regular,
}

impl Role {
    pub fn from_is_admin(is_admin: bool) -> Self {
        if is_admin {
            Role::Admin
        } else {
            Role::Regular
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Value used in selects and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Regular => "regular",
        }
    }

    /// Badge text shown in the users table.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::Regular => "Regular",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "regular" => Ok(Role::Regular),
            other => Err(CoreError::UnknownRole(other.to_string())),
        }
    }
}

// =============================================================================
// Rent
// =============================================================================

/// Title reference embedded in a rented book line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BookRef {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
}

/// One line of a rent: which book and how many copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentedBook {
    /// Populated book document; absent when the book was deleted.
    #[serde(rename = "id_Book", default)]
    pub book: Option<BookRef>,
    #[serde(rename = "bookId", default, deserialize_with = "lenient::text")]
    pub book_id: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub amount_rented: Option<i64>,
}

impl RentedBook {
    pub fn title(&self) -> &str {
        self.book.as_ref().map(|b| b.name.as_str()).unwrap_or(UNKNOWN_TITLE)
    }
}

/// A rent (loan) of one or more books.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rent {
    #[serde(rename = "_id")]
    pub id: String,
    /// Business identifier used by the return endpoint.
    #[serde(default, deserialize_with = "lenient::text")]
    pub rent_id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub user_id: String,
    #[serde(default)]
    pub books: Vec<RentedBook>,
    #[serde(default)]
    pub rent_date: Option<DateTime<Utc>>,
    /// `None` while the books are still out.
    #[serde(default)]
    pub return_date: Option<DateTime<Utc>>,
}

impl Rent {
    pub fn is_returned(&self) -> bool {
        self.return_date.is_some()
    }

    pub fn status(&self) -> RentStatus {
        if self.is_returned() {
            RentStatus::Returned
        } else {
            RentStatus::Pending
        }
    }

    /// Identifier to hand to the return endpoint: `rent_id`, or `_id` for
    /// rents created before business ids existed.
    pub fn return_key(&self) -> &str {
        if self.rent_id.trim().is_empty() {
            &self.id
        } else {
            &self.rent_id
        }
    }

    /// Total copies across all lines.
    pub fn copies(&self) -> i64 {
        self.books.iter().filter_map(|b| b.amount_rented).sum()
    }
}

/// Whether a rent is still out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentStatus {
    Pending,
    Returned,
}

impl RentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentStatus::Pending => "pending",
            RentStatus::Returned => "returned",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RentStatus::Pending => "Pendiente",
            RentStatus::Returned => "Devuelto",
        }
    }
}

/// Status selector on the returns page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RentStatusFilter {
    #[default]
    All,
    Pending,
    Returned,
}

impl RentStatusFilter {
    pub const ALL: [RentStatusFilter; 3] = [
        RentStatusFilter::All,
        RentStatusFilter::Pending,
        RentStatusFilter::Returned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RentStatusFilter::All => "all",
            RentStatusFilter::Pending => "pending",
            RentStatusFilter::Returned => "returned",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RentStatusFilter::All => "Todos",
            RentStatusFilter::Pending => "Pendientes",
            RentStatusFilter::Returned => "Devueltos",
        }
    }

    /// Category value for the list view; `All` means no filter.
    pub fn as_category(&self) -> Option<String> {
        match self {
            RentStatusFilter::All => None,
            RentStatusFilter::Pending => Some(RentStatus::Pending.as_str().to_string()),
            RentStatusFilter::Returned => Some(RentStatus::Returned.as_str().to_string()),
        }
    }
}

impl FromStr for RentStatusFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(RentStatusFilter::All),
            "pending" => Ok(RentStatusFilter::Pending),
            "returned" => Ok(RentStatusFilter::Returned),
            other => Err(CoreError::UnknownRentStatus(other.to_string())),
        }
    }
}

/// A rent joined with its borrower's display name, as listed on the
/// returns page.
#[derive(Debug, Clone, PartialEq)]
pub struct RentRow {
    pub rent: Rent,
    pub borrower: String,
}

impl RentRow {
    pub fn new(rent: Rent, borrower: Option<String>) -> Self {
        let borrower = borrower
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_BORROWER.to_string());
        RentRow { rent, borrower }
    }
}

impl Record for RentRow {
    fn id(&self) -> &str {
        &self.rent.id
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "user" => FieldValue::text(&self.borrower),
            "status" => FieldValue::text(self.rent.status().as_str()),
            "rentDate" => self
                .rent
                .rent_date
                .map_or(FieldValue::Missing, |d| FieldValue::Number(d.timestamp() as f64)),
            "returnDate" => self
                .rent
                .return_date
                .map_or(FieldValue::Missing, |d| FieldValue::Number(d.timestamp() as f64)),
            "copies" => FieldValue::Number(self.rent.copies() as f64),
            _ => FieldValue::Missing,
        }
    }
}

fn count_value(value: Option<i64>) -> FieldValue<'static> {
    value.map_or(FieldValue::Missing, |n| FieldValue::Number(n as f64))
}

// =============================================================================
// Lenient Deserializers
// =============================================================================

/// `deserialize_with` helpers for fields the API sends in several shapes.
pub mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use crate::money::Money;

    /// Whole number from a JSON number, a numeric string or null.
    ///
    /// Fractional numbers are truncated; unparseable strings become `None`.
    pub fn count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
            }
            _ => None,
        })
    }

    /// Fine amount in major units from a number, numeric string or null.
    pub fn money<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        Ok(amount.map(Money::from_api_amount).unwrap_or_default())
    }

    /// Text from a string, a number or null.
    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => String::new(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
