//! # Book Form
//!
//! Turns the submitted book form into the JSON payload the API expects.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /bookForm            BookForm (all fields as submitted text)     │
//! │  POST /bookFormEdit/{id}          │                                     │
//! │                                   ▼                                     │
//! │                  normalize_for_create / normalize_for_update            │
//! │                  ├── trim + require text fields                        │
//! │                  ├── parse pages / amountTotal / amountAvailable       │
//! │                  ├── imageUrl → bookImage, blank cover dropped         │
//! │                  └── create: all > 0, total == available               │
//! │                      update: all >= 0, available <= total              │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                  BookPayload (camelCase JSON, numbers as numbers)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why two rule sets?
//! A new book has every copy on the shelf, so both amounts must match. An
//! existing book can have copies out on loan.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::Book;
use crate::validation::{
    parse_count, validate_required_text, ValidationResult, MAX_SYNOPSIS_LEN, MAX_TEXT_LEN,
};

// =============================================================================
// Form Input
// =============================================================================

/// The book form exactly as submitted by the browser.
///
/// Every field is text; missing fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookForm {
    pub name: String,
    pub editorial: String,
    pub edition: String,
    pub author: String,
    pub genre: String,
    pub pages: String,
    pub amount_total: String,
    pub amount_available: String,
    pub synopsis: String,
    pub status: String,
    pub book_image: String,
    /// Legacy name for the cover URL field.
    pub image_url: String,
}

/// Normalized counts shared by both rule sets.
struct Counts {
    pages: i64,
    amount_total: i64,
    amount_available: i64,
}

impl BookForm {
    /// Prefills the edit form from an existing book.
    pub fn from_book(book: &Book) -> Self {
        fn count(value: Option<i64>) -> String {
            value.map(|n| n.to_string()).unwrap_or_default()
        }

        BookForm {
            name: book.name.clone(),
            editorial: book.editorial.clone(),
            edition: book.edition.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            pages: count(book.pages),
            amount_total: count(book.amount_total),
            amount_available: count(book.amount_available),
            synopsis: book.synopsis.clone(),
            status: book.status.clone(),
            book_image: book.book_image.clone().unwrap_or_default(),
            image_url: String::new(),
        }
    }

    /// Cover URL from `bookImage`, falling back to `imageUrl`. Blank is none.
    pub fn cover_url(&self) -> Option<String> {
        [&self.book_image, &self.image_url]
            .into_iter()
            .map(|url| url.trim())
            .find(|url| !url.is_empty())
            .map(str::to_string)
    }

    /// Validates a new book.
    ///
    /// ## Rules
    /// - All text fields are required
    /// - pages, amountTotal and amountAvailable must be whole numbers > 0
    /// - amountTotal must equal amountAvailable
    ///
    /// ## Example
    /// ```rust
    /// use biblio_core::form::BookForm;
    ///
    /// let mut form = BookForm {
    ///     name: "Rayuela".into(), editorial: "Sudamericana".into(),
    ///     edition: "1".into(), author: "Julio Cortázar".into(),
    ///     genre: "Novela".into(), pages: "600".into(),
    ///     amount_total: "3".into(), amount_available: "3".into(),
    ///     synopsis: "Una novela.".into(), status: "Disponible".into(),
    ///     ..Default::default()
    /// };
    /// assert!(form.normalize_for_create().is_ok());
    ///
    /// form.amount_available = "2".into();
    /// assert!(form.normalize_for_create().is_err());
    /// ```
    pub fn normalize_for_create(&self) -> ValidationResult<BookPayload> {
        let counts = self.parse_counts()?;

        if counts.pages <= 0 || counts.amount_total <= 0 || counts.amount_available <= 0 {
            return Err(ValidationError::NumbersMustBePositive);
        }

        if counts.amount_total != counts.amount_available {
            return Err(ValidationError::AmountsMustMatch);
        }

        self.build_payload(counts)
    }

    /// Validates an edit of an existing book.
    ///
    /// ## Rules
    /// - All text fields are required
    /// - Numbers must be whole and non-negative
    /// - amountAvailable must not exceed amountTotal
    pub fn normalize_for_update(&self) -> ValidationResult<BookPayload> {
        let counts = self.parse_counts()?;

        for (field, value) in [
            ("pages", counts.pages),
            ("amountTotal", counts.amount_total),
            ("amountAvailable", counts.amount_available),
        ] {
            if value < 0 {
                return Err(ValidationError::Negative {
                    field: field.to_string(),
                });
            }
        }

        if counts.amount_available > counts.amount_total {
            return Err(ValidationError::AvailableExceedsTotal);
        }

        self.build_payload(counts)
    }

    fn parse_counts(&self) -> ValidationResult<Counts> {
        Ok(Counts {
            pages: parse_count("pages", &self.pages)?,
            amount_total: parse_count("amountTotal", &self.amount_total)?,
            amount_available: parse_count("amountAvailable", &self.amount_available)?,
        })
    }

    fn build_payload(&self, counts: Counts) -> ValidationResult<BookPayload> {
        Ok(BookPayload {
            name: validate_required_text("name", &self.name, MAX_TEXT_LEN)?,
            editorial: validate_required_text("editorial", &self.editorial, MAX_TEXT_LEN)?,
            edition: validate_required_text("edition", &self.edition, MAX_TEXT_LEN)?,
            author: validate_required_text("author", &self.author, MAX_TEXT_LEN)?,
            genre: validate_required_text("genre", &self.genre, MAX_TEXT_LEN)?,
            pages: counts.pages,
            amount_total: counts.amount_total,
            amount_available: counts.amount_available,
            synopsis: validate_required_text("synopsis", &self.synopsis, MAX_SYNOPSIS_LEN)?,
            status: validate_required_text("status", &self.status, MAX_TEXT_LEN)?,
            book_image: self.cover_url(),
        })
    }
}

// =============================================================================
// API Payload
// =============================================================================

/// Body of `POST /books/createBook` and `PUT /books/update/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub name: String,
    pub editorial: String,
    pub edition: String,
    pub author: String,
    pub genre: String,
    pub pages: i64,
    pub amount_total: i64,
    pub amount_available: i64,
    pub synopsis: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_image: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_form() -> BookForm {
        BookForm {
            name: " Rayuela ".to_string(),
            editorial: "Sudamericana".to_string(),
            edition: "1".to_string(),
            author: "Julio Cortázar".to_string(),
            genre: "Novela".to_string(),
            pages: "600".to_string(),
            amount_total: "3".to_string(),
            amount_available: "3".to_string(),
            synopsis: "Una novela.".to_string(),
            status: "Disponible".to_string(),
            book_image: String::new(),
            image_url: String::new(),
        }
    }

    #[test]
    fn test_create_valid() {
        let payload = valid_form().normalize_for_create().unwrap();
        assert_eq!(payload.name, "Rayuela");
        assert_eq!(payload.pages, 600);
        assert_eq!(payload.book_image, None);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["amountTotal"], json!(3));
        assert_eq!(json["amountAvailable"], json!(3));
        assert!(json.get("bookImage").is_none());
    }

    #[test]
    fn test_create_rejects_non_positive_numbers() {
        for field in ["pages", "total", "available"] {
            let mut form = valid_form();
            match field {
                "pages" => form.pages = "0".to_string(),
                "total" => form.amount_total = "-1".to_string(),
                _ => form.amount_available = "0".to_string(),
            }
            assert_eq!(
                form.normalize_for_create(),
                Err(ValidationError::NumbersMustBePositive)
            );
        }
    }

    #[test]
    fn test_create_requires_matching_amounts() {
        let mut form = valid_form();
        form.amount_available = "2".to_string();
        let err = form.normalize_for_create().unwrap_err();
        assert_eq!(err, ValidationError::AmountsMustMatch);
        assert_eq!(err.to_string(), "Amount Total and Amount Available must be the same");
    }

    #[test]
    fn test_create_requires_text_fields() {
        let mut form = valid_form();
        form.author = "   ".to_string();
        assert_eq!(
            form.normalize_for_create(),
            Err(ValidationError::Required {
                field: "author".to_string()
            })
        );
    }

    #[test]
    fn test_non_numeric_count_is_rejected() {
        let mut form = valid_form();
        form.pages = "seiscientas".to_string();
        assert!(matches!(
            form.normalize_for_create(),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_cover_url_rename_and_blank() {
        let mut form = valid_form();
        form.image_url = " https://covers.example/r.jpg ".to_string();
        let payload = form.normalize_for_create().unwrap();
        assert_eq!(payload.book_image.as_deref(), Some("https://covers.example/r.jpg"));

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["bookImage"], json!("https://covers.example/r.jpg"));
        assert!(json.get("imageUrl").is_none());

        form.book_image = "https://covers.example/new.jpg".to_string();
        assert_eq!(form.cover_url().as_deref(), Some("https://covers.example/new.jpg"));

        form.book_image = "  ".to_string();
        form.image_url = String::new();
        assert_eq!(form.cover_url(), None);
    }

    #[test]
    fn test_update_allows_books_on_loan() {
        let mut form = valid_form();
        form.amount_available = "1".to_string();
        let payload = form.normalize_for_update().unwrap();
        assert_eq!(payload.amount_total, 3);
        assert_eq!(payload.amount_available, 1);

        form.amount_available = "0".to_string();
        assert!(form.normalize_for_update().is_ok());
    }

    #[test]
    fn test_update_rules() {
        let mut form = valid_form();
        form.amount_available = "4".to_string();
        assert_eq!(
            form.normalize_for_update(),
            Err(ValidationError::AvailableExceedsTotal)
        );

        let mut form = valid_form();
        form.pages = "-5".to_string();
        assert_eq!(
            form.normalize_for_update(),
            Err(ValidationError::Negative {
                field: "pages".to_string()
            })
        );
    }

    #[test]
    fn test_from_book_prefills() {
        let book: Book = serde_json::from_value(json!({
            "_id": "b1", "name": "Ficciones", "pages": 200,
            "amountTotal": 2, "amountAvailable": 1, "bookImage": "https://c/f.jpg"
        }))
        .unwrap();

        let form = BookForm::from_book(&book);
        assert_eq!(form.name, "Ficciones");
        assert_eq!(form.pages, "200");
        assert_eq!(form.amount_available, "1");
        assert_eq!(form.book_image, "https://c/f.jpg");
        assert_eq!(form.edition, "");
    }

    #[test]
    fn test_form_decodes_with_missing_fields() {
        let form: BookForm = serde_json::from_value(json!({"name": "X", "amountTotal": "2"})).unwrap();
        assert_eq!(form.name, "X");
        assert_eq!(form.amount_total, "2");
        assert_eq!(form.status, "");
    }
}
