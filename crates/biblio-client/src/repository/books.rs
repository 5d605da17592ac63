//! # Book Repository
//!
//! API operations for the book catalogue.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list     GET    /books                → [Book]                         │
//! │  get      GET    /books/{id}           → Book                           │
//! │  create   POST   /books/createBook     ← BookPayload  (+Authorization) │
//! │  update   PUT    /books/update/{id}    ← BookPayload                    │
//! │  delete   DELETE /books/delete/{id}                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only `createBook` is guarded upstream, so only that call carries the
//! configured token.

use reqwest::Method;
use tracing::{debug, info};

use biblio_core::{Book, BookPayload};

use crate::client::LibraryClient;
use crate::error::ClientResult;

/// Repository for book API operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = client.books();
///
/// let books = repo.list().await?;
/// let book = repo.get("65f1c0ffee0000000000abcd").await?;
/// ```
#[derive(Debug, Clone)]
pub struct BookRepository {
    client: LibraryClient,
}

impl BookRepository {
    pub fn new(client: LibraryClient) -> Self {
        BookRepository { client }
    }

    /// Fetches the whole catalogue, in the order the API returns it.
    pub async fn list(&self) -> ClientResult<Vec<Book>> {
        let url = self.client.endpoint(&["books"])?;
        let books: Vec<Book> = self.client.get_json("list books", url).await?;

        debug!(count = books.len(), "Fetched books");
        Ok(books)
    }

    /// Fetches one book by id.
    pub async fn get(&self, id: &str) -> ClientResult<Book> {
        let url = self.client.record_endpoint(&["books"], id)?;
        self.client.get_json("get book", url).await
    }

    /// Creates a book. The payload must already be normalized.
    pub async fn create(&self, payload: &BookPayload) -> ClientResult<()> {
        let url = self.client.endpoint(&["books", "createBook"])?;
        let request = self
            .client
            .authorized(self.client.request(Method::POST, url))
            .json(payload);

        self.client.send("create book", request).await?;

        info!(name = %payload.name, "Book created");
        Ok(())
    }

    /// Replaces a book's fields.
    pub async fn update(&self, id: &str, payload: &BookPayload) -> ClientResult<()> {
        let url = self.client.record_endpoint(&["books", "update"], id)?;
        self.client
            .send_json("update book", Method::PUT, url, payload)
            .await?;

        info!(id = %id, "Book updated");
        Ok(())
    }

    /// Deletes a book.
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let url = self.client.record_endpoint(&["books", "delete"], id)?;
        self.client
            .send("delete book", self.client.request(Method::DELETE, url))
            .await?;

        info!(id = %id, "Book deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
