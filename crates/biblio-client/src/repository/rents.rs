//! # Rent Repository
//!
//! API operations for rents (loans) and returns.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list           GET  /rent/rents              → [Rent]                 │
//! │  mark_returned  PUT  /rent/rents/{rent_id}                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use reqwest::Method;
use tracing::{debug, info};

use biblio_core::{Rent, RentRow};

use crate::client::LibraryClient;
use crate::error::ClientResult;
use crate::repository::users::UserRepository;

/// Repository for rent API operations.
#[derive(Debug, Clone)]
pub struct RentRepository {
    client: LibraryClient,
}

impl RentRepository {
    pub fn new(client: LibraryClient) -> Self {
        RentRepository { client }
    }

    /// Fetches every rent, in API order.
    pub async fn list(&self) -> ClientResult<Vec<Rent>> {
        let url = self.client.endpoint(&["rent", "rents"])?;
        let rents: Vec<Rent> = self.client.get_json("list rents", url).await?;

        debug!(count = rents.len(), "Fetched rents");
        Ok(rents)
    }

    /// Fetches every rent and joins each with its borrower's name.
    ///
    /// Borrowers are looked up once per distinct `user_id`. A borrower that
    /// cannot be resolved does not fail the listing.
    pub async fn list_with_borrowers(&self) -> ClientResult<Vec<RentRow>> {
        let rents = self.list().await?;

        let ids: Vec<&str> = rents.iter().map(|r| r.user_id.as_str()).collect();
        let names = UserRepository::new(self.client.clone())
            .resolve_names(ids)
            .await;

        Ok(rents
            .into_iter()
            .map(|rent| {
                let borrower = names.get(&rent.user_id).cloned();
                RentRow::new(rent, borrower)
            })
            .collect())
    }

    /// Marks a rent as returned. `rent_id` is the business id
    /// ([`Rent::return_key`]).
    pub async fn mark_returned(&self, rent_id: &str) -> ClientResult<()> {
        let url = self.client.record_endpoint(&["rent", "rents"], rent_id)?;
        self.client
            .send("return rent", self.client.request(Method::PUT, url))
            .await?;

        info!(rent_id = %rent_id, "Rent marked as returned");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
