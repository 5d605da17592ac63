//! # User Repository
//!
//! API operations for users, roles and fines.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list         GET  /users/admin/allUsers        → [User]               │
//! │  get          GET  /users/id/{id}               → User                 │
//! │  set_role     PUT  /users/update/{id}           ← {"isAdmin": bool}    │
//! │  clear_fine   POST /users/admin/clear-multa/{id}                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use biblio_core::{Role, User};

use crate::client::LibraryClient;
use crate::error::ClientResult;

/// Repository for user API operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    client: LibraryClient,
}

/// Just enough of a user document to show a borrower name.
#[derive(Debug, Deserialize)]
struct UserName {
    #[serde(default)]
    name: Option<String>,
}

impl UserRepository {
    pub fn new(client: LibraryClient) -> Self {
        UserRepository { client }
    }

    /// Fetches every user.
    pub async fn list(&self) -> ClientResult<Vec<User>> {
        let url = self.client.endpoint(&["users", "admin", "allUsers"])?;
        let users: Vec<User> = self.client.get_json("list users", url).await?;

        debug!(count = users.len(), "Fetched users");
        Ok(users)
    }

    /// Fetches users with an outstanding fine, in API order.
    pub async fn list_with_fines(&self) -> ClientResult<Vec<User>> {
        let mut users = self.list().await?;
        users.retain(User::has_fine);
        Ok(users)
    }

    /// Fetches one user by id.
    pub async fn get(&self, id: &str) -> ClientResult<User> {
        let url = self.client.record_endpoint(&["users", "id"], id)?;
        self.client.get_json("get user", url).await
    }

    /// Grants or revokes admin rights.
    pub async fn set_role(&self, id: &str, role: Role) -> ClientResult<()> {
        let url = self.client.record_endpoint(&["users", "update"], id)?;
        self.client
            .send_json(
                "update user role",
                Method::PUT,
                url,
                &json!({ "isAdmin": role.is_admin() }),
            )
            .await?;

        info!(id = %id, role = %role, "User role updated");
        Ok(())
    }

    /// Marks a user's fine as paid.
    pub async fn clear_fine(&self, id: &str) -> ClientResult<()> {
        let url = self
            .client
            .record_endpoint(&["users", "admin", "clear-multa"], id)?;
        self.client
            .send("clear fine", self.client.request(Method::POST, url))
            .await?;

        info!(id = %id, "Fine cleared");
        Ok(())
    }

    /// Resolves display names for a set of user ids.
    ///
    /// Each distinct id is fetched once. Ids that fail to resolve are
    /// logged and left out of the map; callers show a placeholder.
    pub async fn resolve_names<'a, I>(&self, ids: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut names = HashMap::new();
        let mut attempted = std::collections::HashSet::new();

        for id in ids {
            if !attempted.insert(id.to_string()) {
                continue;
            }

            match self.fetch_name(id).await {
                Ok(Some(name)) => {
                    names.insert(id.to_string(), name);
                }
                Ok(None) => debug!(id = %id, "User has no name"),
                Err(e) => warn!(id = %id, error = %e, "Could not resolve user name"),
            }
        }

        debug!(requested = attempted.len(), resolved = names.len(), "Resolved user names");
        names
    }

    async fn fetch_name(&self, id: &str) -> ClientResult<Option<String>> {
        let url = self.client.record_endpoint(&["users", "id"], id)?;
        let user: UserName = self.client.get_json("get user name", url).await?;
        Ok(user.name.filter(|n| !n.trim().is_empty()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::routing::{get, post, put};
    use axum::{Json, Router};
    use serde_json::Value;

    use crate::client::ClientConfig;
    use crate::error::ClientError;
    use crate::testing::fake_api;
    use crate::LibraryClient;

    use super::*;

    fn all_users() -> Value {
        json!([
            {"_id": "u1", "name": "Ana", "email": "ana@example.com", "isAdmin": true, "multa": 0},
            {"_id": "u2", "name": "Luis", "email": "luis@example.com", "isAdmin": false, "multa": 15.5},
            {"_id": "u3", "name": "Marta", "email": "marta@example.com", "multa": "3"}
        ])
    }

    #[tokio::test]
    async fn test_list_users_and_fines() {
        let api = fake_api(Router::new().route("/users/admin/allUsers", get(|| async { Json(all_users()) }))).await;

        let users = api.users().list().await.unwrap();
        assert_eq!(users.len(), 3);
        assert_eq!(users[0].role(), Role::Admin);

        let fined = api.users().list_with_fines().await.unwrap();
        let names: Vec<_> = fined.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Luis", "Marta"]);
        assert_eq!(fined[0].multa.cents(), 1550);
    }

    #[tokio::test]
    async fn test_set_role_sends_is_admin() {
        let seen: Arc<Mutex<Vec<(String, Value)>>> = Arc::default();
        let router = Router::new()
            .route(
                "/users/update/{id}",
                put(
                    |State(seen): State<Arc<Mutex<Vec<(String, Value)>>>>,
                     Path(id): Path<String>,
                     Json(body): Json<Value>| async move {
                        seen.lock().unwrap().push((id, body));
                        StatusCode::OK
                    },
                ),
            )
            .with_state(seen.clone());
        let api = fake_api(router).await;

        api.users().set_role("u2", Role::Admin).await.unwrap();
        api.users().set_role("u1", Role::Regular).await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0], ("u2".to_string(), json!({"isAdmin": true})));
        assert_eq!(seen[1], ("u1".to_string(), json!({"isAdmin": false})));
    }

    #[tokio::test]
    async fn test_clear_fine() {
        let router = Router::new().route(
            "/users/admin/clear-multa/{id}",
            post(|Path(id): Path<String>| async move {
                if id == "u2" {
                    StatusCode::OK
                } else {
                    StatusCode::BAD_REQUEST
                }
            }),
        );
        let api = fake_api(router).await;

        api.users().clear_fine("u2").await.unwrap();

        let err = api.users().clear_fine("u1").await.unwrap_err();
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn test_resolve_names_fetches_each_id_once() {
        let hits = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route(
                "/users/id/{id}",
                get(|State(hits): State<Arc<AtomicUsize>>, Path(id): Path<String>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    match id.as_str() {
                        "u1" => Ok(Json(json!({"_id": "u1", "name": "Ana"}))),
                        "u2" => Ok(Json(json!({"_id": "u2", "name": ""}))),
                        _ => Err(StatusCode::NOT_FOUND),
                    }
                }),
            )
            .with_state(hits.clone());
        let api = fake_api(router).await;

        let names = api
            .users()
            .resolve_names(["u1", "u1", "u2", "gone", "u1", "gone"])
            .await;

        assert_eq!(hits.load(Ordering::SeqCst), 3);
        assert_eq!(names.get("u1").map(String::as_str), Some("Ana"));
        assert!(!names.contains_key("u2"));
        assert!(!names.contains_key("gone"));
    }

    #[tokio::test]
    async fn test_unreachable_api_is_retryable() {
        // Bind then drop a listener so the port is closed.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = LibraryClient::new(ClientConfig::new(format!("http://{addr}"))).unwrap();
        let err = api.users().list().await.unwrap_err();

        assert!(matches!(err, ClientError::ConnectionFailed(_)));
        assert!(err.is_retryable());
    }
}
