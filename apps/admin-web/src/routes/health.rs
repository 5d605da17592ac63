use axum::response::IntoResponse;

/// Health check endpoint. Reachable without a session.
pub async fn health_handler() -> impl IntoResponse {
    "OK"
}

#[cfg(test)]
mod tests {
    use axum::Router;

    use crate::testing::spawn_app;

    #[tokio::test]
    async fn test_health_needs_no_session() {
        let app = spawn_app(Router::new()).await;
        let response = app.anonymous.get(app.url("/health")).send().await.unwrap();

        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(response.text().await.unwrap(), "OK");
    }

    #[tokio::test]
    async fn test_guard_redirects_anonymous_to_login() {
        let app = spawn_app(Router::new()).await;
        let response = app.anonymous.get(app.url("/libros")).send().await.unwrap();

        assert_eq!(response.status().as_u16(), 303);
        assert_eq!(crate::testing::location(&response), "/login");
    }
}
