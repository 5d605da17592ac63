//! Fake upstream API for repository tests.

use axum::Router;
use tokio::net::TcpListener;

use crate::client::{ClientConfig, LibraryClient};

/// Serves `router` on an ephemeral local port and returns a client
/// pointed at it.
pub(crate) async fn fake_api(router: Router) -> LibraryClient {
    fake_api_with(router, |config| config).await
}

/// Like [`fake_api`], letting the test adjust the client configuration.
pub(crate) async fn fake_api_with(
    router: Router,
    configure: impl FnOnce(ClientConfig) -> ClientConfig,
) -> LibraryClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let config = configure(ClientConfig::new(format!("http://{addr}")));
    LibraryClient::new(config).unwrap()
}
