//! Test harness: a fake library API plus the real dashboard, both on
//! ephemeral local ports.

use axum::Router;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use tokio::net::TcpListener;

use crate::{router, AdminConfig, AppState};

/// A running dashboard wired to a fake upstream.
pub(crate) struct TestApp {
    pub base: String,
    /// Sends the session cookie, never follows redirects.
    pub client: reqwest::Client,
    /// No session cookie.
    pub anonymous: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    pub async fn get_html(&self, path: &str) -> (u16, String) {
        let response = self.get(path).await;
        let status = response.status().as_u16();
        (status, response.text().await.unwrap())
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client.post(self.url(path)).form(form).send().await.unwrap()
    }
}

/// Location header of a redirect response.
pub(crate) fn location(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

pub(crate) async fn spawn_app(upstream: Router) -> TestApp {
    spawn_app_with(upstream, |_| {}).await
}

pub(crate) async fn spawn_app_with(upstream: Router, configure: impl FnOnce(&mut AdminConfig)) -> TestApp {
    let api_url = serve(upstream).await;

    let mut config = AdminConfig::default();
    config.api.base_url = api_url;
    configure(&mut config);

    let state = AppState::new(config).unwrap();
    let base = serve(router(state)).await;

    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_static("userId=test-session"));

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .default_headers(headers)
        .build()
        .unwrap();
    let anonymous = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        base,
        client,
        anonymous,
    }
}
