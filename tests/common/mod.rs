//! In-process mock of the content API for client specs.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::{Json, Router};
use serde_json::Value;

use contentfeed::api::ApiClient;
use contentfeed::ClientConfig;

/// A request as the mock backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HeaderMap,
}

type Responder = Arc<dyn Fn(&Recorded) -> (StatusCode, Value) + Send + Sync>;

#[derive(Clone)]
pub struct MockBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockBackend {
    pub async fn start(
        respond: impl Fn(&Recorded) -> (StatusCode, Value) + Send + Sync + 'static,
    ) -> Self {
        Self::start_with_delay(Duration::ZERO, respond).await
    }

    /// Backend that waits `delay` before answering each request.
    pub async fn start_with_delay(
        delay: Duration,
        respond: impl Fn(&Recorded) -> (StatusCode, Value) + Send + Sync + 'static,
    ) -> Self {
        let requests: Arc<Mutex<Vec<Recorded>>> = Arc::default();
        let respond: Responder = Arc::new(respond);

        let log = requests.clone();
        let app = Router::new().fallback(move |method: Method, uri: Uri, headers: HeaderMap| {
            let log = log.clone();
            let respond = respond.clone();
            async move {
                let recorded = Recorded {
                    method,
                    path: uri.path().to_string(),
                    query: parse_query(&uri),
                    headers,
                };
                {
                    log.lock().unwrap().push(recorded.clone());
                }
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                let (status, body) = respond(&recorded);
                (status, Json(body))
            }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Failed to read local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock backend failed");
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::with_api_host(self.base_url.clone())
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.config())
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

fn parse_query(uri: &Uri) -> HashMap<String, String> {
    let url = reqwest::Url::parse(&format!("http://mock{}", uri)).expect("Invalid request URI");
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

pub fn ok(body: Value) -> (StatusCode, Value) {
    (StatusCode::OK, body)
}

pub fn user(id: &str, name: &str) -> Value {
    serde_json::json!({ "type": "user", "id": id, "name": name })
}

pub fn app_activity(id: &str, occurred_at: &str) -> Value {
    serde_json::json!({
        "type": "app_activity",
        "id": id,
        "occurred_at": occurred_at,
        "rendered_text": format!("<p>Activity {}</p>", id),
        "created_by": user("11", "Ada"),
        "app": { "type": "app", "id": "55", "name": "Sign" },
        "activity_template": { "type": "activity_template", "id": "7" }
    })
}
