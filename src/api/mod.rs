//! HTTP clients for the content API.
//!
//! [`ApiClient`] owns the transport: auth headers, interceptors, status
//! mapping and the destroyed lifecycle. Resource clients wrap a clone of it:
//! - [`AppActivityApi`]: marker-paginated app activity on a file
//! - [`CommentsApi`], [`TasksApi`], [`VersionsApi`]: file-scoped listings
//!
//! Clones share one lifecycle, so destroying any clone silences every request
//! issued through the family.

mod app_activity;
mod files;
mod lifecycle;
mod marker;

pub use app_activity::*;
pub use files::*;
pub use lifecycle::*;
pub use marker::*;

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ClientError, ErrorCode};

/// Hook applied to every outgoing request, e.g. to inject headers.
pub type RequestInterceptor = Arc<dyn Fn(RequestBuilder) -> RequestBuilder + Send + Sync>;

/// Hook invoked with every response before its status is inspected.
pub type ResponseInterceptor = Arc<dyn Fn(&Response) + Send + Sync>;

const SHARED_LINK_HEADER: &str = "BoxApi";

#[derive(Clone)]
pub struct ApiClient {
    config: Arc<ClientConfig>,
    client: Client,
    request_interceptors: Vec<RequestInterceptor>,
    response_interceptors: Vec<ResponseInterceptor>,
    lifecycle: Lifecycle,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_api_url())
            .field("request_interceptors", &self.request_interceptors.len())
            .field("response_interceptors", &self.response_interceptors.len())
            .field("destroyed", &self.lifecycle.is_destroyed())
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config: Arc::new(config),
            client: Client::new(),
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
            lifecycle: Lifecycle::new(),
        }
    }

    /// Create client from the config file and environment.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::load().apply_env())
    }

    pub fn with_request_interceptor(
        mut self,
        interceptor: impl Fn(RequestBuilder) -> RequestBuilder + Send + Sync + 'static,
    ) -> Self {
        self.request_interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn with_response_interceptor(
        mut self,
        interceptor: impl Fn(&Response) + Send + Sync + 'static,
    ) -> Self {
        self.response_interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_api_url(&self) -> String {
        self.config.base_api_url()
    }

    // ============================================================
    // Lifecycle
    // ============================================================

    /// Mark the client destroyed. Pending requests resolve to nothing and
    /// their callbacks are never run.
    pub fn destroy(&self) {
        tracing::debug!("API client destroyed");
        self.lifecycle.destroy();
    }

    pub fn is_destroyed(&self) -> bool {
        self.lifecycle.is_destroyed()
    }

    /// Run a request on the runtime, cancelled if the client is destroyed
    /// before it completes.
    pub fn spawn<T, F>(&self, fut: F) -> PendingRequest<T>
    where
        F: Future<Output = Result<T, ClientError>> + Send + 'static,
        T: Send + 'static,
    {
        PendingRequest::spawn(self.lifecycle.clone(), fut)
    }

    /// Pair of result callbacks bound to this client's lifecycle.
    pub fn completion<T>(
        &self,
        on_success: impl FnOnce(T) + Send + 'static,
        on_error: impl FnOnce(ClientError) + Send + 'static,
    ) -> Completion<T> {
        Completion::new(self.lifecycle.clone(), on_success, on_error)
    }

    /// Callback form of [`ApiClient::spawn`]: exactly one of the callbacks runs,
    /// unless the client is destroyed first, in which case neither does.
    pub fn dispatch<T, F>(&self, fut: F, completion: Completion<T>) -> tokio::task::JoinHandle<()>
    where
        F: Future<Output = Result<T, ClientError>> + Send + 'static,
        T: Send + 'static,
    {
        let pending = self.spawn(fut);
        tokio::spawn(async move {
            match pending.result().await {
                Some(Ok(data)) => {
                    completion.succeed(data);
                }
                Some(Err(err)) => {
                    completion.fail(err);
                }
                None => tracing::trace!("Dropped response for destroyed client"),
            }
        })
    }

    // ============================================================
    // Transport
    // ============================================================

    /// Build a request with auth, shared link header and interceptors applied.
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut req = self
            .client
            .request(method, url)
            .timeout(self.config.request_timeout());
        if let Some(ref token) = self.config.token {
            req = req.bearer_auth(token);
        }
        if let Some(value) = self.config.shared_link_header() {
            req = req.header(SHARED_LINK_HEADER, value);
        }
        for interceptor in &self.request_interceptors {
            req = interceptor(req);
        }
        req
    }

    /// Send and decode a JSON body, converting HTTP errors to ClientError.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        code: ErrorCode,
        req: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send(code, req).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ClientError::Http { code, source })?;
        serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode { code, source })
    }

    /// Send a request whose body, if any, is ignored (204 No Content).
    pub async fn send_empty(
        &self,
        code: ErrorCode,
        req: RequestBuilder,
    ) -> Result<(), ClientError> {
        self.send(code, req).await.map(|_| ())
    }

    async fn send(&self, code: ErrorCode, req: RequestBuilder) -> Result<Response, ClientError> {
        let response = req
            .send()
            .await
            .map_err(|source| ClientError::Http { code, source })?;

        for interceptor in &self.response_interceptors {
            interceptor(&response);
        }

        let status = response.status();
        tracing::debug!(%status, url = %response.url(), code = code.as_str(), "API response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Http { code, source })?;
        Err(match status {
            StatusCode::NOT_FOUND => ClientError::NotFound { code, body },
            StatusCode::BAD_REQUEST => ClientError::BadRequest { code, body },
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized { code },
            _ => ClientError::Server {
                code,
                status: status.as_u16(),
                body,
            },
        })
    }
}

/// Reject empty ids before a URL is built from them.
pub(crate) fn require_id<'a>(id: &'a str, what: &str) -> Result<&'a str, ClientError> {
    if id.is_empty() {
        Err(ClientError::invalid_argument(format!("Missing {} id", what)))
    } else {
        Ok(id)
    }
}
