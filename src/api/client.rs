use crate::api::transport::{
    Body, FormPart, HttpRequest, HttpResponse, Method, ReqwestTransport, Transport,
};
use crate::error::ApiError;
use crate::logger;
use crate::models::{Level, ProcessingResponse};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub body: Body,
    pub bearer: Option<String>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Some(Method::Get),
            ..Self::default()
        }
    }

    pub fn post_json(body: Value) -> Self {
        Self {
            method: Some(Method::Post),
            body: Body::Json(body),
            bearer: None,
        }
    }

    pub fn post_multipart(parts: Vec<FormPart>) -> Self {
        Self {
            method: Some(Method::Post),
            body: Body::Multipart(parts),
            bearer: None,
        }
    }

    pub fn with_bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }
}

/// Status code plus decoded JSON body (`Value::Null` when the body is not JSON).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn error_message(&self) -> Option<String> {
        self.body
            .get("error")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// Client for the processing backend. Holds configuration only; every call
/// is independent of the ones before it.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    timeout: Duration,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self::with_transport(base_url, timeout, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(base_url: &str, timeout: Duration, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends a request under the configured timeout.
    ///
    /// When the timeout elapses the transport future is dropped, which aborts
    /// the in-flight request.
    async fn dispatch(&self, endpoint: &str, options: RequestOptions) -> Result<HttpResponse, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let method = options.method.unwrap_or(Method::Get);
        logger::log(&format!("{:?} {}", method, url));

        let request = HttpRequest {
            method,
            url: url.clone(),
            bearer: options.bearer,
            body: options.body,
        };

        match tokio::time::timeout(self.timeout, self.transport.send(request)).await {
            Ok(Ok(response)) => {
                logger::log(&format!("{} -> {} {}", url, response.status, response.reason));
                Ok(response)
            }
            Ok(Err(e)) => {
                logger::log(&format!("{} failed: {}", url, e));
                Err(e)
            }
            Err(_) => {
                logger::log(&format!("{} timed out after {:?}", url, self.timeout));
                Err(ApiError::Timeout)
            }
        }
    }

    /// Like [`request`](Self::request) but hands back non-2xx responses
    /// instead of failing, for endpoints whose error bodies carry meaning.
    pub async fn send(&self, endpoint: &str, options: RequestOptions) -> Result<ApiResponse, ApiError> {
        let response = self.dispatch(endpoint, options).await?;
        Ok(ApiResponse {
            status: response.status,
            body: serde_json::from_slice(&response.body).unwrap_or(Value::Null),
        })
    }

    /// Sends a request and returns its JSON body, turning non-2xx responses
    /// into [`ApiError::Http`].
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let response = self.dispatch(endpoint, options).await?;

        if !response.is_success() {
            let message = serde_json::from_slice::<Value>(&response.body)
                .ok()
                .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("HTTP {}: {}", response.status, response.reason));
            return Err(ApiError::Http {
                message,
                status: response.status,
            });
        }

        serde_json::from_slice(&response.body)
            .map_err(|e| ApiError::InvalidPayload(format!("response is not JSON: {}", e)))
    }

    pub async fn process_text(&self, text: &str, level: Level) -> Result<ProcessingResponse, ApiError> {
        let body = self
            .request(
                "/process-text",
                RequestOptions::post_json(json!({ "text": text, "level": level.as_str() })),
            )
            .await?;
        decode_processing(body)
    }

    pub async fn process_file(&self, path: &Path, level: Level) -> Result<ProcessingResponse, ApiError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());

        let parts = vec![
            FormPart::File {
                name: "file".to_string(),
                file_name,
                bytes,
            },
            FormPart::Text {
                name: "level".to_string(),
                value: level.as_str().to_string(),
            },
        ];
        let body = self
            .request("/process-file", RequestOptions::post_multipart(parts))
            .await?;
        decode_processing(body)
    }

    pub async fn demo_content(&self) -> Result<ProcessingResponse, ApiError> {
        let body = self.request("/demo", RequestOptions::get()).await?;
        decode_processing(body)
    }

    pub async fn health_check(&self) -> Result<Value, ApiError> {
        self.request("/health", RequestOptions::get()).await
    }
}

/// Decodes a `{success, data}` envelope and rejects results that break the
/// quiz invariants.
pub fn decode_processing(body: Value) -> Result<ProcessingResponse, ApiError> {
    let response: ProcessingResponse = serde_json::from_value(body)
        .map_err(|e| ApiError::InvalidPayload(e.to_string()))?;
    if let Some(data) = &response.data {
        data.validate().map_err(ApiError::InvalidPayload)?;
    }
    Ok(response)
}
