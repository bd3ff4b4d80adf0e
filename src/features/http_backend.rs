use crate::collaborators::{SearchBackend, SearchRequest};
use crate::features::error::{BackendError, GENERIC_SERVER_ERROR};
use crate::structs::SearchResponse;
use async_trait::async_trait;
use bon::bon;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{debug, warn};

pub const DEFAULT_ENDPOINT_PATH: &str = "/api/search_events";

/// Event search over HTTP: a multipart `POST` with `file` and `target_date`.
#[derive(Debug, Clone)]
pub struct HttpSearchBackend {
    client: reqwest::Client,
    url: String,
}

#[bon]
impl HttpSearchBackend {
    /// Constructs an `HttpSearchBackend` via a builder pattern.
    ///
    /// # Builder Arguments
    ///
    /// * `base_url: String` - Scheme and host of the search service, e.g. `http://127.0.0.1:3001`.
    /// * `endpoint_path: String` - (Default: `/api/search_events`) Path appended to `base_url`.
    /// * `client: Option<reqwest::Client>` - A preconfigured client. The transport's default timeouts apply.
    #[builder]
    pub fn new(
        #[builder(into)] base_url: String,
        #[builder(into, default = DEFAULT_ENDPOINT_PATH.to_string())] endpoint_path: String,
        client: Option<reqwest::Client>,
    ) -> Self {
        let url = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            endpoint_path.trim_start_matches('/')
        );
        Self {
            client: client.unwrap_or_default(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn search_events(&self, request: SearchRequest) -> Result<SearchResponse, BackendError> {
        let form = Form::new()
            .part("file", Part::bytes(request.photo).file_name(request.file_name))
            .text("target_date", request.target_date.to_string());

        debug!(url = %self.url, date = %request.target_date, "Sending event search");
        let response = self.client.post(&self.url).multipart(form).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        parse_search_response(status.as_u16(), &body)
    }
}

/// Interprets a search reply. Non-2xx statuses and a top-level `error` field are both failures.
pub fn parse_search_response(status: u16, body: &[u8]) -> Result<SearchResponse, BackendError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<Value>(body)
            .ok()
            .as_ref()
            .and_then(error_message)
            .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string());
        warn!(status, %message, "Event search returned an error status");
        return Err(BackendError::Status { status, message });
    }

    let value: Value = serde_json::from_slice(body)?;
    if let Some(message) = error_message(&value) {
        warn!(%message, "Event search response carried an error");
        return Err(BackendError::Rejected(message));
    }
    Ok(serde_json::from_value(value)?)
}

fn error_message(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => Some(GENERIC_SERVER_ERROR.to_string()),
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
