//! HTTP client for the PomoTask server.
//!
//! Metadata coming back from the server is validated again before use: the
//! CLI treats the server's payload as untrusted as the model's.

use pomotask_extractor::{validate_value, CategorizeResult, ClarifyResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Server unreachable
    #[error("Connection error: {0}")]
    Connection(String),

    /// Server answered with an error status
    #[error("Server error (HTTP {status}): {error}{}", detail_suffix(.details))]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message from the body
        error: String,
        /// Underlying cause, if the server reported one
        details: Option<String>,
    },

    /// Body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

fn detail_suffix(details: &Option<String>) -> String {
    details
        .as_deref()
        .map(|d| format!(" ({})", d))
        .unwrap_or_default()
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ClientError::Connection(e.to_string())
        } else if e.is_decode() {
            ClientError::InvalidResponse(e.to_string())
        } else {
            ClientError::Connection(e.to_string())
        }
    }
}

#[derive(Serialize)]
struct TaskBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    task: Option<&'a str>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    details: Option<String>,
}

#[derive(Deserialize)]
struct ClarifyBody {
    original_task: String,
    task_context: Value,
}

#[derive(Deserialize)]
struct MotivateBody {
    quote: String,
}

/// Health status reported by the server
#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    /// Greeting
    pub message: String,
    /// Status word
    pub status: String,
}

/// PomoTask server client
#[derive(Debug, Clone)]
pub struct PomoTaskClient {
    base_url: String,
    http: reqwest::Client,
}

impl PomoTaskClient {
    /// Create a client for the server at `base_url`
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Server base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check that the server is up
    pub async fn health(&self) -> Result<Health, ClientError> {
        let response = self.http.get(format!("{}/", self.base_url)).send().await?;
        Self::decode(response).await
    }

    /// Fetch validated metadata for a task
    pub async fn clarify(&self, task: &str) -> Result<ClarifyResult, ClientError> {
        let body: ClarifyBody = self.post("/api/clarify", Some(task)).await?;
        Ok(ClarifyResult {
            original_task: body.original_task,
            task_context: validate_value(&body.task_context).or_fallback(),
        })
    }

    /// Fetch the category response for a task
    pub async fn categorize(&self, task: &str) -> Result<CategorizeResult, ClientError> {
        self.post("/api/categorize", Some(task)).await
    }

    /// Fetch a motivational quote
    pub async fn motivate(&self, task: Option<&str>) -> Result<String, ClientError> {
        let body: MotivateBody = self.post("/api/motivate", task).await?;
        Ok(body.quote)
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        task: Option<&str>,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self.http.post(&url).json(&TaskBody { task }).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) => ClientError::Server {
                    status: status.as_u16(),
                    error: body.error,
                    details: body.details,
                },
                Err(_) => ClientError::Server {
                    status: status.as_u16(),
                    error: format!("HTTP {}", status),
                    details: Some(text).filter(|t| !t.is_empty()),
                },
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}
