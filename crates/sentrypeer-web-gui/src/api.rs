//! REST API client for the SentryPeer daemon
//!
//! Provides typed HTTP requests using gloo-net. Every request asks for JSON
//! explicitly: the daemon serves this dashboard's entry document on the same
//! paths to browsers that don't.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use crate::config::DashboardConfig;
use crate::telemetry::{decode_daemon_message, decode_events, Dimension, EventBatch};

/// Default number of most recent events requested per view
pub const DEFAULT_EVENT_LIMIT: u32 = 1_000;

const HEALTH_CHECK_PATH: &str = "/health-check";

/// Paging/time-window parameters of a telemetry request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchWindow {
    /// Return at most this many of the most recent events
    pub limit: Option<u32>,
    /// Only events captured at or after this instant
    pub since: Option<DateTime<Utc>>,
}

impl Default for FetchWindow {
    fn default() -> Self {
        Self {
            limit: Some(DEFAULT_EVENT_LIMIT),
            since: None,
        }
    }
}

impl FetchWindow {
    /// Query parameters, only for the bounds that are set
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(since) = self.since {
            pairs.push(("since", since.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        pairs
    }
}

/// Source of telemetry events for the aggregation views
#[async_trait(?Send)]
pub trait TelemetrySource {
    async fn fetch(&self, dimension: Dimension, window: &FetchWindow) -> Result<EventBatch, ClientError>;
}

/// API client for the SentryPeer daemon
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create an API client from dashboard configuration
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.api_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of a dimension's endpoint
    pub fn endpoint_url(&self, dimension: Dimension) -> String {
        format!("{}{}", self.base_url, dimension.endpoint())
    }

    /// Fetch daemon health
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = format!("{}{}", self.base_url, HEALTH_CHECK_PATH);
        let resp = Request::get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !resp.ok() {
            return Err(ClientError::Status(resp.status()));
        }
        let body = resp
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl TelemetrySource for ApiClient {
    async fn fetch(&self, dimension: Dimension, window: &FetchWindow) -> Result<EventBatch, ClientError> {
        let url = self.endpoint_url(dimension);
        let pairs = window.query_pairs();
        let resp = Request::get(&url)
            .header("Accept", "application/json")
            .query(pairs.iter().map(|(k, v)| (*k, v.as_str())))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        interpret_response(status, &body)
    }
}

/// Map a raw HTTP reply to an event batch.
///
/// A 404 carrying the daemon's `{"message": ...}` body means "no events yet"
/// and is not an error.
pub fn interpret_response(status: u16, body: &str) -> Result<EventBatch, ClientError> {
    match status {
        200..=299 => decode_events(body).map_err(|e| ClientError::Decode(e.to_string())),
        404 => match decode_daemon_message(body) {
            Some(msg) => {
                tracing::debug!(message = %msg.message, "daemon reports no data");
                Ok(EventBatch::default())
            }
            None => Err(ClientError::Status(status)),
        },
        _ => Err(ClientError::Status(status)),
    }
}

// ============================================================================
// API Response Types
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// API error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Daemon unreachable
    #[error("network error: {0}")]
    Network(String),

    /// Daemon answered with a non-success status
    #[error("HTTP error: {0}")]
    Status(u16),

    /// Body did not match the expected shape
    #[error("decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// Unreachable and non-success replies are both network failures
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_) | ClientError::Status(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, ClientError::Decode(_))
    }
}
