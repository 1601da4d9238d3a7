// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Delivery of event batches to the ingestion endpoint.

use std::time::Duration;

use beacon_analytics_core::{EventBatch, IngestResponse};
use parking_lot::Mutex;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::error::{AnalyticsError, Result};

/// Path appended to the configured endpoint.
pub const EVENTS_PATH: &str = "events";

/// Default timeout for one batch request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of an accepted batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReceipt {
	/// HTTP status returned by the server (always 2xx).
	pub status: u16,
	/// Number of events the server acknowledged, when it said so.
	pub ingested: Option<u64>,
}

/// Sends one batch to `endpoint`.
///
/// `endpoint` is the tracker's normalized base URL, ending in `/`.
/// Implementations must not retry: a failed batch is dropped by the caller.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
	async fn send(&self, endpoint: &str, batch: &EventBatch) -> Result<DeliveryReceipt>;
}

/// Builds the full events URL for a normalized endpoint.
pub fn events_url(endpoint: &str) -> Result<Url> {
	let invalid = |reason: String| AnalyticsError::InvalidEndpoint {
		endpoint: endpoint.to_string(),
		reason,
	};
	let base = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
	if base.cannot_be_a_base() {
		return Err(invalid("URL cannot be used as a base".to_string()));
	}
	base.join(EVENTS_PATH).map_err(|e| invalid(e.to_string()))
}

struct CachedClient {
	endpoint: String,
	url: Url,
	client: Client,
}

/// JSON-over-HTTP transport backed by reqwest.
///
/// One client is kept per endpoint. When a send targets a different endpoint
/// than the previous one, the client is rebuilt for the new host.
pub struct HttpTransport {
	request_timeout: Duration,
	cached: Mutex<Option<CachedClient>>,
}

impl HttpTransport {
	pub fn new() -> Self {
		Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
	}

	pub fn with_timeout(request_timeout: Duration) -> Self {
		Self {
			request_timeout,
			cached: Mutex::new(None),
		}
	}

	/// Endpoint the cached client was built for, if any.
	pub fn current_endpoint(&self) -> Option<String> {
		self.cached.lock().as_ref().map(|c| c.endpoint.clone())
	}

	fn client_for(&self, endpoint: &str) -> Result<(Client, Url)> {
		let mut cached = self.cached.lock();
		if let Some(c) = cached.as_ref() {
			if c.endpoint == endpoint {
				return Ok((c.client.clone(), c.url.clone()));
			}
		}

		let url = events_url(endpoint)?;
		let client = beacon_common_http::new_client_with_timeout(self.request_timeout)?;
		debug!(
			previous = ?cached.as_ref().map(|c| c.endpoint.as_str()),
			endpoint = %endpoint,
			"Building HTTP client for endpoint"
		);
		*cached = Some(CachedClient {
			endpoint: endpoint.to_string(),
			url: url.clone(),
			client: client.clone(),
		});
		Ok((client, url))
	}
}

impl Default for HttpTransport {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
	async fn send(&self, endpoint: &str, batch: &EventBatch) -> Result<DeliveryReceipt> {
		let (client, url) = self.client_for(endpoint)?;
		let body = serde_json::to_vec(batch)?;

		debug!(url = %url, events = batch.len(), "Sending event batch");

		let response = client
			.post(url)
			.header(reqwest::header::CONTENT_TYPE, "application/json")
			.body(body)
			.send()
			.await?;

		let status = response.status();
		if status == StatusCode::TOO_MANY_REQUESTS {
			let retry_after = response
				.headers()
				.get(reqwest::header::RETRY_AFTER)
				.and_then(|v| v.to_str().ok())
				.and_then(|s| s.parse().ok());
			return Err(AnalyticsError::RateLimited {
				retry_after_secs: retry_after,
			});
		}

		if !status.is_success() {
			let message = response.text().await.unwrap_or_default();
			return Err(AnalyticsError::ServerError {
				status: status.as_u16(),
				message,
			});
		}

		// The body is informational; a 2xx without it is still a success.
		let ingested = response
			.json::<IngestResponse>()
			.await
			.ok()
			.map(|r| r.ingested);

		Ok(DeliveryReceipt {
			status: status.as_u16(),
			ingested,
		})
	}
}
