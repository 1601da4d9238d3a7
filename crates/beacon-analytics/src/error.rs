// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the analytics SDK.
//!
//! None of these cross the [`Tracker`](crate::Tracker) boundary: they are
//! logged where they occur and the affected batch is dropped.

use beacon_common_http::{is_retryable_status, RetryableError};
use thiserror::Error;

/// Analytics SDK errors.
#[derive(Debug, Error)]
pub enum AnalyticsError {
	/// API key is missing or blank.
	#[error("API key is missing or blank")]
	InvalidApiKey,

	/// Endpoint was not supplied.
	#[error("endpoint is missing")]
	InvalidBaseUrl,

	/// Endpoint could not be turned into a request URL.
	#[error("invalid endpoint {endpoint:?}: {reason}")]
	InvalidEndpoint { endpoint: String, reason: String },

	/// HTTP request failed.
	#[error("HTTP request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),

	/// Server returned an error response.
	#[error("server error ({status}): {message}")]
	ServerError { status: u16, message: String },

	/// Rate limited by the server.
	#[error("rate limited, retry after {retry_after_secs:?} seconds")]
	RateLimited { retry_after_secs: Option<u64> },

	/// Event validation failed.
	#[error("event validation failed: {0}")]
	ValidationFailed(#[from] beacon_analytics_core::EventError),

	/// Serialization error.
	#[error("serialization error: {0}")]
	SerializationError(#[from] serde_json::Error),

	/// No async runtime could be found or started for delivery.
	#[error("delivery runtime unavailable: {0}")]
	RuntimeUnavailable(String),
}

impl RetryableError for AnalyticsError {
	fn is_retryable(&self) -> bool {
		match self {
			AnalyticsError::RequestFailed(e) => e.is_retryable(),
			AnalyticsError::ServerError { status, .. } => is_retryable_status(*status),
			AnalyticsError::RateLimited { .. } => true,
			_ => false,
		}
	}
}

/// Result type alias for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;
