// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tracker configuration.

use std::time::Duration;

use beacon_analytics_core::{ApiKey, EventContext, Platform};

use crate::error::{AnalyticsError, Result};
use crate::transport::DEFAULT_REQUEST_TIMEOUT;

/// SDK version reported on every event.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Settings fixed at [`Tracker::init`](crate::Tracker::init) time.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
	pub(crate) api_key: ApiKey,
	pub(crate) endpoint: String,
	pub(crate) flush_threshold: usize,
	pub(crate) platform: Platform,
	pub(crate) request_timeout: Duration,
	pub(crate) context: EventContext,
}

impl TrackerConfig {
	/// Starts a builder with the required credential and endpoint.
	pub fn builder() -> TrackerConfigBuilder {
		TrackerConfigBuilder::new()
	}

	/// Minimal configuration: credential, endpoint, flush threshold.
	///
	/// Unlike the builder this never fails; a blank key or a malformed
	/// endpoint only shows up as a delivery failure.
	pub fn new(api_key: impl Into<ApiKey>, endpoint: impl AsRef<str>, flush_threshold: usize) -> Self {
		Self {
			api_key: api_key.into(),
			endpoint: normalize_endpoint(endpoint.as_ref()),
			flush_threshold,
			platform: Platform::default(),
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
			context: EventContext {
				sdk_version: Some(SDK_VERSION.to_string()),
				..Default::default()
			},
		}
	}

	pub fn api_key(&self) -> &ApiKey {
		&self.api_key
	}

	/// Base URL, always ending with `/`.
	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	/// `0` flushes after every event; `N > 0` flushes once `N` events are queued.
	pub fn flush_threshold(&self) -> usize {
		self.flush_threshold
	}

	pub fn platform(&self) -> &Platform {
		&self.platform
	}

	pub fn request_timeout(&self) -> Duration {
		self.request_timeout
	}

	pub fn context(&self) -> &EventContext {
		&self.context
	}
}

/// Appends the trailing path separator the events path is joined onto.
pub fn normalize_endpoint(endpoint: &str) -> String {
	let endpoint = endpoint.trim();
	if endpoint.ends_with('/') {
		endpoint.to_string()
	} else {
		format!("{endpoint}/")
	}
}

/// Builder for [`TrackerConfig`].
///
/// # Example
///
/// ```
/// use beacon_analytics::{Platform, TrackerConfig};
///
/// let config = TrackerConfig::builder()
///     .api_key("pk_test_123")
///     .endpoint("http://10.0.2.2:8000")
///     .flush_threshold(20)
///     .platform(Platform::Android)
///     .app_version("1.4.0")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.endpoint(), "http://10.0.2.2:8000/");
/// ```
#[derive(Debug, Default)]
pub struct TrackerConfigBuilder {
	api_key: Option<ApiKey>,
	endpoint: Option<String>,
	flush_threshold: usize,
	platform: Option<Platform>,
	request_timeout: Option<Duration>,
	app_version: Option<String>,
	locale: Option<String>,
	timezone: Option<String>,
}

impl TrackerConfigBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn api_key(mut self, key: impl Into<ApiKey>) -> Self {
		self.api_key = Some(key.into());
		self
	}

	/// Sets the ingestion base URL, e.g. `https://api.example.com/`.
	pub fn endpoint(mut self, url: impl Into<String>) -> Self {
		self.endpoint = Some(url.into());
		self
	}

	pub fn flush_threshold(mut self, threshold: usize) -> Self {
		self.flush_threshold = threshold;
		self
	}

	/// Overrides the platform tag (default `rust`).
	pub fn platform(mut self, platform: Platform) -> Self {
		self.platform = Some(platform);
		self
	}

	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = Some(timeout);
		self
	}

	pub fn app_version(mut self, version: impl Into<String>) -> Self {
		self.app_version = Some(version.into());
		self
	}

	pub fn locale(mut self, locale: impl Into<String>) -> Self {
		self.locale = Some(locale.into());
		self
	}

	pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
		self.timezone = Some(timezone.into());
		self
	}

	pub fn build(self) -> Result<TrackerConfig> {
		let api_key = self.api_key.ok_or(AnalyticsError::InvalidApiKey)?;
		if api_key.is_empty() {
			return Err(AnalyticsError::InvalidApiKey);
		}
		let endpoint = self
			.endpoint
			.filter(|e| !e.trim().is_empty())
			.ok_or(AnalyticsError::InvalidBaseUrl)?;

		let mut config = TrackerConfig::new(api_key, endpoint, self.flush_threshold);
		if let Some(platform) = self.platform {
			config.platform = platform;
		}
		if let Some(timeout) = self.request_timeout {
			config.request_timeout = timeout;
		}
		config.context.app_version = self.app_version;
		config.context.locale = self.locale;
		config.context.timezone = self.timezone;
		Ok(config)
	}
}
