// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Transient-failure classification.
//!
//! Nothing in Beacon retries automatically; the classification is recorded
//! alongside failures so operators can see which drops were avoidable.

/// Errors that can say whether a later attempt might succeed.
pub trait RetryableError {
	fn is_retryable(&self) -> bool;
}

impl RetryableError for reqwest::Error {
	fn is_retryable(&self) -> bool {
		if self.is_timeout() || self.is_connect() {
			return true;
		}
		self.status().map(|s| is_retryable_status(s.as_u16())).unwrap_or(false)
	}
}

/// HTTP statuses that usually indicate a transient condition.
pub fn is_retryable_status(status: u16) -> bool {
	matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}
