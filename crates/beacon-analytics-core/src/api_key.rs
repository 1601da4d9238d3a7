// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The write credential attached to every event batch.
//!
//! The key is opaque to the SDK: it is never validated locally and only the
//! ingestion backend decides whether it is acceptable. It is, however, kept
//! out of logs. `Debug` and `Display` both print [`ApiKey::REDACTED`], and
//! the backing memory is zeroed when the key is dropped.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// An opaque API key.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ApiKey(String);

impl ApiKey {
	/// Placeholder printed in place of the key.
	pub const REDACTED: &'static str = "[REDACTED]";

	pub fn new(key: impl Into<String>) -> Self {
		Self(key.into())
	}

	/// Returns the raw key. Only the transport should need this.
	pub fn expose(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.trim().is_empty()
	}
}

impl fmt::Debug for ApiKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ApiKey").field(&Self::REDACTED).finish()
	}
}

impl fmt::Display for ApiKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(Self::REDACTED)
	}
}

impl From<&str> for ApiKey {
	fn from(s: &str) -> Self {
		Self::new(s)
	}
}

impl From<String> for ApiKey {
	fn from(s: String) -> Self {
		Self::new(s)
	}
}
