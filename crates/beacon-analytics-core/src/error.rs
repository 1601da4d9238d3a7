// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for core analytics values.

use thiserror::Error;

/// Errors raised while constructing core analytics values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
	/// Event name is empty or whitespace-only.
	#[error("event name must not be blank")]
	BlankName,

	/// Platform tag is empty.
	#[error("platform tag must not be empty")]
	EmptyPlatform,
}

/// Result type alias for core analytics operations.
pub type Result<T> = std::result::Result<T, EventError>;
