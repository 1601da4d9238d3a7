// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tracked events.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EventError, Result};
use crate::properties::Properties;
use crate::session::SessionId;

/// Milliseconds since the Unix epoch, read from the wall clock.
pub fn now_ms() -> i64 {
	Utc::now().timestamp_millis()
}

/// Originating client platform, serialised as a lowercase tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Platform {
	Android,
	Ios,
	Web,
	#[default]
	Rust,
	/// Any other tag reported by a host application.
	Other(String),
}

impl Platform {
	pub fn as_str(&self) -> &str {
		match self {
			Platform::Android => "android",
			Platform::Ios => "ios",
			Platform::Web => "web",
			Platform::Rust => "rust",
			Platform::Other(tag) => tag,
		}
	}
}

impl fmt::Display for Platform {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Platform {
	type Err = EventError;

	fn from_str(s: &str) -> Result<Self> {
		let tag = s.trim();
		if tag.is_empty() {
			return Err(EventError::EmptyPlatform);
		}
		Ok(Platform::from(tag.to_string()))
	}
}

impl From<String> for Platform {
	fn from(s: String) -> Self {
		match s.to_ascii_lowercase().as_str() {
			"android" => Platform::Android,
			"ios" => Platform::Ios,
			"web" => Platform::Web,
			"rust" => Platform::Rust,
			_ => Platform::Other(s),
		}
	}
}

impl From<Platform> for String {
	fn from(p: Platform) -> Self {
		p.as_str().to_string()
	}
}

/// One tracked occurrence.
///
/// Records are immutable once built: fields are private and only exposed
/// through accessors. The timestamp is captured at construction, not at
/// send time.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
	id: Uuid,
	name: String,
	timestamp_ms: i64,
	session_id: SessionId,
	platform: Platform,
	properties: Properties,
}

impl EventRecord {
	/// Builds a record stamped with the current time.
	///
	/// Fails with [`EventError::BlankName`] if `name` is empty or whitespace-only.
	pub fn new(
		name: impl Into<String>,
		session_id: SessionId,
		platform: Platform,
		properties: Properties,
	) -> Result<Self> {
		Self::with_timestamp(name, now_ms(), session_id, platform, properties)
	}

	/// Builds a record with an explicit timestamp.
	pub fn with_timestamp(
		name: impl Into<String>,
		timestamp_ms: i64,
		session_id: SessionId,
		platform: Platform,
		properties: Properties,
	) -> Result<Self> {
		let name = name.into();
		if name.trim().is_empty() {
			return Err(EventError::BlankName);
		}

		Ok(Self {
			id: Uuid::now_v7(),
			name,
			timestamp_ms,
			session_id,
			platform,
			properties,
		})
	}

	/// Client-generated id, time ordered, used by the backend to de-duplicate.
	pub fn id(&self) -> Uuid {
		self.id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn timestamp_ms(&self) -> i64 {
		self.timestamp_ms
	}

	pub fn session_id(&self) -> &SessionId {
		&self.session_id
	}

	pub fn platform(&self) -> &Platform {
		&self.platform
	}

	pub fn properties(&self) -> &Properties {
		&self.properties
	}
}
