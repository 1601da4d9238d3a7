// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire format for `POST {endpoint}events`.
//!
//! ```json
//! {
//!   "api_key": "pk_live_...",
//!   "sent_at_ms": 1735689600000,
//!   "events": [
//!     {
//!       "event_name": "product_view",
//!       "timestamp_ms": 1735689599000,
//!       "session_id": "1f0c...",
//!       "platform": "rust",
//!       "properties": { "product_id": "sku-42" }
//!     }
//!   ]
//! }
//! ```
//!
//! The optional per-event fields (`event_id`, `sdk_version`, `app_version`,
//! `locale`, `timezone`) are omitted from the JSON when unset.

use serde::{Deserialize, Serialize};

use crate::api_key::ApiKey;
use crate::event::{now_ms, EventRecord};
use crate::properties::Properties;

/// Static enrichment attached to every event a tracker sends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventContext {
	pub sdk_version: Option<String>,
	pub app_version: Option<String>,
	pub locale: Option<String>,
	pub timezone: Option<String>,
}

/// One event in its wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireEvent {
	pub event_name: String,
	pub timestamp_ms: i64,
	pub session_id: String,
	pub platform: String,
	#[serde(default)]
	pub properties: Properties,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub event_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sdk_version: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub app_version: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub locale: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timezone: Option<String>,
}

impl WireEvent {
	pub fn from_record(record: &EventRecord, context: &EventContext) -> Self {
		Self {
			event_name: record.name().to_string(),
			timestamp_ms: record.timestamp_ms(),
			session_id: record.session_id().to_string(),
			platform: record.platform().to_string(),
			properties: record.properties().clone(),
			event_id: Some(record.id().to_string()),
			sdk_version: context.sdk_version.clone(),
			app_version: context.app_version.clone(),
			locale: context.locale.clone(),
			timezone: context.timezone.clone(),
		}
	}
}

/// The batch envelope sent once per flush.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventBatch {
	pub api_key: String,
	/// Captured when the batch is built, independent of event timestamps.
	pub sent_at_ms: i64,
	pub events: Vec<WireEvent>,
}

impl EventBatch {
	/// Builds an envelope from drained records, preserving their order.
	pub fn from_records(api_key: &ApiKey, records: &[EventRecord], context: &EventContext) -> Self {
		Self {
			api_key: api_key.expose().to_string(),
			sent_at_ms: now_ms(),
			events: records
				.iter()
				.map(|r| WireEvent::from_record(r, context))
				.collect(),
		}
	}

	pub fn len(&self) -> usize {
		self.events.len()
	}

	pub fn is_empty(&self) -> bool {
		self.events.is_empty()
	}
}

/// Success body returned by the ingestion endpoint: `{"status": "ok", "ingested": 3}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestResponse {
	pub status: String,
	pub ingested: u64,
}
