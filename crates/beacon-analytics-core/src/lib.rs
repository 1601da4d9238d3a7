// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for Beacon product analytics.
//!
//! This crate holds the value types shared by the SDK and anything that
//! needs to speak the ingestion wire format:
//!
//! - [`EventRecord`]: one immutable tracked occurrence
//! - [`SessionId`]: identity shared by all events of one session
//! - [`ApiKey`]: the write credential, redacted whenever it is printed
//! - [`Properties`]: the free-form, insertion-ordered property bag
//! - [`EventBatch`] / [`WireEvent`] / [`IngestResponse`]: the `POST /events` contract
//!
//! The SDK client lives in `beacon-analytics`.

pub mod api_key;
pub mod error;
pub mod event;
pub mod properties;
pub mod session;
pub mod wire;

pub use api_key::ApiKey;
pub use error::{EventError, Result};
pub use event::{now_ms, EventRecord, Platform};
pub use properties::Properties;
pub use session::SessionId;
pub use wire::{EventBatch, EventContext, IngestResponse, WireEvent};
