// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rust SDK client for Beacon product analytics.
//!
//! The [`Tracker`] queues events in memory and ships them to the ingestion
//! backend as JSON batches (`POST {endpoint}events`). It is built for
//! instrumentation code that must never get in the host's way:
//!
//! - `track()` and `flush()` are synchronous and never wait on the network
//! - usage mistakes and delivery failures are logged, never returned or raised
//! - failed batches are dropped, not retried or persisted
//!
//! # Flush policy
//!
//! | `flush_threshold` | behaviour |
//! |-------------------|-----------|
//! | `0` | every `track()` is followed by a flush |
//! | `N > 0` | a flush happens when the queue reaches `N` events |
//!
//! `flush()` can be called at any time, e.g. when the app is backgrounded.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use beacon_analytics::{Properties, Tracker};
//!
//! let tracker = Arc::new(Tracker::new());
//! tracker.init("pk_test_123", "http://10.0.2.2:8000/", 10);
//!
//! tracker.track("sdk_integration_test", Properties::new().insert("from", "host_app"));
//! tracker.flush();
//! ```
//!
//! Delivery outcomes can be observed with [`Tracker::subscribe`].

mod config;
mod dispatch;
mod error;
mod queue;
mod tracker;
mod transport;

pub use beacon_analytics_core::{ApiKey, EventBatch, EventRecord, Platform, Properties, SessionId};
pub use config::{normalize_endpoint, TrackerConfig, TrackerConfigBuilder, SDK_VERSION};
pub use dispatch::{DeliveryOutcome, DeliveryReport};
pub use error::{AnalyticsError, Result};
pub use queue::EventQueue;
pub use tracker::Tracker;
pub use transport::{events_url, DeliveryReceipt, HttpTransport, Transport, EVENTS_PATH};
