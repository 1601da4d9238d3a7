// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The public SDK entry point.

use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;
use beacon_analytics_core::{EventBatch, EventRecord, Properties, SessionId};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::config::TrackerConfig;
use crate::dispatch::{DeliveryReport, Dispatcher};
use crate::error::AnalyticsError;
use crate::queue::EventQueue;
use crate::transport::{HttpTransport, Transport};

struct Initialized {
	config: TrackerConfig,
	dispatcher: Dispatcher,
}

/// Queues tracked events and ships them to the ingestion endpoint in batches.
///
/// A tracker starts uninitialized and becomes usable after the first
/// [`init`](Tracker::init). Configuration is fixed from then on; later
/// `init` calls are ignored. Nothing on the public surface returns an error
/// or panics: misuse and delivery failures are logged and dropped so that
/// instrumentation can never disturb the host application.
///
/// Create one tracker at the composition root and share it (`Arc<Tracker>`)
/// with every call site.
///
/// # Example
///
/// ```no_run
/// use beacon_analytics::{Properties, Tracker};
///
/// let tracker = Tracker::new();
/// tracker.init("pk_test_123", "https://api.example.com/", 0);
///
/// tracker.track("product_view", Properties::new().insert("product_id", "sku-42"));
/// tracker.start_new_session();
/// tracker.flush();
/// ```
pub struct Tracker {
	transport: Option<Arc<dyn Transport>>,
	queue: EventQueue,
	session: ArcSwap<SessionId>,
	state: OnceLock<Initialized>,
}

impl Tracker {
	/// Creates an uninitialized tracker that delivers over HTTP.
	pub fn new() -> Self {
		Self {
			transport: None,
			queue: EventQueue::new(),
			session: ArcSwap::from_pointee(SessionId::generate()),
			state: OnceLock::new(),
		}
	}

	/// Creates an uninitialized tracker that delivers through `transport`.
	pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
		Self {
			transport: Some(transport),
			..Self::new()
		}
	}

	/// Configures the tracker. Only the first call has any effect.
	///
	/// `flush_threshold == 0` flushes after every event; `N > 0` flushes
	/// once `N` events are queued. Returns whether this call initialized
	/// the tracker.
	pub fn init(&self, api_key: &str, endpoint: &str, flush_threshold: usize) -> bool {
		self.init_with(TrackerConfig::new(api_key, endpoint, flush_threshold))
	}

	/// Configures the tracker from a prepared [`TrackerConfig`]. Only the first call has any effect.
	pub fn init_with(&self, config: TrackerConfig) -> bool {
		let mut initialized_here = false;

		self.state.get_or_init(|| {
			initialized_here = true;

			let transport = self.transport.clone().unwrap_or_else(|| {
				Arc::new(HttpTransport::with_timeout(config.request_timeout())) as Arc<dyn Transport>
			});
			let dispatcher = Dispatcher::new(transport);

			self.session.store(Arc::new(SessionId::generate()));

			info!(
				endpoint = %config.endpoint(),
				flush_threshold = config.flush_threshold(),
				platform = %config.platform(),
				"Analytics tracker initialized"
			);

			Initialized { config, dispatcher }
		});

		if !initialized_here {
			debug!("Analytics tracker already initialized, ignoring init");
		}
		initialized_here
	}

	/// Whether `init` has run.
	pub fn is_initialized(&self) -> bool {
		self.state.get().is_some()
	}

	/// Active configuration, once initialized.
	pub fn config(&self) -> Option<&TrackerConfig> {
		self.state.get().map(|s| &s.config)
	}

	/// Records an event with properties.
	///
	/// Ignored (with a log line) before `init` or when `name` is blank.
	pub fn track(&self, name: &str, properties: impl Into<Properties>) {
		let Some(state) = self.state.get() else {
			warn!(event_name = %name, "track() called before init, event dropped");
			return;
		};

		let session_id = SessionId::clone(&self.session.load());
		let record = match EventRecord::new(
			name,
			session_id,
			state.config.platform().clone(),
			properties.into(),
		) {
			Ok(record) => record,
			Err(e) => {
				let e = AnalyticsError::from(e);
				warn!(error = %e, "track() called with an invalid event, event dropped");
				return;
			}
		};

		let queued = self.queue.enqueue(record);
		debug!(event_name = %name, queue_size = queued, "Event queued");

		let threshold = state.config.flush_threshold();
		if threshold == 0 || queued >= threshold {
			self.flush();
		}
	}

	/// Records an event with no properties.
	pub fn track_event(&self, name: &str) {
		self.track(name, Properties::new());
	}

	/// Sends everything queued as one batch without waiting for the network.
	///
	/// No-op before `init` or when the queue is empty. Failed batches are
	/// logged and dropped, never retried.
	pub fn flush(&self) {
		let Some(state) = self.state.get() else {
			debug!("flush() called before init, nothing to do");
			return;
		};

		let events = self.queue.drain();
		if events.is_empty() {
			debug!("flush() called with an empty queue");
			return;
		}

		let config = &state.config;
		let batch = EventBatch::from_records(config.api_key(), &events, config.context());
		debug!(count = batch.len(), endpoint = %config.endpoint(), "Flushing event batch");

		state.dispatcher.dispatch(config.endpoint().to_string(), batch);
	}

	/// Current session identifier.
	pub fn session_id(&self) -> String {
		self.session.load().to_string()
	}

	/// Rotates the session id.
	///
	/// Does not flush: queued events keep the id they were tracked with, so
	/// the next batch may hold events from both sessions.
	pub fn start_new_session(&self) {
		let session_id = SessionId::generate();
		info!(session_id = %session_id, "New analytics session started");
		self.session.store(Arc::new(session_id));
	}

	/// Number of events waiting for the next flush.
	pub fn queue_len(&self) -> usize {
		self.queue.size()
	}

	/// Subscribes to delivery reports. `None` until the tracker is initialized.
	pub fn subscribe(&self) -> Option<broadcast::Receiver<DeliveryReport>> {
		self.state.get().map(|s| s.dispatcher.subscribe())
	}
}

impl Default for Tracker {
	fn default() -> Self {
		Self::new()
	}
}
