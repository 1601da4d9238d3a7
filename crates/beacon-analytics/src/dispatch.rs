// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Fire-and-forget delivery of batches.
//!
//! `flush()` is synchronous, the transport is async. The dispatcher spawns
//! each send onto a tokio runtime and returns at once; the outcome is logged
//! and published to any [`DeliveryReport`] subscribers.

use std::sync::Arc;

use beacon_analytics_core::EventBatch;
use beacon_common_http::RetryableError;
use parking_lot::Mutex;
use tokio::runtime::{Handle, Runtime};
use tokio::sync::broadcast;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::error::{AnalyticsError, Result};
use crate::transport::Transport;

/// Capacity of the report channel. Slow subscribers see `Lagged`, senders never wait.
const REPORT_CHANNEL_CAPACITY: usize = 64;

/// What happened to one dispatched batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
	Delivered { status: u16, ingested: Option<u64> },
	/// The batch is gone; failed sends are never requeued.
	Failed { error: String, retryable: bool },
}

impl DeliveryOutcome {
	pub fn is_delivered(&self) -> bool {
		matches!(self, DeliveryOutcome::Delivered { .. })
	}
}

/// Completion notice for one flush.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
	pub batch_id: Uuid,
	pub event_count: usize,
	pub outcome: DeliveryOutcome,
}

/// Spawns transport sends without blocking the caller.
///
/// The runtime is resolved per dispatch: the caller's runtime when there is
/// one, otherwise a single-worker runtime the dispatcher starts on first use
/// and owns until drop. No runtime handle is kept between dispatches.
pub struct Dispatcher {
	owned: Mutex<Option<Runtime>>,
	transport: Arc<dyn Transport>,
	reports: broadcast::Sender<DeliveryReport>,
}

impl Dispatcher {
	pub fn new(transport: Arc<dyn Transport>) -> Self {
		let (reports, _) = broadcast::channel(REPORT_CHANNEL_CAPACITY);
		Self {
			owned: Mutex::new(None),
			transport,
			reports,
		}
	}

	/// Subscribes to reports for batches dispatched after this call.
	pub fn subscribe(&self) -> broadcast::Receiver<DeliveryReport> {
		self.reports.subscribe()
	}

	fn handle(&self) -> Result<Handle> {
		if let Ok(handle) = Handle::try_current() {
			return Ok(handle);
		}

		let mut owned = self.owned.lock();
		if let Some(rt) = owned.as_ref() {
			return Ok(rt.handle().clone());
		}

		let rt = tokio::runtime::Builder::new_multi_thread()
			.worker_threads(1)
			.thread_name("beacon-analytics")
			.enable_all()
			.build()
			.map_err(|e| AnalyticsError::RuntimeUnavailable(e.to_string()))?;
		debug!("No ambient tokio runtime, started a private delivery runtime");
		let handle = rt.handle().clone();
		*owned = Some(rt);
		Ok(handle)
	}

	/// Hands `batch` to the transport on a background task and returns immediately.
	pub fn dispatch(&self, endpoint: String, batch: EventBatch) -> Uuid {
		let batch_id = Uuid::now_v7();
		let event_count = batch.len();
		let handle = match self.handle() {
			Ok(handle) => handle,
			Err(e) => {
				error!(%batch_id, event_count, error = %e, "No delivery runtime, event batch dropped");
				let _ = self.reports.send(DeliveryReport {
					batch_id,
					event_count,
					outcome: DeliveryOutcome::Failed {
						error: e.to_string(),
						retryable: e.is_retryable(),
					},
				});
				return batch_id;
			}
		};

		let transport = Arc::clone(&self.transport);
		let reports = self.reports.clone();

		debug!(%batch_id, event_count, endpoint = %endpoint, "Dispatching event batch");

		handle.spawn(async move {
			let outcome = match transport.send(&endpoint, &batch).await {
				Ok(receipt) => {
					info!(
						%batch_id,
						event_count,
						status = receipt.status,
						ingested = ?receipt.ingested,
						"Event batch delivered"
					);
					DeliveryOutcome::Delivered {
						status: receipt.status,
						ingested: receipt.ingested,
					}
				}
				Err(e) => {
					let retryable = e.is_retryable();
					error!(
						%batch_id,
						event_count,
						retryable,
						error = %e,
						"Failed to deliver event batch, events dropped"
					);
					DeliveryOutcome::Failed {
						error: e.to_string(),
						retryable,
					}
				}
			};

			// No subscribers is the common case.
			let _ = reports.send(DeliveryReport {
				batch_id,
				event_count,
				outcome,
			});
		});

		batch_id
	}
}

impl Drop for Dispatcher {
	fn drop(&mut self) {
		// A runtime dropped from inside async context panics; this never blocks.
		if let Some(rt) = self.owned.get_mut().take() {
			rt.shutdown_background();
		}
	}
}
