// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-process holding area for events that have not been sent yet.

use beacon_analytics_core::EventRecord;
use parking_lot::Mutex;

/// Append-only buffer with drain-and-clear semantics.
///
/// `enqueue` and `drain` take the same lock, so every record lands in
/// exactly one drain: the one that follows its append.
#[derive(Debug, Default)]
pub struct EventQueue {
	events: Mutex<Vec<EventRecord>>,
}

impl EventQueue {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a record and returns the queue length right after the append.
	pub fn enqueue(&self, event: EventRecord) -> usize {
		let mut events = self.events.lock();
		events.push(event);
		events.len()
	}

	/// Takes every queued record, in insertion order, leaving the queue empty.
	pub fn drain(&self) -> Vec<EventRecord> {
		std::mem::take(&mut *self.events.lock())
	}

	/// Current pending count. Advisory only: it may change as soon as it is read.
	pub fn size(&self) -> usize {
		self.events.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.events.lock().is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use beacon_analytics_core::{Platform, Properties, SessionId};
	use proptest::prelude::*;
	use std::collections::HashSet;
	use std::sync::Arc;

	fn event(name: &str) -> EventRecord {
		EventRecord::new(
			name,
			SessionId::from("test_session"),
			Platform::Rust,
			Properties::new(),
		)
		.unwrap()
	}

	#[test]
	fn test_enqueue_reports_size() {
		let queue = EventQueue::new();
		assert_eq!(queue.enqueue(event("a")), 1);
		assert_eq!(queue.enqueue(event("b")), 2);
		assert_eq!(queue.size(), 2);
	}

	#[test]
	fn test_drain_empties_queue() {
		let queue = EventQueue::new();
		queue.enqueue(event("a"));
		queue.enqueue(event("b"));

		let drained = queue.drain();
		assert_eq!(drained.len(), 2);
		assert!(queue.is_empty());
		assert!(queue.drain().is_empty());
	}

	#[test]
	fn test_events_after_drain_wait_for_next_drain() {
		let queue = EventQueue::new();
		queue.enqueue(event("first"));
		let first = queue.drain();
		queue.enqueue(event("second"));
		let second = queue.drain();

		assert_eq!(first.len(), 1);
		assert_eq!(first[0].name(), "first");
		assert_eq!(second.len(), 1);
		assert_eq!(second[0].name(), "second");
	}

	#[test]
	fn test_concurrent_enqueue_and_drain_loses_nothing() {
		const PRODUCERS: usize = 8;
		const PER_PRODUCER: usize = 500;

		let queue = Arc::new(EventQueue::new());
		let handles: Vec<_> = (0..PRODUCERS)
			.map(|p| {
				let queue = Arc::clone(&queue);
				std::thread::spawn(move || {
					for i in 0..PER_PRODUCER {
						queue.enqueue(event(&format!("p{p}_{i}")));
					}
				})
			})
			.collect();

		let mut seen = Vec::new();
		while handles.iter().any(|h| !h.is_finished()) {
			seen.extend(queue.drain());
		}
		for h in handles {
			h.join().unwrap();
		}
		seen.extend(queue.drain());

		assert_eq!(seen.len(), PRODUCERS * PER_PRODUCER);
		let unique: HashSet<_> = seen.iter().map(|e| e.id()).collect();
		assert_eq!(unique.len(), seen.len());

		// Each producer's own events keep their call order.
		for p in 0..PRODUCERS {
			let prefix = format!("p{p}_");
			let indices: Vec<usize> = seen
				.iter()
				.filter_map(|e| e.name().strip_prefix(&prefix))
				.map(|i| i.parse().unwrap())
				.collect();
			assert_eq!(indices, (0..PER_PRODUCER).collect::<Vec<_>>());
		}
	}

	proptest! {
		#[test]
		fn drain_preserves_call_order(names in proptest::collection::vec("[a-z]{1,8}", 0..50)) {
			let queue = EventQueue::new();
			for name in &names {
				queue.enqueue(event(name));
			}
			let drained: Vec<String> = queue.drain().iter().map(|e| e.name().to_string()).collect();
			prop_assert_eq!(drained, names);
			prop_assert_eq!(queue.size(), 0);
		}
	}
}
