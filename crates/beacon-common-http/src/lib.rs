// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for Beacon.
//!
//! This crate provides:
//! - A pre-configured HTTP client builder with a consistent User-Agent header
//! - A classification trait for telling transient failures from permanent ones

mod client;
mod retryable;

pub use client::{builder, new_client_with_timeout, user_agent};
pub use retryable::{is_retryable_status, RetryableError};
