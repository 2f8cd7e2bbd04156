// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the admin API client.

use thiserror::Error;

/// Result type for backend operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// A failed round trip.
///
/// All variants are treated the same by callers: the mutation is abandoned
/// and local state is left alone.
#[derive(Debug, Error)]
pub enum BackendError {
	/// Invalid or missing base URL.
	#[error("invalid base URL: {0}")]
	InvalidBaseUrl(String),

	/// HTTP request failed before a response arrived, including timeouts.
	#[error("HTTP request failed")]
	Transport(#[from] reqwest::Error),

	/// Backend answered with a non-success status.
	#[error("server error (HTTP {status}): {message}")]
	ServerError { status: u16, message: String },

	/// Response body did not have the expected shape.
	#[error("unexpected response body: {0}")]
	Decode(String),
}

impl BackendError {
	pub fn is_timeout(&self) -> bool {
		matches!(self, BackendError::Transport(e) if e.is_timeout())
	}

	/// HTTP status for server errors.
	pub fn status(&self) -> Option<u16> {
		match self {
			BackendError::ServerError { status, .. } => Some(*status),
			_ => None,
		}
	}
}

impl From<serde_json::Error> for BackendError {
	fn from(e: serde_json::Error) -> Self {
		BackendError::Decode(e.to_string())
	}
}
