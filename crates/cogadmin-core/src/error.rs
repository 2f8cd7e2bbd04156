// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for form handling.

use thiserror::Error;

use crate::validation::FieldErrors;

pub type Result<T> = std::result::Result<T, FormError>;

/// Errors raised by [`RecordForm`](crate::RecordForm) transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
	/// Local validation failed; nothing was sent.
	#[error("form has {} invalid field(s)", .0.len())]
	Invalid(FieldErrors),

	/// The form is waiting on a submission round trip.
	#[error("form is submitting")]
	Submitting,

	/// The form is not waiting on a submission.
	#[error("form is not submitting")]
	NotSubmitting,
}
