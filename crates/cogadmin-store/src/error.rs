// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for store and console operations.

use std::fmt;

use cogadmin_client::BackendError;
use cogadmin_core::{AppId, FormError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OperationError>;

/// A user-initiated operation, named the way notifications name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
	Load,
	Create,
	Update,
	Enable,
	Disable,
	Delete,
}

impl Operation {
	pub fn verb(&self) -> &'static str {
		match self {
			Operation::Load => "load",
			Operation::Create => "create",
			Operation::Update => "update",
			Operation::Enable => "enable",
			Operation::Disable => "disable",
			Operation::Delete => "delete",
		}
	}

	/// What the operation acts on: the whole list for a load.
	pub fn subject(&self) -> &'static str {
		match self {
			Operation::Load => "applications",
			_ => "application",
		}
	}
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.verb())
	}
}

#[derive(Debug, Error)]
pub enum OperationError {
	/// A toggle, delete or edit is already in flight for this record.
	#[error("application {0} has an operation in flight")]
	RecordBusy(AppId),

	/// A create or edit submission is already in flight.
	#[error("a form submission is already in flight")]
	FormBusy,

	#[error("applications are already loading")]
	LoadInProgress,

	#[error("application {0} not found")]
	NotFound(AppId),

	/// The round trip failed; local state was left as it was.
	#[error("failed to {op} {}", op.subject())]
	Failed {
		op: Operation,
		#[source]
		source: BackendError,
	},

	#[error(transparent)]
	Form(#[from] FormError),

	/// The open dialog (if any) has no form to edit or submit.
	#[error("no form is open")]
	NoForm,

	/// The open dialog (if any) is not a confirmation.
	#[error("no confirmation is pending")]
	NoConfirmation,
}

impl OperationError {
	/// True when the operation was refused before reaching the network.
	pub fn is_rejection(&self) -> bool {
		!matches!(self, OperationError::Failed { .. })
	}
}
