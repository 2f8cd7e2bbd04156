// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Console dialog state.
//!
//! At most one dialog is open. Each open bumps a generation counter; a round
//! trip that completes after its dialog was replaced or cancelled still
//! updates the list, but leaves the current dialog alone.

use cogadmin_core::{AppId, ApplicationRecord, EnabledState, Field, FormMode, RecordForm};
use parking_lot::Mutex;
use tracing::debug;

use crate::error::{OperationError, Result};
use crate::store::AppStore;

#[derive(Debug, Clone, Default)]
pub enum Dialog {
	#[default]
	None,
	Create(RecordForm),
	Edit {
		record: ApplicationRecord,
		form: RecordForm,
	},
	ConfirmToggle {
		record: ApplicationRecord,
		target: EnabledState,
	},
	ConfirmDelete {
		record: ApplicationRecord,
	},
}

impl Dialog {
	pub fn is_open(&self) -> bool {
		!matches!(self, Dialog::None)
	}

	pub fn form(&self) -> Option<&RecordForm> {
		match self {
			Dialog::Create(form) | Dialog::Edit { form, .. } => Some(form),
			_ => None,
		}
	}

	fn form_mut(&mut self) -> Option<&mut RecordForm> {
		match self {
			Dialog::Create(form) | Dialog::Edit { form, .. } => Some(form),
			_ => None,
		}
	}
}

/// What a confirmed dialog asked for.
enum Confirmed {
	Toggle(AppId, EnabledState),
	Delete(AppId),
}

struct DialogSlot {
	dialog: Dialog,
	generation: u64,
}

/// Drives dialogs on top of an [`AppStore`].
pub struct Console {
	store: AppStore,
	slot: Mutex<DialogSlot>,
}

impl Console {
	pub fn new(store: AppStore) -> Self {
		Self {
			store,
			slot: Mutex::new(DialogSlot {
				dialog: Dialog::None,
				generation: 0,
			}),
		}
	}

	pub fn store(&self) -> &AppStore {
		&self.store
	}

	/// Snapshot of the open dialog.
	pub fn dialog(&self) -> Dialog {
		self.slot.lock().dialog.clone()
	}

	pub fn generation(&self) -> u64 {
		self.slot.lock().generation
	}

	fn open(&self, dialog: Dialog) {
		let mut slot = self.slot.lock();
		slot.generation += 1;
		slot.dialog = dialog;
	}

	fn lookup(&self, id: &AppId) -> Result<ApplicationRecord> {
		self.store
			.get(id)
			.ok_or_else(|| OperationError::NotFound(id.clone()))
	}

	pub fn open_create(&self) {
		self.open(Dialog::Create(RecordForm::create()));
	}

	pub fn open_edit(&self, id: &AppId) -> Result<()> {
		let record = self.lookup(id)?;
		let form = RecordForm::edit(&record);
		self.open(Dialog::Edit { record, form });
		Ok(())
	}

	/// Asks to flip the record's current state.
	pub fn request_toggle(&self, id: &AppId) -> Result<EnabledState> {
		let record = self.lookup(id)?;
		let target = record.state().toggled();
		self.open(Dialog::ConfirmToggle { record, target });
		Ok(target)
	}

	pub fn request_delete(&self, id: &AppId) -> Result<()> {
		let record = self.lookup(id)?;
		self.open(Dialog::ConfirmDelete { record });
		Ok(())
	}

	/// Closes whatever is open. In-flight round trips still complete.
	pub fn cancel(&self) {
		self.open(Dialog::None);
	}

	pub fn set_field(&self, field: Field, value: impl Into<String>) -> Result<()> {
		let mut slot = self.slot.lock();
		let form = slot.dialog.form_mut().ok_or(OperationError::NoForm)?;
		form.set_field(field, value)?;
		Ok(())
	}

	/// Validates and submits the open form.
	///
	/// Success closes the form. Failure of the round trip returns it to
	/// editing with the operator's values intact.
	pub async fn submit(&self) -> Result<ApplicationRecord> {
		let (generation, edit_id, candidate) = {
			let mut slot = self.slot.lock();
			let generation = slot.generation;
			let form = slot.dialog.form_mut().ok_or(OperationError::NoForm)?;
			let candidate = form.submit()?;
			let edit_id = match form.mode() {
				FormMode::Create => None,
				FormMode::Edit { id } => Some(id.clone()),
			};
			(generation, edit_id, candidate)
		};

		let result = match &edit_id {
			None => self.store.create(&candidate).await,
			Some(id) => self.store.edit(id, &candidate).await,
		};

		let mut slot = self.slot.lock();
		if slot.generation != generation {
			debug!(generation, current = slot.generation, "Discarding stale form completion");
			return result;
		}
		match &result {
			Ok(_) => {
				slot.generation += 1;
				slot.dialog = Dialog::None;
			}
			Err(_) => {
				if let Some(form) = slot.dialog.form_mut() {
					let _ = form.submission_failed();
				}
			}
		}
		result
	}

	/// Runs the pending toggle or delete. The confirmation closes when the
	/// round trip ends, whatever the outcome.
	pub async fn confirm(&self) -> Result<()> {
		let (generation, confirmed) = {
			let slot = self.slot.lock();
			let confirmed = match &slot.dialog {
				Dialog::ConfirmToggle { record, target } => Confirmed::Toggle(record.id.clone(), *target),
				Dialog::ConfirmDelete { record } => Confirmed::Delete(record.id.clone()),
				_ => return Err(OperationError::NoConfirmation),
			};
			(slot.generation, confirmed)
		};

		let result = match &confirmed {
			Confirmed::Toggle(id, target) => self.store.set_enabled(id, *target).await,
			Confirmed::Delete(id) => self.store.delete(id).await,
		};

		// A busy record means another confirmation owns this dialog's outcome.
		if matches!(result, Err(OperationError::RecordBusy(_))) {
			return result;
		}

		let mut slot = self.slot.lock();
		if slot.generation == generation {
			slot.generation += 1;
			slot.dialog = Dialog::None;
		} else {
			debug!(generation, current = slot.generation, "Discarding stale confirmation");
		}
		result
	}
}
