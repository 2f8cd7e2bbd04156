// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The record store and operation orchestrator.
//!
//! [`AppStore`] owns the in-memory list. Each operation is one backend round
//! trip; the list is mutated under a single lock acquisition, and only after
//! the backend confirmed success. The lock is never held across an await.

use std::collections::HashSet;
use std::sync::Arc;

use cogadmin_client::{AppsBackend, BackendError};
use cogadmin_core::{filter_records, AppCandidate, AppId, ApplicationRecord, EnabledState};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::error::{Operation, OperationError, Result};
use crate::notify::{Message, NotificationCenter};

/// Where the initial hydration stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
	/// No load has completed yet.
	Pending,
	Loaded,
	/// The last load failed; the list is whatever it was before.
	Failed,
}

/// Badge counts for the console header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
	pub total: usize,
	pub active: usize,
}

/// Shared record store. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct AppStore {
	inner: Arc<AppStoreInner>,
}

struct AppStoreInner {
	backend: Arc<dyn AppsBackend>,
	state: Mutex<StoreState>,
	notifications: NotificationCenter,
}

struct StoreState {
	records: Vec<ApplicationRecord>,
	in_flight: HashSet<AppId>,
	form_in_flight: bool,
	loading: bool,
	load_state: LoadState,
}

impl StoreState {
	fn position(&self, id: &AppId) -> Option<usize> {
		self.records.iter().position(|r| &r.id == id)
	}
}

/// What an [`InFlight`] marker holds.
enum Slot {
	Record(AppId),
	Form,
	Load,
}

/// Releases its slot on drop, whatever way the operation ends.
struct InFlight<'a> {
	inner: &'a AppStoreInner,
	slots: Vec<Slot>,
}

impl Drop for InFlight<'_> {
	fn drop(&mut self) {
		let mut state = self.inner.state.lock();
		for slot in self.slots.drain(..) {
			match slot {
				Slot::Record(id) => {
					state.in_flight.remove(&id);
				}
				Slot::Form => state.form_in_flight = false,
				Slot::Load => state.loading = false,
			}
		}
	}
}

impl AppStore {
	pub fn new(backend: Arc<dyn AppsBackend>) -> Self {
		Self::with_notifications(backend, NotificationCenter::default())
	}

	pub fn with_notifications(backend: Arc<dyn AppsBackend>, notifications: NotificationCenter) -> Self {
		Self {
			inner: Arc::new(AppStoreInner {
				backend,
				state: Mutex::new(StoreState {
					records: Vec::new(),
					in_flight: HashSet::new(),
					form_in_flight: false,
					loading: false,
					load_state: LoadState::Pending,
				}),
				notifications,
			}),
		}
	}

	pub fn notifications(&self) -> &NotificationCenter {
		&self.inner.notifications
	}

	/// Snapshot of the list, in order.
	pub fn records(&self) -> Vec<ApplicationRecord> {
		self.inner.state.lock().records.clone()
	}

	pub fn get(&self, id: &AppId) -> Option<ApplicationRecord> {
		let state = self.inner.state.lock();
		state.position(id).map(|i| state.records[i].clone())
	}

	/// Records matching `query`, recomputed from the live list.
	pub fn search(&self, query: &str) -> Vec<ApplicationRecord> {
		let state = self.inner.state.lock();
		filter_records(&state.records, query)
			.into_iter()
			.cloned()
			.collect()
	}

	pub fn summary(&self) -> Summary {
		let state = self.inner.state.lock();
		Summary {
			total: state.records.len(),
			active: state.records.iter().filter(|r| r.enabled).count(),
		}
	}

	pub fn load_state(&self) -> LoadState {
		self.inner.state.lock().load_state
	}

	pub fn is_loading(&self) -> bool {
		self.inner.state.lock().loading
	}

	/// True while a toggle, delete or edit holds this record.
	pub fn is_busy(&self, id: &AppId) -> bool {
		self.inner.state.lock().in_flight.contains(id)
	}

	pub fn is_form_in_flight(&self) -> bool {
		self.inner.state.lock().form_in_flight
	}

	fn notify(&self, message: Message) {
		self.inner.notifications.push(message);
	}

	fn failed(&self, op: Operation, name: Option<&str>, source: BackendError) -> OperationError {
		warn!(operation = %op, error = %source, "Operation failed");
		let message = match op {
			Operation::Load => Message::load_failed(),
			_ => Message::operation_failed(op, name),
		};
		self.notify(message);
		OperationError::Failed { op, source }
	}

	/// Claims the record for a toggle or delete, after checking it exists.
	///
	/// Returns the record as it stood when the claim was taken.
	fn claim_record(&self, op: Operation, id: &AppId) -> Result<(InFlight<'_>, ApplicationRecord)> {
		let mut state = self.inner.state.lock();
		let Some(index) = state.position(id) else {
			drop(state);
			warn!(operation = %op, app_id = %id, "Rejected operation on unknown application");
			self.notify(Message::operation_failed(op, None));
			return Err(OperationError::NotFound(id.clone()));
		};
		if !state.in_flight.insert(id.clone()) {
			debug!(operation = %op, app_id = %id, "Rejected operation on busy application");
			return Err(OperationError::RecordBusy(id.clone()));
		}
		let record = state.records[index].clone();
		Ok((
			InFlight {
				inner: &self.inner,
				slots: vec![Slot::Record(id.clone())],
			},
			record,
		))
	}

	/// Fetches the list and replaces the local copy on success.
	///
	/// Failure keeps the previous list. Returns the number of records loaded.
	#[instrument(skip_all)]
	pub async fn load(&self) -> Result<usize> {
		let _in_flight = {
			let mut state = self.inner.state.lock();
			if state.loading {
				return Err(OperationError::LoadInProgress);
			}
			state.loading = true;
			InFlight {
				inner: &self.inner,
				slots: vec![Slot::Load],
			}
		};

		let result = self
			.inner
			.backend
			.list()
			.await
			.and_then(reject_duplicate_ids);

		match result {
			Ok(records) => {
				let count = records.len();
				{
					let mut state = self.inner.state.lock();
					state.records = records;
					state.load_state = LoadState::Loaded;
				}
				info!(count, "Applications loaded");
				Ok(count)
			}
			Err(source) => {
				self.inner.state.lock().load_state = LoadState::Failed;
				Err(self.failed(Operation::Load, None, source))
			}
		}
	}

	/// Creates a record from a validated candidate and appends the response.
	#[instrument(skip_all, fields(app_name = %candidate.app_name))]
	pub async fn create(&self, candidate: &AppCandidate) -> Result<ApplicationRecord> {
		let _in_flight = {
			let mut state = self.inner.state.lock();
			if state.form_in_flight {
				return Err(OperationError::FormBusy);
			}
			state.form_in_flight = true;
			InFlight {
				inner: &self.inner,
				slots: vec![Slot::Form],
			}
		};

		let record = match self.inner.backend.create(candidate).await {
			Ok(record) => record,
			Err(source) => {
				return Err(self.failed(Operation::Create, Some(&candidate.app_name), source));
			}
		};

		{
			let mut state = self.inner.state.lock();
			match state.position(&record.id) {
				Some(index) => {
					warn!(app_id = %record.id, "Backend returned an existing id for a new application");
					state.records[index] = record.clone();
				}
				None => state.records.push(record.clone()),
			}
		}

		info!(app_id = %record.id, "Application created");
		self.notify(Message::created(&candidate.app_name));
		Ok(record)
	}

	/// Replaces the record `id` with the backend's updated copy.
	#[instrument(skip_all, fields(app_id = %id))]
	pub async fn edit(&self, id: &AppId, candidate: &AppCandidate) -> Result<ApplicationRecord> {
		let _in_flight = {
			let mut state = self.inner.state.lock();
			if state.form_in_flight {
				return Err(OperationError::FormBusy);
			}
			if state.position(id).is_none() {
				drop(state);
				self.notify(Message::operation_failed(Operation::Update, Some(&candidate.app_name)));
				return Err(OperationError::NotFound(id.clone()));
			}
			if !state.in_flight.insert(id.clone()) {
				return Err(OperationError::RecordBusy(id.clone()));
			}
			state.form_in_flight = true;
			InFlight {
				inner: &self.inner,
				slots: vec![Slot::Form, Slot::Record(id.clone())],
			}
		};

		let result = self
			.inner
			.backend
			.update(id, candidate)
			.await
			.and_then(|record| {
				if &record.id == id {
					Ok(record)
				} else {
					Err(BackendError::Decode(format!(
						"updated application has id {}, expected {}",
						record.id, id
					)))
				}
			});

		let record = match result {
			Ok(record) => record,
			Err(source) => {
				return Err(self.failed(Operation::Update, Some(&candidate.app_name), source));
			}
		};

		{
			let mut state = self.inner.state.lock();
			if let Some(index) = state.position(id) {
				state.records[index] = record.clone();
			}
		}

		info!("Application updated");
		self.notify(Message::updated(&candidate.app_name));
		Ok(record)
	}

	/// Enables or disables a record. Only `enabled` changes locally.
	#[instrument(skip_all, fields(app_id = %id, action = target.action()))]
	pub async fn set_enabled(&self, id: &AppId, target: EnabledState) -> Result<()> {
		let op = match target {
			EnabledState::Enabled => Operation::Enable,
			EnabledState::Disabled => Operation::Disable,
		};
		let (_in_flight, record) = self.claim_record(op, id)?;

		if let Err(source) = self.inner.backend.set_enabled(id, target).await {
			return Err(self.failed(op, Some(&record.app_name), source));
		}

		{
			let mut state = self.inner.state.lock();
			if let Some(index) = state.position(id) {
				state.records[index].enabled = target.is_enabled();
			}
		}

		info!("Application {}", target.past_tense());
		self.notify(Message::toggled(&record.app_name, target));
		Ok(())
	}

	/// Deletes a record and removes it from the list.
	#[instrument(skip_all, fields(app_id = %id))]
	pub async fn delete(&self, id: &AppId) -> Result<()> {
		let (_in_flight, record) = self.claim_record(Operation::Delete, id)?;

		if let Err(source) = self.inner.backend.delete(id).await {
			return Err(self.failed(Operation::Delete, Some(&record.app_name), source));
		}

		self.inner.state.lock().records.retain(|r| &r.id != id);

		info!("Application deleted");
		self.notify(Message::deleted(&record.app_name));
		Ok(())
	}
}

fn reject_duplicate_ids(records: Vec<ApplicationRecord>) -> cogadmin_client::Result<Vec<ApplicationRecord>> {
	let mut seen = HashSet::with_capacity(records.len());
	for record in &records {
		if !seen.insert(&record.id) {
			return Err(BackendError::Decode(format!(
				"duplicate application id {}",
				record.id
			)));
		}
	}
	Ok(records)
}
