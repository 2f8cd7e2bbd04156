// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Scripted in-memory backend for store and console tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use cogadmin_client::{AppsBackend, BackendError, Result};
use cogadmin_common_secret::SecretString;
use cogadmin_core::{AppCandidate, AppId, ApplicationRecord, AwsRegion, EnabledState};
use parking_lot::Mutex;
use tokio::sync::{oneshot, Notify};

pub fn record(id: &str, name: &str, enabled: bool) -> ApplicationRecord {
	ApplicationRecord {
		id: AppId::new(id),
		app_key: format!("ak_{id}_0123456789"),
		app_name: name.to_string(),
		aws_region: "us-east-1".to_string(),
		user_pool_id: "us-east-1_abcdefghi".to_string(),
		client_id: format!("client-{id}"),
		enabled,
	}
}

pub fn candidate(name: &str) -> AppCandidate {
	AppCandidate {
		app_name: name.to_string(),
		aws_region: AwsRegion::UsEast1,
		user_pool_id: "us-east-1_abcdefghi".to_string(),
		client_id: "client".to_string(),
		client_secret: SecretString::from("s3cr3t"),
	}
}

/// Replays queued responses per operation and records every call.
///
/// An unscripted call fails with a 500. [`ScriptedBackend::install_gate`]
/// parks the next call until the returned sender fires.
#[derive(Default)]
pub struct ScriptedBackend {
	lists: Mutex<VecDeque<Result<Vec<ApplicationRecord>>>>,
	creates: Mutex<VecDeque<Result<ApplicationRecord>>>,
	updates: Mutex<VecDeque<Result<ApplicationRecord>>>,
	toggles: Mutex<VecDeque<Result<()>>>,
	deletes: Mutex<VecDeque<Result<()>>>,
	calls: Mutex<Vec<String>>,
	gate: Mutex<Option<oneshot::Receiver<()>>>,
	gated: Arc<Notify>,
}

impl ScriptedBackend {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn server_error() -> BackendError {
		BackendError::ServerError {
			status: 500,
			message: "Internal Server Error".to_string(),
		}
	}

	pub fn push_list(&self, response: Result<Vec<ApplicationRecord>>) {
		self.lists.lock().push_back(response);
	}

	pub fn push_create(&self, response: Result<ApplicationRecord>) {
		self.creates.lock().push_back(response);
	}

	pub fn push_update(&self, response: Result<ApplicationRecord>) {
		self.updates.lock().push_back(response);
	}

	pub fn push_toggle(&self, response: Result<()>) {
		self.toggles.lock().push_back(response);
	}

	pub fn push_delete(&self, response: Result<()>) {
		self.deletes.lock().push_back(response);
	}

	pub fn calls(&self) -> Vec<String> {
		self.calls.lock().clone()
	}

	pub fn install_gate(&self) -> oneshot::Sender<()> {
		let (tx, rx) = oneshot::channel();
		*self.gate.lock() = Some(rx);
		tx
	}

	/// Resolves once a call is parked at the gate.
	pub async fn wait_until_gated(&self) {
		self.gated.notified().await;
	}

	async fn enter(&self, call: String) {
		self.calls.lock().push(call);
		let gate = self.gate.lock().take();
		if let Some(rx) = gate {
			self.gated.notify_one();
			let _ = rx.await;
		}
	}

	fn next<T>(queue: &Mutex<VecDeque<Result<T>>>) -> Result<T> {
		queue
			.lock()
			.pop_front()
			.unwrap_or_else(|| Err(Self::server_error()))
	}
}

#[async_trait]
impl AppsBackend for ScriptedBackend {
	async fn list(&self) -> Result<Vec<ApplicationRecord>> {
		self.enter("list".to_string()).await;
		Self::next(&self.lists)
	}

	async fn create(&self, candidate: &AppCandidate) -> Result<ApplicationRecord> {
		self.enter(format!("create {}", candidate.app_name)).await;
		Self::next(&self.creates)
	}

	async fn update(&self, id: &AppId, _candidate: &AppCandidate) -> Result<ApplicationRecord> {
		self.enter(format!("update {id}")).await;
		Self::next(&self.updates)
	}

	async fn set_enabled(&self, id: &AppId, target: EnabledState) -> Result<()> {
		self.enter(format!("{} {id}", target.action())).await;
		Self::next(&self.toggles)
	}

	async fn delete(&self, id: &AppId) -> Result<()> {
		self.enter(format!("delete {id}")).await;
		Self::next(&self.deletes)
	}
}
