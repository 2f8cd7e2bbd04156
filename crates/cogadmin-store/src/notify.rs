// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Operator-facing notifications.
//!
//! Every completed operation leaves exactly one notification behind. They
//! are queued in a bounded buffer the UI drains and broadcast to live
//! subscribers.

use std::collections::VecDeque;
use std::sync::Arc;

use cogadmin_core::EnabledState;
use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::error::Operation;

/// Default queue capacity.
pub const DEFAULT_CAPACITY: usize = 64;

const BROADCAST_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
	Success,
	Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
	pub id: u64,
	pub kind: NotificationKind,
	pub title: String,
	pub description: String,
}

impl Notification {
	pub fn is_failure(&self) -> bool {
		self.kind == NotificationKind::Failure
	}
}

/// Title and description for a notification, before it is queued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
	pub kind: NotificationKind,
	pub title: String,
	pub description: String,
}

impl Message {
	fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			kind: NotificationKind::Success,
			title: title.into(),
			description: description.into(),
		}
	}

	fn failure(description: impl Into<String>) -> Self {
		Self {
			kind: NotificationKind::Failure,
			title: "Error".to_string(),
			description: description.into(),
		}
	}

	pub fn load_failed() -> Self {
		Self::failure("Failed to load applications. Please try again.")
	}

	pub fn created(name: &str) -> Self {
		Self::success(
			"Application created",
			format!("{name} has been successfully created."),
		)
	}

	pub fn updated(name: &str) -> Self {
		Self::success(
			"Application updated",
			format!("{name} has been successfully updated."),
		)
	}

	/// `name` falls back to `Application` when blank.
	pub fn toggled(name: &str, target: EnabledState) -> Self {
		let state = target.past_tense();
		Self::success(
			format!("Application {state}"),
			format!("{} has been successfully {state}.", or_placeholder(name)),
		)
	}

	/// `name` falls back to `Application` when blank.
	pub fn deleted(name: &str) -> Self {
		Self::success(
			"Application deleted",
			format!("{} has been permanently deleted.", or_placeholder(name)),
		)
	}

	/// Failure of `op` against the named record, or an unnamed one.
	pub fn operation_failed(op: Operation, name: Option<&str>) -> Self {
		let target = match name.map(str::trim) {
			Some(name) if !name.is_empty() => format!("\"{name}\""),
			_ => "this application".to_string(),
		};
		Self::failure(format!("Failed to {op} {target}. Please try again."))
	}
}

fn or_placeholder(name: &str) -> &str {
	if name.trim().is_empty() {
		"Application"
	} else {
		name
	}
}

/// Bounded notification queue with live fan-out. Cheap to clone.
#[derive(Clone)]
pub struct NotificationCenter {
	inner: Arc<NotificationCenterInner>,
}

struct NotificationCenterInner {
	queue: RwLock<VecDeque<Notification>>,
	capacity: usize,
	next_id: RwLock<u64>,
	sender: broadcast::Sender<Notification>,
}

impl NotificationCenter {
	pub fn new(capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(BROADCAST_CAPACITY);
		Self {
			inner: Arc::new(NotificationCenterInner {
				queue: RwLock::new(VecDeque::with_capacity(capacity)),
				capacity: capacity.max(1),
				next_id: RwLock::new(1),
				sender,
			}),
		}
	}

	/// Queues a notification, evicting the oldest when full, and broadcasts it.
	pub fn push(&self, message: Message) -> Notification {
		let id = {
			let mut next_id = self.inner.next_id.write();
			let id = *next_id;
			*next_id += 1;
			id
		};

		let notification = Notification {
			id,
			kind: message.kind,
			title: message.title,
			description: message.description,
		};

		{
			let mut queue = self.inner.queue.write();
			if queue.len() >= self.inner.capacity {
				queue.pop_front();
			}
			queue.push_back(notification.clone());
		}

		// No subscribers is fine
		let _ = self.inner.sender.send(notification.clone());
		notification
	}

	/// Removes and returns every queued notification, oldest first.
	pub fn drain(&self) -> Vec<Notification> {
		self.inner.queue.write().drain(..).collect()
	}

	/// Queued notifications without removing them.
	pub fn pending(&self) -> Vec<Notification> {
		self.inner.queue.read().iter().cloned().collect()
	}

	/// Most recently queued notification.
	pub fn last(&self) -> Option<Notification> {
		self.inner.queue.read().back().cloned()
	}

	pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
		self.inner.sender.subscribe()
	}

	pub fn len(&self) -> usize {
		self.inner.queue.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.queue.read().is_empty()
	}

	pub fn capacity(&self) -> usize {
		self.inner.capacity
	}
}

impl Default for NotificationCenter {
	fn default() -> Self {
		Self::new(DEFAULT_CAPACITY)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn wording_matches_console_copy() {
		let created = Message::created("Billing");
		assert_eq!(created.title, "Application created");
		assert_eq!(created.description, "Billing has been successfully created.");

		let disabled = Message::toggled("", EnabledState::Disabled);
		assert_eq!(disabled.title, "Application disabled");
		assert_eq!(
			disabled.description,
			"Application has been successfully disabled."
		);

		let deleted = Message::deleted("Payroll");
		assert_eq!(deleted.description, "Payroll has been permanently deleted.");

		assert_eq!(
			Message::load_failed().description,
			"Failed to load applications. Please try again."
		);
	}

	#[test]
	fn failures_name_the_operation_and_target() {
		let named = Message::operation_failed(Operation::Enable, Some("Billing"));
		assert_eq!(named.kind, NotificationKind::Failure);
		assert_eq!(named.title, "Error");
		assert_eq!(
			named.description,
			"Failed to enable \"Billing\". Please try again."
		);

		let unnamed = Message::operation_failed(Operation::Delete, Some("  "));
		assert_eq!(
			unnamed.description,
			"Failed to delete this application. Please try again."
		);
		assert_eq!(
			Message::operation_failed(Operation::Update, None).description,
			"Failed to update this application. Please try again."
		);
	}

	#[test]
	fn queue_is_bounded_and_drains_in_order() {
		let center = NotificationCenter::new(2);
		center.push(Message::created("a"));
		center.push(Message::created("b"));
		center.push(Message::created("c"));

		assert_eq!(center.len(), 2);
		let drained = center.drain();
		assert_eq!(drained[0].description, "b has been successfully created.");
		assert_eq!(drained[1].id, 3);
		assert!(center.is_empty());
	}

	#[tokio::test]
	async fn subscribers_receive_pushes() {
		let center = NotificationCenter::default();
		let mut rx = center.subscribe();

		let pushed = center.push(Message::load_failed());
		let received = rx.recv().await.unwrap();
		assert_eq!(received, pushed);
		assert!(received.is_failure());
		assert_eq!(center.last(), Some(pushed));
	}
}
