// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Record store and operation orchestrator for the cogadmin console.
//!
//! - [`AppStore`] holds the authoritative list and runs every operation as a
//!   single backend round trip, mutating the list only on success.
//! - [`Console`] layers the one-dialog-at-a-time state machine on top.
//! - [`NotificationCenter`] collects the outcome of every operation.

pub mod console;
pub mod error;
pub mod notify;
pub mod store;

#[cfg(test)]
mod testing;

pub use console::{Console, Dialog};
pub use error::{Operation, OperationError, Result};
pub use notify::{Message, Notification, NotificationCenter, NotificationKind};
pub use store::{AppStore, LoadState, Summary};
