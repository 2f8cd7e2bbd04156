// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application records as returned by the backend, and the payload sent to it.

use std::fmt;

use cogadmin_common_secret::SecretString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::region::AwsRegion;

/// Backend-assigned record identifier.
///
/// The backend may send a number or a string; both are held verbatim as
/// text and only ever rendered back into URL paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AppId(String);

impl AppId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for AppId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for AppId {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<i64> for AppId {
	fn from(value: i64) -> Self {
		Self(value.to_string())
	}
}

impl Serialize for AppId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for AppId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum RawId {
			Int(i64),
			UInt(u64),
			Text(String),
		}

		let id = match RawId::deserialize(deserializer)? {
			RawId::Int(n) => n.to_string(),
			RawId::UInt(n) => n.to_string(),
			RawId::Text(s) => s,
		};
		if id.is_empty() {
			return Err(serde::de::Error::custom("application id must not be empty"));
		}
		Ok(Self(id))
	}
}

/// An application record as the backend reports it.
///
/// String fields the backend omits or nulls decode as empty strings. The
/// client secret is write-only and never part of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
	pub id: AppId,
	#[serde(default, deserialize_with = "null_as_default")]
	pub app_key: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub app_name: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub aws_region: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub user_pool_id: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub client_id: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub enabled: bool,
}

impl ApplicationRecord {
	/// The record's name, or `fallback` when the name is blank.
	pub fn name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
		if self.app_name.trim().is_empty() {
			fallback
		} else {
			&self.app_name
		}
	}

	pub fn state(&self) -> EnabledState {
		EnabledState::from(self.enabled)
	}
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A validated create/edit payload: a record without `id`, `appKey` or
/// `enabled`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppCandidate {
	pub app_name: String,
	pub aws_region: AwsRegion,
	pub user_pool_id: String,
	pub client_id: String,
	#[serde(serialize_with = "cogadmin_common_secret::expose::serialize")]
	pub client_secret: SecretString,
}

/// Target state of an enable/disable operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnabledState {
	Enabled,
	Disabled,
}

impl EnabledState {
	/// The backend action segment: `enable` or `disable`.
	pub fn action(&self) -> &'static str {
		match self {
			EnabledState::Enabled => "enable",
			EnabledState::Disabled => "disable",
		}
	}

	/// Past tense used in notifications: `enabled` or `disabled`.
	pub fn past_tense(&self) -> &'static str {
		match self {
			EnabledState::Enabled => "enabled",
			EnabledState::Disabled => "disabled",
		}
	}

	pub fn is_enabled(&self) -> bool {
		matches!(self, EnabledState::Enabled)
	}

	/// The state a toggle on a record in this state moves to.
	pub fn toggled(&self) -> Self {
		match self {
			EnabledState::Enabled => EnabledState::Disabled,
			EnabledState::Disabled => EnabledState::Enabled,
		}
	}
}

impl From<bool> for EnabledState {
	fn from(enabled: bool) -> Self {
		if enabled {
			EnabledState::Enabled
		} else {
			EnabledState::Disabled
		}
	}
}

impl fmt::Display for EnabledState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.action())
	}
}
