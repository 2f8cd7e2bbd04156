// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use cogadmin_core::{AppCandidate, AppId, ApplicationRecord, EnabledState};
use serde::{Deserialize, Serialize};

use crate::error::{BackendError, Result};

/// The admin API, one method per round trip.
#[async_trait]
pub trait AppsBackend: Send + Sync {
	/// `GET /api/admin/apps`
	async fn list(&self) -> Result<Vec<ApplicationRecord>>;

	/// `POST /api/admin/apps`
	async fn create(&self, candidate: &AppCandidate) -> Result<ApplicationRecord>;

	/// `PUT /api/admin/apps/{id}`
	async fn update(&self, id: &AppId, candidate: &AppCandidate) -> Result<ApplicationRecord>;

	/// `POST /api/admin/apps/{id}/{enable|disable}`
	///
	/// Only the success signal matters; the body is ignored.
	async fn set_enabled(&self, id: &AppId, target: EnabledState) -> Result<()>;

	/// `DELETE /api/admin/apps/{id}`
	async fn delete(&self, id: &AppId) -> Result<()>;
}

/// Accepted shapes for the list response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListEnvelope {
	/// Either `{"data": [...]}` or `[...]`.
	#[default]
	Auto,
	/// Only `{"data": [...]}`.
	Wrapped,
	/// Only a bare array.
	Bare,
}

impl ListEnvelope {
	pub fn as_str(&self) -> &'static str {
		match self {
			ListEnvelope::Auto => "auto",
			ListEnvelope::Wrapped => "wrapped",
			ListEnvelope::Bare => "bare",
		}
	}

	/// Decodes a list response body under this policy.
	pub fn decode(&self, body: &[u8]) -> Result<Vec<ApplicationRecord>> {
		#[derive(Deserialize)]
		struct Wrapped {
			data: Vec<ApplicationRecord>,
		}

		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Either {
			Wrapped(Wrapped),
			Bare(Vec<ApplicationRecord>),
		}

		match self {
			ListEnvelope::Wrapped => Ok(serde_json::from_slice::<Wrapped>(body)?.data),
			ListEnvelope::Bare => Ok(serde_json::from_slice::<Vec<ApplicationRecord>>(body)?),
			ListEnvelope::Auto => match serde_json::from_slice::<Either>(body) {
				Ok(Either::Wrapped(wrapped)) => Ok(wrapped.data),
				Ok(Either::Bare(records)) => Ok(records),
				Err(_) => Err(BackendError::Decode(
					"expected {\"data\": [...]} or a JSON array of applications".to_string(),
				)),
			},
		}
	}
}

impl fmt::Display for ListEnvelope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown list envelope '{0}', expected auto, wrapped or bare")]
pub struct UnknownListEnvelope(pub String);

impl FromStr for ListEnvelope {
	type Err = UnknownListEnvelope;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"auto" => Ok(ListEnvelope::Auto),
			"wrapped" => Ok(ListEnvelope::Wrapped),
			"bare" => Ok(ListEnvelope::Bare),
			_ => Err(UnknownListEnvelope(s.to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const WRAPPED: &[u8] = br#"{"data":[{"id":1,"appName":"Billing","enabled":true}]}"#;
	const BARE: &[u8] = br#"[{"id":"a","appName":"Payroll"}]"#;

	#[test]
	fn auto_accepts_both_shapes() {
		let wrapped = ListEnvelope::Auto.decode(WRAPPED).unwrap();
		assert_eq!(wrapped.len(), 1);
		assert_eq!(wrapped[0].id.as_str(), "1");
		assert!(wrapped[0].enabled);

		let bare = ListEnvelope::Auto.decode(BARE).unwrap();
		assert_eq!(bare[0].app_name, "Payroll");
	}

	#[test]
	fn strict_policies_reject_the_other_shape() {
		assert!(matches!(
			ListEnvelope::Wrapped.decode(BARE),
			Err(BackendError::Decode(_))
		));
		assert!(matches!(
			ListEnvelope::Bare.decode(WRAPPED),
			Err(BackendError::Decode(_))
		));
	}

	#[test]
	fn auto_rejects_other_json() {
		let bodies: [&[u8]; 4] = [br#"{"items":[]}"#, b"null", b"not json", br#"{"data":{}}"#];
		for body in bodies {
			assert!(matches!(
				ListEnvelope::Auto.decode(body),
				Err(BackendError::Decode(_))
			));
		}
	}

	#[test]
	fn parses_from_config_strings() {
		assert_eq!("auto".parse::<ListEnvelope>(), Ok(ListEnvelope::Auto));
		assert_eq!("Wrapped".parse::<ListEnvelope>(), Ok(ListEnvelope::Wrapped));
		assert_eq!("bare".parse::<ListEnvelope>(), Ok(ListEnvelope::Bare));
		assert!("paged".parse::<ListEnvelope>().is_err());
		assert_eq!(ListEnvelope::default(), ListEnvelope::Auto);
	}
}
