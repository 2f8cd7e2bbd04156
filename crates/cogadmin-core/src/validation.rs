// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Record form validation.
//!
//! Every rule is evaluated on every call so all violations are reported
//! together. Nothing here touches the network.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::form::AppDraft;
use crate::region::AwsRegion;

static USER_POOL_ID_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[a-z0-9-]+_[a-zA-Z0-9]+$").unwrap());

pub const APP_NAME_REQUIRED: &str = "Application name is required";
pub const AWS_REGION_REQUIRED: &str = "AWS region is required";
pub const AWS_REGION_UNSUPPORTED: &str = "Unsupported AWS region";
pub const USER_POOL_ID_REQUIRED: &str = "User Pool ID is required";
pub const USER_POOL_ID_INVALID: &str = "Invalid User Pool ID format";
pub const CLIENT_ID_REQUIRED: &str = "Client ID is required";
pub const CLIENT_SECRET_REQUIRED: &str = "Client secret is required";

/// An editable field of the record form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
	AppName,
	AwsRegion,
	UserPoolId,
	ClientId,
	ClientSecret,
}

impl Field {
	pub const ALL: [Field; 5] = [
		Field::AppName,
		Field::AwsRegion,
		Field::UserPoolId,
		Field::ClientId,
		Field::ClientSecret,
	];

	/// Wire name of the field.
	pub fn as_str(&self) -> &'static str {
		match self {
			Field::AppName => "appName",
			Field::AwsRegion => "awsRegion",
			Field::UserPoolId => "userPoolId",
			Field::ClientId => "clientId",
			Field::ClientSecret => "clientSecret",
		}
	}
}

impl fmt::Display for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Field-level error messages, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, field: Field, message: &'static str) {
		self.0.insert(field, message);
	}

	/// Drops the error for `field`. Returns whether one was present.
	pub fn clear(&mut self, field: Field) -> bool {
		self.0.remove(&field).is_some()
	}

	pub fn get(&self, field: Field) -> Option<&'static str> {
		self.0.get(&field).copied()
	}

	pub fn contains(&self, field: Field) -> bool {
		self.0.contains_key(&field)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
		self.0.iter().map(|(field, message)| (*field, *message))
	}
}

/// Result of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
	pub valid: bool,
	pub field_errors: FieldErrors,
}

/// Checks a pool id against the `<region>_<suffix>` shape.
///
/// The check is applied to the value as given, without trimming.
pub fn is_valid_user_pool_id(value: &str) -> bool {
	USER_POOL_ID_REGEX.is_match(value)
}

fn is_blank(value: &str) -> bool {
	value.trim().is_empty()
}

/// Validates a draft, collecting every violation.
pub fn validate(draft: &AppDraft) -> ValidationReport {
	let mut errors = FieldErrors::new();

	if is_blank(&draft.app_name) {
		errors.insert(Field::AppName, APP_NAME_REQUIRED);
	}

	if is_blank(&draft.aws_region) {
		errors.insert(Field::AwsRegion, AWS_REGION_REQUIRED);
	} else if draft.aws_region.parse::<AwsRegion>().is_err() {
		errors.insert(Field::AwsRegion, AWS_REGION_UNSUPPORTED);
	}

	if is_blank(&draft.user_pool_id) {
		errors.insert(Field::UserPoolId, USER_POOL_ID_REQUIRED);
	} else if !is_valid_user_pool_id(&draft.user_pool_id) {
		errors.insert(Field::UserPoolId, USER_POOL_ID_INVALID);
	}

	if is_blank(&draft.client_id) {
		errors.insert(Field::ClientId, CLIENT_ID_REQUIRED);
	}

	if draft.client_secret.is_blank() {
		errors.insert(Field::ClientSecret, CLIENT_SECRET_REQUIRED);
	}

	ValidationReport {
		valid: errors.is_empty(),
		field_errors: errors,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn valid_draft() -> AppDraft {
		AppDraft {
			app_name: "Billing".to_string(),
			aws_region: "us-east-1".to_string(),
			user_pool_id: "us-east-1_abcdefghi".to_string(),
			client_id: "7hc1k2".to_string(),
			client_secret: "s3cr3t".into(),
		}
	}

	#[test]
	fn valid_draft_has_no_errors() {
		let report = validate(&valid_draft());
		assert!(report.valid);
		assert!(report.field_errors.is_empty());
	}

	#[test]
	fn whitespace_name_reports_only_name() {
		let mut draft = valid_draft();
		draft.app_name = "   ".to_string();

		let report = validate(&draft);
		assert!(!report.valid);
		assert_eq!(report.field_errors.len(), 1);
		assert_eq!(report.field_errors.get(Field::AppName), Some(APP_NAME_REQUIRED));
	}

	#[test]
	fn empty_draft_reports_every_field() {
		let report = validate(&AppDraft::default());
		assert_eq!(report.field_errors.len(), Field::ALL.len());
		assert_eq!(report.field_errors.get(Field::AwsRegion), Some(AWS_REGION_REQUIRED));
		assert_eq!(
			report.field_errors.get(Field::UserPoolId),
			Some(USER_POOL_ID_REQUIRED)
		);
		assert_eq!(
			report.field_errors.get(Field::ClientSecret),
			Some(CLIENT_SECRET_REQUIRED)
		);
	}

	#[test]
	fn unsupported_region_is_distinct_from_missing() {
		let mut draft = valid_draft();
		draft.aws_region = "mars-north-1".to_string();
		let report = validate(&draft);
		assert_eq!(
			report.field_errors.get(Field::AwsRegion),
			Some(AWS_REGION_UNSUPPORTED)
		);
	}

	#[test]
	fn user_pool_id_examples() {
		assert!(is_valid_user_pool_id("us-east-1_abcdefghi"));
		assert!(is_valid_user_pool_id("eu-west-2_ABC123"));
		assert!(!is_valid_user_pool_id("uswest"));
		assert!(!is_valid_user_pool_id("_abc"));
		assert!(!is_valid_user_pool_id("US-EAST-1_abc"));
		assert!(!is_valid_user_pool_id("us-east-1_"));
	}

	#[test]
	fn pool_id_pattern_is_checked_untrimmed() {
		let mut draft = valid_draft();
		draft.user_pool_id = " us-east-1_abc ".to_string();
		let report = validate(&draft);
		assert_eq!(
			report.field_errors.get(Field::UserPoolId),
			Some(USER_POOL_ID_INVALID)
		);
	}

	#[test]
	fn whitespace_secret_is_missing() {
		let mut draft = valid_draft();
		draft.client_secret = "  ".into();
		let report = validate(&draft);
		assert_eq!(
			report.field_errors.get(Field::ClientSecret),
			Some(CLIENT_SECRET_REQUIRED)
		);
	}

	#[test]
	fn report_serializes_with_wire_field_names() {
		let mut draft = valid_draft();
		draft.client_id = String::new();
		let json = serde_json::to_value(validate(&draft)).unwrap();
		assert_eq!(json["valid"], false);
		assert_eq!(json["fieldErrors"]["clientId"], CLIENT_ID_REQUIRED);
	}

	proptest! {
		#[test]
		fn well_formed_pool_ids_validate(
			prefix in "[a-z0-9-]{1,20}",
			suffix in "[a-zA-Z0-9]{1,20}",
		) {
			let id = format!("{prefix}_{suffix}");
			prop_assert!(is_valid_user_pool_id(&id));
		}

		#[test]
		fn pool_ids_without_underscore_fail(value in "[a-z0-9-]{0,30}") {
			prop_assert!(!is_valid_user_pool_id(&value));
		}

		#[test]
		fn errors_only_name_blank_fields(name in "[ \t]{0,5}|[a-zA-Z ]{1,20}") {
			let mut draft = valid_draft();
			draft.app_name = name.clone();
			let report = validate(&draft);
			let blank = name.trim().is_empty();
			prop_assert_eq!(report.valid, !blank);
			prop_assert_eq!(report.field_errors.contains(Field::AppName), blank);
			prop_assert!(report.field_errors.len() <= 1);
		}
	}
}
