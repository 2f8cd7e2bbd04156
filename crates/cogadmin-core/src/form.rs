// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Create/edit form state.
//!
//! A [`RecordForm`] moves `Editing -> Submitting` on a valid submit and back
//! to `Editing` when the round trip fails. An invalid submit never leaves
//! `Editing`. Success closes the form, which is the owner's job: it simply
//! drops it.

use cogadmin_common_secret::SecretString;

use crate::error::{FormError, Result};
use crate::record::{AppCandidate, AppId, ApplicationRecord};
use crate::region::AwsRegion;
use crate::validation::{validate, Field, FieldErrors};

/// Raw form values as the operator typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppDraft {
	pub app_name: String,
	pub aws_region: String,
	pub user_pool_id: String,
	pub client_id: String,
	pub client_secret: SecretString,
}

impl AppDraft {
	/// Prefills from a record's readable fields. The secret starts empty.
	pub fn from_record(record: &ApplicationRecord) -> Self {
		Self {
			app_name: record.app_name.clone(),
			aws_region: record.aws_region.clone(),
			user_pool_id: record.user_pool_id.clone(),
			client_id: record.client_id.clone(),
			client_secret: SecretString::default(),
		}
	}

	pub fn set(&mut self, field: Field, value: impl Into<String>) {
		let value = value.into();
		match field {
			Field::AppName => self.app_name = value,
			Field::AwsRegion => self.aws_region = value,
			Field::UserPoolId => self.user_pool_id = value,
			Field::ClientId => self.client_id = value,
			Field::ClientSecret => self.client_secret = SecretString::new(value),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
	Create,
	Edit { id: AppId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
	Editing,
	Submitting,
}

#[derive(Debug, Clone)]
pub struct RecordForm {
	mode: FormMode,
	draft: AppDraft,
	errors: FieldErrors,
	phase: FormPhase,
}

impl RecordForm {
	pub fn create() -> Self {
		Self::with_draft(FormMode::Create, AppDraft::default())
	}

	pub fn edit(record: &ApplicationRecord) -> Self {
		Self::with_draft(
			FormMode::Edit {
				id: record.id.clone(),
			},
			AppDraft::from_record(record),
		)
	}

	fn with_draft(mode: FormMode, draft: AppDraft) -> Self {
		Self {
			mode,
			draft,
			errors: FieldErrors::new(),
			phase: FormPhase::Editing,
		}
	}

	pub fn mode(&self) -> &FormMode {
		&self.mode
	}

	pub fn draft(&self) -> &AppDraft {
		&self.draft
	}

	/// Errors from the last submit, minus fields edited since.
	pub fn errors(&self) -> &FieldErrors {
		&self.errors
	}

	pub fn phase(&self) -> FormPhase {
		self.phase
	}

	pub fn is_submitting(&self) -> bool {
		self.phase == FormPhase::Submitting
	}

	/// Updates one field and clears its error, if any.
	pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> Result<()> {
		if self.is_submitting() {
			return Err(FormError::Submitting);
		}
		self.draft.set(field, value);
		self.errors.clear(field);
		Ok(())
	}

	/// Validates the draft and, when it passes, enters `Submitting` and
	/// returns the payload to send.
	pub fn submit(&mut self) -> Result<AppCandidate> {
		if self.is_submitting() {
			return Err(FormError::Submitting);
		}

		let report = validate(&self.draft);
		self.errors = report.field_errors;
		if !report.valid {
			return Err(FormError::Invalid(self.errors.clone()));
		}

		let aws_region = self
			.draft
			.aws_region
			.parse::<AwsRegion>()
			.map_err(|_| FormError::Invalid(self.errors.clone()))?;

		self.phase = FormPhase::Submitting;
		Ok(AppCandidate {
			app_name: self.draft.app_name.clone(),
			aws_region,
			user_pool_id: self.draft.user_pool_id.clone(),
			client_id: self.draft.client_id.clone(),
			client_secret: self.draft.client_secret.clone(),
		})
	}

	/// Returns to `Editing` after the backend rejected the submission.
	pub fn submission_failed(&mut self) -> Result<()> {
		if !self.is_submitting() {
			return Err(FormError::NotSubmitting);
		}
		self.phase = FormPhase::Editing;
		Ok(())
	}
}
