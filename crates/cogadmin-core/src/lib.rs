// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the cogadmin console.
//!
//! This crate provides the pieces of the console that do not touch the
//! network:
//! - [`ApplicationRecord`] and its backend-assigned [`AppId`]
//! - the fixed [`AwsRegion`] enumeration
//! - [`AppDraft`] and [`RecordForm`], the editable form and its state machine
//! - [`validate`], the local submission contract
//! - [`filter_records`], the search projection over the live list
//!
//! # Example
//!
//! ```
//! use cogadmin_core::{Field, RecordForm};
//!
//! let mut form = RecordForm::create();
//! form.set_field(Field::AppName, "Billing").unwrap();
//! form.set_field(Field::AwsRegion, "eu-west-2").unwrap();
//! form.set_field(Field::UserPoolId, "eu-west-2_ABC123").unwrap();
//! form.set_field(Field::ClientId, "4f1c2e").unwrap();
//! form.set_field(Field::ClientSecret, "s3cr3t").unwrap();
//!
//! let candidate = form.submit().unwrap();
//! assert_eq!(candidate.aws_region.code(), "eu-west-2");
//! ```

pub mod error;
pub mod form;
pub mod record;
pub mod region;
pub mod search;
pub mod validation;

pub use error::{FormError, Result};
pub use form::{AppDraft, FormMode, FormPhase, RecordForm};
pub use record::{AppCandidate, AppId, ApplicationRecord, EnabledState};
pub use region::{AwsRegion, UnknownRegion};
pub use search::{filter_records, matches_query};
pub use validation::{is_valid_user_pool_id, validate, Field, FieldErrors, ValidationReport};
