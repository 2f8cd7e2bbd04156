// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client for the application admin API.
//!
//! [`AppsBackend`] is the seam the record store talks through;
//! [`HttpAppsBackend`] implements it over reqwest with one request per call
//! and no retries.
//!
//! ```ignore
//! use cogadmin_client::{AppsBackend, HttpAppsBackend};
//!
//! let backend = HttpAppsBackend::builder()
//!     .base_url("http://localhost:8080")
//!     .build()?;
//!
//! let apps = backend.list().await?;
//! ```

pub mod backend;
pub mod error;
pub mod http;

pub use backend::{AppsBackend, ListEnvelope, UnknownListEnvelope};
pub use error::{BackendError, Result};
pub use http::{HttpAppsBackend, HttpAppsBackendBuilder, DEFAULT_REQUEST_TIMEOUT};
