// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! reqwest implementation of [`AppsBackend`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cogadmin_core::{AppCandidate, AppId, ApplicationRecord, EnabledState};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::backend::{AppsBackend, ListEnvelope};
use crate::error::{BackendError, Result};

/// Default bound on a single round trip.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("cogadmin/", env!("CARGO_PKG_VERSION"));
const APPS_PATH: [&str; 3] = ["api", "admin", "apps"];

/// Builder for [`HttpAppsBackend`].
pub struct HttpAppsBackendBuilder {
	base_url: Option<String>,
	request_timeout: Duration,
	list_envelope: ListEnvelope,
}

impl HttpAppsBackendBuilder {
	pub fn new() -> Self {
		Self {
			base_url: None,
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
			list_envelope: ListEnvelope::default(),
		}
	}

	/// Sets the backend base URL.
	///
	/// Example: `http://localhost:8080`
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = Some(url.into());
		self
	}

	/// Sets the per-request timeout.
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;
		self
	}

	/// Sets which list response shapes are accepted.
	pub fn list_envelope(mut self, envelope: ListEnvelope) -> Self {
		self.list_envelope = envelope;
		self
	}

	pub fn build(self) -> Result<HttpAppsBackend> {
		let base_url = self
			.base_url
			.ok_or_else(|| BackendError::InvalidBaseUrl("base URL is required".to_string()))?;

		let parsed =
			Url::parse(&base_url).map_err(|e| BackendError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
		if !matches!(parsed.scheme(), "http" | "https") {
			return Err(BackendError::InvalidBaseUrl(format!(
				"{base_url}: scheme must be http or https"
			)));
		}

		// Normalize base URL
		let base_url = base_url.trim_end_matches('/').to_string();
		let apps_url = join_segments(&parsed, &APPS_PATH)?;

		let http_client = Client::builder()
			.user_agent(USER_AGENT)
			.timeout(self.request_timeout)
			.build()?;

		debug!(
			base_url = %base_url,
			timeout_secs = self.request_timeout.as_secs(),
			list_envelope = %self.list_envelope,
			"Admin API client initialized"
		);

		Ok(HttpAppsBackend {
			inner: Arc::new(HttpAppsBackendInner {
				base_url,
				apps_url,
				http_client,
				list_envelope: self.list_envelope,
			}),
		})
	}
}

impl Default for HttpAppsBackendBuilder {
	fn default() -> Self {
		Self::new()
	}
}

struct HttpAppsBackendInner {
	base_url: String,
	apps_url: Url,
	http_client: Client,
	list_envelope: ListEnvelope,
}

/// Admin API client. Cheap to clone.
#[derive(Clone)]
pub struct HttpAppsBackend {
	inner: Arc<HttpAppsBackendInner>,
}

impl HttpAppsBackend {
	pub fn builder() -> HttpAppsBackendBuilder {
		HttpAppsBackendBuilder::new()
	}

	pub fn base_url(&self) -> &str {
		&self.inner.base_url
	}

	fn collection_url(&self) -> Url {
		self.inner.apps_url.clone()
	}

	/// The record's URL. The id is one percent-encoded path segment.
	fn record_url(&self, id: &AppId) -> Result<Url> {
		join_segments(&self.inner.apps_url, &[id.as_str()])
	}

	async fn decode_json<T>(&self, response: Response) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let response = check_status(response).await?;
		let body = response.bytes().await?;
		Ok(serde_json::from_slice(&body)?)
	}
}

/// Appends each segment to `base`, encoding `/`, `?` and `#` inside it.
fn join_segments(base: &Url, segments: &[&str]) -> Result<Url> {
	let mut url = base.clone();
	url.path_segments_mut()
		.map_err(|()| BackendError::InvalidBaseUrl(format!("{base}: cannot be a base URL")))?
		.pop_if_empty()
		.extend(segments);
	Ok(url)
}

/// Error body produced by the relay in front of the backend.
#[derive(Deserialize)]
struct RelayError {
	error: String,
}

async fn check_status(response: Response) -> Result<Response> {
	let status = response.status();
	if status.is_success() {
		return Ok(response);
	}

	let body = response.text().await.unwrap_or_default();
	let message = match serde_json::from_str::<RelayError>(&body) {
		Ok(relay) => relay.error,
		Err(_) if body.trim().is_empty() => status
			.canonical_reason()
			.unwrap_or("request failed")
			.to_string(),
		Err(_) => body,
	};

	warn!(status = status.as_u16(), message = %message, "Admin API returned an error");
	Err(BackendError::ServerError {
		status: status.as_u16(),
		message,
	})
}

#[async_trait]
impl AppsBackend for HttpAppsBackend {
	async fn list(&self) -> Result<Vec<ApplicationRecord>> {
		let url = self.collection_url();
		debug!(url = %url, "Listing applications");

		let response = self.inner.http_client.get(url).send().await?;
		let response = check_status(response).await?;
		let body = response.bytes().await?;
		self.inner.list_envelope.decode(&body)
	}

	async fn create(&self, candidate: &AppCandidate) -> Result<ApplicationRecord> {
		let url = self.collection_url();
		debug!(url = %url, app_name = %candidate.app_name, "Creating application");

		let response = self.inner.http_client.post(url).json(candidate).send().await?;
		self.decode_json(response).await
	}

	async fn update(&self, id: &AppId, candidate: &AppCandidate) -> Result<ApplicationRecord> {
		let url = self.record_url(id)?;
		debug!(url = %url, app_id = %id, "Updating application");

		let response = self.inner.http_client.put(url).json(candidate).send().await?;
		self.decode_json(response).await
	}

	async fn set_enabled(&self, id: &AppId, target: EnabledState) -> Result<()> {
		let url = join_segments(&self.inner.apps_url, &[id.as_str(), target.action()])?;
		debug!(url = %url, app_id = %id, action = target.action(), "Toggling application");

		let response = self.inner.http_client.post(url).send().await?;
		check_status(response).await?;
		Ok(())
	}

	async fn delete(&self, id: &AppId) -> Result<()> {
		let url = self.record_url(id)?;
		debug!(url = %url, app_id = %id, "Deleting application");

		let response = self.inner.http_client.delete(url).send().await?;
		check_status(response).await?;
		Ok(())
	}
}
