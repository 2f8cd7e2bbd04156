// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration validation rules.

use url::Url;

use crate::runtime::{BackendConfig, CogadminConfig};
use crate::ConfigError;

pub fn validate_config(config: &CogadminConfig) -> Result<(), ConfigError> {
	validate_backend(&config.backend)
}

fn validate_backend(backend: &BackendConfig) -> Result<(), ConfigError> {
	let url = Url::parse(&backend.base_url).map_err(|e| {
		ConfigError::invalid_value("backend.base_url", format!("'{}': {e}", backend.base_url))
	})?;
	if !matches!(url.scheme(), "http" | "https") {
		return Err(ConfigError::invalid_value(
			"backend.base_url",
			format!("scheme must be http or https, got '{}'", url.scheme()),
		));
	}

	if backend.request_timeout.is_zero() {
		return Err(ConfigError::invalid_value(
			"backend.request_timeout_secs",
			"must be greater than zero",
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::paths::PathsConfig;
	use crate::runtime::LoggingConfig;
	use std::time::Duration;

	fn config(base_url: &str, timeout_secs: u64) -> CogadminConfig {
		CogadminConfig {
			backend: BackendConfig {
				base_url: base_url.to_string(),
				request_timeout: Duration::from_secs(timeout_secs),
				..Default::default()
			},
			logging: LoggingConfig::default(),
			paths: PathsConfig::default(),
		}
	}

	#[test]
	fn accepts_http_and_https() {
		assert!(validate_config(&config("http://localhost:8080", 30)).is_ok());
		assert!(validate_config(&config("https://admin.example.com/base/", 1)).is_ok());
	}

	#[test]
	fn rejects_unparseable_and_non_http_urls() {
		assert!(validate_config(&config("not a url", 30)).is_err());
		let err = validate_config(&config("ftp://files.example.com", 30)).unwrap_err();
		assert!(err.to_string().contains("http or https"), "{err}");
	}

	#[test]
	fn rejects_zero_timeout() {
		let err = validate_config(&config("http://localhost:8080", 0)).unwrap_err();
		assert!(
			err.to_string().contains("backend.request_timeout_secs"),
			"{err}"
		);
	}
}
