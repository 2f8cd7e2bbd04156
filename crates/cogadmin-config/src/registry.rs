// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration registry - manages sources and merges layers.

use tracing::{debug, info};

use crate::layer::ConfigLayer;
use crate::paths::PathsConfig;
use crate::runtime::CogadminConfig;
use crate::sources::ConfigSource;
use crate::validation::validate_config;
use crate::ConfigError;

/// Registry that manages configuration sources and merges them.
#[derive(Default)]
pub struct ConfigRegistry {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&mut self, source: Box<dyn ConfigSource>) {
		debug!(source = source.name(), precedence = ?source.precedence(), "registering config source");
		self.sources.push(source);
	}

	/// Load every source lowest precedence first, merge, resolve and validate.
	///
	/// A source that fails to load fails the whole load; absent optional
	/// files load as empty layers and never reach this path.
	pub fn load(&self, paths: PathsConfig) -> Result<CogadminConfig, ConfigError> {
		let mut sorted_sources: Vec<_> = self.sources.iter().collect();
		sorted_sources.sort_by_key(|s| s.precedence());

		info!(
			source_count = sorted_sources.len(),
			"loading configuration from sources"
		);

		let mut merged = ConfigLayer::default();
		for source in &sorted_sources {
			let layer = source.load()?;
			debug!(source = source.name(), "merging config layer");
			merged.merge(layer);
		}

		let config = CogadminConfig::from_layer(merged, paths)?;
		validate_config(&config)?;

		info!(
			base_url = %config.backend.base_url,
			list_envelope = %config.backend.list_envelope,
			log_level = %config.logging.level,
			"configuration loaded successfully"
		);

		Ok(config)
	}

	pub fn source_count(&self) -> usize {
		self.sources.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sources::{CliOverrides, CliSource, DefaultsSource, EnvSource, FileSource, Precedence};
	use std::io::Write;
	use std::time::Duration;

	fn file_with(contents: &str) -> tempfile::NamedTempFile {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(contents.as_bytes()).unwrap();
		file
	}

	#[test]
	fn higher_precedence_wins_regardless_of_registration_order() {
		let user = file_with("[backend]\nbase_url = \"http://user:1\"\nrequest_timeout_secs = 7\n");

		let mut registry = ConfigRegistry::new();
		registry.register(Box::new(CliSource::new(CliOverrides {
			base_url: Some("http://cli:3".to_string()),
			..Default::default()
		})));
		registry.register(Box::new(EnvSource::from_vars([(
			"COGADMIN_BASE_URL",
			"http://env:2",
		)])));
		registry.register(Box::new(FileSource::custom(
			user.path().to_path_buf(),
			Precedence::UserFile,
			"user-config",
		)));
		registry.register(Box::new(DefaultsSource));
		assert_eq!(registry.source_count(), 4);

		let config = registry.load(PathsConfig::default()).unwrap();
		assert_eq!(config.backend.base_url, "http://cli:3");
		assert_eq!(config.backend.request_timeout, Duration::from_secs(7));
	}

	#[test]
	fn malformed_file_fails_the_load() {
		let broken = file_with("[logging\n");

		let mut registry = ConfigRegistry::new();
		registry.register(Box::new(DefaultsSource));
		registry.register(Box::new(FileSource::custom(
			broken.path().to_path_buf(),
			Precedence::SystemFile,
			"system-config",
		)));

		let err = registry.load(PathsConfig::default()).unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { .. }), "{err}");
	}

	#[test]
	fn invalid_merged_config_is_rejected() {
		let mut registry = ConfigRegistry::new();
		registry.register(Box::new(EnvSource::from_vars([(
			"COGADMIN_REQUEST_TIMEOUT_SECS",
			"0",
		)])));

		let err = registry.load(PathsConfig::default()).unwrap_err();
		assert!(matches!(err, ConfigError::InvalidValue { .. }), "{err}");
	}
}
