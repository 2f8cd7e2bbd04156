// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: files, environment, CLI, defaults.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::layer::ConfigLayer;
use crate::paths::PathsConfig;
use crate::ConfigError;

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	SystemFile = 20,
	UserFile = 30,
	ExplicitFile = 40,
	Environment = 50,
	Cli = 60,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	/// Name for logging
	fn name(&self) -> &'static str;

	fn precedence(&self) -> Precedence;

	fn load(&self) -> Result<ConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		// Defaults are applied when the runtime config is built
		Ok(ConfigLayer::default())
	}
}

/// TOML file source. A missing file is skipped unless the source is required.
pub struct FileSource {
	path: PathBuf,
	precedence: Precedence,
	name: &'static str,
	required: bool,
}

impl FileSource {
	/// System config: /etc/cogadmin/config.toml
	pub fn system(paths: &PathsConfig) -> Self {
		Self::custom(
			paths.system_config_file.clone(),
			Precedence::SystemFile,
			"system-config",
		)
	}

	/// User config: ~/.config/cogadmin/config.toml
	pub fn user(paths: &PathsConfig) -> Self {
		Self::custom(
			paths.user_config_file.clone(),
			Precedence::UserFile,
			"user-config",
		)
	}

	/// File named with `--config`; it must exist.
	pub fn explicit(path: PathBuf) -> Self {
		Self::custom(path, Precedence::ExplicitFile, "explicit-config").required()
	}

	pub fn custom(path: PathBuf, precedence: Precedence, name: &'static str) -> Self {
		Self {
			path,
			precedence,
			name,
			required: false,
		}
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}
}

impl ConfigSource for FileSource {
	fn name(&self) -> &'static str {
		self.name
	}
	fn precedence(&self) -> Precedence {
		self.precedence
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.path.exists() {
			if self.required {
				return Err(ConfigError::FileNotFound(self.path.clone()));
			}
			debug!(path = %self.path.display(), source = self.name, "config file not found, skipping");
			return Ok(ConfigLayer::default());
		}

		debug!(path = %self.path.display(), source = self.name, "loading config file");

		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::Io {
			path: self.path.clone(),
			source: e,
		})?;
		let layer: ConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!(source = self.name, "parsed config layer");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Reads `COGADMIN_*` variables; `API_BASE_URL` is honoured when
/// `COGADMIN_BASE_URL` is unset. Blank values are ignored.
pub struct EnvSource {
	vars: Vec<(String, String)>,
}

impl EnvSource {
	/// Snapshot of the process environment.
	pub fn new() -> Self {
		Self::from_vars(std::env::vars())
	}

	pub fn from_vars<I, K, V>(vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			vars: vars
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading environment variables");
		let mut layer = ConfigLayer::default();
		let mut fallback_base_url = None;

		for (key, value) in &self.vars {
			let value = value.trim();
			if value.is_empty() {
				continue;
			}

			match key.as_str() {
				"COGADMIN_BASE_URL" => {
					layer.backend_mut().base_url = Some(value.to_string());
				}
				"API_BASE_URL" => {
					fallback_base_url = Some(value.to_string());
				}
				"COGADMIN_REQUEST_TIMEOUT_SECS" => {
					let secs = value.parse::<u64>().map_err(|_| {
						ConfigError::Env(format!(
							"COGADMIN_REQUEST_TIMEOUT_SECS must be a whole number of seconds, got '{value}'"
						))
					})?;
					layer.backend_mut().request_timeout_secs = Some(secs);
				}
				"COGADMIN_LIST_ENVELOPE" => {
					layer.backend_mut().list_envelope = Some(value.to_string());
				}
				"COGADMIN_LOG_LEVEL" => {
					layer.logging_mut().level = Some(value.to_string());
				}
				"COGADMIN_LOG_FORMAT" => {
					layer.logging_mut().format = Some(value.to_string());
				}
				_ => continue,
			}

			trace!(key = %key, "applied env var");
		}

		if let Some(url) = fallback_base_url {
			let backend = layer.backend_mut();
			if backend.base_url.is_none() {
				backend.base_url = Some(url);
			}
		}

		Ok(layer)
	}
}

/// Values taken from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub config_file: Option<PathBuf>,
	pub base_url: Option<String>,
	pub log_level: Option<String>,
	pub json_logs: bool,
}

pub struct CliSource {
	overrides: CliOverrides,
}

impl CliSource {
	pub fn new(overrides: CliOverrides) -> Self {
		Self { overrides }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"cli"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		let mut layer = ConfigLayer::default();

		if let Some(url) = &self.overrides.base_url {
			layer.backend_mut().base_url = Some(url.clone());
		}
		if let Some(level) = &self.overrides.log_level {
			layer.logging_mut().level = Some(level.clone());
		}
		if self.overrides.json_logs {
			layer.logging_mut().format = Some("json".to_string());
		}

		Ok(layer)
	}
}
