// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Runtime configuration types with resolved defaults.

use std::fmt;
use std::time::Duration;

use cogadmin_client::ListEnvelope;
use serde::Serialize;

use crate::layer::{BackendLayer, ConfigLayer, LoggingLayer};
use crate::paths::PathsConfig;
use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// The final, validated configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CogadminConfig {
	pub backend: BackendConfig,
	pub logging: LoggingConfig,

	#[serde(skip)]
	pub paths: PathsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendConfig {
	pub base_url: String,
	#[serde(with = "duration_secs")]
	pub request_timeout: Duration,
	pub list_envelope: ListEnvelope,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoggingConfig {
	pub level: LogLevel,
	pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
	Error,
	Warn,
	#[default]
	Info,
	Debug,
	Trace,
}

impl LogLevel {
	pub fn as_str(&self) -> &'static str {
		match self {
			LogLevel::Error => "error",
			LogLevel::Warn => "warn",
			LogLevel::Info => "info",
			LogLevel::Debug => "debug",
			LogLevel::Trace => "trace",
		}
	}
}

impl fmt::Display for LogLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	#[default]
	Pretty,
	Compact,
	Json,
}

impl Default for BackendConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_string(),
			request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
			list_envelope: ListEnvelope::default(),
		}
	}
}

impl CogadminConfig {
	/// Resolve a merged layer into concrete values, filling defaults.
	pub fn from_layer(layer: ConfigLayer, paths: PathsConfig) -> Result<Self, ConfigError> {
		Ok(Self {
			backend: build_backend_config(layer.backend)?,
			logging: build_logging_config(layer.logging)?,
			paths,
		})
	}
}

fn build_backend_config(layer: Option<BackendLayer>) -> Result<BackendConfig, ConfigError> {
	let layer = layer.unwrap_or_default();
	let list_envelope = match layer.list_envelope.as_deref() {
		Some(raw) => raw
			.parse::<ListEnvelope>()
			.map_err(|e| ConfigError::invalid_value("backend.list_envelope", e.to_string()))?,
		None => ListEnvelope::default(),
	};

	Ok(BackendConfig {
		base_url: layer
			.base_url
			.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
		request_timeout: Duration::from_secs(
			layer
				.request_timeout_secs
				.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
		),
		list_envelope,
	})
}

fn build_logging_config(layer: Option<LoggingLayer>) -> Result<LoggingConfig, ConfigError> {
	let layer = layer.unwrap_or_default();
	Ok(LoggingConfig {
		level: parse_log_level(layer.level.as_deref())?,
		format: parse_log_format(layer.format.as_deref())?,
	})
}

fn parse_log_level(s: Option<&str>) -> Result<LogLevel, ConfigError> {
	let Some(raw) = s else {
		return Ok(LogLevel::default());
	};
	match raw.to_ascii_lowercase().as_str() {
		"error" => Ok(LogLevel::Error),
		"warn" => Ok(LogLevel::Warn),
		"info" => Ok(LogLevel::Info),
		"debug" => Ok(LogLevel::Debug),
		"trace" => Ok(LogLevel::Trace),
		_ => Err(ConfigError::invalid_value(
			"logging.level",
			format!("unknown level '{raw}', expected error, warn, info, debug or trace"),
		)),
	}
}

fn parse_log_format(s: Option<&str>) -> Result<LogFormat, ConfigError> {
	let Some(raw) = s else {
		return Ok(LogFormat::default());
	};
	match raw.to_ascii_lowercase().as_str() {
		"pretty" => Ok(LogFormat::Pretty),
		"compact" => Ok(LogFormat::Compact),
		"json" => Ok(LogFormat::Json),
		_ => Err(ConfigError::invalid_value(
			"logging.format",
			format!("unknown format '{raw}', expected pretty, compact or json"),
		)),
	}
}

mod duration_secs {
	use serde::Serializer;
	use std::time::Duration;

	pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_u64(duration.as_secs())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_layer_resolves_to_defaults() {
		let config = CogadminConfig::from_layer(ConfigLayer::default(), PathsConfig::default()).unwrap();
		assert_eq!(config.backend, BackendConfig::default());
		assert_eq!(config.backend.base_url, "http://localhost:8080");
		assert_eq!(config.backend.request_timeout, Duration::from_secs(30));
		assert_eq!(config.backend.list_envelope, ListEnvelope::Auto);
		assert_eq!(config.logging, LoggingConfig::default());
	}

	#[test]
	fn layer_values_are_resolved() {
		let layer = ConfigLayer {
			backend: Some(BackendLayer {
				base_url: Some("https://admin.example.com".to_string()),
				request_timeout_secs: Some(5),
				list_envelope: Some("Wrapped".to_string()),
			}),
			logging: Some(LoggingLayer {
				level: Some("DEBUG".to_string()),
				format: Some("json".to_string()),
			}),
		};

		let config = CogadminConfig::from_layer(layer, PathsConfig::default()).unwrap();
		assert_eq!(config.backend.request_timeout, Duration::from_secs(5));
		assert_eq!(config.backend.list_envelope, ListEnvelope::Wrapped);
		assert_eq!(config.logging.level, LogLevel::Debug);
		assert_eq!(config.logging.format, LogFormat::Json);
	}

	#[test]
	fn unknown_enumerations_are_rejected() {
		let mut layer = ConfigLayer::default();
		layer.backend_mut().list_envelope = Some("paged".to_string());
		let err = CogadminConfig::from_layer(layer, PathsConfig::default()).unwrap_err();
		assert!(err.to_string().contains("backend.list_envelope"), "{err}");

		let mut layer = ConfigLayer::default();
		layer.logging_mut().level = Some("loud".to_string());
		let err = CogadminConfig::from_layer(layer, PathsConfig::default()).unwrap_err();
		assert!(err.to_string().contains("logging.level"), "{err}");
	}

	#[test]
	fn serializes_timeout_as_seconds() {
		let value = toml::to_string(&BackendConfig::default()).unwrap();
		assert!(value.contains("request_timeout = 30"), "{value}");
		assert!(value.contains("list_envelope = \"auto\""), "{value}");
	}
}
