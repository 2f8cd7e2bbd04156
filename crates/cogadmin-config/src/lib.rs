// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the cogadmin console.
//!
//! Layers are read from built-in defaults, the system file, the user file,
//! an optional `--config` file, `COGADMIN_*` environment variables and
//! command-line flags, in that order, and resolved into a validated
//! [`CogadminConfig`].

pub mod error;
pub mod layer;
pub mod paths;
pub mod registry;
pub mod runtime;
pub mod sources;
pub mod validation;

pub use error::ConfigError;
pub use layer::ConfigLayer;
pub use paths::PathsConfig;
pub use registry::ConfigRegistry;
pub use runtime::{BackendConfig, CogadminConfig, LogFormat, LogLevel, LoggingConfig};
pub use sources::{CliOverrides, ConfigSource, Precedence};

/// Load configuration from every source, with CLI overrides on top.
pub fn load_config(cli: CliOverrides) -> Result<CogadminConfig, ConfigError> {
	let paths = paths::resolve_xdg_paths()?;

	let mut registry = ConfigRegistry::new();
	registry.register(Box::new(sources::DefaultsSource));
	registry.register(Box::new(sources::FileSource::system(&paths)));
	registry.register(Box::new(sources::FileSource::user(&paths)));
	if let Some(path) = cli.config_file.clone() {
		registry.register(Box::new(sources::FileSource::explicit(path)));
	}
	registry.register(Box::new(sources::EnvSource::new()));
	registry.register(Box::new(sources::CliSource::new(cli)));

	registry.load(paths)
}
