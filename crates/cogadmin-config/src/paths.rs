// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! XDG Base Directory compliant path resolution.

use std::path::{Path, PathBuf};

use crate::ConfigError;

const SYSTEM_CONFIG_FILE: &str = "/etc/cogadmin/config.toml";

/// Resolved config file locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsConfig {
	/// User config file: ~/.config/cogadmin/config.toml
	pub user_config_file: PathBuf,
	/// System config file: /etc/cogadmin/config.toml
	pub system_config_file: PathBuf,
}

impl PathsConfig {
	/// Get the config directory (parent of user_config_file)
	pub fn config_dir(&self) -> PathBuf {
		self
			.user_config_file
			.parent()
			.map(|p| p.to_path_buf())
			.unwrap_or_else(|| self.user_config_file.clone())
	}
}

impl Default for PathsConfig {
	fn default() -> Self {
		Self {
			user_config_file: PathBuf::from("~/.config/cogadmin/config.toml"),
			system_config_file: PathBuf::from(SYSTEM_CONFIG_FILE),
		}
	}
}

/// Resolve paths from `XDG_CONFIG_HOME`, falling back to `~/.config`.
pub fn resolve_xdg_paths() -> Result<PathsConfig, ConfigError> {
	let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
	let config_home = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
	Ok(paths_for(&home, config_home))
}

fn paths_for(home: &Path, config_home: Option<PathBuf>) -> PathsConfig {
	// An empty XDG_CONFIG_HOME counts as unset
	let config_home = config_home
		.filter(|p| !p.as_os_str().is_empty())
		.unwrap_or_else(|| home.join(".config"));

	tracing::debug!(config_home = %config_home.display(), "resolved XDG paths");

	PathsConfig {
		user_config_file: config_home.join("cogadmin/config.toml"),
		system_config_file: PathBuf::from(SYSTEM_CONFIG_FILE),
	}
}
