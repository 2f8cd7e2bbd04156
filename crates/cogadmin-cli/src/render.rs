// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Plain-text rendering for the terminal.

use cogadmin_core::{ApplicationRecord, AwsRegion, EnabledState};
use cogadmin_store::{Notification, Summary};

const UNNAMED: &str = "Unnamed App";
const MISSING: &str = "N/A";

const HEADERS: [&str; 7] = [
	"ID",
	"APPLICATION",
	"APP KEY",
	"REGION",
	"USER POOL ID",
	"CLIENT ID",
	"STATUS",
];

/// First `n` characters of `value`, or `N/A` when it is empty.
fn preview(value: &str, n: usize) -> String {
	if value.is_empty() {
		return MISSING.to_string();
	}
	value.chars().take(n).collect()
}

fn or_missing(value: &str) -> &str {
	if value.is_empty() {
		MISSING
	} else {
		value
	}
}

pub fn status_label(state: EnabledState) -> &'static str {
	if state.is_enabled() {
		"Active"
	} else {
		"Disabled"
	}
}

pub fn badges(summary: Summary) -> String {
	format!("{} Applications  {} Active", summary.total, summary.active)
}

fn row(record: &ApplicationRecord) -> [String; 7] {
	[
		record.id.to_string(),
		record.name_or(UNNAMED).to_string(),
		format!("{}...", preview(&record.app_key, 8)),
		or_missing(&record.aws_region).to_string(),
		or_missing(&record.user_pool_id).to_string(),
		format!("{}...", preview(&record.client_id, 12)),
		status_label(record.state()).to_string(),
	]
}

fn table(records: &[&ApplicationRecord]) -> String {
	let rows: Vec<[String; 7]> = records.iter().map(|r| row(r)).collect();

	let mut widths = HEADERS.map(|h| h.chars().count());
	for row in &rows {
		for (width, cell) in widths.iter_mut().zip(row) {
			*width = (*width).max(cell.chars().count());
		}
	}

	let mut out = String::new();
	let header = HEADERS.map(str::to_string);
	for cells in std::iter::once(&header).chain(rows.iter()) {
		let line = cells
			.iter()
			.zip(widths)
			.map(|(cell, width)| format!("{cell:<width$}"))
			.collect::<Vec<_>>()
			.join("  ");
		out.push_str(line.trim_end());
		out.push('\n');
	}
	out
}

/// Badges, then the visible records or the matching empty state.
pub fn list(summary: Summary, visible: &[&ApplicationRecord], query: &str) -> String {
	let mut out = badges(summary);
	out.push_str("\n\n");

	if !visible.is_empty() {
		out.push_str(&table(visible));
	} else if !query.trim().is_empty() && summary.total > 0 {
		out.push_str(&format!("No applications found matching \"{}\"\n", query.trim()));
	} else {
		out.push_str("No Applications Found\n");
		out.push_str("Get started by adding your first AWS Cognito application configuration.\n");
	}
	out
}

pub fn regions() -> String {
	let width = AwsRegion::ALL
		.iter()
		.map(|r| r.code().len())
		.max()
		.unwrap_or_default();
	AwsRegion::ALL
		.iter()
		.map(|r| format!("{:<width$}  {}\n", r.code(), r.label()))
		.collect()
}

fn quoted_name(record: &ApplicationRecord) -> String {
	match record.app_name.trim() {
		"" => "this application".to_string(),
		name => format!("\"{name}\""),
	}
}

pub fn toggle_prompt(record: &ApplicationRecord, target: EnabledState) -> String {
	let mut out = format!(
		"Are you sure you want to {} {}?",
		target.action(),
		quoted_name(record)
	);
	if !target.is_enabled() {
		out.push_str("\nThis will prevent users from authenticating through this application.");
	}
	out
}

pub fn delete_prompt(record: &ApplicationRecord) -> String {
	format!(
		"Are you sure you want to permanently delete {}?\n\
		 This action cannot be undone. This will permanently:\n\
		 \x20 - Remove the application configuration\n\
		 \x20 - Disable all authentication for this app\n\
		 \x20 - Delete all associated settings and keys\n\
		 App Key: {}",
		quoted_name(record),
		or_missing(&record.app_key)
	)
}

pub fn notification(notification: &Notification) -> String {
	format!("{}: {}", notification.title, notification.description)
}

#[cfg(test)]
mod tests {
	use super::*;
	use cogadmin_core::AppId;

	fn record(id: &str, name: &str, enabled: bool) -> ApplicationRecord {
		ApplicationRecord {
			id: AppId::new(id),
			app_key: "ak_0123456789abcdef".to_string(),
			app_name: name.to_string(),
			aws_region: "eu-west-2".to_string(),
			user_pool_id: "eu-west-2_ABC123".to_string(),
			client_id: "4f1c2e9a7b3d6c8e0f".to_string(),
			enabled,
		}
	}

	#[test]
	fn row_truncates_key_and_client_id() {
		let cells = row(&record("1", "Billing", true));
		assert_eq!(cells[2], "ak_01234...");
		assert_eq!(cells[5], "4f1c2e9a7b3d...");
		assert_eq!(cells[6], "Active");
	}

	#[test]
	fn row_uses_fallbacks_for_blank_fields() {
		let blank = ApplicationRecord {
			id: AppId::new("2"),
			app_key: String::new(),
			app_name: " ".to_string(),
			aws_region: String::new(),
			user_pool_id: String::new(),
			client_id: String::new(),
			enabled: false,
		};
		let cells = row(&blank);
		assert_eq!(cells[1], "Unnamed App");
		assert_eq!(cells[2], "N/A...");
		assert_eq!(cells[3], "N/A");
		assert_eq!(cells[6], "Disabled");
	}

	#[test]
	fn list_shows_badges_and_aligned_rows() {
		let a = record("1", "Billing", true);
		let b = record("22", "Payroll", false);
		let out = list(Summary { total: 2, active: 1 }, &[&a, &b], "");

		let lines: Vec<&str> = out.lines().collect();
		assert_eq!(lines[0], "2 Applications  1 Active");
		assert!(lines[2].starts_with("ID  APPLICATION"));
		assert!(lines[3].starts_with("1   Billing"));
		assert!(lines[4].ends_with("Disabled"));
	}

	#[test]
	fn empty_states_depend_on_query() {
		let hidden = list(Summary { total: 3, active: 3 }, &[], "zzz");
		assert!(hidden.contains("No applications found matching \"zzz\""));

		let empty = list(Summary::default(), &[], "");
		assert!(empty.contains("No Applications Found"));
	}

	#[test]
	fn disable_prompt_warns_and_enable_does_not() {
		let app = record("1", "Billing", true);
		let disable = toggle_prompt(&app, EnabledState::Disabled);
		assert!(disable.starts_with("Are you sure you want to disable \"Billing\"?"));
		assert!(disable.contains("prevent users from authenticating"));

		let enable = toggle_prompt(&app, EnabledState::Enabled);
		assert!(!enable.contains("prevent users"));
	}

	#[test]
	fn delete_prompt_lists_consequences_and_key() {
		let out = delete_prompt(&record("1", "", true));
		assert!(out.contains("permanently delete this application?"));
		assert!(out.contains("  - Delete all associated settings and keys"));
		assert!(out.ends_with("App Key: ak_0123456789abcdef"));
	}

	#[test]
	fn regions_lists_every_code() {
		let out = regions();
		assert_eq!(out.lines().count(), AwsRegion::ALL.len());
		assert!(out.contains("Asia Pacific (Singapore)"));
	}
}
