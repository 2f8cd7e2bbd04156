// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! cogadmin - admin console for identity-provider application records.
//!
//! Every command hydrates the record list from the admin API first, then
//! runs one operation through the console the same way the web console
//! does: forms are validated locally, toggles and deletes are confirmed.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cogadmin_client::HttpAppsBackend;
use cogadmin_config::{load_config, CliOverrides, LogFormat, LogLevel, LoggingConfig};
use cogadmin_core::{AppId, ApplicationRecord, EnabledState, Field, FormError};
use cogadmin_store::{AppStore, Console, NotificationCenter, OperationError, Summary};

mod prompt;
mod render;

/// cogadmin - manage identity-provider application records
#[derive(Parser, Debug)]
#[command(name = "cogadmin", version, about, long_about = None)]
struct Args {
	/// Path to an additional configuration file
	#[arg(short, long, global = true)]
	config: Option<PathBuf>,

	/// Admin API base URL (overrides config)
	#[arg(long, global = true)]
	base_url: Option<String>,

	/// Log level (overrides config)
	#[arg(short, long, global = true)]
	log_level: Option<String>,

	/// Output logs as JSON (overrides config)
	#[arg(long, global = true)]
	json_logs: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// List applications with status badges
	List {
		/// Case-insensitive filter on name, region or user pool id
		#[arg(short, long)]
		search: Option<String>,
		/// Print the list as JSON
		#[arg(long)]
		json: bool,
	},
	/// List the supported AWS regions
	Regions,
	/// Register a new application
	Create(FormArgs),
	/// Update an existing application; the client secret must be re-entered
	Edit {
		id: String,
		#[command(flatten)]
		fields: FormArgs,
	},
	/// Enable a disabled application
	Enable(TargetArgs),
	/// Disable an application
	Disable(TargetArgs),
	/// Permanently delete an application
	Delete(TargetArgs),
}

#[derive(clap::Args, Debug)]
struct FormArgs {
	/// Application name
	#[arg(long)]
	name: Option<String>,
	/// AWS region code, e.g. eu-west-2
	#[arg(long)]
	region: Option<String>,
	/// Cognito user pool id, e.g. eu-west-2_AbC123
	#[arg(long)]
	user_pool_id: Option<String>,
	/// App client id
	#[arg(long)]
	client_id: Option<String>,
	/// App client secret
	#[arg(long, env = "COGADMIN_CLIENT_SECRET", hide_env_values = true)]
	client_secret: Option<String>,
}

impl FormArgs {
	fn into_fields(self) -> [(Field, Option<String>); 5] {
		[
			(Field::AppName, self.name),
			(Field::AwsRegion, self.region),
			(Field::UserPoolId, self.user_pool_id),
			(Field::ClientId, self.client_id),
			(Field::ClientSecret, self.client_secret),
		]
	}
}

#[derive(clap::Args, Debug)]
struct TargetArgs {
	/// Application id
	id: String,
	/// Skip the confirmation prompt
	#[arg(short, long)]
	yes: bool,
}

impl From<&Args> for CliOverrides {
	fn from(args: &Args) -> Self {
		CliOverrides {
			config_file: args.config.clone(),
			base_url: args.base_url.clone(),
			log_level: args.log_level.clone(),
			json_logs: args.json_logs,
		}
	}
}

#[derive(Serialize)]
struct ListOutput<'a> {
	summary: Summary,
	applications: &'a [ApplicationRecord],
}

fn log_level_to_tracing(level: LogLevel) -> tracing::Level {
	match level {
		LogLevel::Trace => tracing::Level::TRACE,
		LogLevel::Debug => tracing::Level::DEBUG,
		LogLevel::Info => tracing::Level::INFO,
		LogLevel::Warn => tracing::Level::WARN,
		LogLevel::Error => tracing::Level::ERROR,
	}
}

// Logs go to stderr; stdout carries command output.
fn init_tracing(logging: &LoggingConfig) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		EnvFilter::new(format!("cogadmin={}", log_level_to_tracing(logging.level)))
	});

	match logging.format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(io::stderr))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().compact().with_writer(io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().with_writer(io::stderr))
				.init();
		}
	}
}

fn flag_name(field: Field) -> &'static str {
	match field {
		Field::AppName => "--name",
		Field::AwsRegion => "--region",
		Field::UserPoolId => "--user-pool-id",
		Field::ClientId => "--client-id",
		Field::ClientSecret => "--client-secret",
	}
}

fn submission_error(err: OperationError) -> anyhow::Error {
	match err {
		OperationError::Form(FormError::Invalid(errors)) => {
			let detail = errors
				.iter()
				.map(|(field, message)| format!("  {}: {message}", flag_name(field)))
				.collect::<Vec<_>>()
				.join("\n");
			anyhow!("invalid application details:\n{detail}")
		}
		other => anyhow::Error::new(other),
	}
}

fn ask(question: &str) -> Result<bool> {
	prompt::confirm(question, io::stdin().lock(), io::stderr()).context("failed to read confirmation")
}

fn lookup(console: &Console, id: &AppId) -> Result<ApplicationRecord> {
	console
		.store()
		.get(id)
		.ok_or_else(|| anyhow!("application {id} not found"))
}

async fn submit_form(console: &Console, fields: FormArgs) -> Result<()> {
	for (field, value) in fields.into_fields() {
		if let Some(value) = value {
			console.set_field(field, value)?;
		}
	}

	let record = console.submit().await.map_err(submission_error)?;
	debug!(id = %record.id, "form submitted");
	println!("{}", record.id);
	Ok(())
}

async fn toggle(console: &Console, target: EnabledState, args: TargetArgs) -> Result<()> {
	let id = AppId::new(args.id);
	let record = lookup(console, &id)?;
	if record.state() == target {
		println!(
			"{} is already {}.",
			record.name_or("Application"),
			target.past_tense()
		);
		return Ok(());
	}

	console.request_toggle(&id)?;
	if !args.yes && !ask(&render::toggle_prompt(&record, target))? {
		console.cancel();
		println!("Cancelled.");
		return Ok(());
	}

	console.confirm().await?;
	Ok(())
}

async fn delete(console: &Console, args: TargetArgs) -> Result<()> {
	let id = AppId::new(args.id);
	let record = lookup(console, &id)?;

	console.request_delete(&id)?;
	if !args.yes && !ask(&render::delete_prompt(&record))? {
		console.cancel();
		println!("Cancelled.");
		return Ok(());
	}

	console.confirm().await?;
	Ok(())
}

/// The list view over the store as it stands, loaded or not.
fn list_view(store: &AppStore, query: &str, json: bool) -> Result<String> {
	let visible = store.search(query);
	if json {
		let output = ListOutput {
			summary: store.summary(),
			applications: &visible,
		};
		return Ok(format!("{}\n", serde_json::to_string_pretty(&output)?));
	}
	let refs: Vec<&ApplicationRecord> = visible.iter().collect();
	Ok(render::list(store.summary(), &refs, query))
}

/// Loads and renders the list. A failed load still renders the empty
/// state before the failure is returned.
async fn list(store: &AppStore, query: &str, json: bool) -> Result<()> {
	let loaded = store.load().await;
	print!("{}", list_view(store, query, json)?);
	let count = loaded?;
	info!(count, "applications loaded");
	Ok(())
}

async fn run(console: &Console, command: Command) -> Result<()> {
	let store = console.store();
	let command = match command {
		Command::Regions => {
			print!("{}", render::regions());
			return Ok(());
		}
		Command::List { search, json } => {
			let query = search.unwrap_or_default();
			return list(store, &query, json).await;
		}
		other => other,
	};

	let count = store.load().await?;
	info!(count, "applications loaded");

	match command {
		Command::Regions | Command::List { .. } => {}
		Command::Create(fields) => {
			console.open_create();
			submit_form(console, fields).await?;
		}
		Command::Edit { id, fields } => {
			let id = AppId::new(id);
			console.open_edit(&id)?;
			submit_form(console, fields).await?;
		}
		Command::Enable(args) => toggle(console, EnabledState::Enabled, args).await?,
		Command::Disable(args) => toggle(console, EnabledState::Disabled, args).await?,
		Command::Delete(args) => delete(console, args).await?,
	}

	Ok(())
}

fn report(notifications: &NotificationCenter) {
	for notification in notifications.drain() {
		if notification.is_failure() {
			eprintln!("{}", render::notification(&notification));
		} else {
			println!("{}", render::notification(&notification));
		}
	}
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
	let args = Args::parse();

	let config =
		load_config(CliOverrides::from(&args)).context("failed to load configuration")?;
	init_tracing(&config.logging);

	info!(base_url = %config.backend.base_url, "starting cogadmin");

	let backend = HttpAppsBackend::builder()
		.base_url(config.backend.base_url.clone())
		.request_timeout(config.backend.request_timeout)
		.list_envelope(config.backend.list_envelope)
		.build()
		.context("failed to create admin API client")?;
	let console = Console::new(AppStore::new(Arc::new(backend)));

	let outcome = run(&console, args.command).await;
	report(console.store().notifications());

	match outcome {
		Ok(()) => Ok(ExitCode::SUCCESS),
		Err(err) => {
			eprintln!("error: {err:#}");
			Ok(ExitCode::FAILURE)
		}
	}
}
