//! JSON log subscriber writing to stdout and, when configured, a rolling log file.

// std
use std::path::Path;
// crates.io
use tracing_appender::{
	non_blocking::WorkerGuard,
	rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{
	EnvFilter, filter::ParseError, fmt, fmt::writer::MakeWriterExt, layer::SubscriberExt,
	util::{SubscriberInitExt, TryInitError},
};
// self
use crate::{
	_prelude::*,
	config::{Config, LogRotation},
};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Failures raised while installing the global subscriber.
#[derive(Debug, ThisError)]
pub enum LoggingError {
	/// Log path does not name a file.
	#[error("Log path `{0}` does not name a file.")]
	InvalidPath(String),
	/// Rolling log file could not be created.
	#[error("Log file could not be opened.")]
	Appender(#[from] InitError),
	/// Fallback filter directive is invalid.
	#[error(transparent)]
	Filter(#[from] ParseError),
	/// A global subscriber is already installed.
	#[error(transparent)]
	AlreadyInitialized(#[from] TryInitError),
}

/// Installs a JSON subscriber honoring `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
///
/// Events go to stdout; when [`Config::log_path`] is set they are also written, off the calling
/// thread, to a file rolled over per [`Config::log_rotation`]. The returned guard flushes that
/// file when dropped and must be held for as long as logs should reach it.
pub fn init(config: &Config) -> Result<Option<WorkerGuard>, LoggingError> {
	let filter = match EnvFilter::try_from_default_env() {
		Ok(filter) => filter,
		Err(_) => EnvFilter::try_new(DEFAULT_FILTER)?,
	};
	let registry = tracing_subscriber::registry().with(filter);
	let guard = match &config.log_path {
		Some(path) => {
			let appender = rolling_appender(path, config.log_rotation, config.log_max_files)?;
			let (file, guard) = tracing_appender::non_blocking(appender);

			registry
				.with(fmt::layer().json().with_target(true).with_writer(std::io::stdout.and(file)))
				.try_init()?;

			Some(guard)
		},
		None => {
			registry.with(fmt::layer().json().with_target(true)).try_init()?;

			None
		},
	};

	tracing::info!(log_path = ?config.log_path, "logging initialized");

	Ok(guard)
}

fn rolling_appender(
	path: &Path,
	rotation: LogRotation,
	max_files: Option<usize>,
) -> Result<RollingFileAppender, LoggingError> {
	let prefix = path
		.file_stem()
		.map(|stem| stem.to_string_lossy().into_owned())
		.ok_or_else(|| LoggingError::InvalidPath(path.display().to_string()))?;
	let dir = path.parent().filter(|dir| !dir.as_os_str().is_empty()).unwrap_or(Path::new("."));
	let rotation = match rotation {
		LogRotation::Hourly => Rotation::HOURLY,
		LogRotation::Daily => Rotation::DAILY,
		LogRotation::Never => Rotation::NEVER,
	};
	let mut builder = RollingFileAppender::builder().rotation(rotation).filename_prefix(prefix);

	if let Some(extension) = path.extension() {
		builder = builder.filename_suffix(extension.to_string_lossy().into_owned());
	}
	if let Some(count) = max_files {
		builder = builder.max_log_files(count);
	}

	Ok(builder.build(dir)?)
}
