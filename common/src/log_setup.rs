use std::path::PathBuf;
use std::sync::OnceLock;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder, InitError, Rotation};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Workspace library crates whose events follow the application level.
const WORKSPACE_TARGETS: [&str; 2] = ["imaginarium", "common"];

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LogSetupError {
    #[error("Invalid log filter: {0}")]
    Filter(#[from] ParseError),
    #[error("Failed to create log directory {}", .0.display())]
    Directory(PathBuf, #[source] std::io::Error),
    #[error("Failed to create log file appender")]
    Appender(#[from] InitError),
    #[error("Logging already initialized")]
    AlreadyInitialized,
    #[error("Logger initialization failed")]
    Init(#[from] TryInitError),
}

/// Where and how loudly an application logs.
#[derive(Debug, Clone)]
pub struct LogSettings {
    /// Crate target and log file prefix.
    pub app: String,
    pub level: Level,
    pub directory: PathBuf,
    pub retained_files: usize,
}

impl LogSettings {
    pub fn new(app: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            level: Level::INFO,
            directory: PathBuf::from("logs"),
            retained_files: 5,
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Dependencies stay at WARN; the app and workspace crates use `level`.
    pub fn filter_directive(&self) -> String {
        let level = self.level.as_str().to_ascii_lowercase();
        let mut directive = format!("warn,{}={level}", self.app);
        for target in WORKSPACE_TARGETS {
            if target != self.app {
                directive.push_str(&format!(",{target}={level}"));
            }
        }
        directive
    }
}

/// Installs console and daily-rotated file logging.
///
/// `RUST_LOG` replaces the directive from `settings` when set.
pub fn setup_logging(settings: &LogSettings) -> Result<(), LogSetupError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(settings.filter_directive())?,
    };

    std::fs::create_dir_all(&settings.directory)
        .map_err(|e| LogSetupError::Directory(settings.directory.clone(), e))?;

    let file_appender = Builder::new()
        .rotation(Rotation::DAILY)
        .filename_prefix(&settings.app)
        .filename_suffix("log")
        .max_log_files(settings.retained_files)
        .build(&settings.directory)?;

    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    LOG_GUARD.set(guard).map_err(|_| LogSetupError::AlreadyInitialized)?;

    let console_writer = std::io::stdout.and(std::io::stderr.with_min_level(Level::WARN));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_line_number(false)
        .with_ansi(true)
        .with_writer(console_writer);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(file_writer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}
