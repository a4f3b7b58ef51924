//! Startup: configuration, logging, storage and the native messaging host.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use keyhold_config::{keyhold_dir, Config, ConfigError, ConfigLoader, ConfigValidator};
use keyhold_core::{BackgroundService, MemoryKeyValueStore, SystemClock};
use keyhold_protocols::KeyValueStore;
use keyhold_storage_file::FileKeyValueStore;

use crate::host;

fn default_config_path() -> PathBuf {
    keyhold_dir().join("config.toml")
}

/// Load the configuration. A missing file yields the defaults, reported
/// through the returned flag since logging is not up yet.
pub(crate) fn load_config(path: Option<&Path>) -> Result<(Config, bool), ConfigError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    match ConfigLoader::load(&path) {
        Ok(config) => Ok((config, false)),
        Err(ConfigError::NotFound(_)) => Ok((Config::default(), true)),
        Err(e) => Err(e),
    }
}

/// Initialize tracing with stderr and file output.
///
/// stdout carries native messaging frames, so console logs go to stderr.
/// Log files are written to the configured directory with daily rotation.
pub(crate) fn init_tracing(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = &config.logging.directory;
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("keyhold")
        .filename_suffix("log")
        .max_log_files(14)
        .build(log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keeps the file writer alive for the whole process.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(false),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

/// Log validation warnings; fail on errors.
pub(crate) fn check_config(config: &Config) -> Result<(), ConfigError> {
    for warning in ConfigValidator::validate(config).into_result()? {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    Ok(())
}

pub(crate) fn open_store(config: &Config) -> Arc<dyn KeyValueStore> {
    match config.storage.backend {
        keyhold_config::StorageBackend::File => {
            info!("Using storage file {}", config.storage.path.display());
            Arc::new(FileKeyValueStore::new(config.storage.path.clone()))
        }
        keyhold_config::StorageBackend::Memory => Arc::new(MemoryKeyValueStore::new()),
    }
}

pub(crate) fn build_service(config: &Config) -> Result<BackgroundService, Box<dyn std::error::Error>> {
    let ttl = Duration::from_secs(config.capture.pending_ttl_secs);
    Ok(BackgroundService::new(
        open_store(config),
        Arc::new(SystemClock),
        ttl,
    )?)
}

/// Serve the extension on stdin/stdout until the browser closes the pipe.
pub(crate) async fn run_host(
    config: &Config,
    caller: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Keyhold host v{}", env!("CARGO_PKG_VERSION"));
    if let Some(origin) = caller.first() {
        info!("Launched by {}", origin);
    }

    let service = build_service(config)?;
    host::serve(&service, tokio::io::stdin(), tokio::io::stdout()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let (config, defaulted) = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert!(defaulted);
        assert_eq!(config.capture.pending_ttl_secs, 60);
    }

    #[test]
    fn test_config_file_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[capture]\npending_ttl_secs = 30\n").unwrap();

        let (config, defaulted) = load_config(Some(&path)).unwrap();
        assert!(!defaulted);
        assert_eq!(config.capture.pending_ttl_secs, 30);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = Config::default();
        config.capture.pending_ttl_secs = 0;
        assert!(check_config(&config).is_err());
    }

    #[tokio::test]
    async fn test_file_backend_persists() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.path = dir.path().join("storage.json");

        let service = build_service(&config).unwrap();
        service.vault().add("univille.br", "alice", "secret1").await.unwrap();

        let reopened = build_service(&config).unwrap();
        assert_eq!(reopened.vault().list().await.unwrap().len(), 1);
    }
}
