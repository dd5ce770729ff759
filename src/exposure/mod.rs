//! Read-only exposure of allow-listed configuration sections.
//!
//! # Data Flow
//! ```text
//! request (method, path)
//!     → selector.rs (does the path belong to us? which scope?)
//!     → load_document (read file with timeout → ini::parse)
//!     → view.rs (filter by allow_list.rs, narrow to scope)
//!     → JSON body, or error.rs → status code
//! ```
//!
//! # Design Decisions
//! - The file is re-read and re-parsed on every request; nothing is cached
//! - The only shared state is immutable and built once at startup
//! - Every failure is resolved into a response here; none reach the inner handler
//! - Reads run on the blocking pool and cannot be cancelled, so a read that
//!   outlives its timeout keeps its slot until it returns; once every slot is
//!   held, requests fail at once instead of queueing more stuck threads

pub mod allow_list;
pub mod error;
pub mod selector;
pub mod view;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::http::Method;
use thiserror::Error;
use tokio::sync::Semaphore;

use crate::config::ConfigInfoConfig;
use crate::ini::{self, ConfigDocument};

pub use allow_list::AllowList;
pub use error::ExposureError;
pub use selector::{matches_prefix, PathSelector};
pub use view::FilteredView;

/// Errors raised while building the endpoint state at startup.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("public_config is required to enable the configuration endpoint")]
    MissingAllowList,
}

/// Immutable state shared by every request to the endpoint.
#[derive(Debug, Clone)]
pub struct ConfigInfoState {
    endpoint_path: String,
    allow_list: AllowList,
    config_file: Option<PathBuf>,
    read_timeout: Duration,
    read_slots: Arc<Semaphore>,
}

impl ConfigInfoState {
    /// Build the state, failing fast when no allow-list is configured.
    pub fn new(config: &ConfigInfoConfig) -> Result<Self, SetupError> {
        let raw = config.public_config.as_deref().ok_or(SetupError::MissingAllowList)?;

        Ok(Self {
            endpoint_path: config.endpoint_path.clone(),
            allow_list: AllowList::parse(raw),
            config_file: config.config_file.clone(),
            read_timeout: Duration::from_millis(config.read_timeout_ms),
            read_slots: Arc::new(Semaphore::new(config.max_pending_reads.max(1))),
        })
    }

    pub fn endpoint_path(&self) -> &str {
        &self.endpoint_path
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// True if the request path is addressed to this endpoint.
    pub fn handles(&self, path: &str) -> bool {
        matches_prefix(&self.endpoint_path, path)
    }

    /// Resolve a request already routed to the endpoint into the view to serve.
    pub async fn resolve(&self, method: &Method, path: &str) -> Result<FilteredView, ExposureError> {
        if *method != Method::GET {
            return Err(ExposureError::MethodNotAllowed);
        }

        let document = self.load_document().await?;
        let view = FilteredView::build(&document, &self.allow_list);
        let selector = PathSelector::from_path(&self.endpoint_path, path)?;
        view.select(&selector)
    }

    /// Read and parse the configuration file, bounded by the read timeout.
    pub async fn load_document(&self) -> Result<ConfigDocument, ExposureError> {
        let path = self
            .config_file
            .as_ref()
            .ok_or_else(|| ExposureError::ConfigUnavailable("no configuration file set".into()))?;

        let permit = Arc::clone(&self.read_slots).try_acquire_owned().map_err(|_| {
            ExposureError::ConfigUnavailable(format!(
                "every read slot is held by a pending read of {}",
                path.display()
            ))
        })?;

        let target = path.clone();
        let read = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            std::fs::read_to_string(target)
        });

        let contents = tokio::time::timeout(self.read_timeout, read)
            .await
            .map_err(|_| {
                ExposureError::ConfigUnavailable(format!(
                    "reading {} timed out after {:?}",
                    path.display(),
                    self.read_timeout
                ))
            })?
            .map_err(|e| ExposureError::ConfigUnavailable(format!("reading {}: {}", path.display(), e)))?
            .map_err(|e| ExposureError::ConfigUnavailable(format!("reading {}: {}", path.display(), e)))?;

        ini::parse(&contents)
            .map_err(|e| ExposureError::ConfigUnavailable(format!("parsing {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn conf_file(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn state_for(file: Option<&NamedTempFile>, public_config: &str) -> ConfigInfoState {
        let config = ConfigInfoConfig {
            public_config: Some(public_config.to_string()),
            config_file: file.map(|f| f.path().to_path_buf()),
            ..ConfigInfoConfig::default()
        };
        ConfigInfoState::new(&config).unwrap()
    }

    #[test]
    fn test_missing_public_config_fails_fast() {
        let err = ConfigInfoState::new(&ConfigInfoConfig::default()).unwrap_err();
        assert!(matches!(err, SetupError::MissingAllowList));
    }

    #[test]
    fn test_handles_only_endpoint_paths() {
        let state = state_for(None, "section1");
        assert!(state.handles("/configinfo"));
        assert!(state.handles("/configinfo/section1"));
        assert!(!state.handles("/"));
        assert!(!state.handles("/info"));
    }

    #[tokio::test]
    async fn test_method_checked_before_file_is_read() {
        let state = state_for(None, "section1");
        let err = state.resolve(&Method::POST, "/configinfo/a/b/c/d").await.unwrap_err();
        assert_eq!(err, ExposureError::MethodNotAllowed);
    }

    #[tokio::test]
    async fn test_unset_file_is_unavailable() {
        let state = state_for(None, "section1");
        let err = state.resolve(&Method::GET, "/configinfo").await.unwrap_err();
        assert!(matches!(err, ExposureError::ConfigUnavailable(_)));
    }

    #[tokio::test]
    async fn test_unreadable_file_is_unavailable() {
        let file = conf_file("[s]\na = 1\n");
        let config = ConfigInfoConfig {
            public_config: Some("s".into()),
            config_file: Some(file.path().join("not-a-directory")),
            ..ConfigInfoConfig::default()
        };
        let state = ConfigInfoState::new(&config).unwrap();
        let err = state.load_document().await.unwrap_err();
        assert!(matches!(err, ExposureError::ConfigUnavailable(_)));
    }

    #[tokio::test]
    async fn test_malformed_file_is_unavailable() {
        let file = conf_file("option_without_section = 1\n");
        let state = state_for(Some(&file), "s");
        let err = state.resolve(&Method::GET, "/configinfo").await.unwrap_err();
        assert!(matches!(err, ExposureError::ConfigUnavailable(_)));
    }

    #[tokio::test]
    async fn test_file_is_reread_per_request() {
        let file = conf_file("[s]\na = 1\n");
        let state = state_for(Some(&file), "s");

        let first = state.resolve(&Method::GET, "/configinfo/s/a").await.unwrap();
        assert_eq!(serde_json::to_string(&first).unwrap(), r#"{"s":{"a":"1"}}"#);

        std::fs::write(file.path(), "[s]\na = 2\n").unwrap();

        let second = state.resolve(&Method::GET, "/configinfo/s/a").await.unwrap();
        assert_eq!(serde_json::to_string(&second).unwrap(), r#"{"s":{"a":"2"}}"#);
    }

    #[cfg(unix)]
    fn stalled_file(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("stalled.conf");
        let status = std::process::Command::new("mkfifo").arg(&path).status().unwrap();
        assert!(status.success());
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stalled_read_times_out_and_holds_its_slot() {
        let dir = tempfile::tempdir().unwrap();
        let fifo = stalled_file(&dir);
        let config = ConfigInfoConfig {
            public_config: Some("s".into()),
            config_file: Some(fifo.clone()),
            read_timeout_ms: 100,
            max_pending_reads: 1,
            ..ConfigInfoConfig::default()
        };
        let state = ConfigInfoState::new(&config).unwrap();

        let start = std::time::Instant::now();
        let err = state.resolve(&Method::GET, "/configinfo").await.unwrap_err();
        assert!(matches!(&err, ExposureError::ConfigUnavailable(detail) if detail.contains("timed out")));
        assert!(start.elapsed() < Duration::from_secs(2));

        // The first read is still blocked, so the only slot is taken.
        let err = state.load_document().await.unwrap_err();
        assert!(matches!(&err, ExposureError::ConfigUnavailable(detail) if detail.contains("read slot")));

        // Opening the write end lets the blocked read finish with EOF.
        let writer = tokio::task::spawn_blocking(move || {
            drop(std::fs::OpenOptions::new().write(true).open(&fifo).unwrap());
        });
        writer.await.unwrap();

        for _ in 0..100 {
            if state.read_slots.available_permits() == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(state.read_slots.available_permits(), 1);
    }
}
