//! Snapshot sources — where the two CSV feeds come from.
//!
//! The `SnapshotSource` trait abstracts over HTTP and local files so the CLI
//! can run offline and tests can inject fixtures. Network problems are the
//! only hard failures in the pipeline; parse problems never appear here —
//! malformed rows are dropped or nulled inside the normalizers.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::Endpoints;

/// Structured error types for the load path.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("read error: {0}")]
    Io(String),
}

/// A source for the two raw CSV feeds.
pub trait SnapshotSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Raw CSV text of the category listing.
    fn fetch_catalog_csv(&self) -> Result<String, DataError>;

    /// Raw CSV text of the historical price table.
    fn fetch_prices_csv(&self) -> Result<String, DataError>;
}

/// HTTP source: two fixed GET endpoints returning UTF-8 CSV.
///
/// No retries, no timeout, no cancellation — a non-success status aborts the
/// whole load, and a hung fetch blocks the ready state indefinitely.
pub struct HttpSource {
    client: reqwest::blocking::Client,
    endpoints: Endpoints,
}

impl HttpSource {
    pub fn new(endpoints: Endpoints) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(None)
            .build()
            .expect("failed to build HTTP client");
        Self { client, endpoints }
    }

    fn get_text(&self, url: &str) -> Result<String, DataError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| DataError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DataError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        resp.text().map_err(|e| DataError::Transport(e.to_string()))
    }
}

impl SnapshotSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch_catalog_csv(&self) -> Result<String, DataError> {
        self.get_text(&self.endpoints.catalog_url)
    }

    fn fetch_prices_csv(&self) -> Result<String, DataError> {
        self.get_text(&self.endpoints.prices_url)
    }
}

/// Local-file source for offline runs and tests.
pub struct FileSource {
    catalog_path: PathBuf,
    prices_path: PathBuf,
}

impl FileSource {
    pub fn new(catalog_path: PathBuf, prices_path: PathBuf) -> Self {
        Self {
            catalog_path,
            prices_path,
        }
    }
}

impl SnapshotSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    fn fetch_catalog_csv(&self) -> Result<String, DataError> {
        std::fs::read_to_string(&self.catalog_path)
            .map_err(|e| DataError::Io(format!("{}: {e}", self.catalog_path.display())))
    }

    fn fetch_prices_csv(&self) -> Result<String, DataError> {
        std::fs::read_to_string(&self.prices_path)
            .map_err(|e| DataError::Io(format!("{}: {e}", self.prices_path.display())))
    }
}

/// Progress callback for the two-feed load.
pub trait FetchProgress: Send + Sync {
    /// Called when a feed fetch starts.
    fn on_start(&self, feed: &str);

    /// Called when a feed fetch completes; `error` is `None` on success.
    fn on_complete(&self, feed: &str, error: Option<&DataError>);
}

/// Simple progress reporter that prints to stdout.
pub struct StdoutProgress;

impl FetchProgress for StdoutProgress {
    fn on_start(&self, feed: &str) {
        println!("Fetching {feed}...");
    }

    fn on_complete(&self, feed: &str, error: Option<&DataError>) {
        match error {
            None => println!("  OK: {feed}"),
            Some(e) => println!("  FAIL: {feed}: {e}"),
        }
    }
}

/// No-op progress for embedding and tests.
pub struct SilentProgress;

impl FetchProgress for SilentProgress {
    fn on_start(&self, _feed: &str) {}
    fn on_complete(&self, _feed: &str, _error: Option<&DataError>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_source_reads_both_feeds() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("listing.csv");
        let prices_path = dir.path().join("history.csv");
        let mut f = std::fs::File::create(&catalog_path).unwrap();
        writeln!(f, "Symbol,Company,Sector").unwrap();
        let mut f = std::fs::File::create(&prices_path).unwrap();
        writeln!(f, "Date,MCB").unwrap();

        let source = FileSource::new(catalog_path, prices_path);
        assert_eq!(source.name(), "file");
        assert!(source.fetch_catalog_csv().unwrap().starts_with("Symbol"));
        assert!(source.fetch_prices_csv().unwrap().starts_with("Date"));
    }

    #[test]
    fn file_source_missing_file_is_io_error() {
        let source = FileSource::new(PathBuf::from("/nonexistent/a.csv"), PathBuf::from("/nonexistent/b.csv"));
        assert!(matches!(source.fetch_catalog_csv(), Err(DataError::Io(_))));
    }
}
