//! Error type for the fetch → cache → parse pipeline.
//!
//! Every variant is a "system error": the UI logs it and renders no
//! animation. Scan validation failures are not represented here; they are
//! handled by the scan controller as a user-facing alert.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to create cache directory {path}: {source}")]
    CacheDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("url {0:?} has no trailing file name")]
    NoFileName(String),

    #[error("failed to check {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to delete stale file {path}: {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cached file is not a valid document: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T, E = FetchError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_path() {
        let err = FetchError::Delete {
            path: PathBuf::from("/tmp/lotties/anim.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/lotties/anim.json"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn parse_errors_convert() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: FetchError = parse.into();
        assert!(matches!(err, FetchError::Parse(_)));
    }
}
