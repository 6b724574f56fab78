//! Local cache store for downloaded animation documents.
//!
//! One file per trailing URL segment inside a single cache directory. A file
//! already present at the target path is always treated as stale and removed
//! before the new download starts.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::config::HttpConfig;
use crate::error::{FetchError, Result};

/// Something that can place the bytes behind `url` at `dest`.
///
/// Returns the number of bytes written.
pub trait Downloader {
    fn download(&self, url: &str, dest: &Path) -> impl Future<Output = Result<u64>> + Send;
}

/// reqwest-backed downloader streaming the response body to disk.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: reqwest::Client,
}

impl HttpDownloader {
    pub fn new(config: &HttpConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str, dest: &Path) -> impl Future<Output = Result<u64>> + Send {
        let request = self.client.get(url);
        let url = url.to_string();
        let dest = dest.to_path_buf();
        async move {
            let http_err = |source| FetchError::Http {
                url: url.clone(),
                source,
            };
            let write_err = |source| FetchError::Write {
                path: dest.clone(),
                source,
            };

            let response = request.send().await.map_err(http_err)?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    url: url.clone(),
                    status: status.as_u16(),
                });
            }

            let mut file = tokio::fs::File::create(&dest).await.map_err(write_err)?;
            let mut body = response.bytes_stream();
            let mut total: u64 = 0;
            while let Some(chunk) = body.next().await {
                let chunk = chunk.map_err(http_err)?;
                total += chunk.len() as u64;
                file.write_all(&chunk).await.map_err(write_err)?;
            }
            file.flush().await.map_err(write_err)?;

            debug!("downloaded {} bytes from {} to {}", total, url, dest.display());
            Ok(total)
        }
    }
}

/// The cache directory and the operations on it.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the cache directory (and any missing parents) if it is absent.
    pub async fn ensure_dir(&self) -> Result<()> {
        let exists = tokio::fs::try_exists(&self.dir)
            .await
            .map_err(|source| FetchError::Stat {
                path: self.dir.clone(),
                source,
            })?;
        if !exists {
            info!("creating cache directory {}", self.dir.display());
            tokio::fs::create_dir_all(&self.dir)
                .await
                .map_err(|source| FetchError::CacheDir {
                    path: self.dir.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Local path for `url`: the cache directory joined with everything after
    /// the last `/` of the URL.
    pub fn path_for(&self, url: &str) -> Result<PathBuf> {
        let name = file_name(url);
        if name.is_empty() {
            return Err(FetchError::NoFileName(url.to_string()));
        }
        Ok(self.dir.join(name))
    }

    /// Ensure the directory, drop any stale copy, download `url` and read the
    /// fresh file back as text.
    pub async fn fetch<D: Downloader>(&self, downloader: &D, url: &str) -> Result<String> {
        self.ensure_dir().await?;
        let path = self.path_for(url)?;

        let stale = tokio::fs::try_exists(&path)
            .await
            .map_err(|source| FetchError::Stat {
                path: path.clone(),
                source,
            })?;
        if stale {
            debug!("removing stale cache file {}", path.display());
            tokio::fs::remove_file(&path)
                .await
                .map_err(|source| FetchError::Delete {
                    path: path.clone(),
                    source,
                })?;
        }

        downloader.download(url, &path).await?;

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| FetchError::Read { path, source })
    }
}

/// Substring after the final `/`, or the whole input when there is none.
pub fn file_name(url: &str) -> &str {
    match url.rfind('/') {
        Some(idx) => &url[idx + 1..],
        None => url,
    }
}
