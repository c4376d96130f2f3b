//! HTTP downloads
//!
//! A download either leaves a complete file at the destination or nothing
//! at all. A failed request or a non-2xx response also removes any file
//! left at the destination by an earlier download, and a transfer that
//! breaks mid-body removes what was written.

use std::path::Path;

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::progress::ProgressObserver;

/// Downloads a URL to a local file.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(
        &self,
        url: &str,
        dest: &Path,
        progress: Option<&dyn ProgressObserver>,
    ) -> Result<()>;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for std::sync::Arc<T> {
    async fn fetch(
        &self,
        url: &str,
        dest: &Path,
        progress: Option<&dyn ProgressObserver>,
    ) -> Result<()> {
        (**self).fetch(url, dest, progress).await
    }
}

/// [`Fetcher`] backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(
        &self,
        url: &str,
        dest: &Path,
        progress: Option<&dyn ProgressObserver>,
    ) -> Result<()> {
        tracing::debug!(url, dest = %dest.display(), "Downloading");

        let mut response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(source) => {
                discard(dest).await;
                return Err(Error::Network {
                    url: url.to_string(),
                    source,
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            discard(dest).await;
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::io(parent, e))?;
        }
        let mut file = File::create(dest).await.map_err(|e| Error::io(dest, e))?;

        let total = response.content_length().filter(|len| *len > 0);
        let written = copy_body(&mut response, &mut file, url, dest, total, progress).await;

        match written {
            Ok(bytes) => {
                tracing::debug!(url, bytes, "Download complete");
                Ok(())
            }
            Err(e) => {
                drop(file);
                discard(dest).await;
                Err(e)
            }
        }
    }
}

/// Remove whatever sits at `dest` so a failed download leaves nothing behind.
async fn discard(dest: &Path) {
    match tokio::fs::remove_file(dest).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            path = %dest.display(),
            error = %e,
            "Could not remove failed download"
        ),
    }
}

async fn copy_body(
    response: &mut reqwest::Response,
    file: &mut File,
    url: &str,
    dest: &Path,
    total: Option<u64>,
    progress: Option<&dyn ProgressObserver>,
) -> Result<u64> {
    let mut received: u64 = 0;

    while let Some(chunk) = response.chunk().await.map_err(|source| Error::Network {
        url: url.to_string(),
        source,
    })? {
        file.write_all(&chunk)
            .await
            .map_err(|e| Error::io(dest, e))?;
        received += chunk.len() as u64;

        if let (Some(total), Some(observer)) = (total, progress) {
            observer.on_progress((received as f64 / total as f64).min(1.0));
        }
    }

    file.flush().await.map_err(|e| Error::io(dest, e))?;
    Ok(received)
}
