use std::path::{Path, PathBuf};
use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::compose::document::ComposeDocument;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 12;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 6;

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("compose-drift/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .build()
        .expect("failed to build HTTP client")
});

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("GET {url} returned {status}")]
    Status { url: String, status: StatusCode },
    #[error("invalid compose document: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}

/// One side of a compose file pair.
#[derive(Debug, Clone)]
pub enum Origin {
    Local(PathBuf),
    Remote(String),
}

pub async fn fetch_document(origin: &Origin) -> Result<ComposeDocument, FetchError> {
    match origin {
        Origin::Local(path) => read_local(path),
        Origin::Remote(url) => fetch_remote(url).await,
    }
}

pub fn read_local(path: &Path) -> Result<ComposeDocument, FetchError> {
    let raw = std::fs::read_to_string(path).map_err(|source| FetchError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ComposeDocument::parse(&raw)?)
}

/// Single GET, no retry. Anything other than a 2xx response surfaces
/// immediately as an error.
pub async fn fetch_remote(url: &str) -> Result<ComposeDocument, FetchError> {
    let response = HTTP_CLIENT.get(url).send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }
    Ok(ComposeDocument::parse(&body)?)
}
