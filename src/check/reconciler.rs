use thiserror::Error;
use tracing::debug;

use crate::compose::diff::{diff_documents, ImageChange};
use crate::compose::fetch::{fetch_document, FetchError, Origin};
use crate::config::FileMapping;
use crate::paths;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("error reading local file: {0}")]
    LocalRead(#[source] FetchError),
    #[error("error downloading remote file: {0}")]
    RemoteFetch(#[source] FetchError),
    #[error("worker task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result of checking one (local, remote) pair. `changes` and `error` are
/// mutually exclusive: a fetch failure short-circuits the comparison.
#[derive(Debug)]
pub struct PairOutcome {
    pub path: String,
    pub changes: Vec<ImageChange>,
    pub error: Option<CheckError>,
}

impl PairOutcome {
    pub fn failed(path: impl Into<String>, error: CheckError) -> Self {
        Self {
            path: path.into(),
            changes: Vec::new(),
            error: Some(error),
        }
    }
}

pub async fn check_pair(mapping: &FileMapping) -> PairOutcome {
    let resolved = paths::resolve_local_path(&mapping.local_path);
    debug!(
        "checking {} against {}",
        resolved.display(),
        mapping.source_url
    );

    let local = match fetch_document(&Origin::Local(resolved)).await {
        Ok(doc) => doc,
        Err(err) => return PairOutcome::failed(&mapping.local_path, CheckError::LocalRead(err)),
    };

    let remote = match fetch_document(&Origin::Remote(mapping.source_url.clone())).await {
        Ok(doc) => doc,
        Err(err) => return PairOutcome::failed(&mapping.local_path, CheckError::RemoteFetch(err)),
    };

    PairOutcome {
        path: mapping.local_path.clone(),
        changes: diff_documents(&local, &remote),
        error: None,
    }
}
