use tracing::info;

use crate::check::reconciler::{check_pair, CheckError, PairOutcome};
use crate::config::FileMapping;

/// Checks every configured pair concurrently. Each pair gets its own task
/// and every task is awaited, so one pair failing never skips its siblings
/// and the batch always has one outcome per mapping. Handles are awaited in
/// submission order, which keeps the batch deterministic with respect to
/// the configuration.
pub async fn check_all(mappings: &[FileMapping]) -> Vec<PairOutcome> {
    info!("checking {} compose file pair(s)", mappings.len());

    let handles: Vec<_> = mappings
        .iter()
        .cloned()
        .map(|mapping| tokio::spawn(async move { check_pair(&mapping).await }))
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for (handle, mapping) in handles.into_iter().zip(mappings) {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(err) => PairOutcome::failed(&mapping.local_path, CheckError::Task(err)),
        };
        outcomes.push(outcome);
    }
    outcomes
}
