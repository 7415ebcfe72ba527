use serde::Serialize;

use crate::compose::document::ComposeDocument;
use crate::compose::image::normalize_image;

/// One detected image divergence. Values are the verbatim strings from each
/// file, not the normalized forms used for comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageChange {
    pub service: String,
    pub old_image: String,
    pub new_image: String,
}

/// Walks the services of the local document only. A service missing from the
/// remote file is skipped, and remote-only services never surface: the
/// question is whether the upstream copy drifted from what is deployed, not
/// whether upstream added something new.
pub fn diff_documents(local: &ComposeDocument, remote: &ComposeDocument) -> Vec<ImageChange> {
    let mut changes = Vec::new();
    for (name, local_service) in &local.services {
        let Some(remote_service) = remote.services.get(name) else {
            continue;
        };
        if normalize_image(&local_service.image) != normalize_image(&remote_service.image) {
            changes.push(ImageChange {
                service: name.clone(),
                old_image: local_service.image.clone(),
                new_image: remote_service.image.clone(),
            });
        }
    }
    changes
}
