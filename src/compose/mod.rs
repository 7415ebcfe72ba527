pub mod diff;
pub mod document;
pub mod fetch;
pub mod image;

pub use diff::{diff_documents, ImageChange};
pub use document::{ComposeDocument, ServiceSpec};
pub use fetch::{fetch_document, fetch_remote, read_local, FetchError, Origin};
pub use image::normalize_image;
