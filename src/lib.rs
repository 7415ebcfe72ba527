pub mod check;
pub mod compose;
pub mod config;
pub mod logging;
pub mod notify;
pub mod paths;
pub mod report;

pub use check::{check_all, check_pair, CheckError, PairOutcome};
pub use compose::{diff_documents, normalize_image, ComposeDocument, ImageChange, ServiceSpec};
pub use config::{Config, FileMapping};
pub use notify::{dispatch, Backend, NotifyError};
pub use report::{format_results, has_changes_or_errors};
