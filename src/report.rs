use crate::check::PairOutcome;

/// A batch is worth notifying about iff at least one pair drifted or failed.
pub fn has_changes_or_errors(outcomes: &[PairOutcome]) -> bool {
    outcomes
        .iter()
        .any(|o| o.error.is_some() || !o.changes.is_empty())
}

/// Renders the batch for the operator. Header summarizes totals, then one
/// block per errored or drifted pair; clean pairs are omitted entirely.
pub fn format_results(outcomes: &[PairOutcome]) -> String {
    let changes: usize = outcomes.iter().map(|o| o.changes.len()).sum();
    let errors = outcomes.iter().filter(|o| o.error.is_some()).count();

    let mut out = String::new();
    if errors > 0 && changes > 0 {
        out.push_str(&format!(
            "🔍 Found {changes} changes and {errors} errors in Docker Compose files:\n\n"
        ));
    } else if errors > 0 {
        out.push_str(&format!(
            "❌ Found {errors} errors checking Docker Compose files:\n\n"
        ));
    } else if changes > 0 {
        out.push_str(&format!(
            "📝 Found {changes} changes in Docker Compose files:\n\n"
        ));
    }

    for outcome in outcomes {
        if let Some(err) = &outcome.error {
            out.push_str(&format!("❌ Error checking {}: {err}\n\n", outcome.path));
            continue;
        }

        if !outcome.changes.is_empty() {
            out.push_str(&format!("📝 Changes found in {}:\n", outcome.path));
            for change in &outcome.changes {
                out.push_str(&format!("  Service {}:\n", change.service));
                out.push_str(&format!("    Old image: {}\n", change.old_image));
                out.push_str(&format!("    New image: {}\n", change.new_image));
            }
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::{format_results, has_changes_or_errors};
    use crate::check::{CheckError, PairOutcome};
    use crate::compose::diff::ImageChange;
    use crate::compose::fetch::FetchError;

    fn clean(path: &str) -> PairOutcome {
        PairOutcome {
            path: path.to_string(),
            changes: Vec::new(),
            error: None,
        }
    }

    fn drifted(path: &str) -> PairOutcome {
        PairOutcome {
            path: path.to_string(),
            changes: vec![ImageChange {
                service: "web".to_string(),
                old_image: "nginx:1.21".to_string(),
                new_image: "nginx:1.25".to_string(),
            }],
            error: None,
        }
    }

    fn failed(path: &str) -> PairOutcome {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        PairOutcome::failed(
            path,
            CheckError::LocalRead(FetchError::Read {
                path: path.into(),
                source: io,
            }),
        )
    }

    #[test]
    fn all_clean_batch_is_not_notifiable() {
        let outcomes = vec![clean("a.yml"), clean("b.yml")];
        assert!(!has_changes_or_errors(&outcomes));
    }

    #[test]
    fn a_single_error_makes_the_batch_notifiable() {
        let outcomes = vec![clean("a.yml"), failed("b.yml")];
        assert!(has_changes_or_errors(&outcomes));
    }

    #[test]
    fn changes_only_header() {
        let text = format_results(&[drifted("a.yml")]);
        assert!(text.starts_with("📝 Found 1 changes in Docker Compose files:"));
        assert!(text.contains("📝 Changes found in a.yml:"));
        assert!(text.contains("  Service web:"));
        assert!(text.contains("    Old image: nginx:1.21"));
        assert!(text.contains("    New image: nginx:1.25"));
    }

    #[test]
    fn errors_only_header() {
        let text = format_results(&[failed("a.yml")]);
        assert!(text.starts_with("❌ Found 1 errors checking Docker Compose files:"));
        assert!(text.contains("❌ Error checking a.yml: error reading local file"));
    }

    #[test]
    fn mixed_header_counts_both() {
        let text = format_results(&[drifted("a.yml"), failed("b.yml")]);
        assert!(text.starts_with("🔍 Found 1 changes and 1 errors in Docker Compose files:"));
    }

    #[test]
    fn clean_outcomes_are_omitted_from_the_body() {
        let text = format_results(&[clean("quiet.yml"), drifted("a.yml")]);
        assert!(!text.contains("quiet.yml"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let outcomes = vec![drifted("a.yml"), failed("b.yml"), clean("c.yml")];
        assert_eq!(format_results(&outcomes), format_results(&outcomes));
    }
}
