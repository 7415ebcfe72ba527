use std::fs;

use httpmock::prelude::*;

use compose_drift::check::check_all;
use compose_drift::config::{Config, FileMapping, NotificationConfig};
use compose_drift::notify::dispatch;
use compose_drift::report::{format_results, has_changes_or_errors};

#[tokio::test]
async fn detects_drift_and_delivers_a_console_notification() {
    let dir = tempfile::tempdir().expect("tempdir");

    let local_path = dir.path().join("docker-compose.yml");
    fs::write(&local_path, "services:\n  web:\n    image: nginx:1.21\n").expect("write local");

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/docker-compose.yml");
        then.status(200)
            .body("services:\n  web:\n    image: nginx:1.25\n");
    });

    let mappings = vec![FileMapping {
        local_path: local_path.display().to_string(),
        source_url: server.url("/docker-compose.yml"),
    }];

    let outcomes = check_all(&mappings).await;

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].error.is_none());
    assert_eq!(outcomes[0].changes.len(), 1);
    assert_eq!(outcomes[0].changes[0].service, "web");
    assert_eq!(outcomes[0].changes[0].old_image, "nginx:1.21");
    assert_eq!(outcomes[0].changes[0].new_image, "nginx:1.25");

    assert!(has_changes_or_errors(&outcomes));
    let message = format_results(&outcomes);
    assert!(message.contains("Found 1 changes"));
    assert!(message.contains("Service web:"));
    assert!(message.contains("Old image: nginx:1.21"));
    assert!(message.contains("New image: nginx:1.25"));

    let notifications = NotificationConfig {
        kind: "debug".to_string(),
        debug_file: dir.path().join("notifications").display().to_string(),
        ..NotificationConfig::default()
    };
    let backend = notifications.resolve_backend(false).expect("resolves");

    dispatch(&message, &backend)
        .await
        .expect("console dispatch succeeds");

    let log = fs::read_dir(dir.path())
        .expect("read tempdir")
        .filter_map(Result::ok)
        .find(|e| e.file_name().to_string_lossy().ends_with(".log"))
        .expect("a notification log file exists");
    let contents = fs::read_to_string(log.path()).expect("read log");
    assert!(contents.contains("Service web:"));
}

#[tokio::test]
async fn identical_pair_produces_nothing_to_report() {
    let dir = tempfile::tempdir().expect("tempdir");

    let local_path = dir.path().join("docker-compose.yml");
    fs::write(&local_path, "services:\n  web:\n    image: nginx:1.25\n").expect("write local");

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/docker-compose.yml");
        then.status(200)
            .body("services:\n  web:\n    image: nginx:1.25\n");
    });

    let mappings = vec![FileMapping {
        local_path: local_path.display().to_string(),
        source_url: server.url("/docker-compose.yml"),
    }];

    let outcomes = check_all(&mappings).await;

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].error.is_none());
    assert!(outcomes[0].changes.is_empty());
    assert!(!has_changes_or_errors(&outcomes));
}

#[tokio::test]
async fn notification_rejection_surfaces_as_a_dispatch_error() {
    let dir = tempfile::tempdir().expect("tempdir");

    let local_path = dir.path().join("docker-compose.yml");
    fs::write(&local_path, "services:\n  web:\n    image: nginx:1.21\n").expect("write local");

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/docker-compose.yml");
        then.status(200)
            .body("services:\n  web:\n    image: nginx:1.25\n");
    });
    server.mock(|when, then| {
        when.method(POST).path("/hook");
        then.status(500);
    });

    let mappings = vec![FileMapping {
        local_path: local_path.display().to_string(),
        source_url: server.url("/docker-compose.yml"),
    }];

    let outcomes = check_all(&mappings).await;
    assert!(has_changes_or_errors(&outcomes));

    let notifications = NotificationConfig {
        kind: "slack".to_string(),
        slack_webhook: server.url("/hook"),
        ..NotificationConfig::default()
    };
    let backend = notifications.resolve_backend(false).expect("resolves");

    dispatch(&format_results(&outcomes), &backend)
        .await
        .expect_err("rejected webhook must propagate");
}

#[test]
fn config_template_loads_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.yaml");

    Config::write_template(&path).expect("template written");
    let config = Config::load(&path).expect("template loads");

    assert_eq!(config.files.len(), 1);
    assert_eq!(config.notifications.kind, "debug");
}
