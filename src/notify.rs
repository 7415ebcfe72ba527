use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

pub const NTFY_DEFAULT_SERVER: &str = "https://ntfy.sh";

const DISPATCH_TIMEOUT_SECS: u64 = 10;

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("compose-drift/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(DISPATCH_TIMEOUT_SECS))
        .build()
        .expect("failed to build notification HTTP client")
});

/// The effective notification target, resolved exactly once from the config
/// (and the --debug flag) before any dispatch happens. Each variant carries
/// the parameters its transport needs, so an unknown backend kind cannot
/// reach this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Slack { webhook_url: String },
    Ntfy { topic: String, server: String },
    Telegram { token: String, chat_id: String },
    Console { file_prefix: Option<String> },
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("{field} is required for {backend} notifications")]
    MissingField {
        backend: &'static str,
        field: &'static str,
    },
    #[error("sending {backend} notification failed: {source}")]
    Http {
        backend: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{backend} returned non-200 status code {status}: {body}")]
    Rejected {
        backend: &'static str,
        status: StatusCode,
        body: String,
    },
    #[error("failed writing notification log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub async fn dispatch(message: &str, backend: &Backend) -> Result<(), NotifyError> {
    match backend {
        Backend::Slack { webhook_url } => send_slack(message, webhook_url).await,
        Backend::Ntfy { topic, server } => send_ntfy(message, topic, server).await,
        Backend::Telegram { token, chat_id } => send_telegram(message, token, chat_id).await,
        Backend::Console { file_prefix } => send_console(message, file_prefix.as_deref()),
    }
}

async fn send_slack(message: &str, webhook_url: &str) -> Result<(), NotifyError> {
    if webhook_url.trim().is_empty() {
        return Err(NotifyError::MissingField {
            backend: "slack",
            field: "slack_webhook",
        });
    }

    debug!("posting notification to slack webhook");
    let response = HTTP_CLIENT
        .post(webhook_url)
        .json(&serde_json::json!({ "text": message }))
        .send()
        .await
        .map_err(|source| NotifyError::Http {
            backend: "slack",
            source,
        })?;
    expect_ok("slack", response).await
}

async fn send_ntfy(message: &str, topic: &str, server: &str) -> Result<(), NotifyError> {
    if topic.trim().is_empty() {
        return Err(NotifyError::MissingField {
            backend: "ntfy",
            field: "ntfy_topic",
        });
    }
    let server = if server.trim().is_empty() {
        NTFY_DEFAULT_SERVER
    } else {
        server
    };
    let url = format!("{}/{}", server.trim_end_matches('/'), topic);

    debug!("posting notification to {url}");
    let response = HTTP_CLIENT
        .post(&url)
        .header(reqwest::header::CONTENT_TYPE, "text/plain")
        .body(message.to_string())
        .send()
        .await
        .map_err(|source| NotifyError::Http {
            backend: "ntfy",
            source,
        })?;
    expect_ok("ntfy", response).await
}

async fn send_telegram(message: &str, token: &str, chat_id: &str) -> Result<(), NotifyError> {
    if token.trim().is_empty() {
        return Err(NotifyError::MissingField {
            backend: "telegram",
            field: "telegram_token",
        });
    }
    if chat_id.trim().is_empty() {
        return Err(NotifyError::MissingField {
            backend: "telegram",
            field: "telegram_chat",
        });
    }

    let url = format!("https://api.telegram.org/bot{token}/sendMessage");
    let payload = serde_json::json!({
        "chat_id": chat_id,
        "text": message,
        "parse_mode": "HTML",
    });

    debug!("posting notification to the telegram bot API");
    let response = HTTP_CLIENT
        .post(&url)
        .json(&payload)
        .send()
        .await
        .map_err(|source| NotifyError::Http {
            backend: "telegram",
            source,
        })?;
    expect_ok("telegram", response).await
}

/// Always succeeds at printing; the optional log file gets a fresh timestamp
/// per invocation so repeated runs never collide.
fn send_console(message: &str, file_prefix: Option<&str>) -> Result<(), NotifyError> {
    let stamp = Local::now().to_rfc3339();
    println!("\n=== Notification [{stamp}] ===");
    println!("{message}");
    println!("===============================");

    if let Some(prefix) = file_prefix.filter(|p| !p.trim().is_empty()) {
        let filename = format!("{}_{}.log", prefix, Local::now().format("%Y-%m-%d_%H-%M-%S"));
        let contents =
            format!("=== Notification [{stamp}] ===\n{message}\n===============================\n");
        std::fs::write(&filename, contents).map_err(|source| NotifyError::Io {
            path: PathBuf::from(&filename),
            source,
        })?;
        println!("Notification written to: {filename}");
    }

    Ok(())
}

async fn expect_ok(backend: &'static str, response: reqwest::Response) -> Result<(), NotifyError> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    let preview: String = body.chars().take(180).collect();
    Err(NotifyError::Rejected {
        backend,
        status,
        body: preview,
    })
}
