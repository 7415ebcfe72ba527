use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::notify::{Backend, NTFY_DEFAULT_SERVER};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub files: Vec<FileMapping>,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// One (local file, upstream URL) pair to compare.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMapping {
    pub local_path: String,
    pub source_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NotificationConfig {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub slack_webhook: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ntfy_topic: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ntfy_server: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub debug_file: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub telegram_token: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub telegram_chat: String,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = serde_yaml_ng::from_str(&data)
            .with_context(|| format!("failed parsing config: {}", path.display()))?;
        parsed.validate()?;
        Ok(parsed)
    }

    fn validate(&self) -> Result<()> {
        if self.files.is_empty() {
            bail!("no file mappings found in config");
        }
        for mapping in &self.files {
            if mapping.local_path.trim().is_empty() {
                bail!("local_path cannot be empty");
            }
            if mapping.source_url.trim().is_empty() {
                bail!("source_url cannot be empty");
            }
        }
        Ok(())
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed creating config directory: {}", parent.display())
                })?;
            }
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn default_template() -> String {
        let template = r#"files:
  - local_path: /srv/app/docker-compose.yml
    source_url: https://raw.githubusercontent.com/acme/app/main/docker-compose.yml

notifications:
  # one of: slack, ntfy, telegram, debug
  type: debug
  debug_file: notifications
  # slack_webhook: https://hooks.slack.com/services/...
  # ntfy_topic: compose-drift
  # ntfy_server: https://ntfy.sh
  # telegram_token: "123456:ABC..."
  # telegram_chat: "-1001234567890"
"#;
        template.to_string()
    }
}

impl NotificationConfig {
    /// Resolves the effective backend exactly once, before any checking or
    /// dispatch. The --debug flag wins over the configured type; nothing is
    /// mutated, callers get an owned value.
    pub fn resolve_backend(&self, debug: bool) -> Result<Backend> {
        if debug {
            return Ok(Backend::Console {
                file_prefix: non_empty(&self.debug_file),
            });
        }

        match self.kind.trim() {
            "slack" => {
                if self.slack_webhook.trim().is_empty() {
                    bail!("slack_webhook is required for slack notifications");
                }
                Ok(Backend::Slack {
                    webhook_url: self.slack_webhook.clone(),
                })
            }
            "ntfy" => {
                if self.ntfy_topic.trim().is_empty() {
                    bail!("ntfy_topic is required for ntfy notifications");
                }
                let server = if self.ntfy_server.trim().is_empty() {
                    NTFY_DEFAULT_SERVER.to_string()
                } else {
                    self.ntfy_server.clone()
                };
                Ok(Backend::Ntfy {
                    topic: self.ntfy_topic.clone(),
                    server,
                })
            }
            "telegram" => {
                if self.telegram_token.trim().is_empty() {
                    bail!("telegram_token is required for telegram notifications");
                }
                if self.telegram_chat.trim().is_empty() {
                    bail!("telegram_chat is required for telegram notifications");
                }
                Ok(Backend::Telegram {
                    token: self.telegram_token.clone(),
                    chat_id: self.telegram_chat.clone(),
                })
            }
            "debug" => Ok(Backend::Console {
                file_prefix: non_empty(&self.debug_file),
            }),
            other => bail!(
                "notification type must be one of: slack, ntfy, telegram, or debug (got {other:?})"
            ),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
