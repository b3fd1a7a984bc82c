use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// File name of the last-pushed snapshot, relative to the working directory
pub const SNAPSHOT_FILE_NAME: &str = "epic_free_cache.json";

/// One bot connection from `BOT_ENDPOINTS`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BotEndpoint {
    /// Bot id (the account's self id when given as `id@url`)
    pub id: String,
    pub base_url: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Epic free-game API URL; the notifier stays disabled without it
    pub api_url: Option<String>,
    /// Cron expression of the scheduled push
    pub cron_time: Option<String>,
    /// Group receiving the scheduled push
    pub group_id: Option<String>,
    pub snapshot_path: PathBuf,
    /// Headless render service endpoint (HTML in, PNG out)
    pub render_url: String,
    /// OneBot v11 HTTP API endpoints, one per bot connection
    pub bot_endpoints: Vec<BotEndpoint>,
    pub bot_access_token: Option<String>,
    pub http_timeout: Duration,
    pub port: u16,
}

/// The settings the notifier itself runs on
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotifierConfig {
    pub api_url: String,
    pub cron_time: Option<String>,
    pub group_id: Option<String>,
}

impl NotifierConfig {
    pub fn new(api_url: &str, cron_time: Option<&str>, group_id: Option<&str>) -> Self {
        Self {
            api_url: api_url.to_string(),
            cron_time: non_empty(cron_time.map(str::to_string)),
            group_id: non_empty(group_id.map(str::to_string)),
        }
    }

    /// Cron expression, only when both the schedule and the target group are set
    pub fn schedule(&self) -> Option<&str> {
        match (&self.cron_time, &self.group_id) {
            (Some(cron_time), Some(_)) => Some(cron_time),
            _ => None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_url: non_empty(get("EPIC_API_URL")),
            cron_time: non_empty(get("EPIC_CRON_TIME")),
            group_id: non_empty(get("EPIC_GROUP_ID")),
            snapshot_path: non_empty(get("SNAPSHOT_PATH"))
                .map(PathBuf::from)
                .unwrap_or_else(default_snapshot_path),
            render_url: non_empty(get("RENDER_URL"))
                .unwrap_or_else(|| "http://localhost:3000/render".to_string()),
            bot_endpoints: get("BOT_ENDPOINTS")
                .map(|raw| parse_bot_endpoints(&raw))
                .unwrap_or_default(),
            bot_access_token: non_empty(get("BOT_ACCESS_TOKEN")),
            http_timeout: Duration::from_secs(
                get("HTTP_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            port: get("PORT").and_then(|p| p.parse().ok()).unwrap_or(8080),
        }
    }

    /// Notifier settings, or `None` when the API URL is missing
    pub fn notifier(&self) -> Option<NotifierConfig> {
        let api_url = self.api_url.as_deref()?;
        Some(NotifierConfig::new(
            api_url,
            self.cron_time.as_deref(),
            self.group_id.as_deref(),
        ))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn default_snapshot_path() -> PathBuf {
    env::current_dir()
        .map(|dir| dir.join(SNAPSHOT_FILE_NAME))
        .unwrap_or_else(|_| PathBuf::from(SNAPSHOT_FILE_NAME))
}

/// Parse `url[,url...]`, each entry optionally prefixed with `id@`
fn parse_bot_endpoints(raw: &str) -> Vec<BotEndpoint> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .enumerate()
        .map(|(i, entry)| match entry.split_once('@') {
            Some((id, url)) if !id.contains("://") => BotEndpoint {
                id: id.to_string(),
                base_url: url.trim_end_matches('/').to_string(),
            },
            _ => BotEndpoint {
                id: format!("bot-{}", i + 1),
                base_url: entry.trim_end_matches('/').to_string(),
            },
        })
        .collect()
}
