use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

pub const DEFAULT_API_BASE_URL: &str = "https://tapi.bale.ai";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Settings a bot client needs, read from the environment.
#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    pub api_base_url: String,
    pub request_timeout: Duration,
    /// Applied to sends that do not set their own `delete_after`.
    pub default_delete_after: Option<Duration>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &self.masked_token())
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout", &self.request_timeout)
            .field("default_delete_after", &self.default_delete_after)
            .finish()
    }
}

impl Config {
    /// Load from the process environment, after applying `./.env` if present.
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bot_token = lookup("BALE_BOT_TOKEN")
            .and_then(non_empty)
            .ok_or_else(|| {
                Error::Config("BALE_BOT_TOKEN environment variable is required".to_string())
            })?;

        let api_base_url = lookup("BALE_API_BASE_URL")
            .and_then(non_empty)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        if !(api_base_url.starts_with("https://") || api_base_url.starts_with("http://")) {
            return Err(Error::Config(format!(
                "BALE_API_BASE_URL must be an http(s) url, got {api_base_url}"
            )));
        }

        let request_timeout = Duration::from_millis(
            parse_u64(&lookup, "BALE_REQUEST_TIMEOUT_MS")?.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
        );
        let default_delete_after =
            parse_u64(&lookup, "BALE_DEFAULT_DELETE_AFTER_SECS")?.map(Duration::from_secs);

        Ok(Self {
            bot_token,
            api_base_url,
            request_timeout,
            default_delete_after,
        })
    }

    /// `{base}/bot{token}/{method}`.
    pub fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_base_url, self.bot_token)
    }

    /// Token safe to print: the bot id prefix stays, the secret does not.
    pub fn masked_token(&self) -> String {
        match self.bot_token.split_once(':') {
            Some((bot_id, _)) => format!("{bot_id}:***"),
            None => "***".to_string(),
        }
    }
}

fn parse_u64(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<u64>> {
    let Some(raw) = lookup(key).and_then(non_empty) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|e| Error::Config(format!("{key} must be a non-negative integer: {e}")))
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let Some((key, val)) = parse_dotenv_line(raw) else {
            continue;
        };
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv_line(raw: &str) -> Option<(String, String)> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (k, v) = line.split_once('=')?;
    let key = k.trim();
    if key.is_empty() {
        return None;
    }

    let mut val = v.trim().to_string();
    // Strip optional surrounding quotes.
    if val.len() >= 2
        && ((val.starts_with('"') && val.ends_with('"'))
            || (val.starts_with('\'') && val.ends_with('\'')))
    {
        val = val[1..val.len() - 1].to_string();
    }
    Some((key.to_string(), val))
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
