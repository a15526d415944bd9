use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Load environment variables from a .env file.
/// Values may contain spaces without requiring quotes.
pub fn load_dotenv() {
    let env_path = Path::new(".env");
    if !env_path.exists() {
        return;
    }

    let content = match fs::read_to_string(env_path) {
        Ok(c) => c,
        Err(_) => return,
    };

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(eq_pos) = line.find('=') {
            let key = line[..eq_pos].trim();
            let mut value = line[eq_pos + 1..].trim();

            if (value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\''))
            {
                value = &value[1..value.len() - 1];
            }

            // Real environment variables take precedence
            if std::env::var(key).is_err() {
                // SAFETY: called before the async runtime starts, single-threaded
                unsafe { std::env::set_var(key, value) };
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub panel: PanelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Gateway base URL the thing href resolves against.
    pub base_url: String,
    /// Thing href, relative to the base URL.
    pub thing_href: String,
    /// Bearer token attached to every property request.
    pub token: String,
    /// Optional path to a thing description JSON file. When unset, the
    /// gateway's conventional property paths are assumed.
    pub description_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Display name for the bulb.
    pub name: String,
    /// Seconds between refresh cycles.
    pub poll_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig {
                base_url: "http://gateway.local:8080/".to_string(),
                thing_href: "things/color-light/".to_string(),
                token: String::new(),
                description_path: None,
            },
            panel: PanelConfig {
                name: "Color Light".to_string(),
                poll_interval_secs: 30,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("GATEWAY_URL") {
            config.gateway.base_url = url;
        }
        if let Ok(href) = std::env::var("THING_HREF") {
            config.gateway.thing_href = href;
        }
        if let Ok(token) = std::env::var("GATEWAY_TOKEN") {
            config.gateway.token = token;
        }
        if let Ok(path) = std::env::var("THING_DESCRIPTION") {
            config.gateway.description_path = Some(path);
        }
        if let Ok(name) = std::env::var("BULB_NAME") {
            config.panel.name = name;
        }
        if let Ok(interval) = std::env::var("POLL_INTERVAL_SECS")
            && let Ok(secs) = interval.parse()
        {
            config.panel.poll_interval_secs = secs;
        }

        config
    }
}
