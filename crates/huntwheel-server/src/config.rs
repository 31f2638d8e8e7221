use serde::Deserialize;

/// Top-level server configuration, loaded from `huntwheel.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub web_root: String,
    /// Where user preferences are persisted. Empty disables persistence.
    pub settings_path: String,
    pub reveal: RevealConfig,
    pub limits: LimitsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:4173".to_string(),
            web_root: "web".to_string(),
            settings_path: "huntwheel-settings.json".to_string(),
            reveal: RevealConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

/// Pacing of the multiplayer reveal animation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Delay before each player's reveal, in milliseconds.
    pub delay_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self { delay_ms: 500 }
    }
}

/// Infrastructure limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_sse_subscribers: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_sse_subscribers: 100,
        }
    }
}

impl ServerConfig {
    /// Load config from `huntwheel.toml` if it exists, then apply env var
    /// overrides.
    pub fn load() -> Self {
        let mut config = match std::fs::read_to_string("huntwheel.toml") {
            Ok(content) => match toml::from_str::<ServerConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from huntwheel.toml");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse huntwheel.toml: {e}, using defaults");
                    ServerConfig::default()
                },
            },
            Err(_) => {
                tracing::info!("No huntwheel.toml found, using defaults");
                ServerConfig::default()
            },
        };

        if let Ok(addr) = std::env::var("HUNTWHEEL_LISTEN_ADDR")
            && !addr.is_empty()
        {
            config.listen_addr = addr;
        }
        if let Ok(root) = std::env::var("HUNTWHEEL_WEB_ROOT")
            && !root.is_empty()
        {
            config.web_root = root;
        }
        config
    }
}
