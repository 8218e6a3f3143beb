use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

/// Raw `[analytics]` section, validated by `AnalyticsSettings::from_config`
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub default_granularity: String,
    pub default_limit: usize,
    pub worst_performing: bool,
    pub default_metric: String,
    /// "canonical" or "label"
    pub period_ordering: String,
    /// Calendar used for bucketing, whole hours east of UTC
    pub utc_offset_hours: i32,
    /// 0 disables memoization
    pub cache_capacity: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            default_granularity: "month".to_string(),
            default_limit: 5,
            worst_performing: false,
            default_metric: "revenue".to_string(),
            period_ordering: "canonical".to_string(),
            utc_offset_hours: 0,
            cache_capacity: 64,
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000

[analytics]
default_granularity = "month"
default_limit = 5
worst_performing = false
default_metric = "revenue"
period_ordering = "canonical"
utc_offset_hours = 0
cache_capacity = 64
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.analytics.default_granularity, "month");
        assert_eq!(config.analytics.default_limit, 5);
        assert_eq!(config.analytics.period_ordering, "canonical");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [analytics]
            default_granularity = "week"
            period_ordering = "label"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.analytics.default_granularity, "week");
        assert_eq!(config.analytics.period_ordering, "label");
        assert_eq!(config.analytics.cache_capacity, 64);
    }
}
