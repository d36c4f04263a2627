use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub marketplace: MarketplaceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MarketplaceConfig {
    pub login: String,
    pub password: String,
    /// Работать с предпродакшен-окружением площадки
    #[serde(default)]
    pub preprod: bool,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[marketplace]
login = ""
password = ""
preprod = true
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    // Try to find config.toml next to the executable
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

    // Fall back to default config
    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

impl MarketplaceConfig {
    /// Домен площадки: боевой или preprod
    pub fn domain(&self) -> &'static str {
        if self.preprod {
            "preprod-cdiscount.com"
        } else {
            "cdiscount.com"
        }
    }

    /// Базовый адрес сервиса Marketplace API
    pub fn service_url(&self) -> String {
        format!("https://wsvc.{}/MarketplaceAPIService.svc", self.domain())
    }

    /// Адрес выдачи токена доступа
    pub fn auth_url(&self) -> String {
        format!(
            "https://sts.{0}/users/httpIssue.svc/?realm=https://wsvc.{0}/MarketplaceAPIService.svc",
            self.domain()
        )
    }
}
