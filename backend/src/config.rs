use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    /// Seed the in-memory tables with demo rows on first access.
    pub seed_mock_data: bool,
    /// Allowed CORS origin. Any origin when unset.
    pub cors_allow_origin: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "0.0.0.0:8080".to_string(),
            seed_mock_data: true,
            cors_allow_origin: None,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let seed_mock_data = match env::var("SEED_MOCK_DATA") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("SEED_MOCK_DATA must be true or false, got {:?}", raw))?,
            Err(_) => true,
        };

        Ok(Config {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            seed_mock_data,
            cors_allow_origin: env::var("CORS_ALLOW_ORIGIN").ok().filter(|o| !o.is_empty() && o != "*"),
        })
    }
}
