use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Backend origin, e.g. `https://stories.example.com`. Empty means same-origin relative paths.
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_generate_path")]
    pub generate_path: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            generate_path: default_generate_path(),
            request_timeout_ms: default_request_timeout_ms(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Full URL of the generation endpoint, with trailing slashes stripped from the base.
    pub fn generate_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.generate_path
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
    // Used when the caller leaves the count unset
    #[serde(default = "default_search_count")]
    pub search_count: u32,
    #[serde(default = "default_generate_count")]
    pub generate_count: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            search_count: default_search_count(),
            generate_count: default_generate_count(),
        }
    }
}

fn default_generate_path() -> String {
    "/api/generate".to_string()
}

fn default_request_timeout_ms() -> u64 {
    120_000
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_search_count() -> u32 {
    4
}

fn default_generate_count() -> u32 {
    6
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // Load .env file if it exists (for environment variable overrides)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("STORYWEAVE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
