use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct AppConfig {
    pub pexels_api_key: String,
    #[serde(default = "default_pexels_base_url")]
    pub pexels_base_url: String,
    #[serde(default)]
    pub pexels_per_page: Option<u32>,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

fn default_pexels_base_url() -> String {
    "https://api.pexels.com/v1".to_string()
}

const fn default_http_port() -> u16 {
    3000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pexels_api_key: String::new(),
            pexels_base_url: default_pexels_base_url(),
            pexels_per_page: None,
            http_port: default_http_port(),
        }
    }
}

pub fn get_config() -> Result<AppConfig, ConfigError> {
    load_config(Environment::default())
}

/// Layers the optional `config` file under the given environment source.
fn load_config(environment: Environment) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::with_name("config").required(false))
        .add_source(environment)
        .build()?;

    config.try_deserialize()
}
