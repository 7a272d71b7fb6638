use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub timeout_secs: u64,
    /// Also pass the access token as `?token=` on authenticated calls.
    pub token_query_param: bool,
    pub session_file: PathBuf,
    pub download_dir: PathBuf,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_SESSION_FILE: &str = ".jobboard/session.json";
const DEFAULT_DOWNLOAD_DIR: &str = "downloads";

impl Config {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            token_query_param: true,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
        }
    }

    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            api_base_url: get_env("API_BASE_URL")?,
            timeout_secs: get_env_parse_or("API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            token_query_param: get_env_parse_or("API_TOKEN_QUERY_PARAM", true)?,
            session_file: env::var("SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE)),
            download_dir: env::var("DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DOWNLOAD_DIR)),
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
