use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Resolved connection settings for the search-query service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Merge CLI arguments over an optional YAML/JSON config file over
    /// built-in defaults. CLI wins field by field.
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            config,
            base_url: cli_base_url,
            request_timeout_secs: cli_timeout,
        } = args;

        let file_config = if let Some(path) = config.as_ref() {
            load_config_file(path)?
        } else {
            PartialConfig::default()
        };

        let PartialConfig {
            base_url: file_base_url,
            request_timeout_secs: file_timeout,
        } = file_config;

        let base_url = cli_base_url
            .or(file_base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        anyhow::ensure!(
            base_url.starts_with("http://") || base_url.starts_with("https://"),
            "base url {base_url:?} must be an absolute http(s) URL"
        );

        let request_timeout_secs = cli_timeout
            .or(file_timeout)
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .max(1);

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout_secs,
        })
    }
}

#[derive(Args, Debug, Default, Clone)]
pub struct CliArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to a configuration file (YAML or JSON)",
        global = true
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "SEARCH_FORM_SYNC_BASE_URL",
        value_name = "URL",
        help = "Base URL of the search-query service"
    )]
    pub base_url: Option<String>,

    #[arg(
        long,
        env = "SEARCH_FORM_SYNC_TIMEOUT_SECS",
        value_name = "SECS",
        help = "Per-request timeout in seconds"
    )]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    base_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    if !path.exists() {
        anyhow::bail!("config file {:?} does not exist", path);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    let ext = path
        .extension()
        .and_then(|os| os.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML config {:?}", path))?,
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON config {:?}", path))?,
        other => anyhow::bail!("unsupported config extension: {other}"),
    };
    Ok(parsed)
}
