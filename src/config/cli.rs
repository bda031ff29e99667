use crate::config::toml_config::TomlConfig;
use crate::config::{default_open_api_url, LoaderConfig};
use crate::utils::duration::parse_duration;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "openapi-doc-loader")]
#[command(about = "Periodically downloads an OpenAPI document and refreshes its consumers")]
pub struct CliConfig {
    /// Optional TOML configuration file
    #[arg(short, long, env = "OPENAPI_LOADER_CONFIG")]
    pub config: Option<PathBuf>,

    /// URL of the OpenAPI JSON document
    #[arg(long, env = "CHATBOT_OPEN_API_URL")]
    pub open_api_url: Option<String>,

    /// Port of the local server, used to derive the default URL
    #[arg(long, env = "SERVER_PORT")]
    pub server_port: Option<u16>,

    /// Delay before the first periodic refresh (PT5M, 5m or milliseconds)
    #[arg(long, env = "CHATBOT_OPEN_API_REFRESH_INITIAL_DELAY", value_parser = parse_duration)]
    pub refresh_initial_delay: Option<Duration>,

    /// Delay between the end of one refresh and the start of the next
    #[arg(long, env = "CHATBOT_OPEN_API_REFRESH_INTERVAL", value_parser = parse_duration)]
    pub refresh_interval: Option<Duration>,

    /// HTTP request timeout; the client default applies when unset
    #[arg(long, env = "CHATBOT_OPEN_API_REQUEST_TIMEOUT", value_parser = parse_duration)]
    pub request_timeout: Option<Duration>,

    /// Run a single load and exit
    #[arg(long)]
    pub once: bool,

    #[arg(long, value_enum, env = "LOG_FORMAT", default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 合併命令列、環境變數、設定檔與預設值 (優先順序由高至低)
    pub fn resolve(&self) -> Result<LoaderConfig> {
        let file = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from: {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        let base = LoaderConfig::from_toml(&file);
        let server_port = self.server_port.unwrap_or(base.server_port);

        // 只有在 URL 完全未指定時才依 port 推導
        let open_api_url = self
            .open_api_url
            .clone()
            .or_else(|| file.loader.open_api_url.clone())
            .unwrap_or_else(|| default_open_api_url(server_port));

        let config = LoaderConfig {
            open_api_url,
            server_port,
            refresh_initial_delay: self
                .refresh_initial_delay
                .unwrap_or(base.refresh_initial_delay),
            refresh_interval: self.refresh_interval.unwrap_or(base.refresh_interval),
            request_timeout: self.request_timeout.or(base.request_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}
