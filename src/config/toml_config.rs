use crate::utils::duration;
use crate::utils::error::{LoaderError, Result};
use regex::{Captures, Regex};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 巢狀 placeholder 最多展開的層數
const MAX_SUBSTITUTION_PASSES: usize = 8;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub loader: LoaderSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerSection {
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoaderSection {
    pub open_api_url: Option<String>,
    #[serde(default, deserialize_with = "duration::deserialize_optional")]
    pub refresh_initial_delay: Option<Duration>,
    #[serde(default, deserialize_with = "duration::deserialize_optional")]
    pub refresh_interval: Option<Duration>,
    #[serde(default, deserialize_with = "duration::deserialize_optional")]
    pub request_timeout: Option<Duration>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content, |name| std::env::var(name).ok())?;
        Ok(toml::from_str(&processed_content)?)
    }
}

/// Replaces `${NAME}` and `${NAME:default}` placeholders.
///
/// The name is looked up first and the default is only used when the name is
/// unset, so a default may itself contain a placeholder. Unknown names without
/// a default are left as written.
pub fn substitute_env_vars<F>(content: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    // default 內可再包一層 ${...}；更深的巢狀由內層先展開
    let re = Regex::new(r"\$\{([^${}:]+)(?::((?:[^${}]|\$\{[^${}]*\})*))?\}").map_err(|e| {
        LoaderError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        }
    })?;

    let mut current = content.to_string();
    for _ in 0..MAX_SUBSTITUTION_PASSES {
        let next = re
            .replace_all(&current, |caps: &Captures| {
                let name = caps[1].trim();
                resolve_var(name, &lookup)
                    .or_else(|| caps.get(2).map(|default| default.as_str().to_string()))
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned();

        if next == current {
            break;
        }
        current = next;
    }

    Ok(current)
}

/// `server.port` 也會嘗試 `SERVER_PORT`
fn resolve_var<F>(name: &str, lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).or_else(|| {
        let relaxed = name.replace(['.', '-'], "_").to_ascii_uppercase();
        if relaxed == name {
            None
        } else {
            lookup(&relaxed)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[server]
port = 9090

[loader]
open_api_url = "https://api.example.com/v3/api-docs"
refresh_initial_delay = "PT1M"
refresh_interval = "10m"
request_timeout = "5000"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.server.port, Some(9090));
        assert_eq!(
            config.loader.open_api_url.as_deref(),
            Some("https://api.example.com/v3/api-docs")
        );
        assert_eq!(config.loader.refresh_initial_delay, Some(Duration::from_secs(60)));
        assert_eq!(config.loader.refresh_interval, Some(Duration::from_secs(600)));
        assert_eq!(config.loader.request_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.server.port.is_none());
        assert!(config.loader.open_api_url.is_none());
        assert!(config.loader.refresh_interval.is_none());
    }

    #[test]
    fn test_invalid_duration_is_rejected() {
        let result = TomlConfig::from_toml_str("[loader]\nrefresh_interval = \"often\"\n");
        assert!(matches!(result, Err(LoaderError::TomlError(_))));
    }

    #[test]
    fn test_substitution_uses_lookup_and_defaults() {
        let lookup = lookup_from(&[("DOCS_HOST", "docs.internal")]);

        let out = substitute_env_vars("url = \"http://${DOCS_HOST}/v3\"", &lookup).unwrap();
        assert_eq!(out, "url = \"http://docs.internal/v3\"");

        let out = substitute_env_vars("port = ${MISSING_PORT:8081}", &lookup).unwrap();
        assert_eq!(out, "port = 8081");

        let out = substitute_env_vars("x = \"${MISSING}\"", &lookup).unwrap();
        assert_eq!(out, "x = \"${MISSING}\"");
    }

    #[test]
    fn test_nested_placeholder_with_relaxed_name() {
        let template =
            "${chatbot.open-api-url:http://localhost:${server.port:8080}/v3/api-docs}";

        let out = substitute_env_vars(template, lookup_from(&[])).unwrap();
        assert_eq!(out, "http://localhost:8080/v3/api-docs");

        let out = substitute_env_vars(template, lookup_from(&[("SERVER_PORT", "9000")])).unwrap();
        assert_eq!(out, "http://localhost:9000/v3/api-docs");

        let out = substitute_env_vars(
            template,
            lookup_from(&[("CHATBOT_OPEN_API_URL", "https://remote/docs")]),
        )
        .unwrap();
        assert_eq!(out, "https://remote/docs");
    }

    #[test]
    fn test_set_variable_wins_over_unresolved_default() {
        let lookup = lookup_from(&[("OUTER", "resolved")]);
        let out = substitute_env_vars("x = \"${OUTER:${MISSING}}\"", &lookup).unwrap();
        assert_eq!(out, "x = \"resolved\"");

        let out = substitute_env_vars("x = \"${UNSET:${MISSING}}\"", &lookup).unwrap();
        assert_eq!(out, "x = \"${MISSING}\"");

        let out = substitute_env_vars("x = \"${A:${B:${MISSING}}}\"", lookup_from(&[("A", "a")])).unwrap();
        assert_eq!(out, "x = \"a\"");

        let out =
            substitute_env_vars("x = \"${A:${B:${C:deep}}}\"", lookup_from(&[])).unwrap();
        assert_eq!(out, "x = \"deep\"");
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[loader]
open_api_url = "https://api.example.com/v3/api-docs"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.loader.open_api_url.as_deref(),
            Some("https://api.example.com/v3/api-docs")
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = TomlConfig::from_file("/definitely/not/here/loader.toml");
        assert!(matches!(result, Err(LoaderError::IoError(_))));
    }
}
