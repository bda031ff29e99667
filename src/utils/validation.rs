use crate::utils::error::{LoaderError, Result};
use std::time::Duration;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.trim().is_empty() {
        return Err(LoaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(LoaderError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(LoaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(LoaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_non_zero_duration(field_name: &str, value: Duration) -> Result<()> {
    if value.is_zero() {
        return Err(LoaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format!("{:?}", value),
            reason: "Duration must be greater than zero".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_validate_url() {
        assert_ok!(validate_url("open_api_url", "https://example.com/v3/api-docs"));
        assert_ok!(validate_url("open_api_url", "http://localhost:8080/v3/api-docs"));
        assert_err!(validate_url("open_api_url", ""));
        assert_err!(validate_url("open_api_url", "   "));
        assert_err!(validate_url("open_api_url", "invalid-url"));
        assert_err!(validate_url("open_api_url", "ftp://example.com"));
    }

    #[test]
    fn test_validate_range() {
        assert_ok!(validate_range("server.port", 8080u16, 1, u16::MAX));
        assert_err!(validate_range("server.port", 0u16, 1, u16::MAX));
    }

    #[test]
    fn test_validate_non_zero_duration() {
        assert_ok!(validate_non_zero_duration(
            "refresh_interval",
            Duration::from_secs(1)
        ));
        let err = validate_non_zero_duration("refresh_interval", Duration::ZERO).unwrap_err();
        assert!(err.to_string().contains("refresh_interval"));
    }
}
