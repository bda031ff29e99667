use crate::core::{ConfigProvider, DocumentRefresher, LoadOutcome, ScheduledTask};
use crate::utils::error::{LoaderError, Result};
use async_trait::async_trait;
use futures::FutureExt;
use reqwest::Client;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

/// Downloads the OpenAPI document and hands it to the refresh capability.
///
/// Every invocation is independent. Failures are logged and returned as
/// [`LoadOutcome::Failed`]; nothing escapes `load`.
pub struct OpenApiLoader<R: DocumentRefresher> {
    refresher: Arc<R>,
    url: String,
    client: Client,
}

impl<R: DocumentRefresher> OpenApiLoader<R> {
    pub fn new(refresher: Arc<R>, url: impl Into<String>) -> Self {
        Self {
            refresher,
            url: url.into(),
            client: Client::new(),
        }
    }

    /// 未設定 timeout 時沿用 HTTP client 預設值
    pub fn with_timeout(
        refresher: Arc<R>,
        url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            refresher,
            url: url.into(),
            client: builder.build()?,
        })
    }

    pub fn from_config<C: ConfigProvider>(refresher: Arc<R>, config: &C) -> Result<Self> {
        Self::with_timeout(refresher, config.open_api_url(), config.request_timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn load(&self) -> LoadOutcome {
        tracing::info!(url = %self.url, "Loading OpenAPI document from {}", self.url);

        match self.fetch_and_refresh().await {
            Ok(bytes) => {
                tracing::info!(url = %self.url, bytes, "OpenAPI document load complete");
                LoadOutcome::Refreshed { bytes }
            }
            Err(e) => {
                tracing::warn!(
                    url = %self.url,
                    "Failed to load OpenAPI document from {}: {}",
                    self.url,
                    e
                );
                LoadOutcome::Failed(e)
            }
        }
    }

    async fn fetch(&self) -> Result<String> {
        tracing::debug!("Making API request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        tracing::debug!("API response status: {}", response.status());
        let body = response.error_for_status()?.text().await?;

        Ok(body)
    }

    async fn fetch_and_refresh(&self) -> Result<usize> {
        let document = self.fetch().await?;
        let bytes = document.len();

        AssertUnwindSafe(self.refresher.refresh(document))
            .catch_unwind()
            .await
            .map_err(|payload| LoaderError::RefreshPanicked {
                message: panic_message(payload.as_ref()),
            })??;

        Ok(bytes)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[async_trait]
impl<R: DocumentRefresher> ScheduledTask for OpenApiLoader<R> {
    fn name(&self) -> &str {
        "openapi-document-loader"
    }

    async fn run(&self) {
        self.load().await;
    }
}
