use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use mirrorscan_core::{config::GeneralConfig, ScanError, SourceFetcher};

/// Plain HTTPS fetcher for source documents.
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpFetcher {
    pub fn new(general: &GeneralConfig) -> Result<Self, ScanError> {
        let client = reqwest::Client::builder()
            .user_agent(general.user_agent.clone())
            .timeout(Duration::from_secs(general.request_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| ScanError::Network(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs: general.request_timeout_secs,
        })
    }
}

#[async_trait]
impl SourceFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &Url) -> Result<String, ScanError> {
        debug!(url = %url, "fetching source document");

        let resp = self.client.get(url.as_str()).send().await.map_err(|e| {
            if e.is_timeout() {
                ScanError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                ScanError::Connect(e.to_string())
            } else {
                ScanError::Network(e.to_string())
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScanError::HttpStatus(status.as_u16()));
        }

        resp.text().await.map_err(|e| {
            warn!(url = %url, error = %e, "failed reading source body");
            ScanError::Network(e.to_string())
        })
    }
}
