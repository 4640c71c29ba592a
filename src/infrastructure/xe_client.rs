// xe.com charting-rates client
use crate::application::rate_source::{RateSource, UpstreamError};
use crate::infrastructure::config::ProviderSettings;
use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct XeRateClient {
    client: reqwest::Client,
    base_url: String,
    from_currency: String,
    to_currency: String,
    is_extended: bool,
    authorization: Option<String>,
}

impl XeRateClient {
    pub fn new(settings: &ProviderSettings) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: settings.base_url.clone(),
            from_currency: settings.from_currency.clone(),
            to_currency: settings.to_currency.clone(),
            is_extended: settings.is_extended,
            authorization: settings.authorization.clone(),
        })
    }

    fn build_request_url(&self) -> String {
        format!(
            "{}?fromCurrency={}&toCurrency={}&isExtended={}",
            self.base_url,
            urlencoding::encode(&self.from_currency),
            urlencoding::encode(&self.to_currency),
            self.is_extended
        )
    }
}

#[async_trait]
impl RateSource for XeRateClient {
    async fn fetch_charting_rates(&self) -> Result<Bytes, UpstreamError> {
        let url = self.build_request_url();
        tracing::debug!("Requesting charting rates from {}", url);

        let mut request = self.client.get(&url).header("Accept", "application/json");
        if let Some(auth) = &self.authorization {
            request = request.header("Authorization", auth);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("API request failed: {}", e);
            UpstreamError::Unreachable(e.to_string())
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read upstream body: {}", e);
            UpstreamError::Unreachable(e.to_string())
        })?;

        if !status.is_success() {
            tracing::warn!("Upstream responded with status {}", status);
            // relay JSON bodies as-is, anything else as text
            let body = serde_json::from_slice(&body).unwrap_or_else(|_| {
                serde_json::Value::String(String::from_utf8_lossy(&body).into_owned())
            });
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
