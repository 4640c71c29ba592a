// Exchange-rate service - Use cases for the proxy and the chart view
use crate::application::pipeline::RateSession;
use crate::application::rate_source::{RateSource, UpstreamError};
use crate::domain::error::PipelineError;
use crate::domain::range::RangeToken;
use crate::domain::summary::ChartView;
use bytes::Bytes;
use chrono::{DateTime, Local};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

#[derive(Clone)]
pub struct ExchangeRateService {
    source: Arc<dyn RateSource>,
    session: Arc<Mutex<RateSession<Local>>>,
}

impl ExchangeRateService {
    pub fn new(source: Arc<dyn RateSource>) -> Self {
        Self {
            source,
            session: Arc::new(Mutex::new(RateSession::new(Local))),
        }
    }

    /// Raw provider body, for the proxy endpoint
    pub async fn fetch_raw(&self) -> Result<Bytes, UpstreamError> {
        self.source.fetch_charting_rates().await
    }

    /// Chart view for `token`; fetches only if nothing is loaded yet
    pub async fn view(&self, token: RangeToken, now: DateTime<Local>) -> Result<ChartView, ServiceError> {
        let mut session = self.session.lock().await;
        if !session.is_loaded() {
            return self.load_into(&mut session, token, &now).await;
        }
        Ok(session.set_range(token, &now))
    }

    /// Re-fetch and replace the full series. A failed reload keeps the old one.
    pub async fn reload(&self, token: RangeToken, now: DateTime<Local>) -> Result<ChartView, ServiceError> {
        let mut session = self.session.lock().await;
        self.load_into(&mut session, token, &now).await
    }

    async fn load_into(
        &self,
        session: &mut RateSession<Local>,
        token: RangeToken,
        now: &DateTime<Local>,
    ) -> Result<ChartView, ServiceError> {
        let body = self.source.fetch_charting_rates().await?;
        let view = session.load_slice(&body, now)?;

        tracing::info!(
            "Loaded {} daily rates",
            session.full_series().map(|s| s.len()).unwrap_or(0)
        );

        if token == view.range {
            Ok(view)
        } else {
            Ok(session.set_range(token, now))
        }
    }
}
