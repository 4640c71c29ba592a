// Rate session - Holds the decoded full series and derives chart views from it
use crate::application::decoder;
use crate::application::monthly_aggregator::{aggregate, should_aggregate};
use crate::application::range_filter::filter;
use crate::domain::error::PipelineError;
use crate::domain::range::RangeToken;
use crate::domain::rates::Series;
use crate::domain::summary::ChartView;
use chrono::{DateTime, TimeZone};
use serde_json::Value;

/// Session state for one chart: the full series survives range changes,
/// filtered views are rebuilt on every call.
pub struct RateSession<Tz: TimeZone> {
    tz: Tz,
    full: Option<Series>,
}

impl<Tz: TimeZone> RateSession<Tz> {
    /// `tz` decides calendar boundaries for both range starts and month keys
    pub fn new(tz: Tz) -> Self {
        Self { tz, full: None }
    }

    pub fn full_series(&self) -> Option<&Series> {
        self.full.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.full.is_some()
    }

    /// Decode `payload`, keep it as the full series and return the default view.
    /// On failure the previously loaded series is left untouched.
    pub fn load(&mut self, payload: &Value, now: &DateTime<Tz>) -> Result<ChartView, PipelineError> {
        let full = decoder::decode(payload)?;
        tracing::debug!("Loaded full series with {} samples", full.len());
        self.full = Some(full);
        Ok(self.set_range(RangeToken::default(), now))
    }

    /// [`RateSession::load`] for an undecoded response body
    pub fn load_slice(&mut self, body: &[u8], now: &DateTime<Tz>) -> Result<ChartView, PipelineError> {
        let payload: Value = serde_json::from_slice(body)
            .map_err(|e| PipelineError::format(format!("payload is not JSON: {}", e)))?;
        self.load(&payload, now)
    }

    /// Re-filter the stored series. Before any successful load the view is empty.
    pub fn set_range(&self, token: RangeToken, now: &DateTime<Tz>) -> ChartView {
        let filtered_series = match &self.full {
            Some(full) => filter(full, token, now),
            None => Series::default(),
        };

        let monthly_summary =
            should_aggregate(&filtered_series).then(|| aggregate(&filtered_series, &self.tz));

        ChartView {
            range: token,
            filtered_series,
            monthly_summary,
        }
    }
}
