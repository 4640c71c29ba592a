// Rate decoder - Turns the provider's batched encoding into a flat series
use crate::domain::error::PipelineError;
use crate::domain::rates::{DAILY_INTERVAL_MS, RawBatch, Sample, Series};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// A leading rate below this is the provider's offset slot, not a quote.
/// USD/JPY never trades below 1, so the sentinel is unambiguous.
pub const OFFSET_THRESHOLD: f64 = 1.0;

/// Decode the daily batch of a provider payload
pub fn decode(payload: &Value) -> Result<Series, PipelineError> {
    let batches = payload
        .get("batchList")
        .and_then(Value::as_array)
        .ok_or_else(|| PipelineError::format("batchList missing or not a list"))?;

    let daily = batches
        .iter()
        .find(|b| b.get("interval").and_then(Value::as_f64) == Some(DAILY_INTERVAL_MS as f64))
        .ok_or_else(|| PipelineError::format("daily interval data not found"))?;

    let batch: RawBatch = serde_json::from_value(daily.clone())
        .map_err(|e| PipelineError::format(format!("malformed daily batch: {}", e)))?;

    decode_batch(&batch)
}

/// Drop the leading slot, subtract the offset it carries (if any) and
/// rebuild timestamps from `start_time` and `interval`
pub fn decode_batch(batch: &RawBatch) -> Result<Series, PipelineError> {
    let Some((&first, values)) = batch.rates.split_first() else {
        return Ok(Series::default());
    };
    let offset = if first < OFFSET_THRESHOLD { first } else { 0.0 };

    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let timestamp = (i as i64)
                .checked_mul(batch.interval)
                .and_then(|delta| batch.start_time.checked_add(delta))
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .ok_or_else(|| PipelineError::format("sample timestamp out of range"))?;
            Ok(Sample::new(timestamp, value - offset))
        })
        .collect()
}
