// Exchange-rate domain models
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Interval of the only provider batch we consume (one day, in ms)
pub const DAILY_INTERVAL_MS: i64 = 86_400_000;

/// A provider batch: rates sampled every `interval` ms from `start_time`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBatch {
    #[serde(deserialize_with = "integral_millis")]
    pub interval: i64,
    #[serde(deserialize_with = "integral_millis")]
    pub start_time: i64,
    /// `null` entries are rejected rather than read as zero
    #[serde(default)]
    pub rates: Vec<f64>,
}

/// Millisecond field that may arrive as `86400000` or `86400000.0`
fn integral_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    number
        .as_i64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|ms| ms.fract() == 0.0 && ms.abs() < i64::MAX as f64)
                .map(|ms| ms as i64)
        })
        .ok_or_else(|| serde::de::Error::custom(format!("{} is not a whole number of ms", number)))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub rate: f64,
}

impl Sample {
    pub fn new(timestamp: DateTime<Utc>, rate: f64) -> Self {
        Self { timestamp, rate }
    }
}

/// Ordered sequence of samples, one per interval
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Elapsed time between the first and last sample
    pub fn span(&self) -> Option<TimeDelta> {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => Some(last.timestamp - first.timestamp),
            _ => None,
        }
    }

    /// Samples taken at or after `start`, order preserved
    pub fn since(&self, start: DateTime<Utc>) -> Series {
        self.samples
            .iter()
            .filter(|s| s.timestamp >= start)
            .copied()
            .collect()
    }
}

impl FromIterator<Sample> for Series {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
