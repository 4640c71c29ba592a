// Monthly aggregator - Average/max/min per calendar month
use crate::domain::rates::Series;
use crate::domain::summary::MonthlySummary;
use chrono::{DateTime, Datelike, TimeDelta, TimeZone, Utc};
use std::collections::HashMap;

/// A series must span more than this many days for the monthly table to be shown
const MIN_SPAN_DAYS: i64 = 30;

struct MonthAccumulator {
    month: String,
    sum: f64,
    count: usize,
    max: f64,
    min: f64,
}

impl MonthAccumulator {
    fn new(month: String) -> Self {
        Self {
            month,
            sum: 0.0,
            count: 0,
            max: f64::NEG_INFINITY,
            min: f64::INFINITY,
        }
    }

    fn add(&mut self, rate: f64) {
        self.sum += rate;
        self.count += 1;
        self.max = self.max.max(rate);
        self.min = self.min.min(rate);
    }

    fn finish(self) -> MonthlySummary {
        let average = self.sum / self.count as f64;
        MonthlySummary::new(self.month, average, self.max, self.min)
    }
}

/// Whether the series is long enough for a monthly breakdown
pub fn should_aggregate(series: &Series) -> bool {
    series.len() >= 2
        && series
            .span()
            .is_some_and(|span| span > TimeDelta::days(MIN_SPAN_DAYS))
}

/// `YYYY-MM` of `timestamp` as seen in `tz`
pub fn month_key<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> String {
    let local = timestamp.with_timezone(tz);
    format!("{:04}-{:02}", local.year(), local.month())
}

/// Group samples by month in `tz`, in order of first appearance.
/// An empty series yields no summaries.
pub fn aggregate<Tz: TimeZone>(series: &Series, tz: &Tz) -> Vec<MonthlySummary> {
    let mut months: Vec<MonthAccumulator> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for sample in series.samples() {
        let key = month_key(&sample.timestamp, tz);
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                index.insert(key.clone(), months.len());
                months.push(MonthAccumulator::new(key));
                months.len() - 1
            }
        };
        months[slot].add(sample.rate);
    }

    months.into_iter().map(MonthAccumulator::finish).collect()
}
