// Lookback windows selectable from the chart
use super::error::PipelineError;
use chrono::{DateTime, Datelike, Days, Months, NaiveTime, Offset, TimeDelta, TimeZone, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RangeToken {
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[default]
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
    /// "10y" is an alias for the whole series, not a computed lookback
    #[serde(rename = "10y")]
    All,
}

impl RangeToken {
    pub const ALL_TOKENS: [RangeToken; 6] = [
        RangeToken::ThreeMonths,
        RangeToken::SixMonths,
        RangeToken::OneYear,
        RangeToken::TwoYears,
        RangeToken::FiveYears,
        RangeToken::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RangeToken::ThreeMonths => "3m",
            RangeToken::SixMonths => "6m",
            RangeToken::OneYear => "1y",
            RangeToken::TwoYears => "2y",
            RangeToken::FiveYears => "5y",
            RangeToken::All => "10y",
        }
    }

    fn lookback(&self) -> Option<Months> {
        match self {
            RangeToken::ThreeMonths => Some(Months::new(3)),
            RangeToken::SixMonths => Some(Months::new(6)),
            RangeToken::OneYear => Some(Months::new(12)),
            RangeToken::TwoYears => Some(Months::new(24)),
            RangeToken::FiveYears => Some(Months::new(60)),
            RangeToken::All => None,
        }
    }

    /// First instant inside the window ending at `now`.
    ///
    /// The window starts at midnight, in `now`'s time zone, of the date that
    /// lies the lookback before `now`'s date. A day that does not exist in the
    /// target month rolls over into the next one (May 31 - 3 months = Mar 2
    /// in a leap year). `None` means no lower bound.
    pub fn start_date<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Utc>> {
        let today = now.date_naive();
        let date = today
            .with_day(1)?
            .checked_sub_months(self.lookback()?)?
            .checked_add_days(Days::new(u64::from(today.day() - 1)))?;
        let local_midnight = date.and_time(NaiveTime::MIN);

        let tz = now.timezone();
        let start = tz
            .from_local_datetime(&local_midnight)
            .earliest()
            // midnight skipped by a DST transition: first valid hour after it
            .or_else(|| {
                tz.from_local_datetime(&(local_midnight + TimeDelta::hours(1)))
                    .earliest()
            })
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| {
                let offset = TimeDelta::seconds(i64::from(now.offset().fix().local_minus_utc()));
                (local_midnight - offset).and_utc()
            });
        Some(start)
    }
}

impl FromStr for RangeToken {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RangeToken::ALL_TOKENS
            .into_iter()
            .find(|token| token.as_str() == s)
            .ok_or_else(|| PipelineError::Config(s.to_string()))
    }
}

impl fmt::Display for RangeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, LocalResult, NaiveDate, NaiveDateTime};

    #[test]
    fn test_parse_tokens() {
        for token in RangeToken::ALL_TOKENS {
            assert_eq!(token.as_str().parse::<RangeToken>(), Ok(token));
        }
        assert_eq!(RangeToken::default(), RangeToken::TwoYears);
        assert_eq!(
            "7d".parse::<RangeToken>(),
            Err(PipelineError::Config("7d".to_string()))
        );
    }

    #[test]
    fn test_start_date_uses_calendar_arithmetic() {
        let now = Utc.with_ymd_and_hms(2024, 5, 15, 13, 45, 0).unwrap();

        assert_eq!(
            RangeToken::ThreeMonths.start_date(&now),
            Some(Utc.with_ymd_and_hms(2024, 2, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(
            RangeToken::FiveYears.start_date(&now),
            Some(Utc.with_ymd_and_hms(2019, 5, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(RangeToken::All.start_date(&now), None);
    }

    #[test]
    fn test_start_date_rolls_missing_days_forward() {
        let now = Utc.with_ymd_and_hms(2024, 5, 31, 8, 0, 0).unwrap();
        assert_eq!(
            RangeToken::ThreeMonths.start_date(&now),
            Some(Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap())
        );

        let leap_day = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
        assert_eq!(
            RangeToken::OneYear.start_date(&leap_day),
            Some(Utc.with_ymd_and_hms(2023, 3, 1, 0, 0, 0).unwrap())
        );

        let month_end = Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap();
        assert_eq!(
            RangeToken::SixMonths.start_date(&month_end),
            Some(Utc.with_ymd_and_hms(2023, 10, 1, 0, 0, 0).unwrap())
        );
    }

    /// UTC-3 until local midnight of 2024-10-06, UTC-2 afterwards, so that
    /// midnight never happens on the local clock
    #[derive(Debug, Clone, Copy)]
    struct SkipsMidnight;

    impl SkipsMidnight {
        fn before() -> FixedOffset {
            FixedOffset::west_opt(3 * 3600).unwrap()
        }

        fn after() -> FixedOffset {
            FixedOffset::west_opt(2 * 3600).unwrap()
        }

        fn switch_local() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2024, 10, 6)
                .unwrap()
                .and_time(NaiveTime::MIN)
        }
    }

    impl TimeZone for SkipsMidnight {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            SkipsMidnight
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let gap_start = Self::switch_local();
            if *local < gap_start {
                LocalResult::Single(Self::before())
            } else if *local < gap_start + TimeDelta::hours(1) {
                LocalResult::None
            } else {
                LocalResult::Single(Self::after())
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            // 2024-10-06 00:00 at UTC-3
            if *utc < Self::switch_local() + TimeDelta::hours(3) {
                Self::before()
            } else {
                Self::after()
            }
        }
    }

    #[test]
    fn test_start_date_after_skipped_midnight() {
        let now = SkipsMidnight.with_ymd_and_hms(2025, 10, 6, 12, 0, 0).unwrap();

        // first valid local instant is 01:00 at UTC-2
        assert_eq!(
            RangeToken::OneYear.start_date(&now),
            Some(Utc.with_ymd_and_hms(2024, 10, 6, 3, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_start_date_is_local_midnight() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let now = tokyo.with_ymd_and_hms(2024, 7, 1, 6, 0, 0).unwrap();

        // 2023-07-01 00:00 +09:00
        assert_eq!(
            RangeToken::OneYear.start_date(&now),
            Some(Utc.with_ymd_and_hms(2023, 6, 30, 15, 0, 0).unwrap())
        );
    }
}
