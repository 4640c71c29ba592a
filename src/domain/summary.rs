// Presentation records handed to the chart layer
use super::range::RangeToken;
use super::rates::Series;
use serde::Serialize;

/// Per-month statistics, formatted to four decimals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    /// `YYYY-MM`
    pub month: String,
    pub average: String,
    pub max: String,
    pub min: String,
}

impl MonthlySummary {
    pub fn new(month: String, average: f64, max: f64, min: f64) -> Self {
        Self {
            month,
            average: format!("{:.4}", average),
            max: format!("{:.4}", max),
            min: format!("{:.4}", min),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartView {
    pub range: RangeToken,
    pub filtered_series: Series,
    pub monthly_summary: Option<Vec<MonthlySummary>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_formats_four_decimals() {
        let summary = MonthlySummary::new("2024-01".to_string(), 100.207816666, 101.0, 99.5);
        assert_eq!(summary.average, "100.2078");
        assert_eq!(summary.max, "101.0000");
        assert_eq!(summary.min, "99.5000");
    }

    #[test]
    fn test_chart_view_json_shape() {
        let view = ChartView {
            range: RangeToken::SixMonths,
            filtered_series: Series::default(),
            monthly_summary: None,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"range": "6m", "filteredSeries": [], "monthlySummary": null})
        );
    }
}
