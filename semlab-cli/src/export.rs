//! Export — CSV returns table and JSON chart series for external tools.

use anyhow::{Context, Result};
use semlab_core::compare::{RebasedPoint, TickerReturn};

/// Serialize the rebased chart series to pretty JSON, one object per date
/// with only the tickers that have data.
pub fn rebased_series_json(series: &[RebasedPoint]) -> Result<String> {
    serde_json::to_string_pretty(series).context("failed to serialize chart series to JSON")
}

/// Export the returns table as CSV. No-data tickers render as a dash, the
/// same as the dashboard table.
pub fn returns_csv(returns: &[TickerReturn]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["ticker", "percent_change"])?;
    for r in returns {
        let label = r.label();
        wtr.write_record([r.ticker.as_str(), label.as_str()])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn returns_csv_uses_dash_for_no_data() {
        let returns = vec![
            TickerReturn {
                ticker: "MCB".into(),
                percent_change: Some(10.0),
            },
            TickerReturn {
                ticker: "GHOST".into(),
                percent_change: None,
            },
        ];
        let csv = returns_csv(&returns).unwrap();
        assert_eq!(csv, "ticker,percent_change\nMCB,10.00\nGHOST,-\n");
    }

    #[test]
    fn series_json_omits_absent_tickers() {
        let series = vec![RebasedPoint {
            date: "2024-01-01".into(),
            values: BTreeMap::from([("MCB".to_string(), 100.0)]),
        }];
        let json = rebased_series_json(&series).unwrap();
        assert!(json.contains("\"MCB\": 100.0"));
        assert!(!json.contains("GHOST"));
    }
}
