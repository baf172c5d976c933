//! Rebase-to-100 and period returns over a filtered price series.
//!
//! Rebasing scales each ticker so its oldest in-window price equals 100,
//! making relative performance comparable across instruments with different
//! absolute price levels.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::prices::PriceSeries;

/// One chartable point: ISO date label plus ticker → rebased value.
///
/// A ticker key is absent (not null, not zero) when either its baseline or
/// its price on this date is missing — consumers plot a gap, not zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RebasedPoint {
    pub date: String,
    pub values: BTreeMap<String, f64>,
}

/// Period percent change for one ticker; `None` means no data to show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerReturn {
    pub ticker: String,
    pub percent_change: Option<f64>,
}

impl TickerReturn {
    /// Display form: two decimals, or a dash for no data.
    pub fn label(&self) -> String {
        match self.percent_change {
            Some(pct) => format!("{pct:.2}"),
            None => "-".to_string(),
        }
    }
}

/// Rebase `tickers` to 100 at the oldest point of `filtered`, emitting
/// points in ascending date order (the reverse of storage order).
pub fn rebase(filtered: &PriceSeries, tickers: &[String]) -> Vec<RebasedPoint> {
    let Some(oldest) = filtered.oldest() else {
        return Vec::new();
    };

    let baselines: BTreeMap<&str, f64> = tickers
        .iter()
        .filter_map(|t| truthy(oldest.price(t)).map(|p| (t.as_str(), p)))
        .collect();

    filtered
        .points()
        .iter()
        .rev()
        .map(|point| {
            let values = tickers
                .iter()
                .filter_map(|t| {
                    let baseline = baselines.get(t.as_str())?;
                    let price = truthy(point.price(t))?;
                    Some((t.clone(), price / baseline * 100.0))
                })
                .collect();
            RebasedPoint {
                date: point.date.format("%Y-%m-%d").to_string(),
                values,
            }
        })
        .collect()
}

/// Percent change from the oldest to the newest in-window price, rounded to
/// two decimals. A ticker missing either endpoint reports no data.
pub fn compute_returns(filtered: &PriceSeries, tickers: &[String]) -> Vec<TickerReturn> {
    tickers
        .iter()
        .map(|ticker| {
            let endpoints = filtered.oldest().zip(filtered.newest());
            let percent_change = endpoints.and_then(|(oldest, newest)| {
                let start = truthy(oldest.price(ticker))?;
                let end = truthy(newest.price(ticker))?;
                Some(round2((end - start) / start * 100.0))
            });
            TickerReturn {
                ticker: ticker.clone(),
                percent_change,
            }
        })
        .collect()
}

/// Non-null and non-zero — a zero price can neither anchor nor scale.
fn truthy(price: Option<f64>) -> Option<f64> {
    price.filter(|p| *p != 0.0)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::decode::decode;

    fn series(csv: &str) -> PriceSeries {
        PriceSeries::from_rows(&decode(csv))
    }

    fn tickers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rebases_to_100_at_oldest_point_ascending() {
        let s = series("Date,MCB,SBM\n2024-01-03,110,6.3\n2024-01-02,105,6.1\n2024-01-01,100,6.0\n");
        let points = rebase(&s, &tickers(&["MCB", "SBM"]));

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].date, "2024-01-01");
        assert_eq!(points[2].date, "2024-01-03");
        assert_eq!(points[0].values["MCB"], 100.0);
        assert_eq!(points[0].values["SBM"], 100.0);
        assert!((points[2].values["MCB"] - 110.0).abs() < 1e-9);
        assert!((points[2].values["SBM"] - 105.0).abs() < 1e-9);
    }

    #[test]
    fn missing_baseline_omits_ticker_everywhere() {
        let s = series("Date,MCB,SBM\n2024-01-02,105,6.1\n2024-01-01,100,\n");
        let points = rebase(&s, &tickers(&["MCB", "SBM"]));
        assert!(points[0].values.contains_key("MCB"));
        assert!(!points[0].values.contains_key("SBM"));
        assert!(!points[1].values.contains_key("SBM"));
    }

    #[test]
    fn missing_price_omits_key_for_that_point_only() {
        let s = series("Date,MCB\n2024-01-03,110\n2024-01-02,\n2024-01-01,100\n");
        let points = rebase(&s, &tickers(&["MCB"]));
        assert!(points[0].values.contains_key("MCB"));
        assert!(!points[1].values.contains_key("MCB"));
        assert!(points[2].values.contains_key("MCB"));
    }

    #[test]
    fn unknown_ticker_is_absent_not_zero() {
        let s = series("Date,MCB\n2024-01-02,105\n2024-01-01,100\n");
        let points = rebase(&s, &tickers(&["MCB", "GHOST"]));
        for point in &points {
            assert!(!point.values.contains_key("GHOST"));
        }
    }

    #[test]
    fn empty_series_rebases_to_nothing() {
        assert!(rebase(&PriceSeries::default(), &tickers(&["MCB"])).is_empty());
    }

    #[test]
    fn returns_ten_percent_for_100_to_110() {
        let s = series("Date,X\n2024-02-01,110\n2024-01-01,100\n");
        let returns = compute_returns(&s, &tickers(&["X"]));
        assert_eq!(returns[0].percent_change, Some(10.0));
        assert_eq!(returns[0].label(), "10.00");
    }

    #[test]
    fn returns_round_to_two_decimals() {
        let s = series("Date,X\n2024-02-01,101\n2024-01-01,300\n");
        let returns = compute_returns(&s, &tickers(&["X"]));
        // (101 - 300) / 300 * 100 = -66.333... → -66.33
        assert_eq!(returns[0].percent_change, Some(-66.33));
    }

    #[test]
    fn null_endpoint_yields_no_data_sentinel() {
        let s = series("Date,X,Y\n2024-02-01,110,\n2024-01-01,,100\n");
        let returns = compute_returns(&s, &tickers(&["X", "Y"]));
        assert_eq!(returns[0].percent_change, None);
        assert_eq!(returns[0].label(), "-");
        assert_eq!(returns[1].percent_change, None);
    }

    #[test]
    fn empty_series_returns_all_sentinels() {
        let returns = compute_returns(&PriceSeries::default(), &tickers(&["A", "B"]));
        assert!(returns.iter().all(|r| r.percent_change.is_none()));
    }
}
