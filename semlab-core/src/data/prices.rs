//! Price series normalization — a date-indexed table of per-ticker nullable
//! prices, held newest-first.
//!
//! Numeric policy: a cell survives only when
//! it parses to a finite, strictly positive number; everything else — parse
//! failure, NaN, infinity, zero, negative — stores as null. Parsing never
//! raises; rows with an unparseable date are dropped silently.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::decode::CsvRow;
use crate::compare::timeframe::Timeframe;

const DATE_ALIASES: &[&str] = &["Date"];

/// Accepted date formats, tried in order. Month-first wins for ambiguous
/// slash dates; ISO is preferred at the source boundary.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"];

/// Prices for every ticker on one trading day. The map never contains the
/// date column itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub prices: BTreeMap<String, Option<f64>>,
}

impl PricePoint {
    /// Price for a ticker, flattened: `None` when the column is missing or
    /// the cell is null.
    pub fn price(&self, ticker: &str) -> Option<f64> {
        self.prices.get(ticker).copied().flatten()
    }
}

/// Date-descending price table (newest first at rest).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from decoded price rows.
    ///
    /// The date cell resolves through the alias helper; rows that fail date
    /// parsing are dropped. Every column whose header does not contain the
    /// substring `date` (case-insensitive) is numeric-parsed per the strict
    /// policy above.
    pub fn from_rows(rows: &[CsvRow]) -> Self {
        let points = rows
            .iter()
            .filter_map(|row| {
                let date = parse_date(row.field(DATE_ALIASES)?)?;
                let prices = row
                    .iter()
                    .filter(|(key, _)| !key.to_ascii_lowercase().contains("date"))
                    .map(|(key, value)| (key.to_string(), parse_price(value)))
                    .collect();
                Some(PricePoint { date, prices })
            })
            .collect();
        Self::from_points(points)
    }

    /// Construct from pre-built points, sorting into canonical descending
    /// date order.
    pub fn from_points(mut points: Vec<PricePoint>) -> Self {
        points.sort_by(|a, b| b.date.cmp(&a.date));
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Most recent point (first at rest).
    pub fn newest(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// Oldest point (last at rest).
    pub fn oldest(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Restrict to the trailing window ending at the newest point,
    /// preserving descending order. Empty in, empty out.
    pub fn filter_timeframe(&self, timeframe: Timeframe) -> PriceSeries {
        let Some(newest) = self.newest() else {
            return PriceSeries::default();
        };
        let start = timeframe.start_from(newest.date);
        PriceSeries {
            points: self
                .points
                .iter()
                .filter(|p| p.date >= start)
                .cloned()
                .collect(),
        }
    }
}

fn parse_date(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(cell, fmt).ok())
}

fn parse_price(cell: &str) -> Option<f64> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::decode::decode;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn sorts_descending_by_date() {
        let series = PriceSeries::from_rows(&decode(
            "Date,MCB\n2024-01-02,100\n2024-01-04,104\n2024-01-03,103\n",
        ));
        let dates: Vec<NaiveDate> = series.points().iter().map(|p| p.date).collect();
        assert_eq!(dates, [d("2024-01-04"), d("2024-01-03"), d("2024-01-02")]);
        assert_eq!(series.newest().unwrap().date, d("2024-01-04"));
        assert_eq!(series.oldest().unwrap().date, d("2024-01-02"));
    }

    #[test]
    fn rows_with_bad_dates_are_dropped_silently() {
        let series = PriceSeries::from_rows(&decode(
            "Date,MCB\nnot-a-date,100\n2024-01-02,101\n,102\n",
        ));
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn slash_dates_parse_month_first() {
        let series = PriceSeries::from_rows(&decode("Date,MCB\n03/04/2024,100\n"));
        assert_eq!(series.newest().unwrap().date, d("2024-03-04"));
        // Day-first is the fallback when month-first is impossible.
        let series = PriceSeries::from_rows(&decode("Date,MCB\n25/04/2024,100\n"));
        assert_eq!(series.newest().unwrap().date, d("2024-04-25"));
    }

    #[test]
    fn date_columns_never_appear_in_prices() {
        let series = PriceSeries::from_rows(&decode(
            "Date,MCB,TradeDate,SEMDEX\n2024-01-02,100,whatever,2100.5\n",
        ));
        let point = series.newest().unwrap();
        assert!(!point.prices.contains_key("Date"));
        assert!(!point.prices.contains_key("TradeDate"));
        assert_eq!(point.price("MCB"), Some(100.0));
        assert_eq!(point.price("SEMDEX"), Some(2100.5));
    }

    #[test]
    fn bad_numbers_store_as_null_never_nan() {
        let series = PriceSeries::from_rows(&decode(
            "Date,A,B,C,D,E\n2024-01-02,abc,NaN,inf,,12.5\n",
        ));
        let point = series.newest().unwrap();
        assert_eq!(point.price("A"), None);
        assert_eq!(point.price("B"), None);
        assert_eq!(point.price("C"), None);
        assert_eq!(point.price("D"), None);
        assert_eq!(point.price("E"), Some(12.5));
        for value in point.prices.values().flatten() {
            assert!(value.is_finite());
        }
    }

    #[test]
    fn non_positive_prices_are_rejected() {
        let series = PriceSeries::from_rows(&decode("Date,A,B\n2024-01-02,0,-4.2\n"));
        let point = series.newest().unwrap();
        assert_eq!(point.price("A"), None);
        assert_eq!(point.price("B"), None);
    }

    #[test]
    fn missing_price_column_reads_as_none() {
        let series = PriceSeries::from_rows(&decode("Date,MCB\n2024-01-02,100\n"));
        assert_eq!(series.newest().unwrap().price("SBM"), None);
    }

    #[test]
    fn filter_empty_series_is_empty() {
        let series = PriceSeries::default();
        assert!(series.filter_timeframe(Timeframe::M1).is_empty());
    }

    #[test]
    fn filter_one_month_keeps_trailing_window_inclusive() {
        let mut csv = String::from("Date,MCB\n");
        // Two years of month-start points ending 2024-06-01.
        for year in [2022, 2023, 2024] {
            for month in 1..=12 {
                if year == 2024 && month > 6 {
                    break;
                }
                csv.push_str(&format!("{year}-{month:02}-01,100\n"));
            }
        }
        let series = PriceSeries::from_rows(&decode(&csv));
        let filtered = series.filter_timeframe(Timeframe::M1);
        let dates: Vec<NaiveDate> = filtered.points().iter().map(|p| p.date).collect();
        // Start date 2024-05-01 is inclusive.
        assert_eq!(dates, [d("2024-06-01"), d("2024-05-01")]);
    }

    #[test]
    fn filter_ytd_starts_january_first() {
        let series = PriceSeries::from_rows(&decode(
            "Date,MCB\n2023-12-29,99\n2024-01-01,100\n2024-03-15,105\n",
        ));
        let filtered = series.filter_timeframe(Timeframe::Ytd);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.oldest().unwrap().date, d("2024-01-01"));
    }
}
