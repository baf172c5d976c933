//! Comparison controls — mode, custom ticker parsing, and chart ticker
//! assembly. These mirror what the dashboard's form controls produce.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::catalog::{Catalog, MAX_PEERS};

/// The two index columns every chart carries alongside the equities.
pub const INDEX_TICKERS: [&str; 2] = ["SEMDEX", "SEM-10"];

/// How comparison tickers are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ComparisonMode {
    #[default]
    Single,
    Peers,
    Custom,
}

impl ComparisonMode {
    pub fn label(self) -> &'static str {
        match self {
            ComparisonMode::Single => "single",
            ComparisonMode::Peers => "peers",
            ComparisonMode::Custom => "custom",
        }
    }
}

impl fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComparisonMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "single" => Ok(ComparisonMode::Single),
            "peers" => Ok(ComparisonMode::Peers),
            "custom" => Ok(ComparisonMode::Custom),
            other => Err(format!(
                "unknown comparison mode '{other}' (expected single, peers, or custom)"
            )),
        }
    }
}

/// Parse a free-text ticker list: split on commas, semicolons, and
/// whitespace; uppercase; drop duplicates and the base symbol; cap at
/// [`MAX_PEERS`].
pub fn parse_custom_tickers(input: &str, base: &str) -> Vec<String> {
    let base = base.to_uppercase();
    let mut out: Vec<String> = Vec::new();

    for raw in input.split(|c: char| c == ',' || c == ';' || c.is_whitespace()) {
        let ticker = raw.trim().to_uppercase();
        if ticker.is_empty() || ticker == base || out.contains(&ticker) {
            continue;
        }
        out.push(ticker);
        if out.len() == MAX_PEERS {
            break;
        }
    }
    out
}

/// Tickers to chart: the base first, then the mode's comparison symbols,
/// then the two market indices.
pub fn chart_tickers(
    base: &str,
    mode: ComparisonMode,
    catalog: &Catalog,
    custom_input: &str,
) -> Vec<String> {
    let base = base.to_uppercase();
    let mut out = vec![base.clone()];

    match mode {
        ComparisonMode::Single => {}
        ComparisonMode::Peers => {
            out.extend(catalog.peers(&base).into_iter().map(String::from));
        }
        ComparisonMode::Custom => {
            out.extend(parse_custom_tickers(custom_input, &base));
        }
    }

    for index in INDEX_TICKERS {
        if !out.iter().any(|t| t == index) {
            out.push(index.to_string());
        }
    }
    out
}
