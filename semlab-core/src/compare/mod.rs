//! Derived comparisons over a loaded snapshot — all pure and synchronous,
//! recomputed whenever their inputs change.

pub mod rebase;
pub mod selection;
pub mod timeframe;

pub use rebase::{compute_returns, rebase, RebasedPoint, TickerReturn};
pub use selection::{chart_tickers, parse_custom_tickers, ComparisonMode, INDEX_TICKERS};
pub use timeframe::Timeframe;
