//! Session state — one load per session, with explicit transitions.
//!
//! The load lifecycle is `Idle → Loading → Ready` or `Loading → Error`.
//! Both feeds are fetched concurrently and the load fails fast: if either
//! fetch reports an error, no partial data is surfaced. After a successful
//! load every derived computation (peers, filtering, rebasing, returns) is a
//! pure function over the snapshot, so nothing needs locking.

use crate::data::catalog::Catalog;
use crate::data::decode::decode;
use crate::data::prices::PriceSeries;
use crate::data::source::{DataError, FetchProgress, SnapshotSource};

const CATALOG_FEED: &str = "category listing";
const PRICES_FEED: &str = "price history";

/// Both datasets of one successful load.
///
/// They are independently parsed and not transactionally linked: a symbol
/// may appear in one but not the other.
#[derive(Debug, Clone, Default)]
pub struct MarketSnapshot {
    pub catalog: Catalog,
    pub prices: PriceSeries,
}

/// Load lifecycle state.
#[derive(Debug, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready(MarketSnapshot),
    Error(DataError),
}

impl LoadState {
    pub fn label(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Loading => "loading",
            LoadState::Ready(_) => "ready",
            LoadState::Error(_) => "error",
        }
    }
}

/// Single-owner application state for one dashboard session, passed by
/// reference to consumers instead of living in ambient globals.
#[derive(Debug, Default)]
pub struct Session {
    state: LoadState,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: LoadState::Idle,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// The loaded snapshot, if this session reached `Ready`.
    pub fn snapshot(&self) -> Option<&MarketSnapshot> {
        match &self.state {
            LoadState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    /// Run the one load of this session and return the resulting state.
    pub fn load(
        &mut self,
        source: &dyn SnapshotSource,
        progress: &dyn FetchProgress,
    ) -> &LoadState {
        self.state = LoadState::Loading;
        self.state = match load_snapshot(source, progress) {
            Ok(snapshot) => LoadState::Ready(snapshot),
            Err(e) => LoadState::Error(e),
        };
        &self.state
    }
}

/// Fetch both feeds concurrently and parse them.
///
/// Either fetch failing aborts the whole load. Parse problems do not:
/// malformed rows degrade inside the normalizers.
pub fn load_snapshot(
    source: &dyn SnapshotSource,
    progress: &dyn FetchProgress,
) -> Result<MarketSnapshot, DataError> {
    let (catalog_text, prices_text) = fetch_both(source, progress)?;
    Ok(MarketSnapshot {
        catalog: Catalog::from_rows(&decode(&catalog_text)),
        prices: PriceSeries::from_rows(&decode(&prices_text)),
    })
}

fn fetch_both(
    source: &dyn SnapshotSource,
    progress: &dyn FetchProgress,
) -> Result<(String, String), DataError> {
    std::thread::scope(|scope| {
        let catalog_handle = scope.spawn(|| {
            progress.on_start(CATALOG_FEED);
            let result = source.fetch_catalog_csv();
            progress.on_complete(CATALOG_FEED, result.as_ref().err());
            result
        });

        progress.on_start(PRICES_FEED);
        let prices = source.fetch_prices_csv();
        progress.on_complete(PRICES_FEED, prices.as_ref().err());

        let catalog = catalog_handle
            .join()
            .map_err(|_| DataError::Transport("catalog fetch thread panicked".into()))?;

        Ok((catalog?, prices?))
    })
}
