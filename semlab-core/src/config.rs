//! Endpoint configuration — where the two CSV feeds live.
//!
//! The dashboard ships with two fixed URLs; a TOML file can point a session
//! at a mirror or a staging copy of the feeds.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// The two feed URLs for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub catalog_url: String,
    pub prices_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            catalog_url: "https://data.sem.mu/listedcompanies.csv".into(),
            prices_url: "https://data.sem.mu/dailyprices.csv".into(),
        }
    }
}

impl Endpoints {
    /// Load endpoints from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("read endpoints file: {e}"))?;
        Self::from_toml(&content)
    }

    /// Parse endpoints from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("parse endpoints TOML: {e}"))
    }

    /// Serialize the endpoints to TOML.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("serialize endpoints: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_fixed_feeds() {
        let e = Endpoints::default();
        assert!(e.catalog_url.ends_with(".csv"));
        assert!(e.prices_url.ends_with(".csv"));
        assert_ne!(e.catalog_url, e.prices_url);
    }

    #[test]
    fn toml_roundtrip() {
        let e = Endpoints::default();
        let toml_str = e.to_toml().unwrap();
        let parsed = Endpoints::from_toml(&toml_str).unwrap();
        assert_eq!(e, parsed);
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(Endpoints::from_toml("catalog_url = ").is_err());
    }
}
