use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::config::CATALOG;
use crate::domain::{Instrument, Market};

/// The instruments the user can pick from, grouped by market.
#[derive(Debug, Clone)]
pub struct Catalog {
    instruments: Vec<Instrument>,
}

impl Catalog {
    pub fn builtin() -> Self {
        let instruments = CATALOG
            .iter()
            .map(|seed| Instrument {
                id: seed.id.to_string(),
                display_name: seed.display_name.to_string(),
                symbol_code: seed.symbol_code.to_string(),
                market: seed.market,
                reference_price: seed.reference_price,
                change_pct: seed.change_pct,
                emoji: seed.emoji.to_string(),
            })
            .collect();
        Self { instruments }
    }

    /// Load a JSON array of instruments.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("invalid catalog {}", path.display()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let instruments: Vec<Instrument> = serde_json::from_str(text)?;
        if instruments.is_empty() {
            bail!("catalog contains no instruments");
        }
        if let Some(bad) = instruments
            .iter()
            .find(|i| !i.reference_price.is_finite() || i.reference_price <= 0.0)
        {
            bail!("instrument {} has a non-positive reference price", bad.id);
        }
        Ok(Self { instruments })
    }

    pub fn for_market(&self, market: Market) -> Vec<&Instrument> {
        self.instruments.iter().filter(|i| i.market == market).collect()
    }

    pub fn first_in(&self, market: Market) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.market == market)
    }

    pub fn find(&self, id: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn builtin_covers_every_market() {
        let catalog = Catalog::builtin();
        for market in Market::iter() {
            assert!(catalog.first_in(market).is_some(), "{:?}", market);
        }
        assert_eq!(catalog.find("btcusdt").map(|i| i.symbol_code.as_str()), Some("BTCUSDT"));
    }

    #[test]
    fn parses_json_catalog() {
        let json = r#"[
            {"id":"x","display_name":"X Corp","symbol_code":"X","market":"foreign_equity","reference_price":12.5}
        ]"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        let x = catalog.find("x").unwrap();
        assert_eq!(x.market, Market::ForeignEquity);
        assert_eq!(x.change_pct, 0.0);
        assert!(x.emoji.is_empty());
    }

    #[test]
    fn rejects_empty_or_bad_prices() {
        assert!(Catalog::from_json_str("[]").is_err());
        let json = r#"[{"id":"x","display_name":"X","symbol_code":"X","market":"crypto","reference_price":0}]"#;
        assert!(Catalog::from_json_str(json).is_err());
    }
}
