use serde::{Deserialize, Serialize};

use crate::domain::Market;

/// Read-only reference data for something the user can chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub id: String,
    pub display_name: String,
    /// Exchange symbol, e.g. `BTCUSDT` or `2222`.
    pub symbol_code: String,
    pub market: Market,
    /// Last known price. Seeds the synthetic walk for non-streaming markets.
    pub reference_price: f64,
    #[serde(default)]
    pub change_pct: f64,
    #[serde(default)]
    pub emoji: String,
}

impl Instrument {
    pub fn label(&self) -> String {
        if self.emoji.is_empty() {
            self.display_name.clone()
        } else {
            format!("{} {}", self.emoji, self.display_name)
        }
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name, self.symbol_code)
    }
}
