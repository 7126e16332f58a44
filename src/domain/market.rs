use chrono::{Datelike, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// Trading venue group an instrument belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Market {
    #[default]
    Crypto,
    #[value(alias = "domestic")]
    DomesticEquity,
    #[value(alias = "foreign")]
    ForeignEquity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketStatus {
    pub is_open: bool,
    pub label: &'static str,
}

impl MarketStatus {
    const ALWAYS_OPEN: Self = Self {
        is_open: true,
        label: "Open 24/7",
    };
    const OPEN: Self = Self {
        is_open: true,
        label: "Open",
    };
    const CLOSED: Self = Self {
        is_open: false,
        label: "Closed",
    };
}

impl Market {
    /// Markets with a live quote stream. Everything else is charted from a synthetic walk.
    pub fn supports_streaming(&self) -> bool {
        matches!(self, Self::Crypto)
    }

    pub fn tab_label(&self) -> &'static str {
        match self {
            Self::Crypto => "Crypto",
            Self::DomesticEquity => "Domestic",
            Self::ForeignEquity => "Foreign",
        }
    }

    /// Trading-hours status for a wall-clock moment (display timezone).
    ///
    /// Domestic equities trade Sunday to Thursday 10:00-15:20, foreign equities
    /// Monday to Friday from 17:30 until midnight.
    pub fn status_at(&self, weekday: Weekday, hour: u32, minute: u32) -> MarketStatus {
        let minutes = hour * 60 + minute;
        match self {
            Self::Crypto => MarketStatus::ALWAYS_OPEN,
            Self::DomesticEquity => {
                let trading_day = matches!(
                    weekday,
                    Weekday::Sun | Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu
                );
                if trading_day && (10 * 60..=15 * 60 + 20).contains(&minutes) {
                    MarketStatus::OPEN
                } else {
                    MarketStatus::CLOSED
                }
            }
            Self::ForeignEquity => {
                let trading_day = !matches!(weekday, Weekday::Sat | Weekday::Sun);
                if trading_day && minutes >= 17 * 60 + 30 {
                    MarketStatus::OPEN
                } else {
                    MarketStatus::CLOSED
                }
            }
        }
    }

    pub fn status_now(&self) -> MarketStatus {
        let now = chrono::Local::now();
        self.status_at(now.weekday(), now.hour(), now.minute())
    }

    /// Header price string, e.g. `$1,234.56` or `1,234.56 SAR`.
    pub fn format_price(&self, price: Option<f64>) -> String {
        match price {
            Some(p) if p > 0.0 => {
                let amount = format_thousands(p, 2);
                match self {
                    Self::DomesticEquity => format!("{} SAR", amount),
                    Self::Crypto | Self::ForeignEquity => format!("${}", amount),
                }
            }
            _ => "---".to_string(),
        }
    }
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Crypto => write!(f, "Crypto"),
            Self::DomesticEquity => write!(f, "Domestic Equities"),
            Self::ForeignEquity => write!(f, "Foreign Equities"),
        }
    }
}

fn format_thousands(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}
