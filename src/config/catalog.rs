//! Built-in instrument catalog, used when no `--catalog` file is given.

use crate::domain::Market;

pub struct InstrumentSeed {
    pub id: &'static str,
    pub display_name: &'static str,
    pub symbol_code: &'static str,
    pub market: Market,
    pub reference_price: f64,
    pub change_pct: f64,
    pub emoji: &'static str,
}

pub const CATALOG: &[InstrumentSeed] = &[
    // --- CRYPTO (live trade stream) ---
    InstrumentSeed {
        id: "btcusdt",
        display_name: "Bitcoin",
        symbol_code: "BTCUSDT",
        market: Market::Crypto,
        reference_price: 97_000.0,
        change_pct: 0.0,
        emoji: "₿",
    },
    InstrumentSeed {
        id: "ethusdt",
        display_name: "Ethereum",
        symbol_code: "ETHUSDT",
        market: Market::Crypto,
        reference_price: 3_400.0,
        change_pct: 0.0,
        emoji: "Ξ",
    },
    InstrumentSeed {
        id: "bnbusdt",
        display_name: "BNB",
        symbol_code: "BNBUSDT",
        market: Market::Crypto,
        reference_price: 690.0,
        change_pct: 0.0,
        emoji: "🔶",
    },
    InstrumentSeed {
        id: "solusdt",
        display_name: "Solana",
        symbol_code: "SOLUSDT",
        market: Market::Crypto,
        reference_price: 190.0,
        change_pct: 0.0,
        emoji: "◎",
    },
    // --- DOMESTIC EQUITIES (synthetic) ---
    InstrumentSeed {
        id: "2222",
        display_name: "Aramco",
        symbol_code: "2222",
        market: Market::DomesticEquity,
        reference_price: 27.85,
        change_pct: -0.36,
        emoji: "🛢",
    },
    InstrumentSeed {
        id: "1120",
        display_name: "Al Rajhi Bank",
        symbol_code: "1120",
        market: Market::DomesticEquity,
        reference_price: 98.40,
        change_pct: 0.82,
        emoji: "🏦",
    },
    InstrumentSeed {
        id: "2010",
        display_name: "SABIC",
        symbol_code: "2010",
        market: Market::DomesticEquity,
        reference_price: 66.10,
        change_pct: -1.12,
        emoji: "🧪",
    },
    InstrumentSeed {
        id: "7010",
        display_name: "STC",
        symbol_code: "7010",
        market: Market::DomesticEquity,
        reference_price: 41.25,
        change_pct: 0.24,
        emoji: "📡",
    },
    // --- FOREIGN EQUITIES (synthetic) ---
    InstrumentSeed {
        id: "aapl",
        display_name: "Apple",
        symbol_code: "AAPL",
        market: Market::ForeignEquity,
        reference_price: 229.87,
        change_pct: 0.54,
        emoji: "🍎",
    },
    InstrumentSeed {
        id: "msft",
        display_name: "Microsoft",
        symbol_code: "MSFT",
        market: Market::ForeignEquity,
        reference_price: 417.30,
        change_pct: -0.21,
        emoji: "🪟",
    },
    InstrumentSeed {
        id: "nvda",
        display_name: "NVIDIA",
        symbol_code: "NVDA",
        market: Market::ForeignEquity,
        reference_price: 138.25,
        change_pct: 2.31,
        emoji: "🟩",
    },
    InstrumentSeed {
        id: "tsla",
        display_name: "Tesla",
        symbol_code: "TSLA",
        market: Market::ForeignEquity,
        reference_price: 352.56,
        change_pct: -1.87,
        emoji: "🚗",
    },
];
