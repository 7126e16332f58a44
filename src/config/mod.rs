//! Configuration module for the live chart.

mod binance;
mod catalog;
mod chart;
mod debug;

// Can't be private because we don't re-export it
pub mod plot;

// Re-export commonly used items
pub use binance::{BINANCE, BinanceApiConfig, trade_stream_url};
pub use catalog::{CATALOG, InstrumentSeed};
pub use chart::{CHART, ChartConfig, Padding};
pub use debug::DF;
pub use plot::PLOT_CONFIG;
