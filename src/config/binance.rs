use crate::utils::TimeUtils;

#[derive(Debug, Clone, Copy)]
pub struct BinanceApiConfig {
    pub timeout_ms: u64,
    pub retries: u32,
    pub backoff_ms: u64,
}

impl Default for BinanceApiConfig {
    fn default() -> Self {
        Self {
            timeout_ms: BINANCE.client.timeout_ms,
            retries: BINANCE.client.retries,
            backoff_ms: BINANCE.client.backoff_ms,
        }
    }
}

/// Historical bars loaded once per streaming selection, before live ticks.
pub struct BackfillLimits {
    pub interval_ms: i64,
    pub limit: i32,
}

pub struct WsConfig {
    /// Raw single-stream endpoint. The stream name is appended directly.
    pub base_url: &'static str,
    pub trade_stream_suffix: &'static str,
}

pub struct ClientDefaults {
    pub timeout_ms: u64,
    pub retries: u32,
    pub backoff_ms: u64,
}

pub struct BinanceConfig {
    pub backfill: BackfillLimits,
    pub ws: WsConfig,
    pub client: ClientDefaults,
}

pub const BINANCE: BinanceConfig = BinanceConfig {
    backfill: BackfillLimits {
        interval_ms: TimeUtils::MS_IN_MIN,
        limit: 60,
    },
    ws: WsConfig {
        base_url: "wss://stream.binance.com:9443/ws/",
        trade_stream_suffix: "@trade",
    },
    client: ClientDefaults {
        timeout_ms: 5000,
        retries: 2,
        backoff_ms: 1000,
    },
};

/// Full websocket URL for the trade stream of `symbol_code` (e.g. `BTCUSDT`).
pub fn trade_stream_url(symbol_code: &str) -> String {
    format!(
        "{}{}{}",
        BINANCE.ws.base_url,
        symbol_code.to_lowercase(),
        BINANCE.ws.trade_stream_suffix
    )
}
