use {
    anyhow::{Context, Result},
    async_trait::async_trait,
    binance_sdk::{
        config::ConfigurationRestApi,
        errors::ConnectorError,
        spot::{
            SpotRestApi,
            rest_api::{KlinesIntervalEnum, KlinesItemInner, KlinesParams, RestApi},
        },
    },
    std::{convert::TryFrom, error::Error, fmt},
};

use crate::{
    config::{BINANCE, BinanceApiConfig},
    domain::Sample,
    utils::TimeUtils,
};

#[cfg(debug_assertions)]
use crate::config::DF;

/// One historical fetch: the most recent `limit` bars of `interval_ms` for `symbol_code`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackfillRequest {
    pub symbol_code: String,
    pub interval_ms: i64,
    pub limit: i32,
}

impl BackfillRequest {
    /// The standard pre-stream load for a live instrument.
    pub fn recent(symbol_code: &str) -> Self {
        Self {
            symbol_code: symbol_code.to_string(),
            interval_ms: BINANCE.backfill.interval_ms,
            limit: BINANCE.backfill.limit,
        }
    }
}

/// The two columns of a kline we keep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub open_time_ms: i64,
    pub close: f64,
}

#[derive(Debug)]
pub enum BackfillError {
    UnsupportedInterval(i64),
    InvalidRow(String),
    ConnectionFailed(String),
}

impl fmt::Display for BackfillError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BackfillError::UnsupportedInterval(ms) => write!(f, "Unsupported interval: {}ms", ms),
            BackfillError::InvalidRow(what) => write!(f, "Invalid kline row: {}", what),
            BackfillError::ConnectionFailed(msg) => {
                write!(f, "Binance API connection failed: {}.", msg)
            }
        }
    }
}

impl Error for BackfillError {}

pub fn try_interval_from_ms(ms: i64) -> Result<KlinesIntervalEnum, BackfillError> {
    use TimeUtils as T;
    match ms {
        T::MS_IN_S => Ok(KlinesIntervalEnum::Interval1s),
        T::MS_IN_MIN => Ok(KlinesIntervalEnum::Interval1m),
        T::MS_IN_3_MIN => Ok(KlinesIntervalEnum::Interval3m),
        T::MS_IN_5_MIN => Ok(KlinesIntervalEnum::Interval5m),
        T::MS_IN_15_MIN => Ok(KlinesIntervalEnum::Interval15m),
        T::MS_IN_30_MIN => Ok(KlinesIntervalEnum::Interval30m),
        T::MS_IN_H => Ok(KlinesIntervalEnum::Interval1h),
        T::MS_IN_4_H => Ok(KlinesIntervalEnum::Interval4h),
        T::MS_IN_D => Ok(KlinesIntervalEnum::Interval1d),
        _ => Err(BackfillError::UnsupportedInterval(ms)),
    }
}

impl TryFrom<Vec<KlinesItemInner>> for Bar {
    type Error = BackfillError;

    fn try_from(row: Vec<KlinesItemInner>) -> Result<Self, Self::Error> {
        let mut items = row.into_iter();

        let open_time_ms = match items.next() {
            Some(KlinesItemInner::Integer(t)) => t,
            Some(_) => return Err(BackfillError::InvalidRow("open_time type".to_string())),
            None => return Err(BackfillError::InvalidRow("empty row".to_string())),
        };

        // open, high, low, then close
        let close = match items.nth(3) {
            Some(KlinesItemInner::String(s)) => s
                .parse::<f64>()
                .map_err(|_| BackfillError::InvalidRow(format!("close '{}'", s)))?,
            Some(_) => return Err(BackfillError::InvalidRow("close type".to_string())),
            None => return Err(BackfillError::InvalidRow("row too short".to_string())),
        };

        Ok(Bar {
            open_time_ms,
            close,
        })
    }
}

pub fn convert_rows(rows: Vec<Vec<KlinesItemInner>>) -> Result<Vec<Bar>, BackfillError> {
    rows.into_iter().map(Bar::try_from).collect()
}

/// Bars map 1:1 onto samples (open time, close price), keeping order.
pub fn bars_to_samples(bars: &[Bar]) -> Vec<Sample> {
    bars.iter()
        .map(|b| Sample::new(b.open_time_ms, b.close))
        .collect()
}

/// Source of historical bars for a live instrument.
#[async_trait]
pub trait BackfillProvider: Send + Sync {
    async fn fetch_bars(&self, request: &BackfillRequest) -> Result<Vec<Bar>>;
}

/// Spot klines from the Binance REST API.
#[derive(Debug, Default)]
pub struct BinanceBackfill {
    config: BinanceApiConfig,
}

impl BinanceBackfill {
    pub fn new(config: BinanceApiConfig) -> Self {
        Self { config }
    }

    fn client(&self) -> Result<RestApi> {
        let rest_conf = ConfigurationRestApi::builder()
            .timeout(self.config.timeout_ms)
            .retries(self.config.retries)
            .backoff(self.config.backoff_ms)
            .build()?;
        Ok(SpotRestApi::production(rest_conf))
    }
}

#[async_trait]
impl BackfillProvider for BinanceBackfill {
    async fn fetch_bars(&self, request: &BackfillRequest) -> Result<Vec<Bar>> {
        let rest_client = self.client()?;

        let params = KlinesParams::builder(
            request.symbol_code.to_uppercase(),
            try_interval_from_ms(request.interval_ms)?,
        )
        .limit(request.limit)
        .build()?;

        #[cfg(debug_assertions)]
        if DF.log_backfill {
            log::info!(
                "Backfill request: {} {} x{}",
                request.symbol_code,
                TimeUtils::interval_to_string(request.interval_ms),
                request.limit
            );
        }

        let rows = match rest_client.klines(params).await {
            Ok(response) => response.data().await?,
            Err(e) => {
                let msg = match e.downcast_ref::<ConnectorError>() {
                    Some(ConnectorError::TooManyRequestsError(msg)) => {
                        log::warn!("{} Rate limit exceeded. {}", request.symbol_code, msg);
                        msg.to_string()
                    }
                    Some(ConnectorError::NetworkError(msg)) => {
                        log::error!(
                            "{} Network error: Check your internet connection. {}",
                            request.symbol_code,
                            msg
                        );
                        msg.to_string()
                    }
                    Some(other) => {
                        log::error!("{} Binance error: {}", request.symbol_code, other);
                        other.to_string()
                    }
                    None => {
                        log::error!("{} Unexpected backfill error: {:#}", request.symbol_code, e);
                        e.to_string()
                    }
                };
                return Err(anyhow::Error::new(BackfillError::ConnectionFailed(msg))
                    .context(format!("Backfill failed for {}", request.symbol_code)));
            }
        };

        let bars = convert_rows(rows)
            .with_context(|| format!("{} klines could not be converted", request.symbol_code))?;

        #[cfg(debug_assertions)]
        if DF.log_backfill {
            log::info!("Backfill for {}: {} bars", request.symbol_code, bars.len());
        }

        Ok(bars)
    }
}
