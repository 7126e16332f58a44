use std::{error::Error, fmt};

use futures::StreamExt;
use serde::Deserialize;
use tokio::sync::oneshot;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::data::{FeedEventKind, FeedSink};
use crate::domain::{ConnectionState, Sample};

#[cfg(debug_assertions)]
use crate::config::DF;

/// Venues send numbers either as JSON numbers or as numeric strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Numeric {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Numeric::Int(i) => Some(*i as f64),
            Numeric::Float(f) => Some(*f),
            Numeric::Text(s) => s.trim().parse().ok(),
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            Numeric::Int(i) => Some(*i),
            Numeric::Float(f) if f.is_finite() => Some(*f as i64),
            Numeric::Float(_) => None,
            Numeric::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Fields of a trade event we consume. Everything else is ignored.
#[derive(Debug, Deserialize)]
struct TradeMessage {
    #[serde(rename = "p")]
    price: Option<Numeric>,
    #[serde(rename = "T")]
    trade_time: Option<Numeric>,
    #[serde(rename = "E")]
    event_time: Option<Numeric>,
}

#[derive(Debug, PartialEq)]
pub enum TradeParseError {
    InvalidJson(String),
    MissingPrice,
    InvalidPrice,
    MissingTime,
}

impl fmt::Display for TradeParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TradeParseError::InvalidJson(msg) => write!(f, "Invalid trade JSON: {}", msg),
            TradeParseError::MissingPrice => write!(f, "Trade message has no price"),
            TradeParseError::InvalidPrice => write!(f, "Trade price is not a positive number"),
            TradeParseError::MissingTime => write!(f, "Trade message has no usable time"),
        }
    }
}

impl Error for TradeParseError {}

/// Normalise one inbound trade message into a `Sample`.
pub fn parse_trade_message(text: &str) -> Result<Sample, TradeParseError> {
    let msg: TradeMessage =
        serde_json::from_str(text).map_err(|e| TradeParseError::InvalidJson(e.to_string()))?;

    let price = msg
        .price
        .as_ref()
        .ok_or(TradeParseError::MissingPrice)?
        .as_f64()
        .filter(|p| p.is_finite() && *p > 0.0)
        .ok_or(TradeParseError::InvalidPrice)?;

    let time = msg
        .trade_time
        .as_ref()
        .and_then(Numeric::as_i64)
        .or_else(|| msg.event_time.as_ref().and_then(Numeric::as_i64))
        .ok_or(TradeParseError::MissingTime)?;

    Ok(Sample::new(time, price))
}

/// Read one trade stream until it closes, errors, or `shutdown` fires.
///
/// Reports `Connecting`, then `Open`, a `Tick` per valid message, and finally
/// `Closed` or `Errored`. There is no reconnect: the stream is finished when
/// this returns.
pub async fn run_trade_stream(url: String, sink: FeedSink, mut shutdown: oneshot::Receiver<()>) {
    sink.send(FeedEventKind::Connection(ConnectionState::Connecting));

    let connect = tokio::select! {
        res = connect_async(url.as_str()) => res,
        _ = &mut shutdown => return,
    };

    let ws_stream = match connect {
        Ok((ws_stream, _)) => ws_stream,
        Err(e) => {
            log::error!("WebSocket connection to {} failed: {}", url, e);
            sink.send(FeedEventKind::Connection(ConnectionState::Errored));
            return;
        }
    };

    #[cfg(debug_assertions)]
    if DF.log_session {
        log::info!("Trade stream open: {} (generation {})", url, sink.generation());
    }
    sink.send(FeedEventKind::Connection(ConnectionState::Open));

    let (_write, mut read) = ws_stream.split();

    let final_state = loop {
        let msg = tokio::select! {
            msg = read.next() => msg,
            _ = &mut shutdown => {
                #[cfg(debug_assertions)]
                if DF.log_session {
                    log::info!("Trade stream for generation {} cancelled", sink.generation());
                }
                return;
            }
        };

        match msg {
            Some(Ok(Message::Text(text))) => match parse_trade_message(&text) {
                Ok(sample) => {
                    #[cfg(debug_assertions)]
                    if DF.log_stream_ticks {
                        log::info!("[trade] {} @ {:.6}", sample.time, sample.price);
                    }
                    if !sink.send(FeedEventKind::Tick(sample)) {
                        // Session is gone.
                        return;
                    }
                }
                Err(e) => log::warn!("Dropping trade message: {}", e),
            },
            Some(Ok(Message::Close(_))) | None => break ConnectionState::Closed,
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                log::error!("WebSocket error: {}", e);
                break ConnectionState::Errored;
            }
        }
    };

    sink.send(FeedEventKind::Connection(final_state));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_binance_trade_event() {
        let text = r#"{"e":"trade","E":1700000000100,"s":"BTCUSDT","t":1,"p":"43250.12000000","q":"0.01","T":1700000000099,"m":true}"#;
        let sample = parse_trade_message(text).unwrap();
        assert_eq!(sample.time, 1_700_000_000_099);
        assert!((sample.price - 43250.12).abs() < 1e-9);
    }

    #[test]
    fn accepts_numeric_fields_and_event_time_fallback() {
        let sample = parse_trade_message(r#"{"p":101.5,"E":2000}"#).unwrap();
        assert_eq!(sample, Sample::new(2000, 101.5));
        let sample = parse_trade_message(r#"{"p":"100","T":"1000"}"#).unwrap();
        assert_eq!(sample, Sample::new(1000, 100.0));
    }

    #[test]
    fn rejects_malformed_messages() {
        assert!(matches!(
            parse_trade_message("not json"),
            Err(TradeParseError::InvalidJson(_))
        ));
        assert_eq!(
            parse_trade_message(r#"{"T":1}"#),
            Err(TradeParseError::MissingPrice)
        );
        assert_eq!(
            parse_trade_message(r#"{"p":"abc","T":1}"#),
            Err(TradeParseError::InvalidPrice)
        );
        assert_eq!(
            parse_trade_message(r#"{"p":"-1","T":1}"#),
            Err(TradeParseError::InvalidPrice)
        );
        assert_eq!(
            parse_trade_message(r#"{"p":"1.0"}"#),
            Err(TradeParseError::MissingTime)
        );
    }

    #[test]
    fn subscription_ack_is_not_a_trade() {
        assert!(parse_trade_message(r#"{"result":null,"id":1}"#).is_err());
    }
}
