use crate::data::StreamHandle;
use crate::domain::{ConnectionState, Instrument};

/// Where the active selection's samples come from.
#[derive(Debug, Default)]
pub enum TickSource {
    /// Nothing selected yet.
    #[default]
    Idle,
    /// Live trade subscription. Dropping the handle ends it.
    Streaming(StreamHandle),
    /// One random-walk backfill, then silence until the next selection.
    Synthetic,
}

impl TickSource {
    /// Whether `instrument` gets a live subscription. `offline` forces synthetic data everywhere.
    pub fn wants_stream(instrument: &Instrument, offline: bool) -> bool {
        !offline && instrument.market.supports_streaming()
    }

    pub fn is_streaming(&self) -> bool {
        matches!(self, Self::Streaming(_))
    }

    /// Connection state a freshly selected source starts in.
    pub fn initial_connection(&self) -> ConnectionState {
        match self {
            Self::Streaming(_) => ConnectionState::Connecting,
            Self::Idle | Self::Synthetic => ConnectionState::Closed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Streaming(_) => "Live",
            Self::Synthetic => "Simulated",
        }
    }

    /// Cancel any live subscription and return to `Idle`.
    pub fn stop(&mut self) {
        if let Self::Streaming(handle) = self {
            handle.close();
        }
        *self = Self::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Market;

    fn instrument(market: Market) -> Instrument {
        Instrument {
            id: "x".into(),
            display_name: "X".into(),
            symbol_code: "X".into(),
            market,
            reference_price: 1.0,
            change_pct: 0.0,
            emoji: String::new(),
        }
    }

    #[test]
    fn only_streaming_markets_want_a_stream() {
        assert!(TickSource::wants_stream(&instrument(Market::Crypto), false));
        assert!(!TickSource::wants_stream(&instrument(Market::Crypto), true));
        assert!(!TickSource::wants_stream(&instrument(Market::DomesticEquity), false));
        assert!(!TickSource::wants_stream(&instrument(Market::ForeignEquity), false));
    }

    #[test]
    fn stop_cancels_subscription() {
        let (handle, mut shutdown) = StreamHandle::new();
        let mut source = TickSource::Streaming(handle);
        assert_eq!(source.initial_connection(), ConnectionState::Connecting);
        source.stop();
        assert!(!source.is_streaming());
        assert_eq!(shutdown.try_recv(), Ok(()));
    }
}
