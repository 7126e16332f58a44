mod backfill;
mod feed;
mod launcher;
mod synthetic;
mod tick_source;
mod trade_stream;

pub use {
    backfill::{
        BackfillError, BackfillProvider, BackfillRequest, Bar, BinanceBackfill, bars_to_samples,
        convert_rows, try_interval_from_ms,
    },
    feed::{FeedEvent, FeedEventKind, FeedSink, StreamHandle, Waker},
    launcher::{BinanceLauncher, FeedLauncher, ManualLauncher},
    synthetic::{synthetic_backfill, synthetic_walk},
    tick_source::TickSource,
    trade_stream::{TradeParseError, parse_trade_message, run_trade_stream},
};
