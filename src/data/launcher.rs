use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::oneshot;

use crate::config::trade_stream_url;
use crate::data::{
    BackfillProvider, BackfillRequest, BinanceBackfill, FeedEventKind, FeedSink, StreamHandle,
    bars_to_samples, run_trade_stream,
};

/// Starts the network work for a selection. Results come back through the sink.
pub trait FeedLauncher {
    fn start_backfill(&self, request: BackfillRequest, sink: FeedSink);

    fn start_stream(&self, symbol_code: &str, sink: FeedSink) -> StreamHandle;
}

/// Runs backfills and trade streams on a dedicated tokio runtime.
pub struct BinanceLauncher {
    runtime: Runtime,
    provider: Arc<dyn BackfillProvider>,
}

impl BinanceLauncher {
    pub fn new() -> Result<Self> {
        Self::with_provider(Arc::new(BinanceBackfill::default()))
    }

    pub fn with_provider(provider: Arc<dyn BackfillProvider>) -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("feed-runtime")
            .enable_all()
            .build()?;
        Ok(Self { runtime, provider })
    }
}

impl FeedLauncher for BinanceLauncher {
    fn start_backfill(&self, request: BackfillRequest, sink: FeedSink) {
        let provider = self.provider.clone();
        self.runtime.spawn(async move {
            match provider.fetch_bars(&request).await {
                Ok(bars) => {
                    sink.send(FeedEventKind::Backfill(bars_to_samples(&bars)));
                }
                Err(e) => {
                    log::error!("Backfill for {} failed: {:#}", request.symbol_code, e);
                    sink.send(FeedEventKind::BackfillFailed(format!("{:#}", e)));
                }
            }
        });
    }

    fn start_stream(&self, symbol_code: &str, sink: FeedSink) -> StreamHandle {
        let (handle, shutdown) = StreamHandle::new();
        self.runtime
            .spawn(run_trade_stream(trade_stream_url(symbol_code), sink, shutdown));
        handle
    }
}

#[derive(Default)]
struct ManualState {
    backfills: Vec<(BackfillRequest, FeedSink)>,
    streams: Vec<(String, FeedSink, oneshot::Receiver<()>)>,
}

/// Launcher that starts nothing and lets the caller play the network's part.
///
/// Clones share state, so one clone can go into a session while another
/// delivers events and inspects what was requested.
#[derive(Clone, Default)]
pub struct ManualLauncher {
    state: Arc<Mutex<ManualState>>,
}

impl ManualLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn backfill_requests(&self) -> Vec<BackfillRequest> {
        self.lock().backfills.iter().map(|(r, _)| r.clone()).collect()
    }

    pub fn backfill_sink(&self, index: usize) -> Option<FeedSink> {
        self.lock().backfills.get(index).map(|(_, s)| s.clone())
    }

    pub fn stream_symbols(&self) -> Vec<String> {
        self.lock().streams.iter().map(|(s, _, _)| s.clone()).collect()
    }

    pub fn stream_sink(&self, index: usize) -> Option<FeedSink> {
        self.lock().streams.get(index).map(|(_, s, _)| s.clone())
    }

    /// True once the session has let go of stream `index`.
    pub fn stream_cancelled(&self, index: usize) -> bool {
        let mut state = self.lock();
        match state.streams.get_mut(index) {
            Some((_, _, shutdown)) => !matches!(
                shutdown.try_recv(),
                Err(oneshot::error::TryRecvError::Empty)
            ),
            None => false,
        }
    }
}

impl FeedLauncher for ManualLauncher {
    fn start_backfill(&self, request: BackfillRequest, sink: FeedSink) {
        self.lock().backfills.push((request, sink));
    }

    fn start_stream(&self, symbol_code: &str, sink: FeedSink) -> StreamHandle {
        let (handle, shutdown) = StreamHandle::new();
        self.lock()
            .streams
            .push((symbol_code.to_string(), sink, shutdown));
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sample;
    use std::sync::mpsc;

    #[test]
    fn manual_launcher_records_and_delivers() {
        let launcher = ManualLauncher::new();
        let (tx, rx) = mpsc::channel();

        launcher.start_backfill(BackfillRequest::recent("ETHUSDT"), FeedSink::new(3, tx.clone(), None));
        let handle = launcher.start_stream("ETHUSDT", FeedSink::new(3, tx, None));

        assert_eq!(launcher.backfill_requests()[0].symbol_code, "ETHUSDT");
        assert_eq!(launcher.stream_symbols(), vec!["ETHUSDT".to_string()]);
        assert!(!launcher.stream_cancelled(0));

        let sink = launcher.stream_sink(0).unwrap();
        sink.send(FeedEventKind::Tick(Sample::new(1, 1.0)));
        assert_eq!(rx.recv().unwrap().generation, 3);

        drop(handle);
        assert!(launcher.stream_cancelled(0));
    }
}
