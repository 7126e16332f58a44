use std::{fmt, sync::Arc, sync::mpsc::Sender};

use tokio::sync::oneshot;

use crate::domain::{ConnectionState, Sample};

/// Called after every delivered event so the UI thread wakes up and drains the channel.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Something a background task learned about one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEvent {
    /// Selection this event belongs to. Stale generations are dropped by the session.
    pub generation: u64,
    pub kind: FeedEventKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedEventKind {
    Backfill(Vec<Sample>),
    BackfillFailed(String),
    Connection(ConnectionState),
    Tick(Sample),
}

/// Sending half handed to a background task, stamped with its generation.
#[derive(Clone)]
pub struct FeedSink {
    generation: u64,
    tx: Sender<FeedEvent>,
    waker: Option<Waker>,
}

impl FeedSink {
    pub fn new(generation: u64, tx: Sender<FeedEvent>, waker: Option<Waker>) -> Self {
        Self {
            generation,
            tx,
            waker,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// False once the receiving session has gone away.
    pub fn send(&self, kind: FeedEventKind) -> bool {
        let delivered = self
            .tx
            .send(FeedEvent {
                generation: self.generation,
                kind,
            })
            .is_ok();
        if delivered {
            if let Some(wake) = &self.waker {
                wake();
            }
        }
        delivered
    }
}

impl fmt::Debug for FeedSink {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FeedSink")
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

/// Owner's end of a live subscription. Dropping it (or calling `close`)
/// tells the stream task to stop.
#[derive(Debug, Default)]
pub struct StreamHandle {
    shutdown: Option<oneshot::Sender<()>>,
}

impl StreamHandle {
    pub fn new() -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        (Self { shutdown: Some(tx) }, rx)
    }

    /// A handle with no task behind it.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn close(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            // The task may already have finished.
            let _ = tx.send(());
        }
    }

    pub fn is_closed(&self) -> bool {
        self.shutdown.as_ref().is_none_or(|tx| tx.is_closed())
    }
}

impl Drop for StreamHandle {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;

    #[test]
    fn sink_stamps_generation_and_wakes() {
        let (tx, rx) = mpsc::channel();
        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = wakes.clone();
        let sink = FeedSink::new(
            7,
            tx,
            Some(Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })),
        );
        assert!(sink.send(FeedEventKind::Tick(Sample::new(1, 2.0))));
        let event = rx.recv().unwrap();
        assert_eq!(event.generation, 7);
        assert_eq!(wakes.load(Ordering::SeqCst), 1);

        drop(rx);
        assert!(!sink.send(FeedEventKind::Connection(ConnectionState::Closed)));
        assert_eq!(wakes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropping_handle_signals_shutdown() {
        let (handle, mut rx) = StreamHandle::new();
        assert!(rx.try_recv().is_err());
        drop(handle);
        assert_eq!(rx.try_recv(), Ok(()));
    }

    #[test]
    fn detached_handle_is_closed() {
        assert!(StreamHandle::detached().is_closed());
    }
}
