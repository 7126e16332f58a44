use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use rand::{SeedableRng, rngs::StdRng};

use crate::chart::{CursorState, HoverState, InteractionController, RenderFrame, SurfaceSize};
use crate::config::CHART;
use crate::data::{
    BackfillRequest, FeedEvent, FeedEventKind, FeedLauncher, FeedSink, TickSource, Waker,
    synthetic_backfill,
};
use crate::domain::{ConnectionState, Instrument, Market, Sample};
use crate::models::{ActivityKind, ActivityLog, Catalog, Quote, QuoteBoard, TimeSeriesWindow};
use crate::utils::TimeUtils;

#[cfg(debug_assertions)]
use crate::config::DF;

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Chart every market from synthetic data, never opening a network connection.
    pub offline: bool,
    /// Fixed seed for synthetic walks. Random when `None`.
    pub seed: Option<u64>,
}

/// Owns everything the chart shows for the current `{market, instrument}`
/// selection and switches it atomically.
///
/// Every selection bumps `generation`. Background work reports back with the
/// generation it was started for, and anything older than the current one is
/// dropped on arrival.
pub struct ChartSession {
    generation: u64,
    market: Market,
    instrument: Option<Instrument>,
    source: TickSource,
    window: TimeSeriesWindow,
    connection: ConnectionState,
    interaction: InteractionController,

    /// Live ticks held back until the backfill for this generation resolves.
    backfill_pending: bool,
    pending_ticks: Vec<Sample>,

    last_price: Option<f64>,
    change_pct: f64,
    pulse_until: Option<Instant>,
    tick_count: u64,

    quotes: QuoteBoard,
    activity: ActivityLog,

    tx: Sender<FeedEvent>,
    rx: Receiver<FeedEvent>,
    launcher: Box<dyn FeedLauncher>,
    waker: Option<Waker>,
    offline: bool,
    rng: StdRng,
}

impl ChartSession {
    pub fn new(launcher: Box<dyn FeedLauncher>, options: SessionOptions) -> Self {
        let (tx, rx) = mpsc::channel();
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            generation: 0,
            market: Market::default(),
            instrument: None,
            source: TickSource::Idle,
            window: TimeSeriesWindow::default(),
            connection: ConnectionState::Closed,
            interaction: InteractionController::new(),
            backfill_pending: false,
            pending_ticks: Vec::new(),
            last_price: None,
            change_pct: 0.0,
            pulse_until: None,
            tick_count: 0,
            quotes: QuoteBoard::new(),
            activity: ActivityLog::default(),
            tx,
            rx,
            launcher,
            waker: None,
            offline: options.offline,
            rng,
        }
    }

    /// Called after each event a background task delivers (typically a repaint request).
    pub fn set_waker(&mut self, waker: Waker) {
        self.waker = Some(waker);
    }

    /// Switch market tab and select its first instrument.
    pub fn select_market(&mut self, market: Market, catalog: &Catalog) {
        if market == self.market && self.instrument.is_some() {
            return;
        }
        self.activity
            .push(ActivityKind::Info, format!("Switched market to {}", market));
        match catalog.first_in(market) {
            Some(instrument) => self.select(instrument),
            None => {
                self.teardown();
                self.market = market;
                self.instrument = None;
                self.activity.push(
                    ActivityKind::Warning,
                    format!("No instruments listed for {}", market),
                );
            }
        }
    }

    pub fn select(&mut self, instrument: &Instrument) {
        self.select_at(instrument, TimeUtils::now_timestamp_ms());
    }

    /// Selection change with an explicit wall clock (synthetic history ends at `now_ms`).
    pub fn select_at(&mut self, instrument: &Instrument, now_ms: i64) {
        self.teardown();

        #[cfg(debug_assertions)]
        if DF.log_session {
            log::info!(
                "Selecting {} ({}), generation {}",
                instrument,
                instrument.market,
                self.generation
            );
        }

        self.market = instrument.market;
        self.instrument = Some(instrument.clone());
        self.change_pct = instrument.change_pct;
        self.activity.push(
            ActivityKind::Info,
            format!("Selected {}", instrument.display_name),
        );

        if TickSource::wants_stream(instrument, self.offline) {
            self.backfill_pending = true;
            self.launcher.start_backfill(
                BackfillRequest::recent(&instrument.symbol_code),
                self.sink(),
            );
            let handle = self
                .launcher
                .start_stream(&instrument.symbol_code, self.sink());
            self.source = TickSource::Streaming(handle);
            self.activity.push(
                ActivityKind::Info,
                format!("Connecting to {}...", instrument.display_name),
            );
        } else {
            let samples = synthetic_backfill(instrument.reference_price, now_ms, &mut self.rng);
            self.window.extend(samples);
            self.last_price = Some(instrument.reference_price);
            self.source = TickSource::Synthetic;
            self.activity.push(
                ActivityKind::Info,
                format!(
                    "Loaded {}: {}",
                    instrument.display_name,
                    instrument.market.format_price(Some(instrument.reference_price))
                ),
            );
        }
        self.connection = self.source.initial_connection();
    }

    /// Drop the current selection's source and data, and move to a new generation.
    fn teardown(&mut self) {
        self.source.stop();
        self.generation += 1;
        self.window.reset();
        self.interaction.reset();
        self.backfill_pending = false;
        self.pending_ticks.clear();
        self.last_price = None;
        self.change_pct = 0.0;
        self.pulse_until = None;
        self.tick_count = 0;
        self.connection = ConnectionState::Closed;
    }

    fn sink(&self) -> FeedSink {
        FeedSink::new(self.generation, self.tx.clone(), self.waker.clone())
    }

    /// Apply every event waiting in the channel, in delivery order. Returns how many were applied.
    pub fn pump(&mut self, now: Instant) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.rx.try_recv() {
            if self.handle_event(event, now) {
                applied += 1;
            }
        }
        applied
    }

    /// Apply one event. Returns `false` when it belonged to an older selection.
    pub fn handle_event(&mut self, event: FeedEvent, now: Instant) -> bool {
        if event.generation != self.generation {
            #[cfg(debug_assertions)]
            if DF.log_session {
                log::info!(
                    "Dropping stale event for generation {} (current {})",
                    event.generation,
                    self.generation
                );
            }
            return false;
        }

        match event.kind {
            FeedEventKind::Backfill(samples) => self.finish_backfill(samples, now),
            FeedEventKind::BackfillFailed(reason) => {
                log::warn!("Backfill failed, continuing with live data only: {}", reason);
                self.activity
                    .push(ActivityKind::Error, "History unavailable, showing live data only");
                self.finish_backfill(Vec::new(), now);
            }
            FeedEventKind::Connection(state) => self.set_connection(state),
            FeedEventKind::Tick(sample) => {
                if self.backfill_pending {
                    self.pending_ticks.push(sample);
                } else {
                    self.apply_tick(sample, now);
                }
            }
        }
        true
    }

    fn finish_backfill(&mut self, samples: Vec<Sample>, now: Instant) {
        if !samples.is_empty() {
            self.activity.push(
                ActivityKind::Success,
                format!("Loaded {} historical bars", samples.len()),
            );
        }
        self.last_price = samples.last().map(|s| s.price).or(self.last_price);
        self.window.extend(samples);
        self.backfill_pending = false;

        for sample in std::mem::take(&mut self.pending_ticks) {
            self.apply_tick(sample, now);
        }
    }

    fn apply_tick(&mut self, sample: Sample, now: Instant) {
        self.window.append(sample);

        if let Some(prev) = self.last_price {
            if prev != sample.price {
                if prev != 0.0 {
                    self.change_pct = (sample.price - prev) / prev * 100.0;
                }
                self.pulse_until = Some(now + CHART.pulse);
            }
        }
        self.last_price = Some(sample.price);

        let Some(instrument) = &self.instrument else {
            return;
        };
        self.quotes.publish(&Quote {
            symbol_code: instrument.symbol_code.clone(),
            price: sample.price,
            time: sample.time,
            change_pct: self.change_pct,
        });

        self.tick_count += 1;
        if self.tick_count % CHART.price_log_every.max(1) == 0 {
            let message = format!(
                "{}: {}",
                instrument.display_name,
                instrument.market.format_price(Some(sample.price))
            );
            self.activity.push(ActivityKind::Price, message);
        }
    }

    fn set_connection(&mut self, state: ConnectionState) {
        if state == self.connection {
            return;
        }
        self.connection = state;
        let (kind, message) = match state {
            ConnectionState::Connecting => return,
            ConnectionState::Open => (ActivityKind::Success, "Connected to live trade stream"),
            ConnectionState::Closed => (ActivityKind::Warning, "Live stream disconnected"),
            ConnectionState::Errored => (ActivityKind::Error, "Live stream connection error"),
        };
        self.activity.push(kind, message);
    }

    pub fn pointer_moved(&mut self, pixel_x: f32, pixel_y: f32, size: SurfaceSize) -> bool {
        self.interaction
            .pointer_moved(pixel_x, pixel_y, self.window.len(), size, &CHART.padding)
    }

    pub fn pointer_left(&mut self) -> bool {
        self.interaction.pointer_left()
    }

    pub fn render_frame(&self, size: SurfaceSize, now: Instant) -> RenderFrame<'_> {
        RenderFrame {
            samples: self.window.snapshot(),
            size,
            cursor: self.interaction.cursor(),
            connection: self.connection,
            market: self.market,
            pulsing: self.is_pulsing(now),
            reference_levels: &[],
        }
    }

    pub fn is_pulsing(&self, now: Instant) -> bool {
        self.pulse_until.is_some_and(|until| now < until)
    }

    /// When the current pulse ends, if one is running.
    pub fn pulse_deadline(&self) -> Option<Instant> {
        self.pulse_until
    }

    pub fn subscribe_quotes(&mut self) -> Receiver<Quote> {
        self.quotes.subscribe()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn market(&self) -> Market {
        self.market
    }

    pub fn instrument(&self) -> Option<&Instrument> {
        self.instrument.as_ref()
    }

    pub fn window(&self) -> &TimeSeriesWindow {
        &self.window
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn source(&self) -> &TickSource {
        &self.source
    }

    pub fn cursor(&self) -> &CursorState {
        self.interaction.cursor()
    }

    pub fn hover(&self) -> HoverState {
        self.interaction.state()
    }

    pub fn last_price(&self) -> Option<f64> {
        self.last_price
    }

    pub fn change_pct(&self) -> f64 {
        self.change_pct
    }

    pub fn is_backfill_pending(&self) -> bool {
        self.backfill_pending
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ManualLauncher;

    fn crypto() -> Instrument {
        Catalog::builtin().find("btcusdt").cloned().unwrap()
    }

    fn session(launcher: &ManualLauncher) -> ChartSession {
        ChartSession::new(
            Box::new(launcher.clone()),
            SessionOptions {
                offline: false,
                seed: Some(9),
            },
        )
    }

    fn tick(t: i64, p: f64) -> FeedEventKind {
        FeedEventKind::Tick(Sample::new(t, p))
    }

    #[test]
    fn ticks_before_backfill_are_held() {
        let launcher = ManualLauncher::new();
        let mut s = session(&launcher);
        s.select(&crypto());
        let stream = launcher.stream_sink(0).unwrap();
        let backfill = launcher.backfill_sink(0).unwrap();
        let now = Instant::now();

        stream.send(tick(5_000, 10.0));
        s.pump(now);
        assert!(s.window().is_empty());

        backfill.send(FeedEventKind::Backfill(vec![Sample::new(1_000, 9.0)]));
        s.pump(now);
        assert_eq!(
            s.window().snapshot(),
            &[Sample::new(1_000, 9.0), Sample::new(5_000, 10.0)]
        );
        assert!(!s.is_backfill_pending());
    }

    #[test]
    fn price_change_starts_pulse() {
        let launcher = ManualLauncher::new();
        let mut s = session(&launcher);
        s.select(&crypto());
        let now = Instant::now();
        launcher
            .backfill_sink(0)
            .unwrap()
            .send(FeedEventKind::Backfill(vec![Sample::new(0, 100.0)]));
        launcher.stream_sink(0).unwrap().send(tick(1, 101.0));
        s.pump(now);

        assert!((s.change_pct() - 1.0).abs() < 1e-9);
        assert!(s.is_pulsing(now));
        assert!(!s.is_pulsing(now + CHART.pulse));
    }

    #[test]
    fn unchanged_price_does_not_pulse() {
        let launcher = ManualLauncher::new();
        let mut s = session(&launcher);
        s.select(&crypto());
        let now = Instant::now();
        launcher
            .backfill_sink(0)
            .unwrap()
            .send(FeedEventKind::Backfill(vec![Sample::new(0, 100.0)]));
        launcher.stream_sink(0).unwrap().send(tick(1, 100.0));
        s.pump(now);
        assert!(!s.is_pulsing(now));
    }

    #[test]
    fn backfill_failure_leaves_window_to_live_ticks() {
        let launcher = ManualLauncher::new();
        let mut s = session(&launcher);
        s.select(&crypto());
        let stream = launcher.stream_sink(0).unwrap();
        stream.send(tick(1, 5.0));
        launcher
            .backfill_sink(0)
            .unwrap()
            .send(FeedEventKind::BackfillFailed("timeout".into()));
        stream.send(tick(2, 6.0));
        s.pump(Instant::now());
        assert_eq!(s.window().len(), 2);
        assert!(s.activity().entries().any(|e| e.kind == ActivityKind::Error));
    }

    #[test]
    fn live_ticks_reach_quote_subscribers() {
        let launcher = ManualLauncher::new();
        let mut s = session(&launcher);
        let quotes = s.subscribe_quotes();
        s.select(&crypto());
        launcher
            .backfill_sink(0)
            .unwrap()
            .send(FeedEventKind::Backfill(Vec::new()));
        launcher.stream_sink(0).unwrap().send(tick(7, 42.0));
        s.pump(Instant::now());
        let quote = quotes.try_recv().unwrap();
        assert_eq!(quote.symbol_code, "BTCUSDT");
        assert_eq!(quote.price, 42.0);
    }

    #[test]
    fn connection_events_update_state_and_log() {
        let launcher = ManualLauncher::new();
        let mut s = session(&launcher);
        s.select(&crypto());
        assert_eq!(s.connection(), ConnectionState::Connecting);
        let stream = launcher.stream_sink(0).unwrap();
        stream.send(FeedEventKind::Connection(ConnectionState::Open));
        s.pump(Instant::now());
        assert_eq!(s.connection(), ConnectionState::Open);
        stream.send(FeedEventKind::Connection(ConnectionState::Errored));
        s.pump(Instant::now());
        assert_eq!(s.connection(), ConnectionState::Errored);
        let newest = s.activity().entries().next().unwrap();
        assert_eq!(newest.kind, ActivityKind::Error);
    }

    #[test]
    fn offline_mode_charts_crypto_synthetically() {
        let launcher = ManualLauncher::new();
        let mut s = ChartSession::new(
            Box::new(launcher.clone()),
            SessionOptions {
                offline: true,
                seed: Some(1),
            },
        );
        s.select(&crypto());
        assert!(launcher.stream_symbols().is_empty());
        assert!(launcher.backfill_requests().is_empty());
        assert_eq!(s.window().len(), CHART.max_samples);
        assert_eq!(s.source().label(), "Simulated");
    }

    #[test]
    fn market_switch_picks_first_instrument() {
        let launcher = ManualLauncher::new();
        let mut s = session(&launcher);
        let catalog = Catalog::builtin();
        s.select_market(Market::DomesticEquity, &catalog);
        assert_eq!(s.market(), Market::DomesticEquity);
        assert_eq!(
            s.instrument().map(|i| i.id.as_str()),
            catalog.first_in(Market::DomesticEquity).map(|i| i.id.as_str())
        );
        assert_eq!(s.connection(), ConnectionState::Closed);
    }

    #[test]
    fn reselection_resets_cursor() {
        let launcher = ManualLauncher::new();
        let mut s = session(&launcher);
        let catalog = Catalog::builtin();
        s.select_market(Market::ForeignEquity, &catalog);
        let size = SurfaceSize::new(800.0, 300.0);
        assert!(s.pointer_moved(200.0, 100.0, size));
        assert!(matches!(s.hover(), HoverState::Hovering(_)));
        s.select(&crypto());
        assert_eq!(s.hover(), HoverState::Idle);
    }
}
