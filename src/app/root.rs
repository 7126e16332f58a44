use {
    eframe::{
        Frame,
        egui::{Context, Visuals},
    },
    std::{
        sync::{Arc, mpsc::Receiver},
        time::Instant,
    },
};

use crate::{
    Cli,
    data::{BinanceLauncher, FeedLauncher, ManualLauncher},
    models::{Catalog, Quote},
    session::{ChartSession, SessionOptions},
    ui::UI_CONFIG,
};

#[cfg(debug_assertions)]
use crate::config::DF;

pub struct App {
    pub(crate) catalog: Catalog,
    pub(crate) session: ChartSession,
    pub(crate) quote_rx: Receiver<Quote>,
    pub(crate) last_quote: Option<Quote>,
}

impl App {
    pub(crate) fn new(cc: &eframe::CreationContext<'_>, args: Cli) -> Self {
        let catalog = match &args.catalog {
            Some(path) => Catalog::from_json_file(path).unwrap_or_else(|e| {
                log::error!("{:#}. Falling back to the built-in catalog.", e);
                Catalog::builtin()
            }),
            None => Catalog::builtin(),
        };

        let mut offline = args.offline;
        let launcher: Box<dyn FeedLauncher> = if offline {
            Box::new(ManualLauncher::new())
        } else {
            match BinanceLauncher::new() {
                Ok(launcher) => Box::new(launcher),
                Err(e) => {
                    log::error!("Network runtime unavailable, charting offline: {:#}", e);
                    offline = true;
                    Box::new(ManualLauncher::new())
                }
            }
        };

        let mut session = ChartSession::new(
            launcher,
            SessionOptions {
                offline,
                seed: args.seed,
            },
        );
        let ctx = cc.egui_ctx.clone();
        session.set_waker(Arc::new(move || ctx.request_repaint()));
        let quote_rx = session.subscribe_quotes();

        let mut app = Self {
            catalog,
            session,
            quote_rx,
            last_quote: None,
        };
        let market = args.market.unwrap_or_default();
        #[cfg(debug_assertions)]
        if DF.log_session {
            log::info!("Opening on market {} ({} instruments)", market, app.catalog.len());
        }
        app.session.select_market(market, &app.catalog);
        app
    }

    fn drain_quotes(&mut self) {
        while let Ok(quote) = self.quote_rx.try_recv() {
            self.last_quote = Some(quote);
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);
        let now = Instant::now();
        self.session.pump(now);
        self.drain_quotes();

        self.render_top_panel(ctx);
        self.render_status_panel(ctx);
        self.render_log_panel(ctx);
        self.render_central_panel(ctx, now);
    }
}

fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();
    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;
    ctx.set_visuals(visuals);
    ctx.style_mut(|s| s.interaction.selectable_labels = false);
}
