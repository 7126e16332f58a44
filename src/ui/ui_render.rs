use std::time::Instant;

use eframe::egui::{
    Align, CentralPanel, Context, FontId, Layout, RichText, ScrollArea, Sense, SidePanel,
    TopBottomPanel, Ui, Vec2,
};
use strum::IntoEnumIterator;

use crate::app::App;
use crate::chart::{SurfaceSize, accent_color, render};
use crate::config::{CHART, PLOT_CONFIG};
use crate::domain::{Instrument, Market};
use crate::ui::{UI_CONFIG, UiStyleExt, format_change_pct, get_outcome_color, paint_scene};

#[cfg(debug_assertions)]
use crate::config::DF;

impl App {
    /// Market tabs, trading-hours status, instrument selector and header price.
    pub(crate) fn render_top_panel(&mut self, ctx: &Context) {
        let mut picked_market: Option<Market> = None;
        let mut picked_instrument: Option<Instrument> = None;
        let current_market = self.session.market();
        let current_id = self.session.instrument().map(|i| i.id.clone());

        TopBottomPanel::top("market_panel")
            .frame(UI_CONFIG.top_panel_frame())
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("📈 Live Chart").strong().color(UI_CONFIG.colors.heading));
                    ui.separator();
                    for market in Market::iter() {
                        let selected = market == current_market;
                        if ui
                            .interactive_label(
                                market.tab_label(),
                                selected,
                                accent_color(market),
                                FontId::proportional(13.0),
                            )
                            .clicked()
                            && !selected
                        {
                            picked_market = Some(market);
                        }
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let status = current_market.status_now();
                        let color = if status.is_open {
                            PLOT_CONFIG.status_open
                        } else {
                            PLOT_CONFIG.status_closed
                        };
                        ui.label(RichText::new(status.label).small().color(color));
                        ui.status_dot(color);
                    });
                });

                ui.add_space(4.0);

                ui.horizontal_wrapped(|ui| {
                    for instrument in self.catalog.for_market(current_market) {
                        let selected = current_id.as_deref() == Some(instrument.id.as_str());
                        if ui
                            .interactive_label(
                                &instrument.label(),
                                selected,
                                UI_CONFIG.colors.label,
                                FontId::proportional(12.0),
                            )
                            .on_hover_text(&instrument.symbol_code)
                            .clicked()
                            && !selected
                        {
                            picked_instrument = Some(instrument.clone());
                        }
                    }
                });

                ui.add_space(4.0);
                self.render_price_header(ui);
            });

        if let Some(market) = picked_market {
            #[cfg(debug_assertions)]
            if DF.log_session {
                log::info!("Market tab clicked: {}", market);
            }
            self.session.select_market(market, &self.catalog);
        } else if let Some(instrument) = picked_instrument {
            self.session.select(&instrument);
        }
    }

    fn render_price_header(&self, ui: &mut Ui) {
        let Some(instrument) = self.session.instrument() else {
            ui.label_subdued("No instrument selected");
            return;
        };
        let change = self.session.change_pct();
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(&instrument.display_name)
                    .strong()
                    .color(UI_CONFIG.colors.heading),
            );
            ui.label_subdued(&instrument.symbol_code);
            ui.separator();
            ui.label(
                RichText::new(instrument.market.format_price(self.session.last_price()))
                    .size(20.0)
                    .strong()
                    .color(accent_color(instrument.market)),
            );
            ui.label(RichText::new(format_change_pct(change)).color(get_outcome_color(change)));
        });
    }

    /// Connection state, sample count and the latest published quote.
    pub(crate) fn render_status_panel(&mut self, ctx: &Context) {
        TopBottomPanel::bottom("status_panel")
            .frame(UI_CONFIG.bottom_panel_frame())
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let connection = self.session.connection();
                    if self.session.source().is_streaming() {
                        ui.status_dot(connection.color());
                        ui.label(RichText::new(connection.label()).small().color(connection.color()));
                    } else {
                        ui.status_dot(PLOT_CONFIG.status_closed);
                        ui.label_subdued(self.session.source().label());
                    }
                    ui.separator();
                    ui.metric(
                        "Samples",
                        &format!("{}/{}", self.session.window().len(), self.session.window().capacity()),
                        UI_CONFIG.colors.label,
                    );
                    if let Some(quote) = &self.last_quote {
                        ui.separator();
                        ui.metric(
                            &quote.symbol_code,
                            &format!("{:.2} ({})", quote.price, format_change_pct(quote.change_pct)),
                            get_outcome_color(quote.change_pct),
                        );
                    }
                });
            });
    }

    /// Newest-first activity feed.
    pub(crate) fn render_log_panel(&mut self, ctx: &Context) {
        SidePanel::right("activity_panel")
            .frame(UI_CONFIG.side_panel_frame())
            .default_width(UI_CONFIG.log_panel_width)
            .resizable(true)
            .show(ctx, |ui| {
                ui.label_subheader("Activity");
                ui.separator();
                ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for entry in self.session.activity().entries() {
                            ui.horizontal_wrapped(|ui| {
                                ui.label_subdued(&entry.time);
                                ui.label(RichText::new(&entry.message).small().color(entry.kind.color()));
                            });
                        }
                    });
            });
    }

    /// Chart card: fixed height, full width, redrawn every frame from the session.
    pub(crate) fn render_central_panel(&mut self, ctx: &Context, now: Instant) {
        CentralPanel::default()
            .frame(UI_CONFIG.central_panel_frame())
            .show(ctx, |ui| {
                UI_CONFIG.chart_card_frame().show(ui, |ui| {
                    let desired = Vec2::new(ui.available_width(), CHART.surface_height);
                    let (rect, response) = ui.allocate_exact_size(desired, Sense::hover());
                    let size = SurfaceSize::new(rect.width(), rect.height());

                    let changed = match response.hover_pos() {
                        Some(pos) => self.session.pointer_moved(pos.x - rect.min.x, pos.y - rect.min.y, size),
                        None => self.session.pointer_left(),
                    };
                    if changed {
                        ctx.request_repaint();
                    }

                    let scene = render(&self.session.render_frame(size, now));
                    paint_scene(ui.painter(), rect, &scene);
                });
            });

        if let Some(until) = self.session.pulse_deadline() {
            if until > now {
                ctx.request_repaint_after(until - now);
            }
        }
    }
}
