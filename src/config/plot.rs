//! Chart palette

use eframe::egui::Color32;

pub struct PlotConfig {
    pub background_color: Color32,
    pub grid_color: Color32,
    pub axis_label_color: Color32,

    // --- MARKET ACCENTS (line, marker, gradient source) ---
    pub crypto_accent: Color32,
    pub domestic_accent: Color32,
    pub foreign_accent: Color32,
    /// Opacity of the accent at the top of the area gradient (fades to 0 at the baseline).
    pub area_fill_opacity: f32,
    /// Opacity of the accent for the pulse ring around the latest price.
    pub pulse_opacity: f32,
    pub glow_opacity: f32,

    // --- CROSSHAIR / TOOLTIP ---
    pub crosshair_color: Color32,
    pub hover_marker_fill: Color32,
    pub tooltip_fill: Color32,
    pub tooltip_border: Color32,
    pub tooltip_text: Color32,

    // --- STATUS BADGE ---
    pub status_connecting: Color32,
    pub status_open: Color32,
    pub status_closed: Color32,
    pub status_errored: Color32,
    pub empty_message_color: Color32,

    // --- ACTIVITY LOG ---
    pub log_info: Color32,
    pub log_success: Color32,
    pub log_warning: Color32,
    pub log_error: Color32,
    pub log_price: Color32,

    pub color_profit: Color32,
    pub color_loss: Color32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    background_color: Color32::from_rgb(10, 14, 23),
    grid_color: Color32::from_rgb(26, 31, 46),
    axis_label_color: Color32::from_rgb(100, 116, 139),

    crypto_accent: Color32::from_rgb(0, 212, 170),   // Teal
    domestic_accent: Color32::from_rgb(255, 215, 0), // Gold
    foreign_accent: Color32::from_rgb(0, 255, 136),  // Neon green
    area_fill_opacity: 0.2,
    pulse_opacity: 0.2,
    glow_opacity: 0.25,

    // 50% white, premultiplied
    crosshair_color: Color32::from_rgba_premultiplied(128, 128, 128, 128),
    hover_marker_fill: Color32::WHITE,
    // rgba(15, 23, 42, 0.9), premultiplied
    tooltip_fill: Color32::from_rgba_premultiplied(13, 21, 38, 230),
    tooltip_border: Color32::from_rgb(51, 65, 85),
    tooltip_text: Color32::WHITE,

    status_connecting: Color32::from_rgb(255, 170, 0),
    status_open: Color32::from_rgb(0, 255, 136),
    status_closed: Color32::from_rgb(148, 163, 184),
    status_errored: Color32::from_rgb(255, 68, 68),
    empty_message_color: Color32::from_rgb(100, 116, 139),

    log_info: Color32::from_rgb(148, 163, 184),
    log_success: Color32::from_rgb(0, 255, 136),
    log_warning: Color32::from_rgb(255, 170, 0),
    log_error: Color32::from_rgb(255, 68, 68),
    log_price: Color32::from_rgb(0, 212, 170),

    color_profit: Color32::from_rgb(100, 255, 100),
    color_loss: Color32::from_rgb(255, 80, 80),
};
