//! Chart geometry, window and animation constants.

use std::time::Duration;

/// Pixel insets around the plot area. Price labels live in the right gutter,
/// time labels in the bottom one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

pub struct TooltipConfig {
    pub height: f32,
    pub inner_padding: f32,
    /// Gap between the hovered point and the tooltip box.
    pub offset: f32,
    /// Minimum distance kept from every surface edge.
    pub edge_margin: f32,
    pub corner_radius: f32,
}

pub struct SyntheticConfig {
    /// The walk starts this far below the reference price (0.98 = 2% below).
    pub start_factor: f64,
    /// Per-step drift is `(u - drift_bias) * max_step_pct` with `u` uniform in [0, 1).
    pub drift_bias: f64,
    pub max_step_pct: f64,
    pub step_interval_ms: i64,
}

pub struct ChartConfig {
    /// Capacity of the sample window (oldest samples are evicted past this).
    pub max_samples: usize,
    pub padding: Padding,
    /// Number of intervals between horizontal grid lines (lines = divisions + 1).
    pub grid_divisions: usize,
    /// Time labels are placed every `len / time_label_divisions` samples.
    pub time_label_divisions: usize,
    /// Relative padding added above and below the price range.
    pub price_padding_pct: f64,
    pub price_decimals: usize,
    pub label_font_size: f32,
    /// Approximate advance of one monospace glyph at `label_font_size`.
    pub label_char_width: f32,
    pub price_label_gap: f32,
    /// Distance of the time labels' baseline from the bottom edge.
    pub time_label_inset: f32,
    pub line_width: f32,
    pub glow_width: f32,
    pub marker_radius: f32,
    pub hover_marker_radius: f32,
    pub pulse_radius: f32,
    pub pulse: Duration,
    pub crosshair_dash: f32,
    pub tooltip: TooltipConfig,
    pub surface_height: f32,
    /// Log one price line to the activity log every n live ticks.
    pub price_log_every: u64,
    pub activity_log_capacity: usize,
    pub synthetic: SyntheticConfig,
}

pub const CHART: ChartConfig = ChartConfig {
    max_samples: 150,
    padding: Padding::new(30.0, 60.0, 40.0, 10.0),
    grid_divisions: 5,
    time_label_divisions: 6,
    price_padding_pct: 0.02, // 2% above max and below min
    price_decimals: 2,
    label_font_size: 11.0,
    label_char_width: 6.6,
    price_label_gap: 8.0,
    time_label_inset: 15.0,
    line_width: 2.0,
    glow_width: 8.0,
    marker_radius: 4.0,
    hover_marker_radius: 6.0,
    pulse_radius: 12.0,
    pulse: Duration::from_millis(300),
    crosshair_dash: 4.0,
    tooltip: TooltipConfig {
        height: 24.0,
        inner_padding: 8.0,
        offset: 15.0,
        edge_margin: 10.0,
        corner_radius: 4.0,
    },
    surface_height: 300.0,
    price_log_every: 50,
    activity_log_capacity: 100,
    synthetic: SyntheticConfig {
        start_factor: 0.98,
        drift_bias: 0.48,
        max_step_pct: 0.005,
        step_interval_ms: 10_000,
    },
};
