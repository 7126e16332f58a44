use eframe::egui::{Color32, Pos2, pos2};

use crate::chart::{
    CoordinateMapper, CursorState, Glow, PaintCommand, Scene, SurfaceSize, TextAnchor, Tooltip,
};
use crate::config::{CHART, PLOT_CONFIG};
use crate::domain::{ConnectionState, Market, Sample};
use crate::utils::{format_clock_hm, format_clock_hms};

/// Everything one render pass needs. Borrowed from the session for the duration of the frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    pub samples: &'a [Sample],
    pub size: SurfaceSize,
    pub cursor: &'a CursorState,
    pub connection: ConnectionState,
    pub market: Market,
    /// Latest price just changed; draw the pulse ring.
    pub pulsing: bool,
    /// Extra horizontal levels the price axis must include.
    pub reference_levels: &'a [f64],
}

pub fn accent_color(market: Market) -> Color32 {
    match market {
        Market::Crypto => PLOT_CONFIG.crypto_accent,
        Market::DomesticEquity => PLOT_CONFIG.domestic_accent,
        Market::ForeignEquity => PLOT_CONFIG.foreign_accent,
    }
}

pub fn format_price_label(price: f64) -> String {
    format!("{:.*}", CHART.price_decimals, price)
}

/// Turn the current chart state into paint commands.
///
/// Always succeeds. With fewer than two samples only the background, grid,
/// axis labels and status badge are produced.
pub fn render(frame: &RenderFrame) -> Scene {
    let mapper = CoordinateMapper::new(
        frame.samples,
        frame.reference_levels,
        frame.size,
        CHART.padding,
        CHART.price_padding_pct,
    );
    let accent = accent_color(frame.market);
    let mut scene = Scene::default();

    scene.push(PaintCommand::Clear {
        color: PLOT_CONFIG.background_color,
    });
    paint_grid(&mut scene, &mapper);
    paint_time_labels(&mut scene, &mapper, frame.samples);

    if frame.samples.len() >= 2 {
        paint_series(&mut scene, &mapper, frame.samples, accent);
        let hovered = frame
            .cursor
            .sample_index
            .filter(|&i| frame.cursor.active && i < frame.samples.len());
        match hovered {
            Some(index) => paint_crosshair(&mut scene, &mapper, frame.samples, index, accent),
            None => paint_latest_marker(&mut scene, &mapper, frame.samples, accent, frame.pulsing),
        }
    } else if frame.samples.is_empty() {
        scene.push(PaintCommand::Text {
            pos: pos2(
                (mapper.plot_left() + mapper.plot_right()) / 2.0,
                (mapper.plot_top() + mapper.plot_bottom()) / 2.0,
            ),
            anchor: TextAnchor::Center,
            text: "Waiting for data…".to_string(),
            size: CHART.label_font_size,
            color: PLOT_CONFIG.empty_message_color,
        });
    }

    paint_status_badge(&mut scene, &mapper, frame.connection, frame.market);
    scene
}

fn paint_grid(scene: &mut Scene, mapper: &CoordinateMapper) {
    let divisions = CHART.grid_divisions.max(1);
    let label_x = mapper.size().width - mapper.padding().right + CHART.price_label_gap;

    for i in 0..=divisions {
        let fraction = i as f32 / divisions as f32;
        let y = mapper.plot_top() + mapper.plot_height() * fraction;

        scene.push(PaintCommand::Line {
            from: pos2(mapper.plot_left(), y),
            to: pos2(mapper.plot_right(), y),
            width: 1.0,
            color: PLOT_CONFIG.grid_color,
            dash: None,
        });

        if let Some(bounds) = mapper.bounds() {
            scene.push(PaintCommand::Text {
                pos: pos2(label_x, y),
                anchor: TextAnchor::LeftCenter,
                text: format_price_label(bounds.price_at_fraction_from_top(fraction as f64)),
                size: CHART.label_font_size,
                color: PLOT_CONFIG.axis_label_color,
            });
        }
    }
}

fn paint_time_labels(scene: &mut Scene, mapper: &CoordinateMapper, samples: &[Sample]) {
    let stride = (samples.len() / CHART.time_label_divisions.max(1)).max(1);
    let y = mapper.size().height - CHART.time_label_inset;

    for (i, sample) in samples.iter().enumerate().step_by(stride) {
        scene.push(PaintCommand::Text {
            pos: pos2(mapper.x(i), y),
            anchor: TextAnchor::Center,
            text: format_clock_hm(sample.time),
            size: CHART.label_font_size,
            color: PLOT_CONFIG.axis_label_color,
        });
    }
}

fn series_points(mapper: &CoordinateMapper, samples: &[Sample]) -> Vec<Pos2> {
    samples
        .iter()
        .enumerate()
        .filter_map(|(i, s)| mapper.y(s.price).map(|y| pos2(mapper.x(i), y)))
        .collect()
}

fn paint_series(scene: &mut Scene, mapper: &CoordinateMapper, samples: &[Sample], accent: Color32) {
    let points = series_points(mapper, samples);
    if points.len() < 2 {
        return;
    }

    scene.push(PaintCommand::GradientArea {
        top: points.clone(),
        baseline: mapper.plot_bottom(),
        gradient_top: mapper.plot_top(),
        top_color: accent.linear_multiply(PLOT_CONFIG.area_fill_opacity),
        bottom_color: Color32::TRANSPARENT,
    });
    scene.push(PaintCommand::Polyline {
        points,
        width: CHART.line_width,
        color: accent,
        glow: Some(Glow {
            width: CHART.glow_width,
            color: accent.linear_multiply(PLOT_CONFIG.glow_opacity),
        }),
    });
    scene.has_series = true;
}

fn paint_crosshair(
    scene: &mut Scene,
    mapper: &CoordinateMapper,
    samples: &[Sample],
    index: usize,
    accent: Color32,
) {
    let sample = samples[index];
    let Some(y) = mapper.y(sample.price) else {
        return;
    };
    let x = mapper.x(index);
    let dash = Some(CHART.crosshair_dash);

    scene.push(PaintCommand::Line {
        from: pos2(x, mapper.plot_top()),
        to: pos2(x, mapper.plot_bottom()),
        width: 1.0,
        color: PLOT_CONFIG.crosshair_color,
        dash,
    });
    scene.push(PaintCommand::Line {
        from: pos2(mapper.plot_left(), y),
        to: pos2(mapper.plot_right(), y),
        width: 1.0,
        color: PLOT_CONFIG.crosshair_color,
        dash,
    });
    scene.push(PaintCommand::Circle {
        center: pos2(x, y),
        radius: CHART.hover_marker_radius,
        fill: PLOT_CONFIG.hover_marker_fill,
        stroke: Some((2.0, accent)),
    });

    let text = format!(
        "{} | {}",
        format_clock_hms(sample.time),
        format_price_label(sample.price)
    );
    let (min, max) = place_tooltip(&text, pos2(x, y), mapper.size());

    scene.push(PaintCommand::RoundedRect {
        min,
        max,
        radius: CHART.tooltip.corner_radius,
        fill: PLOT_CONFIG.tooltip_fill,
        stroke: Some((1.0, PLOT_CONFIG.tooltip_border)),
    });
    scene.push(PaintCommand::Text {
        pos: pos2((min.x + max.x) / 2.0, (min.y + max.y) / 2.0),
        anchor: TextAnchor::Center,
        text: text.clone(),
        size: CHART.label_font_size,
        color: PLOT_CONFIG.tooltip_text,
    });

    scene.highlighted = Some(index);
    scene.tooltip = Some(Tooltip { text, min, max });
}

/// Tooltip box above `anchor`, kept inside the surface horizontally and
/// flipped below the point when it would overflow the top.
pub fn place_tooltip(text: &str, anchor: Pos2, size: SurfaceSize) -> (Pos2, Pos2) {
    let t = &CHART.tooltip;
    let width = text.chars().count() as f32 * CHART.label_char_width + t.inner_padding * 2.0;
    let height = t.height;

    let mut x = anchor.x - width / 2.0;
    if x < t.edge_margin {
        x = t.edge_margin;
    }
    if x + width > size.width - t.edge_margin {
        x = size.width - width - t.edge_margin;
    }

    let mut y = anchor.y - height - t.offset;
    if y < t.edge_margin {
        y = anchor.y + t.offset;
    }
    if y + height > size.height - t.edge_margin {
        y = (size.height - height - t.edge_margin).max(0.0);
    }

    (pos2(x, y), pos2(x + width, y + height))
}

fn paint_latest_marker(
    scene: &mut Scene,
    mapper: &CoordinateMapper,
    samples: &[Sample],
    accent: Color32,
    pulsing: bool,
) {
    let Some(last) = samples.last() else {
        return;
    };
    let Some(y) = mapper.y(last.price) else {
        return;
    };
    let center = pos2(mapper.x(samples.len() - 1), y);

    if pulsing {
        scene.push(PaintCommand::Circle {
            center,
            radius: CHART.pulse_radius,
            fill: accent.linear_multiply(PLOT_CONFIG.pulse_opacity),
            stroke: None,
        });
    }
    scene.push(PaintCommand::Circle {
        center,
        radius: CHART.marker_radius,
        fill: accent,
        stroke: None,
    });
}

fn paint_status_badge(
    scene: &mut Scene,
    mapper: &CoordinateMapper,
    connection: ConnectionState,
    market: Market,
) {
    let (label, color) = if market.supports_streaming() {
        (connection.label(), connection.color())
    } else {
        ("Simulated", PLOT_CONFIG.status_closed)
    };
    let center = pos2(mapper.plot_left() + 6.0, mapper.plot_top() / 2.0);

    scene.push(PaintCommand::Circle {
        center,
        radius: 4.0,
        fill: color,
        stroke: None,
    });
    scene.push(PaintCommand::Text {
        pos: pos2(center.x + 10.0, center.y),
        anchor: TextAnchor::LeftCenter,
        text: label.to_string(),
        size: CHART.label_font_size,
        color,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::resolve_sample_index;

    const SIZE: SurfaceSize = SurfaceSize::new(800.0, 300.0);

    fn window(n: usize) -> Vec<Sample> {
        (0..n)
            .map(|i| Sample::new(1_700_000_000_000 + i as i64 * 60_000, 100.0 + i as f64 * 1.25))
            .collect()
    }

    fn frame<'a>(samples: &'a [Sample], cursor: &'a CursorState) -> RenderFrame<'a> {
        RenderFrame {
            samples,
            size: SIZE,
            cursor,
            connection: ConnectionState::Open,
            market: Market::Crypto,
            pulsing: false,
            reference_levels: &[],
        }
    }

    fn count<F: Fn(&PaintCommand) -> bool>(scene: &Scene, f: F) -> usize {
        scene.commands.iter().filter(|c| f(c)).count()
    }

    #[test]
    fn starts_with_background() {
        let idle = CursorState::default();
        let scene = render(&frame(&[], &idle));
        assert!(matches!(scene.commands.first(), Some(PaintCommand::Clear { .. })));
    }

    #[test]
    fn degenerate_windows_render_axes_only() {
        let idle = CursorState::default();
        let flat = vec![Sample::new(0, 5.0); 3];
        for samples in [Vec::new(), window(1), flat] {
            let scene = render(&frame(&samples, &idle));
            let grid_lines = count(&scene, |c| matches!(c, PaintCommand::Line { dash: None, .. }));
            assert_eq!(grid_lines, CHART.grid_divisions + 1);
            if samples.len() < 2 {
                assert!(!scene.has_series);
                assert!(scene.highlighted.is_none());
            }
        }
    }

    #[test]
    fn empty_window_has_no_price_labels() {
        let idle = CursorState::default();
        let scene = render(&frame(&[], &idle));
        assert!(scene.texts().any(|t| t.starts_with("Waiting")));
        assert!(!scene.texts().any(|t| t.contains('.')));
    }

    #[test]
    fn grid_labels_use_two_decimals_top_to_bottom() {
        let samples = vec![Sample::new(0, 100.0), Sample::new(1, 150.0)];
        let idle = CursorState::default();
        let scene = render(&frame(&samples, &idle));
        let labels: Vec<&str> = scene.texts().filter(|t| t.contains('.')).collect();
        assert_eq!(labels.first(), Some(&"151.00"));
        assert!(labels.contains(&"99.00"));
    }

    #[test]
    fn time_label_stride() {
        let idle = CursorState::default();
        let is_time = |t: &str| t.len() == 5 && t.as_bytes()[2] == b':';
        for (n, expected) in [(2usize, 2usize), (10, 10), (12, 6), (150, 6)] {
            let samples = window(n);
            let scene = render(&frame(&samples, &idle));
            assert_eq!(scene.texts().filter(|t| is_time(t)).count(), expected, "n = {}", n);
        }
    }

    #[test]
    fn series_draws_area_then_stroke() {
        let idle = CursorState::default();
        let samples = window(20);
        let scene = render(&frame(&samples, &idle));
        let area = scene
            .commands
            .iter()
            .position(|c| matches!(c, PaintCommand::GradientArea { .. }))
            .unwrap();
        let line = scene
            .commands
            .iter()
            .position(|c| matches!(c, PaintCommand::Polyline { .. }))
            .unwrap();
        assert!(area < line);
        assert!(scene.has_series);
    }

    #[test]
    fn hover_tooltip_marks_index_and_price() {
        let samples = window(10);
        let padding = CHART.padding;
        let chart_width = SIZE.width - padding.left - padding.right;
        let x = padding.left + chart_width * 4.0 / 9.0;
        let index = resolve_sample_index(x, samples.len(), SIZE.width, &padding);
        assert_eq!(index, Some(4));

        let cursor = CursorState {
            active: true,
            pixel_x: x,
            pixel_y: 120.0,
            sample_index: index,
        };
        let scene = render(&frame(&samples, &cursor));
        assert_eq!(scene.highlighted, Some(4));
        let tooltip = scene.tooltip.as_ref().expect("tooltip");
        assert!(tooltip.text.contains(&format!("{:.2}", samples[4].price)));
        assert!(tooltip.text.ends_with("105.00"));
        let dashed = count(&scene, |c| matches!(c, PaintCommand::Line { dash: Some(_), .. }));
        assert_eq!(dashed, 2);
    }

    #[test]
    fn stale_cursor_index_falls_back_to_latest_marker() {
        let samples = window(3);
        let cursor = CursorState {
            active: true,
            pixel_x: 0.0,
            pixel_y: 0.0,
            sample_index: Some(40),
        };
        let scene = render(&frame(&samples, &cursor));
        assert!(scene.highlighted.is_none());
        assert!(scene.tooltip.is_none());
    }

    #[test]
    fn pulse_ring_only_when_pulsing() {
        let samples = window(5);
        let idle = CursorState::default();
        let mut f = frame(&samples, &idle);
        let rings = |scene: &Scene| {
            count(scene, |c| {
                matches!(c, PaintCommand::Circle { radius, .. } if *radius == CHART.pulse_radius)
            })
        };
        assert_eq!(rings(&render(&f)), 0);
        f.pulsing = true;
        assert_eq!(rings(&render(&f)), 1);
    }

    #[test]
    fn tooltip_stays_inside_surface() {
        let text = "12:00:00 | 100.00";
        for anchor in [pos2(0.0, 0.0), pos2(800.0, 5.0), pos2(400.0, 150.0), pos2(799.0, 299.0)] {
            let (min, max) = place_tooltip(text, anchor, SIZE);
            assert!(min.x >= 0.0 && max.x <= SIZE.width, "{:?}", anchor);
            assert!(min.y >= 0.0 && max.y <= SIZE.height, "{:?}", anchor);
        }
    }

    #[test]
    fn tooltip_flips_below_near_top() {
        let (min, _) = place_tooltip("x", pos2(400.0, 20.0), SIZE);
        assert!(min.y > 20.0);
        let (min, _) = place_tooltip("x", pos2(400.0, 200.0), SIZE);
        assert!(min.y < 200.0);
    }

    #[test]
    fn status_badge_reflects_connection() {
        let samples = window(3);
        let idle = CursorState::default();
        let mut f = frame(&samples, &idle);
        f.connection = ConnectionState::Closed;
        assert!(render(&f).texts().any(|t| t == "Disconnected"));
        f.market = Market::DomesticEquity;
        assert!(render(&f).texts().any(|t| t == "Simulated"));
    }
}
