use crate::chart::SurfaceSize;
use crate::config::Padding;

#[cfg(debug_assertions)]
use crate::config::DF;

/// Pointer state over the chart surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorState {
    pub active: bool,
    pub pixel_x: f32,
    pub pixel_y: f32,
    pub sample_index: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(usize),
}

/// Nearest sample index for a horizontal pixel, clamped to the window.
/// `None` only for an empty window.
pub fn resolve_sample_index(
    pixel_x: f32,
    window_len: usize,
    surface_width: f32,
    padding: &Padding,
) -> Option<usize> {
    if window_len == 0 {
        return None;
    }
    let last = window_len - 1;
    let chart_width = surface_width - padding.left - padding.right;
    if chart_width <= 0.0 || last == 0 {
        return Some(0);
    }

    let raw = ((pixel_x - padding.left) / chart_width * last as f32).round();
    if raw.is_nan() || raw <= 0.0 {
        Some(0)
    } else if raw >= last as f32 {
        Some(last)
    } else {
        Some(raw as usize)
    }
}

/// Translates pointer events into cursor state. Never touches sample data.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    cursor: CursorState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the cursor changed and the chart should be redrawn.
    pub fn pointer_moved(
        &mut self,
        pixel_x: f32,
        pixel_y: f32,
        window_len: usize,
        size: SurfaceSize,
        padding: &Padding,
    ) -> bool {
        let next = match resolve_sample_index(pixel_x, window_len, size.width, padding) {
            Some(index) => CursorState {
                active: true,
                pixel_x,
                pixel_y,
                sample_index: Some(index),
            },
            None => CursorState {
                pixel_x,
                pixel_y,
                ..CursorState::default()
            },
        };

        #[cfg(debug_assertions)]
        if DF.log_interaction && next.sample_index != self.cursor.sample_index {
            log::info!("cursor -> {:?}", next.sample_index);
        }

        let changed = next != self.cursor;
        self.cursor = next;
        changed
    }

    pub fn pointer_left(&mut self) -> bool {
        let was_active = self.cursor.active;
        self.cursor.active = false;
        self.cursor.sample_index = None;
        was_active
    }

    pub fn reset(&mut self) {
        self.cursor = CursorState::default();
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn state(&self) -> HoverState {
        match (self.cursor.active, self.cursor.sample_index) {
            (true, Some(index)) => HoverState::Hovering(index),
            _ => HoverState::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CHART;

    const PAD: Padding = CHART.padding;
    const SIZE: SurfaceSize = SurfaceSize::new(800.0, 300.0);

    #[test]
    fn clamps_left_and_right_of_plot_area() {
        for x in [-500.0, 0.0, PAD.left - 1.0] {
            assert_eq!(resolve_sample_index(x, 10, SIZE.width, &PAD), Some(0));
        }
        for x in [SIZE.width - PAD.right + 1.0, SIZE.width, 5000.0] {
            assert_eq!(resolve_sample_index(x, 10, SIZE.width, &PAD), Some(9));
        }
    }

    #[test]
    fn rounds_to_nearest_sample() {
        let chart_width = SIZE.width - PAD.left - PAD.right;
        // Sample 4 of 10 sits at 4/9 of the way across.
        let x = PAD.left + chart_width * 4.0 / 9.0 + 3.0;
        assert_eq!(resolve_sample_index(x, 10, SIZE.width, &PAD), Some(4));
    }

    #[test]
    fn degenerate_windows() {
        assert_eq!(resolve_sample_index(100.0, 0, SIZE.width, &PAD), None);
        assert_eq!(resolve_sample_index(100.0, 1, SIZE.width, &PAD), Some(0));
        assert_eq!(resolve_sample_index(100.0, 5, 20.0, &PAD), Some(0));
    }

    #[test]
    fn idle_hover_idle() {
        let mut ctl = InteractionController::new();
        assert_eq!(ctl.state(), HoverState::Idle);

        assert!(ctl.pointer_moved(PAD.left, 50.0, 10, SIZE, &PAD));
        assert_eq!(ctl.state(), HoverState::Hovering(0));

        // Same spot again: nothing to redraw.
        assert!(!ctl.pointer_moved(PAD.left, 50.0, 10, SIZE, &PAD));

        assert!(ctl.pointer_left());
        assert_eq!(ctl.state(), HoverState::Idle);
        assert!(!ctl.pointer_left());
    }

    #[test]
    fn empty_window_stays_idle() {
        let mut ctl = InteractionController::new();
        ctl.pointer_moved(200.0, 50.0, 0, SIZE, &PAD);
        assert_eq!(ctl.state(), HoverState::Idle);
        assert!(!ctl.cursor().active);
    }
}
