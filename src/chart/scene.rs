//! Backend-neutral paint commands produced by the renderer.
//!
//! Coordinates are surface-local pixels with the origin at the top-left corner.

use eframe::egui::{Color32, Pos2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    LeftCenter,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Fill the whole surface.
    Clear { color: Color32 },
    Line {
        from: Pos2,
        to: Pos2,
        width: f32,
        color: Color32,
        /// Dash length (gap equals dash). `None` for a solid line.
        dash: Option<f32>,
    },
    Polyline {
        points: Vec<Pos2>,
        width: f32,
        color: Color32,
        /// Soft halo drawn under the stroke.
        glow: Option<Glow>,
    },
    /// Area between `top` and a horizontal `baseline`, with a vertical colour
    /// gradient from `top_color` at `gradient_top` to `bottom_color` at the baseline.
    GradientArea {
        top: Vec<Pos2>,
        baseline: f32,
        gradient_top: f32,
        top_color: Color32,
        bottom_color: Color32,
    },
    Circle {
        center: Pos2,
        radius: f32,
        fill: Color32,
        stroke: Option<(f32, Color32)>,
    },
    RoundedRect {
        min: Pos2,
        max: Pos2,
        radius: f32,
        fill: Color32,
        stroke: Option<(f32, Color32)>,
    },
    Text {
        pos: Pos2,
        anchor: TextAnchor,
        text: String,
        size: f32,
        color: Color32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub width: f32,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub min: Pos2,
    pub max: Pos2,
}

/// Output of one render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub commands: Vec<PaintCommand>,
    /// Index of the sample under the crosshair, if one was drawn.
    pub highlighted: Option<usize>,
    pub tooltip: Option<Tooltip>,
    /// True when the price polyline was drawn (two or more samples).
    pub has_series: bool,
}

impl Scene {
    pub fn push(&mut self, command: PaintCommand) {
        self.commands.push(command);
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            PaintCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
