mod chart_painter;
mod styles;
mod ui_config;
mod ui_render;

pub(crate) use chart_painter::paint_scene;
pub(crate) use styles::{UiStyleExt, format_change_pct, get_outcome_color};
pub(crate) use ui_config::UI_CONFIG;
