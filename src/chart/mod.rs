//! Pure chart pipeline: window + surface + cursor in, paint commands out.

mod interaction;
mod mapper;
mod renderer;
mod scene;

pub use interaction::{CursorState, HoverState, InteractionController, resolve_sample_index};
pub use mapper::{CoordinateMapper, PriceBounds, SurfaceSize, map_x, map_y};
pub use renderer::{RenderFrame, accent_color, format_price_label, place_tooltip, render};
pub use scene::{Glow, PaintCommand, Scene, TextAnchor, Tooltip};
