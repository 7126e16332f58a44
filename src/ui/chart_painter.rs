use eframe::egui::{
    Align2, Color32, FontId, Mesh, Painter, Pos2, Rect, Shape, Stroke, StrokeKind, Vec2,
};

use crate::chart::{PaintCommand, Scene, TextAnchor};

/// Execute `scene` with egui. Scene coordinates are relative to `rect.min`.
pub(crate) fn paint_scene(painter: &Painter, rect: Rect, scene: &Scene) {
    let offset = rect.min.to_vec2();
    let at = |p: Pos2| p + offset;

    for command in &scene.commands {
        match command {
            PaintCommand::Clear { color } => {
                painter.rect_filled(rect, 0.0, *color);
            }
            PaintCommand::Line {
                from,
                to,
                width,
                color,
                dash,
            } => {
                let stroke = Stroke::new(*width, *color);
                match dash {
                    Some(len) => {
                        painter.extend(Shape::dashed_line(&[at(*from), at(*to)], stroke, *len, *len));
                    }
                    None => {
                        painter.line_segment([at(*from), at(*to)], stroke);
                    }
                }
            }
            PaintCommand::Polyline {
                points,
                width,
                color,
                glow,
            } => {
                let points: Vec<Pos2> = points.iter().map(|p| at(*p)).collect();
                if let Some(glow) = glow {
                    painter.add(Shape::line(points.clone(), Stroke::new(glow.width, glow.color)));
                }
                painter.add(Shape::line(points, Stroke::new(*width, *color)));
            }
            PaintCommand::GradientArea {
                top,
                baseline,
                gradient_top,
                top_color,
                bottom_color,
            } => {
                let mesh = gradient_mesh(
                    top,
                    *baseline,
                    *gradient_top,
                    *top_color,
                    *bottom_color,
                    offset,
                );
                painter.add(Shape::mesh(mesh));
            }
            PaintCommand::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                let stroke = stroke.map_or(Stroke::NONE, |(w, c)| Stroke::new(w, c));
                painter.circle(at(*center), *radius, *fill, stroke);
            }
            PaintCommand::RoundedRect {
                min,
                max,
                radius,
                fill,
                stroke,
            } => {
                let stroke = stroke.map_or(Stroke::NONE, |(w, c)| Stroke::new(w, c));
                painter.rect(
                    Rect::from_min_max(at(*min), at(*max)),
                    *radius,
                    *fill,
                    stroke,
                    StrokeKind::Inside,
                );
            }
            PaintCommand::Text {
                pos,
                anchor,
                text,
                size,
                color,
            } => {
                let align = match anchor {
                    TextAnchor::LeftCenter => Align2::LEFT_CENTER,
                    TextAnchor::Center => Align2::CENTER_CENTER,
                };
                painter.text(at(*pos), align, text, FontId::monospace(*size), *color);
            }
        }
    }
}

/// Triangle strip between the series and the baseline, shaded by height.
fn gradient_mesh(
    top: &[Pos2],
    baseline: f32,
    gradient_top: f32,
    top_color: Color32,
    bottom_color: Color32,
    offset: Vec2,
) -> Mesh {
    let mut mesh = Mesh::default();
    let span = baseline - gradient_top;

    for (i, p) in top.iter().enumerate() {
        let t = if span > 0.0 {
            ((p.y - gradient_top) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        mesh.colored_vertex(*p + offset, lerp_color(top_color, bottom_color, t));
        mesh.colored_vertex(Pos2::new(p.x, baseline) + offset, bottom_color);

        if i > 0 {
            let idx = (i as u32) * 2;
            mesh.add_triangle(idx - 2, idx - 1, idx);
            mesh.add_triangle(idx - 1, idx + 1, idx);
        }
    }
    mesh
}

fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgba_premultiplied(
        mix(a.r(), b.r()),
        mix(a.g(), b.g()),
        mix(a.b(), b.b()),
        mix(a.a(), b.a()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    #[test]
    fn lerp_endpoints() {
        let a = Color32::from_rgba_premultiplied(40, 80, 120, 200);
        assert_eq!(lerp_color(a, Color32::TRANSPARENT, 0.0), a);
        assert_eq!(lerp_color(a, Color32::TRANSPARENT, 1.0), Color32::TRANSPARENT);
    }

    #[test]
    fn mesh_has_two_triangles_per_segment() {
        let top = [pos2(0.0, 10.0), pos2(10.0, 20.0), pos2(20.0, 5.0)];
        let mesh = gradient_mesh(
            &top,
            100.0,
            0.0,
            Color32::WHITE,
            Color32::TRANSPARENT,
            Vec2::ZERO,
        );
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.indices.len(), 4 * 3);
        assert!(mesh.is_valid());
    }
}
