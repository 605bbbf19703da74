// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

use crate::config::{Color, CompassStyle};
use crate::geometry::{CompassGeometry, Point2D};

/// The drawing surface a compass is rendered onto.
///
/// Only two primitives are needed: a stroked circle for the bezel and a filled
/// closed path for the pointer.
pub trait CompassCanvas {
    fn stroke_circle(&mut self, center: Point2D, radius: f64, stroke_width: f64, color: Color);

    /// Fill the polygon described by `points`. The last point may repeat the first.
    fn fill_path(&mut self, points: &[Point2D], color: Color);

    fn clear(&mut self, _color: Color) {}
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    StrokeCircle {
        center: Point2D,
        radius: f64,
        stroke_width: f64,
        color: Color,
    },
    FillPath {
        points: Vec<Point2D>,
        color: Color,
    },
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn render(&self, canvas: &mut impl CompassCanvas) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => canvas.clear(*color),
                DrawCommand::StrokeCircle {
                    center,
                    radius,
                    stroke_width,
                    color,
                } => canvas.stroke_circle(*center, *radius, *stroke_width, *color),
                DrawCommand::FillPath { points, color } => canvas.fill_path(points, *color),
            }
        }
    }
}

/// Recording canvas: drawing onto a scene appends commands.
impl CompassCanvas for Scene {
    fn stroke_circle(&mut self, center: Point2D, radius: f64, stroke_width: f64, color: Color) {
        self.add_command(DrawCommand::StrokeCircle {
            center,
            radius,
            stroke_width,
            color,
        });
    }

    fn fill_path(&mut self, points: &[Point2D], color: Color) {
        self.add_command(DrawCommand::FillPath {
            points: points.to_vec(),
            color,
        });
    }

    fn clear(&mut self, color: Color) {
        self.add_command(DrawCommand::Clear(color));
    }
}

/// Issue the compass draw calls for one frame.
///
/// A bezel whose radius is zero, negative or not finite is skipped; the pointer
/// is always drawn.
pub fn draw_compass(canvas: &mut impl CompassCanvas, geometry: &CompassGeometry, style: &CompassStyle) {
    log::trace!(
        "center=({:.2}, {:.2}) radius={:.2} left=({:.2}, {:.2}) tip=({:.2}, {:.2}) right=({:.2}, {:.2})",
        geometry.center.x,
        geometry.center.y,
        geometry.bezel_radius,
        geometry.pointer_base_left.x,
        geometry.pointer_base_left.y,
        geometry.pointer_tip.x,
        geometry.pointer_tip.y,
        geometry.pointer_base_right.x,
        geometry.pointer_base_right.y,
    );

    if style.clear_background {
        canvas.clear(style.background_color);
    }

    match geometry.drawable_radius() {
        Some(radius) => {
            canvas.stroke_circle(geometry.center, radius, style.bezel_thickness, style.bezel_color)
        }
        None => log::debug!(
            "skipping bezel, radius {} is not positive",
            geometry.bezel_radius
        ),
    }

    canvas.fill_path(&geometry.pointer_path(), style.pointer_color);
}

pub fn build_scene(geometry: &CompassGeometry, style: &CompassStyle) -> Scene {
    let mut scene = Scene::new();
    draw_compass(&mut scene, geometry, style);
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{compute, CompassState};

    fn scene_for(width: f64, height: f64, direction: f64, style: &CompassStyle) -> Scene {
        let geometry = compute(
            &style.layout(width, height),
            &CompassState {
                wind_direction: direction,
                wind_speed: 0.0,
            },
        );
        build_scene(&geometry, style)
    }

    #[test]
    fn scene_order_is_clear_bezel_pointer() {
        let style = CompassStyle::default();
        let scene = scene_for(300.0, 200.0, 0.0, &style);
        let commands = scene.commands();
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0], DrawCommand::Clear(Color::WHITE));
        assert_eq!(
            commands[1],
            DrawCommand::StrokeCircle {
                center: Point2D::new(150.0, 100.0),
                radius: 185.0,
                stroke_width: 15.0,
                color: Color::SUNSHINE_BLUE,
            }
        );
        match &commands[2] {
            DrawCommand::FillPath { points, color } => {
                assert_eq!(*color, Color::SUNSHINE_RED);
                assert_eq!(points.len(), 5);
                assert_eq!(points.first(), points.last());
            }
            other => panic!("expected pointer fill, got {other:?}"),
        }
    }

    #[test]
    fn degenerate_bezel_is_skipped() {
        let style = CompassStyle::default();
        let scene = scene_for(10.0, 10.0, 0.0, &style);
        assert!(!scene
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::StrokeCircle { .. })));
        assert!(scene
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::FillPath { .. })));
    }

    #[test]
    fn clear_can_be_disabled() {
        let style = CompassStyle::builder().clear_background(false).build();
        let scene = scene_for(100.0, 100.0, 0.5, &style);
        assert!(!matches!(scene.commands()[0], DrawCommand::Clear(_)));
        assert_eq!(scene.commands().len(), 2);
    }

    #[test]
    fn replay_reproduces_commands() {
        let style = CompassStyle::builder().bezel_color(Color::new(1, 2, 3)).build();
        let scene = scene_for(120.0, 80.0, 2.0, &style);
        let mut copy = Scene::new();
        scene.render(&mut copy);
        assert_eq!(copy.commands(), scene.commands());
    }
}
