//! The boundary between the geometry core and whatever host draws it.
//!
//! A host forwards pointer transitions to a [`RenderTarget`] and, whenever it
//! repaints, asks it for a list of [`DrawCommand`]s for the current surface
//! size. Nothing here knows about windows, GPUs or UI toolkits.

use glam::{IVec2, Vec2};

use crate::camera::CameraState;
use crate::constants::{BACKGROUND_COLOR, LINE_COLOR, LINE_WIDTH};
use crate::mesh::{build_wireframe, Viewport};

/// Straight (non-premultiplied) 8-bit RGBA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireframeStyle {
    pub background: Color,
    pub stroke: Stroke,
}

impl Default for WireframeStyle {
    fn default() -> Self {
        Self {
            background: BACKGROUND_COLOR,
            stroke: Stroke {
                color: LINE_COLOR,
                width: LINE_WIDTH,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface.
    Clear { color: Color },
    /// Connect consecutive points with straight segments. Not closed.
    Polyline { points: Vec<Vec2>, stroke: Stroke },
}

/// Something a host can feed pointer events into and draw every frame.
pub trait RenderTarget {
    fn on_pointer_down(&mut self, pos: IVec2);
    /// Returns `true` when the host should schedule a repaint.
    fn on_pointer_move(&mut self, pos: IVec2) -> bool;
    fn on_pointer_up(&mut self, pos: IVec2);
    fn render(&self, viewport: Viewport) -> Vec<DrawCommand>;
}

/// Wireframe unit sphere viewed through a drag-rotated camera.
#[derive(Debug, Clone, Default)]
pub struct SphereScene {
    pub camera: CameraState,
    pub style: WireframeStyle,
}

impl SphereScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: WireframeStyle) -> Self {
        Self {
            camera: CameraState::new(),
            style,
        }
    }
}

impl RenderTarget for SphereScene {
    fn on_pointer_down(&mut self, pos: IVec2) {
        self.camera.pointer_down(pos);
    }

    fn on_pointer_move(&mut self, pos: IVec2) -> bool {
        self.camera.pointer_move(pos)
    }

    fn on_pointer_up(&mut self, pos: IVec2) {
        self.camera.pointer_up(pos);
    }

    fn render(&self, viewport: Viewport) -> Vec<DrawCommand> {
        let mesh = build_wireframe(&self.camera, viewport);
        let stroke = self.style.stroke;

        let mut commands = Vec::with_capacity(1 + mesh.latitudes.len() + mesh.longitudes.len());
        commands.push(DrawCommand::Clear {
            color: self.style.background,
        });
        commands.extend(
            mesh.latitudes
                .into_iter()
                .chain(mesh.longitudes)
                .map(|line| DrawCommand::Polyline {
                    points: line.points,
                    stroke,
                }),
        );
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_starts_with_clear() {
        let scene = SphereScene::new();
        let commands = scene.render(Viewport::new(400.0, 300.0));
        assert_eq!(
            commands.first(),
            Some(&DrawCommand::Clear {
                color: Color::BLACK
            })
        );
        assert_eq!(commands.len(), 1 + 17 + 36);
    }

    #[test]
    fn polylines_use_scene_stroke() {
        let style = WireframeStyle {
            background: Color::rgb(10, 20, 30),
            stroke: Stroke {
                color: Color::rgb(255, 0, 0),
                width: 2.5,
            },
        };
        let scene = SphereScene::with_style(style);
        for cmd in scene.render(Viewport::new(100.0, 100.0)).iter().skip(1) {
            match cmd {
                DrawCommand::Polyline { stroke, .. } => assert_eq!(*stroke, style.stroke),
                other => panic!("unexpected command {other:?}"),
            }
        }
    }

    #[test]
    fn move_reports_repaint_only_while_dragging() {
        let mut scene = SphereScene::new();
        assert!(!scene.on_pointer_move(IVec2::new(5, 5)));
        scene.on_pointer_down(IVec2::new(5, 5));
        assert!(scene.on_pointer_move(IVec2::new(6, 5)));
        scene.on_pointer_up(IVec2::new(6, 5));
        assert!(!scene.on_pointer_move(IVec2::new(7, 5)));
    }

    #[test]
    fn render_reflects_camera() {
        let mut scene = SphereScene::new();
        let viewport = Viewport::new(400.0, 300.0);
        let before = scene.render(viewport);

        scene.on_pointer_down(IVec2::new(0, 0));
        scene.on_pointer_move(IVec2::new(40, 25));
        let after = scene.render(viewport);

        assert_eq!(before.len(), after.len());
        assert_ne!(before, after);

        scene.camera.reset();
        assert_eq!(scene.render(viewport), before);
    }
}
