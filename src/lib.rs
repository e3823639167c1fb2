//! Drag-rotatable wireframe sphere: sampling, rotation, orthographic projection.
//!
//! The library is host-agnostic. A front end forwards pointer events to a
//! [`RenderTarget`] such as [`SphereScene`] and draws the [`DrawCommand`]s it
//! returns for the current [`Viewport`].

pub mod camera;
pub mod constants;
pub mod mesh;
pub mod scene;
pub mod vector;

pub use camera::{CameraState, DragState};
pub use mesh::{build_wireframe, Polyline, Projection, Viewport, WireframeMesh};
pub use scene::{Color, DrawCommand, RenderTarget, SphereScene, Stroke, WireframeStyle};
pub use vector::{sphere_point, Rotate, Vector3};
