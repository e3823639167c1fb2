// mesh.rs — latitude/longitude wireframe sampling and orthographic projection

use glam::Vec2;

use crate::camera::CameraState;
use crate::constants::{
    HALF_TURN_DEG, LAT_LINE_LIMIT_DEG, LAT_STEP_DEG, LON_STEP_DEG, POLE_DEG, VIEWPORT_SCALE_FACTOR,
};
use crate::vector::{sphere_point, Rotate, Vector3};

/// Size of the drawing surface in screen units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Screen units per model unit. Zero for an empty viewport.
    pub fn scale(&self) -> f32 {
        self.width.min(self.height) * VIEWPORT_SCALE_FACTOR
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn projection(&self) -> Projection {
        Projection::new(self.scale(), self.center())
    }
}

/// Orthographic model-to-screen mapping. Screen Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub scale: f32,
    pub center: Vec2,
}

impl Projection {
    pub fn new(scale: f32, center: Vec2) -> Self {
        Self { scale, center }
    }

    #[inline]
    pub fn project(&self, v: Vector3) -> Vec2 {
        Vec2::new(v.x * self.scale + self.center.x, -v.y * self.scale + self.center.y)
    }
}

/// Open polyline in screen space.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub points: Vec<Vec2>,
}

impl Polyline {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WireframeMesh {
    pub latitudes: Vec<Polyline>,
    pub longitudes: Vec<Polyline>,
}

impl WireframeMesh {
    pub fn polylines(&self) -> impl Iterator<Item = &Polyline> {
        self.latitudes.iter().chain(self.longitudes.iter())
    }
}

// Latitude circles: -80..=80. Samples along each: -180..=180 (closed, first and last coincide).
fn latitude_angles() -> impl Iterator<Item = i32> + Clone {
    (-LAT_LINE_LIMIT_DEG..=LAT_LINE_LIMIT_DEG).step_by(LAT_STEP_DEG as usize)
}

fn latitude_sample_angles() -> impl Iterator<Item = i32> + Clone {
    (-HALF_TURN_DEG..=HALF_TURN_DEG).step_by(LON_STEP_DEG as usize)
}

// Longitude meridians: -180..180 (half-open). Samples along each: pole to pole inclusive.
fn longitude_angles() -> impl Iterator<Item = i32> + Clone {
    (-HALF_TURN_DEG..HALF_TURN_DEG).step_by(LON_STEP_DEG as usize)
}

fn longitude_sample_angles() -> impl Iterator<Item = i32> + Clone {
    (-POLE_DEG..=POLE_DEG).step_by(LAT_STEP_DEG as usize)
}

fn sample(lat: i32, lon: i32, camera: &CameraState, projection: &Projection) -> Vec2 {
    projection.project(sphere_point(lat, lon).orient(camera.pitch, camera.yaw))
}

pub fn latitude_lines(camera: &CameraState, viewport: Viewport) -> Vec<Polyline> {
    let projection = viewport.projection();
    latitude_angles()
        .map(|lat| Polyline {
            points: latitude_sample_angles()
                .map(|lon| sample(lat, lon, camera, &projection))
                .collect(),
        })
        .collect()
}

pub fn longitude_lines(camera: &CameraState, viewport: Viewport) -> Vec<Polyline> {
    let projection = viewport.projection();
    longitude_angles()
        .map(|lon| Polyline {
            points: longitude_sample_angles()
                .map(|lat| sample(lat, lon, camera, &projection))
                .collect(),
        })
        .collect()
}

/// Samples, orients and projects the whole wireframe from scratch.
pub fn build_wireframe(camera: &CameraState, viewport: Viewport) -> WireframeMesh {
    WireframeMesh {
        latitudes: latitude_lines(camera, viewport),
        longitudes: longitude_lines(camera, viewport),
    }
}
