// constants.rs — fixed tuning for the wireframe sphere

use crate::scene::Color;

// Interaction
pub const DRAG_SENSITIVITY: f32 = 0.01; // radians per pixel of pointer drag
pub const PITCH_LIMIT: f32 = 1.5; // pitch is clamped to [-PITCH_LIMIT, PITCH_LIMIT]

// Projection
pub const VIEWPORT_SCALE_FACTOR: f32 = 0.4; // sphere radius as a fraction of min(width, height)

// Mesh sampling, in whole degrees
pub const LAT_STEP_DEG: i32 = 10;
pub const LON_STEP_DEG: i32 = 10;
pub const LAT_LINE_LIMIT_DEG: i32 = 80; // latitude circles stop short of the poles
pub const POLE_DEG: i32 = 90;
pub const HALF_TURN_DEG: i32 = 180;

// Styling
pub const BACKGROUND_COLOR: Color = Color::BLACK;
pub const LINE_COLOR: Color = Color::GREEN;
pub const LINE_WIDTH: f32 = 1.0;
