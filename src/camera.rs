// camera.rs — orientation angles and the pointer-drag state machine

use glam::IVec2;

use crate::constants::{DRAG_SENSITIVITY, PITCH_LIMIT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        last: IVec2,
    },
}

/// Accumulated view orientation plus the pointer drag in progress, if any.
///
/// `yaw` is unbounded and wraps through trig periodicity. `pitch` always lies
/// in `[-PITCH_LIMIT, PITCH_LIMIT]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CameraState {
    pub yaw: f32,
    pub pitch: f32,
    drag: DragState,
}

impl CameraState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Anchor of the current drag; `None` while idle.
    pub fn last_pointer_position(&self) -> Option<IVec2> {
        match self.drag {
            DragState::Dragging { last } => Some(last),
            DragState::Idle => None,
        }
    }

    /// Arms dragging and anchors it at `pos`. A second press re-anchors.
    pub fn pointer_down(&mut self, pos: IVec2) {
        if !self.is_dragging() {
            log::debug!("[camera] begin drag at ({}, {})", pos.x, pos.y);
        }
        self.drag = DragState::Dragging { last: pos };
    }

    /// Applies the delta since the last anchor. Returns `true` when the
    /// orientation changed and the host should repaint.
    pub fn pointer_move(&mut self, pos: IVec2) -> bool {
        let DragState::Dragging { last } = self.drag else {
            return false;
        };

        let delta = pos - last;
        self.yaw += delta.x as f32 * DRAG_SENSITIVITY;
        self.pitch =
            (self.pitch + delta.y as f32 * DRAG_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.drag = DragState::Dragging { last: pos };

        log::trace!("[camera] yaw={:.3} pitch={:.3}", self.yaw, self.pitch);
        true
    }

    pub fn pointer_up(&mut self, _pos: IVec2) {
        if self.is_dragging() {
            log::debug!("[camera] end drag yaw={:.3} pitch={:.3}", self.yaw, self.pitch);
        }
        self.drag = DragState::Idle;
    }

    /// Back to the initial orientation. An active drag keeps going.
    pub fn reset(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn starts_idle_at_origin() {
        let cam = CameraState::new();
        assert_eq!(cam.yaw, 0.0);
        assert_eq!(cam.pitch, 0.0);
        assert!(!cam.is_dragging());
        assert_eq!(cam.last_pointer_position(), None);
    }

    #[test]
    fn move_while_idle_is_ignored() {
        let mut cam = CameraState::new();
        assert!(!cam.pointer_move(IVec2::new(500, -20)));
        assert_eq!(cam, CameraState::new());
    }

    #[test]
    fn drag_updates_angles_and_anchor() {
        let mut cam = CameraState::new();
        cam.pointer_down(IVec2::new(100, 100));
        assert_eq!(cam.last_pointer_position(), Some(IVec2::new(100, 100)));

        assert!(cam.pointer_move(IVec2::new(150, 130)));
        assert_abs_diff_eq!(cam.yaw, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(cam.pitch, 0.3, epsilon = 1e-6);
        assert_eq!(cam.last_pointer_position(), Some(IVec2::new(150, 130)));
    }

    #[test]
    fn yaw_accumulates_without_clamp() {
        let mut cam = CameraState::new();
        cam.pointer_down(IVec2::ZERO);
        for step in 1..=10 {
            cam.pointer_move(IVec2::new(step * 100, 0));
        }
        assert_abs_diff_eq!(cam.yaw, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn pitch_clamps_at_both_limits() {
        let mut cam = CameraState::new();
        cam.pointer_down(IVec2::ZERO);
        cam.pointer_move(IVec2::new(0, 100_000));
        assert_eq!(cam.pitch, PITCH_LIMIT);

        cam.pointer_move(IVec2::new(0, -100_000));
        assert_eq!(cam.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn pitch_recovers_immediately_after_clamp() {
        let mut cam = CameraState::new();
        cam.pointer_down(IVec2::ZERO);
        cam.pointer_move(IVec2::new(0, 1_000));
        assert_eq!(cam.pitch, PITCH_LIMIT);

        // No stored overshoot: moving back 50px leaves the limit right away.
        cam.pointer_move(IVec2::new(0, 950));
        assert_abs_diff_eq!(cam.pitch, PITCH_LIMIT - 0.5, epsilon = 1e-6);
    }

    #[test]
    fn pointer_up_keeps_angles() {
        let mut cam = CameraState::new();
        cam.pointer_down(IVec2::new(10, 10));
        cam.pointer_move(IVec2::new(30, 5));
        let (yaw, pitch) = (cam.yaw, cam.pitch);

        cam.pointer_up(IVec2::new(999, 999));
        assert!(!cam.is_dragging());
        assert_eq!((cam.yaw, cam.pitch), (yaw, pitch));
        assert!(!cam.pointer_move(IVec2::new(0, 0)));
    }

    #[test]
    fn second_press_reanchors() {
        let mut cam = CameraState::new();
        cam.pointer_down(IVec2::new(0, 0));
        cam.pointer_down(IVec2::new(200, 200));
        cam.pointer_move(IVec2::new(210, 200));
        assert_abs_diff_eq!(cam.yaw, 0.1, epsilon = 1e-6);
        assert_eq!(cam.pitch, 0.0);
    }

    #[test]
    fn reset_keeps_drag() {
        let mut cam = CameraState::new();
        cam.pointer_down(IVec2::new(0, 0));
        cam.pointer_move(IVec2::new(40, 40));
        cam.reset();
        assert_eq!((cam.yaw, cam.pitch), (0.0, 0.0));
        assert_eq!(cam.drag_state(), DragState::Dragging { last: IVec2::new(40, 40) });
    }
}
