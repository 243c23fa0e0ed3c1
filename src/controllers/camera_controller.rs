use glam::Vec3;
use log::debug;

use crate::{render::scene::Camera, runtime::input_manager::InputManager};

/// Pans the camera in its X/Y plane and dollies it along Z. Panning moves the
/// target along with the eye so the view direction never changes.
pub struct CameraController {
    origin: Vec3,
    origin_target: Vec3,
    offset: Vec3,
}

impl CameraController {
    /// Steps are measured from wherever `camera` starts.
    pub fn new(camera: &Camera) -> CameraController {
        Self {
            origin: camera.position(),
            origin_target: camera.target(),
            offset: Vec3::ZERO,
        }
    }

    pub fn update(&mut self, input_manager: &InputManager, camera: &mut Camera) {
        let step = input_manager.step();
        if step == Vec3::ZERO {
            return;
        }

        self.offset += step;
        self.apply(camera);
        debug!("camera at {} looking at {}", camera.position(), camera.target());
    }

    pub fn apply(&self, camera: &mut Camera) {
        let pan = Vec3::new(self.offset.x, self.offset.y, 0.0);

        camera.look_at(self.origin + self.offset, self.origin_target + pan);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::input_manager::InputSettings;

    fn camera_at(position: Vec3, target: Vec3) -> Camera {
        Camera::new(position, target, 60.0, 1.0, 0.1, 100.0)
    }

    #[test]
    fn pan_moves_eye_and_target_while_dolly_moves_eye() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 14.0), Vec3::ZERO);
        let mut controller = CameraController::new(&camera);
        controller.offset = Vec3::new(1.0, -0.5, -2.0);

        controller.apply(&mut camera);

        assert_eq!(camera.position(), Vec3::new(1.0, -0.5, 12.0));
        assert_eq!(camera.target(), Vec3::new(1.0, -0.5, 0.0));
    }

    #[test]
    fn idle_input_leaves_camera_alone() {
        let mut camera = camera_at(Vec3::ONE, Vec3::ZERO);
        let mut controller = CameraController::new(&camera);
        let input = InputManager::new(&InputSettings::default());

        controller.update(&input, &mut camera);

        assert_eq!(camera.position(), Vec3::ONE);
    }

    #[test]
    fn untouched_controller_keeps_starting_view() {
        let start = Vec3::new(2.0, 1.0, 8.0);
        let target = Vec3::new(2.0, 0.0, 0.0);
        let mut camera = camera_at(start, target);
        let controller = CameraController::new(&camera);

        controller.apply(&mut camera);

        assert_eq!(camera.position(), start);
        assert_eq!(camera.target(), target);
    }
}
