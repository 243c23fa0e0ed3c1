use glam::Vec3;
use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode, PhysicalKey},
};

#[derive(Clone, Copy, Debug)]
pub struct InputSettings {
    /// Camera distance covered by one key press.
    pub step: f32,
    pub right_key: PhysicalKey,
    pub left_key: PhysicalKey,
    pub up_key: PhysicalKey,
    pub down_key: PhysicalKey,
    pub dolly_in_key: PhysicalKey,
    pub dolly_out_key: PhysicalKey,
    pub exit_key: PhysicalKey,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            step: 0.5,
            right_key: PhysicalKey::Code(KeyCode::ArrowRight),
            left_key: PhysicalKey::Code(KeyCode::ArrowLeft),
            up_key: PhysicalKey::Code(KeyCode::ArrowUp),
            down_key: PhysicalKey::Code(KeyCode::ArrowDown),
            dolly_in_key: PhysicalKey::Code(KeyCode::KeyZ),
            dolly_out_key: PhysicalKey::Code(KeyCode::KeyX),
            exit_key: PhysicalKey::Code(KeyCode::Escape),
        }
    }
}

/// Collects key presses between frames. Every press, including key repeats,
/// moves the camera by one step.
pub struct InputManager {
    settings: InputSettings,
    pending_step: Vec3,
    exit_requested: bool,
}

impl InputManager {
    pub fn new(settings: &InputSettings) -> InputManager {
        InputManager {
            settings: *settings,
            pending_step: Vec3::ZERO,
            exit_requested: false,
        }
    }

    pub fn handle_keyboard_input(&mut self, event: &KeyEvent) {
        if event.state == ElementState::Pressed {
            self.press(event.physical_key);
        }
    }

    fn press(&mut self, key: PhysicalKey) {
        let settings = &self.settings;

        let direction = if key == settings.right_key {
            Vec3::X
        } else if key == settings.left_key {
            Vec3::NEG_X
        } else if key == settings.up_key {
            Vec3::Y
        } else if key == settings.down_key {
            Vec3::NEG_Y
        } else if key == settings.dolly_in_key {
            Vec3::NEG_Z
        } else if key == settings.dolly_out_key {
            Vec3::Z
        } else {
            if key == settings.exit_key {
                self.exit_requested = true;
            }
            return;
        };

        self.pending_step += direction * settings.step;
    }

    /// Camera movement requested since the last frame.
    pub fn step(&self) -> Vec3 {
        self.pending_step
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn late_update(&mut self) {
        self.pending_step = Vec3::ZERO;
    }
}
