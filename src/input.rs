use crate::lighting::LightingMode;
use glium::glutin::event::{ElementState, VirtualKeyCode};

/// Translation applied per held movement flag, once per frame.
pub const MOVE_STEP: f32 = 0.1;

/// Cumulative object-space translation of the cube; z stays fixed.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CubePose {
    pub x: f32,
    pub y: f32,
}

/// Per-frame intent accumulated from keyboard events. Movement flags follow
/// key state exactly; the lighting selection latches on key-down and is
/// drained once per frame.
pub struct InputState {
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,
    // Zoom is tracked but not applied to the camera.
    // TODO: decide whether zoom should pull the eye along -z.
    pub zoom_in: bool,
    pub zoom_out: bool,

    mode_select: Option<LightingMode>,
}

impl InputState {
    pub fn new() -> InputState {
        InputState {
            move_left: false,
            move_right: false,
            move_up: false,
            move_down: false,
            zoom_in: false,
            zoom_out: false,
            mode_select: None,
        }
    }

    pub fn key_event(&mut self, state: ElementState, key: VirtualKeyCode) {
        match state {
            ElementState::Pressed => self.key_down(key),
            ElementState::Released => self.key_up(key),
        }
    }

    fn key_down(&mut self, key: VirtualKeyCode) {
        use glium::glutin::event::VirtualKeyCode::*;

        match key {
            // The camera sits on -z looking back at the origin, so A maps to
            // +x to read as screen-left.
            A => self.move_right = true,
            D => self.move_left = true,
            W => self.move_up = true,
            S => self.move_down = true,
            Q => self.zoom_in = true,
            E => self.zoom_out = true,
            Key0 => self.mode_select = Some(LightingMode::Off),
            Key1 => self.mode_select = Some(LightingMode::Basic),
            Key2 => self.mode_select = Some(LightingMode::LightMapped),
            Key3 => self.mode_select = Some(LightingMode::Directional),
            Key4 => self.mode_select = Some(LightingMode::Point),
            Key5 => self.mode_select = Some(LightingMode::Spot),
            Key6 => self.mode_select = Some(LightingMode::Multi),
            _ => {}
        }
    }

    fn key_up(&mut self, key: VirtualKeyCode) {
        use glium::glutin::event::VirtualKeyCode::*;

        match key {
            A => self.move_right = false,
            D => self.move_left = false,
            W => self.move_up = false,
            S => self.move_down = false,
            Q => self.zoom_in = false,
            E => self.zoom_out = false,
            _ => {}
        }
    }

    /// Takes the pending lighting selection, if any. Selections fire once
    /// per key-down; releasing the key has no effect.
    pub fn take_mode_select(&mut self) -> Option<LightingMode> {
        self.mode_select.take()
    }

    /// Applies one frame worth of movement to the pose. Opposing flags both
    /// apply their delta and cancel arithmetically.
    pub fn advance_pose(&self, pose: &mut CubePose) {
        if self.move_left {
            pose.x -= MOVE_STEP;
        }
        if self.move_right {
            pose.x += MOVE_STEP;
        }
        if self.move_up {
            pose.y += MOVE_STEP;
        }
        if self.move_down {
            pose.y -= MOVE_STEP;
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        InputState::new()
    }
}
