use crate::config::SceneConfig;
use crate::input::{CubePose, InputState};
use crate::lighting::{LightConfig, LightingController, LightingMode};
use crate::scene::SPIN_STEP_DEGREES;
use glium::glutin::event::{ElementState, VirtualKeyCode};

/// All mutable loop state, threaded through the event handlers and advanced
/// exactly once per frame. Nothing here touches the GPU.
pub struct Session {
    pub input: InputState,
    pub pose: CubePose,
    /// Last reported absolute pointer position in window pixels.
    pub pointer: (f64, f64),
    /// Accumulated free-running rotation about the cube diagonal, degrees.
    pub spin_deg: f32,
    pub lighting: LightingController,

    lighting_keys: bool,
    auto_spin: bool,
}

impl Session {
    pub fn new(config: &SceneConfig) -> Session {
        Session {
            input: InputState::new(),
            pose: CubePose::default(),
            pointer: (0.0, 0.0),
            spin_deg: 0.0,
            lighting: LightingController::new(),
            lighting_keys: config.lighting,
            auto_spin: config.auto_spin,
        }
    }

    pub fn key_event(&mut self, state: ElementState, key: VirtualKeyCode) {
        self.input.key_event(state, key);
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer = (x, y);
    }

    /// The once-per-frame state advance: apply a pending lighting selection,
    /// step the pose by the held movement flags, step the spin.
    pub fn advance_frame(&mut self) {
        match self.input.take_mode_select() {
            Some(LightingMode::Off) if self.lighting_keys => self.lighting.deactivate(),
            Some(mode) if self.lighting_keys => self.lighting.activate(mode),
            _ => {}
        }

        self.input.advance_pose(&mut self.pose);

        if self.auto_spin {
            self.spin_deg += SPIN_STEP_DEGREES;
        }
    }

    pub fn light_config(&self) -> Option<&'static LightConfig> {
        self.lighting.active_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glium::glutin::event::ElementState::{Pressed, Released};
    use glium::glutin::event::VirtualKeyCode;

    fn session(lighting: bool, auto_spin: bool) -> Session {
        let config = SceneConfig {
            lighting,
            auto_spin,
            ..SceneConfig::default()
        };
        Session::new(&config)
    }

    #[test]
    fn holding_a_direction_for_ten_frames_moves_one_unit() {
        let mut session = session(true, true);
        session.key_event(Pressed, VirtualKeyCode::D);
        for _ in 0..10 {
            session.advance_frame();
        }
        assert!((session.pose.x + 1.0).abs() < 1e-6);

        session.key_event(Released, VirtualKeyCode::D);
        session.key_event(Pressed, VirtualKeyCode::A);
        for _ in 0..5 {
            session.advance_frame();
        }
        assert!((session.pose.x + 0.5).abs() < 1e-6);
    }

    #[test]
    fn spin_advances_one_degree_per_frame() {
        let mut session = session(true, true);
        for _ in 0..30 {
            session.advance_frame();
        }
        assert!((session.spin_deg - 30.0).abs() < 1e-6);
    }

    #[test]
    fn spin_stays_frozen_when_disabled() {
        let mut session = session(true, false);
        session.advance_frame();
        assert_eq!(session.spin_deg, 0.0);
    }

    #[test]
    fn lighting_key_activates_a_mode_on_the_next_frame() {
        let mut session = session(true, true);
        session.key_event(Pressed, VirtualKeyCode::Key5);
        assert_eq!(session.lighting.mode(), LightingMode::Off);
        session.advance_frame();
        assert_eq!(session.lighting.mode(), LightingMode::Spot);
        assert!(session.light_config().is_some());

        // The mode stays active across frames until an explicit reset.
        session.key_event(Released, VirtualKeyCode::Key5);
        for _ in 0..3 {
            session.advance_frame();
        }
        assert_eq!(session.lighting.mode(), LightingMode::Spot);

        session.key_event(Pressed, VirtualKeyCode::Key0);
        session.advance_frame();
        assert_eq!(session.lighting.mode(), LightingMode::Off);
        assert!(session.light_config().is_none());
    }

    #[test]
    fn lighting_keys_are_inert_when_lighting_is_disabled() {
        let mut session = session(false, false);
        session.key_event(Pressed, VirtualKeyCode::Key3);
        session.advance_frame();
        assert_eq!(session.lighting.mode(), LightingMode::Off);
    }

    #[test]
    fn pointer_position_is_remembered_verbatim() {
        let mut session = session(true, true);
        session.pointer_moved(400.0, 300.0);
        assert_eq!(session.pointer, (400.0, 300.0));
    }
}
