//! Gamepad sampling with graceful degradation
//!
//! Controller access is modelled as a capability with two variants
//! picked once at startup: a live port backed by GLFW's joystick API,
//! and a stub port for when no platform handle exists (headless runs,
//! tests). Callers cannot tell which variant is active; with the stub,
//! every slot just reads as permanently disconnected and vibration
//! commands go nowhere.

use bitflags::bitflags;

/// Number of controller slots sampled every frame.
pub const MAX_GAMEPADS: usize = 4;

bitflags! {
    /// Decoded gamepad button mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct GamepadButtons: u16 {
        /// Directional pad up
        const DPAD_UP = 0x0001;
        /// Directional pad down
        const DPAD_DOWN = 0x0002;
        /// Directional pad left
        const DPAD_LEFT = 0x0004;
        /// Directional pad right
        const DPAD_RIGHT = 0x0008;
        /// Start button
        const START = 0x0010;
        /// Back button
        const BACK = 0x0020;
        /// Left shoulder bumper
        const LEFT_SHOULDER = 0x0100;
        /// Right shoulder bumper
        const RIGHT_SHOULDER = 0x0200;
        /// Primary action button
        const A = 0x1000;
        /// B button
        const B = 0x2000;
        /// X button
        const X = 0x4000;
        /// Y button
        const Y = 0x8000;
    }
}

/// One slot's state as sampled this frame.
///
/// Controller state is resampled fresh every frame; nothing here
/// persists across frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct GamepadSnapshot {
    /// Whether the slot is occupied by a mapped gamepad.
    pub connected: bool,
    /// Currently held buttons.
    pub buttons: GamepadButtons,
    /// Left stick horizontal axis, full signed 16-bit range.
    pub stick_x: i16,
    /// Left stick vertical axis, full signed 16-bit range.
    pub stick_y: i16,
}

/// Controller device capability.
///
/// `sample` never fails: an absent driver or unoccupied slot is a
/// steady state reported as `connected == false`, not an error.
pub trait GamepadPort {
    /// Current state of one slot.
    fn sample(&mut self, slot: usize) -> GamepadSnapshot;

    /// Command both vibration motors for one slot (magnitudes
    /// 0..=65535). Returns whether the command reached a connected
    /// device; `false` is not an error.
    fn set_vibration(&mut self, slot: usize, low: u16, high: u16) -> bool;
}

/// Pick the port variant for this process.
///
/// Decided once at startup and fixed for the process lifetime: with a
/// platform handle the live GLFW port is used, otherwise the stub.
pub fn resolve(glfw: Option<glfw::Glfw>) -> Box<dyn GamepadPort> {
    match glfw {
        Some(glfw) => {
            log::info!("Gamepad port: GLFW joystick backend, {} slots", MAX_GAMEPADS);
            Box::new(GlfwGamepadPort::new(glfw))
        }
        None => {
            log::warn!("Gamepad port unavailable, controllers will read as disconnected");
            Box::new(NullGamepadPort)
        }
    }
}

const SLOT_IDS: [glfw::JoystickId; MAX_GAMEPADS] = [
    glfw::JoystickId::Joystick1,
    glfw::JoystickId::Joystick2,
    glfw::JoystickId::Joystick3,
    glfw::JoystickId::Joystick4,
];

/// Per-slot record of the most recent vibration command.
///
/// GLFW exposes no rumble entry point, so the live port records what
/// it was told instead of reaching hardware. A command to a
/// disconnected slot resets the record, matching motors that spin
/// down when the device goes away.
#[derive(Debug, Default)]
pub struct VibrationState {
    motors: [(u16, u16); MAX_GAMEPADS],
}

impl VibrationState {
    /// Record one command. Returns `connected` back, which is also
    /// what `GamepadPort::set_vibration` reports.
    pub fn command(&mut self, slot: usize, connected: bool, low: u16, high: u16) -> bool {
        if let Some(entry) = self.motors.get_mut(slot) {
            *entry = if connected { (low, high) } else { (0, 0) };
        }
        connected
    }

    /// Last commanded motor pair for a slot.
    pub fn last(&self, slot: usize) -> (u16, u16) {
        self.motors.get(slot).copied().unwrap_or((0, 0))
    }
}

/// Live port backed by GLFW's joystick/gamepad API.
pub struct GlfwGamepadPort {
    glfw: glfw::Glfw,
    vibration: VibrationState,
}

impl GlfwGamepadPort {
    /// Create a live port sharing the window's GLFW instance.
    pub fn new(glfw: glfw::Glfw) -> Self {
        Self {
            glfw,
            vibration: VibrationState::default(),
        }
    }

    fn joystick(&mut self, slot: usize) -> Option<glfw::Joystick> {
        SLOT_IDS.get(slot).map(|&id| self.glfw.get_joystick(id))
    }
}

impl GamepadPort for GlfwGamepadPort {
    fn sample(&mut self, slot: usize) -> GamepadSnapshot {
        let Some(joystick) = self.joystick(slot) else {
            return GamepadSnapshot::default();
        };
        if !joystick.is_present() {
            // Slot unoccupied; expected steady state.
            return GamepadSnapshot::default();
        }
        let Some(state) = joystick.get_gamepad_state() else {
            // Present but without a gamepad mapping; treat as unoccupied.
            return GamepadSnapshot::default();
        };

        let held = |button| state.get_button_state(button) == glfw::Action::Press;

        let mut buttons = GamepadButtons::empty();
        buttons.set(GamepadButtons::DPAD_UP, held(glfw::GamepadButton::ButtonDpadUp));
        buttons.set(GamepadButtons::DPAD_DOWN, held(glfw::GamepadButton::ButtonDpadDown));
        buttons.set(GamepadButtons::DPAD_LEFT, held(glfw::GamepadButton::ButtonDpadLeft));
        buttons.set(GamepadButtons::DPAD_RIGHT, held(glfw::GamepadButton::ButtonDpadRight));
        buttons.set(GamepadButtons::START, held(glfw::GamepadButton::ButtonStart));
        buttons.set(GamepadButtons::BACK, held(glfw::GamepadButton::ButtonBack));
        buttons.set(
            GamepadButtons::LEFT_SHOULDER,
            held(glfw::GamepadButton::ButtonLeftBumper),
        );
        buttons.set(
            GamepadButtons::RIGHT_SHOULDER,
            held(glfw::GamepadButton::ButtonRightBumper),
        );
        buttons.set(GamepadButtons::A, held(glfw::GamepadButton::ButtonA));
        buttons.set(GamepadButtons::B, held(glfw::GamepadButton::ButtonB));
        buttons.set(GamepadButtons::X, held(glfw::GamepadButton::ButtonX));
        buttons.set(GamepadButtons::Y, held(glfw::GamepadButton::ButtonY));

        GamepadSnapshot {
            connected: true,
            buttons,
            stick_x: axis_to_i16(state.get_axis(glfw::GamepadAxis::AxisLeftX)),
            stick_y: axis_to_i16(state.get_axis(glfw::GamepadAxis::AxisLeftY)),
        }
    }

    fn set_vibration(&mut self, slot: usize, low: u16, high: u16) -> bool {
        let connected = match self.joystick(slot) {
            Some(joystick) => joystick.is_present(),
            None => false,
        };
        self.vibration.command(slot, connected, low, high)
    }
}

/// Stub port: every slot permanently disconnected, vibration a no-op.
pub struct NullGamepadPort;

impl GamepadPort for NullGamepadPort {
    fn sample(&mut self, _slot: usize) -> GamepadSnapshot {
        GamepadSnapshot::default()
    }

    fn set_vibration(&mut self, _slot: usize, _low: u16, _high: u16) -> bool {
        false
    }
}

/// Scale a normalized axis (-1.0..=1.0) to the signed 16-bit range.
fn axis_to_i16(value: f32) -> i16 {
    (value.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_port_reports_disconnected() {
        let mut port = NullGamepadPort;
        for slot in 0..MAX_GAMEPADS {
            let snapshot = port.sample(slot);
            assert!(!snapshot.connected);
            assert!(snapshot.buttons.is_empty());
            assert_eq!(snapshot.stick_x, 0);
            assert_eq!(snapshot.stick_y, 0);
        }
        // Out-of-range slots behave the same.
        assert!(!port.sample(MAX_GAMEPADS + 1).connected);
    }

    #[test]
    fn test_null_port_vibration_is_noop() {
        let mut port = NullGamepadPort;
        for slot in 0..MAX_GAMEPADS {
            assert!(!port.set_vibration(slot, 60_000, 60_000));
            assert!(!port.set_vibration(slot, 0, 0));
        }
    }

    #[test]
    fn test_stub_resolution_when_no_platform_handle() {
        let mut port = resolve(None);
        assert!(!port.sample(0).connected);
        assert!(!port.set_vibration(0, 1, 1));
    }

    #[test]
    fn test_axis_scaling() {
        assert_eq!(axis_to_i16(0.0), 0);
        assert_eq!(axis_to_i16(1.0), i16::MAX);
        assert_eq!(axis_to_i16(-1.0), -i16::MAX);
        // Out-of-range hardware values are clamped.
        assert_eq!(axis_to_i16(2.5), i16::MAX);
        assert_eq!(axis_to_i16(-7.0), -i16::MAX);
    }

    #[test]
    fn test_vibration_recorded_for_connected_slot() {
        let mut state = VibrationState::default();
        assert_eq!(state.last(0), (0, 0));

        assert!(state.command(0, true, 60_000, 60_000));
        assert_eq!(state.last(0), (60_000, 60_000));

        // Other slots are untouched.
        assert_eq!(state.last(1), (0, 0));

        assert!(state.command(0, true, 0, 0));
        assert_eq!(state.last(0), (0, 0));
    }

    #[test]
    fn test_vibration_resets_when_slot_disconnects() {
        let mut state = VibrationState::default();
        state.command(2, true, 1_000, 2_000);
        assert_eq!(state.last(2), (1_000, 2_000));

        assert!(!state.command(2, false, 9_999, 9_999));
        assert_eq!(state.last(2), (0, 0));
    }

    #[test]
    fn test_vibration_out_of_range_slot_is_harmless() {
        let mut state = VibrationState::default();
        assert!(!state.command(MAX_GAMEPADS + 3, false, 5, 5));
        assert_eq!(state.last(MAX_GAMEPADS + 3), (0, 0));
        for slot in 0..MAX_GAMEPADS {
            assert_eq!(state.last(slot), (0, 0));
        }
    }

    #[test]
    fn test_button_flags_are_distinct() {
        let all = GamepadButtons::all();
        assert_eq!(all.bits().count_ones(), 12);
        assert!(all.contains(GamepadButtons::A | GamepadButtons::DPAD_UP));
    }
}
