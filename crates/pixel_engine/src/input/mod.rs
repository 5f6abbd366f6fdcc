//! Input management system
//!
//! Two independently sampled channels, unified once per frame: keyboard
//! events coming out of the window's queue, and gamepad state polled
//! from the [`gamepad`] port. Keyboard actions are edge-triggered: a
//! logical key fires on its down- and up-transitions, never while held.

pub mod gamepad;

use gamepad::{GamepadSnapshot, MAX_GAMEPADS};

/// A key event's previous and current down state, decoded at the
/// platform boundary.
///
/// The rest of the system never touches raw key actions or repeat
/// flags; everything is derived from these two booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTransition {
    /// The key was down before this event.
    pub was_down: bool,
    /// The key is down after this event.
    pub is_down: bool,
}

impl KeyTransition {
    /// Decode a GLFW key action.
    ///
    /// `Repeat` means the key was already down and still is, so it
    /// never produces an edge.
    pub fn from_action(action: glfw::Action) -> Self {
        match action {
            glfw::Action::Press => Self {
                was_down: false,
                is_down: true,
            },
            glfw::Action::Repeat => Self {
                was_down: true,
                is_down: true,
            },
            glfw::Action::Release => Self {
                was_down: true,
                is_down: false,
            },
        }
    }

    /// Whether this event is a state change rather than a held repeat.
    pub fn is_edge(&self) -> bool {
        self.was_down != self.is_down
    }
}

/// Logical keys the engine recognizes.
///
/// The fixed virtual-key set of the platform layer; anything outside it
/// is ignored by the keyboard channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalKey {
    /// Move forward (W)
    MoveForward,
    /// Move backward (S)
    MoveBackward,
    /// Strafe left (A)
    StrafeLeft,
    /// Strafe right (D)
    StrafeRight,
    /// Rotate left (Q)
    RotateLeft,
    /// Rotate right (E)
    RotateRight,
    /// Directional pad up (Up arrow)
    DpadUp,
    /// Directional pad down (Down arrow)
    DpadDown,
    /// Directional pad left (Left arrow)
    DpadLeft,
    /// Directional pad right (Right arrow)
    DpadRight,
    /// Confirm / primary action (Space)
    Confirm,
    /// Cancel (Escape)
    Cancel,
}

const KEY_COUNT: usize = 12;

impl LogicalKey {
    fn index(self) -> usize {
        match self {
            Self::MoveForward => 0,
            Self::MoveBackward => 1,
            Self::StrafeLeft => 2,
            Self::StrafeRight => 3,
            Self::RotateLeft => 4,
            Self::RotateRight => 5,
            Self::DpadUp => 6,
            Self::DpadDown => 7,
            Self::DpadLeft => 8,
            Self::DpadRight => 9,
            Self::Confirm => 10,
            Self::Cancel => 11,
        }
    }
}

/// Map a platform key to its logical action, if it has one.
///
/// Unmapped keys are not an error; their events are simply dropped.
pub fn map_key(key: glfw::Key) -> Option<LogicalKey> {
    match key {
        glfw::Key::W => Some(LogicalKey::MoveForward),
        glfw::Key::S => Some(LogicalKey::MoveBackward),
        glfw::Key::A => Some(LogicalKey::StrafeLeft),
        glfw::Key::D => Some(LogicalKey::StrafeRight),
        glfw::Key::Q => Some(LogicalKey::RotateLeft),
        glfw::Key::E => Some(LogicalKey::RotateRight),
        glfw::Key::Up => Some(LogicalKey::DpadUp),
        glfw::Key::Down => Some(LogicalKey::DpadDown),
        glfw::Key::Left => Some(LogicalKey::DpadLeft),
        glfw::Key::Right => Some(LogicalKey::DpadRight),
        glfw::Key::Space => Some(LogicalKey::Confirm),
        glfw::Key::Escape => Some(LogicalKey::Cancel),
        _ => None,
    }
}

/// Input manager
///
/// Keeps level state (`held`) across frames and edge state (`pressed`,
/// `released`) for the current frame only. Gamepad snapshots are
/// refreshed every frame by the engine and kept for that frame.
pub struct InputManager {
    held: [bool; KEY_COUNT],
    pressed: [bool; KEY_COUNT],
    released: [bool; KEY_COUNT],
    gamepads: [GamepadSnapshot; MAX_GAMEPADS],
}

impl InputManager {
    /// Create a new input manager with everything up and disconnected.
    pub fn new() -> Self {
        Self {
            held: [false; KEY_COUNT],
            pressed: [false; KEY_COUNT],
            released: [false; KEY_COUNT],
            gamepads: [GamepadSnapshot::default(); MAX_GAMEPADS],
        }
    }

    /// Clear per-frame edge state. Called at the top of every frame,
    /// before event dispatch.
    pub fn begin_frame(&mut self) {
        self.pressed = [false; KEY_COUNT];
        self.released = [false; KEY_COUNT];
    }

    /// Feed one keyboard event from the window's queue.
    ///
    /// Held repeats (`was_down == is_down`) are discarded here, which
    /// is what prevents repeat-fire while a key stays down.
    pub fn handle_key(&mut self, key: glfw::Key, transition: KeyTransition) {
        let Some(logical) = map_key(key) else {
            return;
        };

        if logical == LogicalKey::Cancel {
            // Both states are independently observable for diagnostics.
            if transition.is_down {
                log::debug!("cancel key is down");
            }
            if transition.was_down {
                log::debug!("cancel key was down");
            }
        }

        if !transition.is_edge() {
            return;
        }

        let i = logical.index();
        if transition.is_down {
            self.pressed[i] = true;
            self.held[i] = true;
        } else {
            self.released[i] = true;
            self.held[i] = false;
        }
    }

    /// Whether the key went down this frame.
    pub fn pressed(&self, key: LogicalKey) -> bool {
        self.pressed[key.index()]
    }

    /// Whether the key went up this frame.
    pub fn released(&self, key: LogicalKey) -> bool {
        self.released[key.index()]
    }

    /// Whether the key is currently down.
    pub fn held(&self, key: LogicalKey) -> bool {
        self.held[key.index()]
    }

    /// Store this frame's snapshot for a gamepad slot.
    pub fn set_gamepad(&mut self, slot: usize, snapshot: GamepadSnapshot) {
        if slot < MAX_GAMEPADS {
            self.gamepads[slot] = snapshot;
        }
    }

    /// This frame's snapshot for a gamepad slot.
    ///
    /// Out-of-range slots read as disconnected.
    pub fn gamepad(&self, slot: usize) -> GamepadSnapshot {
        self.gamepads
            .get(slot)
            .copied()
            .unwrap_or_default()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
