//! Core engine implementation
//!
//! The frame loop: drain window events, sample gamepads, let the
//! application update and fill the backbuffer, then present it
//! stretched to the live client size. Single-threaded and cooperative;
//! the only cancellation mechanism is the `running` flag, written by
//! the close/quit paths and observed at the top of each iteration.

use crate::{
    application::Application,
    config::Config,
    foundation::time::Timer,
    input::{
        gamepad::{self, GamepadPort, MAX_GAMEPADS},
        InputManager,
    },
    render::{
        backbuffer::Backbuffer,
        presenter::{PresentError, Presenter},
        window::{PlatformEvent, Window, WindowError},
    },
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main engine struct
///
/// The engine coordinates all subsystems and manages the main loop.
pub struct Engine {
    // The presenter holds raw handles into the window; field order
    // makes it drop first.
    presenter: Presenter,
    window: Window,

    /// Offscreen buffer the application renders into
    backbuffer: Backbuffer,

    /// Input handling system
    input: InputManager,

    /// Controller capability, live or stub, fixed at startup
    gamepads: Box<dyn GamepadPort>,

    /// Frame timing
    timer: Timer,

    /// Whether the engine should continue running
    run_state: RunState,
}

/// The loop's continuation flag.
///
/// Set once at startup, cleared at most once by the close/quit paths,
/// and never reset: there is no operation that turns it back on. The
/// loop reads it once per iteration, at the top, so the iteration in
/// which it clears still completes.
#[derive(Debug)]
struct RunState {
    running: bool,
}

impl RunState {
    fn new() -> Self {
        Self { running: true }
    }

    fn is_running(&self) -> bool {
        self.running
    }

    /// Clear the flag. Idempotent; there is no way back to running.
    fn stop(&mut self) {
        self.running = false;
    }

    /// Apply one window event's effect on the flag.
    fn observe(&mut self, event: &PlatformEvent) {
        if matches!(event, PlatformEvent::CloseRequested) {
            self.stop();
        }
    }
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");

        let window = Window::new(
            &config.window.title,
            config.window.width,
            config.window.height,
            config.window.resizable,
        )?;
        let presenter = Presenter::new(window.native())?;
        let backbuffer = Backbuffer::new(config.backbuffer.width, config.backbuffer.height);

        let gamepads = if config.gamepads {
            gamepad::resolve(Some(window.glfw_handle().clone()))
        } else {
            gamepad::resolve(None)
        };

        log::info!(
            "Engine ready: window {}x{}, backbuffer {}x{}",
            config.window.width,
            config.window.height,
            backbuffer.width(),
            backbuffer.height()
        );

        Ok(Self {
            presenter,
            window,
            backbuffer,
            input: InputManager::new(),
            gamepads,
            timer: Timer::new(),
            run_state: RunState::new(),
        })
    }

    /// Run the engine main loop with the given application
    pub fn run<T: Application>(config: EngineConfig, app: &mut T) -> Result<(), EngineError> {
        let mut engine = Self::new(config)?;

        app.initialize(&mut engine)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {}", e)))?;

        log::info!("Starting main loop...");

        while engine.run_state.is_running() {
            engine.timer.update();
            let delta_time = engine.timer.delta_time();

            // 1. Drain and dispatch pending window events.
            engine.pump_events()?;

            // 2. Resample every controller slot.
            engine.sample_gamepads();

            // 3-4. Application logic, then frame production.
            app.update(&mut engine, delta_time)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))?;
            app.render(&mut engine)
                .map_err(|e| EngineError::ApplicationError(format!("App render: {}", e)))?;

            // 5. Present at whatever size the client area has now.
            engine.present()?;
        }

        app.cleanup(&mut engine);

        log::info!(
            "Engine shutdown complete after {} frames",
            engine.timer.frame_count()
        );
        Ok(())
    }

    /// Drain all pending window events without blocking and dispatch
    /// each one. Also observes the platform quit signal.
    fn pump_events(&mut self) -> Result<(), EngineError> {
        self.input.begin_frame();

        for event in self.window.poll_events() {
            // The continuation flag reacts first, then side effects.
            self.run_state.observe(&event);
            self.dispatch(event)?;
        }

        if self.run_state.is_running() && self.window.should_close() {
            log::info!("Quit signal observed");
            self.run_state.stop();
        }

        Ok(())
    }

    /// One isolated handler per event type; no fallthrough between
    /// them.
    fn dispatch(&mut self, event: PlatformEvent) -> Result<(), EngineError> {
        match event {
            PlatformEvent::CloseRequested => {
                // Flag transition already applied by the run state.
                log::info!("Window close requested");
            }
            PlatformEvent::Resized(width, height) => {
                // The backbuffer keeps its configured size; presentation
                // stretches to the new client area.
                log::debug!(
                    "Client area resized to {}x{}; backbuffer stays {}x{}",
                    width,
                    height,
                    self.backbuffer.width(),
                    self.backbuffer.height()
                );
            }
            PlatformEvent::RedrawRequested => {
                // Repaint the exposed area from the existing backbuffer.
                self.present()?;
            }
            PlatformEvent::FocusChanged(focused) => {
                log::debug!("Window focus changed: focused={}", focused);
            }
            PlatformEvent::Key { key, transition } => {
                self.input.handle_key(key, transition);
            }
        }
        Ok(())
    }

    fn sample_gamepads(&mut self) {
        for slot in 0..MAX_GAMEPADS {
            let snapshot = self.gamepads.sample(slot);
            self.input.set_gamepad(slot, snapshot);
        }
    }

    /// Present the current backbuffer stretched to the live client
    /// size, queried fresh from the window.
    pub fn present(&mut self) -> Result<(), EngineError> {
        let (width, height) = self.window.client_size();
        self.presenter.present(&self.backbuffer, width, height)?;
        Ok(())
    }

    /// Request engine shutdown
    ///
    /// Takes effect at the next iteration boundary; the current frame
    /// completes.
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.run_state.stop();
    }

    /// Whether the main loop will run another iteration.
    pub fn is_running(&self) -> bool {
        self.run_state.is_running()
    }

    /// Get the backbuffer
    pub fn backbuffer(&self) -> &Backbuffer {
        &self.backbuffer
    }

    /// Get mutable access to the backbuffer
    pub fn backbuffer_mut(&mut self) -> &mut Backbuffer {
        &mut self.backbuffer
    }

    /// Get the input manager
    pub fn input(&self) -> &InputManager {
        &self.input
    }

    /// Get mutable access to the controller port (e.g. for vibration)
    pub fn gamepads_mut(&mut self) -> &mut dyn GamepadPort {
        self.gamepads.as_mut()
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Window configuration
    pub window: WindowConfig,

    /// Backbuffer configuration
    pub backbuffer: BackbufferConfig,

    /// Whether to bind the live gamepad port at startup
    pub gamepads: bool,
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Initial client-area width
    pub width: u32,

    /// Initial client-area height
    pub height: u32,

    /// Whether the window is resizable
    pub resizable: bool,
}

/// Backbuffer configuration
///
/// The backbuffer keeps this size for the process lifetime regardless
/// of window resizes; presentation stretches it to the client area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackbufferConfig {
    /// Buffer width in pixels
    pub width: u32,

    /// Buffer height in pixels
    pub height: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig {
                title: "Pixel Engine Application".to_string(),
                width: 1280,
                height: 720,
                resizable: true,
            },
            backbuffer: BackbufferConfig {
                width: 1280,
                height: 720,
            },
            gamepads: true,
        }
    }
}

impl Config for EngineConfig {}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Window system error
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// Presentation error
    #[error("Presentation error: {0}")]
    Present(#[from] PresentError),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyTransition;

    #[test]
    fn test_run_state_starts_running() {
        let state = RunState::new();
        assert!(state.is_running());
    }

    #[test]
    fn test_run_state_stops_on_close_event() {
        let mut state = RunState::new();
        state.observe(&PlatformEvent::CloseRequested);
        assert!(!state.is_running());
    }

    #[test]
    fn test_run_state_ignores_other_events() {
        let mut state = RunState::new();
        state.observe(&PlatformEvent::Resized(640, 480));
        state.observe(&PlatformEvent::RedrawRequested);
        state.observe(&PlatformEvent::FocusChanged(false));
        state.observe(&PlatformEvent::Key {
            key: glfw::Key::Escape,
            transition: KeyTransition {
                was_down: false,
                is_down: true,
            },
        });
        assert!(state.is_running());
    }

    #[test]
    fn test_run_state_never_resets() {
        let mut state = RunState::new();
        state.stop();
        assert!(!state.is_running());

        // Neither repeated stops nor later events turn it back on.
        state.stop();
        state.observe(&PlatformEvent::FocusChanged(true));
        state.observe(&PlatformEvent::Resized(1280, 720));
        assert!(!state.is_running());
    }

    #[test]
    fn test_default_config_matches_platform_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.backbuffer.width, 1280);
        assert_eq!(config.backbuffer.height, 720);
        assert!(config.window.resizable);
        assert!(config.gamepads);
    }
}
