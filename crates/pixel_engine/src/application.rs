//! Application trait and lifecycle management

use crate::engine::{Engine, EngineError};
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to drive the engine. The engine owns the
/// window, backbuffer, and input state; the application decides what
/// each frame looks like by writing into the backbuffer during
/// [`Application::render`].
pub trait Application {
    /// Initialize the application
    ///
    /// Called once after the engine is initialized, before the first
    /// frame.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called every frame after events have been dispatched and
    /// gamepads sampled. Implement per-frame logic and input handling
    /// here.
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `delta_time` - Time since last frame in seconds
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError>;

    /// Produce the frame
    ///
    /// Called after update. Fill the engine's backbuffer here; the
    /// engine presents it to the window afterwards.
    fn render(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Cleanup the application
    ///
    /// Called once when the main loop has terminated.
    fn cleanup(&mut self, engine: &mut Engine);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}
