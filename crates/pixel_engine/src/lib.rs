//! # Pixel Engine
//!
//! A small software-presentation engine: it owns a native window, a
//! CPU-side backbuffer, and a cooperative frame loop that drains window
//! events, samples input, lets the application fill the backbuffer, and
//! presents the result stretched to the live client area.
//!
//! What gets drawn is entirely up to the application; the engine only
//! guarantees the buffer contract (top-down rows, 32 bits per pixel,
//! blue in the low byte) and the per-frame ordering.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pixel_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn render(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         engine.backbuffer_mut().pixels_mut().fill(0);
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     pixel_engine::foundation::logging::init();
//!     let config = EngineConfig::default();
//!     let mut app = MyApp;
//!     Engine::run(config, &mut app)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod foundation;
pub mod input;
pub mod render;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use engine::{BackbufferConfig, Engine, EngineConfig, EngineError, WindowConfig};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        input::{
            gamepad::{GamepadButtons, GamepadSnapshot, MAX_GAMEPADS},
            InputManager, LogicalKey,
        },
        render::backbuffer::Backbuffer,
        AppError, Application, BackbufferConfig, Engine, EngineConfig, EngineError, WindowConfig,
    };
}
