//! Rendering and presentation
//!
//! The engine does no drawing of its own: the application fills the
//! [`backbuffer`], and the [`presenter`] pushes it to the [`window`].

pub mod backbuffer;
pub mod presenter;
pub mod window;

pub use backbuffer::{Backbuffer, PixelFormat, BYTES_PER_PIXEL};
pub use presenter::{PresentError, Presenter};
pub use window::{PlatformEvent, Window, WindowError};
