//! Window management using GLFW
//!
//! Owns the native top-level window and its event queue. Each frame the
//! engine drains the queue non-blockingly and receives typed
//! [`PlatformEvent`] records; raw platform details (GLFW actions,
//! scancodes) are decoded here at the boundary and never escape.

use crate::input::KeyTransition;
use thiserror::Error;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW could not be initialized at all.
    #[error("GLFW initialization failed")]
    InitializationFailed,

    /// The native window could not be created.
    #[error("Window creation failed")]
    CreationFailed,
}

/// Result alias for window operations.
pub type WindowResult<T> = Result<T, WindowError>;

/// A window event after boundary translation.
///
/// One record per queued platform event the engine cares about;
/// everything else stays with GLFW's default handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// The user asked to close the window.
    CloseRequested,
    /// The client area changed size (screen coordinates).
    Resized(i32, i32),
    /// The platform asked for the window contents to be repainted.
    RedrawRequested,
    /// The window gained (`true`) or lost (`false`) input focus.
    FocusChanged(bool),
    /// A keyboard key changed or repeated, with its down-state
    /// transition already decoded.
    Key {
        /// The key, still in platform terms; mapping to logical
        /// actions happens in the input layer.
        key: glfw::Key,
        /// Previous-frame/current-frame down state.
        transition: KeyTransition,
    },
}

/// GLFW window wrapper with proper resource management
pub struct Window {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl Window {
    /// Create the single top-level window.
    ///
    /// The window carries no GL/Vulkan context; all drawing goes
    /// through the software presenter.
    pub fn new(title: &str, width: u32, height: u32, resizable: bool) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|_| WindowError::InitializationFailed)?;

        // Software presentation only; no client API context.
        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        glfw.window_hint(glfw::WindowHint::Resizable(resizable));

        let (mut window, events) = glfw
            .create_window(width, height, title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed)?;

        window.set_key_polling(true);
        window.set_close_polling(true);
        window.set_size_polling(true);
        window.set_refresh_polling(true);
        window.set_focus_polling(true);

        Ok(Self {
            glfw,
            window,
            events,
        })
    }

    /// Drain all pending platform events without blocking and return
    /// them as typed records, in queue order.
    pub fn poll_events(&mut self) -> Vec<PlatformEvent> {
        self.glfw.poll_events();
        glfw::flush_messages(&self.events)
            .filter_map(|(_, event)| translate_event(&event))
            .collect()
    }

    /// Whether the platform has flagged the window for closing.
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Current client-area size in pixels.
    ///
    /// Queried live from the native window; the user may resize at any
    /// time, so callers must not cache this beyond one frame.
    pub fn client_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width.max(0) as u32, height.max(0) as u32)
    }

    /// Handle to the GLFW instance, for subsystems that share it.
    pub fn glfw_handle(&self) -> &glfw::Glfw {
        &self.glfw
    }

    /// The native window, for handing its raw handles to the presenter.
    pub fn native(&self) -> &glfw::Window {
        &self.window
    }
}

/// Translate one raw GLFW event into a typed record.
///
/// Unrecognized events map to `None` and are dropped, which leaves them
/// to the platform's default handling.
pub(crate) fn translate_event(event: &glfw::WindowEvent) -> Option<PlatformEvent> {
    match event {
        glfw::WindowEvent::Close => Some(PlatformEvent::CloseRequested),
        glfw::WindowEvent::Size(width, height) => Some(PlatformEvent::Resized(*width, *height)),
        glfw::WindowEvent::Refresh => Some(PlatformEvent::RedrawRequested),
        glfw::WindowEvent::Focus(focused) => Some(PlatformEvent::FocusChanged(*focused)),
        glfw::WindowEvent::Key(key, _scancode, action, _mods) => Some(PlatformEvent::Key {
            key: *key,
            transition: KeyTransition::from_action(*action),
        }),
        _ => None,
    }
}
