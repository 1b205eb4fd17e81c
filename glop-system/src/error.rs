use glop_core::CoreError;
use thiserror::Error;

use crate::native::NativeWindowId;

/// Errors raised by the platform layer.
///
/// Variants for which [`SystemError::is_fatal`] returns `true` mean the native
/// environment is unusable or a handle is invalid. The library never retries
/// them; callers are expected to tear down the affected window or platform.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("couldn't open X display: {0}")]
    DisplayOpen(String),

    #[error("couldn't open X input method")]
    InputMethodOpen,

    #[error("couldn't query attributes of window {window}")]
    WindowAttributes { window: NativeWindowId },

    #[error("bad window dims: (x,y): ({x},{y}), (dx,dy): ({width},{height})")]
    InvalidWindowGeometry { x: i32, y: i32, width: i32, height: i32 },

    #[error("couldn't choose a framebuffer config (candidates: {candidates})")]
    FramebufferConfig { candidates: i32 },

    #[error("couldn't create a GL context: {0}")]
    ContextCreation(String),

    #[error("couldn't make the GL context of window {window} current")]
    MakeCurrent { window: NativeWindowId },

    #[error("couldn't create an input context for window {window}")]
    InputContext { window: NativeWindowId },

    #[error("platform has not been initialized")]
    NotInitialized,

    #[error("no native backend compiled in; enable the `x11` feature or supply a display")]
    NoBackend,

    #[error("platform has been shut down")]
    ShutDown,

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SystemError {
    /// `true` for errors that leave the display or window unusable.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, SystemError::NotInitialized | SystemError::Core(_))
    }
}
