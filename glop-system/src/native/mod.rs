//! Boundary between the event pipeline and the native windowing system.
//!
//! Everything above this module works with the plain data types defined here;
//! only the backends ([`headless`] and, with the `x11` feature, `x11`) touch
//! native handles.

use std::fmt;

use bitflags::bitflags;
use glop_core::WindowConfig;

use crate::error::SystemError;
use crate::input::keysym::Keysym;

pub mod headless;
#[cfg(feature = "x11")]
pub mod x11;

/// Identifier of a native window, unique per display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeWindowId(pub u64);

impl fmt::Display for NativeWindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

bitflags! {
    /// Modifier state carried by native key, button and motion events.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierMask: u32 {
        const SHIFT = 1 << 0;
        const LOCK = 1 << 1;
        const CONTROL = 1 << 2;
        const MOD1 = 1 << 3;
        /// Num-lock on every common keyboard mapping.
        const MOD2 = 1 << 4;
        const MOD3 = 1 << 5;
        const MOD4 = 1 << 6;
        const MOD5 = 1 << 7;
    }
}

impl ModifierMask {
    pub fn num_lock(self) -> bool {
        self.contains(ModifierMask::MOD2)
    }

    pub fn caps_lock(self) -> bool {
        self.contains(ModifierMask::LOCK)
    }
}

/// Geometry of a window, relative to its parent, in native pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowAttributes {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeKeyEvent {
    pub window: NativeWindowId,
    /// Hardware keycode; only codes below 256 appear in the key-state bitmap.
    pub keycode: u32,
    /// Unshifted symbol as resolved by the backend.
    pub keysym: Keysym,
    /// Server time in milliseconds.
    pub time: u64,
    pub x: i32,
    pub y: i32,
    pub state: ModifierMask,
    pub pressed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeButtonEvent {
    pub window: NativeWindowId,
    pub button: u32,
    pub time: u64,
    pub x: i32,
    pub y: i32,
    pub state: ModifierMask,
    pub pressed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeMotionEvent {
    pub window: NativeWindowId,
    pub time: u64,
    pub x: i32,
    pub y: i32,
    pub state: ModifierMask,
}

/// The subset of native events the poll loop understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeEvent {
    Key(NativeKeyEvent),
    Button(NativeButtonEvent),
    Motion(NativeMotionEvent),
    FocusIn { window: NativeWindowId },
    FocusOut { window: NativeWindowId },
    Destroyed { window: NativeWindowId },
    /// A client message; `is_close` is set for window-manager close requests.
    ClientMessage { window: NativeWindowId, is_close: bool },
    /// Any other event addressed to the window (crossing, configure, ...).
    /// Carries no input but still resets the auto-repeat pairing.
    Other { window: NativeWindowId, kind: i32 },
}

impl NativeEvent {
    pub fn window(&self) -> NativeWindowId {
        match *self {
            NativeEvent::Key(ref e) => e.window,
            NativeEvent::Button(ref e) => e.window,
            NativeEvent::Motion(ref e) => e.window,
            NativeEvent::FocusIn { window }
            | NativeEvent::FocusOut { window }
            | NativeEvent::Destroyed { window }
            | NativeEvent::ClientMessage { window, .. }
            | NativeEvent::Other { window, .. } => window,
        }
    }
}

/// Physical up/down state of the first 256 keycodes, one bit per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyStateBitmap(pub [u8; 32]);

impl KeyStateBitmap {
    /// `false` for codes outside the bitmap.
    pub fn is_down(&self, keycode: u32) -> bool {
        if keycode >= 256 {
            return false;
        }
        self.0[(keycode >> 3) as usize] & (1 << (keycode % 8)) != 0
    }

    pub fn set(&mut self, keycode: u32, down: bool) {
        if keycode >= 256 {
            return;
        }
        let byte = &mut self.0[(keycode >> 3) as usize];
        let bit = 1u8 << (keycode % 8);
        if down {
            *byte |= bit;
        } else {
            *byte &= !bit;
        }
    }
}

/// Creation parameters for a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowParams {
    pub title: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub resizable: bool,
}

impl WindowParams {
    pub fn new(title: impl Into<String>, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { title: title.into(), x, y, width, height, resizable: false }
    }

    pub fn from_config(config: &WindowConfig) -> Self {
        Self {
            title: config.title.clone(),
            x: config.x,
            y: config.y,
            width: config.width,
            height: config.height,
            resizable: config.resizable,
        }
    }

    /// Rejects negative positions and empty sizes.
    pub fn validate(&self) -> Result<(), SystemError> {
        if self.x < 0 || self.y < 0 || self.width <= 0 || self.height <= 0 {
            return Err(SystemError::InvalidWindowGeometry {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for WindowParams {
    fn default() -> Self {
        Self::from_config(&WindowConfig::default())
    }
}

/// Backend-specific resources owned by a window.
#[derive(Debug)]
pub(crate) enum BackendResources {
    Headless,
    #[cfg(feature = "x11")]
    X11(x11::X11WindowResources),
}

/// Every native resource belonging to one window: the window itself, its
/// rendering context and its input context.
///
/// Obtained from [`NativeDisplay::create_window`] and handed back to
/// [`NativeDisplay::destroy_window`].
#[derive(Debug)]
pub struct NativeWindow {
    id: NativeWindowId,
    pub(crate) resources: BackendResources,
}

impl NativeWindow {
    pub(crate) fn new(id: NativeWindowId, resources: BackendResources) -> Self {
        Self { id, resources }
    }

    pub fn id(&self) -> NativeWindowId {
        self.id
    }
}

/// A connection to a native display server.
///
/// One instance is owned by the platform and serialized behind a mutex, so
/// implementations only need to be `Send`.
pub trait NativeDisplay: Send + fmt::Debug {
    /// Creates and maps a window with a current rendering context.
    ///
    /// # Errors
    ///
    /// Fails atomically: nothing acquired before the failure is leaked.
    fn create_window(&mut self, params: &WindowParams) -> Result<NativeWindow, SystemError>;

    /// Releases the rendering context, input context and window, in that order.
    fn destroy_window(&mut self, window: NativeWindow);

    /// Current geometry of the window.
    fn window_attributes(&mut self, id: NativeWindowId) -> Result<WindowAttributes, SystemError>;

    /// Removes and returns the next pending event for `id`, leaving events for
    /// other windows queued. Never blocks.
    fn next_event_for(&mut self, id: NativeWindowId) -> Option<NativeEvent>;

    /// Snapshot of which keys are physically held.
    fn query_keymap(&self) -> KeyStateBitmap;

    fn set_input_focus(&mut self, id: NativeWindowId, focused: bool);

    /// Top-left of the window in root coordinates.
    fn window_position(&mut self, id: NativeWindowId) -> Result<(i32, i32), SystemError>;

    fn resize_window(&mut self, id: NativeWindowId, width: i32, height: i32);

    fn set_title(&mut self, id: NativeWindowId, title: &str);

    fn make_current(&mut self, window: &NativeWindow) -> Result<(), SystemError>;

    fn swap_buffers(&mut self, id: NativeWindowId);

    /// Value handed to callers that want to talk to the native window directly.
    fn native_handle(&self, window: &NativeWindow) -> u64 {
        window.id().0
    }

    /// Closes process-wide native state. Further calls are no-ops.
    fn shutdown(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_state_bitmap_bits() {
        let mut bitmap = KeyStateBitmap::default();
        assert!(!bitmap.is_down(38));
        bitmap.set(38, true);
        assert!(bitmap.is_down(38));
        assert_eq!(bitmap.0[4], 1 << 6);
        bitmap.set(255, true);
        assert!(bitmap.is_down(255));
        bitmap.set(38, false);
        assert!(!bitmap.is_down(38));
        bitmap.set(300, true);
        assert!(!bitmap.is_down(300));
    }

    #[test]
    fn modifier_locks() {
        let state = ModifierMask::from_bits_truncate(1 << 4);
        assert!(state.num_lock());
        assert!(!state.caps_lock());
        let state = ModifierMask::LOCK | ModifierMask::SHIFT;
        assert!(state.caps_lock());
        assert!(!state.num_lock());
    }

    #[test]
    fn window_params_validation() {
        assert!(WindowParams::new("ok", 0, 0, 1, 1).validate().is_ok());
        for (x, y, w, h) in [(-1, 0, 10, 10), (0, -1, 10, 10), (0, 0, 0, 10), (0, 0, 10, -3)] {
            let err = WindowParams::new("bad", x, y, w, h).validate().unwrap_err();
            assert!(matches!(err, SystemError::InvalidWindowGeometry { .. }));
        }
    }

    #[test]
    fn window_params_from_default_config() {
        let params = WindowParams::default();
        assert_eq!(params.title, "glop window");
        assert_eq!((params.width, params.height), (640, 480));
        assert!(!params.resizable);
    }

    #[test]
    fn event_window_accessor() {
        let id = NativeWindowId(9);
        assert_eq!(NativeEvent::FocusIn { window: id }.window(), id);
        assert_eq!(NativeEvent::ClientMessage { window: id, is_close: true }.window(), id);
        assert_eq!(NativeEvent::Other { window: id, kind: 7 }.window(), id);
    }
}
