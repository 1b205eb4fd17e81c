//! In-memory display backend.
//!
//! [`HeadlessDisplay`] is a cheap cloneable handle: one clone is moved into the
//! platform while another stays with the caller to inject native events, set
//! the physical key state and inspect what the pipeline did to its windows.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use super::{
    BackendResources, KeyStateBitmap, ModifierMask, NativeButtonEvent, NativeDisplay, NativeEvent,
    NativeKeyEvent, NativeMotionEvent, NativeWindow, NativeWindowId, WindowAttributes, WindowParams,
};
use crate::error::SystemError;

#[derive(Debug, Clone)]
struct HeadlessWindow {
    attrs: WindowAttributes,
    title: String,
    focused: bool,
    swaps: u64,
}

#[derive(Debug, Default)]
struct HeadlessState {
    windows: HashMap<NativeWindowId, HeadlessWindow>,
    pending: VecDeque<NativeEvent>,
    key_state: KeyStateBitmap,
    keymap_queries: u64,
    current: Option<NativeWindowId>,
    next_id: u64,
    shut_down: bool,
}

/// Scriptable display with no server behind it.
#[derive(Debug, Clone, Default)]
pub struct HeadlessDisplay {
    state: Arc<Mutex<HeadlessState>>,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a native event as if the server had sent it.
    pub fn inject(&self, event: NativeEvent) {
        self.state.lock().pending.push_back(event);
    }

    pub fn inject_key(&self, window: NativeWindowId, keycode: u32, keysym: u32, time: u64, pressed: bool) {
        self.inject(NativeEvent::Key(NativeKeyEvent {
            window,
            keycode,
            keysym,
            time,
            x: 0,
            y: 0,
            state: ModifierMask::empty(),
            pressed,
        }));
    }

    pub fn inject_button(&self, window: NativeWindowId, button: u32, x: i32, y: i32, pressed: bool) {
        self.inject(NativeEvent::Button(NativeButtonEvent {
            window,
            button,
            time: 0,
            x,
            y,
            state: ModifierMask::empty(),
            pressed,
        }));
    }

    pub fn inject_motion(&self, window: NativeWindowId, x: i32, y: i32) {
        self.inject(NativeEvent::Motion(NativeMotionEvent {
            window,
            time: 0,
            x,
            y,
            state: ModifierMask::empty(),
        }));
    }

    /// Marks a hardware keycode as physically held or released.
    pub fn set_key_down(&self, keycode: u32, down: bool) {
        self.state.lock().key_state.set(keycode, down);
    }

    /// Number of events still queued for any window.
    pub fn pending_events(&self) -> usize {
        self.state.lock().pending.len()
    }

    pub fn keymap_queries(&self) -> u64 {
        self.state.lock().keymap_queries
    }

    pub fn live_windows(&self) -> Vec<NativeWindowId> {
        let mut ids: Vec<_> = self.state.lock().windows.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn title(&self, id: NativeWindowId) -> Option<String> {
        self.state.lock().windows.get(&id).map(|w| w.title.clone())
    }

    pub fn is_focused(&self, id: NativeWindowId) -> bool {
        self.state.lock().windows.get(&id).is_some_and(|w| w.focused)
    }

    pub fn swap_count(&self, id: NativeWindowId) -> u64 {
        self.state.lock().windows.get(&id).map_or(0, |w| w.swaps)
    }

    pub fn current_window(&self) -> Option<NativeWindowId> {
        self.state.lock().current
    }

    pub fn is_shut_down(&self) -> bool {
        self.state.lock().shut_down
    }

    /// Drops the window's server-side record without going through
    /// [`NativeDisplay::destroy_window`], so attribute queries start failing.
    pub fn forget_window(&self, id: NativeWindowId) {
        self.state.lock().windows.remove(&id);
    }
}

impl NativeDisplay for HeadlessDisplay {
    fn create_window(&mut self, params: &WindowParams) -> Result<NativeWindow, SystemError> {
        params.validate()?;
        let mut state = self.state.lock();
        if state.shut_down {
            return Err(SystemError::ShutDown);
        }
        state.next_id += 1;
        let id = NativeWindowId(state.next_id);
        state.windows.insert(
            id,
            HeadlessWindow {
                attrs: WindowAttributes { x: params.x, y: params.y, width: params.width, height: params.height },
                title: params.title.clone(),
                focused: false,
                swaps: 0,
            },
        );
        state.current = Some(id);
        info!(window = %id, width = params.width, height = params.height, "created headless window");
        Ok(NativeWindow::new(id, BackendResources::Headless))
    }

    fn destroy_window(&mut self, window: NativeWindow) {
        let mut state = self.state.lock();
        let id = window.id();
        state.windows.remove(&id);
        state.pending.retain(|event| event.window() != id);
        if state.current == Some(id) {
            state.current = None;
        }
        debug!(window = %id, "destroyed headless window");
    }

    fn window_attributes(&mut self, id: NativeWindowId) -> Result<WindowAttributes, SystemError> {
        self.state
            .lock()
            .windows
            .get(&id)
            .map(|w| w.attrs)
            .ok_or(SystemError::WindowAttributes { window: id })
    }

    fn next_event_for(&mut self, id: NativeWindowId) -> Option<NativeEvent> {
        let mut state = self.state.lock();
        let position = state.pending.iter().position(|event| event.window() == id)?;
        state.pending.remove(position)
    }

    fn query_keymap(&self) -> KeyStateBitmap {
        let mut state = self.state.lock();
        state.keymap_queries += 1;
        state.key_state
    }

    fn set_input_focus(&mut self, id: NativeWindowId, focused: bool) {
        if let Some(window) = self.state.lock().windows.get_mut(&id) {
            window.focused = focused;
        }
    }

    fn window_position(&mut self, id: NativeWindowId) -> Result<(i32, i32), SystemError> {
        self.state
            .lock()
            .windows
            .get(&id)
            .map(|w| (w.attrs.x, w.attrs.y))
            .ok_or(SystemError::WindowAttributes { window: id })
    }

    fn resize_window(&mut self, id: NativeWindowId, width: i32, height: i32) {
        if let Some(window) = self.state.lock().windows.get_mut(&id) {
            window.attrs.width = width;
            window.attrs.height = height;
        }
    }

    fn set_title(&mut self, id: NativeWindowId, title: &str) {
        if let Some(window) = self.state.lock().windows.get_mut(&id) {
            window.title = title.to_owned();
        }
    }

    fn make_current(&mut self, window: &NativeWindow) -> Result<(), SystemError> {
        let mut state = self.state.lock();
        if !state.windows.contains_key(&window.id()) {
            return Err(SystemError::MakeCurrent { window: window.id() });
        }
        state.current = Some(window.id());
        Ok(())
    }

    fn swap_buffers(&mut self, id: NativeWindowId) {
        if let Some(window) = self.state.lock().windows.get_mut(&id) {
            window.swaps += 1;
        }
    }

    fn shutdown(&mut self) {
        let mut state = self.state.lock();
        if !state.shut_down {
            state.shut_down = true;
            state.pending.clear();
            info!("headless display shut down");
        }
    }
}
