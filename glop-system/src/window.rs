//! Windows and the per-frame poll loop.

use std::sync::Arc;

use glop_core::RectInt;
use tracing::{trace, warn};

use crate::error::SystemError;
use crate::input::repeat_filter::{FilterVerdict, KeyRepeatFilter};
use crate::input::synth::{synth_button, synth_key, synth_motion};
use crate::input::{EventBatch, EventQueue};
use crate::native::{NativeEvent, NativeWindow, NativeWindowId};
use crate::platform::Platform;

/// A native window, its rendering and input contexts, and the queue of
/// normalized events waiting to be collected.
///
/// Dropping the window releases its native resources.
#[derive(Debug)]
pub struct Window {
    platform: Arc<Platform>,
    native: Option<NativeWindow>,
    id: NativeWindowId,
    queue: EventQueue,
}

impl Window {
    pub(crate) fn new(platform: Arc<Platform>, native: NativeWindow) -> Self {
        let id = native.id();
        Self { platform, native: Some(native), id, queue: EventQueue::new() }
    }

    pub fn id(&self) -> NativeWindowId {
        self.id
    }

    pub fn platform(&self) -> &Arc<Platform> {
        &self.platform
    }

    /// Drains every pending native event for this window into the queue.
    ///
    /// Never blocks. Returns the clock time after draining.
    ///
    /// # Errors
    ///
    /// [`SystemError::WindowAttributes`] if the window geometry can no longer
    /// be queried, which means the native window is gone.
    pub fn think(&mut self) -> Result<i64, SystemError> {
        self.platform.ensure_running()?;
        let platform = &self.platform;
        let clock = platform.clock();
        let mapper = platform.key_mapper();

        let mut display = platform.display();
        let attrs = display.window_attributes(self.id)?;
        let mut filter = KeyRepeatFilter::new(platform.config().input.filter_key_repeat);

        while let Some(event) = display.next_event_for(self.id) {
            if filter.check(&event, || display.query_keymap()) == FilterVerdict::Suppress {
                continue;
            }

            match event {
                NativeEvent::Key(ref key) => {
                    if let Some(normalized) = synth_key(&attrs, key, mapper, clock) {
                        self.queue.push(normalized);
                    }
                }
                NativeEvent::Button(ref button) => {
                    if let Some(normalized) = synth_button(&attrs, button, mapper, clock) {
                        self.queue.push(normalized);
                    }
                }
                NativeEvent::Motion(ref motion) => {
                    self.queue.extend(synth_motion(&attrs, motion, clock));
                }
                NativeEvent::FocusIn { .. } => display.set_input_focus(self.id, true),
                NativeEvent::FocusOut { .. } => display.set_input_focus(self.id, false),
                NativeEvent::Destroyed { .. } => {
                    warn!(window = %self.id, "think: unhandled event type (destroy notification)");
                }
                NativeEvent::ClientMessage { is_close: true, .. } => {
                    warn!(window = %self.id, "window manager close request received but ignored");
                }
                NativeEvent::ClientMessage { is_close: false, .. } => {
                    warn!(window = %self.id, "think: unhandled event type (client message)");
                }
                NativeEvent::Other { kind, .. } => {
                    trace!(window = %self.id, kind, "think: skipping non-input event");
                }
            }
        }
        drop(display);

        trace!(window = %self.id, queued = self.queue.len(), "think complete");
        Ok(clock.now_millis())
    }

    /// Hands every queued event to the caller and empties the queue.
    ///
    /// The horizon is read before the queue is taken, so it is never earlier
    /// than any returned timestamp.
    pub fn get_events(&mut self) -> EventBatch {
        let horizon = self.platform.now_millis();
        self.queue.drain(horizon)
    }

    /// Number of events queued since the last [`Window::get_events`].
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Position in root coordinates and current size.
    pub fn window_dims(&self) -> Result<RectInt, SystemError> {
        self.platform.ensure_running()?;
        let mut display = self.platform.display();
        let (x, y) = display.window_position(self.id)?;
        let attrs = display.window_attributes(self.id)?;
        Ok(RectInt::from_coords(x, y, attrs.width, attrs.height))
    }

    pub fn set_window_size(&self, width: i32, height: i32) {
        if self.platform.ensure_running().is_ok() {
            self.platform.display().resize_window(self.id, width, height);
        }
    }

    pub fn set_title(&self, title: &str) {
        if self.platform.ensure_running().is_ok() {
            self.platform.display().set_title(self.id, title);
        }
    }

    pub fn swap_buffers(&self) {
        if self.platform.ensure_running().is_ok() {
            self.platform.display().swap_buffers(self.id);
        }
    }

    /// Makes this window's rendering context current on the calling thread.
    pub fn make_current(&self) -> Result<(), SystemError> {
        self.platform.ensure_running()?;
        match self.native {
            Some(ref native) => self.platform.display().make_current(native),
            None => Err(SystemError::MakeCurrent { window: self.id }),
        }
    }

    /// The backend's own handle for the window (the X window id under X11).
    pub fn native_handle(&self) -> u64 {
        match self.native {
            Some(ref native) => self.platform.display().native_handle(native),
            None => self.id.0,
        }
    }

    /// Releases the native resources now instead of on drop.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(native) = self.native.take() {
            self.platform.release_window(native);
        }
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::input::codes;
    use crate::input::keysym;
    use crate::input::{DeviceType, NormalizedEvent};
    use crate::native::headless::HeadlessDisplay;
    use crate::native::WindowParams;
    use glop_core::GlopConfig;
    use pretty_assertions::assert_eq;

    struct Fixture {
        clock: Arc<ManualClock>,
        display: HeadlessDisplay,
        window: Window,
    }

    fn fixture_with(config: GlopConfig, height: i32) -> Fixture {
        let clock = Arc::new(ManualClock::starting_at_millis(100));
        let display = HeadlessDisplay::new();
        let platform = Arc::new(Platform::new(Box::new(display.clone()), clock.clone(), config));
        let window = platform.create_window(WindowParams::new("test", 0, 0, 200, height)).unwrap();
        Fixture { clock, display, window }
    }

    fn fixture() -> Fixture {
        fixture_with(GlopConfig::default(), 100)
    }

    #[test]
    fn a_press_and_release_scenario() {
        let mut f = fixture();
        let id = f.window.id();
        f.display.inject_key(id, 38, keysym::XK_LOWER_A, 1000, true);
        f.display.inject_key(id, 38, keysym::XK_LOWER_A, 1100, false);

        let now = f.window.think().unwrap();
        assert_eq!(now, 100);

        let batch = f.window.get_events();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.events[0].index, b'a' as i16);
        assert_eq!(batch.events[0].device_type, DeviceType::Keyboard);
        assert_eq!(batch.events[0].press_amt, 1.0);
        assert_eq!(batch.events[1].index, b'a' as i16);
        assert_eq!(batch.events[1].press_amt, 0.0);
        assert!(batch.iter().all(|e| e.timestamp <= batch.horizon));
    }

    #[test]
    fn press_then_motion_at_height_100() {
        let mut f = fixture();
        let id = f.window.id();
        f.display.inject_button(id, 1, 10, 20, true);
        f.clock.advance_millis(5);
        f.display.inject_motion(id, 12, 25);

        f.window.think().unwrap();
        let batch = f.window.get_events();
        assert_eq!(batch.len(), 3);

        let press = batch.events[0];
        assert_eq!(press.index, codes::MOUSE_LEFT_BUTTON);
        assert_eq!(press.press_amt, 1.0);
        assert_eq!(press.cursor(), (10, 79));

        let (x_axis, y_axis) = (batch.events[1], batch.events[2]);
        assert_eq!(x_axis.index, codes::MOUSE_X_AXIS);
        assert_eq!(y_axis.index, codes::MOUSE_Y_AXIS);
        assert_eq!(x_axis.cursor(), (12, 74));
        assert_eq!(y_axis.cursor(), (12, 74));
        assert_eq!(x_axis.timestamp, y_axis.timestamp);
    }

    #[test]
    fn get_events_twice_yields_empty_second_batch() {
        let mut f = fixture();
        f.display.inject_motion(f.window.id(), 1, 1);
        f.window.think().unwrap();

        assert_eq!(f.window.get_events().len(), 2);
        f.clock.advance_millis(3);
        let second = f.window.get_events();
        assert!(second.is_empty());
        assert_eq!(second.horizon, 103);
    }

    #[test]
    fn think_without_events_is_a_no_op() {
        let mut f = fixture();
        f.window.think().unwrap();
        f.window.think().unwrap();
        assert_eq!(f.window.pending_events(), 0);
    }

    #[test]
    fn events_accumulate_across_thinks() {
        let mut f = fixture();
        let id = f.window.id();
        f.display.inject_key(id, 38, keysym::XK_LOWER_A, 1, true);
        f.window.think().unwrap();
        f.display.inject_key(id, 38, keysym::XK_LOWER_A, 2, false);
        f.window.think().unwrap();
        assert_eq!(f.window.get_events().len(), 2);
    }

    #[test]
    fn held_key_repeat_pair_is_suppressed() {
        let mut f = fixture();
        let id = f.window.id();
        f.display.set_key_down(38, true);
        f.display.inject_key(id, 38, keysym::XK_LOWER_A, 1000, true);
        f.display.inject_key(id, 38, keysym::XK_LOWER_A, 1050, false);
        f.display.inject_key(id, 38, keysym::XK_LOWER_A, 1050, true);

        f.window.think().unwrap();
        let batch = f.window.get_events();
        assert_eq!(batch.len(), 1);
        assert!(batch.events[0].is_pressed());
    }

    #[test]
    fn non_input_event_between_release_and_press_breaks_the_pair() {
        let mut f = fixture();
        let id = f.window.id();
        f.display.set_key_down(38, true);
        f.display.inject_key(id, 38, keysym::XK_LOWER_A, 1050, false);
        // EnterNotify
        f.display.inject(NativeEvent::Other { window: id, kind: 7 });
        f.display.inject_key(id, 38, keysym::XK_LOWER_A, 1050, true);

        f.window.think().unwrap();
        let batch = f.window.get_events();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.events[0].index, b'a' as i16);
        assert!(batch.events[0].is_pressed());
        assert_eq!(f.display.pending_events(), 0);
    }

    #[test]
    fn repeat_pair_with_different_times_is_kept() {
        let mut f = fixture();
        let id = f.window.id();
        f.display.set_key_down(38, true);
        f.display.inject_key(id, 38, keysym::XK_LOWER_A, 1050, false);
        f.display.inject_key(id, 38, keysym::XK_LOWER_A, 1051, true);

        f.window.think().unwrap();
        let batch = f.window.get_events();
        assert_eq!(batch.len(), 1);
        assert!(batch.events[0].is_pressed());
    }

    #[test]
    fn repeat_filter_can_be_disabled() {
        let mut config = GlopConfig::default();
        config.input.filter_key_repeat = false;
        let mut f = fixture_with(config, 100);
        let id = f.window.id();
        f.display.set_key_down(38, true);
        f.display.inject_key(id, 38, keysym::XK_LOWER_A, 1050, false);
        f.display.inject_key(id, 38, keysym::XK_LOWER_A, 1050, true);

        f.window.think().unwrap();
        assert_eq!(f.window.get_events().len(), 2);
        assert_eq!(f.display.keymap_queries(), 0);
    }

    #[test]
    fn keymap_is_only_queried_for_key_events() {
        let mut f = fixture();
        let id = f.window.id();
        f.display.inject_motion(id, 1, 1);
        f.display.inject_button(id, 1, 1, 1, true);
        f.window.think().unwrap();
        assert_eq!(f.display.keymap_queries(), 0);

        f.display.inject_key(id, 38, keysym::XK_LOWER_A, 1, true);
        f.window.think().unwrap();
        assert_eq!(f.display.keymap_queries(), 1);
    }

    #[test]
    fn unmapped_inputs_produce_nothing() {
        let mut f = fixture();
        let id = f.window.id();
        f.display.inject_key(id, 100, 0x00e9, 1, true);
        f.display.inject_button(id, 12, 0, 0, true);
        f.window.think().unwrap();
        assert!(f.window.get_events().is_empty());
    }

    #[test]
    fn focus_and_advisory_events_produce_no_output() {
        let mut f = fixture();
        let id = f.window.id();
        f.display.inject(NativeEvent::FocusIn { window: id });
        f.display.inject(NativeEvent::ClientMessage { window: id, is_close: true });
        f.display.inject(NativeEvent::Destroyed { window: id });
        f.display.inject(NativeEvent::ClientMessage { window: id, is_close: false });
        f.display.inject_key(id, 38, keysym::XK_LOWER_A, 1, true);

        f.window.think().unwrap();
        assert!(f.display.is_focused(id));
        assert_eq!(f.display.pending_events(), 0);
        assert_eq!(f.window.get_events().len(), 1);

        f.display.inject(NativeEvent::FocusOut { window: id });
        f.window.think().unwrap();
        assert!(!f.display.is_focused(id));
    }

    #[test]
    fn events_for_other_windows_stay_queued() {
        let mut f = fixture();
        let other = f.window.platform().create_window(WindowParams::new("other", 0, 0, 10, 10)).unwrap();
        f.display.inject_motion(other.id(), 3, 3);
        f.display.inject_motion(f.window.id(), 1, 1);

        f.window.think().unwrap();
        assert_eq!(f.window.get_events().len(), 2);
        assert_eq!(f.display.pending_events(), 1);
    }

    #[test]
    fn timestamps_are_non_decreasing() {
        let mut f = fixture();
        let id = f.window.id();
        for step in 0..5 {
            f.display.inject_motion(id, step, step);
            f.window.think().unwrap();
            f.clock.advance_millis(step as i64);
        }
        let batch = f.window.get_events();
        let stamps: Vec<i64> = batch.iter().map(|e: &NormalizedEvent| e.timestamp).collect();
        assert!(stamps.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn think_fails_when_native_window_is_gone() {
        let mut f = fixture();
        f.display.forget_window(f.window.id());
        let err = f.window.think().unwrap_err();
        assert!(matches!(err, SystemError::WindowAttributes { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn dims_resize_title_and_swap() {
        let f = fixture_with(GlopConfig::default(), 100);
        let id = f.window.id();
        assert_eq!(f.window.window_dims().unwrap(), RectInt::from_coords(0, 0, 200, 100));

        f.window.set_window_size(320, 240);
        assert_eq!(f.window.window_dims().unwrap().size, glop_core::SizeInt::new(320, 240));

        f.window.set_title("renamed");
        assert_eq!(f.display.title(id).as_deref(), Some("renamed"));

        f.window.swap_buffers();
        f.window.swap_buffers();
        assert_eq!(f.display.swap_count(id), 2);

        assert!(f.window.make_current().is_ok());
        assert_eq!(f.window.native_handle(), id.0);
    }

    #[test]
    fn drop_releases_native_window() {
        let f = fixture();
        let id = f.window.id();
        assert_eq!(f.display.live_windows(), vec![id]);
        let Fixture { display, window, .. } = f;
        drop(window);
        assert!(display.live_windows().is_empty());
    }

    #[test]
    fn operations_after_shutdown() {
        let mut f = fixture();
        f.window.platform().shutdown();
        assert!(matches!(f.window.think(), Err(SystemError::ShutDown)));
        assert!(matches!(f.window.window_dims(), Err(SystemError::ShutDown)));
        f.window.swap_buffers();
        assert!(f.window.get_events().is_empty());
    }

    #[test]
    fn legacy_space_mapping_flows_through_config() {
        let mut config = GlopConfig::default();
        config.input.legacy_space_as_slash = true;
        let mut f = fixture_with(config, 100);
        f.display.inject_key(f.window.id(), 65, keysym::XK_SPACE, 1, true);
        f.window.think().unwrap();
        assert_eq!(f.window.get_events().events[0].index, b'/' as i16);
    }
}
