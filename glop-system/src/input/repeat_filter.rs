//! Suppression of synthetic auto-repeat key events.
//!
//! While a key is held, X delivers a release immediately followed by a press
//! with the same keycode and server time. Both halves are dropped when the key
//! is still physically down according to the keyboard state bitmap.

use tracing::trace;

use crate::native::{KeyStateBitmap, NativeEvent};

/// Outcome of [`KeyRepeatFilter::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterVerdict {
    Pass,
    Suppress,
}

/// Per-drain filter state. Create a fresh one for each poll.
#[derive(Debug, Clone, Default)]
pub struct KeyRepeatFilter {
    enabled: bool,
    last_botched: Option<(u32, u64)>,
}

impl KeyRepeatFilter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, last_botched: None }
    }

    /// Classifies `event`. `key_state` is only invoked for key events with a
    /// keycode below 256.
    pub fn check<F>(&mut self, event: &NativeEvent, key_state: F) -> FilterVerdict
    where
        F: FnOnce() -> KeyStateBitmap,
    {
        if self.enabled {
            if let NativeEvent::Key(key) = event {
                if key.keycode < 256 && key_state().is_down(key.keycode) {
                    if !key.pressed {
                        trace!(keycode = key.keycode, time = key.time, "holding back release of held key");
                        self.last_botched = Some((key.keycode, key.time));
                        return FilterVerdict::Suppress;
                    }
                    if self.last_botched == Some((key.keycode, key.time)) {
                        trace!(keycode = key.keycode, "dropping auto-repeat press");
                        self.last_botched = None;
                        return FilterVerdict::Suppress;
                    }
                }
            }
        }

        self.last_botched = None;
        FilterVerdict::Pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::{ModifierMask, NativeKeyEvent, NativeMotionEvent, NativeWindowId};
    use std::cell::Cell;

    const WINDOW: NativeWindowId = NativeWindowId(1);

    fn key(keycode: u32, time: u64, pressed: bool) -> NativeEvent {
        NativeEvent::Key(NativeKeyEvent {
            window: WINDOW,
            keycode,
            keysym: 0x61,
            time,
            x: 0,
            y: 0,
            state: ModifierMask::empty(),
            pressed,
        })
    }

    fn held(keycode: u32) -> KeyStateBitmap {
        let mut bitmap = KeyStateBitmap::default();
        bitmap.set(keycode, true);
        bitmap
    }

    #[test]
    fn drops_release_press_pair_while_held() {
        let mut filter = KeyRepeatFilter::new(true);
        assert_eq!(filter.check(&key(38, 100, false), || held(38)), FilterVerdict::Suppress);
        assert_eq!(filter.check(&key(38, 100, true), || held(38)), FilterVerdict::Suppress);
    }

    #[test]
    fn press_with_different_time_passes() {
        let mut filter = KeyRepeatFilter::new(true);
        assert_eq!(filter.check(&key(38, 100, false), || held(38)), FilterVerdict::Suppress);
        assert_eq!(filter.check(&key(38, 101, true), || held(38)), FilterVerdict::Pass);
    }

    #[test]
    fn press_with_different_code_passes() {
        let mut filter = KeyRepeatFilter::new(true);
        let mut both = held(38);
        both.set(39, true);
        assert_eq!(filter.check(&key(38, 100, false), || both), FilterVerdict::Suppress);
        assert_eq!(filter.check(&key(39, 100, true), || both), FilterVerdict::Pass);
    }

    #[test]
    fn intervening_event_clears_the_pair() {
        let mut filter = KeyRepeatFilter::new(true);
        assert_eq!(filter.check(&key(38, 100, false), || held(38)), FilterVerdict::Suppress);
        let motion = NativeEvent::Motion(NativeMotionEvent {
            window: WINDOW,
            time: 100,
            x: 0,
            y: 0,
            state: ModifierMask::empty(),
        });
        assert_eq!(filter.check(&motion, || held(38)), FilterVerdict::Pass);
        assert_eq!(filter.check(&key(38, 100, true), || held(38)), FilterVerdict::Pass);
    }

    #[test]
    fn keys_that_are_up_always_pass() {
        let mut filter = KeyRepeatFilter::new(true);
        assert_eq!(filter.check(&key(38, 100, false), KeyStateBitmap::default), FilterVerdict::Pass);
        assert_eq!(filter.check(&key(38, 100, true), KeyStateBitmap::default), FilterVerdict::Pass);
    }

    #[test]
    fn first_press_of_held_key_passes() {
        let mut filter = KeyRepeatFilter::new(true);
        assert_eq!(filter.check(&key(38, 100, true), || held(38)), FilterVerdict::Pass);
    }

    #[test]
    fn key_state_is_queried_lazily() {
        let queries = Cell::new(0);
        let mut filter = KeyRepeatFilter::new(true);
        let motion = NativeEvent::FocusIn { window: WINDOW };
        filter.check(&motion, || {
            queries.set(queries.get() + 1);
            held(38)
        });
        filter.check(&key(300, 1, false), || {
            queries.set(queries.get() + 1);
            held(38)
        });
        assert_eq!(queries.get(), 0);

        filter.check(&key(38, 1, false), || {
            queries.set(queries.get() + 1);
            held(38)
        });
        assert_eq!(queries.get(), 1);
    }

    #[test]
    fn disabled_filter_passes_everything() {
        let mut filter = KeyRepeatFilter::new(false);
        assert_eq!(filter.check(&key(38, 100, false), || held(38)), FilterVerdict::Pass);
        assert_eq!(filter.check(&key(38, 100, true), || held(38)), FilterVerdict::Pass);
    }
}
