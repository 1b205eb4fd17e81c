//! The normalized event record shared with C callers.

use serde::{Deserialize, Serialize};

use super::codes::KeyIndex;

/// Source class of a normalized event.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeviceType {
    /// Only present on cleared records.
    #[default]
    None = 0,
    Keyboard = -1,
    Mouse = -2,
    Derived = -3,
}

/// One normalized input event.
///
/// The layout is the C `GlopKeyEvent` record: field order, 32 bytes and
/// 8-byte alignment are fixed.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedEvent {
    pub index: KeyIndex,
    pub device_type: DeviceType,
    /// 1.0 / 0.0 for keys and buttons, negated for the negative wheel
    /// direction, absolute native position for motion axes.
    pub press_amt: f32,
    /// Clock milliseconds at synthesis.
    pub timestamp: i64,
    pub cursor_x: i32,
    pub cursor_y: i32,
    pub num_lock: i32,
    pub caps_lock: i32,
}

impl NormalizedEvent {
    /// All-zero record. Every synthesized event starts from this.
    pub const fn cleared() -> Self {
        Self {
            index: 0,
            device_type: DeviceType::None,
            press_amt: 0.0,
            timestamp: 0,
            cursor_x: 0,
            cursor_y: 0,
            num_lock: 0,
            caps_lock: 0,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::cleared();
    }

    pub fn is_pressed(&self) -> bool {
        self.press_amt != 0.0
    }

    pub fn num_lock(&self) -> bool {
        self.num_lock != 0
    }

    pub fn caps_lock(&self) -> bool {
        self.caps_lock != 0
    }

    pub fn cursor(&self) -> (i32, i32) {
        (self.cursor_x, self.cursor_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::{assert_eq_size, assert_impl_all, const_assert_eq};
    use std::mem::{offset_of, size_of};

    assert_eq_size!(NormalizedEvent, [u8; 32]);
    const_assert_eq!(std::mem::align_of::<NormalizedEvent>(), 8);
    assert_impl_all!(NormalizedEvent: Send, Sync, Copy);

    #[test]
    fn layout_matches_c_record() {
        assert_eq!(size_of::<NormalizedEvent>(), 32);
        assert_eq!(offset_of!(NormalizedEvent, index), 0);
        assert_eq!(offset_of!(NormalizedEvent, device_type), 2);
        assert_eq!(offset_of!(NormalizedEvent, press_amt), 4);
        assert_eq!(offset_of!(NormalizedEvent, timestamp), 8);
        assert_eq!(offset_of!(NormalizedEvent, cursor_x), 16);
        assert_eq!(offset_of!(NormalizedEvent, cursor_y), 20);
        assert_eq!(offset_of!(NormalizedEvent, num_lock), 24);
        assert_eq!(offset_of!(NormalizedEvent, caps_lock), 28);
        assert_eq!(size_of::<DeviceType>(), 2);
    }

    #[test]
    fn device_discriminants() {
        assert_eq!(DeviceType::Keyboard as i16, -1);
        assert_eq!(DeviceType::Mouse as i16, -2);
        assert_eq!(DeviceType::Derived as i16, -3);
    }

    #[test]
    fn serializes_field_names_for_dumps() {
        let event = NormalizedEvent { index: 304, device_type: DeviceType::Mouse, ..NormalizedEvent::cleared() };
        let value = serde_json::to_value(event).unwrap();
        assert_eq!(value["index"], 304);
        assert_eq!(value["device_type"], "Mouse");
        assert_eq!(value["press_amt"], 0.0);
    }

    #[test]
    fn clear_zeroes_everything() {
        let mut event = NormalizedEvent {
            index: 97,
            device_type: DeviceType::Keyboard,
            press_amt: 1.0,
            timestamp: 12,
            cursor_x: 3,
            cursor_y: 4,
            num_lock: 1,
            caps_lock: 1,
        };
        assert!(event.is_pressed() && event.num_lock() && event.caps_lock());
        event.clear();
        assert_eq!(event, NormalizedEvent::cleared());
        assert_eq!(event, NormalizedEvent::default());
    }
}
