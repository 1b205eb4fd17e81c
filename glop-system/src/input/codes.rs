//! Normalized key indices.
//!
//! Printable keys use their (lowercase) ASCII value. Named keys start at 128 and
//! mouse inputs at 300. These values are part of the C contract and must not move.

/// Index of a key or axis in the normalized event stream.
pub type KeyIndex = i16;

pub const BACKSPACE: KeyIndex = 8;
pub const TAB: KeyIndex = 9;
pub const ENTER: KeyIndex = 13;
pub const ESCAPE: KeyIndex = 27;
pub const SPACE: KeyIndex = b' ' as KeyIndex;

pub const F1: KeyIndex = 129;
pub const F2: KeyIndex = 130;
pub const F3: KeyIndex = 131;
pub const F4: KeyIndex = 132;
pub const F5: KeyIndex = 133;
pub const F6: KeyIndex = 134;
pub const F7: KeyIndex = 135;
pub const F8: KeyIndex = 136;
pub const F9: KeyIndex = 137;
pub const F10: KeyIndex = 138;
pub const F11: KeyIndex = 139;
pub const F12: KeyIndex = 140;

pub const CAPS_LOCK: KeyIndex = 150;
pub const NUM_LOCK: KeyIndex = 151;
pub const SCROLL_LOCK: KeyIndex = 152;
pub const PRINT_SCREEN: KeyIndex = 153;
pub const PAUSE: KeyIndex = 154;

pub const LEFT_SHIFT: KeyIndex = 155;
pub const RIGHT_SHIFT: KeyIndex = 156;
pub const LEFT_CONTROL: KeyIndex = 157;
pub const RIGHT_CONTROL: KeyIndex = 158;
pub const LEFT_ALT: KeyIndex = 159;
pub const RIGHT_ALT: KeyIndex = 160;
pub const LEFT_GUI: KeyIndex = 161;
pub const RIGHT_GUI: KeyIndex = 162;

pub const RIGHT: KeyIndex = 166;
pub const LEFT: KeyIndex = 167;
pub const UP: KeyIndex = 168;
pub const DOWN: KeyIndex = 169;

pub const PAD_DIVIDE: KeyIndex = 170;
pub const PAD_MULTIPLY: KeyIndex = 171;
pub const PAD_SUBTRACT: KeyIndex = 172;
pub const PAD_ADD: KeyIndex = 173;
pub const PAD_ENTER: KeyIndex = 174;
pub const PAD_DECIMAL: KeyIndex = 175;
pub const PAD_EQUALS: KeyIndex = 176;
pub const PAD_0: KeyIndex = 177;
pub const PAD_1: KeyIndex = 178;
pub const PAD_2: KeyIndex = 179;
pub const PAD_3: KeyIndex = 180;
pub const PAD_4: KeyIndex = 181;
pub const PAD_5: KeyIndex = 182;
pub const PAD_6: KeyIndex = 183;
pub const PAD_7: KeyIndex = 184;
pub const PAD_8: KeyIndex = 185;
pub const PAD_9: KeyIndex = 186;

pub const DELETE: KeyIndex = 190;
pub const HOME: KeyIndex = 191;
pub const INSERT: KeyIndex = 192;
pub const END: KeyIndex = 193;
pub const PAGE_UP: KeyIndex = 194;
pub const PAGE_DOWN: KeyIndex = 195;

pub const MOUSE_X_AXIS: KeyIndex = 300;
pub const MOUSE_Y_AXIS: KeyIndex = 301;
pub const MOUSE_WHEEL_VERTICAL: KeyIndex = 302;
pub const MOUSE_WHEEL_HORIZONTAL: KeyIndex = 303;
pub const MOUSE_LEFT_BUTTON: KeyIndex = 304;
pub const MOUSE_RIGHT_BUTTON: KeyIndex = 305;
pub const MOUSE_MIDDLE_BUTTON: KeyIndex = 306;

/// Function key `n` (1-based).
pub const fn function_key(n: u8) -> Option<KeyIndex> {
    if n >= 1 && n <= 12 {
        Some(F1 + n as KeyIndex - 1)
    } else {
        None
    }
}

/// Keypad digit `d` (0..=9).
pub const fn pad_digit(d: u8) -> Option<KeyIndex> {
    if d <= 9 {
        Some(PAD_0 + d as KeyIndex)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_and_pad_ranges_are_contiguous() {
        assert_eq!(function_key(1), Some(F1));
        assert_eq!(function_key(12), Some(F12));
        assert_eq!(function_key(0), None);
        assert_eq!(function_key(13), None);
        assert_eq!(pad_digit(0), Some(PAD_0));
        assert_eq!(pad_digit(9), Some(PAD_9));
        assert_eq!(pad_digit(10), None);
    }

    #[test]
    fn mouse_codes_sit_above_keyboard_codes() {
        assert!(MOUSE_X_AXIS > PAGE_DOWN);
        assert_eq!(MOUSE_MIDDLE_BUTTON - MOUSE_X_AXIS, 6);
    }
}
