//! Translation from native key symbols and button numbers to [`KeyIndex`].

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::codes::{self, KeyIndex};
use super::keysym::{self, Keysym};

/// Direction a button contributes to its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSign {
    Positive,
    Negative,
}

impl AxisSign {
    pub fn apply(self, amount: f32) -> f32 {
        match self {
            AxisSign::Positive => amount,
            AxisSign::Negative => -amount,
        }
    }
}

static KEY_TABLE: Lazy<HashMap<Keysym, KeyIndex>> = Lazy::new(build_key_table);

fn build_key_table() -> HashMap<Keysym, KeyIndex> {
    let mut table = HashMap::with_capacity(128);

    for sym in keysym::XK_UPPER_A..=keysym::XK_UPPER_Z {
        let lower = (sym - keysym::XK_UPPER_A) as KeyIndex + b'a' as KeyIndex;
        table.insert(sym, lower);
    }
    for sym in keysym::XK_0..=keysym::XK_9 {
        table.insert(sym, sym as KeyIndex);
    }
    for n in 1..=12u8 {
        if let Some(index) = codes::function_key(n) {
            table.insert(keysym::XK_F1 + u32::from(n) - 1, index);
        }
    }
    for d in 0..=9u8 {
        if let Some(index) = codes::pad_digit(d) {
            table.insert(keysym::XK_KP_0 + u32::from(d), index);
        }
    }

    let named: &[(Keysym, KeyIndex)] = &[
        (keysym::XK_LEFT, codes::LEFT),
        (keysym::XK_RIGHT, codes::RIGHT),
        (keysym::XK_UP, codes::UP),
        (keysym::XK_DOWN, codes::DOWN),
        (keysym::XK_BACKSPACE, codes::BACKSPACE),
        (keysym::XK_TAB, codes::TAB),
        (keysym::XK_RETURN, codes::ENTER),
        (keysym::XK_KP_ENTER, codes::PAD_ENTER),
        (keysym::XK_ESCAPE, codes::ESCAPE),
        (keysym::XK_SHIFT_L, codes::LEFT_SHIFT),
        (keysym::XK_SHIFT_R, codes::RIGHT_SHIFT),
        (keysym::XK_CONTROL_L, codes::LEFT_CONTROL),
        (keysym::XK_CONTROL_R, codes::RIGHT_CONTROL),
        (keysym::XK_ALT_L, codes::LEFT_ALT),
        (keysym::XK_ALT_R, codes::RIGHT_ALT),
        (keysym::XK_SUPER_L, codes::LEFT_GUI),
        (keysym::XK_SUPER_R, codes::RIGHT_GUI),
        (keysym::XK_KP_DIVIDE, codes::PAD_DIVIDE),
        (keysym::XK_KP_MULTIPLY, codes::PAD_MULTIPLY),
        (keysym::XK_KP_SUBTRACT, codes::PAD_SUBTRACT),
        (keysym::XK_KP_ADD, codes::PAD_ADD),
        (keysym::XK_KP_DECIMAL, codes::PAD_DECIMAL),
        (keysym::XK_KP_EQUAL, codes::PAD_EQUALS),
        (keysym::XK_CAPS_LOCK, codes::CAPS_LOCK),
        (keysym::XK_NUM_LOCK, codes::NUM_LOCK),
        (keysym::XK_SCROLL_LOCK, codes::SCROLL_LOCK),
        (keysym::XK_PRINT, codes::PRINT_SCREEN),
        (keysym::XK_PAUSE, codes::PAUSE),
        (keysym::XK_DELETE, codes::DELETE),
        (keysym::XK_HOME, codes::HOME),
        (keysym::XK_INSERT, codes::INSERT),
        (keysym::XK_END, codes::END),
        (keysym::XK_PAGE_UP, codes::PAGE_UP),
        (keysym::XK_PAGE_DOWN, codes::PAGE_DOWN),
        (keysym::XK_DEAD_GRAVE, b'`' as KeyIndex),
        (keysym::XK_GRAVE, b'`' as KeyIndex),
        (keysym::XK_MINUS, b'-' as KeyIndex),
        (keysym::XK_EQUAL, b'=' as KeyIndex),
        (keysym::XK_BRACKETLEFT, b'[' as KeyIndex),
        (keysym::XK_BRACKETRIGHT, b']' as KeyIndex),
        (keysym::XK_BACKSLASH, b'\\' as KeyIndex),
        (keysym::XK_SEMICOLON, b';' as KeyIndex),
        (keysym::XK_DEAD_ACUTE, b'\'' as KeyIndex),
        (keysym::XK_APOSTROPHE, b'\'' as KeyIndex),
        (keysym::XK_COMMA, b',' as KeyIndex),
        (keysym::XK_PERIOD, b'.' as KeyIndex),
        (keysym::XK_SLASH, b'/' as KeyIndex),
        (keysym::XK_SPACE, codes::SPACE),
    ];
    table.extend(named.iter().copied());
    table
}

/// Maps native symbols to normalized indices.
///
/// The table itself is process-wide and immutable; a mapper only carries the
/// per-platform translation options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyMapper {
    legacy_space_as_slash: bool,
}

impl KeyMapper {
    pub fn new(legacy_space_as_slash: bool) -> Self {
        Self { legacy_space_as_slash }
    }

    pub fn from_config(config: &glop_core::InputConfig) -> Self {
        Self::new(config.legacy_space_as_slash)
    }

    /// Looks up `sym` after folding it to uppercase. `None` for unmapped symbols.
    pub fn map_key(&self, sym: Keysym) -> Option<KeyIndex> {
        let folded = keysym::to_upper(sym);
        if folded == keysym::XK_SPACE && self.legacy_space_as_slash {
            return Some(b'/' as KeyIndex);
        }
        KEY_TABLE.get(&folded).copied()
    }

    /// Buttons 1-3 are left, middle and right; 4/5 and 6/7 are the two
    /// directions of the vertical and horizontal wheel.
    pub fn map_button(&self, button: u32) -> Option<(KeyIndex, AxisSign)> {
        match button {
            1 => Some((codes::MOUSE_LEFT_BUTTON, AxisSign::Positive)),
            2 => Some((codes::MOUSE_MIDDLE_BUTTON, AxisSign::Positive)),
            3 => Some((codes::MOUSE_RIGHT_BUTTON, AxisSign::Positive)),
            4 => Some((codes::MOUSE_WHEEL_VERTICAL, AxisSign::Positive)),
            5 => Some((codes::MOUSE_WHEEL_VERTICAL, AxisSign::Negative)),
            6 => Some((codes::MOUSE_WHEEL_HORIZONTAL, AxisSign::Positive)),
            7 => Some((codes::MOUSE_WHEEL_HORIZONTAL, AxisSign::Negative)),
            _ => None,
        }
    }
}
