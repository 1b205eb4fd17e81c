//! X11 keysym values (`X11/keysymdef.h`) used by the key map.
//!
//! Defined locally so the key map and the headless backend work without
//! linking Xlib.

pub type Keysym = u32;

pub const XK_SPACE: Keysym = 0x0020;
pub const XK_APOSTROPHE: Keysym = 0x0027;
pub const XK_COMMA: Keysym = 0x002c;
pub const XK_MINUS: Keysym = 0x002d;
pub const XK_PERIOD: Keysym = 0x002e;
pub const XK_SLASH: Keysym = 0x002f;
pub const XK_0: Keysym = 0x0030;
pub const XK_9: Keysym = 0x0039;
pub const XK_SEMICOLON: Keysym = 0x003b;
pub const XK_EQUAL: Keysym = 0x003d;
pub const XK_UPPER_A: Keysym = 0x0041;
pub const XK_UPPER_Z: Keysym = 0x005a;
pub const XK_BRACKETLEFT: Keysym = 0x005b;
pub const XK_BACKSLASH: Keysym = 0x005c;
pub const XK_BRACKETRIGHT: Keysym = 0x005d;
pub const XK_GRAVE: Keysym = 0x0060;
pub const XK_LOWER_A: Keysym = 0x0061;
pub const XK_LOWER_Z: Keysym = 0x007a;

pub const XK_DEAD_GRAVE: Keysym = 0xfe50;
pub const XK_DEAD_ACUTE: Keysym = 0xfe51;

pub const XK_BACKSPACE: Keysym = 0xff08;
pub const XK_TAB: Keysym = 0xff09;
pub const XK_RETURN: Keysym = 0xff0d;
pub const XK_PAUSE: Keysym = 0xff13;
pub const XK_SCROLL_LOCK: Keysym = 0xff14;
pub const XK_ESCAPE: Keysym = 0xff1b;
pub const XK_HOME: Keysym = 0xff50;
pub const XK_LEFT: Keysym = 0xff51;
pub const XK_UP: Keysym = 0xff52;
pub const XK_RIGHT: Keysym = 0xff53;
pub const XK_DOWN: Keysym = 0xff54;
pub const XK_PAGE_UP: Keysym = 0xff55;
pub const XK_PAGE_DOWN: Keysym = 0xff56;
pub const XK_END: Keysym = 0xff57;
pub const XK_PRINT: Keysym = 0xff61;
pub const XK_INSERT: Keysym = 0xff63;
pub const XK_NUM_LOCK: Keysym = 0xff7f;
pub const XK_KP_ENTER: Keysym = 0xff8d;
pub const XK_KP_MULTIPLY: Keysym = 0xffaa;
pub const XK_KP_ADD: Keysym = 0xffab;
pub const XK_KP_SUBTRACT: Keysym = 0xffad;
pub const XK_KP_DECIMAL: Keysym = 0xffae;
pub const XK_KP_DIVIDE: Keysym = 0xffaf;
pub const XK_KP_0: Keysym = 0xffb0;
pub const XK_KP_9: Keysym = 0xffb9;
pub const XK_KP_EQUAL: Keysym = 0xffbd;
pub const XK_F1: Keysym = 0xffbe;
pub const XK_F12: Keysym = 0xffc9;
pub const XK_SHIFT_L: Keysym = 0xffe1;
pub const XK_SHIFT_R: Keysym = 0xffe2;
pub const XK_CONTROL_L: Keysym = 0xffe3;
pub const XK_CONTROL_R: Keysym = 0xffe4;
pub const XK_CAPS_LOCK: Keysym = 0xffe5;
pub const XK_ALT_L: Keysym = 0xffe9;
pub const XK_ALT_R: Keysym = 0xffea;
pub const XK_SUPER_L: Keysym = 0xffeb;
pub const XK_SUPER_R: Keysym = 0xffec;
pub const XK_DELETE: Keysym = 0xffff;

/// Folds a Latin-1 letter keysym to its uppercase form; other keysyms pass
/// through unchanged.
pub fn to_upper(sym: Keysym) -> Keysym {
    if (XK_LOWER_A..=XK_LOWER_Z).contains(&sym) {
        sym - (XK_LOWER_A - XK_UPPER_A)
    } else {
        sym
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_folding_only_touches_letters() {
        assert_eq!(to_upper(XK_LOWER_A), XK_UPPER_A);
        assert_eq!(to_upper(XK_LOWER_Z), XK_UPPER_Z);
        assert_eq!(to_upper(XK_UPPER_A), XK_UPPER_A);
        assert_eq!(to_upper(XK_GRAVE), XK_GRAVE);
        assert_eq!(to_upper(XK_F1), XK_F1);
    }
}
