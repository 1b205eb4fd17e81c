//! Builds [`NormalizedEvent`]s from native key, button and motion events.

use tracing::debug;

use super::codes;
use super::coords::to_normalized;
use super::event::{DeviceType, NormalizedEvent};
use super::keymap::KeyMapper;
use crate::clock::Clock;
use crate::native::{ModifierMask, NativeButtonEvent, NativeKeyEvent, NativeMotionEvent, WindowAttributes};

fn stamp(
    event: &mut NormalizedEvent,
    attrs: &WindowAttributes,
    x: i32,
    y: i32,
    state: ModifierMask,
    clock: &dyn Clock,
) {
    event.timestamp = clock.now_millis();
    (event.cursor_x, event.cursor_y) = to_normalized(attrs.height, x, y);
    event.num_lock = i32::from(state.num_lock());
    event.caps_lock = i32::from(state.caps_lock());
}

fn press_amount(pressed: bool) -> f32 {
    if pressed {
        1.0
    } else {
        0.0
    }
}

/// Translates a key press or release. `None` if the symbol is not mapped.
pub fn synth_key(
    attrs: &WindowAttributes,
    native: &NativeKeyEvent,
    mapper: &KeyMapper,
    clock: &dyn Clock,
) -> Option<NormalizedEvent> {
    let Some(index) = mapper.map_key(native.keysym) else {
        debug!(keysym = native.keysym, keycode = native.keycode, "unmapped key symbol");
        return None;
    };

    let mut event = NormalizedEvent::cleared();
    event.index = index;
    event.device_type = DeviceType::Keyboard;
    event.press_amt = press_amount(native.pressed);
    stamp(&mut event, attrs, native.x, native.y, native.state, clock);
    Some(event)
}

/// Translates a button press or release. Wheel buttons report on a signed axis.
pub fn synth_button(
    attrs: &WindowAttributes,
    native: &NativeButtonEvent,
    mapper: &KeyMapper,
    clock: &dyn Clock,
) -> Option<NormalizedEvent> {
    let Some((index, sign)) = mapper.map_button(native.button) else {
        debug!(button = native.button, "unknown mouse button");
        return None;
    };

    let mut event = NormalizedEvent::cleared();
    event.index = index;
    event.device_type = DeviceType::Mouse;
    event.press_amt = sign.apply(press_amount(native.pressed));
    stamp(&mut event, attrs, native.x, native.y, native.state, clock);
    debug!(cursor_x = event.cursor_x, cursor_y = event.cursor_y, index, "button event");
    Some(event)
}

/// Translates pointer motion into an X-axis and a Y-axis event carrying the
/// absolute native position.
pub fn synth_motion(
    attrs: &WindowAttributes,
    native: &NativeMotionEvent,
    clock: &dyn Clock,
) -> [NormalizedEvent; 2] {
    let mut x_axis = NormalizedEvent::cleared();
    x_axis.index = codes::MOUSE_X_AXIS;
    x_axis.device_type = DeviceType::Mouse;
    x_axis.press_amt = native.x as f32;
    stamp(&mut x_axis, attrs, native.x, native.y, native.state, clock);

    let mut y_axis = x_axis;
    y_axis.index = codes::MOUSE_Y_AXIS;
    y_axis.press_amt = native.y as f32;

    [x_axis, y_axis]
}
