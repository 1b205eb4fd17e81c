//! Native (top-left origin, Y down) to normalized (bottom-left origin, Y up)
//! coordinate conversion.

/// Converts a native window-relative point using the window height.
pub fn to_normalized(window_height: i32, x: i32, y: i32) -> (i32, i32) {
    (x, window_height - 1 - y)
}
