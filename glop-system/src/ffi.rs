//! C ABI over the global platform.
//!
//! Window handles are owned `Window` boxes. Event arrays returned by
//! [`GlopGetInputEvents`] come from the C allocator, so callers release them
//! with `free()` (or [`GlopFreeInputEvents`]). Failures are logged; functions
//! that return values report them as `-1`, a null handle or zeroed
//! out-parameters.

use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use std::{mem, ptr};

use tracing::{error, warn};

use crate::input::NormalizedEvent;
use crate::native::WindowParams;
use crate::platform::Platform;
use crate::window::Window;

/// Opaque window handle. `data` is null when creation failed.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct GlopWindowHandle {
    pub data: *mut Window,
}

impl GlopWindowHandle {
    pub const fn null() -> Self {
        Self { data: ptr::null_mut() }
    }

    pub fn is_null(&self) -> bool {
        self.data.is_null()
    }
}

/// # Safety
///
/// `hdl` must be null or come from [`GlopCreateWindowHandle`] and not have
/// been passed to [`GlopDestroyWindow`].
unsafe fn window_mut<'a>(hdl: GlopWindowHandle) -> Option<&'a mut Window> {
    hdl.data.as_mut()
}

/// Zeroes every field of `event`.
///
/// # Safety
///
/// `event` must be null or point to writable memory for one record.
#[no_mangle]
pub unsafe extern "C" fn GlopClearKeyEvent(event: *mut NormalizedEvent) {
    // The record may hold any bit pattern, so no reference is formed to it.
    if !event.is_null() {
        event.write(NormalizedEvent::cleared());
    }
}

/// Initializes logging and the global platform. Returns the initial
/// timestamp, or -1 if no display could be opened.
#[no_mangle]
pub extern "C" fn GlopInit() -> i64 {
    glop_core::init_minimal_logging();
    match Platform::init_global() {
        Ok(platform) => platform.initial_timestamp(),
        Err(err) => {
            error!(error = %err, fatal = err.is_fatal(), "GlopInit failed");
            -1
        }
    }
}

/// Creates a window on the global platform. The caller keeps ownership of
/// `title`.
///
/// # Safety
///
/// `title` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn GlopCreateWindowHandle(
    title: *const c_char,
    x: c_int,
    y: c_int,
    width: c_int,
    height: c_int,
) -> GlopWindowHandle {
    let Some(platform) = Platform::global() else {
        error!("GlopCreateWindowHandle called before GlopInit");
        return GlopWindowHandle::null();
    };
    let title = if title.is_null() {
        String::new()
    } else {
        CStr::from_ptr(title).to_string_lossy().into_owned()
    };

    match platform.create_window(WindowParams::new(title, x, y, width, height)) {
        Ok(window) => GlopWindowHandle { data: Box::into_raw(Box::new(window)) },
        Err(err) => {
            error!(error = %err, fatal = err.is_fatal(), "couldn't create window");
            GlopWindowHandle::null()
        }
    }
}

/// Drains native events into the window's queue. Returns the current time,
/// or -1 on failure.
///
/// # Safety
///
/// `hdl` must be a live handle or null.
#[no_mangle]
pub unsafe extern "C" fn GlopThink(hdl: GlopWindowHandle) -> i64 {
    let Some(window) = window_mut(hdl) else {
        return -1;
    };
    match window.think() {
        Ok(now) => now,
        Err(err) => {
            error!(window = %window.id(), error = %err, "GlopThink failed");
            -1
        }
    }
}

/// Moves the queued events out to the caller.
///
/// On return `*events_ret` is null when no events were queued; otherwise it
/// points to a `malloc`ed array the caller releases with `free()`. If the
/// allocation fails the events are dropped and the count is zero.
///
/// # Safety
///
/// All out-pointers must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn GlopGetInputEvents(
    hdl: GlopWindowHandle,
    events_ret: *mut *mut NormalizedEvent,
    num_events: *mut usize,
    horizon: *mut i64,
) {
    if events_ret.is_null() || num_events.is_null() || horizon.is_null() {
        return;
    }
    *events_ret = ptr::null_mut();
    *num_events = 0;
    *horizon = 0;

    let Some(window) = window_mut(hdl) else {
        return;
    };
    let batch = window.get_events();
    *horizon = batch.horizon;
    if batch.is_empty() {
        return;
    }

    let count = batch.events.len();
    let array = libc::malloc(count * mem::size_of::<NormalizedEvent>()).cast::<NormalizedEvent>();
    if array.is_null() {
        error!(window = %window.id(), count, "couldn't allocate event array; events dropped");
        return;
    }
    ptr::copy_nonoverlapping(batch.events.as_ptr(), array, count);
    *events_ret = array;
    *num_events = count;
}

/// Releases an array returned by [`GlopGetInputEvents`]. Equivalent to
/// `free(events)`.
///
/// # Safety
///
/// `events` must be null or a pointer produced by [`GlopGetInputEvents`]
/// that has not been released yet.
#[no_mangle]
pub unsafe extern "C" fn GlopFreeInputEvents(events: *mut NormalizedEvent) {
    libc::free(events.cast());
}

/// Writes the window position (root coordinates) and size. All four values
/// are zero on failure.
///
/// # Safety
///
/// All out-pointers must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn GlopGetWindowDims(
    hdl: GlopWindowHandle,
    x: *mut c_int,
    y: *mut c_int,
    dx: *mut c_int,
    dy: *mut c_int,
) {
    if x.is_null() || y.is_null() || dx.is_null() || dy.is_null() {
        return;
    }
    let dims = match window_mut(hdl).map(|w| w.window_dims()) {
        Some(Ok(dims)) => dims,
        Some(Err(err)) => {
            warn!(error = %err, "GlopGetWindowDims failed");
            Default::default()
        }
        None => Default::default(),
    };
    *x = dims.x();
    *y = dims.y();
    *dx = dims.width();
    *dy = dims.height();
}

/// # Safety
///
/// `hdl` must be a live handle or null.
#[no_mangle]
pub unsafe extern "C" fn GlopSetWindowSize(hdl: GlopWindowHandle, dx: c_int, dy: c_int) {
    if let Some(window) = window_mut(hdl) {
        window.set_window_size(dx, dy);
    }
}

/// # Safety
///
/// `hdl` must be a live handle or null.
#[no_mangle]
pub unsafe extern "C" fn GlopSwapBuffers(hdl: GlopWindowHandle) {
    if let Some(window) = window_mut(hdl) {
        window.swap_buffers();
    }
}

/// Makes the window's GL context current on the calling thread.
///
/// # Safety
///
/// `hdl` must be a live handle or null.
#[no_mangle]
pub unsafe extern "C" fn GlopSetGlContext(hdl: GlopWindowHandle) {
    let Some(window) = window_mut(hdl) else {
        return;
    };
    if let Err(err) = window.make_current() {
        error!(window = %window.id(), error = %err, fatal = err.is_fatal(), "GlopSetGlContext failed");
    }
}

#[no_mangle]
pub extern "C" fn GlopEnableVSync(enable: c_int) {
    match Platform::global() {
        Some(platform) => platform.enable_vsync(enable != 0),
        None => warn!("GlopEnableVSync called before GlopInit"),
    }
}

/// Native window id of `hdl`, or 0 for a null handle.
///
/// # Safety
///
/// `hdl` must be a live handle or null.
#[no_mangle]
pub unsafe extern "C" fn GetNativeHandle(hdl: GlopWindowHandle) -> u64 {
    window_mut(hdl).map_or(0, |window| window.native_handle())
}

/// Destroys the window and its queued events.
///
/// # Safety
///
/// `hdl` must be null or a live handle; it is invalid afterwards.
#[no_mangle]
pub unsafe extern "C" fn GlopDestroyWindow(hdl: GlopWindowHandle) {
    if !hdl.data.is_null() {
        drop(Box::from_raw(hdl.data));
    }
}

/// Closes the global display. Windows must be destroyed first.
#[no_mangle]
pub extern "C" fn GlopShutdown() {
    if let Some(platform) = Platform::global() {
        platform.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DeviceType;

    #[test]
    fn clear_key_event_zeroes_record() {
        let mut event = NormalizedEvent {
            index: 5,
            device_type: DeviceType::Mouse,
            press_amt: 3.0,
            timestamp: 9,
            cursor_x: 1,
            cursor_y: 2,
            num_lock: 1,
            caps_lock: 1,
        };
        unsafe {
            GlopClearKeyEvent(&mut event);
            GlopClearKeyEvent(ptr::null_mut());
        }
        assert_eq!(event, NormalizedEvent::cleared());
    }

    #[test]
    fn clear_key_event_overwrites_out_of_range_device_type() {
        let mut slot = std::mem::MaybeUninit::<NormalizedEvent>::uninit();
        let bytes = slot.as_mut_ptr().cast::<u8>();
        unsafe {
            ptr::write_bytes(bytes, 0xA5, 32);
            bytes.add(2).cast::<i16>().write(0x1234);
            GlopClearKeyEvent(slot.as_mut_ptr());
            assert!(std::slice::from_raw_parts(bytes, 32).iter().all(|&b| b == 0));
            assert_eq!(slot.assume_init(), NormalizedEvent::cleared());
        }
    }

    #[test]
    fn null_handles_are_tolerated() {
        let hdl = GlopWindowHandle::null();
        let mut events = ptr::null_mut();
        let mut count = 7usize;
        let mut horizon = 7i64;
        let (mut x, mut y, mut dx, mut dy) = (1, 1, 1, 1);
        unsafe {
            assert_eq!(GlopThink(hdl), -1);
            GlopGetInputEvents(hdl, &mut events, &mut count, &mut horizon);
            GlopGetWindowDims(hdl, &mut x, &mut y, &mut dx, &mut dy);
            GlopSetWindowSize(hdl, 10, 10);
            GlopSwapBuffers(hdl);
            assert_eq!(GetNativeHandle(hdl), 0);
            GlopFreeInputEvents(ptr::null_mut());
            GlopSetGlContext(hdl);
            GlopDestroyWindow(hdl);
        }
        assert!(events.is_null());
        assert_eq!((count, horizon), (0, 0));
        assert_eq!((x, y, dx, dy), (0, 0, 0, 0));
    }
}
