//! # glop System Library (`glop-system`)
//!
//! Native window and input layer for glop. It owns the display connection,
//! creates windows with a rendering context, and turns native keyboard, mouse
//! and focus events into a flat stream of [`NormalizedEvent`]s that the
//! application polls once per frame:
//!
//! ```rust,ignore
//! use glop_system::{Platform, WindowParams};
//!
//! let platform = Platform::init_global()?;
//! let mut window = platform.create_window(WindowParams::new("demo", 0, 0, 640, 480))?;
//! loop {
//!     window.think()?;
//!     for event in window.get_events() {
//!         tracing::debug!(index = event.index, press = event.press_amt, "input");
//!     }
//!     window.swap_buffers();
//! }
//! ```
//!
//! Nothing here blocks or calls back into the application. The X11 backend is
//! behind the `x11` cargo feature; [`native::headless::HeadlessDisplay`] is
//! always available for tests and tools.

pub mod clock;
pub mod error;
pub mod ffi;
pub mod input;
pub mod native;
pub mod platform;
pub mod window;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error::SystemError;
pub use input::{DeviceType, EventBatch, KeyIndex, NormalizedEvent};
pub use native::{NativeDisplay, NativeWindowId, WindowParams};
pub use platform::Platform;
pub use window::Window;
