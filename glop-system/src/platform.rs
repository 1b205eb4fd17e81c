//! Process-scoped platform service.
//!
//! A [`Platform`] owns the one native display connection, the clock and the
//! loaded configuration. Windows hold an `Arc` to it and reach the display
//! through its mutex. Most programs use the global instance created by
//! [`Platform::init_global`]; tests and embedders build private instances with
//! [`Platform::new`].

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glop_core::{ConfigLoader, GlopConfig};
use once_cell::sync::OnceCell;
use parking_lot::{Mutex, MutexGuard};
use tracing::{info, warn};

use crate::clock::{Clock, MonotonicClock};
use crate::error::SystemError;
use crate::input::KeyMapper;
use crate::native::{NativeDisplay, NativeWindow, WindowParams};
use crate::window::Window;

static GLOBAL_PLATFORM: OnceCell<Arc<Platform>> = OnceCell::new();
static GLOBAL_INIT_GUARD: Mutex<()> = parking_lot::const_mutex(());

pub struct Platform {
    display: Mutex<Box<dyn NativeDisplay>>,
    clock: Arc<dyn Clock>,
    config: GlopConfig,
    key_mapper: KeyMapper,
    initial_timestamp: i64,
    shut_down: AtomicBool,
}

impl fmt::Debug for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Platform")
            .field("clock", &self.clock)
            .field("config", &self.config)
            .field("initial_timestamp", &self.initial_timestamp)
            .field("shut_down", &self.is_shut_down())
            .finish_non_exhaustive()
    }
}

impl Platform {
    /// Wraps an already-open display.
    pub fn new(display: Box<dyn NativeDisplay>, clock: Arc<dyn Clock>, config: GlopConfig) -> Self {
        let initial_timestamp = clock.now_millis();
        let key_mapper = KeyMapper::from_config(&config.input);
        info!(
            initial_timestamp,
            filter_key_repeat = config.input.filter_key_repeat,
            legacy_space_as_slash = config.input.legacy_space_as_slash,
            "platform initialized"
        );
        Self {
            display: Mutex::new(display),
            clock,
            config,
            key_mapper,
            initial_timestamp,
            shut_down: AtomicBool::new(false),
        }
    }

    /// Returns the global platform, creating it with `factory` on first use.
    ///
    /// Concurrent and repeated calls all observe the same instance; `factory`
    /// runs at most once per successful initialization. A failed factory leaves
    /// the global unset so a later call may retry.
    pub fn init_global_with<F>(factory: F) -> Result<Arc<Platform>, SystemError>
    where
        F: FnOnce() -> Result<Platform, SystemError>,
    {
        if let Some(platform) = GLOBAL_PLATFORM.get() {
            return Ok(Arc::clone(platform));
        }

        let _guard = GLOBAL_INIT_GUARD.lock();
        if let Some(platform) = GLOBAL_PLATFORM.get() {
            return Ok(Arc::clone(platform));
        }
        let platform = Arc::new(factory()?);
        let _ = GLOBAL_PLATFORM.set(Arc::clone(&platform));
        Ok(platform)
    }

    /// Initializes the global platform with the user configuration, a
    /// monotonic clock and the compiled-in native backend.
    pub fn init_global() -> Result<Arc<Platform>, SystemError> {
        Self::init_global_with(|| {
            let config = ConfigLoader::load().unwrap_or_else(|err| {
                warn!(error = %err, "couldn't load configuration, using defaults");
                GlopConfig::default()
            });
            let display = open_default_display()?;
            Ok(Platform::new(display, Arc::new(MonotonicClock::new()), config))
        })
    }

    pub fn global() -> Option<Arc<Platform>> {
        GLOBAL_PLATFORM.get().cloned()
    }

    /// Clock reading taken when the platform was created.
    pub fn initial_timestamp(&self) -> i64 {
        self.initial_timestamp
    }

    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn config(&self) -> &GlopConfig {
        &self.config
    }

    pub fn key_mapper(&self) -> &KeyMapper {
        &self.key_mapper
    }

    /// Creates a window with a current rendering context.
    ///
    /// # Errors
    ///
    /// - [`SystemError::ShutDown`] after [`Platform::shutdown`].
    /// - [`SystemError::InvalidWindowGeometry`] for a negative position or an
    ///   empty size.
    /// - Any backend error from acquiring the native resources.
    pub fn create_window(self: &Arc<Self>, params: WindowParams) -> Result<Window, SystemError> {
        self.ensure_running()?;
        params.validate()?;
        let native = self.display().create_window(&params)?;
        Ok(Window::new(Arc::clone(self), native))
    }

    /// Creates a window from the `[window]` section of the configuration.
    pub fn create_default_window(self: &Arc<Self>) -> Result<Window, SystemError> {
        self.create_window(WindowParams::from_config(&self.config.window))
    }

    /// Accepted for API compatibility; swap interval control is not supported.
    pub fn enable_vsync(&self, enable: bool) {
        warn!(enable, "enable_vsync: unimplemented");
    }

    /// Closes the native display. Idempotent.
    pub fn shutdown(&self) {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            return;
        }
        self.display().shutdown();
        info!("platform shut down");
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }

    pub(crate) fn ensure_running(&self) -> Result<(), SystemError> {
        if self.is_shut_down() {
            return Err(SystemError::ShutDown);
        }
        Ok(())
    }

    pub(crate) fn display(&self) -> MutexGuard<'_, Box<dyn NativeDisplay>> {
        self.display.lock()
    }

    /// Hands a window's resources back to the display. After shutdown the
    /// display is gone and the handles are simply forgotten.
    pub(crate) fn release_window(&self, native: NativeWindow) {
        if self.is_shut_down() {
            warn!(window = %native.id(), "window outlived platform shutdown; native resources not released");
            return;
        }
        self.display().destroy_window(native);
    }
}

#[cfg(feature = "x11")]
fn open_default_display() -> Result<Box<dyn NativeDisplay>, SystemError> {
    Ok(Box::new(crate::native::x11::X11Display::open()?))
}

#[cfg(not(feature = "x11"))]
fn open_default_display() -> Result<Box<dyn NativeDisplay>, SystemError> {
    Err(SystemError::NoBackend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::native::headless::HeadlessDisplay;
    use static_assertions::assert_impl_all;

    assert_impl_all!(Platform: Send, Sync);

    fn platform_at(millis: i64) -> (Arc<Platform>, HeadlessDisplay) {
        let display = HeadlessDisplay::new();
        let platform = Platform::new(
            Box::new(display.clone()),
            Arc::new(ManualClock::starting_at_millis(millis)),
            GlopConfig::default(),
        );
        (Arc::new(platform), display)
    }

    #[test]
    fn initial_timestamp_comes_from_clock() {
        let (platform, _) = platform_at(1234);
        assert_eq!(platform.initial_timestamp(), 1234);
        assert_eq!(platform.now_millis(), 1234);
    }

    #[test]
    fn create_window_validates_geometry() {
        let (platform, display) = platform_at(0);
        let err = platform.create_window(WindowParams::new("bad", -1, 0, 10, 10)).unwrap_err();
        assert!(matches!(err, SystemError::InvalidWindowGeometry { x: -1, .. }));
        assert!(err.is_fatal());
        assert!(display.live_windows().is_empty());
    }

    #[test]
    fn default_window_uses_config() {
        let (platform, display) = platform_at(0);
        let window = platform.create_default_window().unwrap();
        assert_eq!(display.title(window.id()).as_deref(), Some("glop window"));
        assert_eq!(window.window_dims().unwrap().size, glop_core::SizeInt::new(640, 480));
    }

    #[test]
    fn shutdown_is_idempotent_and_blocks_creation() {
        let (platform, display) = platform_at(0);
        platform.shutdown();
        platform.shutdown();
        assert!(display.is_shut_down());
        assert!(matches!(
            platform.create_window(WindowParams::new("late", 0, 0, 10, 10)),
            Err(SystemError::ShutDown)
        ));
    }

    #[test]
    fn enable_vsync_is_a_no_op() {
        let (platform, _) = platform_at(0);
        platform.enable_vsync(true);
        platform.enable_vsync(false);
        assert!(!platform.is_shut_down());
    }
}
