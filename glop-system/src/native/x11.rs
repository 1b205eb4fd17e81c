//! Xlib + GLX + XIM backend.
//!
//! All calls go through one `Display` connection owned by [`X11Display`]. The
//! platform serializes access to it, which is what makes the `Send` impls
//! below sound: Xlib itself is never entered from two threads at once.

use std::collections::HashMap;
use std::ffi::{c_char, c_int, c_long, c_uint, c_ulong, CString};
use std::mem::MaybeUninit;
use std::ptr;

use tracing::{debug, error, info, warn};
use x11::glx;
use x11::xlib;

use super::{
    BackendResources, KeyStateBitmap, ModifierMask, NativeButtonEvent, NativeDisplay, NativeEvent,
    NativeKeyEvent, NativeMotionEvent, NativeWindow, NativeWindowId, WindowAttributes, WindowParams,
};
use crate::error::SystemError;

const GLX_CONTEXT_MAJOR_VERSION_ARB: c_int = 0x2091;
const GLX_CONTEXT_MINOR_VERSION_ARB: c_int = 0x2092;
const GLX_CONTEXT_PROFILE_MASK_ARB: c_int = 0x9126;
const GLX_CONTEXT_COMPATIBILITY_PROFILE_BIT_ARB: c_int = 0x0002;

const XIM_PREEDIT_NOTHING: c_ulong = 0x0008;
const XIM_STATUS_NOTHING: c_ulong = 0x0400;
const XN_INPUT_STYLE: &[u8] = b"inputStyle\0";
const XN_CLIENT_WINDOW: &[u8] = b"clientWindow\0";
const XN_FOCUS_WINDOW: &[u8] = b"focusWindow\0";

const P_MIN_SIZE: c_long = 1 << 4;
const P_MAX_SIZE: c_long = 1 << 5;

const MWM_HINTS_FUNCTIONS: c_ulong = 1 << 0;
const MWM_HINTS_DECORATIONS: c_ulong = 1 << 1;
const MWM_DECOR_BORDER: c_ulong = 1 << 1;
const MWM_DECOR_RESIZEH: c_ulong = 1 << 2;
const MWM_DECOR_TITLE: c_ulong = 1 << 3;
const MWM_DECOR_MINIMIZE: c_ulong = 1 << 5;
const MWM_DECOR_MAXIMIZE: c_ulong = 1 << 6;
const MWM_FUNC_RESIZE: c_ulong = 1 << 1;
const MWM_FUNC_MOVE: c_ulong = 1 << 2;
const MWM_FUNC_MINIMIZE: c_ulong = 1 << 3;
const MWM_FUNC_MAXIMIZE: c_ulong = 1 << 4;
const MWM_FUNC_CLOSE: c_ulong = 1 << 5;

const EVENT_MASK: c_long = xlib::KeyPressMask
    | xlib::KeyReleaseMask
    | xlib::ButtonPressMask
    | xlib::ButtonReleaseMask
    | xlib::ButtonMotionMask
    | xlib::PointerMotionMask
    | xlib::FocusChangeMask
    | xlib::StructureNotifyMask
    | xlib::EnterWindowMask
    | xlib::LeaveWindowMask;

type GlxCreateContextAttribsArb = unsafe extern "C" fn(
    *mut xlib::Display,
    glx::GLXFBConfig,
    glx::GLXContext,
    xlib::Bool,
    *const c_int,
) -> glx::GLXContext;

/// `_MOTIF_WM_HINTS` property payload.
#[repr(C)]
struct MotifWmHints {
    flags: c_ulong,
    functions: c_ulong,
    decorations: c_ulong,
    input_mode: c_long,
    status: c_ulong,
}

impl MotifWmHints {
    fn for_window(resizable: bool) -> Self {
        let mut decorations = MWM_DECOR_BORDER | MWM_DECOR_TITLE | MWM_DECOR_MINIMIZE;
        let mut functions = MWM_FUNC_MOVE | MWM_FUNC_MINIMIZE | MWM_FUNC_CLOSE;
        if resizable {
            decorations |= MWM_DECOR_MAXIMIZE | MWM_DECOR_RESIZEH;
            functions |= MWM_FUNC_MAXIMIZE | MWM_FUNC_RESIZE;
        }
        Self {
            flags: MWM_HINTS_FUNCTIONS | MWM_HINTS_DECORATIONS,
            functions,
            decorations,
            input_mode: 0,
            status: 0,
        }
    }
}

/// Native handles belonging to one X window.
#[derive(Debug)]
pub(crate) struct X11WindowResources {
    window: xlib::Window,
    visual_info: *mut xlib::XVisualInfo,
    context: glx::GLXContext,
    input_context: xlib::XIC,
}

// SAFETY: the handles are only dereferenced by Xlib under the platform lock.
unsafe impl Send for X11WindowResources {}

/// Connection to an X server with an open input method.
#[derive(Debug)]
pub struct X11Display {
    display: *mut xlib::Display,
    screen: c_int,
    xim: xlib::XIM,
    close_atom: xlib::Atom,
    input_contexts: HashMap<xlib::Window, xlib::XIC>,
    closed: bool,
}

// SAFETY: see the module docs; every method takes `&mut self` or runs under
// the platform's display mutex.
unsafe impl Send for X11Display {}

impl X11Display {
    /// Opens the display named by `$DISPLAY` and its default input method.
    pub fn open() -> Result<Self, SystemError> {
        // SAFETY: plain Xlib setup calls; every returned pointer is checked.
        unsafe {
            let display = xlib::XOpenDisplay(ptr::null());
            if display.is_null() {
                let name = std::env::var("DISPLAY").unwrap_or_default();
                error!(display = %name, "couldn't open X display");
                return Err(SystemError::DisplayOpen(name));
            }

            let screen = xlib::XDefaultScreen(display);

            let xim = xlib::XOpenIM(display, ptr::null_mut(), ptr::null_mut(), ptr::null_mut());
            if xim.is_null() {
                error!("couldn't open X input method");
                xlib::XCloseDisplay(display);
                return Err(SystemError::InputMethodOpen);
            }

            let close_atom = xlib::XInternAtom(display, c"WM_DELETE_WINDOW".as_ptr(), xlib::False);
            info!(screen, "opened X display");
            Ok(Self { display, screen, xim, close_atom, input_contexts: HashMap::new(), closed: false })
        }
    }

    unsafe fn choose_fb_config(&self) -> Result<(*mut glx::GLXFBConfig, c_int), SystemError> {
        let attribs = [
            glx::GLX_DOUBLEBUFFER,
            xlib::True,
            glx::GLX_RED_SIZE,
            8,
            glx::GLX_GREEN_SIZE,
            8,
            glx::GLX_BLUE_SIZE,
            8,
            glx::GLX_ALPHA_SIZE,
            8,
            glx::GLX_X_RENDERABLE,
            xlib::True,
            glx::GLX_X_VISUAL_TYPE,
            glx::GLX_TRUE_COLOR,
            glx::GLX_DEPTH_SIZE,
            24,
            glx::GLX_STENCIL_SIZE,
            8,
            0,
        ];
        let mut count: c_int = 0;
        let configs = glx::glXChooseFBConfig(self.display, self.screen, attribs.as_ptr(), &mut count);
        debug!(count, "framebuffer configs matched");
        if configs.is_null() || count <= 0 {
            if !configs.is_null() {
                xlib::XFree(configs.cast());
            }
            return Err(SystemError::FramebufferConfig { candidates: count });
        }
        Ok((configs, count))
    }

    unsafe fn create_context(&self, config: glx::GLXFBConfig) -> Result<glx::GLXContext, SystemError> {
        let proc_address = glx::glXGetProcAddressARB(c"glXCreateContextAttribsARB".as_ptr().cast());
        let Some(proc_address) = proc_address else {
            return Err(SystemError::ContextCreation("glXCreateContextAttribsARB unavailable".into()));
        };
        // SAFETY: the extension entry point has exactly this signature.
        let create: GlxCreateContextAttribsArb = std::mem::transmute(proc_address);

        let attribs = [
            GLX_CONTEXT_MAJOR_VERSION_ARB,
            4,
            GLX_CONTEXT_MINOR_VERSION_ARB,
            5,
            GLX_CONTEXT_PROFILE_MASK_ARB,
            GLX_CONTEXT_COMPATIBILITY_PROFILE_BIT_ARB,
            0,
        ];
        let context = create(self.display, config, ptr::null_mut(), xlib::True, attribs.as_ptr());
        if context.is_null() {
            return Err(SystemError::ContextCreation("glXCreateContextAttribsARB returned null".into()));
        }
        Ok(context)
    }

    unsafe fn apply_wm_hints(&self, window: xlib::Window, params: &WindowParams) {
        let hints_atom = xlib::XInternAtom(self.display, c"_MOTIF_WM_HINTS".as_ptr(), xlib::False);
        if hints_atom != 0 {
            let hints = MotifWmHints::for_window(params.resizable);
            xlib::XChangeProperty(
                self.display,
                window,
                hints_atom,
                hints_atom,
                32,
                xlib::PropModeReplace,
                (&hints as *const MotifWmHints).cast(),
                5,
            );
        }

        if !params.resizable {
            let mut size_hints: xlib::XSizeHints = std::mem::zeroed();
            size_hints.flags = P_MIN_SIZE | P_MAX_SIZE;
            size_hints.min_width = params.width;
            size_hints.max_width = params.width;
            size_hints.min_height = params.height;
            size_hints.max_height = params.height;
            xlib::XSetWMNormalHints(self.display, window, &mut size_hints);
        }
    }

    unsafe fn store_name(&self, window: xlib::Window, title: &str) {
        let title = CString::new(title.replace('\0', "")).unwrap_or_default();
        xlib::XStoreName(self.display, window, title.as_ptr());
    }

    unsafe fn translate(&self, event: &mut xlib::XEvent) -> NativeEvent {
        let window = NativeWindowId(event.any.window as u64);
        match event.get_type() {
            xlib::KeyPress | xlib::KeyRelease => {
                let mut buf = [0 as c_char; 2];
                let mut sym: xlib::KeySym = 0;
                xlib::XLookupString(&mut event.key, buf.as_mut_ptr(), buf.len() as c_int, &mut sym, ptr::null_mut());
                let key = event.key;
                NativeEvent::Key(NativeKeyEvent {
                    window,
                    keycode: key.keycode,
                    keysym: sym as u32,
                    time: key.time as u64,
                    x: key.x,
                    y: key.y,
                    state: ModifierMask::from_bits_truncate(key.state),
                    pressed: key.type_ == xlib::KeyPress,
                })
            }
            xlib::ButtonPress | xlib::ButtonRelease => {
                let button = event.button;
                debug!(button = button.button, kind = button.type_, "button event");
                NativeEvent::Button(NativeButtonEvent {
                    window,
                    button: button.button,
                    time: button.time as u64,
                    x: button.x,
                    y: button.y,
                    state: ModifierMask::from_bits_truncate(button.state),
                    pressed: button.type_ == xlib::ButtonPress,
                })
            }
            xlib::MotionNotify => {
                let motion = event.motion;
                NativeEvent::Motion(NativeMotionEvent {
                    window,
                    time: motion.time as u64,
                    x: motion.x,
                    y: motion.y,
                    state: ModifierMask::from_bits_truncate(motion.state),
                })
            }
            xlib::FocusIn => NativeEvent::FocusIn { window },
            xlib::FocusOut => NativeEvent::FocusOut { window },
            xlib::DestroyNotify => NativeEvent::Destroyed { window },
            xlib::ClientMessage => {
                let message = event.client_message;
                let is_close =
                    message.format == 32 && message.data.get_long(0) as xlib::Atom == self.close_atom;
                NativeEvent::ClientMessage { window, is_close }
            }
            kind => NativeEvent::Other { window, kind },
        }
    }
}

unsafe extern "C" fn is_for_window(
    _display: *mut xlib::Display,
    event: *mut xlib::XEvent,
    arg: xlib::XPointer,
) -> xlib::Bool {
    let target = *(arg as *const xlib::Window);
    xlib::Bool::from((*event).any.window == target)
}

impl NativeDisplay for X11Display {
    fn create_window(&mut self, params: &WindowParams) -> Result<NativeWindow, SystemError> {
        params.validate()?;
        if self.closed {
            return Err(SystemError::ShutDown);
        }

        // SAFETY: every handle created here is either moved into the returned
        // resources or released on the failure path before returning.
        unsafe {
            let (configs, _count) = self.choose_fb_config()?;
            let config = *configs;

            let context = match self.create_context(config) {
                Ok(context) => context,
                Err(err) => {
                    xlib::XFree(configs.cast());
                    return Err(err);
                }
            };

            let visual_info = glx::glXGetVisualFromFBConfig(self.display, config);
            xlib::XFree(configs.cast());
            if visual_info.is_null() {
                glx::glXDestroyContext(self.display, context);
                return Err(SystemError::ContextCreation("no visual for framebuffer config".into()));
            }

            let root = xlib::XRootWindow(self.display, self.screen);
            let mut attributes: xlib::XSetWindowAttributes = std::mem::zeroed();
            attributes.event_mask = EVENT_MASK;
            attributes.colormap =
                xlib::XCreateColormap(self.display, root, (*visual_info).visual, xlib::AllocNone);

            let window = xlib::XCreateWindow(
                self.display,
                root,
                params.x,
                params.y,
                params.width as c_uint,
                params.height as c_uint,
                0,
                (*visual_info).depth,
                xlib::InputOutput as c_uint,
                (*visual_info).visual,
                xlib::CWColormap | xlib::CWEventMask,
                &mut attributes,
            );

            self.apply_wm_hints(window, params);
            self.store_name(window, &params.title);

            let mut protocols = [self.close_atom];
            xlib::XSetWMProtocols(self.display, window, protocols.as_mut_ptr(), 1);

            let input_context = xlib::XCreateIC(
                self.xim,
                XN_INPUT_STYLE.as_ptr(),
                XIM_PREEDIT_NOTHING | XIM_STATUS_NOTHING,
                XN_CLIENT_WINDOW.as_ptr(),
                window,
                XN_FOCUS_WINDOW.as_ptr(),
                window,
                ptr::null_mut::<c_char>(),
            );
            let id = NativeWindowId(window as u64);
            if input_context.is_null() {
                glx::glXDestroyContext(self.display, context);
                xlib::XFree(visual_info.cast());
                xlib::XDestroyWindow(self.display, window);
                return Err(SystemError::InputContext { window: id });
            }

            xlib::XMapWindow(self.display, window);
            self.input_contexts.insert(window, input_context);

            let native = NativeWindow::new(
                id,
                BackendResources::X11(X11WindowResources { window, visual_info, context, input_context }),
            );
            if let Err(err) = self.make_current(&native) {
                self.destroy_window(native);
                return Err(err);
            }

            info!(window = %id, title = %params.title, width = params.width, height = params.height, "created X window");
            Ok(native)
        }
    }

    fn destroy_window(&mut self, window: NativeWindow) {
        let BackendResources::X11(resources) = window.resources else {
            warn!(window = %window.id(), "asked to destroy a window from another backend");
            return;
        };
        self.input_contexts.remove(&resources.window);
        // SAFETY: the resources were created by this display and are dropped
        // exactly once here.
        unsafe {
            if glx::glXGetCurrentContext() == resources.context {
                glx::glXMakeCurrent(self.display, 0, ptr::null_mut());
            }
            glx::glXDestroyContext(self.display, resources.context);
            xlib::XDestroyIC(resources.input_context);
            xlib::XFree(resources.visual_info.cast());
            xlib::XDestroyWindow(self.display, resources.window);
        }
        debug!(window = resources.window, "destroyed X window");
    }

    fn window_attributes(&mut self, id: NativeWindowId) -> Result<WindowAttributes, SystemError> {
        let mut attrs = MaybeUninit::<xlib::XWindowAttributes>::uninit();
        // SAFETY: `attrs` is only read after Xlib reports success.
        unsafe {
            if xlib::XGetWindowAttributes(self.display, id.0 as xlib::Window, attrs.as_mut_ptr()) == 0 {
                error!(window = %id, "couldn't XGetWindowAttributes");
                return Err(SystemError::WindowAttributes { window: id });
            }
            let attrs = attrs.assume_init();
            Ok(WindowAttributes { x: attrs.x, y: attrs.y, width: attrs.width, height: attrs.height })
        }
    }

    fn next_event_for(&mut self, id: NativeWindowId) -> Option<NativeEvent> {
        let mut target = id.0 as xlib::Window;
        // SAFETY: the predicate only reads `target`, which outlives the call.
        unsafe {
            let mut event = MaybeUninit::<xlib::XEvent>::zeroed().assume_init();
            let found = xlib::XCheckIfEvent(
                self.display,
                &mut event,
                Some(is_for_window),
                (&mut target as *mut xlib::Window).cast(),
            );
            if found == 0 {
                return None;
            }
            Some(self.translate(&mut event))
        }
    }

    fn query_keymap(&self) -> KeyStateBitmap {
        let mut keys = [0 as c_char; 32];
        // SAFETY: XQueryKeymap writes exactly 32 bytes.
        unsafe {
            xlib::XQueryKeymap(self.display, keys.as_mut_ptr());
        }
        KeyStateBitmap(keys.map(|byte| byte as u8))
    }

    fn set_input_focus(&mut self, id: NativeWindowId, focused: bool) {
        let Some(&input_context) = self.input_contexts.get(&(id.0 as xlib::Window)) else {
            return;
        };
        // SAFETY: the input context belongs to this display and is still live.
        unsafe {
            if focused {
                xlib::XSetICFocus(input_context);
            } else {
                xlib::XUnsetICFocus(input_context);
            }
        }
    }

    fn window_position(&mut self, id: NativeWindowId) -> Result<(i32, i32), SystemError> {
        let (mut root, mut child) = (0, 0);
        let (mut root_x, mut root_y, mut win_x, mut win_y) = (0, 0, 0, 0);
        let mut mask: c_uint = 0;
        // SAFETY: all out-pointers refer to locals.
        let ok = unsafe {
            xlib::XQueryPointer(
                self.display,
                id.0 as xlib::Window,
                &mut root,
                &mut child,
                &mut root_x,
                &mut root_y,
                &mut win_x,
                &mut win_y,
                &mut mask,
            )
        };
        if ok == 0 {
            return Err(SystemError::WindowAttributes { window: id });
        }
        Ok((root_x - win_x, root_y - win_y))
    }

    fn resize_window(&mut self, id: NativeWindowId, width: i32, height: i32) {
        // SAFETY: XResizeWindow only reports errors asynchronously.
        unsafe {
            xlib::XResizeWindow(self.display, id.0 as xlib::Window, width.max(1) as c_uint, height.max(1) as c_uint);
        }
    }

    fn set_title(&mut self, id: NativeWindowId, title: &str) {
        // SAFETY: the title is copied into a NUL-terminated buffer first.
        unsafe { self.store_name(id.0 as xlib::Window, title) }
    }

    fn make_current(&mut self, window: &NativeWindow) -> Result<(), SystemError> {
        let BackendResources::X11(ref resources) = window.resources else {
            return Err(SystemError::MakeCurrent { window: window.id() });
        };
        // SAFETY: window and context belong to this display.
        let ok = unsafe { glx::glXMakeCurrent(self.display, resources.window, resources.context) };
        if ok == 0 {
            error!(window = %window.id(), "glXMakeCurrent failed");
            return Err(SystemError::MakeCurrent { window: window.id() });
        }
        Ok(())
    }

    fn swap_buffers(&mut self, id: NativeWindowId) {
        // SAFETY: drawable is a window created on this display.
        unsafe { glx::glXSwapBuffers(self.display, id.0 as glx::GLXDrawable) }
    }

    fn native_handle(&self, window: &NativeWindow) -> u64 {
        match window.resources {
            BackendResources::X11(ref resources) => resources.window as u64,
            _ => window.id().0,
        }
    }

    fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        // SAFETY: the connection is closed once and never used again.
        unsafe {
            xlib::XCloseIM(self.xim);
            xlib::XCloseDisplay(self.display);
        }
        self.closed = true;
        info!("closed X display");
    }
}

impl Drop for X11Display {
    fn drop(&mut self) {
        self.shutdown();
    }
}
