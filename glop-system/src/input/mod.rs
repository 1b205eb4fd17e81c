//! Normalized input: key codes, the event record, and the translation
//! pipeline from native events.

pub mod codes;
pub mod coords;
pub mod event;
pub mod keymap;
pub mod keysym;
pub mod queue;
pub mod repeat_filter;
pub mod synth;

pub use codes::KeyIndex;
pub use event::{DeviceType, NormalizedEvent};
pub use keymap::{AxisSign, KeyMapper};
pub use queue::{EventBatch, EventQueue};
pub use repeat_filter::{FilterVerdict, KeyRepeatFilter};
