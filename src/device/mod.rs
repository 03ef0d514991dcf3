//! Linux `evdev`/`uinput` bindings: the source/sink interfaces C6 drives.
//!
//! Everything here is the "external collaborator" layer — reading the
//! source device and publishing the virtual one. The remapping logic
//! (`rules`, `capability`, `shadow`, `normalize`, `translate`) is built on
//! top of the types this module exports and has no ioctl knowledge.

pub mod attribute_set;
pub mod compat;
pub mod constants;
pub mod device;
pub mod error;
pub mod event;
pub mod inputid;
pub mod sys;
pub mod uinput;

pub use attribute_set::AttributeSet;
pub use device::{AbsInfo, Device};
pub use error::Error;
pub use event::{InputEvent, InputEventKind};
pub use inputid::InputId;
pub use uinput::{VirtualDevice, VirtualDeviceBuilder};
