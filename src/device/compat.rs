//! Compatibility layer for non-Linux builds.
//!
//! The daemon only ever runs against a real kernel input subsystem, but
//! keeping the FFI struct defaults buildable off Linux makes `cargo doc`
//! and editor tooling work on any host.

use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(any(
        target_os = "linux",
        target_os = "l4re",
        target_os = "android",
        target_os = "emscripten"
    ))] {
        pub(crate) use libc::{
            input_absinfo, input_event, input_id, timeval, uinput_abs_setup, uinput_setup,
            ABS_CNT, EV_CNT, FF_CNT, INPUT_PROP_CNT, KEY_CNT, LED_CNT, MSC_CNT, REL_CNT,
            SND_CNT, SW_CNT, UINPUT_MAX_NAME_SIZE,
        };
    } else {
        mod non_linux;
        pub(crate) use non_linux::{
            input_absinfo, input_event, input_id, timeval, uinput_abs_setup, uinput_setup,
            ABS_CNT, EV_CNT, FF_CNT, INPUT_PROP_CNT, KEY_CNT, LED_CNT, MSC_CNT, REL_CNT,
            SND_CNT, SW_CNT, UINPUT_MAX_NAME_SIZE,
        };
    }
}
