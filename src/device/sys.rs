//! Raw ioctl bindings against `/dev/input/eventN` and `/dev/uinput`.

use crate::device::compat::{input_absinfo, input_id, uinput_abs_setup, uinput_setup};
use nix::{
    convert_ioctl_res, ioctl_none, ioctl_read, ioctl_read_buf, ioctl_write_buf, ioctl_write_int,
    ioctl_write_ptr, request_code_read,
};

ioctl_read!(eviocgid, b'E', 0x02, input_id);
ioctl_read!(eviocgversion, b'E', 0x01, ::libc::c_int);

ioctl_read_buf!(eviocgname, b'E', 0x06, u8);
ioctl_read_buf!(eviocgphys, b'E', 0x07, u8);
ioctl_read_buf!(eviocguniq, b'E', 0x08, u8);
ioctl_read_buf!(eviocgprop, b'E', 0x09, u8);
ioctl_read_buf!(eviocgkey, b'E', 0x18, u8);
ioctl_read_buf!(eviocgled, b'E', 0x19, u8);
ioctl_read_buf!(eviocgsnd, b'E', 0x1a, u8);
ioctl_read_buf!(eviocgsw, b'E', 0x1b, u8);

ioctl_write_int!(eviocgrab, b'E', 0x90);
ioctl_write_int!(eviocrevoke, b'E', 0x91);

const UINPUT_IOCTL_BASE: u8 = b'U';
ioctl_write_ptr!(ui_dev_setup, UINPUT_IOCTL_BASE, 3, uinput_setup);
ioctl_write_ptr!(ui_abs_setup, UINPUT_IOCTL_BASE, 4, uinput_abs_setup);
ioctl_none!(ui_dev_create, UINPUT_IOCTL_BASE, 1);
ioctl_none!(ui_dev_destroy, UINPUT_IOCTL_BASE, 2);

ioctl_write_int!(ui_set_evbit, UINPUT_IOCTL_BASE, 100);
ioctl_write_int!(ui_set_keybit, UINPUT_IOCTL_BASE, 101);
ioctl_write_int!(ui_set_relbit, UINPUT_IOCTL_BASE, 102);
ioctl_write_int!(ui_set_absbit, UINPUT_IOCTL_BASE, 103);
ioctl_write_int!(ui_set_mscbit, UINPUT_IOCTL_BASE, 104);
ioctl_write_int!(ui_set_ledbit, UINPUT_IOCTL_BASE, 105);
ioctl_write_int!(ui_set_sndbit, UINPUT_IOCTL_BASE, 106);
ioctl_write_int!(ui_set_ffbit, UINPUT_IOCTL_BASE, 107);
ioctl_write_buf!(ui_set_phys, UINPUT_IOCTL_BASE, 108, u8);
ioctl_write_int!(ui_set_swbit, UINPUT_IOCTL_BASE, 109);
ioctl_write_int!(ui_set_propbit, UINPUT_IOCTL_BASE, 110);

macro_rules! eviocgbit_ioctl {
    ($mac:ident!($name:ident, $ev:expr, $ty:ty)) => {
        $mac!($name, b'E', 0x20 + $ev, $ty);
    };
}

eviocgbit_ioctl!(ioctl_read_buf!(eviocgbit_type, 0u32, u8));
eviocgbit_ioctl!(ioctl_read_buf!(eviocgbit_key, 1u32, u8));
eviocgbit_ioctl!(ioctl_read_buf!(eviocgbit_relative, 2u32, u8));
eviocgbit_ioctl!(ioctl_read_buf!(eviocgbit_absolute, 3u32, u8));
eviocgbit_ioctl!(ioctl_read_buf!(eviocgbit_misc, 4u32, u8));
eviocgbit_ioctl!(ioctl_read_buf!(eviocgbit_switch, 0x05u32, u8));
eviocgbit_ioctl!(ioctl_read_buf!(eviocgbit_led, 0x11u32, u8));
eviocgbit_ioctl!(ioctl_read_buf!(eviocgbit_sound, 0x12u32, u8));
eviocgbit_ioctl!(ioctl_read_buf!(eviocgbit_ff, 0x15u32, u8));

/// ioctl: "get abs value/limits"
///
/// # Panics
///
/// Calling this with a value greater than the kernel-defined `ABS_MAX`
/// (0x3f) will panic.
///
/// # Safety
///
/// `abs` must be a valid axis number supported by the device.
pub unsafe fn eviocgabs(
    fd: ::libc::c_int,
    abs: u32,
    buf: &mut input_absinfo,
) -> ::nix::Result<::libc::c_int> {
    assert!(abs <= 0x3f);
    convert_ioctl_res!(::nix::libc::ioctl(
        fd,
        request_code_read!(b'E', 0x40 + abs, ::std::mem::size_of::<input_absinfo>()),
        buf as *mut input_absinfo
    ))
}
