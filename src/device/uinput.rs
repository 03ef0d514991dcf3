//! The injection-endpoint interface: building and publishing a virtual
//! device through `/dev/uinput`, then emitting events on it.

use crate::device::attribute_set::AttributeSet;
use crate::device::compat::{input_id, uinput_abs_setup, uinput_setup, UINPUT_MAX_NAME_SIZE};
use crate::device::constants::{
    AbsoluteAxisCode, EventType, FFEffectCode, KeyCode, LedCode, MiscCode, RelativeAxisCode,
    SoundCode, SwitchCode,
};
use crate::device::device::AbsInfo;
use crate::device::error::Error;
use crate::device::event::InputEvent;
use crate::device::inputid::InputId;
use crate::device::sys;
use std::fs::{File, OpenOptions};
use std::os::unix::io::AsRawFd;
use std::path::Path;

/// Registers capability bits and writes the device descriptor; consumed by
/// `build()` to create the device.
pub struct VirtualDeviceBuilder {
    file: File,
    name: Vec<u8>,
    id: input_id,
    abs_axes: Vec<(AbsoluteAxisCode, AbsInfo)>,
}

impl VirtualDeviceBuilder {
    /// Opens the injection-endpoint path (normally `/dev/uinput`).
    pub fn new(path: impl AsRef<Path>) -> Result<Self, Error> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path.as_ref())?;
        Ok(VirtualDeviceBuilder {
            file,
            name: Vec::new(),
            id: input_id {
                bustype: 0x06, // BUS_VIRTUAL
                vendor: 0x1234,
                product: 0x5678,
                version: 0x111,
            },
            abs_axes: Vec::new(),
        })
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.as_bytes().to_vec();
        self
    }

    pub fn input_id(mut self, id: InputId) -> Self {
        self.id = crate::device::compat::input_id {
            bustype: id.bus_type().0,
            vendor: id.vendor(),
            product: id.product(),
            version: id.version(),
        };
        self
    }

    pub fn with_keys(self, keys: &AttributeSet<KeyCode>) -> Result<Self, Error> {
        unsafe { sys::ui_set_evbit(self.file.as_raw_fd(), EventType::KEY.0 as i32)? };
        for key in keys.iter() {
            unsafe { sys::ui_set_keybit(self.file.as_raw_fd(), key.0 as i32)? };
        }
        Ok(self)
    }

    pub fn with_relative_axes(self, axes: &AttributeSet<RelativeAxisCode>) -> Result<Self, Error> {
        unsafe { sys::ui_set_evbit(self.file.as_raw_fd(), EventType::RELATIVE.0 as i32)? };
        for axis in axes.iter() {
            unsafe { sys::ui_set_relbit(self.file.as_raw_fd(), axis.0 as i32)? };
        }
        Ok(self)
    }

    pub fn with_absolute_axis(mut self, axis: AbsoluteAxisCode, info: AbsInfo) -> Result<Self, Error> {
        unsafe { sys::ui_set_evbit(self.file.as_raw_fd(), EventType::ABSOLUTE.0 as i32)? };
        unsafe { sys::ui_set_absbit(self.file.as_raw_fd(), axis.0 as i32)? };
        self.abs_axes.push((axis, info));
        Ok(self)
    }

    pub fn with_switches(self, switches: &AttributeSet<SwitchCode>) -> Result<Self, Error> {
        unsafe { sys::ui_set_evbit(self.file.as_raw_fd(), EventType::SWITCH.0 as i32)? };
        for sw in switches.iter() {
            unsafe { sys::ui_set_swbit(self.file.as_raw_fd(), sw.0 as i32)? };
        }
        Ok(self)
    }

    pub fn with_leds(self, leds: &AttributeSet<LedCode>) -> Result<Self, Error> {
        unsafe { sys::ui_set_evbit(self.file.as_raw_fd(), EventType::LED.0 as i32)? };
        for led in leds.iter() {
            unsafe { sys::ui_set_ledbit(self.file.as_raw_fd(), led.0 as i32)? };
        }
        Ok(self)
    }

    pub fn with_misc(self, codes: &AttributeSet<MiscCode>) -> Result<Self, Error> {
        unsafe { sys::ui_set_evbit(self.file.as_raw_fd(), EventType::MISC.0 as i32)? };
        for code in codes.iter() {
            unsafe { sys::ui_set_mscbit(self.file.as_raw_fd(), code.0 as i32)? };
        }
        Ok(self)
    }

    pub fn with_sound(self, codes: &AttributeSet<SoundCode>) -> Result<Self, Error> {
        unsafe { sys::ui_set_evbit(self.file.as_raw_fd(), EventType::SOUND.0 as i32)? };
        for code in codes.iter() {
            unsafe { sys::ui_set_sndbit(self.file.as_raw_fd(), code.0 as i32)? };
        }
        Ok(self)
    }

    pub fn with_ff(self, codes: &AttributeSet<FFEffectCode>) -> Result<Self, Error> {
        unsafe { sys::ui_set_evbit(self.file.as_raw_fd(), EventType::FORCEFEEDBACK.0 as i32)? };
        for code in codes.iter() {
            unsafe { sys::ui_set_ffbit(self.file.as_raw_fd(), code.0 as i32)? };
        }
        Ok(self)
    }

    /// Overwrites the physical-location string, per the lifecycle's
    /// process-unique identifier requirement.
    pub fn phys(self, phys: &str) -> Result<Self, Error> {
        let bytes = phys.as_bytes();
        unsafe { sys::ui_set_phys(self.file.as_raw_fd(), bytes)? };
        Ok(self)
    }

    pub fn build(self) -> Result<VirtualDevice, Error> {
        let mut setup_name = [0 as libc::c_char; UINPUT_MAX_NAME_SIZE];
        let n = self.name.len().min(UINPUT_MAX_NAME_SIZE - 1);
        // SAFETY: casting [u8] to [c_char], same size either way (i8 or u8).
        let name_bytes = unsafe { &*(&self.name[..n] as *const [u8] as *const [libc::c_char]) };
        setup_name[..n].copy_from_slice(name_bytes);

        let setup = uinput_setup {
            id: self.id,
            name: setup_name,
            ff_effects_max: 0,
        };
        unsafe { sys::ui_dev_setup(self.file.as_raw_fd(), &setup)? };

        for (axis, info) in &self.abs_axes {
            let abs_setup = uinput_abs_setup {
                code: axis.0,
                absinfo: (*info).into(),
            };
            unsafe { sys::ui_abs_setup(self.file.as_raw_fd(), &abs_setup)? };
        }

        unsafe { sys::ui_dev_create(self.file.as_raw_fd())? };

        Ok(VirtualDevice { file: self.file })
    }
}

/// A created, live virtual device. Events written here are re-injected
/// into the input subsystem as if they came from a real device.
pub struct VirtualDevice {
    file: File,
}

impl VirtualDevice {
    /// Writes `events` followed by a terminating `SYN_REPORT`, matching the
    /// kernel's expectation that every batch end in a sync event.
    pub fn emit(&mut self, events: &[InputEvent]) -> Result<(), Error> {
        self.write_raw(events)?;
        let syn = InputEvent::new(
            std::time::SystemTime::now(),
            EventType::SYNCHRONIZATION,
            0,
            0,
        );
        self.write_raw(&[syn])
    }

    fn write_raw(&mut self, events: &[InputEvent]) -> Result<(), Error> {
        for ev in events {
            let raw = ev.as_raw();
            let bytes = unsafe {
                std::slice::from_raw_parts(
                    raw as *const _ as *const u8,
                    std::mem::size_of_val(raw),
                )
            };
            let n = unsafe {
                libc::write(
                    self.file.as_raw_fd(),
                    bytes.as_ptr() as *const libc::c_void,
                    bytes.len(),
                )
            };
            if n < 0 {
                return Err(Error::Io(std::io::Error::last_os_error()));
            }
            if n as usize != bytes.len() {
                return Err(Error::InvalidEvent);
            }
        }
        Ok(())
    }
}

impl Drop for VirtualDevice {
    fn drop(&mut self) {
        unsafe {
            let _ = sys::ui_dev_destroy(self.file.as_raw_fd());
        }
    }
}
