//! The source-device interface: opening `/dev/input/eventN`, querying its
//! capabilities, grabbing it exclusively, and reading its event stream.

use crate::device::attribute_set::AttributeSet;
use crate::device::compat::input_absinfo;
use crate::device::constants::{
    AbsoluteAxisCode, EventType, FFEffectCode, KeyCode, LedCode, MiscCode, PropType,
    RelativeAxisCode, SoundCode, SwitchCode,
};
use crate::device::error::Error;
use crate::device::event::InputEvent;
use crate::device::inputid::InputId;
use crate::device::sys;
use std::ffi::CStr;
use std::fs::{File, OpenOptions};
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::Path;

/// Declared min/max/fuzz/flat/resolution for one absolute axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AbsInfo {
    pub value: i32,
    pub minimum: i32,
    pub maximum: i32,
    pub fuzz: i32,
    pub flat: i32,
    pub resolution: i32,
}

impl From<input_absinfo> for AbsInfo {
    fn from(a: input_absinfo) -> Self {
        AbsInfo {
            value: a.value,
            minimum: a.minimum,
            maximum: a.maximum,
            fuzz: a.fuzz,
            flat: a.flat,
            resolution: a.resolution,
        }
    }
}

impl From<AbsInfo> for input_absinfo {
    fn from(a: AbsInfo) -> Self {
        input_absinfo {
            value: a.value,
            minimum: a.minimum,
            maximum: a.maximum,
            fuzz: a.fuzz,
            flat: a.flat,
            resolution: a.resolution,
        }
    }
}

/// An open source input device and its queried capabilities.
pub struct Device {
    file: File,
    name: Option<String>,
    phys: Option<String>,
    id: InputId,
    event_types: AttributeSet<EventType>,
    props: AttributeSet<PropType>,
    keys: Option<AttributeSet<KeyCode>>,
    rel_axes: Option<AttributeSet<RelativeAxisCode>>,
    abs_axes: Option<AttributeSet<AbsoluteAxisCode>>,
    abs_info: [AbsInfo; 64],
    switches: Option<AttributeSet<SwitchCode>>,
    leds: Option<AttributeSet<LedCode>>,
    misc: Option<AttributeSet<MiscCode>>,
    sounds: Option<AttributeSet<SoundCode>>,
    ff: Option<AttributeSet<FFEffectCode>>,
    grabbed: bool,
}

impl Device {
    /// Opens and queries a source device. Does not grab it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path.as_ref())?;
        let fd = file.as_raw_fd();

        let mut id = crate::device::compat::input_id {
            bustype: 0,
            vendor: 0,
            product: 0,
            version: 0,
        };
        unsafe { sys::eviocgid(fd, &mut id)? };

        let name = read_ioctl_string(fd, |fd, buf| unsafe { sys::eviocgname(fd, buf) });
        let phys = read_ioctl_string(fd, |fd, buf| unsafe { sys::eviocgphys(fd, buf) });

        let mut ev_bits = [0u8; 4];
        unsafe { sys::eviocgbit_type(fd, &mut ev_bits)? };
        let event_types = AttributeSet::from_raw(&ev_bits);

        let mut prop_bits = [0u8; 4];
        let _ = unsafe { sys::eviocgprop(fd, &mut prop_bits) };
        let props = AttributeSet::from_raw(&prop_bits);

        let keys = if event_types.contains(EventType::KEY) {
            let mut bits = [0u8; 96];
            unsafe { sys::eviocgbit_key(fd, &mut bits)? };
            Some(AttributeSet::from_raw(&bits))
        } else {
            None
        };

        let rel_axes = if event_types.contains(EventType::RELATIVE) {
            let mut bits = [0u8; 4];
            unsafe { sys::eviocgbit_relative(fd, &mut bits)? };
            Some(AttributeSet::from_raw(&bits))
        } else {
            None
        };

        let mut abs_info = [AbsInfo::default(); 64];
        let abs_axes = if event_types.contains(EventType::ABSOLUTE) {
            let mut bits = [0u8; 8];
            unsafe { sys::eviocgbit_absolute(fd, &mut bits)? };
            let set: AttributeSet<AbsoluteAxisCode> = AttributeSet::from_raw(&bits);
            for code in set.iter() {
                let mut info: input_absinfo = unsafe { std::mem::zeroed() };
                unsafe { sys::eviocgabs(fd, code.0 as u32, &mut info)? };
                abs_info[code.0 as usize] = info.into();
            }
            Some(set)
        } else {
            None
        };

        let switches = if event_types.contains(EventType::SWITCH) {
            let mut bits = [0u8; 4];
            unsafe { sys::eviocgbit_switch(fd, &mut bits)? };
            Some(AttributeSet::from_raw(&bits))
        } else {
            None
        };

        let leds = if event_types.contains(EventType::LED) {
            let mut bits = [0u8; 4];
            unsafe { sys::eviocgbit_led(fd, &mut bits)? };
            Some(AttributeSet::from_raw(&bits))
        } else {
            None
        };

        let misc = if event_types.contains(EventType::MISC) {
            let mut bits = [0u8; 4];
            unsafe { sys::eviocgbit_misc(fd, &mut bits)? };
            Some(AttributeSet::from_raw(&bits))
        } else {
            None
        };

        let sounds = if event_types.contains(EventType::SOUND) {
            let mut bits = [0u8; 4];
            unsafe { sys::eviocgbit_sound(fd, &mut bits)? };
            Some(AttributeSet::from_raw(&bits))
        } else {
            None
        };

        let ff = if event_types.contains(EventType::FORCEFEEDBACK) {
            let mut bits = [0u8; 16];
            unsafe { sys::eviocgbit_ff(fd, &mut bits)? };
            Some(AttributeSet::from_raw(&bits))
        } else {
            None
        };

        Ok(Device {
            file,
            name,
            phys,
            id: id.into(),
            event_types,
            props,
            keys,
            rel_axes,
            abs_axes,
            abs_info,
            switches,
            leds,
            misc,
            sounds,
            ff,
            grabbed: false,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn phys(&self) -> Option<&str> {
        self.phys.as_deref()
    }

    pub fn input_id(&self) -> &InputId {
        &self.id
    }

    pub fn supported_events(&self) -> &AttributeSet<EventType> {
        &self.event_types
    }

    pub fn properties(&self) -> &AttributeSet<PropType> {
        &self.props
    }

    pub fn supported_keys(&self) -> Option<&AttributeSet<KeyCode>> {
        self.keys.as_ref()
    }

    pub fn supported_relative_axes(&self) -> Option<&AttributeSet<RelativeAxisCode>> {
        self.rel_axes.as_ref()
    }

    pub fn supported_absolute_axes(&self) -> Option<&AttributeSet<AbsoluteAxisCode>> {
        self.abs_axes.as_ref()
    }

    pub fn abs_info(&self, code: AbsoluteAxisCode) -> AbsInfo {
        self.abs_info[code.0 as usize]
    }

    pub fn abs_info_table(&self) -> [AbsInfo; 64] {
        self.abs_info
    }

    pub fn supported_switches(&self) -> Option<&AttributeSet<SwitchCode>> {
        self.switches.as_ref()
    }

    pub fn supported_leds(&self) -> Option<&AttributeSet<LedCode>> {
        self.leds.as_ref()
    }

    pub fn supported_misc(&self) -> Option<&AttributeSet<MiscCode>> {
        self.misc.as_ref()
    }

    pub fn supported_sounds(&self) -> Option<&AttributeSet<SoundCode>> {
        self.sounds.as_ref()
    }

    pub fn supported_ff(&self) -> Option<&AttributeSet<FFEffectCode>> {
        self.ff.as_ref()
    }

    /// Acquires an exclusive grab: no other reader sees this device's events
    /// while held.
    pub fn grab(&mut self) -> Result<(), Error> {
        unsafe { sys::eviocgrab(self.file.as_raw_fd(), 1)? };
        self.grabbed = true;
        Ok(())
    }

    /// Releases a previously acquired grab. A no-op if not grabbed.
    pub fn ungrab(&mut self) -> Result<(), Error> {
        if self.grabbed {
            unsafe { sys::eviocgrab(self.file.as_raw_fd(), 0)? };
            self.grabbed = false;
        }
        Ok(())
    }

    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }

    /// Blocks until at least one event is available, then returns every
    /// event read in this call (a kernel read always returns whole
    /// `input_event` records; a short read is an I/O error).
    pub fn fetch_events(&mut self) -> Result<Vec<InputEvent>, Error> {
        const RECORD_SIZE: usize = std::mem::size_of::<crate::device::compat::input_event>();
        const BATCH: usize = 64;

        let mut buf = vec![0u8; RECORD_SIZE * BATCH];
        let n = unsafe {
            libc::read(
                self.file.as_raw_fd(),
                buf.as_mut_ptr() as *mut libc::c_void,
                buf.len(),
            )
        };
        if n < 0 {
            return Err(Error::Io(std::io::Error::last_os_error()));
        }
        let n = n as usize;
        if n % RECORD_SIZE != 0 {
            return Err(Error::InvalidEvent);
        }
        let count = n / RECORD_SIZE;
        let mut events = Vec::with_capacity(count);
        for i in 0..count {
            let start = i * RECORD_SIZE;
            let raw: crate::device::compat::input_event = unsafe {
                std::ptr::read_unaligned(buf[start..].as_ptr() as *const _)
            };
            events.push(InputEvent::from_raw(raw));
        }
        Ok(events)
    }
}

impl AsRawFd for Device {
    fn as_raw_fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        let _ = self.ungrab();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abs_info_round_trips_through_input_absinfo() {
        let info = AbsInfo { value: 1, minimum: -100, maximum: 100, fuzz: 2, flat: 3, resolution: 4 };
        let raw: input_absinfo = info.into();
        let back: AbsInfo = raw.into();
        assert_eq!(info, back);
    }
}

fn read_ioctl_string(
    fd: RawFd,
    call: impl Fn(RawFd, &mut [u8]) -> nix::Result<libc::c_int>,
) -> Option<String> {
    let mut buf = vec![0u8; 256];
    match call(fd, &mut buf) {
        Ok(_) => {
            let cstr = CStr::from_bytes_until_nul(&buf).ok()?;
            cstr.to_str().ok().map(str::to_owned)
        }
        Err(_) => None,
    }
}
