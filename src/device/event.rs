//! The wire-compatible event record and its family-dispatch tag.

use crate::device::compat::input_event;
use crate::device::constants::{
    AbsoluteAxisCode, EventType, KeyCode, LedCode, MiscCode, RelativeAxisCode, SoundCode,
    SwitchCode, SynchronizationCode,
};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// `{timestamp, family, code, value}`, exactly as read from or written to
/// the kernel. The timestamp is opaque and is never invented or modified.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct InputEvent(pub(crate) input_event);

impl InputEvent {
    pub fn new(timestamp: SystemTime, type_: EventType, code: u16, value: i32) -> Self {
        InputEvent(input_event {
            time: systime_to_timeval(timestamp),
            type_: type_.0,
            code,
            value,
        })
    }

    /// Builds a new event carrying the same timestamp as `self`. Used when
    /// synthesizing outgoing events from an incoming one, so the pass-through
    /// timestamp discipline in the data model holds for synthetic events too.
    pub fn with_timestamp(&self, type_: EventType, code: u16, value: i32) -> Self {
        InputEvent(input_event {
            time: self.0.time,
            type_: type_.0,
            code,
            value,
        })
    }

    #[inline]
    pub fn event_type(&self) -> EventType {
        EventType(self.0.type_)
    }

    #[inline]
    pub fn code(&self) -> u16 {
        self.0.code
    }

    #[inline]
    pub fn value(&self) -> i32 {
        self.0.value
    }

    pub fn timestamp(&self) -> SystemTime {
        timeval_to_systime(&self.0.time)
    }

    pub fn kind(&self) -> InputEventKind {
        match self.event_type() {
            EventType::SYNCHRONIZATION => {
                InputEventKind::Synchronization(SynchronizationCode(self.code()))
            }
            EventType::KEY => InputEventKind::Key(KeyCode(self.code())),
            EventType::RELATIVE => InputEventKind::RelAxis(RelativeAxisCode(self.code())),
            EventType::ABSOLUTE => InputEventKind::AbsAxis(AbsoluteAxisCode(self.code())),
            EventType::MISC => InputEventKind::Misc(MiscCode(self.code())),
            EventType::SWITCH => InputEventKind::Switch(SwitchCode(self.code())),
            EventType::LED => InputEventKind::Led(LedCode(self.code())),
            EventType::SOUND => InputEventKind::Sound(SoundCode(self.code())),
            other => InputEventKind::Other(other, self.code()),
        }
    }

    pub(crate) fn as_raw(&self) -> &input_event {
        &self.0
    }

    pub(crate) fn from_raw(raw: input_event) -> Self {
        InputEvent(raw)
    }
}

impl fmt::Debug for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("InputEvent")
            .field("kind", &self.kind())
            .field("value", &self.value())
            .finish()
    }
}

/// Family-dispatch tag produced by [`InputEvent::kind`].
#[derive(Copy, Clone, Debug)]
pub enum InputEventKind {
    Synchronization(SynchronizationCode),
    Key(KeyCode),
    RelAxis(RelativeAxisCode),
    AbsAxis(AbsoluteAxisCode),
    Misc(MiscCode),
    Switch(SwitchCode),
    Led(LedCode),
    Sound(SoundCode),
    Other(EventType, u16),
}

fn systime_to_timeval(t: SystemTime) -> crate::device::compat::timeval {
    let d = t.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO);
    crate::device::compat::timeval {
        tv_sec: d.as_secs() as _,
        tv_usec: d.subsec_micros() as _,
    }
}

fn timeval_to_systime(tv: &crate::device::compat::timeval) -> SystemTime {
    UNIX_EPOCH + Duration::new(tv.tv_sec.max(0) as u64, (tv.tv_usec.max(0) as u32) * 1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_dispatches_by_family() {
        let ev = InputEvent::new(SystemTime::now(), EventType::KEY, 30, 1);
        assert!(matches!(ev.kind(), InputEventKind::Key(KeyCode(30))));
    }

    #[test]
    fn with_timestamp_preserves_time_changes_family() {
        let t = SystemTime::now();
        let ev = InputEvent::new(t, EventType::RELATIVE, 0, 5);
        let derived = ev.with_timestamp(EventType::ABSOLUTE, 1, -5);
        assert_eq!(derived.event_type(), EventType::ABSOLUTE);
        assert_eq!(derived.code(), 1);
        assert_eq!(derived.value(), -5);
        // microsecond-truncated timestamp round-trips through timeval
        assert!(derived.timestamp() <= t);
    }
}
