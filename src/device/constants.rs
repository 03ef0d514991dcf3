//! Typed newtype wrappers over raw event-family and code integers.
//!
//! Each type carries a small set of named kernel constants via the
//! [`evdev_enum!`](crate::device::attribute_set::evdev_enum) macro; codes
//! outside that set still round-trip, they just `Debug` as `unknown code: N`.

use crate::device::attribute_set::evdev_enum;

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct EventType(pub u16);

evdev_enum!(
    EventType,
    SYNCHRONIZATION = 0x00,
    KEY = 0x01,
    RELATIVE = 0x02,
    ABSOLUTE = 0x03,
    MISC = 0x04,
    SWITCH = 0x05,
    LED = 0x11,
    SOUND = 0x12,
    REPEAT = 0x14,
    FORCEFEEDBACK = 0x15,
    POWER = 0x16,
    FORCEFEEDBACKSTATUS = 0x17,
    UINPUT = 0x101,
);

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct SynchronizationCode(pub u16);
evdev_enum!(
    SynchronizationCode,
    SYN_REPORT = 0,
    SYN_CONFIG = 1,
    SYN_MT_REPORT = 2,
    SYN_DROPPED = 3,
);

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u16);
evdev_enum!(
    KeyCode,
    KEY_ESC = 1,
    KEY_1 = 2,
    KEY_2 = 3,
    KEY_3 = 4,
    KEY_4 = 5,
    KEY_5 = 6,
    KEY_6 = 7,
    KEY_7 = 8,
    KEY_8 = 9,
    KEY_9 = 10,
    KEY_0 = 11,
    KEY_MINUS = 12,
    KEY_EQUAL = 13,
    KEY_BACKSPACE = 14,
    KEY_TAB = 15,
    KEY_Q = 16,
    KEY_W = 17,
    KEY_E = 18,
    KEY_R = 19,
    KEY_T = 20,
    KEY_Y = 21,
    KEY_U = 22,
    KEY_I = 23,
    KEY_O = 24,
    KEY_P = 25,
    KEY_ENTER = 28,
    KEY_LEFTCTRL = 29,
    KEY_A = 30,
    KEY_S = 31,
    KEY_D = 32,
    KEY_F = 33,
    KEY_G = 34,
    KEY_H = 35,
    KEY_J = 36,
    KEY_K = 37,
    KEY_L = 38,
    KEY_LEFTSHIFT = 42,
    KEY_Z = 44,
    KEY_X = 45,
    KEY_C = 46,
    KEY_V = 47,
    KEY_B = 48,
    KEY_N = 49,
    KEY_M = 50,
    KEY_RIGHTSHIFT = 54,
    KEY_LEFTALT = 56,
    KEY_SPACE = 57,
    KEY_CAPSLOCK = 58,
    KEY_RIGHTCTRL = 97,
    KEY_RIGHTALT = 100,
    KEY_HOME = 102,
    KEY_UP = 103,
    KEY_PAGEUP = 104,
    KEY_LEFT = 105,
    KEY_RIGHT = 106,
    KEY_END = 107,
    KEY_DOWN = 108,
    KEY_PAGEDOWN = 109,
    KEY_INSERT = 110,
    KEY_DELETE = 111,
    BTN_LEFT = 0x110,
    BTN_RIGHT = 0x111,
    BTN_MIDDLE = 0x112,
    BTN_SIDE = 0x113,
    BTN_EXTRA = 0x114,
    BTN_SOUTH = 0x130,
    BTN_EAST = 0x131,
    BTN_NORTH = 0x133,
    BTN_WEST = 0x134,
    BTN_TL = 0x136,
    BTN_TR = 0x137,
    BTN_SELECT = 0x13a,
    BTN_START = 0x13b,
    BTN_THUMBL = 0x13d,
    BTN_THUMBR = 0x13e,
);

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct RelativeAxisCode(pub u16);
evdev_enum!(
    RelativeAxisCode,
    REL_X = 0x00,
    REL_Y = 0x01,
    REL_Z = 0x02,
    REL_RX = 0x03,
    REL_RY = 0x04,
    REL_RZ = 0x05,
    REL_HWHEEL = 0x06,
    REL_DIAL = 0x07,
    REL_WHEEL = 0x08,
    REL_MISC = 0x09,
);

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct AbsoluteAxisCode(pub u16);
evdev_enum!(
    AbsoluteAxisCode,
    ABS_X = 0x00,
    ABS_Y = 0x01,
    ABS_Z = 0x02,
    ABS_RX = 0x03,
    ABS_RY = 0x04,
    ABS_RZ = 0x05,
    ABS_THROTTLE = 0x06,
    ABS_RUDDER = 0x07,
    ABS_WHEEL = 0x08,
    ABS_GAS = 0x09,
    ABS_BRAKE = 0x0a,
    ABS_HAT0X = 0x10,
    ABS_HAT0Y = 0x11,
    ABS_PRESSURE = 0x18,
    ABS_DISTANCE = 0x19,
    ABS_TILT_X = 0x1a,
    ABS_TILT_Y = 0x1b,
);

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct SwitchCode(pub u16);
evdev_enum!(
    SwitchCode,
    SW_LID = 0x00,
    SW_TABLET_MODE = 0x01,
    SW_HEADPHONE_INSERT = 0x02,
    SW_MICROPHONE_INSERT = 0x04,
    SW_DOCK = 0x05,
);

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct LedCode(pub u16);
evdev_enum!(
    LedCode,
    LED_NUML = 0x00,
    LED_CAPSL = 0x01,
    LED_SCROLLL = 0x02,
    LED_COMPOSE = 0x03,
    LED_KANA = 0x04,
    LED_MUTE = 0x09,
);

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct MiscCode(pub u16);
evdev_enum!(
    MiscCode,
    MSC_SERIAL = 0x00,
    MSC_PULSELED = 0x01,
    MSC_GESTURE = 0x02,
    MSC_RAW = 0x03,
    MSC_SCAN = 0x04,
    MSC_TIMESTAMP = 0x05,
);

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct SoundCode(pub u16);
evdev_enum!(SoundCode, SND_CLICK = 0x00, SND_BELL = 0x01, SND_TONE = 0x02,);

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct FFEffectCode(pub u16);
evdev_enum!(
    FFEffectCode,
    FF_RUMBLE = 0x50,
    FF_PERIODIC = 0x51,
    FF_CONSTANT = 0x52,
    FF_SPRING = 0x53,
    FF_FRICTION = 0x54,
    FF_DAMPER = 0x55,
    FF_INERTIA = 0x56,
    FF_RAMP = 0x57,
    FF_GAIN = 0x60,
    FF_AUTOCENTER = 0x61,
);

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct PropType(pub u16);
evdev_enum!(
    PropType,
    INPUT_PROP_POINTER = 0x00,
    INPUT_PROP_DIRECT = 0x01,
    INPUT_PROP_BUTTONPAD = 0x02,
    INPUT_PROP_SEMI_MT = 0x03,
    INPUT_PROP_ACCELEROMETER = 0x06,
);
