//! The capability synthesizer (C2): combines the source device's declared
//! capabilities with the user's remap rules into the virtual device's
//! advertised capabilities, and flags which source codes must not be
//! passed through unmodified.

use crate::device::attribute_set::AttributeSet;
use crate::device::constants::{
    AbsoluteAxisCode, EventType, FFEffectCode, KeyCode, LedCode, MiscCode, RelativeAxisCode,
    SoundCode, SwitchCode,
};
use crate::device::device::{AbsInfo, Device};
use crate::rules::RuleSet;

/// Default output ranges used when synthesizing a new abs or rel
/// destination whose metadata isn't otherwise inherited.
#[derive(Copy, Clone, Debug)]
pub struct Defaults {
    pub abs_min: i32,
    pub abs_max: i32,
    pub rel_min: i32,
    pub rel_max: i32,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults { abs_min: -32768, abs_max: 32767, rel_min: -127, rel_max: 127 }
    }
}

/// Output capability bitmaps, output abs-axis metadata, and the source
/// codes suppressed from pass-through.
pub struct Capabilities {
    pub event_types: AttributeSet<EventType>,
    pub keys: AttributeSet<KeyCode>,
    pub rel_axes: AttributeSet<RelativeAxisCode>,
    pub abs_axes: AttributeSet<AbsoluteAxisCode>,
    pub abs_info: [AbsInfo; 64],
    pub switches: AttributeSet<SwitchCode>,
    pub leds: AttributeSet<LedCode>,
    pub misc: AttributeSet<MiscCode>,
    pub sounds: AttributeSet<SoundCode>,
    pub ff: AttributeSet<FFEffectCode>,

    pub consumed_keys: AttributeSet<KeyCode>,
    pub consumed_rel: AttributeSet<RelativeAxisCode>,
    pub consumed_abs: AttributeSet<AbsoluteAxisCode>,
}

pub fn synthesize(source: &Device, rules: &RuleSet, defaults: Defaults) -> Capabilities {
    let mut out = Capabilities {
        event_types: AttributeSet::new(),
        keys: AttributeSet::new(),
        rel_axes: AttributeSet::new(),
        abs_axes: AttributeSet::new(),
        abs_info: [AbsInfo::default(); 64],
        switches: AttributeSet::new(),
        leds: AttributeSet::new(),
        misc: AttributeSet::new(),
        sounds: AttributeSet::new(),
        ff: AttributeSet::new(),
        consumed_keys: AttributeSet::new(),
        consumed_rel: AttributeSet::new(),
        consumed_abs: AttributeSet::new(),
    };
    let mut abs_meta_assigned = AttributeSet::<AbsoluteAxisCode>::new();

    let has_key = |c: u16| source.supported_keys().map_or(false, |s| s.contains(KeyCode(c)));
    let has_rel = |c: u16| {
        source
            .supported_relative_axes()
            .map_or(false, |s| s.contains(RelativeAxisCode(c)))
    };
    let has_abs = |c: u16| {
        source
            .supported_absolute_axes()
            .map_or(false, |s| s.contains(AbsoluteAxisCode(c)))
    };

    // KK
    for r in rules.kk.iter() {
        if has_key(r.src) {
            out.keys.insert(KeyCode(r.dst));
            out.consumed_keys.insert(KeyCode(r.src));
            out.event_types.insert(EventType::KEY);
        }
    }
    // KR
    for r in rules.kr.iter() {
        if has_key(r.neg_key) || has_key(r.pos_key) {
            out.rel_axes.insert(RelativeAxisCode(r.axis));
            out.consumed_keys.insert(KeyCode(r.neg_key));
            out.consumed_keys.insert(KeyCode(r.pos_key));
            out.event_types.insert(EventType::KEY);
            out.event_types.insert(EventType::RELATIVE);
        }
    }
    // KA
    for r in rules.ka.iter() {
        if has_key(r.neg_key) || has_key(r.pos_key) {
            out.abs_axes.insert(AbsoluteAxisCode(r.axis));
            out.consumed_keys.insert(KeyCode(r.neg_key));
            out.consumed_keys.insert(KeyCode(r.pos_key));
            out.event_types.insert(EventType::KEY);
            out.event_types.insert(EventType::ABSOLUTE);
            assign_default_abs(&mut out, &mut abs_meta_assigned, r.axis, defaults, source);
        }
    }
    // RK
    for r in rules.rk.iter() {
        if has_rel(r.axis) {
            out.keys.insert(KeyCode(r.neg_key));
            out.keys.insert(KeyCode(r.pos_key));
            out.consumed_rel.insert(RelativeAxisCode(r.axis));
            out.event_types.insert(EventType::RELATIVE);
            out.event_types.insert(EventType::KEY);
        }
    }
    // RR
    for r in rules.rr.iter() {
        if has_rel(r.src) {
            out.rel_axes.insert(RelativeAxisCode(r.dst));
            out.consumed_rel.insert(RelativeAxisCode(r.src));
            out.event_types.insert(EventType::RELATIVE);
        }
    }
    // RA
    for r in rules.ra.iter() {
        if has_rel(r.src) {
            out.abs_axes.insert(AbsoluteAxisCode(r.dst));
            out.consumed_rel.insert(RelativeAxisCode(r.src));
            out.event_types.insert(EventType::RELATIVE);
            out.event_types.insert(EventType::ABSOLUTE);
            assign_default_abs(&mut out, &mut abs_meta_assigned, r.dst, defaults, source);
        }
    }
    // AK
    for r in rules.ak.iter() {
        if has_abs(r.axis) {
            out.keys.insert(KeyCode(r.neg_key));
            out.keys.insert(KeyCode(r.pos_key));
            out.consumed_abs.insert(AbsoluteAxisCode(r.axis));
            out.event_types.insert(EventType::ABSOLUTE);
            out.event_types.insert(EventType::KEY);
        }
    }
    // AR consumes its own source ABS code, not an AK destination's.
    for r in rules.ar.iter() {
        if has_abs(r.src) {
            out.rel_axes.insert(RelativeAxisCode(r.dst));
            out.consumed_abs.insert(AbsoluteAxisCode(r.src));
            out.event_types.insert(EventType::ABSOLUTE);
            out.event_types.insert(EventType::RELATIVE);
        }
    }
    // AA — inherits min/max/fuzz/flat from the source axis unconditionally.
    for r in rules.aa.iter() {
        if has_abs(r.src) {
            out.abs_axes.insert(AbsoluteAxisCode(r.dst));
            out.consumed_abs.insert(AbsoluteAxisCode(r.src));
            out.event_types.insert(EventType::ABSOLUTE);
            out.abs_info[r.dst as usize] = source.abs_info(AbsoluteAxisCode(r.src));
            abs_meta_assigned.insert(AbsoluteAxisCode(r.dst));
        }
    }

    // Pass-through merge: out |= source & ~consumed, per family.
    if let Some(keys) = source.supported_keys() {
        pass_through(&mut out.keys, keys, &out.consumed_keys);
        if !out.keys.is_empty() {
            out.event_types.insert(EventType::KEY);
        }
    }
    if let Some(rel) = source.supported_relative_axes() {
        pass_through(&mut out.rel_axes, rel, &out.consumed_rel);
        if !out.rel_axes.is_empty() {
            out.event_types.insert(EventType::RELATIVE);
        }
    }
    if let Some(abs) = source.supported_absolute_axes() {
        pass_through(&mut out.abs_axes, abs, &out.consumed_abs);
        for code in abs.iter() {
            if !out.consumed_abs.contains(code) && !abs_meta_assigned.contains(code) {
                out.abs_info[code.0 as usize] = source.abs_info(code);
            }
        }
        if !out.abs_axes.is_empty() {
            out.event_types.insert(EventType::ABSOLUTE);
        }
    }
    // SW/LED/MISC/SND/FF are never remap destinations or sources; pass
    // through wholesale.
    if let Some(s) = source.supported_switches() {
        out.switches.union_with(s);
        out.event_types.insert(EventType::SWITCH);
    }
    if let Some(s) = source.supported_leds() {
        out.leds.union_with(s);
        out.event_types.insert(EventType::LED);
    }
    if let Some(s) = source.supported_misc() {
        out.misc.union_with(s);
        out.event_types.insert(EventType::MISC);
    }
    if let Some(s) = source.supported_sounds() {
        out.sounds.union_with(s);
        out.event_types.insert(EventType::SOUND);
    }
    if let Some(s) = source.supported_ff() {
        out.ff.union_with(s);
        out.event_types.insert(EventType::FORCEFEEDBACK);
    }

    out
}

/// KA/RA destinations take the default range unless the output axis
/// coincides with a source-advertised abs axis whose declared range is
/// already non-default, in which case that range is preserved.
fn assign_default_abs(
    out: &mut Capabilities,
    assigned: &mut AttributeSet<AbsoluteAxisCode>,
    axis: u16,
    defaults: Defaults,
    source: &Device,
) {
    let code = AbsoluteAxisCode(axis);
    if assigned.contains(code) {
        return;
    }
    let inherited = source
        .supported_absolute_axes()
        .filter(|axes| axes.contains(code))
        .map(|_| source.abs_info(code))
        .filter(|info| info.minimum != 0 || info.maximum != 0);
    out.abs_info[axis as usize] = inherited.unwrap_or(AbsInfo {
        value: 0,
        minimum: defaults.abs_min,
        maximum: defaults.abs_max,
        fuzz: 0,
        flat: 0,
        resolution: 0,
    });
    assigned.insert(code);
}

fn pass_through<T: crate::device::attribute_set::EvdevEnum>(
    out: &mut AttributeSet<T>,
    source: &AttributeSet<T>,
    consumed: &AttributeSet<T>,
) {
    for code in source.iter() {
        if !consumed.contains(code) {
            out.insert(code);
        }
    }
}
