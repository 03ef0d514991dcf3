//! The event translator (C5): drives one inbound event through the rule
//! tables, consulting the normalizer and key-shadow tracker, and produces
//! zero or more outbound events.

use crate::capability::Defaults;
use crate::device::constants::{AbsoluteAxisCode, EventType, KeyCode, RelativeAxisCode};
use crate::device::device::AbsInfo;
use crate::device::event::{InputEvent, InputEventKind};
use crate::normalize::Normalizer;
use crate::rules::RuleSet;
use crate::shadow::KeyShadow;

pub struct Translator {
    rules: RuleSet,
    normalizer: Normalizer,
    shadow: KeyShadow,
    defaults: Defaults,
    source_abs_info: [AbsInfo; 64],
    dest_abs_info: [AbsInfo; 64],
}

impl Translator {
    pub fn new(
        rules: RuleSet,
        normalizer: Normalizer,
        defaults: Defaults,
        source_abs_info: [AbsInfo; 64],
        dest_abs_info: [AbsInfo; 64],
    ) -> Self {
        Translator {
            rules,
            normalizer,
            shadow: KeyShadow::new(),
            defaults,
            source_abs_info,
            dest_abs_info,
        }
    }

    /// Translates one inbound event into the events that should be written
    /// to the sink, in order. Also updates the key-shadow tracker for every
    /// KEY event in the result.
    pub fn translate(&mut self, event: InputEvent) -> Vec<InputEvent> {
        let out = match event.kind() {
            InputEventKind::Key(key) => self.translate_key(&event, key, event.value()),
            InputEventKind::RelAxis(axis) => self.translate_rel(&event, axis, event.value()),
            InputEventKind::AbsAxis(axis) => self.translate_abs(&event, axis, event.value()),
            _ => vec![event],
        };
        for ev in &out {
            if let InputEventKind::Key(key) = ev.kind() {
                self.shadow.record(key, ev.value());
            }
        }
        out
    }

    fn translate_key(&self, event: &InputEvent, key: KeyCode, value: i32) -> Vec<InputEvent> {
        if let Some(rule) = self.rules.kk.iter().find(|r| r.src == key.0) {
            return vec![event.with_timestamp(EventType::KEY, rule.dst, value)];
        }
        if let Some(rule) = self
            .rules
            .kr
            .iter()
            .find(|r| r.neg_key == key.0 || r.pos_key == key.0)
        {
            let (rmin, rmax) = (self.defaults.rel_min, self.defaults.rel_max);
            let out_value = if value != 0 {
                if rule.neg_key == key.0 { rmin } else { rmax }
            } else {
                (rmin + rmax) / 2
            };
            return vec![event.with_timestamp(EventType::RELATIVE, rule.axis, out_value)];
        }
        if let Some(rule) = self
            .rules
            .ka
            .iter()
            .find(|r| r.neg_key == key.0 || r.pos_key == key.0)
        {
            let info = self.dest_abs_info[rule.axis as usize];
            let out_value = if value != 0 {
                if rule.neg_key == key.0 { info.minimum } else { info.maximum }
            } else {
                (info.minimum + info.maximum) / 2
            };
            return vec![event.with_timestamp(EventType::ABSOLUTE, rule.axis, out_value)];
        }
        vec![*event]
    }

    fn translate_rel(&self, event: &InputEvent, axis: RelativeAxisCode, value: i32) -> Vec<InputEvent> {
        if let Some(rule) = self.rules.rk.iter().find(|r| r.axis == axis.0) {
            let mut out = Vec::with_capacity(2);
            match value.cmp(&0) {
                std::cmp::Ordering::Less => {
                    if self.shadow.is_held(KeyCode(rule.pos_key)) {
                        out.push(event.with_timestamp(EventType::KEY, rule.pos_key, 0));
                    }
                    out.push(event.with_timestamp(EventType::KEY, rule.neg_key, 1));
                }
                std::cmp::Ordering::Greater => {
                    if self.shadow.is_held(KeyCode(rule.neg_key)) {
                        out.push(event.with_timestamp(EventType::KEY, rule.neg_key, 0));
                    }
                    out.push(event.with_timestamp(EventType::KEY, rule.pos_key, 1));
                }
                std::cmp::Ordering::Equal => {
                    if self.shadow.is_held(KeyCode(rule.neg_key)) {
                        out.push(event.with_timestamp(EventType::KEY, rule.neg_key, 0));
                    }
                    if self.shadow.is_held(KeyCode(rule.pos_key)) {
                        out.push(event.with_timestamp(EventType::KEY, rule.pos_key, 0));
                    }
                }
            }
            return out;
        }
        if let Some(rule) = self.rules.rr.iter().find(|r| r.src == axis.0) {
            return vec![event.with_timestamp(EventType::RELATIVE, rule.dst, value)];
        }
        if let Some(rule) = self.rules.ra.iter().find(|r| r.src == axis.0) {
            let (rmin, rmax) = (self.defaults.rel_min, self.defaults.rel_max);
            let clamped = value.clamp(rmin, rmax);
            let info = self.dest_abs_info[rule.dst as usize];
            let out_value = scale(clamped, rmin, rmax, info.minimum, info.maximum);
            return vec![event.with_timestamp(EventType::ABSOLUTE, rule.dst, out_value)];
        }
        vec![*event]
    }

    fn translate_abs(&mut self, event: &InputEvent, axis: AbsoluteAxisCode, raw_value: i32) -> Vec<InputEvent> {
        let source_info = self.source_abs_info[axis.0 as usize];
        let value = if self.normalizer.is_normalized(axis.0) {
            match self
                .normalizer
                .sample(axis.0, raw_value, source_info.minimum, source_info.maximum)
            {
                Some(v) => v,
                None => return Vec::new(),
            }
        } else {
            raw_value
        };

        if let Some(rule) = self.rules.ak.iter().find(|r| r.axis == axis.0) {
            let span = source_info.maximum - source_info.minimum;
            let quarter = span / 4;
            let lo = source_info.minimum + quarter;
            let hi = source_info.maximum - quarter;
            let mut out = Vec::with_capacity(2);
            if value <= lo {
                if self.shadow.is_held(KeyCode(rule.pos_key)) {
                    out.push(event.with_timestamp(EventType::KEY, rule.pos_key, 0));
                }
                out.push(event.with_timestamp(EventType::KEY, rule.neg_key, 1));
            } else if value >= hi {
                if self.shadow.is_held(KeyCode(rule.neg_key)) {
                    out.push(event.with_timestamp(EventType::KEY, rule.neg_key, 0));
                }
                out.push(event.with_timestamp(EventType::KEY, rule.pos_key, 1));
            } else {
                if self.shadow.is_held(KeyCode(rule.neg_key)) {
                    out.push(event.with_timestamp(EventType::KEY, rule.neg_key, 0));
                }
                if self.shadow.is_held(KeyCode(rule.pos_key)) {
                    out.push(event.with_timestamp(EventType::KEY, rule.pos_key, 0));
                }
            }
            return out;
        }
        if let Some(rule) = self.rules.ar.iter().find(|r| r.src == axis.0) {
            let (rmin, rmax) = (self.defaults.rel_min, self.defaults.rel_max);
            let out_value = scale(value, source_info.minimum, source_info.maximum, rmin, rmax);
            return vec![event.with_timestamp(EventType::RELATIVE, rule.dst, out_value)];
        }
        if let Some(rule) = self.rules.aa.iter().find(|r| r.src == axis.0) {
            let info = self.dest_abs_info[rule.dst as usize];
            let out_value = scale(value, source_info.minimum, source_info.maximum, info.minimum, info.maximum);
            return vec![event.with_timestamp(EventType::ABSOLUTE, rule.dst, out_value)];
        }
        vec![event.with_timestamp(EventType::ABSOLUTE, axis.0, value)]
    }
}

/// Linear map of `v` from `[src_min, src_max]` into `[dst_min, dst_max]`.
fn scale(v: i32, src_min: i32, src_max: i32, dst_min: i32, dst_max: i32) -> i32 {
    let span = (src_max - src_min) as i64;
    if span == 0 {
        return dst_min;
    }
    (dst_min as i64 + (v as i64 - src_min as i64) * (dst_max as i64 - dst_min as i64) / span) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{parse_ak, parse_kk, parse_kr, parse_rk};

    fn abs_table_with(axis: u16, min: i32, max: i32) -> [AbsInfo; 64] {
        let mut t = [AbsInfo::default(); 64];
        t[axis as usize] = AbsInfo { minimum: min, maximum: max, ..Default::default() };
        t
    }

    fn now(type_: EventType, code: u16, value: i32) -> InputEvent {
        InputEvent::new(std::time::SystemTime::now(), type_, code, value)
    }

    #[test]
    fn kk_direct_swap() {
        let mut rules = RuleSet::default();
        rules.kk = parse_kk(&["30:48".into()]);
        let mut t = Translator::new(
            rules,
            Normalizer::new(Default::default(), []),
            Defaults::default(),
            [AbsInfo::default(); 64],
            [AbsInfo::default(); 64],
        );
        let out1 = t.translate(now(EventType::KEY, 30, 1));
        let out2 = t.translate(now(EventType::KEY, 30, 0));
        assert_eq!((out1[0].code(), out1[0].value()), (48, 1));
        assert_eq!((out2[0].code(), out2[0].value()), (48, 0));
    }

    #[test]
    fn kr_to_relative_axis() {
        let mut rules = RuleSet::default();
        rules.kr = parse_kr(&["105,106:0".into()]);
        let mut t = Translator::new(
            rules,
            Normalizer::new(Default::default(), []),
            Defaults { rel_min: -10, rel_max: 10, ..Default::default() },
            [AbsInfo::default(); 64],
            [AbsInfo::default(); 64],
        );
        let a = t.translate(now(EventType::KEY, 105, 1));
        let b = t.translate(now(EventType::KEY, 106, 1));
        let c = t.translate(now(EventType::KEY, 105, 0));
        assert_eq!((a[0].code(), a[0].value()), (0, -10));
        assert_eq!((b[0].code(), b[0].value()), (0, 10));
        assert_eq!((c[0].code(), c[0].value()), (0, 0));
    }

    #[test]
    fn rk_release_before_press() {
        let mut rules = RuleSet::default();
        rules.rk = parse_rk(&["0:105,106".into()]);
        let mut t = Translator::new(
            rules,
            Normalizer::new(Default::default(), []),
            Defaults::default(),
            [AbsInfo::default(); 64],
            [AbsInfo::default(); 64],
        );
        let a = t.translate(now(EventType::RELATIVE, 0, 3));
        let b = t.translate(now(EventType::RELATIVE, 0, -2));
        let c = t.translate(now(EventType::RELATIVE, 0, 0));
        assert_eq!(a.iter().map(|e| (e.code(), e.value())).collect::<Vec<_>>(), vec![(106, 1)]);
        assert_eq!(
            b.iter().map(|e| (e.code(), e.value())).collect::<Vec<_>>(),
            vec![(106, 0), (105, 1)]
        );
        assert_eq!(c.iter().map(|e| (e.code(), e.value())).collect::<Vec<_>>(), vec![(105, 0)]);
    }

    #[test]
    fn ak_quarter_band_thresholds() {
        let mut rules = RuleSet::default();
        rules.ak = parse_ak(&["0:105,106".into()]);
        let mut t = Translator::new(
            rules,
            Normalizer::new(Default::default(), []),
            Defaults::default(),
            abs_table_with(0, -100, 100),
            [AbsInfo::default(); 64],
        );
        let a = t.translate(now(EventType::ABSOLUTE, 0, -80));
        let b = t.translate(now(EventType::ABSOLUTE, 0, 0));
        let c = t.translate(now(EventType::ABSOLUTE, 0, 80));
        let d = t.translate(now(EventType::ABSOLUTE, 0, -80));
        assert_eq!(a.iter().map(|e| (e.code(), e.value())).collect::<Vec<_>>(), vec![(105, 1)]);
        assert_eq!(b.iter().map(|e| (e.code(), e.value())).collect::<Vec<_>>(), vec![(105, 0)]);
        assert_eq!(c.iter().map(|e| (e.code(), e.value())).collect::<Vec<_>>(), vec![(106, 1)]);
        assert_eq!(
            d.iter().map(|e| (e.code(), e.value())).collect::<Vec<_>>(),
            vec![(106, 0), (105, 1)]
        );
    }

    #[test]
    fn aa_range_remap() {
        let mut rules = RuleSet::default();
        rules.aa = crate::rules::parse_aa(&["0:1".into()]);
        let mut dest = [AbsInfo::default(); 64];
        dest[1] = AbsInfo { minimum: -100, maximum: 100, ..Default::default() };
        let mut t = Translator::new(
            rules,
            Normalizer::new(Default::default(), []),
            Defaults::default(),
            abs_table_with(0, -100, 100),
            dest,
        );
        let out = t.translate(now(EventType::ABSOLUTE, 0, 50));
        assert_eq!((out[0].code(), out[0].value()), (1, 50));
    }

    #[test]
    fn unmapped_event_passes_through_unchanged() {
        let mut t = Translator::new(
            RuleSet::default(),
            Normalizer::new(Default::default(), []),
            Defaults::default(),
            [AbsInfo::default(); 64],
            [AbsInfo::default(); 64],
        );
        let ev = now(EventType::KEY, 999, 1);
        let out = t.translate(ev);
        assert_eq!(out.len(), 1);
        assert_eq!((out[0].code(), out[0].value()), (999, 1));
    }
}
