//! The per-axis absolute-value auto-calibration/normalization engine (C4).

use std::collections::HashMap;

/// IGN/RNG/RST/SPK/SPKMIN, shared by every normalized axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NormalizerConfig {
    pub ign: u32,
    pub rng: u32,
    pub rst: u32,
    pub spk: u32,
    pub spkmin: i32,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig { ign: 0, rng: 0, rst: 0, spk: 0, spkmin: 0 }
    }
}

impl NormalizerConfig {
    /// Parses `ign[,rng[,rst[,spk[,spkmin]]]]`; missing trailing fields
    /// default to 0 (gate/feature disabled).
    pub fn parse(s: &str) -> Option<Self> {
        let mut fields = s.split(',');
        let ign: u32 = fields.next()?.trim().parse().ok()?;
        let rng: u32 = match fields.next() {
            Some(f) => f.trim().parse().ok()?,
            None => 0,
        };
        let rst: u32 = match fields.next() {
            Some(f) => f.trim().parse().ok()?,
            None => 0,
        };
        let spk: u32 = match fields.next() {
            Some(f) => f.trim().parse().ok()?,
            None => 0,
        };
        let spkmin: i32 = match fields.next() {
            Some(f) => f.trim().parse().ok()?,
            None => 0,
        };
        if fields.next().is_some() {
            return None;
        }
        Some(NormalizerConfig { ign, rng, rst, spk, spkmin })
    }
}

/// Streaming calibration state for one absolute axis. NOT-READY -> READY,
/// one-way.
#[derive(Clone, Debug)]
struct AxisState {
    ign_remaining: u32,
    ready: bool,
    rmin: Option<i32>,
    rmax: Option<i32>,
    last: Option<i32>,
    amin: Option<i32>,
    amax: Option<i32>,
    acnt: u32,
}

impl AxisState {
    fn new(cfg: &NormalizerConfig) -> Self {
        AxisState {
            ign_remaining: cfg.ign,
            ready: false,
            rmin: None,
            rmax: None,
            last: None,
            amin: None,
            amax: None,
            acnt: 0,
        }
    }
}

fn spike_rejected(cfg: &NormalizerConfig, value: i32, reference: i32, span: i32) -> bool {
    cfg.spk > 0
        && span > cfg.spkmin
        && (value as i64 - reference as i64).abs() * cfg.spk as i64 > span as i64
}

fn coverage_passes(cfg: &NormalizerConfig, range: i32, span: i32) -> bool {
    cfg.rng == 0 || range as i64 * cfg.rng as i64 >= span as i64
}

fn rescale(value: i32, rmin: i32, rmax: i32, span: i32, source_min: i32) -> i32 {
    let range = (rmax - rmin) as i64;
    if range == 0 {
        return source_min;
    }
    (span as i64 * (value as i64 - rmin as i64) / range + source_min as i64) as i32
}

/// The per-axis engine. `sample` returns `None` when the event should be
/// discarded entirely (warm-up skip or spike rejection); the translator
/// then produces no outgoing event at all for that axis (see C5 ABS
/// dispatch).
pub struct Normalizer {
    cfg: NormalizerConfig,
    axes: HashMap<u16, AxisState>,
}

impl Normalizer {
    pub fn new(cfg: NormalizerConfig, axes: impl IntoIterator<Item = u16>) -> Self {
        let axes = axes.into_iter().map(|a| (a, AxisState::new(&cfg))).collect();
        Normalizer { cfg, axes }
    }

    pub fn is_normalized(&self, axis: u16) -> bool {
        self.axes.contains_key(&axis)
    }

    pub fn sample(&mut self, axis: u16, value: i32, source_min: i32, source_max: i32) -> Option<i32> {
        let span = source_max - source_min;
        let cfg = self.cfg;
        let state = self.axes.get_mut(&axis)?;

        if !state.ready {
            if state.ign_remaining > 0 {
                state.ign_remaining -= 1;
                return None;
            }
            match state.rmin {
                None => {
                    state.rmin = Some(value);
                    state.last = Some(value);
                    None
                }
                Some(rmin) => {
                    if spike_rejected(&cfg, value, rmin, span) {
                        return None;
                    }
                    state.last = Some(value);
                    match value.cmp(&rmin) {
                        std::cmp::Ordering::Greater => {
                            state.rmax = Some(value);
                            state.ready = true;
                        }
                        std::cmp::Ordering::Less => {
                            state.rmax = Some(rmin);
                            state.rmin = Some(value);
                            state.ready = true;
                        }
                        std::cmp::Ordering::Equal => {}
                    }
                    None
                }
            }
        } else {
            let last = state.last.expect("ready implies a last sample was recorded");
            if spike_rejected(&cfg, value, last, span) {
                return None;
            }
            state.last = Some(value);

            if cfg.rst > 0 {
                run_aux_window(state, &cfg, value, span);
            }

            let rmin = state.rmin.unwrap().min(value);
            let rmax = state.rmax.unwrap().max(value);
            state.rmin = Some(rmin);
            state.rmax = Some(rmax);

            if coverage_passes(&cfg, rmax - rmin, span) {
                Some(rescale(value, rmin, rmax, span, source_min))
            } else {
                Some(value)
            }
        }
    }
}

fn run_aux_window(state: &mut AxisState, cfg: &NormalizerConfig, value: i32, span: i32) {
    match (state.amin, state.amax) {
        (None, None) => {
            state.amin = Some(value);
        }
        (Some(amin), None) => match value.cmp(&amin) {
            std::cmp::Ordering::Greater => {
                state.amax = Some(value);
                state.acnt = 1;
            }
            std::cmp::Ordering::Less => {
                state.amax = Some(amin);
                state.amin = Some(value);
                state.acnt = 1;
            }
            std::cmp::Ordering::Equal => {}
        },
        (Some(amin), Some(amax)) => {
            state.acnt += 1;
            state.amin = Some(amin.min(value));
            state.amax = Some(amax.max(value));
        }
        (None, Some(_)) => unreachable!("amax is only ever set alongside amin"),
    }

    if let (Some(amin), Some(amax)) = (state.amin, state.amax) {
        if state.acnt >= cfg.rst {
            if coverage_passes(cfg, amax - amin, span) {
                state.rmin = Some(amin);
                state.rmax = Some(amax);
                state.amin = None;
                state.amax = None;
                state.acnt = 0;
            } else {
                state.acnt = cfg.rst - 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warms_up_then_seeds_range() {
        let cfg = NormalizerConfig { ign: 1, ..Default::default() };
        let mut n = Normalizer::new(cfg, [0]);
        assert_eq!(n.sample(0, 999, 0, 1000), None); // IGN
        assert_eq!(n.sample(0, 400, 0, 1000), None); // seeds RMIN
        assert_eq!(n.sample(0, 600, 0, 1000), None); // becomes READY
    }

    #[test]
    fn rescale_after_coverage_gate() {
        // Matches the worked example in spec.md's testable-properties section.
        let cfg = NormalizerConfig { rng: 2, ..Default::default() };
        let mut n = Normalizer::new(cfg, [0]);
        assert_eq!(n.sample(0, 400, 0, 1000), None);
        assert_eq!(n.sample(0, 600, 0, 1000), None);
        assert_eq!(n.sample(0, 500, 0, 1000), Some(500));
    }

    #[test]
    fn idempotent_once_ready() {
        let cfg = NormalizerConfig { rng: 1, ..Default::default() };
        let mut n = Normalizer::new(cfg, [0]);
        n.sample(0, 0, 0, 1000);
        n.sample(0, 1000, 0, 1000);
        let a = n.sample(0, 500, 0, 1000);
        let b = n.sample(0, 500, 0, 1000);
        assert_eq!(a, b);
    }

    #[test]
    fn monotone_learning_widens_range() {
        let cfg = NormalizerConfig { rng: 100, ..Default::default() };
        let mut n = Normalizer::new(cfg, [0]);
        n.sample(0, 400, 0, 1000);
        n.sample(0, 600, 0, 1000);
        let state = n.axes.get(&0).unwrap();
        assert_eq!(state.rmin, Some(400));
        assert_eq!(state.rmax, Some(600));
        n.sample(0, 300, 0, 1000);
        let state = n.axes.get(&0).unwrap();
        assert_eq!(state.rmin, Some(300));
        assert_eq!(state.rmax, Some(600));
    }

    #[test]
    fn spike_gate_rejects_outlier() {
        let cfg = NormalizerConfig { spk: 100, spkmin: 10, ..Default::default() };
        let mut n = Normalizer::new(cfg, [0]);
        n.sample(0, 400, 0, 1000); // seeds RMIN
        // huge jump, rejected by spike gate before ever reaching READY
        assert_eq!(n.sample(0, 900, 0, 1000), None);
    }

    #[test]
    fn rescan_replaces_learned_range() {
        let cfg = NormalizerConfig { rst: 2, ..Default::default() };
        let mut n = Normalizer::new(cfg, [0]);
        n.sample(0, 400, 0, 1000); // seed RMIN
        n.sample(0, 600, 0, 1000); // READY, RMIN=400 RMAX=600
        n.sample(0, 100, 0, 1000); // aux seed AMIN=100
        n.sample(0, 900, 0, 1000); // aux AMAX=900, ACNT=1
        n.sample(0, 500, 0, 1000); // ACNT=2 == RST, coverage gate 800*0>=1000 since rng=0 => true, swap
        let state = n.axes.get(&0).unwrap();
        assert_eq!(state.rmin, Some(100));
        assert_eq!(state.rmax, Some(900));
    }

    #[test]
    fn unnormalized_axis_returns_none() {
        let mut n = Normalizer::new(NormalizerConfig::default(), [0]);
        assert_eq!(n.sample(1, 5, 0, 10), None);
        assert!(!n.is_normalized(1));
    }

    #[test]
    fn parses_normconf_with_defaults() {
        assert_eq!(
            NormalizerConfig::parse("3").unwrap(),
            NormalizerConfig { ign: 3, rng: 0, rst: 0, spk: 0, spkmin: 0 }
        );
        assert_eq!(
            NormalizerConfig::parse("0,2,0,0,0").unwrap(),
            NormalizerConfig { ign: 0, rng: 2, rst: 0, spk: 0, spkmin: 0 }
        );
    }
}
