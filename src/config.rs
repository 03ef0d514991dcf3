//! Assembles parsed CLI fields into the domain types C1/C2/C4 consume.

use crate::capability::Defaults;
use crate::cli::Cli;
use crate::error::DaemonError;
use crate::normalize::NormalizerConfig;
use crate::rules::{
    parse_aa, parse_ak, parse_ar, parse_ka, parse_kk, parse_kr, parse_ra, parse_rk, parse_rr,
    RuleSet,
};

pub struct Config {
    pub idev: String,
    pub odev: String,
    pub daemon: bool,
    pub grab: bool,
    pub log: bool,
    pub pidfile: Option<String>,
    pub quiet: u8,
    pub verbose: u8,
    pub rules: RuleSet,
    pub defaults: Defaults,
    pub norm_axes: Vec<u16>,
    pub norm_config: NormalizerConfig,
}

fn parse_pair_min_max(s: &str) -> Option<(i32, i32)> {
    let (a, b) = s.split_once(',')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, DaemonError> {
        let rules = RuleSet {
            kk: parse_kk(&cli.key_key),
            kr: parse_kr(&cli.key_rel),
            ka: parse_ka(&cli.key_abs),
            rk: parse_rk(&cli.rel_key),
            rr: parse_rr(&cli.rel_rel),
            ra: parse_ra(&cli.rel_abs),
            ak: parse_ak(&cli.abs_key),
            ar: parse_ar(&cli.abs_rel),
            aa: parse_aa(&cli.abs_abs),
        };

        let mut defaults = Defaults::default();
        if let Some(s) = &cli.absconf {
            let (min, max) = parse_pair_min_max(s)
                .ok_or_else(|| DaemonError::Config(format!("--absconf: invalid range {s:?}")))?;
            defaults.abs_min = min;
            defaults.abs_max = max;
        }
        if let Some(s) = &cli.relconf {
            let (min, max) = parse_pair_min_max(s)
                .ok_or_else(|| DaemonError::Config(format!("--relconf: invalid range {s:?}")))?;
            defaults.rel_min = min;
            defaults.rel_max = max;
        }

        let norm_config = match &cli.normconf {
            Some(s) => NormalizerConfig::parse(s)
                .ok_or_else(|| DaemonError::Config(format!("--normconf: invalid config {s:?}")))?,
            None => NormalizerConfig::default(),
        };

        Ok(Config {
            idev: cli.idev,
            odev: cli.odev,
            daemon: cli.daemon,
            grab: cli.grab,
            log: cli.log,
            pidfile: cli.pidfile,
            quiet: cli.quiet,
            verbose: cli.verbose,
            rules,
            defaults,
            norm_axes: cli.norm,
            norm_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_cli(idev: &str) -> Cli {
        Cli {
            idev: idev.to_string(),
            odev: "/dev/uinput".to_string(),
            daemon: false,
            grab: false,
            log: false,
            pidfile: None,
            quiet: 0,
            verbose: 0,
            key_key: vec![],
            key_rel: vec![],
            key_abs: vec![],
            rel_key: vec![],
            rel_rel: vec![],
            rel_abs: vec![],
            abs_key: vec![],
            abs_rel: vec![],
            abs_abs: vec![],
            absconf: None,
            relconf: None,
            norm: vec![],
            normconf: None,
        }
    }

    #[test]
    fn rejects_malformed_absconf() {
        let mut cli = base_cli("/dev/input/event0");
        cli.absconf = Some("not-a-range".to_string());
        assert!(Config::from_cli(cli).is_err());
    }

    #[test]
    fn applies_relconf_override() {
        let mut cli = base_cli("/dev/input/event0");
        cli.relconf = Some("-10,10".to_string());
        let cfg = Config::from_cli(cli).unwrap();
        assert_eq!(cfg.defaults.rel_min, -10);
        assert_eq!(cfg.defaults.rel_max, 10);
    }
}
