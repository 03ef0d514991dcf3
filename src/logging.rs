//! Logging setup: an `env_logger` sink tuned by `-q`/`-v`, optionally
//! mirrored to syslog when `-l` is given.

use log::LevelFilter;

/// Resolves `-q`/`-v` repeat counts into a single level. `-q` and `-v` are
/// mutually exclusive on the command line; if both are somehow nonzero,
/// quiet wins.
pub fn level_from_flags(quiet: u8, verbose: u8) -> LevelFilter {
    if quiet > 0 {
        match quiet {
            1 => LevelFilter::Error,
            _ => LevelFilter::Off,
        }
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

pub fn init(level: LevelFilter, use_syslog: bool) {
    if use_syslog {
        let formatter = syslog::Formatter3164 {
            facility: syslog::Facility::LOG_DAEMON,
            hostname: None,
            process: "inputremapd".into(),
            pid: std::process::id(),
        };
        match syslog::unix(formatter) {
            Ok(writer) => {
                let logger = syslog::BasicLogger::new(writer);
                if log::set_boxed_logger(Box::new(logger)).is_ok() {
                    log::set_max_level(level);
                    return;
                }
            }
            Err(e) => {
                eprintln!("could not connect to syslog, falling back to stderr: {e}");
            }
        }
    }
    env_logger::Builder::new().filter_level(level).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_counts_escalate() {
        assert_eq!(level_from_flags(0, 0), LevelFilter::Warn);
        assert_eq!(level_from_flags(0, 1), LevelFilter::Info);
        assert_eq!(level_from_flags(0, 3), LevelFilter::Trace);
    }

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(level_from_flags(1, 2), LevelFilter::Error);
        assert_eq!(level_from_flags(2, 2), LevelFilter::Off);
    }
}
