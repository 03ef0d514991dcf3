//! Command-line surface, via `clap`'s derive API.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "inputremapd", about = "Remap one Linux input device onto a virtual uinput device")]
pub struct Cli {
    /// Source device path.
    #[arg(short = 'i', long = "idev")]
    pub idev: String,

    /// Injection endpoint path.
    #[arg(short = 'o', long = "odev", default_value = "/dev/uinput")]
    pub odev: String,

    /// Detach from the controlling terminal.
    #[arg(short = 'D', long = "daemon")]
    pub daemon: bool,

    /// Exclusive grab on the source device.
    #[arg(short = 'g', long = "grab")]
    pub grab: bool,

    /// Also emit messages to the system log.
    #[arg(short = 'l', long = "log")]
    pub log: bool,

    /// Write the process id to this file; unlink it on exit.
    #[arg(short = 'p', long = "pidfile")]
    pub pidfile: Option<String>,

    /// Suppress console output. Repeatable; a second `-q` silences errors too.
    #[arg(short = 'q', long = "quiet", action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Print capability inventory and per-event trace. Repeatable.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[arg(long = "key-key", value_name = "SRC:DST")]
    pub key_key: Vec<String>,
    #[arg(long = "key-rel", value_name = "NEG,POS:AXIS")]
    pub key_rel: Vec<String>,
    #[arg(long = "key-abs", value_name = "NEG,POS:AXIS")]
    pub key_abs: Vec<String>,
    #[arg(long = "rel-key", value_name = "AXIS:NEG,POS")]
    pub rel_key: Vec<String>,
    #[arg(long = "rel-rel", value_name = "SRC:DST")]
    pub rel_rel: Vec<String>,
    #[arg(long = "rel-abs", value_name = "SRC:DST")]
    pub rel_abs: Vec<String>,
    #[arg(long = "abs-key", value_name = "AXIS:NEG,POS")]
    pub abs_key: Vec<String>,
    #[arg(long = "abs-rel", value_name = "SRC:DST")]
    pub abs_rel: Vec<String>,
    #[arg(long = "abs-abs", value_name = "SRC:DST")]
    pub abs_abs: Vec<String>,

    /// Default output abs range `min,max`.
    #[arg(long = "absconf", value_name = "MIN,MAX")]
    pub absconf: Option<String>,

    /// Rel clamp/scale range `min,max`.
    #[arg(long = "relconf", value_name = "MIN,MAX")]
    pub relconf: Option<String>,

    /// Add an absolute axis code to the normalization set. Repeatable.
    #[arg(long = "norm", value_name = "AXIS")]
    pub norm: Vec<u16>,

    /// Normalizer configuration `ign[,rng[,rst[,spk[,spkmin]]]]`.
    #[arg(long = "normconf", value_name = "IGN,RNG,RST,SPK,SPKMIN")]
    pub normconf: Option<String>,
}
