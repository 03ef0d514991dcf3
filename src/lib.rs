//! Reads one Linux input device and republishes a remapped virtual device
//! via uinput. See `daemon::run` for the lifecycle and `translate::Translator`
//! for the per-event dispatch.

pub mod capability;
pub mod cli;
pub mod config;
pub mod daemon;
pub mod device;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod pidfile;
pub mod rules;
pub mod shadow;
pub mod translate;
