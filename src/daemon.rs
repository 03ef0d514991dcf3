//! Device lifecycle (C6): startup, steady-state loop, signal-driven
//! shutdown.

use crate::capability::{self, Capabilities};
use crate::config::Config;
use crate::device::{Device, VirtualDevice, VirtualDeviceBuilder};
use crate::error::DaemonError;
use crate::normalize::Normalizer;
use crate::pidfile::PidFile;
use crate::translate::Translator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Runs the daemon to completion: returns once a termination signal has been
/// observed and teardown has finished.
pub fn run(config: Config) -> Result<(), DaemonError> {
    let mut source = Device::open(&config.idev)?;
    log::info!(
        "opened source device {:?} ({})",
        source.name().unwrap_or("unnamed"),
        config.idev
    );

    if config.grab {
        source.grab()?;
        log::debug!("acquired exclusive grab on source device");
    }

    let caps = capability::synthesize(&source, &config.rules, config.defaults);
    let virtual_dev = publish(&config, &source, &caps)?;

    if config.daemon {
        daemonize::Daemonize::new()
            .start()
            .map_err(|e| DaemonError::Internal(format!("failed to daemonize: {e}")))?;
    }

    let pidfile = match &config.pidfile {
        Some(path) => Some(PidFile::create(path)?),
        None => None,
    };

    let stop = Arc::new(AtomicBool::new(false));
    for sig in [signal_hook::consts::SIGTERM, signal_hook::consts::SIGINT] {
        signal_hook::flag::register(sig, Arc::clone(&stop))
            .map_err(|e| DaemonError::Internal(format!("failed to install signal handler: {e}")))?;
    }

    let normalizer = Normalizer::new(config.norm_config, config.norm_axes.iter().copied());
    let mut translator = Translator::new(
        config.rules.clone(),
        normalizer,
        config.defaults,
        source.abs_info_table(),
        caps.abs_info,
    );

    steady_state(&mut source, virtual_dev, &mut translator, &stop)?;

    if config.grab {
        source.ungrab()?;
    }
    drop(pidfile);
    log::info!("shut down cleanly");
    Ok(())
}

fn publish(config: &Config, source: &Device, caps: &Capabilities) -> Result<VirtualDevice, DaemonError> {
    let mut builder = VirtualDeviceBuilder::new(&config.odev)?;
    if let Some(name) = source.name() {
        builder = builder.name(name);
    }
    builder = builder.input_id(source.input_id().clone());
    builder = builder.phys(&format!("inputremapd/pid{}", std::process::id()))?;
    builder = builder.with_keys(&caps.keys)?;
    builder = builder.with_relative_axes(&caps.rel_axes)?;
    for code in caps.abs_axes.iter() {
        builder = builder.with_absolute_axis(code, caps.abs_info[code.0 as usize])?;
    }
    builder = builder.with_misc(&caps.misc)?;
    builder = builder.with_leds(&caps.leds)?;
    builder = builder.with_sound(&caps.sounds)?;
    builder = builder.with_ff(&caps.ff)?;
    builder = builder.with_switches(&caps.switches)?;
    Ok(builder.build()?)
}

fn steady_state(
    source: &mut Device,
    mut sink: VirtualDevice,
    translator: &mut Translator,
    stop: &AtomicBool,
) -> Result<(), DaemonError> {
    while !stop.load(Ordering::Relaxed) {
        let events = match source.fetch_events() {
            Ok(events) => events,
            Err(crate::device::Error::Io(e))
                if e.kind() == std::io::ErrorKind::Interrupted =>
            {
                continue;
            }
            Err(e) => return Err(steady_state_error(e)),
        };
        for event in events {
            let out = translator.translate(event);
            if !out.is_empty() {
                sink.emit(&out).map_err(steady_state_error)?;
            }
        }
    }
    Ok(())
}

/// Mid-loop device-layer failures are reported as `DaemonError::Io`, distinct
/// from the startup resource-acquisition failures reported by `publish`/
/// `Device::open` (which keep the blanket `#[from]` conversion to
/// `DaemonError::Resource`).
fn steady_state_error(e: crate::device::Error) -> DaemonError {
    match e {
        crate::device::Error::Io(io) => DaemonError::Io(io),
        other => DaemonError::Resource(other),
    }
}
