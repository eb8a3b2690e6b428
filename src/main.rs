//! Stagekit - engine runtime launcher.

use anyhow::{Context, Result};
use stagekit::arena::RuntimeArena;
use stagekit::options::read_options;
use stagekit::util::logger;
use stagekit::{NAME, VERSION};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::info;

fn main() -> Result<()> {
    let options = read_options(std::env::args_os()).context("failed to read launch options")?;
    let options = match options {
        Some(options) => options,
        // --help / --version already printed their text.
        None => return Ok(()),
    };

    logger::init();
    info!("{} {}", NAME, VERSION);
    info!("data path: {}", options.data_path.display());
    info!("settings path: {}", options.settings_path.display());
    info!("saves path: {}", options.saves_path.display());

    boot_probe().context("runtime arena boot probe failed")?;
    info!("runtime arena ready");

    Ok(())
}

/// Spin a managed arena through one start, drain and stop round trip.
fn boot_probe() -> Result<()> {
    let arena = RuntimeArena::managed();
    let probes = Arc::new(AtomicUsize::new(0));
    for _ in 0..4 {
        let probes = Arc::clone(&probes);
        arena.push_task(Arc::new(move || {
            probes.fetch_add(1, Ordering::SeqCst);
        }))?;
    }
    arena.start()?;
    arena.stop()?;
    anyhow::ensure!(
        probes.load(Ordering::SeqCst) == 4,
        "a boot probe task did not run"
    );
    Ok(())
}
