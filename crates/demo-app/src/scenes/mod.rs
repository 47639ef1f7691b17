//! Demo scenes: each builds a timeline against plain sprites and plays
//! it on a simulated 60 fps clock, logging what the engine does.

pub mod entrance;
pub mod spec_driven;
pub mod stagger;

use anyhow::{Result, bail};
use cadence_timeline::Scheduler;
use tracing::info;

/// Simulated frame duration: 60 fps.
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Tick the scheduler until everything detaches, logging scheduler
/// events as they arrive. Bails out if a scene runs away.
pub fn drive(scheduler: &mut Scheduler) -> Result<usize> {
    let mut frames = 0usize;
    while scheduler.active() > 0 {
        scheduler.tick(FRAME_MS)?;
        for event in scheduler.drain_events() {
            info!(?event, frame = frames, "scheduler");
        }
        frames += 1;
        if frames > 10_000 {
            bail!("scene did not settle within 10000 frames");
        }
    }
    Ok(frames)
}
