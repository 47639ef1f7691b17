//! Staggered list entrance: one prototype template applied across a
//! column of rows, each row delayed a little more than the last.

use anyhow::Result;
use cadence_timeline::{Animatable, Animation, Easing, Prototype, Scheduler, Sprite, bind};
use tracing::info;

use super::drive;

const ROWS: usize = 6;

pub fn run() -> Result<()> {
    let mut scheduler = Scheduler::new();

    let rows: Vec<_> = (0..ROWS)
        .map(|i| {
            bind(Sprite {
                x: -200.0,
                y: 40.0 * i as f64,
                opacity: 0.0,
                ..Sprite::default()
            })
        })
        .collect();

    // Concurrent copies, staggered by a per-row lead-in wait.
    let timeline = Animation::new().for_each(rows.iter().cloned(), |index| {
        let row_y = 40.0 * index as f64;
        Prototype::new()
            .wait(60.0 * index as f64)
            .move_to(20.0, row_y, 300.0, Easing::OutCubic)
            .fade(1.0, 200.0, Easing::Linear)
    });

    timeline.begin(&mut scheduler, false)?;
    let frames = drive(&mut scheduler)?;

    for (index, row) in rows.iter().enumerate() {
        let row = row.borrow();
        info!(index, position = ?row.position(), opacity = row.opacity(), "row");
    }
    info!(frames, "stagger settled");
    Ok(())
}
