//! Data-driven scene: the timeline comes from a JSON description
//! instead of the builder DSL.

use anyhow::Result;
use cadence_timeline::schema::TimelineSpec;
use cadence_timeline::{Animatable, Scheduler, Sprite, bind};
use tracing::info;

use super::drive;

const TOAST: &str = r#"{
    "groups": [
        {
            "name": "slide_in",
            "tracks": [
                { "op": "steps", "steps": [
                    { "op": "move", "x": 20.0, "y": 20.0, "duration_ms": 250.0,
                      "easing": "out_back" },
                    { "op": "fade", "opacity": 1.0, "duration_ms": 180.0 }
                ] }
            ]
        },
        {
            "name": "hold",
            "tracks": [ { "op": "wait", "duration_ms": 1200.0 } ]
        },
        {
            "name": "slide_out",
            "tracks": [
                { "op": "steps", "steps": [
                    { "op": "fade", "opacity": 0.0, "duration_ms": 150.0,
                      "easing": "in_quad" },
                    { "op": "then" },
                    { "op": "size", "height": 0.0, "duration_ms": 120.0 }
                ] }
            ]
        }
    ]
}"#;

pub fn run() -> Result<()> {
    let mut scheduler = Scheduler::new();
    let toast = bind(Sprite {
        x: 20.0,
        y: -60.0,
        opacity: 0.0,
        width: 320.0,
        height: 48.0,
        ..Sprite::default()
    });

    let spec = TimelineSpec::from_json(TOAST)?;
    let timeline = spec.build(Some(toast.clone()))?;
    info!("timeline:\n{}", timeline.outline());

    timeline.begin(&mut scheduler, spec.repeat)?;
    let frames = drive(&mut scheduler)?;

    let toast = toast.borrow();
    info!(
        frames,
        position = ?toast.position(),
        opacity = toast.opacity(),
        size = ?toast.size(),
        "toast settled"
    );
    Ok(())
}
