//! Builder-DSL showcase: a card slides in with overshoot while fading
//! up, then a badge pops in on a delayed child animation.

use anyhow::Result;
use cadence_timeline::{Animatable, Animation, Easing, Prototype, Scheduler, Sprite, bind};
use tracing::info;

use super::drive;

pub fn run() -> Result<()> {
    let mut scheduler = Scheduler::new();

    let card = bind(Sprite {
        x: -300.0,
        y: 120.0,
        opacity: 0.0,
        width: 240.0,
        height: 160.0,
        ..Sprite::default()
    });
    let badge = bind(Sprite {
        opacity: 0.0,
        ..Sprite::default()
    });

    let timeline = Animation::on(card.clone())
        .and(
            Prototype::new()
                .move_to(40.0, 120.0, 450.0, Easing::OutBack)
                .fade(1.0, 250.0, Easing::Linear)
                .then()
                .rotate(3.0, 120.0, Easing::InOutSine),
        )
        .and_after(
            Prototype::on(badge.clone())
                .fade(1.0, 150.0, Easing::Linear)
                .scale(1.2, 1.2, 150.0, Easing::OutElastic)
                .then()
                .scale(1.0, 1.0, 100.0, Easing::InOutQuad),
            300.0,
        );

    info!("timeline:\n{}", timeline.outline());
    timeline.begin(&mut scheduler, false)?;
    let frames = drive(&mut scheduler)?;

    let card = card.borrow();
    let badge = badge.borrow();
    info!(
        frames,
        card_position = ?card.position(),
        card_rotation = card.rotation(),
        badge_scale = ?badge.scale(),
        "entrance settled"
    );
    Ok(())
}
