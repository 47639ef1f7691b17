//! End-to-end playback scenarios driven through the public API only.

use anyhow::Result;
use cadence_timeline::schema::TimelineSpec;
use cadence_timeline::{
    Animatable, Animation, Easing, Prototype, Scheduler, SchedulerEvent, Sprite, bind,
};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn run_to_idle(scheduler: &mut Scheduler) -> Result<usize> {
    let mut frames = 0;
    while scheduler.active() > 0 {
        scheduler.tick(FRAME_MS)?;
        frames += 1;
        assert!(frames < 10_000, "scheduler never went idle");
    }
    Ok(frames)
}

#[test]
fn entrance_timeline_settles_exactly() -> Result<()> {
    let mut scheduler = Scheduler::new();
    let card = bind(Sprite {
        x: -300.0,
        opacity: 0.0,
        ..Sprite::default()
    });

    let timeline = Animation::on(card.clone()).and(
        Prototype::new()
            .move_to(40.0, 120.0, 450.0, Easing::OutBack)
            .fade(1.0, 250.0, Easing::Linear)
            .then()
            .rotate(3.0, 120.0, Easing::InOutSine),
    );
    timeline.begin(&mut scheduler, false)?;
    run_to_idle(&mut scheduler)?;

    assert!(timeline.is_finished());
    let card = card.borrow();
    // Finish snaps to declared targets, no easing residue.
    assert_eq!(card.position(), (40.0, 120.0));
    assert_eq!(card.opacity(), 1.0);
    assert_eq!(card.rotation(), 3.0);
    Ok(())
}

#[test]
fn scheduler_reports_the_activity_envelope() -> Result<()> {
    let mut scheduler = Scheduler::new();
    let a = bind(Sprite::default());
    let b = bind(Sprite::default());

    let first = Animation::on(a).and(Prototype::new().fade(0.0, 100.0, Easing::Linear));
    let second = Animation::on(b).and(Prototype::new().fade(0.0, 200.0, Easing::Linear));
    first.begin(&mut scheduler, false)?;
    second.begin(&mut scheduler, false)?;
    run_to_idle(&mut scheduler)?;

    let events = scheduler.drain_events();
    assert_eq!(events.first(), Some(&SchedulerEvent::Started { active: 1 }));
    assert_eq!(events.last(), Some(&SchedulerEvent::Stopped));
    // The shorter timeline finishing first is a plain count change.
    assert!(events.contains(&SchedulerEvent::Changed { active: 2 }));
    assert!(events.contains(&SchedulerEvent::Changed { active: 1 }));
    Ok(())
}

#[test]
fn wait_gates_both_sides_of_a_sequence() -> Result<()> {
    let mut scheduler = Scheduler::new();
    let target = bind(Sprite::default());
    let timeline = Animation::on(target.clone()).and(
        Prototype::new()
            .fade(0.5, 48.0, Easing::Linear)
            .wait(96.0)
            .rotate(90.0, 48.0, Easing::Linear),
    );
    timeline.begin(&mut scheduler, false)?;

    // Through the fade: the delay has not released the rotation.
    for _ in 0..6 {
        scheduler.tick(16.0)?;
    }
    assert_eq!(target.borrow().opacity(), 0.5);
    assert_eq!(target.borrow().rotation(), 0.0);

    run_to_idle(&mut scheduler)?;
    assert_eq!(target.borrow().rotation(), 90.0);
    Ok(())
}

#[test]
fn barrier_extends_total_duration_sequentially() -> Result<()> {
    let run = |barrier: bool| -> Result<usize> {
        let mut scheduler = Scheduler::new();
        let target = bind(Sprite::default());
        let mut proto = Prototype::new().move_to(100.0, 0.0, 300.0, Easing::Linear);
        if barrier {
            proto = proto.then();
        }
        let timeline = Animation::on(target)
            .and(proto.fade(0.0, 500.0, Easing::Linear));
        timeline.begin(&mut scheduler, false)?;

        let mut frames = 0;
        while scheduler.active() > 0 {
            scheduler.tick(16.0)?;
            frames += 1;
            assert!(frames < 1_000, "timeline never settled");
        }
        Ok(frames)
    };

    let concurrent = run(false)?;
    let sequential = run(true)?;
    // Concurrent legs overlap and settle with the longer one; the
    // barrier makes the durations add up instead.
    assert!(concurrent as f64 * 16.0 <= 560.0, "concurrent: {concurrent} frames");
    assert!(sequential as f64 * 16.0 >= 800.0, "sequential: {sequential} frames");
    Ok(())
}

#[test]
fn repeating_timeline_runs_until_told_to_stop() -> Result<()> {
    let mut scheduler = Scheduler::new();
    let spinner = bind(Sprite::default());
    let spin = Animation::on(spinner.clone())
        .and(Prototype::new().rotate(360.0, 160.0, Easing::Linear));
    spin.begin(&mut scheduler, true)?;

    for _ in 0..60 {
        scheduler.tick(16.0)?;
        assert!(spin.is_running());
    }

    spin.end(&mut scheduler);
    assert!(spin.is_finished());
    assert_eq!(scheduler.active(), 0);
    assert_eq!(scheduler.drain_events().last(), Some(&SchedulerEvent::Stopped));
    Ok(())
}

#[test]
fn paused_timeline_resumes_where_it_left_off() -> Result<()> {
    let mut scheduler = Scheduler::new();
    let target = bind(Sprite::default());
    let timeline = Animation::on(target.clone())
        .and(Prototype::new().move_to(100.0, 0.0, 48.0, Easing::Linear))
        .then_pause()
        .and_then(Prototype::new().fade(0.0, 48.0, Easing::Linear));
    timeline.begin(&mut scheduler, false)?;
    run_to_idle(&mut scheduler)?;

    // Parked at the pause marker: first leg done, second not started.
    assert!(!timeline.is_finished());
    assert_eq!(target.borrow().position(), (100.0, 0.0));
    assert_eq!(target.borrow().opacity(), 1.0);

    timeline.resume(&mut scheduler)?;
    run_to_idle(&mut scheduler)?;
    assert!(timeline.is_finished());
    assert_eq!(target.borrow().opacity(), 0.0);
    Ok(())
}

#[test]
fn staggered_rows_land_in_order() -> Result<()> {
    let mut scheduler = Scheduler::new();
    let rows: Vec<_> = (0..4).map(|_| bind(Sprite { opacity: 0.0, ..Sprite::default() })).collect();

    let timeline = Animation::new().for_each(rows.iter().cloned(), |index| {
        Prototype::new()
            .wait(100.0 * index as f64)
            .fade(1.0, 100.0, Easing::Linear)
    });
    timeline.begin(&mut scheduler, false)?;

    for _ in 0..10 {
        scheduler.tick(16.0)?;
    }
    // Roughly 160ms in: row 0 landed, row 3 has not started.
    assert_eq!(rows[0].borrow().opacity(), 1.0);
    assert_eq!(rows[3].borrow().opacity(), 0.0);

    run_to_idle(&mut scheduler)?;
    assert!(rows.iter().all(|r| r.borrow().opacity() == 1.0));
    Ok(())
}

#[test]
fn delayed_child_animation_holds_its_parent_open() -> Result<()> {
    let mut scheduler = Scheduler::new();
    let banner = bind(Sprite { opacity: 0.0, ..Sprite::default() });

    let parent = Animation::new().and_after(
        Prototype::on(banner.clone()).fade(1.0, 200.0, Easing::Linear),
        400.0,
    );
    parent.begin(&mut scheduler, false)?;

    for _ in 0..6 {
        scheduler.tick(16.0)?;
    }
    // Still inside the child's lead-in delay: nothing written, both the
    // parent and the spawned child are attached.
    assert!(!parent.is_finished());
    assert_eq!(scheduler.active(), 2);
    assert_eq!(banner.borrow().opacity(), 0.0);

    run_to_idle(&mut scheduler)?;
    assert!(parent.is_finished());
    assert_eq!(banner.borrow().opacity(), 1.0);
    Ok(())
}

#[test]
fn restarting_reproduces_identical_writes() -> Result<()> {
    let mut scheduler = Scheduler::new();
    let target = bind(Sprite::default());
    let timeline = Animation::on(target.clone()).and(
        Prototype::new()
            .move_to(100.0, 60.0, 120.0, Easing::InOutCubic)
            .then()
            .fade(0.2, 80.0, Easing::OutQuad),
    );

    let record = |scheduler: &mut Scheduler| -> Result<Vec<(f64, f64, f64)>> {
        let mut samples = Vec::new();
        while scheduler.active() > 0 {
            scheduler.tick(16.0)?;
            let t = target.borrow();
            samples.push((t.position().0, t.position().1, t.opacity()));
        }
        Ok(samples)
    };

    timeline.begin(&mut scheduler, false)?;
    let first = record(&mut scheduler)?;

    // Rewind the target and play the same timeline again.
    {
        let mut t = target.borrow_mut();
        t.set_position(0.0, 0.0);
        t.set_opacity(1.0);
    }
    timeline.begin(&mut scheduler, false)?;
    let second = record(&mut scheduler)?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn json_timeline_plays_like_the_builder() -> Result<()> {
    let spec = TimelineSpec::from_json(
        r#"{
            "groups": [
                { "name": "in", "tracks": [
                    { "op": "steps", "steps": [
                        { "op": "move", "x": 50.0, "y": 10.0, "duration_ms": 96.0,
                          "easing": "out_cubic" },
                        { "op": "then" },
                        { "op": "scale", "x": 2.0, "y": 2.0, "duration_ms": 48.0 }
                    ] }
                ] },
                { "tracks": [ { "op": "stop" } ] }
            ]
        }"#,
    )?;

    let mut scheduler = Scheduler::new();
    let target = bind(Sprite::default());
    let timeline = spec.build(Some(target.clone()))?;
    timeline.begin(&mut scheduler, spec.repeat)?;
    run_to_idle(&mut scheduler)?;

    assert!(timeline.is_finished());
    assert_eq!(target.borrow().position(), (50.0, 10.0));
    assert_eq!(target.borrow().scale(), (2.0, 2.0));
    Ok(())
}

#[test]
fn play_from_starts_mid_timeline() -> Result<()> {
    let mut scheduler = Scheduler::new();
    let target = bind(Sprite::default());
    let timeline = Animation::on(target.clone())
        .then_group("enter")?
        .and(Prototype::new().fade(0.0, 48.0, Easing::Linear))
        .then_group("exit")?
        .and(Prototype::new().move_to(-100.0, 0.0, 48.0, Easing::Linear));

    timeline.play_from(&mut scheduler, "exit", false)?;
    run_to_idle(&mut scheduler)?;

    // Entered directly at "exit": the fade never ran.
    assert_eq!(target.borrow().opacity(), 1.0);
    assert_eq!(target.borrow().position(), (-100.0, 0.0));
    Ok(())
}
