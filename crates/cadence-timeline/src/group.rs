//! Groups: the sequential steps of a timeline.
//!
//! An animation plays its groups one at a time; within a group every
//! frame advances on every tick until all of them report finished. An
//! empty group finishes immediately, so sparse timelines skip through
//! placeholder steps without stalling.

use crate::error::Result;
use crate::frame::{Frame, FrameSignal};
use crate::scheduler::Scheduler;
use crate::target::TargetHandle;

#[derive(Debug, Default)]
pub(crate) struct Group {
    name: Option<String>,
    frames: Vec<Frame>,
}

impl Group {
    pub(crate) fn new(name: Option<String>) -> Self {
        Self {
            name,
            frames: Vec::new(),
        }
    }

    pub(crate) fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// All frames finished; vacuously true when empty.
    pub(crate) fn is_finished(&self) -> bool {
        self.frames.iter().all(Frame::is_finished)
    }

    /// Whether the group's final frame is a stop marker. Terminal stop
    /// groups are recognized by this so they are not appended twice.
    pub(crate) fn ends_with_stop(&self) -> bool {
        self.frames.last().is_some_and(Frame::is_stop)
    }

    pub(crate) fn reset(&mut self) {
        for frame in &mut self.frames {
            frame.reset();
        }
    }

    /// Advance every unfinished frame by one tick.
    ///
    /// Returns the first stop/pause request raised during the pass; the
    /// remaining frames still get their tick, and the owning animation
    /// acts on the request afterwards.
    pub(crate) fn update(
        &mut self,
        scheduler: &mut Scheduler,
        fallback: Option<&TargetHandle>,
        delta_ms: f64,
    ) -> Result<FrameSignal> {
        let mut signal = FrameSignal::Continue;
        for frame in &mut self.frames {
            if frame.is_finished() {
                continue;
            }
            let raised = frame.update(scheduler, fallback, delta_ms)?;
            if signal == FrameSignal::Continue {
                signal = raised;
            }
        }
        Ok(signal)
    }

    /// Indented structural summary for timeline outlines.
    pub(crate) fn describe(&self, index: usize, out: &mut String) {
        match &self.name {
            Some(name) => out.push_str(&format!("group {index} ({name:?})\n")),
            None => out.push_str(&format!("group {index}\n")),
        }
        for frame in &self.frames {
            out.push_str("  ");
            out.push_str(&frame.describe());
            out.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::prototype::Prototype;
    use crate::target::{Sprite, bind};

    #[test]
    fn empty_group_is_finished() {
        let group = Group::new(None);
        assert!(group.is_finished());
    }

    #[test]
    fn group_finishes_when_all_frames_do() {
        let target = bind(Sprite::default());
        let mut scheduler = Scheduler::new();
        let mut group = Group::new(None);
        group.push(Frame::Prototype(
            Prototype::new().fade(0.0, 30.0, Easing::Linear),
        ));
        group.push(Frame::wait(50.0));

        group.update(&mut scheduler, Some(&target), 16.0).unwrap();
        group.update(&mut scheduler, Some(&target), 16.0).unwrap();
        group.update(&mut scheduler, Some(&target), 16.0).unwrap();
        // The fade is done but the wait still holds the group open.
        assert!(!group.is_finished());
        group.update(&mut scheduler, Some(&target), 16.0).unwrap();
        assert!(group.is_finished());
    }

    #[test]
    fn stop_request_surfaces_from_the_pass() {
        let mut scheduler = Scheduler::new();
        let mut group = Group::new(None);
        group.push(Frame::stop());
        let signal = group.update(&mut scheduler, None, 16.0).unwrap();
        assert_eq!(signal, FrameSignal::Stop);
        assert!(group.ends_with_stop());
    }
}
