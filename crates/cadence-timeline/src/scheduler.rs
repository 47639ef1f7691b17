//! The tick driver.
//!
//! One scheduler owns the set of attached animations and fans a single
//! time delta out to all of them. It keeps no clock of its own; the host
//! decides what a tick is worth and calls [`Scheduler::tick`] from its
//! frame loop. Attachment changes are reported through a drainable event
//! queue so the host can start and stop its loop on demand.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::animation::Animation;
use crate::error::Result;

/// Activity notification emitted on attachment changes.
///
/// `Started` fires on the zero-to-one transition, `Stopped` when the
/// last animation detaches, and `Changed` for every other change to the
/// active count. Hosts typically resume their frame loop on `Started`
/// and idle it on `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchedulerEvent {
    Started { active: usize },
    Changed { active: usize },
    Stopped,
}

/// Dispatches ticks to every attached animation.
#[derive(Debug, Default)]
pub struct Scheduler {
    attached: Vec<Animation>,
    events: VecDeque<SchedulerEvent>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently attached animations.
    pub fn active(&self) -> usize {
        self.attached.len()
    }

    /// Pop the oldest pending event, if any.
    pub fn poll_event(&mut self) -> Option<SchedulerEvent> {
        self.events.pop_front()
    }

    /// Drain every pending event in arrival order.
    pub fn drain_events(&mut self) -> Vec<SchedulerEvent> {
        self.events.drain(..).collect()
    }

    /// Idempotent: attaching an already-attached animation is a no-op
    /// and emits nothing.
    pub(crate) fn attach(&mut self, animation: Animation) {
        if self.attached.iter().any(|a| a.ptr_eq(&animation)) {
            return;
        }
        self.attached.push(animation);
        let active = self.attached.len();
        debug!(active, "animation attached");
        self.events.push_back(if active == 1 {
            SchedulerEvent::Started { active }
        } else {
            SchedulerEvent::Changed { active }
        });
    }

    pub(crate) fn detach(&mut self, animation: &Animation) {
        let before = self.attached.len();
        self.attached.retain(|a| !a.ptr_eq(animation));
        if self.attached.len() == before {
            return;
        }
        let active = self.attached.len();
        debug!(active, "animation detached");
        self.events.push_back(if active == 0 {
            SchedulerEvent::Stopped
        } else {
            SchedulerEvent::Changed { active }
        });
    }

    /// Advance every attached animation by `delta_ms`.
    ///
    /// The attached set is snapshotted first, so animations may attach
    /// or detach others (or themselves) during the pass; a newly
    /// attached animation takes its first tick on the next call. The
    /// first playback error aborts the pass and is returned; nothing is
    /// detached on error, the caller owns that decision.
    pub fn tick(&mut self, delta_ms: f64) -> Result<()> {
        let snapshot = self.attached.clone();
        for animation in snapshot {
            if animation.is_running() {
                animation.update(self, delta_ms)?;
            }
        }
        Ok(())
    }
}
