//! Frames: the concurrent members of a timeline group.
//!
//! Each frame wraps one playable thing (an effect sequence, a delay, a
//! callback, a marker, or a child animation). The closed enum keeps the
//! whole step vocabulary in one match, so the group pass is a plain loop
//! with no dynamic dispatch.

use std::fmt;

use crate::animation::Animation;
use crate::error::Result;
use crate::prototype::Prototype;
use crate::scheduler::Scheduler;
use crate::target::{TargetAction, TargetHandle};

/// Lifecycle request a frame hands back to its owning animation.
///
/// Stop and pause markers cannot end the animation from inside the group
/// pass (the animation is the caller); they report the request instead,
/// and the animation honors it after the pass, within the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum FrameSignal {
    #[default]
    Continue,
    /// End the owning animation: mark finished, rewind, detach.
    Stop,
    /// Detach the owning animation without marking it finished.
    Pause,
}

/// What a child-animation frame does to its child when it fires.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ChildAction {
    /// Begin the child at `start_index`, attaching it to the scheduler.
    Start { start_index: usize, repeat: bool },
    /// End the child, detaching it.
    Stop,
}

pub(crate) enum Frame {
    /// Plays an effect sequence to completion.
    Prototype(Prototype),
    /// Invokes a handler once, then is finished.
    Callback { handler: TargetAction, fired: bool },
    /// Holds the group open for a fixed duration.
    Wait {
        duration_ms: f64,
        elapsed_ms: f64,
        started: bool,
    },
    /// One-shot marker: requests [`FrameSignal::Stop`] on its first tick.
    Stop { fired: bool },
    /// One-shot marker: requests [`FrameSignal::Pause`] on its first tick.
    Pause { fired: bool },
    /// Starts or stops an independent child animation on its first tick.
    /// The child runs on the scheduler, not inside this timeline; the
    /// frame holds its group open until the child is no longer running.
    Child {
        animation: Animation,
        action: ChildAction,
        started: bool,
    },
}

impl Frame {
    pub(crate) fn wait(duration_ms: f64) -> Self {
        Self::Wait {
            duration_ms,
            elapsed_ms: 0.0,
            started: false,
        }
    }

    pub(crate) fn callback(handler: TargetAction) -> Self {
        Self::Callback {
            handler,
            fired: false,
        }
    }

    pub(crate) fn stop() -> Self {
        Self::Stop { fired: false }
    }

    pub(crate) fn pause() -> Self {
        Self::Pause { fired: false }
    }

    pub(crate) fn child(animation: Animation, action: ChildAction) -> Self {
        Self::Child {
            animation,
            action,
            started: false,
        }
    }

    pub(crate) fn is_stop(&self) -> bool {
        matches!(self, Self::Stop { .. })
    }

    pub(crate) fn is_finished(&self) -> bool {
        match self {
            Self::Prototype(prototype) => prototype.is_finished(),
            Self::Callback { fired, .. } => *fired,
            Self::Wait {
                duration_ms,
                elapsed_ms,
                started,
            } => *started && (*duration_ms == 0.0 || *elapsed_ms >= *duration_ms),
            Self::Stop { fired } | Self::Pause { fired } => *fired,
            Self::Child {
                animation, started, ..
            } => *started && !animation.is_running(),
        }
    }

    /// Rewind for the next play cycle.
    pub(crate) fn reset(&mut self) {
        match self {
            Self::Prototype(prototype) => prototype.reset(),
            Self::Callback { fired, .. } => *fired = false,
            Self::Wait {
                elapsed_ms,
                started,
                ..
            } => {
                *elapsed_ms = 0.0;
                *started = false;
            }
            Self::Stop { fired } | Self::Pause { fired } => *fired = false,
            Self::Child { started, .. } => *started = false,
        }
    }

    /// Advance one tick. `fallback` is the owning animation's default
    /// target, handed to prototypes and callbacks that carry no binding
    /// of their own.
    pub(crate) fn update(
        &mut self,
        scheduler: &mut Scheduler,
        fallback: Option<&TargetHandle>,
        delta_ms: f64,
    ) -> Result<FrameSignal> {
        match self {
            Self::Prototype(prototype) => {
                prototype.update(fallback, delta_ms)?;
            }
            Self::Callback { handler, fired } => {
                if !*fired {
                    *fired = true;
                    match fallback {
                        Some(handle) => {
                            let mut guard = handle.borrow_mut();
                            handler(Some(&mut *guard));
                        }
                        None => handler(None),
                    }
                }
            }
            Self::Wait {
                elapsed_ms,
                started,
                ..
            } => {
                if *started {
                    *elapsed_ms += delta_ms;
                } else {
                    *started = true;
                    *elapsed_ms = 0.0;
                }
            }
            Self::Stop { fired } => {
                if !*fired {
                    *fired = true;
                    return Ok(FrameSignal::Stop);
                }
            }
            Self::Pause { fired } => {
                if !*fired {
                    *fired = true;
                    return Ok(FrameSignal::Pause);
                }
            }
            Self::Child {
                animation,
                action,
                started,
            } => {
                if !*started {
                    *started = true;
                    match *action {
                        ChildAction::Start {
                            start_index,
                            repeat,
                        } => animation.begin_at(scheduler, start_index, repeat)?,
                        ChildAction::Stop => animation.end(scheduler),
                    }
                }
            }
        }
        Ok(FrameSignal::Continue)
    }

    /// One-line structural summary for timeline outlines.
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Prototype(prototype) => prototype.describe(),
            Self::Callback { .. } => "Callback".to_owned(),
            Self::Wait { duration_ms, .. } => format!("Wait({duration_ms}ms)"),
            Self::Stop { .. } => "Stop".to_owned(),
            Self::Pause { .. } => "Pause".to_owned(),
            Self::Child {
                action: ChildAction::Start { .. },
                ..
            } => "Child(start)".to_owned(),
            Self::Child {
                action: ChildAction::Stop,
                ..
            } => "Child(stop)".to_owned(),
        }
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
