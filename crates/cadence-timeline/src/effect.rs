//! A single time-bounded manipulation of one target property.
//!
//! Effects are the leaves of a timeline. Each one owns the declarative
//! parameters (kind, target value, duration, easing) plus a small amount
//! of runtime state: an elapsed-time accumulator and the
//! `running`/`finished` flags. The interpolation range is computed lazily
//! on the first update of each play cycle, from the target's value at
//! that moment, so the same effect replays correctly from wherever the
//! target happens to be.

use std::fmt;
use std::rc::Rc;

use crate::easing::Easing;
use crate::error::{Result, TimelineError};
use crate::target::{Animatable, TargetAction};

/// One interpolation channel: captured start, precomputed offset, and the
/// declarative target value.
///
/// `start` and `offset` are runtime state filled in by [`Range::init`];
/// only `target` survives a [`Effect::duplicate`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Range {
    start: f64,
    offset: f64,
    target: f64,
}

impl Range {
    fn to(target: f64) -> Self {
        Self {
            start: 0.0,
            offset: 0.0,
            target,
        }
    }

    fn init(&mut self, current: f64) {
        self.start = current;
        self.offset = self.target - self.start;
    }

    fn sample(&self, easing: Easing, elapsed_ms: f64, duration_ms: f64) -> f64 {
        self.start + easing.evaluate(elapsed_ms, 0.0, self.offset, duration_ms)
    }
}

/// The closed set of effect kinds.
enum EffectKind {
    /// Animate the translate position to an absolute `(x, y)`.
    Move {
        x: Range,
        y: Range,
        /// Separate easing for the Y channel; falls back to the effect's
        /// easing when absent.
        easing_y: Option<Easing>,
    },
    /// Animate opacity to a target value.
    Fade { opacity: Range },
    /// Animate rotation to a target angle in degrees.
    Rotate { angle: Range },
    /// Animate the scale factors to `(x, y)`.
    Scale { x: Range, y: Range },
    /// Animate width/height. A negative target on an axis leaves that
    /// axis untouched.
    Size { x: Range, y: Range },
    /// Invoke a handler once when the effect finishes (immediately, since
    /// callbacks are zero-duration).
    Call { handler: TargetAction },
    /// Barrier: gates later effects in the prototype until every earlier
    /// effect has finished.
    Then,
    /// Timed barrier: gates like [`EffectKind::Then`] and additionally
    /// consumes its duration before finishing.
    Wait,
}

impl EffectKind {
    fn name(&self) -> &'static str {
        match self {
            Self::Move { .. } => "Move",
            Self::Fade { .. } => "Fade",
            Self::Rotate { .. } => "Rotate",
            Self::Scale { .. } => "Scale",
            Self::Size { .. } => "Size",
            Self::Call { .. } => "Call",
            Self::Then => "Then",
            Self::Wait => "Wait",
        }
    }
}

impl fmt::Debug for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move { x, y, easing_y } => f
                .debug_struct("Move")
                .field("x", x)
                .field("y", y)
                .field("easing_y", easing_y)
                .finish(),
            Self::Fade { opacity } => f.debug_struct("Fade").field("opacity", opacity).finish(),
            Self::Rotate { angle } => f.debug_struct("Rotate").field("angle", angle).finish(),
            Self::Scale { x, y } => f.debug_struct("Scale").field("x", x).field("y", y).finish(),
            Self::Size { x, y } => f.debug_struct("Size").field("x", x).field("y", y).finish(),
            Self::Call { .. } => f.write_str("Call"),
            Self::Then => f.write_str("Then"),
            Self::Wait => f.write_str("Wait"),
        }
    }
}

/// A single effect: declarative parameters plus per-play runtime state.
#[derive(Debug)]
pub struct Effect {
    kind: EffectKind,
    duration_ms: f64,
    easing: Easing,
    elapsed_ms: f64,
    running: bool,
    finished: bool,
}

impl Effect {
    fn new(kind: EffectKind, duration_ms: f64, easing: Easing) -> Self {
        Self {
            kind,
            duration_ms,
            easing,
            elapsed_ms: 0.0,
            running: false,
            finished: false,
        }
    }

    /// Move the target's position to `(x, y)`.
    pub fn move_to(x: f64, y: f64, duration_ms: f64, easing: Easing) -> Self {
        Self::new(
            EffectKind::Move {
                x: Range::to(x),
                y: Range::to(y),
                easing_y: None,
            },
            duration_ms,
            easing,
        )
    }

    /// Fade the target's opacity to `opacity`.
    pub fn fade(opacity: f64, duration_ms: f64, easing: Easing) -> Self {
        Self::new(
            EffectKind::Fade {
                opacity: Range::to(opacity),
            },
            duration_ms,
            easing,
        )
    }

    /// Rotate the target to `degrees`.
    pub fn rotate(degrees: f64, duration_ms: f64, easing: Easing) -> Self {
        Self::new(
            EffectKind::Rotate {
                angle: Range::to(degrees),
            },
            duration_ms,
            easing,
        )
    }

    /// Scale the target to factors `(x, y)`.
    pub fn scale(x: f64, y: f64, duration_ms: f64, easing: Easing) -> Self {
        Self::new(
            EffectKind::Scale {
                x: Range::to(x),
                y: Range::to(y),
            },
            duration_ms,
            easing,
        )
    }

    /// Resize the target to `width` x `height`. Pass a negative value to
    /// leave that axis unanimated.
    pub fn size(width: f64, height: f64, duration_ms: f64, easing: Easing) -> Self {
        Self::new(
            EffectKind::Size {
                x: Range::to(width),
                y: Range::to(height),
            },
            duration_ms,
            easing,
        )
    }

    /// Invoke `handler` once; finishes on its first tick.
    pub fn call(handler: impl Fn(Option<&mut dyn Animatable>) + 'static) -> Self {
        Self::new(
            EffectKind::Call {
                handler: Rc::new(handler),
            },
            0.0,
            Easing::Linear,
        )
    }

    /// Zero-duration barrier ("then"): later effects wait for all
    /// earlier ones.
    pub fn barrier() -> Self {
        Self::new(EffectKind::Then, 0.0, Easing::Linear)
    }

    /// Timed barrier: gates later effects and takes `duration_ms` to
    /// finish.
    pub fn wait(duration_ms: f64) -> Self {
        Self::new(EffectKind::Wait, duration_ms, Easing::Linear)
    }

    /// Use a different easing curve for the Y channel of a move effect.
    /// No-op for other kinds.
    pub fn with_easing_y(mut self, easing: Easing) -> Self {
        if let EffectKind::Move { easing_y, .. } = &mut self.kind {
            *easing_y = Some(easing);
        }
        self
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Barriers gate the prototype's effect iteration.
    pub(crate) fn is_barrier(&self) -> bool {
        matches!(self.kind, EffectKind::Then | EffectKind::Wait)
    }

    /// Property effects must have a target at play time; barriers and
    /// callbacks run without one.
    fn needs_target(&self) -> bool {
        matches!(
            self.kind,
            EffectKind::Move { .. }
                | EffectKind::Fade { .. }
                | EffectKind::Rotate { .. }
                | EffectKind::Scale { .. }
                | EffectKind::Size { .. }
        )
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Rewind runtime state; declarative parameters are untouched and the
    /// range re-initializes on the next start.
    pub(crate) fn reset(&mut self) {
        self.running = false;
        self.finished = false;
        self.elapsed_ms = 0.0;
    }

    /// Structural clone carrying only the declarative parameters. Shares
    /// no mutable state with the original (callback handlers are shared
    /// immutably).
    pub(crate) fn duplicate(&self) -> Self {
        let kind = match &self.kind {
            EffectKind::Move { x, y, easing_y } => EffectKind::Move {
                x: Range::to(x.target),
                y: Range::to(y.target),
                easing_y: *easing_y,
            },
            EffectKind::Fade { opacity } => EffectKind::Fade {
                opacity: Range::to(opacity.target),
            },
            EffectKind::Rotate { angle } => EffectKind::Rotate {
                angle: Range::to(angle.target),
            },
            EffectKind::Scale { x, y } => EffectKind::Scale {
                x: Range::to(x.target),
                y: Range::to(y.target),
            },
            EffectKind::Size { x, y } => EffectKind::Size {
                x: Range::to(x.target),
                y: Range::to(y.target),
            },
            EffectKind::Call { handler } => EffectKind::Call {
                handler: Rc::clone(handler),
            },
            EffectKind::Then => EffectKind::Then,
            EffectKind::Wait => EffectKind::Wait,
        };
        Self::new(kind, self.duration_ms, self.easing)
    }

    /// Advance the effect by one tick.
    ///
    /// The first update of a play cycle starts the effect: it zeroes the
    /// elapsed accumulator and, for non-zero durations, captures the
    /// interpolation range from the target's current value. Zero-duration
    /// effects never produce an interpolated write; they snap straight to
    /// the target value on this first tick.
    pub(crate) fn update(
        &mut self,
        mut target: Option<&mut dyn Animatable>,
        delta_ms: f64,
    ) -> Result<()> {
        if self.needs_target() && target.is_none() {
            return Err(TimelineError::MissingTarget);
        }

        if !self.running {
            self.running = true;
            self.finished = false;
            self.elapsed_ms = 0.0;
            if self.duration_ms > 0.0 {
                if let Some(t) = target.as_mut() {
                    self.init(&mut **t);
                }
            }
        } else {
            self.elapsed_ms += delta_ms;
        }

        if self.duration_ms == 0.0 || self.elapsed_ms >= self.duration_ms {
            self.finished = true;
            self.running = false;
            self.finish(target);
        } else {
            self.advance(target);
        }
        Ok(())
    }

    /// Capture the interpolation range from the target's current value.
    fn init(&mut self, target: &mut dyn Animatable) {
        match &mut self.kind {
            EffectKind::Move { x, y, .. } => {
                let (cx, cy) = target.position();
                x.init(cx);
                y.init(cy);
            }
            EffectKind::Fade { opacity } => opacity.init(target.opacity()),
            EffectKind::Rotate { angle } => angle.init(target.rotation()),
            EffectKind::Scale { x, y } => {
                let (cx, cy) = target.scale();
                x.init(cx);
                y.init(cy);
            }
            EffectKind::Size { x, y } => {
                let (w, h) = target.size();
                if x.target >= 0.0 {
                    x.init(w);
                }
                if y.target >= 0.0 {
                    y.init(h);
                }
            }
            EffectKind::Call { .. } | EffectKind::Then | EffectKind::Wait => {}
        }
    }

    /// Write the interpolated value for the current elapsed time.
    fn advance(&mut self, target: Option<&mut dyn Animatable>) {
        let elapsed = self.elapsed_ms;
        let duration = self.duration_ms;
        let easing = self.easing;
        match (&self.kind, target) {
            (EffectKind::Move { x, y, easing_y }, Some(t)) => {
                let ey = easing_y.unwrap_or(easing);
                t.set_position(
                    x.sample(easing, elapsed, duration),
                    y.sample(ey, elapsed, duration),
                );
            }
            (EffectKind::Fade { opacity }, Some(t)) => {
                t.set_opacity(opacity.sample(easing, elapsed, duration));
            }
            (EffectKind::Rotate { angle }, Some(t)) => {
                t.set_rotation(angle.sample(easing, elapsed, duration));
            }
            (EffectKind::Scale { x, y }, Some(t)) => {
                t.set_scale(
                    x.sample(easing, elapsed, duration),
                    y.sample(easing, elapsed, duration),
                );
            }
            (EffectKind::Size { x, y }, Some(t)) => {
                let (w, h) = t.size();
                let nw = if x.target >= 0.0 {
                    x.sample(easing, elapsed, duration)
                } else {
                    w
                };
                let nh = if y.target >= 0.0 {
                    y.sample(easing, elapsed, duration)
                } else {
                    h
                };
                t.set_size(nw, nh);
            }
            _ => {}
        }
    }

    /// Snap to the exact target value, eliminating floating-point drift
    /// at completion. Callback effects invoke their handler here.
    fn finish(&mut self, target: Option<&mut dyn Animatable>) {
        match (&self.kind, target) {
            (EffectKind::Move { x, y, .. }, Some(t)) => t.set_position(x.target, y.target),
            (EffectKind::Fade { opacity }, Some(t)) => t.set_opacity(opacity.target),
            (EffectKind::Rotate { angle }, Some(t)) => t.set_rotation(angle.target),
            (EffectKind::Scale { x, y }, Some(t)) => t.set_scale(x.target, y.target),
            (EffectKind::Size { x, y }, Some(t)) => {
                let (w, h) = t.size();
                t.set_size(
                    if x.target >= 0.0 { x.target } else { w },
                    if y.target >= 0.0 { y.target } else { h },
                );
            }
            (EffectKind::Call { handler }, target) => handler(target),
            _ => {}
        }
    }
}
