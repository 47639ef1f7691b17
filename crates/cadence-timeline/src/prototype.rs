//! Ordered effect sequences.
//!
//! A prototype holds effects in declaration order and advances them
//! concurrently each tick, except across barriers: a barrier effect
//! stops the tick's iteration until everything declared before it has
//! finished. Prototypes may carry their own target binding; frames can
//! also supply one at play time, with the prototype's own binding
//! taking precedence.

use std::fmt;

use crate::animation::Animation;
use crate::easing::Easing;
use crate::effect::Effect;
use crate::error::Result;
use crate::scheduler::Scheduler;
use crate::target::{Animatable, TargetHandle};

/// A reusable sequence of effects.
#[derive(Default)]
pub struct Prototype {
    effects: Vec<Effect>,
    target: Option<TargetHandle>,
}

impl fmt::Debug for Prototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prototype")
            .field("effects", &self.effects)
            .field("bound", &self.target.is_some())
            .finish()
    }
}

impl Prototype {
    /// An empty, unbound prototype.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty prototype bound to `target`.
    pub fn on(target: TargetHandle) -> Self {
        Self {
            effects: Vec::new(),
            target: Some(target),
        }
    }

    /// Bind (or rebind) this prototype to `target`.
    pub fn bind(mut self, target: TargetHandle) -> Self {
        self.target = Some(target);
        self
    }

    /// Append an arbitrary effect.
    pub fn effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Append a move effect.
    pub fn move_to(self, x: f64, y: f64, duration_ms: f64, easing: Easing) -> Self {
        self.effect(Effect::move_to(x, y, duration_ms, easing))
    }

    /// Append a fade effect.
    pub fn fade(self, opacity: f64, duration_ms: f64, easing: Easing) -> Self {
        self.effect(Effect::fade(opacity, duration_ms, easing))
    }

    /// Append a rotate effect.
    pub fn rotate(self, degrees: f64, duration_ms: f64, easing: Easing) -> Self {
        self.effect(Effect::rotate(degrees, duration_ms, easing))
    }

    /// Append a scale effect.
    pub fn scale(self, x: f64, y: f64, duration_ms: f64, easing: Easing) -> Self {
        self.effect(Effect::scale(x, y, duration_ms, easing))
    }

    /// Append a size effect; a negative value skips that axis.
    pub fn size(self, width: f64, height: f64, duration_ms: f64, easing: Easing) -> Self {
        self.effect(Effect::size(width, height, duration_ms, easing))
    }

    /// Append a callback effect.
    pub fn call(self, handler: impl Fn(Option<&mut dyn Animatable>) + 'static) -> Self {
        self.effect(Effect::call(handler))
    }

    /// Append a barrier: effects after it wait for everything before it.
    pub fn then(self) -> Self {
        self.effect(Effect::barrier())
    }

    /// Append a timed delay: waits for everything before it, holds for
    /// `duration_ms`, and gates everything after it.
    pub fn wait(self, duration_ms: f64) -> Self {
        self.effect(Effect::wait(duration_ms)).then()
    }

    /// Concatenate another prototype's effects onto this one.
    pub fn and(mut self, other: &Prototype) -> Self {
        self.effects.extend(other.effects.iter().map(Effect::duplicate));
        self
    }

    /// Wrap this prototype in a fresh single-group animation.
    pub fn animation(self) -> Animation {
        Animation::new().and(self)
    }

    /// Wrap and play once.
    pub fn play(self, scheduler: &mut Scheduler) -> Result<Animation> {
        let animation = self.animation();
        animation.begin(scheduler, false)?;
        Ok(animation)
    }

    /// Bind to `target`, wrap, and play once.
    pub fn play_on(self, target: TargetHandle, scheduler: &mut Scheduler) -> Result<Animation> {
        self.bind(target).play(scheduler)
    }

    /// Wrap and play until something ends it.
    pub fn repeat(self, scheduler: &mut Scheduler) -> Result<Animation> {
        let animation = self.animation();
        animation.begin(scheduler, true)?;
        Ok(animation)
    }

    /// Bind to `target`, wrap, and play until something ends it.
    pub fn repeat_on(self, target: TargetHandle, scheduler: &mut Scheduler) -> Result<Animation> {
        self.bind(target).repeat(scheduler)
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// All effects finished; vacuously true when empty.
    pub fn is_finished(&self) -> bool {
        self.effects.iter().all(Effect::is_finished)
    }

    pub(crate) fn target(&self) -> Option<&TargetHandle> {
        self.target.as_ref()
    }

    /// Structural clone with fresh runtime state, optionally rebound.
    /// Passing `None` keeps this prototype's own binding.
    pub fn copy(&self, target: Option<TargetHandle>) -> Self {
        Self {
            effects: self.effects.iter().map(Effect::duplicate).collect(),
            target: target.or_else(|| self.target.clone()),
        }
    }

    /// Rewind every effect for a fresh play cycle.
    pub(crate) fn reset(&mut self) {
        for effect in &mut self.effects {
            effect.reset();
        }
    }

    /// Advance one tick against `fallback` (used only when this
    /// prototype carries no binding of its own).
    ///
    /// Effects run concurrently in declaration order; finished ones are
    /// skipped, and a barrier halts the pass unless every effect seen so
    /// far this tick has finished. The gate re-evaluates on every tick,
    /// so a barrier opens on the exact tick its predecessors complete.
    pub(crate) fn update(
        &mut self,
        fallback: Option<&TargetHandle>,
        delta_ms: f64,
    ) -> Result<bool> {
        let target = self.target.as_ref().or(fallback);
        let mut all_finished_so_far = true;
        for effect in &mut self.effects {
            if effect.is_finished() {
                continue;
            }
            if effect.is_barrier() && !all_finished_so_far {
                break;
            }
            match target {
                Some(handle) => {
                    let mut guard = handle.borrow_mut();
                    effect.update(Some(&mut *guard), delta_ms)?;
                }
                None => effect.update(None, delta_ms)?,
            }
            if !effect.is_finished() {
                all_finished_so_far = false;
            }
        }
        Ok(self.is_finished())
    }

    /// One-line structural summary for timeline outlines.
    pub(crate) fn describe(&self) -> String {
        let kinds: Vec<&str> = self.effects.iter().map(Effect::kind_name).collect();
        format!("Prototype[{}]", kinds.join(" "))
    }
}
