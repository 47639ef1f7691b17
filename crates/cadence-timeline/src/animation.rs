//! Timelines: sequenced groups of concurrent frames.
//!
//! An [`Animation`] is a cheaply cloneable handle; clones share one
//! timeline, so the handle stored in the scheduler and the one held by
//! the caller observe the same state. The builder methods grow the
//! timeline in place and hand the same handle back, which keeps chained
//! construction reading like the finished schedule.
//!
//! Playback is cooperative: the animation only moves when its scheduler
//! ticks it. A single pass advances every frame of the current group,
//! steps the cursor when the group completes, and wraps (resetting all
//! groups) past the end. Non-repeating timelines never reach the wrap:
//! [`Animation::begin`] appends a terminal stop group when the timeline
//! does not already end in one.
//!
//! Nesting an animation inside itself (directly or through a cycle of
//! child frames) is unsupported and panics on borrow at play time.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::error::{Result, TimelineError};
use crate::frame::{ChildAction, Frame, FrameSignal};
use crate::group::Group;
use crate::prototype::Prototype;
use crate::scheduler::Scheduler;
use crate::target::{Animatable, TargetHandle};

#[derive(Default)]
struct Inner {
    target: Option<TargetHandle>,
    groups: Vec<Group>,
    cursor: usize,
    repeat: bool,
    running: bool,
    finished: bool,
}

impl Inner {
    /// The group under construction; created on first use so builder
    /// chains need no explicit opening step.
    fn current(&mut self) -> &mut Group {
        if self.groups.is_empty() {
            self.groups.push(Group::new(None));
        }
        let last = self.groups.len() - 1;
        &mut self.groups[last]
    }

    fn group_index(&self, name: &str) -> Result<usize> {
        self.groups
            .iter()
            .position(|g| g.name() == Some(name))
            .ok_or_else(|| TimelineError::GroupNotFound(name.to_owned()))
    }
}

/// A shared handle to one timeline.
#[derive(Clone, Default)]
pub struct Animation(Rc<RefCell<Inner>>);

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(inner) => f
                .debug_struct("Animation")
                .field("groups", &inner.groups.len())
                .field("cursor", &inner.cursor)
                .field("running", &inner.running)
                .field("finished", &inner.finished)
                .finish(),
            Err(_) => f.write_str("Animation(updating)"),
        }
    }
}

impl Animation {
    /// An empty timeline with no default target.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty timeline whose frames fall back to `target`.
    pub fn on(target: TargetHandle) -> Self {
        let animation = Self::new();
        animation.0.borrow_mut().target = Some(target);
        animation
    }

    /// Identity comparison; clones of one handle are the same animation.
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    // --- builder -----------------------------------------------------

    /// Add an effect sequence to the current group.
    pub fn and(self, prototype: Prototype) -> Self {
        self.0.borrow_mut().current().push(Frame::Prototype(prototype));
        self
    }

    /// Add a copy of `prototype` bound to `target` to the current group.
    pub fn and_on(self, prototype: &Prototype, target: TargetHandle) -> Self {
        let bound = prototype.copy(Some(target));
        self.and(bound)
    }

    /// Start a new (unnamed) sequential group.
    pub fn then(self) -> Self {
        self.0.borrow_mut().groups.push(Group::new(None));
        self
    }

    /// Start a new named group; names must be unique per animation.
    pub fn then_group(self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        {
            let mut inner = self.0.borrow_mut();
            if inner.groups.iter().any(|g| g.name() == Some(name.as_str())) {
                return Err(TimelineError::DuplicateGroup(name));
            }
            inner.groups.push(Group::new(Some(name)));
        }
        Ok(self)
    }

    /// Start a new group containing `prototype`.
    pub fn and_then(self, prototype: Prototype) -> Self {
        self.then().and(prototype)
    }

    /// Add a callback frame to the current group.
    pub fn call(self, handler: impl Fn(Option<&mut dyn Animatable>) + 'static) -> Self {
        self.0
            .borrow_mut()
            .current()
            .push(Frame::callback(Rc::new(handler)));
        self
    }

    /// Start a new group containing a callback frame.
    pub fn then_call(self, handler: impl Fn(Option<&mut dyn Animatable>) + 'static) -> Self {
        self.then().call(handler)
    }

    /// Insert a strictly sequential delay: closes the current group,
    /// holds for `duration_ms`, and continues building in a fresh group
    /// after it. Frames chained after `wait` never overlap the delay.
    pub fn wait(self, duration_ms: f64) -> Self {
        let this = self.then();
        this.0.borrow_mut().current().push(Frame::wait(duration_ms));
        this.then()
    }

    /// Start a new group that ends the animation when reached.
    pub fn then_stop(self) -> Self {
        let this = self.then();
        this.0.borrow_mut().current().push(Frame::stop());
        this
    }

    /// Start a new group that detaches the animation (resumable) when
    /// reached.
    pub fn then_pause(self) -> Self {
        let this = self.then();
        this.0.borrow_mut().current().push(Frame::pause());
        this
    }

    /// Start `child` from its first group when the current group plays.
    /// The child runs independently on the scheduler; the current group
    /// stays open until the child stops running.
    pub fn and_animation(self, child: Animation) -> Self {
        self.0.borrow_mut().current().push(Frame::child(
            child,
            ChildAction::Start {
                start_index: 0,
                repeat: false,
            },
        ));
        self
    }

    /// Start `child` from its group named `group_name`.
    pub fn and_animation_from(self, child: Animation, group_name: &str) -> Result<Self> {
        let start_index = child.0.borrow().group_index(group_name)?;
        self.0.borrow_mut().current().push(Frame::child(
            child,
            ChildAction::Start {
                start_index,
                repeat: false,
            },
        ));
        Ok(self)
    }

    /// End `child` when the current group plays.
    pub fn and_stop_animation(self, child: Animation) -> Self {
        self.0
            .borrow_mut()
            .current()
            .push(Frame::child(child, ChildAction::Stop));
        self
    }

    /// Play `prototype` after `delay_ms`, wrapped in a child animation
    /// spawned when the current group plays.
    pub fn and_after(self, prototype: Prototype, delay_ms: f64) -> Self {
        let child = Animation::new().wait(delay_ms).and(prototype);
        self.and_animation(child)
    }

    /// Add one copy of a built prototype per target to the current
    /// group; all copies play concurrently. `build` receives the
    /// target's index, so per-target variation (offsets, delays) stays
    /// in the caller's hands.
    pub fn for_each<I>(self, targets: I, build: impl Fn(usize) -> Prototype) -> Self
    where
        I: IntoIterator<Item = TargetHandle>,
    {
        let mut this = self;
        for (index, target) in targets.into_iter().enumerate() {
            let bound = build(index).copy(Some(target));
            this = this.and(bound);
        }
        this
    }

    /// Like [`Animation::for_each`], but each copy gets its own group,
    /// so the targets play one after another.
    pub fn for_each_then<I>(self, targets: I, build: impl Fn(usize) -> Prototype) -> Self
    where
        I: IntoIterator<Item = TargetHandle>,
    {
        let mut this = self;
        for (index, target) in targets.into_iter().enumerate() {
            let bound = build(index).copy(Some(target));
            this = this.and_then(bound);
        }
        this
    }

    /// Append a frame to the current group. Builder for decoded
    /// timeline descriptions.
    pub(crate) fn push_frame(&self, frame: Frame) {
        self.0.borrow_mut().current().push(frame);
    }

    // --- playback ----------------------------------------------------

    /// Begin playback from the first group.
    pub fn begin(&self, scheduler: &mut Scheduler, repeat: bool) -> Result<()> {
        self.begin_at(scheduler, 0, repeat)
    }

    /// Begin playback from the group named `group_name`.
    pub fn play_from(
        &self,
        scheduler: &mut Scheduler,
        group_name: &str,
        repeat: bool,
    ) -> Result<()> {
        let start_index = self.0.borrow().group_index(group_name)?;
        self.begin_at(scheduler, start_index, repeat)
    }

    /// Begin playback from the group at `start_index`.
    ///
    /// A non-repeating timeline that does not already end in a stop
    /// group gets a terminal one appended here, so it detaches itself on
    /// completion. Beginning an animation that is already playing
    /// rewinds it.
    pub fn begin_at(
        &self,
        scheduler: &mut Scheduler,
        start_index: usize,
        repeat: bool,
    ) -> Result<()> {
        {
            let mut inner = self.0.borrow_mut();
            let needs_terminal_stop =
                !repeat && !inner.groups.last().is_some_and(Group::ends_with_stop);
            if needs_terminal_stop {
                let mut terminal = Group::new(None);
                terminal.push(Frame::stop());
                inner.groups.push(terminal);
            }
            let count = inner.groups.len();
            if start_index >= count {
                return Err(TimelineError::GroupIndexOutOfRange {
                    index: start_index,
                    count,
                });
            }
            for group in &mut inner.groups {
                group.reset();
            }
            inner.cursor = start_index;
            inner.repeat = repeat;
            inner.finished = false;
            inner.running = true;
            debug!(groups = count, start_index, repeat, "animation begun");
        }
        scheduler.attach(self.clone());
        Ok(())
    }

    /// End playback: mark finished, rewind the cursor, detach.
    pub fn end(&self, scheduler: &mut Scheduler) {
        {
            let mut inner = self.0.borrow_mut();
            inner.finished = true;
            inner.running = false;
            inner.cursor = 0;
            debug!("animation ended");
        }
        scheduler.detach(self);
    }

    /// Detach without marking finished; [`Animation::resume`] continues
    /// from the paused position.
    pub fn pause(&self, scheduler: &mut Scheduler) {
        {
            let mut inner = self.0.borrow_mut();
            inner.running = false;
            debug!(cursor = inner.cursor, "animation paused");
        }
        scheduler.detach(self);
    }

    /// Re-attach a paused animation where it left off. Resuming a
    /// finished animation starts it over.
    pub fn resume(&self, scheduler: &mut Scheduler) -> Result<()> {
        let (finished, repeat) = {
            let inner = self.0.borrow();
            (inner.finished, inner.repeat)
        };
        if finished {
            return self.begin(scheduler, repeat);
        }
        self.0.borrow_mut().running = true;
        scheduler.attach(self.clone());
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.0.borrow().running
    }

    pub fn is_finished(&self) -> bool {
        self.0.borrow().finished
    }

    /// Advance the current group by one tick.
    pub(crate) fn update(&self, scheduler: &mut Scheduler, delta_ms: f64) -> Result<()> {
        let signal = {
            let mut inner = self.0.borrow_mut();
            if inner.finished || !inner.running {
                return Ok(());
            }
            let inner = &mut *inner;
            let Some(group) = inner.groups.get_mut(inner.cursor) else {
                return Ok(());
            };
            let signal = group.update(scheduler, inner.target.as_ref(), delta_ms)?;
            if group.is_finished() {
                inner.cursor += 1;
                trace!(cursor = inner.cursor, "group complete");
                if inner.cursor >= inner.groups.len() {
                    // Wrapped past the end: rewind everything for the
                    // next cycle. Non-repeating timelines stop before
                    // this via their terminal stop group.
                    for group in &mut inner.groups {
                        group.reset();
                    }
                    inner.cursor = 0;
                }
            }
            signal
        };
        match signal {
            FrameSignal::Continue => {}
            FrameSignal::Stop => self.end(scheduler),
            FrameSignal::Pause => self.pause(scheduler),
        }
        Ok(())
    }

    /// Human-readable structural dump of the timeline, for diagnostics.
    pub fn outline(&self) -> String {
        let inner = self.0.borrow();
        let mut out = format!(
            "animation: {} group(s), cursor {}, repeat {}\n",
            inner.groups.len(),
            inner.cursor,
            inner.repeat
        );
        for (index, group) in inner.groups.iter().enumerate() {
            group.describe(index, &mut out);
        }
        out
    }
}
