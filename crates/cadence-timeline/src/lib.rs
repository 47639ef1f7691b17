//! Timeline-based property animation.
//!
//! The engine animates scalar properties (position, opacity, rotation,
//! scale, size) on host-owned objects through the [`Animatable`] trait.
//! Timelines are built from three layers:
//!
//! - [`Effect`]: one eased change to one property, with a duration;
//! - [`Prototype`]: an ordered effect sequence with barrier gating;
//! - [`Animation`]: sequential groups of concurrent frames (effect
//!   sequences, delays, callbacks, markers, child animations).
//!
//! Time is entirely caller-driven: a [`Scheduler`] fans an explicit
//! millisecond delta out to every attached animation, and reports
//! activity transitions through a pollable event queue. The engine never
//! reads a clock and never spawns a thread.
//!
//! ```
//! use cadence_timeline::{Animatable, Animation, Easing, Prototype, Scheduler, Sprite, bind};
//!
//! let target = bind(Sprite::default());
//! let mut scheduler = Scheduler::new();
//!
//! let entrance = Animation::on(target.clone())
//!     .and(Prototype::new()
//!         .move_to(120.0, 40.0, 300.0, Easing::OutBack)
//!         .then()
//!         .fade(0.5, 100.0, Easing::Linear));
//! entrance.begin(&mut scheduler, false)?;
//!
//! while scheduler.active() > 0 {
//!     scheduler.tick(16.0)?;
//! }
//! assert_eq!(target.borrow().position(), (120.0, 40.0));
//! # Ok::<(), cadence_timeline::TimelineError>(())
//! ```

mod animation;
mod easing;
mod effect;
mod error;
mod frame;
mod group;
mod prototype;
mod scheduler;
pub mod schema;
mod target;

pub use animation::Animation;
pub use easing::Easing;
pub use effect::Effect;
pub use error::{Result, TimelineError};
pub use prototype::Prototype;
pub use scheduler::{Scheduler, SchedulerEvent};
pub use target::{Animatable, Sprite, TargetAction, TargetHandle, bind};
