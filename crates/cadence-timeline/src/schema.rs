//! Declarative timeline descriptions.
//!
//! A [`TimelineSpec`] is the data-only mirror of the builder DSL: groups
//! of tracks, where a track is either an effect sequence or a structural
//! frame. Specs deserialize from JSON and build into a ready-to-play
//! [`Animation`]. Callbacks and child animations have no data
//! representation and stay builder-only.

use serde::{Deserialize, Serialize};

use crate::animation::Animation;
use crate::easing::Easing;
use crate::effect::Effect;
use crate::error::Result;
use crate::frame::Frame;
use crate::prototype::Prototype;
use crate::target::TargetHandle;

/// A whole timeline: ordered groups plus the repeat flag to play it
/// with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineSpec {
    #[serde(default)]
    pub repeat: bool,
    pub groups: Vec<GroupSpec>,
}

/// One sequential step of the timeline; its tracks play concurrently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tracks: Vec<TrackSpec>,
}

/// One concurrent member of a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TrackSpec {
    /// An effect sequence (one prototype).
    Steps { steps: Vec<StepSpec> },
    /// Hold the group open for a duration.
    Wait { duration_ms: f64 },
    /// End the animation when this group plays.
    Stop,
    /// Detach the animation, resumable, when this group plays.
    Pause,
}

/// One effect within a [`TrackSpec::Steps`] sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StepSpec {
    Move {
        x: f64,
        y: f64,
        duration_ms: f64,
        #[serde(default)]
        easing: Easing,
        #[serde(default)]
        easing_y: Option<Easing>,
    },
    Fade {
        opacity: f64,
        duration_ms: f64,
        #[serde(default)]
        easing: Easing,
    },
    Rotate {
        degrees: f64,
        duration_ms: f64,
        #[serde(default)]
        easing: Easing,
    },
    Scale {
        x: f64,
        y: f64,
        duration_ms: f64,
        #[serde(default)]
        easing: Easing,
    },
    /// Omitted axes are left unanimated.
    Size {
        #[serde(default)]
        width: Option<f64>,
        #[serde(default)]
        height: Option<f64>,
        duration_ms: f64,
        #[serde(default)]
        easing: Easing,
    },
    /// Barrier between the steps before and after it.
    Then,
    /// Timed delay, gated on both sides like the builder's `wait`.
    Wait { duration_ms: f64 },
}

impl StepSpec {
    fn append_to(&self, prototype: Prototype) -> Prototype {
        if let Self::Wait { duration_ms } = *self {
            return prototype.wait(duration_ms);
        }
        prototype.effect(self.effect())
    }

    fn effect(&self) -> Effect {
        match *self {
            Self::Move {
                x,
                y,
                duration_ms,
                easing,
                easing_y,
            } => {
                let effect = Effect::move_to(x, y, duration_ms, easing);
                match easing_y {
                    Some(easing_y) => effect.with_easing_y(easing_y),
                    None => effect,
                }
            }
            Self::Fade {
                opacity,
                duration_ms,
                easing,
            } => Effect::fade(opacity, duration_ms, easing),
            Self::Rotate {
                degrees,
                duration_ms,
                easing,
            } => Effect::rotate(degrees, duration_ms, easing),
            Self::Scale {
                x,
                y,
                duration_ms,
                easing,
            } => Effect::scale(x, y, duration_ms, easing),
            Self::Size {
                width,
                height,
                duration_ms,
                easing,
            } => Effect::size(
                width.unwrap_or(-1.0),
                height.unwrap_or(-1.0),
                duration_ms,
                easing,
            ),
            Self::Then => Effect::barrier(),
            Self::Wait { duration_ms } => Effect::wait(duration_ms),
        }
    }
}

impl TimelineSpec {
    /// Parse a spec from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a playable animation, binding frames without their own
    /// target to `target`. Fails on duplicate group names.
    pub fn build(&self, target: Option<TargetHandle>) -> Result<Animation> {
        let mut animation = match target {
            Some(target) => Animation::on(target),
            None => Animation::new(),
        };
        for group in &self.groups {
            animation = match &group.name {
                Some(name) => animation.then_group(name.clone())?,
                None => animation.then(),
            };
            for track in &group.tracks {
                match track {
                    TrackSpec::Steps { steps } => {
                        let mut prototype = Prototype::new();
                        for step in steps {
                            prototype = step.append_to(prototype);
                        }
                        animation = animation.and(prototype);
                    }
                    TrackSpec::Wait { duration_ms } => {
                        animation.push_frame(Frame::wait(*duration_ms));
                    }
                    TrackSpec::Stop => animation.push_frame(Frame::stop()),
                    TrackSpec::Pause => animation.push_frame(Frame::pause()),
                }
            }
        }
        Ok(animation)
    }
}
