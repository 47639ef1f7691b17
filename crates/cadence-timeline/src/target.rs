//! The property surface the engine animates.
//!
//! The engine never renders anything itself; it reads and writes scalar
//! properties through the [`Animatable`] trait and leaves layout and
//! drawing to the host. Targets are shared, single-threaded handles
//! ([`TargetHandle`]) so a prototype, its frames, and user callbacks can
//! all reach the same object during a tick.

use std::cell::RefCell;
use std::rc::Rc;

use static_assertions::assert_obj_safe;

/// Property accessors the engine requires from an animated object.
///
/// Getters are read once when an effect starts (to compute its range);
/// setters are written exactly once per tick while the effect runs.
/// Rotation is in degrees; scale factors are unitless with `1.0` meaning
/// unscaled.
pub trait Animatable {
    fn position(&self) -> (f64, f64);
    fn set_position(&mut self, x: f64, y: f64);

    fn opacity(&self) -> f64;
    fn set_opacity(&mut self, opacity: f64);

    fn rotation(&self) -> f64;
    fn set_rotation(&mut self, degrees: f64);

    fn scale(&self) -> (f64, f64);
    fn set_scale(&mut self, x: f64, y: f64);

    fn size(&self) -> (f64, f64);
    fn set_size(&mut self, width: f64, height: f64);
}

assert_obj_safe!(Animatable);

/// Shared handle to an animated object.
///
/// The engine is single-threaded and cooperative; `Rc<RefCell<_>>` gives
/// several frames of the same timeline access to one target without any
/// locking.
pub type TargetHandle = Rc<RefCell<dyn Animatable>>;

/// Callback invoked by callback effects and frames.
///
/// Receives the bound target when one exists; callback frames on an
/// unbound animation are invoked with `None`.
pub type TargetAction = Rc<dyn Fn(Option<&mut dyn Animatable>)>;

/// Wrap a concrete target into a shareable [`TargetHandle`].
pub fn bind<T: Animatable + 'static>(target: T) -> TargetHandle {
    Rc::new(RefCell::new(target))
}

/// Minimal concrete target: a 2D sprite with the full property set.
///
/// Used by the demo application and the test suite; hosts with their own
/// scene-graph nodes implement [`Animatable`] directly instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            opacity: 1.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            width: 0.0,
            height: 0.0,
        }
    }
}

impl Animatable for Sprite {
    fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    fn opacity(&self) -> f64 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees;
    }

    fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }

    fn set_scale(&mut self, x: f64, y: f64) {
        self.scale_x = x;
        self.scale_y = y;
    }

    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprite_defaults_are_neutral() {
        let sprite = Sprite::default();
        assert_eq!(sprite.opacity, 1.0);
        assert_eq!(sprite.scale(), (1.0, 1.0));
        assert_eq!(sprite.position(), (0.0, 0.0));
    }

    #[test]
    fn sprite_size_never_goes_negative() {
        let mut sprite = Sprite::default();
        sprite.set_size(-5.0, 40.0);
        assert_eq!(sprite.size(), (0.0, 40.0));
    }

    #[test]
    fn handle_is_shared() {
        let handle = bind(Sprite::default());
        let alias = handle.clone();
        handle.borrow_mut().set_opacity(0.25);
        assert_eq!(alias.borrow().opacity(), 0.25);
    }
}
