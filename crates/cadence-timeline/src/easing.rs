//! Easing functions for effect timing.
//!
//! All curves use the classic Penner form `f(t, b, c, d)`:
//! `t` is the elapsed time in `[0, d]`, `b` the base value, `c` the total
//! change, and `d` the duration. Every curve satisfies `f(0) = b` and
//! `f(d) = b + c`; the `Back` and `Elastic` families overshoot the
//! `[b, b + c]` range mid-curve by design, and `Bounce` is piecewise.
//!
//! Callers must never invoke a curve with `d == 0`; zero-duration effects
//! jump straight to their target value without sampling an easing function.
//!
//! # Usage
//!
//! ```
//! use cadence_timeline::Easing;
//!
//! let half = Easing::Linear.evaluate(150.0, 0.0, 1.0, 300.0);
//! assert!((half - 0.5).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

/// Easing function selector for a single effect.
///
/// `Linear` is the default; the remaining variants are the standard Penner
/// families in `In` (accelerating), `Out` (decelerating), and `InOut`
/// (symmetric) forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    InSine,
    OutSine,
    InOutSine,
    InCirc,
    OutCirc,
    InOutCirc,
    InExpo,
    OutExpo,
    InOutExpo,
    /// Pulls back past the base value before accelerating. Overshoots.
    InBack,
    /// Overshoots the target value before settling.
    OutBack,
    /// Overshoots at both ends.
    InOutBack,
    /// Exponentially damped sine; oscillates around the base value.
    InElastic,
    /// Exponentially damped sine; oscillates around the target value.
    OutElastic,
    /// Oscillates around both endpoints.
    InOutElastic,
    InBounce,
    OutBounce,
    InOutBounce,
}

impl Easing {
    /// Evaluate the curve at elapsed time `t`.
    ///
    /// # Arguments
    /// * `t` - elapsed time, `0.0..=d`
    /// * `b` - base value at `t == 0`
    /// * `c` - total change; the value at `t == d` is `b + c`
    /// * `d` - duration, must be non-zero
    pub fn evaluate(&self, t: f64, b: f64, c: f64, d: f64) -> f64 {
        match self {
            Self::Linear => c * t / d + b,

            Self::InQuad => {
                let t = t / d;
                c * t * t + b
            }
            Self::OutQuad => {
                let t = t / d;
                -c * t * (t - 2.0) + b
            }
            Self::InOutQuad => {
                let mut t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * t * t + b
                } else {
                    t -= 1.0;
                    -c / 2.0 * (t * (t - 2.0) - 1.0) + b
                }
            }

            Self::InCubic => {
                let t = t / d;
                c * t * t * t + b
            }
            Self::OutCubic => {
                let t = t / d - 1.0;
                c * (t * t * t + 1.0) + b
            }
            Self::InOutCubic => {
                let mut t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * t * t * t + b
                } else {
                    t -= 2.0;
                    c / 2.0 * (t * t * t + 2.0) + b
                }
            }

            Self::InQuart => {
                let t = t / d;
                c * t * t * t * t + b
            }
            Self::OutQuart => {
                let t = t / d - 1.0;
                -c * (t * t * t * t - 1.0) + b
            }
            Self::InOutQuart => {
                let mut t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * t * t * t * t + b
                } else {
                    t -= 2.0;
                    -c / 2.0 * (t * t * t * t - 2.0) + b
                }
            }

            Self::InQuint => {
                let t = t / d;
                c * t * t * t * t * t + b
            }
            Self::OutQuint => {
                let t = t / d - 1.0;
                c * (t * t * t * t * t + 1.0) + b
            }
            Self::InOutQuint => {
                let mut t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * t * t * t * t * t + b
                } else {
                    t -= 2.0;
                    c / 2.0 * (t * t * t * t * t + 2.0) + b
                }
            }

            Self::InSine => {
                -c * (t / d * std::f64::consts::FRAC_PI_2).cos() + c + b
            }
            Self::OutSine => c * (t / d * std::f64::consts::FRAC_PI_2).sin() + b,
            Self::InOutSine => {
                -c / 2.0 * ((std::f64::consts::PI * t / d).cos() - 1.0) + b
            }

            Self::InCirc => {
                let t = t / d;
                -c * ((1.0 - t * t).sqrt() - 1.0) + b
            }
            Self::OutCirc => {
                let t = t / d - 1.0;
                c * (1.0 - t * t).sqrt() + b
            }
            Self::InOutCirc => {
                let mut t = t / (d / 2.0);
                if t < 1.0 {
                    -c / 2.0 * ((1.0 - t * t).sqrt() - 1.0) + b
                } else {
                    t -= 2.0;
                    c / 2.0 * ((1.0 - t * t).sqrt() + 1.0) + b
                }
            }

            Self::InExpo => {
                if t == 0.0 {
                    b
                } else {
                    c * 2f64.powf(10.0 * (t / d - 1.0)) + b
                }
            }
            Self::OutExpo => {
                if t == d {
                    b + c
                } else {
                    c * (-(2f64.powf(-10.0 * t / d)) + 1.0) + b
                }
            }
            Self::InOutExpo => {
                if t == 0.0 {
                    return b;
                }
                if t == d {
                    return b + c;
                }
                let mut t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * 2f64.powf(10.0 * (t - 1.0)) + b
                } else {
                    t -= 1.0;
                    c / 2.0 * (-(2f64.powf(-10.0 * t)) + 2.0) + b
                }
            }

            Self::InBack => {
                let s = BACK_OVERSHOOT;
                let t = t / d;
                c * t * t * ((s + 1.0) * t - s) + b
            }
            Self::OutBack => {
                let s = BACK_OVERSHOOT;
                let t = t / d - 1.0;
                c * (t * t * ((s + 1.0) * t + s) + 1.0) + b
            }
            Self::InOutBack => {
                let s = BACK_OVERSHOOT * 1.525;
                let mut t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * (t * t * ((s + 1.0) * t - s)) + b
                } else {
                    t -= 2.0;
                    c / 2.0 * (t * t * ((s + 1.0) * t + s) + 2.0) + b
                }
            }

            Self::InElastic => in_elastic(t, b, c, d),
            Self::OutElastic => out_elastic(t, b, c, d),
            Self::InOutElastic => {
                let t2 = t / (d / 2.0);
                if t2 == 2.0 {
                    return b + c;
                }
                if t2 < 1.0 {
                    in_elastic(t * 2.0, b, c / 2.0, d)
                } else {
                    out_elastic(t * 2.0 - d, b + c / 2.0, c / 2.0, d)
                }
            }

            Self::InBounce => c - out_bounce(d - t, 0.0, c, d) + b,
            Self::OutBounce => out_bounce(t, b, c, d),
            Self::InOutBounce => {
                if t < d / 2.0 {
                    (c - out_bounce(d - t * 2.0, 0.0, c, d)) * 0.5 + b
                } else {
                    out_bounce(t * 2.0 - d, 0.0, c, d) * 0.5 + c * 0.5 + b
                }
            }
        }
    }
}

/// Overshoot constant producing roughly 10% overshoot for the Back family.
const BACK_OVERSHOOT: f64 = 1.70158;

fn in_elastic(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    if t == 0.0 {
        return b;
    }
    if t == 1.0 {
        return b + c;
    }
    let p = d * 0.3;
    let s = p / 4.0;
    let t = t - 1.0;
    -(c * 2f64.powf(10.0 * t) * ((t * d - s) * std::f64::consts::TAU / p).sin()) + b
}

fn out_elastic(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    if t == 0.0 {
        return b;
    }
    if t == 1.0 {
        return b + c;
    }
    let p = d * 0.3;
    let s = p / 4.0;
    c * 2f64.powf(-10.0 * t) * ((t * d - s) * std::f64::consts::TAU / p).sin() + c + b
}

/// Piecewise bounce curve; each segment is a parabola landing exactly on
/// `b + c` at `t == d`.
fn out_bounce(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let mut t = t / d;
    if t < 1.0 / 2.75 {
        c * (7.5625 * t * t) + b
    } else if t < 2.0 / 2.75 {
        t -= 1.5 / 2.75;
        c * (7.5625 * t * t + 0.75) + b
    } else if t < 2.5 / 2.75 {
        t -= 2.25 / 2.75;
        c * (7.5625 * t * t + 0.9375) + b
    } else {
        t -= 2.625 / 2.75;
        c * (7.5625 * t * t + 0.984375) + b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    const ALL: [Easing; 31] = [
        Easing::Linear,
        Easing::InQuad,
        Easing::OutQuad,
        Easing::InOutQuad,
        Easing::InCubic,
        Easing::OutCubic,
        Easing::InOutCubic,
        Easing::InQuart,
        Easing::OutQuart,
        Easing::InOutQuart,
        Easing::InQuint,
        Easing::OutQuint,
        Easing::InOutQuint,
        Easing::InSine,
        Easing::OutSine,
        Easing::InOutSine,
        Easing::InCirc,
        Easing::OutCirc,
        Easing::InOutCirc,
        Easing::InExpo,
        Easing::OutExpo,
        Easing::InOutExpo,
        Easing::InBack,
        Easing::OutBack,
        Easing::InOutBack,
        Easing::InElastic,
        Easing::OutElastic,
        Easing::InOutElastic,
        Easing::InBounce,
        Easing::OutBounce,
        Easing::InOutBounce,
    ];

    #[test]
    fn all_curves_hit_both_endpoints() {
        for easing in ALL {
            let start = easing.evaluate(0.0, 10.0, 90.0, 500.0);
            let end = easing.evaluate(500.0, 10.0, 90.0, 500.0);
            assert!(
                (start - 10.0).abs() < EPSILON,
                "{easing:?} start: expected 10, got {start}"
            );
            assert!(
                (end - 100.0).abs() < EPSILON,
                "{easing:?} end: expected 100, got {end}"
            );
        }
    }

    #[test]
    fn linear_is_proportional() {
        for i in 0..=10 {
            let t = i as f64 * 30.0;
            let v = Easing::Linear.evaluate(t, 0.0, 1.0, 300.0);
            assert!((v - t / 300.0).abs() < EPSILON);
        }
    }

    #[test]
    fn in_quad_starts_slow_out_quad_starts_fast() {
        let early_in = Easing::InQuad.evaluate(25.0, 0.0, 1.0, 100.0);
        let early_out = Easing::OutQuad.evaluate(25.0, 0.0, 1.0, 100.0);
        assert!(early_in < 0.25, "InQuad should lag linear, got {early_in}");
        assert!(early_out > 0.25, "OutQuad should lead linear, got {early_out}");
    }

    #[test]
    fn in_out_curves_are_symmetric_around_midpoint() {
        for easing in [Easing::InOutQuad, Easing::InOutCubic, Easing::InOutSine] {
            let mid = easing.evaluate(50.0, 0.0, 1.0, 100.0);
            assert!((mid - 0.5).abs() < EPSILON, "{easing:?} midpoint: {mid}");
            let early = easing.evaluate(20.0, 0.0, 1.0, 100.0);
            let late = easing.evaluate(80.0, 0.0, 1.0, 100.0);
            assert!((early + late - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn out_back_overshoots_target() {
        let mut overshot = false;
        for i in 1..100 {
            let v = Easing::OutBack.evaluate(i as f64, 0.0, 1.0, 100.0);
            if v > 1.0 {
                overshot = true;
            }
        }
        assert!(overshot, "OutBack never exceeded the target value");
    }

    #[test]
    fn out_elastic_oscillates_past_target() {
        let mut above = false;
        let mut below = false;
        for i in 1..200 {
            let v = Easing::OutElastic.evaluate(i as f64, 0.0, 1.0, 200.0);
            if v > 1.0 + EPSILON {
                above = true;
            }
            if i > 20 && v < 1.0 - EPSILON {
                below = true;
            }
        }
        assert!(above && below, "OutElastic should ring around the target");
    }

    #[test]
    fn bounce_stays_within_range() {
        for i in 0..=100 {
            let v = Easing::OutBounce.evaluate(i as f64, 0.0, 1.0, 100.0);
            assert!((-EPSILON..=1.0 + EPSILON).contains(&v), "OutBounce at {i}: {v}");
        }
    }

    #[test]
    fn in_bounce_mirrors_out_bounce() {
        for i in 0..=100 {
            let t = i as f64;
            let inward = Easing::InBounce.evaluate(t, 0.0, 1.0, 100.0);
            let outward = Easing::OutBounce.evaluate(100.0 - t, 0.0, 1.0, 100.0);
            assert!((inward - (1.0 - outward)).abs() < EPSILON);
        }
    }

    #[test]
    fn default_is_linear() {
        assert_eq!(Easing::default(), Easing::Linear);
    }

    #[test]
    fn serde_round_trip() {
        let json = serde_json::to_string(&Easing::InOutBack).unwrap();
        assert_eq!(json, "\"in_out_back\"");
        let parsed: Easing = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Easing::InOutBack);
    }
}
