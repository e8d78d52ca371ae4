use std::f64::consts::PI;

use crate::foundation::error::{DynfigureError, DynfigureResult};

/// Named easing curves.
///
/// Each curve is evaluated in the classic `(t, start, diff, duration)` form, where `t` is the
/// frame index, `start` the start value and `diff = end - start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    InQuad,
    InSine,
    OutCubic,
    OutBounce,
    OutElastic,
}

impl Ease {
    pub const ALL: [Ease; 6] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::InSine,
        Ease::OutCubic,
        Ease::OutBounce,
        Ease::OutElastic,
    ];

    pub fn apply(self, t: f64, start: f64, diff: f64, duration: f64) -> f64 {
        let b = start;
        let c = diff;
        let d = duration;
        match self {
            Self::Linear => c * (t / d) + b,
            Self::InQuad => c * (t / d) * (t / d) + b,
            Self::InSine => {
                let t = t / d;
                -c * (t * (PI / 2.0)).cos() + c + b
            }
            Self::OutCubic => {
                // Pivot at half duration; both halves meet with equal value and slope.
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * t * t * t + b
                } else {
                    let t = t - 2.0;
                    c / 2.0 * (t * t * t + 2.0) + b
                }
            }
            Self::OutBounce => {
                let t = t / d;
                if t < 1.0 / 2.75 {
                    c * (7.5625 * t * t) + b
                } else if t < 2.0 / 2.75 {
                    let t = t - 1.5 / 2.75;
                    c * (7.5625 * t * t + 0.75) + b
                } else if t < 2.5 / 2.75 {
                    let t = t - 2.25 / 2.75;
                    c * (7.5625 * t * t + 0.9375) + b
                } else {
                    let t = t - 2.625 / 2.75;
                    c * (7.5625 * t * t + 0.984375) + b
                }
            }
            Self::OutElastic => {
                if t == 0.0 {
                    return b;
                }
                let t = t / d;
                if t == 1.0 {
                    return b + c;
                }
                if c == 0.0 {
                    return b;
                }
                let p = d * 0.3;
                let a = c;
                let s = if a < c.abs() {
                    p / 4.0
                } else {
                    p / (2.0 * PI) * (c / a).asin()
                };
                a * 2f64.powf(-10.0 * t) * ((t * d - s) * (2.0 * PI) / p).sin() + c + b
            }
        }
    }
}

/// A finite, frame-indexed interpolation between two values.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween {
    pub ease: Ease,
    pub duration: u32,
    pub start: f64,
    pub end: f64,
}

impl Tween {
    /// Tween from `0` to `1` over `duration` frames.
    pub fn new(ease: Ease, duration: u32) -> DynfigureResult<Self> {
        Self::with_range(ease, duration, 0.0, 1.0)
    }

    pub fn with_range(ease: Ease, duration: u32, start: f64, end: f64) -> DynfigureResult<Self> {
        if duration == 0 {
            return Err(DynfigureError::validation("tween duration must be non-zero"));
        }
        Ok(Self {
            ease,
            duration,
            start,
            end,
        })
    }

    pub fn diff(&self) -> f64 {
        self.end - self.start
    }

    /// Value at frame `t`, meaningful for `t` in `[0, duration]`.
    pub fn at(&self, t: f64) -> f64 {
        self.ease
            .apply(t, self.start, self.diff(), f64::from(self.duration))
    }

    /// One value per frame `0..duration`. Each call restarts from frame 0.
    pub fn generate(&self) -> TweenIter {
        TweenIter {
            tween: *self,
            frame: 0,
        }
    }
}

/// Iterator returned by [`Tween::generate`].
#[derive(Clone, Debug)]
pub struct TweenIter {
    tween: Tween,
    frame: u32,
}

impl Iterator for TweenIter {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.frame >= self.tween.duration {
            return None;
        }
        let v = self.tween.at(f64::from(self.frame));
        self.frame += 1;
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.tween.duration - self.frame) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for TweenIter {}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
