//! Easing curves.
//!
//! A curve maps `(from, to, t)` to a value, where `t` is the fraction of the
//! run in `[0, 1]`. Callers clamp `t` before evaluating; nothing here checks it.
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Anything that can be evaluated at a fraction of a run.
///
/// Implemented for every `Fn(f32, f32, f32) -> f32`, so custom curves are
/// usually just closures.
pub trait Easing {
    fn ease(&self, from: f32, to: f32, t: f32) -> f32;
}

impl<F> Easing for F
where
    F: Fn(f32, f32, f32) -> f32,
{
    fn ease(&self, from: f32, to: f32, t: f32) -> f32 {
        self(from, to, t)
    }
}

pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from * (1.0 - t) + to * t
}

pub fn linear(from: f32, to: f32, t: f32) -> f32 {
    lerp(from, to, t)
}

pub fn quadratic(from: f32, to: f32, t: f32) -> f32 {
    let k = if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    };
    from + (to - from) * k
}

pub fn quartic(from: f32, to: f32, t: f32) -> f32 {
    let k = if t < 0.5 {
        8.0 * t.powi(4)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
    };
    from + (to - from) * k
}

/// Exponential ease-in. Jumps off `from` by `2^-10` of the span right after
/// `t = 0`.
pub fn exponential(from: f32, to: f32, t: f32) -> f32 {
    if t == 0.0 {
        return from;
    }
    from + (to - from) * 2f32.powf(10.0 * (t - 1.0))
}

pub fn sine(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * (1.0 - (t * PI / 2.0).cos())
}

/// The built-in curves, nameable from config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingKind {
    #[default]
    Linear,
    Quadratic,
    Quartic,
    Exponential,
    Sine,
}

impl EasingKind {
    pub const ALL: [EasingKind; 5] = [
        EasingKind::Linear,
        EasingKind::Quadratic,
        EasingKind::Quartic,
        EasingKind::Exponential,
        EasingKind::Sine,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EasingKind::Linear => "linear",
            EasingKind::Quadratic => "quadratic",
            EasingKind::Quartic => "quartic",
            EasingKind::Exponential => "exponential",
            EasingKind::Sine => "sine",
        }
    }
}

impl Easing for EasingKind {
    fn ease(&self, from: f32, to: f32, t: f32) -> f32 {
        match self {
            EasingKind::Linear => linear(from, to, t),
            EasingKind::Quadratic => quadratic(from, to, t),
            EasingKind::Quartic => quartic(from, to, t),
            EasingKind::Exponential => exponential(from, to, t),
            EasingKind::Sine => sine(from, to, t),
        }
    }
}
