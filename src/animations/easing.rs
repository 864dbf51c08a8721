//! Easing curves for smooth transitions.
//!
//! Every curve maps a normalized progress value in `[0, 1]` to an eased value.
//! The standard curves hit `0` and `1` exactly at the endpoints; the back,
//! elastic and bounce families overshoot in between. Curves are plain
//! `fn(f64) -> f64` items and can be wrapped in an [`Easing`] handle to build
//! derived curves with [`Easing::reverse`], [`Easing::mirror`] and
//! [`Easing::mix`].

use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

/// Default overshoot for the back family
pub const DEFAULT_OVERSHOOT: f64 = 1.70158;
/// Default amplitude for the elastic family
pub const DEFAULT_AMPLITUDE: f64 = 1.0;
/// Default period for the elastic family
pub const DEFAULT_PERIOD: f64 = 0.3;
/// Default bounce strength (the `n1` coefficient of the bounce parabola)
pub const DEFAULT_BOUNCE_STRENGTH: f64 = 7.5625;
/// Default base for the exponential family
pub const DEFAULT_EXPO_BASE: f64 = 2.0;
/// Default radius for the circular family
pub const DEFAULT_CIRC_RADIUS: f64 = 1.0;

const BOUNCE_D1: f64 = 2.75;

/// Shared, cheaply clonable easing curve
#[derive(Clone)]
pub struct Easing(Arc<dyn Fn(f64) -> f64 + Send + Sync>);

impl Easing {
    /// Wrap an arbitrary curve
    pub fn new<F>(curve: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self(Arc::new(curve))
    }

    pub fn linear() -> Self {
        Self::new(linear)
    }

    /// Evaluate the curve at `t`
    pub fn apply(&self, t: f64) -> f64 {
        (self.0)(t)
    }

    /// `t => f(1 - t)`
    pub fn reverse(&self) -> Self {
        let inner = self.clone();
        Self::new(move |t| inner.apply(1.0 - t))
    }

    /// Ease in over the first half and back out over the second half.
    ///
    /// The midpoint of a mirrored curve is always exactly `0.5` for curves
    /// with `f(1) == 1`.
    pub fn mirror(&self) -> Self {
        let inner = self.clone();
        Self::new(move |t| {
            if t <= 0.5 {
                inner.apply(2.0 * t) / 2.0
            } else {
                (2.0 - inner.apply(2.0 * (1.0 - t))) / 2.0
            }
        })
    }

    /// Weighted blend `(1 - balance) * self + balance * other`
    pub fn mix(&self, other: &Easing, balance: f64) -> Self {
        let first = self.clone();
        let second = other.clone();
        Self::new(move |t| (1.0 - balance) * first.apply(t) + balance * second.apply(t))
    }

    /// Look up one of the named curves (`"easeInOutCubic"`, `"linear"`, ...)
    pub fn named(name: &str) -> Option<Self> {
        NAMED_EASINGS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, curve)| Self::new(*curve))
    }
}

impl Default for Easing {
    fn default() -> Self {
        Self::linear()
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Easing(..)")
    }
}

impl From<fn(f64) -> f64> for Easing {
    fn from(curve: fn(f64) -> f64) -> Self {
        Self::new(curve)
    }
}

/// All named curves, in presentation order
pub const NAMED_EASINGS: &[(&str, fn(f64) -> f64)] = &[
    ("linear", linear),
    ("easeInQuad", ease_in_quad),
    ("easeOutQuad", ease_out_quad),
    ("easeInOutQuad", ease_in_out_quad),
    ("easeInCubic", ease_in_cubic),
    ("easeOutCubic", ease_out_cubic),
    ("easeInOutCubic", ease_in_out_cubic),
    ("easeInQuart", ease_in_quart),
    ("easeOutQuart", ease_out_quart),
    ("easeInOutQuart", ease_in_out_quart),
    ("easeInQuint", ease_in_quint),
    ("easeOutQuint", ease_out_quint),
    ("easeInOutQuint", ease_in_out_quint),
    ("easeInSine", ease_in_sine),
    ("easeOutSine", ease_out_sine),
    ("easeInOutSine", ease_in_out_sine),
    ("easeInExpo", ease_in_expo),
    ("easeOutExpo", ease_out_expo),
    ("easeInOutExpo", ease_in_out_expo),
    ("easeInCirc", ease_in_circ),
    ("easeOutCirc", ease_out_circ),
    ("easeInOutCirc", ease_in_out_circ),
    ("easeInBack", ease_in_back),
    ("easeOutBack", ease_out_back),
    ("easeInOutBack", ease_in_out_back),
    ("easeInElastic", ease_in_elastic),
    ("easeOutElastic", ease_out_elastic),
    ("easeInOutElastic", ease_in_out_elastic),
    ("easeInBounce", ease_in_bounce),
    ("easeOutBounce", ease_out_bounce),
    ("easeInOutBounce", ease_in_out_bounce),
];

pub fn linear(t: f64) -> f64 {
    t
}

pub fn ease_in_quad(t: f64) -> f64 {
    t * t
}

pub fn ease_out_quad(t: f64) -> f64 {
    1.0 - (1.0 - t) * (1.0 - t)
}

pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

pub fn ease_in_cubic(t: f64) -> f64 {
    t * t * t
}

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

pub fn ease_in_quart(t: f64) -> f64 {
    t.powi(4)
}

pub fn ease_out_quart(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(4)
}

pub fn ease_in_out_quart(t: f64) -> f64 {
    if t < 0.5 {
        8.0 * t.powi(4)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
    }
}

pub fn ease_in_quint(t: f64) -> f64 {
    t.powi(5)
}

pub fn ease_out_quint(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(5)
}

pub fn ease_in_out_quint(t: f64) -> f64 {
    if t < 0.5 {
        16.0 * t.powi(5)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
    }
}

pub fn ease_in_sine(t: f64) -> f64 {
    1.0 - (t * PI / 2.0).cos()
}

pub fn ease_out_sine(t: f64) -> f64 {
    (t * PI / 2.0).sin()
}

pub fn ease_in_out_sine(t: f64) -> f64 {
    -((PI * t).cos() - 1.0) / 2.0
}

pub fn ease_in_expo(t: f64) -> f64 {
    expo_in(DEFAULT_EXPO_BASE)(t)
}

pub fn ease_out_expo(t: f64) -> f64 {
    expo_out(DEFAULT_EXPO_BASE)(t)
}

pub fn ease_in_out_expo(t: f64) -> f64 {
    expo_in_out(DEFAULT_EXPO_BASE)(t)
}

pub fn ease_in_circ(t: f64) -> f64 {
    circ_in(DEFAULT_CIRC_RADIUS)(t)
}

pub fn ease_out_circ(t: f64) -> f64 {
    circ_out(DEFAULT_CIRC_RADIUS)(t)
}

pub fn ease_in_out_circ(t: f64) -> f64 {
    circ_in_out(DEFAULT_CIRC_RADIUS)(t)
}

pub fn ease_in_back(t: f64) -> f64 {
    back_in(DEFAULT_OVERSHOOT)(t)
}

pub fn ease_out_back(t: f64) -> f64 {
    back_out(DEFAULT_OVERSHOOT)(t)
}

pub fn ease_in_out_back(t: f64) -> f64 {
    back_in_out(DEFAULT_OVERSHOOT)(t)
}

pub fn ease_in_elastic(t: f64) -> f64 {
    elastic_in(DEFAULT_AMPLITUDE, DEFAULT_PERIOD)(t)
}

pub fn ease_out_elastic(t: f64) -> f64 {
    elastic_out(DEFAULT_AMPLITUDE, DEFAULT_PERIOD)(t)
}

pub fn ease_in_out_elastic(t: f64) -> f64 {
    elastic_in_out(DEFAULT_AMPLITUDE, DEFAULT_PERIOD)(t)
}

// Bounce out is defined first; the in and in-out variants are built from it.
pub fn ease_out_bounce(t: f64) -> f64 {
    bounce_out(DEFAULT_BOUNCE_STRENGTH)(t)
}

pub fn ease_in_bounce(t: f64) -> f64 {
    1.0 - ease_out_bounce(1.0 - t)
}

pub fn ease_in_out_bounce(t: f64) -> f64 {
    if t < 0.5 {
        (1.0 - ease_out_bounce(1.0 - 2.0 * t)) / 2.0
    } else {
        (1.0 + ease_out_bounce(2.0 * t - 1.0)) / 2.0
    }
}

/// Exponential ease-in with a custom base
pub fn expo_in(base: f64) -> impl Fn(f64) -> f64 + Send + Sync + Copy {
    move |t| if t <= 0.0 { 0.0 } else { base.powf(10.0 * t - 10.0) }
}

pub fn expo_out(base: f64) -> impl Fn(f64) -> f64 + Send + Sync + Copy {
    move |t| if t >= 1.0 { 1.0 } else { 1.0 - base.powf(-10.0 * t) }
}

pub fn expo_in_out(base: f64) -> impl Fn(f64) -> f64 + Send + Sync + Copy {
    move |t| {
        if t <= 0.0 {
            0.0
        } else if t >= 1.0 {
            1.0
        } else if t < 0.5 {
            base.powf(20.0 * t - 10.0) / 2.0
        } else {
            (2.0 - base.powf(-20.0 * t + 10.0)) / 2.0
        }
    }
}

/// Circular ease-in on a circle of `radius` (values below 1 are treated as 1).
///
/// The curve is normalized so that it still passes through `(1, 1)`.
pub fn circ_in(radius: f64) -> impl Fn(f64) -> f64 + Send + Sync + Copy {
    let r = radius.max(1.0);
    let norm = r - (r * r - 1.0).sqrt();
    move |t| (r - (r * r - t * t).max(0.0).sqrt()) / norm
}

pub fn circ_out(radius: f64) -> impl Fn(f64) -> f64 + Send + Sync + Copy {
    let r = radius.max(1.0);
    let offset = (r * r - 1.0).sqrt();
    let norm = r - offset;
    move |t| ((r * r - (t - 1.0).powi(2)).max(0.0).sqrt() - offset) / norm
}

pub fn circ_in_out(radius: f64) -> impl Fn(f64) -> f64 + Send + Sync + Copy {
    let ease_in = circ_in(radius);
    move |t| {
        if t < 0.5 {
            ease_in(2.0 * t) / 2.0
        } else {
            (2.0 - ease_in(2.0 - 2.0 * t)) / 2.0
        }
    }
}

/// Back ease-in: pulls back by `overshoot` before moving forward
pub fn back_in(overshoot: f64) -> impl Fn(f64) -> f64 + Send + Sync + Copy {
    let c3 = overshoot + 1.0;
    move |t| c3 * t * t * t - overshoot * t * t
}

pub fn back_out(overshoot: f64) -> impl Fn(f64) -> f64 + Send + Sync + Copy {
    let c3 = overshoot + 1.0;
    move |t| 1.0 + c3 * (t - 1.0).powi(3) + overshoot * (t - 1.0).powi(2)
}

pub fn back_in_out(overshoot: f64) -> impl Fn(f64) -> f64 + Send + Sync + Copy {
    let c2 = overshoot * 1.525;
    move |t| {
        if t < 0.5 {
            ((2.0 * t).powi(2) * ((c2 + 1.0) * 2.0 * t - c2)) / 2.0
        } else {
            ((2.0 * t - 2.0).powi(2) * ((c2 + 1.0) * (t * 2.0 - 2.0) + c2) + 2.0) / 2.0
        }
    }
}

// Phase shift for the elastic family. Amplitudes below 1 are raised to 1.
fn elastic_shape(amplitude: f64, period: f64) -> (f64, f64) {
    let a = amplitude.max(1.0);
    let s = period / (2.0 * PI) * (1.0 / a).asin();
    (a, s)
}

/// Elastic ease-in with custom amplitude and period
pub fn elastic_in(amplitude: f64, period: f64) -> impl Fn(f64) -> f64 + Send + Sync + Copy {
    let (a, s) = elastic_shape(amplitude, period);
    move |t| {
        if t <= 0.0 || t >= 1.0 {
            return t.clamp(0.0, 1.0);
        }
        let t = t - 1.0;
        -(a * 2f64.powf(10.0 * t) * ((t - s) * (2.0 * PI) / period).sin())
    }
}

pub fn elastic_out(amplitude: f64, period: f64) -> impl Fn(f64) -> f64 + Send + Sync + Copy {
    let (a, s) = elastic_shape(amplitude, period);
    move |t| {
        if t <= 0.0 || t >= 1.0 {
            return t.clamp(0.0, 1.0);
        }
        a * 2f64.powf(-10.0 * t) * ((t - s) * (2.0 * PI) / period).sin() + 1.0
    }
}

/// Elastic ease-in-out; the period is stretched by 1.5 across the two halves
pub fn elastic_in_out(amplitude: f64, period: f64) -> impl Fn(f64) -> f64 + Send + Sync + Copy {
    let period = period * 1.5;
    let (a, s) = elastic_shape(amplitude, period);
    move |t| {
        if t <= 0.0 || t >= 1.0 {
            return t.clamp(0.0, 1.0);
        }
        let t = 2.0 * t - 1.0;
        let wave = ((t - s) * (2.0 * PI) / period).sin();
        if t < 0.0 {
            -0.5 * a * 2f64.powf(10.0 * t) * wave
        } else {
            0.5 * a * 2f64.powf(-10.0 * t) * wave + 1.0
        }
    }
}

/// Bounce ease-out with a custom strength coefficient
pub fn bounce_out(strength: f64) -> impl Fn(f64) -> f64 + Send + Sync + Copy {
    move |t| {
        if t < 1.0 / BOUNCE_D1 {
            strength * t * t
        } else if t < 2.0 / BOUNCE_D1 {
            let t = t - 1.5 / BOUNCE_D1;
            strength * t * t + 0.75
        } else if t < 2.5 / BOUNCE_D1 {
            let t = t - 2.25 / BOUNCE_D1;
            strength * t * t + 0.9375
        } else {
            let t = t - 2.625 / BOUNCE_D1;
            strength * t * t + 0.984375
        }
    }
}

pub fn bounce_in(strength: f64) -> impl Fn(f64) -> f64 + Send + Sync + Copy {
    let out = bounce_out(strength);
    move |t| 1.0 - out(1.0 - t)
}

pub fn bounce_in_out(strength: f64) -> impl Fn(f64) -> f64 + Send + Sync + Copy {
    let out = bounce_out(strength);
    move |t| {
        if t < 0.5 {
            (1.0 - out(1.0 - 2.0 * t)) / 2.0
        } else {
            (1.0 + out(2.0 * t - 1.0)) / 2.0
        }
    }
}
