//! Frame-driven animation helpers: keyframe interpolation and spring easing.
//!
//! Every helper is a pure function of an explicit frame value; nothing here
//! reads a global clock.

use serde::{Deserialize, Serialize};

/// What to do with an input that falls outside the keyframe range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extrapolate {
    /// Continue the slope of the nearest segment.
    #[default]
    Extend,
    /// Hold the boundary output value.
    Clamp,
    /// Return the input unchanged.
    Identity,
}

/// Extrapolation on each side of the input range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InterpolateOptions {
    pub left: Extrapolate,
    pub right: Extrapolate,
}

impl InterpolateOptions {
    /// Clamp on both sides.
    pub const CLAMP: InterpolateOptions = InterpolateOptions {
        left: Extrapolate::Clamp,
        right: Extrapolate::Clamp,
    };

    /// Extend on the left, clamp on the right.
    pub const CLAMP_RIGHT: InterpolateOptions = InterpolateOptions {
        left: Extrapolate::Extend,
        right: Extrapolate::Clamp,
    };
}

/// Map `input` through the piecewise-linear curve `input_range -> output_range`.
///
/// # Panics
///
/// Panics if the ranges differ in length, have fewer than two points, or if
/// `input_range` is not strictly increasing. Ranges are literal scene
/// configuration, so a bad range is a programming error.
pub fn interpolate(
    input: f64,
    input_range: &[f64],
    output_range: &[f64],
    options: InterpolateOptions,
) -> f64 {
    assert_eq!(
        input_range.len(),
        output_range.len(),
        "input and output ranges must have the same length"
    );
    assert!(input_range.len() >= 2, "ranges need at least two points");
    assert!(
        input_range.windows(2).all(|w| w[0] < w[1]),
        "input range must be strictly increasing: {:?}",
        input_range
    );

    let last = input_range.len() - 1;
    // Segment whose right edge is the first breakpoint >= input, bounded to the
    // outermost segments for out-of-range values.
    let seg = input_range[1..last]
        .iter()
        .position(|&edge| input <= edge)
        .unwrap_or(last - 1);

    segment(
        input,
        (input_range[seg], input_range[seg + 1]),
        (output_range[seg], output_range[seg + 1]),
        options,
    )
}

fn segment(input: f64, (in_a, in_b): (f64, f64), (out_a, out_b): (f64, f64), o: InterpolateOptions) -> f64 {
    if input < in_a {
        match o.left {
            Extrapolate::Clamp => return out_a,
            Extrapolate::Identity => return input,
            Extrapolate::Extend => {}
        }
    }
    if input > in_b {
        match o.right {
            Extrapolate::Clamp => return out_b,
            Extrapolate::Identity => return input,
            Extrapolate::Extend => {}
        }
    }
    if out_a == out_b {
        return out_a;
    }
    let t = (input - in_a) / (in_b - in_a);
    out_a + (out_b - out_a) * t
}

/// Physical parameters of a spring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringConfig {
    pub const fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass: 1.0,
        }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
        }
    }
}

/// A spring animation from `from` to `to`, starting `delay` frames in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    pub from: f64,
    pub to: f64,
    pub delay: f64,
    pub config: SpringConfig,
}

impl Spring {
    /// A 0 → 1 spring with no delay.
    pub const fn unit(config: SpringConfig) -> Self {
        Self {
            from: 0.0,
            to: 1.0,
            delay: 0.0,
            config,
        }
    }

    pub const fn range(mut self, from: f64, to: f64) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub const fn delayed(mut self, frames: f64) -> Self {
        self.delay = frames;
        self
    }

    /// Value of the spring at `frame`.
    pub fn at(&self, frame: f64, fps: f64) -> f64 {
        spring(frame, fps, self)
    }
}

/// Evaluate a damped spring at `frame` (closed-form, no stepping).
///
/// The spring starts at rest at `from`; frames before `delay` return `from`.
pub fn spring(frame: f64, fps: f64, s: &Spring) -> f64 {
    let local = frame - s.delay;
    if local <= 0.0 || fps <= 0.0 {
        return s.from;
    }
    let t = local / fps;
    let progress = unit_step_response(t, &s.config);
    s.from + (s.to - s.from) * progress
}

/// Position of a unit-mass-normalized spring released from 0 toward 1.
fn unit_step_response(t: f64, c: &SpringConfig) -> f64 {
    let mass = if c.mass > 0.0 { c.mass } else { 1.0 };
    let omega0 = (c.stiffness / mass).sqrt();
    if omega0 == 0.0 {
        return 0.0;
    }
    let zeta = c.damping / (2.0 * (c.stiffness * mass).sqrt());

    // Displacement x(t) from the target, x(0) = -1, x'(0) = 0.
    let x = if zeta < 1.0 {
        let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
        let envelope = (-zeta * omega0 * t).exp();
        -envelope * ((omega_d * t).cos() + (zeta * omega0 / omega_d) * (omega_d * t).sin())
    } else if (zeta - 1.0).abs() < 1e-9 {
        -(1.0 + omega0 * t) * (-omega0 * t).exp()
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = -omega0 * (zeta - root);
        let r2 = -omega0 * (zeta + root);
        // c1 + c2 = -1, r1*c1 + r2*c2 = 0
        let c1 = r2 / (r1 - r2);
        let c2 = -1.0 - c1;
        c1 * (r1 * t).exp() + c2 * (r2 * t).exp()
    };
    1.0 + x
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOOK_OPACITY_IN: [f64; 4] = [0.0, 20.0, 45.0, 60.0];
    const HOOK_OPACITY_OUT: [f64; 4] = [0.0, 1.0, 1.0, 0.0];

    #[test]
    fn test_interpolate_inside_range() {
        let o = InterpolateOptions::CLAMP_RIGHT;
        assert!((interpolate(10.0, &HOOK_OPACITY_IN, &HOOK_OPACITY_OUT, o) - 0.5).abs() < 1e-9);
        assert!((interpolate(30.0, &HOOK_OPACITY_IN, &HOOK_OPACITY_OUT, o) - 1.0).abs() < 1e-9);
        assert!((interpolate(52.5, &HOOK_OPACITY_IN, &HOOK_OPACITY_OUT, o) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_interpolate_right_clamp_holds_last_value() {
        let o = InterpolateOptions::CLAMP_RIGHT;
        for frame in [60.0, 61.0, 100.0, 10_000.0] {
            assert_eq!(interpolate(frame, &HOOK_OPACITY_IN, &HOOK_OPACITY_OUT, o), 0.0);
        }
    }

    #[test]
    fn test_interpolate_extend_continues_slope() {
        let v = interpolate(2.0, &[0.0, 1.0], &[0.0, 10.0], InterpolateOptions::default());
        assert!((v - 20.0).abs() < 1e-9);
        let v = interpolate(-1.0, &[0.0, 1.0], &[0.0, 10.0], InterpolateOptions::default());
        assert!((v + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_interpolate_left_clamp_and_identity() {
        let o = InterpolateOptions {
            left: Extrapolate::Clamp,
            right: Extrapolate::Identity,
        };
        assert_eq!(interpolate(100.0, &[120.0, 150.0], &[1.0, 0.0], o), 1.0);
        assert_eq!(interpolate(170.0, &[120.0, 150.0], &[1.0, 0.0], o), 170.0);
    }

    #[test]
    #[should_panic(expected = "strictly increasing")]
    fn test_interpolate_rejects_unsorted_range() {
        interpolate(0.0, &[1.0, 0.0], &[0.0, 1.0], InterpolateOptions::default());
    }

    #[test]
    fn test_spring_starts_at_from_and_settles_at_to() {
        let s = Spring::unit(SpringConfig::new(80.0, 12.0)).range(0.8, 1.0);
        assert_eq!(s.at(0.0, 30.0), 0.8);
        assert!((s.at(300.0, 30.0) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_spring_respects_delay() {
        let s = Spring::unit(SpringConfig::new(100.0, 14.0)).delayed(20.0);
        assert_eq!(s.at(5.0, 30.0), 0.0);
        assert_eq!(s.at(20.0, 30.0), 0.0);
        assert!(s.at(25.0, 30.0) > 0.0);
    }

    #[test]
    fn test_underdamped_spring_overshoots() {
        // damping ratio 10 / (2 * sqrt(120)) ~ 0.46
        let s = Spring::unit(SpringConfig::new(120.0, 10.0));
        let peak = (0..60)
            .map(|f| s.at(f as f64, 30.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0, "expected overshoot, peak was {}", peak);
    }

    #[test]
    fn test_overdamped_spring_is_monotonic() {
        let s = Spring::unit(SpringConfig::new(10.0, 20.0));
        let mut prev = 0.0;
        for f in 1..120 {
            let v = s.at(f as f64, 30.0);
            assert!(v >= prev - 1e-12);
            assert!(v <= 1.0);
            prev = v;
        }
    }

    #[test]
    fn test_critically_damped_spring_approaches_target() {
        // zeta = 20 / (2 * sqrt(100)) = 1
        let s = Spring::unit(SpringConfig::new(100.0, 20.0));
        assert!(s.at(15.0, 30.0) > 0.9);
        assert!(s.at(15.0, 30.0) <= 1.0);
    }
}
