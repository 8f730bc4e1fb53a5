//! Membership function primitives.
//!
//! Both shapes are total over `f64`: any input, including values outside the
//! universe of discourse and degenerate parameter sets, yields a degree in
//! `[0, 1]`. A vertical edge (`b == a`, `c == b`, `d == c`) is treated as a step
//! instead of dividing by zero.

use serde::{Deserialize, Serialize};

/// Triangular membership: 0 at `a`, 1 at `b`, 0 again at `c`.
pub fn triangular(x: f64, a: f64, b: f64, c: f64) -> f64 {
    if x.is_nan() {
        return 0.0;
    }
    let rising = if b == a {
        step(x == a)
    } else {
        (x - a) / (b - a)
    };
    let falling = if c == b {
        step(x == b)
    } else {
        (c - x) / (c - b)
    };
    rising.min(falling).clamp(0.0, 1.0)
}

/// Trapezoidal membership: rises from `a` to `b`, holds 1 until `c`, falls to 0 at `d`.
pub fn trapezoidal(x: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    if x.is_nan() {
        return 0.0;
    }
    let rising = if b > a {
        (x - a) / (b - a)
    } else {
        step(x >= a)
    };
    let falling = if d > c {
        (d - x) / (d - c)
    } else {
        step(x <= d)
    };
    rising.min(1.0).min(falling).max(0.0)
}

fn step(on: bool) -> f64 {
    if on {
        1.0
    } else {
        0.0
    }
}

/// A membership function shape together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum MembershipFunction {
    Triangular { a: f64, b: f64, c: f64 },
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
}

impl MembershipFunction {
    /// Degree of membership of `x`.
    pub fn degree(&self, x: f64) -> f64 {
        match *self {
            MembershipFunction::Triangular { a, b, c } => triangular(x, a, b, c),
            MembershipFunction::Trapezoidal { a, b, c, d } => trapezoidal(x, a, b, c, d),
        }
    }

    /// Shape name ("triangular" or "trapezoidal").
    pub fn shape(&self) -> &'static str {
        match self {
            MembershipFunction::Triangular { .. } => "triangular",
            MembershipFunction::Trapezoidal { .. } => "trapezoidal",
        }
    }

    /// The parameter tuple in definition order.
    pub fn params(&self) -> Vec<f64> {
        match *self {
            MembershipFunction::Triangular { a, b, c } => vec![a, b, c],
            MembershipFunction::Trapezoidal { a, b, c, d } => vec![a, b, c, d],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn triangle_shape() {
        assert_eq!(triangular(-5.0, 40.0, 60.0, 80.0), 0.0);
        assert_eq!(triangular(40.0, 40.0, 60.0, 80.0), 0.0);
        assert_close(triangular(50.0, 40.0, 60.0, 80.0), 0.5);
        assert_eq!(triangular(60.0, 40.0, 60.0, 80.0), 1.0);
        assert_close(triangular(75.0, 40.0, 60.0, 80.0), 0.25);
        assert_eq!(triangular(80.0, 40.0, 60.0, 80.0), 0.0);
        assert_eq!(triangular(150.0, 40.0, 60.0, 80.0), 0.0);
    }

    #[test]
    fn triangle_vertical_rise_is_a_step() {
        assert_eq!(triangular(5.0, 5.0, 5.0, 10.0), 1.0);
        assert_eq!(triangular(4.9, 5.0, 5.0, 10.0), 0.0);
        assert_eq!(triangular(-100.0, 5.0, 5.0, 10.0), 0.0);
        assert!(!triangular(5.0, 5.0, 5.0, 10.0).is_nan());
    }

    #[test]
    fn triangle_vertical_fall_is_a_step() {
        assert_eq!(triangular(10.0, 5.0, 10.0, 10.0), 1.0);
        assert_eq!(triangular(10.1, 5.0, 10.0, 10.0), 0.0);
    }

    #[test]
    fn triangle_fully_collapsed() {
        assert_eq!(triangular(3.0, 3.0, 3.0, 3.0), 1.0);
        assert_eq!(triangular(3.5, 3.0, 3.0, 3.0), 0.0);
    }

    #[test]
    fn triangle_inverted_params_stay_in_range() {
        let y = triangular(0.0, 10.0, 5.0, 20.0);
        assert!((0.0..=1.0).contains(&y), "got {y}");
    }

    #[test]
    fn trapezoid_shape() {
        assert_eq!(trapezoidal(-1.0, 60.0, 80.0, 100.0, 100.0), 0.0);
        assert_eq!(trapezoidal(60.0, 60.0, 80.0, 100.0, 100.0), 0.0);
        assert_close(trapezoidal(70.0, 60.0, 80.0, 100.0, 100.0), 0.5);
        assert_eq!(trapezoidal(90.0, 60.0, 80.0, 100.0, 100.0), 1.0);
        assert_eq!(trapezoidal(100.0, 60.0, 80.0, 100.0, 100.0), 1.0);
        assert_eq!(trapezoidal(100.5, 60.0, 80.0, 100.0, 100.0), 0.0);
    }

    #[test]
    fn trapezoid_left_shoulder() {
        // (0, 0, 40, 60): vertical rise at 0
        assert_eq!(trapezoidal(0.0, 0.0, 0.0, 40.0, 60.0), 1.0);
        assert_eq!(trapezoidal(20.0, 0.0, 0.0, 40.0, 60.0), 1.0);
        assert_close(trapezoidal(50.0, 0.0, 0.0, 40.0, 60.0), 0.5);
        assert_eq!(trapezoidal(-0.1, 0.0, 0.0, 40.0, 60.0), 0.0);
    }

    #[test]
    fn nan_has_no_membership() {
        assert_eq!(triangular(f64::NAN, 0.0, 5.0, 10.0), 0.0);
        assert_eq!(trapezoidal(f64::NAN, 0.0, 0.0, 5.0, 10.0), 0.0);
    }

    #[test]
    fn infinities_saturate() {
        assert_eq!(trapezoidal(f64::INFINITY, 0.0, 0.0, 40.0, 60.0), 0.0);
        assert_eq!(trapezoidal(f64::NEG_INFINITY, 60.0, 80.0, 100.0, 100.0), 0.0);
        assert_eq!(triangular(f64::INFINITY, 40.0, 60.0, 80.0), 0.0);
    }

    #[test]
    fn enum_dispatch_matches_free_functions() {
        let tri = MembershipFunction::Triangular {
            a: 30.0,
            b: 50.0,
            c: 70.0,
        };
        let trap = MembershipFunction::Trapezoidal {
            a: 70.0,
            b: 90.0,
            c: 100.0,
            d: 100.0,
        };
        for x in [0.0, 35.0, 50.0, 65.0, 80.0, 95.0] {
            assert_eq!(tri.degree(x), triangular(x, 30.0, 50.0, 70.0));
            assert_eq!(trap.degree(x), trapezoidal(x, 70.0, 90.0, 100.0, 100.0));
        }
        assert_eq!(tri.shape(), "triangular");
        assert_eq!(trap.params(), vec![70.0, 90.0, 100.0, 100.0]);
    }

    #[test]
    fn serde_uses_shape_tag() {
        let tri = MembershipFunction::Triangular {
            a: 1.0,
            b: 2.0,
            c: 3.0,
        };
        let json = serde_json::to_value(tri).unwrap();
        assert_eq!(json["shape"], "triangular");
        assert_eq!(json["b"], 2.0);
    }
}
