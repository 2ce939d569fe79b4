//! Interpolation of discount factors between pillar dates.
//!
//! The time axis is ACT/365F from the valuation date. Two transforms are
//! supported:
//!
//! | Method | Interpolated quantity | Knots |
//! |--------|-----------------------|-------|
//! | [`InterpolationMethod::LogLinear`] | `ln DF` (piecewise-flat forwards) | every pillar, including `(0, 1.0)` |
//! | [`InterpolationMethod::CubicSplineZero`] | continuous zero rate | pillars with `t > 0` |
//!
//! Outside the knots both hold the transformed value flat. Dates on or before
//! the valuation date discount at exactly 1.

use std::fmt;
use std::str::FromStr;

use parcurve_core::daycounts::{DayCount, DayCountConvention};
use parcurve_core::Date;
use parcurve_math::interpolation::{
    CubicSpline, Interpolator, LinearInterpolator, LogLinearInterpolator,
};
use parcurve_math::MathError;
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// Interpolation methods for discount curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum InterpolationMethod {
    /// Linear interpolation on log discount factors.
    #[default]
    #[serde(alias = "loglinear", alias = "log_linear")]
    LogLinear,

    /// Natural cubic spline on continuously compounded zero rates.
    #[serde(alias = "cubic-spline", alias = "cubic_spline", alias = "spline")]
    CubicSplineZero,
}

impl InterpolationMethod {
    /// Returns true if adding a later pillar can move values before it.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::CubicSplineZero)
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LogLinear => "Log-Linear",
            Self::CubicSplineZero => "Cubic Spline (Zero)",
        };
        write!(f, "{name}")
    }
}

impl FromStr for InterpolationMethod {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect();

        match normalized.as_str() {
            "loglinear" | "logdf" => Ok(Self::LogLinear),
            "cubicsplinezero" | "cubicspline" | "spline" => Ok(Self::CubicSplineZero),
            _ => Err(CurveError::unknown_convention(
                "interpolation",
                format!("'{s}' is not an interpolation method"),
            )),
        }
    }
}

/// A solved `(date, discount factor)` point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    /// Pillar date.
    pub date: Date,
    /// Discount factor from the valuation date to `date`.
    pub discount_factor: f64,
}

impl Pillar {
    /// Creates a pillar.
    #[must_use]
    pub fn new(date: Date, discount_factor: f64) -> Self {
        Self {
            date,
            discount_factor,
        }
    }
}

/// Anything that can discount a cash flow paid on a date.
pub trait Discounting {
    /// Discount factor from the valuation date to `date`.
    fn discount(&self, date: Date) -> f64;
}

/// Curve time of `date` in years, ACT/365F from `valuation_date`.
#[must_use]
pub fn curve_time(valuation_date: Date, date: Date) -> f64 {
    DayCountConvention::Act365Fixed.year_fraction_f64(valuation_date, date)
}

#[derive(Debug, Clone)]
enum Shape {
    Constant(f64),
    Linear(LinearInterpolator),
    LogLinear(LogLinearInterpolator),
    Spline(CubicSpline),
}

impl Shape {
    fn value(&self, t: f64) -> f64 {
        let result = match self {
            Shape::Constant(v) => return *v,
            Shape::Linear(i) => i.interpolate(t),
            Shape::LogLinear(i) => i.interpolate(t),
            Shape::Spline(i) => i.interpolate(t),
        };
        result.unwrap_or(f64::NAN)
    }
}

/// Discount factor interpolation over a fixed set of pillars.
///
/// Evaluation is a pure function of the pillars and method, so the same
/// inputs always give bit-identical discount factors.
#[derive(Debug, Clone)]
pub struct PillarInterpolator {
    valuation_date: Date,
    method: InterpolationMethod,
    shape: Shape,
}

impl PillarInterpolator {
    /// Builds an interpolator over pillars sorted by date.
    ///
    /// # Errors
    ///
    /// Fails if `pillars` is empty, dates are not strictly increasing or
    /// precede the valuation date, or a discount factor is not positive.
    pub fn new(
        valuation_date: Date,
        pillars: &[Pillar],
        method: InterpolationMethod,
    ) -> CurveResult<Self> {
        validate_pillars(valuation_date, pillars)?;

        let shape = match method {
            InterpolationMethod::LogLinear => log_linear_shape(valuation_date, pillars)?,
            InterpolationMethod::CubicSplineZero => zero_rate_shape(valuation_date, pillars)?,
        };

        Ok(Self {
            valuation_date,
            method,
            shape,
        })
    }

    /// Returns the valuation date.
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Returns the interpolation method.
    #[must_use]
    pub fn method(&self) -> InterpolationMethod {
        self.method
    }

    /// Discount factor at curve time `t`.
    #[must_use]
    pub fn discount_factor_at(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 1.0;
        }
        match self.method {
            InterpolationMethod::LogLinear => self.shape.value(t),
            InterpolationMethod::CubicSplineZero => (-self.shape.value(t) * t).exp(),
        }
    }
}

impl Discounting for PillarInterpolator {
    fn discount(&self, date: Date) -> f64 {
        self.discount_factor_at(curve_time(self.valuation_date, date))
    }
}

fn validate_pillars(valuation_date: Date, pillars: &[Pillar]) -> CurveResult<()> {
    let first = pillars
        .first()
        .ok_or_else(|| MathError::insufficient_data(1, 0))?;

    if first.date < valuation_date {
        return Err(CurveError::DateBeforeValuation {
            date: first.date,
            valuation_date,
        });
    }
    for pair in pillars.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(MathError::invalid_input(format!(
                "pillar dates must be strictly increasing ({} then {})",
                pair[0].date, pair[1].date
            ))
            .into());
        }
    }
    if let Some(bad) = pillars
        .iter()
        .find(|p| !(p.discount_factor > 0.0 && p.discount_factor.is_finite()))
    {
        return Err(MathError::invalid_input(format!(
            "discount factor at {} must be positive, got {}",
            bad.date, bad.discount_factor
        ))
        .into());
    }
    Ok(())
}

fn log_linear_shape(valuation_date: Date, pillars: &[Pillar]) -> CurveResult<Shape> {
    let mut xs = Vec::with_capacity(pillars.len() + 1);
    let mut ys = Vec::with_capacity(pillars.len() + 1);

    // Anchor at (0, 1) so the first segment starts from the valuation date
    if pillars[0].date > valuation_date {
        xs.push(0.0);
        ys.push(1.0);
    }
    for pillar in pillars {
        xs.push(curve_time(valuation_date, pillar.date));
        ys.push(pillar.discount_factor);
    }

    if xs.len() < 2 {
        return Ok(Shape::Constant(ys[0]));
    }
    Ok(Shape::LogLinear(
        LogLinearInterpolator::new(xs, ys)?.with_flat_extrapolation(),
    ))
}

fn zero_rate_shape(valuation_date: Date, pillars: &[Pillar]) -> CurveResult<Shape> {
    let (xs, zs): (Vec<f64>, Vec<f64>) = pillars
        .iter()
        .filter(|p| p.date > valuation_date)
        .map(|p| {
            let t = curve_time(valuation_date, p.date);
            (t, -p.discount_factor.ln() / t)
        })
        .unzip();

    let shape = match xs.len() {
        0 => Shape::Constant(0.0),
        1 => Shape::Constant(zs[0]),
        2 => Shape::Linear(LinearInterpolator::new(xs, zs)?.with_flat_extrapolation()),
        _ => Shape::Spline(CubicSpline::new(xs, zs)?.with_flat_extrapolation()),
    };
    Ok(shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn pillars() -> Vec<Pillar> {
        let val = d(2016, 3, 16);
        vec![
            Pillar::new(val, 1.0),
            Pillar::new(d(2017, 3, 16), 0.99),
            Pillar::new(d(2018, 3, 16), 0.97),
            Pillar::new(d(2021, 3, 16), 0.90),
        ]
    }

    #[test]
    fn test_pillars_reproduced() {
        let val = d(2016, 3, 16);
        for method in [InterpolationMethod::LogLinear, InterpolationMethod::CubicSplineZero] {
            let interp = PillarInterpolator::new(val, &pillars(), method).unwrap();
            for p in pillars() {
                assert_relative_eq!(interp.discount(p.date), p.discount_factor, epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn test_log_linear_is_geometric_between_pillars() {
        let val = d(2016, 3, 16);
        let interp = PillarInterpolator::new(val, &pillars(), InterpolationMethod::LogLinear).unwrap();

        let t1 = curve_time(val, d(2017, 3, 16));
        let t2 = curve_time(val, d(2018, 3, 16));
        let mid = 0.5 * (t1 + t2);
        assert_relative_eq!(
            interp.discount_factor_at(mid),
            (0.99_f64 * 0.97).sqrt(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_flat_extrapolation_in_transformed_space() {
        let val = d(2016, 3, 16);
        let last = d(2021, 3, 16);
        let far = d(2031, 3, 16);

        let log_linear =
            PillarInterpolator::new(val, &pillars(), InterpolationMethod::LogLinear).unwrap();
        assert_relative_eq!(log_linear.discount(far), 0.90, epsilon = 1e-14);

        let spline =
            PillarInterpolator::new(val, &pillars(), InterpolationMethod::CubicSplineZero).unwrap();
        let z_last = -0.90_f64.ln() / curve_time(val, last);
        assert_relative_eq!(
            spline.discount(far),
            (-z_last * curve_time(val, far)).exp(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_before_valuation_discounts_at_one() {
        let val = d(2016, 3, 16);
        for method in [InterpolationMethod::LogLinear, InterpolationMethod::CubicSplineZero] {
            let interp = PillarInterpolator::new(val, &pillars(), method).unwrap();
            assert_eq!(interp.discount(d(2016, 3, 14)), 1.0);
            assert_eq!(interp.discount(val), 1.0);
        }
    }

    #[test]
    fn test_spline_degrades_with_few_knots() {
        let val = d(2016, 3, 16);
        let one = vec![Pillar::new(val, 1.0), Pillar::new(d(2017, 3, 16), 0.99)];
        let interp = PillarInterpolator::new(val, &one, InterpolationMethod::CubicSplineZero).unwrap();

        // A single knot is a flat zero rate
        let z = -0.99_f64.ln() / curve_time(val, d(2017, 3, 16));
        let t = curve_time(val, d(2016, 9, 16));
        assert_relative_eq!(interp.discount_factor_at(t), (-z * t).exp(), epsilon = 1e-14);

        let only_valuation = vec![Pillar::new(val, 1.0)];
        let flat =
            PillarInterpolator::new(val, &only_valuation, InterpolationMethod::LogLinear).unwrap();
        assert_eq!(flat.discount(d(2020, 1, 1)), 1.0);
    }

    #[test]
    fn test_rejects_bad_pillars() {
        let val = d(2016, 3, 16);
        let method = InterpolationMethod::LogLinear;

        assert!(PillarInterpolator::new(val, &[], method).is_err());

        let unsorted = vec![Pillar::new(d(2018, 1, 1), 0.98), Pillar::new(d(2017, 1, 1), 0.99)];
        assert!(PillarInterpolator::new(val, &unsorted, method).is_err());

        let negative = vec![Pillar::new(val, 1.0), Pillar::new(d(2017, 1, 1), -0.5)];
        assert!(PillarInterpolator::new(val, &negative, method).is_err());

        let early = vec![Pillar::new(d(2016, 1, 1), 1.0)];
        assert!(matches!(
            PillarInterpolator::new(val, &early, method),
            Err(CurveError::DateBeforeValuation { .. })
        ));
    }

    #[test]
    fn test_method_parse_and_serde() {
        assert_eq!("log-linear".parse::<InterpolationMethod>().unwrap(), InterpolationMethod::LogLinear);
        assert_eq!("Cubic Spline".parse::<InterpolationMethod>().unwrap(), InterpolationMethod::CubicSplineZero);
        assert!("monotone".parse::<InterpolationMethod>().is_err());

        let json = serde_json::to_string(&InterpolationMethod::CubicSplineZero).unwrap();
        assert_eq!(json, "\"cubic-spline-zero\"");
        let parsed: InterpolationMethod = serde_json::from_str("\"spline\"").unwrap();
        assert_eq!(parsed, InterpolationMethod::CubicSplineZero);
    }
}
