//! The bootstrapped discount curve.
//!
//! # Bootstrap
//!
//! Instruments are kept sorted by maturity. Each one solves for the discount
//! factor at its own pillar date, in order, against the pillars solved before
//! it:
//!
//! ```text
//! pillars:      (val, 1.0)  (m0, df0)  (m1, df1)  ...  (m[k-1], df[k-1])
//! instruments:              i0         i1         ...   i[k-1]   | i[k] ...
//!                                                                ^ first unsolved
//! ```
//!
//! Registering an instrument with an earlier maturity drops every pillar from
//! its position onward; the next query re-solves from there.

use parcurve_core::Date;
use parcurve_math::solvers::{hybrid_numerical, SolverConfig};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::compounding::Compounding;
use crate::discount::{zero_rate_on, DiscountCurve};
use crate::error::{CurveError, CurveResult, MaturityErrorKind};
use crate::instruments::{CurveInstrument, Instrument};
use crate::interpolation::{curve_time, Discounting, InterpolationMethod, Pillar, PillarInterpolator};
use crate::repricing::{RepricingCheck, RepricingReport};
use crate::view::PillarView;

/// Lower bound of the default discount factor search bracket.
pub const DEFAULT_BRACKET_MIN: f64 = 1e-6;

/// Upper bound of the default discount factor search bracket.
pub const DEFAULT_BRACKET_MAX: f64 = 4.0;

/// Solver settings for the bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Root finder tolerance and iteration budget per instrument.
    pub solver: SolverConfig,
    /// Solve single-period instruments in closed form when possible.
    pub closed_form: bool,
    /// Discount factor search bracket.
    pub bracket: (f64, f64),
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            closed_form: true,
            bracket: (DEFAULT_BRACKET_MIN, DEFAULT_BRACKET_MAX),
        }
    }
}

impl BootstrapConfig {
    /// Sets the solver configuration.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Enables or disables the closed-form shortcut.
    #[must_use]
    pub fn with_closed_form(mut self, closed_form: bool) -> Self {
        self.closed_form = closed_form;
        self
    }
}

/// A continuously compounded zero rate at a pillar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZeroPoint {
    /// Pillar date.
    pub date: Date,
    /// Continuous ACT/365F zero rate.
    pub rate: f64,
}

/// A discount curve bootstrapped from market instruments.
///
/// # Example
///
/// ```rust
/// use parcurve_core::{Date, Tenor};
/// use parcurve_curves::prelude::*;
///
/// let val = Date::from_ymd(2016, 3, 16).unwrap();
/// let mut curve = Curve::new(val);
///
/// let deposit = Deposit::new(val, Tenor::days(5), -0.00293, MoneyMarketConventions::default())
///     .unwrap();
/// curve.add_instrument(deposit).unwrap();
///
/// let df = curve.discount_factor(Date::from_ymd(2016, 3, 21).unwrap()).unwrap();
/// assert!((df - 1.0 / (1.0 - 0.00293 * 5.0 / 360.0)).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct Curve {
    valuation_date: Date,
    interpolation: InterpolationMethod,
    config: BootstrapConfig,
    instruments: Vec<Instrument>,
    pillars: Vec<Pillar>,
    first_unsolved: usize,
    stale: bool,
    interpolator: Option<PillarInterpolator>,
    discount_curve: Option<DiscountCurve>,
}

impl Curve {
    /// Creates an empty curve.
    #[must_use]
    pub fn new(valuation_date: Date) -> Self {
        Self {
            valuation_date,
            interpolation: InterpolationMethod::default(),
            config: BootstrapConfig::default(),
            instruments: Vec::new(),
            pillars: vec![Pillar::new(valuation_date, 1.0)],
            first_unsolved: 0,
            stale: false,
            interpolator: None,
            discount_curve: None,
        }
    }

    /// Sets the interpolation method.
    #[must_use]
    pub fn with_interpolation(mut self, interpolation: InterpolationMethod) -> Self {
        self.interpolation = interpolation;
        self.invalidate_from(0);
        self
    }

    /// Sets the bootstrap configuration.
    #[must_use]
    pub fn with_config(mut self, config: BootstrapConfig) -> Self {
        self.config = config;
        self.invalidate_from(0);
        self
    }

    /// Discounts term swap cash flows on `discount_curve` instead of the
    /// curve being built.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::ReferenceDateMismatch` if the valuation dates differ.
    pub fn with_discount_curve(mut self, discount_curve: DiscountCurve) -> CurveResult<Self> {
        if discount_curve.valuation_date() != self.valuation_date {
            return Err(CurveError::ReferenceDateMismatch {
                expected: self.valuation_date,
                got: discount_curve.valuation_date(),
            });
        }
        self.discount_curve = Some(discount_curve);
        self.invalidate_from(0);
        Ok(self)
    }

    /// Returns the valuation date.
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Returns the interpolation method.
    #[must_use]
    pub fn interpolation(&self) -> InterpolationMethod {
        self.interpolation
    }

    /// Returns the bootstrap configuration.
    #[must_use]
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Returns the registered instruments in maturity order.
    #[must_use]
    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// Returns the solved pillars without bootstrapping.
    #[must_use]
    pub fn solved_pillars(&self) -> &[Pillar] {
        &self.pillars
    }

    /// Returns true if some instruments are not solved yet.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Index of the first instrument without a pillar.
    #[must_use]
    pub fn first_unsolved(&self) -> usize {
        self.first_unsolved
    }

    /// Registers an instrument.
    ///
    /// Pillars at or after the new instrument's maturity are dropped and will
    /// be re-solved on the next query.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidMaturity` if the maturity is on or before
    /// the valuation date, or equals the maturity of a registered instrument.
    /// The curve is left unchanged.
    pub fn add_instrument(&mut self, instrument: impl Into<Instrument>) -> CurveResult<()> {
        let instrument = instrument.into();
        let maturity = instrument.maturity();

        if maturity <= self.valuation_date {
            return Err(CurveError::invalid_maturity(
                instrument.description(),
                maturity,
                MaturityErrorKind::OnOrBeforeValuation,
            ));
        }

        let index = self.instruments.partition_point(|i| i.maturity() < maturity);
        if self
            .instruments
            .get(index)
            .is_some_and(|existing| existing.maturity() == maturity)
        {
            return Err(CurveError::invalid_maturity(
                instrument.description(),
                maturity,
                MaturityErrorKind::Duplicate,
            ));
        }

        tracing::debug!(
            instrument = %instrument,
            %maturity,
            index,
            "Registered instrument"
        );
        self.instruments.insert(index, instrument);
        self.invalidate_from(index);
        Ok(())
    }

    /// Solves every unsolved instrument in maturity order.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::EmptyCurve` without instruments, and
    /// `CurveError::BootstrapConvergence` naming the first instrument the
    /// solver fails on. Pillars before that instrument are kept.
    pub fn bootstrap(&mut self) -> CurveResult<()> {
        if self.instruments.is_empty() {
            return Err(CurveError::EmptyCurve);
        }

        for index in self.first_unsolved..self.instruments.len() {
            match self.solve_pillar(index) {
                Ok(discount_factor) => {
                    let date = self.instruments[index].maturity();
                    tracing::debug!(
                        instrument = %self.instruments[index],
                        %date,
                        discount_factor,
                        "Solved pillar"
                    );
                    self.pillars.push(Pillar::new(date, discount_factor));
                    self.first_unsolved = index + 1;
                }
                Err(err) => {
                    tracing::warn!(
                        instrument = %self.instruments[index],
                        error = %err,
                        "Bootstrap failed"
                    );
                    self.first_unsolved = index;
                    return Err(err);
                }
            }
        }

        self.interpolator = Some(PillarInterpolator::new(
            self.valuation_date,
            &self.pillars,
            self.interpolation,
        )?);
        self.stale = false;

        tracing::info!(
            valuation_date = %self.valuation_date,
            pillars = self.pillars.len() - 1,
            interpolation = %self.interpolation,
            "Bootstrap complete"
        );
        Ok(())
    }

    /// Discount factor at `date`, bootstrapping first if needed.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::DateBeforeValuation` for dates before the
    /// valuation date, and any bootstrap error.
    pub fn discount_factor(&mut self, date: Date) -> CurveResult<f64> {
        self.check_date(date)?;
        Ok(self.ensure_bootstrapped()?.discount(date))
    }

    /// Zero rate to `date` in the given compounding, ACT/365F.
    ///
    /// At the valuation date itself this is the rate to the first pillar.
    pub fn zero_rate(&mut self, date: Date, compounding: Compounding) -> CurveResult<f64> {
        self.check_date(date)?;
        self.ensure_bootstrapped()?;
        let interpolator = self.cached_interpolator()?;
        Ok(zero_rate_on(
            interpolator,
            &self.pillars,
            self.valuation_date,
            date,
            compounding,
        ))
    }

    /// Solved pillars, including `(valuation_date, 1.0)`.
    pub fn view(&mut self) -> CurveResult<&[Pillar]> {
        self.ensure_bootstrapped()?;
        Ok(&self.pillars)
    }

    /// Continuous ACT/365F zero rates at each pillar. The valuation date
    /// row has a rate of zero.
    pub fn zeros(&mut self) -> CurveResult<Vec<ZeroPoint>> {
        self.ensure_bootstrapped()?;
        let valuation_date = self.valuation_date;

        Ok(self
            .pillars
            .iter()
            .map(|p| ZeroPoint {
                date: p.date,
                rate: Compounding::Continuous
                    .zero_rate(p.discount_factor, curve_time(valuation_date, p.date)),
            })
            .collect())
    }

    /// Reprices every instrument at its solved discount factor.
    pub fn repricing_report(&mut self) -> CurveResult<RepricingReport> {
        self.ensure_bootstrapped()?;

        let checks = self
            .instruments
            .iter()
            .enumerate()
            .map(|(index, instrument)| {
                let solved = self.pillars[index + 1];
                let residual = instrument.error(solved.discount_factor, &self.view_at(index))?;
                Ok(RepricingCheck::new(
                    instrument.description(),
                    instrument.kind(),
                    solved.date,
                    solved.discount_factor,
                    residual,
                ))
            })
            .collect::<CurveResult<Vec<_>>>()?;

        Ok(RepricingReport::new(checks))
    }

    /// Freezes the solved curve into a read-only [`DiscountCurve`].
    pub fn snapshot(&mut self) -> CurveResult<DiscountCurve> {
        self.ensure_bootstrapped()?;
        DiscountCurve::new(self.valuation_date, self.pillars.clone(), self.interpolation)
    }

    fn solve_pillar(&self, index: usize) -> CurveResult<f64> {
        let instrument = &self.instruments[index];
        let view = self.view_at(index);

        if self.config.closed_form {
            if let Some(df) = instrument
                .implied_discount_factor(&view)
                .filter(|df| *df > 0.0 && df.is_finite())
            {
                return Ok(df);
            }
        }

        let (lo, hi) = self.config.bracket;
        let guess = view
            .last_pillar()
            .map_or(1.0, |p| p.discount_factor)
            .clamp(lo, hi);

        // Structural problems surface here rather than as a failed solve
        instrument.error(guess, &view)?;

        let objective = |df: f64| instrument.error(df, &view).unwrap_or(f64::NAN);
        hybrid_numerical(objective, guess, Some((lo, hi)), &self.config.solver)
            .map(|result| result.root)
            .map_err(|err| {
                CurveError::bootstrap_convergence(instrument.description(), instrument.maturity(), &err)
            })
    }

    /// The pillars instrument `index` is solved against.
    fn view_at(&self, index: usize) -> PillarView<'_> {
        PillarView::new(
            self.valuation_date,
            &self.pillars[..=index],
            self.interpolation,
        )
        .with_discount_curve(self.discount_curve.as_ref())
    }

    fn ensure_bootstrapped(&mut self) -> CurveResult<&PillarInterpolator> {
        if self.stale || self.interpolator.is_none() {
            self.bootstrap()?;
        }
        self.cached_interpolator()
    }

    fn cached_interpolator(&self) -> CurveResult<&PillarInterpolator> {
        self.interpolator.as_ref().ok_or(CurveError::EmptyCurve)
    }

    fn check_date(&self, date: Date) -> CurveResult<()> {
        if date < self.valuation_date {
            return Err(CurveError::DateBeforeValuation {
                date,
                valuation_date: self.valuation_date,
            });
        }
        Ok(())
    }

    fn invalidate_from(&mut self, index: usize) {
        self.first_unsolved = self.first_unsolved.min(index);
        self.pillars.truncate(1 + self.first_unsolved);
        self.interpolator = None;
        self.stale = !self.instruments.is_empty();
    }
}

/// Bootstraps independent curves in parallel.
///
/// Each curve is still solved sequentially; results are in input order.
pub fn bootstrap_all(curves: &mut [Curve]) -> Vec<CurveResult<()>> {
    curves.par_iter_mut().map(Curve::bootstrap).collect()
}
