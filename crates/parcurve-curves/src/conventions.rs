//! Instrument conventions and their key/value configuration.
//!
//! Conventions arrive as string pairs (from a curve file or a caller's map)
//! and are applied on top of the market defaults:
//!
//! ```rust
//! use parcurve_curves::conventions::SwapConventions;
//! use parcurve_core::prelude::*;
//!
//! let conventions = SwapConventions::from_pairs([
//!     ("fixed_length", "12"),
//!     ("fixed_basis", "act360"),
//!     ("fixed_payment_adjustment", "following"),
//! ])
//! .unwrap();
//!
//! assert_eq!(conventions.fixed_length, Tenor::months(12));
//! assert_eq!(conventions.float_length, Tenor::months(6));
//! assert!(SwapConventions::from_pairs([("fixed_lenght", "12")]).is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use parcurve_core::calendars::{BusinessDayConvention, MarketCalendar};
use parcurve_core::daycounts::DayCountConvention;
use parcurve_core::schedule::Schedule;
use parcurve_core::{Date, Tenor};
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// Maturity given either as a date or as a tenor from the effective date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Maturity {
    /// An explicit date.
    Date(Date),
    /// A tenor added to the effective date.
    Tenor(Tenor),
}

impl Maturity {
    /// Resolves to an unadjusted date.
    pub fn resolve(&self, effective: Date) -> CurveResult<Date> {
        match self {
            Maturity::Date(date) => Ok(*date),
            Maturity::Tenor(tenor) => Ok(tenor.add_to(effective)?),
        }
    }
}

impl From<Date> for Maturity {
    fn from(date: Date) -> Self {
        Maturity::Date(date)
    }
}

impl From<Tenor> for Maturity {
    fn from(tenor: Tenor) -> Self {
        Maturity::Tenor(tenor)
    }
}

impl fmt::Display for Maturity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Maturity::Date(date) => write!(f, "{date}"),
            Maturity::Tenor(tenor) => write!(f, "{tenor}"),
        }
    }
}

impl FromStr for Maturity {
    type Err = CurveError;

    /// Tries an ISO date first, then a tenor such as `"5D"` or `"12 months"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(date) = Date::parse(s.trim()) {
            return Ok(Maturity::Date(date));
        }
        s.parse::<Tenor>()
            .map(Maturity::Tenor)
            .map_err(|_| CurveError::invalid_instrument(format!("'{s}' is neither a date nor a tenor")))
    }
}

/// Conventions for single-period money market instruments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoneyMarketConventions {
    /// Accrual basis.
    pub basis: DayCountConvention,
    /// Adjustment applied to the end date.
    pub payment_adjustment: BusinessDayConvention,
    /// Calendar for the adjustment.
    pub calendar: MarketCalendar,
    /// Notional the error function is expressed in.
    pub notional: f64,
}

impl Default for MoneyMarketConventions {
    fn default() -> Self {
        Self {
            basis: DayCountConvention::Act360,
            payment_adjustment: BusinessDayConvention::Unadjusted,
            calendar: MarketCalendar::Weekends,
            notional: 100.0,
        }
    }
}

impl MoneyMarketConventions {
    /// Applies `(key, value)` pairs over the defaults.
    pub fn from_pairs<I, K, V>(pairs: I) -> CurveResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut conventions = Self::default();
        for (key, value) in pairs {
            conventions.set(key.as_ref(), value.as_ref())?;
        }
        Ok(conventions)
    }

    /// Sets one convention by name.
    pub fn set(&mut self, key: &str, value: &str) -> CurveResult<()> {
        match key {
            "basis" => self.basis = parse_value(key, value)?,
            "payment_adjustment" => self.payment_adjustment = parse_value(key, value)?,
            "calendar" => self.calendar = parse_value(key, value)?,
            "notional" => self.notional = parse_notional(key, value)?,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

/// Which leg of a swap a schedule is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    /// The fixed leg.
    Fixed,
    /// The floating leg.
    Float,
}

/// Conventions for two-leg swaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwapConventions {
    /// Fixed leg period length.
    pub fixed_length: Tenor,
    /// Floating leg period length.
    pub float_length: Tenor,
    /// Fixed leg accrual basis.
    pub fixed_basis: DayCountConvention,
    /// Floating leg accrual basis.
    pub float_basis: DayCountConvention,
    /// Fixed leg period end adjustment.
    pub fixed_period_adjustment: BusinessDayConvention,
    /// Floating leg period end adjustment.
    pub float_period_adjustment: BusinessDayConvention,
    /// Fixed leg payment adjustment.
    pub fixed_payment_adjustment: BusinessDayConvention,
    /// Floating leg payment adjustment.
    pub float_payment_adjustment: BusinessDayConvention,
    /// Fixed leg payment lag in business days.
    pub fixed_payment_lag: i32,
    /// Floating leg payment lag in business days.
    pub float_payment_lag: i32,
    /// Fixing lag in business days before each floating period.
    pub fixing_lag: i32,
    /// Length of the floating index (overnight step for OIS, term for term swaps).
    pub rate_length: Option<Tenor>,
    /// Basis the floating index is quoted on.
    pub rate_basis: DayCountConvention,
    /// Calendar for adjustments and lags.
    pub calendar: MarketCalendar,
    /// Notional the error function is expressed in.
    pub notional: f64,
    /// Explicit second roll date (front stub end).
    pub second: Option<Date>,
    /// Explicit penultimate roll date (back stub start).
    pub penultimate: Option<Date>,
}

impl Default for SwapConventions {
    fn default() -> Self {
        Self {
            fixed_length: Tenor::months(6),
            float_length: Tenor::months(6),
            fixed_basis: DayCountConvention::Thirty360,
            float_basis: DayCountConvention::Act360,
            fixed_period_adjustment: BusinessDayConvention::Unadjusted,
            float_period_adjustment: BusinessDayConvention::Unadjusted,
            fixed_payment_adjustment: BusinessDayConvention::Unadjusted,
            float_payment_adjustment: BusinessDayConvention::Unadjusted,
            fixed_payment_lag: 0,
            float_payment_lag: 0,
            fixing_lag: 0,
            rate_length: None,
            rate_basis: DayCountConvention::Act360,
            calendar: MarketCalendar::Weekends,
            notional: 100.0,
            second: None,
            penultimate: None,
        }
    }
}

impl SwapConventions {
    /// Applies `(key, value)` pairs over the defaults.
    pub fn from_pairs<I, K, V>(pairs: I) -> CurveResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut conventions = Self::default();
        for (key, value) in pairs {
            conventions.set(key.as_ref(), value.as_ref())?;
        }
        Ok(conventions)
    }

    /// Sets one convention by name.
    pub fn set(&mut self, key: &str, value: &str) -> CurveResult<()> {
        match key {
            "fixed_length" => self.fixed_length = parse_length(key, value)?,
            "float_length" => self.float_length = parse_length(key, value)?,
            "fixed_basis" => self.fixed_basis = parse_value(key, value)?,
            "float_basis" => self.float_basis = parse_value(key, value)?,
            "fixed_period_adjustment" => self.fixed_period_adjustment = parse_value(key, value)?,
            "float_period_adjustment" => self.float_period_adjustment = parse_value(key, value)?,
            "fixed_payment_adjustment" => self.fixed_payment_adjustment = parse_value(key, value)?,
            "float_payment_adjustment" => self.float_payment_adjustment = parse_value(key, value)?,
            "fixed_payment_lag" => self.fixed_payment_lag = parse_value(key, value)?,
            "float_payment_lag" => self.float_payment_lag = parse_value(key, value)?,
            "fixing_lag" => self.fixing_lag = parse_value(key, value)?,
            "rate_length" => self.rate_length = Some(parse_length(key, value)?),
            "rate_basis" => self.rate_basis = parse_value(key, value)?,
            "calendar" => self.calendar = parse_value(key, value)?,
            "notional" => self.notional = parse_notional(key, value)?,
            "second" => self.second = Some(parse_value(key, value)?),
            "penultimate" => self.penultimate = Some(parse_value(key, value)?),
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// Builds the schedule of one leg.
    pub fn schedule(&self, leg: Leg, effective: Date, maturity: Date) -> CurveResult<Schedule> {
        let (length, period_adjustment, payment_adjustment, payment_lag, fixing_lag) = match leg {
            Leg::Fixed => (
                self.fixed_length,
                self.fixed_period_adjustment,
                self.fixed_payment_adjustment,
                self.fixed_payment_lag,
                0,
            ),
            Leg::Float => (
                self.float_length,
                self.float_period_adjustment,
                self.float_payment_adjustment,
                self.float_payment_lag,
                self.fixing_lag,
            ),
        };

        let mut builder = Schedule::builder(effective, maturity, length)
            .period_adjustment(period_adjustment)
            .payment_adjustment(payment_adjustment)
            .payment_lag(payment_lag)
            .fixing_lag(fixing_lag)
            .calendar(self.calendar.clone());

        if let Some((second, penultimate)) = stubs(self.second, self.penultimate)? {
            builder = builder.stubs(second, penultimate);
        }

        Ok(builder.build()?)
    }
}

/// Conventions of one floating leg of a basis swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegConventions {
    /// Period length.
    pub length: Tenor,
    /// Accrual basis.
    pub basis: DayCountConvention,
    /// Period end adjustment.
    pub period_adjustment: BusinessDayConvention,
    /// Payment adjustment.
    pub payment_adjustment: BusinessDayConvention,
    /// Payment lag in business days.
    pub payment_lag: i32,
    /// Fixing lag in business days.
    pub fixing_lag: i32,
    /// Index length: the overnight step, or the term of a term rate.
    pub rate_length: Option<Tenor>,
    /// Basis the index is quoted on.
    pub rate_basis: DayCountConvention,
    /// Spread over the index.
    pub spread: f64,
}

impl Default for LegConventions {
    fn default() -> Self {
        Self {
            length: Tenor::months(3),
            basis: DayCountConvention::Act360,
            period_adjustment: BusinessDayConvention::Unadjusted,
            payment_adjustment: BusinessDayConvention::Unadjusted,
            payment_lag: 0,
            fixing_lag: 0,
            rate_length: None,
            rate_basis: DayCountConvention::Act360,
            spread: 0.0,
        }
    }
}

impl LegConventions {
    fn set(&mut self, field: &str, key: &str, value: &str) -> CurveResult<()> {
        match field {
            "length" => self.length = parse_length(key, value)?,
            "basis" => self.basis = parse_value(key, value)?,
            "period_adjustment" => self.period_adjustment = parse_value(key, value)?,
            "payment_adjustment" => self.payment_adjustment = parse_value(key, value)?,
            "payment_lag" => self.payment_lag = parse_value(key, value)?,
            "fixing_lag" => self.fixing_lag = parse_value(key, value)?,
            "rate_length" => self.rate_length = Some(parse_length(key, value)?),
            "rate_basis" => self.rate_basis = parse_value(key, value)?,
            "spread" => self.spread = parse_finite(key, value)?,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

/// Which leg of a basis swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasisLeg {
    /// Floats on the curve being built.
    One,
    /// Floats on the attached discount curve and carries the quoted spread.
    Two,
}

/// Conventions for float against float basis swaps.
///
/// Keys are the leg fields prefixed with `leg_one_` or `leg_two_`
/// (`leg_two_spread` is the quote and cannot be set here), plus `calendar`,
/// `notional`, `second` and `penultimate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasisSwapConventions {
    /// Leg floating on the curve being built.
    pub leg_one: LegConventions,
    /// Leg floating on the attached discount curve.
    pub leg_two: LegConventions,
    /// Calendar for adjustments and lags.
    pub calendar: MarketCalendar,
    /// Notional the error function is expressed in.
    pub notional: f64,
    /// Explicit second roll date (front stub end).
    pub second: Option<Date>,
    /// Explicit penultimate roll date (back stub start).
    pub penultimate: Option<Date>,
}

impl Default for BasisSwapConventions {
    fn default() -> Self {
        Self {
            leg_one: LegConventions::default(),
            leg_two: LegConventions::default(),
            calendar: MarketCalendar::Weekends,
            notional: 100.0,
            second: None,
            penultimate: None,
        }
    }
}

impl BasisSwapConventions {
    /// Applies `(key, value)` pairs over the defaults.
    pub fn from_pairs<I, K, V>(pairs: I) -> CurveResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut conventions = Self::default();
        for (key, value) in pairs {
            conventions.set(key.as_ref(), value.as_ref())?;
        }
        Ok(conventions)
    }

    /// Sets one convention by name.
    pub fn set(&mut self, key: &str, value: &str) -> CurveResult<()> {
        if key == "leg_two_spread" {
            return Err(CurveError::unknown_convention(key, "the quote is the leg two spread"));
        }
        if let Some(field) = key.strip_prefix("leg_one_") {
            return self.leg_one.set(field, key, value);
        }
        if let Some(field) = key.strip_prefix("leg_two_") {
            return self.leg_two.set(field, key, value);
        }
        match key {
            "calendar" => self.calendar = parse_value(key, value)?,
            "notional" => self.notional = parse_notional(key, value)?,
            "second" => self.second = Some(parse_value(key, value)?),
            "penultimate" => self.penultimate = Some(parse_value(key, value)?),
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// Returns the conventions of one leg.
    #[must_use]
    pub fn leg(&self, leg: BasisLeg) -> &LegConventions {
        match leg {
            BasisLeg::One => &self.leg_one,
            BasisLeg::Two => &self.leg_two,
        }
    }

    /// Builds the schedule of one leg.
    pub fn schedule(&self, leg: BasisLeg, effective: Date, maturity: Date) -> CurveResult<Schedule> {
        let leg = self.leg(leg);
        let mut builder = Schedule::builder(effective, maturity, leg.length)
            .period_adjustment(leg.period_adjustment)
            .payment_adjustment(leg.payment_adjustment)
            .payment_lag(leg.payment_lag)
            .fixing_lag(leg.fixing_lag)
            .calendar(self.calendar.clone());

        if let Some((second, penultimate)) = stubs(self.second, self.penultimate)? {
            builder = builder.stubs(second, penultimate);
        }

        Ok(builder.build()?)
    }
}

fn stubs(second: Option<Date>, penultimate: Option<Date>) -> CurveResult<Option<(Date, Date)>> {
    match (second, penultimate) {
        (Some(second), Some(penultimate)) => Ok(Some((second, penultimate))),
        (None, None) => Ok(None),
        _ => Err(CurveError::unknown_convention(
            if second.is_some() { "penultimate" } else { "second" },
            "second and penultimate must be given together",
        )),
    }
}

fn unknown_key(key: &str) -> CurveError {
    CurveError::unknown_convention(key, "unknown key")
}

fn parse_value<T>(key: &str, value: &str) -> CurveResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| CurveError::unknown_convention(key, format!("invalid value '{value}': {e}")))
}

/// Period lengths: a bare integer counts months, anything else is a tenor.
fn parse_length(key: &str, value: &str) -> CurveResult<Tenor> {
    let tenor = match value.trim().parse::<i32>() {
        Ok(months) => Tenor::months(months),
        Err(_) => parse_value(key, value)?,
    };
    if tenor.count() <= 0 {
        return Err(CurveError::unknown_convention(
            key,
            format!("length must be positive, got '{value}'"),
        ));
    }
    Ok(tenor)
}

fn parse_finite(key: &str, value: &str) -> CurveResult<f64> {
    let number: f64 = parse_value(key, value)?;
    if number.is_finite() {
        Ok(number)
    } else {
        Err(CurveError::unknown_convention(key, format!("'{value}' is not finite")))
    }
}

fn parse_notional(key: &str, value: &str) -> CurveResult<f64> {
    let notional: f64 = parse_value(key, value)?;
    if notional > 0.0 && notional.is_finite() {
        Ok(notional)
    } else {
        Err(CurveError::unknown_convention(
            key,
            format!("notional must be positive, got '{value}'"),
        ))
    }
}
