//! Calibration instruments.
//!
//! Each instrument turns a market quote into a one-dimensional root-finding
//! problem in the discount factor at its own maturity (the pillar date).
//! [`CurveInstrument::error`] is zero when the instrument prices to par on the
//! solved pillars plus the candidate, and is expressed in notional units as
//!
//! ```text
//! error = PV(fixed or known leg) - PV(floating or quoted leg)
//! ```
//!
//! # Available Instruments
//!
//! ## Money Market
//! - [`Deposit`]: cash deposit from the effective date
//! - [`ForwardRate`]: forward rate agreement between two future dates
//! - [`Future`]: interest rate future quoted as a price, no convexity adjustment
//! - [`CompoundFuture`]: future settling on a compounded overnight rate
//!
//! ## Swaps
//! - [`OvernightIndexSwap`]: fixed against a compounded overnight index
//! - [`TermSwap`]: fixed against a term rate such as 3M or 6M LIBOR
//! - [`BasisSwap`]: float against float, projected on the curve being built
//!   and on an attached curve
//!
//! The single-period instruments also have a closed form, used by the
//! bootstrap when the start discount factor is already known.

mod basis;
mod compound_future;
mod deposit;
mod fra;
mod future;
mod ois;
mod swap;

pub use basis::{BasisSwap, BasisSwapStyle};
pub use compound_future::CompoundFuture;
pub use deposit::Deposit;
pub use fra::ForwardRate;
pub use future::Future;
pub use ois::OvernightIndexSwap;
pub use swap::TermSwap;

use std::fmt;

use parcurve_core::daycounts::DayCount;
use parcurve_core::Date;
use serde::{Deserialize, Serialize};

use crate::conventions::MoneyMarketConventions;
use crate::error::{CurveError, CurveResult};
use crate::interpolation::Discounting;
use crate::view::PillarView;

/// Instrument type for categorization and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstrumentKind {
    /// Money market deposit
    Deposit,
    /// Forward Rate Agreement
    ForwardRate,
    /// Rate future
    Future,
    /// Compounded overnight rate future
    CompoundFuture,
    /// Overnight Index Swap
    OvernightIndexSwap,
    /// Fixed against term rate swap
    TermSwap,
    /// Float against float swap
    BasisSwap,
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => write!(f, "Deposit"),
            Self::ForwardRate => write!(f, "FRA"),
            Self::Future => write!(f, "Future"),
            Self::CompoundFuture => write!(f, "Compound future"),
            Self::OvernightIndexSwap => write!(f, "OIS"),
            Self::TermSwap => write!(f, "Swap"),
            Self::BasisSwap => write!(f, "Basis swap"),
        }
    }
}

/// What the bootstrap needs from an instrument.
pub trait CurveInstrument {
    /// The pillar date this instrument solves for.
    fn maturity(&self) -> Date;

    /// Quoted rate as a decimal.
    fn rate(&self) -> f64;

    /// Instrument type.
    fn kind(&self) -> InstrumentKind;

    /// Human-readable description, e.g. "Deposit -0.2930% 2016-03-16 to 2016-03-21".
    fn description(&self) -> String;

    /// Pricing error with `candidate` as the discount factor at [`maturity`](Self::maturity).
    fn error(&self, candidate: f64, view: &PillarView<'_>) -> CurveResult<f64>;

    /// Discount factor at maturity in closed form, when the solved pillars
    /// already pin down everything else.
    fn implied_discount_factor(&self, _view: &PillarView<'_>) -> Option<f64> {
        None
    }
}

/// Any supported calibration instrument.
#[derive(Debug, Clone)]
pub enum Instrument {
    /// Cash deposit.
    Deposit(Deposit),
    /// Forward rate agreement.
    ForwardRate(ForwardRate),
    /// Rate future.
    Future(Future),
    /// Compounded overnight rate future.
    CompoundFuture(CompoundFuture),
    /// Overnight index swap.
    OvernightIndexSwap(OvernightIndexSwap),
    /// Fixed against term rate swap.
    TermSwap(TermSwap),
    /// Float against float swap.
    BasisSwap(BasisSwap),
}

impl Instrument {
    fn inner(&self) -> &dyn CurveInstrument {
        match self {
            Instrument::Deposit(i) => i,
            Instrument::ForwardRate(i) => i,
            Instrument::Future(i) => i,
            Instrument::CompoundFuture(i) => i,
            Instrument::OvernightIndexSwap(i) => i,
            Instrument::TermSwap(i) => i,
            Instrument::BasisSwap(i) => i,
        }
    }
}

impl CurveInstrument for Instrument {
    fn maturity(&self) -> Date {
        self.inner().maturity()
    }

    fn rate(&self) -> f64 {
        self.inner().rate()
    }

    fn kind(&self) -> InstrumentKind {
        self.inner().kind()
    }

    fn description(&self) -> String {
        self.inner().description()
    }

    fn error(&self, candidate: f64, view: &PillarView<'_>) -> CurveResult<f64> {
        self.inner().error(candidate, view)
    }

    fn implied_discount_factor(&self, view: &PillarView<'_>) -> Option<f64> {
        self.inner().implied_discount_factor(view)
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl From<Deposit> for Instrument {
    fn from(i: Deposit) -> Self {
        Instrument::Deposit(i)
    }
}

impl From<ForwardRate> for Instrument {
    fn from(i: ForwardRate) -> Self {
        Instrument::ForwardRate(i)
    }
}

impl From<Future> for Instrument {
    fn from(i: Future) -> Self {
        Instrument::Future(i)
    }
}

impl From<CompoundFuture> for Instrument {
    fn from(i: CompoundFuture) -> Self {
        Instrument::CompoundFuture(i)
    }
}

impl From<BasisSwap> for Instrument {
    fn from(i: BasisSwap) -> Self {
        Instrument::BasisSwap(i)
    }
}

impl From<OvernightIndexSwap> for Instrument {
    fn from(i: OvernightIndexSwap) -> Self {
        Instrument::OvernightIndexSwap(i)
    }
}

impl From<TermSwap> for Instrument {
    fn from(i: TermSwap) -> Self {
        Instrument::TermSwap(i)
    }
}

/// One accrual period paying simple interest at the end, shared by deposits,
/// FRAs and futures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SimplePeriod {
    pub start: Date,
    pub end: Date,
    pub rate: f64,
    pub accrual: f64,
    pub notional: f64,
}

impl SimplePeriod {
    pub fn new(
        start: Date,
        end: Date,
        rate: f64,
        conventions: &MoneyMarketConventions,
    ) -> CurveResult<Self> {
        if end <= start {
            return Err(CurveError::invalid_instrument(format!(
                "end date {end} must be after start date {start}"
            )));
        }
        if !rate.is_finite() {
            return Err(CurveError::invalid_instrument(format!("rate {rate} is not finite")));
        }
        Ok(Self {
            start,
            end,
            rate,
            accrual: conventions.basis.year_fraction_f64(start, end),
            notional: conventions.notional,
        })
    }

    /// `N·((1 + r·τ)·DF(end) - DF(start))`
    pub fn error(&self, candidate: f64, view: &PillarView<'_>) -> CurveResult<f64> {
        let curve = view.with_trial(self.end, candidate)?;
        let df_start = curve.projection().discount(self.start);
        Ok(self.notional * ((1.0 + self.rate * self.accrual) * candidate - df_start))
    }

    /// `DF(end) = DF(start) / (1 + r·τ)` when `DF(start)` is known.
    pub fn implied_discount_factor(&self, view: &PillarView<'_>) -> Option<f64> {
        view.known_discount_factor(self.start)
            .map(|df_start| df_start / (1.0 + self.rate * self.accrual))
    }

    pub fn describe(&self, label: &str, quote: &str) -> String {
        format!("{label} {quote} {} to {}", self.start, self.end)
    }
}

/// Formats a decimal rate as a percentage quote.
pub(crate) fn percent(rate: f64) -> String {
    format!("{:.4}%", rate * 100.0)
}
