//! # Parcurve Curves
//!
//! Sequential bootstrapping of zero-coupon discount curves.
//!
//! This crate provides:
//!
//! - **Curve**: [`Curve`] registers instruments and solves one pillar per instrument
//! - **Instruments**: deposits, FRAs, simple and compounded futures, OIS, fixed/term-rate
//!   swaps and basis swaps
//! - **Interpolation**: log-linear discount factors or a cubic spline on zero rates
//! - **Conventions**: key/value configurable money market and swap conventions
//! - **Snapshots**: frozen [`DiscountCurve`]s for dual-curve discounting and serialization
//! - **Repricing**: residual checks of every instrument against the solved curve
//!
//! ## Quick Start
//!
//! ```rust
//! use parcurve_core::{Date, Tenor};
//! use parcurve_curves::prelude::*;
//!
//! let val = Date::from_ymd(2016, 3, 16).unwrap();
//! let mut curve = Curve::new(val);
//!
//! let mm = MoneyMarketConventions::default();
//! curve.add_instrument(Deposit::new(val, Tenor::months(6), 0.006, mm).unwrap()).unwrap();
//!
//! let swap = SwapConventions::from_pairs([("fixed_length", "12")]).unwrap();
//! curve.add_instrument(TermSwap::new(val, Tenor::years(2), 0.009, swap).unwrap()).unwrap();
//!
//! let df = curve.discount_factor(Date::from_ymd(2017, 3, 16).unwrap()).unwrap();
//! assert!(df < 1.0);
//! assert!(curve.repricing_report().unwrap().is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]

pub mod compounding;
pub mod conventions;
pub mod curve;
pub mod discount;
pub mod error;
pub mod instruments;
pub mod interpolation;
pub mod repricing;
pub mod view;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::compounding::Compounding;
    pub use crate::conventions::{
        BasisLeg, BasisSwapConventions, Leg, LegConventions, Maturity, MoneyMarketConventions,
        SwapConventions,
    };
    pub use crate::curve::{bootstrap_all, BootstrapConfig, Curve, ZeroPoint};
    pub use crate::discount::{DiscountCurve, DiscountCurveData};
    pub use crate::error::{CurveError, CurveResult, MaturityErrorKind};
    pub use crate::instruments::{
        BasisSwap, BasisSwapStyle, CompoundFuture, CurveInstrument, Deposit, ForwardRate, Future,
        Instrument, InstrumentKind, OvernightIndexSwap, TermSwap,
    };
    pub use crate::interpolation::{Discounting, InterpolationMethod, Pillar, PillarInterpolator};
    pub use crate::repricing::{tolerances, RepricingCheck, RepricingReport};
    pub use crate::view::{PillarView, TrialCurve};
    pub use parcurve_math::solvers::SolverConfig;
}

pub use curve::{bootstrap_all, BootstrapConfig, Curve, ZeroPoint};
pub use discount::DiscountCurve;
pub use error::{CurveError, CurveResult};
