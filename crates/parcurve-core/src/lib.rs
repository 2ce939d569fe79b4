//! # Parcurve Core
//!
//! Date and convention primitives for the Parcurve discount curve bootstrapper.
//!
//! - **Types**: [`Date`], [`Tenor`] and IMM contract codes
//! - **Day Count Conventions**: ACT/360, ACT/365F, 30/360 and 30E/360
//! - **Business Day Calendars**: weekend and holiday calendars with rolling conventions
//! - **Schedules**: backward-rolled swap leg schedules with lags and stubs
//!
//! ## Example
//!
//! ```rust
//! use parcurve_core::prelude::*;
//!
//! let effective = Date::from_ymd(2016, 3, 16).unwrap();
//! let maturity = Tenor::years(2).add_to(effective).unwrap();
//!
//! let schedule = Schedule::builder(effective, maturity, Tenor::months(6))
//!     .period_adjustment(BusinessDayConvention::ModifiedFollowing)
//!     .build()
//!     .unwrap();
//! assert_eq!(schedule.len(), 4);
//!
//! let tau = DayCountConvention::Act360.year_fraction_f64(effective, maturity);
//! assert!(tau > 2.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod schedule;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{BusinessDayConvention, Calendar, MarketCalendar};
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::schedule::{Schedule, SchedulePeriod};
    pub use crate::types::{imm_date, Date, Tenor, TenorUnit};
}

pub use error::{CoreError, CoreResult};
pub use types::{Date, Tenor};
