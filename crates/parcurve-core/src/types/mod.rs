//! Domain types for dates and relative time.
//!
//! - [`Date`]: calendar date used throughout the curve layer
//! - [`Tenor`]: relative span such as `3M` or `5Y`
//! - [`imm_date`]: IMM futures code to delivery date

mod date;
mod imm;
mod tenor;

pub use date::Date;
pub use imm::{imm_date, third_wednesday};
pub use tenor::{Tenor, TenorUnit};
