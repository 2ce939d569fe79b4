//! Compounding conventions for quoting zero rates.
//!
//! # Example
//!
//! ```rust
//! use parcurve_curves::compounding::Compounding;
//!
//! let rate = 0.05; // 5% rate
//! let t = 2.0;     // 2 years
//!
//! let df_continuous = Compounding::Continuous.discount_factor(rate, t);
//! let df_annual = Compounding::Annual.discount_factor(rate, t);
//!
//! // Continuous compounding gives slightly lower DF
//! assert!(df_continuous < df_annual);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CurveError;

/// How a zero rate compounds over a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Compounding {
    /// `DF = 1 / (1 + r·t)`
    Simple,
    /// `DF = (1 + r)^-t`
    Annual,
    /// `DF = (1 + r/2)^-2t`
    SemiAnnual,
    /// `DF = (1 + r/4)^-4t`
    Quarterly,
    /// `DF = (1 + r/12)^-12t`
    Monthly,
    /// `DF = exp(-r·t)`
    #[default]
    Continuous,
}

impl Compounding {
    /// Compounding periods per year, or `None` for simple and continuous.
    #[must_use]
    pub fn periods_per_year_opt(&self) -> Option<u32> {
        match self {
            Self::Simple | Self::Continuous => None,
            Self::Annual => Some(1),
            Self::SemiAnnual => Some(2),
            Self::Quarterly => Some(4),
            Self::Monthly => Some(12),
        }
    }

    /// Discount factor for a zero rate over `t` years.
    #[must_use]
    pub fn discount_factor(&self, rate: f64, t: f64) -> f64 {
        if t == 0.0 {
            return 1.0;
        }
        match self {
            Self::Simple => 1.0 / (1.0 + rate * t),
            Self::Continuous => (-rate * t).exp(),
            _ => {
                let n = f64::from(self.periods_per_year_opt().unwrap_or(1));
                (1.0 + rate / n).powf(-n * t)
            }
        }
    }

    /// Zero rate implied by a discount factor over `t` years.
    ///
    /// Returns 0 for `t <= 0`, where no rate is defined.
    #[must_use]
    pub fn zero_rate(&self, df: f64, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        match self {
            Self::Simple => (1.0 / df - 1.0) / t,
            Self::Continuous => -df.ln() / t,
            _ => {
                let n = f64::from(self.periods_per_year_opt().unwrap_or(1));
                n * (df.powf(-1.0 / (n * t)) - 1.0)
            }
        }
    }

    /// Converts a rate in this convention to the same discount factor in another.
    #[must_use]
    pub fn convert_to(&self, rate: f64, target: Compounding, t: f64) -> f64 {
        target.zero_rate(self.discount_factor(rate, t), t)
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Simple => "Simple",
            Self::Annual => "Annual",
            Self::SemiAnnual => "Semi-Annual",
            Self::Quarterly => "Quarterly",
            Self::Monthly => "Monthly",
            Self::Continuous => "Continuous",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Compounding {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect();

        match normalized.as_str() {
            "simple" => Ok(Self::Simple),
            "annual" | "a" => Ok(Self::Annual),
            "semiannual" | "s" => Ok(Self::SemiAnnual),
            "quarterly" | "q" => Ok(Self::Quarterly),
            "monthly" | "m" => Ok(Self::Monthly),
            "continuous" | "c" | "cont" => Ok(Self::Continuous),
            _ => Err(CurveError::unknown_convention(
                "compounding",
                format!("'{s}' is not a compounding convention"),
            )),
        }
    }
}
