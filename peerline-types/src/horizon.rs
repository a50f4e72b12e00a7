//! Lookback windows offered by the comparison dashboard.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PeerlineError;

/// Enumerated lookback window bounding the requested history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Horizon {
    /// One month.
    M1,
    /// Three months.
    M3,
    /// Six months.
    #[default]
    M6,
    /// One year.
    Y1,
    /// Five years.
    Y5,
    /// Ten years.
    Y10,
    /// Twenty years.
    Y20,
}

impl Horizon {
    /// Every horizon, shortest first, in picker order.
    pub const ALL: [Self; 7] = [
        Self::M1,
        Self::M3,
        Self::M6,
        Self::Y1,
        Self::Y5,
        Self::Y10,
        Self::Y20,
    ];

    /// Provider-facing range token (`1mo`, `1y`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::M1 => "1mo",
            Self::M3 => "3mo",
            Self::M6 => "6mo",
            Self::Y1 => "1y",
            Self::Y5 => "5y",
            Self::Y10 => "10y",
            Self::Y20 => "20y",
        }
    }

    /// Human-readable label for pickers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::M1 => "1 Month",
            Self::M3 => "3 Months",
            Self::M6 => "6 Months",
            Self::Y1 => "1 Year",
            Self::Y5 => "5 Years",
            Self::Y10 => "10 Years",
            Self::Y20 => "20 Years",
        }
    }

    /// Approximate length in calendar months.
    #[must_use]
    pub const fn months(self) -> u32 {
        match self {
            Self::M1 => 1,
            Self::M3 => 3,
            Self::M6 => 6,
            Self::Y1 => 12,
            Self::Y5 => 60,
            Self::Y10 => 120,
            Self::Y20 => 240,
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Horizon {
    type Err = PeerlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|h| h.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| PeerlineError::invalid_input(format!("unknown horizon '{token}'")))
    }
}

impl TryFrom<String> for Horizon {
    type Error = PeerlineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Horizon> for String {
    fn from(h: Horizon) -> Self {
        h.as_str().to_string()
    }
}
