// ============================================================================
// Rounding Interval
// Cash rounding steps for currencies without sub-unit coins
// ============================================================================

use super::config::ConfigError;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cash rounding interval ("Swedish rounding").
///
/// See <http://en.wikipedia.org/wiki/Swedish_rounding>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Interval {
    /// No cash rounding
    #[default]
    None = 0,
    /// 0.05 steps (NL, SG, SA, CH, TR, CL, IE)
    Five = 1,
    /// 0.10 steps (New Zealand, Hong Kong)
    Ten = 2,
    /// 0.10 steps, but amounts ending in 5 round down: 0.45 => 0.40, 0.46 => 0.50.
    ///
    /// In New Zealand it is up to the business whether 5¢ rounds up or down;
    /// most retailers follow government advice and round it down.
    TenRoundDown = 3,
    /// 0.25 steps
    Quarter = 4,
    /// 0.50 steps (Sweden 1992-2010, Norway 1993-2012, Denmark since 2008)
    Half = 5,
    /// 1.00 steps (Sweden since 2010, Norway since 2012)
    Whole = 6,
}

impl Interval {
    /// Every defined interval, in code order.
    pub const ALL: [Interval; 7] = [
        Interval::None,
        Interval::Five,
        Interval::Ten,
        Interval::TenRoundDown,
        Interval::Quarter,
        Interval::Half,
        Interval::Whole,
    ];

    /// Lenient conversion from a raw interval code.
    ///
    /// Codes outside the defined set reset to [`Interval::None`] and are logged.
    pub fn from_u8(code: u8) -> Self {
        match Self::try_from(code) {
            Ok(interval) => interval,
            Err(err) => {
                tracing::warn!(
                    operation = "Interval::from_u8",
                    error = %err,
                    code,
                    "interval out of scope, resetting to none"
                );
                Interval::None
            },
        }
    }

    /// Raw interval code.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Multiplier applied before rounding to a whole number, `None` for no rounding.
    #[inline]
    pub const fn factor(self) -> Option<f64> {
        match self {
            Interval::None => None,
            Interval::Five => Some(20.0),
            Interval::Ten | Interval::TenRoundDown => Some(10.0),
            Interval::Quarter => Some(4.0),
            Interval::Half => Some(2.0),
            Interval::Whole => Some(1.0),
        }
    }

    /// Whether amounts divisible by 5 units are nudged down before rounding.
    #[inline]
    pub const fn rounds_five_down(self) -> bool {
        matches!(self, Interval::TenRoundDown)
    }

    /// Whether this interval changes values at all.
    #[inline]
    pub const fn is_active(self) -> bool {
        !matches!(self, Interval::None)
    }
}

impl TryFrom<u8> for Interval {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Interval::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(ConfigError::InvalidInterval(code))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interval::None => write!(f, "none"),
            Interval::Five => write!(f, "0.05"),
            Interval::Ten => write!(f, "0.10"),
            Interval::TenRoundDown => write!(f, "0.10 (5 rounds down)"),
            Interval::Quarter => write!(f, "0.25"),
            Interval::Half => write!(f, "0.50"),
            Interval::Whole => write!(f, "1.00"),
        }
    }
}
