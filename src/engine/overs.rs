//! Packed overs notation.
//!
//! Scorecards write overs as `4.3`, meaning 4 completed overs plus 3 balls.
//! The digit after the point counts balls (0-5), it is not a decimal fraction,
//! so all arithmetic happens on whole balls and the notation is only produced
//! at the edges.

use crate::error::{Result, StatsError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

pub const BALLS_PER_OVER: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Overs {
    balls: u32,
}

impl Overs {
    pub fn from_balls(balls: u32) -> Self {
        Self { balls }
    }

    /// Parse packed notation such as `4.3`.
    ///
    /// Rejects negative or non-finite values, more than one digit after the
    /// point, and a ball digit above 5 (`4.6` is not a legal scorecard entry).
    pub fn from_notation(value: f64) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(StatsError::validation(
                "bowling",
                "overs",
                format!("must be a non-negative number, got {}", value),
            ));
        }

        let scaled = value * 10.0;
        let tenths = scaled.round();
        if (scaled - tenths).abs() > 1e-6 {
            return Err(StatsError::validation(
                "bowling",
                "overs",
                format!("{} has more than one digit after the point", value),
            ));
        }

        let tenths = tenths as u64;
        let (whole, digit) = (tenths / 10, tenths % 10);
        if digit >= BALLS_PER_OVER as u64 {
            return Err(StatsError::validation(
                "bowling",
                "overs",
                format!("{} has ball digit {}, expected 0-5", value, digit),
            ));
        }

        let balls = whole * BALLS_PER_OVER as u64 + digit;
        let balls = u32::try_from(balls).map_err(|_| {
            StatsError::validation("bowling", "overs", format!("{} is out of range", value))
        })?;
        Ok(Self { balls })
    }

    pub fn balls(&self) -> u32 {
        self.balls
    }

    pub fn completed_overs(&self) -> u32 {
        self.balls / BALLS_PER_OVER
    }

    pub fn remainder_balls(&self) -> u32 {
        self.balls % BALLS_PER_OVER
    }

    /// Back to packed notation, e.g. 27 balls -> `4.3`.
    pub fn notation(&self) -> f64 {
        self.completed_overs() as f64 + self.remainder_balls() as f64 / 10.0
    }

    /// Overs as a true fraction (27 balls -> 4.5), used for economy.
    pub fn as_fraction(&self) -> f64 {
        self.balls as f64 / BALLS_PER_OVER as f64
    }

    pub fn is_zero(&self) -> bool {
        self.balls == 0
    }
}

impl TryFrom<f64> for Overs {
    type Error = StatsError;

    fn try_from(value: f64) -> Result<Self> {
        Self::from_notation(value)
    }
}

impl From<Overs> for f64 {
    fn from(overs: Overs) -> f64 {
        overs.notation()
    }
}

impl Add for Overs {
    type Output = Overs;

    fn add(self, rhs: Overs) -> Overs {
        Overs::from_balls(self.balls.saturating_add(rhs.balls))
    }
}

impl Sum for Overs {
    fn sum<I: Iterator<Item = Overs>>(iter: I) -> Overs {
        iter.fold(Overs::default(), |acc, o| acc + o)
    }
}

impl fmt::Display for Overs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.completed_overs(), self.remainder_balls())
    }
}
