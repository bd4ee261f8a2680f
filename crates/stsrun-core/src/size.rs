//! Validated problem size.

use std::fmt;

use serde::Serialize;

use crate::error::StsError;

/// Number of teams in the tournament. Always a positive even number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ProblemSize(u32);

impl ProblemSize {
    /// Validate a raw size.
    pub fn new(n: u32) -> Result<Self, StsError> {
        if n == 0 || n % 2 != 0 {
            return Err(StsError::InvalidSize(n));
        }
        Ok(Self(n))
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Every even size from 2 through `self`, ascending.
    pub fn up_to(self) -> impl Iterator<Item = ProblemSize> {
        (2..=self.0).step_by(2).map(ProblemSize)
    }
}

impl TryFrom<u32> for ProblemSize {
    type Error = StsError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl fmt::Display for ProblemSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
