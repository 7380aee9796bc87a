use anyhow::{bail, Result};

/// Winning party of a congressional district.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Party {
    Democratic,
    Republican,
}

impl Party {
    /// Parties in display order.
    pub const ALL: [Party; 2] = [Party::Democratic, Party::Republican];

    /// Parse the single-letter code used in the dataset.
    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim() {
            "D" => Ok(Party::Democratic),
            "R" => Ok(Party::Republican),
            other => bail!("[Party::from_code] Unknown party code {other:?}, expected \"D\" or \"R\""),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Party::Democratic => "D",
            Party::Republican => "R",
        }
    }

    /// Multiplier giving the diverging map its direction: R positive, D negative.
    pub fn sign(&self) -> i8 {
        match self {
            Party::Democratic => -1,
            Party::Republican => 1,
        }
    }

    #[inline] pub fn index(&self) -> usize { *self as usize }
}
