//! `Usdc6` — a 6-decimal fixed-point integer, matching §3's
//! "price (6-decimal integer)" column.

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::Add;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Usdc6(pub u64);

impl Usdc6 {
    pub const ZERO: Usdc6 = Usdc6(0);

    pub fn from_micros(micros: u64) -> Self {
        Usdc6(micros)
    }

    pub fn micros(self) -> u64 {
        self.0
    }

    /// Decimal rendering, e.g. `Usdc6(1_500_000) -> "1.500000"`.
    pub fn to_decimal_string(self) -> String {
        format!("{}.{:06}", self.0 / 1_000_000, self.0 % 1_000_000)
    }
}

impl Add for Usdc6 {
    type Output = Usdc6;

    fn add(self, rhs: Self) -> Self::Output {
        Usdc6(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Usdc6 {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Usdc6::ZERO, Add::add)
    }
}

#[cfg(test)]
#[path = "money_tests.rs"]
mod tests;
