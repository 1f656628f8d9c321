//! Spending buckets and the derived monthly allocation
//!
//! Income for the month is split across four fixed buckets by user-set
//! percentages. `MonthlyBudget` is derived data: it is recomputed from the
//! fetched records every time and never sent to the backend.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use super::period::Period;

/// Allowed drift from 100 when checking that the percentages add up
pub const ALLOCATION_TOLERANCE: f64 = 0.01;

/// Percentage used at which a bucket turns from ok to warning
pub const WARNING_THRESHOLD: f64 = 80.0;

/// One of the four fixed allocation buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketKey {
    Essentials,
    Growth,
    Emergency,
    Leisure,
}

impl BucketKey {
    /// Classification order; the first bucket listing a category wins
    pub const ALL: [BucketKey; 4] = [
        BucketKey::Essentials,
        BucketKey::Growth,
        BucketKey::Emergency,
        BucketKey::Leisure,
    ];

    /// Where categories listed in no bucket end up
    pub const DEFAULT: BucketKey = BucketKey::Leisure;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Essentials => "essentials",
            Self::Growth => "growth",
            Self::Emergency => "emergency",
            Self::Leisure => "leisure",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Essentials => "Essentials",
            Self::Growth => "Growth",
            Self::Emergency => "Emergency",
            Self::Leisure => "Leisure",
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-configured share of monthly income per bucket, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationPercentages {
    pub essentials: f64,
    pub growth: f64,
    pub emergency: f64,
    pub leisure: f64,
}

impl AllocationPercentages {
    pub const fn new(essentials: f64, growth: f64, emergency: f64, leisure: f64) -> Self {
        Self {
            essentials,
            growth,
            emergency,
            leisure,
        }
    }

    pub fn get(&self, bucket: BucketKey) -> f64 {
        match bucket {
            BucketKey::Essentials => self.essentials,
            BucketKey::Growth => self.growth,
            BucketKey::Emergency => self.emergency,
            BucketKey::Leisure => self.leisure,
        }
    }

    pub fn sum(&self) -> f64 {
        self.essentials + self.growth + self.emergency + self.leisure
    }

    /// True when the four shares add up to 100 within [`ALLOCATION_TOLERANCE`]
    pub fn is_balanced(&self) -> bool {
        (self.sum() - 100.0).abs() <= ALLOCATION_TOLERANCE
    }
}

impl Default for AllocationPercentages {
    fn default() -> Self {
        Self::new(50.0, 25.0, 15.0, 10.0)
    }
}

/// Health of one bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketStatus {
    Ok,
    Warning,
    Exceeded,
}

impl BucketStatus {
    pub fn from_percentage_used(percentage_used: f64) -> Self {
        if percentage_used >= 100.0 {
            Self::Exceeded
        } else if percentage_used >= WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Ok
        }
    }
}

impl fmt::Display for BucketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Exceeded => "exceeded",
        };
        f.write_str(s)
    }
}

/// Allocated vs spent for a single bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketAllocation {
    pub allocated: Money,
    pub spent: Money,
    /// The user-set share of income, in percent
    pub percentage: f64,
}

impl BucketAllocation {
    pub fn remaining(&self) -> Money {
        self.allocated - self.spent
    }

    /// Spent as a percentage of allocated; zero when nothing is allocated
    pub fn percentage_used(&self) -> f64 {
        if self.allocated.is_zero() {
            return 0.0;
        }
        let used = self.spent.value() / self.allocated.value() * 100.0;
        if used.is_finite() {
            used
        } else {
            0.0
        }
    }

    pub fn status(&self) -> BucketStatus {
        BucketStatus::from_percentage_used(self.percentage_used())
    }
}

/// The four buckets side by side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Buckets {
    pub essentials: BucketAllocation,
    pub growth: BucketAllocation,
    pub emergency: BucketAllocation,
    pub leisure: BucketAllocation,
}

impl Buckets {
    pub fn get(&self, bucket: BucketKey) -> &BucketAllocation {
        match bucket {
            BucketKey::Essentials => &self.essentials,
            BucketKey::Growth => &self.growth,
            BucketKey::Emergency => &self.emergency,
            BucketKey::Leisure => &self.leisure,
        }
    }

    pub fn get_mut(&mut self, bucket: BucketKey) -> &mut BucketAllocation {
        match bucket {
            BucketKey::Essentials => &mut self.essentials,
            BucketKey::Growth => &mut self.growth,
            BucketKey::Emergency => &mut self.emergency,
            BucketKey::Leisure => &mut self.leisure,
        }
    }

    /// Buckets in classification order
    pub fn iter(&self) -> impl Iterator<Item = (BucketKey, &BucketAllocation)> {
        BucketKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

/// Income allocation and bucket spending for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBudget {
    pub period: Period,
    pub total_income: Money,
    pub buckets: Buckets,
}

impl MonthlyBudget {
    pub fn total_spent(&self) -> Money {
        self.buckets.iter().map(|(_, b)| b.spent).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(allocated: f64, spent: f64) -> BucketAllocation {
        BucketAllocation {
            allocated: Money::new(allocated),
            spent: Money::new(spent),
            percentage: 10.0,
        }
    }

    #[test]
    fn test_default_percentages() {
        let p = AllocationPercentages::default();
        assert_eq!(p.get(BucketKey::Essentials), 50.0);
        assert_eq!(p.get(BucketKey::Leisure), 10.0);
        assert!(p.is_balanced());
    }

    #[test]
    fn test_balance_tolerance() {
        assert!(AllocationPercentages::new(33.33, 33.33, 33.34, 0.0).is_balanced());
        assert!(AllocationPercentages::new(50.005, 25.0, 15.0, 10.0).is_balanced());
        assert!(!AllocationPercentages::new(30.0, 30.0, 30.0, 9.0).is_balanced());
        assert!(!AllocationPercentages::new(50.02, 25.0, 15.0, 10.0).is_balanced());
    }

    #[test]
    fn test_percentage_used_guards_zero_allocation() {
        let empty = bucket(0.0, 45.0);
        assert_eq!(empty.percentage_used(), 0.0);
        assert_eq!(empty.status(), BucketStatus::Ok);
        assert_eq!(empty.remaining().value(), -45.0);
    }

    #[test]
    fn test_status_boundaries() {
        assert_eq!(bucket(100.0, 79.99).status(), BucketStatus::Ok);
        assert_eq!(bucket(100.0, 80.0).status(), BucketStatus::Warning);
        assert_eq!(bucket(100.0, 99.99).status(), BucketStatus::Warning);
        assert_eq!(bucket(100.0, 100.0).status(), BucketStatus::Exceeded);
        assert_eq!(bucket(100.0, 250.0).status(), BucketStatus::Exceeded);
    }

    #[test]
    fn test_bucket_key_serialization() {
        assert_eq!(
            serde_json::to_string(&BucketKey::Emergency).unwrap(),
            "\"emergency\""
        );
        assert_eq!(BucketKey::DEFAULT, BucketKey::Leisure);
    }

    #[test]
    fn test_allocation_json_shape() {
        let json = serde_json::to_value(AllocationPercentages::default()).unwrap();
        assert_eq!(json["essentials"], 50.0);
        assert_eq!(json["growth"], 25.0);
        assert_eq!(json["emergency"], 15.0);
        assert_eq!(json["leisure"], 10.0);
    }
}
