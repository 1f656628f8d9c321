//! Category classifier
//!
//! Maps an expense category name to one of the four allocation buckets. The
//! lists use the category names the backend seeds for every user.

use crate::models::BucketKey;

pub const ESSENTIALS: &[&str] = &[
    "Groceries",
    "Bills & Utilities",
    "Healthcare",
    "Transport",
    "Gas & Fuel",
    "Rent",
    "Insurance",
];

pub const GROWTH: &[&str] = &["Investment", "Education"];

pub const EMERGENCY: &[&str] = &["Emergency Fund", "Savings"];

pub const LEISURE: &[&str] = &[
    "Entertainment",
    "Shopping",
    "Food & Dining",
    "Gifts & Donations",
    "Travel",
];

/// The category names listed for a bucket
pub fn bucket_categories(bucket: BucketKey) -> &'static [&'static str] {
    match bucket {
        BucketKey::Essentials => ESSENTIALS,
        BucketKey::Growth => GROWTH,
        BucketKey::Emergency => EMERGENCY,
        BucketKey::Leisure => LEISURE,
    }
}

/// Classify a category name into a bucket
///
/// Lists are checked in [`BucketKey::ALL`] order with an exact, case-sensitive
/// match. Names found in no list fall back to [`BucketKey::DEFAULT`].
pub fn classify_bucket(category_name: &str) -> BucketKey {
    BucketKey::ALL
        .into_iter()
        .find(|bucket| bucket_categories(*bucket).contains(&category_name))
        .unwrap_or(BucketKey::DEFAULT)
}
