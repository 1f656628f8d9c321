//! Strongly-typed ID wrappers for backend entities
//!
//! The backend hands out numeric ids. Wrapping them keeps an expense id from
//! being passed where a budget id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            /// Accepts "12" as well as the displayed form "#12"
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix('#').unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(ExpenseId);
define_id!(IncomeId);
define_id!(CategoryId);
define_id!(IncomeCategoryId);
define_id!(BudgetId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let id = ExpenseId::new(42);
        assert_eq!(id.to_string(), "#42");
        assert_eq!("#42".parse::<ExpenseId>().unwrap(), id);
        assert_eq!(" 42 ".parse::<ExpenseId>().unwrap(), id);
        assert!("abc".parse::<ExpenseId>().is_err());
    }

    #[test]
    fn test_serialization_is_bare_number() {
        let id = CategoryId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        let back: CategoryId = serde_json::from_str("7").unwrap();
        assert_eq!(back, id);
    }
}
