//! Allocation settings store
//!
//! Persists the four bucket percentages under a fixed key in the local
//! store. Loading never fails: anything missing or unreadable yields the
//! default split.

use tracing::{debug, info, warn};

use super::local_store::LocalStore;
use crate::error::{FinboardError, FinboardResult};
use crate::models::AllocationPercentages;

/// Local store key holding the percentages
pub const ALLOCATION_KEY: &str = "budgetAllocation";

#[derive(Debug, Clone)]
pub struct AllocationStore {
    store: LocalStore,
}

impl AllocationStore {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// The saved percentages, or 50/25/15/10
    pub fn load(&self) -> AllocationPercentages {
        match self.store.get::<AllocationPercentages>(ALLOCATION_KEY) {
            Ok(Some(saved)) if validate(&saved).is_ok() => saved,
            Ok(Some(saved)) => {
                warn!(?saved, "Saved allocation is invalid, using defaults");
                AllocationPercentages::default()
            }
            Ok(None) => {
                debug!("No saved allocation, using defaults");
                AllocationPercentages::default()
            }
            Err(e) => {
                warn!(error = %e, "Could not read saved allocation, using defaults");
                AllocationPercentages::default()
            }
        }
    }

    /// Validate the four percentages and persist them
    ///
    /// Nothing is written when validation fails.
    pub fn validate_and_save(
        &self,
        essentials: f64,
        growth: f64,
        emergency: f64,
        leisure: f64,
    ) -> FinboardResult<AllocationPercentages> {
        let percentages = AllocationPercentages::new(essentials, growth, emergency, leisure);
        validate(&percentages)?;

        self.store.set(ALLOCATION_KEY, &percentages)?;
        info!(
            essentials,
            growth, emergency, leisure, "Saved budget allocation"
        );
        Ok(percentages)
    }
}

fn validate(percentages: &AllocationPercentages) -> FinboardResult<()> {
    let values = [
        percentages.essentials,
        percentages.growth,
        percentages.emergency,
        percentages.leisure,
    ];
    if values.iter().any(|v| !v.is_finite()) {
        return Err(FinboardError::Validation(
            "percentages must be finite numbers".into(),
        ));
    }
    if values.iter().any(|v| *v < 0.0) {
        return Err(FinboardError::Validation(
            "percentages cannot be negative".into(),
        ));
    }
    if !percentages.is_balanced() {
        return Err(FinboardError::Validation(
            "percentages must sum to 100".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn allocation_store(dir: &TempDir) -> AllocationStore {
        AllocationStore::new(LocalStore::new(dir.path().join("local_storage.json")))
    }

    #[test]
    fn test_defaults_when_nothing_saved() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            allocation_store(&dir).load(),
            AllocationPercentages::default()
        );
    }

    #[test]
    fn test_valid_quadruple_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = allocation_store(&dir);

        let saved = store.validate_and_save(40.0, 30.0, 20.0, 10.0).unwrap();
        assert_eq!(saved, AllocationPercentages::new(40.0, 30.0, 20.0, 10.0));
        assert_eq!(store.load(), saved);
    }

    #[test]
    fn test_rejected_quadruple_leaves_storage_untouched() {
        let dir = TempDir::new().unwrap();
        let store = allocation_store(&dir);
        store.validate_and_save(40.0, 30.0, 20.0, 10.0).unwrap();

        let err = store.validate_and_save(30.0, 30.0, 30.0, 9.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: percentages must sum to 100"
        );
        assert_eq!(store.load(), AllocationPercentages::new(40.0, 30.0, 20.0, 10.0));
    }

    #[test]
    fn test_rejected_first_save_creates_no_file() {
        let dir = TempDir::new().unwrap();
        let store = allocation_store(&dir);
        assert!(store.validate_and_save(30.0, 30.0, 30.0, 9.0).is_err());
        assert!(!dir.path().join("local_storage.json").exists());
    }

    #[test]
    fn test_negative_and_nan_rejected() {
        let dir = TempDir::new().unwrap();
        let store = allocation_store(&dir);
        assert!(store
            .validate_and_save(110.0, -10.0, 0.0, 0.0)
            .unwrap_err()
            .is_validation());
        assert!(store
            .validate_and_save(f64::NAN, 50.0, 25.0, 25.0)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_malformed_entry_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let store = allocation_store(&dir);
        store
            .store
            .set(ALLOCATION_KEY, &serde_json::json!({"essentials": "lots"}))
            .unwrap();
        assert_eq!(store.load(), AllocationPercentages::default());

        std::fs::write(dir.path().join("local_storage.json"), "garbage").unwrap();
        assert_eq!(store.load(), AllocationPercentages::default());
    }

    #[test]
    fn test_tolerance_accepts_rounding() {
        let dir = TempDir::new().unwrap();
        let store = allocation_store(&dir);
        assert!(store.validate_and_save(33.33, 33.33, 33.34, 0.0).is_ok());
    }
}
