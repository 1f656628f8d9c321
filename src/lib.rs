//! Finboard - personal finance dashboard core
//!
//! Classifies spending into four budget buckets (essentials, growth,
//! emergency, leisure), splits monthly income across them by user-chosen
//! percentages, flags category budgets nearing their limits, and aggregates
//! income and expenses for charts. Records live on a REST backend; the only
//! local state is the allocation split and the session.
//!
//! # Architecture
//!
//! - `config`: paths and settings
//! - `error`: error types
//! - `models`: backend records, buckets, periods and money
//! - `services`: pure aggregation over loaded records
//! - `storage`: local key-value file for allocation and session
//! - `api`: backend client behind the `FinanceApi` trait
//! - `state`: `AppState`, which ties fetches, storage and services together
//! - `display` / `export`: terminal output and file exports
//! - `cli`: command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use finboard::config::{paths::FinboardPaths, settings::Settings};
//!
//! let paths = FinboardPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;

pub use error::{FinboardError, FinboardResult};
pub use state::AppState;
