//! Daybalance - daily balance score engine
//!
//! Blends physiological recovery metrics (recovery %, sleep performance %,
//! day strain) with phone-usage metrics (social and other screen hours) into
//! one 0-100 score through a deterministic pipeline:
//! normalization → sub-score calculators → weighted composite.
//!
//! ## Modules
//!
//! - **Scoring engine**: pure-function pipeline over validated inputs, with
//!   two formula variants selectable per call
//! - **Adapters**: parse the WHOOP-like and screen-time upstream payloads
//! - **Store / server / sync** (feature-gated I/O): file-backed record store,
//!   the ingestion REST service, and the concurrent upstream sync client

pub mod adapters;
pub mod composite;
pub mod error;
pub mod normalizer;
pub mod pipeline;
pub mod schedule;
pub mod store;
pub mod subscores;
pub mod types;

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "sync")]
pub mod sync;

pub use error::ScoreError;
pub use pipeline::{compute_score, score_payloads, BalanceEngine};
pub use schedule::{waking_hours_between, ClockTime, SleepSchedule};
pub use types::{
    BalanceLabel, FieldValue, RawFields, ScoreBreakdown, ScreenMetrics, ValidatedInputs, Variant,
};

/// Engine version embedded in CLI output
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for CLI output
pub const PRODUCER_NAME: &str = "daybalance";
