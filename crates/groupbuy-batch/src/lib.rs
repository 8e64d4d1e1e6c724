//! One-pass batch processing over group-buy record collections.
//!
//! Each entry point takes a caller-owned collection, computes derived
//! display fields for every record in a single pass, and returns a new
//! collection; input order is preserved and inputs are never mutated. All
//! functions are synchronous and stateless, safe to call from any thread.
//! The [`json`] module exposes the same operations over JSON strings, the
//! surface the embedding web runtime calls.

pub mod bench;
pub mod error;
pub mod json;
pub mod process;
pub mod search;
pub mod stats;

pub use error::BatchError;
pub use process::{
    ProcessedMessage, ProcessedProcurement, calculate_progress, process_messages,
    process_procurements,
};
pub use search::{
    MessageMatch, ScoredId, search_messages, search_procurements, sort_procurements,
};
pub use stats::{ProcurementStats, aggregate_procurement_stats};
