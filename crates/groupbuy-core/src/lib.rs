//! Core domain records, validators, and display formatters for group-buy data.
//!
//! Everything here is a pure function over caller-owned values: records come
//! in, new values go out, nothing is mutated or retained across calls.
//! Operations that depend on the current instant take it as an explicit
//! parameter so callers can pin the clock in tests.

pub mod format;
pub mod ident;
pub mod record;
pub mod text;
pub mod validate;

pub use record::{MessageRecord, ProcurementRecord, ProcurementStatus, Sender};
pub use validate::{ValidationErrors, validate_email, validate_phone, validate_procurement_form};
