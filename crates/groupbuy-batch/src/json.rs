//! JSON-string call surface.
//!
//! The embedding web runtime hands collections across the boundary as JSON
//! strings and parses JSON back, so each operation here is a thin
//! string-in/string-out wrapper over the typed functions. A payload that
//! is not a JSON array is reported as an explicit [`BatchError`]; a record
//! with missing or malformed fields is not an error — the record model
//! substitutes defaults field by field.

use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use groupbuy_core::record::{MessageRecord, ProcurementRecord};
use groupbuy_core::validate::validate_procurement_form;

use crate::error::BatchError;
use crate::{process, search, stats};

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn parse_records<T: DeserializeOwned>(payload: &str) -> Result<Vec<T>, BatchError> {
    let value: Value = serde_json::from_str(payload)?;
    if !value.is_array() {
        return Err(BatchError::NotAnArray {
            found: json_type(&value),
        });
    }
    Ok(serde_json::from_value(value)?)
}

/// [`process::process_procurements`] over a JSON array.
pub fn process_procurements_json(payload: &str, now: DateTime<Utc>) -> Result<String, BatchError> {
    let records: Vec<ProcurementRecord> = parse_records(payload)?;
    let processed = process::process_procurements(&records, now);
    Ok(serde_json::to_string(&processed)?)
}

/// [`process::process_messages`] over a JSON array.
pub fn process_messages_json(
    payload: &str,
    current_user_id: i64,
    now: DateTime<Utc>,
) -> Result<String, BatchError> {
    let records: Vec<MessageRecord> = parse_records(payload)?;
    let processed = process::process_messages(&records, current_user_id, now);
    Ok(serde_json::to_string(&processed)?)
}

/// [`search::search_procurements`] over a JSON array.
pub fn search_procurements_json(payload: &str, query: &str) -> Result<String, BatchError> {
    let records: Vec<ProcurementRecord> = parse_records(payload)?;
    Ok(serde_json::to_string(&search::search_procurements(
        &records, query,
    ))?)
}

/// [`search::search_messages`] over a JSON array.
pub fn search_messages_json(payload: &str, query: &str) -> Result<String, BatchError> {
    let records: Vec<MessageRecord> = parse_records(payload)?;
    Ok(serde_json::to_string(&search::search_messages(
        &records, query,
    ))?)
}

/// [`search::sort_procurements`] over a JSON array; returns a JSON array
/// of ids.
pub fn sort_procurements_json(
    payload: &str,
    sort_by: &str,
    order: &str,
) -> Result<String, BatchError> {
    let records: Vec<ProcurementRecord> = parse_records(payload)?;
    Ok(serde_json::to_string(&search::sort_procurements(
        &records, sort_by, order,
    ))?)
}

/// [`stats::aggregate_procurement_stats`] over a JSON array.
pub fn aggregate_procurement_stats_json(payload: &str) -> Result<String, BatchError> {
    let records: Vec<ProcurementRecord> = parse_records(payload)?;
    Ok(serde_json::to_string(&stats::aggregate_procurement_stats(
        &records,
    ))?)
}

/// Form validation with the deadline as epoch milliseconds, returning the
/// error map as a JSON object (`{}` when valid).
///
/// A non-finite or out-of-range `deadline_ms` means "no deadline entered"
/// and produces no deadline error, matching the blank date input of the
/// form it serves.
pub fn validate_procurement_form_json(
    title: &str,
    description: &str,
    city: &str,
    target_amount: f64,
    deadline_ms: f64,
    now: DateTime<Utc>,
) -> Result<String, BatchError> {
    let deadline = deadline_ms
        .is_finite()
        .then(|| Utc.timestamp_millis_opt(deadline_ms as i64).single())
        .flatten();
    let errors = validate_procurement_form(title, description, city, target_amount, deadline, now);
    debug!(valid = errors.is_valid(), "form validated");
    Ok(serde_json::to_string(&errors)?)
}
