//! Self-timing helper for the batch path.
//!
//! Lets an embedding runtime measure what one batch pass costs on the
//! deployment hardware and decide how to schedule large batches. Not a
//! correctness surface and not a substitute for profiling.

use std::hint::black_box;
use std::time::Instant;

use chrono::{Duration, Utc};
use tracing::debug;

use groupbuy_core::record::{ProcurementRecord, ProcurementStatus};

use crate::process::process_procurements;

const CITIES: [&str; 4] = ["Барнаул", "Москва", "Новосибирск", "Томск"];

/// Synthesize `count` procurement records and run one full batch pass,
/// returning the elapsed time in milliseconds.
pub fn benchmark_batch_processing(count: usize) -> f64 {
    let now = Utc::now();
    let records: Vec<ProcurementRecord> = (0..count)
        .map(|i| ProcurementRecord {
            id: i as i64,
            title: format!("Закупка №{i}"),
            description: Some("Синтетическая запись для замера".to_string()),
            city: Some(CITIES[i % CITIES.len()].to_string()),
            status: ProcurementStatus::Active,
            current_amount: (i as f64) * 137.5,
            target_amount: 100_000.0,
            participant_count: (i % 50) as u32,
            deadline: Some(now + Duration::days((i % 30) as i64 + 1)),
            ..Default::default()
        })
        .collect();

    let start = Instant::now();
    let processed = process_procurements(&records, now);
    black_box(processed);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    debug!(count, elapsed_ms, "batch benchmark complete");
    elapsed_ms
}
