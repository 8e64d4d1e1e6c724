//! Rollup statistics over a procurement collection.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use groupbuy_core::record::{ProcurementRecord, ProcurementStatus};

use crate::process::calculate_progress;

/// Dashboard rollup for a set of procurements.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcurementStats {
    pub total_count: u64,
    pub active_count: u64,
    pub total_amount: f64,
    pub total_target: f64,
    /// Collected vs. target across the whole set, clamped to 0–100.
    pub overall_progress: i32,
    /// Mean participant count, rounded to one decimal.
    pub avg_participants: f64,
    /// Distinct non-empty cities in first-occurrence order.
    pub cities: Vec<String>,
    /// Status code → record count; absent/unrecognized codes bucket under
    /// `"unknown"`.
    pub by_status: BTreeMap<String, u64>,
}

/// Aggregate the whole collection in one pass.
///
/// An empty input yields the all-zero stats value; none of the ratio
/// fields divide by zero.
pub fn aggregate_procurement_stats(records: &[ProcurementRecord]) -> ProcurementStats {
    let mut stats = ProcurementStats::default();
    let mut participants_total: u64 = 0;

    for record in records {
        stats.total_count += 1;
        if record.status == ProcurementStatus::Active {
            stats.active_count += 1;
        }
        stats.total_amount += record.current_amount;
        stats.total_target += record.target_amount;
        participants_total += u64::from(record.participant_count);

        *stats
            .by_status
            .entry(record.status.as_str().to_string())
            .or_insert(0) += 1;

        if let Some(city) = record.city.as_deref()
            && !city.is_empty()
            && !stats.cities.iter().any(|known| known == city)
        {
            stats.cities.push(city.to_string());
        }
    }

    stats.overall_progress = calculate_progress(stats.total_amount, stats.total_target);
    if stats.total_count > 0 {
        let mean = participants_total as f64 / stats.total_count as f64;
        stats.avg_participants = (mean * 10.0).round() / 10.0;
    }

    debug!(
        total = stats.total_count,
        active = stats.active_count,
        cities = stats.cities.len(),
        "aggregated procurement stats"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        status: ProcurementStatus,
        current: f64,
        target: f64,
        participants: u32,
        city: &str,
    ) -> ProcurementRecord {
        ProcurementRecord {
            status,
            current_amount: current,
            target_amount: target,
            participant_count: participants,
            city: (!city.is_empty()).then(|| city.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn empty_input_yields_zero_stats() {
        let stats = aggregate_procurement_stats(&[]);
        assert_eq!(stats, ProcurementStats::default());
        assert_eq!(stats.overall_progress, 0);
        assert_eq!(stats.avg_participants, 0.0);
        assert!(stats.cities.is_empty());
        assert!(stats.by_status.is_empty());
    }

    #[test]
    fn counts_sums_and_progress() {
        let records = vec![
            record(ProcurementStatus::Active, 5000.0, 10000.0, 10, "Барнаул"),
            record(ProcurementStatus::Active, 2500.0, 5000.0, 5, "Москва"),
            record(ProcurementStatus::Completed, 10000.0, 10000.0, 30, "Барнаул"),
        ];
        let stats = aggregate_procurement_stats(&records);
        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.active_count, 2);
        assert_eq!(stats.total_amount, 17500.0);
        assert_eq!(stats.total_target, 25000.0);
        assert_eq!(stats.overall_progress, 70);
        assert_eq!(stats.avg_participants, 15.0);
    }

    #[test]
    fn avg_participants_one_decimal() {
        let records = vec![
            record(ProcurementStatus::Draft, 0.0, 1.0, 1, ""),
            record(ProcurementStatus::Draft, 0.0, 1.0, 2, ""),
            record(ProcurementStatus::Draft, 0.0, 1.0, 2, ""),
        ];
        // mean 5/3 = 1.666… → 1.7
        assert_eq!(aggregate_procurement_stats(&records).avg_participants, 1.7);
    }

    #[test]
    fn overall_progress_clamped_when_overfunded() {
        let records = vec![record(ProcurementStatus::Active, 30000.0, 10000.0, 1, "")];
        assert_eq!(aggregate_procurement_stats(&records).overall_progress, 100);
    }

    #[test]
    fn zero_target_total_guard() {
        let records = vec![record(ProcurementStatus::Active, 500.0, 0.0, 1, "")];
        assert_eq!(aggregate_procurement_stats(&records).overall_progress, 0);
    }

    #[test]
    fn cities_deduped_in_first_occurrence_order() {
        let records = vec![
            record(ProcurementStatus::Active, 0.0, 1.0, 0, "Барнаул"),
            record(ProcurementStatus::Active, 0.0, 1.0, 0, ""),
            record(ProcurementStatus::Active, 0.0, 1.0, 0, "Москва"),
            record(ProcurementStatus::Active, 0.0, 1.0, 0, "Барнаул"),
        ];
        let stats = aggregate_procurement_stats(&records);
        assert_eq!(stats.cities, vec!["Барнаул", "Москва"]);
    }

    #[test]
    fn by_status_buckets_including_unknown() {
        let records = vec![
            record(ProcurementStatus::Active, 0.0, 1.0, 0, ""),
            record(ProcurementStatus::Active, 0.0, 1.0, 0, ""),
            record(ProcurementStatus::Unknown, 0.0, 1.0, 0, ""),
            record(ProcurementStatus::Draft, 0.0, 1.0, 0, ""),
        ];
        let stats = aggregate_procurement_stats(&records);
        assert_eq!(stats.by_status["active"], 2);
        assert_eq!(stats.by_status["unknown"], 1);
        assert_eq!(stats.by_status["draft"], 1);
        assert_eq!(stats.by_status.len(), 3);
    }
}
