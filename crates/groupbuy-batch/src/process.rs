//! Derived-field computation for procurement and message collections.
//!
//! Procurement processing is an independent per-record map; batching exists
//! to amortize call overhead, not for correctness. Message processing is a
//! left-to-right fold that tracks calendar-day boundaries, so its input
//! must already be in chronological order — no sorting happens here.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

use groupbuy_core::format::{
    days_until, format_currency, format_message_date, format_time,
};
use groupbuy_core::record::{MessageRecord, ProcurementRecord};
use groupbuy_core::text::format_message_text;

/// A procurement with its derived display fields attached.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedProcurement {
    #[serde(flatten)]
    pub record: ProcurementRecord,
    /// Funding progress, clamped to 0–100.
    pub progress: i32,
    /// Whole days to the deadline; absent when the record has none.
    pub days_left: Option<i64>,
    pub formatted_current: String,
    pub formatted_target: String,
}

/// A message reduced to what the chat view renders.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedMessage {
    pub id: i64,
    /// Raw input text, untouched.
    pub text: String,
    /// HTML-safe, linkified text ready for innerHTML-style rendering.
    pub formatted_text: String,
    pub is_own: bool,
    pub is_system: bool,
    pub formatted_time: String,
    pub sender_name: String,
    /// Day label carried by the first message of each calendar day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_divider: Option<String>,
}

/// Funding percentage: `current/target`, rounded half-up, clamped to
/// 0–100. A non-positive target reads as 0 — over-funded records cap at
/// 100 rather than exceeding it.
pub fn calculate_progress(current: f64, target: f64) -> i32 {
    if target <= 0.0 {
        return 0;
    }
    ((current / target * 100.0).round() as i32).clamp(0, 100)
}

/// Compute derived fields for a whole procurement collection in one pass.
///
/// Output order matches input order. Records with missing numeric fields
/// were already defaulted to zero at deserialization and are processed
/// like any other, never skipped.
pub fn process_procurements(
    records: &[ProcurementRecord],
    now: DateTime<Utc>,
) -> Vec<ProcessedProcurement> {
    debug!(count = records.len(), "processing procurement batch");
    records
        .iter()
        .map(|record| ProcessedProcurement {
            progress: calculate_progress(record.current_amount, record.target_amount),
            days_left: record.deadline.map(|deadline| days_until(deadline, now)),
            formatted_current: format_currency(record.current_amount),
            formatted_target: format_currency(record.target_amount),
            record: record.clone(),
        })
        .collect()
}

/// Process a chronologically ordered message list in one scan.
///
/// A `date_divider` is emitted on the first message of every calendar day
/// encountered, including the very first message. Day comparison is
/// date-only truncation in UTC, not elapsed duration. Messages without a
/// parseable timestamp render an empty time and never open a day group.
pub fn process_messages(
    records: &[MessageRecord],
    current_user_id: i64,
    now: DateTime<Utc>,
) -> Vec<ProcessedMessage> {
    debug!(count = records.len(), current_user_id, "processing message batch");
    let mut last_day: Option<NaiveDate> = None;
    records
        .iter()
        .map(|message| {
            let date_divider = match message.created_at {
                Some(created) => {
                    let day = created.date_naive();
                    if last_day != Some(day) {
                        last_day = Some(day);
                        Some(format_message_date(created, now))
                    } else {
                        None
                    }
                }
                None => None,
            };

            ProcessedMessage {
                id: message.id,
                text: message.text.clone(),
                formatted_text: format_message_text(&message.text),
                is_own: message
                    .sender
                    .as_ref()
                    .is_some_and(|sender| sender.id == current_user_id),
                is_system: message.message_type == "system",
                formatted_time: message
                    .created_at
                    .map(|created| format_time(created, now))
                    .unwrap_or_default(),
                sender_name: message
                    .sender
                    .as_ref()
                    .map(|sender| sender.first_name.clone())
                    .unwrap_or_default(),
                date_divider,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use groupbuy_core::record::{ProcurementStatus, Sender};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap()
    }

    fn procurement(current: f64, target: f64) -> ProcurementRecord {
        ProcurementRecord {
            id: 1,
            title: "Мёд".to_string(),
            current_amount: current,
            target_amount: target,
            ..Default::default()
        }
    }

    fn message(id: i64, at: DateTime<Utc>, sender_id: Option<i64>) -> MessageRecord {
        MessageRecord {
            id,
            sender: sender_id.map(|id| Sender {
                id,
                first_name: "Анна".to_string(),
                last_name: None,
            }),
            text: format!("сообщение {id}"),
            created_at: Some(at),
            ..Default::default()
        }
    }

    #[test]
    fn progress_bounds() {
        assert_eq!(calculate_progress(0.0, 1000.0), 0);
        assert_eq!(calculate_progress(1000.0, 1000.0), 100);
        assert_eq!(calculate_progress(2000.0, 1000.0), 100);
        assert_eq!(calculate_progress(500.0, 1000.0), 50);
        for current in [0.0, 1.0, 999.0, 1500.0] {
            let p = calculate_progress(current, 1000.0);
            assert!((0..=100).contains(&p));
        }
    }

    #[test]
    fn progress_zero_target_guard() {
        assert_eq!(calculate_progress(500.0, 0.0), 0);
        assert_eq!(calculate_progress(500.0, -10.0), 0);
    }

    #[test]
    fn progress_rounds_half_up() {
        assert_eq!(calculate_progress(125.0, 1000.0), 13); // 12.5
        assert_eq!(calculate_progress(124.0, 1000.0), 12); // 12.4
    }

    #[test]
    fn procurement_batch_derives_all_fields() {
        let mut record = procurement(1500.0, 10000.0);
        record.deadline = Some(now() + Duration::days(3));
        record.status = ProcurementStatus::Active;
        let processed = process_procurements(&[record], now());
        assert_eq!(processed.len(), 1);
        let p = &processed[0];
        assert_eq!(p.progress, 15);
        assert_eq!(p.days_left, Some(3));
        assert_eq!(p.formatted_current, "1 500 ₽");
        assert_eq!(p.formatted_target, "10 000 ₽");
    }

    #[test]
    fn procurement_without_deadline_has_no_days_left() {
        let processed = process_procurements(&[procurement(0.0, 100.0)], now());
        assert_eq!(processed[0].days_left, None);
    }

    #[test]
    fn procurement_batch_preserves_order() {
        let records: Vec<ProcurementRecord> = (0..5)
            .map(|i| ProcurementRecord {
                id: i,
                ..Default::default()
            })
            .collect();
        let processed = process_procurements(&records, now());
        let ids: Vec<i64> = processed.iter().map(|p| p.record.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn defaulted_record_processes_without_skipping() {
        let processed = process_procurements(&[ProcurementRecord::default()], now());
        assert_eq!(processed.len(), 1);
        assert_eq!(processed[0].progress, 0);
        assert_eq!(processed[0].formatted_current, "0 ₽");
    }

    #[test]
    fn batch_processing_is_deterministic() {
        let mut record = procurement(333.0, 1000.0);
        record.deadline = Some(now() + Duration::days(2));
        let a = process_procurements(&[record.clone()], now());
        let b = process_procurements(&[record], now());
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn divider_once_per_day() {
        let day1 = Utc.with_ymd_and_hms(2026, 8, 4, 9, 0, 0).unwrap();
        let msgs = vec![
            message(1, day1, Some(3)),
            message(2, day1 + Duration::hours(2), Some(3)),
            message(3, now(), Some(4)),
        ];
        let processed = process_messages(&msgs, 3, now());
        assert_eq!(processed[0].date_divider.as_deref(), Some("Вчера"));
        assert_eq!(processed[1].date_divider, None);
        assert_eq!(processed[2].date_divider.as_deref(), Some("Сегодня"));
    }

    #[test]
    fn first_message_always_opens_a_group() {
        let processed = process_messages(&[message(1, now(), None)], 0, now());
        assert_eq!(processed[0].date_divider.as_deref(), Some("Сегодня"));
    }

    #[test]
    fn own_and_system_flags() {
        let mut system = message(2, now(), None);
        system.message_type = "system".to_string();
        let msgs = vec![message(1, now(), Some(3)), system, message(3, now(), Some(4))];
        let processed = process_messages(&msgs, 3, now());
        assert!(processed[0].is_own);
        assert!(!processed[0].is_system);
        assert!(processed[1].is_system);
        assert!(!processed[1].is_own);
        assert!(!processed[2].is_own);
    }

    #[test]
    fn sender_name_or_empty() {
        let msgs = vec![message(1, now(), Some(3)), message(2, now(), None)];
        let processed = process_messages(&msgs, 0, now());
        assert_eq!(processed[0].sender_name, "Анна");
        assert_eq!(processed[1].sender_name, "");
    }

    #[test]
    fn message_text_is_enriched_and_raw_kept() {
        let mut msg = message(1, now(), Some(3));
        msg.text = "a\nb http://x.co".to_string();
        let processed = process_messages(&[msg], 0, now());
        assert_eq!(processed[0].text, "a\nb http://x.co");
        assert!(processed[0].formatted_text.contains("<br>"));
        assert!(processed[0].formatted_text.contains("<a href=\"http://x.co\""));
    }

    #[test]
    fn undated_message_never_opens_group() {
        let mut undated = message(2, now(), None);
        undated.created_at = None;
        let msgs = vec![message(1, now(), None), undated, message(3, now(), None)];
        let processed = process_messages(&msgs, 0, now());
        assert!(processed[0].date_divider.is_some());
        assert!(processed[1].date_divider.is_none());
        assert_eq!(processed[1].formatted_time, "");
        // Same day as message 1, so no new divider either.
        assert!(processed[2].date_divider.is_none());
    }
}
