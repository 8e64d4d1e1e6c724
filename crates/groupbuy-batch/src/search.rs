//! Relevance search and keyed ordering over record collections.
//!
//! Both return identifiers only; the caller re-joins against its own
//! records. This keeps payloads small and avoids coupling the result shape
//! to the record shape.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use groupbuy_core::record::{MessageRecord, ProcurementRecord};

/// Token scoring weights: title hits dominate, city is a strong signal,
/// description is a weak one. Fixed constants of the search contract.
const TITLE_WEIGHT: u32 = 10;
const CITY_WEIGHT: u32 = 5;
const DESCRIPTION_WEIGHT: u32 = 2;

/// A procurement id with its relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoredId {
    pub id: i64,
    pub score: u32,
}

/// Position and id of a matching message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MessageMatch {
    pub index: usize,
    pub id: i64,
}

/// Field a procurement list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortKey {
    Title,
    Amount,
    Participants,
}

impl SortKey {
    fn parse(key: &str) -> Option<Self> {
        match key {
            "title" => Some(Self::Title),
            "amount" => Some(Self::Amount),
            "participants" => Some(Self::Participants),
            _ => None,
        }
    }
}

/// Score procurements against a free-text query.
///
/// The query is lowercased and split on whitespace; each token scores 10
/// for a title substring hit, 5 for city, 2 for description, accumulated
/// per record. Records scoring 0 are excluded. Results are ordered by
/// score descending; the sort is stable, so ties keep encounter order. A
/// blank query returns an empty list, not every record.
pub fn search_procurements(records: &[ProcurementRecord], query: &str) -> Vec<ScoredId> {
    let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut hits = Vec::new();
    for record in records {
        let title = record.title.to_lowercase();
        let city = record.city.as_deref().unwrap_or_default().to_lowercase();
        let description = record
            .description
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();

        let mut score = 0;
        for token in &tokens {
            if title.contains(token.as_str()) {
                score += TITLE_WEIGHT;
            }
            if city.contains(token.as_str()) {
                score += CITY_WEIGHT;
            }
            if description.contains(token.as_str()) {
                score += DESCRIPTION_WEIGHT;
            }
        }
        if score > 0 {
            hits.push(ScoredId {
                id: record.id,
                score,
            });
        }
    }

    hits.sort_by(|a, b| b.score.cmp(&a.score));
    debug!(query, hits = hits.len(), "procurement search");
    hits
}

/// Case-insensitive substring search over message text.
///
/// Returns `(index, id)` pairs in input order. A blank query returns an
/// empty list.
pub fn search_messages(records: &[MessageRecord], query: &str) -> Vec<MessageMatch> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, message)| message.text.to_lowercase().contains(&needle))
        .map(|(index, message)| MessageMatch {
            index,
            id: message.id,
        })
        .collect()
}

/// Order procurements by a named key, returning ids only.
///
/// `sort_by` is one of `title` (lowercased code-point string compare — an
/// approximation of locale collation that diverges from it on «ё»),
/// `amount` (`current_amount`), or `participants`. An unrecognized key
/// preserves input order. `order == "desc"` reverses the comparator. The
/// sort is stable, so equal keys keep encounter order.
pub fn sort_procurements(records: &[ProcurementRecord], sort_by: &str, order: &str) -> Vec<i64> {
    let Some(key) = SortKey::parse(sort_by) else {
        debug!(sort_by, "unrecognized sort key, preserving input order");
        return records.iter().map(|record| record.id).collect();
    };
    let descending = order == "desc";

    match key {
        SortKey::Title => {
            // Precompute lowercase keys; comparator-time lowercasing would
            // reallocate on every comparison.
            let mut keyed: Vec<(String, i64)> = records
                .iter()
                .map(|record| (record.title.to_lowercase(), record.id))
                .collect();
            keyed.sort_by(|a, b| directed(a.0.cmp(&b.0), descending));
            keyed.into_iter().map(|(_, id)| id).collect()
        }
        SortKey::Amount => {
            let mut sorted: Vec<&ProcurementRecord> = records.iter().collect();
            sorted.sort_by(|a, b| {
                directed(
                    a.current_amount
                        .partial_cmp(&b.current_amount)
                        .unwrap_or(Ordering::Equal),
                    descending,
                )
            });
            sorted.iter().map(|record| record.id).collect()
        }
        SortKey::Participants => {
            let mut sorted: Vec<&ProcurementRecord> = records.iter().collect();
            sorted.sort_by(|a, b| {
                directed(a.participant_count.cmp(&b.participant_count), descending)
            });
            sorted.iter().map(|record| record.id).collect()
        }
    }
}

fn directed(ordering: Ordering, descending: bool) -> Ordering {
    if descending { ordering.reverse() } else { ordering }
}
