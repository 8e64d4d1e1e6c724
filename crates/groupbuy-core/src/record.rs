//! Caller-owned domain records as they arrive from the API layer.
//!
//! Records are JSON-shaped and frequently partial: amounts may be decimal
//! strings, timestamps may be RFC 3339 strings or epoch milliseconds, and
//! whole fields may be missing. Deserialization substitutes the documented
//! default for every absent or unparseable field instead of failing, so one
//! bad record can never abort a batch. Only a payload of the wrong overall
//! shape is rejected, and that happens at the call boundary, not here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Lifecycle state of a procurement.
///
/// Unrecognized or absent codes collapse into [`Unknown`](Self::Unknown)
/// rather than failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcurementStatus {
    Draft,
    Active,
    Stopped,
    Payment,
    Completed,
    Cancelled,
    #[default]
    Unknown,
}

impl ProcurementStatus {
    /// Parse a status code; anything outside the fixed set is `Unknown`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "draft" => Self::Draft,
            "active" => Self::Active,
            "stopped" => Self::Stopped,
            "payment" => Self::Payment,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Stopped => "stopped",
            Self::Payment => "payment",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }
}

impl<'de> Deserialize<'de> for ProcurementStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = Option::<String>::deserialize(deserializer)?;
        Ok(code.as_deref().map(Self::from_code).unwrap_or_default())
    }
}

/// A group-buy procurement as the API ships it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcurementRecord {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub status: ProcurementStatus,
    /// Collected so far. May exceed `target_amount` (over-funded).
    #[serde(default, deserialize_with = "lenient::amount")]
    pub current_amount: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub target_amount: f64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub participant_count: u32,
    #[serde(default, with = "lenient::timestamp")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Message author. A message without one is of system origin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sender {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// A chat message as the API ships it. `text` is raw and untrusted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    #[serde(default)]
    pub id: i64,
    #[serde(default, alias = "procurement")]
    pub procurement_id: i64,
    #[serde(default, rename = "user")]
    pub sender: Option<Sender>,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_message_type")]
    pub message_type: String,
    #[serde(default, with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Default for MessageRecord {
    fn default() -> Self {
        Self {
            id: 0,
            procurement_id: 0,
            sender: None,
            text: String::new(),
            message_type: default_message_type(),
            created_at: None,
        }
    }
}

fn default_message_type() -> String {
    "text".to_string()
}

/// Lenient field-level (de)serialization.
///
/// The API layer serializes decimals as strings and has shipped both ISO
/// timestamps and epoch milliseconds over time; display tooling has to take
/// whichever arrives.
mod lenient {
    use serde::{Deserialize, Deserializer};

    /// Amount from a JSON number or numeric string; anything else is 0.
    pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        let value = match Option::<Repr>::deserialize(deserializer)? {
            Some(Repr::Number(n)) if n.is_finite() => n,
            Some(Repr::Text(s)) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        };
        Ok(value)
    }

    /// Non-negative count from a JSON number or numeric string; else 0.
    pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = amount(deserializer)?;
        if raw <= 0.0 {
            return Ok(0);
        }
        Ok(raw.trunc() as u32)
    }

    pub mod timestamp {
        use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Millis(f64),
            Text(String),
        }

        /// Instant from RFC 3339, a bare `YYYY-MM-DDTHH:MM:SS[.f]` (assumed
        /// UTC), or epoch milliseconds. An unparseable value is `None`.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Ok(Option::<Repr>::deserialize(deserializer)?.and_then(parse))
        }

        pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(instant) => serializer.serialize_str(&instant.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        fn parse(repr: Repr) -> Option<DateTime<Utc>> {
            match repr {
                Repr::Millis(ms) if ms.is_finite() => {
                    Utc.timestamp_millis_opt(ms as i64).single()
                }
                Repr::Millis(_) => None,
                Repr::Text(s) => parse_text(&s),
            }
        }

        fn parse_text(s: &str) -> Option<DateTime<Utc>> {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            // Offset-less timestamps from older API builds.
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
                .ok()
                .map(|naive| Utc.from_utc_datetime(&naive))
        }
    }
}
