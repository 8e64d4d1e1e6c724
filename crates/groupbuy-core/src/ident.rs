//! Ephemeral identifier for anonymous web-chat participants.

use chrono::{DateTime, Utc};
use rand::Rng;

/// Generate a platform user id like `web_1754395200000_483920114`.
///
/// Combines the epoch-millisecond timestamp with a random component below
/// 10⁹. Unique enough for tagging an anonymous websocket session; not a
/// security boundary and not collision-free.
pub fn generate_platform_user_id(now: DateTime<Utc>) -> String {
    let random: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("web_{}_{}", now.timestamp_millis(), random)
}

/// [`generate_platform_user_id`] against the system clock.
pub fn generate_platform_user_id_now() -> String {
    generate_platform_user_id(Utc::now())
}
