//! Display formatting for amounts, instants, and user identity.
//!
//! Output strings are the Russian-locale forms the chat and cabinet UIs
//! render verbatim. The avatar hash and the day-bucketing thresholds are
//! presentation-visible contracts: a hybrid deployment may run this library
//! next to an interpreted implementation and compare results, so both must
//! be reproduced exactly, not approximated.

use chrono::{DateTime, Datelike, Utc};

use crate::record::ProcurementStatus;

/// Fixed avatar palette. Indexed by the name hash, so both the order and
/// the length are part of the contract.
pub const AVATAR_COLORS: [&str; 8] = [
    "#e17076", "#faa774", "#a695e7", "#7bc862", "#6ec9cb", "#65aadd", "#ee7aae", "#f5a623",
];

/// Month names in the genitive case, as a date like «5 августа» reads.
const MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

const DAY_MS: i64 = 86_400_000;

// ── Amounts ──

/// Format an amount as Russian-locale rubles.
///
/// Integer part grouped in threes with spaces, comma decimal separator,
/// 0–2 fraction digits with a trailing zero trimmed: `1234.5` →
/// `"1 234,5 ₽"`. Non-finite amounts render as 0.
pub fn format_currency(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let negative = amount < 0.0;
    let abs = amount.abs();

    let mut integer = abs.trunc() as i64;
    let mut kopecks = (abs.fract() * 100.0).round() as i64;
    if kopecks >= 100 {
        integer += 1;
        kopecks = 0;
    }

    let mut out = String::new();
    if negative && (integer > 0 || kopecks > 0) {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));

    if kopecks > 0 {
        if kopecks % 10 == 0 {
            out.push_str(&format!(",{}", kopecks / 10));
        } else {
            out.push_str(&format!(",{kopecks:02}"));
        }
    }
    out.push_str(" \u{20bd}");
    out
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped.chars().rev().collect()
}

// ── Instants ──

/// Whole days remaining until `deadline`, rounded up, never negative.
///
/// A deadline 25 hours away reads as 2 days; one in the past reads as 0.
pub fn days_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let diff_ms = deadline.signed_duration_since(now).num_milliseconds();
    if diff_ms <= 0 {
        return 0;
    }
    // `i64::div_ceil` is still unstable (int_roundings); diff_ms > 0 here,
    // so this is the exact positive-operand equivalent.
    (diff_ms + DAY_MS - 1) / DAY_MS
}

/// Elapsed-time phrase: «только что», «N мин. назад», «N ч. назад»,
/// «вчера», «N дн. назад». Thresholds are strict `<` over the
/// whole-second truncated difference.
pub fn format_relative_time(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = now.signed_duration_since(instant).num_seconds();
    if secs < 60 {
        return "только что".to_string();
    }
    if secs < 3600 {
        return format!("{} мин. назад", secs / 60);
    }
    if secs < 86_400 {
        return format!("{} ч. назад", secs / 3600);
    }
    let days = secs / 86_400;
    if days == 1 {
        "вчера".to_string()
    } else {
        format!("{days} дн. назад")
    }
}

/// Short message-list timestamp: `HH:MM` for today, «Вчера» for the
/// previous calendar day, `DD.MM` otherwise. Calendar comparison, not
/// elapsed time: 23:59 yesterday is «Вчера» even one minute later.
pub fn format_time(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let day = instant.date_naive();
    let today = now.date_naive();
    if day == today {
        return instant.format("%H:%M").to_string();
    }
    if (today - day).num_days() == 1 {
        return "Вчера".to_string();
    }
    instant.format("%d.%m").to_string()
}

/// Date-divider label for a message group: «Сегодня», «Вчера», or a
/// long-form date like «5 августа», with « YYYY г.» appended only when the
/// year differs from the current one.
pub fn format_message_date(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let day = instant.date_naive();
    let today = now.date_naive();
    match (today - day).num_days() {
        0 => "Сегодня".to_string(),
        1 => "Вчера".to_string(),
        _ => {
            let month = MONTHS_GENITIVE[day.month0() as usize];
            if day.year() == today.year() {
                format!("{} {}", day.day(), month)
            } else {
                format!("{} {} {} г.", day.day(), month, day.year())
            }
        }
    }
}

// ── Identity ──

/// Deterministic avatar color for a display name.
///
/// Hashes the UTF-16 code units with the classic `h = h*31 + unit` string
/// hash on wrapping signed 32-bit arithmetic, then indexes the palette with
/// `|h| % 8`. The empty name hashes to 0 and gets the first color.
pub fn get_avatar_color(name: &str) -> &'static str {
    let mut hash: i32 = 0;
    for unit in name.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(unit as i32);
    }
    AVATAR_COLORS[(hash.unsigned_abs() % AVATAR_COLORS.len() as u32) as usize]
}

/// Uppercase initials from first and last name; `"?"` when both are empty.
pub fn get_initials(first_name: &str, last_name: &str) -> String {
    let mut initials = String::new();
    if let Some(c) = first_name.chars().next() {
        initials.extend(c.to_uppercase());
    }
    if let Some(c) = last_name.chars().next() {
        initials.extend(c.to_uppercase());
    }
    if initials.is_empty() {
        initials.push('?');
    }
    initials
}

/// Russian display label for a procurement status code.
pub fn status_label(status: ProcurementStatus) -> &'static str {
    match status {
        ProcurementStatus::Draft => "Черновик",
        ProcurementStatus::Active => "Активная",
        ProcurementStatus::Stopped => "Остановлена",
        ProcurementStatus::Payment => "Оплата",
        ProcurementStatus::Completed => "Завершена",
        ProcurementStatus::Cancelled => "Отменена",
        ProcurementStatus::Unknown => "unknown",
    }
}
