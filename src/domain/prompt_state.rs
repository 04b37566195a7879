use chrono::{DateTime, Datelike, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::LooseNumber;

pub const ONE_DAY_IN_MS: f64 = 86_400_000.0;

/// Stored in place of an eligibility date that could not be computed.
pub const INVALID_DATE: &str = "Invalid Date";

// Largest distance from the epoch a browser Date can represent.
const MAX_TIME_MS: f64 = 8.64e15;

/// Persisted prompt bookkeeping under `localFileConfig`.
///
/// Fields written by other parts of the extension are carried in `extra` so a
/// read-modify-write here never drops them. `promptCount` is owned upstream
/// too and is written back exactly as it was read.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptState {
    #[serde(default, skip_serializing_if = "LooseNumber::is_missing")]
    pub prompt_count: LooseNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligible_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PromptState {
    /// Record created the first time the prompt has been acted on.
    pub fn first_prompt() -> Self {
        Self {
            prompt_count: 1u32.into(),
            ..Self::default()
        }
    }

    /// Parsed eligibility date, `None` when absent or not a valid timestamp.
    pub fn eligible_at(&self) -> Option<DateTime<Utc>> {
        parse_iso_string(self.eligible_date.as_deref()?)
    }
}

/// `now + days`, truncated to whole milliseconds.
///
/// Returns `None` for a non-finite day count or a result outside the range a
/// browser Date can hold.
pub fn eligible_date_after(now: DateTime<Utc>, days: f64) -> Option<DateTime<Utc>> {
    let offset_ms = days * ONE_DAY_IN_MS;
    if !offset_ms.is_finite() {
        return None;
    }
    let target = now.timestamp_millis() as f64 + offset_ms;
    if target.abs() > MAX_TIME_MS {
        return None;
    }
    DateTime::from_timestamp_millis(target.trunc() as i64)
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2026-10-25T08:30:00.000Z`.
///
/// Years outside 0..=9999 use the signed six digit form a browser writes,
/// e.g. `+015716-05-01T04:01:56.768Z`.
pub fn to_iso_string(date: DateTime<Utc>) -> String {
    let year = date.year();
    if (0..=9999).contains(&year) {
        return date.to_rfc3339_opts(SecondsFormat::Millis, true);
    }
    let sign = if year < 0 { '-' } else { '+' };
    format!(
        "{sign}{:06}{}",
        year.unsigned_abs(),
        date.format("-%m-%dT%H:%M:%S%.3fZ")
    )
}

/// Reads what [`to_iso_string`] (or any RFC 3339 writer) produced.
pub fn parse_iso_string(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }

    // extended year: sign, six digits, then the usual month onwards
    let sign = raw.chars().next().filter(|c| matches!(c, '+' | '-'))?;
    let digits = raw.get(1..7).filter(|d| d.bytes().all(|b| b.is_ascii_digit()))?;
    let year: i32 = digits.parse().ok()?;
    let year = if sign == '-' { -year } else { year };

    // 2000 is a leap year, so Feb 29 survives until `with_year` checks it
    let rest = raw.get(7..)?;
    let placeholder =
        NaiveDateTime::parse_from_str(&format!("2000{rest}"), "%Y-%m-%dT%H:%M:%S%.fZ").ok()?;
    Some(placeholder.with_year(year)?.and_utc())
}
