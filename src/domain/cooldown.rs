use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A number exactly as another writer delivered it (remote config, or a record
/// some other part of the extension stored).
///
/// The raw JSON value is kept so a bad value can be reported verbatim and
/// written back untouched; it is only coerced to a number at use.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LooseNumber(Option<Value>);

impl LooseNumber {
    pub fn missing() -> Self {
        Self(None)
    }

    pub fn is_missing(&self) -> bool {
        self.0.is_none()
    }

    /// Loose numeric coercion as a browser's `Number()` does it: numbers pass
    /// through, numeric strings (decimal, `0x`/`0o`/`0b`, `Infinity`) are
    /// parsed, empty strings / null / false are 0, true is 1, anything else
    /// (including a missing field) is NaN.
    pub fn to_number(&self) -> f64 {
        match &self.0 {
            None => f64::NAN,
            Some(Value::Null) => 0.0,
            Some(Value::Bool(b)) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
            Some(Value::String(s)) => parse_numeric_string(s),
            Some(_) => f64::NAN,
        }
    }
}

fn parse_numeric_string(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        if digits.is_empty() {
            return f64::NAN;
        }
        return digits
            .chars()
            .try_fold(0.0, |acc, c| {
                c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
            })
            .unwrap_or(f64::NAN);
    }

    match s {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        // only plain decimal notation; rust also takes "inf" and "nan"
        _ if s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')) =>
        {
            s.parse().unwrap_or(f64::NAN)
        }
        _ => f64::NAN,
    }
}

impl From<u32> for LooseNumber {
    fn from(v: u32) -> Self {
        Self(Some(Value::from(v)))
    }
}

impl From<Value> for LooseNumber {
    fn from(v: Value) -> Self {
        Self(Some(v))
    }
}

impl fmt::Display for LooseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => write!(f, "undefined"),
            Some(Value::String(s)) => write!(f, "{s}"),
            Some(v) => write!(f, "{v}"),
        }
    }
}

// A present field always deserializes to Some, so `null` stays distinct from
// an absent field (which falls back to `Default`).
impl<'de> Deserialize<'de> for LooseNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|v| Self(Some(v)))
    }
}

impl Serialize for LooseNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(v) => v.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

/// Remote cooldown settings for the local file prompt.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CooldownConfig {
    #[serde(default, skip_serializing_if = "LooseNumber::is_missing")]
    pub prompt_limit: LooseNumber,
    #[serde(default, skip_serializing_if = "LooseNumber::is_missing")]
    pub ignore_cool_down: LooseNumber,
    #[serde(default, skip_serializing_if = "LooseNumber::is_missing")]
    pub settings_cool_down: LooseNumber,
    #[serde(default, skip_serializing_if = "LooseNumber::is_missing")]
    pub dismiss_cool_down: LooseNumber,
}

impl CooldownConfig {
    /// Used whenever the remote payload is unavailable or unusable.
    pub fn fallback() -> Self {
        Self {
            prompt_limit: 5u32.into(),
            ignore_cool_down: 7u32.into(),
            settings_cool_down: 7u32.into(),
            dismiss_cool_down: 7u32.into(),
        }
    }

    pub fn cooldown(&self, kind: CooldownKind) -> &LooseNumber {
        match kind {
            CooldownKind::Settings => &self.settings_cool_down,
            CooldownKind::Ignore => &self.ignore_cool_down,
            CooldownKind::Dismiss => &self.dismiss_cool_down,
        }
    }
}

/// Which prompt outcome a cooldown is computed for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CooldownKind {
    /// The user went to the settings page.
    #[default]
    Settings,
    /// The prompt was left unanswered.
    Ignore,
    /// The user closed the prompt.
    Dismiss,
}

impl CooldownKind {
    pub fn field_name(&self) -> &'static str {
        match self {
            CooldownKind::Settings => "settingsCoolDown",
            CooldownKind::Ignore => "ignoreCoolDown",
            CooldownKind::Dismiss => "dismissCoolDown",
        }
    }
}
