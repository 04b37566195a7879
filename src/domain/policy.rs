use chrono::{DateTime, Utc};

use super::{CooldownConfig, PromptState};

/// Whether the prompt may be shown at `now`.
///
/// No record means the prompt was never acted on. A record that reached the
/// prompt limit stays hidden. Otherwise the prompt waits for its eligibility
/// date; a date that cannot be parsed does not hold the prompt back, and a
/// limit or count that is not a number imposes no limit.
pub fn should_show_prompt(
    state: Option<&PromptState>,
    config: &CooldownConfig,
    now: DateTime<Utc>,
) -> bool {
    let Some(state) = state else {
        return true;
    };

    // NaN on either side compares false, so no limit applies
    let limit = config.prompt_limit.to_number();
    if state.prompt_count.to_number() >= limit {
        return false;
    }

    match state.eligible_at() {
        Some(eligible) => now >= eligible,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::INVALID_DATE;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn state(count: u32, eligible: &str) -> PromptState {
        PromptState {
            prompt_count: count.into(),
            eligible_date: Some(eligible.to_string()),
            ..PromptState::default()
        }
    }

    #[test]
    fn shows_without_prior_record() {
        assert!(should_show_prompt(
            None,
            &CooldownConfig::fallback(),
            at("2026-10-18T00:00:00Z")
        ));
    }

    #[test]
    fn waits_for_eligibility_date() {
        let s = state(1, "2026-10-25T00:00:00.000Z");
        let cfg = CooldownConfig::fallback();
        assert!(!should_show_prompt(Some(&s), &cfg, at("2026-10-24T23:59:59Z")));
        assert!(should_show_prompt(Some(&s), &cfg, at("2026-10-25T00:00:00Z")));
    }

    #[test]
    fn hides_once_limit_reached() {
        let s = state(5, "2020-01-01T00:00:00.000Z");
        assert!(!should_show_prompt(
            Some(&s),
            &CooldownConfig::fallback(),
            at("2026-10-18T00:00:00Z")
        ));
    }

    #[test]
    fn invalid_date_does_not_block() {
        let s = state(1, INVALID_DATE);
        assert!(should_show_prompt(
            Some(&s),
            &CooldownConfig::fallback(),
            at("2026-10-18T00:00:00Z")
        ));
    }
}
