//! Property-test case budgets with environment overrides.
//!
//! Suites call [`property_cases`] with their local default; CI can raise or
//! lower every suite at once through `WORDPATH_PBT_CASES`.

use std::env;

/// Environment variable overriding the number of property-test cases.
pub const CASES_ENV_KEY: &str = "WORDPATH_PBT_CASES";

/// Returns the number of cases a property suite should run.
///
/// Falls back to `default_cases` when the variable is unset or invalid; an
/// invalid value is reported with `tracing::warn!`.
///
/// # Examples
/// ```
/// use wordpath_test_support::profile::property_cases;
///
/// assert!(property_cases(64) > 0);
/// ```
#[must_use]
pub fn property_cases(default_cases: u32) -> u32 {
    env::var(CASES_ENV_KEY).map_or(default_cases, |raw| {
        parse_cases(&raw).unwrap_or_else(|reason| {
            ::tracing::warn!(
                env = CASES_ENV_KEY,
                raw = %raw,
                reason = %reason,
                "invalid property-test case override; using default",
            );
            default_cases
        })
    })
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    let parsed = raw
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("parse error: {error}"))?;
    if parsed == 0 {
        return Err("cases must be > 0".to_owned());
    }
    Ok(parsed)
}
