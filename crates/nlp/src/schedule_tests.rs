use super::*;

#[test]
fn exact_every_n_minutes() {
    assert_eq!(
        extract_schedule("every 5 minutes check eth price"),
        Some("*/5 * * * *".to_string())
    );
}

#[test]
fn exact_every_n_seconds_produces_six_fields() {
    assert_eq!(extract_schedule("every 30 seconds"), Some("*/30 * * * * *".to_string()));
}

#[test]
fn fuzzy_unit_typo_still_resolves() {
    assert_eq!(extract_schedule("every 2 hourz"), Some("0 */2 * * *".to_string()));
}

#[test]
fn shorthand_hourly_daily_weekly() {
    assert_eq!(extract_schedule("run hourly"), Some("0 * * * *".to_string()));
    assert_eq!(extract_schedule("run daily"), Some("0 0 * * *".to_string()));
    assert_eq!(extract_schedule("run weekly"), Some("0 0 * * 0".to_string()));
}

#[test]
fn every_day_at_pm_converts_to_24h() {
    assert_eq!(extract_schedule("every day at 3pm"), Some("0 15 * * *".to_string()));
}

#[test]
fn weekday_name_resolves_to_day_of_week_field() {
    assert_eq!(extract_schedule("every friday"), Some("0 0 * * 5".to_string()));
}

#[test]
fn no_schedule_phrase_returns_none() {
    assert_eq!(extract_schedule("check the price of eth"), None);
}
