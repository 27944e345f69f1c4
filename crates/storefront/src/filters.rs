//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::NaiveDate;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats an event date as e.g. "15 Mar 2026".
///
/// Usage in templates: `{{ event.event_date|event_date }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn event_date(value: &NaiveDate, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(value.format("%d %b %Y").to_string())
}
