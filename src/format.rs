//src/format.rs
use crate::model::WeightUnit;
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

const DATE_FORMAT: &str = "%A, %B %-d, %Y at %I:%M %p";

/// Long human-readable timestamp in the local timezone,
/// e.g. `Sunday, March 17, 2024 at 02:05 PM`.
pub fn format_date(date: &DateTime<Utc>) -> String {
    format_date_in(date, &Local)
}

pub fn format_date_in<Tz>(date: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.with_timezone(tz).format(DATE_FORMAT).to_string()
}

pub fn format_weight(weight: f64, unit: WeightUnit) -> String {
    format!("{weight} {unit}")
}
