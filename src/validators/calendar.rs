//! Calendar validators: full dates and card expiry

use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Field order of an 8-digit date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DateOrder {
    /// `DDMMYYYY`
    #[default]
    Dmy,
    /// `MMDDYYYY`
    Mdy,
    /// `YYYYMMDD`
    Ymd,
}

impl FromStr for DateOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DMY" => Ok(Self::Dmy),
            "MDY" => Ok(Self::Mdy),
            "YMD" => Ok(Self::Ymd),
            other => Err(format!("unknown date order '{}', expected DMY, MDY or YMD", other)),
        }
    }
}

fn number(value: &str, range: std::ops::Range<usize>) -> Option<u32> {
    value.get(range)?.parse().ok()
}

/// Validate an 8-digit date in the given order. The date must exist on the
/// calendar, so `29022023` fails while `29022024` passes.
pub fn date(value: &str, order: DateOrder) -> bool {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let parts = match order {
        DateOrder::Dmy => (number(value, 0..2), number(value, 2..4), number(value, 4..8)),
        DateOrder::Mdy => (number(value, 2..4), number(value, 0..2), number(value, 4..8)),
        DateOrder::Ymd => (number(value, 6..8), number(value, 4..6), number(value, 0..4)),
    };
    let (Some(day), Some(month), Some(year)) = parts else {
        return false;
    };
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return false;
    }

    let year = year as i32;
    NaiveDate::from_ymd_opt(year, month, day)
        .is_some_and(|d| d.year() == year && d.month() == month && d.day() == day)
}

/// Validate a `MMYY` card expiry against today's local date
pub fn expiry(value: &str) -> bool {
    expiry_at(value, Local::now().date_naive())
}

/// Validate a `MMYY` card expiry against a given date. A card expiring in the
/// current month is still valid.
pub fn expiry_at(value: &str, today: NaiveDate) -> bool {
    if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let (Some(month), Some(year)) = (number(value, 0..2), number(value, 2..4)) else {
        return false;
    };
    if !(1..=12).contains(&month) {
        return false;
    }

    let current_year = (today.year() % 100) as u32;
    let current_month = today.month();
    year > current_year || (year == current_year && month >= current_month)
}
