use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Symbolic query window accepted by the period endpoint. Resolution is a
/// pure function of the window and a caller-supplied instant, so callers
/// control what "now" means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Today,
    Week,
    Month,
    Quarter,
}

impl Period {
    /// Start of the window containing `now`, anchored to local midnight:
    /// today's midnight, the most recent Monday (ISO week), the first of the
    /// month, or the first of the 3-month calendar quarter.
    pub fn start_of(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date();

        let start_date = match self {
            Self::Today => today,
            Self::Week => {
                today - Duration::days(today.weekday().num_days_from_monday() as i64)
            }
            Self::Month => NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today),
            Self::Quarter => {
                let quarter_start_month = (today.month0() / 3) * 3 + 1;
                NaiveDate::from_ymd_opt(today.year(), quarter_start_month, 1).unwrap_or(today)
            }
        };

        start_date.and_time(NaiveTime::MIN)
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            _ => Err(format!(
                "Invalid period '{}'. Allowed values: today, week, month, quarter",
                s
            )),
        }
    }
}

/// Half-open bounds of a calendar day: `[midnight, next midnight)`.
pub fn day_bounds(day: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = day.and_time(NaiveTime::MIN);
    (start, start + Duration::days(1))
}
