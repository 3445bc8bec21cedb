//! Month grid for the availability calendar.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use super::availability::{AvailabilityError, BlockedDateSet};

/// How a calendar cell is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayState {
    OutsideMonth,
    Past,
    Booked,
    Available,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub state: DayState,
}

/// Build a Sunday-first grid of whole weeks covering `year-month`.
///
/// Leading and trailing cells come from the neighbouring months. Days before
/// `today` are past; today itself can still be booked.
pub fn month_calendar(
    year: i32,
    month: u32,
    today: NaiveDate,
    blocked: &BlockedDateSet,
) -> Result<Vec<CalendarDay>, AvailabilityError> {
    let invalid = || AvailabilityError::InvalidMonth { year, month };

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;

    let leading = u64::from(first.weekday().num_days_from_sunday());
    let days_in_month = (next_first - first).num_days() as u64;
    let cells = (leading + days_in_month).div_ceil(7) * 7;
    let start = first.checked_sub_days(Days::new(leading)).ok_or_else(invalid)?;

    let days = start
        .iter_days()
        .take(cells as usize)
        .map(|date| CalendarDay {
            date,
            state: day_state(date, month, today, blocked),
        })
        .collect();

    Ok(days)
}

fn day_state(date: NaiveDate, month: u32, today: NaiveDate, blocked: &BlockedDateSet) -> DayState {
    if date.month() != month {
        DayState::OutsideMonth
    } else if date < today {
        DayState::Past
    } else if blocked.contains(date) {
        DayState::Booked
    } else {
        DayState::Available
    }
}
