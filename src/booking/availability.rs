//! Blocked-date derivation from existing reservations.
//!
//! A reservation occupies `[check_in, check_out)`: the departure day is free
//! for the next guest.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates::parse_calendar_date;

/// Availability errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AvailabilityError {
    #[error("Interval must end after it starts ({start} .. {end})")]
    EmptyInterval { start: NaiveDate, end: NaiveDate },

    #[error("Unparseable reservation date: {0}")]
    InvalidDate(String),

    #[error("Invalid calendar month {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
}

/// Occupied span of one reservation, end-exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DateInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AvailabilityError> {
        if start >= end {
            return Err(AvailabilityError::EmptyInterval { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    pub fn overlaps(&self, other: &DateInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Every occupied date, lazily. The iterator can be cloned to restart.
    pub fn dates(&self) -> DateIter {
        dates_in_range(self.start, self.end)
    }
}

/// Lazy day-by-day walk over `[next, end)`
#[derive(Debug, Clone)]
pub struct DateIter {
    next: NaiveDate,
    end: NaiveDate,
}

impl Iterator for DateIter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.next >= self.end {
            return None;
        }
        let current = self.next;
        self.next = current.succ_opt().unwrap_or(self.end);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next).num_days().max(0) as usize;
        (remaining, Some(remaining))
    }
}

/// Dates from `start` up to but excluding `end`. Empty when `start >= end`.
pub fn dates_in_range(start: NaiveDate, end: NaiveDate) -> DateIter {
    DateIter { next: start, end }
}

/// Anything that may occupy a property's calendar
pub trait Reservation {
    /// Occupied span, or `None` when the reservation no longer holds dates.
    fn occupied(&self) -> Option<DateInterval>;
}

/// Cancelled bookings release their dates.
pub fn holds_dates(status: &str) -> bool {
    !status.eq_ignore_ascii_case("cancelled")
}

/// Reservation record as sent by the marketplace data service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRecord {
    pub check_in_date: String,
    pub check_out_date: String,
    pub status: String,
}

impl ReservationRecord {
    /// Parse the record's dates into an interval.
    pub fn interval(&self) -> Result<DateInterval, AvailabilityError> {
        let start = parse_calendar_date(&self.check_in_date)
            .ok_or_else(|| AvailabilityError::InvalidDate(self.check_in_date.clone()))?;
        let end = parse_calendar_date(&self.check_out_date)
            .ok_or_else(|| AvailabilityError::InvalidDate(self.check_out_date.clone()))?;
        DateInterval::new(start, end)
    }
}

impl Reservation for ReservationRecord {
    fn occupied(&self) -> Option<DateInterval> {
        if !holds_dates(&self.status) {
            return None;
        }
        match self.interval() {
            Ok(interval) => Some(interval),
            Err(e) => {
                tracing::warn!("Skipping reservation record: {}", e);
                None
            }
        }
    }
}

impl Reservation for DateInterval {
    fn occupied(&self) -> Option<DateInterval> {
        Some(*self)
    }
}

/// Dates that cannot be booked for one property.
///
/// Built fresh from the current reservation list on every query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BlockedDateSet {
    dates: BTreeSet<NaiveDate>,
}

impl BlockedDateSet {
    pub fn from_intervals(intervals: &[DateInterval]) -> Self {
        intervals.iter().copied().collect()
    }

    /// Build from reservations, skipping cancelled or malformed ones.
    pub fn from_reservations<R: Reservation>(reservations: &[R]) -> Self {
        reservations.iter().filter_map(Reservation::occupied).collect()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Blocked dates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }

    /// Blocked dates inside the requested stay.
    pub fn conflicts(&self, requested: &DateInterval) -> Vec<NaiveDate> {
        self.dates
            .range(requested.start..requested.end)
            .copied()
            .collect()
    }

    /// A stay is bookable only if none of its nights is blocked.
    pub fn is_range_available(&self, requested: &DateInterval) -> bool {
        self.dates
            .range(requested.start..requested.end)
            .next()
            .is_none()
    }
}

impl FromIterator<DateInterval> for BlockedDateSet {
    fn from_iter<I: IntoIterator<Item = DateInterval>>(iter: I) -> Self {
        let dates = iter.into_iter().flat_map(|interval| interval.dates()).collect();
        Self { dates }
    }
}

/// Whether any reservation occupies `date`.
pub fn is_date_booked<R: Reservation>(date: NaiveDate, reservations: &[R]) -> bool {
    reservations
        .iter()
        .filter_map(Reservation::occupied)
        .any(|interval| interval.contains(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn interval(start: (u32, u32), end: (u32, u32)) -> DateInterval {
        DateInterval::new(date(2024, start.0, start.1), date(2024, end.0, end.1)).unwrap()
    }

    fn record(check_in: &str, check_out: &str, status: &str) -> ReservationRecord {
        ReservationRecord {
            check_in_date: check_in.to_string(),
            check_out_date: check_out.to_string(),
            status: status.to_string(),
        }
    }

    // ==================== DateInterval tests ====================

    #[test]
    fn test_interval_rejects_empty_and_inverted() {
        assert!(matches!(
            DateInterval::new(date(2024, 6, 1), date(2024, 6, 1)),
            Err(AvailabilityError::EmptyInterval { .. })
        ));
        assert!(DateInterval::new(date(2024, 6, 3), date(2024, 6, 1)).is_err());
    }

    #[test]
    fn test_interval_is_end_exclusive() {
        let stay = interval((6, 1), (6, 3));
        assert!(stay.contains(date(2024, 6, 1)));
        assert!(stay.contains(date(2024, 6, 2)));
        assert!(!stay.contains(date(2024, 6, 3)));
        assert_eq!(stay.nights(), 2);
    }

    #[test]
    fn test_interval_overlaps() {
        let a = interval((6, 1), (6, 3));
        assert!(a.overlaps(&interval((6, 2), (6, 4))));
        // Back-to-back stays share a changeover day, not a night
        assert!(!a.overlaps(&interval((6, 3), (6, 5))));
    }

    #[test]
    fn test_dates_iterator_is_restartable() {
        let dates = interval((6, 29), (7, 2)).dates();
        let first: Vec<_> = dates.clone().collect();
        let second: Vec<_> = dates.collect();

        assert_eq!(first, vec![date(2024, 6, 29), date(2024, 6, 30), date(2024, 7, 1)]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_dates_in_range_empty_when_unordered() {
        assert_eq!(dates_in_range(date(2024, 6, 3), date(2024, 6, 1)).count(), 0);
        assert_eq!(dates_in_range(date(2024, 6, 1), date(2024, 6, 1)).count(), 0);
        assert_eq!(dates_in_range(date(2024, 6, 1), date(2024, 6, 4)).size_hint(), (3, Some(3)));
    }

    // ==================== BlockedDateSet tests ====================

    #[test]
    fn test_blocked_set_end_exclusive() {
        let blocked = BlockedDateSet::from_intervals(&[interval((6, 1), (6, 3))]);

        assert_eq!(blocked.len(), 2);
        assert!(blocked.contains(date(2024, 6, 1)));
        assert!(blocked.contains(date(2024, 6, 2)));
        assert!(!blocked.contains(date(2024, 6, 3)));
    }

    #[test]
    fn test_blocked_set_deduplicates_overlaps() {
        let blocked = BlockedDateSet::from_intervals(&[
            interval((6, 1), (6, 3)),
            interval((6, 2), (6, 4)),
        ]);

        let dates: Vec<_> = blocked.iter().collect();
        assert_eq!(
            dates,
            vec![date(2024, 6, 1), date(2024, 6, 2), date(2024, 6, 3)]
        );
    }

    #[test]
    fn test_blocked_set_is_order_independent() {
        let a = interval((6, 1), (6, 3));
        let b = interval((7, 10), (7, 12));
        let c = interval((6, 2), (6, 5));

        let first = BlockedDateSet::from_intervals(&[a, b, c]);
        let second = BlockedDateSet::from_intervals(&[c, a, b]);
        assert_eq!(first, second);
        assert_eq!(first, BlockedDateSet::from_intervals(&[a, b, c]));
    }

    #[test]
    fn test_blocked_set_empty_input() {
        let blocked = BlockedDateSet::from_intervals(&[]);
        assert!(blocked.is_empty());
        assert!(blocked.is_range_available(&interval((6, 1), (6, 30))));
    }

    #[test]
    fn test_range_availability() {
        let blocked = BlockedDateSet::from_intervals(&[interval((6, 10), (6, 12))]);

        // Checking out on the first blocked day is fine
        assert!(blocked.is_range_available(&interval((6, 5), (6, 10))));
        // Checking in on the previous guest's departure day is fine
        assert!(blocked.is_range_available(&interval((6, 12), (6, 15))));
        assert!(!blocked.is_range_available(&interval((6, 9), (6, 11))));
        assert_eq!(
            blocked.conflicts(&interval((6, 1), (6, 30))),
            vec![date(2024, 6, 10), date(2024, 6, 11)]
        );
    }

    // ==================== ReservationRecord tests ====================

    #[test]
    fn test_blocked_set_from_records() {
        let records = vec![
            record("2024-06-01T00:00:00.000Z", "2024-06-03T00:00:00.000Z", "confirmed"),
            record("2024-06-10", "2024-06-12", "cancelled"),
            record("garbage", "2024-06-20", "pending"),
            record("2024-06-25", "2024-06-25", "pending"),
        ];

        let blocked = BlockedDateSet::from_reservations(&records);
        let dates: Vec<_> = blocked.iter().collect();
        assert_eq!(dates, vec![date(2024, 6, 1), date(2024, 6, 2)]);
    }

    #[test]
    fn test_record_deserializes_camel_case() {
        let json = r#"{"checkInDate":"2024-06-01","checkOutDate":"2024-06-03","status":"pending"}"#;
        let parsed: ReservationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.interval().unwrap(), interval((6, 1), (6, 3)));
    }

    #[test]
    fn test_is_date_booked() {
        let records = vec![record("2024-06-01", "2024-06-03", "confirmed")];
        assert!(is_date_booked(date(2024, 6, 2), &records));
        assert!(!is_date_booked(date(2024, 6, 3), &records));
        assert!(!is_date_booked(date(2024, 5, 31), &records));
    }

    #[test]
    fn test_holds_dates() {
        assert!(holds_dates("pending"));
        assert!(holds_dates("confirmed"));
        assert!(holds_dates("completed"));
        assert!(!holds_dates("cancelled"));
        assert!(!holds_dates("Cancelled"));
    }
}
