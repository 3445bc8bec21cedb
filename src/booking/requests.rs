//! Request DTOs for booking API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::dates::{parse_requested_range, RequestedRange};
use super::queries::PropertyFilter;

/// Request to price a stay from explicit inputs
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownRequest {
    pub nightly_rate: Decimal,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default)]
    pub cleaning_fee: Option<Decimal>,
    #[serde(default)]
    pub service_fee_override: Option<Decimal>,
}

/// Raw date query parameters; parsed leniently
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    #[serde(default)]
    pub check_in: Option<String>,
    #[serde(default)]
    pub check_out: Option<String>,
}

impl DateRangeQuery {
    pub fn range(&self) -> RequestedRange {
        parse_requested_range(self.check_in.as_deref(), self.check_out.as_deref())
    }
}

/// Property search query
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub guests: Option<i32>,
    #[serde(default)]
    pub max_price: Option<i32>,
    #[serde(flatten)]
    pub dates: DateRangeQuery,
}

impl SearchQuery {
    /// Blank text filters are treated as absent.
    pub fn filter(&self) -> PropertyFilter {
        let non_blank = |s: &Option<String>| {
            s.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        PropertyFilter {
            location: non_blank(&self.location),
            property_type: non_blank(&self.property_type),
            guests: self.guests,
            max_price: self.max_price,
        }
    }
}

/// Month selection for the availability calendar
#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_breakdown_request_accepts_numbers_and_strings() {
        let json = r#"{"nightlyRate":2500,"checkIn":"2024-07-01","checkOut":"2024-07-04","serviceFeeOverride":"800"}"#;
        let req: BreakdownRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.nightly_rate, dec!(2500));
        assert_eq!(req.cleaning_fee, None);
        assert_eq!(req.service_fee_override, Some(dec!(800)));
    }

    #[test]
    fn test_search_filter_drops_blank_text() {
        let query = SearchQuery {
            location: Some("  ".to_string()),
            property_type: Some(" villa ".to_string()),
            guests: Some(3),
            ..Default::default()
        };
        let filter = query.filter();

        assert_eq!(filter.location, None);
        assert_eq!(filter.property_type.as_deref(), Some("villa"));
        assert_eq!(filter.guests, Some(3));
    }

    #[test]
    fn test_date_range_query_is_lenient() {
        let query = DateRangeQuery {
            check_in: Some("tomorrow".to_string()),
            check_out: Some("2024-07-04".to_string()),
        };
        let range = query.range();
        assert_eq!(range.from, None);
        assert_eq!(range.to, NaiveDate::from_ymd_opt(2024, 7, 4));
    }
}
