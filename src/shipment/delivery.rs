//! Delivery estimates in business days.

use crate::config::TransitDays;
use crate::shipment::model::ServiceType;
use chrono::{DateTime, Datelike, Days, NaiveDate, Utc, Weekday};

/// Advance `days` business days from `start`, skipping Saturdays and Sundays.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use waybill::shipment::add_business_days;
///
/// // Friday + 1 business day lands on Monday
/// let friday = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// assert_eq!(add_business_days(friday, 1), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
/// ```
pub fn add_business_days(start: NaiveDate, days: u32) -> NaiveDate {
    let mut date = start;
    let mut remaining = days;
    while remaining > 0 {
        date = match date.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => return date,
        };
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            remaining -= 1;
        }
    }
    date
}

/// Estimated delivery date for a shipment created at `created_at`.
pub fn estimate_delivery(
    created_at: DateTime<Utc>,
    service: ServiceType,
    transit: &TransitDays,
) -> NaiveDate {
    add_business_days(created_at.date_naive(), transit.for_service(service))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn zero_days_is_the_same_date() {
        assert_eq!(add_business_days(date(2024, 3, 2), 0), date(2024, 3, 2));
    }

    #[test]
    fn weekends_are_skipped() {
        // Wednesday + 5 business days = next Wednesday
        assert_eq!(add_business_days(date(2024, 3, 6), 5), date(2024, 3, 13));
        // Saturday + 1 business day = Monday
        assert_eq!(add_business_days(date(2024, 3, 2), 1), date(2024, 3, 4));
    }

    #[test]
    fn estimate_uses_service_transit_days() {
        let transit = TransitDays::default();
        let monday = Utc.with_ymd_and_hms(2024, 3, 4, 9, 30, 0).unwrap();

        assert_eq!(
            estimate_delivery(monday, ServiceType::Express, &transit),
            date(2024, 3, 6)
        );
        assert_eq!(
            estimate_delivery(monday, ServiceType::Standard, &transit),
            date(2024, 3, 11)
        );
        assert_eq!(
            estimate_delivery(monday, ServiceType::Economy, &transit),
            date(2024, 3, 18)
        );
    }
}
