//! Business-day arithmetic (Monday–Friday, no holiday calendar).

use chrono::{Datelike, Days, NaiveDate, Weekday};

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Advance `n` business days past `start`, one calendar day at a time.
pub fn add_business_days(start: NaiveDate, n: u32) -> NaiveDate {
    let mut date = start;
    let mut remaining = n;
    while remaining > 0 {
        date = date + Days::new(1);
        if is_business_day(date) {
            remaining -= 1;
        }
    }
    date
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekdays_are_business_days_weekends_are_not() {
        // 2024-06-03 is a Monday
        for offset in 0..5 {
            assert!(is_business_day(date(2024, 6, 3 + offset)));
        }
        assert!(!is_business_day(date(2024, 6, 8))); // Saturday
        assert!(!is_business_day(date(2024, 6, 9))); // Sunday
    }

    #[test]
    fn friday_plus_one_lands_on_monday() {
        let friday = date(2024, 6, 7);
        assert_eq!(add_business_days(friday, 1), date(2024, 6, 10));
    }

    #[test]
    fn spans_multiple_weekends() {
        // 2024-06-03 Monday + 10 business days = 2024-06-17 Monday
        assert_eq!(add_business_days(date(2024, 6, 3), 10), date(2024, 6, 17));
    }

    #[test]
    fn zero_days_is_identity_even_on_a_weekend() {
        let saturday = date(2024, 6, 8);
        assert_eq!(add_business_days(saturday, 0), saturday);
    }

    #[test]
    fn weekend_start_counts_from_next_business_day() {
        let saturday = date(2024, 6, 8);
        assert_eq!(add_business_days(saturday, 1), date(2024, 6, 10));
    }
}
