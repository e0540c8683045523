use chrono::NaiveDate;

/// Calendar lookup. Pure function of the date.
pub trait HolidayResolver: Send + Sync {
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// Resolver that knows no holidays; weekends still count in the holiday
/// component.
pub struct NoHolidays;

impl HolidayResolver for NoHolidays {
    fn is_holiday(&self, _date: NaiveDate) -> bool {
        false
    }
}
