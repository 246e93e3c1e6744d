use time::{macros::format_description, Date, Duration};

/// Length of the trailing window served by the most-active-station route
pub const TRAILING_WINDOW_DAYS: i64 = 365;

/// Parse a `YYYY-MM-DD` date, as stored in the `measurement.date` column
pub fn parse_date(raw: &str) -> Result<Date, time::error::Parse> {
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
}

/// Inclusive span of dates, used to filter measurement rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Date,
    pub end: Date,
}

impl DateWindow {
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// First and last dates recorded in the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub first: Date,
    pub last: Date,
}

impl DateRange {
    pub fn contains(&self, date: Date) -> bool {
        self.first <= date && date <= self.last
    }

    /// The 365 days leading up to and including the most recent recorded date.
    pub fn trailing_year(&self) -> DateWindow {
        DateWindow {
            start: self
                .last
                .saturating_sub(Duration::days(TRAILING_WINDOW_DAYS)),
            end: self.last,
        }
    }

    /// Parse a requested date and keep it only if the dataset covers it.
    /// Malformed input is rejected the same way as an out-of-range date.
    pub fn resolve(&self, raw: &str) -> Option<Date> {
        parse_date(raw).ok().filter(|date| self.contains(*date))
    }
}
