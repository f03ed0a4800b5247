use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
    Utc,
};

/// Parse a UTC offset such as `+05:30`, `-03:00`, `+0530` or `Z`
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset, String> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return Ok(utc_offset());
    }

    let (sign, rest) = match raw.chars().next() {
        Some('+') => (1, &raw[1..]),
        Some('-') => (-1, &raw[1..]),
        _ => return Err(format!("Invalid UTC offset: '{}'", raw)),
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("Invalid UTC offset: '{}'", raw));
    }

    let hours: i32 = digits[..2].parse().map_err(|_| format!("Invalid UTC offset: '{}'", raw))?;
    let minutes: i32 = digits[2..].parse().map_err(|_| format!("Invalid UTC offset: '{}'", raw))?;
    if hours > 14 || minutes > 59 {
        return Err(format!("UTC offset out of range: '{}'", raw));
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| format!("UTC offset out of range: '{}'", raw))
}

/// Offset of zero
pub fn utc_offset() -> FixedOffset {
    Utc.fix()
}

/// A single captured instant plus the gym's local offset.
///
/// Every relative-date comparison inside one report goes through the same
/// clock, so a record straddling a boundary is classified once.
#[derive(Debug, Clone, Copy)]
pub struct ReportClock {
    now: DateTime<Utc>,
    offset: FixedOffset,
}

impl ReportClock {
    /// Capture the current instant
    pub fn capture(offset: FixedOffset) -> Self {
        Self::at(Utc::now(), offset)
    }

    /// Clock pinned to a given instant
    pub fn at(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { now, offset }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Local wall-clock view of `now`
    pub fn local_now(&self) -> DateTime<FixedOffset> {
        self.now.with_timezone(&self.offset)
    }

    /// Local midnight of the current day, as UTC
    pub fn start_of_day(&self) -> DateTime<Utc> {
        self.day_bounds(self.local_now().date_naive()).0
    }

    /// Last millisecond of the current local day, as UTC
    pub fn end_of_day(&self) -> DateTime<Utc> {
        self.day_bounds(self.local_now().date_naive()).1
    }

    /// First and last millisecond of a local calendar date, as UTC
    pub fn day_bounds(&self, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.local_to_utc(date.and_time(NaiveTime::MIN));
        (start, start + Duration::days(1) - Duration::milliseconds(1))
    }

    /// Local midnight of the first day of the current month, as UTC
    pub fn start_of_month(&self) -> DateTime<Utc> {
        let today = self.local_now().date_naive();
        let first = today - Duration::days(i64::from(today.day0()));
        self.local_to_utc(first.and_time(NaiveTime::MIN))
    }

    /// Local midnight of January 1st of the current year, as UTC
    pub fn start_of_year(&self) -> DateTime<Utc> {
        let today = self.local_now().date_naive();
        let first = today - Duration::days(i64::from(today.ordinal0()));
        self.local_to_utc(first.and_time(NaiveTime::MIN))
    }

    pub fn days_ago(&self, days: i64) -> DateTime<Utc> {
        self.now - Duration::days(days)
    }

    pub fn days_ahead(&self, days: i64) -> DateTime<Utc> {
        self.now + Duration::days(days)
    }

    /// Current local calendar year
    pub fn year(&self) -> i32 {
        self.local_now().year()
    }

    /// Local calendar year of an instant
    pub fn year_of(&self, instant: DateTime<Utc>) -> i32 {
        instant.with_timezone(&self.offset).year()
    }

    /// Local calendar month (1-12) of an instant
    pub fn month_of(&self, instant: DateTime<Utc>) -> u32 {
        instant.with_timezone(&self.offset).month()
    }

    /// Local date of an instant formatted as `dd/mm/yyyy`
    pub fn format_date(&self, instant: DateTime<Utc>) -> String {
        instant.with_timezone(&self.offset).format("%d/%m/%Y").to_string()
    }

    fn local_to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        let shifted = local - Duration::seconds(i64::from(self.offset.local_minus_utc()));
        Utc.from_utc_datetime(&shifted)
    }
}
