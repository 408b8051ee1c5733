//! Jalali (Persian solar) calendar conversion.
//!
//! Dates are persisted as Gregorian `YYYY-MM-DD` strings but every user-facing
//! date and every payroll month is Jalali. This module is the bridge between
//! the two calendars.
//!
//! ## Algorithm
//!
//! Leap years follow the 33-year cycle with the table of cycle "breaks" used by
//! the jalaali reference algorithm. It does not line up with the Gregorian
//! 4-year rule: 1399 and 1403 are leap years, while the next one after 1403 is
//! 1408. The Gregorian side is handled by `chrono`; only the day on which
//! Farvardin 1 falls (March 19–22) has to be derived.
//!
//! ## Supported window
//!
//! Jalali years `1..=3177`, i.e. Gregorian dates `0622-03-22..=3798-12-31`.
//! Anything outside fails with an out-of-range error instead of producing a
//! silently wrong date.
//!
//! ## Week convention
//!
//! The Persian week starts on Saturday (شنبه) and Friday (جمعه) is the weekly
//! off-day.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// First supported Jalali year
pub const MIN_YEAR: i32 = 1;
/// Last supported Jalali year
pub const MAX_YEAR: i32 = 3177;

/// Jalali years at which the leap pattern of the 33-year cycle shifts
const BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

const MONTH_NAMES: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// Saturday-first
const WEEKDAY_NAMES: [&str; 7] = [
    "شنبه",
    "یکشنبه",
    "دوشنبه",
    "سه‌شنبه",
    "چهارشنبه",
    "پنجشنبه",
    "جمعه",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("Jalali year {year} is outside the supported range 1..=3177")]
    YearOutOfRange { year: i32 },
    #[error("Gregorian date {date} is outside the supported range")]
    GregorianOutOfRange { date: NaiveDate },
    #[error("Invalid Jalali month: {month}")]
    InvalidMonth { month: u32 },
    #[error("Invalid Jalali date {year}/{month:02}/{day:02}: month has {days_in_month} days")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
        days_in_month: u32,
    },
    #[error("Invalid storage date '{0}', expected YYYY-MM-DD")]
    InvalidStorageDate(String),
    #[error("Cannot parse Jalali date '{0}'")]
    Parse(String),
}

/// A validated Jalali calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JalaliDate {
    year: i32,
    month: u32,
    day: u32,
}

impl JalaliDate {
    /// Create a Jalali date, rejecting days past the end of the month
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, CalendarError> {
        let days_in_month = days_in_month(year, month)?;
        if day == 0 || day > days_in_month {
            return Err(CalendarError::InvalidDate {
                year,
                month,
                day,
                days_in_month,
            });
        }
        Ok(Self { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// 1-based day number within the Jalali year
    pub fn ordinal(&self) -> u32 {
        if self.month <= 6 {
            (self.month - 1) * 31 + self.day
        } else {
            186 + (self.month - 7) * 30 + self.day
        }
    }

    pub fn to_gregorian(&self) -> Result<NaiveDate, CalendarError> {
        to_gregorian(self.year, self.month, self.day)
    }

    pub fn weekday(&self) -> Result<Weekday, CalendarError> {
        Ok(self.to_gregorian()?.weekday())
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    pub fn jalali_month(&self) -> JalaliMonth {
        JalaliMonth {
            year: self.year,
            month: self.month,
        }
    }
}

impl fmt::Display for JalaliDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

/// Parses user-entered dates such as `1403/01/15`, `1403-1-15` or `۱۴۰۳/۰۱/۱۵`.
impl FromStr for JalaliDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = to_ascii_digits(s.trim());
        let parts: Vec<&str> = normalized.split(&['/', '-', '.'][..]).collect();
        if parts.len() != 3 {
            return Err(CalendarError::Parse(s.to_string()));
        }

        let parse_err = || CalendarError::Parse(s.to_string());
        let year = parts[0].parse::<i32>().map_err(|_| parse_err())?;
        let month = parts[1].parse::<u32>().map_err(|_| parse_err())?;
        let day = parts[2].parse::<u32>().map_err(|_| parse_err())?;

        JalaliDate::new(year, month, day)
    }
}

/// A Jalali year and month, used for payroll periods and calendar navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JalaliMonth {
    year: i32,
    month: u32,
}

impl JalaliMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        check_year(year)?;
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        Ok(Self { year, month })
    }

    /// The Jalali month a Gregorian date falls in
    pub fn containing(date: NaiveDate) -> Result<Self, CalendarError> {
        Ok(to_jalali(date)?.jalali_month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    pub fn days(&self) -> Result<u32, CalendarError> {
        days_in_month(self.year, self.month)
    }

    pub fn first_day(&self) -> JalaliDate {
        JalaliDate {
            year: self.year,
            month: self.month,
            day: 1,
        }
    }

    pub fn last_day(&self) -> Result<JalaliDate, CalendarError> {
        Ok(JalaliDate {
            year: self.year,
            month: self.month,
            day: self.days()?,
        })
    }

    /// Esfand rolls over into Farvardin of the next year
    pub fn next(&self) -> Result<Self, CalendarError> {
        if self.month == 12 {
            JalaliMonth::new(self.year + 1, 1)
        } else {
            JalaliMonth::new(self.year, self.month + 1)
        }
    }

    /// Farvardin rolls back into Esfand of the previous year
    pub fn previous(&self) -> Result<Self, CalendarError> {
        if self.month == 1 {
            JalaliMonth::new(self.year - 1, 12)
        } else {
            JalaliMonth::new(self.year, self.month - 1)
        }
    }
}

impl fmt::Display for JalaliMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}

/// Result of the leap-cycle computation for one Jalali year
struct YearInfo {
    /// Years since the last leap year; 0 means this year is a leap year
    leap: i32,
    /// Gregorian year in which Farvardin 1 falls
    gregorian_year: i32,
    /// Day of March on which Farvardin 1 falls
    march: u32,
}

fn check_year(year: i32) -> Result<(), CalendarError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(CalendarError::YearOutOfRange { year })
    }
}

fn year_info(jy: i32) -> Result<YearInfo, CalendarError> {
    check_year(jy)?;

    let gy = jy + 621;
    let mut leap_j = -14;
    let mut jp = BREAKS[0];
    let mut jump = 0;

    for &jm in &BREAKS[1..] {
        jump = jm - jp;
        if jy < jm {
            break;
        }
        leap_j += jump / 33 * 8 + (jump % 33) / 4;
        jp = jm;
    }

    let mut n = jy - jp;
    leap_j += n / 33 * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_j += 1;
    }

    // Gregorian leap days accumulated since the epoch of the break table
    let leap_g = gy / 4 - (gy / 100 + 1) * 3 / 4 - 150;
    let march = 20 + leap_j - leap_g;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }

    Ok(YearInfo {
        leap,
        gregorian_year: gy,
        march: march as u32,
    })
}

fn farvardin_first(info: &YearInfo) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(info.gregorian_year, 3, info.march)
}

/// Whether a Jalali year has 366 days
pub fn is_leap_year(year: i32) -> Result<bool, CalendarError> {
    Ok(year_info(year)?.leap == 0)
}

/// Number of days in a Jalali month: 31 for months 1–6, 30 for months 7–11,
/// and 29 or 30 for Esfand depending on the leap year.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    check_year(year)?;
    match month {
        1..=6 => Ok(31),
        7..=11 => Ok(30),
        12 => Ok(if is_leap_year(year)? { 30 } else { 29 }),
        _ => Err(CalendarError::InvalidMonth { month }),
    }
}

/// Number of days in a Jalali year
pub fn days_in_year(year: i32) -> Result<u32, CalendarError> {
    Ok(if is_leap_year(year)? { 366 } else { 365 })
}

/// Convert a Gregorian date to its Jalali equivalent
pub fn to_jalali(date: NaiveDate) -> Result<JalaliDate, CalendarError> {
    let out_of_range = || CalendarError::GregorianOutOfRange { date };

    let mut jy = date.year() - 621;
    let info = year_info(jy).map_err(|_| out_of_range())?;
    let start = farvardin_first(&info).ok_or_else(out_of_range)?;

    let mut k = date.signed_duration_since(start).num_days() as i32;
    if k >= 0 {
        if k <= 185 {
            return Ok(JalaliDate {
                year: jy,
                month: 1 + (k / 31) as u32,
                day: (k % 31) as u32 + 1,
            });
        }
        k -= 186;
    } else {
        // Before Farvardin 1: the date belongs to the tail of the previous year
        jy -= 1;
        k += 179;
        if info.leap == 1 {
            k += 1;
        }
    }

    if jy < MIN_YEAR {
        return Err(out_of_range());
    }

    Ok(JalaliDate {
        year: jy,
        month: 7 + (k / 30) as u32,
        day: (k % 30) as u32 + 1,
    })
}

/// Convert a Jalali date to Gregorian. Days past the end of the month are
/// rejected, never rolled over.
pub fn to_gregorian(year: i32, month: u32, day: u32) -> Result<NaiveDate, CalendarError> {
    let date = JalaliDate::new(year, month, day)?;
    let info = year_info(year)?;
    let out_of_range = || CalendarError::YearOutOfRange { year };

    farvardin_first(&info)
        .ok_or_else(out_of_range)?
        .checked_add_days(Days::new(u64::from(date.ordinal() - 1)))
        .ok_or_else(out_of_range)
}

/// Gregorian `YYYY-MM-DD` storage key for a Jalali date
pub fn format_for_storage(date: &JalaliDate) -> Result<String, CalendarError> {
    Ok(date.to_gregorian()?.format("%Y-%m-%d").to_string())
}

/// Parse a fixed-width `YYYY-MM-DD` storage key. Storage keys are compared as
/// strings, so short forms like `2024-3-20` are rejected.
pub fn parse_storage_date(value: &str) -> Result<NaiveDate, CalendarError> {
    let bytes = value.as_bytes();
    let fixed_width = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !fixed_width {
        return Err(CalendarError::InvalidStorageDate(value.to_string()));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| CalendarError::InvalidStorageDate(value.to_string()))
}

/// Jalali date for a Gregorian storage key
pub fn from_storage(value: &str) -> Result<JalaliDate, CalendarError> {
    to_jalali(parse_storage_date(value)?)
}

/// Storage keys of the first and last day of a Jalali month
pub fn month_range(month: JalaliMonth) -> Result<(String, String), CalendarError> {
    let start = format_for_storage(&month.first_day())?;
    let end = format_for_storage(&month.last_day()?)?;
    Ok((start, end))
}

/// Persian name of a 1-based Jalali month
pub fn month_name(month: u32) -> Option<&'static str> {
    match month {
        1..=12 => Some(MONTH_NAMES[(month - 1) as usize]),
        _ => None,
    }
}

/// Position of a weekday in the Persian week (Saturday = 0, Friday = 6)
pub fn persian_weekday_index(weekday: Weekday) -> u32 {
    (weekday.num_days_from_sunday() + 1) % 7
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAY_NAMES[persian_weekday_index(weekday) as usize]
}

/// Weekday name for a Sunday-based index (0 = Sunday), the convention of most
/// date libraries and of JavaScript's `Date.getDay()`.
pub fn weekday_name_from_sunday(index: u32) -> Option<&'static str> {
    if index > 6 {
        return None;
    }
    Some(WEEKDAY_NAMES[((index + 1) % 7) as usize])
}

/// Friday is the weekly off-day
pub fn is_off_day(weekday: Weekday) -> bool {
    weekday == Weekday::Fri
}

/// Replace ASCII digits with Persian digits
pub fn to_persian_digits(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '0'..='9' => char::from_u32('۰' as u32 + (c as u32 - '0' as u32)).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Replace Persian and Arabic-Indic digits with ASCII digits
fn to_ascii_digits(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '۰'..='۹' => char::from_u32('0' as u32 + (c as u32 - '۰' as u32)).unwrap_or(c),
            '٠'..='٩' => char::from_u32('0' as u32 + (c as u32 - '٠' as u32)).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Display form such as `۱ فروردین ۱۴۰۳`
pub fn format_persian(date: &JalaliDate) -> String {
    format!(
        "{} {} {}",
        to_persian_digits(&date.day.to_string()),
        date.month_name(),
        to_persian_digits(&date.year.to_string())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn jalali(y: i32, m: u32, d: u32) -> JalaliDate {
        JalaliDate::new(y, m, d).unwrap()
    }

    #[test]
    fn test_farvardin_1403_boundaries() {
        assert_eq!(to_gregorian(1403, 1, 1).unwrap(), ymd(2024, 3, 20));
        assert_eq!(to_gregorian(1403, 1, 31).unwrap(), ymd(2024, 4, 19));
        assert_eq!(to_jalali(ymd(2024, 3, 20)).unwrap(), jalali(1403, 1, 1));
        assert_eq!(to_jalali(ymd(2024, 3, 19)).unwrap(), jalali(1402, 12, 29));
    }

    #[test]
    fn test_known_conversions() {
        assert_eq!(to_jalali(ymd(2000, 1, 1)).unwrap(), jalali(1378, 10, 11));
        assert_eq!(to_jalali(ymd(2025, 3, 20)).unwrap(), jalali(1403, 12, 30));
        assert_eq!(to_jalali(ymd(2025, 3, 21)).unwrap(), jalali(1404, 1, 1));
        assert_eq!(to_gregorian(1403, 7, 1).unwrap(), ymd(2024, 9, 22));
        assert_eq!(to_gregorian(1403, 6, 31).unwrap(), ymd(2024, 9, 21));
        assert_eq!(to_gregorian(1399, 12, 30).unwrap(), ymd(2021, 3, 20));
        assert_eq!(to_gregorian(1, 1, 1).unwrap(), ymd(622, 3, 22));
    }

    #[test]
    fn test_leap_year_reference_table() {
        let leap_years = [1375, 1379, 1383, 1387, 1391, 1395, 1399, 1403, 1408, 1412, 1416];
        let common_years = [1396, 1397, 1398, 1400, 1401, 1402, 1404, 1405, 1406, 1407, 1409];

        for year in leap_years {
            assert!(is_leap_year(year).unwrap(), "{} should be a leap year", year);
            assert_eq!(days_in_month(year, 12).unwrap(), 30, "Esfand {}", year);
        }
        for year in common_years {
            assert!(!is_leap_year(year).unwrap(), "{} should be a common year", year);
            assert_eq!(days_in_month(year, 12).unwrap(), 29, "Esfand {}", year);
        }
    }

    #[test]
    fn test_month_lengths_sum_to_year_length() {
        for year in 1300..=1500 {
            let total: u32 = (1..=12).map(|m| days_in_month(year, m).unwrap()).sum();
            assert_eq!(total, days_in_year(year).unwrap(), "year {}", year);
            assert!(total == 365 || total == 366);
        }
    }

    #[test]
    fn test_fixed_month_lengths() {
        for month in 1..=6 {
            assert_eq!(days_in_month(1402, month).unwrap(), 31);
        }
        for month in 7..=11 {
            assert_eq!(days_in_month(1402, month).unwrap(), 30);
        }
        assert_eq!(
            days_in_month(1402, 13),
            Err(CalendarError::InvalidMonth { month: 13 })
        );
        assert_eq!(
            days_in_month(1402, 0),
            Err(CalendarError::InvalidMonth { month: 0 })
        );
    }

    #[test]
    fn test_jalali_round_trip() {
        for year in 1350..=1450 {
            for month in 1..=12 {
                for day in 1..=days_in_month(year, month).unwrap() {
                    let gregorian = to_gregorian(year, month, day).unwrap();
                    assert_eq!(to_jalali(gregorian).unwrap(), jalali(year, month, day));
                }
            }
        }
    }

    #[test]
    fn test_gregorian_round_trip() {
        let mut date = ymd(1900, 1, 1);
        let end = ymd(2100, 12, 31);
        while date <= end {
            let j = to_jalali(date).unwrap();
            assert_eq!(to_gregorian(j.year(), j.month(), j.day()).unwrap(), date);
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_consecutive_gregorian_days_are_consecutive_jalali_days() {
        let mut previous = to_jalali(ymd(2023, 1, 1)).unwrap();
        let mut date = ymd(2023, 1, 2);
        while date <= ymd(2026, 12, 31) {
            let current = to_jalali(date).unwrap();
            assert!(current > previous, "{} should follow {}", current, previous);
            previous = current;
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_invalid_day_is_rejected() {
        assert_eq!(
            to_gregorian(1402, 12, 30),
            Err(CalendarError::InvalidDate {
                year: 1402,
                month: 12,
                day: 30,
                days_in_month: 29
            })
        );
        assert!(matches!(
            to_gregorian(1403, 7, 31),
            Err(CalendarError::InvalidDate { .. })
        ));
        assert!(matches!(
            to_gregorian(1403, 1, 0),
            Err(CalendarError::InvalidDate { .. })
        ));
        assert_eq!(
            to_gregorian(1403, 13, 1),
            Err(CalendarError::InvalidMonth { month: 13 })
        );
        assert!(to_gregorian(1403, 12, 30).is_ok());
    }

    #[test]
    fn test_out_of_range_years() {
        assert_eq!(
            to_gregorian(3178, 1, 1),
            Err(CalendarError::YearOutOfRange { year: 3178 })
        );
        assert_eq!(
            to_gregorian(0, 1, 1),
            Err(CalendarError::YearOutOfRange { year: 0 })
        );
        assert!(matches!(
            to_jalali(ymd(4000, 1, 1)),
            Err(CalendarError::GregorianOutOfRange { .. })
        ));
        assert!(matches!(
            to_jalali(ymd(622, 3, 21)),
            Err(CalendarError::GregorianOutOfRange { .. })
        ));
        assert_eq!(to_jalali(ymd(622, 3, 22)).unwrap(), jalali(1, 1, 1));
        assert!(to_jalali(ymd(3798, 12, 31)).is_ok());
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), Some("فروردین"));
        assert_eq!(month_name(7), Some("مهر"));
        assert_eq!(month_name(12), Some("اسفند"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
        assert_eq!(jalali(1403, 2, 1).month_name(), "اردیبهشت");
    }

    #[test]
    fn test_weekday_names_start_on_saturday() {
        assert_eq!(persian_weekday_index(Weekday::Sat), 0);
        assert_eq!(persian_weekday_index(Weekday::Sun), 1);
        assert_eq!(persian_weekday_index(Weekday::Fri), 6);
        assert_eq!(weekday_name(Weekday::Sat), "شنبه");
        assert_eq!(weekday_name(Weekday::Fri), "جمعه");

        assert_eq!(weekday_name_from_sunday(0), Some("یکشنبه"));
        assert_eq!(weekday_name_from_sunday(5), Some("جمعه"));
        assert_eq!(weekday_name_from_sunday(6), Some("شنبه"));
        assert_eq!(weekday_name_from_sunday(7), None);

        // Nowruz 1403 fell on a Wednesday
        let nowruz = jalali(1403, 1, 1);
        assert_eq!(weekday_name(nowruz.weekday().unwrap()), "چهارشنبه");
        assert!(is_off_day(Weekday::Fri));
        assert!(!is_off_day(Weekday::Sun));
    }

    #[test]
    fn test_storage_format() {
        assert_eq!(format_for_storage(&jalali(1403, 1, 1)).unwrap(), "2024-03-20");
        assert_eq!(format_for_storage(&jalali(1403, 12, 30)).unwrap(), "2025-03-20");
        assert_eq!(from_storage("2024-04-19").unwrap(), jalali(1403, 1, 31));

        assert!(matches!(
            from_storage("2024-3-20"),
            Err(CalendarError::InvalidStorageDate(_))
        ));
        assert!(matches!(
            from_storage("2024-02-30"),
            Err(CalendarError::InvalidStorageDate(_))
        ));
        assert!(matches!(
            from_storage("20240320xx"),
            Err(CalendarError::InvalidStorageDate(_))
        ));
    }

    #[test]
    fn test_month_range() {
        let farvardin = JalaliMonth::new(1403, 1).unwrap();
        assert_eq!(
            month_range(farvardin).unwrap(),
            ("2024-03-20".to_string(), "2024-04-19".to_string())
        );

        let esfand_leap = JalaliMonth::new(1403, 12).unwrap();
        assert_eq!(
            month_range(esfand_leap).unwrap(),
            ("2025-02-19".to_string(), "2025-03-20".to_string())
        );

        let esfand_common = JalaliMonth::new(1402, 12).unwrap();
        assert_eq!(
            month_range(esfand_common).unwrap(),
            ("2024-02-20".to_string(), "2024-03-19".to_string())
        );
    }

    #[test]
    fn test_month_navigation_rolls_over_years() {
        let esfand = JalaliMonth::new(1402, 12).unwrap();
        let farvardin = esfand.next().unwrap();
        assert_eq!((farvardin.year(), farvardin.month()), (1403, 1));
        assert_eq!(farvardin.previous().unwrap(), esfand);

        let mehr = JalaliMonth::new(1403, 7).unwrap();
        assert_eq!(mehr.next().unwrap(), JalaliMonth::new(1403, 8).unwrap());
        assert_eq!(mehr.previous().unwrap(), JalaliMonth::new(1403, 6).unwrap());

        assert!(JalaliMonth::new(MAX_YEAR, 12).unwrap().next().is_err());
        assert!(JalaliMonth::new(MIN_YEAR, 1).unwrap().previous().is_err());
    }

    #[test]
    fn test_month_containing_date() {
        let month = JalaliMonth::containing(ymd(2024, 4, 19)).unwrap();
        assert_eq!(month, JalaliMonth::new(1403, 1).unwrap());
        assert_eq!(month.to_string(), "فروردین 1403");
    }

    #[test]
    fn test_parse_user_input() {
        assert_eq!("1403/01/15".parse::<JalaliDate>().unwrap(), jalali(1403, 1, 15));
        assert_eq!("1403-1-15".parse::<JalaliDate>().unwrap(), jalali(1403, 1, 15));
        assert_eq!("۱۴۰۳/۰۱/۱۵".parse::<JalaliDate>().unwrap(), jalali(1403, 1, 15));
        assert_eq!(" 1403.12.30 ".parse::<JalaliDate>().unwrap(), jalali(1403, 12, 30));

        assert!(matches!(
            "1402/12/30".parse::<JalaliDate>(),
            Err(CalendarError::InvalidDate { .. })
        ));
        assert!(matches!(
            "1403/01".parse::<JalaliDate>(),
            Err(CalendarError::Parse(_))
        ));
        assert!(matches!(
            "abcd/01/01".parse::<JalaliDate>(),
            Err(CalendarError::Parse(_))
        ));
    }

    #[test]
    fn test_display_forms() {
        let date = jalali(1403, 1, 1);
        assert_eq!(date.to_string(), "1403/01/01");
        assert_eq!(format_persian(&date), "۱ فروردین ۱۴۰۳");
        assert_eq!(to_persian_digits("8.5 h"), "۸.۵ h");
    }
}
