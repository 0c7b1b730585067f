//! Date parsing primitives shared by validity intervals, signing time attributes and time stamp tokens

use alloc::format;
use alloc::string::String;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use der::asn1::{GeneralizedTime, UtcTime};
use x509_cert::time::Time;

use crate::util::error::*;

/// `generalized_time` returns a Time value as a `YYYYMMDDHHMMSSZ` string. GeneralizedTime values are
/// rendered as is, UTCTime values have their two digit year expanded per RFC 5280 section 4.1.2.5.1.
pub fn generalized_time(time: &Time) -> Result<String> {
    match time {
        Time::GeneralTime(gt) => Ok(generalized_time_string(gt)),
        Time::UtcTime(ut) => expand_utc_time(&utc_time_string(ut)),
    }
}

/// `generalized_time_string` renders a GeneralizedTime value as a `YYYYMMDDHHMMSSZ` string.
pub fn generalized_time_string(gt: &GeneralizedTime) -> String {
    let dt = gt.to_date_time();
    format!(
        "{:04}{:02}{:02}{:02}{:02}{:02}Z",
        dt.year(),
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minutes(),
        dt.seconds()
    )
}

/// `utc_time_string` renders a UTCTime value in its two digit year `YYMMDDHHMMSSZ` form.
pub fn utc_time_string(ut: &UtcTime) -> String {
    let dt = ut.to_date_time();
    format!(
        "{:02}{:02}{:02}{:02}{:02}{:02}Z",
        dt.year() % 100,
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minutes(),
        dt.seconds()
    )
}

/// `expand_utc_time` prefixes a `YYMMDDHHMMSSZ` string with a century: years 50 through 99 are
/// placed in 1900s and years 00 through 49 are placed in the 2000s.
pub fn expand_utc_time(utc_time: &str) -> Result<String> {
    let short_year = parse_digits(utc_time, 0, 2).ok_or(Error::MalformedDate)?;
    if short_year >= 50 {
        Ok(format!("19{}", utc_time))
    } else {
        Ok(format!("20{}", utc_time))
    }
}

/// `parse_date` parses a `YYYYMMDDHHMM[SS][Z]` string. Seconds that are absent or malformed
/// default to 0 and seconds greater than 59 are clamped to 59. Any other malformed component
/// results in [`Error::MalformedDate`].
///
/// The seconds tolerance only matters for strings supplied by callers. Strings produced by
/// [`generalized_time`] from a decoded `Time` always carry valid seconds, because x509-cert
/// rejects times without seconds or with seconds above 59.
pub fn parse_date(date: &str) -> Result<NaiveDateTime> {
    let year = parse_digits(date, 0, 4).ok_or(Error::MalformedDate)?;
    let month = parse_digits(date, 4, 6).ok_or(Error::MalformedDate)?;
    let day = parse_digits(date, 6, 8).ok_or(Error::MalformedDate)?;
    let hour = parse_digits(date, 8, 10).ok_or(Error::MalformedDate)?;
    let minute = parse_digits(date, 10, 12).ok_or(Error::MalformedDate)?;
    let second = parse_digits(date, 12, 14).unwrap_or(0).min(59);

    NaiveDate::from_ymd_opt(year as i32, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .ok_or(Error::MalformedDate)
}

/// `parse_date_with_fraction` parses a `YYYYMMDDHHMMSS[.fff...][Z]` string, retaining fractional
/// seconds with microsecond precision. Unlike [`parse_date`], seconds are required.
pub fn parse_date_with_fraction(date: &str) -> Result<NaiveDateTime> {
    let whole = date.get(0..14).ok_or(Error::MalformedDate)?;
    if parse_digits(whole, 12, 14).is_none() {
        return Err(Error::MalformedDate);
    }
    let base = parse_date(whole)?;

    let rest = date
        .get(14..)
        .ok_or(Error::MalformedDate)?
        .trim_end_matches('Z');
    if rest.is_empty() {
        return Ok(base);
    }

    let fraction = rest.strip_prefix('.').ok_or(Error::MalformedDate)?;
    if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::MalformedDate);
    }
    let mut micros = 0u32;
    for i in 0..6 {
        let digit = fraction.as_bytes().get(i).map(|b| (b - b'0') as u32);
        micros = micros * 10 + digit.unwrap_or(0);
    }

    base.with_nanosecond(micros * 1000).ok_or(Error::MalformedDate)
}

fn parse_digits(s: &str, start: usize, end: usize) -> Option<u32> {
    let part = s.get(start..end)?;
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use der::DateTime;

    #[test]
    fn two_digit_years() {
        assert_eq!("19500101120000Z", expand_utc_time("500101120000Z").unwrap());
        assert_eq!("20491231235959Z", expand_utc_time("491231235959Z").unwrap());
        assert_eq!(
            1950,
            parse_date(&expand_utc_time("500101120000Z").unwrap())
                .unwrap()
                .year()
        );
        assert_eq!(
            2049,
            parse_date(&expand_utc_time("491231235959Z").unwrap())
                .unwrap()
                .year()
        );
        assert_eq!(Err(Error::MalformedDate), expand_utc_time("x91231235959Z"));
    }

    #[test]
    fn seconds_tolerance() {
        assert_eq!(59, parse_date("20200101120061Z").unwrap().second());
        assert_eq!(0, parse_date("202001011200").unwrap().second());
        assert_eq!(0, parse_date("202001011200Z").unwrap().second());
        assert_eq!(30, parse_date("20200101120030Z").unwrap().second());
    }

    #[test]
    fn malformed_components() {
        assert_eq!(Err(Error::MalformedDate), parse_date("2020AB01120000Z"));
        assert_eq!(Err(Error::MalformedDate), parse_date("20201301120000Z"));
        assert_eq!(Err(Error::MalformedDate), parse_date("2020"));
        assert_eq!(Err(Error::MalformedDate), parse_date("+0200101120000Z"));
    }

    #[test]
    fn fractional_seconds() {
        let dt = parse_date_with_fraction("20230405060708.5Z").unwrap();
        assert_eq!(500_000, dt.nanosecond() / 1000);
        assert_eq!(8, dt.second());
        let dt = parse_date_with_fraction("20230405060708.1234567Z").unwrap();
        assert_eq!(123_456, dt.nanosecond() / 1000);
        let dt = parse_date_with_fraction("20230405060708Z").unwrap();
        assert_eq!(0, dt.nanosecond());
        assert_eq!(Err(Error::MalformedDate), parse_date_with_fraction("202304050607Z"));
        assert_eq!(Err(Error::MalformedDate), parse_date_with_fraction("20230405060708.Z"));
        assert_eq!(Err(Error::MalformedDate), parse_date_with_fraction("20230405060708,5Z"));
    }

    #[test]
    fn time_choices() {
        let dt = DateTime::new(2021, 3, 4, 5, 6, 7).unwrap();
        let ut = Time::UtcTime(UtcTime::from_date_time(dt).unwrap());
        assert_eq!("20210304050607Z", generalized_time(&ut).unwrap());
        let dt = DateTime::new(2051, 3, 4, 5, 6, 7).unwrap();
        let gt = Time::GeneralTime(GeneralizedTime::from_date_time(dt));
        assert_eq!("20510304050607Z", generalized_time(&gt).unwrap());
        let dt = DateTime::new(1985, 12, 31, 23, 59, 59).unwrap();
        let ut = Time::UtcTime(UtcTime::from_date_time(dt).unwrap());
        assert_eq!("19851231235959Z", generalized_time(&ut).unwrap());
    }
}
