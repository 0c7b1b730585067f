//! Validity interval of a certificate

use alloc::string::String;

use chrono::NaiveDateTime;
use x509_cert::time::Validity;

use crate::util::{date_utils::*, error::*};

/// `ValidityInterval` holds the notBefore and notAfter values of a certificate as
/// `YYYYMMDDHHMMSSZ` strings with four digit years. Values are UTC times.
///
/// Both values are parsed when the interval is built, so an interval that was built successfully
/// always yields dates from [`valid_from_as_datetime`](ValidityInterval::valid_from_as_datetime)
/// and [`valid_to_as_datetime`](ValidityInterval::valid_to_as_datetime).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidityInterval {
    /// notBefore as a four digit year string
    pub valid_from: String,
    /// notAfter as a four digit year string
    pub valid_to: String,
    from: NaiveDateTime,
    to: NaiveDateTime,
}

impl ValidityInterval {
    /// `new` builds an interval from a pair of `YYYYMMDDHHMM[SS][Z]` strings.
    ///
    /// Missing seconds and seconds greater than 59 are tolerated here, as in [`parse_date`].
    /// Intervals built from a decoded [`Validity`] never need this, since x509-cert rejects
    /// such times when decoding a certificate.
    pub fn new(valid_from: &str, valid_to: &str) -> Result<Self> {
        Ok(ValidityInterval {
            valid_from: valid_from.into(),
            valid_to: valid_to.into(),
            from: parse_date(valid_from)?,
            to: parse_date(valid_to)?,
        })
    }

    /// `valid_from_as_datetime` returns notBefore as a calendar date and time
    pub fn valid_from_as_datetime(&self) -> NaiveDateTime {
        self.from
    }

    /// `valid_to_as_datetime` returns notAfter as a calendar date and time
    pub fn valid_to_as_datetime(&self) -> NaiveDateTime {
        self.to
    }

    /// `contains` returns true if `date` falls within the interval, inclusive at both ends.
    pub fn contains(&self, date: &NaiveDateTime) -> bool {
        self.from <= *date && *date <= self.to
    }
}

/// Times decoded by x509-cert always carry seconds in range, so the string tolerance of
/// [`ValidityInterval::new`] does not come into play.
impl TryFrom<&Validity> for ValidityInterval {
    type Error = Error;

    fn try_from(validity: &Validity) -> Result<Self> {
        ValidityInterval::new(
            &generalized_time(&validity.not_before)?,
            &generalized_time(&validity.not_after)?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Timelike};
    use der::{asn1::UtcTime, DateTime};
    use x509_cert::time::Time;

    #[test]
    fn from_validity() {
        let validity = Validity {
            not_before: Time::UtcTime(
                UtcTime::from_date_time(DateTime::new(2020, 1, 1, 0, 0, 0).unwrap()).unwrap(),
            ),
            not_after: Time::UtcTime(
                UtcTime::from_date_time(DateTime::new(2030, 12, 31, 23, 59, 59).unwrap())
                    .unwrap(),
            ),
        };
        let vi = ValidityInterval::try_from(&validity).unwrap();
        assert_eq!("20200101000000Z", vi.valid_from);
        assert_eq!("20301231235959Z", vi.valid_to);
        assert_eq!(59, vi.valid_to_as_datetime().second());
    }

    #[test]
    fn inclusive_bounds() {
        let vi = ValidityInterval::new("20200101000000Z", "20201231235959Z").unwrap();
        let from = vi.valid_from_as_datetime();
        let to = vi.valid_to_as_datetime();
        assert!(vi.contains(&from));
        assert!(vi.contains(&to));
        assert!(!vi.contains(&(from - Duration::seconds(1))));
        assert!(!vi.contains(&(to + Duration::seconds(1))));
    }

    #[test]
    fn malformed() {
        assert_eq!(
            Err(Error::MalformedDate),
            ValidityInterval::new("2020XX01000000Z", "20201231235959Z")
        );
        assert_eq!(
            Err(Error::MalformedDate),
            ValidityInterval::new("20200101000000Z", "2020")
        );
    }

    #[test]
    fn lenient_strings() {
        let vi = ValidityInterval::new("202001011200", "20200101120061Z").unwrap();
        assert_eq!(0, vi.valid_from_as_datetime().second());
        assert_eq!(59, vi.valid_to_as_datetime().second());
        assert_eq!("202001011200", vi.valid_from);
        assert!(vi.contains(&vi.valid_to_as_datetime()));
    }
}
