mod cert_utils;
use cert_utils::*;

use certmodel::*;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use num_bigint::BigInt;

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
}

fn signature_ok() -> VerificationResults {
    let mut vr = VerificationResults::new();
    vr.set("SIGNATURE_OK", Some(true));
    vr
}

fn issuer_string() -> String {
    "C=US, CN=Example CA, O=Example".to_string()
}

#[test]
fn time_validity_boundaries() {
    let xc = X509Certificate::try_from(&ten_day_certificate(&[0x01])).unwrap();
    let start = at(2020, 1, 1, 0, 0, 0);
    let end = start + Duration::days(10);
    let one = Duration::seconds(1);

    assert!(!xc.time_validity_at_date(&(start - one)));
    assert!(xc.time_validity_at_date(&start));
    assert!(xc.time_validity_at_date(&(start + Duration::days(5))));
    assert!(xc.time_validity_at_date(&end));
    assert!(!xc.time_validity_at_date(&(end + one)));
}

#[test]
fn revocation_results() {
    let xc = X509Certificate::try_from(&ten_day_certificate(&[0x10, 0x01])).unwrap();
    let mut crls = RevocationMap::new();
    crls.add(&issuer_string(), BigInt::from(0x1001), at(2020, 1, 5, 12, 0, 0));

    assert_eq!(
        Some(true),
        xc.crl_validity_at_date(&crls, &at(2020, 1, 5, 11, 59, 59))
            .unwrap()
    );
    assert_eq!(
        Some(false),
        xc.crl_validity_at_date(&crls, &at(2020, 1, 5, 12, 0, 0))
            .unwrap()
    );

    // not listed
    let other = X509Certificate::try_from(&ten_day_certificate(&[0x10, 0x02])).unwrap();
    assert_eq!(
        None,
        other
            .crl_validity_at_date(&crls, &at(2020, 1, 5, 12, 0, 0))
            .unwrap()
    );

    // checking disabled
    let mut settings = ModelSettings::new();
    settings.check_crl = false;
    let unchecked =
        X509Certificate::from_certificate_with_settings(&ten_day_certificate(&[0x10, 0x01]), &settings)
            .unwrap();
    assert!(!unchecked.check_crl);
    assert_eq!(
        None,
        unchecked
            .crl_validity_at_date(&crls, &at(2020, 1, 6, 0, 0, 0))
            .unwrap()
    );
}

#[test]
fn unverified_certificate_is_never_valid() {
    let xc = X509Certificate::try_from(&ten_day_certificate(&[0x01])).unwrap();
    let crls = RevocationMap::new();
    assert!(!xc.valid_at_date(&at(2020, 1, 2, 0, 0, 0), &crls, true).unwrap());
    assert!(!xc.is_verified(true));
}

#[test]
fn verified_certificate_validity() {
    let vc = X509Certificate::try_from(&ten_day_certificate(&[0x01]))
        .unwrap()
        .attach_verification_results(signature_ok());
    let crls = RevocationMap::new();
    let inside = at(2020, 1, 2, 0, 0, 0);
    let outside = at(2020, 2, 1, 0, 0, 0);

    let results = vc.verification_results_at_date(&crls, &inside).unwrap();
    assert_eq!(3, results.len());
    assert_eq!(Some(Some(true)), results.get("SIGNATURE_OK"));
    assert_eq!(Some(Some(true)), results.get(CERT_TIME_VALIDITY_OK));
    assert_eq!(Some(None), results.get(CERT_NOT_REVOKED));

    // revocation status not found
    assert!(!vc.valid_at_date(&inside, &crls, false).unwrap());
    assert!(vc.valid_at_date(&inside, &crls, true).unwrap());

    let mut settings = ModelSettings::new();
    assert!(!vc.valid_at_date_with_settings(&inside, &crls, &settings).unwrap());
    settings.ignore_missing_crl_check = true;
    assert!(vc.valid_at_date_with_settings(&inside, &crls, &settings).unwrap());

    assert!(!vc.valid_at_date(&outside, &crls, true).unwrap());
}

#[test]
fn revoked_certificate_validity() {
    let vc = X509Certificate::try_from(&ten_day_certificate(&[0x01]))
        .unwrap()
        .attach_verification_results(signature_ok());
    let mut crls = RevocationMap::new();
    crls.add(&issuer_string(), BigInt::from(1), at(2020, 1, 5, 0, 0, 0));

    assert!(vc.valid_at_date(&at(2020, 1, 4, 0, 0, 0), &crls, false).unwrap());
    assert!(!vc.valid_at_date(&at(2020, 1, 6, 0, 0, 0), &crls, false).unwrap());
    assert!(!vc.valid_at_date(&at(2020, 1, 6, 0, 0, 0), &crls, true).unwrap());
}

#[test]
fn failed_base_result() {
    let mut base = signature_ok();
    base.set("CHAIN_OK", Some(false));
    let vc = X509Certificate::try_from(&ten_day_certificate(&[0x01]))
        .unwrap()
        .attach_verification_results(base);
    assert!(!vc.is_verified(true));
    assert!(!vc
        .valid_at_date(&at(2020, 1, 2, 0, 0, 0), &RevocationMap::new(), true)
        .unwrap());
}

#[test]
fn evaluation_is_repeatable() {
    let vc = X509Certificate::try_from(&ten_day_certificate(&[0x01]))
        .unwrap()
        .attach_verification_results(signature_ok());
    let crls = RevocationMap::new();
    let outside = at(2021, 1, 1, 0, 0, 0);
    let inside = at(2020, 1, 3, 0, 0, 0);

    // an evaluation at one date does not affect an evaluation at another
    assert!(!vc.valid_at_date(&outside, &crls, true).unwrap());
    assert!(vc.valid_at_date(&inside, &crls, true).unwrap());
    assert!(vc.valid_at_date(&inside, &crls, true).unwrap());
    assert_eq!(
        vc.verification_results_at_date(&crls, &inside).unwrap(),
        vc.verification_results_at_date(&crls, &inside).unwrap()
    );

    // attached results are left as supplied
    assert_eq!(&signature_ok(), vc.verification_results());
    assert!(vc.is_verified(false));

    let (cert, results) = vc.into_parts();
    assert_eq!(1, results.len());
    assert!(cert.time_validity_at_date(&inside));
}

struct FailingLookup;

impl RevocationLookup for FailingLookup {
    fn certificate_rev_date(
        &self,
        _issuer: &str,
        _serial: &BigInt,
    ) -> certmodel::Result<Option<NaiveDateTime>> {
        Err(Error::RevocationLookup)
    }
}

#[test]
fn lookup_failure_propagates() {
    let vc = X509Certificate::try_from(&ten_day_certificate(&[0x01]))
        .unwrap()
        .attach_verification_results(signature_ok());
    assert_eq!(
        Err(Error::RevocationLookup),
        vc.valid_at_date(&at(2020, 1, 2, 0, 0, 0), &FailingLookup, true)
    );
}
