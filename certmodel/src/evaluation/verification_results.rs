//! Named verification results for a certificate

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Name of the result recording whether the evaluation date falls within the validity interval
pub const CERT_TIME_VALIDITY_OK: &str = "CERT_TIME_VALIDITY_OK";

/// Name of the result recording whether the certificate was not found to be revoked as of the
/// evaluation date. The value is unset when revocation status was not checked or not found.
pub const CERT_NOT_REVOKED: &str = "CERT_NOT_REVOKED";

/// `VerificationResults` maps check names to a pass/fail value, or to None when the check was
/// not performed or had no answer.
///
/// A base set of results is supplied by an external verifier (e.g., for signature or chain
/// checks) and is copied through unchanged when results are computed for a particular date.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VerificationResults(BTreeMap<String, Option<bool>>);

impl VerificationResults {
    /// Creates an empty set of results
    pub fn new() -> Self {
        Self::default()
    }

    /// `set` records a result, replacing any previous value for the same name.
    pub fn set(&mut self, name: &str, value: Option<bool>) {
        self.0.insert(name.to_string(), value);
    }

    /// `get` returns the value recorded for a check, or None if no value was recorded. The inner
    /// option is None when the check was recorded as unset.
    pub fn get(&self, name: &str) -> Option<Option<bool>> {
        self.0.get(name).copied()
    }

    /// Iterates over (name, value) pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Option<bool>)> {
        self.0.iter()
    }

    /// Number of recorded results
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no results were recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `evaluate` returns true if every recorded result is true. An unset [`CERT_NOT_REVOKED`]
    /// value passes only when `ignore_missing_crl_check` is true; any other unset value fails.
    pub fn evaluate(&self, ignore_missing_crl_check: bool) -> bool {
        self.0.iter().all(|(name, value)| match value {
            Some(v) => *v,
            None => ignore_missing_crl_check && name == CERT_NOT_REVOKED,
        })
    }
}

impl From<BTreeMap<String, Option<bool>>> for VerificationResults {
    fn from(map: BTreeMap<String, Option<bool>>) -> Self {
        VerificationResults(map)
    }
}

#[test]
fn evaluate_results() {
    let mut vr = VerificationResults::new();
    assert!(vr.is_empty());
    vr.set("SIGNATURE_OK", Some(true));
    vr.set(CERT_TIME_VALIDITY_OK, Some(true));
    vr.set(CERT_NOT_REVOKED, None);
    assert_eq!(3, vr.len());
    assert!(!vr.evaluate(false));
    assert!(vr.evaluate(true));

    vr.set("SIGNATURE_OK", None);
    assert!(!vr.evaluate(true));

    vr.set("SIGNATURE_OK", Some(true));
    vr.set(CERT_NOT_REVOKED, Some(false));
    assert!(!vr.evaluate(true));
    assert_eq!(Some(Some(false)), vr.get(CERT_NOT_REVOKED));
    assert_eq!(None, vr.get("UNKNOWN"));
}
