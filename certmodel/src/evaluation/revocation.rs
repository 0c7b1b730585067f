//! Revocation status boundary

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use chrono::NaiveDateTime;
use num_bigint::BigInt;

use crate::util::error::*;

/// `RevocationLookup` is implemented by sources of revocation status, such as a CRL cache.
///
/// Implementations return the revocation date of the certificate identified by the canonical
/// string form of its issuer [`Name`](crate::Name) and its serial number, or None when the
/// certificate is not listed. None means "not found", not "known to be good".
pub trait RevocationLookup {
    /// Returns the revocation date for the certificate, if the certificate is listed.
    fn certificate_rev_date(&self, issuer: &str, serial: &BigInt) -> Result<Option<NaiveDateTime>>;
}

/// In-memory [`RevocationLookup`] keyed by issuer name and serial number
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RevocationMap {
    entries: BTreeMap<(String, BigInt), NaiveDateTime>,
}

impl RevocationMap {
    /// Creates an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// `add` records a revocation, replacing any previous entry for the same certificate.
    pub fn add(&mut self, issuer: &str, serial: BigInt, revocation_date: NaiveDateTime) {
        self.entries
            .insert((issuer.to_string(), serial), revocation_date);
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RevocationLookup for RevocationMap {
    fn certificate_rev_date(&self, issuer: &str, serial: &BigInt) -> Result<Option<NaiveDateTime>> {
        Ok(self
            .entries
            .get(&(issuer.to_string(), serial.clone()))
            .copied())
    }
}
