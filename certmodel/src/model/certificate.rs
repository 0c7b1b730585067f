//! Certificate and TBSCertificate models and certificate-level validity evaluation

use alloc::format;
use alloc::string::ToString;
use alloc::vec::Vec;

use chrono::NaiveDateTime;
use const_oid::ObjectIdentifier;
use num_bigint::BigInt;
use x509_cert::TbsCertificate;

use crate::{
    evaluation::{revocation::*, settings::*, verification_results::*},
    model::{
        extension_registry::*, extensions::*, name::Name, public_key_info::PublicKeyInfo,
        validity::ValidityInterval,
    },
    util::{error::*, logging::*},
};

/// `KnownExtensions` holds one slot per registered extension kind. Slots are unset unless the
/// corresponding extension was present and decoded. When an extension kind occurs more than
/// once, the last occurrence wins.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[allow(missing_docs)]
pub struct KnownExtensions {
    pub subject_alt_name: Option<SubjectAltNameExt>,
    pub issuer_alt_name: Option<SubjectAltNameExt>,
    pub authority_key_id: Option<AuthorityKeyIdExt>,
    pub subject_key_id: Option<SubjectKeyIdExt>,
    pub basic_constraints: Option<BasicConstraintsExt>,
    pub key_usage: Option<KeyUsageExt>,
    pub extended_key_usage: Option<ExtendedKeyUsageExt>,
    pub certificate_policies: Option<CertificatePoliciesExt>,
    pub crl_distribution_points: Option<CrlDistributionPointsExt>,
    pub qc_statements: Option<QcStatementsExt>,
    pub authority_info_access: Option<InfoAccessExt>,
    pub subject_info_access: Option<InfoAccessExt>,
    pub policy_constraints: Option<PolicyConstraintsExt>,
    pub name_constraints: Option<NameConstraintsExt>,
    pub inhibit_any_policy: Option<InhibitAnyPolicyExt>,
    pub netscape_cert_type: Option<NetscapeCertTypeExt>,
    pub ocsp_no_check: Option<MarkerExt>,
    pub apple_submission_certificate: Option<MarkerExt>,
    pub apple_development_certificate: Option<MarkerExt>,
    pub mac_app_software_development_signing: Option<MarkerExt>,
    pub mac_app_software_submission_signing: Option<MarkerExt>,
}

impl KnownExtensions {
    /// `record` fills the slot for a decoded extension. Extensions retained as raw values are
    /// ignored.
    pub fn record(&mut self, ext: &Extension) {
        match (&ext.value, ext.ext_type) {
            (ExtensionValue::SubjectAltName(v), _) => self.subject_alt_name = Some(v.clone()),
            (ExtensionValue::IssuerAltName(v), _) => self.issuer_alt_name = Some(v.clone()),
            (ExtensionValue::AuthorityKeyId(v), _) => self.authority_key_id = Some(v.clone()),
            (ExtensionValue::SubjectKeyId(v), _) => self.subject_key_id = Some(v.clone()),
            (ExtensionValue::BasicConstraints(v), _) => self.basic_constraints = Some(*v),
            (ExtensionValue::KeyUsage(v), _) => self.key_usage = Some(*v),
            (ExtensionValue::ExtendedKeyUsage(v), _) => self.extended_key_usage = Some(v.clone()),
            (ExtensionValue::CertificatePolicies(v), _) => {
                self.certificate_policies = Some(v.clone())
            }
            (ExtensionValue::CrlDistributionPoints(v), _) => {
                self.crl_distribution_points = Some(v.clone())
            }
            (ExtensionValue::QcStatements(v), _) => self.qc_statements = Some(v.clone()),
            (ExtensionValue::AuthorityInfoAccess(v), _) => {
                self.authority_info_access = Some(v.clone())
            }
            (ExtensionValue::SubjectInfoAccess(v), _) => self.subject_info_access = Some(v.clone()),
            (ExtensionValue::PolicyConstraints(v), _) => self.policy_constraints = Some(*v),
            (ExtensionValue::NameConstraints(v), _) => self.name_constraints = Some(v.clone()),
            (ExtensionValue::InhibitAnyPolicy(v), _) => self.inhibit_any_policy = Some(*v),
            (ExtensionValue::NetscapeCertType(v), _) => self.netscape_cert_type = Some(*v),
            (ExtensionValue::Marker(m), Some(ExtensionKind::OcspNoCheck)) => {
                self.ocsp_no_check = Some(*m)
            }
            (ExtensionValue::Marker(m), Some(ExtensionKind::AppleSubmissionCertificate)) => {
                self.apple_submission_certificate = Some(*m)
            }
            (ExtensionValue::Marker(m), Some(ExtensionKind::AppleDevelopmentCertificate)) => {
                self.apple_development_certificate = Some(*m)
            }
            (ExtensionValue::Marker(m), Some(ExtensionKind::MacAppSoftwareDevelopmentSigning)) => {
                self.mac_app_software_development_signing = Some(*m)
            }
            (ExtensionValue::Marker(m), Some(ExtensionKind::MacAppSoftwareSubmissionSigning)) => {
                self.mac_app_software_submission_signing = Some(*m)
            }
            _ => {}
        }
    }
}

/// `Certificate` models a TBSCertificate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Certificate {
    /// Encoded version value, i.e., 2 for v3 certificates
    pub version: u8,
    /// Serial number
    pub serial_number: BigInt,
    /// Signature algorithm from the TBSCertificate
    pub signature_algorithm: ObjectIdentifier,
    /// Issuer name
    pub issuer: Name,
    /// Validity interval
    pub validity: ValidityInterval,
    /// Subject name
    pub subject: Name,
    /// Subject public key
    pub pub_key_info: PublicKeyInfo,
    /// issuerUniqueID
    pub issuer_uid: Option<Vec<u8>>,
    /// subjectUniqueID
    pub subject_uid: Option<Vec<u8>>,
    /// Extensions in the order encountered
    pub extensions: Vec<Extension>,
    /// Decoded extensions by kind
    pub known_extensions: KnownExtensions,
}

macro_rules! known_extension_getter {
    ($(#[$doc:meta])* $name:ident, $t:ty) => {
        $(#[$doc])*
        pub fn $name(&self) -> Option<&$t> {
            self.known_extensions.$name.as_ref()
        }
    };
}

impl Certificate {
    known_extension_getter!(
        /// Decoded subject alternative name extension, if present
        subject_alt_name,
        SubjectAltNameExt
    );
    known_extension_getter!(
        /// Decoded issuer alternative name extension, if present
        issuer_alt_name,
        SubjectAltNameExt
    );
    known_extension_getter!(
        /// Decoded authority key identifier extension, if present
        authority_key_id,
        AuthorityKeyIdExt
    );
    known_extension_getter!(
        /// Decoded subject key identifier extension, if present
        subject_key_id,
        SubjectKeyIdExt
    );
    known_extension_getter!(
        /// Decoded basic constraints extension, if present
        basic_constraints,
        BasicConstraintsExt
    );
    known_extension_getter!(
        /// Decoded key usage extension, if present
        key_usage,
        KeyUsageExt
    );
    known_extension_getter!(
        /// Decoded extended key usage extension, if present
        extended_key_usage,
        ExtendedKeyUsageExt
    );
    known_extension_getter!(
        /// Decoded certificate policies extension, if present
        certificate_policies,
        CertificatePoliciesExt
    );
    known_extension_getter!(
        /// Decoded CRL distribution points extension, if present
        crl_distribution_points,
        CrlDistributionPointsExt
    );
    known_extension_getter!(
        /// Decoded QC statements extension, if present
        qc_statements,
        QcStatementsExt
    );
    known_extension_getter!(
        /// Decoded authority information access extension, if present
        authority_info_access,
        InfoAccessExt
    );
    known_extension_getter!(
        /// Decoded subject information access extension, if present
        subject_info_access,
        InfoAccessExt
    );
    known_extension_getter!(
        /// Decoded policy constraints extension, if present
        policy_constraints,
        PolicyConstraintsExt
    );
    known_extension_getter!(
        /// Decoded name constraints extension, if present
        name_constraints,
        NameConstraintsExt
    );
    known_extension_getter!(
        /// Decoded inhibit any policy extension, if present
        inhibit_any_policy,
        InhibitAnyPolicyExt
    );
    known_extension_getter!(
        /// Decoded Netscape certificate type extension, if present
        netscape_cert_type,
        NetscapeCertTypeExt
    );

    /// `extension` returns the first extension with the given OID, decoded or not.
    pub fn extension(&self, oid: &ObjectIdentifier) -> Option<&Extension> {
        self.extensions.iter().find(|e| e.id == *oid)
    }

    /// `has_marker` returns true if a marker extension of the given kind is present.
    pub fn has_marker(&self, kind: ExtensionKind) -> bool {
        let ke = &self.known_extensions;
        match kind {
            ExtensionKind::OcspNoCheck => ke.ocsp_no_check.is_some(),
            ExtensionKind::AppleSubmissionCertificate => ke.apple_submission_certificate.is_some(),
            ExtensionKind::AppleDevelopmentCertificate => {
                ke.apple_development_certificate.is_some()
            }
            ExtensionKind::MacAppSoftwareDevelopmentSigning => {
                ke.mac_app_software_development_signing.is_some()
            }
            ExtensionKind::MacAppSoftwareSubmissionSigning => {
                ke.mac_app_software_submission_signing.is_some()
            }
            _ => false,
        }
    }
}

impl TryFrom<&TbsCertificate> for Certificate {
    type Error = Error;

    fn try_from(tbs: &TbsCertificate) -> Result<Self> {
        let serial_number = BigInt::from_signed_bytes_be(tbs.serial_number.as_bytes());
        let issuer = Name::try_from(&tbs.issuer)?;
        let validity = ValidityInterval::try_from(&tbs.validity)?;
        let subject = Name::try_from(&tbs.subject)?;
        let pub_key_info = PublicKeyInfo::try_from(&tbs.subject_public_key_info)?;

        let subject_str = subject.to_string();
        let mut extensions = Vec::new();
        let mut known_extensions = KnownExtensions::default();
        if let Some(exts) = &tbs.extensions {
            for ext in exts {
                let ext = Extension::new(ext, Some(subject_str.as_str()))?;
                known_extensions.record(&ext);
                extensions.push(ext);
            }
        }

        Ok(Certificate {
            version: tbs.version as u8,
            serial_number,
            signature_algorithm: tbs.signature.oid,
            issuer,
            validity,
            subject,
            pub_key_info,
            issuer_uid: tbs.issuer_unique_id.as_ref().map(|b| b.raw_bytes().to_vec()),
            subject_uid: tbs
                .subject_unique_id
                .as_ref()
                .map(|b| b.raw_bytes().to_vec()),
            extensions,
            known_extensions,
        })
    }
}

/// `X509Certificate` models a signed certificate that has not been through external
/// verification. Attach the results of verification with
/// [`attach_verification_results`](X509Certificate::attach_verification_results).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct X509Certificate {
    /// Outer signature algorithm
    pub signature_algorithm: ObjectIdentifier,
    /// Signature bytes
    pub signature: Vec<u8>,
    /// Certificate body
    pub tbs_certificate: Certificate,
    /// When false, revocation status is not looked up
    pub check_crl: bool,
}

impl TryFrom<&x509_cert::Certificate> for X509Certificate {
    type Error = Error;

    fn try_from(cert: &x509_cert::Certificate) -> Result<Self> {
        Ok(X509Certificate {
            signature_algorithm: cert.signature_algorithm.oid,
            signature: cert.signature.raw_bytes().to_vec(),
            tbs_certificate: Certificate::try_from(&cert.tbs_certificate)?,
            check_crl: true,
        })
    }
}

impl X509Certificate {
    /// `from_certificate_with_settings` builds a certificate model using the `check_crl` value
    /// from the settings.
    pub fn from_certificate_with_settings(
        cert: &x509_cert::Certificate,
        settings: &ModelSettings,
    ) -> Result<Self> {
        let mut retval = X509Certificate::try_from(cert)?;
        retval.check_crl = settings.check_crl;
        Ok(retval)
    }

    /// `attach_verification_results` consumes the certificate and returns a
    /// [`VerifiedCertificate`] carrying the results produced by an external verifier.
    pub fn attach_verification_results(self, results: VerificationResults) -> VerifiedCertificate {
        VerifiedCertificate {
            certificate: self,
            verification_results: results,
        }
    }

    /// `time_validity_at_date` returns true if the date falls within the validity interval,
    /// inclusive at both ends.
    pub fn time_validity_at_date(&self, date: &NaiveDateTime) -> bool {
        self.tbs_certificate.validity.contains(date)
    }

    /// `crl_validity_at_date` returns None when revocation checking is disabled or the
    /// certificate is not listed by the lookup, otherwise whether the date precedes the
    /// revocation date.
    pub fn crl_validity_at_date(
        &self,
        lookup: &dyn RevocationLookup,
        date: &NaiveDateTime,
    ) -> Result<Option<bool>> {
        if !self.check_crl {
            return Ok(None);
        }
        let tbs = &self.tbs_certificate;
        let issuer = tbs.issuer.to_string();
        match lookup.certificate_rev_date(&issuer, &tbs.serial_number)? {
            Some(rev_date) => {
                log_message_for_subject(
                    &CmLogLevels::CmInfo,
                    Some(tbs.subject.to_string().as_str()),
                    format!("Certificate revoked as of {}", rev_date).as_str(),
                );
                Ok(Some(*date < rev_date))
            }
            None => Ok(None),
        }
    }

    /// `verification_results_at_date` copies the base results and adds the time validity and
    /// revocation results for the given date.
    pub fn verification_results_at_date(
        &self,
        base: &VerificationResults,
        lookup: &dyn RevocationLookup,
        date: &NaiveDateTime,
    ) -> Result<VerificationResults> {
        let mut results = base.clone();
        results.set(CERT_TIME_VALIDITY_OK, Some(self.time_validity_at_date(date)));
        results.set(CERT_NOT_REVOKED, self.crl_validity_at_date(lookup, date)?);
        Ok(results)
    }

    /// `valid_at_date` always returns false since no verification results are attached.
    pub fn valid_at_date(
        &self,
        _date: &NaiveDateTime,
        _lookup: &dyn RevocationLookup,
        _ignore_missing_crl_check: bool,
    ) -> Result<bool> {
        log_message_for_subject(
            &CmLogLevels::CmDebug,
            Some(self.tbs_certificate.subject.to_string().as_str()),
            "Validity evaluated for certificate without verification results",
        );
        Ok(false)
    }

    /// `is_verified` always returns false since no verification results are attached.
    pub fn is_verified(&self, _ignore_missing_crl_check: bool) -> bool {
        false
    }
}

/// `VerifiedCertificate` pairs a certificate with the results produced by an external verifier.
/// The results are fixed once attached; evaluation at a date computes a fresh result set.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerifiedCertificate {
    certificate: X509Certificate,
    verification_results: VerificationResults,
}

impl VerifiedCertificate {
    /// The verified certificate
    pub fn certificate(&self) -> &X509Certificate {
        &self.certificate
    }

    /// The results attached by the verifier
    pub fn verification_results(&self) -> &VerificationResults {
        &self.verification_results
    }

    /// `into_parts` returns the certificate and its attached results.
    pub fn into_parts(self) -> (X509Certificate, VerificationResults) {
        (self.certificate, self.verification_results)
    }

    /// `verification_results_at_date` returns the attached results with the time validity and
    /// revocation results for the given date added.
    pub fn verification_results_at_date(
        &self,
        lookup: &dyn RevocationLookup,
        date: &NaiveDateTime,
    ) -> Result<VerificationResults> {
        self.certificate
            .verification_results_at_date(&self.verification_results, lookup, date)
    }

    /// `valid_at_date` returns true if every result for the given date passes. See
    /// [`VerificationResults::evaluate`].
    pub fn valid_at_date(
        &self,
        date: &NaiveDateTime,
        lookup: &dyn RevocationLookup,
        ignore_missing_crl_check: bool,
    ) -> Result<bool> {
        let results = self.verification_results_at_date(lookup, date)?;
        Ok(results.evaluate(ignore_missing_crl_check))
    }

    /// `valid_at_date_with_settings` is [`valid_at_date`](VerifiedCertificate::valid_at_date)
    /// with `ignore_missing_crl_check` taken from the settings.
    pub fn valid_at_date_with_settings(
        &self,
        date: &NaiveDateTime,
        lookup: &dyn RevocationLookup,
        settings: &ModelSettings,
    ) -> Result<bool> {
        self.valid_at_date(date, lookup, settings.ignore_missing_crl_check)
    }

    /// `is_verified` evaluates the attached results as they are.
    pub fn is_verified(&self, ignore_missing_crl_check: bool) -> bool {
        self.verification_results
            .evaluate(ignore_missing_crl_check)
    }
}
