//! Registry of supported certificate extensions and the [`Extension`] model
//!
//! Each supported extension type is described by an [`ExtensionDecoder`] that pairs the extension
//! OID with a kind and a function that decodes the DER encoded extension value into a typed
//! [`ExtensionValue`]. The registry is a static table and is immutable after initialization.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use const_oid::{
    db::rfc5280::{
        ID_CE_AUTHORITY_KEY_IDENTIFIER, ID_CE_BASIC_CONSTRAINTS, ID_CE_CERTIFICATE_POLICIES,
        ID_CE_CRL_DISTRIBUTION_POINTS, ID_CE_EXT_KEY_USAGE, ID_CE_INHIBIT_ANY_POLICY,
        ID_CE_ISSUER_ALT_NAME, ID_CE_KEY_USAGE, ID_CE_NAME_CONSTRAINTS, ID_CE_POLICY_CONSTRAINTS,
        ID_CE_SUBJECT_ALT_NAME, ID_CE_SUBJECT_KEY_IDENTIFIER, ID_PE_AUTHORITY_INFO_ACCESS,
        ID_PE_SUBJECT_INFO_ACCESS,
    },
    ObjectIdentifier,
};
use der::{asn1::Any, Decode};
use x509_cert::ext::pkix::{
    AuthorityInfoAccessSyntax, AuthorityKeyIdentifier, BasicConstraints, CertificatePolicies,
    CrlDistributionPoints, ExtendedKeyUsage, InhibitAnyPolicy, IssuerAltName, KeyUsage,
    NameConstraints, PolicyConstraints, SubjectAltName, SubjectInfoAccessSyntax,
    SubjectKeyIdentifier,
};

use crate::{
    asn1::{netscape::*, qc_statements::*},
    model::extensions::*,
    util::{error::*, logging::*, oid_tables::ID_PKIX_OCSP_NOCHECK},
};

/// Kinds of extensions known to the registry
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[allow(missing_docs)]
pub enum ExtensionKind {
    SubjectAltName,
    IssuerAltName,
    AuthorityKeyId,
    SubjectKeyId,
    BasicConstraints,
    KeyUsage,
    ExtendedKeyUsage,
    CertificatePolicies,
    CrlDistributionPoints,
    QcStatements,
    AuthorityInfoAccess,
    SubjectInfoAccess,
    PolicyConstraints,
    NameConstraints,
    InhibitAnyPolicy,
    NetscapeCertType,
    OcspNoCheck,
    AppleSubmissionCertificate,
    AppleDevelopmentCertificate,
    MacAppSoftwareDevelopmentSigning,
    MacAppSoftwareSubmissionSigning,
}

impl ExtensionKind {
    /// `as_str` returns the short name of the extension kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtensionKind::SubjectAltName => "subjAltNameExt",
            ExtensionKind::IssuerAltName => "issuerAltNameExt",
            ExtensionKind::AuthorityKeyId => "authKeyIdExt",
            ExtensionKind::SubjectKeyId => "subjKeyIdExt",
            ExtensionKind::BasicConstraints => "basicConstraintsExt",
            ExtensionKind::KeyUsage => "keyUsageExt",
            ExtensionKind::ExtendedKeyUsage => "extKeyUsageExt",
            ExtensionKind::CertificatePolicies => "certPoliciesExt",
            ExtensionKind::CrlDistributionPoints => "crlDistPointsExt",
            ExtensionKind::QcStatements => "statementsExt",
            ExtensionKind::AuthorityInfoAccess => "authInfoAccessExt",
            ExtensionKind::SubjectInfoAccess => "subjInfoAccessExt",
            ExtensionKind::PolicyConstraints => "policyConstraintsExt",
            ExtensionKind::NameConstraints => "nameConstraintsExt",
            ExtensionKind::InhibitAnyPolicy => "inhibitAnyPolicyExt",
            ExtensionKind::NetscapeCertType => "netscapeCertTypeExt",
            ExtensionKind::OcspNoCheck => "ocspNoCheckExt",
            ExtensionKind::AppleSubmissionCertificate => "appleSubmissionCertificateExt",
            ExtensionKind::AppleDevelopmentCertificate => "appleDevelopmentCertificateExt",
            ExtensionKind::MacAppSoftwareDevelopmentSigning => {
                "macApplicationSoftwareDevelopmentSigningExt"
            }
            ExtensionKind::MacAppSoftwareSubmissionSigning => {
                "macApplicationSoftwareSubmissionSigningExt"
            }
        }
    }
}

impl fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Value of an extension. Extensions that are not in the registry, and non-critical registered
/// extensions that failed to decode, are retained as the raw DER encoded extension value.
#[derive(Clone, Debug, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum ExtensionValue {
    SubjectAltName(SubjectAltNameExt),
    IssuerAltName(SubjectAltNameExt),
    AuthorityKeyId(AuthorityKeyIdExt),
    SubjectKeyId(SubjectKeyIdExt),
    BasicConstraints(BasicConstraintsExt),
    KeyUsage(KeyUsageExt),
    ExtendedKeyUsage(ExtendedKeyUsageExt),
    CertificatePolicies(CertificatePoliciesExt),
    CrlDistributionPoints(CrlDistributionPointsExt),
    QcStatements(QcStatementsExt),
    AuthorityInfoAccess(InfoAccessExt),
    SubjectInfoAccess(InfoAccessExt),
    PolicyConstraints(PolicyConstraintsExt),
    NameConstraints(NameConstraintsExt),
    InhibitAnyPolicy(InhibitAnyPolicyExt),
    NetscapeCertType(NetscapeCertTypeExt),
    Marker(MarkerExt),
    Raw(Vec<u8>),
}

/// Signature of the functions that decode an extension value
pub type ExtensionParser = fn(&[u8]) -> Result<ExtensionValue>;

/// Registry entry for a supported extension type
#[derive(Clone, Copy)]
pub struct ExtensionDecoder {
    /// Extension OID
    pub oid: ObjectIdentifier,
    /// Extension kind
    pub kind: ExtensionKind,
    /// Decodes the DER encoded extension value
    pub parse: ExtensionParser,
}

impl fmt::Debug for ExtensionDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExtensionDecoder({}, {})", self.oid, self.kind)
    }
}

macro_rules! extension_parser {
    ($fn_name:ident, $schema:ty, $variant:ident, $model:ty) => {
        fn $fn_name(enc: &[u8]) -> Result<ExtensionValue> {
            let decoded = <$schema>::from_der(enc)?;
            Ok(ExtensionValue::$variant(<$model>::try_from(&decoded)?))
        }
    };
}

extension_parser!(parse_san, SubjectAltName, SubjectAltName, SubjectAltNameExt);
extension_parser!(parse_ian, IssuerAltName, IssuerAltName, SubjectAltNameExt);
extension_parser!(
    parse_akid,
    AuthorityKeyIdentifier,
    AuthorityKeyId,
    AuthorityKeyIdExt
);
extension_parser!(parse_skid, SubjectKeyIdentifier, SubjectKeyId, SubjectKeyIdExt);
extension_parser!(
    parse_bc,
    BasicConstraints,
    BasicConstraints,
    BasicConstraintsExt
);
extension_parser!(parse_ku, KeyUsage, KeyUsage, KeyUsageExt);
extension_parser!(
    parse_eku,
    ExtendedKeyUsage,
    ExtendedKeyUsage,
    ExtendedKeyUsageExt
);
extension_parser!(
    parse_cp,
    CertificatePolicies,
    CertificatePolicies,
    CertificatePoliciesExt
);
extension_parser!(
    parse_crldp,
    CrlDistributionPoints,
    CrlDistributionPoints,
    CrlDistributionPointsExt
);
extension_parser!(parse_qc, QcStatements, QcStatements, QcStatementsExt);
extension_parser!(
    parse_aia,
    AuthorityInfoAccessSyntax,
    AuthorityInfoAccess,
    InfoAccessExt
);
extension_parser!(
    parse_sia,
    SubjectInfoAccessSyntax,
    SubjectInfoAccess,
    InfoAccessExt
);
extension_parser!(
    parse_pc,
    PolicyConstraints,
    PolicyConstraints,
    PolicyConstraintsExt
);
extension_parser!(parse_nc, NameConstraints, NameConstraints, NameConstraintsExt);
extension_parser!(
    parse_iap,
    InhibitAnyPolicy,
    InhibitAnyPolicy,
    InhibitAnyPolicyExt
);
extension_parser!(
    parse_nct,
    NetscapeCertType,
    NetscapeCertType,
    NetscapeCertTypeExt
);
extension_parser!(parse_marker, Any, Marker, MarkerExt);

/// Supported extension types
pub static EXTENSION_DECODERS: &[ExtensionDecoder] = &[
    ExtensionDecoder {
        oid: ID_CE_SUBJECT_ALT_NAME,
        kind: ExtensionKind::SubjectAltName,
        parse: parse_san,
    },
    ExtensionDecoder {
        oid: ID_CE_ISSUER_ALT_NAME,
        kind: ExtensionKind::IssuerAltName,
        parse: parse_ian,
    },
    ExtensionDecoder {
        oid: ID_CE_AUTHORITY_KEY_IDENTIFIER,
        kind: ExtensionKind::AuthorityKeyId,
        parse: parse_akid,
    },
    ExtensionDecoder {
        oid: ID_CE_SUBJECT_KEY_IDENTIFIER,
        kind: ExtensionKind::SubjectKeyId,
        parse: parse_skid,
    },
    ExtensionDecoder {
        oid: ID_CE_BASIC_CONSTRAINTS,
        kind: ExtensionKind::BasicConstraints,
        parse: parse_bc,
    },
    ExtensionDecoder {
        oid: ID_CE_KEY_USAGE,
        kind: ExtensionKind::KeyUsage,
        parse: parse_ku,
    },
    ExtensionDecoder {
        oid: ID_CE_EXT_KEY_USAGE,
        kind: ExtensionKind::ExtendedKeyUsage,
        parse: parse_eku,
    },
    ExtensionDecoder {
        oid: ID_CE_CERTIFICATE_POLICIES,
        kind: ExtensionKind::CertificatePolicies,
        parse: parse_cp,
    },
    ExtensionDecoder {
        oid: ID_CE_CRL_DISTRIBUTION_POINTS,
        kind: ExtensionKind::CrlDistributionPoints,
        parse: parse_crldp,
    },
    ExtensionDecoder {
        oid: ID_PE_QC_STATEMENTS,
        kind: ExtensionKind::QcStatements,
        parse: parse_qc,
    },
    ExtensionDecoder {
        oid: ID_PE_AUTHORITY_INFO_ACCESS,
        kind: ExtensionKind::AuthorityInfoAccess,
        parse: parse_aia,
    },
    ExtensionDecoder {
        oid: ID_PE_SUBJECT_INFO_ACCESS,
        kind: ExtensionKind::SubjectInfoAccess,
        parse: parse_sia,
    },
    ExtensionDecoder {
        oid: ID_CE_POLICY_CONSTRAINTS,
        kind: ExtensionKind::PolicyConstraints,
        parse: parse_pc,
    },
    ExtensionDecoder {
        oid: ID_CE_NAME_CONSTRAINTS,
        kind: ExtensionKind::NameConstraints,
        parse: parse_nc,
    },
    ExtensionDecoder {
        oid: ID_CE_INHIBIT_ANY_POLICY,
        kind: ExtensionKind::InhibitAnyPolicy,
        parse: parse_iap,
    },
    ExtensionDecoder {
        oid: NETSCAPE_CERT_TYPE,
        kind: ExtensionKind::NetscapeCertType,
        parse: parse_nct,
    },
    ExtensionDecoder {
        oid: ID_PKIX_OCSP_NOCHECK,
        kind: ExtensionKind::OcspNoCheck,
        parse: parse_marker,
    },
    ExtensionDecoder {
        oid: APPLE_SUBMISSION_CERTIFICATE,
        kind: ExtensionKind::AppleSubmissionCertificate,
        parse: parse_marker,
    },
    ExtensionDecoder {
        oid: APPLE_DEVELOPMENT_CERTIFICATE,
        kind: ExtensionKind::AppleDevelopmentCertificate,
        parse: parse_marker,
    },
    ExtensionDecoder {
        oid: MAC_APPLICATION_SOFTWARE_DEVELOPMENT_SIGNING,
        kind: ExtensionKind::MacAppSoftwareDevelopmentSigning,
        parse: parse_marker,
    },
    ExtensionDecoder {
        oid: MAC_APPLICATION_SOFTWARE_SUBMISSION_SIGNING,
        kind: ExtensionKind::MacAppSoftwareSubmissionSigning,
        parse: parse_marker,
    },
];

/// `lookup_extension_decoder` returns the registry entry for an extension OID, if any.
pub fn lookup_extension_decoder(oid: &ObjectIdentifier) -> Option<&'static ExtensionDecoder> {
    EXTENSION_DECODERS.iter().find(|d| d.oid == *oid)
}

/// `Extension` is a certificate extension with its value decoded per the registry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Extension {
    /// Extension OID
    pub id: ObjectIdentifier,
    /// Criticality flag
    pub is_critical: bool,
    /// Decoded value, or the raw value when the extension was not decoded
    pub value: ExtensionValue,
    /// Kind of the extension when decoded via the registry
    pub ext_type: Option<ExtensionKind>,
}

impl Extension {
    /// `new` decodes an extension. The subject name, when provided, is included in log output.
    ///
    /// - A registered extension that decodes yields a typed value.
    /// - A registered extension that fails to decode yields [`Error::MalformedCriticalExtension`]
    ///   if critical and is otherwise retained as a raw value.
    /// - An unregistered extension yields [`Error::UnknownCriticalExtension`] if critical and
    ///   is otherwise retained as a raw value.
    pub fn new(ext: &x509_cert::ext::Extension, subject: Option<&str>) -> Result<Self> {
        let enc = ext.extn_value.as_bytes();
        let raw = |ext_type: Option<ExtensionKind>| Extension {
            id: ext.extn_id,
            is_critical: ext.critical,
            value: ExtensionValue::Raw(enc.to_vec()),
            ext_type,
        };

        match lookup_extension_decoder(&ext.extn_id) {
            Some(decoder) => match (decoder.parse)(enc) {
                Ok(value) => Ok(Extension {
                    id: ext.extn_id,
                    is_critical: ext.critical,
                    value,
                    ext_type: Some(decoder.kind),
                }),
                Err(e) => {
                    if ext.critical {
                        log_message_for_subject(
                            &CmLogLevels::CmError,
                            subject,
                            format!(
                                "Failed to parse critical {} extension: {:?}",
                                decoder.kind, e
                            )
                            .as_str(),
                        );
                        Err(Error::MalformedCriticalExtension(ext.extn_id))
                    } else {
                        log_message_for_subject(
                            &CmLogLevels::CmWarn,
                            subject,
                            format!(
                                "Failed to parse non-critical {} extension: {:?}",
                                decoder.kind, e
                            )
                            .as_str(),
                        );
                        Ok(raw(None))
                    }
                }
            },
            None => {
                if ext.critical {
                    log_message_for_subject(
                        &CmLogLevels::CmError,
                        subject,
                        format!("Unrecognized critical extension: {}", ext.extn_id).as_str(),
                    );
                    Err(Error::UnknownCriticalExtension(ext.extn_id))
                } else {
                    log_message_for_subject(
                        &CmLogLevels::CmDebug,
                        subject,
                        format!("Retaining unrecognized extension: {}", ext.extn_id).as_str(),
                    );
                    Ok(raw(None))
                }
            }
        }
    }

    /// `kind_name` returns the short name of the extension kind, or the dotted OID for extensions
    /// that were not decoded.
    pub fn kind_name(&self) -> String {
        match self.ext_type {
            Some(kind) => kind.as_str().to_string(),
            None => self.id.to_string(),
        }
    }
}

impl TryFrom<&x509_cert::ext::Extension> for Extension {
    type Error = Error;

    fn try_from(ext: &x509_cert::ext::Extension) -> Result<Self> {
        Extension::new(ext, None)
    }
}
