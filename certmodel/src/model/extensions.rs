//! Typed models of the values of the certificate extensions listed in the extension registry
//!
//! Each model is built from the corresponding structure decoded by the x509-cert crate (or by
//! the [`asn1`](crate::asn1) module for structures x509-cert does not define) via `TryFrom`.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use const_oid::{
    db::rfc5280::{
        ID_KP_CLIENT_AUTH, ID_KP_CODE_SIGNING, ID_KP_EMAIL_PROTECTION, ID_KP_SERVER_AUTH,
        ID_KP_TIME_STAMPING,
    },
    ObjectIdentifier,
};
use der::{
    asn1::{Any, Ia5String},
    Encode,
};
use num_bigint::BigInt;
use x509_cert::{
    ext::pkix::{
        certpolicy::PolicyQualifierInfo,
        constraints::name::GeneralSubtree,
        crl::dp::{DistributionPoint, ReasonFlags},
        name::{DistributionPointName, GeneralName, GeneralNames},
        AccessDescription, AuthorityInfoAccessSyntax, AuthorityKeyIdentifier, BasicConstraints,
        CertificatePolicies, CrlDistributionPoints, ExtendedKeyUsage, InhibitAnyPolicy,
        IssuerAltName, KeyUsage, NameConstraints, PolicyConstraints, SubjectAltName,
        SubjectInfoAccessSyntax, SubjectKeyIdentifier,
    },
    name::RdnSequence,
};

use crate::{
    asn1::{netscape::*, qc_statements::QcStatement},
    model::name::{attribute_value_to_string, Name},
    util::{error::*, general_names::*, oid_tables::*},
};

fn bit_at(mask: u16, position: u16) -> bool {
    mask & (1 << position) != 0
}

fn first_directory_name(names: &GeneralNames) -> Result<Option<Name>> {
    for gn in names {
        if let GeneralName::DirectoryName(dn) = gn {
            return Ok(Some(Name::try_from(dn)?));
        }
    }
    Ok(None)
}

// -------------------------------------------------------------------------------------------------
// Alternative names
// -------------------------------------------------------------------------------------------------

/// `SubjectAltNameExt` lists the names from a subject or issuer alternative name extension as
/// (kind, value) pairs, where kind is one of the labels returned by [`general_name_kind`].
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct SubjectAltNameExt {
    /// Names in the order encountered
    pub items: Vec<(String, GeneralNameValue)>,
}

impl SubjectAltNameExt {
    /// `values` returns the values of the names of the given kind.
    pub fn values(&self, kind: &str) -> Vec<&GeneralNameValue> {
        self.items
            .iter()
            .filter(|(k, _)| k == kind)
            .map(|(_, v)| v)
            .collect()
    }
}

impl TryFrom<&GeneralNames> for SubjectAltNameExt {
    type Error = Error;

    fn try_from(names: &GeneralNames) -> Result<Self> {
        let mut items = Vec::new();
        for gn in names {
            items.push((general_name_kind(gn).into(), general_name_value(gn)?));
        }
        Ok(SubjectAltNameExt { items })
    }
}

impl TryFrom<&SubjectAltName> for SubjectAltNameExt {
    type Error = Error;

    fn try_from(san: &SubjectAltName) -> Result<Self> {
        SubjectAltNameExt::try_from(&san.0)
    }
}

impl TryFrom<&IssuerAltName> for SubjectAltNameExt {
    type Error = Error;

    fn try_from(ian: &IssuerAltName) -> Result<Self> {
        SubjectAltNameExt::try_from(&ian.0)
    }
}

// -------------------------------------------------------------------------------------------------
// Basic constraints, key usage and extended key usage
// -------------------------------------------------------------------------------------------------

/// Basic constraints of a certificate: whether the subject is a CA and the maximum depth of
/// subordinate CA certificates.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub struct BasicConstraintsExt {
    /// cA flag, false when absent
    pub ca: bool,
    /// pathLenConstraint, if present
    pub max_path_len: Option<u8>,
}

impl TryFrom<&BasicConstraints> for BasicConstraintsExt {
    type Error = Error;

    fn try_from(bc: &BasicConstraints) -> Result<Self> {
        Ok(BasicConstraintsExt {
            ca: bc.ca,
            max_path_len: bc.path_len_constraint,
        })
    }
}

/// Named bits of a key usage extension. Bits not present in the encoding are false.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
#[allow(missing_docs)]
pub struct KeyUsageExt {
    pub digital_signature: bool,
    pub non_repudiation: bool,
    pub key_encipherment: bool,
    pub data_encipherment: bool,
    pub key_agreement: bool,
    pub key_cert_sign: bool,
    pub crl_sign: bool,
    pub encipher_only: bool,
    pub decipher_only: bool,
}

impl KeyUsageExt {
    /// `from_mask` maps a position mask (bit `i` holds the named bit at position `i`) onto the named bits.
    pub fn from_mask(mask: u16) -> Self {
        KeyUsageExt {
            digital_signature: bit_at(mask, 0),
            non_repudiation: bit_at(mask, 1),
            key_encipherment: bit_at(mask, 2),
            data_encipherment: bit_at(mask, 3),
            key_agreement: bit_at(mask, 4),
            key_cert_sign: bit_at(mask, 5),
            crl_sign: bit_at(mask, 6),
            encipher_only: bit_at(mask, 7),
            decipher_only: bit_at(mask, 8),
        }
    }
}

impl TryFrom<&KeyUsage> for KeyUsageExt {
    type Error = Error;

    fn try_from(ku: &KeyUsage) -> Result<Self> {
        Ok(KeyUsageExt::from_mask(ku.0.bits()))
    }
}

/// Key purposes asserted by an extended key usage extension. Each flag is true if and only if
/// the corresponding purpose OID appears; `purposes` retains every OID, including unnamed ones.
#[derive(Clone, Debug, Eq, PartialEq, Default)]
#[allow(missing_docs)]
pub struct ExtendedKeyUsageExt {
    pub server_auth: bool,
    pub client_auth: bool,
    pub code_signing: bool,
    pub email_protection: bool,
    pub ipsec_end_system: bool,
    pub ipsec_tunnel: bool,
    pub ipsec_user: bool,
    pub time_stamping: bool,
    pub purposes: Vec<ObjectIdentifier>,
}

impl TryFrom<&ExtendedKeyUsage> for ExtendedKeyUsageExt {
    type Error = Error;

    fn try_from(eku: &ExtendedKeyUsage) -> Result<Self> {
        let has = |oid: ObjectIdentifier| eku.0.contains(&oid);
        Ok(ExtendedKeyUsageExt {
            server_auth: has(ID_KP_SERVER_AUTH),
            client_auth: has(ID_KP_CLIENT_AUTH),
            code_signing: has(ID_KP_CODE_SIGNING),
            email_protection: has(ID_KP_EMAIL_PROTECTION),
            ipsec_end_system: has(ID_KP_IPSEC_END_SYSTEM),
            ipsec_tunnel: has(ID_KP_IPSEC_TUNNEL),
            ipsec_user: has(ID_KP_IPSEC_USER),
            time_stamping: has(ID_KP_TIME_STAMPING),
            purposes: eku.0.clone(),
        })
    }
}

// -------------------------------------------------------------------------------------------------
// Key identifiers
// -------------------------------------------------------------------------------------------------

/// Authority key identifier. Each field is independently optional.
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct AuthorityKeyIdExt {
    /// keyIdentifier
    pub key_id: Option<Vec<u8>>,
    /// authorityCertSerialNumber
    pub auth_cert_serial: Option<BigInt>,
    /// First directory name from authorityCertIssuer
    pub auth_cert_issuer: Option<Name>,
}

impl TryFrom<&AuthorityKeyIdentifier> for AuthorityKeyIdExt {
    type Error = Error;

    fn try_from(akid: &AuthorityKeyIdentifier) -> Result<Self> {
        let auth_cert_issuer = match &akid.authority_cert_issuer {
            Some(names) => first_directory_name(names)?,
            None => None,
        };
        Ok(AuthorityKeyIdExt {
            key_id: akid.key_identifier.as_ref().map(|k| k.as_bytes().to_vec()),
            auth_cert_serial: akid
                .authority_cert_serial_number
                .as_ref()
                .map(|s| BigInt::from_signed_bytes_be(s.as_bytes())),
            auth_cert_issuer,
        })
    }
}

/// Subject key identifier
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct SubjectKeyIdExt {
    /// Key identifier bytes
    pub subject_key_id: Vec<u8>,
}

impl TryFrom<&SubjectKeyIdentifier> for SubjectKeyIdExt {
    type Error = Error;

    fn try_from(skid: &SubjectKeyIdentifier) -> Result<Self> {
        Ok(SubjectKeyIdExt {
            subject_key_id: skid.0.as_bytes().to_vec(),
        })
    }
}

// -------------------------------------------------------------------------------------------------
// Certificate policies
// -------------------------------------------------------------------------------------------------

/// Policy qualifier. Only CPS pointer qualifiers are resolved, for other qualifier types
/// `qualifier` is None. A CPS pointer that is not an IA5String is rendered the way name attribute
/// values are.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PolicyQualifier {
    /// policyQualifierId
    pub id: ObjectIdentifier,
    /// CPS URI
    pub qualifier: Option<String>,
}

impl TryFrom<&PolicyQualifierInfo> for PolicyQualifier {
    type Error = Error;

    fn try_from(pqi: &PolicyQualifierInfo) -> Result<Self> {
        let qualifier = match (&pqi.qualifier, pqi.policy_qualifier_id == ID_QT_CPS) {
            (Some(q), true) => match q.decode_as::<Ia5String>() {
                Ok(uri) => Some(uri.to_string()),
                Err(_) => Some(attribute_value_to_string(q)?),
            },
            _ => None,
        };
        Ok(PolicyQualifier {
            id: pqi.policy_qualifier_id,
            qualifier,
        })
    }
}

/// One policy from a certificate policies extension
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CertificatePolicy {
    /// policyIdentifier
    pub id: ObjectIdentifier,
    /// policyQualifiers, empty when absent
    pub qualifiers: Vec<PolicyQualifier>,
}

/// Certificate policies
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct CertificatePoliciesExt {
    /// Policies in the order encountered
    pub policies: Vec<CertificatePolicy>,
}

impl TryFrom<&CertificatePolicies> for CertificatePoliciesExt {
    type Error = Error;

    fn try_from(cps: &CertificatePolicies) -> Result<Self> {
        let mut policies = Vec::new();
        for pi in cps.0.iter() {
            let mut qualifiers = Vec::new();
            if let Some(pqis) = &pi.policy_qualifiers {
                for pqi in pqis {
                    qualifiers.push(PolicyQualifier::try_from(pqi)?);
                }
            }
            policies.push(CertificatePolicy {
                id: pi.policy_identifier,
                qualifiers,
            });
        }
        Ok(CertificatePoliciesExt { policies })
    }
}

// -------------------------------------------------------------------------------------------------
// CRL distribution points
// -------------------------------------------------------------------------------------------------

/// Named bits of the reasons field of a distribution point. Bits not present in the encoding are
/// false.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
#[allow(missing_docs)]
pub struct ReasonFlagsExt {
    pub unused: bool,
    pub key_compromise: bool,
    pub ca_compromise: bool,
    pub affiliation_changed: bool,
    pub superseded: bool,
    pub cessation_of_operation: bool,
    pub certificate_hold: bool,
    pub privilege_withdrawn: bool,
    pub aa_compromise: bool,
}

impl ReasonFlagsExt {
    /// `from_mask` maps a position mask (bit `i` holds the named bit at position `i`) onto the named bits.
    pub fn from_mask(mask: u16) -> Self {
        ReasonFlagsExt {
            unused: bit_at(mask, 0),
            key_compromise: bit_at(mask, 1),
            ca_compromise: bit_at(mask, 2),
            affiliation_changed: bit_at(mask, 3),
            superseded: bit_at(mask, 4),
            cessation_of_operation: bit_at(mask, 5),
            certificate_hold: bit_at(mask, 6),
            privilege_withdrawn: bit_at(mask, 7),
            aa_compromise: bit_at(mask, 8),
        }
    }
}

impl From<&ReasonFlags> for ReasonFlagsExt {
    fn from(rf: &ReasonFlags) -> Self {
        ReasonFlagsExt::from_mask(rf.bits())
    }
}

/// One CRL distribution point
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct CrlDistPoint {
    /// First full name of the distribution point, or the name relative to the CRL issuer
    pub dist_point: Option<String>,
    /// Reason flags, if present
    pub reasons: Option<ReasonFlagsExt>,
    /// First directory name from cRLIssuer, for indirect CRLs
    pub issuer: Option<Name>,
}

impl TryFrom<&DistributionPoint> for CrlDistPoint {
    type Error = Error;

    fn try_from(dp: &DistributionPoint) -> Result<Self> {
        let dist_point = match &dp.distribution_point {
            Some(DistributionPointName::FullName(names)) => match names.first() {
                Some(gn) => Some(general_name_to_string(gn)?),
                None => None,
            },
            Some(DistributionPointName::NameRelativeToCRLIssuer(rdn)) => {
                let rdns = RdnSequence(alloc::vec![rdn.clone()]);
                Some(Name::try_from(&rdns)?.to_string())
            }
            None => None,
        };
        let issuer = match &dp.crl_issuer {
            Some(names) => first_directory_name(names)?,
            None => None,
        };
        Ok(CrlDistPoint {
            dist_point,
            reasons: dp.reasons.as_ref().map(ReasonFlagsExt::from),
            issuer,
        })
    }
}

/// CRL distribution points
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct CrlDistributionPointsExt {
    /// Distribution points in the order encountered
    pub points: Vec<CrlDistPoint>,
}

impl TryFrom<&CrlDistributionPoints> for CrlDistributionPointsExt {
    type Error = Error;

    fn try_from(crldp: &CrlDistributionPoints) -> Result<Self> {
        let points = crldp
            .0
            .iter()
            .map(CrlDistPoint::try_from)
            .collect::<Result<Vec<CrlDistPoint>>>()?;
        Ok(CrlDistributionPointsExt { points })
    }
}

// -------------------------------------------------------------------------------------------------
// Information access
// -------------------------------------------------------------------------------------------------

/// One access description from an authority or subject information access extension
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessDescriptionExt {
    /// accessMethod
    pub id: ObjectIdentifier,
    /// Name of the access method, if known
    pub access_method: Option<&'static str>,
    /// accessLocation rendered as a string
    pub access_location: String,
}

impl AccessDescriptionExt {
    fn new(ad: &AccessDescription, names: &'static [(&'static str, &'static str)]) -> Result<Self> {
        Ok(AccessDescriptionExt {
            id: ad.access_method,
            access_method: lookup_oid_name(names, &ad.access_method),
            access_location: general_name_to_string(&ad.access_location)?,
        })
    }
}

/// Authority or subject information access
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct InfoAccessExt {
    /// Access descriptions in the order encountered
    pub descriptions: Vec<AccessDescriptionExt>,
}

impl InfoAccessExt {
    /// `locations` returns the access locations for the named access method (e.g., "ocsp").
    pub fn locations(&self, method: &str) -> Vec<&str> {
        self.descriptions
            .iter()
            .filter(|ad| ad.access_method == Some(method))
            .map(|ad| ad.access_location.as_str())
            .collect()
    }
}

impl TryFrom<&AuthorityInfoAccessSyntax> for InfoAccessExt {
    type Error = Error;

    fn try_from(aia: &AuthorityInfoAccessSyntax) -> Result<Self> {
        let descriptions = aia
            .0
            .iter()
            .map(|ad| AccessDescriptionExt::new(ad, AUTHORITY_ACCESS_METHOD_NAMES))
            .collect::<Result<Vec<AccessDescriptionExt>>>()?;
        Ok(InfoAccessExt { descriptions })
    }
}

impl TryFrom<&SubjectInfoAccessSyntax> for InfoAccessExt {
    type Error = Error;

    fn try_from(sia: &SubjectInfoAccessSyntax) -> Result<Self> {
        let descriptions = sia
            .0
            .iter()
            .map(|ad| AccessDescriptionExt::new(ad, SUBJECT_ACCESS_METHOD_NAMES))
            .collect::<Result<Vec<AccessDescriptionExt>>>()?;
        Ok(InfoAccessExt { descriptions })
    }
}

// -------------------------------------------------------------------------------------------------
// QC statements
// -------------------------------------------------------------------------------------------------

/// One qualified certificate statement
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QcStatementExt {
    /// statementId
    pub oid: ObjectIdentifier,
    /// DER encoding of statementInfo, if present
    pub statement_info: Option<Vec<u8>>,
}

/// Qualified certificate statements
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct QcStatementsExt {
    /// Statements in the order encountered
    pub statements: Vec<QcStatementExt>,
}

impl TryFrom<&Vec<QcStatement>> for QcStatementsExt {
    type Error = Error;

    fn try_from(qcs: &Vec<QcStatement>) -> Result<Self> {
        let mut statements = Vec::new();
        for qc in qcs {
            let statement_info = match &qc.statement_info {
                Some(si) => Some(si.to_der()?),
                None => None,
            };
            statements.push(QcStatementExt {
                oid: qc.statement_id,
                statement_info,
            });
        }
        Ok(QcStatementsExt { statements })
    }
}

// -------------------------------------------------------------------------------------------------
// Policy constraints, name constraints and inhibit any policy
// -------------------------------------------------------------------------------------------------

/// Policy constraints. Each field is independently optional.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
#[allow(missing_docs)]
pub struct PolicyConstraintsExt {
    pub require_explicit_policy: Option<u32>,
    pub inhibit_policy_mapping: Option<u32>,
}

impl TryFrom<&PolicyConstraints> for PolicyConstraintsExt {
    type Error = Error;

    fn try_from(pc: &PolicyConstraints) -> Result<Self> {
        Ok(PolicyConstraintsExt {
            require_explicit_policy: pc.require_explicit_policy,
            inhibit_policy_mapping: pc.inhibit_policy_mapping,
        })
    }
}

/// One subtree from a name constraints extension
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NameConstraint {
    /// Base name rendered as a string
    pub base: String,
    /// minimum, zero when absent
    pub minimum: u32,
    /// maximum, if present
    pub maximum: Option<u32>,
}

/// Name constraints. Subtrees whose base cannot be rendered as a string are skipped.
#[derive(Clone, Debug, Eq, PartialEq, Default)]
#[allow(missing_docs)]
pub struct NameConstraintsExt {
    pub permitted_subtrees: Vec<NameConstraint>,
    pub excluded_subtrees: Vec<NameConstraint>,
}

fn parse_subtrees(subtrees: &Option<Vec<GeneralSubtree>>) -> Vec<NameConstraint> {
    let mut retval = Vec::new();
    if let Some(subtrees) = subtrees {
        for gs in subtrees {
            if let Ok(base) = general_name_to_string(&gs.base) {
                retval.push(NameConstraint {
                    base,
                    minimum: gs.minimum,
                    maximum: gs.maximum,
                });
            }
        }
    }
    retval
}

impl TryFrom<&NameConstraints> for NameConstraintsExt {
    type Error = Error;

    fn try_from(nc: &NameConstraints) -> Result<Self> {
        Ok(NameConstraintsExt {
            permitted_subtrees: parse_subtrees(&nc.permitted_subtrees),
            excluded_subtrees: parse_subtrees(&nc.excluded_subtrees),
        })
    }
}

/// Inhibit any policy
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub struct InhibitAnyPolicyExt {
    /// SkipCerts
    pub skip_certs: u32,
}

impl TryFrom<&InhibitAnyPolicy> for InhibitAnyPolicyExt {
    type Error = Error;

    fn try_from(iap: &InhibitAnyPolicy) -> Result<Self> {
        Ok(InhibitAnyPolicyExt { skip_certs: iap.0 })
    }
}

// -------------------------------------------------------------------------------------------------
// Netscape certificate type and marker extensions
// -------------------------------------------------------------------------------------------------

/// Named bits of a Netscape certificate type extension. Bits not present in the encoding are
/// false.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
#[allow(missing_docs)]
pub struct NetscapeCertTypeExt {
    pub ssl_client: bool,
    pub ssl_server: bool,
    pub smime: bool,
    pub object_signing: bool,
    pub reserved: bool,
    pub ssl_ca: bool,
    pub smime_ca: bool,
    pub object_signing_ca: bool,
}

impl TryFrom<&NetscapeCertType> for NetscapeCertTypeExt {
    type Error = Error;

    fn try_from(nct: &NetscapeCertType) -> Result<Self> {
        Ok(NetscapeCertTypeExt {
            ssl_client: nct.contains(NetscapeCertTypes::SslClient),
            ssl_server: nct.contains(NetscapeCertTypes::SslServer),
            smime: nct.contains(NetscapeCertTypes::Smime),
            object_signing: nct.contains(NetscapeCertTypes::ObjectSigning),
            reserved: nct.contains(NetscapeCertTypes::Reserved),
            ssl_ca: nct.contains(NetscapeCertTypes::SslCa),
            smime_ca: nct.contains(NetscapeCertTypes::SmimeCa),
            object_signing_ca: nct.contains(NetscapeCertTypes::ObjectSigningCa),
        })
    }
}

/// Marker extension whose presence is its only meaning
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub struct MarkerExt;

impl TryFrom<&Any> for MarkerExt {
    type Error = Error;

    fn try_from(_value: &Any) -> Result<Self> {
        Ok(MarkerExt)
    }
}
