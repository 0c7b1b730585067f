//! Signing certificate attribute structures from RFC 2634 and RFC 5035

use alloc::vec::Vec;

use der::{asn1::OctetString, Sequence};
use spki::AlgorithmIdentifierOwned;
use x509_cert::{
    ext::pkix::{certpolicy::PolicyInformation, name::GeneralNames},
    serial_number::SerialNumber,
};

/// SigningCertificate as defined in [RFC 2634 Section 5.4].
///
/// ```text
/// SigningCertificate ::=  SEQUENCE {
///     certs        SEQUENCE OF ESSCertID,
///     policies     SEQUENCE OF PolicyInformation OPTIONAL
/// }
/// ```
///
/// [RFC 2634 Section 5.4]: https://datatracker.ietf.org/doc/html/rfc2634#section-5.4
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct EssSigningCertificate {
    pub certs: Vec<EssCertId>,
    #[asn1(optional = "true")]
    pub policies: Option<Vec<PolicyInformation>>,
}

/// ESSCertID as defined in [RFC 2634 Section 5.4.1].
///
/// ```text
/// ESSCertID ::=  SEQUENCE {
///      certHash                 Hash,
///      issuerSerial             IssuerSerial OPTIONAL
/// }
///
/// Hash ::= OCTET STRING -- SHA1 hash of entire certificate
/// ```
///
/// [RFC 2634 Section 5.4.1]: https://datatracker.ietf.org/doc/html/rfc2634#section-5.4.1
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct EssCertId {
    pub cert_hash: OctetString,
    #[asn1(optional = "true")]
    pub issuer_serial: Option<IssuerSerial>,
}

/// IssuerSerial as defined in [RFC 2634 Section 5.4.1].
///
/// ```text
/// IssuerSerial ::= SEQUENCE {
///      issuer                   GeneralNames,
///      serialNumber             CertificateSerialNumber
/// }
/// ```
///
/// [RFC 2634 Section 5.4.1]: https://datatracker.ietf.org/doc/html/rfc2634#section-5.4.1
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct IssuerSerial {
    pub issuer: GeneralNames,
    pub serial_number: SerialNumber,
}

/// SigningCertificateV2 as defined in [RFC 5035 Section 3].
///
/// ```text
/// SigningCertificateV2 ::=  SEQUENCE {
///     certs        SEQUENCE OF ESSCertIDv2,
///     policies     SEQUENCE OF PolicyInformation OPTIONAL
/// }
/// ```
///
/// [RFC 5035 Section 3]: https://datatracker.ietf.org/doc/html/rfc5035#section-3
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct EssSigningCertificateV2 {
    pub certs: Vec<EssCertIdV2>,
    #[asn1(optional = "true")]
    pub policies: Option<Vec<PolicyInformation>>,
}

/// ESSCertIDv2 as defined in [RFC 5035 Section 4].
///
/// ```text
/// ESSCertIDv2 ::=  SEQUENCE {
///     hashAlgorithm           AlgorithmIdentifier
///            DEFAULT {algorithm id-sha256},
///     certHash                 Hash,
///     issuerSerial             IssuerSerial OPTIONAL
/// }
/// ```
///
/// An absent hashAlgorithm is represented as `None` and denotes SHA-256.
///
/// [RFC 5035 Section 4]: https://datatracker.ietf.org/doc/html/rfc5035#section-4
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct EssCertIdV2 {
    #[asn1(optional = "true")]
    pub hash_algorithm: Option<AlgorithmIdentifierOwned>,
    pub cert_hash: OctetString,
    #[asn1(optional = "true")]
    pub issuer_serial: Option<IssuerSerial>,
}
