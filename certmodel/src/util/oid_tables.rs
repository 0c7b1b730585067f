//! Static mappings from object identifiers to the short names used when rendering names, key
//! purposes, access methods, PKCS #9 attributes and PKCS #7 content types.

use alloc::string::{String, ToString};

use const_oid::ObjectIdentifier;

// -------------------------------------------------------------------------------------------------
// Algorithm OIDs
// -------------------------------------------------------------------------------------------------

/// rsaEncryption OBJECT IDENTIFIER ::= {
///     iso(1) member-body(2) us(840) rsadsi(113549) pkcs(1)
///     pkcs-1(1) 1 }
pub const PKIXALG_RSA_ENCRYPTION: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// id-dsa OBJECT IDENTIFIER ::= {
///     iso(1) member-body(2) us(840) x9-57(10040) x9algorithm(4) 1 }
pub const PKIXALG_DSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10040.4.1");

// -------------------------------------------------------------------------------------------------
// Key purposes, access methods and name attributes absent from const-oid
// -------------------------------------------------------------------------------------------------

/// id-kp-ipsecEndSystem OBJECT IDENTIFIER ::= { id-kp 5 }
pub const ID_KP_IPSEC_END_SYSTEM: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.5");

/// id-kp-ipsecTunnel OBJECT IDENTIFIER ::= { id-kp 6 }
pub const ID_KP_IPSEC_TUNNEL: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.6");

/// id-kp-ipsecUser OBJECT IDENTIFIER ::= { id-kp 7 }
pub const ID_KP_IPSEC_USER: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.7");

/// id-ad-ocsp OBJECT IDENTIFIER ::= { id-ad 1 }
pub const ID_AD_OCSP: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.48.1");

/// id-ad-caIssuers OBJECT IDENTIFIER ::= { id-ad 2 }
pub const ID_AD_CA_ISSUERS: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.48.2");

/// id-ad-timeStamping OBJECT IDENTIFIER ::= { id-ad 3 }
pub const ID_AD_TIME_STAMPING: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.48.3");

/// id-ad-caRepository OBJECT IDENTIFIER ::= { id-ad 5 }
pub const ID_AD_CA_REPOSITORY: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.48.5");

/// id-pkix-ocsp-nocheck OBJECT IDENTIFIER ::= { id-pkix-ocsp 5 }
pub const ID_PKIX_OCSP_NOCHECK: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.48.1.5");

/// id-qt-cps OBJECT IDENTIFIER ::= { id-qt 1 }
pub const ID_QT_CPS: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.2.1");

// -------------------------------------------------------------------------------------------------
// PKCS #9 attribute and PKCS #7 content type OIDs
// -------------------------------------------------------------------------------------------------

/// PKCS #9 emailAddress attribute
pub const PKCS9_EMAIL_ADDRESS: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.1");
/// PKCS #9 contentType attribute
pub const PKCS9_CONTENT_TYPE: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.3");
/// PKCS #9 messageDigest attribute
pub const PKCS9_MESSAGE_DIGEST: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.4");
/// PKCS #9 signingTime attribute
pub const PKCS9_SIGNING_TIME: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.5");
/// id-aa-signingCertificate from RFC 2634
pub const ID_AA_SIGNING_CERTIFICATE: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.16.2.12");
/// id-aa-signingCertificateV2 from RFC 5035
pub const ID_AA_SIGNING_CERTIFICATE_V2: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.16.2.47");
/// id-at-serialNumber, used both as a name attribute and as a PKCS #9 attribute
pub const ID_AT_SERIAL_NUMBER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.5");

/// PKCS #7 data content type
pub const PKCS7_DATA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.7.1");
/// PKCS #7 signedData content type
pub const PKCS7_SIGNED_DATA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.7.2");
/// id-ct-TSTInfo from RFC 3161
pub const ID_CT_TST_INFO: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.16.1.4");

// -------------------------------------------------------------------------------------------------
// Tables
// -------------------------------------------------------------------------------------------------

/// Short names for name attribute types. Types not listed here are rendered using the dotted OID.
pub static NAME_ATTRIBUTE_NAMES: &[(&str, &str)] = &[
    ("2.5.4.3", "CN"),
    ("2.5.4.6", "C"),
    ("2.5.4.7", "L"),
    ("2.5.4.8", "ST"),
    ("2.5.4.10", "O"),
    ("2.5.4.11", "OU"),
    ("2.5.4.45", "X500UID"),
    ("1.2.840.113549.1.9.1", "email"),
    ("2.5.4.17", "zip"),
    ("2.5.4.9", "street"),
    ("2.5.4.15", "businessCategory"),
    ("2.5.4.5", "serialNumber"),
    ("2.5.4.43", "initials"),
    ("2.5.4.44", "generationQualifier"),
    ("2.5.4.4", "surname"),
    ("2.5.4.42", "givenName"),
    ("2.5.4.12", "title"),
    ("2.5.4.46", "dnQualifier"),
    ("2.5.4.65", "pseudonym"),
    ("0.9.2342.19200300.100.1.25", "DC"),
    // Spanish national identity card attributes
    ("1.3.6.1.4.1.5734.1.2", "Apellido1"),
    ("1.3.6.1.4.1.5734.1.3", "Apellido2"),
    ("1.3.6.1.4.1.5734.1.1", "Nombre"),
    ("1.3.6.1.4.1.5734.1.4", "DNI"),
    ("0.9.2342.19200300.100.1.1", "Userid"),
];

/// Names of the key purposes recognized in an extended key usage extension
pub static KEY_PURPOSE_NAMES: &[(&str, &str)] = &[
    ("1.3.6.1.5.5.7.3.1", "serverAuth"),
    ("1.3.6.1.5.5.7.3.2", "clientAuth"),
    ("1.3.6.1.5.5.7.3.3", "codeSigning"),
    ("1.3.6.1.5.5.7.3.4", "emailProtection"),
    ("1.3.6.1.5.5.7.3.5", "ipsecEndSystem"),
    ("1.3.6.1.5.5.7.3.6", "ipsecTunnel"),
    ("1.3.6.1.5.5.7.3.7", "ipsecUser"),
    ("1.3.6.1.5.5.7.3.8", "timeStamping"),
];

/// Names of access methods used in authority information access extensions
pub static AUTHORITY_ACCESS_METHOD_NAMES: &[(&str, &str)] = &[
    ("1.3.6.1.5.5.7.48.1", "ocsp"),
    ("1.3.6.1.5.5.7.48.2", "caIssuers"),
];

/// Names of access methods used in subject information access extensions
pub static SUBJECT_ACCESS_METHOD_NAMES: &[(&str, &str)] = &[
    ("1.3.6.1.5.5.7.48.3", "timeStamping"),
    ("1.3.6.1.5.5.7.48.5", "caRepository"),
];

/// Names of attributes that may appear in the authenticated attributes of a SignerInfo
pub static ATTRIBUTE_NAMES: &[(&str, &str)] = &[
    ("1.2.840.113549.1.9.1", "emailAddress"),
    ("1.2.840.113549.1.9.2", "unstructuredName"),
    ("1.2.840.113549.1.9.3", "contentType"),
    ("1.2.840.113549.1.9.4", "messageDigest"),
    ("1.2.840.113549.1.9.5", "signingTime"),
    ("1.2.840.113549.1.9.6", "counterSignature"),
    ("1.2.840.113549.1.9.7", "challengePassword"),
    ("1.2.840.113549.1.9.8", "unstructuredAddress"),
    ("1.2.840.113549.1.9.16.2.12", "signingCertificate"),
    ("1.2.840.113549.1.9.16.2.47", "signingCertificateV2"),
    ("2.5.4.5", "serialNumber"),
];

/// Names of PKCS #7 content types
pub static CONTENT_TYPE_NAMES: &[(&str, &str)] = &[
    ("1.2.840.113549.1.7.1", "data"),
    ("1.2.840.113549.1.7.2", "signedData"),
    ("1.2.840.113549.1.7.3", "envelopedData"),
    ("1.2.840.113549.1.7.4", "signedAndEnvelopedData"),
    ("1.2.840.113549.1.7.5", "digestedData"),
    ("1.2.840.113549.1.7.6", "encryptedData"),
];

/// `lookup_oid_name` returns the name associated with the dotted form of `oid` in `table`, if any.
pub fn lookup_oid_name(
    table: &'static [(&'static str, &'static str)],
    oid: &ObjectIdentifier,
) -> Option<&'static str> {
    let dotted = oid.to_string();
    table
        .iter()
        .find(|(k, _)| *k == dotted.as_str())
        .map(|(_, v)| *v)
}

/// `name_attribute_short_name` returns the short name for a name attribute type, if known.
pub fn name_attribute_short_name(oid: &ObjectIdentifier) -> Option<&'static str> {
    lookup_oid_name(NAME_ATTRIBUTE_NAMES, oid)
}

/// `attribute_name` returns the name of a SignerInfo attribute, falling back to the dotted OID.
pub fn attribute_name(oid: &ObjectIdentifier) -> String {
    match lookup_oid_name(ATTRIBUTE_NAMES, oid) {
        Some(name) => name.to_string(),
        None => oid.to_string(),
    }
}

/// `content_type_name` returns the name of a PKCS #7 content type, falling back to the dotted OID.
pub fn content_type_name(oid: &ObjectIdentifier) -> String {
    match lookup_oid_name(CONTENT_TYPE_NAMES, oid) {
        Some(name) => name.to_string(),
        None => oid.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use const_oid::db::rfc4519::{CN, COUNTRY_NAME};

    #[test]
    fn short_names() {
        assert_eq!(Some("CN"), name_attribute_short_name(&CN));
        assert_eq!(Some("C"), name_attribute_short_name(&COUNTRY_NAME));
        assert_eq!(None, name_attribute_short_name(&PKIXALG_DSA));
        assert_eq!("signingTime", attribute_name(&PKCS9_SIGNING_TIME));
        assert_eq!("1.2.840.10040.4.1", attribute_name(&PKIXALG_DSA));
        assert_eq!("signedData", content_type_name(&PKCS7_SIGNED_DATA));
        assert_eq!("1.2.840.113549.1.9.16.1.4", content_type_name(&ID_CT_TST_INFO));
    }

    #[test]
    fn tables_hold_valid_oids() {
        for table in [
            NAME_ATTRIBUTE_NAMES,
            KEY_PURPOSE_NAMES,
            AUTHORITY_ACCESS_METHOD_NAMES,
            SUBJECT_ACCESS_METHOD_NAMES,
            ATTRIBUTE_NAMES,
            CONTENT_TYPE_NAMES,
        ] {
            for (oid, _) in table {
                assert!(ObjectIdentifier::new(oid).is_ok(), "{}", oid);
            }
        }
    }
}
