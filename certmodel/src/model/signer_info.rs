//! PKCS #7 / CMS SignerInfo and authenticated attribute models

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use base64ct::{Base64, Encoding};
use chrono::NaiveDateTime;
use cms::signed_data::SignerIdentifier;
use const_oid::{
    db::rfc5912::{ID_SHA_1, ID_SHA_256},
    ObjectIdentifier,
};
use der::{
    asn1::{Any, Int, OctetString},
    Decode, Encode,
};
use num_bigint::BigInt;
use x509_cert::{ext::pkix::name::GeneralName, time::Time};

use crate::{
    asn1::enhanced_security::*,
    model::name::{attribute_value_to_string, Name},
    util::{date_utils::*, error::*, general_names::buffer_to_hex, oid_tables::*},
};

/// Certificate identifier from a signing certificate attribute
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EssCertificateId {
    /// Hash of the entire certificate
    pub hash: Vec<u8>,
    /// Algorithm used to compute the hash
    pub hash_algorithm: ObjectIdentifier,
    /// First directory name from the issuerSerial field, if present
    pub issuer: Option<Name>,
    /// Serial number from the issuerSerial field, if present
    pub serial_number: Option<BigInt>,
}

impl EssCertificateId {
    fn new(
        hash: &OctetString,
        hash_algorithm: ObjectIdentifier,
        issuer_serial: &Option<IssuerSerial>,
    ) -> Result<Self> {
        let (issuer, serial_number) = match issuer_serial {
            Some(is) => {
                let mut issuer = None;
                for gn in &is.issuer {
                    if let GeneralName::DirectoryName(dn) = gn {
                        issuer = Some(Name::try_from(dn)?);
                        break;
                    }
                }
                (
                    issuer,
                    Some(BigInt::from_signed_bytes_be(is.serial_number.as_bytes())),
                )
            }
            None => (None, None),
        };
        Ok(EssCertificateId {
            hash: hash.as_bytes().to_vec(),
            hash_algorithm,
            issuer,
            serial_number,
        })
    }
}

impl fmt::Display for EssCertificateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.serial_number {
            Some(serial) => write!(f, "0x{:x}", serial),
            None => write!(f, "{}", buffer_to_hex(&self.hash)),
        }
    }
}

/// `SigningCertificate` models the signingCertificate (RFC 2634) and signingCertificateV2
/// (RFC 5035) attributes.
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct SigningCertificate {
    /// Certificate identifiers, the first identifies the signing certificate
    pub certs: Vec<EssCertificateId>,
    /// Policy OIDs, empty when absent
    pub policies: Vec<ObjectIdentifier>,
}

impl fmt::Display for SigningCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let certs = self
            .certs
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<String>>()
            .join(",");
        write!(f, "{}", certs)
    }
}

impl TryFrom<&EssSigningCertificate> for SigningCertificate {
    type Error = Error;

    fn try_from(sc: &EssSigningCertificate) -> Result<Self> {
        let certs = sc
            .certs
            .iter()
            .map(|c| EssCertificateId::new(&c.cert_hash, ID_SHA_1, &c.issuer_serial))
            .collect::<Result<Vec<EssCertificateId>>>()?;
        Ok(SigningCertificate {
            certs,
            policies: policy_oids(&sc.policies),
        })
    }
}

impl TryFrom<&EssSigningCertificateV2> for SigningCertificate {
    type Error = Error;

    fn try_from(sc: &EssSigningCertificateV2) -> Result<Self> {
        let certs = sc
            .certs
            .iter()
            .map(|c| {
                let alg = c
                    .hash_algorithm
                    .as_ref()
                    .map(|a| a.oid)
                    .unwrap_or(ID_SHA_256);
                EssCertificateId::new(&c.cert_hash, alg, &c.issuer_serial)
            })
            .collect::<Result<Vec<EssCertificateId>>>()?;
        Ok(SigningCertificate {
            certs,
            policies: policy_oids(&sc.policies),
        })
    }
}

fn policy_oids(
    policies: &Option<Vec<x509_cert::ext::pkix::certpolicy::PolicyInformation>>,
) -> Vec<ObjectIdentifier> {
    match policies {
        Some(policies) => policies.iter().map(|p| p.policy_identifier).collect(),
        None => Vec::new(),
    }
}

/// Value of an authenticated attribute, typed by the attribute OID
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AttributeValue {
    /// signingTime
    Date(NaiveDateTime),
    /// messageDigest
    Bytes(Vec<u8>),
    /// signingCertificate or signingCertificateV2
    SigningCertificate(SigningCertificate),
    /// contentType
    ContentType(ObjectIdentifier),
    /// serialNumber encoded as an INTEGER
    SerialNumber(BigInt),
    /// Any other attribute, as a string where the value is a string type and as `#` followed by
    /// hex otherwise
    Opaque(String),
}

/// One authenticated attribute. Only the first value of a multi-valued attribute is retained.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attribute {
    /// Attribute type
    pub oid: ObjectIdentifier,
    /// Short name of the attribute type, or the dotted OID
    pub name: String,
    /// Attribute value
    pub value: AttributeValue,
}

fn decode_time(value: &Any) -> Result<Time> {
    Ok(Time::from_der(&value.to_der()?)?)
}

impl TryFrom<&x509_cert::attr::Attribute> for Attribute {
    type Error = Error;

    fn try_from(attr: &x509_cert::attr::Attribute) -> Result<Self> {
        let value = match attr.values.iter().next() {
            Some(v) => v,
            None => return Err(Error::MissingRequiredField("AttributeValue")),
        };

        let parsed = if attr.oid == PKCS9_SIGNING_TIME {
            let time = decode_time(value)?;
            AttributeValue::Date(parse_date(&generalized_time(&time)?)?)
        } else if attr.oid == PKCS9_MESSAGE_DIGEST {
            let digest: OctetString = value.decode_as()?;
            AttributeValue::Bytes(digest.as_bytes().to_vec())
        } else if attr.oid == PKCS9_CONTENT_TYPE {
            AttributeValue::ContentType(value.decode_as()?)
        } else if attr.oid == ID_AA_SIGNING_CERTIFICATE {
            let sc: EssSigningCertificate = value.decode_as()?;
            AttributeValue::SigningCertificate(SigningCertificate::try_from(&sc)?)
        } else if attr.oid == ID_AA_SIGNING_CERTIFICATE_V2 {
            let sc: EssSigningCertificateV2 = value.decode_as()?;
            AttributeValue::SigningCertificate(SigningCertificate::try_from(&sc)?)
        } else if attr.oid == ID_AT_SERIAL_NUMBER {
            match value.decode_as::<Int>() {
                Ok(i) => AttributeValue::SerialNumber(BigInt::from_signed_bytes_be(i.as_bytes())),
                Err(_e) => AttributeValue::Opaque(attribute_value_to_string(value)?),
            }
        } else {
            AttributeValue::Opaque(attribute_value_to_string(value)?)
        };

        Ok(Attribute {
            oid: attr.oid,
            name: attribute_name(&attr.oid),
            value: parsed,
        })
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match &self.value {
            AttributeValue::Date(d) => d.to_string(),
            AttributeValue::Bytes(b) => Base64::encode_string(b),
            AttributeValue::SigningCertificate(sc) => sc.to_string(),
            AttributeValue::ContentType(oid) => content_type_name(oid),
            AttributeValue::SerialNumber(s) => format!("0x{:x}", s),
            AttributeValue::Opaque(s) => s.clone(),
        };
        write!(f, "{}: {}", self.name, value)
    }
}

/// `SignerInfo` models a signer record from a SignedData structure. Signers must be identified
/// by issuer and serial number.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignerInfo {
    /// Syntax version
    pub version: u8,
    /// Issuer of the signing certificate
    pub issuer: Name,
    /// Serial number of the signing certificate
    pub serial_number: BigInt,
    /// Digest algorithm
    pub digest_algorithm: ObjectIdentifier,
    /// Signature algorithm
    pub encrypt_algorithm: ObjectIdentifier,
    /// Signature bytes
    pub signature: Vec<u8>,
    /// Authenticated (signed) attributes, if present
    pub auth_attributes: Option<Vec<Attribute>>,
}

impl SignerInfo {
    /// `attribute` returns the first authenticated attribute with the given name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.auth_attributes
            .as_ref()
            .and_then(|attrs| attrs.iter().find(|a| a.name == name))
    }

    /// `signing_time` returns the value of the signingTime attribute, if present.
    pub fn signing_time(&self) -> Option<NaiveDateTime> {
        match self.attribute("signingTime").map(|a| &a.value) {
            Some(AttributeValue::Date(d)) => Some(*d),
            _ => None,
        }
    }

    /// `message_digest` returns the value of the messageDigest attribute, if present.
    pub fn message_digest(&self) -> Option<&[u8]> {
        match self.attribute("messageDigest").map(|a| &a.value) {
            Some(AttributeValue::Bytes(b)) => Some(b.as_slice()),
            _ => None,
        }
    }

    /// `content_type` returns the value of the contentType attribute, if present.
    pub fn content_type(&self) -> Option<ObjectIdentifier> {
        match self.attribute("contentType").map(|a| &a.value) {
            Some(AttributeValue::ContentType(oid)) => Some(*oid),
            _ => None,
        }
    }

    /// `signing_certificate` returns the value of the signingCertificate attribute or, failing
    /// that, the signingCertificateV2 attribute.
    pub fn signing_certificate(&self) -> Option<&SigningCertificate> {
        let attrs = self.auth_attributes.as_ref()?;
        attrs.iter().find_map(|a| match &a.value {
            AttributeValue::SigningCertificate(sc) => Some(sc),
            _ => None,
        })
    }
}

impl TryFrom<&cms::signed_data::SignerInfo> for SignerInfo {
    type Error = Error;

    fn try_from(si: &cms::signed_data::SignerInfo) -> Result<Self> {
        let (issuer, serial_number) = match &si.sid {
            SignerIdentifier::IssuerAndSerialNumber(isn) => (
                Name::try_from(&isn.issuer)?,
                BigInt::from_signed_bytes_be(isn.serial_number.as_bytes()),
            ),
            SignerIdentifier::SubjectKeyIdentifier(_) => {
                return Err(Error::MissingRequiredField("issuerAndSerialNumber"))
            }
        };

        let auth_attributes = match &si.signed_attrs {
            Some(attrs) => Some(
                attrs
                    .iter()
                    .map(Attribute::try_from)
                    .collect::<Result<Vec<Attribute>>>()?,
            ),
            None => None,
        };

        Ok(SignerInfo {
            version: si.version as u8,
            issuer,
            serial_number,
            digest_algorithm: si.digest_alg.oid,
            encrypt_algorithm: si.signature_algorithm.oid,
            signature: si.signature.as_bytes().to_vec(),
            auth_attributes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cms::{cert::IssuerAndSerialNumber, content_info::CmsVersion};
    use core::str::FromStr;
    use der::{
        asn1::{PrintableString, SetOfVec, UtcTime},
        DateTime,
    };
    use spki::AlgorithmIdentifierOwned;
    use x509_cert::{name::RdnSequence, serial_number::SerialNumber};

    fn to_any<T: Encode>(value: &T) -> Any {
        Any::from_der(&value.to_der().unwrap()).unwrap()
    }

    fn make_attr(oid: ObjectIdentifier, value: Any) -> x509_cert::attr::Attribute {
        x509_cert::attr::Attribute {
            oid,
            values: SetOfVec::try_from(vec![value]).unwrap(),
        }
    }

    fn issuer_serial() -> IssuerSerial {
        IssuerSerial {
            issuer: vec![GeneralName::DirectoryName(
                RdnSequence::from_str("CN=TSA CA,C=CZ").unwrap(),
            )],
            serial_number: SerialNumber::new(&[0x0A, 0xBC]).unwrap(),
        }
    }

    #[test]
    fn attribute_values() {
        let time = Time::UtcTime(
            UtcTime::from_date_time(DateTime::new(2015, 3, 4, 5, 6, 7).unwrap()).unwrap(),
        );
        let attr = Attribute::try_from(&make_attr(PKCS9_SIGNING_TIME, to_any(&time))).unwrap();
        assert_eq!("signingTime", attr.name);
        assert_eq!("signingTime: 2015-03-04 05:06:07", attr.to_string());

        let digest = OctetString::new(vec![0xFB, 0xFF, 0x00]).unwrap();
        let attr = Attribute::try_from(&make_attr(PKCS9_MESSAGE_DIGEST, to_any(&digest))).unwrap();
        assert_eq!(AttributeValue::Bytes(vec![0xFB, 0xFF, 0x00]), attr.value);
        assert_eq!("messageDigest: +/8A", attr.to_string());

        let attr =
            Attribute::try_from(&make_attr(PKCS9_CONTENT_TYPE, to_any(&ID_CT_TST_INFO))).unwrap();
        assert_eq!(AttributeValue::ContentType(ID_CT_TST_INFO), attr.value);
        assert_eq!("contentType: 1.2.840.113549.1.9.16.1.4", attr.to_string());
        let attr =
            Attribute::try_from(&make_attr(PKCS9_CONTENT_TYPE, to_any(&PKCS7_DATA))).unwrap();
        assert_eq!("contentType: data", attr.to_string());

        let serial = Int::new(&[0x01, 0x00]).unwrap();
        let attr = Attribute::try_from(&make_attr(ID_AT_SERIAL_NUMBER, to_any(&serial))).unwrap();
        assert_eq!("serialNumber: 0x100", attr.to_string());

        let unknown = ObjectIdentifier::new_unwrap("1.2.3.4");
        let ps = PrintableString::new("hello").unwrap();
        let attr = Attribute::try_from(&make_attr(unknown, to_any(&ps))).unwrap();
        assert_eq!("1.2.3.4: hello", attr.to_string());
    }

    #[test]
    fn signing_certificate_attributes() {
        let sc = EssSigningCertificate {
            certs: vec![EssCertId {
                cert_hash: OctetString::new(vec![1; 20]).unwrap(),
                issuer_serial: Some(issuer_serial()),
            }],
            policies: None,
        };
        let attr =
            Attribute::try_from(&make_attr(ID_AA_SIGNING_CERTIFICATE, to_any(&sc))).unwrap();
        assert_eq!("signingCertificate: 0xabc", attr.to_string());
        match attr.value {
            AttributeValue::SigningCertificate(sc) => {
                assert_eq!(ID_SHA_1, sc.certs[0].hash_algorithm);
                assert_eq!(
                    "C=CZ, CN=TSA CA",
                    sc.certs[0].issuer.as_ref().unwrap().to_string()
                );
                assert!(sc.policies.is_empty());
            }
            _ => panic!("unexpected attribute value"),
        }

        let sc = EssSigningCertificateV2 {
            certs: vec![EssCertIdV2 {
                hash_algorithm: None,
                cert_hash: OctetString::new(vec![2; 32]).unwrap(),
                issuer_serial: None,
            }],
            policies: None,
        };
        let attr =
            Attribute::try_from(&make_attr(ID_AA_SIGNING_CERTIFICATE_V2, to_any(&sc))).unwrap();
        match attr.value {
            AttributeValue::SigningCertificate(sc) => {
                assert_eq!(ID_SHA_256, sc.certs[0].hash_algorithm);
                assert_eq!(None, sc.certs[0].serial_number);
            }
            _ => panic!("unexpected attribute value"),
        }
    }

    #[test]
    fn signer_info() {
        let digest = OctetString::new(vec![9; 32]).unwrap();
        let attrs = SetOfVec::try_from(vec![
            make_attr(PKCS9_CONTENT_TYPE, to_any(&ID_CT_TST_INFO)),
            make_attr(PKCS9_MESSAGE_DIGEST, to_any(&digest)),
        ])
        .unwrap();
        let si = cms::signed_data::SignerInfo {
            version: CmsVersion::V1,
            sid: SignerIdentifier::IssuerAndSerialNumber(IssuerAndSerialNumber {
                issuer: RdnSequence::from_str("CN=TSA CA,C=CZ").unwrap(),
                serial_number: SerialNumber::new(&[0x0A, 0xBC]).unwrap(),
            }),
            digest_alg: AlgorithmIdentifierOwned {
                oid: ID_SHA_256,
                parameters: None,
            },
            signed_attrs: Some(attrs),
            signature_algorithm: AlgorithmIdentifierOwned {
                oid: PKIXALG_RSA_ENCRYPTION,
                parameters: None,
            },
            signature: OctetString::new(vec![7; 8]).unwrap(),
            unsigned_attrs: None,
        };
        let model = SignerInfo::try_from(&si).unwrap();
        assert_eq!(1, model.version);
        assert_eq!("C=CZ, CN=TSA CA", model.issuer.to_string());
        assert_eq!(BigInt::from(0xABC), model.serial_number);
        assert_eq!(ID_SHA_256, model.digest_algorithm);
        assert_eq!(PKIXALG_RSA_ENCRYPTION, model.encrypt_algorithm);
        assert_eq!(Some(&[9u8; 32][..]), model.message_digest());
        assert_eq!(Some(ID_CT_TST_INFO), model.content_type());
        assert_eq!(None, model.signing_time());
        assert!(model.signing_certificate().is_none());
        assert_eq!(2, model.auth_attributes.as_ref().unwrap().len());
    }
}
