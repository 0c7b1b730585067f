#![allow(dead_code)]

use core::str::FromStr;

use const_oid::{db::rfc5912::SHA_256_WITH_RSA_ENCRYPTION, ObjectIdentifier};
use der::{
    asn1::{BitString, GeneralizedTime, OctetString, UtcTime, Uint},
    DateTime, Encode,
};
use spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned};
use x509_cert::{
    certificate::{TbsCertificate, Version},
    ext::Extension,
    name::RdnSequence,
    serial_number::SerialNumber,
    time::{Time, Validity},
    Certificate,
};

use certmodel::{RsaPublicKeySyntax, PKIXALG_RSA_ENCRYPTION};

pub const ISSUER: &str = "CN=Example CA,O=Example,C=US";
pub const SUBJECT: &str = "CN=www.example.com,OU=Web,O=Example,C=US";

/// UTCTime through 2049, GeneralizedTime after. Years before 1970 cannot be built.
pub fn time(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Time {
    let dt = DateTime::new(year, month, day, hour, minute, second).unwrap();
    if year < 2050 {
        Time::UtcTime(UtcTime::from_date_time(dt).unwrap())
    } else {
        Time::GeneralTime(GeneralizedTime::from_date_time(dt))
    }
}

pub fn extension<T: Encode>(oid: ObjectIdentifier, critical: bool, value: &T) -> Extension {
    Extension {
        extn_id: oid,
        critical,
        extn_value: OctetString::new(value.to_der().unwrap()).unwrap(),
    }
}

pub fn raw_extension(oid: &str, critical: bool, value: &[u8]) -> Extension {
    Extension {
        extn_id: ObjectIdentifier::new_unwrap(oid),
        critical,
        extn_value: OctetString::new(value).unwrap(),
    }
}

pub fn rsa_public_key() -> SubjectPublicKeyInfoOwned {
    let mut modulus = vec![0xC5; 128];
    modulus[127] = 0x01;
    let key = RsaPublicKeySyntax {
        modulus: Uint::new(&modulus).unwrap(),
        public_exponent: Uint::new(&[0x01, 0x00, 0x01]).unwrap(),
    };
    SubjectPublicKeyInfoOwned {
        algorithm: AlgorithmIdentifierOwned {
            oid: PKIXALG_RSA_ENCRYPTION,
            parameters: None,
        },
        subject_public_key: BitString::from_bytes(&key.to_der().unwrap()).unwrap(),
    }
}

pub fn tbs_certificate(
    serial: &[u8],
    not_before: Time,
    not_after: Time,
    extensions: Vec<Extension>,
) -> TbsCertificate {
    let sig_alg = AlgorithmIdentifierOwned {
        oid: SHA_256_WITH_RSA_ENCRYPTION,
        parameters: None,
    };
    TbsCertificate {
        version: Version::V3,
        serial_number: SerialNumber::new(serial).unwrap(),
        signature: sig_alg,
        issuer: RdnSequence::from_str(ISSUER).unwrap(),
        validity: Validity {
            not_before,
            not_after,
        },
        subject: RdnSequence::from_str(SUBJECT).unwrap(),
        subject_public_key_info: rsa_public_key(),
        issuer_unique_id: None,
        subject_unique_id: None,
        extensions: if extensions.is_empty() {
            None
        } else {
            Some(extensions)
        },
    }
}

pub fn certificate(tbs_certificate: TbsCertificate) -> Certificate {
    Certificate {
        signature_algorithm: tbs_certificate.signature.clone(),
        tbs_certificate,
        signature: BitString::from_bytes(&[0x5A; 64]).unwrap(),
    }
}

/// Certificate valid from 2020-01-01 00:00:00 through 2020-01-11 00:00:00
pub fn ten_day_certificate(serial: &[u8]) -> Certificate {
    certificate(tbs_certificate(
        serial,
        time(2020, 1, 1, 0, 0, 0),
        time(2020, 1, 11, 0, 0, 0),
        vec![],
    ))
}
