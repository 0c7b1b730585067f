mod cert_utils;
use cert_utils::*;

use core::str::FromStr;

use certmodel::*;
use chrono::{NaiveDate, Timelike};
use cms::{
    cert::{CertificateChoices, IssuerAndSerialNumber},
    content_info::{CmsVersion, ContentInfo},
    signed_data::{
        CertificateSet, DigestAlgorithmIdentifiers, EncapsulatedContentInfo, SignedData,
        SignerIdentifier, SignerInfos,
    },
};
use const_oid::db::rfc5912::{ID_SHA_256, SHA_256_WITH_RSA_ENCRYPTION};
use der::{
    asn1::{Any, Int, OctetString, SetOfVec},
    Decode, Encode,
};
use num_bigint::BigInt;
use spki::AlgorithmIdentifierOwned;
use x509_cert::{
    ext::pkix::name::GeneralName, name::RdnSequence, serial_number::SerialNumber,
};

fn sha256() -> AlgorithmIdentifierOwned {
    AlgorithmIdentifierOwned {
        oid: ID_SHA_256,
        parameters: None,
    }
}

fn tst_info() -> TstInfo {
    TstInfo {
        version: 1,
        policy: const_oid::ObjectIdentifier::new_unwrap("1.3.6.1.4.1.99999.1"),
        message_imprint: MessageImprint {
            hash_algorithm: sha256(),
            hashed_message: OctetString::new(vec![0x3C; 32]).unwrap(),
        },
        serial_number: Int::new(&[0x01, 0xF4]).unwrap(),
        gen_time: RawGeneralizedTime("20200105123045.125Z".to_string()),
        accuracy: None,
        ordering: false,
        nonce: None,
        tsa: Some(GeneralName::DirectoryName(
            RdnSequence::from_str("CN=Example TSA,O=Example,C=US").unwrap(),
        )),
        extensions: None,
    }
}

fn to_any<T: Encode>(value: &T) -> Any {
    Any::from_der(&value.to_der().unwrap()).unwrap()
}

fn attribute<T: Encode>(oid: const_oid::ObjectIdentifier, value: &T) -> x509_cert::attr::Attribute {
    x509_cert::attr::Attribute {
        oid,
        values: SetOfVec::try_from(vec![to_any(value)]).unwrap(),
    }
}

fn signer_info(serial: &[u8]) -> cms::signed_data::SignerInfo {
    let signed_attrs = SetOfVec::try_from(vec![
        attribute(PKCS9_CONTENT_TYPE, &ID_CT_TST_INFO),
        attribute(
            PKCS9_MESSAGE_DIGEST,
            &OctetString::new(vec![0x77; 32]).unwrap(),
        ),
        attribute(PKCS9_SIGNING_TIME, &time(2020, 1, 5, 12, 30, 45)),
    ])
    .unwrap();
    cms::signed_data::SignerInfo {
        version: CmsVersion::V1,
        sid: SignerIdentifier::IssuerAndSerialNumber(IssuerAndSerialNumber {
            issuer: RdnSequence::from_str(ISSUER).unwrap(),
            serial_number: SerialNumber::new(serial).unwrap(),
        }),
        digest_alg: sha256(),
        signed_attrs: Some(signed_attrs),
        signature_algorithm: AlgorithmIdentifierOwned {
            oid: SHA_256_WITH_RSA_ENCRYPTION,
            parameters: None,
        },
        signature: OctetString::new(vec![0xAA; 64]).unwrap(),
        unsigned_attrs: None,
    }
}

fn time_stamp_token(econtent_type: const_oid::ObjectIdentifier) -> ContentInfo {
    let tst = OctetString::new(tst_info().to_der().unwrap()).unwrap();
    let sd = SignedData {
        version: CmsVersion::V3,
        digest_algorithms: DigestAlgorithmIdentifiers::try_from(vec![sha256()]).unwrap(),
        encap_content_info: EncapsulatedContentInfo {
            econtent_type,
            econtent: Some(to_any(&tst)),
        },
        certificates: Some(CertificateSet(
            SetOfVec::try_from(vec![CertificateChoices::Certificate(ten_day_certificate(
                &[0x05, 0x39],
            ))])
            .unwrap(),
        )),
        crls: None,
        signer_infos: SignerInfos(SetOfVec::try_from(vec![signer_info(&[0x05, 0x39])]).unwrap()),
    };
    ContentInfo {
        content_type: PKCS7_SIGNED_DATA,
        content: to_any(&sd),
    }
}

#[test]
fn from_content_info() {
    let token = TimeStampToken::from_content_info(&time_stamp_token(ID_CT_TST_INFO)).unwrap();
    assert_eq!(1, token.version);
    assert_eq!(BigInt::from(500), token.serial_num);
    assert_eq!(ID_SHA_256, token.msg_imprint.alg);
    assert_eq!("20200105123045.125Z", token.gen_time);
    assert_eq!(None, token.nonce);
    assert_eq!(None, token.accuracy);
    assert_eq!(
        "C=US, CN=Example TSA, O=Example",
        token.tsa_name().unwrap().to_string()
    );

    let utc = token.gen_time_as_utc();
    assert_eq!(
        NaiveDate::from_ymd_opt(2020, 1, 5)
            .unwrap()
            .and_hms_milli_opt(12, 30, 45, 125)
            .unwrap(),
        utc
    );
    assert_eq!(125_000, utc.nanosecond() / 1000);

    assert_eq!(1, token.certificates.len());
    assert_eq!(1, token.asn1_certificates.len());
    assert!(token.certificates_contain(&BigInt::from(0x0539)));
    assert!(!token.certificates_contain(&BigInt::from(500)));

    assert_eq!(1, token.signer_infos.len());
    let si = &token.signer_infos[0];
    assert_eq!(1, si.version);
    assert_eq!(BigInt::from(0x0539), si.serial_number);
    assert_eq!("C=US, CN=Example CA, O=Example", si.issuer.to_string());
    assert_eq!(ID_SHA_256, si.digest_algorithm);
    assert_eq!(SHA_256_WITH_RSA_ENCRYPTION, si.encrypt_algorithm);
    assert_eq!(Some(ID_CT_TST_INFO), si.content_type());
    assert_eq!(Some(&[0x77; 32][..]), si.message_digest());
    assert_eq!(
        Some(
            NaiveDate::from_ymd_opt(2020, 1, 5)
                .unwrap()
                .and_hms_opt(12, 30, 45)
                .unwrap()
        ),
        si.signing_time()
    );
    assert!(si.signing_certificate().is_none());
}

#[test]
fn unexpected_content() {
    assert_eq!(
        Err(Error::UnexpectedContentType(PKCS7_DATA)),
        TimeStampToken::from_content_info(&time_stamp_token(PKCS7_DATA))
    );

    let not_signed_data = ContentInfo {
        content_type: PKCS7_DATA,
        content: to_any(&OctetString::new(vec![0x01]).unwrap()),
    };
    assert_eq!(
        Err(Error::UnexpectedContentType(PKCS7_DATA)),
        TimeStampToken::from_content_info(&not_signed_data)
    );
}

#[test]
fn time_stamp_validity_uses_gen_time() {
    let token = TimeStampToken::from_content_info(&time_stamp_token(ID_CT_TST_INFO)).unwrap();
    let mut settings = ModelSettings::new();
    settings.apply_local_timezone_to_gen_time = false;
    let gen_time = token.gen_time_as_datetime_with_settings(&settings).unwrap();

    let vc = token.certificates[0]
        .clone()
        .attach_verification_results(VerificationResults::new());
    assert!(vc
        .valid_at_date(&gen_time, &RevocationMap::new(), true)
        .unwrap());
}
