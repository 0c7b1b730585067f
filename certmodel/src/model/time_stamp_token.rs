//! RFC 3161 time stamp token model

use alloc::string::String;
use alloc::vec::Vec;

use chrono::{Duration, FixedOffset, NaiveDateTime};
use cms::{cert::CertificateChoices, content_info::ContentInfo, signed_data::SignedData};
use const_oid::ObjectIdentifier;
use der::{asn1::OctetString, Decode};
use num_bigint::BigInt;

#[cfg(feature = "std")]
use crate::evaluation::settings::ModelSettings;
use crate::{
    asn1::time_stamp_protocol::*,
    model::{certificate::X509Certificate, name::Name, signer_info::SignerInfo},
    util::{date_utils::*, error::*, general_names::*, oid_tables::*},
};

/// Hash algorithm and hash of the time-stamped data
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MsgImprint {
    /// Hash algorithm
    pub alg: ObjectIdentifier,
    /// Hash value
    pub imprint: Vec<u8>,
}

/// Accuracy of the generation time. Each component is independently optional.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
#[allow(missing_docs)]
pub struct TsAccuracy {
    pub seconds: Option<u64>,
    pub millis: Option<u16>,
    pub micros: Option<u16>,
}

/// `TimeStampToken` models a TSTInfo structure along with the certificates and signer infos of
/// the SignedData that carried it, when available.
///
/// The generation time is retained as the encoded string. Unlike certificate dates, the time
/// returned by [`gen_time_as_datetime`](TimeStampToken::gen_time_as_datetime) is adjusted to the
/// local timezone.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimeStampToken {
    /// Syntax version
    pub version: u8,
    /// TSA policy
    pub policy: ObjectIdentifier,
    /// Message imprint
    pub msg_imprint: MsgImprint,
    /// Serial number of the token
    pub serial_num: BigInt,
    /// genTime as encoded, i.e., `YYYYMMDDHHMMSS[.f...]Z`
    pub gen_time: String,
    /// Accuracy, if present
    pub accuracy: Option<TsAccuracy>,
    /// Ordering flag
    pub ordering: bool,
    /// Nonce, if present
    pub nonce: Option<BigInt>,
    /// TSA name, if present
    pub tsa: Option<GeneralNameValue>,
    /// Certificates as decoded
    pub asn1_certificates: Vec<x509_cert::Certificate>,
    /// Certificates as models
    pub certificates: Vec<X509Certificate>,
    /// Signer infos from the enclosing SignedData
    pub signer_infos: Vec<SignerInfo>,
    gen_time_utc: NaiveDateTime,
}

impl TryFrom<&TstInfo> for TimeStampToken {
    type Error = Error;

    fn try_from(tst: &TstInfo) -> Result<Self> {
        let tsa = match &tst.tsa {
            Some(gn) => Some(general_name_value(gn)?),
            None => None,
        };
        Ok(TimeStampToken {
            version: tst.version,
            policy: tst.policy,
            msg_imprint: MsgImprint {
                alg: tst.message_imprint.hash_algorithm.oid,
                imprint: tst.message_imprint.hashed_message.as_bytes().to_vec(),
            },
            serial_num: BigInt::from_signed_bytes_be(tst.serial_number.as_bytes()),
            gen_time: tst.gen_time.0.clone(),
            accuracy: tst.accuracy.map(|a| TsAccuracy {
                seconds: a.seconds,
                millis: a.millis,
                micros: a.micros,
            }),
            ordering: tst.ordering,
            nonce: tst
                .nonce
                .as_ref()
                .map(|n| BigInt::from_signed_bytes_be(n.as_bytes())),
            tsa,
            asn1_certificates: Vec::new(),
            certificates: Vec::new(),
            signer_infos: Vec::new(),
            gen_time_utc: parse_date_with_fraction(&tst.gen_time.0)?,
        })
    }
}

impl TimeStampToken {
    /// `from_content_info` parses a complete time stamp token, i.e., a ContentInfo carrying a
    /// SignedData that encapsulates a TSTInfo. Certificates and signer infos from the SignedData
    /// are included.
    pub fn from_content_info(ci: &ContentInfo) -> Result<Self> {
        if ci.content_type != PKCS7_SIGNED_DATA {
            return Err(Error::UnexpectedContentType(ci.content_type));
        }
        let sd: SignedData = ci.content.decode_as()?;

        let eci = &sd.encap_content_info;
        if eci.econtent_type != ID_CT_TST_INFO {
            return Err(Error::UnexpectedContentType(eci.econtent_type));
        }
        let econtent = match &eci.econtent {
            Some(econtent) => econtent,
            None => return Err(Error::MissingRequiredField("eContent")),
        };
        let os: OctetString = econtent.decode_as()?;
        let tst = TstInfo::from_der(os.as_bytes())?;

        let mut certs = Vec::new();
        if let Some(cert_set) = &sd.certificates {
            for choice in cert_set.0.iter() {
                if let CertificateChoices::Certificate(c) = choice {
                    certs.push(c.clone());
                }
            }
        }

        let mut retval = TimeStampToken::try_from(&tst)?.with_certificates(&certs)?;
        for si in sd.signer_infos.0.iter() {
            retval.signer_infos.push(SignerInfo::try_from(si)?);
        }
        Ok(retval)
    }

    /// `with_certificates` adds the given certificates, in decoded and model form.
    pub fn with_certificates(mut self, certs: &[x509_cert::Certificate]) -> Result<Self> {
        for cert in certs {
            self.certificates.push(X509Certificate::try_from(cert)?);
            self.asn1_certificates.push(cert.clone());
        }
        Ok(self)
    }

    /// `certificates_contain` returns true if a certificate with the given serial number is
    /// among the certificates of the token.
    pub fn certificates_contain(&self, serial_number: &BigInt) -> bool {
        self.certificates
            .iter()
            .any(|c| c.tbs_certificate.serial_number == *serial_number)
    }

    /// `tsa_name` returns the TSA name when it is a directory name.
    pub fn tsa_name(&self) -> Option<&Name> {
        match &self.tsa {
            Some(GeneralNameValue::DirectoryName(n)) => Some(n),
            _ => None,
        }
    }

    /// `gen_time_as_utc` returns the generation time, including fractional seconds, without any
    /// timezone adjustment.
    pub fn gen_time_as_utc(&self) -> NaiveDateTime {
        self.gen_time_utc
    }

    /// `gen_time_as_datetime_with_offset` returns the generation time adjusted by the given
    /// offset from UTC.
    pub fn gen_time_as_datetime_with_offset(&self, offset: &FixedOffset) -> Result<NaiveDateTime> {
        self.gen_time_utc
            .checked_add_signed(Duration::seconds(offset.local_minus_utc() as i64))
            .ok_or(Error::MalformedDate)
    }

    /// `gen_time_as_datetime` returns the generation time adjusted to the local timezone, as of
    /// the generation time.
    #[cfg(feature = "std")]
    pub fn gen_time_as_datetime(&self) -> Result<NaiveDateTime> {
        use chrono::{Local, Offset, TimeZone};
        let offset = Local.offset_from_utc_datetime(&self.gen_time_utc).fix();
        self.gen_time_as_datetime_with_offset(&offset)
    }

    /// `gen_time_as_datetime_with_settings` returns the generation time adjusted to the local
    /// timezone when the settings call for it, and in UTC otherwise.
    #[cfg(feature = "std")]
    pub fn gen_time_as_datetime_with_settings(
        &self,
        settings: &ModelSettings,
    ) -> Result<NaiveDateTime> {
        if settings.apply_local_timezone_to_gen_time {
            self.gen_time_as_datetime()
        } else {
            Ok(self.gen_time_utc)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};
    use core::str::FromStr;
    use der::asn1::Int;
    use spki::AlgorithmIdentifierOwned;
    use x509_cert::{ext::pkix::name::GeneralName, name::RdnSequence};

    fn make_tst_info(gen_time: &str) -> TstInfo {
        TstInfo {
            version: 1,
            policy: ObjectIdentifier::new_unwrap("1.2.3.4.1"),
            message_imprint: MessageImprint {
                hash_algorithm: AlgorithmIdentifierOwned {
                    oid: const_oid::db::rfc5912::ID_SHA_256,
                    parameters: None,
                },
                hashed_message: OctetString::new(vec![0xAB; 32]).unwrap(),
            },
            serial_number: Int::new(&[0x03, 0xE8]).unwrap(),
            gen_time: RawGeneralizedTime(gen_time.into()),
            accuracy: Some(Accuracy {
                seconds: Some(1),
                millis: None,
                micros: Some(250),
            }),
            ordering: false,
            nonce: Some(Int::new(&[0x2A]).unwrap()),
            tsa: Some(GeneralName::DirectoryName(
                RdnSequence::from_str("CN=TSA,C=CZ").unwrap(),
            )),
            extensions: None,
        }
    }

    #[test]
    fn from_tst_info() {
        let tst = TimeStampToken::try_from(&make_tst_info("20140708091011.5Z")).unwrap();
        assert_eq!(1, tst.version);
        assert_eq!(BigInt::from(1000), tst.serial_num);
        assert_eq!(vec![0xAB; 32], tst.msg_imprint.imprint);
        assert_eq!("20140708091011.5Z", tst.gen_time);
        assert_eq!(Some(BigInt::from(42)), tst.nonce);
        assert_eq!(
            Some(TsAccuracy {
                seconds: Some(1),
                millis: None,
                micros: Some(250)
            }),
            tst.accuracy
        );
        assert_eq!("C=CZ, CN=TSA", tst.tsa_name().unwrap().to_string());
        assert!(!tst.certificates_contain(&BigInt::from(1000)));

        let utc = tst.gen_time_as_utc();
        assert_eq!(
            NaiveDate::from_ymd_opt(2014, 7, 8)
                .unwrap()
                .and_hms_micro_opt(9, 10, 11, 500_000)
                .unwrap(),
            utc
        );
        assert_eq!(500_000, utc.nanosecond() / 1000);
    }

    #[test]
    fn offsets() {
        let tst = TimeStampToken::try_from(&make_tst_info("20140708091011Z")).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = tst.gen_time_as_datetime_with_offset(&plus_two).unwrap();
        assert_eq!(11, local.hour());
        assert_eq!(10, local.minute());

        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        let local = tst.gen_time_as_datetime_with_offset(&minus_five).unwrap();
        assert_eq!(4, local.hour());

        #[cfg(feature = "std")]
        {
            let mut settings = ModelSettings::new();
            settings.apply_local_timezone_to_gen_time = false;
            assert_eq!(
                tst.gen_time_as_utc(),
                tst.gen_time_as_datetime_with_settings(&settings).unwrap()
            );
        }
    }

    #[test]
    fn malformed_gen_time() {
        assert_eq!(
            Err(Error::MalformedDate),
            TimeStampToken::try_from(&make_tst_info("201407080910Z"))
        );
    }
}
