//! TSTInfo and supporting structures from RFC 3161

use alloc::string::String;

use der::{
    asn1::{Int, OctetString},
    oid::ObjectIdentifier,
    DecodeValue, EncodeValue, FixedTag, Header, Length, Reader, Sequence, Tag, Writer,
};
use spki::AlgorithmIdentifierOwned;
use x509_cert::ext::{pkix::name::GeneralName, Extensions};

/// TSTInfo as defined in [RFC 3161 Section 2.4.2].
///
/// ```text
/// TSTInfo ::= SEQUENCE  {
///    version                      INTEGER  { v1(1) },
///    policy                       TSAPolicyId,
///    messageImprint               MessageImprint,
///      -- MUST have the same value as the similar field in
///      -- TimeStampReq
///    serialNumber                 INTEGER,
///     -- Time-Stamping users MUST be ready to accommodate integers
///     -- up to 160 bits.
///    genTime                      GeneralizedTime,
///    accuracy                     Accuracy                 OPTIONAL,
///    ordering                     BOOLEAN             DEFAULT FALSE,
///    nonce                        INTEGER                  OPTIONAL,
///      -- MUST be present if the similar field was present
///      -- in TimeStampReq.  In that case it MUST have the same value.
///    tsa                          [0] GeneralName          OPTIONAL,
///    extensions                   [1] IMPLICIT Extensions   OPTIONAL  }
/// ```
///
/// The genTime field is retained as its string form, see [`RawGeneralizedTime`].
///
/// [RFC 3161 Section 2.4.2]: https://datatracker.ietf.org/doc/html/rfc3161#section-2.4.2
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct TstInfo {
    pub version: u8,
    pub policy: ObjectIdentifier,
    pub message_imprint: MessageImprint,
    pub serial_number: Int,
    pub gen_time: RawGeneralizedTime,
    #[asn1(optional = "true")]
    pub accuracy: Option<Accuracy>,
    #[asn1(default = "Default::default")]
    pub ordering: bool,
    #[asn1(optional = "true")]
    pub nonce: Option<Int>,
    #[asn1(context_specific = "0", tag_mode = "EXPLICIT", optional = "true")]
    pub tsa: Option<GeneralName>,
    #[asn1(context_specific = "1", tag_mode = "IMPLICIT", optional = "true")]
    pub extensions: Option<Extensions>,
}

/// MessageImprint as defined in [RFC 3161 Section 2.4.1].
///
/// ```text
/// MessageImprint ::= SEQUENCE  {
///     hashAlgorithm                AlgorithmIdentifier,
///     hashedMessage                OCTET STRING  }
/// ```
///
/// [RFC 3161 Section 2.4.1]: https://datatracker.ietf.org/doc/html/rfc3161#section-2.4.1
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct MessageImprint {
    pub hash_algorithm: AlgorithmIdentifierOwned,
    pub hashed_message: OctetString,
}

/// Accuracy as defined in [RFC 3161 Section 2.4.2].
///
/// ```text
/// Accuracy ::= SEQUENCE {
///     seconds        INTEGER              OPTIONAL,
///     millis     [0] INTEGER  (1..999)    OPTIONAL,
///     micros     [1] INTEGER  (1..999)    OPTIONAL  }
/// ```
///
/// [RFC 3161 Section 2.4.2]: https://datatracker.ietf.org/doc/html/rfc3161#section-2.4.2
#[derive(Clone, Copy, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct Accuracy {
    #[asn1(optional = "true")]
    pub seconds: Option<u64>,
    #[asn1(context_specific = "0", tag_mode = "IMPLICIT", optional = "true")]
    pub millis: Option<u16>,
    #[asn1(context_specific = "1", tag_mode = "IMPLICIT", optional = "true")]
    pub micros: Option<u16>,
}

/// `RawGeneralizedTime` is a GeneralizedTime value retained in its string form,
/// `YYYYMMDDHHMMSS[.f...]Z`. Unlike [`der::asn1::GeneralizedTime`], fractional seconds are
/// accepted, which RFC 3161 permits in genTime.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct RawGeneralizedTime(pub String);

impl FixedTag for RawGeneralizedTime {
    const TAG: Tag = Tag::GeneralizedTime;
}

impl<'a> DecodeValue<'a> for RawGeneralizedTime {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        let bytes = reader.read_vec(header.length)?;
        if !bytes
            .iter()
            .all(|b| b.is_ascii_digit() || *b == b'.' || *b == b'Z')
        {
            return Err(Tag::GeneralizedTime.value_error());
        }
        let s = String::from_utf8(bytes).map_err(|_| Tag::GeneralizedTime.value_error())?;
        Ok(RawGeneralizedTime(s))
    }
}

impl EncodeValue for RawGeneralizedTime {
    fn value_len(&self) -> der::Result<Length> {
        Length::try_from(self.0.len())
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        writer.write(self.0.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use der::{Decode, Encode};
    use hex_literal::hex;

    #[test]
    fn raw_generalized_time() {
        // GeneralizedTime 20230405060708.25Z
        let enc = hex!("181232303233303430353036303730382E32355A");
        let gt = RawGeneralizedTime::from_der(&enc).unwrap();
        assert_eq!("20230405060708.25Z", gt.0);
        assert_eq!(enc.to_vec(), gt.to_der().unwrap());

        // UTCTime is rejected
        let utc = hex!("170D3233303430353036303730385A");
        assert!(RawGeneralizedTime::from_der(&utc).is_err());

        // Non-numeric content is rejected
        let bad = hex!("180441424344");
        assert!(RawGeneralizedTime::from_der(&bad).is_err());
    }

    #[test]
    fn accuracy() {
        // Accuracy { seconds 1, millis 500 }
        let enc = hex!("3007020101800201F4");
        let acc = Accuracy::from_der(&enc).unwrap();
        assert_eq!(Some(1), acc.seconds);
        assert_eq!(Some(500), acc.millis);
        assert_eq!(None, acc.micros);
    }
}
