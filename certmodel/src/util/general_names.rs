//! Utility functions for rendering GeneralName values and byte buffers as strings

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str;

use der::Encode;
use subtle_encoding::hex;
use x509_cert::ext::pkix::name::{DirectoryString, GeneralName};

use crate::model::name::Name;
use crate::util::error::*;

/// `GeneralNameValue` holds the value of a GeneralName. Directory names are retained as [`Name`]
/// values, all other forms are rendered as strings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GeneralNameValue {
    /// String form of a non-directory name
    Text(String),
    /// Directory name
    DirectoryName(Name),
}

impl fmt::Display for GeneralNameValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneralNameValue::Text(s) => write!(f, "{}", s),
            GeneralNameValue::DirectoryName(n) => write!(f, "{}", n),
        }
    }
}

/// `general_name_kind` returns the label used for each form of GeneralName when listing
/// alternative names.
pub fn general_name_kind(gn: &GeneralName) -> &'static str {
    match gn {
        GeneralName::OtherName(_) => "otherName",
        GeneralName::Rfc822Name(_) => "email",
        GeneralName::DnsName(_) => "DNS",
        GeneralName::DirectoryName(_) => "dirName",
        GeneralName::EdiPartyName(_) => "ediPartyName",
        GeneralName::UniformResourceIdentifier(_) => "URI",
        GeneralName::IpAddress(_) => "IP",
        GeneralName::RegisteredId(_) => "RegisteredID",
    }
}

/// `general_name_value` converts a GeneralName into a [`GeneralNameValue`].
pub fn general_name_value(gn: &GeneralName) -> Result<GeneralNameValue> {
    match gn {
        GeneralName::DirectoryName(dn) => Ok(GeneralNameValue::DirectoryName(Name::try_from(dn)?)),
        _ => Ok(GeneralNameValue::Text(general_name_to_string(gn)?)),
    }
}

/// `general_name_to_string` renders a GeneralName as a string. Other names are rendered as the
/// type OID followed by the hex encoding of the value.
pub fn general_name_to_string(gn: &GeneralName) -> Result<String> {
    match gn {
        GeneralName::Rfc822Name(s) => Ok(s.to_string()),
        GeneralName::DnsName(s) => Ok(s.to_string()),
        GeneralName::UniformResourceIdentifier(s) => Ok(s.to_string()),
        GeneralName::DirectoryName(dn) => Ok(Name::try_from(dn)?.to_string()),
        GeneralName::IpAddress(ip) => Ok(ip_address_to_string(ip.as_bytes())),
        GeneralName::RegisteredId(oid) => Ok(oid.to_string()),
        GeneralName::OtherName(on) => Ok(format!(
            "{}:{}",
            on.type_id,
            buffer_to_hex(&on.value.to_der()?)
        )),
        GeneralName::EdiPartyName(epn) => Ok(directory_string_to_string(&epn.party_name)),
    }
}

/// `directory_string_to_string` returns the string held by a DirectoryString.
pub fn directory_string_to_string(ds: &DirectoryString) -> String {
    match ds {
        DirectoryString::PrintableString(s) => s.to_string(),
        DirectoryString::TeletexString(s) => s.to_string(),
        DirectoryString::Utf8String(s) => s.clone(),
    }
}

/// `ip_address_to_string` renders IPv4 addresses in dotted form and IPv6 addresses in colon form.
/// Addresses paired with a mask, as found in name constraints, are rendered as `address/mask`.
/// Buffers of any other length are rendered as hex.
pub fn ip_address_to_string(ip: &[u8]) -> String {
    match ip.len() {
        4 => ip
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<String>>()
            .join("."),
        16 => ip
            .chunks(2)
            .map(|c| format!("{:x}", u16::from_be_bytes([c[0], c[1]])))
            .collect::<Vec<String>>()
            .join(":"),
        8 | 32 => {
            let (addr, mask) = ip.split_at(ip.len() / 2);
            format!(
                "{}/{}",
                ip_address_to_string(addr),
                ip_address_to_string(mask)
            )
        }
        _ => buffer_to_hex(ip),
    }
}

/// `buffer_to_hex` takes a byte array and returns a string featuring upper case ASCII hex characters (without
/// commas, spaces, or brackets).
pub fn buffer_to_hex(buffer: &[u8]) -> String {
    let hex = hex::encode_upper(buffer);
    let r = str::from_utf8(hex.as_slice());
    if let Ok(s) = r {
        s.to_string()
    } else {
        "".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use der::asn1::{Ia5String, OctetString};

    #[test]
    fn ip_addresses() {
        assert_eq!("10.1.2.3", ip_address_to_string(&[10, 1, 2, 3]));
        assert_eq!(
            "10.0.0.0/255.0.0.0",
            ip_address_to_string(&[10, 0, 0, 0, 255, 0, 0, 0])
        );
        let mut v6 = [0u8; 16];
        v6[0] = 0x20;
        v6[1] = 0x01;
        v6[2] = 0x0d;
        v6[3] = 0xb8;
        v6[15] = 1;
        assert_eq!("2001:db8:0:0:0:0:0:1", ip_address_to_string(&v6));
        assert_eq!("0102", ip_address_to_string(&[1, 2]));
    }

    #[test]
    fn general_name_strings() {
        let dns = GeneralName::DnsName(Ia5String::new("example.com").unwrap());
        assert_eq!("DNS", general_name_kind(&dns));
        assert_eq!("example.com", general_name_to_string(&dns).unwrap());

        let uri = GeneralName::UniformResourceIdentifier(
            Ia5String::new("http://crl.example.com/ca.crl").unwrap(),
        );
        assert_eq!("URI", general_name_kind(&uri));
        assert_eq!(
            GeneralNameValue::Text("http://crl.example.com/ca.crl".to_string()),
            general_name_value(&uri).unwrap()
        );

        let ip = GeneralName::IpAddress(OctetString::new(vec![192, 168, 1, 1]).unwrap());
        assert_eq!("IP", general_name_kind(&ip));
        assert_eq!("192.168.1.1", general_name_to_string(&ip).unwrap());

        let rid = GeneralName::RegisteredId(const_oid::db::rfc5280::ID_KP_SERVER_AUTH);
        assert_eq!("1.3.6.1.5.5.7.3.1", general_name_to_string(&rid).unwrap());
    }

    #[test]
    fn hex() {
        assert_eq!("00FFA1", buffer_to_hex(&[0, 255, 0xa1]));
        assert_eq!("", buffer_to_hex(&[]));
    }
}
