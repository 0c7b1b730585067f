//! Order-independent, multi-valued model of a distinguished name

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use der::{
    asn1::{Any, Ia5String, PrintableString, Utf8StringRef},
    Encode, Tag, Tagged,
};
use x509_cert::name::RdnSequence;

use crate::util::{error::*, general_names::buffer_to_hex, oid_tables::name_attribute_short_name};

/// `Name` maps attribute kinds to the values asserted for that kind in a distinguished name.
///
/// Attribute kinds are the short names from [`NAME_ATTRIBUTE_NAMES`](crate::NAME_ATTRIBUTE_NAMES),
/// or the dotted OID when no short name is defined. Values are kept in the order encountered,
/// including duplicates, but neither the order of RDNs nor the order of values affects equality
/// or the string form.
#[derive(Clone, Debug, Default)]
pub struct Name {
    attributes: BTreeMap<String, Vec<String>>,
}

impl Name {
    /// `add` appends a value for the given attribute kind.
    pub fn add(&mut self, kind: &str, value: &str) {
        self.attributes
            .entry(kind.to_string())
            .or_default()
            .push(value.to_string());
    }

    /// `attributes` returns a copy of the attribute map.
    pub fn attributes(&self) -> BTreeMap<String, Vec<String>> {
        self.attributes.clone()
    }

    /// `get` returns the values asserted for an attribute kind, if any.
    pub fn get(&self, kind: &str) -> Option<&[String]> {
        self.attributes.get(kind).map(|v| v.as_slice())
    }

    /// `is_empty` returns true if the name has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    fn sorted(&self) -> BTreeMap<&str, Vec<&str>> {
        self.attributes
            .iter()
            .map(|(k, v)| {
                let mut values: Vec<&str> = v.iter().map(|s| s.as_str()).collect();
                values.sort_unstable();
                (k.as_str(), values)
            })
            .collect()
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.sorted() == other.sorted()
    }
}

impl Eq for Name {}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .sorted()
            .iter()
            .flat_map(|(k, values)| values.iter().map(move |v| format!("{}={}", k, v)))
            .collect::<Vec<String>>()
            .join(", ");
        write!(f, "{}", rendered)
    }
}

impl TryFrom<&RdnSequence> for Name {
    type Error = Error;

    fn try_from(rdns: &RdnSequence) -> Result<Self> {
        let mut name = Name::default();
        for rdn in rdns.0.iter() {
            for atav in rdn.0.iter() {
                let kind = match name_attribute_short_name(&atav.oid) {
                    Some(short) => short.to_string(),
                    None => atav.oid.to_string(),
                };
                let value = attribute_value_to_string(&atav.value)?;
                name.add(&kind, &value);
            }
        }
        Ok(name)
    }
}

/// `attribute_value_to_string` returns the string form of a name attribute value. Character
/// string types are returned as is, BMPString values are decoded from UTF-16 and values of any
/// other type are rendered as `#` followed by the hex encoding of the value, per RFC 4514.
pub fn attribute_value_to_string(value: &Any) -> Result<String> {
    let s = match value.tag() {
        Tag::PrintableString => value
            .decode_as()
            .ok()
            .map(|s: PrintableString| s.to_string()),
        Tag::Utf8String => value
            .decode_as()
            .ok()
            .map(|s: Utf8StringRef<'_>| s.to_string()),
        Tag::Ia5String => value.decode_as().ok().map(|s: Ia5String| s.to_string()),
        Tag::TeletexString | Tag::VisibleString => {
            Some(String::from_utf8_lossy(value.value()).to_string())
        }
        Tag::BmpString => {
            let units = value
                .value()
                .chunks(2)
                .map(|c| match c {
                    [hi, lo] => u16::from_be_bytes([*hi, *lo]),
                    _ => 0xFFFD,
                })
                .collect::<Vec<u16>>();
            Some(
                char::decode_utf16(units)
                    .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                    .collect::<String>(),
            )
        }
        _ => None,
    };
    match s {
        Some(s) => Ok(s),
        None => Ok(format!("#{}", buffer_to_hex(&value.to_der()?))),
    }
}
