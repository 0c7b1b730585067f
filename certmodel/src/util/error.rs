//! Error types

use core::fmt;

use const_oid::ObjectIdentifier;

/// Result type
pub type Result<T> = core::result::Result<T, Error>;

/// Error type
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Asn1Error is used to propagate error information from the x509-cert, cms, spki and der crates.
    Asn1Error(der::Error),
    /// UnknownCriticalExtension occurs when a certificate features a critical extension whose OID
    /// does not appear in the extension registry.
    UnknownCriticalExtension(ObjectIdentifier),
    /// MalformedCriticalExtension occurs when a certificate features a critical extension that is
    /// registered but whose value could not be decoded or interpreted.
    MalformedCriticalExtension(ObjectIdentifier),
    /// MalformedDate occurs when a date string has non-numeric or out of range components.
    MalformedDate,
    /// MissingRequiredField occurs when a structure lacks a field required to build a model object.
    MissingRequiredField(&'static str),
    /// ParseError occurs when a decoded value cannot be interpreted, for example a general name
    /// that cannot be rendered as a string.
    ParseError,
    /// UnexpectedContentType occurs when a ContentInfo or EncapsulatedContentInfo carries a type
    /// other than the one being parsed.
    UnexpectedContentType(ObjectIdentifier),
    /// RevocationLookup occurs when a revocation status source fails to answer a query.
    RevocationLookup,
    /// StdIoError is used to propagate std::io::Error information.
    #[cfg(feature = "std")]
    StdIoError(std::io::ErrorKind),
}

impl From<der::Error> for Error {
    fn from(err: der::Error) -> Error {
        Error::Asn1Error(err)
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::StdIoError(err.kind())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Asn1Error(err) => write!(f, "Asn1Error: {}", err),
            Error::UnknownCriticalExtension(oid) => {
                write!(f, "UnknownCriticalExtension: {}", oid)
            }
            Error::MalformedCriticalExtension(oid) => {
                write!(f, "MalformedCriticalExtension: {}", oid)
            }
            Error::MalformedDate => write!(f, "MalformedDate"),
            Error::MissingRequiredField(field) => write!(f, "MissingRequiredField: {}", field),
            Error::ParseError => write!(f, "ParseError"),
            Error::UnexpectedContentType(oid) => write!(f, "UnexpectedContentType: {}", oid),
            Error::RevocationLookup => write!(f, "RevocationLookup"),
            #[cfg(feature = "std")]
            Error::StdIoError(err) => write!(f, "StdError: {:?}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[test]
fn error_test() {
    use alloc::format;
    use const_oid::db::rfc5280::ID_CE_KEY_USAGE;

    let _s = format!("{}", Error::UnknownCriticalExtension(ID_CE_KEY_USAGE));
    let _s = format!("{}", Error::MalformedCriticalExtension(ID_CE_KEY_USAGE));
    let _s = format!("{}", Error::MalformedDate);
    let _s = format!("{}", Error::MissingRequiredField("issuer"));
    let _s = format!("{}", Error::ParseError);
    let _s = format!("{}", Error::UnexpectedContentType(ID_CE_KEY_USAGE));
    let _s = format!("{}", Error::RevocationLookup);
    let _s = format!(
        "{}",
        Error::Asn1Error(der::Error::from(der::ErrorKind::Failed))
    );
    #[cfg(feature = "std")]
    {
        let _s = format!("{}", Error::StdIoError(std::io::ErrorKind::NotFound));
    }
    assert_eq!(
        "UnknownCriticalExtension: 2.5.29.15",
        format!("{}", Error::UnknownCriticalExtension(ID_CE_KEY_USAGE))
    );
}
