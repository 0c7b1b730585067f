//! OIDs and types for the Netscape certificate type extension and vendor marker extensions

use const_oid::ObjectIdentifier;
use flagset::{flags, FlagSet};

/// OID for the Netscape certificate type extension: 2.16.840.1.113730.1.1. See [`NetscapeCertType`](type.NetscapeCertType.html).
pub const NETSCAPE_CERT_TYPE: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("2.16.840.1.113730.1.1");

flags! {
    /// Netscape certificate type flags as described in the Netscape certificate extensions
    /// specification.
    ///
    /// ```text
    /// NetscapeCertType ::= BIT STRING {
    ///     sslClient       (0),
    ///     sslServer       (1),
    ///     smime           (2),
    ///     objectSigning   (3),
    ///     reserved        (4),
    ///     sslCA           (5),
    ///     smimeCA         (6),
    ///     objectSigningCA (7) }
    /// ```
    #[allow(missing_docs)]
    pub enum NetscapeCertTypes: u8 {
        SslClient = 1 << 0,
        SslServer = 1 << 1,
        Smime = 1 << 2,
        ObjectSigning = 1 << 3,
        Reserved = 1 << 4,
        SslCa = 1 << 5,
        SmimeCa = 1 << 6,
        ObjectSigningCa = 1 << 7,
    }
}

/// Netscape certificate type extension value. Decodes from a BIT STRING of up to eight bits.
pub type NetscapeCertType = FlagSet<NetscapeCertTypes>;

/// OID for the Apple iPhone Software Submission Signing marker extension: 1.2.840.113635.100.6.1.4
pub const APPLE_SUBMISSION_CERTIFICATE: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113635.100.6.1.4");

/// OID for the Apple iPhone Software Development Signing marker extension: 1.2.840.113635.100.6.1.2
pub const APPLE_DEVELOPMENT_CERTIFICATE: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113635.100.6.1.2");

/// OID for the Apple Mac Application Software Development Signing marker extension: 1.2.840.113635.100.6.1.12
pub const MAC_APPLICATION_SOFTWARE_DEVELOPMENT_SIGNING: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113635.100.6.1.12");

/// OID for the Apple Mac Application Software Submission Signing marker extension: 1.2.840.113635.100.6.1.7
pub const MAC_APPLICATION_SOFTWARE_SUBMISSION_SIGNING: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113635.100.6.1.7");
