//! Public key and domain parameter structures for RSA and DSA keys

use der::{asn1::Uint, Sequence};

/// RSA public key as defined in [RFC 8017 Appendix A.1.1].
///
/// ```text
/// RSAPublicKey ::= SEQUENCE {
///     modulus           INTEGER,  -- n
///     publicExponent    INTEGER   -- e
/// }
/// ```
///
/// [RFC 8017 Appendix A.1.1]: https://datatracker.ietf.org/doc/html/rfc8017#appendix-A.1.1
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct RsaPublicKeySyntax {
    pub modulus: Uint,
    pub public_exponent: Uint,
}

/// DSA domain parameters as defined in [RFC 3279 Section 2.3.2].
///
/// ```text
/// Dss-Parms  ::=  SEQUENCE  {
///     p             INTEGER,
///     q             INTEGER,
///     g             INTEGER  }
/// ```
///
/// [RFC 3279 Section 2.3.2]: https://datatracker.ietf.org/doc/html/rfc3279#section-2.3.2
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct DssParms {
    pub p: Uint,
    pub q: Uint,
    pub g: Uint,
}

/// DSA public key as defined in [RFC 3279 Section 2.3.2].
///
/// ```text
/// DSAPublicKey ::= INTEGER -- public key, Y
/// ```
///
/// [RFC 3279 Section 2.3.2]: https://datatracker.ietf.org/doc/html/rfc3279#section-2.3.2
pub type DsaPublicKey = Uint;
