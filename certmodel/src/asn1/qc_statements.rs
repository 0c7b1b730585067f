//! OID and types for the QCStatements extension defined in RFC 3739

use alloc::vec::Vec;

use const_oid::ObjectIdentifier;
use der::{asn1::Any, Sequence};

/// OID for the QCStatements extension: 1.3.6.1.5.5.7.1.3. See [`QcStatements`](type.QcStatements.html).
pub const ID_PE_QC_STATEMENTS: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.1.3");

/// QCStatements as defined in [RFC 3739 Section 3.2.6].
///
/// ```text
/// QCStatements ::= SEQUENCE OF QCStatement
/// ```
///
/// [RFC 3739 Section 3.2.6]: https://datatracker.ietf.org/doc/html/rfc3739#section-3.2.6
pub type QcStatements = Vec<QcStatement>;

/// QCStatement as defined in [RFC 3739 Section 3.2.6].
///
/// ```text
/// QCStatement ::= SEQUENCE {
///     statementId   QC-STATEMENT.&id({SupportedStatements}),
///     statementInfo QC-STATEMENT.&Type
///     ({SupportedStatements}{@statementId}) OPTIONAL }
/// ```
///
/// [RFC 3739 Section 3.2.6]: https://datatracker.ietf.org/doc/html/rfc3739#section-3.2.6
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct QcStatement {
    pub statement_id: ObjectIdentifier,
    #[asn1(optional = "true")]
    pub statement_info: Option<Any>,
}
