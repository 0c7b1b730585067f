//! Sources of ASN.1 encoders and decoders not included in a RustCrypto formats repo

pub mod enhanced_security;
pub mod netscape;
pub mod public_key_params;
pub mod qc_statements;
pub mod time_stamp_protocol;

pub use crate::asn1::enhanced_security::*;
pub use crate::asn1::netscape::*;
pub use crate::asn1::public_key_params::*;
pub use crate::asn1::qc_statements::*;
pub use crate::asn1::time_stamp_protocol::*;
