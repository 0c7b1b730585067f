//! Subject public key information

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use const_oid::ObjectIdentifier;
use der::{asn1::Uint, Decode};
use num_bigint::BigUint;
use spki::SubjectPublicKeyInfoOwned;

use crate::{
    asn1::public_key_params::*,
    util::{error::*, oid_tables::*},
};

/// Classification of a subject public key algorithm
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PublicKeyAlgorithm {
    /// rsaEncryption
    Rsa,
    /// id-dsa
    Dsa,
    /// Any other algorithm
    Unknown,
}

/// `PublicKeyInfo` describes a subject public key. The key map contains `mod` and `exp` for RSA
/// keys and `pub`, `p`, `q` and `g` for DSA keys (domain parameters are absent when inherited
/// from the issuer). Keys for other algorithms are preserved only by algorithm OID.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicKeyInfo {
    /// Algorithm OID
    pub alg: ObjectIdentifier,
    /// Algorithm classification
    pub alg_type: PublicKeyAlgorithm,
    /// Key material by parameter name
    pub key: BTreeMap<String, BigUint>,
}

impl PublicKeyInfo {
    /// `alg_name` returns "RSA" or "DSA" for recognized algorithms and the dotted OID otherwise.
    pub fn alg_name(&self) -> String {
        match self.alg_type {
            PublicKeyAlgorithm::Rsa => "RSA".to_string(),
            PublicKeyAlgorithm::Dsa => "DSA".to_string(),
            PublicKeyAlgorithm::Unknown => self.alg.to_string(),
        }
    }
}

fn to_biguint(u: &Uint) -> BigUint {
    BigUint::from_bytes_be(u.as_bytes())
}

impl TryFrom<&SubjectPublicKeyInfoOwned> for PublicKeyInfo {
    type Error = Error;

    fn try_from(spki: &SubjectPublicKeyInfoOwned) -> Result<Self> {
        let alg = spki.algorithm.oid;
        let mut key = BTreeMap::new();
        let alg_type = if alg == PKIXALG_RSA_ENCRYPTION {
            let rsa = RsaPublicKeySyntax::from_der(spki.subject_public_key.raw_bytes())?;
            key.insert("mod".to_string(), to_biguint(&rsa.modulus));
            key.insert("exp".to_string(), to_biguint(&rsa.public_exponent));
            PublicKeyAlgorithm::Rsa
        } else if alg == PKIXALG_DSA {
            let y = DsaPublicKey::from_der(spki.subject_public_key.raw_bytes())?;
            key.insert("pub".to_string(), to_biguint(&y));
            if let Some(params) = &spki.algorithm.parameters {
                let dss: DssParms = params.decode_as()?;
                key.insert("p".to_string(), to_biguint(&dss.p));
                key.insert("q".to_string(), to_biguint(&dss.q));
                key.insert("g".to_string(), to_biguint(&dss.g));
            }
            PublicKeyAlgorithm::Dsa
        } else {
            PublicKeyAlgorithm::Unknown
        };
        Ok(PublicKeyInfo { alg, alg_type, key })
    }
}
