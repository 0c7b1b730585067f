//! Typed models of certificates, extensions, signer infos and time stamp tokens

pub mod certificate;
pub mod extension_registry;
pub mod extensions;
pub mod name;
pub mod public_key_info;
pub mod signer_info;
pub mod time_stamp_token;
pub mod validity;

pub use crate::model::{
    certificate::*, extension_registry::*, extensions::*, name::*, public_key_info::*,
    signer_info::*, time_stamp_token::*, validity::*,
};
