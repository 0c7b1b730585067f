//! Certificate-level validity evaluation: time validity, revocation lookup and aggregate results

pub mod revocation;
pub mod settings;
pub mod verification_results;

pub use crate::evaluation::{revocation::*, settings::*, verification_results::*};
