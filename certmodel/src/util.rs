//! Basic utility functionality supporting construction of the certificate model

pub mod date_utils;
pub mod error;
pub mod general_names;
pub mod logging;
pub mod oid_tables;

pub use crate::{
    util::date_utils::*, util::error::*, util::general_names::*, util::logging::*,
    util::oid_tables::*,
};
