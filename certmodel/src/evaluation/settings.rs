//! Settings that govern model construction and validity evaluation

#[cfg(feature = "std")]
use alloc::string::String;
#[cfg(feature = "std")]
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::util::error::*;

/// `ModelSettings` is serialized to and from JSON using serde.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Copied onto each [`X509Certificate`](crate::X509Certificate) built with these settings.
    /// When false, revocation status is not looked up and `CERT_NOT_REVOKED` is left unset.
    pub check_crl: bool,
    /// When true, an unset `CERT_NOT_REVOKED` result does not cause validity evaluation to fail.
    pub ignore_missing_crl_check: bool,
    /// When true, time stamp generation times are adjusted by the local timezone offset.
    pub apply_local_timezone_to_gen_time: bool,
}

impl Default for ModelSettings {
    fn default() -> Self {
        ModelSettings {
            check_crl: true,
            ignore_missing_crl_check: false,
            apply_local_timezone_to_gen_time: true,
        }
    }
}

impl ModelSettings {
    /// Creates settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// `to_json` serializes the settings as JSON.
    pub fn to_json(&self) -> Result<alloc::vec::Vec<u8>> {
        serde_json::to_vec(self).map_err(|_| Error::ParseError)
    }
}

/// `read_settings` reads settings from the named JSON file. Default settings are returned when no
/// file name is provided.
#[cfg(feature = "std")]
pub fn read_settings(fname: &Option<String>) -> Result<ModelSettings> {
    if let Some(fname) = fname {
        let json = std::fs::read(Path::new(fname.as_str()))?;
        return match serde_json::from_slice::<ModelSettings>(&json) {
            Ok(settings) => Ok(settings),
            Err(_e) => Err(Error::ParseError),
        };
    }
    Ok(ModelSettings::new())
}

#[test]
fn model_settings_serialize_deserialize() {
    let mut settings = ModelSettings::new();
    settings.check_crl = false;
    settings.ignore_missing_crl_check = true;
    let json = settings.to_json().unwrap();
    let parsed: ModelSettings = serde_json::from_slice(&json).unwrap();
    assert_eq!(settings, parsed);

    let partial: ModelSettings = serde_json::from_str(r#"{"check_crl": false}"#).unwrap();
    assert!(!partial.check_crl);
    assert!(!partial.ignore_missing_crl_check);
    assert!(partial.apply_local_timezone_to_gen_time);
}

#[cfg(feature = "std")]
#[test]
fn read_settings_test() {
    use std::io::Write;

    assert_eq!(ModelSettings::default(), read_settings(&None).unwrap());

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"ignore_missing_crl_check": true}"#)
        .unwrap();
    let fname = Some(file.path().to_str().unwrap().to_string());
    let settings = read_settings(&fname).unwrap();
    assert!(settings.ignore_missing_crl_check);
    assert!(settings.check_crl);

    let mut bad = tempfile::NamedTempFile::new().unwrap();
    bad.write_all(b"not json").unwrap();
    let fname = Some(bad.path().to_str().unwrap().to_string());
    assert_eq!(Err(Error::ParseError), read_settings(&fname));

    let missing = Some("/nonexistent/certmodel/settings.json".to_string());
    assert_eq!(
        Err(Error::StdIoError(std::io::ErrorKind::NotFound)),
        read_settings(&missing)
    );
}
