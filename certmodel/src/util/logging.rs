//! Logging support

use alloc::format;

use log::{debug, error, info, warn};

/// Enum that describes level associated with a log message
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum CmLogLevels {
    /// Common error logging level
    CmError,
    /// Common info logging level
    CmInfo,
    /// Common warn logging level
    CmWarn,
    /// Common debug logging level
    CmDebug,
}

/// `log_message` emits a message via the log facade at the indicated level. No logger is
/// initialized by this crate.
pub fn log_message(level: &CmLogLevels, message: &str) {
    if &CmLogLevels::CmError == level {
        error!("{}", message);
    } else if &CmLogLevels::CmWarn == level {
        warn!("{}", message);
    } else if &CmLogLevels::CmInfo == level {
        info!("{}", message);
    } else {
        debug!("{}", message);
    }
}

/// `log_message_for_subject` appends the subject name of the certificate being processed to the
/// message, when one is known.
pub fn log_message_for_subject(level: &CmLogLevels, subject: Option<&str>, message: &str) {
    match subject {
        Some(subject) => log_message(level, format!("{} (subject: {})", message, subject).as_str()),
        None => log_message(level, message),
    }
}
