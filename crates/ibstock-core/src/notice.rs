//! # Notices
//!
//! Transient, non-blocking messages for the cashier (toasts).
//!
//! The core never displays anything. Every intent returns the notices it
//! produced and the front end decides how to render them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::PosError;

/// How a notice should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum NoticeSeverity {
    Success,
    Info,
    Error,
}

/// A human-readable message with a severity tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            severity: NoticeSeverity::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            severity: NoticeSeverity::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            severity: NoticeSeverity::Error,
            message: message.into(),
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity == NoticeSeverity::Error
    }
}

impl From<&PosError> for Notice {
    fn from(err: &PosError) -> Self {
        Notice::error(err.to_string())
    }
}
