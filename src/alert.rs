// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! User-facing messages.
//!
//! Operations that fail for reasons the user can act on (scrolling past
//! the document, exporting to an unknown format) do not propagate their
//! error into the drawable tree. The operation boundary turns the error
//! into an `Alert` and hands it to an `AlertSink`; the host toolkit shows
//! it as a dismissable dialog.

use std::fmt;

/// How serious an alert is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational notice (e.g. an operation was not possible here)
    Notice,
    /// The operation was refused
    Warning,
    /// The operation failed and the user should act (save, restart)
    Critical,
}

/// A dismissable message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
}

impl Alert {
    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Notice,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn critical(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Critical,
            message: message.into(),
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.severity, self.message)
    }
}

/// Destination for alerts (a dialog in the host toolkit)
pub trait AlertSink {
    fn alert(&mut self, alert: Alert);
}

/// Collecting alerts is enough for headless use and tests.
impl AlertSink for Vec<Alert> {
    fn alert(&mut self, alert: Alert) {
        match alert.severity {
            Severity::Notice => tracing::info!("{}", alert.message),
            Severity::Warning => tracing::warn!("{}", alert.message),
            Severity::Critical => tracing::error!("{}", alert.message),
        }
        self.push(alert);
    }
}
