// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! Error types for drawables, controls and ports.
//!
//! Errors split into two families. Hard failures (inconsistent control
//! state, structural misuse) propagate to the caller. User-actionable
//! failures convert to an [`Alert`] at the operation boundary via
//! `to_alert`, leaving application state unchanged.

use crate::alert::Alert;
use crate::model::NodeId;
use std::path::PathBuf;
use thiserror::Error;

/// Misuse of a drawable's structure
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DrawableError {
    #[error("can not delete dimensions")]
    DimensionsRequired,
}

/// Failures of control groups and their items
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControlError {
    #[error("can't scroll up past document")]
    AtDocumentRoot,

    #[error("can't scroll down past primitive morph")]
    PrimitiveControlee,

    /// An open handle menu always has a morph under its hotspot.
    #[error("no morph found for handle menu at its hotspot")]
    NoMorphAtHotspot,

    #[error("control group has no controlee")]
    NoControlee,

    #[error("controlee {0} is no longer in the document")]
    ControleeGone(NodeId),

    #[error("control group is not open")]
    NotOpen,

    #[error("control group has no item {0}")]
    NoSuchItem(usize),
}

impl ControlError {
    /// The alert to show for user-actionable errors, `None` for hard
    /// failures.
    pub fn to_alert(&self) -> Option<Alert> {
        match self {
            ControlError::AtDocumentRoot | ControlError::PrimitiveControlee => {
                Some(Alert::notice(self.to_string()))
            }
            ControlError::ControleeGone(_) => Some(Alert::warning(self.to_string())),
            _ => None,
        }
    }
}

/// Failures reaching the model a port draws
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PortError {
    #[error("port has no model")]
    NoModel,

    #[error("model lock poisoned")]
    Poisoned,
}

/// Failures exporting a document to a file
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported file extension: {0}")]
    UnsupportedExtension(String),

    #[error("out of memory creating a {width}x{height} surface")]
    OutOfMemory { width: u32, height: u32 },

    #[error("IO error writing {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Port(#[from] PortError),
}

impl ExportError {
    pub fn to_alert(&self) -> Alert {
        match self {
            ExportError::UnsupportedExtension(_) => Alert::warning(self.to_string()),
            ExportError::OutOfMemory { .. } => {
                Alert::critical("Out of memory.  You should save and restart now.")
            }
            ExportError::Io { .. } | ExportError::Encode { .. } => {
                Alert::critical(format!("IO error. {self}"))
            }
            ExportError::Port(_) => Alert::critical(self.to_string()),
        }
    }
}
