// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! Ports: destinations the document is drawn on.
//!
//! Every port draws the same shared model. They differ in how they treat
//! an unbounded document and in what they draw besides it: a view pans
//! and zooms a window over the model and also draws controls, a printer
//! paginates, a file port saves the whole model at a fixed canvas size.

pub mod file;
pub mod printer;
pub mod view;

pub use file::{ExportFormat, ExportSettings, FilePort};
pub use printer::{PrintOperation, PrintResult, PrintSettings, PrinterPort};
pub use view::{HostSurface, OffscreenSurface, ViewControl, ViewPort, ViewTransform};

use crate::context::DrawContext;
use crate::error::PortError;
use crate::model::SharedDocument;

pub trait Port {
    fn model(&self) -> Option<&SharedDocument>;

    fn set_model(&mut self, model: SharedDocument);

    /// Draw the whole model into `context`
    fn draw_model(&self, context: &mut dyn DrawContext) -> Result<(), PortError> {
        let model = self.model().ok_or(PortError::NoModel)?;
        let document = model.read().map_err(|_| PortError::Poisoned)?;
        document.draw(context);
        Ok(())
    }
}
