// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! The printer port: paginates the model onto a print operation.

use super::Port;
use crate::context::DrawContext;
use crate::error::PortError;
use crate::model::SharedDocument;

/// Printer choices the user made in the print dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintSettings {
    pub printer: Option<String>,
    pub copies: u32,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            printer: None,
            copies: 1,
        }
    }
}

/// How a print operation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintResult {
    /// Printed; the settings used should be kept
    Apply,
    Cancel,
    Error,
}

/// Draws page `page` into the context the print operation provides
pub type DrawPage<'a> = dyn FnMut(u32, &mut dyn DrawContext) -> Result<(), PortError> + 'a;

/// A print job driven by the host toolkit's print dialog
pub trait PrintOperation {
    fn set_print_settings(&mut self, settings: &PrintSettings);

    fn set_n_pages(&mut self, pages: u32);

    fn n_pages(&self) -> u32;

    /// Show the print dialog. If the user goes ahead, call `draw_page`
    /// once per page, then print.
    fn run(&mut self, draw_page: &mut DrawPage<'_>) -> PrintResult;

    fn print_settings(&self) -> PrintSettings;
}

#[derive(Debug, Default)]
pub struct PrinterPort {
    model: Option<SharedDocument>,
    settings: Option<PrintSettings>,
}

impl PrinterPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings kept from the last applied print
    pub fn settings(&self) -> Option<&PrintSettings> {
        self.settings.as_ref()
    }

    /// The whole model prints on one page.
    // TODO: split the model's bounds into page-sized tiles
    pub fn begin_print(&self, operation: &mut dyn PrintOperation) {
        operation.set_n_pages(1);
    }

    pub fn draw_page(&self, page: u32, context: &mut dyn DrawContext) -> Result<(), PortError> {
        tracing::debug!("draw page {page}");
        self.draw_model(context)
    }

    /// Print through `operation`, retaining its settings if the user
    /// applied them.
    ///
    /// Pages are drawn only once the dialog is accepted.
    pub fn do_print(&mut self, operation: &mut dyn PrintOperation) -> Result<PrintResult, PortError> {
        self.model().ok_or(PortError::NoModel)?;
        if let Some(settings) = &self.settings {
            operation.set_print_settings(settings);
        }
        self.begin_print(operation);

        let mut failure = None;
        let result = operation.run(&mut |page, context| {
            self.draw_page(page, context).inspect_err(|err| {
                failure.get_or_insert(*err);
            })
        });
        if let Some(err) = failure {
            return Err(err);
        }
        tracing::debug!("print finished: {:?}", result);
        if result == PrintResult::Apply {
            self.settings = Some(operation.print_settings());
        }
        Ok(result)
    }
}

impl Port for PrinterPort {
    fn model(&self) -> Option<&SharedDocument> {
        self.model.as_ref()
    }

    fn set_model(&mut self, model: SharedDocument) {
        self.model = Some(model);
    }
}
