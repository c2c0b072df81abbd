// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! Visual attributes applied to a context before a drawable emits its
//! path.

use crate::context::DrawContext;
use crate::theme;
use peniko::Color;

/// Color, line width and highlight state of one drawable
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub color: Color,
    pub highlight_color: Color,
    pub line_width: f64,
    highlighted: bool,
}

impl Style {
    pub fn new(color: Color, highlight_color: Color, line_width: f64) -> Self {
        Self {
            color,
            highlight_color,
            line_width,
            highlighted: false,
        }
    }

    /// Style of document glyphs
    pub fn glyph() -> Self {
        Self::new(
            theme::glyph::STROKE,
            theme::glyph::HIGHLIGHT,
            theme::size::GLYPH_LINE_WIDTH,
        )
    }

    /// Style of handle menu items
    pub fn handle() -> Self {
        Self::new(
            theme::control::HANDLE_STROKE,
            theme::control::HANDLE_HIGHLIGHT,
            theme::size::CONTROL_LINE_WIDTH,
        )
    }

    /// Style of popup menu items
    pub fn menu() -> Self {
        Self::new(
            theme::control::MENU_STROKE,
            theme::control::MENU_HIGHLIGHT,
            theme::size::CONTROL_LINE_WIDTH,
        )
    }

    /// Switch to (`true`) or away from (`false`) the highlight variant
    pub fn highlight(&mut self, on: bool) {
        self.highlighted = on;
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Color currently in effect
    pub fn current_color(&self) -> Color {
        if self.highlighted {
            self.highlight_color
        } else {
            self.color
        }
    }

    /// Make this style the context's current source and line width
    pub fn put_to(&self, context: &mut dyn DrawContext) {
        context.set_source_color(self.current_color());
        context.set_line_width(self.line_width);
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::glyph()
    }
}
