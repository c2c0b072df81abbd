// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! Theme colors and constants
//!
//! All colors use hexadecimal format: Color::from_rgb8(0xRR, 0xGG, 0xBB)

use peniko::Color;

// ============================================================================
// BASE COLORS -- Generic colors, a dark to light gradient
// ============================================================================
const BASE_A: Color = Color::from_rgb8(0x10, 0x10, 0x10);
const BASE_C: Color = Color::from_rgb8(0x30, 0x30, 0x30);

// ============================================================================
// CANVAS
// ============================================================================
const CANVAS_BACKGROUND: Color = Color::from_rgb8(0xff, 0xff, 0xff);
const VIEW_FOREGROUND: Color = BASE_A;

// ============================================================================
// GLYPHS (document morphs)
// ============================================================================
const GLYPH_STROKE: Color = BASE_C;
const GLYPH_HIGHLIGHT: Color = Color::from_rgb8(0xff, 0xaa, 0x33);

// ============================================================================
// CONTROLS (handle menus, popup menus)
// ============================================================================
const HANDLE_STROKE: Color = Color::from_rgb8(0x44, 0x28, 0xec);
const HANDLE_HIGHLIGHT: Color = Color::from_rgb8(0x57, 0x9a, 0xff);
const MENU_STROKE: Color = Color::from_rgb8(0x20, 0x8e, 0x56);
const MENU_HIGHLIGHT: Color = Color::from_rgb8(0x6a, 0xe7, 0x56);

// ============================================================================
// SIZES
// ============================================================================
const GLYPH_LINE_WIDTH: f64 = 2.0;
const CONTROL_LINE_WIDTH: f64 = 1.0;

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Canvas colors
pub mod canvas {
    use super::Color;
    pub const BACKGROUND: Color = super::CANVAS_BACKGROUND;
    /// Default color a viewport applies before drawing anything
    pub const FOREGROUND: Color = super::VIEW_FOREGROUND;
}

/// Document glyph colors
pub mod glyph {
    use super::Color;
    pub const STROKE: Color = super::GLYPH_STROKE;
    pub const HIGHLIGHT: Color = super::GLYPH_HIGHLIGHT;
}

/// Control colors
pub mod control {
    use super::Color;
    pub const HANDLE_STROKE: Color = super::HANDLE_STROKE;
    pub const HANDLE_HIGHLIGHT: Color = super::HANDLE_HIGHLIGHT;
    pub const MENU_STROKE: Color = super::MENU_STROKE;
    pub const MENU_HIGHLIGHT: Color = super::MENU_HIGHLIGHT;
}

/// Line widths
pub mod size {
    pub const GLYPH_LINE_WIDTH: f64 = super::GLYPH_LINE_WIDTH;
    pub const CONTROL_LINE_WIDTH: f64 = super::CONTROL_LINE_WIDTH;
}
