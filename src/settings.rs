// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! Application settings and configuration constants.
//!
//! This module holds non-visual settings that stay stable across theme
//! changes. Visual styling (colors, line widths) belongs in `theme.rs`.
//! Values that users may override at startup live in `config.rs` and
//! default to the constants here.

// ============================================================================
// VIEW SETTINGS
// ============================================================================
/// Minimum zoom level (2% of original size)
const MIN_ZOOM: f64 = 0.02;

/// Maximum zoom level (50x original size)
const MAX_ZOOM: f64 = 50.0;

/// Zoom factor applied by one scroll step on a view handle
const ZOOM_STEP: f64 = 1.25;

// ============================================================================
// CONTROL SETTINGS
// ============================================================================
/// Side length of a control item (handle or menu item), in user units
const ITEM_SIZE: f64 = 40.0;

// ============================================================================
// DRAWING CONTEXT SETTINGS
// ============================================================================
/// Line width of a fresh drawing context, before any style is applied
const CONTEXT_LINE_WIDTH: f64 = 2.0;

/// Accuracy passed to kurbo nearest-point queries
const NEAREST_ACCURACY: f64 = 1e-6;

/// Tolerance used when flattening shapes into paths
const PATH_TOLERANCE: f64 = 0.1;

// ============================================================================
// EXPORT SETTINGS
// ============================================================================
/// Default canvas width of exported files, in pixels
const EXPORT_WIDTH: u32 = 200;

/// Default canvas height of exported files, in pixels
const EXPORT_HEIGHT: u32 = 200;

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// View settings (zoom)
pub mod view {
    /// Minimum zoom level (2% of original size)
    pub const MIN_ZOOM: f64 = super::MIN_ZOOM;

    /// Maximum zoom level (50x original size)
    pub const MAX_ZOOM: f64 = super::MAX_ZOOM;

    /// Zoom factor of one scroll step
    pub const ZOOM_STEP: f64 = super::ZOOM_STEP;
}

/// Control item sizes
pub mod control {
    /// Side length of a control item
    pub const ITEM_SIZE: f64 = super::ITEM_SIZE;

    /// Distance between consecutive items of a laid out group.
    ///
    /// Items overlap by half their size.
    pub const ITEM_SPACING: f64 = super::ITEM_SIZE / 2.0;
}

/// Drawing context defaults
pub mod context {
    /// Line width of a fresh context
    pub const LINE_WIDTH: f64 = super::CONTEXT_LINE_WIDTH;

    /// Accuracy of nearest-point queries
    pub const NEAREST_ACCURACY: f64 = super::NEAREST_ACCURACY;

    /// Shape flattening tolerance
    pub const PATH_TOLERANCE: f64 = super::PATH_TOLERANCE;
}

/// File export defaults
pub mod export {
    /// Canvas width in pixels
    pub const WIDTH: u32 = super::EXPORT_WIDTH;

    /// Canvas height in pixels
    pub const HEIGHT: u32 = super::EXPORT_HEIGHT;
}
