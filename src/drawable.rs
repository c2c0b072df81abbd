// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! Things that can be drawn: document glyphs and controls.
//!
//! Every geometric query is built on one required operation,
//! [`Drawable::put_path_to`]: bounds are the path's extents, inked bounds
//! are its stroke extents, hit-testing asks the context whether a point
//! lies in the stroke, and drawing strokes or fills the same path. The
//! trait's required methods are the parts each concrete drawable must
//! supply; everything else is provided in terms of them.
//!
//! All coordinates here are ideal (model) coordinates, not device ones.
//! Queries use a fresh identity-transform context, so nothing is cached
//! between calls.

use crate::context::{DrawContext, SceneContext};
use crate::error::DrawableError;
use crate::geometry::Dimensions;
use crate::style::Style;
use kurbo::{BezPath, Point, Vec2};

// ============================================================================
// DAMAGE
// ============================================================================

/// Receiver of invalidated regions.
///
/// Invalidating only schedules a repaint; the host coalesces the regions
/// into a later redraw.
pub trait Damage {
    /// Mark `rect` (model coordinates) as needing a redraw
    fn invalidate_rect(&mut self, rect: Dimensions);
}

/// Collecting regions is enough where no display is attached.
impl Damage for Vec<Dimensions> {
    fn invalidate_rect(&mut self, rect: Dimensions) {
        self.push(rect);
    }
}

// ============================================================================
// DRAWABLE CORE
// ============================================================================

/// State every drawable owns: its dimensions, style and fill mode
#[derive(Debug, Clone, PartialEq)]
pub struct DrawableCore {
    dimensions: Dimensions,
    pub style: Style,
    pub filled: bool,
}

impl DrawableCore {
    pub fn new(dimensions: Dimensions, style: Style) -> Self {
        Self {
            dimensions,
            style,
            filled: false,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn set_dimensions(&mut self, dimensions: Dimensions) {
        self.dimensions = dimensions;
    }
}

impl Default for DrawableCore {
    fn default() -> Self {
        Self::new(Dimensions::default(), Style::default())
    }
}

// ============================================================================
// DRAWABLE TRAIT
// ============================================================================

/// A glyph or control with ideal geometry that can be drawn, hit-tested
/// and invalidated
pub trait Drawable {
    fn core(&self) -> &DrawableCore;

    fn core_mut(&mut self) -> &mut DrawableCore;

    /// Schedule a redraw of the region this drawable occupies
    fn invalidate(&self, damage: &mut dyn Damage);

    /// Is `point` in the hot area of this drawable?
    fn is_in_control_area(&self, point: Point) -> bool;

    /// Emit this drawable's outline into `context`
    fn put_path_to(&self, context: &mut dyn DrawContext);

    /// Outward unit vector orthogonal to the boundary at `point`
    fn orthogonal(&self, point: Point) -> Vec2;

    // ===== Dimensions =====

    /// The dimensions, as an independent copy
    fn dimensions(&self) -> Dimensions {
        self.core().dimensions()
    }

    fn set_dimensions(&mut self, dimensions: Dimensions) {
        self.core_mut().set_dimensions(dimensions);
    }

    /// Dimensions always exist once constructed; deleting them is refused.
    fn del_dimensions(&mut self) -> Result<(), DrawableError> {
        Err(DrawableError::DimensionsRequired)
    }

    fn origin(&self) -> Point {
        self.dimensions().origin()
    }

    /// Move without changing shape or size. No redraw.
    fn set_origin(&mut self, origin: Point) {
        let mut dimensions = self.dimensions();
        dimensions.x = origin.x;
        dimensions.y = origin.y;
        self.set_dimensions(dimensions);
    }

    // ===== Geometry queries =====

    /// The emitted outline, in model coordinates
    fn path(&self) -> BezPath {
        let mut context = SceneContext::new();
        self.put_path_to(&mut context);
        context.take_path()
    }

    /// Is `point` on the stroked outline?
    fn is_inpath(&self, point: Point) -> bool {
        let mut context = SceneContext::new();
        self.put_path_to(&mut context);
        context.in_stroke(point)
    }

    /// Is `point` inside the bounding box?
    fn is_inbounds(&self, point: Point) -> bool {
        self.bounds().intersects(Dimensions::at_point(point))
    }

    /// Ideal bounding box: path extents, excluding line width
    fn bounds(&self) -> Dimensions {
        let mut context = SceneContext::new();
        self.put_path_to(&mut context);
        Dimensions::from_extents(context.path_extents())
    }

    /// Inked bounding box: stroke extents, including line width
    fn inked_bounds(&self) -> Dimensions {
        let mut context = SceneContext::new();
        self.core().style.put_to(&mut context);
        self.put_path_to(&mut context);
        Dimensions::from_extents(context.stroke_extents())
    }

    /// Center of the bounding box.
    ///
    /// Composites are laid out asymmetrically, so this is not the center
    /// of the stored dimensions.
    fn center(&self) -> Point {
        self.bounds().center()
    }

    // ===== Movement =====

    /// Translate so the bounding box is centered at `point`. No redraw.
    fn center_at(&mut self, point: Point) {
        let offset = point - self.bounds().center();
        let dimensions = self.dimensions().translated(offset);
        self.set_dimensions(dimensions);
    }

    /// Center at `point`, invalidating the old and the new region
    fn move_absolute(&mut self, point: Point, damage: &mut dyn Damage) {
        tracing::debug!("move_absolute to ({}, {})", point.x, point.y);
        self.invalidate(damage);
        self.center_at(point);
        self.invalidate(damage);
    }

    /// Translate by `offset`, invalidating the old and the new region
    fn move_relative(&mut self, offset: Vec2, damage: &mut dyn Damage) {
        tracing::debug!("move_relative by ({}, {})", offset.x, offset.y);
        self.invalidate(damage);
        let dimensions = self.dimensions().translated(offset);
        self.set_dimensions(dimensions);
        self.invalidate(damage);
    }

    // ===== Drawing =====

    /// Apply style, emit path, then fill or stroke.
    ///
    /// Filling and stroking consume the path, so the context holds no
    /// path afterwards.
    fn draw(&self, context: &mut dyn DrawContext) {
        self.core().style.put_to(context);
        self.put_path_to(context);
        if self.core().filled {
            context.fill();
        } else {
            context.stroke();
        }
    }

    /// Draw in (or stop drawing in) the highlight style.
    ///
    /// Highlighting is display focus only and never touches the document.
    fn highlight(&mut self, on: bool, damage: &mut dyn Damage) {
        self.core_mut().style.highlight(on);
        self.invalidate(damage);
    }
}
