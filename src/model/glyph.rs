// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! Primitive glyphs: rectangles, ellipses and lines.

use super::NodeId;
use crate::context::DrawContext;
use crate::drawable::{Damage, Drawable, DrawableCore};
use crate::geometry::{self, Dimensions};
use crate::settings;
use crate::style::Style;
use kurbo::{BezPath, Ellipse, Point, Shape, Vec2};

/// Outline of a primitive glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphShape {
    /// Rectangle filling the dimensions
    Rect,
    /// Ellipse inscribed in the dimensions
    Ellipse,
    /// Line from the origin to the opposite corner of the dimensions
    Line,
}

/// A primitive (childless) drawable
#[derive(Debug, Clone)]
pub struct Glyph {
    id: NodeId,
    shape: GlyphShape,
    core: DrawableCore,
}

impl Glyph {
    pub fn new(shape: GlyphShape, dimensions: Dimensions) -> Self {
        Self {
            id: NodeId::next(),
            shape,
            core: DrawableCore::new(dimensions, Style::glyph()),
        }
    }

    pub fn rect(dimensions: Dimensions) -> Self {
        Self::new(GlyphShape::Rect, dimensions)
    }

    pub fn ellipse(dimensions: Dimensions) -> Self {
        Self::new(GlyphShape::Ellipse, dimensions)
    }

    pub fn line(from: Point, to: Point) -> Self {
        let delta = to - from;
        Self::new(
            GlyphShape::Line,
            Dimensions::new(from.x, from.y, delta.x, delta.y),
        )
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.core.style = style;
        self
    }

    pub fn filled(mut self, filled: bool) -> Self {
        self.core.filled = filled;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn shape(&self) -> GlyphShape {
        self.shape
    }

    fn shape_path(&self) -> BezPath {
        let dimensions = self.core.dimensions();
        let tolerance = settings::context::PATH_TOLERANCE;
        match self.shape {
            GlyphShape::Rect => dimensions.normalized().to_rect().to_path(tolerance),
            GlyphShape::Ellipse => {
                Ellipse::from_rect(dimensions.normalized().to_rect()).to_path(tolerance)
            }
            GlyphShape::Line => {
                let mut path = BezPath::new();
                path.move_to(dimensions.origin());
                path.line_to((
                    dimensions.x + dimensions.width,
                    dimensions.y + dimensions.height,
                ));
                path
            }
        }
    }
}

impl Drawable for Glyph {
    fn core(&self) -> &DrawableCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DrawableCore {
        &mut self.core
    }

    fn invalidate(&self, damage: &mut dyn Damage) {
        damage.invalidate_rect(self.inked_bounds());
    }

    fn is_in_control_area(&self, point: Point) -> bool {
        self.is_inpath(point)
    }

    fn put_path_to(&self, context: &mut dyn DrawContext) {
        context.append_path(&self.shape_path());
    }

    fn orthogonal(&self, point: Point) -> Vec2 {
        geometry::path_normal(&self.shape_path(), point)
    }
}
