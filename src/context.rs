// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! Drawing contexts.
//!
//! `DrawContext` is the contract the core needs from a 2D drawing library:
//! build a path, stroke or fill it, hit-test a point against the stroke
//! and report path and stroke extents. Paths are given in user
//! coordinates and mapped through the context's current transform.
//!
//! `SceneContext` implements the contract with kurbo and records every
//! stroke and fill into a display list. Ports replay that list onto their
//! destination (a window, a page, an SVG or PNG file).

use crate::{settings, theme};
use kurbo::{Affine, BezPath, Point, Rect, Shape};
use peniko::Color;

/// Operations a drawable needs from a drawing destination
pub trait DrawContext {
    /// Discard the current path
    fn new_path(&mut self);

    /// Append `path` (user coordinates) to the current path
    fn append_path(&mut self, path: &BezPath);

    fn set_source_color(&mut self, color: Color);

    fn set_line_width(&mut self, width: f64);

    fn line_width(&self) -> f64;

    /// Current user-to-device transform
    fn transform(&self) -> Affine;

    fn set_transform(&mut self, transform: Affine);

    /// Outline the current path with the current line width, then clear it
    fn stroke(&mut self);

    /// Fill the current path, then clear it
    fn fill(&mut self);

    /// Would `point` (user coordinates) be inked by stroking the current
    /// path?
    fn in_stroke(&self, point: Point) -> bool;

    /// Bounding box of the current path in user coordinates, excluding
    /// line width
    fn path_extents(&self) -> Rect;

    /// Bounding box of the ink a stroke of the current path would make,
    /// in user coordinates
    fn stroke_extents(&self) -> Rect;
}

// ============================================================================
// DISPLAY LIST
// ============================================================================

/// How a recorded path is painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintKind {
    Fill,
    /// Stroke with a line width in device units
    Stroke { width: f64 },
}

/// One recorded stroke or fill, in device coordinates
#[derive(Debug, Clone)]
pub struct PaintOp {
    pub path: BezPath,
    pub kind: PaintKind,
    pub color: Color,
}

// ============================================================================
// SCENE CONTEXT
// ============================================================================

/// Recording drawing context built on kurbo
#[derive(Debug, Clone)]
pub struct SceneContext {
    /// Current path, already in device coordinates
    path: BezPath,
    transform: Affine,
    line_width: f64,
    color: Color,
    ops: Vec<PaintOp>,
}

impl SceneContext {
    pub fn new() -> Self {
        Self {
            path: BezPath::new(),
            transform: Affine::IDENTITY,
            line_width: settings::context::LINE_WIDTH,
            color: theme::canvas::FOREGROUND,
            ops: Vec::new(),
        }
    }

    /// Paint operations recorded so far, in painting order
    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<PaintOp> {
        self.ops
    }

    /// True if no path is pending
    pub fn path_is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }

    /// Take the current path, mapped back to user coordinates
    pub fn take_path(&mut self) -> BezPath {
        let path = std::mem::take(&mut self.path);
        self.transform.inverse() * path
    }

    /// Scale factor of the current transform, for line widths
    fn device_scale(&self) -> f64 {
        self.transform.determinant().abs().sqrt()
    }

    fn device_line_width(&self) -> f64 {
        self.line_width * self.device_scale()
    }

    fn to_user_rect(&self, device: Rect) -> Rect {
        self.transform.inverse().transform_rect_bbox(device)
    }
}

impl Default for SceneContext {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawContext for SceneContext {
    fn new_path(&mut self) {
        self.path = BezPath::new();
    }

    fn append_path(&mut self, path: &BezPath) {
        self.path.extend(self.transform * path);
    }

    fn set_source_color(&mut self, color: Color) {
        self.color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn line_width(&self) -> f64 {
        self.line_width
    }

    fn transform(&self) -> Affine {
        self.transform
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn stroke(&mut self) {
        let path = std::mem::take(&mut self.path);
        if path.elements().is_empty() {
            return;
        }
        self.ops.push(PaintOp {
            path,
            kind: PaintKind::Stroke {
                width: self.device_line_width(),
            },
            color: self.color,
        });
    }

    fn fill(&mut self) {
        let path = std::mem::take(&mut self.path);
        if path.elements().is_empty() {
            return;
        }
        self.ops.push(PaintOp {
            path,
            kind: PaintKind::Fill,
            color: self.color,
        });
    }

    fn in_stroke(&self, point: Point) -> bool {
        let device = self.transform * point;
        let half_width = self.device_line_width() / 2.0;
        crate::geometry::nearest_segment(&self.path, device)
            .is_some_and(|(_, _, distance_sq)| distance_sq <= half_width * half_width)
    }

    fn path_extents(&self) -> Rect {
        if self.path_is_empty() {
            return Rect::ZERO;
        }
        self.to_user_rect(self.path.bounding_box())
    }

    fn stroke_extents(&self) -> Rect {
        if self.path_is_empty() {
            return Rect::ZERO;
        }
        let half_width = self.device_line_width() / 2.0;
        self.to_user_rect(self.path.bounding_box().inflate(half_width, half_width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> BezPath {
        Rect::new(10.0, 10.0, 30.0, 30.0).to_path(0.1)
    }

    #[test]
    fn stroke_records_op_and_clears_path() {
        let mut context = SceneContext::new();
        context.append_path(&square());
        context.stroke();

        assert!(context.path_is_empty());
        assert_eq!(context.ops().len(), 1);
        assert_eq!(
            context.ops()[0].kind,
            PaintKind::Stroke {
                width: settings::context::LINE_WIDTH
            }
        );
    }

    #[test]
    fn stroking_nothing_records_nothing() {
        let mut context = SceneContext::new();
        context.stroke();
        context.fill();
        assert!(context.ops().is_empty());
    }

    #[test]
    fn stroke_extents_include_line_width() {
        let mut context = SceneContext::new();
        context.set_line_width(4.0);
        context.append_path(&square());

        assert_eq!(context.path_extents(), Rect::new(10.0, 10.0, 30.0, 30.0));
        assert_eq!(context.stroke_extents(), Rect::new(8.0, 8.0, 32.0, 32.0));
    }

    #[test]
    fn in_stroke_hits_the_outline_only() {
        let mut context = SceneContext::new();
        context.append_path(&square());

        assert!(context.in_stroke(Point::new(10.0, 20.0)));
        assert!(context.in_stroke(Point::new(30.5, 20.0)));
        assert!(!context.in_stroke(Point::new(20.0, 20.0)));
        assert!(!context.in_stroke(Point::new(40.0, 20.0)));
    }

    #[test]
    fn transform_maps_paths_to_device_and_extents_back() {
        let mut context = SceneContext::new();
        context.set_transform(Affine::translate((100.0, 0.0)) * Affine::scale(2.0));
        context.append_path(&square());

        // Extents are reported in user coordinates.
        let extents = context.path_extents();
        assert!((extents.x0 - 10.0).abs() < 1e-9);
        assert!((extents.x1 - 30.0).abs() < 1e-9);

        context.stroke();
        let op = &context.ops()[0];
        assert_eq!(op.path.bounding_box(), Rect::new(120.0, 20.0, 160.0, 60.0));
        assert_eq!(
            op.kind,
            PaintKind::Stroke {
                width: 2.0 * settings::context::LINE_WIDTH
            }
        );
    }

    #[test]
    fn take_path_returns_user_coordinates() {
        let mut context = SceneContext::new();
        context.set_transform(Affine::translate((5.0, 5.0)));
        context.append_path(&square());

        let path = context.take_path();
        assert!(context.path_is_empty());
        let bbox = path.bounding_box();
        assert!((bbox.x0 - 10.0).abs() < 1e-9);
        assert!((bbox.y1 - 30.0).abs() < 1e-9);
    }
}
