// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! Where a control group sits relative to its controlee.
//!
//! A group's items are laid out once, in the group's local coordinates,
//! along the +x axis starting at the local origin. The `LayoutSpec` then
//! positions the whole group with one affine transform: local +x runs
//! against the orthogonal `vector` (towards the controlee's interior) and
//! the local origin lands on the `benchmark`. Reorienting a group only
//! changes the transform, never the layout.

use crate::drawable::Drawable;
use crate::geometry::{self, turn_left};
use crate::settings::control::ITEM_SPACING;
use kurbo::{Affine, Point, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSpec {
    /// Point on the controlee edge where the group was opened
    pub hotspot: Point,
    /// Where item 0 is placed
    pub benchmark: Point,
    /// Unit vector orthogonal to the controlee at the hotspot
    pub vector: Vec2,
    /// Index of the item shown when the group opens
    pub opening_item: usize,
}

/// Benchmark placing item `opening_item` exactly on the hotspot
pub fn benchmark_from_hotspot(vector: Vec2, hotspot: Point, opening_item: usize) -> Point {
    hotspot + vector * (ITEM_SPACING * opening_item as f64)
}

impl LayoutSpec {
    pub fn new(hotspot: Point, vector: Vec2, opening_item: usize) -> Self {
        Self {
            hotspot,
            benchmark: benchmark_from_hotspot(vector, hotspot, opening_item),
            vector,
            opening_item,
        }
    }

    /// Local-to-user transform of a group laid out along +x
    pub fn transform(&self) -> Affine {
        let angle = (-self.vector.y).atan2(-self.vector.x);
        Affine::translate(self.benchmark.to_vec2()) * Affine::rotate(angle)
    }

    /// Shift hotspot and benchmark together, keeping the orientation
    pub fn translate(&mut self, offset: Vec2) {
        self.hotspot += offset;
        self.benchmark += offset;
    }

    /// Move the hotspot sideways along the controlee's boundary.
    ///
    /// Positive `pixels_off_axis` turns left of the vector, negative right.
    /// The moved hotspot snaps back onto the controlee so that the group
    /// follows curved outlines, then vector and benchmark are re-derived.
    pub fn slide_follow(&mut self, controlee: &dyn Drawable, pixels_off_axis: f64) {
        let tangent = turn_left(self.vector);
        let moved = self.hotspot + tangent * pixels_off_axis;
        let hotspot = geometry::nearest_point(&controlee.path(), moved).unwrap_or(moved);
        let vector = controlee.orthogonal(hotspot);
        tracing::debug!(
            "slide hotspot ({}, {}) -> ({}, {})",
            self.hotspot.x,
            self.hotspot.y,
            hotspot.x,
            hotspot.y
        );
        *self = Self::new(hotspot, vector, self.opening_item);
    }
}
