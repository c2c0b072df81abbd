// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! The document: a tree of morphs under one root composite.
//!
//! Controls and drag state hold `NodeId`s, never references, and resolve
//! them here. A `Document` is shared between the scheme and the ports via
//! `Arc<RwLock<Document>>`; the `read_document` / `write_document` helpers
//! at the bottom of this file acquire the lock with poison recovery.

use super::{CompositeGlyph, Morph, NodeId};
use crate::context::DrawContext;
use crate::drawable::{Damage, Drawable};
use crate::error::ControlError;
use kurbo::{Point, Vec2};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub type SharedDocument = Arc<RwLock<Document>>;

#[derive(Debug, Clone)]
pub struct Document {
    root: Morph,
}

impl Document {
    pub fn new() -> Self {
        Self {
            root: Morph::Composite(CompositeGlyph::new()),
        }
    }

    pub fn root(&self) -> &Morph {
        &self.root
    }

    pub fn root_id(&self) -> NodeId {
        self.root.id()
    }

    /// True if `id` is the document root
    pub fn is_top(&self, id: NodeId) -> bool {
        id == self.root_id()
    }

    pub fn get(&self, id: NodeId) -> Option<&Morph> {
        self.root.find(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Morph> {
        self.root.find_mut(id)
    }

    /// Resolve a controlee reference
    pub fn resolve(&self, id: NodeId) -> Result<&Morph, ControlError> {
        self.get(id).ok_or(ControlError::ControleeGone(id))
    }

    pub fn resolve_mut(&mut self, id: NodeId) -> Result<&mut Morph, ControlError> {
        self.get_mut(id).ok_or(ControlError::ControleeGone(id))
    }

    /// `None` for the root and for ids not in the document
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.root.parent_of(id)
    }

    pub fn is_primitive(&self, id: NodeId) -> Result<bool, ControlError> {
        self.resolve(id).map(Morph::is_primitive)
    }

    /// Add `morph` as the last child of the composite `parent`.
    ///
    /// Returns the new child's id, or `None` if `parent` is missing or
    /// primitive.
    pub fn add(&mut self, parent: NodeId, morph: impl Into<Morph>) -> Option<NodeId> {
        let morph = morph.into();
        let id = morph.id();
        match self.get_mut(parent)? {
            Morph::Composite(composite) => {
                composite.push(morph);
                Some(id)
            }
            Morph::Glyph(_) => None,
        }
    }

    /// Add a morph at the top level
    pub fn add_top(&mut self, morph: impl Into<Morph>) -> Option<NodeId> {
        self.add(self.root_id(), morph)
    }

    /// First child of `id` whose stroked outline contains `point`
    pub fn child_at(&self, id: NodeId, point: Point) -> Result<Option<NodeId>, ControlError> {
        Ok(self
            .resolve(id)?
            .children()
            .iter()
            .find(|child| child.is_inpath(point))
            .map(Morph::id))
    }

    /// Top-level morph under `point`, the morph a handle menu opens on
    pub fn morph_at(&self, point: Point) -> Option<NodeId> {
        self.root
            .children()
            .iter()
            .rev()
            .find(|child| child.deepest_at(point).is_some())
            .map(Morph::id)
    }

    /// Translate the morph `id` by `offset`
    pub fn move_relative(
        &mut self,
        id: NodeId,
        offset: Vec2,
        damage: &mut dyn Damage,
    ) -> Result<(), ControlError> {
        self.resolve_mut(id)?.move_relative(offset, damage);
        Ok(())
    }

    /// Place the origin of morph `id` at `origin`, invalidating the old
    /// and the new region
    pub fn move_origin_to(
        &mut self,
        id: NodeId,
        origin: Point,
        damage: &mut dyn Damage,
    ) -> Result<(), ControlError> {
        let morph = self.resolve_mut(id)?;
        morph.invalidate(damage);
        morph.set_origin(origin);
        morph.invalidate(damage);
        Ok(())
    }

    /// Grow morph `id` by `offset`.
    ///
    /// Each extent keeps its sign and at least one unit of magnitude; an
    /// axis with no extent (a straight line) stays flat.
    pub fn resize(
        &mut self,
        id: NodeId,
        offset: Vec2,
        damage: &mut dyn Damage,
    ) -> Result<(), ControlError> {
        let morph = self.resolve_mut(id)?;
        let mut dimensions = morph.dimensions();
        dimensions.width = resized_extent(dimensions.width, offset.x);
        dimensions.height = resized_extent(dimensions.height, offset.y);
        tracing::debug!(
            "resize {:?} to {}x{}",
            id,
            dimensions.width,
            dimensions.height
        );
        morph.invalidate(damage);
        morph.set_dimensions(dimensions);
        morph.invalidate(damage);
        Ok(())
    }

    pub fn draw(&self, context: &mut dyn DrawContext) {
        self.root.draw(context);
    }

    pub fn into_shared(self) -> SharedDocument {
        Arc::new(RwLock::new(self))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn resized_extent(extent: f64, delta: f64) -> f64 {
    if extent == 0.0 {
        return 0.0;
    }
    let direction = extent.signum();
    let grown = extent + delta;
    if grown * direction < 1.0 {
        direction
    } else {
        grown
    }
}

// ============================================================================
// SHARED ACCESS
// ============================================================================

/// Acquire a read lock on a shared document, recovering from poison.
pub fn read_document(document: &SharedDocument) -> RwLockReadGuard<'_, Document> {
    document.read().unwrap_or_else(|poisoned| {
        tracing::warn!("Document RwLock was poisoned, recovering");
        poisoned.into_inner()
    })
}

/// Acquire a write lock on a shared document, recovering from poison.
///
/// See [`read_document`].
pub fn write_document(document: &SharedDocument) -> RwLockWriteGuard<'_, Document> {
    document.write().unwrap_or_else(|poisoned| {
        tracing::warn!("Document RwLock was poisoned, recovering");
        poisoned.into_inner()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Dimensions;
    use crate::model::Glyph;

    fn document() -> (Document, NodeId, NodeId, NodeId) {
        let mut document = Document::new();
        let group = document
            .add_top(CompositeGlyph::new())
            .expect("root is a composite");
        let square = document
            .add(group, Glyph::rect(Dimensions::new(0.0, 0.0, 20.0, 20.0)))
            .expect("group is a composite");
        let circle = document
            .add(
                group,
                Glyph::ellipse(Dimensions::new(40.0, 0.0, 20.0, 20.0)),
            )
            .expect("group is a composite");
        (document, group, square, circle)
    }

    #[test]
    fn lookup_and_parents() {
        let (document, group, square, _) = document();
        assert!(document.is_top(document.root_id()));
        assert_eq!(document.parent_of(square), Some(group));
        assert_eq!(document.parent_of(group), Some(document.root_id()));
        assert_eq!(document.parent_of(document.root_id()), None);
        assert_eq!(document.is_primitive(square), Ok(true));
        assert_eq!(document.is_primitive(group), Ok(false));
    }

    #[test]
    fn adding_to_a_primitive_is_refused() {
        let (mut document, _, square, _) = document();
        assert_eq!(
            document.add(square, Glyph::rect(Dimensions::default())),
            None
        );
    }

    #[test]
    fn unknown_ids_are_gone() {
        let (document, ..) = document();
        let stranger = NodeId::next();
        assert_eq!(
            document.resolve(stranger).map(Morph::id),
            Err(ControlError::ControleeGone(stranger))
        );
    }

    #[test]
    fn child_and_morph_at_point() {
        let (document, group, square, circle) = document();
        assert_eq!(document.child_at(group, Point::new(20.0, 10.0)), Ok(Some(square)));
        assert_eq!(document.child_at(group, Point::new(50.0, 0.0)), Ok(Some(circle)));
        assert_eq!(document.child_at(group, Point::new(30.0, 10.0)), Ok(None));
        assert_eq!(document.morph_at(Point::new(0.0, 5.0)), Some(group));
        assert_eq!(document.morph_at(Point::new(100.0, 100.0)), None);
    }

    #[test]
    fn resize_clamps_to_one_unit() {
        let (mut document, _, square, _) = document();
        let mut damage: Vec<Dimensions> = Vec::new();
        document
            .resize(square, Vec2::new(10.0, -50.0), &mut damage)
            .unwrap();

        let dims = document.get(square).unwrap().dimensions();
        assert_eq!(dims, Dimensions::new(0.0, 0.0, 30.0, 1.0));
        assert_eq!(damage.len(), 2);
    }

    #[test]
    fn moves_resolve_ids() {
        let (mut document, _, _, circle) = document();
        let mut damage: Vec<Dimensions> = Vec::new();
        document
            .move_relative(circle, Vec2::new(0.0, 10.0), &mut damage)
            .unwrap();
        document
            .move_origin_to(circle, Point::new(5.0, 5.0), &mut damage)
            .unwrap();
        assert_eq!(document.get(circle).unwrap().origin(), Point::new(5.0, 5.0));
        assert_eq!(damage.len(), 4);

        let stranger = NodeId::next();
        assert_eq!(
            document.move_relative(stranger, Vec2::ZERO, &mut damage),
            Err(ControlError::ControleeGone(stranger))
        );
    }

    #[test]
    fn resize_keeps_line_direction() {
        let mut document = Document::new();
        let back = document
            .add_top(Glyph::line(Point::new(40.0, 10.0), Point::new(0.0, 10.0)))
            .unwrap();
        let mut damage: Vec<Dimensions> = Vec::new();

        document
            .resize(back, Vec2::new(-10.0, 0.0), &mut damage)
            .unwrap();
        assert_eq!(
            document.get(back).unwrap().dimensions(),
            Dimensions::new(40.0, 10.0, -50.0, 0.0)
        );

        // Shrinking past the start point leaves a one unit stub pointing
        // the same way, still horizontal.
        document
            .resize(back, Vec2::new(80.0, 5.0), &mut damage)
            .unwrap();
        assert_eq!(
            document.get(back).unwrap().dimensions(),
            Dimensions::new(40.0, 10.0, -1.0, 0.0)
        );
    }
}
