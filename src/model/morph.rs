// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! `Morph`: any node of the document tree.

use super::{CompositeGlyph, Glyph, NodeId};
use crate::context::DrawContext;
use crate::drawable::{Damage, Drawable, DrawableCore};
use crate::geometry::Dimensions;
use kurbo::{Point, Vec2};

/// A document node: a primitive glyph or a composite of morphs
#[derive(Debug, Clone)]
pub enum Morph {
    Glyph(Glyph),
    Composite(CompositeGlyph),
}

impl Morph {
    pub fn id(&self) -> NodeId {
        match self {
            Morph::Glyph(glyph) => glyph.id(),
            Morph::Composite(composite) => composite.id(),
        }
    }

    /// True if this morph has no children
    pub fn is_primitive(&self) -> bool {
        matches!(self, Morph::Glyph(_))
    }

    pub fn children(&self) -> &[Morph] {
        match self {
            Morph::Glyph(_) => &[],
            Morph::Composite(composite) => composite.children(),
        }
    }

    /// The morph with `id` in this subtree
    pub fn find(&self, id: NodeId) -> Option<&Morph> {
        if self.id() == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut Morph> {
        if self.id() == id {
            return Some(self);
        }
        match self {
            Morph::Glyph(_) => None,
            Morph::Composite(composite) => composite
                .children_mut()
                .iter_mut()
                .find_map(|child| child.find_mut(id)),
        }
    }

    /// Id of the composite directly containing `id`, within this subtree
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        let children = self.children();
        if children.iter().any(|child| child.id() == id) {
            return Some(self.id());
        }
        children.iter().find_map(|child| child.parent_of(id))
    }

    /// Deepest morph whose stroked outline contains `point`
    pub fn deepest_at(&self, point: Point) -> Option<&Morph> {
        match self {
            Morph::Glyph(glyph) => glyph.is_inpath(point).then_some(self),
            Morph::Composite(composite) => composite
                .children()
                .iter()
                .rev()
                .find_map(|child| child.deepest_at(point)),
        }
    }

    pub(crate) fn set_highlighted(&mut self, on: bool) {
        match self {
            Morph::Glyph(glyph) => glyph.core_mut().style.highlight(on),
            Morph::Composite(composite) => composite.set_highlighted(on),
        }
    }
}

impl From<Glyph> for Morph {
    fn from(glyph: Glyph) -> Self {
        Morph::Glyph(glyph)
    }
}

impl From<CompositeGlyph> for Morph {
    fn from(composite: CompositeGlyph) -> Self {
        Morph::Composite(composite)
    }
}

impl Drawable for Morph {
    fn core(&self) -> &DrawableCore {
        match self {
            Morph::Glyph(glyph) => glyph.core(),
            Morph::Composite(composite) => composite.core(),
        }
    }

    fn core_mut(&mut self) -> &mut DrawableCore {
        match self {
            Morph::Glyph(glyph) => glyph.core_mut(),
            Morph::Composite(composite) => composite.core_mut(),
        }
    }

    fn invalidate(&self, damage: &mut dyn Damage) {
        match self {
            Morph::Glyph(glyph) => glyph.invalidate(damage),
            Morph::Composite(composite) => composite.invalidate(damage),
        }
    }

    fn is_in_control_area(&self, point: Point) -> bool {
        match self {
            Morph::Glyph(glyph) => glyph.is_in_control_area(point),
            Morph::Composite(composite) => composite.is_in_control_area(point),
        }
    }

    fn put_path_to(&self, context: &mut dyn DrawContext) {
        match self {
            Morph::Glyph(glyph) => glyph.put_path_to(context),
            Morph::Composite(composite) => composite.put_path_to(context),
        }
    }

    fn orthogonal(&self, point: Point) -> Vec2 {
        match self {
            Morph::Glyph(glyph) => glyph.orthogonal(point),
            Morph::Composite(composite) => composite.orthogonal(point),
        }
    }

    fn dimensions(&self) -> Dimensions {
        match self {
            Morph::Glyph(glyph) => glyph.dimensions(),
            Morph::Composite(composite) => composite.dimensions(),
        }
    }

    fn set_dimensions(&mut self, dimensions: Dimensions) {
        match self {
            Morph::Glyph(glyph) => glyph.set_dimensions(dimensions),
            Morph::Composite(composite) => composite.set_dimensions(dimensions),
        }
    }

    fn draw(&self, context: &mut dyn DrawContext) {
        match self {
            Morph::Glyph(glyph) => glyph.draw(context),
            Morph::Composite(composite) => composite.draw(context),
        }
    }

    fn highlight(&mut self, on: bool, damage: &mut dyn Damage) {
        match self {
            Morph::Glyph(glyph) => glyph.highlight(on, damage),
            Morph::Composite(composite) => composite.highlight(on, damage),
        }
    }
}
