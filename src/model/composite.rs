// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! Composite glyphs: morphs made of other morphs.
//!
//! A composite has no outline of its own. Its path is the concatenation of
//! its children's paths and its dimensions are the union of theirs.
//! Setting the dimensions maps every child from the old union rectangle to
//! the new one, so moving a composite moves the whole subtree.

use super::{Morph, NodeId};
use crate::context::DrawContext;
use crate::drawable::{Damage, Drawable, DrawableCore};
use crate::geometry::{self, Dimensions};
use crate::style::Style;
use kurbo::{Point, Vec2};

#[derive(Debug, Clone)]
pub struct CompositeGlyph {
    id: NodeId,
    core: DrawableCore,
    children: Vec<Morph>,
}

impl CompositeGlyph {
    pub fn new() -> Self {
        Self {
            id: NodeId::next(),
            core: DrawableCore::new(Dimensions::default(), Style::glyph()),
            children: Vec::new(),
        }
    }

    pub fn with_children(children: impl IntoIterator<Item = Morph>) -> Self {
        let mut composite = Self::new();
        composite.children.extend(children);
        composite
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn children(&self) -> &[Morph] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Morph] {
        &mut self.children
    }

    pub fn push(&mut self, child: Morph) {
        self.children.push(child);
    }

    /// Set highlight state on the whole subtree without invalidating
    pub(crate) fn set_highlighted(&mut self, on: bool) {
        self.core.style.highlight(on);
        for child in &mut self.children {
            child.set_highlighted(on);
        }
    }
}

impl Default for CompositeGlyph {
    fn default() -> Self {
        Self::new()
    }
}

/// Map `dims` from the `from` frame to the `to` frame.
///
/// A degenerate source axis only translates.
fn remap(dims: Dimensions, from: Dimensions, to: Dimensions) -> Dimensions {
    let sx = if from.width.abs() > f64::EPSILON {
        to.width / from.width
    } else {
        1.0
    };
    let sy = if from.height.abs() > f64::EPSILON {
        to.height / from.height
    } else {
        1.0
    };
    Dimensions::new(
        to.x + (dims.x - from.x) * sx,
        to.y + (dims.y - from.y) * sy,
        dims.width * sx,
        dims.height * sy,
    )
}

impl Drawable for CompositeGlyph {
    fn core(&self) -> &DrawableCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DrawableCore {
        &mut self.core
    }

    fn dimensions(&self) -> Dimensions {
        self.children
            .iter()
            .map(Drawable::dimensions)
            .reduce(Dimensions::union)
            .unwrap_or_else(|| self.core.dimensions())
    }

    fn set_dimensions(&mut self, dimensions: Dimensions) {
        let old = self.dimensions();
        for child in &mut self.children {
            let mapped = remap(child.dimensions(), old, dimensions);
            child.set_dimensions(mapped);
        }
        self.core.set_dimensions(dimensions);
    }

    /// One rectangle covering every child's ink
    fn invalidate(&self, damage: &mut dyn Damage) {
        let region = self
            .children
            .iter()
            .map(Drawable::inked_bounds)
            .reduce(Dimensions::union)
            .unwrap_or_else(|| self.dimensions());
        damage.invalidate_rect(region);
    }

    fn is_in_control_area(&self, point: Point) -> bool {
        self.children
            .iter()
            .any(|child| child.is_in_control_area(point))
    }

    fn put_path_to(&self, context: &mut dyn DrawContext) {
        for child in &self.children {
            child.put_path_to(context);
        }
    }

    fn orthogonal(&self, point: Point) -> Vec2 {
        self.children
            .iter()
            .filter_map(|child| {
                geometry::nearest_segment(&child.path(), point)
                    .map(|(_, _, distance_sq)| (child, distance_sq))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(child, _)| child.orthogonal(point))
            .unwrap_or(geometry::UPWARD)
    }

    /// Children keep their own styles.
    fn draw(&self, context: &mut dyn DrawContext) {
        for child in &self.children {
            child.draw(context);
        }
    }

    fn highlight(&mut self, on: bool, damage: &mut dyn Damage) {
        self.set_highlighted(on);
        self.invalidate(damage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SceneContext;
    use crate::model::Glyph;

    fn pair() -> CompositeGlyph {
        CompositeGlyph::with_children([
            Morph::from(Glyph::rect(Dimensions::new(0.0, 0.0, 10.0, 10.0))),
            Morph::from(Glyph::ellipse(Dimensions::new(20.0, 20.0, 10.0, 10.0))),
        ])
    }

    #[test]
    fn dimensions_are_union_of_children() {
        assert_eq!(pair().dimensions(), Dimensions::new(0.0, 0.0, 30.0, 30.0));
    }

    #[test]
    fn empty_composite_falls_back_to_own_dimensions() {
        let mut composite = CompositeGlyph::new();
        composite.set_dimensions(Dimensions::new(1.0, 1.0, 5.0, 5.0));
        assert_eq!(composite.dimensions(), Dimensions::new(1.0, 1.0, 5.0, 5.0));
    }

    #[test]
    fn setting_dimensions_maps_children() {
        let mut composite = pair();
        composite.set_dimensions(Dimensions::new(100.0, 100.0, 60.0, 60.0));

        let children = composite.children();
        assert_eq!(
            children[0].dimensions(),
            Dimensions::new(100.0, 100.0, 20.0, 20.0)
        );
        assert_eq!(
            children[1].dimensions(),
            Dimensions::new(140.0, 140.0, 20.0, 20.0)
        );
    }

    #[test]
    fn move_relative_translates_subtree_with_two_invalidations() {
        let mut composite = pair();
        let mut damage: Vec<Dimensions> = Vec::new();
        composite.move_relative(Vec2::new(5.0, 0.0), &mut damage);

        assert_eq!(damage.len(), 2);
        assert_eq!(damage[1], damage[0].translated(Vec2::new(5.0, 0.0)));
        assert_eq!(composite.children()[1].origin(), Point::new(25.0, 20.0));
    }

    #[test]
    fn center_at_centers_composite_bounds() {
        let mut composite = pair();
        composite.center_at(Point::new(-40.0, 60.0));
        assert_eq!(composite.bounds().center(), Point::new(-40.0, 60.0));
    }

    #[test]
    fn draw_paints_each_child_in_its_style() {
        let mut composite = pair();
        if let Morph::Glyph(glyph) = &mut composite.children_mut()[1] {
            glyph.core_mut().filled = true;
        }
        let mut context = SceneContext::new();
        composite.draw(&mut context);
        assert_eq!(context.ops().len(), 2);
        assert!(context.path_is_empty());
    }

    #[test]
    fn highlight_reaches_children_with_one_invalidation() {
        let mut composite = pair();
        let mut damage: Vec<Dimensions> = Vec::new();
        composite.highlight(true, &mut damage);

        assert_eq!(damage.len(), 1);
        assert!(
            composite
                .children()
                .iter()
                .all(|child| child.core().style.is_highlighted())
        );
    }

    #[test]
    fn orthogonal_uses_nearest_child() {
        let composite = pair();
        let normal = composite.orthogonal(Point::new(10.0, 5.0));
        assert!((normal - Vec2::new(1.0, 0.0)).hypot() < 1e-9);
    }
}
