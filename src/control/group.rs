// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! Control groups: ordered items positioned together relative to a
//! controlee.
//!
//! A group moves through `Closed -> Opening -> Open`. Opening computes a
//! [`LayoutSpec`] from the opening event, lays the items out once and
//! positions the group with a transform. While open, the active item can
//! change and the group can slide along its controlee; neither re-runs the
//! layout.

use super::layout::LayoutSpec;
use crate::context::DrawContext;
use crate::drawable::{Damage, Drawable, DrawableCore};
use crate::error::ControlError;
use crate::geometry::{self, Dimensions};
use crate::model::{Document, NodeId};
use crate::settings::control::ITEM_SPACING;
use crate::style::Style;
use kurbo::{Affine, Point, Vec2};

/// Direction a popup menu's items run: local +x maps to user +x.
const POPUP_VECTOR: Vec2 = Vec2::new(-1.0, 0.0);

/// Direction used when a handle menu opens on the document itself
const DOCUMENT_VECTOR: Vec2 = Vec2::new(0.0, 1.0);

/// An item that can live in an [`ItemGroup`]
pub trait ControlItem: Drawable {
    /// Only the active item is drawn and hit-tested
    const SHOWS_ACTIVE_ONLY: bool;

    /// The group is oriented by the controlee's boundary rather than
    /// opening as a plain horizontal menu
    const FOLLOWS_CONTROLEE: bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupState {
    Closed,
    /// Layout spec computed, items not yet positioned
    Opening,
    Open,
}

/// Translates local item regions to user coordinates before passing them
/// on
struct GroupDamage<'a> {
    transform: Affine,
    inner: &'a mut dyn Damage,
}

impl Damage for GroupDamage<'_> {
    fn invalidate_rect(&mut self, rect: Dimensions) {
        let user = self.transform.transform_rect_bbox(rect.to_rect());
        self.inner.invalidate_rect(Dimensions::from_extents(user));
    }
}

#[derive(Debug, Clone)]
pub struct ItemGroup<I: ControlItem> {
    core: DrawableCore,
    items: Vec<I>,
    controlee: Option<NodeId>,
    layout_spec: Option<LayoutSpec>,
    transform: Affine,
    active_index: usize,
    state: GroupState,
    layout_generation: u64,
}

impl<I: ControlItem> ItemGroup<I> {
    pub fn new(items: Vec<I>, style: Style) -> Self {
        Self {
            core: DrawableCore::new(Dimensions::default(), style),
            items,
            controlee: None,
            layout_spec: None,
            transform: Affine::IDENTITY,
            active_index: 0,
            state: GroupState::Closed,
            layout_generation: 0,
        }
    }

    // ===== Accessors =====

    pub fn items(&self) -> &[I] {
        &self.items
    }

    pub fn controlee(&self) -> Option<NodeId> {
        self.controlee
    }

    pub(crate) fn set_controlee(&mut self, controlee: Option<NodeId>) {
        self.controlee = controlee;
    }

    pub fn layout_spec(&self) -> Option<&LayoutSpec> {
        self.layout_spec.as_ref()
    }

    pub fn state(&self) -> GroupState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == GroupState::Open
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_item(&self) -> Option<&I> {
        self.items.get(self.active_index)
    }

    /// Number of times the items have been laid out
    pub fn layout_generation(&self) -> u64 {
        self.layout_generation
    }

    /// Local-to-user transform
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Middle item, shown first when the group opens
    fn opening_item(&self) -> usize {
        self.items.len() / 2
    }

    fn visible(&self) -> impl Iterator<Item = (usize, &I)> {
        let active = self.active_index;
        self.items
            .iter()
            .enumerate()
            .filter(move |(index, _)| !I::SHOWS_ACTIVE_ONLY || *index == active)
    }

    // ===== State machine =====

    /// Open on `controlee` at `event`, a point on the controlee's edge.
    ///
    /// On failure the group is left closed.
    pub fn open(
        &mut self,
        controlee: Option<NodeId>,
        document: &Document,
        event: Point,
        damage: &mut dyn Damage,
    ) -> Result<(), ControlError> {
        if self.is_open() {
            self.close(damage);
        }
        self.controlee = controlee;
        let spec = match self.new_layout_spec(document, event) {
            Ok(spec) => spec,
            Err(err) => {
                self.controlee = None;
                return Err(err);
            }
        };
        self.layout_spec = Some(spec);
        self.state = GroupState::Opening;
        tracing::debug!("open group on {:?} at ({}, {})", controlee, event.x, event.y);

        self.layout();
        self.position();
        self.active_index = spec.opening_item;
        self.state = GroupState::Open;
        self.invalidate(damage);
        Ok(())
    }

    /// Layout spec for opening at `event`.
    ///
    /// Groups that follow their controlee orient along its orthogonal at
    /// `event` (downward when the controlee is the document itself);
    /// others open horizontally centered on `event`.
    pub fn new_layout_spec(
        &self,
        document: &Document,
        event: Point,
    ) -> Result<LayoutSpec, ControlError> {
        let opening_item = self.opening_item();
        if !I::FOLLOWS_CONTROLEE {
            return Ok(LayoutSpec::new(event, POPUP_VECTOR, opening_item));
        }
        let controlee = self.controlee.ok_or(ControlError::NoControlee)?;
        let morph = document.resolve(controlee)?;
        let vector = if document.is_top(controlee) {
            DOCUMENT_VECTOR
        } else {
            morph.orthogonal(event)
        };
        Ok(LayoutSpec::new(event, vector, opening_item))
    }

    /// Place every item along local +x, `ITEM_SPACING` apart
    pub fn layout(&mut self) {
        let mut point = Point::ZERO;
        for item in &mut self.items {
            item.center_at(point);
            point.x += ITEM_SPACING;
        }
        self.layout_generation += 1;
    }

    /// Recompute the group transform from the layout spec
    pub fn position(&mut self) {
        if let Some(spec) = &self.layout_spec {
            self.transform = spec.transform();
        }
    }

    /// Show item `index` instead of the current one, without re-layout
    pub fn set_active(&mut self, index: usize, damage: &mut dyn Damage) -> Result<(), ControlError> {
        if index >= self.items.len() {
            return Err(ControlError::NoSuchItem(index));
        }
        if index == self.active_index {
            return Ok(());
        }
        self.invalidate(damage);
        self.active_index = index;
        self.invalidate(damage);
        Ok(())
    }

    /// Index of the item under `point` (user coordinates).
    ///
    /// Every laid out item is hit-tested, including the hidden items of a
    /// handle menu, so that hovering can bring one forward. Items overlap,
    /// so the one whose center is nearest wins.
    pub fn item_at(&self, point: Point) -> Option<usize> {
        if !self.is_open() {
            return None;
        }
        let local = self.transform.inverse() * point;
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_in_control_area(local))
            .min_by(|(_, a), (_, b)| {
                let da = (a.center() - local).hypot2();
                let db = (b.center() - local).hypot2();
                da.total_cmp(&db)
            })
            .map(|(index, _)| index)
    }

    /// Track the pointer: activate and highlight the item under `point`,
    /// unhighlight when the pointer leaves.
    pub fn hover(&mut self, point: Point, damage: &mut dyn Damage) -> Option<usize> {
        let hovered = self.item_at(point);
        let mut damage = GroupDamage {
            transform: self.transform,
            inner: damage,
        };
        let active = self.active_index;
        match hovered {
            Some(index) => {
                if index != active {
                    if let Some(item) = self.items.get_mut(active) {
                        item.highlight(false, &mut damage);
                    }
                    self.active_index = index;
                }
                if let Some(item) = self.items.get_mut(index) {
                    item.highlight(true, &mut damage);
                }
            }
            None => {
                if let Some(item) = self.items.get_mut(active) {
                    if item.core().style.is_highlighted() {
                        item.highlight(false, &mut damage);
                    }
                }
            }
        }
        hovered
    }

    /// Slide along the controlee by `pixels_off_axis`, repositioning
    /// without re-layout
    pub fn slide(
        &mut self,
        document: &Document,
        pixels_off_axis: f64,
        damage: &mut dyn Damage,
    ) -> Result<(), ControlError> {
        if !self.is_open() {
            return Err(ControlError::NotOpen);
        }
        let controlee = self.controlee.ok_or(ControlError::NoControlee)?;
        let morph = document.resolve(controlee)?;
        self.invalidate(damage);
        if let Some(spec) = &mut self.layout_spec {
            spec.slide_follow(morph, pixels_off_axis);
        }
        self.position();
        self.invalidate(damage);
        Ok(())
    }

    pub fn close(&mut self, damage: &mut dyn Damage) {
        if self.is_open() {
            self.invalidate(damage);
        }
        for item in &mut self.items {
            item.core_mut().style.highlight(false);
        }
        self.state = GroupState::Closed;
        self.layout_spec = None;
        self.controlee = None;
    }

    /// Union of the visible items' ink in user coordinates
    fn visible_ink(&self) -> Option<Dimensions> {
        self.visible()
            .map(|(_, item)| {
                let user = self
                    .transform
                    .transform_rect_bbox(item.inked_bounds().to_rect());
                Dimensions::from_extents(user)
            })
            .reduce(Dimensions::union)
    }

    /// Draw the visible items and return their inked bounds in user
    /// coordinates, or `None` when closed.
    pub fn draw_visible(&self, context: &mut dyn DrawContext) -> Option<Dimensions> {
        if !self.is_open() {
            return None;
        }
        let saved = context.transform();
        context.set_transform(saved * self.transform);
        self.core.style.put_to(context);
        for (_, item) in self.visible() {
            item.draw(context);
        }
        context.set_transform(saved);
        self.visible_ink()
    }
}

impl<I: ControlItem> Drawable for ItemGroup<I> {
    fn core(&self) -> &DrawableCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DrawableCore {
        &mut self.core
    }

    /// One rectangle covering the visible items' ink, in user coordinates
    fn invalidate(&self, damage: &mut dyn Damage) {
        if let Some(region) = self.visible_ink() {
            damage.invalidate_rect(region);
        }
    }

    /// Bounds of the visible items while open
    fn dimensions(&self) -> Dimensions {
        if self.is_open() {
            self.bounds()
        } else {
            self.core.dimensions()
        }
    }

    /// An open group is moved by shifting its layout spec; the items keep
    /// their layout and the group never scales.
    fn set_dimensions(&mut self, dimensions: Dimensions) {
        let offset = dimensions.origin() - self.dimensions().origin();
        if self.is_open()
            && let Some(spec) = &mut self.layout_spec
        {
            spec.translate(offset);
            self.position();
        }
        self.core.set_dimensions(dimensions);
    }

    fn is_in_control_area(&self, point: Point) -> bool {
        self.item_at(point).is_some()
    }

    fn put_path_to(&self, context: &mut dyn DrawContext) {
        if !self.is_open() {
            return;
        }
        let saved = context.transform();
        context.set_transform(saved * self.transform);
        for (_, item) in self.visible() {
            item.put_path_to(context);
        }
        context.set_transform(saved);
    }

    fn orthogonal(&self, _point: Point) -> Vec2 {
        self.layout_spec
            .map(|spec| spec.vector)
            .unwrap_or(geometry::UPWARD)
    }

    fn draw(&self, context: &mut dyn DrawContext) {
        self.draw_visible(context);
    }
}
