// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! Handle menus: a line of overlapping square items opened on the edge of
//! a morph, showing one item at a time.
//!
//! Dragging out of a move item moves the controlee; dropping a drag that
//! started in the resize item resizes it. Scrolling in the move-morph item
//! walks the controlee up and down the document tree; scrolling in the
//! move-view item zooms the view.

use super::drag::DragState;
use super::focus::Focus;
use super::group::{ControlItem, ItemGroup};
use crate::context::DrawContext;
use crate::drawable::{Damage, Drawable, DrawableCore};
use crate::error::ControlError;
use crate::geometry::Dimensions;
use crate::model::{Document, Glyph, NodeId};
use crate::port::ViewControl;
use crate::settings::control::ITEM_SIZE;
use crate::style::Style;
use kurbo::{Point, Vec2};

pub type HandleGroup = ItemGroup<HandleItem>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    Move,
    /// Move item of a handle menu opened on the document: scrolling zooms
    MoveView,
    /// Move item of a handle menu opened on a morph: scrolling changes
    /// the controlee
    MoveMorph,
    Resize,
}

impl HandleKind {
    /// Ghost the draggee at the pointer.
    ///
    /// A drag started on a handle places the draggee's origin at its start
    /// origin plus the total offset; a plain drag applies the increment
    /// since the previous event.
    pub fn continue_drag(
        self,
        drag: &DragState,
        document: &mut Document,
        damage: &mut dyn Damage,
    ) -> Result<(), ControlError> {
        match self {
            HandleKind::Move | HandleKind::MoveView | HandleKind::MoveMorph => {
                if drag.via_handle {
                    document.move_origin_to(drag.draggee, drag.start_origin + drag.offset, damage)
                } else {
                    document.move_relative(drag.draggee, drag.increment, damage)
                }
            }
            HandleKind::Resize => Ok(()),
        }
    }

    /// Finish a drag that started in an item of this kind
    pub fn drop(
        self,
        drag: &DragState,
        document: &mut Document,
        damage: &mut dyn Damage,
    ) -> Result<(), ControlError> {
        match self {
            HandleKind::Resize => document.resize(drag.draggee, drag.offset, damage),
            // The ghost stays where it was last drawn.
            _ => {
                tracing::debug!("drop move of {:?}", drag.draggee);
                Ok(())
            }
        }
    }
}

/// A square item of a handle menu
#[derive(Debug, Clone)]
pub struct HandleItem {
    kind: HandleKind,
    glyph: Glyph,
}

impl HandleItem {
    /// Unfilled square for move kinds, filled square for resize
    pub fn new(kind: HandleKind) -> Self {
        let glyph = Glyph::rect(Dimensions::new(0.0, 0.0, ITEM_SIZE, ITEM_SIZE))
            .with_style(Style::handle())
            .filled(kind == HandleKind::Resize);
        Self { kind, glyph }
    }

    pub fn kind(&self) -> HandleKind {
        self.kind
    }
}

impl Drawable for HandleItem {
    fn core(&self) -> &DrawableCore {
        self.glyph.core()
    }

    fn core_mut(&mut self) -> &mut DrawableCore {
        self.glyph.core_mut()
    }

    fn invalidate(&self, damage: &mut dyn Damage) {
        self.glyph.invalidate(damage);
    }

    /// The whole square is hot, not just its outline
    fn is_in_control_area(&self, point: Point) -> bool {
        self.glyph.is_inbounds(point)
    }

    fn put_path_to(&self, context: &mut dyn DrawContext) {
        self.glyph.put_path_to(context);
    }

    fn orthogonal(&self, point: Point) -> Vec2 {
        self.glyph.orthogonal(point)
    }
}

impl ControlItem for HandleItem {
    const SHOWS_ACTIVE_ONLY: bool = true;
    const FOLLOWS_CONTROLEE: bool = true;
}

/// What a scroll in a handle item may touch
pub struct Scroll<'a> {
    pub document: &'a mut Document,
    pub focus: &'a mut Focus,
    pub view: &'a mut dyn ViewControl,
    /// Pointer position, user coordinates
    pub at: Point,
}

impl HandleGroup {
    fn active_kind(&self) -> Result<HandleKind, ControlError> {
        if !self.is_open() {
            return Err(ControlError::NotOpen);
        }
        self.active_item()
            .map(HandleItem::kind)
            .ok_or(ControlError::NoSuchItem(self.active_index()))
    }

    fn kind_of(&self, drag: &DragState) -> HandleKind {
        drag.source_item
            .and_then(|index| self.items().get(index))
            .map_or(HandleKind::Move, HandleItem::kind)
    }

    /// Scroll wheel up over the active item
    pub fn scroll_up(&mut self, mut scroll: Scroll<'_>) -> Result<(), ControlError> {
        match self.active_kind()? {
            HandleKind::MoveView => {
                scroll.view.zoom(true, scroll.at);
                Ok(())
            }
            HandleKind::MoveMorph => {
                let controlee = self.controlee().ok_or(ControlError::NoControlee)?;
                scroll.document.resolve(controlee)?;
                if scroll.document.is_top(controlee) {
                    return Err(ControlError::AtDocumentRoot);
                }
                let parent = scroll.document.parent_of(controlee);
                self.change_controlee(parent, scroll.document, scroll.focus, scroll.view)
            }
            HandleKind::Move | HandleKind::Resize => Ok(()),
        }
    }

    /// Scroll wheel down over the active item
    pub fn scroll_down(&mut self, mut scroll: Scroll<'_>) -> Result<(), ControlError> {
        match self.active_kind()? {
            HandleKind::MoveView => {
                scroll.view.zoom(false, scroll.at);
                Ok(())
            }
            HandleKind::MoveMorph => {
                let controlee = self.controlee().ok_or(ControlError::NoControlee)?;
                if scroll.document.is_primitive(controlee)? {
                    return Err(ControlError::PrimitiveControlee);
                }
                let hotspot = self
                    .layout_spec()
                    .map(|spec| spec.hotspot)
                    .ok_or(ControlError::NotOpen)?;
                match scroll.document.child_at(controlee, hotspot)? {
                    Some(child) => self.change_controlee(
                        Some(child),
                        scroll.document,
                        scroll.focus,
                        scroll.view,
                    ),
                    None => Err(ControlError::NoMorphAtHotspot),
                }
            }
            HandleKind::Move | HandleKind::Resize => Ok(()),
        }
    }

    /// Control `new_controlee` from now on; `None` means above the
    /// document root and leaves everything unchanged.
    pub fn change_controlee(
        &mut self,
        new_controlee: Option<NodeId>,
        document: &mut Document,
        focus: &mut Focus,
        damage: &mut dyn Damage,
    ) -> Result<(), ControlError> {
        let id = new_controlee.ok_or(ControlError::AtDocumentRoot)?;
        document.resolve(id)?;
        tracing::debug!("change controlee to {:?}", id);
        focus.focus(id, document, damage);
        self.set_controlee(Some(id));
        Ok(())
    }

    pub fn continue_drag(
        &self,
        drag: &DragState,
        document: &mut Document,
        damage: &mut dyn Damage,
    ) -> Result<(), ControlError> {
        self.kind_of(drag).continue_drag(drag, document, damage)
    }

    pub fn drop(
        &self,
        drag: &DragState,
        document: &mut Document,
        damage: &mut dyn Damage,
    ) -> Result<(), ControlError> {
        self.kind_of(drag).drop(drag, document, damage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{HandleTarget, build_handle_menu};
    use crate::model::CompositeGlyph;

    #[derive(Default)]
    struct View {
        damage: Vec<Dimensions>,
        zooms: Vec<(bool, Point)>,
    }

    impl Damage for View {
        fn invalidate_rect(&mut self, rect: Dimensions) {
            self.damage.push(rect);
        }
    }

    impl ViewControl for View {
        fn zoom(&mut self, out: bool, at: Point) {
            self.zooms.push((out, at));
        }
    }

    struct Fixture {
        document: Document,
        focus: Focus,
        view: View,
        group: NodeId,
        square: NodeId,
    }

    impl Fixture {
        /// A composite holding a square and a circle
        fn new() -> Self {
            let mut document = Document::new();
            let group = document.add_top(CompositeGlyph::new()).unwrap();
            let square = document
                .add(group, Glyph::rect(Dimensions::new(0.0, 0.0, 100.0, 100.0)))
                .unwrap();
            document
                .add(group, Glyph::ellipse(Dimensions::new(200.0, 0.0, 100.0, 100.0)))
                .unwrap();
            Self {
                document,
                focus: Focus::default(),
                view: View::default(),
                group,
                square,
            }
        }

        fn open(&mut self, target: HandleTarget, controlee: NodeId, at: Point) -> HandleGroup {
            let mut menu = build_handle_menu(target);
            menu.open(Some(controlee), &self.document, at, &mut self.view)
                .unwrap();
            menu
        }

        fn scroll(&mut self) -> Scroll<'_> {
            Scroll {
                document: &mut self.document,
                focus: &mut self.focus,
                view: &mut self.view,
                at: Point::new(100.0, 50.0),
            }
        }
    }

    #[test]
    fn scroll_down_descends_to_child_at_hotspot() {
        let mut fx = Fixture::new();
        let mut menu = fx.open(HandleTarget::Morph, fx.group, Point::new(100.0, 50.0));
        assert_eq!(menu.active_item().unwrap().kind(), HandleKind::MoveMorph);

        menu.scroll_down(fx.scroll()).unwrap();
        assert_eq!(menu.controlee(), Some(fx.square));
        assert_eq!(fx.focus.current(), Some(fx.square));
        assert!(fx.document.get(fx.square).unwrap().core().style.is_highlighted());
    }

    #[test]
    fn scroll_down_on_primitive_is_refused() {
        let mut fx = Fixture::new();
        let mut menu = fx.open(HandleTarget::Morph, fx.square, Point::new(100.0, 50.0));

        let err = menu.scroll_down(fx.scroll()).unwrap_err();
        assert_eq!(err, ControlError::PrimitiveControlee);
        assert!(err.to_alert().is_some());
        assert_eq!(menu.controlee(), Some(fx.square));
        assert_eq!(fx.focus.current(), None);
    }

    #[test]
    fn scroll_up_climbs_to_root_then_stops() {
        let mut fx = Fixture::new();
        let mut menu = fx.open(HandleTarget::Morph, fx.square, Point::new(100.0, 50.0));

        menu.scroll_up(fx.scroll()).unwrap();
        assert_eq!(menu.controlee(), Some(fx.group));
        menu.scroll_up(fx.scroll()).unwrap();
        let root = fx.document.root_id();
        assert_eq!(menu.controlee(), Some(root));

        let err = menu.scroll_up(fx.scroll()).unwrap_err();
        assert_eq!(err, ControlError::AtDocumentRoot);
        assert_eq!(
            err.to_alert().map(|alert| alert.message),
            Some("can't scroll up past document".to_string())
        );
        assert_eq!(menu.controlee(), Some(root));
    }

    #[test]
    fn scroll_down_without_child_at_hotspot_is_fatal() {
        let mut fx = Fixture::new();
        // Opened on the circle's edge, then the circle moves away.
        let mut menu = fx.open(HandleTarget::Morph, fx.group, Point::new(300.0, 50.0));
        let circle = fx.document.get(fx.group).unwrap().children()[1].id();
        fx.document
            .move_relative(circle, Vec2::new(0.0, 500.0), &mut fx.view)
            .unwrap();

        let err = menu.scroll_down(fx.scroll()).unwrap_err();
        assert_eq!(err, ControlError::NoMorphAtHotspot);
        assert!(err.to_alert().is_none());
        assert_eq!(menu.controlee(), Some(fx.group));
    }

    #[test]
    fn change_controlee_to_nothing_leaves_state() {
        let mut fx = Fixture::new();
        let mut menu = fx.open(HandleTarget::Morph, fx.square, Point::new(100.0, 50.0));
        assert_eq!(
            menu.change_controlee(None, &mut fx.document, &mut fx.focus, &mut fx.view),
            Err(ControlError::AtDocumentRoot)
        );
        assert_eq!(menu.controlee(), Some(fx.square));
        assert_eq!(fx.focus.current(), None);
    }

    #[test]
    fn move_view_item_zooms() {
        let mut fx = Fixture::new();
        let root = fx.document.root_id();
        let mut menu = fx.open(HandleTarget::View, root, Point::new(500.0, 500.0));
        assert_eq!(menu.active_item().unwrap().kind(), HandleKind::MoveView);

        menu.scroll_up(fx.scroll()).unwrap();
        menu.scroll_down(fx.scroll()).unwrap();
        assert_eq!(
            fx.view.zooms,
            vec![(true, Point::new(100.0, 50.0)), (false, Point::new(100.0, 50.0))]
        );
    }

    #[test]
    fn scrolls_in_move_and_resize_items_are_ignored() {
        let mut fx = Fixture::new();
        let mut menu = fx.open(HandleTarget::Morph, fx.square, Point::new(100.0, 50.0));
        for index in [0, 2] {
            menu.set_active(index, &mut fx.view).unwrap();
            menu.scroll_up(fx.scroll()).unwrap();
            menu.scroll_down(fx.scroll()).unwrap();
        }
        assert_eq!(menu.controlee(), Some(fx.square));
        assert!(fx.view.zooms.is_empty());
    }

    #[test]
    fn handle_drag_moves_then_resize_drop_resizes() {
        let mut fx = Fixture::new();
        let menu = fx.open(HandleTarget::Morph, fx.square, Point::new(100.0, 50.0));

        let mut drag = DragState::start(fx.square, Point::new(100.0, 50.0), Point::ZERO).from_handle(1);
        drag.advance(Point::new(110.0, 60.0));
        menu.continue_drag(&drag, &mut fx.document, &mut fx.view).unwrap();
        drag.advance(Point::new(130.0, 50.0));
        menu.continue_drag(&drag, &mut fx.document, &mut fx.view).unwrap();
        menu.drop(&drag, &mut fx.document, &mut fx.view).unwrap();
        assert_eq!(
            fx.document.get(fx.square).unwrap().origin(),
            Point::new(30.0, 0.0)
        );

        let mut resize = DragState::start(fx.square, Point::ZERO, Point::new(30.0, 0.0)).from_handle(2);
        resize.advance(Point::new(-20.0, 10.0));
        menu.continue_drag(&resize, &mut fx.document, &mut fx.view).unwrap();
        menu.drop(&resize, &mut fx.document, &mut fx.view).unwrap();
        assert_eq!(
            fx.document.get(fx.square).unwrap().dimensions(),
            Dimensions::new(30.0, 0.0, 80.0, 110.0)
        );
    }
}
