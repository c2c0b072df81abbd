// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! Application context: the document plus the controls acting on it.
//!
//! The scheme receives pointer events in user coordinates and dispatches
//! them to the handle menu, the focus and the drag in progress. It is the
//! operation boundary for control errors: user-actionable failures become
//! alerts in its queue and leave the state unchanged, hard failures are
//! returned to the caller.

use crate::alert::{Alert, AlertSink};
use crate::control::{
    DragState, Focus, HandleGroup, HandleKind, HandleTarget, MenuGroup, Scroll,
    build_handle_menu, build_popup_menu,
};
use crate::drawable::{Damage, Drawable};
use crate::error::ControlError;
use crate::model::{SharedDocument, read_document, write_document};
use crate::port::ViewControl;
use kurbo::Point;

pub struct Scheme {
    document: SharedDocument,
    /// Ephemeral controls drawn in device coordinates
    widgets: Vec<MenuGroup>,
    /// Persistent controls drawn under the view transform
    transformed_controls: Vec<MenuGroup>,
    handle_menu: HandleGroup,
    focus: Focus,
    drag: Option<DragState>,
    alerts: Vec<Alert>,
}

impl Scheme {
    pub fn new(document: SharedDocument) -> Self {
        Self {
            document,
            widgets: Vec::new(),
            transformed_controls: Vec::new(),
            handle_menu: build_handle_menu(HandleTarget::Morph),
            focus: Focus::default(),
            drag: None,
            alerts: Vec::new(),
        }
    }

    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    pub fn widgets(&self) -> &[MenuGroup] {
        &self.widgets
    }

    pub fn transformed_controls(&self) -> &[MenuGroup] {
        &self.transformed_controls
    }

    pub fn handle_menu(&self) -> &HandleGroup {
        &self.handle_menu
    }

    pub fn focus(&self) -> &Focus {
        &self.focus
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn take_alerts(&mut self) -> Vec<Alert> {
        std::mem::take(&mut self.alerts)
    }

    /// Queue user-actionable errors as alerts, pass the rest on
    fn report(&mut self, result: Result<(), ControlError>) -> Result<(), ControlError> {
        match result {
            Err(err) => match err.to_alert() {
                Some(alert) => {
                    self.alerts.alert(alert);
                    Ok(())
                }
                None => Err(err),
            },
            ok => ok,
        }
    }

    // ===== Controls =====

    pub fn add_widget(&mut self, widget: MenuGroup) {
        self.widgets.push(widget);
    }

    pub fn add_transformed_control(&mut self, control: MenuGroup) {
        self.transformed_controls.push(control);
    }

    /// Open a popup menu at `at`, device coordinates
    pub fn open_popup_menu<S: AsRef<str>>(
        &mut self,
        labels: &[S],
        at: Point,
        damage: &mut dyn Damage,
    ) -> Result<(), ControlError> {
        let mut menu = build_popup_menu(labels);
        {
            let document = read_document(&self.document);
            menu.open(None, &document, at, damage)?;
        }
        self.widgets.push(menu);
        Ok(())
    }

    pub fn close_widgets(&mut self, damage: &mut dyn Damage) {
        for mut widget in self.widgets.drain(..) {
            widget.close(damage);
        }
    }

    /// Open the handle menu on the morph whose edge is at `at`, or on the
    /// document when there is none
    pub fn open_handle_menu(&mut self, at: Point, damage: &mut dyn Damage) -> Result<(), ControlError> {
        self.close_handle_menu(damage);
        let mut document = write_document(&self.document);
        let (controlee, target) = match document.morph_at(at) {
            Some(id) => (id, HandleTarget::Morph),
            None => (document.root_id(), HandleTarget::View),
        };
        let mut menu = build_handle_menu(target);
        menu.open(Some(controlee), &document, at, damage)?;
        if target == HandleTarget::Morph {
            self.focus.focus(controlee, &mut document, damage);
        }
        self.handle_menu = menu;
        Ok(())
    }

    pub fn close_handle_menu(&mut self, damage: &mut dyn Damage) {
        self.handle_menu.close(damage);
        let mut document = write_document(&self.document);
        self.focus.clear(&mut document, damage);
    }

    /// Pointer motion over the handle menu; the item under the pointer
    /// becomes the one shown
    pub fn hover(&mut self, at: Point, damage: &mut dyn Damage) -> Option<usize> {
        self.handle_menu.hover(at, damage)
    }

    /// Slide the handle menu along its controlee
    pub fn slide_handle_menu(
        &mut self,
        pixels_off_axis: f64,
        damage: &mut dyn Damage,
    ) -> Result<(), ControlError> {
        let result = {
            let document = read_document(&self.document);
            self.handle_menu.slide(&document, pixels_off_axis, damage)
        };
        self.report(result)
    }

    /// Scroll wheel at `at`. Scrolls outside the handle menu are ignored.
    pub fn scroll(&mut self, up: bool, at: Point, view: &mut dyn ViewControl) -> Result<(), ControlError> {
        if !self.handle_menu.is_in_control_area(at) {
            return Ok(());
        }
        let result = {
            let mut document = write_document(&self.document);
            let scroll = Scroll {
                document: &mut document,
                focus: &mut self.focus,
                view,
                at,
            };
            if up {
                self.handle_menu.scroll_up(scroll)
            } else {
                self.handle_menu.scroll_down(scroll)
            }
        };
        self.report(result)
    }

    // ===== Drag and drop =====

    /// Start dragging whatever is at `at`: the handle menu's controlee if
    /// `at` is on the handle menu, else the morph whose edge is there.
    /// Returns false if there is nothing to drag.
    pub fn start_drag(&mut self, at: Point) -> bool {
        let document = read_document(&self.document);
        let on_handle = self
            .handle_menu
            .item_at(at)
            .zip(self.handle_menu.controlee());
        let drag = match on_handle {
            Some((index, controlee)) => document
                .get(controlee)
                .map(|morph| DragState::start(controlee, at, morph.origin()).from_handle(index)),
            None => document
                .morph_at(at)
                .and_then(|id| document.get(id))
                .map(|morph| DragState::start(morph.id(), at, morph.origin())),
        };
        tracing::debug!("start drag {:?}", drag.map(|drag| drag.draggee));
        self.drag = drag;
        self.drag.is_some()
    }

    pub fn continue_drag(&mut self, at: Point, damage: &mut dyn Damage) -> Result<(), ControlError> {
        let Some(drag) = self.drag.as_mut() else {
            return Ok(());
        };
        drag.advance(at);
        let drag = *drag;
        let result = {
            let mut document = write_document(&self.document);
            if drag.via_handle {
                self.handle_menu.continue_drag(&drag, &mut document, damage)
            } else {
                HandleKind::Move.continue_drag(&drag, &mut document, damage)
            }
        };
        self.report(result)
    }

    pub fn drop(&mut self, at: Point, damage: &mut dyn Damage) -> Result<(), ControlError> {
        let Some(mut drag) = self.drag.take() else {
            return Ok(());
        };
        drag.advance(at);
        let result = if drag.via_handle {
            let mut document = write_document(&self.document);
            self.handle_menu.drop(&drag, &mut document, damage)
        } else {
            Ok(())
        };
        self.report(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::Severity;
    use crate::geometry::Dimensions;
    use crate::model::{CompositeGlyph, Document, Glyph, NodeId};
    use kurbo::Vec2;

    #[derive(Default)]
    struct View {
        damage: Vec<Dimensions>,
        zooms: usize,
    }

    impl Damage for View {
        fn invalidate_rect(&mut self, rect: Dimensions) {
            self.damage.push(rect);
        }
    }

    impl ViewControl for View {
        fn zoom(&mut self, _out: bool, _at: Point) {
            self.zooms += 1;
        }
    }

    fn scheme() -> (Scheme, NodeId, NodeId) {
        let mut document = Document::new();
        let group = document.add_top(CompositeGlyph::new()).unwrap();
        let square = document
            .add(group, Glyph::rect(Dimensions::new(0.0, 0.0, 100.0, 100.0)))
            .unwrap();
        (Scheme::new(document.into_shared()), group, square)
    }

    fn origin_of(scheme: &Scheme, id: NodeId) -> Point {
        read_document(scheme.document()).get(id).unwrap().origin()
    }

    #[test]
    fn handle_menu_opens_on_morph_and_focuses_it() {
        let (mut scheme, group, _) = scheme();
        let mut view = View::default();
        scheme.open_handle_menu(Point::new(100.0, 50.0), &mut view).unwrap();

        assert!(scheme.handle_menu().is_open());
        assert_eq!(scheme.handle_menu().controlee(), Some(group));
        assert_eq!(scheme.focus().current(), Some(group));

        scheme.close_handle_menu(&mut view);
        assert!(!scheme.handle_menu().is_open());
        assert_eq!(scheme.focus().current(), None);
    }

    #[test]
    fn handle_menu_on_background_controls_the_view() {
        let (mut scheme, _, _) = scheme();
        let mut view = View::default();
        scheme.open_handle_menu(Point::new(500.0, 500.0), &mut view).unwrap();

        let menu = scheme.handle_menu();
        assert_eq!(menu.active_item().unwrap().kind(), HandleKind::MoveView);
        scheme.scroll(true, Point::new(500.0, 500.0), &mut view).unwrap();
        assert_eq!(view.zooms, 1);
    }

    #[test]
    fn scroll_errors_become_alerts_and_keep_state() {
        let (mut scheme, _, square) = scheme();
        let mut view = View::default();
        scheme.open_handle_menu(Point::new(100.0, 50.0), &mut view).unwrap();

        // group -> square, then a primitive refuses to go deeper.
        scheme.scroll(false, Point::new(100.0, 50.0), &mut view).unwrap();
        assert_eq!(scheme.handle_menu().controlee(), Some(square));
        scheme.scroll(false, Point::new(100.0, 50.0), &mut view).unwrap();
        assert_eq!(scheme.handle_menu().controlee(), Some(square));

        // square -> group -> root, then the root refuses to go higher.
        for _ in 0..3 {
            scheme.scroll(true, Point::new(100.0, 50.0), &mut view).unwrap();
        }
        let root = read_document(scheme.document()).root_id();
        assert_eq!(scheme.handle_menu().controlee(), Some(root));

        let alerts = scheme.take_alerts();
        assert_eq!(alerts.len(), 2);
        assert!(alerts.iter().all(|alert| alert.severity == Severity::Notice));
        assert_eq!(alerts[1].message, "can't scroll up past document");
        assert!(scheme.alerts().is_empty());
    }

    #[test]
    fn scroll_outside_handle_menu_is_ignored() {
        let (mut scheme, group, _) = scheme();
        let mut view = View::default();
        scheme.open_handle_menu(Point::new(100.0, 50.0), &mut view).unwrap();
        scheme.scroll(false, Point::new(-300.0, -300.0), &mut view).unwrap();
        assert_eq!(scheme.handle_menu().controlee(), Some(group));
        assert!(scheme.alerts().is_empty());
    }

    #[test]
    fn plain_drag_moves_the_morph_by_increments() {
        let (mut scheme, group, _) = scheme();
        let mut view = View::default();
        assert!(scheme.start_drag(Point::new(0.0, 50.0)));
        assert_eq!(scheme.drag().map(|drag| drag.draggee), Some(group));

        scheme.continue_drag(Point::new(10.0, 50.0), &mut view).unwrap();
        scheme.continue_drag(Point::new(10.0, 70.0), &mut view).unwrap();
        scheme.drop(Point::new(10.0, 70.0), &mut view).unwrap();

        assert_eq!(origin_of(&scheme, group), Point::new(10.0, 20.0));
        assert!(scheme.drag().is_none());
        assert_eq!(view.damage.len(), 4);
    }

    #[test]
    fn nothing_to_drag_on_empty_canvas() {
        let (mut scheme, _, _) = scheme();
        let mut view = View::default();
        assert!(!scheme.start_drag(Point::new(400.0, 400.0)));
        scheme.continue_drag(Point::new(410.0, 400.0), &mut view).unwrap();
        scheme.drop(Point::new(410.0, 400.0), &mut view).unwrap();
        assert!(view.damage.is_empty());
    }

    #[test]
    fn resize_handle_drop_resizes_controlee() {
        let (mut scheme, _, square) = scheme();
        let mut view = View::default();
        scheme.open_handle_menu(Point::new(100.0, 50.0), &mut view).unwrap();
        scheme.scroll(false, Point::new(100.0, 50.0), &mut view).unwrap();

        // The resize item sits one spacing inward from the hotspot.
        let spacing = crate::settings::control::ITEM_SPACING;
        let on_resize = Point::new(100.0 - spacing, 50.0);
        assert_eq!(scheme.hover(on_resize, &mut view), Some(2));

        assert!(scheme.start_drag(on_resize));
        scheme
            .continue_drag(on_resize + Vec2::new(15.0, 5.0), &mut view)
            .unwrap();
        scheme.drop(on_resize + Vec2::new(30.0, 10.0), &mut view).unwrap();

        let dims = read_document(scheme.document()).get(square).unwrap().dimensions();
        assert_eq!(dims, Dimensions::new(0.0, 0.0, 130.0, 110.0));
    }

    #[test]
    fn popup_menus_are_widgets() {
        let (mut scheme, _, _) = scheme();
        let mut view = View::default();
        scheme
            .open_popup_menu(&["one", "two"], Point::new(10.0, 10.0), &mut view)
            .unwrap();
        assert_eq!(scheme.widgets().len(), 1);
        assert!(scheme.widgets()[0].is_open());

        scheme.close_widgets(&mut view);
        assert!(scheme.widgets().is_empty());
    }

    #[test]
    fn slide_moves_the_hotspot_without_relayout() {
        let (mut scheme, _, _) = scheme();
        let mut view = View::default();
        scheme.open_handle_menu(Point::new(100.0, 50.0), &mut view).unwrap();
        scheme.slide_handle_menu(20.0, &mut view).unwrap();

        let menu = scheme.handle_menu();
        let hotspot = menu.layout_spec().unwrap().hotspot;
        assert!((hotspot - Point::new(100.0, 30.0)).hypot() < 1e-6);
        assert_eq!(menu.layout_generation(), 1);
    }
}
