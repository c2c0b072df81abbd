// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! The view port: a window on a display, panned and zoomed over the
//! document.
//!
//! The view transform maps user (document) coordinates to device
//! coordinates. Ephemeral widgets such as popup menus are drawn in device
//! coordinates; the model, persistent controls and the handle menu are
//! drawn under the view transform.

use super::Port;
use crate::context::{DrawContext, PaintOp, SceneContext};
use crate::drawable::{Damage, Drawable};
use crate::error::PortError;
use crate::geometry::Dimensions;
use crate::model::SharedDocument;
use crate::scheme::Scheme;
use crate::settings;
use crate::style::Style;
use crate::theme;
use kurbo::{Affine, Point, Rect, Vec2};

// ============================================================================
// VIEW TRANSFORM
// ============================================================================

/// Zoom and pan of a view: `device = offset + zoom * user`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub zoom: f64,
    pub offset: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

impl ViewTransform {
    pub fn affine(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    pub fn user_to_device(&self, point: Point) -> Point {
        self.affine() * point
    }

    pub fn device_to_user(&self, point: Point) -> Point {
        self.affine().inverse() * point
    }

    /// Scale by `factor`, keeping the user point under `device` fixed.
    /// Zoom is clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn zoom_around(&mut self, factor: f64, device: Point) {
        let user = self.device_to_user(device);
        self.zoom = (self.zoom * factor).clamp(settings::view::MIN_ZOOM, settings::view::MAX_ZOOM);
        self.offset = device.to_vec2() - user.to_vec2() * self.zoom;
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }
}

// ============================================================================
// HOST SURFACE
// ============================================================================

/// The window a view draws on, provided by the host toolkit
pub trait HostSurface {
    type Context: DrawContext;

    /// Device rectangle of the drawing area
    fn allocation(&self) -> Rect;

    /// Queue a redraw of a device rectangle
    fn invalidate_rect(&mut self, rect: Rect);

    /// A new context for one redraw. Contexts are never reused across
    /// redraws.
    fn create_context(&mut self) -> Self::Context;

    /// Show what was drawn into `context`
    fn present(&mut self, context: Self::Context);
}

/// Headless surface keeping the queued damage and the last presented frame
#[derive(Debug, Clone, Default)]
pub struct OffscreenSurface {
    width: f64,
    height: f64,
    damage: Vec<Rect>,
    frame: Vec<PaintOp>,
    frame_count: usize,
}

impl OffscreenSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn damage(&self) -> &[Rect] {
        &self.damage
    }

    pub fn take_damage(&mut self) -> Vec<Rect> {
        std::mem::take(&mut self.damage)
    }

    pub fn frame(&self) -> &[PaintOp] {
        &self.frame
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }
}

impl HostSurface for OffscreenSurface {
    type Context = SceneContext;

    fn allocation(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    fn invalidate_rect(&mut self, rect: Rect) {
        self.damage.push(rect);
    }

    fn create_context(&mut self) -> SceneContext {
        SceneContext::new()
    }

    fn present(&mut self, context: SceneContext) {
        self.frame = context.into_ops();
        self.frame_count += 1;
    }
}

// ============================================================================
// VIEW PORT
// ============================================================================

/// What handle items may do to the view they are shown in
pub trait ViewControl: Damage {
    /// Zoom out (`true`) or in around `at`, user coordinates
    fn zoom(&mut self, out: bool, at: Point);
}

pub struct ViewPort<S: HostSurface> {
    surface: S,
    model: Option<SharedDocument>,
    style: Style,
    view: ViewTransform,
    zoom_step: f64,
}

impl<S: HostSurface> ViewPort<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            model: None,
            style: Style::new(
                theme::canvas::FOREGROUND,
                theme::canvas::FOREGROUND,
                settings::context::LINE_WIDTH,
            ),
            view: ViewTransform::default(),
            zoom_step: settings::view::ZOOM_STEP,
        }
    }

    pub fn with_zoom_step(mut self, zoom_step: f64) -> Self {
        self.zoom_step = zoom_step;
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewTransform {
        &mut self.view
    }

    /// Redraw: widgets, then under the view transform the transformed
    /// controls, the model and the handle menu.
    pub fn expose(&mut self, scheme: &Scheme) -> Result<(), PortError> {
        let mut context = self.surface.create_context();
        self.style.put_to(&mut context);

        for widget in scheme.widgets() {
            widget.draw(&mut context);
        }

        context.set_transform(self.view.affine());
        for control in scheme.transformed_controls() {
            control.draw(&mut context);
        }
        self.draw_model(&mut context)?;
        scheme.handle_menu().draw(&mut context);

        self.surface.present(context);
        Ok(())
    }

    /// Queue a redraw of the whole port
    pub fn invalidate(&mut self) {
        let allocation = self.surface.allocation();
        self.surface.invalidate_rect(allocation);
    }

    pub fn device_to_user(&self, point: Point) -> Point {
        self.view.device_to_user(point)
    }

    pub fn user_to_device(&self, point: Point) -> Point {
        self.view.user_to_device(point)
    }
}

impl<S: HostSurface> Port for ViewPort<S> {
    fn model(&self) -> Option<&SharedDocument> {
        self.model.as_ref()
    }

    fn set_model(&mut self, model: SharedDocument) {
        self.model = Some(model);
    }
}

/// Model rectangles become device rectangles, rounded outward.
impl<S: HostSurface> Damage for ViewPort<S> {
    fn invalidate_rect(&mut self, rect: Dimensions) {
        let device = self.view.affine().transform_rect_bbox(rect.normalized().to_rect());
        let device = Dimensions::from_extents(device).to_rect();
        self.surface.invalidate_rect(device);
    }
}

impl<S: HostSurface> ViewControl for ViewPort<S> {
    fn zoom(&mut self, out: bool, at: Point) {
        let device = self.user_to_device(at);
        let factor = if out {
            1.0 / self.zoom_step
        } else {
            self.zoom_step
        };
        self.view.zoom_around(factor, device);
        tracing::debug!("zoom {} to {}", if out { "out" } else { "in" }, self.view.zoom);
        self.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PaintKind;
    use crate::control::build_popup_menu;
    use crate::model::{Document, Glyph};
    use kurbo::Shape;

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    fn port_with_square() -> (ViewPort<OffscreenSurface>, Scheme) {
        let mut document = Document::new();
        document.add_top(Glyph::rect(Dimensions::new(10.0, 10.0, 20.0, 20.0)));
        let shared = document.into_shared();
        let mut port = ViewPort::new(OffscreenSurface::new(400.0, 300.0));
        port.set_model(shared.clone());
        (port, Scheme::new(shared))
    }

    #[test]
    fn device_and_user_coordinates_invert() {
        let view = ViewTransform {
            zoom: 2.0,
            offset: Vec2::new(10.0, -5.0),
        };
        let user = Point::new(3.0, 4.0);
        assert_eq!(view.user_to_device(user), Point::new(16.0, 3.0));
        assert!(close(view.device_to_user(view.user_to_device(user)), user));
    }

    #[test]
    fn zoom_keeps_the_point_under_the_pointer() {
        let mut view = ViewTransform::default();
        let device = Point::new(100.0, 50.0);
        let before = view.device_to_user(device);
        view.zoom_around(1.25, device);
        assert!((view.zoom - 1.25).abs() < 1e-12);
        assert!(close(view.device_to_user(device), before));

        for _ in 0..100 {
            view.zoom_around(10.0, device);
        }
        assert_eq!(view.zoom, settings::view::MAX_ZOOM);
    }

    #[test]
    fn expose_draws_layers_in_order() {
        let (mut port, mut scheme) = port_with_square();
        port.view_mut().zoom = 2.0;
        let mut damage: Vec<Dimensions> = Vec::new();
        scheme
            .open_popup_menu(&["a"], Point::new(300.0, 250.0), &mut damage)
            .unwrap();
        let mut ruler = build_popup_menu(&["r"]);
        {
            let document = crate::model::read_document(scheme.document());
            ruler
                .open(None, &document, Point::new(100.0, 100.0), &mut damage)
                .unwrap();
        }
        scheme.add_transformed_control(ruler);
        scheme
            .open_handle_menu(Point::new(30.0, 20.0), &mut damage)
            .unwrap();

        port.expose(&scheme).unwrap();
        let frame = port.surface().frame();
        let colors: Vec<_> = frame.iter().map(|op| op.color).collect();
        assert_eq!(colors.len(), 4);
        assert_eq!(colors[0], theme::control::MENU_STROKE);
        assert_eq!(colors[1], theme::control::MENU_STROKE);
        assert_eq!(colors[2], theme::glyph::HIGHLIGHT);
        assert_eq!(colors[3], theme::control::HANDLE_STROKE);

        // The popup is untransformed; the transformed control and the
        // model are zoomed.
        assert!(frame[0].path.bounding_box().contains(Point::new(300.0, 250.0)));
        assert!(frame[1].path.bounding_box().contains(Point::new(200.0, 200.0)));
        assert_eq!(
            frame[2].path.bounding_box(),
            Rect::new(20.0, 20.0, 60.0, 60.0)
        );
        assert_eq!(
            frame[2].kind,
            PaintKind::Stroke {
                width: 2.0 * theme::size::GLYPH_LINE_WIDTH
            }
        );
    }

    #[test]
    fn every_expose_uses_a_fresh_context() {
        let (mut port, scheme) = port_with_square();
        port.expose(&scheme).unwrap();
        port.expose(&scheme).unwrap();
        assert_eq!(port.surface().frame_count(), 2);
        assert_eq!(port.surface().frame().len(), 1);
    }

    #[test]
    fn expose_without_model_fails() {
        let (_, scheme) = port_with_square();
        let mut port = ViewPort::new(OffscreenSurface::new(10.0, 10.0));
        assert_eq!(port.expose(&scheme), Err(PortError::NoModel));
        assert_eq!(port.surface().frame_count(), 0);
    }

    #[test]
    fn damage_is_mapped_to_device_rectangles() {
        let (mut port, _) = port_with_square();
        *port.view_mut() = ViewTransform {
            zoom: 1.5,
            offset: Vec2::new(5.0, 0.0),
        };
        port.invalidate_rect(Dimensions::new(1.0, 1.0, 3.0, 3.0));
        assert_eq!(port.surface().damage(), [Rect::new(6.0, 1.0, 11.0, 6.0)]);

        port.invalidate();
        assert_eq!(port.surface().damage()[1], Rect::new(0.0, 0.0, 400.0, 300.0));
    }

    #[test]
    fn zoom_invalidates_the_whole_port() {
        let (mut port, _) = port_with_square();
        port.zoom(false, Point::new(10.0, 10.0));
        assert_eq!(port.view().zoom, settings::view::ZOOM_STEP);
        assert!(close(port.user_to_device(Point::new(10.0, 10.0)), Point::new(10.0, 10.0)));
        assert_eq!(port.surface_mut().take_damage().len(), 1);
    }
}
