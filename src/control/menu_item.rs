// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! Items of popup menus.

use super::group::{ControlItem, ItemGroup};
use crate::context::DrawContext;
use crate::drawable::{Damage, Drawable, DrawableCore};
use crate::geometry::Dimensions;
use crate::model::Glyph;
use crate::settings::control::ITEM_SIZE;
use crate::style::Style;
use kurbo::{Point, Vec2};

pub type MenuGroup = ItemGroup<MenuItem>;

/// A labelled square in a popup menu
#[derive(Debug, Clone)]
pub struct MenuItem {
    label: String,
    glyph: Glyph,
}

impl MenuItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            glyph: Glyph::rect(Dimensions::new(0.0, 0.0, ITEM_SIZE, ITEM_SIZE))
                .with_style(Style::menu()),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Drawable for MenuItem {
    fn core(&self) -> &DrawableCore {
        self.glyph.core()
    }

    fn core_mut(&mut self) -> &mut DrawableCore {
        self.glyph.core_mut()
    }

    fn invalidate(&self, damage: &mut dyn Damage) {
        self.glyph.invalidate(damage);
    }

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

impl ControlItem for MenuItem {
    const SHOWS_ACTIVE_ONLY: bool = false;
    const FOLLOWS_CONTROLEE: bool = false;
}
