// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! The standard controls of the application.

use super::handle::{HandleGroup, HandleItem, HandleKind};
use super::menu_item::{MenuGroup, MenuItem};
use crate::style::Style;

/// What a handle menu is opened on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleTarget {
    /// A morph in the document
    Morph,
    /// The document background, standing for the view
    View,
}

/// Move, a target-specific move item, and resize. The middle item is
/// shown first.
pub fn build_handle_menu(target: HandleTarget) -> HandleGroup {
    let middle = match target {
        HandleTarget::Morph => HandleKind::MoveMorph,
        HandleTarget::View => HandleKind::MoveView,
    };
    HandleGroup::new(
        vec![
            HandleItem::new(HandleKind::Move),
            HandleItem::new(middle),
            HandleItem::new(HandleKind::Resize),
        ],
        Style::handle(),
    )
}

pub fn build_popup_menu<S: AsRef<str>>(labels: &[S]) -> MenuGroup {
    MenuGroup::new(
        labels
            .iter()
            .map(|label| MenuItem::new(label.as_ref()))
            .collect(),
        Style::menu(),
    )
}
