// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! Floating controls: handle menus and popup menus

pub mod drag;
pub mod focus;
pub mod group;
pub mod handle;
pub mod instances;
pub mod layout;
pub mod menu_item;

pub use drag::DragState;
pub use focus::Focus;
pub use group::{ControlItem, GroupState, ItemGroup};
pub use handle::{HandleGroup, HandleItem, HandleKind, Scroll};
pub use instances::{HandleTarget, build_handle_menu, build_popup_menu};
pub use layout::LayoutSpec;
pub use menu_item::{MenuGroup, MenuItem};
