// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! State carried from the start of a drag to its drop.

use crate::model::NodeId;
use kurbo::{Point, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    /// Morph being dragged
    pub draggee: NodeId,
    pub start: Point,
    /// Origin of the draggee when the drag started
    pub start_origin: Point,
    pub last: Point,
    /// Total movement since `start`
    pub offset: Vec2,
    /// Movement since the previous event
    pub increment: Vec2,
    /// Started on a handle menu item rather than on the morph itself
    pub via_handle: bool,
    /// Handle item the drag started in
    pub source_item: Option<usize>,
}

impl DragState {
    pub fn start(draggee: NodeId, point: Point, start_origin: Point) -> Self {
        Self {
            draggee,
            start: point,
            start_origin,
            last: point,
            offset: Vec2::ZERO,
            increment: Vec2::ZERO,
            via_handle: false,
            source_item: None,
        }
    }

    /// A drag that started in handle item `index`
    pub fn from_handle(mut self, index: usize) -> Self {
        self.via_handle = true;
        self.source_item = Some(index);
        self
    }

    /// Record the pointer at `point`
    pub fn advance(&mut self, point: Point) {
        self.increment = point - self.last;
        self.offset = point - self.start;
        self.last = point;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_accumulates_and_increment_is_per_event() {
        let mut drag = DragState::start(NodeId::next(), Point::new(10.0, 10.0), Point::ZERO);
        drag.advance(Point::new(15.0, 10.0));
        drag.advance(Point::new(15.0, 22.0));

        assert_eq!(drag.offset, Vec2::new(5.0, 12.0));
        assert_eq!(drag.increment, Vec2::new(0.0, 12.0));
        assert_eq!(drag.last, Point::new(15.0, 22.0));
        assert!(!drag.via_handle);
    }
}
