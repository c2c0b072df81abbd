// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! The morph currently under control, shown highlighted.

use crate::drawable::{Damage, Drawable};
use crate::model::{Document, NodeId};

#[derive(Debug, Clone, Default)]
pub struct Focus {
    current: Option<NodeId>,
}

impl Focus {
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Move focus to `id`, highlighting it and unhighlighting the previous
    /// focus
    pub fn focus(&mut self, id: NodeId, document: &mut Document, damage: &mut dyn Damage) {
        if self.current == Some(id) {
            return;
        }
        self.clear(document, damage);
        if let Some(morph) = document.get_mut(id) {
            morph.highlight(true, damage);
            self.current = Some(id);
        }
    }

    pub fn clear(&mut self, document: &mut Document, damage: &mut dyn Damage) {
        if let Some(previous) = self.current.take()
            && let Some(morph) = document.get_mut(previous)
        {
            morph.highlight(false, damage);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Dimensions;
    use crate::model::Glyph;

    #[test]
    fn focus_moves_the_highlight() {
        let mut document = Document::new();
        let a = document
            .add_top(Glyph::rect(Dimensions::new(0.0, 0.0, 10.0, 10.0)))
            .unwrap();
        let b = document
            .add_top(Glyph::rect(Dimensions::new(20.0, 0.0, 10.0, 10.0)))
            .unwrap();
        let mut focus = Focus::default();
        let mut damage: Vec<Dimensions> = Vec::new();

        focus.focus(a, &mut document, &mut damage);
        focus.focus(b, &mut document, &mut damage);

        assert_eq!(focus.current(), Some(b));
        assert!(!document.get(a).unwrap().core().style.is_highlighted());
        assert!(document.get(b).unwrap().core().style.is_highlighted());
        assert_eq!(damage.len(), 3);
    }
}
