// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! Morph identity.
//!
//! Glyphs and composites take an id when they are built and keep it for
//! life, through moves, resizes and regrouping. Handle menus, focus and
//! drags name their target by id and resolve it against the `Document`
//! on every event.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Handle on one morph of a document tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

/// Next id to hand out; zero is never issued
static NEXT_MORPH: AtomicU64 = AtomicU64::new(1);

impl NodeId {
    /// Issue an id no other morph in this process carries
    pub fn next() -> Self {
        Self(NEXT_MORPH.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "morph #{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_morph_gets_its_own_id() {
        let a = NodeId::next();
        let b = NodeId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn ids_display_as_morph_numbers() {
        let id = NodeId::next();
        let text = id.to_string();
        assert!(text.starts_with("morph #"));
        assert_ne!(text, "morph #0");
    }
}
