// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! Document model: glyphs, composites and the morph tree

pub mod composite;
pub mod document;
pub mod glyph;
pub mod morph;
pub mod node_id;

pub use composite::CompositeGlyph;
pub use document::{Document, SharedDocument, read_document, write_document};
pub use glyph::{Glyph, GlyphShape};
pub use morph::Morph;
pub use node_id::NodeId;
