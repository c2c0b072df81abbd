// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! Pensketch: the drawable scenegraph, control menus and drawing ports of
//! a vector graphics editor

use anyhow::Context;
use kurbo::Point;
use std::path::PathBuf;

pub mod alert;
pub mod config;
pub mod context;
pub mod control;
pub mod drawable;
pub mod error;
pub mod geometry;
pub mod model;
pub mod port;
pub mod scheme;
pub mod settings;
pub mod style;
pub mod theme;

use alert::Alert;
use config::Config;
use geometry::Dimensions;
use model::{CompositeGlyph, Document, Glyph, Morph};
use port::{FilePort, OffscreenSurface, Port, ViewPort};
use scheme::Scheme;

/// Output file used when none is given on the command line
const DEFAULT_OUTPUT: &str = "pensketch.png";

/// Entry point of the headless driver: draws a demo document into an
/// offscreen view and exports it.
///
/// Usage: `pensketch [OUTPUT.png|OUTPUT.svg] [CONFIG.toml]`
pub fn run() -> anyhow::Result<()> {
    // Initialize tracing subscriber (can be controlled via RUST_LOG env var)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pensketch=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (output, config_path) = handle_command_line_args();
    let config = Config::load_or_default(&config_path)?;

    let document = demo_document().into_shared();
    let mut scheme = Scheme::new(document.clone());

    let mut view = ViewPort::new(OffscreenSurface::new(800.0, 600.0))
        .with_zoom_step(config.view.zoom_step);
    view.set_model(document.clone());

    // Open a handle menu on the right edge of the first group.
    scheme
        .open_handle_menu(Point::new(120.0, 60.0), &mut view)
        .context("Failed to open handle menu")?;
    view.expose(&scheme).context("Failed to draw view")?;
    tracing::info!(
        "Drew frame {} with {} paint operations",
        view.surface().frame_count(),
        view.surface().frame().len()
    );

    let mut file_port = FilePort::new(config.export);
    file_port.set_model(document);
    let mut alerts: Vec<Alert> = scheme.take_alerts();
    let saved = file_port.do_save(&output, &mut alerts);
    if !saved {
        anyhow::bail!("Failed to save {}", output.display());
    }
    Ok(())
}

/// Output path and config path from the command line
fn handle_command_line_args() -> (PathBuf, PathBuf) {
    let mut args = std::env::args().skip(1);
    let output = args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let config = args
        .next()
        .unwrap_or_else(|| config::CONFIG_FILE.to_string());
    (PathBuf::from(output), PathBuf::from(config))
}

/// A group of a square and a circle, plus a loose diagonal line
fn demo_document() -> Document {
    let mut document = Document::new();
    let group = CompositeGlyph::with_children([
        Morph::from(Glyph::rect(Dimensions::new(20.0, 20.0, 100.0, 80.0))),
        Morph::from(Glyph::ellipse(Dimensions::new(60.0, 120.0, 60.0, 60.0)).filled(true)),
    ]);
    document.add_top(group);
    document.add_top(Glyph::line(Point::new(150.0, 20.0), Point::new(190.0, 180.0)));
    document
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_document_has_a_group_and_a_line() {
        let document = demo_document();
        let top = document.root().children();
        assert_eq!(top.len(), 2);
        assert!(!top[0].is_primitive());
        assert!(top[1].is_primitive());
        assert_eq!(document.morph_at(Point::new(120.0, 60.0)), Some(top[0].id()));
    }
}
