// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! The file port: saves the whole model as SVG or PNG.
//!
//! The model is first recorded into a display list with a
//! `SceneContext`. SVG output writes each recorded path as a `<path>`
//! element; PNG output rasterizes the list with tiny-skia onto an opaque
//! white canvas and encodes it with the `image` crate.

use super::Port;
use crate::alert::AlertSink;
use crate::context::{PaintKind, PaintOp, SceneContext};
use crate::error::{ExportError, PortError};
use crate::model::SharedDocument;
use crate::settings;
use crate::theme;
use kurbo::{BezPath, PathEl};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Canvas size of exported files, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            width: settings::export::WIDTH,
            height: settings::export::HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    Png,
}

impl ExportFormat {
    /// Format named by the file extension of `path`
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .unwrap_or_default();
        if extension.eq_ignore_ascii_case("svg") {
            Ok(ExportFormat::Svg)
        } else if extension.eq_ignore_ascii_case("png") {
            Ok(ExportFormat::Png)
        } else {
            Err(ExportError::UnsupportedExtension(format!(".{extension}")))
        }
    }
}

#[derive(Debug, Default)]
pub struct FilePort {
    model: Option<SharedDocument>,
    settings: ExportSettings,
}

impl FilePort {
    pub fn new(settings: ExportSettings) -> Self {
        Self {
            model: None,
            settings,
        }
    }

    pub fn settings(&self) -> ExportSettings {
        self.settings
    }

    /// Record the model into a display list
    pub fn render(&self) -> Result<Vec<PaintOp>, PortError> {
        let mut context = SceneContext::new();
        self.draw_model(&mut context)?;
        Ok(context.into_ops())
    }

    /// Save the model to `path` in the format its extension names.
    ///
    /// Nothing is written when the extension is not supported.
    pub fn save(&self, path: &Path) -> Result<(), ExportError> {
        let format = ExportFormat::from_path(path)?;
        let ops = self.render()?;
        let ExportSettings { width, height } = self.settings;
        match format {
            ExportFormat::Svg => {
                let svg = svg_document(&ops, width, height);
                std::fs::write(path, svg).map_err(|source| ExportError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
            }
            ExportFormat::Png => {
                let image = rasterize(&ops, width, height)?;
                image
                    .save_with_format(path, image::ImageFormat::Png)
                    .map_err(|source| ExportError::Encode {
                        path: path.to_path_buf(),
                        source,
                    })?;
            }
        }
        tracing::info!("Saved {}", path.display());
        Ok(())
    }

    /// Save, reporting any failure to `alerts`. Returns true if the file
    /// was written.
    pub fn do_save(&self, path: &Path, alerts: &mut dyn AlertSink) -> bool {
        match self.save(path) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!("save to {} failed: {err}", path.display());
                alerts.alert(err.to_alert());
                false
            }
        }
    }
}

impl Port for FilePort {
    fn model(&self) -> Option<&SharedDocument> {
        self.model.as_ref()
    }

    fn set_model(&mut self, model: SharedDocument) {
        self.model = Some(model);
    }
}

// ============================================================================
// SVG
// ============================================================================

fn svg_color(color: Color) -> (String, f32) {
    let rgba = color.to_rgba8();
    (
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b),
        f32::from(rgba.a) / 255.0,
    )
}

fn svg_document(ops: &[PaintOp], width: u32, height: u32) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    svg.push('\n');
    for op in ops {
        let (color, opacity) = svg_color(op.color);
        let paint = match op.kind {
            PaintKind::Fill => format!(r#"fill="{color}" fill-opacity="{opacity}""#),
            PaintKind::Stroke { width } => format!(
                r#"fill="none" stroke="{color}" stroke-opacity="{opacity}" stroke-width="{width}""#
            ),
        };
        svg.push_str(&format!(
            "  <path d=\"{}\" {paint}/>\n",
            op.path.to_svg()
        ));
    }
    svg.push_str("</svg>\n");
    svg
}

// ============================================================================
// RASTER
// ============================================================================

fn skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = tiny_skia::PathBuilder::new();
    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                builder.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => builder.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

/// Paint `ops` onto a `width` x `height` white canvas
pub fn rasterize(ops: &[PaintOp], width: u32, height: u32) -> Result<image::RgbImage, ExportError> {
    let out_of_memory = || ExportError::OutOfMemory { width, height };
    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(out_of_memory)?;
    let background = theme::canvas::BACKGROUND.to_rgba8();
    pixmap.fill(tiny_skia::Color::from_rgba8(
        background.r,
        background.g,
        background.b,
        255,
    ));

    for op in ops {
        let Some(path) = skia_path(&op.path) else {
            continue;
        };
        let rgba = op.color.to_rgba8();
        let mut paint = tiny_skia::Paint::default();
        paint.set_color_rgba8(rgba.r, rgba.g, rgba.b, rgba.a);
        paint.anti_alias = true;
        match op.kind {
            PaintKind::Fill => pixmap.fill_path(
                &path,
                &paint,
                tiny_skia::FillRule::Winding,
                tiny_skia::Transform::identity(),
                None,
            ),
            PaintKind::Stroke { width } => {
                let stroke = tiny_skia::Stroke {
                    width: width as f32,
                    ..Default::default()
                };
                pixmap.stroke_path(&path, &paint, &stroke, tiny_skia::Transform::identity(), None);
            }
        }
    }

    // The canvas is opaque, so premultiplied and straight alpha agree.
    let rgba = image::RgbaImage::from_raw(width, height, pixmap.take()).ok_or_else(out_of_memory)?;
    Ok(image::DynamicImage::ImageRgba8(rgba).to_rgb8())
}
