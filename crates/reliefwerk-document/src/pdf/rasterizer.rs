// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF rasterizer — renders page 1 of a single-page document to an in-memory
// raster at a configurable resolution, using the `pdfium-render` crate.

use std::path::Path;

use image::DynamicImage;
use pdfium_render::prelude::*;
use reliefwerk_core::error::{ReliefwerkError, Result};
use tracing::{debug, info, instrument};

/// PDF points per inch; pdfium renders at 1 point = 1 pixel at scale 1.0.
const POINTS_PER_INCH: f32 = 72.0;

/// Renders single-page PDF documents to raster images.
///
/// Wraps a bound pdfium library instance. Rendering resolution is chosen per
/// call via a DPI value; the raster dimensions grow proportionally with it,
/// and so does everything downstream, so callers should treat DPI as the
/// memory knob of the whole pipeline.
pub struct PdfRasterizer {
    pdfium: Pdfium,
}

impl PdfRasterizer {
    // -- Construction ---------------------------------------------------------

    /// Bind the pdfium library.
    ///
    /// Searches the current directory, then `./vendor/pdfium/lib/`, then the
    /// system library paths.
    pub fn new() -> Result<Self> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
            "./",
        ))
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                "./vendor/pdfium/lib/",
            ))
        })
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|err| {
            ReliefwerkError::Render(format!("failed to load the pdfium library: {err:?}"))
        })?;

        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    // -- Rendering ------------------------------------------------------------

    /// Render page 1 of the document at `path` to a raster image at `dpi`.
    ///
    /// The document must contain exactly one page; any other count is an
    /// error carrying the actual count, not a recoverable condition.
    #[instrument(skip_all, fields(path = %path.as_ref().display(), dpi))]
    pub fn render_single_page(&self, path: impl AsRef<Path>, dpi: u32) -> Result<DynamicImage> {
        let path = path.as_ref();
        ensure_exists(path)?;

        info!("Rendering PDF");

        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|err| {
                ReliefwerkError::NotFound(format!("cannot open {}: {err:?}", path.display()))
            })?;

        let pages = document.pages();
        ensure_single_page(pages.len() as usize)?;

        let page = pages.get(0).map_err(|err| {
            ReliefwerkError::Render(format!("cannot access page 1: {err:?}"))
        })?;

        let config = PdfRenderConfig::new().scale_page_by_factor(dpi as f32 / POINTS_PER_INCH);

        let bitmap = page.render_with_config(&config).map_err(|err| {
            ReliefwerkError::Render(format!("page rasterization failed: {err:?}"))
        })?;

        let raster = bitmap.as_image();
        debug!(
            width = raster.width(),
            height = raster.height(),
            "Page rendered"
        );

        Ok(raster)
    }
}

/// Fail with the page count when a document is not exactly one page long.
pub fn ensure_single_page(count: usize) -> Result<()> {
    if count != 1 {
        return Err(ReliefwerkError::PageCount { actual: count });
    }
    Ok(())
}

/// Fail early when the input path does not exist.
pub fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ReliefwerkError::NotFound(path.display().to_string()));
    }
    Ok(())
}
