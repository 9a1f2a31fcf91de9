// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// reliefwerk-document — Document and raster processing for the Reliefwerk
// converter.
//
// Provides the PDF rasterizer adapter (render page 1 of a single-page
// document at a chosen DPI), content-driven border detection, and the
// preprocessing chain that turns a raster into a cropped, oriented binary
// mask ready for extrusion.

pub mod pdf;
pub mod raster;

// Re-export the primary entry points so callers can use
// `reliefwerk_document::PdfRasterizer` etc.
pub use pdf::rasterizer::PdfRasterizer;
pub use raster::border::detect_padding;
pub use raster::mask::{BinaryMask, preprocess};
pub use raster::prepare_mask;
