// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — rendering single-page documents to rasters.

pub mod rasterizer;

pub use rasterizer::PdfRasterizer;
