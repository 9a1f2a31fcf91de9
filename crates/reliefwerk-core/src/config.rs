// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion configuration.

use serde::{Deserialize, Serialize};

/// How a grayscale raster is reduced to black and white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinarizeMode {
    /// Pick the threshold automatically from the image histogram.
    Otsu,
    /// Use a fixed cut-off: pixels strictly above the value become solid.
    Fixed(u8),
}

/// Options applied by the preprocessor after border removal.
///
/// This is an explicit record rather than implicit defaults baked into the
/// pipeline functions; callers always pass the whole set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessOptions {
    /// Flip solid and empty pixels.
    pub invert: bool,
    /// Reverse column order (left-right flip).
    pub mirror_horizontal: bool,
    /// Reverse row order (top-bottom flip). On by default: resin printers
    /// need the mask flipped relative to the source's top-left origin.
    pub mirror_vertical: bool,
    /// Threshold selection for grayscale inputs.
    pub binarize: BinarizeMode,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            invert: false,
            mirror_horizontal: false,
            mirror_vertical: true,
            binarize: BinarizeMode::Otsu,
        }
    }
}

/// Settings for one document-to-mesh conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Render resolution for PDF inputs, in dots per inch.
    ///
    /// Higher values increase trace fidelity, but the intermediate volume
    /// grows with dpi² × layers, so memory is the limiting factor: an A4
    /// page at 400 DPI is roughly 3300 × 4700 pixels, or about 230 MB of
    /// volume at the default thickness.
    pub dpi: u32,
    /// Number of voxel layers the mask is extruded through (minimum 1).
    pub layers: usize,
    /// Preprocessing applied to the raster before extrusion.
    pub preprocess: PreprocessOptions,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            // 400 is a good fidelity/memory trade-off for typical trace work.
            dpi: 400,
            layers: 3,
            preprocess: PreprocessOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_pipeline() {
        let config = ConvertConfig::default();
        assert_eq!(config.dpi, 400);
        assert_eq!(config.layers, 3);
        assert!(!config.preprocess.invert);
        assert!(!config.preprocess.mirror_horizontal);
        assert!(config.preprocess.mirror_vertical);
        assert_eq!(config.preprocess.binarize, BinarizeMode::Otsu);
    }
}
