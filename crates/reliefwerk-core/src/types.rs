// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Reliefwerk converter.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReliefwerkError, Result};

/// Supported input document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    /// Vector document rendered through the PDF rasterizer.
    Pdf,
    Png,
    Jpeg,
    Tiff,
}

impl DocumentType {
    /// Infer document type from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "tif" | "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }

    /// Infer document type from a path, failing on unknown extensions.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| ReliefwerkError::UnsupportedFormat(path.display().to_string()))
    }

    /// Whether this input must pass through the PDF rasterizer first.
    pub fn needs_rendering(&self) -> bool {
        matches!(self, Self::Pdf)
    }
}

/// Uniform non-content margins detected around the image content, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

impl Padding {
    /// Total rows removed (top + bottom).
    pub fn vertical(&self) -> usize {
        self.top + self.bottom
    }

    /// Total columns removed (left + right).
    pub fn horizontal(&self) -> usize {
        self.left + self.right
    }
}

/// Physical bounding box of the output mesh, in millimetres.
///
/// Construction validates that all three lengths are strictly positive, so an
/// invalid request is rejected before any rendering or extraction work starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputDimensions {
    width: f64,
    depth: f64,
    height: f64,
}

impl OutputDimensions {
    /// Create a validated set of output dimensions.
    pub fn new(width: f64, depth: f64, height: f64) -> Result<Self> {
        if width <= 0.0 || depth <= 0.0 || height <= 0.0 {
            return Err(ReliefwerkError::Dimension(format!(
                "width = {width}, depth = {depth}, height = {height}"
            )));
        }
        Ok(Self {
            width,
            depth,
            height,
        })
    }

    /// Physical extent along the mask's column axis.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Physical extent along the mask's row axis.
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Physical extent along the extrusion axis.
    pub fn height(&self) -> f64 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_type_from_known_extensions() {
        assert_eq!(DocumentType::from_extension("pdf"), Some(DocumentType::Pdf));
        assert_eq!(DocumentType::from_extension("PNG"), Some(DocumentType::Png));
        assert_eq!(
            DocumentType::from_extension("jpeg"),
            Some(DocumentType::Jpeg)
        );
        assert_eq!(
            DocumentType::from_extension("tif"),
            Some(DocumentType::Tiff)
        );
        assert_eq!(DocumentType::from_extension("svg"), None);
    }

    #[test]
    fn document_type_from_path_rejects_unknown() {
        let err = DocumentType::from_path("board.gerber").unwrap_err();
        assert!(matches!(err, ReliefwerkError::UnsupportedFormat(_)));

        let ok = DocumentType::from_path("samples/board.pdf").unwrap();
        assert!(ok.needs_rendering());
    }

    #[test]
    fn padding_sums() {
        let pad = Padding {
            top: 3,
            bottom: 4,
            left: 5,
            right: 6,
        };
        assert_eq!(pad.vertical(), 7);
        assert_eq!(pad.horizontal(), 11);
    }

    #[test]
    fn output_dimensions_reject_non_positive_values() {
        assert!(OutputDimensions::new(0.0, 10.0, 1.0).is_err());
        assert!(OutputDimensions::new(18.0, -25.0, 1.0).is_err());
        assert!(OutputDimensions::new(18.0, 25.0, 0.0).is_err());

        let dims = OutputDimensions::new(18.0, 25.0, 1.0).unwrap();
        assert_eq!(dims.width(), 18.0);
        assert_eq!(dims.depth(), 25.0);
        assert_eq!(dims.height(), 1.0);
    }
}
