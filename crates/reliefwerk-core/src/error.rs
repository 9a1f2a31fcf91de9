// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Reliefwerk.

use thiserror::Error;

/// Top-level error type for all Reliefwerk operations.
///
/// Every failure in the pipeline is a deterministic function of its input;
/// nothing here is retried, and no output file is written once any of these
/// has been raised.
#[derive(Debug, Error)]
pub enum ReliefwerkError {
    // -- Input errors --
    #[error("input not found: {0}")]
    NotFound(String),

    #[error("expected a single-page document, got {actual} pages")]
    PageCount { actual: usize },

    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),

    // -- Raster errors --
    #[error("unsupported raster shape: {0}")]
    Shape(String),

    #[error("image is uniform everywhere, no content to convert")]
    NoContent,

    #[error("image processing failed: {0}")]
    Image(String),

    // -- Mesh errors --
    #[error("output dimensions must be positive: {0}")]
    Dimension(String),

    #[error("mesh generation failed: {0}")]
    Mesh(String),

    // -- External collaborators --
    #[error("PDF rendering failed: {0}")]
    Render(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ReliefwerkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_message_names_the_actual_count() {
        let err = ReliefwerkError::PageCount { actual: 7 };
        assert_eq!(
            err.to_string(),
            "expected a single-page document, got 7 pages"
        );
    }

    #[test]
    fn io_errors_convert_via_from() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ReliefwerkError = io.into();
        assert!(matches!(err, ReliefwerkError::Io(_)));
    }
}
