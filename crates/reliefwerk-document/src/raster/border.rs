// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Border detection — finds the uniform non-content margin on each edge of a
// raster without prior knowledge of its width or colour.
//
// PDFs exported by CAD tools usually frame the trace layout in a page-sized
// border. Its width depends on the page and the export settings, so it has
// to be measured from the content: an edge line belongs to the border while
// its set of distinct pixel values matches the outermost line's set, and the
// border ends at the first line whose set differs.

use image::GrayImage;
use reliefwerk_core::error::{ReliefwerkError, Result};
use reliefwerk_core::types::Padding;
use tracing::{debug, instrument, warn};

/// Distinct-pixel-value set of one row or column, as a 256-slot membership
/// table.
type ValueSet = [bool; 256];

/// Measure the uniform border on all four edges of a grayscale raster.
///
/// Each edge is scanned independently from the outside in. An edge has a
/// border only if its outermost line is uniform (a single distinct value);
/// the border is then the run of lines whose distinct-value set matches it,
/// so a border of width `w` reports exactly `w`. A single scan never
/// consumes the last line of the image.
///
/// Fails with [`ReliefwerkError::NoContent`] when the detected margins
/// would leave no rows or no columns — the degenerate case of an image that
/// is uniform everywhere.
#[instrument(skip(gray), fields(width = gray.width(), height = gray.height()))]
pub fn detect_padding(gray: &GrayImage) -> Result<Padding> {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return Err(ReliefwerkError::Image("cannot scan an empty raster".into()));
    }

    let width = width as usize;
    let height = height as usize;

    let padding = Padding {
        top: scan_edge(height, |i| row_values(gray, i as u32)),
        bottom: scan_edge(height, |i| row_values(gray, (height - 1 - i) as u32)),
        left: scan_edge(width, |i| column_values(gray, i as u32)),
        right: scan_edge(width, |i| column_values(gray, (width - 1 - i) as u32)),
    };

    if padding.vertical() >= height || padding.horizontal() >= width {
        warn!(
            ?padding,
            "border scan consumed the whole raster; the image has no content"
        );
        return Err(ReliefwerkError::NoContent);
    }

    debug!(
        top = padding.top,
        bottom = padding.bottom,
        left = padding.left,
        right = padding.right,
        "Border padding detected"
    );

    Ok(padding)
}

/// Scan a single edge inward and return the border width in lines.
///
/// `line(0)` is the outermost line of the edge; `line(i)` the i-th line
/// walking inward. The scan is clamped so the final line is never counted.
fn scan_edge<F>(len: usize, line: F) -> usize
where
    F: Fn(usize) -> ValueSet,
{
    let outer = line(0);
    if !is_uniform(&outer) {
        // Content reaches the image edge; there is no border here.
        return 0;
    }

    let mut border = 1;
    while border + 1 < len {
        if line(border) != outer {
            break;
        }
        border += 1;
    }
    border
}

fn is_uniform(set: &ValueSet) -> bool {
    set.iter().filter(|&&present| present).count() == 1
}

fn row_values(gray: &GrayImage, y: u32) -> ValueSet {
    let mut set = [false; 256];
    for x in 0..gray.width() {
        set[gray.get_pixel(x, y).0[0] as usize] = true;
    }
    set
}

fn column_values(gray: &GrayImage, x: u32) -> ValueSet {
    let mut set = [false; 256];
    for y in 0..gray.height() {
        set[gray.get_pixel(x, y).0[0] as usize] = true;
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    /// White canvas with a black rectangle covering `rows` × `cols`.
    fn image_with_rect(
        width: u32,
        height: u32,
        rows: std::ops::Range<u32>,
        cols: std::ops::Range<u32>,
    ) -> GrayImage {
        let mut img = GrayImage::from_pixel(width, height, Luma([255u8]));
        for y in rows {
            for x in cols.clone() {
                img.put_pixel(x, y, Luma([0u8]));
            }
        }
        img
    }

    #[test]
    fn ten_pixel_frame_yields_padding_ten_on_every_edge() {
        // 100x100 white image with a 10 px black frame: the outer 10 rows and
        // columns are uniformly black, row/column 10 mixes black and white.
        let mut img = GrayImage::from_pixel(100, 100, Luma([0u8]));
        for y in 10..90 {
            for x in 10..90 {
                img.put_pixel(x, y, Luma([255u8]));
            }
        }

        let padding = detect_padding(&img).unwrap();
        assert_eq!(
            padding,
            Padding {
                top: 10,
                bottom: 10,
                left: 10,
                right: 10
            }
        );
    }

    #[test]
    fn detector_crops_to_the_content_bounding_box() {
        // Black rectangle at rows 8..13, cols 10..21 of a 30x20 white image.
        let img = image_with_rect(30, 20, 8..13, 10..21);

        let padding = detect_padding(&img).unwrap();
        assert_eq!(padding.top, 8);
        assert_eq!(padding.bottom, 7);
        assert_eq!(padding.left, 10);
        assert_eq!(padding.right, 9);
    }

    #[test]
    fn checkerboard_has_no_border_on_any_edge() {
        let img = GrayImage::from_fn(16, 16, |x, y| {
            if (x + y) % 2 == 0 {
                Luma([0u8])
            } else {
                Luma([255u8])
            }
        });

        let padding = detect_padding(&img).unwrap();
        assert_eq!(padding, Padding::default());
    }

    #[test]
    fn fully_uniform_image_is_rejected_as_contentless() {
        let img = GrayImage::from_pixel(40, 40, Luma([255u8]));
        let err = detect_padding(&img).unwrap_err();
        assert!(matches!(err, ReliefwerkError::NoContent));
    }

    #[test]
    fn empty_raster_is_rejected() {
        let img = GrayImage::new(0, 0);
        assert!(detect_padding(&img).is_err());
    }
}
