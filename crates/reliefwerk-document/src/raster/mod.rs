// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster module — border detection and binary mask preprocessing.

pub mod border;
pub mod mask;

pub use border::detect_padding;
pub use mask::{BinaryMask, preprocess};

use image::DynamicImage;
use reliefwerk_core::config::PreprocessOptions;
use reliefwerk_core::error::Result;
use reliefwerk_core::types::Padding;
use tracing::instrument;

/// Detect the border of a raster and preprocess it into a binary mask.
///
/// Border detection runs on the grayscale projection of the raster; the
/// returned padding has already been applied to the mask.
#[instrument(skip(image, options), fields(width = image.width(), height = image.height()))]
pub fn prepare_mask(
    image: &DynamicImage,
    options: &PreprocessOptions,
) -> Result<(BinaryMask, Padding)> {
    let padding = detect_padding(&image.to_luma8())?;
    let mask = preprocess(image, &padding, options)?;
    Ok((mask, padding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use reliefwerk_core::config::BinarizeMode;

    /// The reference scenario: a 100x100 white image with a 10 px black
    /// frame must crop to an 80x80 mask with padding 10 on every edge.
    #[test]
    fn framed_page_crops_to_eighty_square() {
        let mut img = GrayImage::from_pixel(100, 100, Luma([0u8]));
        for y in 10..90 {
            for x in 10..90 {
                img.put_pixel(x, y, Luma([255u8]));
            }
        }

        let options = PreprocessOptions {
            invert: false,
            mirror_horizontal: false,
            mirror_vertical: false,
            binarize: BinarizeMode::Fixed(128),
        };
        let (mask, padding) =
            prepare_mask(&DynamicImage::ImageLuma8(img), &options).unwrap();

        assert_eq!(
            padding,
            Padding {
                top: 10,
                bottom: 10,
                left: 10,
                right: 10
            }
        );
        assert_eq!(mask.width(), 80);
        assert_eq!(mask.height(), 80);
        for y in 0..80 {
            for x in 0..80 {
                assert!(mask.get(x, y), "pixel ({x}, {y}) should be solid white");
            }
        }
    }

    #[test]
    fn uniform_page_is_rejected_before_preprocessing() {
        let img = GrayImage::from_pixel(64, 64, Luma([255u8]));
        let err = prepare_mask(
            &DynamicImage::ImageLuma8(img),
            &PreprocessOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            reliefwerk_core::ReliefwerkError::NoContent
        ));
    }
}
