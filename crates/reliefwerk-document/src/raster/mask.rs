// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Binary mask preprocessing — channel collapse, binarization, border crop,
// inversion, and mirroring. Operates on in-memory rasters decoded by the
// `image` crate; threshold selection uses `imageproc`.

use image::DynamicImage;
use imageproc::contrast::otsu_level;
use reliefwerk_core::config::{BinarizeMode, PreprocessOptions};
use reliefwerk_core::error::{ReliefwerkError, Result};
use reliefwerk_core::types::Padding;
use tracing::{debug, info, instrument};

/// A black-and-white plane, one boolean per pixel, row-major, origin
/// top-left. `true` marks a solid pixel.
///
/// All transformations are non-destructive: each method consumes `self` and
/// returns a new mask, enabling method chaining in pipeline order:
///
/// ```ignore
/// let mask = BinaryMask::from_image(&raster, BinarizeMode::Otsu)?
///     .crop(&padding)?
///     .mirror_vertical();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: usize,
    height: usize,
    data: Vec<bool>,
}

impl BinaryMask {
    // -- Construction ---------------------------------------------------------

    /// Build a mask from raw row-major booleans.
    ///
    /// Intended for tests and for synthetic masks; pipeline code goes through
    /// [`BinaryMask::from_image`].
    pub fn from_raw(width: usize, height: usize, data: Vec<bool>) -> Result<Self> {
        if data.len() != width * height {
            return Err(ReliefwerkError::Shape(format!(
                "{} values cannot fill a {width}x{height} mask",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Collapse a decoded raster to a boolean plane.
    ///
    /// Grayscale rasters (with or without alpha) are thresholded per `mode`.
    /// Colour rasters are collapsed per pixel: the mean of the colour
    /// channels above the channel midpoint becomes solid. Anything else is
    /// an unsupported shape.
    #[instrument(skip(image), fields(color = ?image.color()))]
    pub fn from_image(image: &DynamicImage, mode: BinarizeMode) -> Result<Self> {
        use image::ColorType::*;

        match image.color() {
            L8 | L16 | La8 | La16 => {
                let gray = image.to_luma8();
                let threshold = match mode {
                    BinarizeMode::Otsu => otsu_level(&gray),
                    BinarizeMode::Fixed(value) => value,
                };
                debug!(threshold, "Binarizing grayscale raster");

                let (width, height) = gray.dimensions();
                let data = gray.pixels().map(|px| px.0[0] > threshold).collect();
                Self::from_raw(width as usize, height as usize, data)
            }
            Rgb8 | Rgba8 | Rgb16 | Rgba16 => {
                debug!("Collapsing colour raster at the channel midpoint");

                let rgb = image.to_rgb8();
                let (width, height) = rgb.dimensions();
                let data = rgb
                    .pixels()
                    .map(|px| {
                        let [r, g, b] = px.0;
                        let mean = (r as f32 + g as f32 + b as f32) / 3.0;
                        mean > 127.5
                    })
                    .collect();
                Self::from_raw(width as usize, height as usize, data)
            }
            other => Err(ReliefwerkError::Shape(format!(
                "cannot binarize a {other:?} raster"
            ))),
        }
    }

    // -- Accessors ------------------------------------------------------------

    /// Mask width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Mask height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at (x, y). Callers must stay in bounds.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.width + x]
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Remove the detected border margins.
    ///
    /// The copy is an explicit bounded loop over the retained index ranges;
    /// the output dimensions are always the input dimensions minus the
    /// padding on each axis.
    pub fn crop(self, padding: &Padding) -> Result<Self> {
        if padding.vertical() >= self.height || padding.horizontal() >= self.width {
            return Err(ReliefwerkError::Image(format!(
                "padding {padding:?} leaves no pixels in a {}x{} mask",
                self.width, self.height
            )));
        }

        let width = self.width - padding.horizontal();
        let height = self.height - padding.vertical();
        let mut data = Vec::with_capacity(width * height);

        for y in padding.top..self.height - padding.bottom {
            for x in padding.left..self.width - padding.right {
                data.push(self.get(x, y));
            }
        }

        debug!(width, height, "Mask cropped");
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Flip every pixel between solid and empty.
    pub fn invert(self) -> Self {
        Self {
            data: self.data.iter().map(|&solid| !solid).collect(),
            ..self
        }
    }

    /// Reverse column order (left-right flip).
    pub fn mirror_horizontal(self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for y in 0..self.height {
            for x in (0..self.width).rev() {
                data.push(self.get(x, y));
            }
        }
        Self { data, ..self }
    }

    /// Reverse row order (top-bottom flip).
    pub fn mirror_vertical(self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                data.push(self.get(x, y));
            }
        }
        Self { data, ..self }
    }
}

/// Run the full preprocessing chain: collapse, crop, then the optional
/// orientation transforms, in that order.
#[instrument(skip(image, padding), fields(width = image.width(), height = image.height()))]
pub fn preprocess(
    image: &DynamicImage,
    padding: &Padding,
    options: &PreprocessOptions,
) -> Result<BinaryMask> {
    info!(?options, "Preprocessing raster");

    let mut mask = BinaryMask::from_image(image, options.binarize)?.crop(padding)?;

    if options.invert {
        mask = mask.invert();
    }
    if options.mirror_horizontal {
        mask = mask.mirror_horizontal();
    }
    if options.mirror_vertical {
        mask = mask.mirror_vertical();
    }

    Ok(mask)
}
