// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion pipeline — wires the stages into the two user-facing flows:
// document → raster (PNG) and document/raster → mesh (STL).
//
// Each stage owns its output until it hands it to the next one; a failure at
// any point surfaces immediately and nothing is written, so an output file
// on disk always means the whole conversion succeeded.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::{info, instrument};

use reliefwerk_core::config::ConvertConfig;
use reliefwerk_core::error::{ReliefwerkError, Result};
use reliefwerk_core::types::{DocumentType, OutputDimensions};
use reliefwerk_document::pdf::rasterizer::ensure_exists;
use reliefwerk_document::{PdfRasterizer, prepare_mask};
use reliefwerk_mesh::{StlFormat, SurfaceExtractor, VolumeMask, scale_mesh, write_mesh};

/// Render a single-page PDF and persist it as PNG.
///
/// Returns the path written, `output` or a `.png` sibling of the input.
#[instrument(skip_all, fields(input = %input.display(), dpi))]
pub fn rasterize_document(input: &Path, output: Option<PathBuf>, dpi: u32) -> Result<PathBuf> {
    match DocumentType::from_path(input)? {
        DocumentType::Pdf => {}
        _ => {
            return Err(ReliefwerkError::UnsupportedFormat(format!(
                "{} is already a raster",
                input.display()
            )));
        }
    }

    let raster = PdfRasterizer::new()?.render_single_page(input, dpi)?;

    let target = output.unwrap_or_else(|| input.with_extension("png"));
    raster.save(&target).map_err(|err| {
        ReliefwerkError::Image(format!("failed to save {}: {err}", target.display()))
    })?;

    info!(output = %target.display(), "Raster written");
    Ok(target)
}

/// Convert a document or raster into an STL mesh scaled to `dimensions`.
///
/// PDF inputs are rendered at the configured DPI first; raster inputs are
/// decoded directly. The surface extractor is injected so the pipeline can
/// be exercised against a deterministic fake.
#[instrument(skip_all, fields(input = %input.display()))]
pub fn convert_document(
    input: &Path,
    output: Option<PathBuf>,
    dimensions: &OutputDimensions,
    config: &ConvertConfig,
    format: StlFormat,
    keep_raster: bool,
    extractor: &dyn SurfaceExtractor,
) -> Result<PathBuf> {
    let raster = load_raster(input, config, keep_raster)?;

    let (mask, padding) = prepare_mask(&raster, &config.preprocess)?;
    info!(
        ?padding,
        width = mask.width(),
        height = mask.height(),
        "Mask prepared"
    );

    let volume = VolumeMask::extrude(&mask, config.layers)?;
    let raw = extractor.extract(&volume)?;
    if raw.triangles.is_empty() {
        return Err(ReliefwerkError::Mesh(
            "extraction produced no surface; the mask has no empty pixels (try --invert)".into(),
        ));
    }

    let mesh = scale_mesh(raw, volume.dimensions(), dimensions)?;

    let target = output.unwrap_or_else(|| input.with_extension("stl"));
    write_mesh(&target, &mesh, format)?;

    info!(
        output = %target.display(),
        triangles = mesh.triangles.len(),
        "Conversion complete"
    );
    Ok(target)
}

/// Load the input as a raster: render PDFs, decode raster files directly.
fn load_raster(input: &Path, config: &ConvertConfig, keep_raster: bool) -> Result<DynamicImage> {
    let doc_type = DocumentType::from_path(input)?;

    if doc_type.needs_rendering() {
        let raster = PdfRasterizer::new()?.render_single_page(input, config.dpi)?;

        if keep_raster {
            let sibling = input.with_extension("png");
            raster.save(&sibling).map_err(|err| {
                ReliefwerkError::Image(format!(
                    "failed to save intermediate raster {}: {err}",
                    sibling.display()
                ))
            })?;
            info!(raster = %sibling.display(), "Intermediate raster kept");
        }

        return Ok(raster);
    }

    ensure_exists(input)?;
    image::open(input)
        .map_err(|err| ReliefwerkError::Image(format!("failed to open {}: {err}", input.display())))
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma};
    use reliefwerk_mesh::RawMesh;

    use super::*;

    /// Deterministic extractor spanning the voxel grid with two triangles.
    struct QuadExtractor;

    impl SurfaceExtractor for QuadExtractor {
        fn extract(&self, volume: &VolumeMask) -> Result<RawMesh> {
            let (nx, ny, nz) = volume.dimensions();
            let (mx, my, mz) = ((nx - 1) as f32, (ny - 1) as f32, (nz - 1) as f32);
            Ok(RawMesh {
                vertices: vec![[0.0, 0.0, 0.0], [mx, 0.0, 0.0], [mx, my, mz], [0.0, my, 0.0]],
                triangles: vec![[0, 1, 2], [0, 2, 3]],
            })
        }
    }

    /// Fails the test if the pipeline reaches extraction.
    struct UnreachableExtractor;

    impl SurfaceExtractor for UnreachableExtractor {
        fn extract(&self, _volume: &VolumeMask) -> Result<RawMesh> {
            panic!("extraction must not run for inputs rejected earlier");
        }
    }

    /// 40x40 white page with a 4 px black frame and a black dot inside.
    fn framed_png(dir: &Path) -> PathBuf {
        let mut img = GrayImage::from_pixel(40, 40, Luma([0u8]));
        for y in 4..36 {
            for x in 4..36 {
                img.put_pixel(x, y, Luma([255u8]));
            }
        }
        img.put_pixel(20, 20, Luma([0u8]));

        let path = dir.join("board.png");
        img.save(&path).unwrap();
        path
    }

    fn small_dimensions() -> OutputDimensions {
        OutputDimensions::new(18.0, 25.0, 1.0).unwrap()
    }

    #[test]
    fn raster_input_converts_and_infers_the_stl_sibling() {
        let dir = tempfile::tempdir().unwrap();
        let input = framed_png(dir.path());

        let target = convert_document(
            &input,
            None,
            &small_dimensions(),
            &ConvertConfig::default(),
            StlFormat::Binary,
            false,
            &QuadExtractor,
        )
        .unwrap();

        assert_eq!(target, dir.path().join("board.stl"));
        assert!(target.exists());
    }

    #[test]
    fn uniform_input_fails_before_extraction_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("blank.png");
        GrayImage::from_pixel(32, 32, Luma([255u8]))
            .save(&input)
            .unwrap();

        let err = convert_document(
            &input,
            None,
            &small_dimensions(),
            &ConvertConfig::default(),
            StlFormat::Binary,
            false,
            &UnreachableExtractor,
        )
        .unwrap_err();

        assert!(matches!(err, ReliefwerkError::NoContent));
        assert!(!dir.path().join("blank.stl").exists());
    }

    #[test]
    fn unknown_extensions_are_rejected_up_front() {
        let err = convert_document(
            Path::new("layout.gerber"),
            None,
            &small_dimensions(),
            &ConvertConfig::default(),
            StlFormat::Binary,
            false,
            &UnreachableExtractor,
        )
        .unwrap_err();

        assert!(matches!(err, ReliefwerkError::UnsupportedFormat(_)));
    }

    #[test]
    fn missing_raster_input_is_not_found() {
        let err = convert_document(
            Path::new("/no/such/board.png"),
            None,
            &small_dimensions(),
            &ConvertConfig::default(),
            StlFormat::Binary,
            false,
            &UnreachableExtractor,
        )
        .unwrap_err();

        assert!(matches!(err, ReliefwerkError::NotFound(_)));
    }

    #[test]
    fn rasterize_rejects_non_pdf_inputs() {
        let err = rasterize_document(Path::new("board.png"), None, 400).unwrap_err();
        assert!(matches!(err, ReliefwerkError::UnsupportedFormat(_)));
    }
}
