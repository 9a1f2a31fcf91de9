// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Volume builder — extrudes a binary mask into a boolean voxel grid wrapped
// in a one-voxel solid shell.

use reliefwerk_core::error::{ReliefwerkError, Result};
use reliefwerk_document::BinaryMask;
use tracing::{debug, instrument};

/// A 3D boolean voxel grid, stored flat with `x` varying fastest, then `y`,
/// then `z`. `true` marks a solid voxel.
///
/// Built from a [`BinaryMask`] by replicating it across a fixed number of
/// depth layers and wrapping the result in a one-voxel solid shell on all
/// six faces. The shell is what guarantees a closed surface: iso-surface
/// extraction over a volume whose boundary carries a non-constant pattern
/// produces open edges at the array boundary, while a uniform solid shell
/// keeps every boundary voxel face on one side of the iso-level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeMask {
    nx: usize,
    ny: usize,
    nz: usize,
    data: Vec<bool>,
}

impl VolumeMask {
    // -- Construction ---------------------------------------------------------

    /// Extrude `mask` through `layers` voxel layers and add the solid shell.
    ///
    /// The result measures `(width + 2) x (height + 2) x (layers + 2)`
    /// voxels. The interior region `[1, width] x [1, height] x [1, layers]`
    /// carries the mask value of its column; every other voxel belongs to
    /// the shell and is solid.
    #[instrument(skip_all, fields(width = mask.width(), height = mask.height(), layers))]
    pub fn extrude(mask: &BinaryMask, layers: usize) -> Result<Self> {
        if layers == 0 {
            return Err(ReliefwerkError::Mesh(
                "extrusion needs at least one layer".into(),
            ));
        }

        let nx = mask.width() + 2;
        let ny = mask.height() + 2;
        let nz = layers + 2;

        // Start fully solid; only interior voxels can be empty.
        let mut volume = Self {
            nx,
            ny,
            nz,
            data: vec![true; nx * ny * nz],
        };

        for z in 1..=layers {
            for y in 1..=mask.height() {
                for x in 1..=mask.width() {
                    let index = volume.index(x, y, z);
                    volume.data[index] = mask.get(x - 1, y - 1);
                }
            }
        }

        debug!(nx, ny, nz, "Volume extruded");
        Ok(volume)
    }

    // -- Accessors ------------------------------------------------------------

    /// Grid dimensions as `(nx, ny, nz)`.
    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.nz)
    }

    /// Voxel at (x, y, z). Callers must stay in bounds.
    pub fn get(&self, x: usize, y: usize, z: usize) -> bool {
        self.data[self.index(x, y, z)]
    }

    /// Flat voxel values, `x` fastest, then `y`, then `z`.
    pub fn values(&self) -> &[bool] {
        &self.data
    }

    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        (z * self.ny + y) * self.nx + x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_with_hole() -> BinaryMask {
        // 3x3 solid mask with an empty centre pixel.
        let mut data = vec![true; 9];
        data[4] = false;
        BinaryMask::from_raw(3, 3, data).unwrap()
    }

    #[test]
    fn extrusion_dimensions_add_the_shell() {
        let volume = VolumeMask::extrude(&mask_with_hole(), 3).unwrap();
        assert_eq!(volume.dimensions(), (5, 5, 5));
    }

    #[test]
    fn zero_layers_are_rejected() {
        assert!(VolumeMask::extrude(&mask_with_hole(), 0).is_err());
    }

    #[test]
    fn every_boundary_voxel_is_solid() {
        let volume = VolumeMask::extrude(&mask_with_hole(), 2).unwrap();
        let (nx, ny, nz) = volume.dimensions();

        for z in 0..nz {
            for y in 0..ny {
                for x in 0..nx {
                    let on_boundary = x == 0
                        || y == 0
                        || z == 0
                        || x == nx - 1
                        || y == ny - 1
                        || z == nz - 1;
                    if on_boundary {
                        assert!(volume.get(x, y, z), "boundary voxel ({x}, {y}, {z})");
                    }
                }
            }
        }
    }

    #[test]
    fn interior_replicates_the_mask_across_all_layers() {
        let layers = 4;
        let volume = VolumeMask::extrude(&mask_with_hole(), layers).unwrap();

        for z in 1..=layers {
            // Mask (1, 1) is the empty centre; everything else is solid.
            assert!(!volume.get(2, 2, z), "hole missing at layer {z}");
            assert!(volume.get(1, 1, z));
            assert!(volume.get(3, 3, z));
        }
    }
}
