// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Iso-surface extraction — pulls a triangle mesh out of the voxel grid.
//
// The extraction algorithm itself is an external primitive (the
// `fast-surface-nets` crate); this module adapts the boolean volume to the
// primitive's signed-field contract and exposes the whole step behind the
// `SurfaceExtractor` trait so pipeline tests can substitute a deterministic
// fake.

use fast_surface_nets::ndshape::Shape;
use fast_surface_nets::{SurfaceNetsBuffer, surface_nets};
use reliefwerk_core::error::{ReliefwerkError, Result};
use tracing::{debug, instrument};

use crate::RawMesh;
use crate::volume::VolumeMask;

/// Capability interface for iso-surface extraction.
///
/// Implementations take a voxel grid whose six outer faces are entirely
/// solid and return a mesh in voxel-index coordinates. Under that boundary
/// invariant the returned surface is closed: every edge is shared by exactly
/// two triangles.
pub trait SurfaceExtractor {
    fn extract(&self, volume: &VolumeMask) -> Result<RawMesh>;
}

/// Default extractor backed by the `fast-surface-nets` primitive.
///
/// The boolean grid is mapped to a signed field with the iso-level at zero:
/// empty voxels (the material to print) are inside the surface, solid
/// voxels outside. The primitive's own correctness is assumed, not
/// re-verified here.
#[derive(Debug, Default, Clone, Copy)]
pub struct SurfaceNets;

impl SurfaceExtractor for SurfaceNets {
    #[instrument(skip_all, fields(dimensions = ?volume.dimensions()))]
    fn extract(&self, volume: &VolumeMask) -> Result<RawMesh> {
        let (nx, ny, nz) = volume.dimensions();
        if nx < 2 || ny < 2 || nz < 2 {
            return Err(ReliefwerkError::Mesh(format!(
                "volume {nx}x{ny}x{nz} is too small to carry a surface"
            )));
        }

        let shape = GridShape {
            nx: nx as u32,
            ny: ny as u32,
            nz: nz as u32,
        };

        // Signed field: negative inside (empty voxels become the printed
        // solid), positive outside.
        let field: Vec<f32> = volume
            .values()
            .iter()
            .map(|&solid| if solid { 1.0 } else { -1.0 })
            .collect();

        let mut buffer = SurfaceNetsBuffer::default();
        surface_nets(
            &field,
            &shape,
            [0, 0, 0],
            [nx as u32 - 1, ny as u32 - 1, nz as u32 - 1],
            &mut buffer,
        );

        let triangles = buffer
            .indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
            .collect::<Vec<_>>();

        debug!(
            vertices = buffer.positions.len(),
            triangles = triangles.len(),
            "Surface extracted"
        );

        Ok(RawMesh {
            vertices: buffer.positions,
            triangles,
        })
    }
}

/// Row-major grid layout for the surface-nets primitive: `x` fastest, then
/// `y`, then `z`, matching [`VolumeMask`]'s storage order.
#[derive(Clone, Copy)]
struct GridShape {
    nx: u32,
    ny: u32,
    nz: u32,
}

impl Shape<3> for GridShape {
    type Coord = u32;

    #[inline]
    fn as_array(&self) -> [Self::Coord; 3] {
        [self.nx, self.ny, self.nz]
    }

    fn size(&self) -> Self::Coord {
        self.nx * self.ny * self.nz
    }

    fn usize(&self) -> usize {
        (self.nx * self.ny * self.nz) as usize
    }

    fn linearize(&self, coords: [Self::Coord; 3]) -> u32 {
        let [x, y, z] = coords;
        (z * self.ny + y) * self.nx + x
    }

    fn delinearize(&self, i: u32) -> [Self::Coord; 3] {
        let x = i % self.nx;
        let yz = i / self.nx;
        [x, yz % self.ny, yz / self.ny]
    }
}
