// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Mesh scaling — maps voxel-index coordinates onto the requested physical
// bounding box.

use reliefwerk_core::error::{ReliefwerkError, Result};
use reliefwerk_core::types::OutputDimensions;
use tracing::{debug, instrument};

use crate::{Mesh, RawMesh};

/// Scale a raw mesh from voxel-index space into physical millimetres.
///
/// The voxel spacing on each axis is `physical / (count - 1)`, so voxel
/// index `count - 1` lands exactly on the requested physical extent: the
/// grid spans the whole bounding box, `x` maps to width, `y` to depth, and
/// `z` to height.
#[instrument(skip_all, fields(grid = ?grid, vertices = raw.vertices.len()))]
pub fn scale_mesh(
    raw: RawMesh,
    grid: (usize, usize, usize),
    dimensions: &OutputDimensions,
) -> Result<Mesh> {
    let (nx, ny, nz) = grid;
    if nx < 2 || ny < 2 || nz < 2 {
        return Err(ReliefwerkError::Mesh(format!(
            "cannot scale a {nx}x{ny}x{nz} grid"
        )));
    }

    let spacing = [
        dimensions.width() / (nx - 1) as f64,
        dimensions.depth() / (ny - 1) as f64,
        dimensions.height() / (nz - 1) as f64,
    ];

    debug!(?spacing, "Scaling mesh");

    let vertices = raw
        .vertices
        .into_iter()
        .map(|vertex| {
            [
                (vertex[0] as f64 * spacing[0]) as f32,
                (vertex[1] as f64 * spacing[1]) as f32,
                (vertex[2] as f64 * spacing[2]) as f32,
            ]
        })
        .collect();

    Ok(Mesh {
        vertices,
        triangles: raw.triangles,
    })
}
