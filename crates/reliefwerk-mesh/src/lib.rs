// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// reliefwerk-mesh — Volume extrusion, iso-surface extraction, and STL
// emission for the Reliefwerk converter.
//
// Takes the binary mask produced by reliefwerk-document, extrudes it into a
// shell-wrapped voxel volume, extracts the closed surface around the empty
// regions, scales it to the requested physical bounding box, and writes the
// result as STL.

pub mod extract;
pub mod scale;
pub mod stl;
pub mod volume;

/// Triangle mesh in voxel-index coordinates, as returned by a surface
/// extractor. Not yet physically scaled.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMesh {
    pub vertices: Vec<[f32; 3]>,
    pub triangles: Vec<[u32; 3]>,
}

/// Triangle mesh in physical millimetre coordinates, ready for emission.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<[f32; 3]>,
    pub triangles: Vec<[u32; 3]>,
}

pub use extract::{SurfaceExtractor, SurfaceNets};
pub use scale::scale_mesh;
pub use stl::{StlFormat, write_mesh};
pub use volume::VolumeMask;
