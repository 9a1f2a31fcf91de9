// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// STL emission — serializes the scaled mesh to a binary or ASCII STL file.
// Binary output goes through the `stl_io` crate; ASCII is formatted in
// place. Facet normals are recomputed from the triangle winding.

use std::fs;
use std::io::BufWriter;
use std::path::Path;

use reliefwerk_core::error::Result;
use tracing::{info, instrument};

use crate::Mesh;

/// On-disk STL flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlFormat {
    /// 50 bytes per triangle; what slicers expect.
    Binary,
    /// Human-readable triangle soup, for inspection and diffing.
    Ascii,
}

/// Write `mesh` to `path` in the requested STL flavour.
///
/// The solid name embedded in the file is the output file stem.
#[instrument(skip_all, fields(path = %path.as_ref().display(), triangles = mesh.triangles.len()))]
pub fn write_mesh(path: impl AsRef<Path>, mesh: &Mesh, format: StlFormat) -> Result<()> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("reliefwerk");

    match format {
        StlFormat::Binary => write_binary(path, mesh)?,
        StlFormat::Ascii => fs::write(path, to_ascii(mesh, name))?,
    }

    info!(?format, "Mesh written");
    Ok(())
}

fn write_binary(path: &Path, mesh: &Mesh) -> Result<()> {
    let triangles: Vec<stl_io::Triangle> = mesh
        .triangles
        .iter()
        .map(|tri| {
            let corners = triangle_corners(mesh, tri);
            stl_io::Triangle {
                normal: stl_io::Normal::new(triangle_normal(corners)),
                vertices: corners.map(stl_io::Vertex::new),
            }
        })
        .collect();

    let mut writer = BufWriter::new(fs::File::create(path)?);
    stl_io::write_stl(&mut writer, triangles.iter())?;
    Ok(())
}

fn to_ascii(mesh: &Mesh, name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("solid {name}\n"));

    for tri in &mesh.triangles {
        let corners = triangle_corners(mesh, tri);
        let [nx, ny, nz] = triangle_normal(corners);

        out.push_str(&format!("  facet normal {nx:.6} {ny:.6} {nz:.6}\n"));
        out.push_str("    outer loop\n");
        for [x, y, z] in corners {
            out.push_str(&format!("      vertex {x:.6} {y:.6} {z:.6}\n"));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }

    out.push_str(&format!("endsolid {name}\n"));
    out
}

fn triangle_corners(mesh: &Mesh, tri: &[u32; 3]) -> [[f32; 3]; 3] {
    [
        mesh.vertices[tri[0] as usize],
        mesh.vertices[tri[1] as usize],
        mesh.vertices[tri[2] as usize],
    ]
}

fn triangle_normal([a, b, c]: [[f32; 3]; 3]) -> [f32; 3] {
    let ab = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let ac = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    normalize(cross(ab, ac))
}

#[inline]
fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len <= f32::EPSILON {
        [0.0, 0.0, 0.0]
    } else {
        [v[0] / len, v[1] / len, v[2] / len]
    }
}
