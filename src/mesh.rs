//! Indexed triangle meshes, as handed over by an asset loader.
//!
//! A mesh owns a position array and a list of faces whose members are
//! zero-based indices into it. Faces wind counter-clockwise when seen from
//! outside the surface.

use crate::error::{Error, Result};
use crate::math::vec3::Vec3;

/// A triangle as three indices into the mesh's position array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl Face {
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    pub fn indices(&self) -> [usize; 3] {
        [self.a as usize, self.b as usize, self.c as usize]
    }
}

pub const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
];

pub const CUBE_FACES: [Face; 12] = [
    // Front (+z)
    Face::new(4, 5, 6),
    Face::new(4, 6, 7),
    // Back (-z)
    Face::new(1, 0, 3),
    Face::new(1, 3, 2),
    // Right (+x)
    Face::new(5, 1, 2),
    Face::new(5, 2, 6),
    // Left (-x)
    Face::new(0, 4, 7),
    Face::new(0, 7, 3),
    // Top (+y)
    Face::new(7, 6, 2),
    Face::new(7, 2, 3),
    // Bottom (-y)
    Face::new(0, 1, 5),
    Face::new(0, 5, 4),
];

/// Object-space triangle mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    positions: Vec<Vec3>,
    faces: Vec<Face>,
    min: Vec3,
    max: Vec3,
}

impl Mesh {
    /// Builds a mesh, checking that every face index is in range.
    pub fn new(positions: Vec<Vec3>, faces: Vec<Face>) -> Result<Self> {
        if let Some(face) = faces
            .iter()
            .find(|f| f.indices().iter().any(|&i| i >= positions.len()))
        {
            return Err(Error::InvalidMesh(format!(
                "face {face:?} indexes past {} positions",
                positions.len()
            )));
        }

        let (min, max) = match positions.first() {
            Some(&first) => positions
                .iter()
                .fold((first, first), |(min, max), &p| (min.min(p), max.max(p))),
            None => (Vec3::ZERO, Vec3::ZERO),
        };

        Ok(Self {
            positions,
            faces,
            min,
            max,
        })
    }

    /// A cube spanning `[-1, 1]` on every axis.
    pub fn cube() -> Self {
        Self {
            positions: CUBE_VERTICES.to_vec(),
            faces: CUBE_FACES.to_vec(),
            min: -Vec3::ONE,
            max: Vec3::ONE,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Object-space bounding box `(min, max)`.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        (self.min, self.max)
    }

    /// Iterates the faces as position triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.faces
            .iter()
            .map(move |f| f.indices().map(|i| self.positions[i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_index() {
        let err = Mesh::new(vec![Vec3::ZERO; 3], vec![Face::new(0, 1, 3)]).unwrap_err();
        assert!(matches!(err, Error::InvalidMesh(_)));
    }

    #[test]
    fn computes_bounds() {
        let mesh = Mesh::new(
            vec![
                Vec3::new(1.0, -2.0, 0.0),
                Vec3::new(-1.0, 3.0, 0.5),
                Vec3::new(0.0, 0.0, -4.0),
            ],
            vec![Face::new(0, 1, 2)],
        )
        .unwrap();
        assert_eq!(
            mesh.bounds(),
            (Vec3::new(-1.0, -2.0, -4.0), Vec3::new(1.0, 3.0, 0.5))
        );
    }

    #[test]
    fn cube_faces_point_outward() {
        let mesh = Mesh::cube();
        assert_eq!(mesh.triangles().count(), 12);

        for [a, b, c] in mesh.triangles() {
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0, "face {a:?} {b:?} {c:?} winds inward");
        }
    }
}
