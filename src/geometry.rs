//! Static cube geometry: corner positions, face index tuples, per-face
//! normals and the texture coordinates shared by every face.

pub const FACE_COUNT: usize = 6;

#[derive(Copy, Clone, Debug)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

implement_vertex!(Vertex, position, normal, uv);

/// The 8 corners of a unit cube centered at the origin.
pub const CORNERS: [[f32; 3]; 8] = [
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Corner indices per face, wound counter-clockwise as seen from outside
/// the cube. Face i is always drawn with texture i.
pub const FACES: [[usize; 4]; FACE_COUNT] = [
    [0, 3, 2, 1], // z-
    [3, 6, 7, 2], // x-
    [6, 4, 5, 7], // z+
    [4, 0, 1, 5], // x+
    [1, 2, 7, 5], // y+
    [4, 6, 3, 0], // y-
];

/// Outward normal of each face, matching the winding above.
pub const FACE_NORMALS: [[f32; 3]; FACE_COUNT] = [
    [0.0, 0.0, -1.0],
    [-1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
];

/// Texture coordinates for the 4 corners of a face, identical for all faces.
pub const FACE_UV: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Index pattern that splits one quad into two triangles.
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Builds the 4 vertices of the given face, pairing corner j with UV
/// corner j.
pub fn face_vertices(face: usize) -> [Vertex; 4] {
    let normal = FACE_NORMALS[face];
    let mut vertices = [Vertex {
        position: [0.0; 3],
        normal,
        uv: [0.0; 2],
    }; 4];
    for (j, corner) in FACES[face].iter().enumerate() {
        vertices[j] = Vertex {
            position: CORNERS[*corner],
            normal,
            uv: FACE_UV[j % 4],
        };
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_form_a_unit_cube() {
        for corner in CORNERS.iter() {
            for &coordinate in corner.iter() {
                assert!(coordinate == 1.0 || coordinate == -1.0);
            }
        }
    }

    #[test]
    fn every_corner_is_shared_by_three_faces() {
        let mut uses = [0usize; 8];
        for face in FACES.iter() {
            for &corner in face.iter() {
                uses[corner] += 1;
            }
        }
        assert!(uses.iter().all(|&count| count == 3));
    }

    #[test]
    fn faces_are_planar() {
        for (face, normal) in FACES.iter().zip(FACE_NORMALS.iter()) {
            let axis = normal
                .iter()
                .position(|&component| component != 0.0)
                .unwrap();
            let reference = CORNERS[face[0]][axis];
            for &corner in face.iter() {
                assert_eq!(CORNERS[corner][axis], reference);
            }
        }
    }

    #[test]
    fn winding_is_counter_clockwise_from_outside() {
        // The right-hand-rule normal of the first two edges must point the
        // same way as the stored outward normal.
        for (face, normal) in FACES.iter().zip(FACE_NORMALS.iter()) {
            let a = CORNERS[face[0]];
            let b = CORNERS[face[1]];
            let c = CORNERS[face[2]];
            let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let e2 = [c[0] - b[0], c[1] - b[1], c[2] - b[2]];
            let cross = [
                e1[1] * e2[2] - e1[2] * e2[1],
                e1[2] * e2[0] - e1[0] * e2[2],
                e1[0] * e2[1] - e1[1] * e2[0],
            ];
            let dot = cross[0] * normal[0] + cross[1] * normal[1] + cross[2] * normal[2];
            assert!(dot > 0.0);
        }
    }

    #[test]
    fn face_vertices_pair_corner_j_with_uv_corner_j() {
        for face in 0..FACE_COUNT {
            let vertices = face_vertices(face);
            for (j, vertex) in vertices.iter().enumerate() {
                assert_eq!(vertex.position, CORNERS[FACES[face][j]]);
                assert_eq!(vertex.uv, FACE_UV[j % 4]);
                assert_eq!(vertex.normal, FACE_NORMALS[face]);
            }
        }
    }

    #[test]
    fn quad_indices_tessellate_one_quad() {
        assert_eq!(QUAD_INDICES.len(), 6);
        assert!(QUAD_INDICES.iter().all(|&index| index < 4));
    }
}
