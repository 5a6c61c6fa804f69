use bytemuck::{Pod, Zeroable};

/// Vertex layout shared by every backend: position plus flat colour.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Indexed triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl Mesh {
    /// Axis-aligned cube centred on the origin, one colour per face.
    /// Faces wind counter-clockwise when seen from outside.
    pub fn cube(size: f32) -> Self {
        let p = size * 0.5;
        // (corners in CCW order, colour)
        #[rustfmt::skip]
        let faces: [([[f32; 3]; 4], [f32; 3]); 6] = [
            // +Z
            ([[-p, -p,  p], [ p, -p,  p], [ p,  p,  p], [-p,  p,  p]], [1.0, 0.0, 0.0]),
            // -Z
            ([[ p, -p, -p], [-p, -p, -p], [-p,  p, -p], [ p,  p, -p]], [0.0, 1.0, 0.0]),
            // +X
            ([[ p, -p,  p], [ p, -p, -p], [ p,  p, -p], [ p,  p,  p]], [0.0, 0.0, 1.0]),
            // -X
            ([[-p, -p, -p], [-p, -p,  p], [-p,  p,  p], [-p,  p, -p]], [1.0, 1.0, 0.0]),
            // +Y
            ([[-p,  p,  p], [ p,  p,  p], [ p,  p, -p], [-p,  p, -p]], [1.0, 0.0, 1.0]),
            // -Y
            ([[-p, -p, -p], [ p, -p, -p], [ p, -p,  p], [-p, -p,  p]], [0.0, 1.0, 1.0]),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (corners, color) in faces {
            let base = vertices.len() as u16;
            vertices.extend(corners.iter().map(|&position| Vertex { position, color }));
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }

        Self { vertices, indices }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}
