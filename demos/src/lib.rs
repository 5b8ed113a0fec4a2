//! Shared geometry for the demo programs.

use sf::prelude::*;

/// Corners of a 2×2×2 cube centered at the origin, with texture
/// coordinates and colors.
pub const CUBE: [Vertex; 8] = [
    cube_vertex(1.0, -1.0, 1.0, uv(0.0, 0.0), [1.0, 0.2, 0.2]),
    cube_vertex(-1.0, -1.0, 1.0, uv(0.0, 1.0), [0.2, 1.0, 0.2]),
    cube_vertex(-1.0, 1.0, 1.0, uv(1.0, 1.0), [0.2, 0.2, 1.0]),
    cube_vertex(1.0, 1.0, 1.0, uv(1.0, 0.0), [1.0, 0.2, 1.0]),
    cube_vertex(1.0, -1.0, -1.0, uv(0.0, 0.0), [1.0, 1.0, 0.2]),
    cube_vertex(-1.0, -1.0, -1.0, uv(0.0, 1.0), [0.2, 1.0, 1.0]),
    cube_vertex(-1.0, 1.0, -1.0, uv(1.0, 1.0), [1.0, 0.3, 0.3]),
    cube_vertex(1.0, 1.0, -1.0, uv(1.0, 0.0), [0.2, 1.0, 0.3]),
];

/// Faces of the cube as quads of indices into [`CUBE`], wound
/// counter-clockwise as seen from outside the cube.
pub const FACES: [[usize; 4]; 6] = [
    [3, 2, 1, 0],
    [4, 5, 6, 7],
    [1, 5, 4, 0],
    [2, 6, 5, 1],
    [3, 7, 6, 2],
    [0, 4, 7, 3],
];

const fn cube_vertex(x: f32, y: f32, z: f32, tc: TexCoord, [r, g, b]: [f32; 3]) -> Vertex {
    Vertex {
        pos: pt4(x, y, z),
        color: Color { r, g, b },
        texcoord: tc,
        world_pos: Vec4::ZERO,
        normal: Vec4::ZERO,
        inv_w: 1.0,
    }
}

/// Draws the cube with the current state of `dev`, each face as two
/// triangles.
pub fn draw_cube<S: Surface>(dev: &mut Device<S>) {
    for [a, b, c, d] in FACES {
        let [a, b, c, d] = [a, b, c, d].map(|i| CUBE[i]);
        dev.draw_triangle(a, b, c);
        dev.draw_triangle(c, d, a);
    }
}

/// Returns an `n` × `n` checkerboard texture, in RGBA byte order.
pub fn checkerboard(n: u32, light: u32, dark: u32) -> Vec<u8> {
    (0..n)
        .flat_map(|y| (0..n).map(move |x| (x, y)))
        .flat_map(|(x, y)| {
            let c = if (x ^ y) & 1 == 0 { light } else { dark };
            let [b, g, r, _] = c.to_le_bytes();
            [b, g, r, 0xFF]
        })
        .collect()
}
