use softfb_core::prelude::*;

use softfb_core::{
    Error,
    render::{Transform, tex::Texture},
};

const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0 };
const BLUE: Color = Color { r: 0.0, g: 0.0, b: 1.0 };

/// Cube corners, indexed by the faces below.
const CUBE_VERTS: [Vec4; 8] = [
    pt4(1.0, -1.0, 1.0),
    pt4(-1.0, -1.0, 1.0),
    pt4(-1.0, 1.0, 1.0),
    pt4(1.0, 1.0, 1.0),
    pt4(1.0, -1.0, -1.0),
    pt4(-1.0, -1.0, -1.0),
    pt4(-1.0, 1.0, -1.0),
    pt4(1.0, 1.0, -1.0),
];
/// Cube faces as quads, wound counter-clockwise as seen from outside.
const CUBE_FACES: [[usize; 4]; 6] = [
    [3, 2, 1, 0],
    [4, 5, 6, 7],
    [1, 5, 4, 0],
    [2, 6, 5, 1],
    [3, 7, 6, 2],
    [0, 4, 7, 3],
];

/// A 64×64 device with the camera five units in front of the xy plane.
fn device() -> Device<MemSurface> {
    let mut dev = Device::new(MemSurface::new(64, 64)).unwrap();
    dev.set_camera(
        pt4(0.0, 0.0, -5.0),
        pt4(0.0, 0.0, 0.0),
        vec4(0.0, 1.0, 0.0, 0.0),
    );
    dev
}

/// A triangle in the plane z = `z`, facing the camera.
fn tri(z: f32, c: Color) -> [Vertex; 3] {
    [
        vertex(pt4(-2.5, -2.5, z), c, uv(0.0, 1.0)),
        vertex(pt4(0.0, 2.5, z), c, uv(0.5, 0.0)),
        vertex(pt4(2.5, -2.5, z), c, uv(1.0, 1.0)),
    ]
}

fn draw<S: Surface>(dev: &mut Device<S>, [a, b, c]: [Vertex; 3]) {
    dev.draw_triangle(a, b, c);
}

fn draw_cube<S: Surface>(dev: &mut Device<S>) {
    let v = |i: usize| vertex(CUBE_VERTS[i], Color::WHITE, uv(0.0, 0.0));
    for [a, b, c, d] in CUBE_FACES {
        dev.draw_triangle(v(a), v(b), v(c));
        dev.draw_triangle(v(c), v(d), v(a));
    }
}

fn lit_pixels(dev: &Device<MemSurface>) -> Vec<(i32, i32, u32)> {
    let fb = dev.framebuf();
    let bg = dev.ctx().background.to_u32();
    let (w, h) = (fb.width() as i32, fb.height() as i32);
    (0..h)
        .flat_map(|y| (0..w).map(move |x| (x, y)))
        .filter_map(|(x, y)| fb.pixel(x, y).map(|c| (x, y, c)))
        .filter(|&(_, _, c)| c != bg)
        .collect()
}

fn assert_px(dev: &Device<MemSurface>, x: i32, y: i32, expected: u32) {
    let actual = dev.framebuf().pixel(x, y).unwrap();
    let close = actual
        .to_be_bytes()
        .iter()
        .zip(expected.to_be_bytes())
        .all(|(&a, e)| a.abs_diff(e) <= 1);
    assert!(close, "pixel ({x}, {y}): {actual:#08x} != {expected:#08x}");
}

#[test]
fn identity_transform_round_trip() {
    let tf = Transform::with_projection(640, 480, Mat4::IDENTITY);
    let v = vertex(pt4(0.0, 0.0, 0.5), Color::WHITE, uv(0.0, 0.0));

    let clip = tf.apply_projection(&tf.apply_model_view(&v));
    let screen = tf.homogenize(&clip);

    assert_eq!(screen.pos, pt4(320.0, 240.0, 0.5));
    assert_eq!(screen.inv_w, 1.0);
}

#[test]
fn depth_ordering_is_draw_order_independent() {
    let mut near_first = device();
    near_first.enable(Mode::COLOR);
    draw(&mut near_first, tri(0.0, RED));
    draw(&mut near_first, tri(2.0, BLUE));

    let mut far_first = device();
    far_first.enable(Mode::COLOR);
    draw(&mut far_first, tri(2.0, BLUE));
    draw(&mut far_first, tri(0.0, RED));

    assert_px(&near_first, 32, 32, 0xFF_00_00);
    assert_eq!(
        near_first.framebuf().frame_bytes(),
        far_first.framebuf().frame_bytes()
    );
}

#[test]
fn backface_writes_no_fragments() {
    let mut dev = device();
    dev.enable(Mode::COLOR);
    let [a, b, c] = tri(0.0, RED);
    dev.draw_triangle(a, c, b);

    assert!(lit_pixels(&dev).is_empty());
    assert_eq!(dev.stats().frags.i, 0);
}

#[test]
fn backface_in_wireframe_draws_edges() {
    let mut dev = device();
    dev.enable(Mode::WIREFRAME);
    let [a, b, c] = tri(0.0, RED);
    dev.draw_triangle(a, c, b);

    let lit = lit_pixels(&dev);
    // Three edges, each about 32 pixels long
    assert!(lit.len() > 64, "{}", lit.len());
    assert!(lit.iter().all(|&(_, _, c)| c == 0xFF_FF_FF));
    // Interior stays empty
    assert_eq!(dev.framebuf().pixel(32, 36), Some(0));
}

#[test]
fn clip_rejection_is_all_or_nothing() {
    let mut dev = device();
    dev.enable(Mode::COLOR | Mode::WIREFRAME);
    let [a, b, mut c] = tri(0.0, RED);
    // x/w = 2 for the last vertex
    c.pos.x = 10.0;
    dev.draw_triangle(a, b, c);

    assert!(lit_pixels(&dev).is_empty());
}

#[test]
fn lighting_has_an_ambient_floor() {
    let lit = |light_pos| {
        let mut dev = device();
        dev.enable(Mode::COLOR | Mode::LIGHTING);
        dev.set_light_pos(light_pos);
        dev.set_light_ambient(rgb(0.25, 0.25, 0.25));
        dev.set_light_diffuse(rgb(0.5, 0.5, 0.5));
        dev.set_material_diffuse(rgb(0.5, 0.5, 0.5));
        draw(&mut dev, tri(0.0, Color::WHITE));
        dev
    };
    // The visible face has its normal towards -z
    let behind = lit(pt4(0.0, 0.0, 1000.0));
    assert_px(&behind, 32, 32, 0xFF_FF_FF);

    let opposite = lit(pt4(0.0, 0.0, -1000.0));
    assert_px(&opposite, 32, 32, 0x3F_3F_3F);

    let perpendicular = lit(pt4(1000.0, 0.0, 0.0));
    assert_px(&perpendicular, 32, 32, 0x3F_3F_3F);
}

#[test]
fn nearest_sampling_clamps_to_edge() {
    #[rustfmt::skip]
    let bytes = [
        0x00, 0x00, 0xFF,  0x00, 0xFF, 0x00,
        0xFF, 0x00, 0x00,  0xFF, 0xFF, 0xFF,
    ];
    let tex = Texture::from_bytes(2, 2, PixelFormat::Rgb, &bytes).unwrap();

    assert_eq!(tex.sample_nearest(uv(-3.0, 0.0)), rgb(1.0, 0.0, 0.0));
    assert_eq!(tex.sample_nearest(uv(5.0, -1.0)), rgb(0.0, 1.0, 0.0));
    assert_eq!(tex.sample_nearest(uv(0.0, 7.0)), rgb(0.0, 0.0, 1.0));
    assert_eq!(tex.sample_nearest(uv(5.0, 5.0)), rgb(1.0, 1.0, 1.0));
}

#[test]
fn textured_triangle_uses_only_texels() {
    let mut dev = device();
    dev.enable(Mode::TEXTURE_2D);
    #[rustfmt::skip]
    let bytes = [
        0x00, 0x00, 0xFF, 0xFF,  0x00, 0xFF, 0x00, 0xFF,
        0xFF, 0x00, 0x00, 0xFF,  0xFF, 0xFF, 0xFF, 0xFF,
    ];
    dev.texture_image_2d(2, 2, PixelFormat::Rgba, &bytes).unwrap();
    draw(&mut dev, tri(0.0, Color::BLACK));

    let lit = lit_pixels(&dev);
    assert!(!lit.is_empty());
    for (x, y, c) in lit {
        assert!(
            [0xFF_00_00, 0x00_FF_00, 0x00_00_FF, 0xFF_FF_FF].contains(&c),
            "unexpected color {c:#08x} at ({x}, {y})"
        );
    }
}

#[test]
fn unsupported_texture_format() {
    assert_eq!(PixelFormat::try_from(0x1907), Ok(PixelFormat::Rgb));
    assert_eq!(PixelFormat::try_from(0x1908), Ok(PixelFormat::Rgba));
    assert_eq!(
        PixelFormat::try_from(0x80E1),
        Err(Error::UnsupportedFormat(0x80E1))
    );
}

#[test]
fn line_excludes_endpoint() {
    let mut dev = device();
    dev.draw_line((0, 0), (3, 0), Color::WHITE);

    let lit: Vec<_> = lit_pixels(&dev).iter().map(|&(x, y, _)| (x, y)).collect();
    assert_eq!(lit, [(0, 0), (1, 0), (2, 0)]);
}

#[test]
fn presentation_alternates_buffers() {
    let mut dev = device();
    let mut seen = vec![];
    for _ in 0..4 {
        seen.push(dev.framebuf().active_index());
        dev.present().unwrap();
    }
    assert_eq!(seen, [0, 1, 0, 1]);
    assert_eq!(dev.surface().unwrap().published(), 4);
}

#[test]
fn clear_touches_only_the_active_buffer() {
    let mut dev = device();

    dev.clear_color(RED);
    dev.clear();
    dev.present().unwrap();
    assert_eq!(dev.surface().unwrap().pixel(5, 5), Some(0xFF_00_00));
    assert_eq!(dev.framebuf().pixel(5, 5), Some(0));

    dev.clear_color(BLUE);
    dev.clear();
    dev.present().unwrap();
    assert_eq!(dev.surface().unwrap().pixel(5, 5), Some(0x00_00_FF));
    assert_eq!(dev.framebuf().pixel(5, 5), Some(0xFF_00_00));
}

#[test]
fn cube_shows_only_the_face_towards_the_camera() {
    let mut dev = Device::new(MemSurface::new(64, 64)).unwrap();
    dev.set_camera(
        pt4(4.0, 0.0, 0.0),
        pt4(0.0, 0.0, 0.0),
        vec4(0.0, 0.0, 1.0, 0.0),
    );
    dev.enable(Mode::COLOR);
    draw_cube(&mut dev);

    let stats = dev.stats();
    assert_eq!(stats.prims.i, 12);
    assert_eq!(stats.prims.o, 2);

    dev.enable(Mode::WIREFRAME);
    draw_cube(&mut dev);
    assert_eq!(dev.stats().prims.o, 2 + 12);
}

#[test]
fn not_ready_device_is_inert() {
    let mut dev = Device::<MemSurface>::not_ready();
    dev.enable(Mode::COLOR | Mode::WIREFRAME);
    dev.clear();
    draw(&mut dev, tri(0.0, RED));
    dev.draw_line((0, 0), (3, 0), RED);

    assert_eq!(dev.present(), Ok(()));
    assert_eq!(dev.framebuf().width(), 0);
    assert_eq!(dev.stats().prims.i, 0);
}
