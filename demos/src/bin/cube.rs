use std::ops::ControlFlow::Continue;

use sf::prelude::*;
use sf::render::Filter;

use sf_front::{Frame, dims::VGA_640_480, minifb::Window};
use softfb_demos::{checkerboard, draw_cube};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let win = Window::builder()
        .title("softfb//cube")
        .dims(VGA_640_480)
        .build()?;

    let mut dev = Device::new(win)?;
    dev.set_camera(
        pt4(4.0, 0.0, 0.0),
        pt4(0.0, 0.0, 0.0),
        vec4(0.0, 0.0, 1.0, 0.0),
    );
    dev.enable(Mode::TEXTURE_2D | Mode::LIGHTING);

    // Faces are lit from behind, as seen along their normal
    dev.set_light_pos(pt4(-100.0, 300.0, -500.0));
    dev.set_light_ambient(rgb(0.5, 0.5, 0.5));
    dev.set_light_diffuse(rgb(0.5, 0.5, 0.5));
    dev.set_material_diffuse(rgb(0.3, 0.3, 0.3));
    dev.clear_color(rgb(0.2, 0.2, 0.3));

    let tex = checkerboard(8, 0xFF_FF_FF, 0x3F_4F_7F);
    dev.texture_image_2d(8, 8, PixelFormat::Rgba, &tex)?;
    dev.set_texture_filter(Filter::Nearest);

    Window::run(&mut dev, |frame: &mut Frame<_>| {
        let theta = frame.t.as_secs_f32();
        frame
            .dev
            .set_world(rotate(vec4(-1.0, -0.5, 1.0, 0.0), theta));
        draw_cube(frame.dev);
        Continue(())
    })?;
    Ok(())
}
