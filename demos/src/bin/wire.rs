//! Renders a wireframe cube without opening a window, and writes the
//! result to a PPM file given on the command line (`wire.ppm` by default).

use std::env;

use log::info;

use sf::prelude::*;
use sf::util::pnm::save_ppm;

use softfb_demos::draw_cube;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path = env::args().nth(1).unwrap_or_else(|| "wire.ppm".into());
    let dims @ Dims(w, h) = Dims(320, 240);

    let mut dev = Device::new(MemSurface::new(w, h))?;
    dev.set_camera(
        pt4(4.0, 0.0, 0.0),
        pt4(0.0, 0.0, 0.0),
        vec4(0.0, 0.0, 1.0, 0.0),
    );
    dev.enable(Mode::WIREFRAME);
    dev.set_foreground(rgb(0.4, 1.0, 0.4));
    dev.clear_color(rgb(0.0, 0.0, 0.1));

    dev.clear();
    dev.set_world(rotate(vec4(-1.0, -0.5, 1.0, 0.0), 1.2));
    draw_cube(&mut dev);
    dev.present()?;

    if let Some(surf) = dev.surface() {
        save_ppm(&path, dims, surf.frame())?;
        info!("wrote {path}");
    }
    println!("{}", dev.stats());
    Ok(())
}
