//! The rendering device: a stateful drawing API over the pipeline.
//!
//! A [`Device`] owns the framebuffer, the transform stage, the current
//! texture, and the lighting and material state. Triangles submitted with
//! [`Device::draw_triangle`] are transformed, culled, tested against the
//! clip volume, rasterized, shaded and depth-tested into the active color
//! buffer. [`Device::present`] hands the finished frame to the surface.

use log::{debug, info, trace, warn};

use crate::error::{Error, Result};
use crate::geom::Vertex;
use crate::math::{Color, Mat4, Vec4, lookat, pt4};
use crate::util::Dims;

use super::{
    ClipTest, Context, Filter, Mode, Stats, Surface, Transform,
    light::shade,
    raster::{line, tri_fill},
    target::Framebuf,
    tex::{PixelFormat, Texture},
};

/// A software rendering device drawing to a surface `S`.
///
/// # Examples
/// ```
/// use softfb_core::prelude::*;
///
/// let mut dev = Device::with_projection(MemSurface::new(4, 4), Mat4::IDENTITY)
///     .unwrap();
/// dev.clear_color(rgb(0.0, 0.0, 1.0));
/// dev.clear();
/// dev.present().unwrap();
///
/// let surf = dev.surface().unwrap();
/// assert_eq!(surf.pixel(0, 0), Some(0x00_00_00_FF));
/// ```
#[derive(Debug)]
pub struct Device<S> {
    surface: Option<S>,
    framebuf: Framebuf,
    transform: Transform,
    normal_xform: Mat4,
    ctx: Context,
    texture: Option<Texture>,
    camera_pos: Vec4,
    camera_world: Vec4,
    light_world: Vec4,
    stats: Stats,
}

impl<S: Surface> Device<S> {
    /// Returns a device drawing to `surface`, with buffers sized to the
    /// resolution of the surface and the default perspective projection
    /// (see [`Transform::new`]).
    ///
    /// # Errors
    /// [`Error::InvalidResolution`] if the surface has zero width or height.
    #[cfg(feature = "fp")]
    pub fn new(surface: S) -> Result<Self> {
        let Dims(w, h) = check_dims(&surface)?;
        Ok(Self::build(surface, Transform::new(w, h)))
    }

    /// Returns a device drawing to `surface`, using `projection` as the
    /// camera-to-clip transform.
    ///
    /// # Errors
    /// [`Error::InvalidResolution`] if the surface has zero width or height.
    pub fn with_projection(surface: S, projection: Mat4) -> Result<Self> {
        let Dims(w, h) = check_dims(&surface)?;
        Ok(Self::build(surface, Transform::with_projection(w, h, projection)))
    }

    /// Returns a device that has no surface and no buffers.
    ///
    /// Every drawing and presentation call on the returned device is a
    /// no-op. Useful when the display could not be opened but the caller
    /// wants to keep running.
    pub fn not_ready() -> Self {
        warn!("creating a device without a surface");
        Self::build_with(None, Transform::with_projection(0, 0, Mat4::IDENTITY))
    }

    fn build(surface: S, transform: Transform) -> Self {
        let Dims(w, h) = surface.dims();
        info!("created {w}x{h} device");
        Self::build_with(Some(surface), transform)
    }

    fn build_with(surface: Option<S>, transform: Transform) -> Self {
        let Dims(w, h) = surface.as_ref().map_or(Dims(0, 0), S::dims);
        let ctx = Context::default();
        let light_world = ctx.light.pos * transform.world();
        Self {
            surface,
            framebuf: Framebuf::new(w as usize, h as usize),
            transform,
            normal_xform: Mat4::IDENTITY,
            ctx,
            texture: None,
            camera_pos: pt4(0.0, 0.0, 0.0),
            camera_world: pt4(0.0, 0.0, 0.0),
            light_world,
            stats: Stats::start(),
        }
    }

    //
    // Accessors
    //

    /// Returns whether `self` has a surface to draw to.
    pub fn is_ready(&self) -> bool {
        self.surface.is_some()
    }

    /// Returns the surface of `self`, if any.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }
    /// Returns the surface of `self` mutably, if any.
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }
    /// Returns the framebuffer of `self`.
    pub fn framebuf(&self) -> &Framebuf {
        &self.framebuf
    }
    /// Returns the current rendering context.
    pub fn ctx(&self) -> &Context {
        &self.ctx
    }
    /// Returns the current transform stage.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }
    /// Returns the current texture, if one has been uploaded.
    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }
    /// Returns the position of the camera in world space.
    pub fn camera_world_pos(&self) -> Vec4 {
        self.camera_world
    }
    /// Returns the position of the light in world space.
    pub fn light_world_pos(&self) -> Vec4 {
        self.light_world
    }

    /// Returns the statistics accumulated since `self` was created, with
    /// `time` set to the time elapsed since then.
    pub fn stats(&self) -> Stats {
        self.stats.clone().finish()
    }

    //
    // Configuration
    //

    /// Enables the drawing modes in `mode`.
    pub fn enable(&mut self, mode: Mode) {
        self.ctx.mode.insert(mode);
        debug!("enabled {mode:?}, now {:?}", self.ctx.mode);
    }
    /// Disables the drawing modes in `mode`.
    pub fn disable(&mut self, mode: Mode) {
        self.ctx.mode.remove(mode);
        debug!("disabled {mode:?}, now {:?}", self.ctx.mode);
    }

    /// Sets the object-to-world matrix.
    ///
    /// Also updates the cached world-space positions of the camera and
    /// the light, and the matrix used to transform normals.
    ///
    /// `world` must be invertible.
    pub fn set_world(&mut self, world: Mat4) {
        self.normal_xform = world.inverse().transpose();
        self.transform.set_world(world);
        self.camera_world = self.camera_pos * &world;
        self.light_world = self.ctx.light.pos * &world;
    }
    /// Sets the world-to-camera matrix.
    pub fn set_view(&mut self, view: Mat4) {
        self.transform.set_view(view);
    }
    /// Sets the camera-to-clip matrix.
    pub fn set_projection(&mut self, projection: Mat4) {
        self.transform.set_projection(projection);
    }
    /// Places the camera at `eye`, looking at `target`, with `up`
    /// giving the approximate up direction.
    pub fn set_camera(&mut self, eye: Vec4, target: Vec4, up: Vec4) {
        self.transform.set_view(lookat(eye, target, up));
        self.camera_pos = eye;
        self.camera_world = eye * self.transform.world();
    }

    /// Sets the object-space position of the light.
    pub fn set_light_pos(&mut self, pos: Vec4) {
        self.ctx.light.pos = pos;
        self.light_world = pos * self.transform.world();
    }
    /// Sets the ambient light color, added to every lit fragment.
    pub fn set_light_ambient(&mut self, c: Color) {
        self.ctx.light.ambient = c;
    }
    /// Sets the diffuse light color.
    pub fn set_light_diffuse(&mut self, c: Color) {
        self.ctx.light.diffuse = c;
    }
    /// Sets the specular light color. Stored but not used in shading.
    pub fn set_light_specular(&mut self, c: Color) {
        self.ctx.light.specular = c;
    }

    /// Sets the ambient reflectance of the material. Stored but not used
    /// in shading; the ambient term comes from the light alone.
    pub fn set_material_ambient(&mut self, c: Color) {
        self.ctx.material.ambient = c;
    }
    /// Sets the diffuse reflectance of the material.
    pub fn set_material_diffuse(&mut self, c: Color) {
        self.ctx.material.diffuse = c;
    }
    /// Sets the specular reflectance of the material. Stored but not used
    /// in shading.
    pub fn set_material_specular(&mut self, c: Color) {
        self.ctx.material.specular = c;
    }
    /// Sets the emitted color of the material. Stored but not used in
    /// shading.
    pub fn set_material_emission(&mut self, c: Color) {
        self.ctx.material.emission = c;
    }
    /// Sets the specular exponent of the material. Stored but not used in
    /// shading.
    pub fn set_material_shininess(&mut self, s: f32) {
        self.ctx.material.shininess = s;
    }

    /// Sets the texture sampling filter.
    pub fn set_texture_filter(&mut self, filter: Filter) {
        self.ctx.filter = filter;
    }
    /// Sets the color with which [`clear`][Self::clear] fills the color
    /// buffer.
    pub fn clear_color(&mut self, c: Color) {
        self.ctx.background = c;
    }
    /// Sets the color of wireframe edges.
    pub fn set_foreground(&mut self, c: Color) {
        self.ctx.foreground = c;
    }

    /// Replaces the current texture with one of `width` × `height` texels
    /// decoded from `bytes`.
    ///
    /// # Errors
    /// If the texture cannot be decoded; see [`Texture::from_bytes`].
    /// The previous texture, if any, is then kept.
    pub fn texture_image_2d(
        &mut self,
        width: u32,
        height: u32,
        format: PixelFormat,
        bytes: &[u8],
    ) -> Result<()> {
        match Texture::from_bytes(width, height, format, bytes) {
            Ok(tex) => {
                debug!("uploaded {width}x{height} texture");
                self.texture = Some(tex);
                Ok(())
            }
            Err(e) => {
                warn!("texture upload rejected: {e}");
                Err(e)
            }
        }
    }

    //
    // Drawing
    //

    /// Fills the active color buffer with the background color and resets
    /// the depth buffer.
    pub fn clear(&mut self) {
        if !self.check_ready("clear") {
            return;
        }
        self.framebuf.clear(self.ctx.background.to_u32());
    }

    /// Sets the pixel at (x, y) in the active color buffer to `color`.
    /// Out-of-bounds coordinates are ignored.
    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Color) {
        if !self.check_ready("draw_pixel") {
            return;
        }
        self.framebuf.set_pixel(x, y, color.to_u32());
    }

    /// Draws a line from `from` towards `to`, excluding the pixel at `to`.
    /// See [`line`] for details.
    pub fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Color) {
        if !self.check_ready("draw_line") {
            return;
        }
        let c = color.to_u32();
        let fb = &mut self.framebuf;
        line(from, to, |x, y| fb.set_pixel(x, y, c));
    }

    /// Draws a triangle with the given object-space vertices.
    ///
    /// The triangle is rejected whole if it faces away from the camera
    /// (unless [`Mode::WIREFRAME`] is enabled) or if any of its vertices is
    /// outside the clip volume. Otherwise it is filled if [`Mode::COLOR`]
    /// or [`Mode::TEXTURE_2D`] is enabled, and its edges drawn in the
    /// foreground color if `WIREFRAME` is enabled.
    ///
    /// The vertices are visible if they appear in counter-clockwise order
    /// as seen from the camera.
    pub fn draw_triangle(&mut self, v1: Vertex, v2: Vertex, v3: Vertex) {
        if !self.check_ready("draw_triangle") {
            return;
        }
        self.stats.prims.i += 1;

        let world = self.transform.world();
        let normal = (v2.pos - v1.pos).cross(&(v3.pos - v2.pos));
        let normal = normal * &self.normal_xform;

        let cam = [v1, v2, v3].map(|mut v| {
            v.normal = normal;
            v.world_pos = v.pos * world;
            self.transform.apply_model_view(&v)
        });

        let mode = self.ctx.mode;
        if !mode.contains(Mode::WIREFRAME) && is_backface(&cam) {
            trace!("rejected backface");
            return;
        }

        let clip = cam.map(|v| self.transform.apply_projection(&v));
        if clip
            .iter()
            .any(|v| self.transform.check_clip_volume(v) == ClipTest::Outside)
        {
            trace!("rejected outside clip volume");
            return;
        }

        let screen = clip.map(|v| self.transform.homogenize(&v));
        self.stats.prims.o += 1;

        if mode.intersects(Mode::COLOR | Mode::TEXTURE_2D) {
            self.fill(screen);
        }
        if mode.contains(Mode::WIREFRAME) {
            let [p1, p2, p3] = screen.map(|v| (v.pos.x as i32, v.pos.y as i32));
            let fg = self.ctx.foreground;
            self.draw_line(p1, p2, fg);
            self.draw_line(p1, p3, fg);
            self.draw_line(p2, p3, fg);
        }
    }

    /// Publishes the active color buffer to the surface, then makes the
    /// other color buffer active.
    ///
    /// # Errors
    /// Returns the error of the surface unchanged. The active buffer is
    /// not changed in that case.
    pub fn present(&mut self) -> Result<()> {
        let Some(surface) = self.surface.as_mut() else {
            warn!("present: device not ready");
            return Ok(());
        };
        surface.publish(self.framebuf.frame_bytes())?;
        self.framebuf.flip();
        self.stats.frames += 1.0;
        Ok(())
    }

    /// Scan converts, shades and depth tests a screen-space triangle.
    fn fill(&mut self, verts: [Vertex; 3]) {
        let Self {
            framebuf,
            ctx,
            texture,
            light_world,
            stats,
            ..
        } = self;

        let mode = ctx.mode;
        let texture = if mode.contains(Mode::COLOR) {
            None
        } else if let Some(tex) = texture {
            Some(&*tex)
        } else {
            trace!("no texture, skipping fill");
            return;
        };
        let lighting = mode.contains(Mode::LIGHTING);
        let (width, height) = (framebuf.width(), framebuf.height());

        tri_fill(verts, height, |sl| {
            for frag in sl.fragments(width) {
                stats.frags.i += 1;
                if !framebuf.depth_test(frag.x, frag.y, frag.inv_w) {
                    continue;
                }
                let w = frag.inv_w.recip();
                let v = sl.vary(frag.t);

                let mut color = match texture {
                    Some(tex) => tex.sample_nearest(v.texcoord * w),
                    None => v.color * w,
                };
                if lighting {
                    let normal = (v.normal * w).normalize();
                    let world_pos = v.world_pos * w;
                    let light =
                        shade(normal, world_pos, *light_world, &ctx.light, &ctx.material);
                    color = color * light;
                }

                framebuf.set_pixel(frag.x as i32, frag.y as i32, color.to_u32());
                stats.frags.o += 1;
            }
        });
    }

    fn check_ready(&self, op: &str) -> bool {
        let ready = self.is_ready();
        if !ready {
            warn!("{op}: device not ready");
        }
        ready
    }
}

fn check_dims(surface: &impl Surface) -> Result<Dims> {
    let dims @ Dims(width, height) = surface.dims();
    if dims.is_empty() {
        return Err(Error::InvalidResolution { width, height });
    }
    Ok(dims)
}

/// Returns whether the camera-space triangle `[p1, p2, p3]` faces away
/// from the camera at the origin.
fn is_backface([v1, v2, v3]: &[Vertex; 3]) -> bool {
    let (p1, p2, p3) = (v1.pos, v2.pos, v3.pos);
    let n = (p2 - p1).cross(&(p3 - p2));
    n.dot(&p1) > 0.0
}
