//! Translation of vector shapes into discrete pixels in the framebuffer.
//!
//! Rasterization proceeds by turning a triangle into a sequence of
//! *scanlines*, each corresponding to a horizontal span of pixels covered
//! by the triangle on a given row. The scanlines, in turn, are converted
//! into a series of *fragments* that represent potentially drawn pixels.
//!
//! Both triangles and scanlines are sampled at half-pixel intervals, so
//! a pixel may receive more than one fragment from the same triangle. The
//! depth test accepts equal depths, so this never causes visible artifacts.
//!
//! The functions in this module do no shading or depth testing of their
//! own; they hand their output to caller-supplied closures.

use core::iter::successors;
use core::mem::swap;

use crate::geom::Vertex;
use crate::math::{Lerp, round_away_from_zero};

/// A horizontal, 1-pixel-thick "slice" of a triangle being rasterized.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Scanline {
    /// The row index of the line.
    pub y: usize,
    /// The screen-space vertex at the left end of the line.
    pub left: Vertex,
    /// The screen-space vertex at the right end of the line.
    pub right: Vertex,
}

/// A fragment, or a single potential pixel on a scanline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frag {
    pub x: usize,
    pub y: usize,
    /// Interpolation parameter between the ends of the scanline.
    pub t: f32,
    /// Linearly interpolated reciprocal of the clip-space `w`.
    pub inv_w: f32,
}

impl Scanline {
    /// Returns an iterator over the fragments on `self`.
    ///
    /// `x` is stepped from `left.pos.x` to `right.pos.x` inclusive in
    /// half-pixel increments; each sample falls into column `x + 0.5`
    /// truncated toward zero. Samples outside `0..width` are skipped.
    pub fn fragments(&self, width: usize) -> impl Iterator<Item = Frag> + '_ {
        let (x0, x1) = (self.left.pos.x, self.right.pos.x);
        let dx = x1 - x0;

        successors(Some(x0), |x| Some(x + 0.5))
            .take_while(move |&x| x <= x1)
            .filter_map(move |x| {
                let col = (x + 0.5) as i32;
                let col = usize::try_from(col).ok().filter(|&c| c < width)?;
                let t = if dx != 0.0 { (x - x0) / dx } else { 0.0 };
                let inv_w = self.left.inv_w.lerp(&self.right.inv_w, t);
                Some(Frag { x: col, y: self.y, t, inv_w })
            })
    }

    /// Returns the vertex at parameter `t` between the ends of `self`.
    #[inline]
    pub fn vary(&self, t: f32) -> Vertex {
        self.left.lerp(&self.right, t)
    }
}

/// Rasterizes a filled triangle defined by three screen-space vertices.
///
/// Invokes `scanline_fn` for each scanline on a row in `0..height`, with
/// the ends of the scanline ordered left to right. A triangle with zero
/// height emits no scanlines.
///
/// A triangle with a horizontal edge is filled directly. Any other
/// triangle is split in two at the height of its middle vertex.
pub fn tri_fill<F>(verts: [Vertex; 3], height: usize, mut scanline_fn: F)
where
    F: FnMut(Scanline),
{
    let [v1, v2, v3] = verts;
    let [y1, y2, y3] = verts.map(|v| v.pos.y);
    let f = &mut scanline_fn;

    if y1 == y2 {
        if y1 < y3 {
            flat_top([v1, v2, v3], height, f);
        } else {
            flat_bottom([v3, v1, v2], height, f);
        }
    } else if y1 == y3 {
        if y1 < y2 {
            flat_top([v1, v3, v2], height, f);
        } else {
            flat_bottom([v2, v1, v3], height, f);
        }
    } else if y2 == y3 {
        if y2 < y1 {
            flat_top([v2, v3, v1], height, f);
        } else {
            flat_bottom([v1, v2, v3], height, f);
        }
    } else {
        let mut sorted = verts;
        sorted.sort_unstable_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
        let [top, mid, bot] = sorted;

        let ratio = (mid.pos.y - top.pos.y) / (bot.pos.y - top.pos.y);
        let mut split = top.lerp(&bot, ratio);
        split.pos.x = ratio * (bot.pos.x - top.pos.x) + top.pos.x;
        split.pos.y = mid.pos.y;

        flat_bottom([top, split, mid], height, &mut *f);
        flat_top([split, mid, bot], height, f);
    }
}

/// Fills a triangle whose top edge `v1`–`v2` is horizontal, with the
/// apex `v3` below it.
fn flat_top(
    [v1, v2, v3]: [Vertex; 3],
    height: usize,
    scanline_fn: &mut impl FnMut(Scanline),
) {
    let (y0, y1) = (v1.pos.y, v3.pos.y);
    for_each_row(y0, y1, height, |y, ratio| {
        let l = v1.lerp(&v3, ratio);
        let r = v2.lerp(&v3, ratio);
        scanline_fn(ordered(y, l, r));
    });
}

/// Fills a triangle whose bottom edge `v2`–`v3` is horizontal, with the
/// apex `v1` above it.
fn flat_bottom(
    [v1, v2, v3]: [Vertex; 3],
    height: usize,
    scanline_fn: &mut impl FnMut(Scanline),
) {
    let (y0, y1) = (v1.pos.y, v2.pos.y);
    for_each_row(y0, y1, height, |y, ratio| {
        let l = v1.lerp(&v2, ratio);
        let r = v1.lerp(&v3, ratio);
        scanline_fn(ordered(y, l, r));
    });
}

/// Steps `y` from `y0` to `y1` inclusive in half-pixel increments,
/// invoking `row_fn` with the row index `y` rounds to and the fraction
/// of the way from `y0` to `y1`.
fn for_each_row(
    y0: f32,
    y1: f32,
    height: usize,
    mut row_fn: impl FnMut(usize, f32),
) {
    let dy = y1 - y0;
    if dy == 0.0 {
        return;
    }
    let mut y = y0;
    while y <= y1 {
        let row = round_away_from_zero(y);
        if let Ok(row) = usize::try_from(row) {
            if row < height {
                row_fn(row, (y - y0) / dy);
            }
        }
        y += 0.5;
    }
}

fn ordered(y: usize, mut left: Vertex, mut right: Vertex) -> Scanline {
    if left.pos.x > right.pos.x {
        swap(&mut left, &mut right);
    }
    Scanline { y, left, right }
}

/// Rasterizes a one-pixel-thick line from (`x1`, `y1`) towards (`x2`, `y2`)
/// using Bresenham's algorithm.
///
/// Invokes `pixel_fn` for each pixel on the line, *excluding* the final
/// endpoint, so that consecutive segments of a polyline do not overlap.
/// If the endpoints coincide, the single pixel is emitted.
pub fn line<F>((x1, y1): (i32, i32), (x2, y2): (i32, i32), mut pixel_fn: F)
where
    F: FnMut(i32, i32),
{
    if x1 == x2 && y1 == y2 {
        pixel_fn(x1, y1);
    } else if x1 == x2 {
        let step = if y2 > y1 { 1 } else { -1 };
        let mut y = y1;
        while y != y2 {
            pixel_fn(x1, y);
            y += step;
        }
    } else if y1 == y2 {
        let step = if x2 > x1 { 1 } else { -1 };
        let mut x = x1;
        while x != x2 {
            pixel_fn(x, y1);
            x += step;
        }
    } else {
        let (dx, dy) = (x2 - x1, y2 - y1);
        let (ux, uy) = (dx.signum(), dy.signum());
        let (dx, dy) = (dx.abs(), dy.abs());
        let (mut x, mut y, mut eps) = (x1, y1, 0);

        if dx > dy {
            while x != x2 {
                pixel_fn(x, y);
                eps += dy;
                if eps << 1 >= dx {
                    y += uy;
                    eps -= dx;
                }
                x += ux;
            }
        } else {
            while y != y2 {
                pixel_fn(x, y);
                eps += dx;
                if eps << 1 >= dy {
                    x += ux;
                    eps -= dy;
                }
                y += uy;
            }
        }
    }
}
