//! Writing frames as PPM images.
//!
//! PPM is the RGB member of the PNM (NetPBM) family of extremely simple
//! image formats: a short textual header followed by the pixel data.
//! Only the binary 8-bits-per-channel variant, P6, is supported.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::util::Dims;

/// Writes a frame to a file in PPM format, P6 sub-format.
///
/// `frame` is `width * height` packed `0x00RRGGBB` words in native byte
/// order, as passed to [`Surface::publish`][crate::render::Surface::publish].
///
/// Caution: This function overwrites the file if it already exists.
/// Use [`write_ppm`] for more control over file creation.
///
/// # Errors
/// Returns [`std::io::Error`] if an error occurs while writing, or if
/// `frame` is too short for the given dimensions.
pub fn save_ppm(
    path: impl AsRef<Path>,
    dims: Dims,
    frame: &[u8],
) -> io::Result<()> {
    let out = BufWriter::new(File::create(path)?);
    write_ppm(out, dims, frame)
}

/// Writes a frame to `out` in PPM format, P6 sub-format.
///
/// See [`save_ppm`] for the layout of `frame`.
///
/// # Errors
/// Returns [`std::io::Error`] if an error occurs while writing, or if
/// `frame` is too short for the given dimensions.
pub fn write_ppm(
    mut out: impl Write,
    Dims(width, height): Dims,
    frame: &[u8],
) -> io::Result<()> {
    let len = 4 * width as usize * height as usize;
    let Some(frame) = frame.get(..len) else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "frame too short for dimensions",
        ));
    };
    writeln!(out, "P6 {width} {height} 255")?;

    frame.chunks_exact(4).try_for_each(|px| {
        let [_, r, g, b] =
            u32::from_ne_bytes([px[0], px[1], px[2], px[3]]).to_be_bytes();
        out.write_all(&[r, g, b])
    })?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use super::*;

    #[test]
    fn write_ppm_p6() {
        let frame: Vec<u8> = [0x00_12_34_56_u32, 0x00_AB_CD_EF]
            .iter()
            .flat_map(|c| c.to_ne_bytes())
            .collect();

        let mut out = Vec::new();
        write_ppm(&mut out, Dims(2, 1), &frame).unwrap();
        assert_eq!(
            &out,
            b"P6 2 1 255\n\x12\x34\x56\xAB\xCD\xEF",
        );
    }

    #[test]
    fn write_ppm_short_frame() {
        let mut out = Vec::new();
        let res = write_ppm(&mut out, Dims(2, 2), &[0; 8]);
        assert_eq!(res.unwrap_err().kind(), io::ErrorKind::InvalidInput);
        assert!(out.is_empty());
    }
}
