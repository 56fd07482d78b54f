//! Image decoding (PNG and BMP) and reduction of pixels to color key indices.

use crate::error::{ImageError, MapError};
use crate::models::{ColorKey, Rgb};
use image::ImageDecoder;
use quad_paint::{ColorGrid, ColorIndex};
use std::io::{BufRead, Read, Seek};
use std::path::Path;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const BMP_SIGNATURE: [u8; 2] = *b"BM";

/// A decoded image as row-major RGB pixels, top row first, alpha already flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Rgb>,
}

/// Reject images that are not exactly `grid_size` × `grid_size`.
///
/// Runs on the header, before any pixel buffer is allocated.
fn check_dimensions(width: u32, height: u32, grid_size: usize) -> Result<(), ImageError> {
    if width as usize != grid_size || height as usize != grid_size {
        return Err(ImageError::UnsupportedDimensions {
            width,
            height,
            expected: grid_size,
        });
    }
    Ok(())
}

/// Decode a PNG stream of `grid_size` × `grid_size` pixels to RGB.
///
/// Palette, greyscale and 16-bit images are expanded to 8-bit channels.
/// Translucent pixels are composited against white.
pub fn decode_png<R: Read>(reader: R, grid_size: usize) -> Result<RgbImage, ImageError> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| ImageError::PngDecode(e.to_string()))?;
    check_dimensions(reader.info().width, reader.info().height, grid_size)?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| ImageError::PngDecode(e.to_string()))?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != png::BitDepth::Eight {
        return Err(ImageError::UnsupportedFormat(format!(
            "{:?} bit depth after expansion",
            info.bit_depth
        )));
    }

    let pixels: Vec<Rgb> = match info.color_type {
        png::ColorType::Rgba => buf
            .chunks_exact(4)
            .map(|p| flatten_alpha(p[0], p[1], p[2], p[3]))
            .collect(),
        png::ColorType::Rgb => buf.chunks_exact(3).map(|p| (p[0], p[1], p[2])).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .map(|p| flatten_alpha(p[0], p[0], p[0], p[1]))
            .collect(),
        png::ColorType::Grayscale => buf.iter().map(|&v| (v, v, v)).collect(),
        other => {
            return Err(ImageError::UnsupportedFormat(format!("{other:?} color type")));
        }
    };

    Ok(RgbImage {
        width: info.width,
        height: info.height,
        pixels,
    })
}

/// Decode a BMP stream of `grid_size` × `grid_size` pixels to RGB.
///
/// Bottom-up files come out top row first. 32-bit images with an alpha
/// channel are composited against white.
pub fn decode_bmp<R: BufRead + Seek>(reader: R, grid_size: usize) -> Result<RgbImage, ImageError> {
    let decoder = image::codecs::bmp::BmpDecoder::new(reader)
        .map_err(|e| ImageError::BmpDecode(e.to_string()))?;
    let (width, height) = decoder.dimensions();
    check_dimensions(width, height, grid_size)?;

    let color_type = decoder.color_type();
    let len = usize::try_from(decoder.total_bytes())
        .map_err(|_| ImageError::UnsupportedFormat("BMP too large".to_string()))?;
    let mut buf = vec![0u8; len];
    decoder
        .read_image(&mut buf)
        .map_err(|e| ImageError::BmpDecode(e.to_string()))?;

    let pixels: Vec<Rgb> = match color_type {
        image::ColorType::Rgba8 => buf
            .chunks_exact(4)
            .map(|p| flatten_alpha(p[0], p[1], p[2], p[3]))
            .collect(),
        image::ColorType::Rgb8 => buf.chunks_exact(3).map(|p| (p[0], p[1], p[2])).collect(),
        image::ColorType::L8 => buf.iter().map(|&v| (v, v, v)).collect(),
        other => {
            return Err(ImageError::UnsupportedFormat(format!("{other:?} BMP")));
        }
    };

    Ok(RgbImage {
        width,
        height,
        pixels,
    })
}

/// Decode a PNG or BMP stream, chosen by its file signature.
pub fn decode_image<R: BufRead + Seek>(mut reader: R, grid_size: usize) -> Result<RgbImage, ImageError> {
    let head = reader.fill_buf()?;
    let is_png = head.starts_with(&PNG_SIGNATURE);
    let is_bmp = head.starts_with(&BMP_SIGNATURE);
    if is_png {
        decode_png(reader, grid_size)
    } else if is_bmp {
        decode_bmp(reader, grid_size)
    } else {
        Err(ImageError::UnsupportedFormat(
            "not a PNG or BMP file".to_string(),
        ))
    }
}

/// Composite a pixel against white.
fn flatten_alpha(r: u8, g: u8, b: u8, a: u8) -> Rgb {
    match a {
        255 => (r, g, b),
        0 => (255, 255, 255),
        _ => {
            let af = a as u16;
            let blend = |c: u8| ((c as u16 * af + 255 * (255 - af)) / 255) as u8;
            (blend(r), blend(g), blend(b))
        }
    }
}

/// Map every pixel of a `grid_size` × `grid_size` image to its nearest key entry.
pub fn image_to_grid(
    image: &RgbImage,
    key: &ColorKey,
    grid_size: usize,
) -> Result<ColorGrid, MapError> {
    check_dimensions(image.width, image.height, grid_size)?;
    let cells: Vec<ColorIndex> = image.pixels.iter().map(|&rgb| key.nearest(rgb)).collect();
    Ok(ColorGrid::new(grid_size, key.len(), cells)?)
}

/// Load a PNG or BMP file and reduce it to a color grid.
pub fn load_image_grid(
    path: &Path,
    key: &ColorKey,
    grid_size: usize,
) -> Result<ColorGrid, MapError> {
    let file = std::fs::File::open(path).map_err(ImageError::from)?;
    let image = decode_image(std::io::BufReader::new(file), grid_size)?;
    tracing::debug!(
        path = %path.display(),
        width = image.width,
        height = image.height,
        "Decoded image"
    );
    image_to_grid(&image, key, grid_size)
}
