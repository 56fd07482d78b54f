//! Preview rendering: replays a marker list into an RGB PNG.

use crate::error::ImageError;
use crate::models::ColorKey;
use quad_paint::{Canvas, Marker};
use std::io::Cursor;

/// Color of cells no marker painted
const UNPAINTED: [u8; 3] = [0, 0, 0];

/// Replay `markers` on a `grid_size` canvas and render it as RGB pixels.
///
/// Every cell becomes a `scale` × `scale` block. Cells whose color has no key
/// entry are drawn like unpainted ones.
pub fn render_rgb<'m>(
    markers: impl IntoIterator<Item = &'m Marker>,
    key: &ColorKey,
    grid_size: usize,
    scale: u32,
) -> Vec<u8> {
    let canvas = Canvas::replay(grid_size, markers);
    let scale = scale as usize;
    let width = grid_size * scale;
    let mut pixels = Vec::with_capacity(width * width * 3);

    for row in 0..grid_size {
        let mut line = Vec::with_capacity(width * 3);
        for col in 0..grid_size {
            let rgb = canvas
                .get(row, col)
                .and_then(|color| key.get(color))
                .map_or(UNPAINTED, |entry| [entry.rgb.0, entry.rgb.1, entry.rgb.2]);
            for _ in 0..scale {
                line.extend_from_slice(&rgb);
            }
        }
        for _ in 0..scale {
            pixels.extend_from_slice(&line);
        }
    }
    pixels
}

/// Render the preview and encode it as an 8-bit RGB PNG.
pub fn render_preview<'m>(
    markers: impl IntoIterator<Item = &'m Marker>,
    key: &ColorKey,
    grid_size: usize,
    scale: u32,
) -> Result<Vec<u8>, ImageError> {
    let side = u32::try_from(grid_size)
        .ok()
        .and_then(|n| n.checked_mul(scale))
        .ok_or_else(|| ImageError::PngEncode(format!("preview too large: {grid_size} x {scale}")))?;
    let pixels = render_rgb(markers, key, grid_size, scale);
    encode_png(side, side, &pixels)
}

fn encode_png(width: u32, height: u32, rgb: &[u8]) -> Result<Vec<u8>, ImageError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ImageError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(rgb)
            .map_err(|e| ImageError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
