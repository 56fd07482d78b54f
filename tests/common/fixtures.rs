//! Test fixtures and constants.

use mapfill::models::{ColorKey, Rgb};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Colors of the test key, in key order
pub mod colors {
    use mapfill::models::Rgb;

    pub const WHITE: Rgb = (255, 255, 255);
    pub const BLACK: Rgb = (0, 0, 0);
    pub const RED: Rgb = (200, 30, 30);
    pub const BLUE: Rgb = (30, 30, 200);
}

/// Color key used by most tests
pub const KEY: &str = "\
# test palette
255,255,255,white_concrete
0,0,0,black_concrete
200,30,30,red_concrete
30,30,200,blue_concrete
";

pub fn key() -> ColorKey {
    KEY.parse().expect("test key parses")
}

/// Encode an RGB image whose pixel at (row, col) is `pixel(row, col)`
pub fn png_bytes(size: u32, pixel: impl Fn(u32, u32) -> Rgb) -> Vec<u8> {
    let mut data = Vec::with_capacity((size * size * 3) as usize);
    for row in 0..size {
        for col in 0..size {
            let (r, g, b) = pixel(row, col);
            data.extend_from_slice(&[r, g, b]);
        }
    }

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, size, size);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("png header");
        writer.write_image_data(&data).expect("png data");
    }
    buf.into_inner()
}

/// Encode a 24-bit BMP whose pixel at (row, col) is `pixel(row, col)`
pub fn bmp_bytes(size: u32, pixel: impl Fn(u32, u32) -> Rgb) -> Vec<u8> {
    let mut data = Vec::with_capacity((size * size * 3) as usize);
    for row in 0..size {
        for col in 0..size {
            let (r, g, b) = pixel(row, col);
            data.extend_from_slice(&[r, g, b]);
        }
    }
    encode_bmp(size, &data, image::ExtendedColorType::Rgb8)
}

/// Encode a 32-bit BMP whose pixel at (row, col) is the RGBA `pixel(row, col)`
pub fn bmp_rgba_bytes(size: u32, pixel: impl Fn(u32, u32) -> (u8, u8, u8, u8)) -> Vec<u8> {
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for row in 0..size {
        for col in 0..size {
            let (r, g, b, a) = pixel(row, col);
            data.extend_from_slice(&[r, g, b, a]);
        }
    }
    encode_bmp(size, &data, image::ExtendedColorType::Rgba8)
}

fn encode_bmp(size: u32, data: &[u8], color: image::ExtendedColorType) -> Vec<u8> {
    let mut buf = Vec::new();
    image::codecs::bmp::BmpEncoder::new(&mut buf)
        .encode(data, size, size, color)
        .expect("bmp data");
    buf
}

/// A scratch directory holding a color key and test images
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("key.csv"), KEY).expect("write key");
        Self { dir }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn key_path(&self) -> PathBuf {
        self.path("key.csv")
    }

    pub fn write(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).expect("write fixture");
        path
    }

    pub fn write_png(&self, name: &str, size: u32, pixel: impl Fn(u32, u32) -> Rgb) -> PathBuf {
        self.write(name, png_bytes(size, pixel))
    }

    pub fn write_bmp(&self, name: &str, size: u32, pixel: impl Fn(u32, u32) -> Rgb) -> PathBuf {
        self.write(name, bmp_bytes(size, pixel))
    }

    pub fn write_bmp_rgba(
        &self,
        name: &str,
        size: u32,
        pixel: impl Fn(u32, u32) -> (u8, u8, u8, u8),
    ) -> PathBuf {
        self.write(name, bmp_rgba_bytes(size, pixel))
    }

    pub fn read(&self, path: &Path) -> String {
        std::fs::read_to_string(path).expect("read output")
    }
}
