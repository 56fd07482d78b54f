use quad_paint::{ColorIndex, GridError, PlanError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Color key error: {0}")]
    ColorKey(#[from] ColorKeyError),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Planning error: {0}")]
    Plan(#[from] PlanError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

#[derive(Debug, Error)]
pub enum ColorKeyError {
    #[error("Line {line}: expected `r,g,b,name`, found {found:?}")]
    Malformed { line: usize, found: String },

    #[error("Line {line}: invalid {channel} channel {value:?}")]
    InvalidChannel {
        line: usize,
        channel: &'static str,
        value: String,
    },

    #[error("Line {line}: block name is empty")]
    EmptyName { line: usize },

    #[error("Color key has no entries")]
    Empty,

    #[error("Color key has more than {max} entries")]
    TooManyEntries { max: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("BMP decode error: {0}")]
    BmpDecode(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Unsupported dimensions: {width}x{height} (expected {expected}x{expected})")]
    UnsupportedDimensions {
        width: u32,
        height: u32,
        expected: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Marker {index} paints color {color}, which has no color key entry")]
    UnknownColor { index: usize, color: ColorIndex },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_key_error_malformed() {
        let error = ColorKeyError::Malformed {
            line: 3,
            found: "12,34".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Line 3: expected `r,g,b,name`, found \"12,34\""
        );
    }

    #[test]
    fn test_color_key_error_invalid_channel() {
        let error = ColorKeyError::InvalidChannel {
            line: 1,
            channel: "green",
            value: "300".to_string(),
        };
        assert_eq!(error.to_string(), "Line 1: invalid green channel \"300\"");
    }

    #[test]
    fn test_color_key_error_empty() {
        assert_eq!(ColorKeyError::Empty.to_string(), "Color key has no entries");
    }

    #[test]
    fn test_image_error_unsupported_dimensions() {
        let error = ImageError::UnsupportedDimensions {
            width: 64,
            height: 32,
            expected: 128,
        };
        assert_eq!(
            error.to_string(),
            "Unsupported dimensions: 64x32 (expected 128x128)"
        );
    }

    #[test]
    fn test_image_error_png_encode() {
        let error = ImageError::PngEncode("Encoding failed".to_string());
        assert_eq!(error.to_string(), "PNG encode error: Encoding failed");
    }

    #[test]
    fn test_image_error_bmp_decode() {
        let error = ImageError::BmpDecode("bad header".to_string());
        assert_eq!(error.to_string(), "BMP decode error: bad header");
    }

    #[test]
    fn test_output_error_unknown_color() {
        let error = OutputError::UnknownColor { index: 5, color: 9 };
        assert_eq!(
            error.to_string(),
            "Marker 5 paints color 9, which has no color key entry"
        );
    }

    #[test]
    fn test_map_error_from_plan_error() {
        let map_error: MapError = PlanError::InvalidDetailLimit(0).into();
        match map_error {
            MapError::Plan(_) => {}
            _ => panic!("Expected Plan variant"),
        }
    }

    #[test]
    fn test_map_error_wraps_message() {
        let map_error: MapError = ColorKeyError::Empty.into();
        assert_eq!(
            map_error.to_string(),
            "Color key error: Color key has no entries"
        );
    }
}
