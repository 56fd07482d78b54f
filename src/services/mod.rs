pub mod command_writer;
pub mod image_loader;
pub mod map_pipeline;
pub mod preview;

pub use command_writer::{write_indices, CommandWriter};
pub use image_loader::{decode_bmp, decode_image, decode_png, image_to_grid, load_image_grid, RgbImage};
pub use map_pipeline::{MapPipeline, MapResult};
pub use preview::{render_preview, render_rgb};
