pub mod color_key;
pub mod config;

pub use color_key::{ColorKey, KeyEntry, Rgb};
pub use config::AppConfig;
