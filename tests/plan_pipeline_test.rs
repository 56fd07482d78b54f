//! End-to-end tests of the image → commands pipeline.

mod common;

use common::fixtures::{self, colors};
use common::TestWorkspace;
use mapfill::error::{ImageError, MapError};
use mapfill::models::AppConfig;
use mapfill::services::{decode_image, MapPipeline};
use pretty_assertions::assert_eq;
use quad_paint::ColorGrid;

fn config(grid_size: usize) -> AppConfig {
    AppConfig {
        grid_size,
        ..Default::default()
    }
}

/// Concentric squares plus a diagonal, in all four key colors
fn target(row: u32, col: u32) -> mapfill::models::Rgb {
    let ring = row.min(col).min(15 - row).min(15 - col);
    if row == col {
        colors::BLUE
    } else if ring < 2 {
        colors::BLACK
    } else if ring < 5 {
        colors::RED
    } else {
        colors::WHITE
    }
}

#[test]
fn test_commands_reproduce_image() {
    let ws = TestWorkspace::new();
    let image = ws.write_png("target.png", 16, target);
    let output = ws.path("commands.txt");

    let pipeline = MapPipeline::new(config(16), fixtures::key());
    let result = pipeline.plan_image(&image).unwrap();
    let count = pipeline.write_commands(&result, &output).unwrap();

    let text = ws.read(&output);
    assert_eq!(text.lines().count(), count);
    assert_eq!(count, result.plan.markers().len());
    common::assert_commands_reproduce(&text, pipeline.key(), "minecraft", &result.grid);
}

#[test]
fn test_optimized_plan_is_not_longer() {
    let ws = TestWorkspace::new();
    let image = ws.write_png("target.png", 16, target);

    let optimized = MapPipeline::new(config(16), fixtures::key())
        .plan_image(&image)
        .unwrap();
    let raw = MapPipeline::new(
        AppConfig {
            optimize: false,
            ..config(16)
        },
        fixtures::key(),
    )
    .plan_image(&image)
    .unwrap();

    assert_eq!(optimized.grid, raw.grid);
    assert!(optimized.plan.markers().len() <= raw.plan.markers().len());
    assert_eq!(raw.plan.stats().extracted, raw.plan.markers().len());
}

#[test]
fn test_uniform_image_is_one_command() {
    let ws = TestWorkspace::new();
    let image = ws.write_png("red.png", 8, |_, _| (190, 40, 35));
    let output = ws.path("commands.txt");

    let pipeline = MapPipeline::new(config(8), fixtures::key());
    let result = pipeline.plan_image(&image).unwrap();
    pipeline.write_commands(&result, &output).unwrap();

    assert_eq!(
        ws.read(&output),
        "/fill ~0 ~-1 ~0 ~7 ~-1 ~7 minecraft:red_concrete\n"
    );
}

#[test]
fn test_corner_block_commands() {
    let ws = TestWorkspace::new();
    let image = ws.write_png("corner.png", 4, |row, col| {
        if row >= 2 && col >= 2 {
            colors::BLACK
        } else {
            colors::WHITE
        }
    });
    let output = ws.path("commands.txt");

    let pipeline = MapPipeline::new(config(4), fixtures::key());
    let result = pipeline.plan_image(&image).unwrap();
    pipeline.write_commands(&result, &output).unwrap();

    assert_eq!(
        ws.read(&output),
        "/fill ~0 ~-1 ~0 ~3 ~-1 ~3 minecraft:white_concrete\n\
         /fill ~2 ~-1 ~2 ~3 ~-1 ~3 minecraft:black_concrete\n"
    );
}

#[test]
fn test_custom_namespace_and_offset() {
    let ws = TestWorkspace::new();
    let image = ws.write_png("target.png", 16, target);
    let output = ws.path("commands.txt");

    let pipeline = MapPipeline::new(
        AppConfig {
            namespace: "mymod".to_string(),
            y_offset: 12,
            ..config(16)
        },
        fixtures::key(),
    );
    let result = pipeline.plan_image(&image).unwrap();
    pipeline.write_commands(&result, &output).unwrap();

    let text = ws.read(&output);
    assert!(text.lines().all(|l| l.contains(" ~12 ") && l.contains(" mymod:")));
    common::assert_commands_reproduce(&text, pipeline.key(), "mymod", &result.grid);
}

#[test]
fn test_coarse_detail_limit_reproduces_target() {
    let ws = TestWorkspace::new();
    let image = ws.write_png("target.png", 16, target);
    let output = ws.path("commands.txt");

    let pipeline = MapPipeline::new(
        AppConfig {
            detail_limit: 4,
            ..config(16)
        },
        fixtures::key(),
    );
    let result = pipeline.plan_image(&image).unwrap();
    pipeline.write_commands(&result, &output).unwrap();

    let text = ws.read(&output);
    common::assert_commands_reproduce(&text, pipeline.key(), "minecraft", result.plan.target());
    let markers = common::parse_fill_commands(&text, pipeline.key(), "minecraft");
    assert!(markers.iter().all(|m| m.width() >= 4 && m.height() >= 4));
}

#[test]
fn test_preview_and_indices() {
    let ws = TestWorkspace::new();
    let image = ws.write_png("target.png", 16, target);
    let preview = ws.path("preview.png");
    let indices = ws.path("indices.txt");

    let pipeline = MapPipeline::new(config(16), fixtures::key());
    let result = pipeline.plan_image(&image).unwrap();
    pipeline.write_preview(&result, &preview).unwrap();
    pipeline.write_indices(&result, &indices).unwrap();

    let bytes = std::fs::read(&preview).unwrap();
    common::assert_png(&bytes);
    let decoded = decode_image(std::io::Cursor::new(bytes), 32).unwrap();
    assert_eq!((decoded.width, decoded.height), (32, 32));
    // Preview at scale 2 shows the source colors
    assert_eq!(decoded.pixels[0], colors::BLUE);
    assert_eq!(decoded.pixels[2], colors::BLACK);
    assert_eq!(decoded.pixels[10 * 32 + 14], colors::WHITE);

    let dumped: Vec<u16> = ws
        .read(&indices)
        .lines()
        .map(|l| l.parse().unwrap())
        .collect();
    assert_eq!(dumped, result.grid.cells());
}

#[test]
fn test_rejects_wrong_image_size() {
    let ws = TestWorkspace::new();
    let image = ws.write_png("small.png", 8, |_, _| colors::WHITE);

    let result = MapPipeline::new(config(16), fixtures::key()).plan_image(&image);
    assert!(matches!(
        result,
        Err(MapError::Image(ImageError::UnsupportedDimensions {
            width: 8,
            height: 8,
            expected: 16
        }))
    ));
}

#[test]
fn test_rejects_unknown_format() {
    let ws = TestWorkspace::new();
    let image = ws.write("bogus.png", "definitely not a png");

    let result = MapPipeline::new(config(16), fixtures::key()).plan_image(&image);
    assert!(matches!(
        result,
        Err(MapError::Image(ImageError::UnsupportedFormat(_)))
    ));
}

#[test]
fn test_rejects_truncated_png() {
    let ws = TestWorkspace::new();
    let mut bytes = fixtures::png_bytes(16, target);
    bytes.truncate(20);
    let image = ws.write("cut.png", bytes);

    let result = MapPipeline::new(config(16), fixtures::key()).plan_image(&image);
    assert!(matches!(result, Err(MapError::Image(ImageError::PngDecode(_)))));
}

#[test]
fn test_bmp_matches_png() {
    let ws = TestWorkspace::new();
    let png = ws.write_png("target.png", 16, target);
    let bmp = ws.write_bmp("target.bmp", 16, target);
    let output = ws.path("commands.txt");

    let pipeline = MapPipeline::new(config(16), fixtures::key());
    let from_png = pipeline.plan_image(&png).unwrap();
    let from_bmp = pipeline.plan_image(&bmp).unwrap();

    // Bottom-up rows land top row first
    assert_eq!(from_bmp.grid.get(0, 0), 3);
    assert_eq!(from_bmp.grid.get(0, 1), 1);
    assert_eq!(from_bmp.grid, from_png.grid);

    pipeline.write_commands(&from_bmp, &output).unwrap();
    common::assert_commands_reproduce(&ws.read(&output), pipeline.key(), "minecraft", &from_bmp.grid);
}

#[test]
fn test_bmp_alpha_is_flattened_to_white() {
    let ws = TestWorkspace::new();
    let image = ws.write_bmp_rgba("corner.bmp", 4, |row, col| {
        if row < 2 && col < 2 {
            (0, 0, 0, 255)
        } else {
            (0, 0, 0, 0)
        }
    });
    let output = ws.path("commands.txt");

    let pipeline = MapPipeline::new(config(4), fixtures::key());
    let result = pipeline.plan_image(&image).unwrap();
    pipeline.write_commands(&result, &output).unwrap();

    assert_eq!(
        ws.read(&output),
        "/fill ~0 ~-1 ~0 ~3 ~-1 ~3 minecraft:white_concrete\n\
         /fill ~0 ~-1 ~0 ~1 ~-1 ~1 minecraft:black_concrete\n"
    );
}

#[test]
fn test_default_grid_size_image() {
    let ws = TestWorkspace::new();
    let image = ws.write_png("map.png", 128, |row, col| {
        if (row / 16 + col / 16) % 2 == 0 {
            colors::WHITE
        } else {
            colors::RED
        }
    });
    let output = ws.path("commands.txt");

    let pipeline = MapPipeline::new(AppConfig::default(), fixtures::key());
    let result = pipeline.plan_image(&image).unwrap();
    pipeline.write_commands(&result, &output).unwrap();

    assert_eq!(result.grid, {
        let cells = (0..128 * 128)
            .map(|i| (((i / 128) / 16 + (i % 128) / 16) % 2 * 2) as u16)
            .collect();
        ColorGrid::new(128, 4, cells).unwrap()
    });
    common::assert_commands_reproduce(&ws.read(&output), pipeline.key(), "minecraft", &result.grid);
}
