use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use quad_paint::{ColorGrid, Plan, Planner};

use crate::error::{ImageError, MapError, OutputError};
use crate::models::{AppConfig, ColorKey};
use crate::services::command_writer::{write_indices, CommandWriter};
use crate::services::image_loader::load_image_grid;
use crate::services::preview::render_preview;

/// Result of planning one image
pub struct MapResult {
    /// The image reduced to color key indices
    pub grid: ColorGrid,
    /// The verified paint plan
    pub plan: Plan,
}

/// Pipeline that orchestrates image → grid → plan → commands
pub struct MapPipeline {
    config: AppConfig,
    key: ColorKey,
}

impl MapPipeline {
    pub fn new(config: AppConfig, key: ColorKey) -> Self {
        Self { config, key }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn key(&self) -> &ColorKey {
        &self.key
    }

    fn planner(&self) -> Planner {
        Planner::new()
            .detail_limit(self.config.detail_limit)
            .optimize(self.config.optimize)
    }

    /// Plan an in-memory grid
    pub fn plan_grid(&self, grid: ColorGrid) -> Result<MapResult, MapError> {
        let plan = self.planner().plan(&grid)?;
        let stats = plan.stats();
        tracing::info!(
            nodes = stats.nodes,
            extracted = stats.extracted,
            merged = stats.merged,
            "Planned paint commands"
        );
        Ok(MapResult { grid, plan })
    }

    /// Load a PNG or BMP image and plan it
    pub fn plan_image(&self, path: &Path) -> Result<MapResult, MapError> {
        let grid = load_image_grid(path, &self.key, self.config.grid_size)?;
        self.plan_grid(grid)
    }

    /// Write the `/fill` commands, returning the number of lines
    pub fn write_commands(&self, result: &MapResult, path: &Path) -> Result<usize, MapError> {
        let file = File::create(path).map_err(OutputError::from)?;
        let writer = CommandWriter::new(&self.key, &self.config.namespace, self.config.y_offset);
        let count = writer.write_all(result.plan.markers(), BufWriter::new(file))?;
        tracing::debug!(path = %path.display(), count, "Wrote commands");
        Ok(count)
    }

    /// Write a PNG preview of the replayed plan
    pub fn write_preview(&self, result: &MapResult, path: &Path) -> Result<(), MapError> {
        let bytes = render_preview(
            result.plan.markers(),
            &self.key,
            result.grid.size(),
            self.config.preview_scale,
        )?;
        std::fs::write(path, bytes).map_err(ImageError::from)?;
        tracing::debug!(path = %path.display(), "Wrote preview");
        Ok(())
    }

    /// Write the grid's palette indices
    pub fn write_indices(&self, result: &MapResult, path: &Path) -> Result<(), MapError> {
        let file = File::create(path).map_err(OutputError::from)?;
        write_indices(&result.grid, BufWriter::new(file))?;
        tracing::debug!(path = %path.display(), "Wrote color indices");
        Ok(())
    }
}
