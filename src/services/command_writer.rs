use crate::error::OutputError;
use crate::models::ColorKey;
use quad_paint::{ColorGrid, Marker};
use std::io::Write;

/// Formats markers as `/fill` commands.
///
/// Columns map to the x axis and rows to the z axis, both relative (`~`) to
/// the position the commands are run from.
pub struct CommandWriter<'a> {
    key: &'a ColorKey,
    namespace: &'a str,
    y_offset: i32,
}

impl<'a> CommandWriter<'a> {
    pub fn new(key: &'a ColorKey, namespace: &'a str, y_offset: i32) -> Self {
        Self {
            key,
            namespace,
            y_offset,
        }
    }

    /// The `/fill` line for one marker, without trailing newline
    pub fn format(&self, index: usize, marker: &Marker) -> Result<String, OutputError> {
        let entry = self.key.get(marker.color).ok_or(OutputError::UnknownColor {
            index,
            color: marker.color,
        })?;
        let y = self.y_offset;
        Ok(format!(
            "/fill ~{} ~{y} ~{} ~{} ~{y} ~{} {}:{}",
            marker.start_col,
            marker.start_row,
            marker.end_col,
            marker.end_row,
            self.namespace,
            entry.name
        ))
    }

    /// Write one command per line, returning the number written
    pub fn write_all<'m, W: Write>(
        &self,
        markers: impl IntoIterator<Item = &'m Marker>,
        mut out: W,
    ) -> Result<usize, OutputError> {
        let mut count = 0;
        for (index, marker) in markers.into_iter().enumerate() {
            writeln!(out, "{}", self.format(index, marker)?)?;
            count += 1;
        }
        out.flush()?;
        Ok(count)
    }
}

/// Write the grid's palette indices, one per line, row-major
pub fn write_indices<W: Write>(grid: &ColorGrid, mut out: W) -> Result<(), OutputError> {
    for &color in grid.cells() {
        writeln!(out, "{color}")?;
    }
    out.flush()?;
    Ok(())
}
